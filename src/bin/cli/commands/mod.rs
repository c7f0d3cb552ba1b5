pub mod add;
pub mod delete;
pub mod due;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod master;
pub mod review;
pub mod search;
pub mod settings;
pub mod stats;
