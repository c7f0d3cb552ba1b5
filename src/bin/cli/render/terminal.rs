use chrono::NaiveDate;

use wordbox_lib::calendar::DueDate;
use wordbox_lib::vocab::scheduler::format_interval;
use wordbox_lib::vocab::{Entry, MASTERED_BOX};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Box label, colored from red (new) to green (mastered)
pub fn box_label(box_number: u8, use_color: bool) -> String {
    let label = if box_number >= MASTERED_BOX {
        "mastered".to_string()
    } else {
        format!("box {}", box_number)
    };

    let color = match box_number {
        1 => Color::RED,
        2 => Color::YELLOW,
        3 => Color::BLUE,
        4 => Color::CYAN,
        5 => Color::MAGENTA,
        _ => Color::GREEN,
    };
    paint(&label, color, use_color)
}

pub fn due_label(due: &DueDate) -> String {
    match due {
        DueDate::On(_) => due.to_string(),
        DueDate::Never => "never".to_string(),
    }
}

/// Due date relative to `today`, e.g. "2d" or "1w"
pub fn due_in(due: &DueDate, today: NaiveDate) -> String {
    match due {
        DueDate::On(day) => format_interval((*day - today).num_days()),
        DueDate::Never => "never".to_string(),
    }
}

/// Truncate to `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Print entries as an aligned table
pub fn print_entries(entries: &[&Entry], use_color: bool) {
    let word_w = entries.iter().map(|e| e.word.chars().count()).max().unwrap_or(4).clamp(4, 24);
    let ctx_w = 40;
    let box_w = 8;

    println!("{:<word_w$} {:<ctx_w$} {:<box_w$} {}",
        "Word", "Context", "Box", "Next review",
        word_w = word_w, ctx_w = ctx_w, box_w = box_w);
    println!("{} {} {} {}",
        "\u{2500}".repeat(word_w),
        "\u{2500}".repeat(ctx_w),
        "\u{2500}".repeat(box_w),
        "\u{2500}".repeat(11));

    for entry in entries {
        // Pad before coloring so escape codes don't skew the columns
        let label = format!("{:<box_w$}", box_label(entry.box_number, false), box_w = box_w);
        let label = if use_color {
            label.replace(&box_label(entry.box_number, false), &box_label(entry.box_number, true))
        } else {
            label
        };

        println!("{:<word_w$} {:<ctx_w$} {} {}",
            truncate(&entry.word, word_w),
            truncate(&entry.context, ctx_w),
            label,
            due_label(&entry.next_review),
            word_w = word_w, ctx_w = ctx_w);
    }
}
