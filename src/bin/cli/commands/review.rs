use std::io::{self, BufRead, Write};

use anyhow::Result;

use wordbox_lib::vocab::scheduler::preview_due_dates;
use wordbox_lib::vocab::Outcome;

use crate::app::{report_not_found, App};
use crate::render::terminal::{self, Color};

enum Answer {
    Record(Outcome),
    Skip,
    Quit,
}

fn parse_answer(line: &str) -> Option<Answer> {
    match line.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(Answer::Record(Outcome::Recalled)),
        "n" | "no" => Some(Answer::Record(Outcome::Forgotten)),
        "m" => Some(Answer::Record(Outcome::Mastered)),
        "s" | "" => Some(Answer::Skip),
        "q" => Some(Answer::Quit),
        _ => None,
    }
}

/// Walk through today's session. The session is computed once up front.
pub fn run(app: &mut App, use_color: bool) -> Result<()> {
    let session = app.vocab.due_session(app.settings.daily_limit());
    if session.is_empty() {
        println!("Nothing due on {}.", session.day);
        return Ok(());
    }

    println!("{} words due ({} new, {} review)\n", session.len(), session.new_count(), session.review_count());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut reviewed = 0;

    'session: for (i, entry) in session.entries.iter().enumerate() {
        println!("[{}/{}] {}  {}", i + 1, session.len(),
            terminal::paint(&entry.word, Color::BOLD, use_color),
            terminal::box_label(entry.box_number, use_color));
        println!("  {}", terminal::paint(&entry.context, Color::DIM, use_color));

        if let Some([recalled, forgotten, _]) = preview_due_dates(entry, session.day) {
            println!("  [y] I know it (next {})  [n] I don't (next {})  [m] mastered  [s] skip  [q] quit",
                terminal::due_in(&recalled, session.day),
                terminal::due_in(&forgotten, session.day));
        }

        let answer = loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                break Answer::Quit;
            };
            match parse_answer(&line?) {
                Some(answer) => break answer,
                None => println!("  Please answer y, n, m, s or q."),
            }
        };

        match answer {
            Answer::Record(outcome) => {
                if report_not_found(app.vocab.record_outcome(entry.id, outcome), &entry.word)?.is_some() {
                    reviewed += 1;
                }
            }
            Answer::Skip => {}
            Answer::Quit => break 'session,
        }
        println!();
    }

    println!("Reviewed {} of {} words.", reviewed, session.len());
    Ok(())
}
