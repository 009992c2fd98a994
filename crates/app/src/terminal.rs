//! Line-oriented terminal front end: renders snapshots and turns typed lines into intents.

use std::fmt;
use std::io::BufRead;

use services::{Intent, SessionSnapshot};
use tokio::sync::{mpsc, watch};
use trivia_core::model::{FinalScore, ResultEntry, RoundPhase};

//
// ─── RENDERING ─────────────────────────────────────────────────────────────────
//

/// One full redraw of the game state.
pub struct Screen<'a>(pub &'a SessionSnapshot);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let progress = &snapshot.progress;
        writeln!(f)?;
        writeln!(f, "Score: {}", snapshot.score)?;

        if let Some(score) = snapshot.final_score {
            return writeln!(f, "Game over! Your final score is {score}");
        }

        let Some(round) = &snapshot.round else {
            return writeln!(
                f,
                "Question {} of {} is ready. Type `start` to begin.",
                progress.question_number, progress.total
            );
        };

        writeln!(
            f,
            "Question {} of {}: {}",
            progress.question_number, progress.total, round.prompt
        )?;

        match round.phase {
            RoundPhase::Presenting => writeln!(f, "Get ready...")?,
            RoundPhase::AwaitingInput => {
                writeln!(f, "Time left: {}s", round.remaining_secs)?;
                for (i, choice) in round.choices.iter().enumerate() {
                    let mark = if round.selection.contains(choice) { "x" } else { " " };
                    writeln!(f, "  {}. [{mark}] {choice}", i + 1)?;
                }
                writeln!(f, "Your order: {}", round.selection.join(" > "))?;
                if round.selection_full {
                    writeln!(f, "Type `submit` to lock it in, or `reset`.")?;
                } else {
                    writeln!(f, "Pick by number or name; `reset` clears.")?;
                }
            }
            RoundPhase::Submitted => {
                if let (Some(result), Some(elapsed)) = (round.result, round.elapsed_secs) {
                    writeln!(f, "{} ({elapsed:.3}s)", capitalize(result.label()))?;
                }
                if let Some(order) = &round.correct_order {
                    writeln!(f, "Correct order: {}", order.join(" > "))?;
                }
                writeln!(f, "Type `next` to continue.")?;
            }
            RoundPhase::Idle | RoundPhase::Completed => {}
        }
        Ok(())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// End-of-game per-question summary.
pub struct Summary<'a> {
    score: FinalScore,
    results: &'a [ResultEntry],
}

impl<'a> Summary<'a> {
    #[must_use]
    pub fn new(score: FinalScore, results: &'a [ResultEntry]) -> Self {
        Self { score, results }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Question summary ({})", self.score)?;
        for (i, entry) in self.results.iter().enumerate() {
            writeln!(
                f,
                "  Q{}: {} in {}s",
                i + 1,
                entry.result(),
                entry.elapsed_label()
            )?;
        }
        Ok(())
    }
}

/// Redraws on every published snapshot until the game ends.
pub async fn render_loop(mut snapshots: watch::Receiver<SessionSnapshot>) {
    print!("{}", Screen(&snapshots.borrow_and_update()));
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        print!("{}", Screen(&snapshot));
        if snapshot.is_complete() {
            break;
        }
    }
}

//
// ─── INPUT ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, PartialEq, Eq)]
pub enum InputError {
    Empty,
    Unknown(String),
    NoSuchChoice(usize),
    SelectionIncomplete { picked: usize, needed: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "type a command (start, 1-4, reset, submit, next, quit)"),
            InputError::Unknown(raw) => write!(f, "unknown command: {raw}"),
            InputError::NoSuchChoice(n) => write!(f, "there is no choice {n}"),
            InputError::SelectionIncomplete { picked, needed } => {
                write!(f, "pick all choices before submitting ({picked}/{needed})")
            }
        }
    }
}

/// Maps a typed line onto an intent, using the snapshot to resolve choice numbers.
///
/// Submitting is refused until the selection is full; the timer can still force it.
pub fn parse_command(line: &str, snapshot: &SessionSnapshot) -> Result<Intent, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputError::Empty);
    }
    match line.to_lowercase().as_str() {
        "s" | "start" => return Ok(Intent::StartRound),
        "r" | "reset" => return Ok(Intent::Reset),
        "n" | "next" => return Ok(Intent::Advance),
        "q" | "quit" | "exit" => return Ok(Intent::Quit),
        "submit" | "done" => {
            if let Some(round) = &snapshot.round {
                if round.phase == RoundPhase::AwaitingInput && !round.selection_full {
                    return Err(InputError::SelectionIncomplete {
                        picked: round.selection.len(),
                        needed: round.choices.len(),
                    });
                }
            }
            return Ok(Intent::Submit);
        }
        _ => {}
    }

    let choices = snapshot
        .round
        .as_ref()
        .map(|round| round.choices.as_slice())
        .unwrap_or_default();
    if let Ok(n) = line.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| choices.get(i))
            .map(|label| Intent::Toggle(label.clone()))
            .ok_or(InputError::NoSuchChoice(n));
    }
    choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(line))
        .map(|label| Intent::Toggle(label.clone()))
        .ok_or_else(|| InputError::Unknown(line.to_string()))
}

/// Reads stdin on a dedicated thread and forwards intents until the game stops listening.
pub fn spawn_input_thread(
    intents: mpsc::Sender<Intent>,
    snapshots: watch::Receiver<SessionSnapshot>,
) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let parsed = parse_command(&line, &snapshots.borrow());
            match parsed {
                Ok(intent) => {
                    if intents.blocking_send(intent).is_err() {
                        break;
                    }
                }
                Err(err) => println!("{err}"),
            }
        }
        tracing::debug!("input closed");
    });
}
