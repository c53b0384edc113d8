use std::io::{stderr, stdout, Stderr, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::{self, Color, Stylize},
    terminal::{self, disable_raw_mode, enable_raw_mode},
};
use log::debug;

use wordle_opener::{Feedback, FeedbackCode, SearchControl, Word};

pub const CORRECT_COL: Color = Color::Green;
pub const PRESENT_COL: Color = Color::Yellow;
pub const ABSENT_COL: Color = Color::DarkGrey;
pub const SCORE_COL: Color = Color::Cyan;

const CANCEL_CODE: KeyCode = KeyCode::Esc;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn result_col(code: FeedbackCode) -> Color {
    match code {
        FeedbackCode::Correct => CORRECT_COL,
        FeedbackCode::Present => PRESENT_COL,
        FeedbackCode::Absent => ABSENT_COL,
    }
}

/// Esc, Ctrl-C or Ctrl-D. Raw mode swallows the signal, so the key itself is the request.
pub fn is_cancel_key(e: &KeyEvent) -> bool {
    match e.code {
        CANCEL_CODE => true,
        KeyCode::Char('c' | 'd') => e.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Prints a guess as coloured tiles followed by its marks, e.g. `S N O R T  bygbb`.
pub fn print_feedback(feedback: &Feedback) -> crossterm::Result<()> {
    let mut stdout = stdout();
    for mark in feedback.marks() {
        let tile = mark.letter_char().to_ascii_uppercase();
        queue!(
            stdout,
            style::PrintStyledContent(tile.with(result_col(mark.code)).bold()),
            style::Print(' ')
        )?;
    }
    let marks = feedback.codes().map(FeedbackCode::to_mark);
    execute!(
        stdout,
        style::Print(format!(" {}\n", marks.iter().collect::<String>()))
    )
}

/// Prints `rank. word  score` lines for the best entries of a ranking.
pub fn print_ranking<S: std::fmt::Display>(title: &str, entries: &[(Word, S)]) -> crossterm::Result<()> {
    let mut stdout = stdout();
    queue!(stdout, style::Print(format!("{}\n", title)))?;
    for (i, (word, score)) in entries.iter().enumerate() {
        queue!(
            stdout,
            style::Print(format!("{:>4}. ", i + 1)),
            style::PrintStyledContent(word.to_string().bold()),
            style::Print("  "),
            style::PrintStyledContent(score.to_string().with(SCORE_COL)),
            style::Print("\n"),
        )?;
    }
    stdout.flush()?;
    Ok(())
}

fn draw_progress(stderr: &mut Stderr, scored: usize, total: usize, started: Instant) -> crossterm::Result<()> {
    let pct = if total == 0 {
        100.0
    } else {
        scored as f64 * 100.0 / total as f64
    };
    queue!(
        stderr,
        style::Print("\r"),
        terminal::Clear(terminal::ClearType::CurrentLine),
        style::Print(format!(
            "scored {}/{} guesses ({:.1}%) in {:.0?}  ",
            scored,
            total,
            pct,
            started.elapsed()
        )),
        style::PrintStyledContent(format!("[{} to cancel]", "Esc").with(ABSENT_COL)),
    )?;
    stderr.flush()?;
    Ok(())
}

fn clear_progress(stderr: &mut Stderr) -> crossterm::Result<()> {
    execute!(
        stderr,
        style::Print("\r"),
        terminal::Clear(terminal::ClearType::CurrentLine)
    )
}

/// Draws search progress on stderr and turns Esc / Ctrl-C into a cancellation.
///
/// Keys are only read when the terminal can be put into raw mode; otherwise the
/// line is still drawn and the search simply runs to the end.
pub struct ProgressWatcher {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressWatcher {
    pub fn start(control: SearchControl, total: usize) -> ProgressWatcher {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = Arc::clone(&running);

        let handle = thread::spawn(move || {
            let raw = match enable_raw_mode() {
                Ok(()) => true,
                Err(e) => {
                    debug!("no raw terminal, keys will not cancel the search: {}", e);
                    false
                }
            };
            let started = Instant::now();
            let mut stderr = stderr();

            while running_clone.load(Ordering::Relaxed) {
                if raw {
                    match poll_quit() {
                        Ok(true) => control.cancel(),
                        Ok(false) => {}
                        Err(e) => debug!("reading terminal events failed: {}", e),
                    }
                } else {
                    thread::sleep(POLL_INTERVAL);
                }
                if draw_progress(&mut stderr, control.scored(), total, started).is_err() {
                    break;
                }
            }

            let _ = clear_progress(&mut stderr);
            if raw {
                let _ = disable_raw_mode();
            }
        });

        ProgressWatcher {
            running,
            handle: Some(handle),
        }
    }

    pub fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ProgressWatcher {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn poll_quit() -> crossterm::Result<bool> {
    if event::poll(POLL_INTERVAL)? {
        if let Event::Key(e) = event::read()? {
            return Ok(is_cancel_key(&e));
        }
    }
    Ok(false)
}
