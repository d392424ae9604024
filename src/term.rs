use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{poll, read, Event, KeyCode, KeyEvent};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use crate::state::GameState;

const BORDER_CHAR: char = '#';
const HEAD_CHAR: char = 'O';
const BODY_CHAR: char = 'o';
const FOOD_CHAR: char = 'F';

const HINT_LINE: &str = "Use w/a/s/d or the arrow keys to move. Press 'q' to quit.";

/// Owns the terminal for the session: raw mode on, cursor hidden. Both are
/// restored on drop, so an early return or a panic never leaves the shell
/// in raw mode.
pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        let mut stdout = stdout();
        terminal::enable_raw_mode().expect("Error enabling raw mode.");
        execute!(stdout, Hide).expect("Error hiding cursor.");
        TermManager { stdout }
    }

    /// Full redraw: clear, border ring, playfield, score and controls hint.
    pub fn draw(&mut self, state: &GameState) {
        let width = state.width() as usize;
        let height = state.height() as usize;

        let mut rows = vec![vec![' '; width]; height];
        for part in state.body() {
            rows[part.y as usize][part.x as usize] = BODY_CHAR;
        }
        let food = state.food();
        rows[food.y as usize][food.x as usize] = FOOD_CHAR;
        let head = state.head();
        rows[head.y as usize][head.x as usize] = HEAD_CHAR;

        let border: String = std::iter::repeat(BORDER_CHAR).take(width).collect();

        queue!(self.stdout, Clear(ClearType::All), MoveTo(0, 0), Print(&border))
            .expect("Error drawing frame.");

        for (y, row) in rows.iter().enumerate() {
            let mut line = String::with_capacity(width);
            line.push(BORDER_CHAR);
            line.extend(row[1..width - 1].iter());
            line.push(BORDER_CHAR);
            queue!(self.stdout, MoveTo(0, y as u16 + 1), Print(line))
                .expect("Error drawing frame.");
        }

        queue!(
            self.stdout,
            MoveTo(0, height as u16 + 1),
            Print(&border),
            MoveTo(0, height as u16 + 2),
            Print(format!("Score: {}", state.score())),
            MoveTo(0, height as u16 + 3),
            Print(HINT_LINE)
        )
        .expect("Error drawing frame.");

        self.stdout.flush().expect("Error flushing.");
    }

    pub fn clear(&mut self) {
        execute!(self.stdout, Clear(ClearType::All), MoveTo(0, 0)).expect("Error clearing.");
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, Show);
        let _ = terminal::disable_raw_mode();
    }
}

/// Non-blocking key poll: returns the pending key if one is available,
/// `None` otherwise. Never waits.
pub fn poll_key() -> Option<KeyCode> {
    if !poll(Duration::from_millis(0)).expect("Error polling input.") {
        return None;
    }
    match read().expect("Error reading input.") {
        Event::Key(KeyEvent { code, .. }) => Some(code),
        _ => None,
    }
}
