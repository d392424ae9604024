use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::rngs::ThreadRng;

use crate::input::{self, Controls};
use crate::state::GameState;
use crate::term::TermManager;

const TICK_INTERVAL_MS: u64 = 150;

/// Owns the authoritative game state and drives it at a fixed cadence.
/// The input listener runs on its own thread and only ever writes the
/// shared controls; the loop here only ever reads them.
pub struct Game {
    state: GameState,
    controls: Arc<Controls>,
    rng: ThreadRng,
}

impl Game {
    pub fn new(width: i16, height: i16) -> Self {
        let mut rng = rand::thread_rng();
        let state = GameState::new(width, height, &mut rng);
        Game { state, controls: Arc::new(Controls::new()), rng }
    }

    /// Runs the session to completion and returns the final score. The
    /// terminal is restored and the listener thread joined before this
    /// returns, on every path.
    pub fn run(mut self) -> u32 {
        let mut term = TermManager::new();

        let listener = {
            let controls = Arc::clone(&self.controls);
            thread::spawn(move || input::listen(controls))
        };

        // Draw-then-advance: the frame on screen is always the state before
        // this iteration's transition, so the fatal tick is never shown.
        while self.state.is_alive() && !self.controls.is_over() {
            term.draw(&self.state);
            let dir = self.controls.direction();
            self.state.advance(dir, &mut self.rng);
            thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
        }

        self.controls.stop();
        listener.join().expect("Input thread panicked.");

        term.clear();
        self.state.score()
    }
}
