use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::sleep;
use std::time::Duration;

use crossterm::event::KeyCode;

use crate::state::Direction::{self, *};
use crate::term;

const POLL_INTERVAL_MS: u64 = 20;

/// The state shared between the game loop and the input listener: the
/// current steering direction and the session-over flag. Last write wins,
/// there is no queueing.
pub struct Controls {
    direction: Mutex<Direction>,
    game_over: AtomicBool,
}

impl Controls {
    pub fn new() -> Self {
        Controls { direction: Mutex::new(Stopped), game_over: AtomicBool::new(false) }
    }

    /// Applies a steering request, rejecting 180° reversals. The check and
    /// the write happen under one lock so a reversal cannot slip in between
    /// reading the current direction and storing the new one.
    pub fn steer(&self, requested: Direction) {
        let mut dir = self.direction.lock().unwrap();
        match (requested, *dir) {
            (Left, Right) | (Right, Left) | (Up, Down) | (Down, Up) => {}
            _ => *dir = requested,
        }
    }

    pub fn direction(&self) -> Direction {
        *self.direction.lock().unwrap()
    }

    pub fn stop(&self) {
        self.game_over.store(true, Ordering::SeqCst);
    }

    pub fn is_over(&self) -> bool {
        self.game_over.load(Ordering::SeqCst)
    }
}

/// Input listener loop, run on its own thread. Polls for a key without
/// blocking, maps it to a steering request or a stop, and backs off briefly
/// when nothing is pending. Exits as soon as the session is over.
pub fn listen(controls: Arc<Controls>) {
    while !controls.is_over() {
        match term::poll_key() {
            Some(KeyCode::Left) | Some(KeyCode::Char('a')) => controls.steer(Left),
            Some(KeyCode::Right) | Some(KeyCode::Char('d')) => controls.steer(Right),
            Some(KeyCode::Up) | Some(KeyCode::Char('w')) => controls.steer(Up),
            Some(KeyCode::Down) | Some(KeyCode::Char('s')) => controls.steer(Down),
            Some(KeyCode::Char('q')) => controls.stop(),
            Some(_) => {}
            None => sleep(Duration::from_millis(POLL_INTERVAL_MS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn first_steer_from_stopped_always_applies() {
        for dir in [Left, Right, Up, Down].iter() {
            let controls = Controls::new();
            controls.steer(*dir);
            assert_eq!(controls.direction(), *dir);
        }
    }

    #[test]
    fn reversals_are_rejected() {
        let pairs = [(Left, Right), (Right, Left), (Up, Down), (Down, Up)];
        for (current, attempted) in pairs.iter() {
            let controls = Controls::new();
            controls.steer(*current);
            controls.steer(*attempted);
            assert_eq!(controls.direction(), *current);
        }
    }

    #[test]
    fn perpendicular_turns_are_accepted() {
        let controls = Controls::new();
        controls.steer(Right);
        controls.steer(Up);
        assert_eq!(controls.direction(), Up);
        controls.steer(Left);
        assert_eq!(controls.direction(), Left);
    }

    #[test]
    fn stop_flag_is_sticky() {
        let controls = Controls::new();
        assert!(!controls.is_over());
        controls.stop();
        assert!(controls.is_over());
        controls.stop();
        assert!(controls.is_over());
    }

    #[test]
    fn concurrent_steering_never_yields_a_value_nobody_set() {
        let controls = Arc::new(Controls::new());

        let writers: Vec<_> = [Left, Up]
            .iter()
            .map(|dir| {
                let controls = Arc::clone(&controls);
                let dir = *dir;
                thread::spawn(move || {
                    for _ in 0..1000 {
                        controls.steer(dir);
                    }
                })
            })
            .collect();

        // Only Stopped, Left and Up are ever written; a torn or invented
        // read would show up as Right or Down.
        for _ in 0..2000 {
            let seen = controls.direction();
            assert!(matches!(seen, Stopped | Left | Up));
        }

        for writer in writers {
            writer.join().unwrap();
        }
        assert!(matches!(controls.direction(), Left | Up));
    }
}
