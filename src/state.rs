use std::collections::VecDeque;

use rand::Rng;

pub const FOOD_REWARD: u32 = 10;

/// A 0-based grid coordinate. Signed so the transition can step past the
/// playable area and let the wall check catch it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Stopped,
    Left,
    Right,
    Up,
    Down,
}

/// The authoritative game model: snake geometry, food, score and liveness.
/// Owned by the game loop; advanced exactly once per tick.
pub struct GameState {
    width: i16,
    height: i16,
    head: Point,
    body: VecDeque<Point>,
    food: Point,
    score: u32,
    alive: bool,
}

impl GameState {
    pub fn new(width: i16, height: i16, rng: &mut impl Rng) -> Self {
        let head = Point { x: width / 2, y: height / 2 };
        let food = random_food(width, height, rng);
        GameState { width, height, head, body: VecDeque::new(), food, score: 0, alive: true }
    }

    /// Advances the game by one tick. The direction is the single snapshot
    /// read from the shared cell for this tick; the step order below is
    /// load-bearing (grow, move, wall check, self check, food check).
    pub fn advance(&mut self, dir: Direction, rng: &mut impl Rng) {
        if !self.alive {
            return;
        }

        // The head leaves a body segment behind whenever it moves.
        if dir != Direction::Stopped {
            self.body.push_front(self.head);
        }

        match dir {
            Direction::Left => self.head.x -= 1,
            Direction::Right => self.head.x += 1,
            Direction::Up => self.head.y -= 1,
            Direction::Down => self.head.y += 1,
            Direction::Stopped => {}
        }

        // The x bound treats both border columns as lethal; the y bound
        // treats row 0 as legal and row `height` as the first illegal one.
        // The offset between the two is part of the contract.
        if self.head.x >= self.width - 1
            || self.head.x <= 0
            || self.head.y >= self.height
            || self.head.y < 0
        {
            self.alive = false;
            return;
        }

        if self.body.contains(&self.head) {
            self.alive = false;
            return;
        }

        if self.head == self.food {
            // Eating keeps the tail, so the body nets one segment. The
            // respawn does not avoid the snake.
            self.score += FOOD_REWARD;
            self.food = random_food(self.width, self.height, rng);
        } else if dir != Direction::Stopped {
            self.body.pop_back();
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn head(&self) -> Point {
        self.head
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn body(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }
}

/// Uniformly random interior cell, never on the border ring.
fn random_food(width: i16, height: i16, rng: &mut impl Rng) -> Point {
    Point {
        x: rng.gen_range(1..width - 1),
        y: rng.gen_range(1..height - 1),
    }
}
