mod game;
mod input;
mod state;
mod term;

const BOARD_WIDTH: i16 = 40;
const BOARD_HEIGHT: i16 = 20;

fn main() {
    let score = game::Game::new(BOARD_WIDTH, BOARD_HEIGHT).run();

    println!("GAME OVER");
    println!("Your final score: {}", score);
}
