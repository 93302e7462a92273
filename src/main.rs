//! Tenpin entry point
//!
//! Headless demo: the heuristic bowler rolls a full game and the scorecard
//! is printed when it ends. An optional first argument seeds the run.

use tenpin::consts::{FRAME_COUNT, SIM_DT};
use tenpin::driver::Driver;
use tenpin::highscores::HighScores;
use tenpin::sim::GameEvent;

/// Safety cap on demo pumps (a game ends far earlier)
const MAX_PUMPS: u32 = 200_000;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x0B0_071);

    log::info!("Rolling demo game, seed {seed}");
    let mut driver = Driver::new(seed);
    driver.set_demo_mode(true);

    let mut pumps = 0u32;
    while !driver.state.game_over && pumps < MAX_PUMPS {
        driver.pump(SIM_DT);
        for event in driver.drain_events() {
            match event {
                GameEvent::BallLaunched { power, angle_deg } => {
                    log::debug!("Launched: power {power:.0}, angle {angle_deg:.1}");
                }
                GameEvent::ThrowSettled { pins } => log::debug!("Settled: {pins} pins"),
                GameEvent::FrameClosed { frame } => log::debug!("Frame {} closed", frame + 1),
                GameEvent::GameOver { total } => log::info!("Final score: {total}"),
                _ => {}
            }
        }
        pumps += 1;
    }

    if !driver.state.game_over {
        log::error!("Demo game did not finish within {MAX_PUMPS} pumps");
        return;
    }

    print_scorecard(&driver);

    let total = driver.state.scorecard.total().unwrap_or(0);
    let strikes = driver.state.scorecard.strike_count() as u32;
    let mut board = HighScores::new();
    if let Some(rank) = board.add_game(total, strikes, 1) {
        println!("Session rank: #{rank} ({strikes} strikes)");
    }
}

fn print_scorecard(driver: &Driver) {
    let snapshot = driver.snapshot();
    let frames = driver.state.scorecard.completed_frames();

    println!("frame  throws        score");
    for i in 0..FRAME_COUNT {
        let throws = frames
            .get(i)
            .map(|f| {
                f.throws
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        let score = snapshot.scores[i]
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:>5}  {:<12}  {:>5}", i + 1, throws, score);
    }
}
