//! TETRS engine - headless driver
//!
//! Plays one game with a pseudo-random command stream under virtual time,
//! then stores the high score. Handy for smoke-testing settings and logs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io;
use std::time::Duration;
use tetrs_engine::{Action, Game, GameState, Settings};

/// Virtual frame rate of the driver
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Give up on games that somehow never top out
const MAX_FRAMES: u64 = 1_000_000;

/// Commands the driver picks from, one per frame (None = idle)
const COMMANDS: [Option<Action>; 8] = [
    Some(Action::MoveLeft),
    Some(Action::MoveRight),
    Some(Action::RotateCW),
    Some(Action::RotateCCW),
    Some(Action::SoftDrop),
    Some(Action::HardDrop),
    None,
    None,
];

/// Get the temp directory for logs, creating it if needed
fn temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("tetrs-engine");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    let log_dir = temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // Setup tracing to log file
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = match "tetrs_engine=debug".parse() {
        Ok(directive) => tracing_subscriber::EnvFilter::from_default_env().add_directive(directive),
        Err(_) => tracing_subscriber::EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "engine starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let mut settings = Settings::load();
    let score_path = settings.high_score_path();
    let seed = settings.gameplay.seed.unwrap_or_else(rand::random);
    settings.gameplay.seed = Some(seed);

    let mut game = Game::with_settings(&settings);
    game.score.load_from(&score_path);
    let previous_best = game.score.high_score();

    let frames = play(&mut game, seed);
    if game.state() != GameState::GameOver {
        tracing::warn!("stopping after {} frames without a game over", frames);
        game.end_game();
    }
    game.score.save_to(&score_path);

    println!("Seed: {}", seed);
    println!("Final Score: {}", game.final_score());
    println!(
        "Level: {} | Lines: {}",
        game.current_level(),
        game.score.lines_cleared()
    );
    if game.score.high_score() > previous_best {
        println!("New high score! (was {})", previous_best);
    } else {
        println!("High score: {}", game.score.high_score());
    }
    println!("Simulated time: {:.1}s", (FRAME_DURATION * frames as u32).as_secs_f64());

    Ok(())
}

/// Run the game until it ends, returning the number of frames simulated
fn play(game: &mut Game, seed: u64) -> u64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    game.start();

    let mut frames = 0;
    while game.state() == GameState::Playing && frames < MAX_FRAMES {
        if let Some(action) = COMMANDS[rng.gen_range(0..COMMANDS.len())] {
            game.process_action(action);
        }
        game.update(FRAME_DURATION);
        frames += 1;
    }
    frames
}
