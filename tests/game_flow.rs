//! End-to-end game flows through the public API

use std::time::Duration;
use tetrs_engine::settings::Settings;
use tetrs_engine::{Action, Cell, Color, Game, GameState, Piece, Randomizer, Rotation, TetrominoType};

fn started(seed: u64) -> Game {
    let mut game = Game::with_seed(seed);
    game.start();
    game
}

#[test]
fn completing_bottom_row_clears_and_scores() {
    let mut game = started(5);
    assert!(game.board.is_board_empty());

    for col in 0..9 {
        game.board.set_cell(19, col, Color::Cyan);
    }
    // Vertical I dropping into column 9 completes row 19
    let mut piece = Piece::new(TetrominoType::I);
    piece.rotation = Rotation::East;
    piece.row = 16;
    piece.col = 8;
    game.current_piece = Some(piece);

    let lines_before = game.score.lines_cleared();
    let level = game.current_level();
    let cleared = game.lock_current_piece();

    assert_eq!(cleared, 1);
    assert_eq!(game.score.lines_cleared(), lines_before + 1);
    assert_eq!(game.score.score(), 100 * level as u64);
    // The filler is gone; the rest of the I slid down into column 9
    for col in 0..9 {
        assert_eq!(game.board.get_cell(19, col), Cell::Empty);
    }
    for row in 17..20 {
        assert_eq!(game.board.get_cell(row, 9), Cell::Filled(Color::Cyan));
    }
    assert!(game.board.get_cell(16, 9).is_empty());
    assert!(game.board.complete_lines().is_empty());
}

#[test]
fn tetris_via_hard_drop() {
    let mut game = started(8);
    for row in 16..20 {
        for col in 0..9 {
            game.board.set_cell(row, col, Color::Red);
        }
    }
    game.board.set_cell(15, 0, Color::Blue);

    let mut piece = Piece::new(TetrominoType::I);
    piece.rotation = Rotation::East;
    piece.col = 8;
    game.current_piece = Some(piece);
    game.process_action(Action::HardDrop);

    assert_eq!(game.score.lines_cleared(), 4);
    assert_eq!(game.score.score(), 800);
    assert_eq!(game.board.get_cell(19, 0), Cell::Filled(Color::Blue));
    assert_eq!(
        game.board.rows().flatten().filter(|cell| cell.is_filled()).count(),
        1
    );
    assert_eq!(game.state(), GameState::Playing);
    assert!(game.current_piece.is_some());
}

#[test]
fn full_top_row_ends_game_with_high_score() {
    let mut game = started(3);
    game.score.add_line_clear_score(2);
    game.score.add_soft_drop_score(7);

    for col in 0..10 {
        game.board.set_cell(0, col, Color::Orange);
    }
    assert!(game.check_game_over());
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.score.high_score(), 307);
    assert_eq!(game.final_score(), 307);

    // Nothing moves once the game is over
    assert_eq!(game.update(Duration::from_secs(60)), 0);
    game.process_action(Action::Pause);
    assert_eq!(game.state(), GameState::GameOver);
}

#[test]
fn gravity_alone_eventually_tops_out() {
    let mut game = started(21);
    let mut steps = 0;
    while game.state() == GameState::Playing && steps < 10_000 {
        steps += game.update(Duration::from_millis(1000));
    }
    assert_eq!(game.state(), GameState::GameOver);
    // Pieces stack in the spawn columns and never touch the outer columns
    for row in 0..20 {
        assert!(game.board.get_cell(row, 0).is_empty());
        assert!(game.board.get_cell(row, 9).is_empty());
    }
    assert_eq!(game.score.lines_cleared(), 0);
}

#[test]
fn reset_allows_a_new_game_keeping_high_score() {
    let mut game = started(4);
    game.score.add_line_clear_score(1);
    game.end_game();
    assert_eq!(game.score.high_score(), 100);

    game.reset();
    assert_eq!(game.state(), GameState::Start);
    game.start();
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.score.score(), 0);
    assert_eq!(game.score.high_score(), 100);
    assert!(game.current_piece.is_some());
}

#[test]
fn same_seed_plays_the_same_game() {
    let script = [
        Action::MoveLeft,
        Action::RotateCW,
        Action::HardDrop,
        Action::MoveRight,
        Action::MoveRight,
        Action::HardDrop,
        Action::RotateCCW,
        Action::SoftDrop,
        Action::HardDrop,
    ];
    let run = || {
        let mut game = started(99);
        for _ in 0..5 {
            for action in script {
                game.process_action(action);
                game.update(Duration::from_millis(250));
            }
        }
        game
    };
    let (a, b) = (run(), run());
    assert_eq!(a.board, b.board);
    assert_eq!(a.score, b.score);
    assert_eq!(a.current_piece, b.current_piece);
}

#[test]
fn custom_board_and_spawn_column() {
    let mut settings = Settings::default();
    settings.board.width = 16;
    settings.board.height = 24;
    settings.gameplay.spawn_col = 6;
    settings.gameplay.randomizer = Randomizer::Bag;
    settings.gameplay.seed = Some(12);

    let mut game = Game::with_settings(&settings);
    game.start();
    assert_eq!(game.board.width(), 16);
    assert_eq!(game.board.height(), 24);
    assert_eq!(game.current_piece.as_ref().unwrap().col, 6);

    game.process_action(Action::HardDrop);
    assert!(game.current_piece.is_some());
    assert!((0..16).any(|col| game.board.get_cell(23, col).is_filled()));
}
