mod common;

use chessboard_interaction::board::Chessboard;
use chessboard_interaction::config::BoardConfig;
use chessboard_interaction::coord::Coord;
use chessboard_interaction::fen;
use chessboard_interaction::geometry::FPos;
use common::*;
use instant::Instant;
use pretty_assertions::assert_eq;


fn animated_config(fen: &str) -> BoardConfig {
    let mut config = free_config(fen);
    config.animation.enabled = true;
    config
}

fn finish_time(board: &Chessboard) -> Instant {
    let animation = board.context().animation().unwrap();
    animation.started_at() + animation.duration()
}

#[test]
fn click_move_is_animated() {
    let (mut board, _) = make_board(&animated_config("8/8/8/8/8/8/8/1N6"));
    board.select_square(Coord::B1);
    board.select_square(Coord::C3);

    // The layout is authoritative right away, only the drawing lags behind.
    assert!(board.pieces()[Coord::C3].is(piece!(White Knight)));
    let animation = board.context().animation().unwrap();
    assert_eq!(animation.position(Coord::C3), Some(FPos::square_pivot(Coord::B1)));

    let end = finish_time(&board);
    assert!(!board.tick(end));
    assert!(board.context().animation().is_none());
    assert!(!board.tick(end));
}

#[test]
fn animation_disabled() {
    let (mut board, _) = make_board(&free_config("8/8/8/8/8/8/8/1N6"));
    board.select_square(Coord::B1);
    board.select_square(Coord::C3);
    assert!(board.context().animation().is_none());

    let mut config = animated_config("8/8/8/8/8/8/8/1N6");
    config.animation.duration = 0;
    let (mut board, _) = make_board(&config);
    board.apply_move(Coord::B1, Coord::C3);
    assert!(board.context().animation().is_none());
}

#[test]
fn selection_alone_is_not_animated() {
    let (mut board, _) = make_board(&animated_config("8/8/8/8/8/8/8/1N6"));
    board.select_square(Coord::B1);
    assert!(board.context().animation().is_none());
}

#[test]
fn castling_moves_two_pieces() {
    let (mut board, _) = make_board(&animated_config("8/8/8/8/8/8/8/4K2R"));
    board.apply_move(Coord::E1, Coord::G1);
    let plan = board.context().animation().unwrap().plan();
    let mut squares = plan.moves.keys().copied().collect::<Vec<_>>();
    squares.sort();
    assert_eq!(squares, vec![Coord::F1, Coord::G1]);
}

#[test]
fn capture_fades_victim() {
    let (mut board, _) = make_board(&animated_config("8/8/8/8/8/2p5/8/1N6"));
    board.apply_move(Coord::B1, Coord::C3);
    let animation = board.context().animation().unwrap();
    assert_eq!(animation.plan().fadings, vec![(Coord::C3, new_piece!(Black Pawn))]);
    assert_eq!(animation.fading_opacity(), 1.);
}

#[test]
fn new_move_supersedes_running_animation() {
    let (mut board, _) = make_board(&animated_config("8/8/8/8/8/8/8/R7"));
    board.apply_move(Coord::A1, Coord::A5);
    let first_start = board.context().animation().unwrap().started_at();
    board.apply_move(Coord::A5, Coord::H5);
    let animation = board.context().animation().unwrap();
    assert!(animation.started_at() >= first_start);
    assert_eq!(animation.plan().moves.len(), 1);
    assert!(animation.position(Coord::H5).is_some());
}

#[test]
fn set_pieces_is_animated() {
    let (mut board, _) = make_board(&animated_config(fen::INITIAL));
    board.set_pieces(fen::read("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR").unwrap());
    let animation = board.context().animation().unwrap();
    assert_eq!(animation.position(Coord::E4), Some(FPos::square_pivot(Coord::E2)));
}

#[test]
fn flipping_and_stopping_clear_animation() {
    let (mut board, _) = make_board(&animated_config("8/8/8/8/8/8/8/1N6"));
    board.apply_move(Coord::B1, Coord::C3);
    board.toggle_orientation();
    assert!(board.context().animation().is_none());

    board.apply_move(Coord::C3, Coord::B1);
    board.stop();
    assert!(board.context().animation().is_none());
}
