mod common;

use chessboard_interaction::board::Chessboard;
use chessboard_interaction::context::DragSource;
use chessboard_interaction::coord::Coord;
use chessboard_interaction::drag::DragOutcome;
use chessboard_interaction::event::BoardEvent;
use chessboard_interaction::force::Force;
use chessboard_interaction::legality::Legality;
use chessboard_interaction::piece::PieceKind;
use chessboard_interaction::selection::ClickOutcome;
use common::*;
use pretty_assertions::assert_eq;


fn drag(board: &mut Chessboard, from: Coord, to: Coord) -> DragOutcome {
    board.drag_start(from, center(from));
    board.drag_move(shifted(center(from), 20., 0.));
    board.drag_move(center(to));
    board.drag_end(center(to))
}

#[test]
fn drag_applies_move() {
    let mut config = game_config("8/8/8/8/8/8/8/1N6", Force::White, Force::White);
    config.movable.dests = Some(dests!(B1 => [A3, C3]));
    config.animation.enabled = true;
    let (mut board, events) = make_board(&config);

    assert_eq!(drag(&mut board, Coord::B1, Coord::C3), DragOutcome::Applied);
    assert!(board.pieces()[Coord::C3].is(piece!(White Knight)));
    assert_eq!(board.turn(), Force::Black);
    assert!(board.context().drag().is_none());
    // The piece is already where it was dropped.
    assert!(board.context().animation().is_none());
    assert_eq!(events.events().len(), 2);
}

#[test]
fn illegal_drop_reverts() {
    let mut config = game_config("8/8/8/8/8/8/8/1N6", Force::White, Force::White);
    config.movable.dests = Some(dests!(B1 => [A3, C3]));
    let (mut board, events) = make_board(&config);
    let before = board.pieces().clone();

    assert_eq!(drag(&mut board, Coord::B1, Coord::B4), DragOutcome::Reverted);
    assert_eq!(board.pieces(), &before);
    assert_eq!(board.context().selected(), None);
    assert_eq!(events.events(), vec![]);
}

#[test]
fn short_gesture_is_a_click() {
    let (mut board, events) = make_board(&free_config("8/8/8/8/8/8/8/1N6"));
    let pos = center(Coord::B1);

    assert!(board.drag_start(Coord::B1, pos));
    assert_eq!(board.drag_end(pos), DragOutcome::Click(ClickOutcome::Selected));
    assert_eq!(board.context().selected(), Some(Coord::B1));

    assert!(board.drag_start(Coord::B1, pos));
    assert_eq!(board.context().selected(), None);
    assert_eq!(board.drag_end(pos), DragOutcome::Click(ClickOutcome::Deselected));
    assert_eq!(board.context().selected(), None);
    assert_eq!(events.events(), vec![BoardEvent::Select(Coord::B1)]);
}

#[test]
fn press_on_destination_completes_click_move() {
    let (mut board, _) = make_board(&free_config("8/8/8/8/8/2p5/8/1N6"));
    board.select_square(Coord::B1);
    assert!(!board.drag_start(Coord::C3, center(Coord::C3)));
    assert!(board.pieces()[Coord::C3].is(piece!(White Knight)));
    assert!(board.context().drag().is_none());
}

#[test]
fn press_on_undraggable_piece_is_a_click() {
    let mut config = free_config("8/8/8/8/8/8/8/1N6");
    config.draggable.enabled = false;
    let (mut board, _) = make_board(&config);
    assert!(!board.drag_start(Coord::B1, center(Coord::B1)));
    assert_eq!(board.context().selected(), Some(Coord::B1));
}

#[test]
fn opponent_piece_cannot_be_dragged() {
    let config = game_config("8/8/8/8/8/8/4p3/1N6", Force::White, Force::White);
    let (mut board, _) = make_board(&config);
    assert!(!board.drag_start(Coord::E2, center(Coord::E2)));
    assert!(board.context().drag().is_none());
}

#[test]
fn drop_on_origin_selects() {
    let (mut board, events) = make_board(&free_config("8/8/8/8/8/8/8/1N6"));
    let pos = center(Coord::B1);
    board.drag_start(Coord::B1, pos);
    assert!(board.drag_move(shifted(pos, 10., 0.)));
    assert_eq!(board.drag_end(shifted(pos, 10., 0.)), DragOutcome::Reverted);
    assert_eq!(board.context().selected(), Some(Coord::B1));
    assert_eq!(events.events(), vec![BoardEvent::Select(Coord::B1)]);
}

#[test]
fn drop_on_origin_after_leaving_it_does_not_select() {
    let (mut board, _) = make_board(&free_config("8/8/8/8/8/8/8/1N6"));
    board.drag_start(Coord::B1, center(Coord::B1));
    board.drag_move(center(Coord::C3));
    assert_eq!(board.drag_end(center(Coord::B1)), DragOutcome::Reverted);
    assert_eq!(board.context().selected(), None);
}

#[test]
fn adaptive_threshold_after_drag() {
    let (mut board, _) = make_board(&free_config("8/8/8/8/8/8/4P3/1N6"));
    assert_eq!(board.context().settings().drag.threshold.distance(false), 3.);

    assert_eq!(drag(&mut board, Coord::E2, Coord::E4), DragOutcome::Applied);
    board.drag_start(Coord::B1, center(Coord::B1));
    assert!(board.context().is_dragging());
}

#[test]
fn fixed_threshold_after_drag() {
    let mut config = free_config("8/8/8/8/8/8/4P3/1N6");
    config.draggable.auto_distance = false;
    let (mut board, _) = make_board(&config);
    assert_eq!(drag(&mut board, Coord::E2, Coord::E4), DragOutcome::Applied);
    board.drag_start(Coord::B1, center(Coord::B1));
    assert!(!board.context().is_dragging());
}

#[test]
fn ghost_marks_origin() {
    let (mut board, _) = make_board(&free_config("8/8/8/8/8/8/8/1N6"));
    board.drag_start(Coord::B1, center(Coord::B1));
    assert_eq!(board.context().drag().unwrap().ghost, None);
    board.drag_move(center(Coord::C3));
    assert_eq!(board.context().drag().unwrap().ghost, Some(Coord::B1));

    let mut config = free_config("8/8/8/8/8/8/8/1N6");
    config.draggable.show_ghost = false;
    let (mut board, _) = make_board(&config);
    board.drag_start(Coord::B1, center(Coord::B1));
    board.drag_move(center(Coord::C3));
    assert_eq!(board.context().drag().unwrap().ghost, None);
}

#[test]
fn piece_position() {
    let (mut board, _) = make_board(&free_config("8/8/8/8/8/8/8/1N6"));
    let grab = shifted(center(Coord::B1), 10., 10.);
    board.drag_start(Coord::B1, grab);
    assert_eq!(board.drag_piece_position(), None);
    board.drag_move(shifted(grab, 30., 0.));
    assert_eq!(board.drag_piece_position(), Some(shifted(grab, 30., 0.)));

    let mut config = free_config("8/8/8/8/8/8/8/1N6");
    config.draggable.center_piece = false;
    let (mut board, _) = make_board(&config);
    board.drag_start(Coord::B1, grab);
    board.drag_move(shifted(grab, 30., 0.));
    assert_eq!(board.drag_piece_position(), Some(shifted(center(Coord::B1), 30., 0.)));
}

#[test]
fn cancel_reverts() {
    let (mut board, events) = make_board(&free_config("8/8/8/8/8/8/8/1N6"));
    let before = board.pieces().clone();
    board.select_square(Coord::B1);
    board.drag_start(Coord::B1, center(Coord::B1));
    board.drag_move(center(Coord::C3));
    assert!(board.drag_cancel());
    assert!(!board.drag_cancel());
    assert_eq!(board.pieces(), &before);
    assert_eq!(board.context().selected(), None);
    assert_eq!(board.drag_end(center(Coord::C3)), DragOutcome::Ignored);
    assert_eq!(events.events(), vec![BoardEvent::Select(Coord::B1)]);
}

#[test]
fn drag_stages_premove() {
    let config = game_config("8/8/8/8/8/8/4P3/8", Force::White, Force::Black);
    let (mut board, events) = make_board(&config);
    assert_eq!(drag(&mut board, Coord::E2, Coord::E4), DragOutcome::Staged);
    assert!(board.pieces()[Coord::E2].is(piece!(White Pawn)));
    assert_eq!(events.events(), vec![BoardEvent::PremoveSet(Coord::E2, Coord::E4)]);
}

#[test]
fn drag_replaces_staged_premove() {
    let config = game_config("8/8/8/8/8/8/4P3/1N6", Force::White, Force::Black);
    let (mut board, events) = make_board(&config);
    board.set_premove(Coord::E2, Coord::E4);
    events.clear();
    assert_eq!(drag(&mut board, Coord::B1, Coord::C3), DragOutcome::Staged);
    let premove = board.context().premove().unwrap();
    assert_eq!((premove.from, premove.to), (Coord::B1, Coord::C3));
    assert_eq!(events.events(), vec![
        BoardEvent::PremoveUnset,
        BoardEvent::PremoveSet(Coord::B1, Coord::C3),
    ]);
}

#[test]
fn new_piece_drop() {
    let (mut board, events) = make_board(&free_config("8/8/8/8/8/8/8/8"));
    let knight = new_piece!(Black Knight);
    assert!(board.drag_new_piece(knight, off_board()));
    assert_eq!(board.context().drag().unwrap().source, DragSource::NewPiece);
    assert!(board.context().is_dragging());
    assert_eq!(board.drag_end(center(Coord::E4)), DragOutcome::Applied);
    assert!(board.pieces()[Coord::E4].is(piece!(Black Knight)));
    assert_eq!(board.turn(), Force::Black);
    assert_eq!(board.context().last_move(), &[Coord::E4]);
    assert_eq!(events.events(), vec![BoardEvent::DropNewPiece(knight, Coord::E4), BoardEvent::Change]);
}

#[test]
fn new_piece_discarded() {
    let (mut board, events) = make_board(&free_config("8/8/8/8/4p3/8/8/8"));
    board.drag_new_piece(new_piece!(White Pawn), off_board());
    assert_eq!(board.drag_end(off_board()), DragOutcome::Discarded);

    // Pawns can't go to the last rank.
    board.drag_new_piece(new_piece!(White Pawn), off_board());
    assert_eq!(board.drag_end(center(Coord::E8)), DragOutcome::Discarded);

    // Occupied.
    board.drag_new_piece(new_piece!(White Knight), off_board());
    assert_eq!(board.drag_end(center(Coord::E4)), DragOutcome::Discarded);

    assert_eq!(board.pieces().len(), 1);
    assert_eq!(events.events(), vec![]);
}

#[test]
fn new_piece_stages_predrop() {
    let mut config = game_config("8/8/8/8/8/8/8/8", Force::White, Force::Black);
    config.predroppable.enabled = true;
    let (mut board, events) = make_board(&config);
    board.drag_new_piece(new_piece!(White Knight), off_board());
    assert_eq!(board.drag_end(center(Coord::F3)), DragOutcome::Staged);
    assert!(board.pieces().is_empty());
    assert_eq!(events.events(), vec![BoardEvent::PredropSet(PieceKind::Knight, Coord::F3)]);
    assert_eq!(board.context().legality(), &Legality::Awaiting);
}
