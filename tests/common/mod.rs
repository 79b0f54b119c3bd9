// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.
//
// Improvement potential. Combine integration tests together:
//   https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

use chessboard_interaction::board::Chessboard;
use chessboard_interaction::config::BoardConfig;
use chessboard_interaction::coord::Coord;
use chessboard_interaction::event::EventLog;
use chessboard_interaction::force::{Force, MovableForces};
use chessboard_interaction::geometry::{BoardBounds, Orientation, ScreenPos};
use chessboard_interaction::piece::{Piece, PieceKind};


#[derive(Clone, Copy, Debug)]
pub struct PieceMatcher {
    pub kind: PieceKind,
    pub force: Force,
}

pub trait PieceIs {
    fn is(self, matcher: PieceMatcher) -> bool;
}

impl PieceIs for Option<Piece> {
    fn is(self, matcher: PieceMatcher) -> bool {
        if let Some(piece) = self {
            piece.kind == matcher.kind && piece.force == matcher.force
        } else {
            false
        }
    }
}

#[macro_export]
macro_rules! piece {
    ($force:ident $kind:ident) => {
        common::PieceMatcher {
            force: chessboard_interaction::force::Force::$force,
            kind: chessboard_interaction::piece::PieceKind::$kind,
        }
    };
}

#[macro_export]
macro_rules! new_piece {
    ($force:ident $kind:ident) => {
        chessboard_interaction::piece::Piece::new(
            chessboard_interaction::force::Force::$force,
            chessboard_interaction::piece::PieceKind::$kind,
        )
    };
}

#[macro_export]
macro_rules! dests {
    ($($from:ident => [$($to:ident),* $(,)?]),* $(,)?) => {
        chessboard_interaction::legality::Dests::from_iter([
            $((
                chessboard_interaction::coord::Coord::$from,
                vec![$(chessboard_interaction::coord::Coord::$to),*],
            ),)*
        ])
    };
}


pub const BOUNDS: BoardBounds = BoardBounds { left: 0., top: 0., width: 400., height: 400. };

#[allow(dead_code)]
pub fn center(coord: Coord) -> ScreenPos { BOUNDS.square_center(coord, Orientation::White) }

#[allow(dead_code)]
pub fn shifted(pos: ScreenPos, dx: f64, dy: f64) -> ScreenPos { ScreenPos::new(pos.x + dx, pos.y + dy) }

#[allow(dead_code)]
pub fn off_board() -> ScreenPos { ScreenPos::new(-100., -100.) }

// Free movement for both sides, no animation.
#[allow(dead_code)]
pub fn free_config(fen: &str) -> BoardConfig {
    let mut config = BoardConfig { fen: fen.to_owned(), ..BoardConfig::default() };
    config.animation.enabled = false;
    config
}

// The setup of an online game: the player controls a single side and moves are checked against
// the destinations supplied by the host.
#[allow(dead_code)]
pub fn game_config(fen: &str, player: Force, turn: Force) -> BoardConfig {
    let mut config = free_config(fen);
    config.turn = turn;
    config.movable.free = false;
    config.movable.forces = match player {
        Force::White => MovableForces::White,
        Force::Black => MovableForces::Black,
    };
    config
}

#[allow(dead_code)]
pub fn make_board(config: &BoardConfig) -> (Chessboard, EventLog) {
    let events = EventLog::new();
    let mut board = Chessboard::from_config(config, Box::new(events.clone())).unwrap();
    board.set_bounds(BOUNDS);
    (board, events)
}
