use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::piece::{Piece, PieceKind};


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Coord,
    pub to: Coord,
    pub captured: Option<Piece>,
    // The move was staged in advance and replayed when the turn arrived.
    pub premove: bool,
    // The king was moved together with a rook.
    pub castling: bool,
}

// Callbacks fired by the board. All of them are synchronous and run after the state mutation
// they describe. Implementations must not call back into the board.
pub trait BoardObserver {
    fn select(&mut self, _coord: Coord) {}
    fn move_piece(&mut self, _record: &MoveRecord) {}
    fn drop_new_piece(&mut self, _piece: Piece, _coord: Coord) {}
    fn change(&mut self) {}
    fn premove_set(&mut self, _from: Coord, _to: Coord) {}
    fn premove_unset(&mut self) {}
    fn predrop_set(&mut self, _kind: PieceKind, _coord: Coord) {}
    fn predrop_unset(&mut self) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl BoardObserver for NoopObserver {}


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum BoardEvent {
    Select(Coord),
    Move(MoveRecord),
    DropNewPiece(Piece, Coord),
    Change,
    PremoveSet(Coord, Coord),
    PremoveUnset,
    PredropSet(PieceKind, Coord),
    PredropUnset,
}

// Records every notification. Clones share the same storage, so one copy can be handed to the
// board while another one is kept for inspection.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<BoardEvent>>>,
}

impl EventLog {
    pub fn new() -> Self { Self::default() }
    pub fn events(&self) -> Vec<BoardEvent> { self.events.borrow().clone() }
    pub fn take(&self) -> Vec<BoardEvent> { self.events.take() }
    pub fn clear(&self) { self.events.borrow_mut().clear(); }
    fn push(&self, event: BoardEvent) { self.events.borrow_mut().push(event); }
}

impl BoardObserver for EventLog {
    fn select(&mut self, coord: Coord) { self.push(BoardEvent::Select(coord)); }
    fn move_piece(&mut self, record: &MoveRecord) { self.push(BoardEvent::Move(*record)); }
    fn drop_new_piece(&mut self, piece: Piece, coord: Coord) {
        self.push(BoardEvent::DropNewPiece(piece, coord));
    }
    fn change(&mut self) { self.push(BoardEvent::Change); }
    fn premove_set(&mut self, from: Coord, to: Coord) { self.push(BoardEvent::PremoveSet(from, to)); }
    fn premove_unset(&mut self) { self.push(BoardEvent::PremoveUnset); }
    fn predrop_set(&mut self, kind: PieceKind, coord: Coord) {
        self.push(BoardEvent::PredropSet(kind, coord));
    }
    fn predrop_unset(&mut self) { self.push(BoardEvent::PredropUnset); }
}
