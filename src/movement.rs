// Applies moves and drops to the board.
//
// This is the only module that relocates pieces as a result of user input. It checks candidate
// moves against the host-supplied destinations, keeps the turn, last move and check markers up to
// date, fires `move`/`drop_new_piece` and `change` notifications and finally gives the staged
// premove or predrop a chance to replay.

use crate::context::BoardContext;
use crate::coord::{Col, Coord, Row};
use crate::event::{BoardObserver, MoveRecord};
use crate::force::MovableForces;
use crate::grid::Pieces;
use crate::legality::Legality;
use crate::piece::{Piece, PieceKind};
use crate::{predrop, premove, selection};


// What came out of a move or drop attempted by the user.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    Applied,
    // Not this side's turn: armed as a premove or a predrop.
    Staged,
    Rejected,
}

impl MoveOutcome {
    pub fn is_rejected(self) -> bool { self == MoveOutcome::Rejected }
}

const KING_COL: u8 = 4;

fn own_rook(pieces: &Pieces, coord: Coord, king: Piece) -> bool {
    pieces[coord].is_some_and(|p| p.force == king.force && p.kind == PieceKind::Rook)
}

// If `from`-`to` is a castling of the king on `from`, returns (king_to, rook_from, rook_to).
//
// Two encodings are recognized: the king moving two files from the e-file, and the king moving
// onto a rook of its own force.
fn castling_squares(pieces: &Pieces, from: Coord, to: Coord) -> Option<(Coord, Coord, Coord)> {
    let king = pieces[from]?;
    let home = Row::home(king.force);
    if king.kind != PieceKind::King || from.row != home || to.row != home {
        return None;
    }
    let col = |idx| Col::from_zero_based(idx).map(|col| Coord::new(home, col));
    let rook_from = if own_rook(pieces, to, king) {
        to
    } else if from.col.to_zero_based() == KING_COL && pieces[to].is_none() {
        match to.col.to_zero_based() {
            2 => col(0)?,
            6 => col(7)?,
            _ => return None,
        }
    } else {
        return None;
    };
    if !own_rook(pieces, rook_from, king) {
        return None;
    }
    let (king_to, rook_to) = if rook_from.col > from.col { (col(6)?, col(5)?) } else { (col(2)?, col(3)?) };
    Some((king_to, rook_from, rook_to))
}

// The two-file encoding of a king-onto-rook castling.
fn two_file_encoding(pieces: &Pieces, from: Coord, to: Coord) -> Option<Coord> {
    let king = pieces[from]?;
    if king.kind != PieceKind::King || from.row != to.row || !own_rook(pieces, to, king) {
        return None;
    }
    let (king_to, _, _) = castling_squares(pieces, from, to)?;
    if king_to == to { None } else { Some(king_to) }
}

pub fn can_move(ctx: &BoardContext, from: Coord, to: Coord) -> bool {
    if from == to || !selection::is_movable(ctx, from) {
        return false;
    }
    match &ctx.legality {
        // Pieces don't capture their own kin, except for the king that castles onto a rook.
        Legality::Free => {
            let onto_own = ctx.pieces[to].is_some_and(|p| Some(p.force) == ctx.pieces[from].map(|p| p.force));
            !onto_own || (ctx.settings.auto_castle && castling_squares(&ctx.pieces, from, to).is_some())
        }
        Legality::Dests(dests) => {
            dests.contains(from, to)
                || (ctx.settings.rook_castle
                    && two_file_encoding(&ctx.pieces, from, to)
                        .is_some_and(|king_to| dests.contains(from, king_to)))
        }
        Legality::Awaiting => false,
    }
}

pub fn can_drop(ctx: &BoardContext, piece: Piece, to: Coord) -> bool {
    let forces = ctx.settings.movable_forces;
    let movable =
        forces.includes(piece.force) && (forces == MovableForces::Both || ctx.turn == piece.force);
    if !movable || ctx.pieces[to].is_some() || ctx.legality.is_awaiting() {
        return false;
    }
    match &ctx.drop_dests {
        Some(drop_dests) => drop_dests.contains(piece.kind, to),
        None => !(piece.kind == PieceKind::Pawn && to.row.is_edge()),
    }
}

// Moves the piece, rook included when castling, and updates the markers. Doesn't touch the turn.
fn relocate(ctx: &mut BoardContext, from: Coord, to: Coord, premove: bool) -> Option<MoveRecord> {
    if from == to {
        return None;
    }
    let piece = ctx.pieces[from]?;
    let castling = if ctx.settings.auto_castle { castling_squares(&ctx.pieces, from, to) } else { None };
    let captured = match castling {
        Some((king_to, rook_from, rook_to)) => {
            ctx.pieces.remove(from);
            let rook = ctx.pieces.remove(rook_from);
            ctx.pieces.set(king_to, piece);
            if let Some(rook) = rook {
                ctx.pieces.set(rook_to, rook);
            }
            None
        }
        None => {
            let captured = ctx.pieces.remove(to).filter(|p| p.force != piece.force);
            ctx.pieces.remove(from);
            ctx.pieces.set(to, piece);
            captured
        }
    };
    ctx.last_move = vec![from, to];
    ctx.check = None;
    Some(MoveRecord {
        from,
        to,
        captured,
        premove,
        castling: castling.is_some(),
    })
}

fn pass_turn(ctx: &mut BoardContext) {
    ctx.turn = ctx.turn.opponent();
    ctx.legality = ctx.legality.after_turn_change();
    ctx.drop_dests = None;
}

// To be called after every layout change.
pub fn after_layout_change(ctx: &mut BoardContext, obs: &mut dyn BoardObserver) {
    premove::revalidate_origin(ctx, obs);
}

// To be called whenever the turn or the legality data change.
pub fn after_turn_change(ctx: &mut BoardContext, obs: &mut dyn BoardObserver) {
    premove::on_turn_change(ctx, obs);
    predrop::on_turn_change(ctx, obs);
}

// Applies the move and passes the turn. Legality is the caller's business: this is also the entry
// point for moves that the host decided on.
pub fn apply_move(
    ctx: &mut BoardContext, obs: &mut dyn BoardObserver, from: Coord, to: Coord, premove: bool,
) -> Option<MoveRecord> {
    let record = relocate(ctx, from, to, premove)?;
    pass_turn(ctx);
    log::debug!("Move {from}-{to} applied, {:?} to move", ctx.turn);
    obs.move_piece(&record);
    obs.change();
    after_layout_change(ctx, obs);
    after_turn_change(ctx, obs);
    Some(record)
}

// Relocates a piece without passing the turn.
pub fn base_move(
    ctx: &mut BoardContext, obs: &mut dyn BoardObserver, from: Coord, to: Coord,
) -> Option<MoveRecord> {
    let record = relocate(ctx, from, to, false)?;
    log::debug!("Piece relocated {from}-{to}");
    obs.move_piece(&record);
    obs.change();
    after_layout_change(ctx, obs);
    Some(record)
}

// Puts a new piece on the board and passes the turn. Legality is the caller's business.
pub fn drop_new_piece(ctx: &mut BoardContext, obs: &mut dyn BoardObserver, piece: Piece, to: Coord) {
    ctx.pieces.set(to, piece);
    ctx.last_move = vec![to];
    ctx.check = None;
    pass_turn(ctx);
    log::debug!("{piece:?} dropped on {to}, {:?} to move", ctx.turn);
    obs.drop_new_piece(piece, to);
    obs.change();
    after_layout_change(ctx, obs);
    after_turn_change(ctx, obs);
}

// A move requested by a click or a drag. The selection is gone afterwards in any case.
pub fn user_move(
    ctx: &mut BoardContext, obs: &mut dyn BoardObserver, from: Coord, to: Coord,
) -> MoveOutcome {
    selection::unselect(ctx);
    if can_move(ctx, from, to) {
        apply_move(ctx, obs, from, to, false);
        MoveOutcome::Applied
    } else if premove::set(ctx, obs, from, to) {
        MoveOutcome::Staged
    } else {
        log::trace!("Move {from}-{to} rejected");
        MoveOutcome::Rejected
    }
}

// A drop requested by dragging a piece from outside of the board.
pub fn user_drop(
    ctx: &mut BoardContext, obs: &mut dyn BoardObserver, piece: Piece, to: Coord,
) -> MoveOutcome {
    selection::unselect(ctx);
    if can_drop(ctx, piece, to) {
        drop_new_piece(ctx, obs, piece, to);
        MoveOutcome::Applied
    } else if predrop::set(ctx, obs, piece, to) {
        MoveOutcome::Staged
    } else {
        log::trace!("Drop of {piece:?} on {to} rejected");
        premove::unset(ctx, obs);
        predrop::unset(ctx, obs);
        MoveOutcome::Rejected
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen;

    #[test]
    fn castling_encodings() {
        let pieces = fen::read("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        assert_eq!(castling_squares(&pieces, Coord::E1, Coord::G1), Some((Coord::G1, Coord::H1, Coord::F1)));
        assert_eq!(castling_squares(&pieces, Coord::E1, Coord::H1), Some((Coord::G1, Coord::H1, Coord::F1)));
        assert_eq!(castling_squares(&pieces, Coord::E8, Coord::C8), Some((Coord::C8, Coord::A8, Coord::D8)));
        assert_eq!(castling_squares(&pieces, Coord::E1, Coord::F1), None);
        assert_eq!(two_file_encoding(&pieces, Coord::E1, Coord::A1), Some(Coord::C1));
        assert_eq!(two_file_encoding(&pieces, Coord::E1, Coord::C1), None);
    }

    #[test]
    fn no_castling_without_rook() {
        let pieces = fen::read("8/8/8/8/8/8/8/4K3").unwrap();
        assert_eq!(castling_squares(&pieces, Coord::E1, Coord::G1), None);
    }
}
