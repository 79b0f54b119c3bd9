// Predrops: a new piece drop staged by the side that is not on turn.

use crate::context::{BoardContext, Predrop};
use crate::coord::Coord;
use crate::event::BoardObserver;
use crate::movement;
use crate::piece::{Piece, PieceKind};
use crate::premove;


pub fn can_predrop(ctx: &BoardContext, piece: Piece, to: Coord) -> bool {
    ctx.settings.predrop_enabled
        && ctx.premove_owner() == Some(piece.force)
        && ctx.pieces[to].is_none()
        && !(piece.kind == PieceKind::Pawn && to.row.is_edge())
}

// Arms a predrop, replacing any previous one. Returns whether the predrop was accepted.
pub fn set(ctx: &mut BoardContext, obs: &mut dyn BoardObserver, piece: Piece, to: Coord) -> bool {
    if !can_predrop(ctx, piece, to) {
        log::trace!("Predrop of {piece:?} on {to} rejected");
        return false;
    }
    premove::unset(ctx, obs);
    ctx.predrop = Some(Predrop { kind: piece.kind, to });
    log::debug!("Predrop of {piece:?} on {to} armed");
    obs.predrop_set(piece.kind, to);
    true
}

pub fn unset(ctx: &mut BoardContext, obs: &mut dyn BoardObserver) {
    if let Some(predrop) = ctx.predrop.take() {
        log::debug!("Predrop of {:?} on {} disarmed", predrop.kind, predrop.to);
        obs.predrop_unset();
    }
}

// Replays the pending predrop if it's still legal. The predrop is consumed either way.
pub fn play(ctx: &mut BoardContext, obs: &mut dyn BoardObserver) -> bool {
    let Some(Predrop { kind, to }) = ctx.predrop else {
        return false;
    };
    let piece = Piece::new(ctx.turn, kind);
    let applied = movement::can_drop(ctx, piece, to);
    if applied {
        log::debug!("Replaying predrop of {piece:?} on {to}");
        movement::drop_new_piece(ctx, obs, piece, to);
    } else {
        log::debug!("Predrop of {piece:?} on {to} is no longer legal");
    }
    unset(ctx, obs);
    applied
}

pub fn on_turn_change(ctx: &mut BoardContext, obs: &mut dyn BoardObserver) -> bool {
    if ctx.predrop.is_none() {
        return false;
    }
    let owner = ctx.settings.movable_forces.single();
    if owner != Some(ctx.turn) || ctx.legality.is_awaiting() {
        return false;
    }
    play(ctx, obs)
}
