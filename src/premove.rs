// Premoves: a move staged by the side that is not on turn, replayed once the turn arrives.
//
// At arming time the opponent's reply is unknown, so the destination is only checked against
// movement geometry (pieces may be in the way now but not later, and captures may appear). Real
// legality is checked at replay time against the fresh destinations.

use itertools::Itertools;

use crate::context::{BoardContext, Premove};
use crate::coord::{Coord, Row};
use crate::event::{BoardObserver, MoveRecord};
use crate::force::Force;
use crate::grid::Pieces;
use crate::movement;
use crate::piece::PieceKind;
use crate::predrop;


fn pawn_reach(force: Force, d_col: i8, d_row: i8, from: Coord) -> bool {
    let forward: i8 = match force {
        Force::White => 1,
        Force::Black => -1,
    };
    let start_row = match force {
        Force::White => 1,
        Force::Black => 6,
    };
    (d_col.abs() <= 1 && d_row == forward)
        || (d_col == 0 && d_row == 2 * forward && from.row.to_zero_based() == start_row)
}

fn king_reach(
    force: Force, from: Coord, to: Coord, d_col: i8, d_row: i8, rook_cols: &[u8], castle: bool,
) -> bool {
    if d_col.abs() <= 1 && d_row.abs() <= 1 {
        return true;
    }
    let home = Row::home(force);
    if !castle || from.row != home || to.row != home {
        return false;
    }
    let to_col = to.col.to_zero_based();
    let from_e_file = from.col.to_zero_based() == 4;
    // Two-file encoding or king-onto-rook encoding.
    (from_e_file && ((to_col == 2 && rook_cols.contains(&0)) || (to_col == 6 && rook_cols.contains(&7))))
        || rook_cols.contains(&to_col)
}

// Squares the piece on `from` could reach on an empty board, plus castling squares.
pub fn premove_dests(pieces: &Pieces, from: Coord, castle: bool) -> Vec<Coord> {
    let Some(piece) = pieces[from] else {
        return vec![];
    };
    let home = Row::home(piece.force);
    let rook_cols = pieces
        .find(piece.force, PieceKind::Rook)
        .filter(|c| c.row == home)
        .map(|c| c.col.to_zero_based())
        .collect_vec();
    Coord::all()
        .filter(|&to| to != from)
        .filter(|&to| {
            let (d_col, d_row) = to - from;
            match piece.kind {
                PieceKind::Pawn => pawn_reach(piece.force, d_col, d_row, from),
                PieceKind::Knight => {
                    (d_col.abs() == 1 && d_row.abs() == 2) || (d_col.abs() == 2 && d_row.abs() == 1)
                }
                PieceKind::Bishop => d_col.abs() == d_row.abs(),
                PieceKind::Rook => d_col == 0 || d_row == 0,
                PieceKind::Queen => d_col.abs() == d_row.abs() || d_col == 0 || d_row == 0,
                PieceKind::King => {
                    king_reach(piece.force, from, to, d_col, d_row, &rook_cols, castle)
                }
            }
        })
        .collect()
}

pub fn is_premovable(ctx: &BoardContext, coord: Coord) -> bool {
    let Some(piece) = ctx.pieces[coord] else {
        return false;
    };
    ctx.settings.premove.enabled && ctx.premove_owner() == Some(piece.force)
}

pub fn can_premove(ctx: &BoardContext, from: Coord, to: Coord) -> bool {
    from != to
        && is_premovable(ctx, from)
        && premove_dests(&ctx.pieces, from, ctx.settings.premove.castle).contains(&to)
}

// Arms a premove, replacing any previous one. Returns whether the premove was accepted.
pub fn set(ctx: &mut BoardContext, obs: &mut dyn BoardObserver, from: Coord, to: Coord) -> bool {
    if !can_premove(ctx, from, to) {
        log::trace!("Premove {from}-{to} rejected");
        return false;
    }
    predrop::unset(ctx, obs);
    let dests = premove_dests(&ctx.pieces, from, ctx.settings.premove.castle);
    ctx.premove = Some(Premove { from, to, dests });
    log::debug!("Premove {from}-{to} armed");
    obs.premove_set(from, to);
    true
}

// Disarms the pending premove. Does nothing (and fires nothing) if there is none.
pub fn unset(ctx: &mut BoardContext, obs: &mut dyn BoardObserver) {
    if let Some(premove) = ctx.premove.take() {
        log::debug!("Premove {}-{} disarmed", premove.from, premove.to);
        obs.premove_unset();
    }
}

// Pieces on the board change under a premove when the opponent moves. The premove dies with the
// piece it belongs to.
pub fn revalidate_origin(ctx: &mut BoardContext, obs: &mut dyn BoardObserver) {
    let Some(premove) = &ctx.premove else {
        return;
    };
    let owner = ctx.settings.movable_forces.single();
    let origin_ok = ctx.pieces[premove.from].is_some_and(|p| Some(p.force) == owner);
    if !origin_ok {
        unset(ctx, obs);
    }
}

// Replays the pending premove if it's still legal. The premove is consumed either way.
pub fn play(ctx: &mut BoardContext, obs: &mut dyn BoardObserver) -> Option<MoveRecord> {
    let Premove { from, to, .. } = ctx.premove.clone()?;
    let record = if movement::can_move(ctx, from, to) {
        log::debug!("Replaying premove {from}-{to}");
        movement::apply_move(ctx, obs, from, to, true)
    } else {
        log::debug!("Premove {from}-{to} is no longer legal");
        None
    };
    unset(ctx, obs);
    record
}

// Called whenever the turn or the destinations change. Replays the premove once both the turn
// belongs to its owner and up-to-date destinations are known.
pub fn on_turn_change(ctx: &mut BoardContext, obs: &mut dyn BoardObserver) -> Option<MoveRecord> {
    let premove = ctx.premove.as_ref()?;
    let owner = ctx.pieces[premove.from].map(|p| p.force);
    if owner != Some(ctx.turn) || ctx.legality.is_awaiting() {
        return None;
    }
    play(ctx, obs)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen;

    fn sorted(mut v: Vec<Coord>) -> Vec<Coord> {
        v.sort();
        v
    }

    #[test]
    fn knight_geometry() {
        let pieces = fen::read("8/8/8/8/8/8/8/1N6").unwrap();
        assert_eq!(
            sorted(premove_dests(&pieces, Coord::B1, true)),
            sorted(vec![Coord::A3, Coord::C3, Coord::D2])
        );
    }

    #[test]
    fn pawn_geometry() {
        let pieces = fen::read("8/4p3/8/8/8/8/4P3/8").unwrap();
        assert_eq!(
            sorted(premove_dests(&pieces, Coord::E2, true)),
            sorted(vec![Coord::D3, Coord::E3, Coord::F3, Coord::E4])
        );
        assert_eq!(
            sorted(premove_dests(&pieces, Coord::E7, true)),
            sorted(vec![Coord::D6, Coord::E6, Coord::F6, Coord::E5])
        );
    }

    #[test]
    fn pieces_in_the_way_are_ignored() {
        let pieces = fen::read("8/8/8/8/8/8/1P6/B7").unwrap();
        assert!(premove_dests(&pieces, Coord::A1, true).contains(&Coord::H8));
    }

    #[test]
    fn castling_geometry() {
        let pieces = fen::read("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let dests = premove_dests(&pieces, Coord::E1, true);
        for dest in [Coord::C1, Coord::G1, Coord::A1, Coord::H1] {
            assert!(dests.contains(&dest), "{dest}");
        }
        assert!(!dests.contains(&Coord::B1));
        let dests = premove_dests(&pieces, Coord::E8, false);
        assert!(!dests.contains(&Coord::G8));
        assert!(!dests.contains(&Coord::H8));
        assert!(dests.contains(&Coord::F8));
    }
}
