// Click-click interaction: the first click selects a piece, the second one moves it.

use crate::context::{BoardContext, EditTool};
use crate::coord::Coord;
use crate::event::BoardObserver;
use crate::force::MovableForces;
use crate::movement::{self, MoveOutcome};
use crate::{predrop, premove};

pub use crate::premove::is_premovable;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClickOutcome {
    Selected,
    Deselected,
    Moved,
    // Armed a premove.
    Staged,
    // Changed the board with an editing tool.
    Edited,
    Ignored,
}

// Whether the piece on the square may be moved right now.
pub fn is_movable(ctx: &BoardContext, coord: Coord) -> bool {
    let Some(piece) = ctx.pieces[coord] else {
        return false;
    };
    let forces = ctx.settings.movable_forces;
    forces.includes(piece.force) && (forces == MovableForces::Both || ctx.turn == piece.force)
}

// Whether the piece on the square may be picked up, either to move it or to stage a premove.
pub fn is_draggable(ctx: &BoardContext, coord: Coord) -> bool {
    let Some(piece) = ctx.pieces[coord] else {
        return false;
    };
    let forces = ctx.settings.movable_forces;
    ctx.settings.drag.enabled
        && (forces == MovableForces::Both
            || (forces.single() == Some(piece.force)
                && (ctx.turn == piece.force || ctx.settings.premove.enabled)))
}

pub(crate) fn set_selected(ctx: &mut BoardContext, coord: Coord) {
    ctx.selected = Some(coord);
    ctx.premove_dests = if is_premovable(ctx, coord) {
        Some(premove::premove_dests(&ctx.pieces, coord, ctx.settings.premove.castle))
    } else {
        None
    };
}

pub fn unselect(ctx: &mut BoardContext) {
    ctx.selected = None;
    ctx.premove_dests = None;
}

fn edit(ctx: &mut BoardContext, obs: &mut dyn BoardObserver, coord: Coord) -> Option<ClickOutcome> {
    if !ctx.settings.editable {
        return None;
    }
    let changed = match ctx.edit_tool {
        EditTool::Pointer => return None,
        EditTool::Piece(piece) => {
            let changed = ctx.pieces[coord] != Some(piece);
            ctx.pieces.set(coord, piece);
            changed
        }
        EditTool::Trash => ctx.pieces.remove(coord).is_some(),
    };
    unselect(ctx);
    if changed {
        log::debug!("Square {coord} edited");
        obs.change();
        movement::after_layout_change(ctx, obs);
    }
    Some(ClickOutcome::Edited)
}

pub fn select_square(
    ctx: &mut BoardContext, obs: &mut dyn BoardObserver, coord: Coord,
) -> ClickOutcome {
    if ctx.settings.view_only {
        return ClickOutcome::Ignored;
    }
    if ctx.drag.take().is_some() {
        log::trace!("Drag session dropped by a click");
    }
    if ctx.settings.erase_shapes_on_click && ctx.selected.is_none() {
        ctx.shapes.clear();
    }
    if let Some(outcome) = edit(ctx, obs, coord) {
        return outcome;
    }

    let previously_selected = ctx.selected;
    if let Some(selected) = previously_selected {
        if selected == coord {
            unselect(ctx);
            return ClickOutcome::Deselected;
        }
        if ctx.settings.click_moves {
            match movement::user_move(ctx, obs, selected, coord) {
                MoveOutcome::Applied => {
                    ctx.last_gesture_was_drag = false;
                    return ClickOutcome::Moved;
                }
                MoveOutcome::Staged => {
                    ctx.last_gesture_was_drag = false;
                    return ClickOutcome::Staged;
                }
                MoveOutcome::Rejected => {}
            }
        }
    }

    if is_movable(ctx, coord) || is_premovable(ctx, coord) {
        set_selected(ctx, coord);
        log::trace!("Square {coord} selected");
        obs.select(coord);
        return ClickOutcome::Selected;
    }
    unselect(ctx);
    premove::unset(ctx, obs);
    predrop::unset(ctx, obs);
    if previously_selected.is_some() { ClickOutcome::Deselected } else { ClickOutcome::Ignored }
}
