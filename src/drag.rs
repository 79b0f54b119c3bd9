// Pointer drags.
//
// A press on a draggable piece opens a `DragSession`. The session only becomes a visible drag once
// the pointer travels past the threshold; a gesture that ends before that is a click. A session is
// destroyed by `end` or `cancel` and by nothing else.

use crate::animation;
use crate::config::DropOff;
use crate::context::{BoardContext, DragSession, DragSource};
use crate::coord::Coord;
use crate::event::BoardObserver;
use crate::geometry::{self, ScreenPos};
use crate::movement::{self, MoveOutcome};
use crate::piece::Piece;
use crate::selection::{self, ClickOutcome};
use crate::{predrop, premove};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DragOutcome {
    // The pointer never moved far enough, so the gesture was handled as a click.
    Click(ClickOutcome),
    // A move or a drop was applied.
    Applied,
    // A premove or a predrop was armed.
    Staged,
    // The piece went back to where it came from.
    Reverted,
    // The piece was released outside of the board and removed.
    Trashed,
    // A new piece was released where it cannot go.
    Discarded,
    // There was no drag to end.
    Ignored,
}

fn threshold_crossed(ctx: &BoardContext, drag: &DragSession) -> bool {
    let distance = ctx.settings.drag.threshold.distance(ctx.last_gesture_was_drag);
    geometry::distance_sq(drag.origin_pos, drag.pos) >= distance * distance
}

fn square_under(ctx: &BoardContext, pos: ScreenPos) -> Option<Coord> {
    ctx.bounds?.square_at(pos, ctx.orientation)
}

// Handles a press on the square. Starts a drag session if the piece can be dragged; otherwise the
// press is a click. Returns whether a session was started.
pub fn start(
    ctx: &mut BoardContext, obs: &mut dyn BoardObserver, coord: Coord, pos: ScreenPos,
) -> bool {
    if ctx.settings.view_only {
        return false;
    }
    if let Some(selected) = ctx.selected {
        // A press on a destination of the selected piece completes the move.
        let completes_move = movement::can_move(ctx, selected, coord)
            || premove::can_premove(ctx, selected, coord);
        if selected != coord && completes_move {
            animation::animate(ctx, |ctx| selection::select_square(ctx, obs, coord));
            return false;
        }
    }
    let Some(piece) = ctx.pieces[coord] else {
        selection::select_square(ctx, obs, coord);
        return false;
    };
    if !selection::is_draggable(ctx, coord) {
        selection::select_square(ctx, obs, coord);
        return false;
    }

    let previously_selected = ctx.selected;
    selection::unselect(ctx);
    if selection::is_premovable(ctx, coord) {
        ctx.premove_dests =
            Some(premove::premove_dests(&ctx.pieces, coord, ctx.settings.premove.castle));
    }
    let mut drag = DragSession {
        source: DragSource::Board(coord),
        piece,
        origin_pos: pos,
        pos,
        started: false,
        previously_selected,
        left_origin: false,
        ghost: None,
    };
    drag.started = threshold_crossed(ctx, &drag);
    if drag.started && ctx.settings.drag.show_ghost {
        drag.ghost = Some(coord);
    }
    log::trace!("Drag session started on {coord}");
    ctx.drag = Some(drag);
    true
}

// Starts dragging a piece that is not on the board yet, e.g. from a reserve.
pub fn start_new_piece(ctx: &mut BoardContext, piece: Piece, pos: ScreenPos) -> bool {
    if ctx.settings.view_only {
        return false;
    }
    selection::unselect(ctx);
    ctx.drag = Some(DragSession {
        source: DragSource::NewPiece,
        piece,
        origin_pos: pos,
        pos,
        started: true,
        previously_selected: None,
        left_origin: true,
        ghost: None,
    });
    log::trace!("Dragging new {piece:?}");
    true
}

// Returns whether the session is (now) a visible drag.
pub fn move_pointer(ctx: &mut BoardContext, pos: ScreenPos) -> bool {
    let Some(mut drag) = ctx.drag else {
        return false;
    };
    drag.pos = pos;
    if !drag.started && threshold_crossed(ctx, &drag) {
        log::trace!("Drag threshold crossed");
        drag.started = true;
    }
    if drag.started {
        if let DragSource::Board(origin) = drag.source {
            if square_under(ctx, pos) != Some(origin) {
                drag.left_origin = true;
            }
            if ctx.settings.drag.show_ghost {
                drag.ghost = Some(origin);
            }
        }
    }
    ctx.drag = Some(drag);
    drag.started
}

// Resolves the session at the release position.
pub fn end(ctx: &mut BoardContext, obs: &mut dyn BoardObserver, pos: ScreenPos) -> DragOutcome {
    let Some(drag) = ctx.drag.take() else {
        return DragOutcome::Ignored;
    };
    selection::unselect(ctx);

    let origin = match drag.source {
        DragSource::Board(origin) => Some(origin),
        DragSource::NewPiece => None,
    };
    if !drag.started {
        if let Some(origin) = origin {
            if let Some(previous) = drag.previously_selected {
                selection::set_selected(ctx, previous);
            }
            return DragOutcome::Click(selection::select_square(ctx, obs, origin));
        }
    }

    premove::unset(ctx, obs);
    predrop::unset(ctx, obs);
    let dest = square_under(ctx, pos);
    log::trace!("Drag released over {dest:?}");
    let outcome = match (origin, dest) {
        (Some(origin), Some(dest)) if origin == dest => {
            let was_selected = drag.previously_selected == Some(origin);
            if !was_selected && !drag.left_origin && ctx.settings.click_moves {
                selection::set_selected(ctx, origin);
                obs.select(origin);
            }
            DragOutcome::Reverted
        }
        (Some(origin), Some(dest)) => {
            match animation::without_animation(ctx, |ctx| movement::user_move(ctx, obs, origin, dest)) {
                MoveOutcome::Applied => DragOutcome::Applied,
                MoveOutcome::Staged => DragOutcome::Staged,
                MoveOutcome::Rejected => DragOutcome::Reverted,
            }
        }
        (Some(origin), None) => match ctx.settings.drop_off {
            DropOff::Trash => {
                ctx.pieces.remove(origin);
                log::debug!("{:?} on {origin} dropped off the board", drag.piece);
                obs.change();
                movement::after_layout_change(ctx, obs);
                DragOutcome::Trashed
            }
            DropOff::Revert => DragOutcome::Reverted,
        },
        (None, Some(dest)) => {
            match animation::without_animation(ctx, |ctx| movement::user_drop(ctx, obs, drag.piece, dest)) {
                MoveOutcome::Applied => DragOutcome::Applied,
                MoveOutcome::Staged => DragOutcome::Staged,
                MoveOutcome::Rejected => DragOutcome::Discarded,
            }
        }
        (None, None) => DragOutcome::Discarded,
    };
    if matches!(outcome, DragOutcome::Applied | DragOutcome::Staged) {
        ctx.last_gesture_was_drag = true;
    }
    outcome
}

// Aborts the session. The piece stays where it was and nothing is selected.
pub fn cancel(ctx: &mut BoardContext) -> bool {
    let cancelled = ctx.drag.take().is_some();
    if cancelled {
        log::trace!("Drag cancelled");
        selection::unselect(ctx);
    }
    cancelled
}

// Where the dragged piece is drawn. Without centering the piece keeps its offset from the pointer.
pub fn piece_position(ctx: &BoardContext) -> Option<ScreenPos> {
    let drag = ctx.drag.as_ref()?;
    if !drag.started {
        return None;
    }
    let (DragSource::Board(origin), false) = (drag.source, ctx.settings.drag.center_piece) else {
        return Some(drag.pos);
    };
    let Some(bounds) = ctx.bounds else {
        return Some(drag.pos);
    };
    let center = bounds.square_center(origin, ctx.orientation);
    Some(ScreenPos::new(
        center.x + drag.pos.x - drag.origin_pos.x,
        center.y + drag.pos.y - drag.origin_pos.y,
    ))
}
