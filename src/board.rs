// The host-facing board. Owns the interaction state and the observer, and routes every input to
// the component that handles it.
//
// Layout changes caused by clicks, host moves and replayed premoves are animated; drops at the end
// of a drag are shown immediately because the piece is already under the pointer.

use instant::Instant;

use crate::animation;
use crate::config::{BoardConfig, ConfigError, ValidConfig};
use crate::context::{BoardContext, EditTool, Shape};
use crate::coord::Coord;
use crate::drag::{self, DragOutcome};
use crate::event::{BoardObserver, MoveRecord};
use crate::force::Force;
use crate::geometry::{BoardBounds, Orientation, ScreenPos};
use crate::grid::Pieces;
use crate::legality::{Dests, DropDests, Legality};
use crate::movement;
use crate::piece::{Piece, PieceKind};
use crate::predrop;
use crate::premove;
use crate::selection::{self, ClickOutcome};


pub struct Chessboard {
    ctx: BoardContext,
    observer: Box<dyn BoardObserver>,
}

impl Chessboard {
    pub fn new(config: ValidConfig, observer: Box<dyn BoardObserver>) -> Self {
        Chessboard { ctx: BoardContext::new(config), observer }
    }

    pub fn from_config(
        config: &BoardConfig, observer: Box<dyn BoardObserver>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(config.validate()?, observer))
    }

    pub fn context(&self) -> &BoardContext { &self.ctx }
    pub fn pieces(&self) -> &Pieces { &self.ctx.pieces }
    pub fn turn(&self) -> Force { self.ctx.turn }

    // Replaces the layout, e.g. after the host jumped to another position.
    pub fn set_pieces(&mut self, pieces: Pieces) {
        animation::animate(&mut self.ctx, |ctx| ctx.pieces = pieces);
        self.revalidate_selection();
        let observer = self.observer.as_mut();
        movement::after_layout_change(&mut self.ctx, observer);
    }

    // Keeps the selection only while its piece may still be moved or premoved. Premove hints are
    // recomputed since the piece may have switched between the two.
    fn revalidate_selection(&mut self) {
        let Some(selected) = self.ctx.selected else {
            return;
        };
        if selection::is_movable(&self.ctx, selected)
            || selection::is_premovable(&self.ctx, selected)
        {
            selection::set_selected(&mut self.ctx, selected);
        } else {
            selection::unselect(&mut self.ctx);
        }
    }

    // Sets the side to move together with what it may do. A staged premove or predrop of that side
    // is replayed right away if it's still legal.
    pub fn set_turn(&mut self, turn: Force, legality: Legality) {
        self.ctx.turn = turn;
        self.ctx.legality = self.normalize(legality);
        let observer = self.observer.as_mut();
        animation::animate(&mut self.ctx, |ctx| movement::after_turn_change(ctx, observer));
        self.revalidate_selection();
    }

    // Supplies fresh destinations for the side to move.
    pub fn set_dests(&mut self, dests: Dests) {
        self.set_turn(self.ctx.turn, Legality::Dests(dests));
    }

    // Supplies move and drop destinations together, so that a staged predrop is judged against
    // both. Prefer this over `set_dests` followed by `set_drop_dests` in drop variants.
    pub fn set_dests_with_drops(&mut self, dests: Dests, drop_dests: Option<DropDests>) {
        self.ctx.drop_dests = drop_dests;
        self.set_dests(dests);
    }

    // Drop destinations are reset on every turn change. A staged predrop is replayed as soon as
    // move destinations arrive, so drop destinations sent after `set_dests` come too late for it:
    // send them first or use `set_dests_with_drops`.
    pub fn set_drop_dests(&mut self, drop_dests: Option<DropDests>) {
        self.ctx.drop_dests = drop_dests;
        let observer = self.observer.as_mut();
        animation::animate(&mut self.ctx, |ctx| movement::after_turn_change(ctx, observer));
    }

    fn normalize(&self, legality: Legality) -> Legality {
        match legality {
            Legality::Dests(dests) if !self.ctx.settings.rook_castle => {
                Legality::Dests(dests.without_rook_castle(&self.ctx.pieces))
            }
            legality => legality,
        }
    }

    pub fn set_check(&mut self, check: Option<Coord>) { self.ctx.check = check; }
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.ctx.orientation != orientation {
            self.toggle_orientation();
        }
    }
    pub fn toggle_orientation(&mut self) {
        self.ctx.orientation = self.ctx.orientation.flipped();
        self.ctx.animation = None;
        drag::cancel(&mut self.ctx);
        selection::unselect(&mut self.ctx);
    }
    pub fn set_bounds(&mut self, bounds: BoardBounds) { self.ctx.bounds = Some(bounds); }
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) { self.ctx.shapes = shapes; }
    pub fn set_edit_tool(&mut self, tool: EditTool) { self.ctx.edit_tool = tool; }

    // A move decided by the host (e.g. the opponent's move received from a server). Legality is not
    // checked, the turn passes to the other side.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Option<MoveRecord> {
        let observer = self.observer.as_mut();
        animation::animate(&mut self.ctx, |ctx| movement::apply_move(ctx, observer, from, to, false))
    }

    // Relocates a piece keeping the turn.
    pub fn base_move(&mut self, from: Coord, to: Coord) -> Option<MoveRecord> {
        let observer = self.observer.as_mut();
        animation::animate(&mut self.ctx, |ctx| movement::base_move(ctx, observer, from, to))
    }

    pub fn select_square(&mut self, coord: Coord) -> ClickOutcome {
        let observer = self.observer.as_mut();
        animation::animate(&mut self.ctx, |ctx| selection::select_square(ctx, observer, coord))
    }

    pub fn drag_start(&mut self, coord: Coord, pos: ScreenPos) -> bool {
        drag::start(&mut self.ctx, self.observer.as_mut(), coord, pos)
    }
    pub fn drag_new_piece(&mut self, piece: Piece, pos: ScreenPos) -> bool {
        drag::start_new_piece(&mut self.ctx, piece, pos)
    }
    pub fn drag_move(&mut self, pos: ScreenPos) -> bool { drag::move_pointer(&mut self.ctx, pos) }
    pub fn drag_end(&mut self, pos: ScreenPos) -> DragOutcome {
        let observer = self.observer.as_mut();
        if self.ctx.drag.is_some_and(|d| !d.started) {
            // Handled as a click.
            return animation::animate(&mut self.ctx, |ctx| drag::end(ctx, observer, pos));
        }
        drag::end(&mut self.ctx, observer, pos)
    }
    pub fn drag_cancel(&mut self) -> bool { drag::cancel(&mut self.ctx) }
    pub fn drag_piece_position(&self) -> Option<ScreenPos> { drag::piece_position(&self.ctx) }

    pub fn set_premove(&mut self, from: Coord, to: Coord) -> bool {
        if self.ctx.settings.view_only {
            return false;
        }
        premove::set(&mut self.ctx, self.observer.as_mut(), from, to)
    }
    pub fn unset_premove(&mut self) { premove::unset(&mut self.ctx, self.observer.as_mut()); }

    pub fn set_predrop(&mut self, kind: PieceKind, to: Coord) -> bool {
        if self.ctx.settings.view_only {
            return false;
        }
        let Some(owner) = self.ctx.premove_owner() else {
            return false;
        };
        predrop::set(&mut self.ctx, self.observer.as_mut(), Piece::new(owner, kind), to)
    }
    pub fn unset_predrop(&mut self) { predrop::unset(&mut self.ctx, self.observer.as_mut()); }

    // Replays the staged premove now. Returns the move if it was legal.
    pub fn play_premove(&mut self) -> Option<MoveRecord> {
        let observer = self.observer.as_mut();
        animation::animate(&mut self.ctx, |ctx| premove::play(ctx, observer))
    }

    pub fn play_predrop(&mut self) -> bool {
        let observer = self.observer.as_mut();
        animation::animate(&mut self.ctx, |ctx| predrop::play(ctx, observer))
    }

    // Advances the animation. Returns whether it is still running.
    pub fn tick(&mut self, now: Instant) -> bool { animation::tick(&mut self.ctx, now) }

    // Drops the selection, the drag and everything staged.
    pub fn cancel_move(&mut self) {
        let observer = self.observer.as_mut();
        premove::unset(&mut self.ctx, observer);
        predrop::unset(&mut self.ctx, observer);
        drag::cancel(&mut self.ctx);
        selection::unselect(&mut self.ctx);
    }

    // Cancels everything in progress and stops accepting input.
    pub fn stop(&mut self) {
        self.cancel_move();
        self.ctx.animation = None;
        self.ctx.settings.view_only = true;
        log::debug!("Board stopped");
    }
}
