// `BoardContext` is the single mutable state shared by every input handler, the animation and
// the renderer. Components receive it by reference; the renderer only ever reads it.
//
// Transient sub-states (selection, drag, premove, predrop, animation) are plain `Option`s that
// come and go many times during the lifetime of the context.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationState;
use crate::config::{Settings, ValidConfig};
use crate::coord::Coord;
use crate::force::Force;
use crate::geometry::{BoardBounds, Orientation, ScreenPos};
use crate::grid::Pieces;
use crate::legality::{DropDests, Legality};
use crate::piece::{Piece, PieceKind};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DragSource {
    Board(Coord),
    // A piece brought from outside of the board, e.g. from a reserve.
    NewPiece,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DragSession {
    pub source: DragSource,
    pub piece: Piece,
    pub origin_pos: ScreenPos,
    pub pos: ScreenPos,
    // Whether the pointer moved far enough for the gesture to count as a drag.
    pub started: bool,
    pub previously_selected: Option<Coord>,
    pub left_origin: bool,
    // Square where a translucent copy of the piece is shown while it's being dragged.
    pub ghost: Option<Coord>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Premove {
    pub from: Coord,
    pub to: Coord,
    // Premove geometry that `to` was validated against.
    pub dests: Vec<Coord>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Predrop {
    pub kind: PieceKind,
    pub to: Coord,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Brush {
    Green,
    Red,
    Blue,
    Yellow,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Arrow { from: Coord, to: Coord, brush: Brush },
    Circle { at: Coord, brush: Brush },
}

// What a click does in editing mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EditTool {
    // Regular interaction: select and move pieces.
    Pointer,
    // Put this piece on the clicked square.
    Piece(Piece),
    // Remove the piece from the clicked square.
    Trash,
}

#[derive(Clone, Debug)]
pub struct BoardContext {
    pub(crate) settings: Settings,
    pub(crate) pieces: Pieces,
    pub(crate) orientation: Orientation,
    pub(crate) turn: Force,
    pub(crate) check: Option<Coord>,
    pub(crate) last_move: Vec<Coord>,
    pub(crate) selected: Option<Coord>,
    // Premove hints for the selected piece.
    pub(crate) premove_dests: Option<Vec<Coord>>,
    pub(crate) legality: Legality,
    pub(crate) drop_dests: Option<DropDests>,
    pub(crate) premove: Option<Premove>,
    pub(crate) predrop: Option<Predrop>,
    pub(crate) drag: Option<DragSession>,
    pub(crate) animation: Option<AnimationState>,
    pub(crate) shapes: Vec<Shape>,
    pub(crate) edit_tool: EditTool,
    pub(crate) last_gesture_was_drag: bool,
    pub(crate) bounds: Option<BoardBounds>,
}

impl BoardContext {
    pub fn new(config: ValidConfig) -> Self {
        BoardContext {
            settings: config.settings,
            pieces: config.pieces,
            orientation: config.orientation,
            turn: config.turn,
            check: None,
            last_move: Vec::new(),
            selected: None,
            premove_dests: None,
            legality: config.legality,
            drop_dests: None,
            premove: None,
            predrop: None,
            drag: None,
            animation: None,
            shapes: Vec::new(),
            edit_tool: EditTool::Pointer,
            last_gesture_was_drag: false,
            bounds: None,
        }
    }

    pub fn settings(&self) -> &Settings { &self.settings }
    pub fn pieces(&self) -> &Pieces { &self.pieces }
    pub fn orientation(&self) -> Orientation { self.orientation }
    pub fn turn(&self) -> Force { self.turn }
    pub fn check(&self) -> Option<Coord> { self.check }
    pub fn last_move(&self) -> &[Coord] { &self.last_move }
    pub fn selected(&self) -> Option<Coord> { self.selected }
    pub fn premove_dests(&self) -> Option<&[Coord]> { self.premove_dests.as_deref() }
    pub fn legality(&self) -> &Legality { &self.legality }
    pub fn drop_dests(&self) -> Option<&DropDests> { self.drop_dests.as_ref() }
    pub fn premove(&self) -> Option<&Premove> { self.premove.as_ref() }
    pub fn predrop(&self) -> Option<Predrop> { self.predrop }
    pub fn drag(&self) -> Option<&DragSession> { self.drag.as_ref() }
    pub fn animation(&self) -> Option<&AnimationState> { self.animation.as_ref() }
    pub fn shapes(&self) -> &[Shape] { &self.shapes }
    pub fn edit_tool(&self) -> EditTool { self.edit_tool }
    pub fn bounds(&self) -> Option<BoardBounds> { self.bounds }

    // The force who can stage moves in advance: the single movable force while it's not its turn.
    pub fn premove_owner(&self) -> Option<Force> {
        self.settings.movable_forces.single().filter(|&force| force != self.turn)
    }

    // Whether a drag is under way and visible, as opposed to a press that may still turn out
    // to be a click.
    pub fn is_dragging(&self) -> bool { self.drag.is_some_and(|d| d.started) }

    // Destinations to highlight for the current selection or drag.
    pub fn hinted_dests(&self) -> Vec<Coord> {
        let origin = self.selected.or_else(|| match self.drag?.source {
            DragSource::Board(coord) => Some(coord),
            DragSource::NewPiece => None,
        });
        let Some(origin) = origin else {
            return Vec::new();
        };
        if let Some(premove_dests) = &self.premove_dests {
            if self.settings.premove.show_dests {
                return premove_dests.clone();
            }
            return Vec::new();
        }
        match &self.legality {
            Legality::Dests(dests) if self.settings.show_dests => dests.get(origin).to_vec(),
            Legality::Free | Legality::Dests(_) | Legality::Awaiting => Vec::new(),
        }
    }
}
