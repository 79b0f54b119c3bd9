// Conversions between board squares, board units and screen pixels.
//
// Board units ("FPos") are attached to the `Coord` system: point (0., 0.) is the outer corner of
// 'a1' and point (8., 8.) is the outer corner of 'h8'. They do not depend on orientation, which
// is why animations are expressed in them. Screen positions are pixels relative to the page; a
// `BoardBounds` maps between the two for a given orientation.

use serde::{Deserialize, Serialize};

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::force::Force;


// The force rendered at the bottom of the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    White,
    Black,
}

#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct FPos {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct BoardBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Orientation {
    pub fn bottom_force(self) -> Force {
        match self {
            Orientation::White => Force::White,
            Orientation::Black => Force::Black,
        }
    }
    pub fn flipped(self) -> Self {
        match self {
            Orientation::White => Orientation::Black,
            Orientation::Black => Orientation::White,
        }
    }
}

impl From<Force> for Orientation {
    fn from(force: Force) -> Self {
        match force {
            Force::White => Orientation::White,
            Force::Black => Orientation::Black,
        }
    }
}

impl ScreenPos {
    pub fn new(x: f64, y: f64) -> Self { ScreenPos { x, y } }
}

impl FPos {
    pub fn new(x: f64, y: f64) -> Self { FPos { x, y } }

    // Position of the "a1"-side corner of a square.
    pub fn square_pivot(coord: Coord) -> Self {
        FPos {
            x: f64::from(coord.col.to_zero_based()),
            y: f64::from(coord.row.to_zero_based()),
        }
    }

    pub fn square_center(coord: Coord) -> Self {
        let pivot = Self::square_pivot(coord);
        FPos { x: pivot.x + 0.5, y: pivot.y + 0.5 }
    }

    pub fn to_square(self) -> Option<Coord> {
        if self.x < 0. || self.y < 0. {
            return None;
        }
        Coord::from_zero_based(self.x as u8, self.y as u8)
            .filter(|_| self.x < f64::from(NUM_COLS) && self.y < f64::from(NUM_ROWS))
    }

    pub fn lerp(self, to: FPos, t: f64) -> FPos {
        FPos {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

impl BoardBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        BoardBounds { left, top, width, height }
    }

    fn square_width(&self) -> f64 { self.width / f64::from(NUM_COLS) }
    fn square_height(&self) -> f64 { self.height / f64::from(NUM_ROWS) }

    pub fn to_fpos(&self, pos: ScreenPos, orientation: Orientation) -> FPos {
        let dx = (pos.x - self.left) / self.square_width();
        let dy = (pos.y - self.top) / self.square_height();
        match orientation {
            Orientation::White => FPos { x: dx, y: f64::from(NUM_ROWS) - dy },
            Orientation::Black => FPos { x: f64::from(NUM_COLS) - dx, y: dy },
        }
    }

    pub fn to_screen(&self, pos: FPos, orientation: Orientation) -> ScreenPos {
        let (dx, dy) = match orientation {
            Orientation::White => (pos.x, f64::from(NUM_ROWS) - pos.y),
            Orientation::Black => (f64::from(NUM_COLS) - pos.x, pos.y),
        };
        ScreenPos {
            x: self.left + dx * self.square_width(),
            y: self.top + dy * self.square_height(),
        }
    }

    pub fn square_at(&self, pos: ScreenPos, orientation: Orientation) -> Option<Coord> {
        self.to_fpos(pos, orientation).to_square()
    }

    pub fn square_center(&self, coord: Coord, orientation: Orientation) -> ScreenPos {
        self.to_screen(FPos::square_center(coord), orientation)
    }
}

pub fn distance_sq(a: ScreenPos, b: ScreenPos) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}
