use std::fmt;
use std::ops;

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::force::Force;


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


// Rank, 0-based: row 0 is rank '1'.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8,
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Option<Self> {
        if idx < NUM_ROWS { Some(Self { idx }) } else { None }
    }
    pub const fn from_algebraic(ch: char) -> Option<Self> {
        if ch < '1' || ch > '8' {
            return None;
        }
        Self::from_zero_based(ch as u8 - b'1')
    }
    // Back rank of the given force: '1' for White, '8' for Black.
    pub const fn home(force: Force) -> Self {
        match force {
            Force::White => Self { idx: 0 },
            Force::Black => Self { idx: NUM_ROWS - 1 },
        }
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'1') as char }
    pub fn is_edge(self) -> bool { self.idx == 0 || self.idx == NUM_ROWS - 1 }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(|idx| Self { idx })
    }
}

// File, 0-based: col 0 is file 'a'.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8,
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Option<Self> {
        if idx < NUM_COLS { Some(Self { idx }) } else { None }
    }
    pub const fn from_algebraic(ch: char) -> Option<Self> {
        if ch < 'a' || ch > 'h' {
            return None;
        }
        Self::from_zero_based(ch as u8 - b'a')
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'a') as char }
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..NUM_COLS).map(|idx| Self { idx })
    }
}

impl ops::Sub for Row {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output { self.idx as i8 - other.idx as i8 }
}

impl ops::Sub for Col {
    type Output = i8;
    fn sub(self, other: Self) -> Self::Output { self.idx as i8 - other.idx as i8 }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }

    pub fn from_zero_based(col: u8, row: u8) -> Option<Self> {
        Some(Self::new(Row::from_zero_based(row)?, Col::from_zero_based(col)?))
    }

    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (col, row) = s.chars().collect_tuple()?;
        Some(Self::new(Row::from_algebraic(row)?, Col::from_algebraic(col)?))
    }

    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }

    // Rank-major order: a1, b1, ..., h1, a2, ...
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Self { row, col })
    }

    // Returns the square shifted by (cols, rows), or `None` if it falls off the board.
    pub fn offset(self, d_col: i8, d_row: i8) -> Option<Self> {
        let col = u8::try_from(self.col.idx as i8 + d_col).ok()?;
        let row = u8::try_from(self.row.idx as i8 + d_row).ok()?;
        Self::from_zero_based(col, row)
    }
}

impl ops::Sub for Coord {
    type Output = (i8, i8);
    // Returns (cols, rows).
    fn sub(self, other: Self) -> Self::Output { (self.col - other.col, self.row - other.row) }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}{})", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_algebraic())
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Coord::from_algebraic(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid square: {s}")))
    }
}


const fn square(col: u8, row: u8) -> Coord {
    Coord { row: Row { idx: row }, col: Col { idx: col } }
}

macro_rules! square_constants {
    ($($name:ident = $col:literal $row:literal),* $(,)?) => {
        impl Coord {
            $(pub const $name: Coord = square($col, $row);)*
        }
    };
}

square_constants! {
    A1 = 0 0, B1 = 1 0, C1 = 2 0, D1 = 3 0, E1 = 4 0, F1 = 5 0, G1 = 6 0, H1 = 7 0,
    A2 = 0 1, B2 = 1 1, C2 = 2 1, D2 = 3 1, E2 = 4 1, F2 = 5 1, G2 = 6 1, H2 = 7 1,
    A3 = 0 2, B3 = 1 2, C3 = 2 2, D3 = 3 2, E3 = 4 2, F3 = 5 2, G3 = 6 2, H3 = 7 2,
    A4 = 0 3, B4 = 1 3, C4 = 2 3, D4 = 3 3, E4 = 4 3, F4 = 5 3, G4 = 6 3, H4 = 7 3,
    A5 = 0 4, B5 = 1 4, C5 = 2 4, D5 = 3 4, E5 = 4 4, F5 = 5 4, G5 = 6 4, H5 = 7 4,
    A6 = 0 5, B6 = 1 5, C6 = 2 5, D6 = 3 5, E6 = 4 5, F6 = 5 5, G6 = 6 5, H6 = 7 5,
    A7 = 0 6, B7 = 1 6, C7 = 2 6, D7 = 3 6, E7 = 4 6, F7 = 5 6, G7 = 6 6, H7 = 7 6,
    A8 = 0 7, B8 = 1 7, C8 = 2 7, D8 = 3 7, E8 = 4 7, F8 = 5 7, G8 = 6 7, H8 = 7 7,
}
