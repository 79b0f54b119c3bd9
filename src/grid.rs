use std::{fmt, ops};

use ndarray::{Array, Array2};

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::force::Force;
use crate::piece::{Piece, PieceKind};


// The authoritative piece layout. Empty squares hold `None`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pieces {
    data: Array2<Option<Piece>>,
}

impl Pieces {
    pub fn empty() -> Self {
        Pieces {
            data: Array::from_elem((NUM_ROWS as usize, NUM_COLS as usize), None),
        }
    }

    pub fn get(&self, pos: Coord) -> Option<Piece> { self[pos] }
    pub fn contains(&self, pos: Coord) -> bool { self[pos].is_some() }
    pub fn set(&mut self, pos: Coord, piece: Piece) { self[pos] = Some(piece); }
    pub fn remove(&mut self, pos: Coord) -> Option<Piece> { self[pos].take() }

    pub fn is_empty(&self) -> bool { self.data.iter().all(Option::is_none) }
    pub fn len(&self) -> usize { self.data.iter().filter(|p| p.is_some()).count() }

    // Occupied squares in rank-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(|pos| self[pos].map(|piece| (pos, piece)))
    }

    pub fn find(&self, force: Force, kind: PieceKind) -> impl Iterator<Item = Coord> + '_ {
        let target = Piece { force, kind };
        self.iter().filter(move |(_, piece)| *piece == target).map(|(pos, _)| pos)
    }
}

impl Default for Pieces {
    fn default() -> Self { Self::empty() }
}

impl FromIterator<(Coord, Piece)> for Pieces {
    fn from_iter<I: IntoIterator<Item = (Coord, Piece)>>(iter: I) -> Self {
        let mut pieces = Pieces::empty();
        for (pos, piece) in iter {
            pieces.set(pos, piece);
        }
        pieces
    }
}

impl ops::Index<Coord> for Pieces {
    type Output = Option<Piece>;
    fn index(&self, pos: Coord) -> &Self::Output { &self.data[coord_to_index(pos)] }
}

impl ops::IndexMut<Coord> for Pieces {
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        &mut self.data[coord_to_index(pos)]
    }
}

fn coord_to_index(pos: Coord) -> [usize; 2] {
    [pos.row.to_zero_based() as usize, pos.col.to_zero_based() as usize]
}

impl fmt::Debug for Pieces {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pieces ")?;
        f.debug_map()
            .entries(self.iter().map(|(pos, piece)| (pos.to_algebraic(), piece.to_ascii())))
            .finish()
    }
}
