// Move and drop destinations supplied by the host's rules engine.
//
// The board never decides chess legality by itself. It only checks membership in these maps,
// and treats them as a snapshot: as soon as the turn changes they are stale (`Legality::Awaiting`)
// until the host provides fresh ones.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::coord::{Coord, Row};
use crate::grid::Pieces;
use crate::piece::PieceKind;


// Origin square -> legal destinations, order as supplied and without duplicates.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dests {
    map: HashMap<Coord, Vec<Coord>>,
}

// Piece kind -> squares where a new piece of that kind may be dropped.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DropDests {
    map: HashMap<PieceKind, Vec<Coord>>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Legality {
    // Any move of a movable piece is accepted (board editor, analysis).
    Free,
    Dests(Dests),
    // The turn has changed and the previous destinations are stale.
    Awaiting,
}

impl Dests {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, from: Coord, to: impl IntoIterator<Item = Coord>) {
        let entry = self.map.entry(from).or_default();
        for dest in to {
            if !entry.contains(&dest) {
                entry.push(dest);
            }
        }
    }

    pub fn get(&self, from: Coord) -> &[Coord] {
        self.map.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }
    pub fn contains(&self, from: Coord, to: Coord) -> bool { self.get(from).contains(&to) }
    pub fn is_empty(&self) -> bool { self.map.values().all(Vec::is_empty) }
    pub fn origins(&self) -> impl Iterator<Item = Coord> + '_ { self.map.keys().copied().sorted() }

    // Drops king-onto-rook encodings of castling when the two-file encoding is also present,
    // so that only one destination is shown per castling.
    pub fn without_rook_castle(mut self, pieces: &Pieces) -> Self {
        for (&from, dests) in self.map.iter_mut() {
            let Some(king) = pieces[from] else {
                continue;
            };
            if king.kind != PieceKind::King || from.row != Row::home(king.force) {
                continue;
            }
            let snapshot = dests.clone();
            dests.retain(|&to| {
                let is_own_rook = pieces[to]
                    .is_some_and(|p| p.force == king.force && p.kind == PieceKind::Rook);
                if !is_own_rook || to.row != from.row {
                    return true;
                }
                let two_file = if to.col > from.col { from.offset(2, 0) } else { from.offset(-2, 0) };
                !two_file.is_some_and(|c| snapshot.contains(&c))
            });
        }
        self
    }
}

impl FromIterator<(Coord, Vec<Coord>)> for Dests {
    fn from_iter<I: IntoIterator<Item = (Coord, Vec<Coord>)>>(iter: I) -> Self {
        let mut dests = Dests::new();
        for (from, to) in iter {
            dests.insert(from, to);
        }
        dests
    }
}

impl DropDests {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, kind: PieceKind, to: impl IntoIterator<Item = Coord>) {
        let entry = self.map.entry(kind).or_default();
        for dest in to {
            if !entry.contains(&dest) {
                entry.push(dest);
            }
        }
    }

    pub fn get(&self, kind: PieceKind) -> &[Coord] {
        self.map.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
    pub fn contains(&self, kind: PieceKind, to: Coord) -> bool { self.get(kind).contains(&to) }
}

impl FromIterator<(PieceKind, Vec<Coord>)> for DropDests {
    fn from_iter<I: IntoIterator<Item = (PieceKind, Vec<Coord>)>>(iter: I) -> Self {
        let mut dests = DropDests::new();
        for (kind, to) in iter {
            dests.insert(kind, to);
        }
        dests
    }
}

impl Legality {
    pub fn is_awaiting(&self) -> bool { matches!(self, Legality::Awaiting) }

    // What the legality becomes after the turn passes to the other side.
    pub fn after_turn_change(&self) -> Legality {
        match self {
            Legality::Free => Legality::Free,
            Legality::Dests(_) | Legality::Awaiting => Legality::Awaiting,
        }
    }
}
