// Reads and writes the piece-placement field of FEN.
//
// Only the placement matters for the board: turn, castling rights and the rest are owned by the
// host's rules engine. Trailing FEN fields are accepted and ignored, as are "~" markers that
// some variants put after promoted pieces.

use std::fmt;

use itertools::Itertools;

use crate::coord::{Col, Coord, NUM_COLS, NUM_ROWS, Row};
use crate::grid::Pieces;
use crate::piece::Piece;


pub const INITIAL: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FenError {
    WrongRowCount(usize),
    RowTooLong(String),
    RowTooShort(String),
    InvalidChar(char),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongRowCount(n) => write!(f, "expected {NUM_ROWS} rows, found {n}"),
            FenError::RowTooLong(row) => write!(f, "row too long: {row}"),
            FenError::RowTooShort(row) => write!(f, "row too short: {row}"),
            FenError::InvalidChar(ch) => write!(f, "invalid character: {ch}"),
        }
    }
}

impl std::error::Error for FenError {}

pub fn read(fen: &str) -> Result<Pieces, FenError> {
    let placement = fen.split_whitespace().next().unwrap_or("");
    let rows = placement.split('/').collect_vec();
    if rows.len() != NUM_ROWS as usize {
        return Err(FenError::WrongRowCount(rows.len()));
    }
    let mut pieces = Pieces::empty();
    // FEN lists rank 8 first.
    for (row, row_notation) in Row::all().rev().zip(rows) {
        let mut col_idx: u8 = 0;
        for ch in row_notation.chars() {
            if ch == '~' {
                continue;
            }
            if let Some(skip) = ch.to_digit(10) {
                col_idx = col_idx
                    .checked_add(skip as u8)
                    .filter(|&idx| idx <= NUM_COLS)
                    .ok_or_else(|| FenError::RowTooLong(row_notation.to_owned()))?;
                continue;
            }
            let piece = Piece::from_ascii(ch).ok_or(FenError::InvalidChar(ch))?;
            let col = Col::from_zero_based(col_idx)
                .ok_or_else(|| FenError::RowTooLong(row_notation.to_owned()))?;
            pieces.set(Coord::new(row, col), piece);
            col_idx += 1;
        }
        if col_idx > NUM_COLS {
            return Err(FenError::RowTooLong(row_notation.to_owned()));
        }
        if col_idx < NUM_COLS {
            return Err(FenError::RowTooShort(row_notation.to_owned()));
        }
    }
    Ok(pieces)
}

pub fn write(pieces: &Pieces) -> String {
    Row::all()
        .rev()
        .map(|row| {
            let mut s = String::new();
            let mut empty = 0;
            for col in Col::all() {
                match pieces[Coord::new(row, col)] {
                    Some(piece) => {
                        if empty > 0 {
                            s.push_str(&empty.to_string());
                            empty = 0;
                        }
                        s.push(piece.to_ascii());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                s.push_str(&empty.to_string());
            }
            s
        })
        .join("/")
}
