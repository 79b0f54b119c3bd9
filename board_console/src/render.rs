use console::Style;
use itertools::Itertools;
use strum::IntoEnumIterator;

use chessboard_interaction::context::BoardContext;
use chessboard_interaction::coord::{Col, Coord, Row};
use chessboard_interaction::event::BoardEvent;
use chessboard_interaction::geometry::Orientation;
use chessboard_interaction::piece::PieceKind;


fn format_square(ch: char) -> String { format!(" {} ", ch) }

fn display_rows(orientation: Orientation) -> Vec<Row> {
    match orientation {
        Orientation::White => Row::all().rev().collect(),
        Orientation::Black => Row::all().collect(),
    }
}

fn display_cols(orientation: Orientation) -> Vec<Col> {
    match orientation {
        Orientation::White => Col::all().collect(),
        Orientation::Black => Col::all().rev().collect(),
    }
}

fn square_style(ctx: &BoardContext, coord: Coord) -> Style {
    let light = (coord.row.to_zero_based() + coord.col.to_zero_based()) % 2 == 1;
    let base = Style::new().color256(233);
    let premove_squares = ctx.premove().map(|p| [p.from, p.to]);
    if ctx.selected() == Some(coord) {
        base.on_color256(117)
    } else if ctx.check() == Some(coord) && ctx.settings().highlight_check {
        base.on_red()
    } else if premove_squares.is_some_and(|squares| squares.contains(&coord))
        || ctx.predrop().is_some_and(|p| p.to == coord)
    {
        base.on_color256(181)
    } else if ctx.settings().highlight_last_move && ctx.last_move().contains(&coord) {
        base.on_color256(186)
    } else if light {
        base.on_color256(230)
    } else {
        base.on_color256(222)
    }
}

pub fn render_board(ctx: &BoardContext) -> String {
    let rows = display_rows(ctx.orientation());
    let cols = display_cols(ctx.orientation());
    let show_coords = ctx.settings().coordinates;
    let hints = ctx.hinted_dests();
    let mut ret = String::new();
    for &row in &rows {
        if show_coords {
            ret.push_str(&format_square(row.to_algebraic()));
        }
        for &col in &cols {
            let coord = Coord::new(row, col);
            let ch = match ctx.pieces()[coord] {
                Some(piece) => piece.to_pictogram(),
                None if hints.contains(&coord) => '·',
                None => ' ',
            };
            ret.push_str(&square_style(ctx, coord).apply_to(format_square(ch)).to_string());
        }
        ret.push('\n');
    }
    if show_coords {
        ret.push_str(&format_square(' '));
        ret.push_str(&cols.iter().map(|col| format_square(col.to_algebraic())).join(""));
        ret.push('\n');
    }
    ret
}

pub fn render_status(ctx: &BoardContext) -> String {
    let premove = match ctx.premove() {
        Some(premove) => format!("{}-{}", premove.from, premove.to),
        None => "-".to_owned(),
    };
    let predrop = match ctx.predrop() {
        Some(predrop) => format!("{}@{}", predrop.kind.to_ascii(), predrop.to),
        None => "-".to_owned(),
    };
    let mut ret = format!("Turn: {:?}\nPremove: {}\nPredrop: {}\n", ctx.turn(), premove, predrop);
    if let Some(drop_dests) = ctx.drop_dests() {
        let drops = PieceKind::iter()
            .filter(|&kind| !drop_dests.get(kind).is_empty())
            .map(|kind| format!("{}@{}", kind.to_ascii(), drop_dests.get(kind).iter().join(",")))
            .join(" ");
        ret.push_str(&format!("Drops: {drops}\n"));
    }
    ret
}

pub fn render_event(event: &BoardEvent) -> String {
    match event {
        BoardEvent::Select(coord) => format!("select {coord}"),
        BoardEvent::Move(record) => {
            let mut s = format!("move {}-{}", record.from, record.to);
            if let Some(captured) = record.captured {
                s.push_str(&format!(" x{}", captured.to_pictogram()));
            }
            if record.castling {
                s.push_str(" (castling)");
            }
            if record.premove {
                s.push_str(" (premove)");
            }
            s
        }
        BoardEvent::DropNewPiece(piece, coord) => format!("drop {}@{coord}", piece.to_pictogram()),
        BoardEvent::Change => "change".to_owned(),
        BoardEvent::PremoveSet(from, to) => format!("premove set {from}-{to}"),
        BoardEvent::PremoveUnset => "premove unset".to_owned(),
        BoardEvent::PredropSet(kind, coord) => format!("predrop set {}@{coord}", kind.to_ascii()),
        BoardEvent::PredropUnset => "predrop unset".to_owned(),
    }
}
