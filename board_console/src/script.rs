// A scripted sequence of inputs, read from YAML. Squares are given in algebraic notation and
// converted to pointer positions through the board bounds.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use chessboard_interaction::board::Chessboard;
use chessboard_interaction::coord::Coord;
use chessboard_interaction::force::Force;
use chessboard_interaction::geometry::{BoardBounds, ScreenPos};
use chessboard_interaction::legality::{Dests, Legality};
use chessboard_interaction::piece::{Piece, PieceKind};


#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Select(Coord),
    Drag {
        from: Coord,
        to: Coord,
        // Intermediate pointer positions, in pixels.
        #[serde(default)]
        via: Vec<ScreenPos>,
    },
    // Drags a new piece onto the board.
    DragNew { piece: Piece, to: Coord },
    // Drags the piece and releases it outside of the board.
    DragOff(Coord),
    // A move decided by the host.
    Move { from: Coord, to: Coord },
    SetTurn {
        turn: Force,
        #[serde(default)]
        dests: Option<Dests>,
    },
    SetDests(Dests),
    Premove { from: Coord, to: Coord },
    Predrop { kind: PieceKind, to: Coord },
    UnsetPremove,
    UnsetPredrop,
    Cancel,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_bounds")]
    pub bounds: BoardBounds,
    // Steps are written as `- select: b1` rather than YAML tags.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

fn default_bounds() -> BoardBounds { BoardBounds::new(0., 0., 400., 400.) }

impl Script {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("Parsing script")
    }
}

fn center(board: &Chessboard, coord: Coord) -> anyhow::Result<ScreenPos> {
    let ctx = board.context();
    let bounds = ctx.bounds().context("Board bounds are not set")?;
    Ok(bounds.square_center(coord, ctx.orientation()))
}

fn outside(board: &Chessboard) -> anyhow::Result<ScreenPos> {
    let bounds = board.context().bounds().context("Board bounds are not set")?;
    Ok(ScreenPos::new(bounds.left - bounds.width / 2., bounds.top - bounds.height / 2.))
}

fn drag(board: &mut Chessboard, from: Coord, via: &[ScreenPos], release: ScreenPos) -> anyhow::Result<()> {
    let start = center(board, from)?;
    board.drag_start(from, start);
    for &pos in via {
        board.drag_move(pos);
    }
    board.drag_move(release);
    let outcome = board.drag_end(release);
    log::info!("Drag from {from}: {outcome:?}");
    Ok(())
}

pub fn run_step(board: &mut Chessboard, step: &Step) -> anyhow::Result<()> {
    match step {
        Step::Select(coord) => {
            let outcome = board.select_square(*coord);
            log::info!("Click on {coord}: {outcome:?}");
        }
        Step::Drag { from, to, via } => {
            let release = center(board, *to)?;
            drag(board, *from, via, release)?;
        }
        Step::DragNew { piece, to } => {
            let start = outside(board)?;
            let release = center(board, *to)?;
            board.drag_new_piece(*piece, start);
            board.drag_move(release);
            let outcome = board.drag_end(release);
            log::info!("Drag of new {piece:?}: {outcome:?}");
        }
        Step::DragOff(from) => {
            let release = outside(board)?;
            drag(board, *from, &[], release)?;
        }
        Step::Move { from, to } => {
            if board.apply_move(*from, *to).is_none() {
                log::warn!("No piece to move on {from}");
            }
        }
        Step::SetTurn { turn, dests } => {
            let legality = match dests {
                Some(dests) => Legality::Dests(dests.clone()),
                None if board.context().legality() == &Legality::Free => Legality::Free,
                None => Legality::Awaiting,
            };
            board.set_turn(*turn, legality);
        }
        Step::SetDests(dests) => board.set_dests(dests.clone()),
        Step::Premove { from, to } => {
            if !board.set_premove(*from, *to) {
                log::warn!("Premove {from}-{to} rejected");
            }
        }
        Step::Predrop { kind, to } => {
            if !board.set_predrop(*kind, *to) {
                log::warn!("Predrop {kind:?}@{to} rejected");
            }
        }
        Step::UnsetPremove => board.unset_premove(),
        Step::UnsetPredrop => board.unset_predrop(),
        Step::Cancel => board.cancel_move(),
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse() {
        let script = Script::from_yaml(indoc! {"
            steps:
              - select: b1
              - drag:
                  from: e2
                  to: e4
                  via: [{x: 210, y: 330}]
              - drag_off: a1
              - set_turn:
                  turn: black
                  dests:
                    e7: [e5, e6]
              - predrop:
                  kind: knight
                  to: f3
              - unset_premove
        "})
        .unwrap();
        assert_eq!(script.bounds, default_bounds());
        assert_eq!(script.steps.len(), 6);
        assert!(matches!(script.steps[0], Step::Select(Coord::B1)));
        assert!(matches!(&script.steps[1], Step::Drag { from: Coord::E2, to: Coord::E4, via } if via.len() == 1));
        assert!(matches!(script.steps[5], Step::UnsetPremove));
    }
}
