// Board configuration as supplied by the host, and its validated form.
//
// `BoardConfig` mirrors the option surface one-to-one and can be read from YAML. Nothing outside
// of this module interprets the raw flags: `BoardConfig::validate` folds them into the mode enums
// of `Settings`, which is what the rest of the board consults.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fen::{self, FenError};
use crate::force::{Force, MovableForces};
use crate::geometry::Orientation;
use crate::grid::Pieces;
use crate::legality::{Dests, Legality};


#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub fen: String,
    pub orientation: Orientation,
    pub turn: Force,
    pub auto_castle: bool,
    pub view_only: bool,
    pub coordinates: bool,
    pub highlight: HighlightConfig,
    pub animation: AnimationConfig,
    pub movable: MovableConfig,
    pub premovable: PremovableConfig,
    pub predroppable: PredroppableConfig,
    pub draggable: DraggableConfig,
    pub selectable: SelectableConfig,
    pub drawable: DrawableConfig,
    pub editable: EditableConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub last_move: bool,
    pub check: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    // Milliseconds.
    pub duration: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MovableConfig {
    pub free: bool,
    pub forces: MovableForces,
    pub dests: Option<Dests>,
    pub drop_off: DropOff,
    pub show_dests: bool,
    pub rook_castle: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PremovableConfig {
    pub enabled: bool,
    pub show_dests: bool,
    pub castle: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredroppableConfig {
    pub enabled: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DraggableConfig {
    pub enabled: bool,
    // Pixels.
    pub distance: f64,
    pub auto_distance: bool,
    pub center_piece: bool,
    pub show_ghost: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectableConfig {
    pub enabled: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawableConfig {
    pub enabled: bool,
    pub erase_on_click: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditableConfig {
    pub enabled: bool,
}

// What happens to a piece released outside of the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropOff {
    Revert,
    Trash,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DragThreshold {
    Fixed(f64),
    // Like `Fixed`, but zero right after a gesture that was completed as a drag: a user who
    // drags pieces should not feel the dead zone.
    Adaptive(f64),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnimationMode {
    Disabled,
    Enabled(Duration),
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DragSettings {
    pub enabled: bool,
    pub threshold: DragThreshold,
    pub center_piece: bool,
    pub show_ghost: bool,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PremoveSettings {
    pub enabled: bool,
    pub castle: bool,
    pub show_dests: bool,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Settings {
    pub view_only: bool,
    pub auto_castle: bool,
    pub coordinates: bool,
    pub highlight_last_move: bool,
    pub highlight_check: bool,
    pub animation: AnimationMode,
    pub movable_forces: MovableForces,
    pub drop_off: DropOff,
    pub show_dests: bool,
    pub rook_castle: bool,
    pub premove: PremoveSettings,
    pub predrop_enabled: bool,
    pub drag: DragSettings,
    pub click_moves: bool,
    pub drawable: bool,
    pub erase_shapes_on_click: bool,
    pub editable: bool,
}

// Everything needed to set up a board.
#[derive(Clone, Debug)]
pub struct ValidConfig {
    pub settings: Settings,
    pub pieces: Pieces,
    pub orientation: Orientation,
    pub turn: Force,
    pub legality: Legality,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ConfigError {
    InvalidFen(FenError),
    InvalidDragDistance(f64),
    TrashWithoutFreeMode,
    Yaml(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFen(err) => write!(f, "invalid position: {err}"),
            ConfigError::InvalidDragDistance(d) => write!(f, "invalid drag distance: {d}"),
            ConfigError::TrashWithoutFreeMode => {
                write!(f, "drop-off \"trash\" requires free movement or editing")
            }
            ConfigError::Yaml(err) => write!(f, "cannot parse config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            fen: fen::INITIAL.to_owned(),
            orientation: Orientation::White,
            turn: Force::White,
            auto_castle: true,
            view_only: false,
            coordinates: true,
            highlight: HighlightConfig::default(),
            animation: AnimationConfig::default(),
            movable: MovableConfig::default(),
            premovable: PremovableConfig::default(),
            predroppable: PredroppableConfig::default(),
            draggable: DraggableConfig::default(),
            selectable: SelectableConfig::default(),
            drawable: DrawableConfig::default(),
            editable: EditableConfig::default(),
        }
    }
}

impl Default for HighlightConfig {
    fn default() -> Self { HighlightConfig { last_move: true, check: true } }
}

impl Default for AnimationConfig {
    fn default() -> Self { AnimationConfig { enabled: true, duration: 200 } }
}

impl Default for MovableConfig {
    fn default() -> Self {
        MovableConfig {
            free: true,
            forces: MovableForces::Both,
            dests: None,
            drop_off: DropOff::Revert,
            show_dests: true,
            rook_castle: true,
        }
    }
}

impl Default for PremovableConfig {
    fn default() -> Self { PremovableConfig { enabled: true, show_dests: true, castle: true } }
}

impl Default for DraggableConfig {
    fn default() -> Self {
        DraggableConfig {
            enabled: true,
            distance: 3.,
            auto_distance: true,
            center_piece: true,
            show_ghost: true,
        }
    }
}

impl Default for SelectableConfig {
    fn default() -> Self { SelectableConfig { enabled: true } }
}

impl Default for DrawableConfig {
    fn default() -> Self { DrawableConfig { enabled: true, erase_on_click: true } }
}

impl BoardConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|err| ConfigError::Yaml(err.to_string()))
    }

    pub fn validate(&self) -> Result<ValidConfig, ConfigError> {
        let pieces = fen::read(&self.fen).map_err(ConfigError::InvalidFen)?;

        let distance = self.draggable.distance;
        if !distance.is_finite() || distance < 0. {
            return Err(ConfigError::InvalidDragDistance(distance));
        }
        if self.movable.drop_off == DropOff::Trash && !self.movable.free && !self.editable.enabled {
            return Err(ConfigError::TrashWithoutFreeMode);
        }

        let legality = match (&self.movable.dests, self.movable.free) {
            (Some(dests), _) => {
                let dests = if self.movable.rook_castle {
                    dests.clone()
                } else {
                    dests.clone().without_rook_castle(&pieces)
                };
                Legality::Dests(dests)
            }
            (None, true) => Legality::Free,
            (None, false) => Legality::Awaiting,
        };
        let animation = if self.animation.enabled && self.animation.duration > 0 {
            AnimationMode::Enabled(Duration::from_millis(self.animation.duration))
        } else {
            AnimationMode::Disabled
        };
        let threshold = if self.draggable.auto_distance {
            DragThreshold::Adaptive(distance)
        } else {
            DragThreshold::Fixed(distance)
        };

        let settings = Settings {
            view_only: self.view_only,
            auto_castle: self.auto_castle,
            coordinates: self.coordinates,
            highlight_last_move: self.highlight.last_move,
            highlight_check: self.highlight.check,
            animation,
            movable_forces: self.movable.forces,
            drop_off: self.movable.drop_off,
            show_dests: self.movable.show_dests,
            rook_castle: self.movable.rook_castle,
            premove: PremoveSettings {
                enabled: self.premovable.enabled,
                castle: self.premovable.castle,
                show_dests: self.premovable.show_dests,
            },
            predrop_enabled: self.predroppable.enabled,
            drag: DragSettings {
                enabled: self.draggable.enabled,
                threshold,
                center_piece: self.draggable.center_piece,
                show_ghost: self.draggable.show_ghost,
            },
            click_moves: self.selectable.enabled,
            drawable: self.drawable.enabled,
            erase_shapes_on_click: self.drawable.enabled && self.drawable.erase_on_click,
            editable: self.editable.enabled,
        };
        Ok(ValidConfig {
            settings,
            pieces,
            orientation: self.orientation,
            turn: self.turn,
            legality,
        })
    }
}

impl DragThreshold {
    pub fn distance(self, last_gesture_was_drag: bool) -> f64 {
        match self {
            DragThreshold::Fixed(d) => d,
            DragThreshold::Adaptive(_) if last_gesture_was_drag => 0.,
            DragThreshold::Adaptive(d) => d,
        }
    }
}


#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::coord::Coord;

    #[test]
    fn defaults() {
        let config = BoardConfig::default().validate().unwrap();
        assert_eq!(config.pieces.len(), 32);
        assert_eq!(config.legality, Legality::Free);
        assert_eq!(config.settings.animation, AnimationMode::Enabled(Duration::from_millis(200)));
        assert_eq!(config.settings.drag.threshold, DragThreshold::Adaptive(3.));
        assert_eq!(config.settings.movable_forces, MovableForces::Both);
    }

    #[test]
    fn yaml() {
        let config = BoardConfig::from_yaml(indoc! {"
            fen: 8/8/8/8/8/8/8/1N6
            turn: black
            animation:
              duration: 0
            movable:
              free: false
              forces: white
              dests:
                b1: [a3, c3]
            draggable:
              distance: 5
              auto_distance: false
        "})
        .unwrap();
        let config = config.validate().unwrap();
        assert_eq!(config.turn, Force::Black);
        assert_eq!(config.settings.animation, AnimationMode::Disabled);
        assert_eq!(config.settings.movable_forces, MovableForces::White);
        assert_eq!(config.settings.drag.threshold, DragThreshold::Fixed(5.));
        let Legality::Dests(dests) = config.legality else {
            panic!("expected dests");
        };
        assert_eq!(dests.get(Coord::B1), &[Coord::A3, Coord::C3]);
    }

    #[test]
    fn invalid() {
        let mut config = BoardConfig::default();
        config.draggable.distance = -1.;
        assert_eq!(config.validate().unwrap_err(), ConfigError::InvalidDragDistance(-1.));

        let mut config = BoardConfig::default();
        config.movable.free = false;
        config.movable.drop_off = DropOff::Trash;
        assert_eq!(config.validate().unwrap_err(), ConfigError::TrashWithoutFreeMode);

        let config = BoardConfig { fen: "8/8".to_owned(), ..BoardConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidFen(_))));

        assert!(matches!(BoardConfig::from_yaml("turn: purple"), Err(ConfigError::Yaml(_))));
    }
}
