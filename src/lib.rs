#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod animation;
pub mod board;
pub mod config;
pub mod context;
pub mod coord;
pub mod drag;
pub mod event;
pub mod fen;
pub mod force;
pub mod geometry;
pub mod grid;
pub mod legality;
pub mod movement;
pub mod piece;
pub mod predrop;
pub mod premove;
pub mod selection;
