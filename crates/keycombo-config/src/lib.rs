//! Combo configuration for keycombo
//!
//! This crate parses named key combos from KDL files and registers them
//! with a [`keycombo::ComboRegistry`].

mod error;
mod model;
mod parser;

pub use error::ConfigError;
pub use model::*;
pub use parser::{load_config, parse_config, parse_config_str};
