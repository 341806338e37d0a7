//! Prelude module for convenient imports
//!
//! ```rust
//! use bonus_core::prelude::*;
//! ```

// Core types
pub use crate::character::{Character, ScoreBreakdown, UpdateObserver, UpdateReport};
pub use crate::modifier::Modifier;
pub use crate::score::{Score, ScoreBoard};
pub use crate::types::SourceId;

// Sources
pub use crate::source::{Ability, DerivedBonus, FlatBonus, LevelSource, ModifierSource};

// Errors
pub use crate::character::UpdateError;
pub use crate::modifier::ModifierError;
pub use crate::source::SourceError;

// Config
pub use crate::config::default_bonuses;
