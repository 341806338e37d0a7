//! bonus_core - Dependency-ordered score and modifier engine
//!
//! This library provides:
//! - Character: owns scores and attached content, runs the update pass
//! - ModifierSource: the two-phase contribution protocol for content
//! - Score / Modifier: numeric attributes and the contributions they collect
//! - Dag: the dependency graph built fresh for every pass
//!
//! Contributions may depend on other contributions' already-committed
//! values, so every update pass builds a dependency graph from what each
//! source declares, orders it topologically, and commits each source exactly
//! once with its prerequisites final.

pub mod character;
pub mod config;
pub mod graph;
pub mod modifier;
pub mod prelude;
pub mod score;
pub mod source;
pub mod types;

// Re-export core types for convenience
pub use character::{
    Character, ModifierLine, ScoreBreakdown, UpdateError, UpdateObserver, UpdateReport,
    LEVEL_SCORE_NAME,
};
pub use config::{default_bonuses, BonusDef, ConfigError};
pub use graph::{build_dependency_graph, CycleError, Dag, NodeId};
pub use modifier::{Modifier, ModifierError};
pub use score::{Score, ScoreBoard, ScoreError};
pub use source::{
    value_eq, Ability, DerivedBonus, FlatBonus, LevelSource, ModifierSource, Requirement,
    SourceError,
};
pub use types::SourceId;
