//! ModifierSource - Trait and implementations for modifier providers

mod ability;
mod derived;
mod flat;
mod level;

pub use ability::{Ability, Requirement};
pub use derived::DerivedBonus;
pub use flat::FlatBonus;
pub use level::LevelSource;

use crate::modifier::{Modifier, ModifierError};
use crate::score::ScoreBoard;
use crate::types::SourceId;
use thiserror::Error;

/// Error raised by a source while producing its modifiers.
///
/// `RequirementNotMet` is a domain condition ("this ability can't be used
/// right now"): the pass continues and the source simply contributes nothing
/// this time around. The other variants are configuration bugs and abort the
/// whole pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("requirement not met: {0}")]
    RequirementNotMet(String),
    #[error("source is not fully initialized: {0}")]
    NotInitialized(String),
    #[error(transparent)]
    InvalidModifier(#[from] ModifierError),
}

/// Anything that can contribute modifiers to scores.
///
/// The contribution protocol has two phases per update pass, with one named
/// entry point each:
///
/// 1. **Mapping**: [`declare_dependencies`](ModifierSource::declare_dependencies)
///    is called to discover `(prerequisite, dependent)` edges. The default
///    implementation emits `(sub, self)` for every owned sub-source and then
///    probes [`produce_modifiers`](ModifierSource::produce_modifiers),
///    turning each would-be modifier into a `(source, target)` edge. Score
///    totals read during this phase may be stale and produce errors are
///    ignored; emitted modifiers are used for edges only.
/// 2. **Commit**: `produce_modifiers` is called once more, this time with
///    every prerequisite already committed. Its output is authoritative for
///    the pass and is recorded on the character.
///
/// Both entry points must be side-effect-free: the only state that changes
/// during a pass is held by the orchestrator.
///
/// Sources that read a score without modifying it (so the dependency is not
/// visible through their modifiers) must override `declare_dependencies`
/// and emit the extra `(score, self)` edge themselves.
pub trait ModifierSource {
    /// Stable kind tag, used for value identity (e.g. "score", "ability")
    fn kind(&self) -> &'static str;

    /// Display name
    fn name(&self) -> &str;

    /// Short display form
    fn abbreviation(&self) -> &str;

    /// Optional formatted description
    fn description(&self) -> Option<&str> {
        None
    }

    /// Handles of nested sources this source owns (one level deep)
    fn sub_sources(&self) -> &[SourceId] {
        &[]
    }

    /// Mapping mode: emit every `(prerequisite, dependent)` pair this source
    /// knows about.
    fn declare_dependencies(
        &self,
        me: SourceId,
        board: &ScoreBoard,
        emit: &mut dyn FnMut(SourceId, SourceId),
    ) {
        for &sub in self.sub_sources() {
            emit(sub, me);
        }
        let mut probe = |m: Modifier| emit(m.source(), m.target());
        // Usability failures are a commit-time concern; during discovery we
        // only care about the edges emitted before any error.
        let _ = self.produce_modifiers(me, board, &mut probe);
    }

    /// Commit mode: emit the authoritative modifiers for this pass.
    ///
    /// `me` is the handle this source was registered under; emitted modifiers
    /// normally name it as their source.
    fn produce_modifiers(
        &self,
        me: SourceId,
        board: &ScoreBoard,
        emit: &mut dyn FnMut(Modifier),
    ) -> Result<(), SourceError>;
}

/// Domain-level value equality: same kind, same name and abbreviation,
/// compared case-insensitively.
///
/// This is deliberately distinct from graph identity (the [`SourceId`]
/// handle): a character may carry two instances of the same ability on
/// different items, and those stay separate graph nodes while still
/// comparing equal here.
pub fn value_eq(a: &dyn ModifierSource, b: &dyn ModifierSource) -> bool {
    a.kind() == b.kind()
        && a.name().eq_ignore_ascii_case(b.name())
        && a.abbreviation().eq_ignore_ascii_case(b.abbreviation())
}

/// A declarative (target, value, condition) entry shared by the concrete
/// source types.
#[derive(Debug, Clone)]
pub(crate) struct PlannedModifier {
    pub target: SourceId,
    pub value: i32,
    pub condition: Option<String>,
}

impl PlannedModifier {
    pub fn emit(
        &self,
        me: SourceId,
        emit: &mut dyn FnMut(Modifier),
    ) -> Result<(), SourceError> {
        let modifier = match &self.condition {
            Some(label) => Modifier::conditional(me, self.target, self.value, label.clone())?,
            None => Modifier::new(me, self.target, self.value)?,
        };
        emit(modifier);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_eq_ignores_case_and_instance() {
        let a = FlatBonus::new("Ring of Protection", "RoP");
        let b = FlatBonus::new("ring of protection", "rop");
        assert!(value_eq(&a, &b));
    }

    #[test]
    fn test_value_eq_distinguishes_kind() {
        let bonus = FlatBonus::new("Level", "LVL");
        let level = LevelSource::new(3, SourceId(0));
        assert!(!value_eq(&bonus, &level));
    }

    #[test]
    fn test_value_eq_distinguishes_name() {
        let a = FlatBonus::new("Ring of Protection", "RoP");
        let b = FlatBonus::new("Ring of Regeneration", "RoP");
        assert!(!value_eq(&a, &b));
    }
}
