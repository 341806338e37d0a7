//! Score - A numeric attribute that accumulates modifiers

mod board;

pub use board::ScoreBoard;

use crate::modifier::Modifier;
use crate::source::{ModifierSource, SourceError};
use crate::types::SourceId;
use thiserror::Error;

/// Error raised when a modifier is applied to the wrong score
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("modifier targets {target} but was applied to {score}")]
    TargetMismatch { target: SourceId, score: SourceId },
}

/// One numeric attribute of a character.
///
/// The base value is fixed for the lifetime of the instance; everything else
/// comes from modifiers, and the applied list is replaced wholesale on every
/// update pass. Conditional modifiers stay on the list for display but are
/// excluded from [`total`](Score::total).
///
/// A score is itself a [`ModifierSource`] so that other sources can declare
/// dependencies on it and target it, but it never produces modifiers of its
/// own: its base value is intrinsic, not a contribution.
#[derive(Debug, Clone)]
pub struct Score {
    id: SourceId,
    name: String,
    abbreviation: String,
    description: Option<String>,
    base: i32,
    applied: Vec<Modifier>,
}

impl Score {
    /// Create a new score. Normally done through
    /// [`Character::add_score`](crate::Character::add_score), which assigns
    /// the handle.
    pub fn new(
        id: SourceId,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        base: i32,
    ) -> Self {
        Score {
            id,
            name: name.into(),
            abbreviation: abbreviation.into(),
            description: None,
            base,
            applied: Vec::new(),
        }
    }

    /// Attach a formatted description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Handle of this score
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short display form
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// Immutable base value
    pub fn base(&self) -> i32 {
        self.base
    }

    /// Computed total: base plus every non-conditional applied modifier
    pub fn total(&self) -> i32 {
        self.base
            + self
                .applied
                .iter()
                .filter(|m| !m.is_conditional())
                .map(Modifier::value)
                .sum::<i32>()
    }

    /// All modifiers applied in the last pass, conditional ones included
    pub fn applied(&self) -> &[Modifier] {
        &self.applied
    }

    /// Only the conditional modifiers, for situational display
    pub fn conditional(&self) -> impl Iterator<Item = &Modifier> {
        self.applied.iter().filter(|m| m.is_conditional())
    }

    /// Append a modifier produced during the current pass.
    ///
    /// The modifier must name this score as its target.
    pub(crate) fn apply(&mut self, modifier: Modifier) -> Result<(), ScoreError> {
        if modifier.target() != self.id {
            return Err(ScoreError::TargetMismatch {
                target: modifier.target(),
                score: self.id,
            });
        }
        self.applied.push(modifier);
        Ok(())
    }

    /// Drop every applied modifier, leaving only the base
    pub(crate) fn clear_applied(&mut self) {
        self.applied.clear();
    }
}

impl ModifierSource for Score {
    fn kind(&self) -> &'static str {
        "score"
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn produce_modifiers(
        &self,
        _me: SourceId,
        _board: &ScoreBoard,
        _emit: &mut dyn FnMut(Modifier),
    ) -> Result<(), SourceError> {
        // A score holds state; it contributes nothing itself.
        Ok(())
    }
}
