//! DerivedBonus - A modifier computed from another score's committed total

use crate::modifier::Modifier;
use crate::score::ScoreBoard;
use crate::source::{ModifierSource, SourceError};
use crate::types::SourceId;

/// A source whose contribution is derived from another score.
///
/// The produced value is `(input_total + offset) * numerator / denominator`,
/// with floor division so that e.g. an ability modifier of
/// `(score - 10) / 2` behaves correctly for odd and negative totals.
///
/// Because the input score is *read*, not modified, the dependency is not
/// visible through the produced modifiers; this type overrides
/// [`declare_dependencies`](ModifierSource::declare_dependencies) to emit
/// the read edge explicitly. The orchestrator then guarantees the input
/// score is fully committed before this source runs.
#[derive(Debug, Clone)]
pub struct DerivedBonus {
    name: String,
    abbreviation: String,
    description: Option<String>,
    input: SourceId,
    target: SourceId,
    offset: i32,
    numerator: i32,
    denominator: i32,
}

impl DerivedBonus {
    /// Create a derived bonus that copies `input`'s total into `target`
    pub fn new(
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        input: SourceId,
        target: SourceId,
    ) -> Self {
        DerivedBonus {
            name: name.into(),
            abbreviation: abbreviation.into(),
            description: None,
            input,
            target,
            offset: 0,
            numerator: 1,
            denominator: 1,
        }
    }

    /// Attach a formatted description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add `offset` to the input total before scaling
    pub fn with_offset(mut self, offset: i32) -> Self {
        self.offset = offset;
        self
    }

    /// Multiply by `numerator` after offsetting
    pub fn with_scale(mut self, numerator: i32) -> Self {
        self.numerator = numerator;
        self
    }

    /// Divide by `denominator` (floor division). Must not be zero.
    pub fn with_divisor(mut self, denominator: i32) -> Self {
        self.denominator = denominator;
        self
    }

    /// The score this bonus reads
    pub fn input(&self) -> SourceId {
        self.input
    }

    /// The score this bonus writes
    pub fn target(&self) -> SourceId {
        self.target
    }
}

impl ModifierSource for DerivedBonus {
    fn kind(&self) -> &'static str {
        "derived"
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

    fn declare_dependencies(
        &self,
        me: SourceId,
        _board: &ScoreBoard,
        emit: &mut dyn FnMut(SourceId, SourceId),
    ) {
        // Read edge: the input must be committed before this source runs.
        emit(self.input, me);
        emit(me, self.target);
    }

    fn produce_modifiers(
        &self,
        me: SourceId,
        board: &ScoreBoard,
        emit: &mut dyn FnMut(Modifier),
    ) -> Result<(), SourceError> {
        if self.denominator == 0 {
            return Err(SourceError::NotInitialized(format!(
                "'{}' has a zero divisor",
                self.name
            )));
        }
        let total = board.total(self.input).ok_or_else(|| {
            SourceError::NotInitialized(format!(
                "'{}' reads {}, which is not a score",
                self.name, self.input
            ))
        })?;
        let value = ((total + self.offset) * self.numerator).div_euclid(self.denominator);
        emit(Modifier::new(me, self.target, value)?);
        Ok(())
    }
}
