//! Modifier - A single directed numeric contribution

use crate::types::SourceId;
use serde::Serialize;
use thiserror::Error;

/// Error raised when a modifier is constructed with an invalid shape
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModifierError {
    #[error("a modifier may not target its own source ({0})")]
    SelfModification(SourceId),
}

/// An immutable numeric contribution from one source to one score.
///
/// A modifier carrying a condition label is *conditional*: it is kept on the
/// target score for display but excluded from the computed total, since the
/// engine cannot decide whether the situation applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modifier {
    source: SourceId,
    target: SourceId,
    value: i32,
    condition: Option<String>,
}

impl Modifier {
    /// Create an unconditional modifier.
    ///
    /// Fails if `source == target`: nothing is allowed to modify itself.
    pub fn new(source: SourceId, target: SourceId, value: i32) -> Result<Self, ModifierError> {
        if source == target {
            return Err(ModifierError::SelfModification(source));
        }
        Ok(Modifier {
            source,
            target,
            value,
            condition: None,
        })
    }

    /// Create a conditional modifier with a situational label (e.g. "vs fire").
    pub fn conditional(
        source: SourceId,
        target: SourceId,
        value: i32,
        condition: impl Into<String>,
    ) -> Result<Self, ModifierError> {
        let mut modifier = Modifier::new(source, target, value)?;
        modifier.condition = Some(condition.into());
        Ok(modifier)
    }

    /// The contributing source
    pub fn source(&self) -> SourceId {
        self.source
    }

    /// The score this modifier applies to
    pub fn target(&self) -> SourceId {
        self.target
    }

    /// Signed contribution value
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Situational label, if any
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Whether this modifier is excluded from the target's total
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_modification_rejected() {
        let id = SourceId(3);
        assert_eq!(
            Modifier::new(id, id, 2),
            Err(ModifierError::SelfModification(id))
        );
        assert!(Modifier::conditional(id, id, 2, "vs fire").is_err());
    }

    #[test]
    fn test_unconditional() {
        let m = Modifier::new(SourceId(1), SourceId(2), 4).unwrap();
        assert_eq!(m.source(), SourceId(1));
        assert_eq!(m.target(), SourceId(2));
        assert_eq!(m.value(), 4);
        assert!(!m.is_conditional());
        assert_eq!(m.condition(), None);
    }

    #[test]
    fn test_conditional_keeps_label() {
        let m = Modifier::conditional(SourceId(1), SourceId(2), 5, "vs fire").unwrap();
        assert!(m.is_conditional());
        assert_eq!(m.condition(), Some("vs fire"));
    }

    #[test]
    fn test_negative_values_allowed() {
        let m = Modifier::new(SourceId(1), SourceId(2), -3).unwrap();
        assert_eq!(m.value(), -3);
    }
}
