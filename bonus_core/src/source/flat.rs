//! FlatBonus - Declarative list of fixed modifiers

use crate::modifier::Modifier;
use crate::score::ScoreBoard;
use crate::source::{ModifierSource, PlannedModifier, SourceError};
use crate::types::SourceId;

/// A source that always contributes the same fixed modifiers.
///
/// Covers the bulk of attachable content: enchanted items, feats, racial
/// bonuses. Built fluently:
///
/// ```
/// use bonus_core::{Character, FlatBonus};
///
/// let mut character = Character::new("Keth", 1);
/// let ac = character.add_score("Armor Class", "AC", 10);
/// character.attach(FlatBonus::new("Ring of Protection", "RoP").with_modifier(ac, 1));
/// ```
#[derive(Debug, Clone)]
pub struct FlatBonus {
    name: String,
    abbreviation: String,
    description: Option<String>,
    planned: Vec<PlannedModifier>,
}

impl FlatBonus {
    /// Create a bonus with no modifiers yet
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        FlatBonus {
            name: name.into(),
            abbreviation: abbreviation.into(),
            description: None,
            planned: Vec::new(),
        }
    }

    /// Attach a formatted description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an unconditional modifier
    pub fn with_modifier(mut self, target: SourceId, value: i32) -> Self {
        self.planned.push(PlannedModifier {
            target,
            value,
            condition: None,
        });
        self
    }

    /// Add a conditional modifier with a situational label
    pub fn with_conditional_modifier(
        mut self,
        target: SourceId,
        value: i32,
        condition: impl Into<String>,
    ) -> Self {
        self.planned.push(PlannedModifier {
            target,
            value,
            condition: Some(condition.into()),
        });
        self
    }
}

impl ModifierSource for FlatBonus {
    fn kind(&self) -> &'static str {
        "bonus"
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
        me: SourceId,
        _board: &ScoreBoard,
        emit: &mut dyn FnMut(Modifier),
    ) -> Result<(), SourceError> {
        for planned in &self.planned {
            planned.emit(me, emit)?;
        }
        Ok(())
    }
}
