//! Ability - Content with sub-sources and usage requirements

use crate::modifier::Modifier;
use crate::score::ScoreBoard;
use crate::source::{ModifierSource, PlannedModifier, SourceError};
use crate::types::SourceId;

/// A commit-time requirement: a score must reach a minimum total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub score: SourceId,
    pub minimum: i32,
}

/// A learned ability: owns sub-sources (e.g. an attack's bonus and damage
/// sub-scores), contributes modifiers, and may carry requirements.
///
/// Requirements are checked in commit mode only, once every prerequisite
/// score is final. A failed requirement does not abort the pass; the
/// orchestrator records the ability as unusable and its modifiers are simply
/// absent this pass.
#[derive(Debug, Clone)]
pub struct Ability {
    name: String,
    abbreviation: String,
    description: Option<String>,
    subs: Vec<SourceId>,
    planned: Vec<PlannedModifier>,
    requirements: Vec<Requirement>,
}

impl Ability {
    /// Create an ability with no modifiers, subs, or requirements
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Ability {
            name: name.into(),
            abbreviation: abbreviation.into(),
            description: None,
            subs: Vec::new(),
            planned: Vec::new(),
            requirements: Vec::new(),
        }
    }

    /// Attach a formatted description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Register an owned sub-source (already attached to the character)
    pub fn with_sub(mut self, sub: SourceId) -> Self {
        self.subs.push(sub);
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

    /// Require a score to reach a minimum total before this ability applies
    pub fn with_requirement(mut self, score: SourceId, minimum: i32) -> Self {
        self.requirements.push(Requirement { score, minimum });
        self
    }
}

impl ModifierSource for Ability {
    fn kind(&self) -> &'static str {
        "ability"
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

    fn sub_sources(&self) -> &[SourceId] {
        &self.subs
    }

    fn declare_dependencies(
        &self,
        me: SourceId,
        _board: &ScoreBoard,
        emit: &mut dyn FnMut(SourceId, SourceId),
    ) {
        for &sub in &self.subs {
            emit(sub, me);
        }
        // Requirement scores are read at commit time, so they are
        // prerequisites even though no modifier touches them.
        for requirement in &self.requirements {
            emit(requirement.score, me);
        }
        for planned in &self.planned {
            emit(me, planned.target);
        }
    }

    fn produce_modifiers(
        &self,
        me: SourceId,
        board: &ScoreBoard,
        emit: &mut dyn FnMut(Modifier),
    ) -> Result<(), SourceError> {
        for requirement in &self.requirements {
            let total = board.total(requirement.score).ok_or_else(|| {
                SourceError::NotInitialized(format!(
                    "'{}' requires {}, which is not a score",
                    self.name, requirement.score
                ))
            })?;
            if total < requirement.minimum {
                let score_name = board
                    .get(requirement.score)
                    .map(|s| s.name().to_string())
                    .unwrap_or_else(|| requirement.score.to_string());
                return Err(SourceError::RequirementNotMet(format!(
                    "'{}' requires {} >= {}, have {}",
                    self.name, score_name, requirement.minimum, total
                )));
            }
        }
        for planned in &self.planned {
            planned.emit(me, emit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Score;

    fn board() -> ScoreBoard {
        let mut b = ScoreBoard::new();
        b.insert(Score::new(SourceId(0), "Strength", "STR", 16));
        b.insert(Score::new(SourceId(1), "Melee Damage", "DMG", 0));
        b
    }

    #[test]
    fn test_requirement_met_produces_modifiers() {
        let ability = Ability::new("Power Attack", "PA")
            .with_requirement(SourceId(0), 13)
            .with_modifier(SourceId(1), 3);

        let mut out = Vec::new();
        ability
            .produce_modifiers(SourceId(9), &board(), &mut |m| out.push(m))
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].value(), 3);
    }

    #[test]
    fn test_requirement_not_met() {
        let ability = Ability::new("Power Attack", "PA")
            .with_requirement(SourceId(0), 20)
            .with_modifier(SourceId(1), 3);

        let mut out = Vec::new();
        let err = ability
            .produce_modifiers(SourceId(9), &board(), &mut |m| out.push(m))
            .unwrap_err();
        assert!(matches!(err, SourceError::RequirementNotMet(_)));
        assert_eq!(err.to_string(),
            "requirement not met: 'Power Attack' requires Strength >= 20, have 16");
    }

    #[test]
    fn test_declares_sub_requirement_and_modifier_edges() {
        let ability = Ability::new("Cleave", "CLV")
            .with_sub(SourceId(4))
            .with_requirement(SourceId(0), 13)
            .with_modifier(SourceId(1), 2);

        let mut edges = Vec::new();
        ability.declare_dependencies(SourceId(9), &board(), &mut |p, d| edges.push((p, d)));
        assert_eq!(
            edges,
            vec![
                (SourceId(4), SourceId(9)),
                (SourceId(0), SourceId(9)),
                (SourceId(9), SourceId(1)),
            ]
        );
    }
}
