//! Character - The owning aggregate and unit of one update pass

mod update;

pub use update::{UpdateError, UpdateObserver, UpdateReport};

use crate::modifier::Modifier;
use crate::score::{Score, ScoreBoard};
use crate::source::{value_eq, LevelSource, ModifierSource, SourceError};
use crate::types::SourceId;
use serde::Serialize;
use std::collections::HashMap;

/// Name of the reserved level score every character carries
pub const LEVEL_SCORE_NAME: &str = "Level";

struct ContentEntry {
    id: SourceId,
    source: Box<dyn ModifierSource>,
}

/// One entity and everything currently contributing to its scores.
///
/// The character owns the score board and the attached content, assigns the
/// [`SourceId`] handles that stand in for reference identity, and runs the
/// update pass that recomputes every total in dependency order. Scores are
/// only valid to read after [`update`](Character::update) has completed;
/// attaching or detaching content does not recompute anything on its own.
pub struct Character {
    name: String,
    next_id: u32,
    scores: ScoreBoard,
    contents: Vec<ContentEntry>,
    level_score: SourceId,
    level_writer: SourceId,
    committed: HashMap<SourceId, Vec<Modifier>>,
    unusable: Vec<(SourceId, SourceError)>,
}

/// Display-ready view of one score after an update pass
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub name: String,
    pub abbreviation: String,
    pub base: i32,
    pub total: i32,
    pub modifiers: Vec<ModifierLine>,
}

/// One applied modifier with its source resolved to a display name
#[derive(Debug, Clone, Serialize)]
pub struct ModifierLine {
    pub source: String,
    pub value: i32,
    pub condition: Option<String>,
}

impl Character {
    /// Create a character at the given level.
    ///
    /// The reserved level score and its privileged [`LevelSource`] writer
    /// are registered immediately.
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        let mut character = Character {
            name: name.into(),
            next_id: 0,
            scores: ScoreBoard::new(),
            contents: Vec::new(),
            level_score: SourceId(0),
            level_writer: SourceId(0),
            committed: HashMap::new(),
            unusable: Vec::new(),
        };
        character.level_score = character.add_score(LEVEL_SCORE_NAME, "LVL", 0);
        let target = character.level_score;
        character.level_writer = character.attach(LevelSource::new(level, target));
        character
    }

    /// Display name of this character
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle of the reserved level score
    pub fn level_score_id(&self) -> SourceId {
        self.level_score
    }

    /// Level total from the last update pass
    pub fn level(&self) -> i32 {
        self.scores.total(self.level_score).unwrap_or(0)
    }

    /// Replace the privileged level writer with one carrying `level`
    pub fn set_level(&mut self, level: i32) {
        self.detach(self.level_writer);
        let target = self.level_score;
        self.level_writer = self.attach(LevelSource::new(level, target));
    }

    /// Register a new score, returning its handle
    pub fn add_score(
        &mut self,
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        base: i32,
    ) -> SourceId {
        let id = self.allocate_id();
        self.scores.insert(Score::new(id, name, abbreviation, base));
        id
    }

    /// Attach a content source, returning its handle
    pub fn attach(&mut self, source: impl ModifierSource + 'static) -> SourceId {
        let id = self.allocate_id();
        self.contents.push(ContentEntry {
            id,
            source: Box::new(source),
        });
        id
    }

    /// Detach a source (or a score) and every sub-source it lists.
    ///
    /// Returns whether anything was removed. Totals are stale until the next
    /// update pass.
    pub fn detach(&mut self, id: SourceId) -> bool {
        let Some(position) = self.contents.iter().position(|e| e.id == id) else {
            return self.scores.remove(id);
        };
        let entry = self.contents.remove(position);
        let subs: Vec<SourceId> = entry.source.sub_sources().to_vec();
        for sub in subs {
            self.detach(sub);
        }
        self.committed.remove(&id);
        self.unusable.retain(|(s, _)| *s != id);
        true
    }

    /// Whether the character already carries a value-equal source.
    ///
    /// Uses domain value equality (kind + name + abbreviation,
    /// case-insensitive), not handle identity: two distinct instances of the
    /// same ability compare equal here while remaining distinct graph nodes.
    pub fn has_source(&self, candidate: &dyn ModifierSource) -> bool {
        self.contents
            .iter()
            .any(|e| value_eq(e.source.as_ref(), candidate))
    }

    /// Look up any registered source, score or content, by handle
    pub fn source(&self, id: SourceId) -> Option<&dyn ModifierSource> {
        self.contents
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.source.as_ref())
            .or_else(|| self.scores.get(id).map(|s| s as &dyn ModifierSource))
    }

    /// The score board (totals are from the last completed pass)
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    /// Look up a score by handle
    pub fn score(&self, id: SourceId) -> Option<&Score> {
        self.scores.get(id)
    }

    /// Look up a score by display name, case-insensitively
    pub fn score_by_name(&self, name: &str) -> Option<&Score> {
        self.scores.by_name(name)
    }

    /// Total of a score from the last pass
    pub fn total(&self, id: SourceId) -> Option<i32> {
        self.scores.total(id)
    }

    /// Modifiers a source committed in the last pass
    pub fn last_modifiers(&self, id: SourceId) -> &[Modifier] {
        self.committed.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a source passed its requirements in the last pass
    pub fn is_usable(&self, id: SourceId) -> bool {
        !self.unusable.iter().any(|(s, _)| *s == id)
    }

    /// Sources excluded in the last pass, with the reason
    pub fn unusable(&self) -> &[(SourceId, SourceError)] {
        &self.unusable
    }

    /// Display-ready breakdown of one score, sources resolved to names
    pub fn breakdown(&self, id: SourceId) -> Option<ScoreBreakdown> {
        let score = self.scores.get(id)?;
        let modifiers = score
            .applied()
            .iter()
            .map(|m| ModifierLine {
                source: self.display_name(m.source()),
                value: m.value(),
                condition: m.condition().map(str::to_string),
            })
            .collect();
        Some(ScoreBreakdown {
            name: score.name().to_string(),
            abbreviation: score.abbreviation().to_string(),
            base: score.base(),
            total: score.total(),
            modifiers,
        })
    }

    fn allocate_id(&mut self) -> SourceId {
        let id = SourceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Display name for any handle, falling back to the handle itself
    pub fn display_name(&self, id: SourceId) -> String {
        self.source(id)
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| id.to_string())
    }

    pub(crate) fn contents(&self) -> impl Iterator<Item = (SourceId, &dyn ModifierSource)> {
        self.contents.iter().map(|e| (e.id, e.source.as_ref()))
    }

    pub(crate) fn content(&self, id: SourceId) -> Option<&dyn ModifierSource> {
        self.contents
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.source.as_ref())
    }

    pub(crate) fn level_guard(&self) -> (SourceId, SourceId) {
        (self.level_score, self.level_writer)
    }

    pub(crate) fn board_mut(&mut self) -> &mut ScoreBoard {
        &mut self.scores
    }

    pub(crate) fn reset_pass_state(&mut self) {
        self.scores.clear_applied();
        self.committed.clear();
        self.unusable.clear();
    }

    pub(crate) fn record_committed(&mut self, id: SourceId, modifiers: Vec<Modifier>) {
        self.committed.insert(id, modifiers);
    }

    pub(crate) fn record_unusable(&mut self, id: SourceId, error: SourceError) {
        self.unusable.push((id, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FlatBonus;

    #[test]
    fn test_new_character_carries_level_score() {
        let character = Character::new("Keth", 5);
        let level = character.score_by_name(LEVEL_SCORE_NAME).unwrap();
        assert_eq!(level.id(), character.level_score_id());
        assert_eq!(level.base(), 0);
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut character = Character::new("Keth", 1);
        let a = character.add_score("Strength", "STR", 16);
        character.detach(a);
        let b = character.add_score("Strength", "STR", 16);
        assert_ne!(a, b);
    }

    #[test]
    fn test_has_source_uses_value_equality() {
        let mut character = Character::new("Keth", 1);
        let ac = character.add_score("Armor Class", "AC", 10);
        character.attach(FlatBonus::new("Ring of Protection", "RoP").with_modifier(ac, 1));

        let probe = FlatBonus::new("ring of protection", "rop");
        assert!(character.has_source(&probe));
        let other = FlatBonus::new("Ring of Force", "RoF");
        assert!(!character.has_source(&other));
    }

    #[test]
    fn test_detach_removes_content_and_scores() {
        let mut character = Character::new("Keth", 1);
        let ac = character.add_score("Armor Class", "AC", 10);
        let ring = character.attach(FlatBonus::new("Ring", "RNG").with_modifier(ac, 1));

        assert!(character.detach(ring));
        assert!(!character.detach(ring));
        assert!(character.detach(ac));
        assert!(character.score(ac).is_none());
    }

    #[test]
    fn test_breakdown_resolves_names() {
        let mut character = Character::new("Keth", 1);
        let ac = character.add_score("Armor Class", "AC", 10);
        character.attach(FlatBonus::new("Ring of Protection", "RoP").with_modifier(ac, 1));
        character.update().unwrap();

        let breakdown = character.breakdown(ac).unwrap();
        assert_eq!(breakdown.total, 11);
        assert_eq!(breakdown.modifiers.len(), 1);
        assert_eq!(breakdown.modifiers[0].source, "Ring of Protection");
    }
}
