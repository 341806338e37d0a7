//! ScoreBoard - Insertion-ordered score table, the read context for sources

use crate::score::Score;
use crate::types::SourceId;
use std::collections::HashMap;

/// All scores belonging to one character, in registration order.
///
/// A shared reference to the board is the only context a source gets during
/// the contribution protocol: sources read committed totals from it and
/// nothing else. During the mapping phase totals may still be stale, so
/// sources must only rely on them in commit mode.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    order: Vec<SourceId>,
    scores: HashMap<SourceId, Score>,
}

impl ScoreBoard {
    /// Create an empty board
    pub fn new() -> Self {
        ScoreBoard::default()
    }

    /// Register a score under its own handle
    pub(crate) fn insert(&mut self, score: Score) {
        let id = score.id();
        if self.scores.insert(id, score).is_none() {
            self.order.push(id);
        }
    }

    /// Remove a score, returning whether it existed
    pub(crate) fn remove(&mut self, id: SourceId) -> bool {
        if self.scores.remove(&id).is_some() {
            self.order.retain(|s| *s != id);
            true
        } else {
            false
        }
    }

    /// Whether `id` refers to a score on this board
    pub fn contains(&self, id: SourceId) -> bool {
        self.scores.contains_key(&id)
    }

    /// Look up a score by handle
    pub fn get(&self, id: SourceId) -> Option<&Score> {
        self.scores.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: SourceId) -> Option<&mut Score> {
        self.scores.get_mut(&id)
    }

    /// Look up a score by display name, case-insensitively
    pub fn by_name(&self, name: &str) -> Option<&Score> {
        self.iter().find(|s| s.name().eq_ignore_ascii_case(name))
    }

    /// Committed total of a score, if it exists
    pub fn total(&self, id: SourceId) -> Option<i32> {
        self.scores.get(&id).map(Score::total)
    }

    /// Iterate scores in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Score> {
        self.order.iter().filter_map(|id| self.scores.get(id))
    }

    /// Number of scores on the board
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the board holds no scores
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Reset every score to its base value
    pub(crate) fn clear_applied(&mut self) {
        for score in self.scores.values_mut() {
            score.clear_applied();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> ScoreBoard {
        let mut b = ScoreBoard::new();
        b.insert(Score::new(SourceId(0), "Strength", "STR", 16));
        b.insert(Score::new(SourceId(1), "Armor Class", "AC", 10));
        b
    }

    #[test]
    fn test_iteration_order_is_registration_order() {
        let names: Vec<_> = board().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["Strength", "Armor Class"]);
    }

    #[test]
    fn test_by_name_case_insensitive() {
        let b = board();
        assert_eq!(b.by_name("strength").map(Score::id), Some(SourceId(0)));
        assert_eq!(b.by_name("ARMOR CLASS").map(Score::id), Some(SourceId(1)));
        assert!(b.by_name("Reflex").is_none());
    }

    #[test]
    fn test_total_lookup() {
        let b = board();
        assert_eq!(b.total(SourceId(0)), Some(16));
        assert_eq!(b.total(SourceId(9)), None);
    }

    #[test]
    fn test_remove() {
        let mut b = board();
        assert!(b.remove(SourceId(0)));
        assert!(!b.remove(SourceId(0)));
        assert_eq!(b.len(), 1);
        assert!(b.by_name("Strength").is_none());
    }
}
