//! LevelSource - The privileged writer of the character level score

use crate::modifier::Modifier;
use crate::score::ScoreBoard;
use crate::source::{ModifierSource, SourceError};
use crate::types::SourceId;

/// The intrinsic source that writes the reserved level score.
///
/// The level score accepts modifiers from exactly one registered writer; the
/// orchestrator rejects any other source targeting it. A character creates
/// and replaces its own `LevelSource` through
/// [`Character::new`](crate::Character::new) and
/// [`Character::set_level`](crate::Character::set_level).
#[derive(Debug, Clone)]
pub struct LevelSource {
    level: i32,
    target: SourceId,
}

impl LevelSource {
    /// Create a level source writing `level` into the given score
    pub fn new(level: i32, target: SourceId) -> Self {
        LevelSource { level, target }
    }

    /// The level this source contributes
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl ModifierSource for LevelSource {
    fn kind(&self) -> &'static str {
        "level"
    }

    fn name(&self) -> &str {
        "Character Level"
    }

    fn abbreviation(&self) -> &str {
        "LVL"
    }

    fn produce_modifiers(
        &self,
        me: SourceId,
        _board: &ScoreBoard,
        emit: &mut dyn FnMut(Modifier),
    ) -> Result<(), SourceError> {
        emit(Modifier::new(me, self.target, self.level)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contributes_level_to_target() {
        let source = LevelSource::new(5, SourceId(0));
        let board = ScoreBoard::new();
        let mut out = Vec::new();
        source
            .produce_modifiers(SourceId(1), &board, &mut |m| out.push(m))
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].target(), SourceId(0));
        assert_eq!(out[0].value(), 5);
    }
}
