//! Core types specific to bonus_core

use serde::Serialize;
use std::fmt;

/// Handle identifying one registered modifier source on a character.
///
/// Handles are assigned by the owning [`Character`](crate::Character) when a
/// score or content source is registered and are never reused within one
/// character. Two structurally identical sources (same name, same
/// abbreviation) still get distinct handles, which is what keeps them apart
/// in the dependency graph: graph identity is handle identity, not value
/// equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceId(pub(crate) u32);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source #{}", self.0)
    }
}
