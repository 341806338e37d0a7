//! The update pass - whole-graph recomputation in dependency order

use crate::character::Character;
use crate::graph::build_dependency_graph;
use crate::modifier::{Modifier, ModifierError};
use crate::score::ScoreError;
use crate::source::SourceError;
use crate::types::SourceId;
use thiserror::Error;

/// Fatal error aborting an update pass.
///
/// When any of these is returned, no score total is valid; the caller must
/// fix the triggering condition and run another pass. Nothing is retried
/// automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("dependency cycle involving '{0}'")]
    DependencyCycle(String),
    #[error("'{name}' is not allowed to modify the character level score")]
    ProtectedScore { name: String },
    #[error("modifier from '{name}' targets {target}, which is not a score")]
    InvalidTarget { name: String, target: SourceId },
    #[error("'{name}' is not ready to contribute: {reason}")]
    SourceNotReady { name: String, reason: String },
    #[error("'{name}' emitted an invalid modifier: {error}")]
    InvalidModifier { name: String, error: ModifierError },
    #[error(transparent)]
    Score(#[from] ScoreError),
}

/// Observability hooks around each committed source.
///
/// Both methods default to no-ops; tracing and debugging tools implement
/// whichever they need. The hooks fire only for non-synthetic nodes, in
/// commit order.
pub trait UpdateObserver {
    fn source_updating(&mut self, id: SourceId, name: &str) {
        let _ = (id, name);
    }

    fn source_updated(&mut self, id: SourceId, name: &str) {
        let _ = (id, name);
    }
}

struct SilentObserver;

impl UpdateObserver for SilentObserver {}

/// Outcome of a completed update pass
#[derive(Debug, Clone)]
pub struct UpdateReport {
    /// Every committed source, in traversal order
    pub order: Vec<SourceId>,
    /// Sources excluded this pass because a requirement failed
    pub unusable: Vec<(SourceId, SourceError)>,
}

impl Character {
    /// Recompute every score from the current contributor set.
    ///
    /// One pass: build the dependency graph fresh, order it topologically,
    /// reset all applied modifiers, then commit each source exactly once
    /// with all of its prerequisites already final.
    pub fn update(&mut self) -> Result<UpdateReport, UpdateError> {
        self.update_with_observer(&mut SilentObserver)
    }

    /// [`update`](Character::update) with tracing hooks around each source
    pub fn update_with_observer(
        &mut self,
        observer: &mut dyn UpdateObserver,
    ) -> Result<UpdateReport, UpdateError> {
        let graph = build_dependency_graph(self.contents(), self.scores());
        let order = graph
            .topological_order()
            .map_err(|cycle| UpdateError::DependencyCycle(self.display_name(cycle.value)))?;

        self.reset_pass_state();

        let mut committed_order = Vec::new();
        for node in order {
            let Some(id) = graph.node(node).value() else {
                continue; // synthetic root
            };
            let name = self.display_name(id);
            observer.source_updating(id, &name);

            let mut produced = Vec::new();
            let result = match self.content(id) {
                Some(source) => {
                    source.produce_modifiers(id, self.scores(), &mut |m| produced.push(m))
                }
                None if self.scores().contains(id) => Ok(()),
                None => {
                    // A declared prerequisite that was detached after the
                    // declaring source was attached.
                    return Err(UpdateError::SourceNotReady {
                        name,
                        reason: format!("{id} is not registered on this character"),
                    });
                }
            };
            match result {
                Ok(()) => {}
                Err(error @ SourceError::RequirementNotMet(_)) => {
                    produced.clear();
                    self.record_unusable(id, error);
                }
                Err(SourceError::NotInitialized(reason)) => {
                    return Err(UpdateError::SourceNotReady { name, reason });
                }
                Err(SourceError::InvalidModifier(error)) => {
                    return Err(UpdateError::InvalidModifier { name, error });
                }
            }

            for modifier in &produced {
                self.apply_committed(modifier)?;
            }
            self.record_committed(id, produced);
            committed_order.push(id);
            observer.source_updated(id, &name);
        }

        Ok(UpdateReport {
            order: committed_order,
            unusable: self.unusable().to_vec(),
        })
    }

    fn apply_committed(&mut self, modifier: &Modifier) -> Result<(), UpdateError> {
        let (level_score, level_writer) = self.level_guard();
        if modifier.target() == level_score && modifier.source() != level_writer {
            return Err(UpdateError::ProtectedScore {
                name: self.display_name(modifier.source()),
            });
        }
        let source_name = self.display_name(modifier.source());
        match self.board_mut().get_mut(modifier.target()) {
            Some(score) => Ok(score.apply(modifier.clone())?),
            None => Err(UpdateError::InvalidTarget {
                name: source_name,
                target: modifier.target(),
            }),
        }
    }
}
