//! Dependency graph construction from declared pairs

use crate::graph::Dag;
use crate::score::ScoreBoard;
use crate::source::ModifierSource;
use crate::types::SourceId;

/// Build the dependency graph for one update pass.
///
/// Runs the mapping phase against every content source: each declared
/// `(prerequisite, dependent)` pair interns both endpoints (scores included,
/// the moment something targets or reads them) and attaches the dependent
/// under the prerequisite. A prerequisite seen for the first time is also
/// anchored under the synthetic root so that every node is reachable even if
/// nothing has to run before it.
///
/// Sources that declare no pairs at all stay out of the graph; they have
/// nothing to contribute and nothing to order.
pub fn build_dependency_graph<'a>(
    sources: impl Iterator<Item = (SourceId, &'a dyn ModifierSource)>,
    board: &ScoreBoard,
) -> Dag<SourceId> {
    let mut dag = Dag::new();
    let mut pairs = Vec::new();
    for (id, source) in sources {
        pairs.clear();
        source.declare_dependencies(id, board, &mut |prerequisite, dependent| {
            pairs.push((prerequisite, dependent));
        });
        for &(prerequisite, dependent) in &pairs {
            let (parent, parent_created) = dag.intern(prerequisite);
            let (child, _) = dag.intern(dependent);
            dag.add_child(parent, child);
            if parent_created {
                let root = dag.root();
                dag.add_child(root, parent);
            }
        }
    }
    dag
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Score;
    use crate::source::{DerivedBonus, FlatBonus};

    fn board() -> ScoreBoard {
        let mut b = ScoreBoard::new();
        b.insert(Score::new(SourceId(0), "Strength", "STR", 16));
        b.insert(Score::new(SourceId(1), "Melee Attack", "ATK", 0));
        b
    }

    #[test]
    fn test_modifier_edges_become_children() {
        let bonus = FlatBonus::new("Gauntlets", "GNT").with_modifier(SourceId(0), 2);
        let board = board();
        let sources: Vec<(SourceId, &dyn ModifierSource)> = vec![(SourceId(2), &bonus)];

        let dag = build_dependency_graph(sources.into_iter(), &board);

        let bonus_node = dag.get(SourceId(2)).unwrap();
        let score_node = dag.get(SourceId(0)).unwrap();
        assert_eq!(dag.node(bonus_node).children(), &[score_node]);
        // The bonus was first seen as a prerequisite, so it hangs off root.
        assert!(dag.node(dag.root()).children().contains(&bonus_node));
    }

    #[test]
    fn test_read_edges_link_score_before_reader() {
        let derived = DerivedBonus::new("Strength to attack", "STR>ATK", SourceId(0), SourceId(1));
        let board = board();
        let sources: Vec<(SourceId, &dyn ModifierSource)> = vec![(SourceId(2), &derived)];

        let dag = build_dependency_graph(sources.into_iter(), &board);

        let score_node = dag.get(SourceId(0)).unwrap();
        let derived_node = dag.get(SourceId(2)).unwrap();
        assert!(dag.node(score_node).children().contains(&derived_node));
    }

    #[test]
    fn test_shared_target_has_two_parents() {
        let first = FlatBonus::new("Ring", "RNG").with_modifier(SourceId(0), 1);
        let second = FlatBonus::new("Amulet", "AMU").with_modifier(SourceId(0), 1);
        let board = board();
        let sources: Vec<(SourceId, &dyn ModifierSource)> =
            vec![(SourceId(2), &first), (SourceId(3), &second)];

        let dag = build_dependency_graph(sources.into_iter(), &board);

        let score_node = dag.get(SourceId(0)).unwrap();
        let parents = [SourceId(2), SourceId(3)]
            .iter()
            .filter(|id| {
                let node = dag.get(**id).unwrap();
                dag.node(node).children().contains(&score_node)
            })
            .count();
        assert_eq!(parents, 2);
        // Shared node, not a copy: 1 root + 2 bonuses + 1 score.
        assert_eq!(dag.len(), 4);
    }

    #[test]
    fn test_source_without_pairs_stays_out() {
        let idle = FlatBonus::new("Trinket", "TRK");
        let board = board();
        let sources: Vec<(SourceId, &dyn ModifierSource)> = vec![(SourceId(2), &idle)];

        let dag = build_dependency_graph(sources.into_iter(), &board);
        assert!(dag.get(SourceId(2)).is_none());
        assert!(dag.is_empty());
    }
}
