use tracing::debug;

use crate::records::{PathRecord, Status};

use super::node::check_siblings;
use super::{Node, Tree, TreeError};

/// A record viewed from some depth: the segments not yet consumed by the
/// directories above it.
#[derive(Debug, Clone, Copy)]
struct Entry<'a> {
    segments: &'a [String],
    status: Option<Status>,
}

impl Entry<'_> {
    fn head(&self) -> &str {
        &self.segments[0]
    }

    fn is_terminal(&self) -> bool {
        self.segments.len() == 1
    }

    fn descend(&self) -> Self {
        Self {
            segments: &self.segments[1..],
            status: self.status,
        }
    }
}

/// Builds a tree from records already sorted in git path order.
///
/// Consecutive records sharing a first segment are grouped; input is never
/// re-sorted, so records out of order surface as [`TreeError`]s.
pub fn build_tree(records: &[PathRecord]) -> Result<Tree, TreeError> {
    let entries = records
        .iter()
        .map(|record| Entry {
            segments: record.segments(),
            status: record.status(),
        })
        .collect::<Vec<_>>();

    let tree = build_level(&entries)?;
    debug!(
        "Built tree with {} top-level entries from {} records",
        tree.len(),
        records.len()
    );
    Ok(tree)
}

fn build_level(entries: &[Entry<'_>]) -> Result<Tree, TreeError> {
    let level = entries
        .chunk_by(|left, right| left.head() == right.head())
        .map(build_node)
        .collect::<Result<Tree, _>>()?;

    check_siblings(&level)?;
    Ok(level)
}

fn build_node(run: &[Entry<'_>]) -> Result<Node, TreeError> {
    let name = run[0].head();

    if let [entry] = run {
        if entry.is_terminal() {
            return Ok(Node::leaf(name, entry.status));
        }
    }

    let terminal_count = run.iter().filter(|entry| entry.is_terminal()).count();
    if terminal_count == run.len() {
        return Err(TreeError::Duplicate {
            name: name.to_string(),
        });
    }
    if terminal_count > 0 {
        return Err(TreeError::Collision {
            name: name.to_string(),
        });
    }

    let children = run.iter().map(Entry::descend).collect::<Vec<_>>();
    Ok(Node::directory(name, build_level(&children)?))
}
