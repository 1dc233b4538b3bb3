use tracing::debug;

use super::node::find_by_name;
use super::{Node, NodeKind, Tree};

/// Prunes `tree` down to the entries named in `targets` plus up to `context`
/// neighbours on each side, level by level.
///
/// Runs of hidden siblings become a single ellipsis node when `context` is
/// non-zero and disappear otherwise. Only directories that are themselves
/// targets are descended into; directories kept as context lose their
/// children.
pub fn select_context(tree: &[Node], targets: &[Node], context: usize) -> Tree {
    let selected = select_level(tree, targets, context);
    debug!(
        "Selected {} of {} top-level entries with context {}",
        selected.len(),
        tree.len(),
        context
    );
    selected
}

fn select_level(tree: &[Node], targets: &[Node], context: usize) -> Tree {
    let matched = tree
        .iter()
        .map(|node| !node.is_ellipsis() && find_by_name(targets, &node.name).is_some())
        .collect::<Vec<_>>();
    let visible = dilate(&matched, context);

    let mut selected = Tree::new();
    let mut start = 0;
    for run in visible.chunk_by(|left, right| left == right) {
        let range = start..start + run.len();
        start = range.end;

        if run[0] {
            selected.extend(
                range.map(|index| select_node(&tree[index], matched[index], targets, context)),
            );
        } else if context > 0 {
            selected.push(Node::ellipsis());
        }
    }

    mark_ends(&mut selected);
    selected
}

fn select_node(node: &Node, matched: bool, targets: &[Node], context: usize) -> Node {
    let mut selected = match &node.kind {
        NodeKind::Directory { children } if matched => {
            let target_children = find_by_name(targets, &node.name)
                .map(Node::children)
                .unwrap_or_default();
            node.with_children(select_level(children, target_children, context))
        }
        NodeKind::Directory { .. } => node.with_children(Tree::new()),
        NodeKind::Leaf | NodeKind::Ellipsis => node.clone(),
    };

    selected.selected = matched;
    selected.is_first = false;
    selected.is_last = false;
    selected
}

fn mark_ends(level: &mut [Node]) {
    if let Some(first) = level.first_mut() {
        first.is_first = true;
    }
    if let Some(last) = level.last_mut() {
        last.is_last = true;
    }
}

/// Widens every `true` in `bits` to the `radius` positions on either side.
pub fn dilate(bits: &[bool], radius: usize) -> Vec<bool> {
    let mut prefix = Vec::with_capacity(bits.len() + 1);
    prefix.push(0usize);
    for &bit in bits {
        let total = prefix[prefix.len() - 1] + usize::from(bit);
        prefix.push(total);
    }

    (0..bits.len())
        .map(|index| {
            let low = index.saturating_sub(radius);
            let high = index.saturating_add(radius).saturating_add(1).min(bits.len());
            prefix[high] > prefix[low]
        })
        .collect()
}
