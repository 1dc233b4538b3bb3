use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use super::node::{check_siblings, repeated_name_error};
use super::{Node, Tree, TreeError};

/// Overlays the status tree onto the full tree.
///
/// The result has the shape of `full` plus any entries only `changed` knows
/// about (deleted files, for instance). Wherever both trees hold the same
/// name the `changed` node wins, so statuses survive the merge.
pub fn merge_trees(full: &[Node], changed: &[Node]) -> Result<Tree, TreeError> {
    let merged = merge_level(full, changed)?;
    debug!("Merged tree has {} top-level entries", merged.len());
    Ok(merged)
}

fn merge_level(full: &[Node], changed: &[Node]) -> Result<Tree, TreeError> {
    if changed.is_empty() {
        return Ok(full.to_vec());
    }
    if full.is_empty() {
        return Ok(changed.to_vec());
    }

    check_siblings(full)?;
    check_siblings(changed)?;

    let mut merged = Tree::with_capacity(full.len().max(changed.len()));
    let mut full_iter = full.iter().peekable();
    let mut changed_iter = changed.iter().peekable();

    while let (Some(&full_node), Some(&changed_node)) = (full_iter.peek(), changed_iter.peek()) {
        if full_node.name == changed_node.name {
            merged.push(join(full_node, changed_node)?);
            full_iter.next();
            changed_iter.next();
            continue;
        }

        match full_node.order_cmp(changed_node) {
            Ordering::Less => {
                merged.push(full_node.clone());
                full_iter.next();
            }
            Ordering::Greater => {
                merged.push(changed_node.clone());
                changed_iter.next();
            }
            Ordering::Equal => unreachable!("distinct names never compare equal"),
        }
    }

    merged.extend(full_iter.cloned());
    merged.extend(changed_iter.cloned());

    check_unique_names(&merged)?;
    Ok(merged)
}

fn join(full_node: &Node, changed_node: &Node) -> Result<Node, TreeError> {
    if changed_node.is_leaf() {
        return Ok(changed_node.clone());
    }

    let children = merge_level(full_node.children(), changed_node.children())?;
    Ok(changed_node.with_children(children))
}

/// A file and a directory sharing a name are not always adjacent in git
/// order, so the join can miss them and emit both.
fn check_unique_names(merged: &[Node]) -> Result<(), TreeError> {
    let mut seen = HashSet::with_capacity(merged.len());
    match merged.iter().find(|node| !seen.insert(node.name.as_str())) {
        Some(repeated) => Err(repeated_name_error(merged, repeated)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Status, parse_path_lines, parse_status_lines};
    use crate::tree::build_tree;

    fn full(paths: &[&str]) -> Tree {
        build_tree(&parse_path_lines(paths).unwrap()).unwrap()
    }

    fn changed(lines: &[&str]) -> Tree {
        build_tree(&parse_status_lines(lines).unwrap()).unwrap()
    }

    fn names(tree: &[Node]) -> Vec<&str> {
        tree.iter().map(|node| node.name.as_str()).collect()
    }

    #[test]
    fn merging_nothing_changed_returns_full() {
        let full = full(&["a/b.txt", "c.txt"]);
        assert_eq!(merge_trees(&full, &[]).unwrap(), full);
    }

    #[test]
    fn merging_into_empty_full_returns_changed() {
        let changed = changed(&["A\ta/b.txt", "D\tc.txt"]);
        assert_eq!(merge_trees(&[], &changed).unwrap(), changed);
    }

    #[test]
    fn status_propagates_onto_existing_leaf() {
        let merged = merge_trees(&full(&["x.txt"]), &changed(&["M\tx.txt"])).unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "x.txt");
        assert!(merged[0].is_leaf());
        assert_eq!(merged[0].status, Some(Status::Modified));
    }

    #[test]
    fn nested_statuses_propagate_and_siblings_survive() {
        let full = full(&["README.md", "src/app.js", "src/helper.js", "src/util.js"]);
        let changed = changed(&["M\tsrc/helper.js"]);

        let merged = merge_trees(&full, &changed).unwrap();

        assert_eq!(names(&merged), vec!["README.md", "src"]);
        let src = merged[1].children();
        assert_eq!(names(src), vec!["app.js", "helper.js", "util.js"]);
        assert_eq!(src[0].status, None);
        assert_eq!(src[1].status, Some(Status::Modified));
        assert_eq!(src[2].status, None);
    }

    #[test]
    fn entries_missing_from_full_are_inserted_in_order() {
        let full = full(&["a.txt", "c.txt"]);
        let changed = changed(&["D\tb.txt", "D\td/e.txt"]);

        let merged = merge_trees(&full, &changed).unwrap();

        assert_eq!(names(&merged), vec!["a.txt", "b.txt", "c.txt", "d"]);
        assert_eq!(merged[1].status, Some(Status::Deleted));
        assert_eq!(merged[3].children()[0].status, Some(Status::Deleted));
    }

    #[test]
    fn changed_leaf_replaces_full_directory() {
        let full = vec![Node::directory("x", vec![Node::leaf("y", None)])];
        let changed = vec![Node::leaf("x", Some(Status::TypeChanged))];

        let merged = merge_trees(&full, &changed).unwrap();

        assert_eq!(merged, changed);
    }

    #[test]
    fn changed_directory_over_full_leaf_keeps_its_children() {
        let full = vec![Node::leaf("x", None)];
        let changed = vec![Node::directory(
            "x",
            vec![Node::leaf("y", Some(Status::Added))],
        )];

        let merged = merge_trees(&full, &changed).unwrap();

        assert_eq!(merged, changed);
    }

    #[test]
    fn merging_leaves_inputs_untouched() {
        let full = full(&["a/b.txt"]);
        let changed = changed(&["M\ta/b.txt"]);
        let full_before = full.clone();
        let changed_before = changed.clone();

        let _ = merge_trees(&full, &changed).unwrap();

        assert_eq!(full, full_before);
        assert_eq!(changed, changed_before);
    }

    #[test]
    fn unsorted_full_side_is_fatal() {
        let full = vec![Node::leaf("b", None), Node::leaf("a", None)];
        let changed = vec![Node::leaf("a", Some(Status::Modified))];

        assert!(matches!(
            merge_trees(&full, &changed),
            Err(TreeError::Unsorted { .. })
        ));
    }

    #[test]
    fn unjoinable_file_and_directory_collide() {
        let full = vec![Node::leaf("a", None)];
        let changed = vec![
            Node::leaf("a.txt", Some(Status::Added)),
            Node::directory("a", vec![Node::leaf("b", Some(Status::Added))]),
        ];

        assert_eq!(
            merge_trees(&full, &changed),
            Err(TreeError::Collision { name: "a".into() })
        );
    }
}
