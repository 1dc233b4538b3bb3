use super::LabelStyle;
use crate::tree::{Node, NodeKind};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const GAP: &str = "    ";
const DIRECTORY_MARKER: &str = "/";

/// Renders a selected tree as box-drawing lines.
///
/// Relies on the `is_last` markers set by the selector to pick connectors.
pub struct TreeRenderer<'a> {
    style: &'a dyn LabelStyle,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(style: &'a dyn LabelStyle) -> Self {
        Self { style }
    }

    pub fn render(&self, tree: &[Node]) -> Vec<String> {
        let mut lines = Vec::new();
        let mut open_ancestors = Vec::new();
        self.render_level(tree, &mut open_ancestors, &mut lines);
        lines
    }

    /// `open_ancestors[depth]` is true while the ancestor at `depth` still has
    /// siblings below it.
    fn render_level(&self, level: &[Node], open_ancestors: &mut Vec<bool>, lines: &mut Vec<String>) {
        for node in level {
            let mut line = open_ancestors
                .iter()
                .map(|&open| if open { CONTINUATION } else { GAP })
                .collect::<String>();
            line.push_str(if node.is_last { LAST_BRANCH } else { BRANCH });
            line.push_str(&self.style.paint(&label(node), node));
            lines.push(line);

            let children = node.children();
            if !children.is_empty() {
                open_ancestors.push(!node.is_last);
                self.render_level(children, open_ancestors, lines);
                open_ancestors.pop();
            }
        }
    }
}

/// Status code, name and a trailing `/` for directories.
pub fn label(node: &Node) -> String {
    let mut label = node
        .status
        .map(|status| format!("{status} "))
        .unwrap_or_default();
    label.push_str(&node.name);
    if let NodeKind::Directory { .. } = node.kind {
        label.push_str(DIRECTORY_MARKER);
    }
    label
}
