use colored::Colorize;

use crate::records::Status;
use crate::tree::Node;

/// Decides how a node's label looks on the terminal.
pub trait LabelStyle {
    fn paint(&self, label: &str, node: &Node) -> String;
}

/// Leaves labels untouched, for pipes and `--color never`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl LabelStyle for PlainStyle {
    fn paint(&self, label: &str, _node: &Node) -> String {
        label.to_string()
    }
}

/// Colors labels by status and bolds the entries that were asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyle;

impl LabelStyle for AnsiStyle {
    fn paint(&self, label: &str, node: &Node) -> String {
        let painted = match node.status {
            Some(Status::Added) => label.green(),
            Some(Status::Modified) => label.blue(),
            Some(Status::Deleted) => label.red(),
            Some(Status::TypeChanged) => label.yellow(),
            None => label.normal(),
        };

        if node.selected {
            painted.bold().to_string()
        } else {
            painted.to_string()
        }
    }
}
