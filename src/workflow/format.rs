use super::annotate::AnnotatedNode;
use itertools::Itertools;

/// Renders annotated definitions as indented text outlines.
pub struct StatusFormatter;

impl StatusFormatter {
    /// One line per node: `name [type] statuses`. Branches are indented under their
    /// gateway; the successor continues at the gateway's depth.
    pub fn format_tree(root: &AnnotatedNode) -> String {
        let mut lines = Vec::new();
        Self::format_recursive(root, 0, &mut lines);
        lines.join("\n")
    }

    fn format_recursive(node: &AnnotatedNode, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!(
            "{}{} [{}]{}",
            "  ".repeat(depth),
            Self::display_name(node),
            node.node_type,
            Self::format_statuses(node)
        ));
        for branch in &node.branches {
            Self::format_recursive(branch, depth + 1, lines);
        }
        if let Some(next) = node.next.as_deref() {
            Self::format_recursive(next, depth, lines);
        }
    }

    fn display_name(node: &AnnotatedNode) -> &str {
        if node.node_name.is_empty() {
            &node.node_id
        } else {
            &node.node_name
        }
    }

    fn format_statuses(node: &AnnotatedNode) -> String {
        if node.node_status.is_empty() {
            String::new()
        } else {
            format!(" {}", node.statuses().map(|s| s.label()).join(" -> "))
        }
    }
}
