use super::definition::{FlowStatus, HistoryRecord, NodeType, WorkflowNode};
use ahash::AHashMap;
use serde::Serialize;

/// A definition node carrying the statuses logged against it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedNode {
    pub node_id: String,
    pub node_name: String,
    pub node_type: NodeType,
    pub node_status: Vec<i32>,
    #[serde(rename = "conditionNodes", skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<AnnotatedNode>,
    #[serde(rename = "childNode", skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<AnnotatedNode>>,
}

impl AnnotatedNode {
    /// The most recently logged status, if any.
    pub fn latest_status(&self) -> Option<FlowStatus> {
        self.node_status.last().copied().map(FlowStatus::from_code)
    }

    pub fn statuses(&self) -> impl Iterator<Item = FlowStatus> + '_ {
        self.node_status.iter().copied().map(FlowStatus::from_code)
    }

    /// Pre-order walk in the same order as [`WorkflowNode::walk`].
    pub fn walk(&self) -> impl Iterator<Item = &AnnotatedNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Some(next) = node.next.as_deref() {
                stack.push(next);
            }
            stack.extend(node.branches.iter().rev());
            Some(node)
        })
    }

    pub fn find(&self, node_id: &str) -> Option<&AnnotatedNode> {
        self.walk().find(|node| node.node_id == node_id)
    }
}

/// History grouped by node code, each group in log order.
#[derive(Debug, Default)]
pub struct StatusIndex<'h> {
    by_node: AHashMap<&'h str, Vec<i32>>,
}

impl<'h> StatusIndex<'h> {
    pub fn new(history: &'h [HistoryRecord]) -> Self {
        let mut by_node: AHashMap<&'h str, Vec<i32>> = AHashMap::new();
        for record in history {
            by_node
                .entry(record.node_code.as_str())
                .or_default()
                .push(record.flow_status);
        }
        Self { by_node }
    }

    /// Statuses logged for `node_id`, empty when none.
    pub fn statuses(&self, node_id: &str) -> &[i32] {
        self.by_node.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Overlays execution history onto a definition.
///
/// Every node is matched against the full history; its `node_status` lists the matching
/// `flow_status` values in history order. The input tree is left untouched, so repeated
/// calls give identical results.
pub fn annotate(root: &WorkflowNode, history: &[HistoryRecord]) -> AnnotatedNode {
    let index = StatusIndex::new(history);
    annotate_with(root, &index)
}

/// Same as [`annotate`] with a prebuilt index, for annotating several roots.
pub fn annotate_with(root: &WorkflowNode, index: &StatusIndex<'_>) -> AnnotatedNode {
    AnnotatedNode {
        node_id: root.node_id.clone(),
        node_name: root.node_name.clone(),
        node_type: root.node_type.clone(),
        node_status: index.statuses(&root.node_id).to_vec(),
        branches: root
            .branches
            .iter()
            .map(|branch| annotate_with(branch, index))
            .collect(),
        next: root
            .next
            .as_deref()
            .map(|next| Box::new(annotate_with(next, index))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_keeps_log_order_per_node() {
        let history = vec![
            HistoryRecord::new("a", 1),
            HistoryRecord::new("b", 5),
            HistoryRecord::new("a", 2),
            HistoryRecord::new("a", 1),
        ];
        let index = StatusIndex::new(&history);
        assert_eq!(index.statuses("a"), &[1, 2, 1]);
        assert_eq!(index.statuses("b"), &[5]);
        assert!(index.statuses("c").is_empty());
    }
}
