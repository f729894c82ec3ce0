use super::definition::{NodeType, WorkflowNode};
use serde::Serialize;

/// Summary of a node that can be selected in a process picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigableNode {
    pub node_id: String,
    pub node_name: String,
    pub node_type: NodeType,
}

/// A node a running instance can be sent back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackTarget {
    pub node_id: String,
    pub node_name: String,
}

/// Start, intermediate and parallel-branch nodes in pre-order. End nodes are never listed.
pub fn extract_navigable_nodes(root: &WorkflowNode) -> Vec<NavigableNode> {
    root.walk()
        .filter(|node| {
            matches!(
                node.node_type,
                NodeType::Start | NodeType::Between | NodeType::ParallelNode
            )
        })
        .map(|node| NavigableNode {
            node_id: node.node_id.clone(),
            node_name: node.node_name.clone(),
            node_type: node.node_type.clone(),
        })
        .collect()
}

/// Start, intermediate and end nodes in pre-order, gateway branches before the successor.
pub fn extract_back_targets(root: &WorkflowNode) -> Vec<BackTarget> {
    root.walk()
        .filter(|node| {
            matches!(
                node.node_type,
                NodeType::Start | NodeType::Between | NodeType::End
            )
        })
        .map(|node| BackTarget {
            node_id: node.node_id.clone(),
            node_name: node.node_name.clone(),
        })
        .collect()
}

/// [`extract_navigable_nodes`] over several roots, concatenated in order.
pub fn extract_navigable_nodes_from(roots: &[WorkflowNode]) -> Vec<NavigableNode> {
    roots.iter().flat_map(extract_navigable_nodes).collect()
}

/// [`extract_back_targets`] over several roots, concatenated in order.
pub fn extract_back_targets_from(roots: &[WorkflowNode]) -> Vec<BackTarget> {
    roots.iter().flat_map(extract_back_targets).collect()
}
