use serde::{Deserialize, Serialize};
use std::fmt;

/// The role of a node in a process definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Start,
    Between,
    End,
    Parallel,
    Serial,
    ParallelNode,
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Start => "start",
            NodeType::Between => "between",
            NodeType::End => "end",
            NodeType::Parallel => "parallel",
            NodeType::Serial => "serial",
            NodeType::ParallelNode => "parallel-node",
            NodeType::Other(name) => name,
        }
    }
}

impl From<&str> for NodeType {
    fn from(value: &str) -> Self {
        match value {
            "start" => NodeType::Start,
            "between" => NodeType::Between,
            "end" => NodeType::End,
            "parallel" => NodeType::Parallel,
            "serial" => NodeType::Serial,
            "parallel-node" => NodeType::ParallelNode,
            other => NodeType::Other(other.to_string()),
        }
    }
}

impl From<String> for NodeType {
    fn from(value: String) -> Self {
        NodeType::from(value.as_str())
    }
}

impl From<NodeType> for String {
    fn from(value: NodeType) -> Self {
        match value {
            NodeType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a process definition in canonical form.
///
/// `branches` holds the heads of a gateway's branches (or a plain fan-out), `next` the
/// single successor. Producers of either wire shape are normalized into this form by
/// [`crate::workflow::ingest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub node_id: String,
    pub node_name: String,
    pub node_type: NodeType,
    #[serde(rename = "conditionNodes", skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<WorkflowNode>,
    #[serde(rename = "childNode", skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<WorkflowNode>>,
}

impl WorkflowNode {
    pub fn new(
        node_id: impl Into<String>,
        node_name: impl Into<String>,
        node_type: impl Into<NodeType>,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            node_name: node_name.into(),
            node_type: node_type.into(),
            branches: Vec::new(),
            next: None,
        }
    }

    pub fn with_next(mut self, next: WorkflowNode) -> Self {
        self.next = Some(Box::new(next));
        self
    }

    pub fn with_branches(mut self, branches: Vec<WorkflowNode>) -> Self {
        self.branches = branches;
        self
    }

    /// Pre-order walk: the node, then each branch subtree in order, then the successor.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of nodes in the definition.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    pub fn find(&self, node_id: &str) -> Option<&WorkflowNode> {
        self.walk().find(|node| node.node_id == node_id)
    }
}

/// Iterator returned by [`WorkflowNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a WorkflowNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a WorkflowNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(next) = node.next.as_deref() {
            self.stack.push(next);
        }
        self.stack.extend(node.branches.iter().rev());
        Some(node)
    }
}

/// One execution-log entry of a process instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    #[serde(alias = "node_code")]
    pub node_code: String,
    #[serde(alias = "flow_status")]
    pub flow_status: i32,
}

impl HistoryRecord {
    pub fn new(node_code: impl Into<String>, flow_status: i32) -> Self {
        Self {
            node_code: node_code.into(),
            flow_status,
        }
    }
}

/// Status codes written to the execution log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowStatus {
    PendingSubmission,
    InApproval,
    Approved,
    AutoCompleted,
    Terminated,
    Voided,
    Revoked,
    Retrieved,
    Completed,
    Returned,
    Expired,
    Rejected,
    Unknown(i32),
}

impl FlowStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => FlowStatus::PendingSubmission,
            1 => FlowStatus::InApproval,
            2 => FlowStatus::Approved,
            3 => FlowStatus::AutoCompleted,
            4 => FlowStatus::Terminated,
            5 => FlowStatus::Voided,
            6 => FlowStatus::Revoked,
            7 => FlowStatus::Retrieved,
            8 => FlowStatus::Completed,
            9 => FlowStatus::Returned,
            10 => FlowStatus::Expired,
            99 => FlowStatus::Rejected,
            other => FlowStatus::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            FlowStatus::PendingSubmission => 0,
            FlowStatus::InApproval => 1,
            FlowStatus::Approved => 2,
            FlowStatus::AutoCompleted => 3,
            FlowStatus::Terminated => 4,
            FlowStatus::Voided => 5,
            FlowStatus::Revoked => 6,
            FlowStatus::Retrieved => 7,
            FlowStatus::Completed => 8,
            FlowStatus::Returned => 9,
            FlowStatus::Expired => 10,
            FlowStatus::Rejected => 99,
            FlowStatus::Unknown(code) => code,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowStatus::PendingSubmission => "Pending submission",
            FlowStatus::InApproval => "In approval",
            FlowStatus::Approved => "Approved",
            FlowStatus::AutoCompleted => "Auto-completed",
            FlowStatus::Terminated => "Terminated",
            FlowStatus::Voided => "Voided",
            FlowStatus::Revoked => "Revoked",
            FlowStatus::Retrieved => "Retrieved",
            FlowStatus::Completed => "Completed",
            FlowStatus::Returned => "Returned",
            FlowStatus::Expired => "Expired",
            FlowStatus::Rejected => "Rejected",
            FlowStatus::Unknown(_) => "Unknown status",
        }
    }

    /// Display color used by the process viewer, as an `rgb(r, g, b)` string.
    pub fn color(self) -> &'static str {
        match self {
            FlowStatus::PendingSubmission => "rgb(255, 190, 152)",
            FlowStatus::InApproval => "rgb(255, 57, 82)",
            FlowStatus::Approved => "rgb(140, 43, 50)",
            FlowStatus::AutoCompleted => "rgb(202, 202, 202)",
            FlowStatus::Terminated => "rgb(111, 93, 68)",
            FlowStatus::Voided => "rgb(255, 69, 76)",
            FlowStatus::Revoked => "rgb(171, 71, 60)",
            FlowStatus::Retrieved => "rgb(255, 149, 0)",
            FlowStatus::Completed => "rgb(38, 40, 221)",
            FlowStatus::Returned => "rgb(255, 105, 164)",
            FlowStatus::Expired => "rgb(0, 122, 204)",
            FlowStatus::Rejected => "rgb(255, 0, 0)",
            FlowStatus::Unknown(_) => "rgb(255, 255, 0)",
        }
    }
}

impl From<i32> for FlowStatus {
    fn from(code: i32) -> Self {
        FlowStatus::from_code(code)
    }
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
