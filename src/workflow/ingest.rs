//! Ingestion of the two wire shapes emitted by process-design endpoints.
//!
//! Listing endpoints emit a *generic* shape where every node carries a `childNodes`
//! fan-out. The designer emits a *directed* shape where a node has at most one
//! `childNode` successor plus the branch heads of a gateway in `conditionNodes`.
//! Both are normalized into [`WorkflowNode`] here so that extraction and annotation run
//! a single traversal.

use super::definition::{NodeType, WorkflowNode};
use crate::error::WorkflowError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;

/// A type that can be normalized into the canonical workflow model.
pub trait IntoWorkflow {
    /// Consumes the object and converts it into a canonical definition tree.
    fn into_workflow(self) -> Result<WorkflowNode, WorkflowError>;
}

/// Node of the generic (`childNodes`) shape.
#[derive(Debug, Deserialize, Clone)]
pub struct GenericNode {
    #[serde(default, alias = "nodeId", deserialize_with = "lenient_id")]
    pub node_id: Option<String>,
    #[serde(default, alias = "nodeName")]
    pub node_name: Option<String>,
    #[serde(default, alias = "nodeType")]
    pub node_type: Option<String>,
    #[serde(default, alias = "childNodes")]
    pub child_nodes: Option<Vec<GenericNode>>,
}

/// Node of the directed (`childNode` / `conditionNodes`) shape.
#[derive(Debug, Deserialize, Clone)]
pub struct DirectedNode {
    #[serde(default, alias = "nodeId", deserialize_with = "lenient_id")]
    pub node_id: Option<String>,
    #[serde(default, alias = "nodeName")]
    pub node_name: Option<String>,
    #[serde(default, alias = "nodeType")]
    pub node_type: Option<String>,
    #[serde(default, alias = "childNode")]
    pub child_node: Option<Box<DirectedNode>>,
    #[serde(default, alias = "conditionNodes")]
    pub condition_nodes: Option<Vec<DirectedNode>>,
}

impl IntoWorkflow for GenericNode {
    fn into_workflow(self) -> Result<WorkflowNode, WorkflowError> {
        let mut node = canonical_node(self.node_id, self.node_name, self.node_type)?;
        node.branches = self
            .child_nodes
            .unwrap_or_default()
            .into_iter()
            .map(IntoWorkflow::into_workflow)
            .collect::<Result<_, _>>()?;
        Ok(node)
    }
}

impl IntoWorkflow for DirectedNode {
    fn into_workflow(self) -> Result<WorkflowNode, WorkflowError> {
        let mut node = canonical_node(self.node_id, self.node_name, self.node_type)?;
        node.branches = self
            .condition_nodes
            .unwrap_or_default()
            .into_iter()
            .map(IntoWorkflow::into_workflow)
            .collect::<Result<_, _>>()?;
        node.next = self
            .child_node
            .map(|child| child.into_workflow().map(Box::new))
            .transpose()?;
        Ok(node)
    }
}

fn canonical_node(
    node_id: Option<String>,
    node_name: Option<String>,
    node_type: Option<String>,
) -> Result<WorkflowNode, WorkflowError> {
    let node_name = node_name.unwrap_or_default();
    let node_id = node_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| WorkflowError::MissingNodeId {
            node_name: node_name.clone(),
        })?;
    Ok(WorkflowNode {
        node_id,
        node_name,
        node_type: NodeType::from(node_type.unwrap_or_default()),
        branches: Vec::new(),
        next: None,
    })
}

/// Which wire shape a workflow document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowShape {
    Generic,
    Directed,
}

impl WorkflowShape {
    /// Guesses the shape of a document: a `childNodes` field on any node, at any depth or
    /// root, means generic; anything else is read as directed.
    pub fn detect(value: &Value) -> WorkflowShape {
        if has_child_nodes(value) {
            WorkflowShape::Generic
        } else {
            WorkflowShape::Directed
        }
    }
}

fn has_child_nodes(value: &Value) -> bool {
    let mut stack = vec![value];
    while let Some(value) = stack.pop() {
        match value {
            Value::Object(map) if map.contains_key("childNodes") => return true,
            Value::Object(map) => stack.extend(map.values()),
            Value::Array(items) => stack.extend(items),
            _ => {}
        }
    }
    false
}

/// Parses a workflow document into canonical roots.
///
/// The document is either a single root node or an array of roots. When `shape` is
/// `None` it is detected with [`WorkflowShape::detect`] over the whole document.
pub fn parse_workflow(
    json: &str,
    shape: Option<WorkflowShape>,
) -> Result<Vec<WorkflowNode>, WorkflowError> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| WorkflowError::JsonParseError(e.to_string()))?;
    workflow_from_value(value, shape)
}

/// Loads and parses a workflow document from a file.
pub fn load_workflow(
    path: &str,
    shape: Option<WorkflowShape>,
) -> Result<Vec<WorkflowNode>, WorkflowError> {
    let content = fs::read_to_string(path).map_err(|e| {
        WorkflowError::JsonParseError(format!("Could not read '{}': {}", path, e))
    })?;
    parse_workflow(&content, shape)
}

/// Same as [`parse_workflow`], starting from an already parsed JSON value.
pub fn workflow_from_value(
    value: Value,
    shape: Option<WorkflowShape>,
) -> Result<Vec<WorkflowNode>, WorkflowError> {
    let shape = shape.unwrap_or_else(|| WorkflowShape::detect(&value));
    let roots = match value {
        Value::Array(items) => items,
        Value::Object(_) => vec![value],
        other => {
            return Err(WorkflowError::UnexpectedLayout(format!(
                "expected a node object or an array of nodes, found {}",
                json_kind(&other)
            )));
        }
    };

    log::debug!("Ingesting {} workflow root(s) as {:?}", roots.len(), shape);
    roots
        .into_iter()
        .map(|root| match shape {
            WorkflowShape::Generic => from_json::<GenericNode>(root)?.into_workflow(),
            WorkflowShape::Directed => from_json::<DirectedNode>(root)?.into_workflow(),
        })
        .collect()
}

fn from_json<T: for<'de> Deserialize<'de>>(value: Value) -> Result<T, WorkflowError> {
    serde_json::from_value(value).map_err(|e| WorkflowError::JsonParseError(e.to_string()))
}

/// Node ids are strings in designer output but numbers in some listing payloads.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
