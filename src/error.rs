use thiserror::Error;

/// Errors that can occur while building a view registry from a manifest.
#[derive(Error, Debug, Clone)]
pub enum ViewError {
    #[error("Could not read view manifest '{path}': {message}")]
    ManifestRead { path: String, message: String },

    #[error("Failed to parse view manifest JSON: {0}")]
    ManifestParse(String),
}

/// Errors that can occur while reading permission (menu) data.
#[derive(Error, Debug, Clone)]
pub enum MenuError {
    #[error("Failed to parse permission JSON: {0}")]
    JsonParseError(String),

    #[error("Unknown menu type '{0}', expected one of 1 (directory), 2 (menu), 3 (internal link), 4 (external link)")]
    UnknownMenuType(String),

    #[error("Unknown menu status '{0}', expected 0 (hidden) or 1 (visible)")]
    UnknownMenuStatus(String),
}

/// Errors that can occur when ingesting a workflow definition into the canonical model.
#[derive(Error, Debug, Clone)]
pub enum WorkflowError {
    #[error("Failed to parse workflow JSON: {0}")]
    JsonParseError(String),

    #[error("Workflow node '{node_name}' has no node id")]
    MissingNodeId { node_name: String },

    #[error("Workflow document has an unexpected layout: {0}")]
    UnexpectedLayout(String),
}
