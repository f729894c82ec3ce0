//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions of the crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use menuflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let registry = ViewRegistry::from_manifest_file("path/to/views.json")?;
//! let permissions = PermissionNode::list_from_file("path/to/menus.json")?;
//!
//! let converter = RouteConverter::new(&registry);
//! let routes = converter.convert(&permissions, true);
//! println!("{} top-level routes", routes.len());
//! # Ok(())
//! # }
//! ```

// View registry
pub use crate::view::{ViewLoader, ViewModule, ViewRegistry};

// Permission tree and routes
pub use crate::menu::{
    FlowConfigRoute, MenuStatus, MenuType, PermissionNode, RouteComponent, RouteConverter,
    RouteMeta, RouteNode, RouteTable,
};

// Workflow definitions
pub use crate::workflow::{
    AnnotatedNode, BackTarget, FlowStatus, FormColumn, FormField, HistoryRecord, NavigableNode,
    NodeType, StatusFormatter, WorkflowNode, WorkflowShape, annotate, extract_back_targets,
    extract_back_targets_from, extract_navigable_nodes, extract_navigable_nodes_from,
    form_columns, parse_workflow,
};

// Error types
pub use crate::error::{MenuError, ViewError, WorkflowError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
