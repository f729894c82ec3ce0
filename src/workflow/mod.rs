pub mod annotate;
pub mod definition;
pub mod extract;
pub mod form;
pub mod format;
pub mod ingest;

pub use annotate::*;
pub use definition::*;
pub use extract::*;
pub use form::*;
pub use format::*;
pub use ingest::*;
