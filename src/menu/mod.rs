pub mod converter;
pub mod definition;
pub mod route;

pub use converter::*;
pub use definition::*;
pub use route::*;
