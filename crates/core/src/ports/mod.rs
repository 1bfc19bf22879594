mod list_source;
mod pagination;

pub use list_source::*;
pub use pagination::*;
