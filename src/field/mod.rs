pub mod group;
pub mod model;
pub mod path;

pub use group::*;
pub use model::*;
pub use path::{ARRAY_PLACEHOLDER, FieldPath};
