pub mod conversion;
pub mod definition;
pub mod parsing;
pub mod raw;

pub use conversion::*;
pub use definition::*;
pub use parsing::parse_specification;
pub use raw::RawProperty;
