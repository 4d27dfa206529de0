//! Generic document model.
//!
//! The parser produces, and the converters consume and produce, a loosely
//! typed tree of values:
//! - `Value` - a scalar or a nested mapping
//! - `Mapping` - an insertion-ordered string-keyed map of values
//!
//! There are no sequences: the supported NPC save formats key repeated
//! entries by identifier instead of using lists.

mod mapping;
mod value;

pub use mapping::Mapping;
pub use value::Value;
