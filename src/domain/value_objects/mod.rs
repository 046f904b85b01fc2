//! Value objects - Immutable objects defined by their attributes

mod business_value;
mod ids;
mod priority;
mod relevance;

pub use business_value::BusinessValue;
pub use ids::*;
pub use priority::Priority;
pub use relevance::Relevance;

/// Reasons a value object refuses to be constructed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
    #[error("{field} {value} is out of range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("{value} is not a valid {field}")]
    NotAMember { field: &'static str, value: i32 },
}
