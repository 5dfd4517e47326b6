//! Wire and catalog data types.

pub mod chat;
pub mod clarification;
pub mod condition;
pub mod diagnosis;
pub mod enums;
pub mod search;
pub mod treatment;

pub use chat::*;
pub use clarification::*;
pub use condition::*;
pub use diagnosis::*;
pub use enums::*;
pub use search::*;
pub use treatment::*;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid value for {field}: '{value}'")]
    InvalidEnum { field: String, value: String },
}
