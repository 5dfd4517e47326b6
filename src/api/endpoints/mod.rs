//! Endpoint handlers, one module per route.

pub mod capabilities;
pub mod chat;
pub mod clarification;
pub mod diagnosis;
pub mod search;
