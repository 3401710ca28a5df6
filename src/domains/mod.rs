//! Domains module containing business logic organized by bounded contexts.
//!
//! The server has a single domain: the reasoning tools.

pub mod tools;
