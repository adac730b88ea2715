//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel
//! - **password**: bcrypt password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They hold no business rules.

pub mod password;
pub mod persistence;
