//! Core Kernel - Foundational types shared by the claims portal crates
//!
//! This crate provides the building blocks used across the domain and adapter crates:
//! - Money types with precise decimal arithmetic for claim amounts
//! - Identifiers for server-assigned records
//! - The key-value storage port that durable session state is written through

pub mod money;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::ClaimId;
pub use ports::{KeyValueStore, PortError, StorageOp};
pub use error::CoreError;
