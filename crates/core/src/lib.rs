//! Core types for txnlog
//!
//! This crate defines the domain types shared by every layer of the WAL
//! codec stack:
//! - `Value`: closed variant enum for dynamically-typed payloads
//! - `TransactionCommitInfo`: one committed transaction (id, time, effects)
//! - `CommitInfoBuilder`: the builder the replay path fills during decode
//! - `RepositoryData`: a full point-in-time snapshot of aggregate state
//! - `Error`: error type shared by domain-type construction and payload
//!   deserialization

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod repository;
pub mod transaction;
pub mod value;

pub use error::{Error, Result};
pub use repository::RepositoryData;
pub use transaction::{CommitInfoBuilder, TransactionCommitInfo};
pub use value::Value;
