//! Pluggable binary serialization for the transaction journal.
//!
//! This crate turns commit records, command lists, and repository
//! snapshots into bytes and back. The engine talks to it only through the
//! [`TransactionInfoSerializer`] and [`RepositoryDataSerializer`] traits,
//! so the on-disk format can be swapped without touching journal or
//! replay logic; [`BinarySerializer`] is the built-in format, registered
//! under type tag [`SERIALIZER_TYPE_BINARY`].
//!
//! The pieces, bottom up:
//!
//! - [`buffer`]: the byte-level contract. Fixed-capacity little-endian
//!   buffers that fail explicitly instead of growing or panicking.
//! - [`error`]: the failure taxonomy. Encode faults, decode faults, and
//!   the end-of-data condition replay loops stop on.
//! - [`resolver`]: two-tier type resolution for module-defined value
//!   types, with an ambient fallback for the built-ins.
//! - [`object`]: the descriptor-tagged wire form every value shares.
//! - [`serializer`]: the binary record and snapshot layouts.
//!
//! # Example
//!
//! ```
//! use txnlog_codec::{BinarySerializer, ByteBuffer, TransactionInfoSerializer};
//! use txnlog_core::{TransactionCommitInfo, Value};
//!
//! let serializer = BinarySerializer::new();
//! let info = TransactionCommitInfo::builder()
//!     .transaction_id(1)
//!     .time(1_700_000_000)
//!     .transaction_commits(vec![Value::from("create-account")])
//!     .build()?;
//!
//! let mut buf = ByteBuffer::with_capacity(4096);
//! serializer.encode_commit(&mut buf, &info)?;
//!
//! let mut read = ByteBuffer::from_bytes(buf.into_bytes());
//! let replayed = serializer.decode_commit(TransactionCommitInfo::builder(), &mut read)?;
//! assert_eq!(replayed, info);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod error;
pub mod object;
pub mod resolver;
pub mod serializer;
pub mod traits;

pub use buffer::{Buffer, BufferError, ByteBuffer};
pub use error::{CodecError, Result};
pub use object::{ObjectCodec, MAX_NESTING_DEPTH};
pub use resolver::{
    AmbientCatalog, DecodeFn, ModuleCatalog, ResolveError, TypeCatalog, TypeResolver,
};
pub use serializer::{BinarySerializer, SERIALIZER_TYPE_BINARY};
pub use traits::{RepositoryDataSerializer, TransactionInfoSerializer};
