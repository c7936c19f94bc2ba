//! txnlog: journal and snapshot serialization for a transaction engine.
//!
//! Facade crate re-exporting the public API of the workspace members:
//!
//! - [`txnlog_core`]: value model, commit info, repository state.
//! - [`txnlog_codec`]: buffers, type resolution, and the binary
//!   serializer behind the pluggable serializer traits.
//!
//! ```
//! use txnlog::{BinarySerializer, ByteBuffer, TransactionInfoSerializer, Value};
//!
//! let serializer = BinarySerializer::new();
//! let mut buf = ByteBuffer::with_capacity(1024);
//! serializer.encode_object(&mut buf, &Value::Int(42))?;
//! # Ok::<(), txnlog::CodecError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use txnlog_codec::{
    BinarySerializer, Buffer, BufferError, ByteBuffer, CodecError, DecodeFn, ModuleCatalog,
    ObjectCodec, RepositoryDataSerializer, ResolveError, TransactionInfoSerializer, TypeCatalog,
    TypeResolver, SERIALIZER_TYPE_BINARY,
};
pub use txnlog_core::{
    CommitInfoBuilder, Error, RepositoryData, Result, TransactionCommitInfo, Value,
};

/// Re-export of the codec member crate.
pub use txnlog_codec as codec;
/// Re-export of the core model member crate.
pub use txnlog_core as model;
