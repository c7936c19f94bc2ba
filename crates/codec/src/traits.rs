//! Serializer trait seams.
//!
//! The engine holds serializers behind these traits so the on-disk format
//! is pluggable: a journal can be written by one serializer and replayed
//! by any process that has a serializer registered under the same type
//! tag. Implementations must be `Send + Sync`; one instance is shared
//! across writer and replay paths operating on independent buffers.

use crate::buffer::Buffer;
use crate::error::Result;
use txnlog_core::{CommitInfoBuilder, RepositoryData, TransactionCommitInfo, Value};

/// Codec for journal commit records and the objects inside them.
pub trait TransactionInfoSerializer: Send + Sync {
    /// Format tag written into journal headers to select this serializer
    /// at replay time.
    fn serializer_type(&self) -> u16;

    /// Whether the serializer can encode commands of the given descriptor.
    fn is_registered(&self, descriptor: &str) -> bool;

    /// Make a command type known ahead of serialization. Formats that
    /// resolve types at decode time may treat this as a no-op.
    fn register_type(&mut self, descriptor: &str);

    /// Append one commit record to the buffer.
    fn encode_commit(&self, buffer: &mut dyn Buffer, info: &TransactionCommitInfo) -> Result<()>;

    /// Read the next commit record, filling the supplied builder.
    ///
    /// Returns [`CodecError::EndOfData`](crate::CodecError::EndOfData) at
    /// the unwritten tail of the log.
    fn decode_commit(
        &self,
        builder: CommitInfoBuilder,
        buffer: &mut dyn Buffer,
    ) -> Result<TransactionCommitInfo>;

    /// Append a standalone command list (no record head).
    fn encode_command_list(&self, buffer: &mut dyn Buffer, commands: &[Value]) -> Result<()>;

    /// Read a standalone command list.
    fn decode_command_list(&self, buffer: &mut dyn Buffer) -> Result<Vec<Value>>;

    /// Append one length-prefixed object.
    fn encode_object(&self, buffer: &mut dyn Buffer, value: &Value) -> Result<()>;

    /// Read one length-prefixed object.
    fn decode_object(&self, buffer: &mut dyn Buffer) -> Result<Value>;
}

/// Codec for full-state snapshots of the model repository.
pub trait RepositoryDataSerializer: Send + Sync {
    /// Format tag, shared with the journal serializer of the same format.
    fn serializer_type(&self) -> u16;

    /// Append the repository snapshot to the buffer.
    fn encode_repository(&self, buffer: &mut dyn Buffer, data: &RepositoryData) -> Result<()>;

    /// Read a repository snapshot.
    ///
    /// Snapshots have no unwritten tail; any fault here is a decode
    /// failure, never end-of-data.
    fn decode_repository(&self, buffer: &mut dyn Buffer) -> Result<RepositoryData>;
}
