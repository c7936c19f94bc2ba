//! Binary serializer.
//!
//! Journal commit records use a fixed 16-byte head followed by one
//! length-prefixed command list:
//!
//! ```text
//! +----------------------+-------------+------------------+-----------+
//! | transaction_id (u64) | time (u64)  | payload_len (u32)| payload   |
//! +----------------------+-------------+------------------+-----------+
//! ```
//!
//! Journal files are preallocated, so a reader hitting the unwritten tail
//! sees either zero bytes where a head should be or not enough bytes for
//! one. Both are reported as [`CodecError::EndOfData`]; a `{0, 0}` head is
//! therefore reserved and never written. Anything that goes wrong after a
//! non-zero head is real corruption and surfaces as a decode failure.
//!
//! Snapshots carry no sentinel. Their layout is one length-prefixed frame:
//!
//! ```text
//! frame:    [type_count (u32)] type*
//! type:     [descriptor_len (u16)] [descriptor] [entity_count (u32)] entity*
//! entity:   [entity_id (u64)] [encoded value]
//! ```

use crate::buffer::Buffer;
use crate::error::{CodecError, Result};
use crate::object::{ObjectCodec, CODEC_BINARY};
use crate::resolver::TypeResolver;
use crate::traits::{RepositoryDataSerializer, TransactionInfoSerializer};
use tracing::{debug, warn};
use txnlog_core::{CommitInfoBuilder, RepositoryData, TransactionCommitInfo, Value};

/// Type tag of the built-in binary format.
pub const SERIALIZER_TYPE_BINARY: u16 = 0x111;

/// The built-in binary serializer for journal records and snapshots.
#[derive(Clone, Default)]
pub struct BinarySerializer {
    objects: ObjectCodec,
}

impl BinarySerializer {
    /// Serializer resolving only built-in type descriptors.
    pub fn new() -> Self {
        BinarySerializer {
            objects: ObjectCodec::new(),
        }
    }

    /// Serializer with a caller-supplied resolver chain, consulted when
    /// decoding module-defined command and entity types.
    pub fn with_resolver(resolver: TypeResolver) -> Self {
        BinarySerializer {
            objects: ObjectCodec::with_resolver(resolver),
        }
    }

    fn encode_snapshot_frame(&self, data: &RepositoryData) -> Result<Vec<u8>> {
        let mut frame = Vec::new();
        let type_count = u32::try_from(data.type_count())
            .map_err(|_| CodecError::encode(CODEC_BINARY, "snapshot exceeds u32 type count"))?;
        frame.extend_from_slice(&type_count.to_le_bytes());
        for (descriptor, entities) in data.iter() {
            let dlen = u16::try_from(descriptor.len()).map_err(|_| {
                CodecError::encode(CODEC_BINARY, "entity descriptor exceeds u16 length")
            })?;
            frame.extend_from_slice(&dlen.to_le_bytes());
            frame.extend_from_slice(descriptor.as_bytes());
            let entity_count = u32::try_from(entities.len()).map_err(|_| {
                CodecError::encode(CODEC_BINARY, "snapshot exceeds u32 entity count")
            })?;
            frame.extend_from_slice(&entity_count.to_le_bytes());
            for (id, value) in entities {
                frame.extend_from_slice(&id.to_le_bytes());
                frame.extend_from_slice(&self.objects.encode_value(value)?);
            }
        }
        Ok(frame)
    }

    fn decode_snapshot_frame(&self, frame: &[u8]) -> Result<RepositoryData> {
        let mut cursor = SnapshotCursor::new(frame);
        let type_count = cursor.take_u32()?;
        let mut data = RepositoryData::new();
        for _ in 0..type_count {
            let dlen = cursor.take_u16()? as usize;
            let descriptor = std::str::from_utf8(cursor.take(dlen)?)
                .map_err(|e| CodecError::decode(CODEC_BINARY, e))?
                .to_string();
            let entity_count = cursor.take_u32()?;
            for _ in 0..entity_count {
                let id = cursor.take_u64()?;
                let (value, consumed) = self.objects.decode_value(cursor.rest())?;
                cursor.advance(consumed);
                data.insert(descriptor.clone(), id, value);
            }
        }
        if !cursor.is_exhausted() {
            return Err(CodecError::decode(
                CODEC_BINARY,
                "trailing bytes after snapshot entities",
            ));
        }
        Ok(data)
    }
}

impl TransactionInfoSerializer for BinarySerializer {
    fn serializer_type(&self) -> u16 {
        SERIALIZER_TYPE_BINARY
    }

    fn is_registered(&self, _descriptor: &str) -> bool {
        // The binary format resolves types at decode time and needs no
        // per-type preparation on the write path.
        true
    }

    fn register_type(&mut self, _descriptor: &str) {}

    fn encode_commit(&self, buffer: &mut dyn Buffer, info: &TransactionCommitInfo) -> Result<()> {
        buffer
            .write_long(info.transaction_id())
            .map_err(|e| CodecError::encode(CODEC_BINARY, e))?;
        buffer
            .write_long(info.time())
            .map_err(|e| CodecError::encode(CODEC_BINARY, e))?;
        self.objects.encode_list(buffer, info.transaction_commits())
    }

    fn decode_commit(
        &self,
        builder: CommitInfoBuilder,
        buffer: &mut dyn Buffer,
    ) -> Result<TransactionCommitInfo> {
        // An underflow inside the 16-byte head means the writer never got
        // this far, same as the zero sentinel.
        let transaction_id = buffer.read_long().map_err(|_| CodecError::EndOfData)?;
        let time = buffer.read_long().map_err(|_| CodecError::EndOfData)?;
        if transaction_id == 0 && time == 0 {
            debug!(position = buffer.position(), "zero record head, log tail reached");
            return Err(CodecError::EndOfData);
        }
        let commits = self.objects.decode_list(buffer).map_err(|e| {
            warn!(
                transaction_id,
                position = buffer.position(),
                error = %e,
                "commit record payload unreadable"
            );
            e
        })?;
        builder
            .transaction_id(transaction_id)
            .time(time)
            .transaction_commits(commits)
            .build()
            .map_err(|e| CodecError::decode(CODEC_BINARY, e))
    }

    fn encode_command_list(&self, buffer: &mut dyn Buffer, commands: &[Value]) -> Result<()> {
        self.objects.encode_list(buffer, commands)
    }

    fn decode_command_list(&self, buffer: &mut dyn Buffer) -> Result<Vec<Value>> {
        self.objects.decode_list(buffer)
    }

    fn encode_object(&self, buffer: &mut dyn Buffer, value: &Value) -> Result<()> {
        self.objects.encode_object(buffer, value)
    }

    fn decode_object(&self, buffer: &mut dyn Buffer) -> Result<Value> {
        self.objects.decode_object(buffer)
    }
}

impl RepositoryDataSerializer for BinarySerializer {
    fn serializer_type(&self) -> u16 {
        SERIALIZER_TYPE_BINARY
    }

    fn encode_repository(&self, buffer: &mut dyn Buffer, data: &RepositoryData) -> Result<()> {
        let frame = self.encode_snapshot_frame(data)?;
        let len = u32::try_from(frame.len())
            .map_err(|_| CodecError::encode(CODEC_BINARY, "snapshot exceeds u32 length"))?;
        buffer
            .write_int(len)
            .map_err(|e| CodecError::encode(CODEC_BINARY, e))?;
        buffer
            .write_bytes(&frame)
            .map_err(|e| CodecError::encode(CODEC_BINARY, e))
    }

    fn decode_repository(&self, buffer: &mut dyn Buffer) -> Result<RepositoryData> {
        let len = buffer
            .read_int()
            .map_err(|e| CodecError::decode(CODEC_BINARY, e))? as usize;
        let frame = buffer
            .read_bytes(len)
            .map_err(|e| CodecError::decode(CODEC_BINARY, e))?;
        self.decode_snapshot_frame(&frame)
    }
}

/// Bounds-checked cursor over a snapshot frame.
struct SnapshotCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SnapshotCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        SnapshotCursor { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).filter(|&e| e <= self.bytes.len());
        match end {
            Some(end) => {
                let slice = &self.bytes[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(CodecError::decode(
                CODEC_BINARY,
                "snapshot frame shorter than declared contents",
            )),
        }
    }

    fn take_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn take_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn take_u64(&mut self) -> Result<u64> {
        let b = self.take(8)?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    fn advance(&mut self, len: usize) {
        self.pos += len;
    }

    fn is_exhausted(&self) -> bool {
        self.pos == self.bytes.len()
    }
}
