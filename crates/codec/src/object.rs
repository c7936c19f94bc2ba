//! Generic object codec.
//!
//! Every value written into a record body goes through one wire form:
//!
//! ```text
//! +---------------------+------------------+---------------+-----------+
//! | descriptor_len (u16)| descriptor (utf8)| body_len (u32)| body      |
//! +---------------------+------------------+---------------+-----------+
//! ```
//!
//! The descriptor names the value's type; the body is opaque to this layer
//! and is interpreted by the decoder the [`TypeResolver`] hands back.
//! Arrays are the one exception: their body is a `u32` element count
//! followed by nested encoded values, so element descriptors still pass
//! through resolution individually. Nesting is capped at
//! [`MAX_NESTING_DEPTH`]: a record nested deeper fails with a decode
//! error instead of exhausting the stack, so a hostile but well-formed
//! array chain cannot abort replay.
//!
//! Objects written to a [`Buffer`] are additionally length-prefixed with a
//! `u32`, so a reader can skip a value it cannot decode.

use crate::buffer::{Buffer, BufferError};
use crate::error::{CodecError, Result};
use crate::resolver::TypeResolver;
use txnlog_core::Value;

/// Codec identity used in error reports.
pub(crate) const CODEC_BINARY: &str = "binary";

/// Built-in type descriptors handled by the ambient catalog.
pub const DESC_NULL: &str = "core.null";
/// Boolean, bincode body.
pub const DESC_BOOL: &str = "core.bool";
/// Signed 64-bit integer, bincode body.
pub const DESC_INT: &str = "core.int";
/// IEEE-754 double, bincode body.
pub const DESC_FLOAT: &str = "core.float";
/// UTF-8 string, bincode body.
pub const DESC_STRING: &str = "core.string";
/// Raw byte block, bincode body.
pub const DESC_BYTES: &str = "core.bytes";
/// Heterogeneous list, structural body (not catalog-resolved).
pub const DESC_ARRAY: &str = "core.array";

/// Maximum array nesting depth accepted on either path. Arrays recurse
/// once per level, so the cap bounds stack use against records whose
/// nesting is limited only by their byte length.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Encodes and decodes values through the descriptor wire form.
#[derive(Clone)]
pub struct ObjectCodec {
    resolver: TypeResolver,
}

impl ObjectCodec {
    /// Codec resolving only built-in descriptors.
    pub fn new() -> Self {
        ObjectCodec {
            resolver: TypeResolver::ambient(),
        }
    }

    /// Codec with a caller-supplied resolver chain.
    pub fn with_resolver(resolver: TypeResolver) -> Self {
        ObjectCodec { resolver }
    }

    /// Write one length-prefixed value into the buffer.
    pub fn encode_object(&self, buffer: &mut dyn Buffer, value: &Value) -> Result<()> {
        let bytes = self.encode_value(value)?;
        let len = u32::try_from(bytes.len())
            .map_err(|_| CodecError::encode(CODEC_BINARY, "encoded value exceeds u32 length"))?;
        write_int(buffer, len)?;
        buffer
            .write_bytes(&bytes)
            .map_err(|e| CodecError::encode(CODEC_BINARY, e))?;
        Ok(())
    }

    /// Read one length-prefixed value from the buffer.
    pub fn decode_object(&self, buffer: &mut dyn Buffer) -> Result<Value> {
        let len = read_len(buffer)?;
        let bytes = buffer
            .read_bytes(len)
            .map_err(|e| CodecError::decode(CODEC_BINARY, e))?;
        let (value, consumed) = self.decode_value(&bytes)?;
        if consumed != bytes.len() {
            return Err(CodecError::decode(
                CODEC_BINARY,
                "trailing bytes after encoded value",
            ));
        }
        Ok(value)
    }

    /// Write a length-prefixed list of values.
    ///
    /// Layout: `[u32 frame_len][u32 count][encoded values...]`, where
    /// `frame_len` covers everything after itself.
    pub fn encode_list(&self, buffer: &mut dyn Buffer, values: &[Value]) -> Result<()> {
        let mut frame = Vec::new();
        let count = u32::try_from(values.len())
            .map_err(|_| CodecError::encode(CODEC_BINARY, "list exceeds u32 element count"))?;
        frame.extend_from_slice(&count.to_le_bytes());
        for value in values {
            let bytes = self.encode_value(value)?;
            frame.extend_from_slice(&bytes);
        }
        let len = u32::try_from(frame.len())
            .map_err(|_| CodecError::encode(CODEC_BINARY, "encoded list exceeds u32 length"))?;
        write_int(buffer, len)?;
        buffer
            .write_bytes(&frame)
            .map_err(|e| CodecError::encode(CODEC_BINARY, e))?;
        Ok(())
    }

    /// Read a length-prefixed list of values.
    pub fn decode_list(&self, buffer: &mut dyn Buffer) -> Result<Vec<Value>> {
        let len = read_len(buffer)?;
        let frame = buffer
            .read_bytes(len)
            .map_err(|e| CodecError::decode(CODEC_BINARY, e))?;
        if frame.len() < 4 {
            return Err(CodecError::decode(CODEC_BINARY, "list frame shorter than count"));
        }
        let count = u32::from_le_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
        let mut cursor = 4;
        let mut values = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let (value, consumed) = self.decode_value(&frame[cursor..])?;
            cursor += consumed;
            values.push(value);
        }
        if cursor != frame.len() {
            return Err(CodecError::decode(
                CODEC_BINARY,
                "trailing bytes after list elements",
            ));
        }
        Ok(values)
    }

    /// Encode a value into its `[descriptor][body]` wire form.
    pub fn encode_value(&self, value: &Value) -> Result<Vec<u8>> {
        self.encode_value_at(value, 0)
    }

    fn encode_value_at(&self, value: &Value, depth: usize) -> Result<Vec<u8>> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(CodecError::encode(
                CODEC_BINARY,
                "value nesting exceeds depth limit",
            ));
        }
        let (descriptor, body) = match value {
            Value::Null => (DESC_NULL, Vec::new()),
            Value::Bool(v) => (DESC_BOOL, serialize_body(v)?),
            Value::Int(v) => (DESC_INT, serialize_body(v)?),
            Value::Float(v) => (DESC_FLOAT, serialize_body(v)?),
            Value::String(v) => (DESC_STRING, serialize_body(v)?),
            Value::Bytes(v) => (DESC_BYTES, serialize_body(v)?),
            Value::Array(items) => {
                let count = u32::try_from(items.len()).map_err(|_| {
                    CodecError::encode(CODEC_BINARY, "array exceeds u32 element count")
                })?;
                let mut body = Vec::new();
                body.extend_from_slice(&count.to_le_bytes());
                for item in items {
                    body.extend_from_slice(&self.encode_value_at(item, depth + 1)?);
                }
                (DESC_ARRAY, body)
            }
            Value::Domain { descriptor, body } => {
                return frame_value(descriptor, body);
            }
        };
        frame_value(descriptor, &body)
    }

    /// Decode one value from the front of `bytes`, returning it and the
    /// number of bytes consumed.
    pub fn decode_value(&self, bytes: &[u8]) -> Result<(Value, usize)> {
        self.decode_value_at(bytes, 0)
    }

    fn decode_value_at(&self, bytes: &[u8], depth: usize) -> Result<(Value, usize)> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(CodecError::decode(
                CODEC_BINARY,
                "value nesting exceeds depth limit",
            ));
        }
        if bytes.len() < 2 {
            return Err(CodecError::decode(
                CODEC_BINARY,
                "truncated value: missing descriptor length",
            ));
        }
        let dlen = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
        let desc_end = 2 + dlen;
        if bytes.len() < desc_end + 4 {
            return Err(CodecError::decode(
                CODEC_BINARY,
                "truncated value: missing descriptor or body length",
            ));
        }
        let descriptor = std::str::from_utf8(&bytes[2..desc_end])
            .map_err(|e| CodecError::decode(CODEC_BINARY, e))?;
        let blen = u32::from_le_bytes([
            bytes[desc_end],
            bytes[desc_end + 1],
            bytes[desc_end + 2],
            bytes[desc_end + 3],
        ]) as usize;
        let body_start = desc_end + 4;
        let body_end = body_start + blen;
        if bytes.len() < body_end {
            return Err(CodecError::decode(
                CODEC_BINARY,
                "truncated value: body shorter than declared length",
            ));
        }
        let body = &bytes[body_start..body_end];

        let value = if descriptor == DESC_ARRAY {
            if body.len() < 4 {
                return Err(CodecError::decode(
                    CODEC_BINARY,
                    "array body shorter than element count",
                ));
            }
            let count = u32::from_le_bytes([body[0], body[1], body[2], body[3]]) as usize;
            let mut cursor = 4;
            let mut items = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                let (item, consumed) = self.decode_value_at(&body[cursor..], depth + 1)?;
                cursor += consumed;
                items.push(item);
            }
            if cursor != body.len() {
                return Err(CodecError::decode(
                    CODEC_BINARY,
                    "trailing bytes after array elements",
                ));
            }
            Value::Array(items)
        } else {
            let decode = self
                .resolver
                .resolve(descriptor)
                .map_err(|e| CodecError::decode(CODEC_BINARY, e))?;
            decode(body).map_err(|e| CodecError::decode(CODEC_BINARY, e))?
        };
        Ok((value, body_end))
    }
}

impl Default for ObjectCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn serialize_body<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serialize(value).map_err(|e| CodecError::encode(CODEC_BINARY, e))
}

fn frame_value(descriptor: &str, body: &[u8]) -> Result<Vec<u8>> {
    let dlen = u16::try_from(descriptor.len())
        .map_err(|_| CodecError::encode(CODEC_BINARY, "descriptor exceeds u16 length"))?;
    let blen = u32::try_from(body.len())
        .map_err(|_| CodecError::encode(CODEC_BINARY, "body exceeds u32 length"))?;
    let mut out = Vec::with_capacity(2 + descriptor.len() + 4 + body.len());
    out.extend_from_slice(&dlen.to_le_bytes());
    out.extend_from_slice(descriptor.as_bytes());
    out.extend_from_slice(&blen.to_le_bytes());
    out.extend_from_slice(body);
    Ok(out)
}

fn write_int(buffer: &mut dyn Buffer, v: u32) -> Result<()> {
    buffer
        .write_int(v)
        .map_err(|e| CodecError::encode(CODEC_BINARY, e))
}

fn read_len(buffer: &mut dyn Buffer) -> Result<usize> {
    let raw = buffer
        .read_int()
        .map_err(|e: BufferError| CodecError::decode(CODEC_BINARY, e))?;
    Ok(raw as usize)
}
