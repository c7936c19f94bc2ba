//! Bounded, cursor-based byte buffers.
//!
//! Every codec in this crate operates on a [`Buffer`]: a byte region with a
//! single cursor, typed primitive read/write, and hard bounds. The WAL
//! segment manager positions a buffer over exactly one record's bytes and
//! hands it to a codec; the buffer is never shared across concurrent
//! operations.
//!
//! All fixed-width integers are **little-endian**. This is fixed forever:
//! records written by one version must decode on every later version.
//!
//! Reads of N bytes with fewer than N remaining fail with
//! [`BufferError::Underflow`] instead of returning partial or zeroed data;
//! recovery logic relies on this to detect that it ran off the end of the
//! written log. Writes never grow the buffer past its backing capacity.

/// Typed access to a bounded byte region.
///
/// Object-safe so the segment manager can supply its own backing storage
/// (mmap, pooled pages) behind `&mut dyn Buffer`.
pub trait Buffer {
    /// Write a 64-bit integer, advancing the cursor by 8.
    fn write_long(&mut self, value: u64) -> Result<(), BufferError>;

    /// Write a 32-bit integer, advancing the cursor by 4.
    fn write_int(&mut self, value: u32) -> Result<(), BufferError>;

    /// Write raw bytes, advancing the cursor by their length.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError>;

    /// Read a 64-bit integer, advancing the cursor by 8.
    fn read_long(&mut self) -> Result<u64, BufferError>;

    /// Read a 32-bit integer, advancing the cursor by 4.
    fn read_int(&mut self) -> Result<u32, BufferError>;

    /// Read exactly `len` raw bytes, advancing the cursor by `len`.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, BufferError>;

    /// Bytes available to read from the cursor to the end of written data.
    fn remaining(&self) -> usize;

    /// Current cursor position.
    fn position(&self) -> usize;
}

/// Buffer bounds violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// A read asked for more bytes than remain.
    #[error("buffer underflow: requested {requested} bytes, {remaining} remaining")]
    Underflow {
        /// Bytes the read asked for
        requested: usize,
        /// Bytes actually remaining
        remaining: usize,
    },

    /// A write would exceed the backing capacity.
    #[error("buffer overflow: requested {requested} bytes, {remaining} bytes of capacity left")]
    Overflow {
        /// Bytes the write asked for
        requested: usize,
        /// Capacity left past the written end
        remaining: usize,
    },
}

/// Heap-backed [`Buffer`] with a fixed capacity.
///
/// Writes append at the written end; reads consume from the cursor. A fresh
/// buffer from [`with_capacity`] is for encoding; one from [`from_bytes`]
/// wraps an existing record for decoding.
///
/// [`with_capacity`]: ByteBuffer::with_capacity
/// [`from_bytes`]: ByteBuffer::from_bytes
#[derive(Debug)]
pub struct ByteBuffer {
    data: Vec<u8>,
    capacity: usize,
    position: usize,
}

impl ByteBuffer {
    /// Create an empty write buffer bounded at `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        ByteBuffer {
            data: Vec::with_capacity(capacity),
            capacity,
            position: 0,
        }
    }

    /// Wrap an existing record's bytes for decoding. The cursor starts at 0
    /// and capacity equals the record length.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let data = bytes.into();
        let capacity = data.len();
        ByteBuffer {
            data,
            capacity,
            position: 0,
        }
    }

    /// The written bytes so far, without consuming the buffer.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, yielding the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Backing capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn check_write(&self, len: usize) -> Result<(), BufferError> {
        let free = self.capacity - self.data.len();
        if len > free {
            return Err(BufferError::Overflow {
                requested: len,
                remaining: free,
            });
        }
        Ok(())
    }

    fn check_read(&self, len: usize) -> Result<(), BufferError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(BufferError::Underflow {
                requested: len,
                remaining,
            });
        }
        Ok(())
    }
}

impl Buffer for ByteBuffer {
    fn write_long(&mut self, value: u64) -> Result<(), BufferError> {
        self.write_bytes(&value.to_le_bytes())
    }

    fn write_int(&mut self, value: u32) -> Result<(), BufferError> {
        self.write_bytes(&value.to_le_bytes())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        self.check_write(bytes.len())?;
        self.data.extend_from_slice(bytes);
        self.position = self.data.len();
        Ok(())
    }

    fn read_long(&mut self) -> Result<u64, BufferError> {
        self.check_read(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.data[self.position..self.position + 8]);
        self.position += 8;
        Ok(u64::from_le_bytes(raw))
    }

    fn read_int(&mut self) -> Result<u32, BufferError> {
        self.check_read(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.data[self.position..self.position + 4]);
        self.position += 4;
        Ok(u32::from_le_bytes(raw))
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>, BufferError> {
        self.check_read(len)?;
        let bytes = self.data[self.position..self.position + len].to_vec();
        self.position += len;
        Ok(bytes)
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read_roundtrip() {
        let mut buf = ByteBuffer::with_capacity(64);
        buf.write_long(42).unwrap();
        buf.write_int(7).unwrap();
        buf.write_bytes(b"abc").unwrap();

        let mut rd = ByteBuffer::from_bytes(buf.into_bytes());
        assert_eq!(rd.read_long().unwrap(), 42);
        assert_eq!(rd.read_int().unwrap(), 7);
        assert_eq!(rd.read_bytes(3).unwrap(), b"abc");
        assert_eq!(rd.remaining(), 0);
    }

    #[test]
    fn test_little_endian_layout() {
        let mut buf = ByteBuffer::with_capacity(12);
        buf.write_long(42).unwrap();
        buf.write_int(1000).unwrap();
        assert_eq!(&buf.as_slice()[0..8], &42u64.to_le_bytes());
        assert_eq!(&buf.as_slice()[8..12], &1000u32.to_le_bytes());
    }

    #[test]
    fn test_reads_advance_cursor() {
        let mut buf = ByteBuffer::from_bytes(vec![0u8; 16]);
        assert_eq!(buf.position(), 0);
        buf.read_long().unwrap();
        assert_eq!(buf.position(), 8);
        buf.read_int().unwrap();
        assert_eq!(buf.position(), 12);
        assert_eq!(buf.remaining(), 4);
    }

    #[test]
    fn test_underflow_fails_explicitly() {
        let mut buf = ByteBuffer::from_bytes(vec![1, 2, 3]);
        let err = buf.read_long().unwrap_err();
        assert_eq!(
            err,
            BufferError::Underflow {
                requested: 8,
                remaining: 3
            }
        );
        // Cursor unchanged after a failed read
        assert_eq!(buf.position(), 0);
    }

    #[test]
    fn test_underflow_after_partial_consumption() {
        let mut buf = ByteBuffer::from_bytes(vec![0u8; 10]);
        buf.read_long().unwrap();
        let err = buf.read_bytes(5).unwrap_err();
        assert_eq!(
            err,
            BufferError::Underflow {
                requested: 5,
                remaining: 2
            }
        );
    }

    #[test]
    fn test_no_growth_past_capacity() {
        let mut buf = ByteBuffer::with_capacity(10);
        buf.write_long(1).unwrap();
        let err = buf.write_int(2).unwrap_err();
        assert_eq!(
            err,
            BufferError::Overflow {
                requested: 4,
                remaining: 2
            }
        );
        // Failed write leaves the buffer as it was
        assert_eq!(buf.as_slice().len(), 8);
    }

    #[test]
    fn test_read_zero_bytes() {
        let mut buf = ByteBuffer::from_bytes(Vec::new());
        assert_eq!(buf.read_bytes(0).unwrap(), Vec::<u8>::new());
    }
}
