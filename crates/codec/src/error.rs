//! Codec failure taxonomy.
//!
//! Three terminal conditions per operation:
//!
//! - [`CodecError::Encode`]: any fault on the write path, wrapped with the
//!   identity of the codec that was encoding.
//! - [`CodecError::Decode`]: same for the read path. Type-resolution
//!   failures surface here as the underlying cause.
//! - [`CodecError::EndOfData`]: the all-zero sentinel record or an
//!   underflow at a record head. Replay loops catch this one condition and
//!   treat it as "log fully replayed"; it must never be reported as
//!   corruption.
//!
//! Low-level faults are never passed through raw: callers can log and
//! distinguish failures without inspecting codec internals.

/// Boxed underlying cause of a codec failure.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Terminal failure states of an encode/decode operation.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Encoding failed.
    #[error("encode failed (codec={codec}): {source}")]
    Encode {
        /// Identity of the codec that was encoding
        codec: &'static str,
        /// Underlying fault
        #[source]
        source: Cause,
    },

    /// Decoding failed.
    #[error("decode failed (codec={codec}): {source}")]
    Decode {
        /// Identity of the codec that was decoding
        codec: &'static str,
        /// Underlying fault
        #[source]
        source: Cause,
    },

    /// Reached the unwritten tail of the log: the all-zero sentinel record,
    /// or not enough bytes left for a record head. Not corruption.
    #[error("end of written log data")]
    EndOfData,
}

impl CodecError {
    /// Wrap an encode-path fault with the originating codec's identity.
    pub fn encode(codec: &'static str, source: impl Into<Cause>) -> Self {
        CodecError::Encode {
            codec,
            source: source.into(),
        }
    }

    /// Wrap a decode-path fault with the originating codec's identity.
    pub fn decode(codec: &'static str, source: impl Into<Cause>) -> Self {
        CodecError::Decode {
            codec,
            source: source.into(),
        }
    }

    /// Whether this is the end-of-data condition a replay loop stops on.
    pub fn is_end_of_data(&self) -> bool {
        matches!(self, CodecError::EndOfData)
    }
}
