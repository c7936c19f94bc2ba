//! Transaction commit records
//!
//! A `TransactionCommitInfo` is one WAL entry: the sequence id assigned at
//! commit time, the commit timestamp, and the ordered list of committed
//! effects. Records are immutable once built.
//!
//! ## Sentinel invariant
//!
//! `transaction_id == 0 && time == 0` is reserved: it marks the unwritten
//! tail of a log segment and is never a valid committed transaction. The
//! builder rejects it so a sentinel can never be constructed in memory,
//! and the decoder treats it as end-of-data.

use crate::error::{Error, Result};
use crate::value::Value;

/// One committed transaction as recorded in the WAL.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionCommitInfo {
    transaction_id: u64,
    time: u64,
    transaction_commits: Vec<Value>,
}

impl TransactionCommitInfo {
    /// Start building a commit record.
    pub fn builder() -> CommitInfoBuilder {
        CommitInfoBuilder::default()
    }

    /// Monotonically increasing sequence id, unique within the log.
    pub fn transaction_id(&self) -> u64 {
        self.transaction_id
    }

    /// Commit timestamp.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Ordered committed effects.
    pub fn transaction_commits(&self) -> &[Value] {
        &self.transaction_commits
    }

    /// Consume the record, yielding its effects list.
    pub fn into_commits(self) -> Vec<Value> {
        self.transaction_commits
    }
}

/// Builder for [`TransactionCommitInfo`].
///
/// The replay path fills a fresh builder with id, time, and the decoded
/// effects list, in that order, then finalizes it with [`build`].
///
/// [`build`]: CommitInfoBuilder::build
#[derive(Debug, Default, Clone)]
pub struct CommitInfoBuilder {
    transaction_id: u64,
    time: u64,
    transaction_commits: Vec<Value>,
}

impl CommitInfoBuilder {
    /// Set the transaction sequence id.
    pub fn transaction_id(mut self, transaction_id: u64) -> Self {
        self.transaction_id = transaction_id;
        self
    }

    /// Set the commit timestamp.
    pub fn time(mut self, time: u64) -> Self {
        self.time = time;
        self
    }

    /// Set the ordered committed effects.
    pub fn transaction_commits(mut self, commits: Vec<Value>) -> Self {
        self.transaction_commits = commits;
        self
    }

    /// Finalize the record.
    ///
    /// Fails if id and time are both zero: that bit pattern is the
    /// unwritten-tail sentinel and must never exist as a real record.
    pub fn build(self) -> Result<TransactionCommitInfo> {
        if self.transaction_id == 0 && self.time == 0 {
            return Err(Error::InvalidOperation(
                "transaction_id == 0 && time == 0 is the reserved unwritten-tail sentinel"
                    .to_string(),
            ));
        }
        Ok(TransactionCommitInfo {
            transaction_id: self.transaction_id,
            time: self.time,
            transaction_commits: self.transaction_commits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fills_in_order() {
        let info = TransactionCommitInfo::builder()
            .transaction_id(42)
            .time(1000)
            .transaction_commits(vec![Value::from("cmd1"), Value::from("cmd2")])
            .build()
            .unwrap();

        assert_eq!(info.transaction_id(), 42);
        assert_eq!(info.time(), 1000);
        assert_eq!(
            info.transaction_commits(),
            &[Value::from("cmd1"), Value::from("cmd2")]
        );
    }

    #[test]
    fn test_builder_rejects_sentinel() {
        let result = TransactionCommitInfo::builder()
            .transaction_id(0)
            .time(0)
            .build();
        assert!(matches!(result, Err(Error::InvalidOperation(_))));
    }

    #[test]
    fn test_zero_id_with_nonzero_time_is_valid() {
        // Only the all-zero combination is reserved
        let info = TransactionCommitInfo::builder().time(1).build().unwrap();
        assert_eq!(info.transaction_id(), 0);
        assert_eq!(info.time(), 1);
        assert!(info.transaction_commits().is_empty());
    }

    #[test]
    fn test_into_commits() {
        let info = TransactionCommitInfo::builder()
            .transaction_id(1)
            .time(2)
            .transaction_commits(vec![Value::Int(9)])
            .build()
            .unwrap();
        assert_eq!(info.into_commits(), vec![Value::Int(9)]);
    }
}
