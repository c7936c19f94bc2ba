//! Commit record wire behavior: layout, replay termination, corruption.

use proptest::prelude::*;
use txnlog_codec::{BinarySerializer, ByteBuffer, CodecError, TransactionInfoSerializer};
use txnlog_core::{TransactionCommitInfo, Value};

fn commit(id: u64, time: u64, commands: Vec<Value>) -> TransactionCommitInfo {
    TransactionCommitInfo::builder()
        .transaction_id(id)
        .time(time)
        .transaction_commits(commands)
        .build()
        .unwrap()
}

fn encode(info: &TransactionCommitInfo) -> Vec<u8> {
    let serializer = BinarySerializer::new();
    let mut buf = ByteBuffer::with_capacity(1 << 16);
    serializer.encode_commit(&mut buf, info).unwrap();
    buf.into_bytes()
}

#[test]
fn test_record_head_layout() {
    let info = commit(
        42,
        1000,
        vec![Value::String("cmd1".into()), Value::String("cmd2".into())],
    );
    let bytes = encode(&info);

    assert_eq!(&bytes[0..8], &42u64.to_le_bytes());
    assert_eq!(&bytes[8..16], &1000u64.to_le_bytes());
    // Payload length prefix covers everything after itself
    let payload_len = u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]) as usize;
    assert_eq!(20 + payload_len, bytes.len());
    // First payload field is the command count
    assert_eq!(&bytes[20..24], &2u32.to_le_bytes());

    let serializer = BinarySerializer::new();
    let mut read = ByteBuffer::from_bytes(bytes);
    let decoded = serializer
        .decode_commit(TransactionCommitInfo::builder(), &mut read)
        .unwrap();
    assert_eq!(decoded, info);
}

#[test]
fn test_roundtrip_preserves_commit() {
    let serializer = BinarySerializer::new();
    let info = commit(
        7,
        1_700_000_000,
        vec![
            Value::String("open-account".into()),
            Value::Array(vec![Value::Int(1), Value::Float(0.5)]),
            Value::Bytes(vec![0xde, 0xad]),
        ],
    );
    let mut read = ByteBuffer::from_bytes(encode(&info));
    let decoded = serializer
        .decode_commit(TransactionCommitInfo::builder(), &mut read)
        .unwrap();
    assert_eq!(decoded, info);
}

#[test]
fn test_all_zero_head_terminates_replay() {
    // A preallocated journal tail reads back as zeroes
    let serializer = BinarySerializer::new();
    let mut read = ByteBuffer::from_bytes(vec![0u8; 64]);
    let err = serializer
        .decode_commit(TransactionCommitInfo::builder(), &mut read)
        .unwrap_err();
    assert!(err.is_end_of_data());
}

#[test]
fn test_underflow_at_head_terminates_replay() {
    let serializer = BinarySerializer::new();
    for len in [0usize, 3, 8, 15] {
        let mut read = ByteBuffer::from_bytes(vec![0u8; len]);
        let err = serializer
            .decode_commit(TransactionCommitInfo::builder(), &mut read)
            .unwrap_err();
        assert!(err.is_end_of_data(), "tail of {len} bytes must end replay");
    }
}

#[test]
fn test_replay_stops_at_tail_after_valid_records() {
    let serializer = BinarySerializer::new();
    let first = commit(1, 100, vec![Value::Int(1)]);
    let second = commit(2, 200, vec![Value::Int(2)]);

    let mut journal = encode(&first);
    journal.extend_from_slice(&encode(&second));
    journal.extend_from_slice(&[0u8; 256]);

    let mut read = ByteBuffer::from_bytes(journal);
    let mut replayed = Vec::new();
    loop {
        match serializer.decode_commit(TransactionCommitInfo::builder(), &mut read) {
            Ok(info) => replayed.push(info),
            Err(e) if e.is_end_of_data() => break,
            Err(e) => panic!("unexpected decode failure: {e}"),
        }
    }
    assert_eq!(replayed, vec![first, second]);
}

#[test]
fn test_truncated_payload_is_corruption_not_tail() {
    let serializer = BinarySerializer::new();
    let mut bytes = encode(&commit(9, 9, vec![Value::String("x".into())]));
    bytes.truncate(bytes.len() - 4);

    let mut read = ByteBuffer::from_bytes(bytes);
    let err = serializer
        .decode_commit(TransactionCommitInfo::builder(), &mut read)
        .unwrap_err();
    assert!(matches!(err, CodecError::Decode { .. }));
    assert!(!err.is_end_of_data());
}

#[test]
fn test_encoding_is_deterministic() {
    let info = commit(3, 30, vec![Value::Int(1), Value::String("a".into())]);
    assert_eq!(encode(&info), encode(&info));
}

fn arb_command() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "[a-z]{0,12}".prop_map(Value::String),
        proptest::collection::vec(any::<u8>(), 0..32).prop_map(Value::Bytes),
    ]
}

proptest! {
    #[test]
    fn prop_commit_roundtrip(
        id in 1u64..u64::MAX,
        time in any::<u64>(),
        commands in proptest::collection::vec(arb_command(), 0..8),
    ) {
        // id >= 1 keeps the head off the reserved zero sentinel
        let serializer = BinarySerializer::new();
        let info = commit(id, time, commands);
        let mut read = ByteBuffer::from_bytes(encode(&info));
        let decoded = serializer
            .decode_commit(TransactionCommitInfo::builder(), &mut read)
            .unwrap();
        prop_assert_eq!(decoded, info);
    }
}
