//! Value types for txnlog
//!
//! `Value` is the closed variant enum that transaction effects and snapshot
//! entities travel through the codec as. Seven variants carry ordinary data;
//! `Domain` carries a payload in a plugin module's own encoded form, tagged
//! with the type descriptor the resolver uses to look up a decoder.
//!
//! ## Type rules
//!
//! - No implicit coercions: `Int(1) != Float(1.0)`
//! - `Bytes` are not `String`
//! - `Float` uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`

use serde::{Deserialize, Serialize};

/// Dynamically-typed payload value.
///
/// Different variants are NEVER equal, even when they contain the same
/// "value": `Int(1) != Float(1.0)`, `Bytes(b"a") != String("a")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Ordered sequence of values
    Array(Vec<Value>),
    /// Module-defined payload: an opaque body in the producing module's own
    /// encoding, tagged with the type descriptor used for resolver lookup.
    Domain {
        /// Type descriptor, e.g. `"orders.OrderCreated"`
        descriptor: String,
        /// Encoded body, interpretable only by the owning module's catalog
        body: Vec<u8>,
    },
}

// Custom PartialEq for IEEE-754 float semantics
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (
                Value::Domain { descriptor: da, body: ba },
                Value::Domain { descriptor: db, body: bb },
            ) => da == db && ba == bb,
            // Different variants are never equal
            _ => false,
        }
    }
}

impl Value {
    /// Create a `Domain` value from a descriptor and an encoded body.
    pub fn domain(descriptor: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Value::Domain {
            descriptor: descriptor.into(),
            body: body.into(),
        }
    }

    /// Get the variant name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Array(_) => "Array",
            Value::Domain { .. } => "Domain",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as byte slice if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get as value slice if this is an Array value
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get the descriptor if this is a Domain value
    pub fn domain_descriptor(&self) -> Option<&str> {
        match self {
            Value::Domain { descriptor, .. } => Some(descriptor),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cross_variant_equality() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Bytes(b"hello".to_vec()), Value::String("hello".into()));
        assert_ne!(Value::Null, Value::Bool(false));
    }

    #[test]
    fn test_float_ieee754_equality() {
        assert_ne!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
    }

    #[test]
    fn test_domain_equality() {
        let a = Value::domain("orders.OrderCreated", vec![1, 2, 3]);
        let b = Value::domain("orders.OrderCreated", vec![1, 2, 3]);
        let c = Value::domain("orders.OrderCancelled", vec![1, 2, 3]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Null.type_name(), "Null");
        assert_eq!(Value::Array(vec![]).type_name(), "Array");
        assert_eq!(Value::domain("x", vec![]).type_name(), "Domain");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::Int(7).as_str(), None);
        assert_eq!(Value::String("cmd".into()).as_str(), Some("cmd"));
        assert_eq!(
            Value::domain("a.B", vec![]).domain_descriptor(),
            Some("a.B")
        );
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from("cmd1"), Value::String("cmd1".into()));
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from(true), Value::Bool(true));
    }

    #[test]
    fn test_serde_roundtrip() {
        let v = Value::Array(vec![
            Value::Int(1),
            Value::String("two".into()),
            Value::domain("m.T", vec![0xAA, 0xBB]),
        ]);
        let bytes = bincode::serialize(&v).unwrap();
        let back: Value = bincode::deserialize(&bytes).unwrap();
        assert_eq!(v, back);
    }
}
