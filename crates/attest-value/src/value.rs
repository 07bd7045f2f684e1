//! The dynamic value model: every comparable value is a [`Value`].
//!
//! The model is deliberately closed. Each variant maps to one shape kind;
//! the differ dispatches on [`Kind`] and an unhandled kind is
//! unrepresentable. Reference-bearing variants (`Seq`, `Map`, `Ref`) carry
//! an `Rc` so that shared structure keeps a stable address for the
//! shared-address fast path and cycle detection.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::key::MapKey;

/// A shared, mutable value node. Cyclic graphs are built by storing a
/// [`Value::Ref`] to an already-created cell somewhere beneath that cell.
pub type ValueCell = Rc<RefCell<Value>>;

/// A dynamically shaped value.
#[derive(Clone, Debug)]
pub enum Value {
    /// No value at all (a missing lookup, an empty interface holder).
    /// Distinct from any zero value.
    Absent,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex { re: f64, im: f64 },
    Text(String),
    /// Fixed-size sequence. The length is part of the type: two fixed
    /// sequences of different lengths are a type mismatch, not a length
    /// mismatch.
    FixedSeq(Vec<Value>),
    /// Growable sequence. Address-bearing.
    Seq(Rc<Vec<Value>>),
    /// Associative map with deterministic key order. Address-bearing.
    Map(Rc<BTreeMap<MapKey, Value>>),
    /// Composite record; fields keep declaration order.
    Record {
        type_name: String,
        fields: Vec<(String, Value)>,
    },
    /// Nominal reference. Address-bearing and the vehicle for shared or
    /// cyclic structure.
    Ref(ValueCell),
    /// One level of polymorphic indirection (an interface holder).
    Boxed(Box<Value>),
    /// Function reference, compared by identity only.
    Func(usize),
    /// Channel-like handle, compared by identity only.
    Chan(usize),
    /// Raw memory address, compared by identity only.
    RawAddr(usize),
    /// Pointer-sized machine word, compared by value.
    Word(u64),
}

/// The shape kind of a value, used for dispatch and cycle bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Absent,
    Bool,
    Int,
    Uint,
    Float,
    Complex,
    Text,
    FixedSeq,
    Seq,
    Map,
    Record,
    Ref,
    Boxed,
    Func,
    Chan,
    RawAddr,
    Word,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Absent => "absent",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Complex => "complex",
            Kind::Text => "string",
            Kind::FixedSeq => "array",
            Kind::Seq => "slice",
            Kind::Map => "map",
            Kind::Record => "struct",
            Kind::Ref => "pointer",
            Kind::Boxed => "interface",
            Kind::Func => "func",
            Kind::Chan => "chan",
            Kind::RawAddr => "unsafe pointer",
            Kind::Word => "uintptr",
        };
        f.write_str(name)
    }
}

impl Value {
    /// The shape kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Absent => Kind::Absent,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Complex { .. } => Kind::Complex,
            Value::Text(_) => Kind::Text,
            Value::FixedSeq(_) => Kind::FixedSeq,
            Value::Seq(_) => Kind::Seq,
            Value::Map(_) => Kind::Map,
            Value::Record { .. } => Kind::Record,
            Value::Ref(_) => Kind::Ref,
            Value::Boxed(_) => Kind::Boxed,
            Value::Func(_) => Kind::Func,
            Value::Chan(_) => Kind::Chan,
            Value::RawAddr(_) => Kind::RawAddr,
            Value::Word(_) => Kind::Word,
        }
    }

    /// Returns `true` if the two values have the same declared type.
    ///
    /// Kind equality, refined for fixed sequences (length is part of the
    /// type) and records (type name and field names must match).
    pub fn same_type(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::FixedSeq(a), Value::FixedSeq(e)) => a.len() == e.len(),
            (
                Value::Record {
                    type_name: a_name,
                    fields: a_fields,
                },
                Value::Record {
                    type_name: e_name,
                    fields: e_fields,
                },
            ) => {
                a_name == e_name
                    && a_fields.len() == e_fields.len()
                    && a_fields
                        .iter()
                        .zip(e_fields.iter())
                        .all(|(a, e)| a.0 == e.0)
            }
            _ => self.kind() == other.kind(),
        }
    }

    /// Human-readable type description, used in "types differ" messages.
    pub fn type_desc(&self) -> String {
        match self {
            Value::FixedSeq(v) => format!("[{}]array", v.len()),
            Value::Record { type_name, .. } => type_name.clone(),
            other => other.kind().to_string(),
        }
    }

    /// The underlying address of a reference-bearing value, `None` for
    /// everything else.
    pub fn addr(&self) -> Option<usize> {
        match self {
            Value::Seq(v) => Some(Rc::as_ptr(v) as usize),
            Value::Map(m) => Some(Rc::as_ptr(m) as usize),
            Value::Ref(c) => Some(Rc::as_ptr(c) as usize),
            _ => None,
        }
    }

    /// Build a record value with fields in declaration order.
    pub fn record<N, S, F>(type_name: N, fields: F) -> Value
    where
        N: Into<String>,
        S: Into<String>,
        F: IntoIterator<Item = (S, Value)>,
    {
        Value::Record {
            type_name: type_name.into(),
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Build a growable sequence value.
    pub fn seq(elems: Vec<Value>) -> Value {
        Value::Seq(Rc::new(elems))
    }

    /// Build a map value.
    pub fn map<K, E>(entries: E) -> Value
    where
        K: Into<MapKey>,
        E: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(Rc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        ))
    }

    /// Build a text value.
    pub fn text(s: impl Into<String>) -> Value {
        Value::Text(s.into())
    }

    /// Allocate a shared cell holding `v`.
    pub fn cell(v: Value) -> ValueCell {
        Rc::new(RefCell::new(v))
    }

    /// Build a reference to an existing cell.
    pub fn reference(cell: &ValueCell) -> Value {
        Value::Ref(Rc::clone(cell))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint(u64::from(u))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
