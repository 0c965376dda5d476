//! Core data model types for clozegen.
//!
//! Values flowing through a generation run: candidate input values,
//! one combination of inputs, and the answers an evaluator computes.

use std::fmt;

use serde::ser::{Serialize, Serializer};

use crate::error::ComputationError;

/// A single value bound to a template variable.
///
/// Rows hold a whole table line as one candidate, e.g. the thermo-physical
/// properties of water at one temperature.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Row(Vec<Value>),
}

impl Value {
    /// Weight marker for a Moodle multiple-choice alternative.
    ///
    /// `"="` marks the correct alternative, `""` leaves it unmarked.
    pub fn choice(selected: bool) -> Self {
        Value::Text(if selected { "=" } else { "" }.to_string())
    }

    /// Numeric view of the value; integers widen to floats.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_row(&self) -> Option<&[Value]> {
        match self {
            Value::Row(items) => Some(items),
            _ => None,
        }
    }

    /// Element `index` of a row, `None` for scalars or out-of-range indices.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.as_row().and_then(|items| items.get(index))
    }

    /// Human-readable name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Row(_) => "row",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{}", display_float(*x)),
            Value::Text(s) => f.write_str(s),
            Value::Row(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Shortest round-trip form, with `.0` appended to integral values.
fn display_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let s = x.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Row(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::Row(items.into_iter().map(Into::into).collect())
    }
}

/// Returns `true` if `name` can be used as a template variable name.
///
/// Names start with a letter or `_` and continue with letters, digits or `_`.
/// Any Unicode letter is accepted, so physics symbols like `θ0` or `λ` work.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// An ordered name → value mapping.
///
/// Serializes as a map in insertion order. Inserting an existing name
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    entries: Vec<(String, Value)>,
}

/// The answers an evaluator computes for one combination.
pub type Outputs = Bindings;

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Bindings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(n, v)| (n, v)))
    }
}

/// One assignment of exactly one candidate value to every input variable.
///
/// Borrowed from the [`InputSpace`](crate::space::InputSpace) that produced it.
/// Values can be looked up by name or by declaration position.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination<'a> {
    pub(crate) index: usize,
    pub(crate) entries: Vec<(&'a str, &'a Value)>,
}

impl<'a> Combination<'a> {
    /// Zero-based position of this combination in enumeration order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Value of the variable declared at `position`.
    pub fn value(&self, position: usize) -> Option<&'a Value> {
        self.entries.get(position).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a variable, failing the computation if it is not declared.
    pub fn require(&self, name: &str) -> Result<&'a Value, ComputationError> {
        self.get(name)
            .ok_or_else(|| ComputationError::new(format!("input '{name}' is not declared")))
    }

    /// Numeric input.
    pub fn number(&self, name: &str) -> Result<f64, ComputationError> {
        let value = self.require(name)?;
        value.as_f64().ok_or_else(|| {
            ComputationError::new(format!(
                "input '{name}' is {}, expected a number",
                value.type_name()
            ))
        })
    }

    /// Text input.
    pub fn text(&self, name: &str) -> Result<&'a str, ComputationError> {
        let value = self.require(name)?;
        value.as_str().ok_or_else(|| {
            ComputationError::new(format!(
                "input '{name}' is {}, expected text",
                value.type_name()
            ))
        })
    }

    /// Row input as a slice of values.
    pub fn row(&self, name: &str) -> Result<&'a [Value], ComputationError> {
        let value = self.require(name)?;
        value.as_row().ok_or_else(|| {
            ComputationError::new(format!(
                "input '{name}' is {}, expected a row",
                value.type_name()
            ))
        })
    }

    /// Row input whose elements are all numeric.
    pub fn numbers(&self, name: &str) -> Result<Vec<f64>, ComputationError> {
        self.row(name)?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_f64().ok_or_else(|| {
                    ComputationError::new(format!(
                        "{name}[{i}] is {}, expected a number",
                        v.type_name()
                    ))
                })
            })
            .collect()
    }

    /// Owned copy of the inputs, e.g. for listing them next to the outputs.
    pub fn to_bindings(&self) -> Bindings {
        let mut bindings = Bindings::new();
        for (name, value) in self.iter() {
            bindings.insert(name, value.clone());
        }
        bindings
    }
}
