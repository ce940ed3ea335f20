//! Responses
//!
//! Typed answers collected for one date and their rendering as CSV cells.

use std::fmt;

use serde::Deserialize;

/// A single typed answer (or the absence of one)
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    /// Number rounded to a configured precision
    Quantity(f64),
    YesNo(YesNo),
    /// Skipped question or filler; renders as an empty cell
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) | Value::Quantity(x) => write_float(f, *x),
            Value::YesNo(yn) => write!(f, "{}", yn),
            Value::Null => Ok(()),
        }
    }
}

/// Floats always carry a decimal point (`3.0`, not `3`)
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_finite() && x.fract() == 0.0 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

impl From<Option<Value>> for Value {
    fn from(value: Option<Value>) -> Self {
        value.unwrap_or(Value::Null)
    }
}

/// A collected answer keyed by field name
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub id: String,
    pub value: Value,
}

impl Response {
    pub fn new(id: impl Into<String>, value: Value) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// Answer to a yes/no question, stored as `y` / `n`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum YesNo {
    #[serde(rename = "y")]
    Yes,
    #[serde(rename = "n")]
    No,
}

impl YesNo {
    /// Parse the exact tokens `y` and `n`
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "y" => Some(YesNo::Yes),
            "n" => Some(YesNo::No),
            _ => None,
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YesNo::Yes => f.write_str("y"),
            YesNo::No => f.write_str("n"),
        }
    }
}

/// The value a choice records; its type decides how answers are matched
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ChoiceValue {
    /// Does `answer`, read as this value's type, equal this value?
    pub fn matches(&self, answer: &str) -> bool {
        match self {
            ChoiceValue::Integer(v) => answer.trim().parse::<i64>().map_or(false, |a| a == *v),
            ChoiceValue::Float(v) => answer.trim().parse::<f64>().map_or(false, |a| a == *v),
            ChoiceValue::Text(v) => answer == v,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ChoiceValue::Integer(v) => Value::Integer(*v),
            ChoiceValue::Float(v) => Value::Float(*v),
            ChoiceValue::Text(v) => Value::Text(v.clone()),
        }
    }
}

impl fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoiceValue::Integer(v) => write!(f, "{}", v),
            ChoiceValue::Float(v) => write_float(f, *v),
            ChoiceValue::Text(v) => f.write_str(v),
        }
    }
}

/// One selectable option of a choice question
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Choice {
    pub value: ChoiceValue,
    pub label: String,
}
