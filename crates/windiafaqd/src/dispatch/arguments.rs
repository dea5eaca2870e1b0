//! Positional command arguments.
//!
//! Arguments arrive as a JSON array whose elements are numbers, strings, or
//! booleans. Each element is kept as an [`Arg`] and handlers read them back by
//! index with an explicit expected kind. A value of the wrong kind is an
//! error; nothing is coerced.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single positional argument.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged, expecting = "a number, string, or boolean argument")]
pub enum Arg {
    /// JSON number, always widened to `f64`.
    Float(f64),
    /// JSON string.
    String(String),
    /// JSON boolean.
    Bool(bool),
}

/// The three kinds an [`Arg`] can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// `f64` values.
    Float,
    /// UTF-8 strings.
    String,
    /// Booleans.
    Bool,
}

impl ArgKind {
    /// Returns the lowercase name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::String => "string",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl Arg {
    /// Returns the kind of value held.
    pub fn kind(&self) -> ArgKind {
        match self {
            Self::Float(_) => ArgKind::Float,
            Self::String(_) => ArgKind::String,
            Self::Bool(_) => ArgKind::Bool,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) => write!(formatter, "{value}"),
            Self::String(value) => write!(formatter, "{value:?}"),
            Self::Bool(value) => write!(formatter, "{value}"),
        }
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Errors raised when a handler reads an argument.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgError {
    /// The request carried fewer arguments than the handler expects.
    #[error("argument {index} is out of range ({len} supplied)")]
    OutOfRange { index: usize, len: usize },
    /// The argument exists but holds a different kind of value.
    #[error("argument {index} is not a {expected}: {found}")]
    TypeMismatch {
        index: usize,
        expected: ArgKind,
        found: Arg,
    },
}

/// Ordered argument list with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Args(Vec<Arg>);

impl Args {
    /// Wraps an already-built argument vector.
    pub fn new(values: Vec<Arg>) -> Self {
        Self(values)
    }

    /// Number of arguments supplied.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the arguments in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arg> {
        self.0.iter()
    }

    /// Returns the argument at `index` if it has the `expected` kind.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::OutOfRange`] when `index` is past the end and
    /// [`ArgError::TypeMismatch`] when the value holds another kind.
    pub fn arg_at(&self, index: usize, expected: ArgKind) -> Result<&Arg, ArgError> {
        let arg = self.0.get(index).ok_or(ArgError::OutOfRange {
            index,
            len: self.0.len(),
        })?;
        if arg.kind() == expected {
            Ok(arg)
        } else {
            Err(ArgError::TypeMismatch {
                index,
                expected,
                found: arg.clone(),
            })
        }
    }

    /// Reads a float argument.
    ///
    /// # Errors
    ///
    /// See [`Args::arg_at`].
    pub fn float_at(&self, index: usize) -> Result<f64, ArgError> {
        match self.arg_at(index, ArgKind::Float)? {
            Arg::Float(value) => Ok(*value),
            other => Err(mismatch(index, ArgKind::Float, other)),
        }
    }

    /// Reads a string argument.
    ///
    /// # Errors
    ///
    /// See [`Args::arg_at`].
    pub fn string_at(&self, index: usize) -> Result<&str, ArgError> {
        match self.arg_at(index, ArgKind::String)? {
            Arg::String(value) => Ok(value),
            other => Err(mismatch(index, ArgKind::String, other)),
        }
    }

    /// Reads a boolean argument.
    ///
    /// # Errors
    ///
    /// See [`Args::arg_at`].
    pub fn bool_at(&self, index: usize) -> Result<bool, ArgError> {
        match self.arg_at(index, ArgKind::Bool)? {
            Arg::Bool(value) => Ok(*value),
            other => Err(mismatch(index, ArgKind::Bool, other)),
        }
    }
}

impl From<Vec<Arg>> for Args {
    fn from(values: Vec<Arg>) -> Self {
        Self(values)
    }
}

impl fmt::Display for Args {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("[")?;
        for (position, arg) in self.0.iter().enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{arg}")?;
        }
        formatter.write_str("]")
    }
}

fn mismatch(index: usize, expected: ArgKind, found: &Arg) -> ArgError {
    ArgError::TypeMismatch {
        index,
        expected,
        found: found.clone(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn sample() -> Args {
        Args::new(vec![Arg::from(150.0), Arg::from("-es"), Arg::from(true)])
    }

    #[test]
    fn reads_each_kind_at_its_position() {
        let args = sample();
        assert_eq!(args.float_at(0), Ok(150.0));
        assert_eq!(args.string_at(1), Ok("-es"));
        assert_eq!(args.bool_at(2), Ok(true));
    }

    #[rstest]
    #[case::float_as_string(0, ArgKind::String)]
    #[case::string_as_float(1, ArgKind::Float)]
    #[case::bool_as_float(2, ArgKind::Float)]
    #[case::string_as_bool(1, ArgKind::Bool)]
    fn refuses_to_coerce(#[case] index: usize, #[case] expected: ArgKind) {
        let args = sample();
        let result = args.arg_at(index, expected);
        assert!(matches!(
            result,
            Err(ArgError::TypeMismatch { index: i, expected: e, .. }) if i == index && e == expected
        ));
    }

    #[test]
    fn reports_out_of_range_with_length() {
        let args = Args::new(vec![Arg::from(1.0)]);
        assert_eq!(
            args.string_at(1),
            Err(ArgError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn deserialises_json_kinds_without_coercion() {
        let args: Args = serde_json::from_str(r#"[1, "1", true]"#).expect("parse args");
        assert_eq!(args.arg_at(0, ArgKind::Float).map(Arg::kind), Ok(ArgKind::Float));
        assert_eq!(args.arg_at(1, ArgKind::String).map(Arg::kind), Ok(ArgKind::String));
        assert_eq!(args.arg_at(2, ArgKind::Bool).map(Arg::kind), Ok(ArgKind::Bool));
    }

    #[rstest]
    #[case::null("[null]")]
    #[case::object(r#"[{"a": 1}]"#)]
    #[case::nested("[[1]]")]
    fn rejects_values_outside_the_union(#[case] input: &str) {
        assert!(serde_json::from_str::<Args>(input).is_err());
    }

    #[test]
    fn mismatch_message_names_expected_kind() {
        let error = sample().float_at(1).expect_err("string is not a float");
        assert_eq!(error.to_string(), r#"argument 1 is not a float: "-es""#);
    }
}
