//! Conversion of raw argument strings into typed field values.
//!
//! The set of target types is closed: every field type maps to one
//! [`ValueKind`] tag, and [`convert`] knows how to produce a [`Value`] for
//! each tag. New field types are supported by adding a tag, never by
//! inspecting the field at runtime.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// The semantic type tag of an option target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Str,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    Path,
    Enum {
        name: &'static str,
        variants: &'static [&'static str],
    },
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Str => "String",
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Bool => "bool",
            ValueKind::Path => "PathBuf",
            ValueKind::Enum { name, .. } => *name,
        };
        f.write_str(name)
    }
}

/// A converted argument value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Str(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Bool(bool),
    Path(PathBuf),
    /// Index into the variant names of the target enum.
    Enum(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertErr {
    #[error("`{value}` is not a valid {kind}: {reason}")]
    Invalid {
        value: String,
        kind: ValueKind,
        reason: String,
    },

    #[error("`{value}` is not one of {}", .variants.join(", "))]
    UnknownVariant {
        value: String,
        variants: Vec<String>,
    },
}

fn parse_as<T>(raw: &str, kind: ValueKind) -> Result<T, ConvertErr>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e: T::Err| ConvertErr::Invalid {
        value: raw.to_string(),
        kind,
        reason: e.to_string(),
    })
}

/// Convert `raw` into a value of type `kind`.
///
/// Booleans accept `true` in any letter case. Every other input, including
/// typos like `yes` or `1`, converts to `false` rather than failing.
/// Enum variants match by exact, case sensitive name.
pub fn convert(raw: &str, kind: ValueKind) -> Result<Value, ConvertErr> {
    let value = match kind {
        ValueKind::Str => Value::Str(raw.to_string()),
        ValueKind::I8 => Value::I8(parse_as(raw, kind)?),
        ValueKind::I16 => Value::I16(parse_as(raw, kind)?),
        ValueKind::I32 => Value::I32(parse_as(raw, kind)?),
        ValueKind::I64 => Value::I64(parse_as(raw, kind)?),
        ValueKind::F32 => Value::F32(parse_as(raw, kind)?),
        ValueKind::F64 => Value::F64(parse_as(raw, kind)?),
        ValueKind::Bool => Value::Bool(raw.eq_ignore_ascii_case("true")),
        ValueKind::Path => Value::Path(PathBuf::from(raw)),
        ValueKind::Enum { variants, .. } => match variants.iter().position(|v| *v == raw) {
            Some(index) => Value::Enum(index),
            None => {
                return Err(ConvertErr::UnknownVariant {
                    value: raw.to_string(),
                    variants: variants.iter().map(|v| v.to_string()).collect(),
                })
            }
        },
    };
    Ok(value)
}

/// A field type that options can be bound to.
pub trait ArgValue: Sized + 'static {
    fn kind() -> ValueKind;

    /// Extract the field value, `None` if `value` has the wrong tag.
    fn from_value(value: Value) -> Option<Self>;

    /// The current value as a flag, `Some` only for booleans.
    fn as_flag(&self) -> Option<bool> {
        None
    }
}

macro_rules! arg_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ArgValue for $ty {
                fn kind() -> ValueKind {
                    ValueKind::$kind
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$kind(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

arg_value! {
    String => Str,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    PathBuf => Path,
}

impl ArgValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }

    fn as_flag(&self) -> Option<bool> {
        Some(*self)
    }
}

/// An enumerated field type, selected by variant name.
///
/// ```
/// use fieldopts::ArgEnum;
///
/// #[derive(Debug, PartialEq)]
/// enum Mode { Fast, Safe }
///
/// impl ArgEnum for Mode {
///     const NAME: &'static str = "Mode";
///     const VARIANTS: &'static [&'static str] = &["Fast", "Safe"];
///
///     fn from_index(index: usize) -> Option<Self> {
///         match index {
///             0 => Some(Mode::Fast),
///             1 => Some(Mode::Safe),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ArgEnum: Sized + 'static {
    const NAME: &'static str;
    const VARIANTS: &'static [&'static str];

    fn from_index(index: usize) -> Option<Self>;

    fn kind() -> ValueKind {
        ValueKind::Enum {
            name: Self::NAME,
            variants: Self::VARIANTS,
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Enum(index) => Self::from_index(index),
            _ => None,
        }
    }
}
