//! Dynamic argument values captured from a method invocation.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::constants::ELEMENT_SEPARATOR;
use crate::convert::{format_date, format_date_time};
use crate::error::EncodeError;

/// A single argument value of a captured invocation.
///
/// # Examples
///
/// ```
/// use fast_links::ArgValue;
///
/// let ids: ArgValue = vec![2_i64, 3, 4].into();
/// assert!(ids.is_multi_valued());
///
/// let missing: ArgValue = None::<i64>.into();
/// assert!(missing.is_null());
/// ```
#[derive(Clone, Default)]
pub enum ArgValue {
    /// Absent value
    #[default]
    Null,
    /// Text
    Str(String),
    /// Boolean
    Bool(bool),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// Enumeration constant
    Enum(EnumValue),
    /// Fixed-size array
    Array(Vec<ArgValue>),
    /// Ordered collection
    List(Vec<ArgValue>),
    /// Keyed entries; never encodable into a link
    Map(Vec<(String, ArgValue)>),
    /// Calendar date
    Date(NaiveDate),
    /// Instant with offset
    DateTime(DateTime<FixedOffset>),
    /// A value only a custom [`ValueConverter`](crate::ValueConverter) understands
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl ArgValue {
    /// Returns true for [`ArgValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for arrays and lists.
    #[must_use]
    pub const fn is_multi_valued(&self) -> bool {
        matches!(self, Self::Array(_) | Self::List(_))
    }

    /// Returns the elements of an array or list.
    #[must_use]
    pub fn elements(&self) -> Option<&[ArgValue]> {
        match self {
            Self::Array(items) | Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the value's runtime type, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Str(_) => "String",
            Self::Bool(_) => "Boolean",
            Self::Int(_) => "Integer",
            Self::Long(_) => "Long",
            Self::Enum(_) => "Enum",
            Self::Array(_) => "Array",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Date(_) => "Date",
            Self::DateTime(_) => "DateTime",
            Self::Opaque(_) => "Opaque",
        }
    }

    /// Wraps an arbitrary value for a custom converter.
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        Self::Opaque(Arc::new(value))
    }

    /// Stringifies the value directly.
    ///
    /// Enums render their symbolic name, arrays and lists join their
    /// elements with `,`, dates use ISO-8601.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::NullElement`] for a null (nested or not),
    /// [`EncodeError::Unsupported`] for maps and opaque values.
    pub fn to_link_string(&self) -> Result<String, EncodeError> {
        match self {
            Self::Null => Err(EncodeError::NullElement),
            Self::Str(s) => Ok(s.clone()),
            Self::Bool(b) => Ok(b.to_string()),
            Self::Int(i) => Ok(i.to_string()),
            Self::Long(l) => Ok(l.to_string()),
            Self::Enum(e) => Ok(e.name().to_string()),
            Self::Array(items) | Self::List(items) => {
                let parts = items
                    .iter()
                    .map(Self::to_link_string)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(parts.join(ELEMENT_SEPARATOR))
            }
            Self::Date(d) => Ok(format_date(*d, None)),
            Self::DateTime(dt) => Ok(format_date_time(dt, None)),
            Self::Map(_) | Self::Opaque(_) => Err(EncodeError::Unsupported {
                type_name: self.kind_name().to_string(),
            }),
        }
    }
}

impl fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Long(l) => f.debug_tuple("Long").field(l).finish(),
            Self::Enum(e) => f.debug_tuple("Enum").field(e).finish(),
            Self::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Self::List(items) => f.debug_tuple("List").field(items).finish(),
            Self::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Self::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Self::DateTime(dt) => f.debug_tuple("DateTime").field(dt).finish(),
            Self::Opaque(_) => write!(f, "Opaque(..)"),
        }
    }
}

/// An enumeration constant.
///
/// Links always use the symbolic `name`; the display `text` is what a
/// custom string conversion of the constant would produce and is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    name: String,
    text: String,
}

impl EnumValue {
    /// Creates a constant whose display text equals its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            text: name.clone(),
            name,
        }
    }

    /// Creates a constant with a custom display text.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Returns the symbolic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<EnumValue> for ArgValue {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<NaiveDate> for ArgValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for ArgValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<Utc>> for ArgValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value.fixed_offset())
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<ArgValue>> From<Vec<T>> for ArgValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ArgValue>, const N: usize> From<[T; N]> for ArgValue {
    fn from(value: [T; N]) -> Self {
        Self::Array(value.into_iter().map(Into::into).collect())
    }
}
