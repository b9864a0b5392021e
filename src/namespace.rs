//! The value store populated by a parse.
//!
//! A [Namespace] maps destination names to raw string values. Typed access
//! happens on demand through [Namespace::get], which parses the stored
//! string into the requested type via the [ArgValue] trait.

use std::error;

use indexmap::IndexMap;

use crate::{Error, ErrorKind};

/// Boxed source error produced by a typed conversion.
pub type ConversionError = Box<dyn error::Error + Send + Sync + 'static>;

/// A type that can be produced from a raw stored argument value.
///
/// Implemented for `String`, `bool` and the common integer and float
/// widths. Conversion failures are reported by [Namespace::get] as
/// [ErrorKind::InvalidValue] with the underlying parse error attached as
/// the source.
pub trait ArgValue: Sized {
    /// Convert the raw stored string into `Self`.
    fn from_arg(raw: &str) -> Result<Self, ConversionError>;
}

impl ArgValue for String {
    fn from_arg(raw: &str) -> Result<Self, ConversionError> {
        Ok(raw.to_owned())
    }
}

impl ArgValue for bool {
    /// Case-insensitive `true`, `1`, `yes` and `on` are true; every other
    /// value is false. Never fails.
    fn from_arg(raw: &str) -> Result<Self, ConversionError> {
        Ok(matches!(
            raw.to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ))
    }
}

macro_rules! arg_value_from_str {
    ($($ty:ty),* $(,)?) => {
        $(impl ArgValue for $ty {
            fn from_arg(raw: &str) -> Result<Self, ConversionError> {
                Ok(raw.parse::<$ty>()?)
            }
        })*
    };
}

arg_value_from_str!(i32, i64, u32, u64, usize, f32, f64);

/// Parsed results keyed by destination name.
///
/// Values are stored as raw strings exactly as they appeared on the command
/// line (or as configured defaults). [Namespace::get] converts on access,
/// so the same entry can be read as a `String` by one caller and an `i64`
/// by another.
///
/// # Examples
///
/// ```rust
/// use argot::Namespace;
///
/// # fn main() -> Result<(), argot::Error> {
/// let mut ns = Namespace::new();
/// ns.set("count", "42");
///
/// assert_eq!(ns.get::<i64>("count")?, 42);
/// assert_eq!(ns.get::<String>("count")?, "42");
/// assert!(ns.get::<i64>("missing").is_err());
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    values: IndexMap<String, String>,
}

impl Namespace {
    /// Construct an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value under the given destination, overwriting any
    /// previous value. Last writer wins.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Retrieve the value stored under `key`, converted to `T`.
    ///
    /// Fails with [ErrorKind::ArgumentNotFound] if the key is absent, and
    /// with [ErrorKind::InvalidValue] if the stored string does not parse
    /// as `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use argot::{ErrorKind, Namespace};
    ///
    /// let mut ns = Namespace::new();
    /// ns.set("limit", "not-a-number");
    ///
    /// let error = ns.get::<u32>("limit").unwrap_err();
    /// assert!(matches!(error.kind(), ErrorKind::InvalidValue { .. }));
    /// ```
    pub fn get<T>(&self, key: &str) -> Result<T, Error>
    where
        T: ArgValue,
    {
        let raw = self.values.get(key).ok_or_else(|| {
            Error::new(ErrorKind::ArgumentNotFound { key: key.into() })
        })?;

        T::from_arg(raw).map_err(|source| {
            Error::new(ErrorKind::InvalidValue {
                key: key.into(),
                value: raw.clone().into_boxed_str(),
                source,
            })
        })
    }

    /// Test whether a value is stored under `key`, without converting it.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over all raw key/value pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of stored entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Test whether the namespace holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_is_last_writer_wins() {
        let mut ns = Namespace::new();
        ns.set("out", "a.txt");
        ns.set("out", "b.txt");
        assert_eq!(ns.get::<String>("out").unwrap(), "b.txt");
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn boolean_truthy_set() {
        let mut ns = Namespace::new();

        for raw in ["true", "TRUE", "1", "yes", "Yes", "on", "ON"] {
            ns.set("flag", raw);
            assert!(ns.get::<bool>("flag").unwrap(), "{raw} should be true");
        }

        for raw in ["false", "0", "no", "off", "", "anything"] {
            ns.set("flag", raw);
            assert!(!ns.get::<bool>("flag").unwrap(), "{raw} should be false");
        }
    }

    #[test]
    fn numeric_conversions() {
        let mut ns = Namespace::new();
        ns.set("n", "12");
        ns.set("f", "2.5");

        assert_eq!(ns.get::<i32>("n").unwrap(), 12);
        assert_eq!(ns.get::<usize>("n").unwrap(), 12);
        assert_eq!(ns.get::<f64>("f").unwrap(), 2.5);
    }

    #[test]
    fn conversion_failure_carries_key_and_value() {
        let mut ns = Namespace::new();
        ns.set("n", "twelve");

        let error = ns.get::<i64>("n").unwrap_err();

        match error.kind() {
            ErrorKind::InvalidValue { key, value, .. } => {
                assert_eq!(&**key, "n");
                assert_eq!(&**value, "twelve");
            }
            other => panic!("unexpected kind: {other:?}"),
        }

        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn missing_key_is_distinct_from_conversion_failure() {
        let ns = Namespace::new();
        let error = ns.get::<String>("absent").unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::ArgumentNotFound { .. }));
    }

    #[test]
    fn entries_are_insertion_ordered() {
        let mut ns = Namespace::new();
        ns.set("b", "2");
        ns.set("a", "1");

        let pairs: Vec<_> = ns.entries().collect();
        assert_eq!(pairs, vec![("b", "2"), ("a", "1")]);
    }
}
