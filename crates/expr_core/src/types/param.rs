//! Parameter identifiers.

use std::fmt;
use std::sync::Arc;

/// Identifier of a scalar parameter.
///
/// Leaves are tagged with a `ParamId` and contexts are keyed by them. Lookup is
/// by value, so two leaves built from the same identifier are interchangeable.
/// Integers and strings both convert into identifiers; an integer identifier is
/// stored and rendered as its decimal text, so `ParamId::from(1)` and
/// `ParamId::from("1")` are equal.
///
/// # Examples
/// ```
/// use expr_core::types::ParamId;
///
/// let a = ParamId::from(-3);
/// assert_eq!(a.as_str(), "-3");
/// assert_eq!(a, ParamId::from("-3"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(Arc<str>);

impl ParamId {
    /// Create an identifier from anything string-like.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Textual form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParamId({:?})", &*self.0)
    }
}

impl From<&str> for ParamId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ParamId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&ParamId> for ParamId {
    fn from(id: &ParamId) -> Self {
        id.clone()
    }
}

macro_rules! impl_from_integer {
    ($($int:ty),*) => {
        $(
            impl From<$int> for ParamId {
                fn from(index: $int) -> Self {
                    Self::new(index.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);
