//! Ordered parameter assignments.
//!
//! A [`Context`] maps parameter identifiers to values and fixes the index of
//! every parameter in the gradient vectors computed against it. Ordering is
//! insertion order and is owned by the context: overwriting a parameter keeps
//! its position, new parameters are appended, so an evaluate/gradient pair
//! made against the same context always agree on indices.

use indexmap::IndexMap;

use crate::traits::Scalar;
use crate::types::error::ExprError;
use crate::types::param::ParamId;

/// Insertion-ordered assignment of values to parameters.
///
/// # Examples
/// ```
/// use expr_core::types::{Context, ParamId};
///
/// let mut ctx = Context::new();
/// ctx.insert("x", 1.5);
/// ctx.insert("y", -2.0);
/// ctx.insert("x", 3.0); // overwrite keeps index 0
///
/// assert_eq!(ctx.index_of(&ParamId::from("x")), Some(0));
/// assert_eq!(ctx.get(&ParamId::from("x")), Some(3.0));
/// assert_eq!(ctx.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Context<T = f64> {
    values: IndexMap<ParamId, T>,
}

/// Equality is order-sensitive: two contexts with the same entries in a
/// different order produce differently indexed gradients.
impl<T: PartialEq> PartialEq for Context<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values.iter().eq(other.values.iter())
    }
}

impl<T> Default for Context<T> {
    fn default() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }
}

impl<T: Scalar> Context<T> {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty context with room for `capacity` parameters.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: IndexMap::with_capacity(capacity),
        }
    }

    /// Assign `value` to `id`, returning the previous value if any.
    ///
    /// Existing parameters keep their index; new ones are appended.
    pub fn insert(&mut self, id: impl Into<ParamId>, value: T) -> Option<T> {
        self.values.insert(id.into(), value)
    }

    /// Value assigned to `id`.
    pub fn get(&self, id: &ParamId) -> Option<T> {
        self.values.get(id).copied()
    }

    /// Mutable access to the value assigned to `id`.
    pub fn get_mut(&mut self, id: &ParamId) -> Option<&mut T> {
        self.values.get_mut(id)
    }

    /// Position of `id` in gradient vectors computed against this context.
    pub fn index_of(&self, id: &ParamId) -> Option<usize> {
        self.values.get_index_of(id)
    }

    /// Whether `id` has a value.
    pub fn contains(&self, id: &ParamId) -> bool {
        self.values.contains_key(id)
    }

    /// Number of parameters, which is also the length of every gradient.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameters and values in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParamId, T)> + '_ {
        self.values.iter().map(|(id, value)| (id, *value))
    }

    /// Parameters and mutable values in index order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ParamId, &mut T)> + '_ {
        self.values.iter_mut()
    }

    /// Parameters in index order.
    pub fn keys(&self) -> impl Iterator<Item = &ParamId> + '_ {
        self.values.keys()
    }

    /// Values in index order.
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.values.values().copied()
    }

    /// Pair each entry of `gradient` with the parameter at the same index.
    ///
    /// # Errors
    /// `ExprError::GradientLength` if `gradient` was not computed against a
    /// context of the same size.
    pub fn named_gradient(&self, gradient: &[T]) -> Result<Vec<(ParamId, T)>, ExprError> {
        if gradient.len() != self.len() {
            return Err(ExprError::GradientLength {
                expected: self.len(),
                found: gradient.len(),
            });
        }
        Ok(self
            .keys()
            .cloned()
            .zip(gradient.iter().copied())
            .collect())
    }

    /// All-zero vector with one entry per parameter.
    pub(crate) fn zeros(&self) -> Vec<T> {
        vec![T::zero(); self.len()]
    }

    /// Standard basis vector selecting `id`.
    pub(crate) fn basis(&self, id: &ParamId) -> Result<Vec<T>, ExprError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| ExprError::MissingVariable(id.clone()))?;
        let mut basis = self.zeros();
        basis[index] = T::one();
        Ok(basis)
    }
}

impl<K: Into<ParamId>, T> FromIterator<(K, T)> for Context<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(id, value)| (id.into(), value)).collect(),
        }
    }
}

impl<K: Into<ParamId>, T> Extend<(K, T)> for Context<T> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        self.values
            .extend(iter.into_iter().map(|(id, value)| (id.into(), value)));
    }
}
