//! Shared callback handles.

use std::{fmt, sync::Arc};

/// Comparable, cheaply clonable handle for a `Fn(T)` closure.
///
/// Equality is identity (`Arc::ptr_eq`): two handles are equal only when
/// they wrap the same closure allocation.
pub struct CallbackWith<T> {
    inner: Arc<dyn Fn(T) + Send + Sync>,
}

impl<T> CallbackWith<T> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(handler),
        }
    }

    /// Invoke the callback with an argument.
    pub fn call(&self, value: T) {
        (self.inner)(value)
    }
}

impl<T, F> From<F> for CallbackWith<T>
where
    F: Fn(T) + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T> Clone for CallbackWith<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for CallbackWith<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Eq for CallbackWith<T> {}

impl<T> fmt::Debug for CallbackWith<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackWith").finish_non_exhaustive()
    }
}
