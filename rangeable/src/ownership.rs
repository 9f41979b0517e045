//! Element ownership table.
//!
//! An input element can be upgraded by at most one live slider. Instead of
//! tagging the foreign element, ownership is tracked here, keyed by
//! [`ElementId`]. A slider claims its element in `init` and releases it in
//! `destroy`.

use std::sync::OnceLock;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashSet;

use crate::host::ElementId;

static OWNED_ELEMENTS: OnceLock<RwLock<FxHashSet<ElementId>>> = OnceLock::new();

fn read_owned() -> RwLockReadGuard<'static, FxHashSet<ElementId>> {
    OWNED_ELEMENTS
        .get_or_init(|| RwLock::new(FxHashSet::default()))
        .read()
}

fn write_owned() -> RwLockWriteGuard<'static, FxHashSet<ElementId>> {
    OWNED_ELEMENTS
        .get_or_init(|| RwLock::new(FxHashSet::default()))
        .write()
}

/// Marks `element` as owned. Returns `false` if it already was.
pub fn claim(element: ElementId) -> bool {
    write_owned().insert(element)
}

/// Releases `element`. Returns `false` if it was not owned.
pub fn release(element: ElementId) -> bool {
    write_owned().remove(&element)
}

/// Returns `true` if a live slider owns `element`.
pub fn is_owned(element: ElementId) -> bool {
    read_owned().contains(&element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_is_exclusive_until_released() {
        let element = ElementId(u64::MAX - 7);
        assert!(!is_owned(element));
        assert!(claim(element));
        assert!(is_owned(element));
        assert!(!claim(element));
        assert!(release(element));
        assert!(!release(element));
        assert!(claim(element));
        assert!(release(element));
    }
}
