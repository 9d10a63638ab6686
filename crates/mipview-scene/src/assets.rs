use std::{
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};

static ASSET_HANDLE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Typed handle into an asset registry. Index 0 is reserved for the null handle,
/// which is what failed loads hand out.
pub struct AssetHandle<T> {
    index: u64,
    marker: PhantomData<T>,
}

impl<T> Default for AssetHandle<T> {
    fn default() -> Self { Self::null() }
}

impl<T> AssetHandle<T> {
    pub fn new() -> Self {
        let index = ASSET_HANDLE_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self {
            index,
            marker: PhantomData,
        }
    }

    pub fn null() -> Self {
        Self {
            index: 0,
            marker: PhantomData,
        }
    }

    pub fn is_null(&self) -> bool { self.index == 0 }

    pub fn index(&self) -> u64 { self.index }
}

impl<T> Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Asset({})", self.index) }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Hash for AssetHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) { self.index.hash(state) }
}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool { self.index == other.index }
}

impl<T> Eq for AssetHandle<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    #[test]
    fn test_null_handle() {
        let handle = AssetHandle::<Dummy>::null();
        assert_eq!(handle.is_null(), true);
        assert_eq!(handle, AssetHandle::default());
        assert_eq!(format!("{handle:?}"), "Asset(0)");
    }

    #[test]
    fn test_new_handles_are_unique() {
        let a = AssetHandle::<Dummy>::new();
        let b = AssetHandle::<Dummy>::new();

        assert_eq!(a.is_null(), false);
        assert_ne!(a, b);
    }
}
