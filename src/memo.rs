use std::sync::Arc;

/// Single-slot cache: compute once, hand out the same `Arc` until cleared.
///
/// Owners hold it by value, so tests can build a fresh one or `clear` it
/// between runs.
#[derive(Debug)]
pub struct Memo<T> {
    slot: Option<Arc<T>>,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.clone()
    }

    pub fn set(&mut self, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.slot = Some(Arc::clone(&value));
        value
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }

    pub fn is_cached(&self) -> bool {
        self.slot.is_some()
    }

    pub fn get_or_compute<F>(&mut self, compute: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        if let Some(value) = &self.slot {
            return Arc::clone(value);
        }
        self.set(compute())
    }
}
