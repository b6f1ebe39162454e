use std::cell::Cell;

/// RAII guard that holds a [`TextStream`](super::TextStream) one level
/// deeper for as long as it lives.
#[must_use = "dropping the guard immediately restores the previous depth"]
pub(super) struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl<'a> DepthGuard<'a> {
    pub(super) fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self { depth }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get() - 1);
    }
}
