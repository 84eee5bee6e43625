/// Runs `on_abandon` if dropped before [`InFlightGuard::disarm`].
///
/// Held across the awaits of an operation that put shared state into an
/// in-flight phase, so a cancelled future still leaves that state terminal.
pub(crate) struct InFlightGuard<F: FnOnce()> {
    on_abandon: Option<F>,
}

impl<F: FnOnce()> InFlightGuard<F> {
    pub(crate) fn new(on_abandon: F) -> Self {
        Self {
            on_abandon: Some(on_abandon),
        }
    }

    /// The operation reached its own exit path.
    pub(crate) fn disarm(mut self) {
        self.on_abandon = None;
    }
}

impl<F: FnOnce()> Drop for InFlightGuard<F> {
    fn drop(&mut self) {
        if let Some(on_abandon) = self.on_abandon.take() {
            on_abandon();
        }
    }
}
