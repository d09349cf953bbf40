//! Listener configuration.

/// Options controlling what an `ObservableQuery` delivers to subscribers.
///
/// # Example
///
/// ```rust
/// use docview_reactive::ListenOptions;
///
/// let options = ListenOptions::new().include_initial(false).notify_empty(true);
/// assert!(!options.includes_initial());
/// assert!(options.notifies_empty());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListenOptions {
    include_initial: bool,
    notify_empty: bool,
}

impl Default for ListenOptions {
    fn default() -> Self {
        Self {
            include_initial: true,
            notify_empty: false,
        }
    }
}

impl ListenOptions {
    /// Creates the default options: initial snapshot reported as additions,
    /// no notification for snapshots without changes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the first snapshot carries every document as `Added`.
    ///
    /// When disabled the first snapshot only carries the documents, like a
    /// plain result fetch.
    pub fn include_initial(mut self, include: bool) -> Self {
        self.include_initial = include;
        self
    }

    /// Sets whether subscribers hear about snapshots that changed nothing.
    pub fn notify_empty(mut self, notify: bool) -> Self {
        self.notify_empty = notify;
        self
    }

    #[inline]
    pub fn includes_initial(&self) -> bool {
        self.include_initial
    }

    #[inline]
    pub fn notifies_empty(&self) -> bool {
        self.notify_empty
    }
}
