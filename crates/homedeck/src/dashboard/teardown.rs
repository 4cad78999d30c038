//! Disposer handles for tool resources.
//!
//! A tool that starts anything long-running (a beat task, a ticking
//! countdown) hands the controller a [`Teardown`] for it. The controller
//! disposes every handle of the outgoing tool on close and on tool switch,
//! so a running interval can never outlive its view.

use tokio::task::AbortHandle;

enum Inner {
    Func(Box<dyn FnOnce() + Send>),
    Abort(AbortHandle),
}

pub struct Teardown(Option<Inner>);

impl Teardown {
    /// Wrap an arbitrary cleanup closure.
    pub fn new(f: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Inner::Func(Box::new(f))))
    }

    /// Wrap a spawned task: disposing aborts it.
    pub fn from_abort(handle: AbortHandle) -> Self {
        Self(Some(Inner::Abort(handle)))
    }

    /// A handle with nothing to release.
    pub fn noop() -> Self {
        Self(None)
    }

    /// Run the cleanup. Safe to call more than once.
    pub fn dispose(&mut self) {
        match self.0.take() {
            Some(Inner::Func(f)) => f(),
            Some(Inner::Abort(handle)) => handle.abort(),
            None => {}
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.0.is_none()
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
