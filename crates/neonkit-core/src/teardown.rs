//! Scope teardown registration.
//!
//! UI surfaces own resources that must be released when the surface goes
//! away: in-flight requests and pending debounce timers. `TeardownGuard`
//! generalizes the host framework's unmount hook into a plain value whose
//! callbacks run exactly once, either through an explicit [`dispose`] call
//! from the host's cleanup path or when the guard is dropped.
//!
//! [`dispose`]: TeardownGuard::dispose

/// Runs registered disposal callbacks exactly once when the owning scope
/// ends.
///
/// # Examples
///
/// ```
/// use neonkit_core::teardown::TeardownGuard;
///
/// let mut guard = TeardownGuard::new();
/// guard.on_teardown(|| println!("released"));
/// guard.dispose(); // runs the callback
/// guard.dispose(); // no-op
/// ```
#[derive(Default)]
pub struct TeardownGuard {
    callbacks: Vec<Box<dyn FnOnce() + Send>>,
    disposed: bool,
}

impl TeardownGuard {
    /// Creates a guard with no registered callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback to run on teardown.
    ///
    /// Registrations after [`dispose`](Self::dispose) are dropped without
    /// running; the scope has already ended.
    pub fn on_teardown<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.disposed {
            return;
        }
        self.callbacks.push(Box::new(callback));
    }

    /// Runs every registered callback, in registration order.
    ///
    /// Idempotent: the second and later calls are no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for callback in self.callbacks.drain(..) {
            callback();
        }
    }

    /// Whether teardown has already run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for TeardownGuard {
    fn drop(&mut self) {
        self.dispose();
    }
}
