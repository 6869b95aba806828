//! Scoped log silencing.
//!
//! Installs a no-op subscriber as the current thread's default dispatcher
//! for as long as the guard lives. Dropping the guard restores the previous
//! dispatcher, including when the guarded code returns early or panics.

use tracing::subscriber::{self, DefaultGuard, NoSubscriber};

/// Silences `tracing` output on this thread until dropped.
///
/// # Example
///
/// ```
/// use squadforge_solver::SilenceGuard;
///
/// {
///     let _quiet = SilenceGuard::acquire();
///     tracing::info!("not recorded");
/// }
/// tracing::info!("recorded again by whatever subscriber was active");
/// ```
#[must_use = "the previous subscriber is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct SilenceGuard {
    _previous: DefaultGuard,
}

impl SilenceGuard {
    pub fn acquire() -> Self {
        Self {
            _previous: subscriber::set_default(NoSubscriber::default()),
        }
    }

    /// Acquires a guard only when `quiet` is set.
    pub fn acquire_if(quiet: bool) -> Option<Self> {
        quiet.then(Self::acquire)
    }
}
