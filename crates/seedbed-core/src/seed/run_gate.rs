//! First-run gate

use crate::cms::SetupStore;
use crate::errors::Result;

/// Setup flag recording that the seed pipeline has been entered
pub const INIT_HAS_RUN: &str = "initHasRun";

/// One-shot gate over the persisted `initHasRun` flag
pub struct RunGate<'a> {
    store: &'a dyn SetupStore,
    environment: &'a str,
}

impl<'a> RunGate<'a> {
    pub fn new(store: &'a dyn SetupStore, environment: &'a str) -> Self {
        Self { store, environment }
    }

    /// True exactly once per database and environment.
    ///
    /// The flag is set on every call; reading and setting happen in one
    /// atomic store operation.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn is_first_run(&self) -> Result<bool> {
        let previous = self.store.test_and_set(self.environment, INIT_HAS_RUN)?;
        tracing::debug!(
            environment = self.environment,
            previous,
            "checked {} flag",
            INIT_HAS_RUN
        );
        Ok(!previous)
    }
}
