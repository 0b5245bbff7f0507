//! Metrics for provider initialization
//!
//! Everything here goes through the `metrics` facade. Nothing is recorded unless
//! the embedding application installs a recorder.

use std::time::Instant;

/// Histogram of existence-check latency, labelled by `service`
pub const VALIDATE_DURATION: &str = "cryptctl.validate.duration";

/// Counter of initialization attempts, labelled by `provider` and `outcome`
pub const INIT_TOTAL: &str = "cryptctl.init.total";

/// Records the time between creation and drop into a histogram
#[derive(Debug)]
pub struct Timer {
    name: &'static str,
    service: &'static str,
    start: Instant,
}

impl Timer {
    /// Starts a timer for the given metric and service label
    pub fn new(name: &'static str, service: &'static str) -> Self {
        Self {
            name,
            service,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        ::metrics::histogram!(self.name, self.start.elapsed(), "service" => self.service);
    }
}

/// Macro for creating a validator timer
#[macro_export]
macro_rules! timer {
    ($service:expr) => {
        $crate::metrics::Timer::new($crate::metrics::VALIDATE_DURATION, $service)
    };
}

/// Counts one initialization attempt
pub fn record_init(provider: &'static str, ok: bool) {
    let outcome = if ok { "ready" } else { "failed" };
    ::metrics::increment_counter!(INIT_TOTAL, "provider" => provider, "outcome" => outcome);
}
