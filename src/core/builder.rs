use std::sync::Arc;

use crate::core::config::HubConfig;
use crate::core::hub::Hub;
use crate::report::{Report, StderrReporter};

/// Builder for constructing a [`Hub`] with optional features.
pub struct HubBuilder {
    cfg: HubConfig,
    reporter: Option<Arc<dyn Report>>,
}

impl HubBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: HubConfig) -> Self {
        Self {
            cfg,
            reporter: None,
        }
    }

    /// Installs a failure reporter.
    ///
    /// The reporter receives one [`DeliveryFailure`](crate::DeliveryFailure)
    /// per failed delivery unit (listener error, caught panic, queue
    /// overflow). Defaults to [`StderrReporter`] when not set; tests
    /// typically inject a recording reporter here.
    pub fn with_reporter(mut self, reporter: Arc<dyn Report>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Builds and returns the hub instance.
    pub fn build(self) -> Hub {
        let reporter = self.reporter.unwrap_or_else(|| Arc::new(StderrReporter));
        Hub::new_internal(self.cfg, reporter)
    }
}
