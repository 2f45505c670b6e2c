use super::completion::{Completion, Settlement};
use super::executor::{build_thread_pool, TaskExecutor};
use super::integrate::{IntensitySum, LineIntegrator};
use super::outcome::RadonOutcome;
use super::params::RadonParams;
use super::pipeline::RadonCalculator;
use crate::error::RadonError;
use crate::image::NormalizedImage;
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// Launches one fresh [`RadonCalculator`] per image on a shared executor.
#[derive(Clone)]
pub struct RadonExecutor {
    executor: Arc<dyn TaskExecutor>,
    integrator: Arc<dyn LineIntegrator>,
    params: RadonParams,
}

impl RadonExecutor {
    pub fn new(executor: Arc<dyn TaskExecutor>, params: RadonParams) -> Self {
        Self {
            executor,
            integrator: Arc::new(IntensitySum),
            params,
        }
    }

    /// Executor backed by a dedicated rayon pool sized by
    /// `params.worker_threads`.
    pub fn from_params(params: RadonParams) -> Result<Self, RadonError> {
        let pool = build_thread_pool(params.worker_threads)?;
        Ok(Self::new(Arc::new(pool), params))
    }

    pub fn with_integrator(mut self, integrator: Arc<dyn LineIntegrator>) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn params(&self) -> &RadonParams {
        &self.params
    }

    /// Starts a run with the configured timeout.
    pub fn calculate(
        &self,
        image: NormalizedImage,
    ) -> Result<RadonCalculator, RadonError> {
        self.calculate_with_timeout(image, self.params.timeout())
    }

    pub fn calculate_with_timeout(
        &self,
        image: NormalizedImage,
        timeout: Duration,
    ) -> Result<RadonCalculator, RadonError> {
        self.launch(image, timeout, Completion::new())
    }

    /// Starts a run whose handle invokes `callback` once it settles.
    pub fn calculate_with_callback<F>(
        &self,
        image: NormalizedImage,
        timeout: Duration,
        callback: F,
    ) -> Result<RadonCalculator, RadonError>
    where
        F: FnOnce(&Settlement<Arc<RadonOutcome>>) + Send + 'static,
    {
        let completion = Completion::new();
        completion.on_settled(callback);
        self.launch(image, timeout, completion)
    }

    fn launch(
        &self,
        image: NormalizedImage,
        timeout: Duration,
        completion: Completion<Arc<RadonOutcome>>,
    ) -> Result<RadonCalculator, RadonError> {
        debug!(
            "RadonExecutor::launch w={} h={} timeout_ms={}",
            image.w,
            image.h,
            timeout.as_millis()
        );
        let calculator = RadonCalculator::new(Arc::clone(&self.executor))
            .with_integrator(Arc::clone(&self.integrator))
            .with_completion(completion);
        calculator.run(image, timeout)?;
        Ok(calculator)
    }
}
