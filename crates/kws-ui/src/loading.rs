use std::future::Future;
use std::time::Instant;

use parking_lot::Mutex;

/// A busy indicator that can be shown and hidden
pub trait LoadingIndicator: Send + Sync {
    fn present(&self) -> impl Future<Output = ()> + Send;
    fn dismiss(&self) -> impl Future<Output = ()> + Send;
}

/// Factory for loading indicators
pub trait LoadingController: Send + Sync {
    type Indicator: LoadingIndicator;

    fn create(&self, message: &str) -> impl Future<Output = Self::Indicator> + Send;
}

/// Show an indicator while `task` runs and dismiss it once `task` settles,
/// whatever its outcome.
pub async fn while_loading<C, F>(controller: &C, message: &str, task: F) -> F::Output
where
    C: LoadingController,
    F: Future + Send,
{
    let indicator = controller.create(message).await;
    indicator.present().await;
    let output = task.await;
    indicator.dismiss().await;
    output
}

/// Indicator for terminal use: reports through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLoadingController;

impl LoadingController for TracingLoadingController {
    type Indicator = TracingLoadingIndicator;

    async fn create(&self, message: &str) -> TracingLoadingIndicator {
        TracingLoadingIndicator {
            message: message.to_string(),
            shown_at: Mutex::new(None),
        }
    }
}

#[derive(Debug)]
pub struct TracingLoadingIndicator {
    message: String,
    shown_at: Mutex<Option<Instant>>,
}

impl TracingLoadingIndicator {
    pub fn is_presented(&self) -> bool {
        self.shown_at.lock().is_some()
    }
}

impl LoadingIndicator for TracingLoadingIndicator {
    async fn present(&self) {
        tracing::info!("{}", self.message);
        *self.shown_at.lock() = Some(Instant::now());
    }

    async fn dismiss(&self) {
        let shown_at = self.shown_at.lock().take();
        if let Some(started) = shown_at {
            tracing::debug!("{} done in {:?}", self.message, started.elapsed());
        }
    }
}
