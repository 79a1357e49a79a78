//! Deadline and cancellation applied around every leader and member call.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Why a guarded call did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Interrupted {
    Timeout,
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CallLimits {
    pub(crate) timeout: Option<Duration>,
    pub(crate) cancellation_token: Option<CancellationToken>,
}

impl CallLimits {
    pub(crate) fn new(
        timeout: Option<Duration>,
        cancellation_token: Option<CancellationToken>,
    ) -> Self {
        Self {
            timeout,
            cancellation_token,
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }

    /// Run `fut` under the configured deadline, aborting early on cancellation.
    pub(crate) async fn guard<F>(&self, fut: F) -> Result<F::Output, Interrupted>
    where
        F: Future,
    {
        let bounded = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, fut)
                    .await
                    .map_err(|_| Interrupted::Timeout),
                None => Ok(fut.await),
            }
        };

        match &self.cancellation_token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(Interrupted::Cancelled),
                    out = bounded => out,
                }
            }
            None => bounded.await,
        }
    }
}
