use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::debug;

use crate::network::errors::ProbeError;

/// Answers "is outbound network reachable?".
///
/// Implementations must bound their own wait; callers additionally wrap the
/// check in a timeout and treat every error as "unreachable".
pub trait ConnectivityProbe: Send + Sync {
    fn check(&self) -> BoxFuture<'_, Result<(), ProbeError>>;
}

/// Probes by issuing an HTTP GET to a well-known endpoint.
///
/// Any HTTP response, including error statuses, counts as reachable: the
/// question is whether packets get out, not whether the endpoint is healthy.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| ProbeError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ConnectivityProbe for HttpProbe {
    fn check(&self) -> BoxFuture<'_, Result<(), ProbeError>> {
        async move {
            match self.client.get(&self.url).send().await {
                Ok(response) => {
                    debug!(
                        event = "core.probe.check_completed",
                        url = %self.url,
                        status = response.status().as_u16()
                    );
                    Ok(())
                }
                Err(e) if e.is_timeout() => Err(ProbeError::TimedOut {
                    url: self.url.clone(),
                    timeout_ms: self.timeout.as_millis(),
                }),
                Err(e) => Err(ProbeError::Unreachable {
                    url: self.url.clone(),
                    message: e.to_string(),
                }),
            }
        }
        .boxed()
    }
}
