//! Vendor health probing

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::vendors::AdapterRegistry;

/// Availability of one vendor, recomputed on demand and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResult {
    pub available: bool,
    /// Serializes as JSON `null` when the vendor is healthy
    pub error: Option<String>,
}

/// Probes every registered vendor with a minimal, cheap call.
pub struct HealthProber {
    registry: Arc<AdapterRegistry>,
}

impl HealthProber {
    pub fn new(registry: Arc<AdapterRegistry>) -> Self {
        Self { registry }
    }

    /// Probe all vendors concurrently and wait for every probe to settle.
    /// One failing or slow vendor never short-circuits the others; a probe
    /// task that dies is reported for that vendor only.
    pub async fn probe_all(&self) -> BTreeMap<String, HealthResult> {
        let handles: Vec<_> = self
            .registry
            .iter()
            .map(|(vendor, adapter)| {
                let vendor = vendor.clone();
                let adapter = adapter.clone();
                (vendor, tokio::spawn(async move { adapter.probe().await }))
            })
            .collect();

        let (vendors, tasks): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let settled = join_all(tasks).await;

        vendors
            .into_iter()
            .zip(settled)
            .map(|(vendor, outcome)| {
                let result = match outcome {
                    Ok(Ok(())) => HealthResult {
                        available: true,
                        error: None,
                    },
                    Ok(Err(err)) => HealthResult {
                        available: false,
                        error: Some(err.to_string()),
                    },
                    Err(join_err) => {
                        tracing::error!("Health probe task for {} died: {}", vendor, join_err);
                        HealthResult {
                            available: false,
                            error: Some("Health check failed".to_string()),
                        }
                    }
                };
                (vendor.wire_name().to_string(), result)
            })
            .collect()
    }
}
