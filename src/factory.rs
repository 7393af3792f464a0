//! Client handle construction and time-boxed reuse.
//!
//! A handle is expensive to produce: connecting the remote service to the
//! warehouse and re-training it on the current schema takes several round
//! trips. [`ClientFactory`] runs that sequence at most once per time window
//! and hands out the shared result; [`Bootstrap`] is the injectable seam the
//! production [`RemoteBootstrap`] and test doubles implement.

use std::{fs, sync::Arc, time::Duration};

use serde_json::Value;

use crate::{
    cache::TtlSlot,
    config::Config,
    error::{AppResult, config_error, credentials_error, file_read_error},
    remote::{CopilotOps, RemoteClient},
    schema::{TrainingPlan, information_schema_query}
};

/// Builds a ready handle: connected to the warehouse and schema-trained
#[allow(async_fn_in_trait)]
pub trait Bootstrap {
    type Handle: CopilotOps;

    async fn bootstrap(&self) -> AppResult<Arc<Self::Handle>>;
}

/// Caches the bootstrapped handle for a fixed time window.
///
/// Within the window every call returns the same handle instance; after
/// expiry or [`invalidate`](Self::invalidate) the next call re-runs the
/// bootstrap. A failed bootstrap leaves the slot empty, so no partial
/// handle is ever served.
pub struct ClientFactory<B: Bootstrap> {
    bootstrap: B,
    slot:      TtlSlot<Arc<B::Handle>>
}

impl<B: Bootstrap> ClientFactory<B> {
    pub fn new(bootstrap: B, ttl: Duration) -> Self {
        Self {
            bootstrap,
            slot: TtlSlot::new(ttl)
        }
    }

    /// Current handle, bootstrapping when the slot is cold
    pub async fn handle(&self) -> AppResult<Arc<B::Handle>> {
        if let Some(handle) = self.slot.get() {
            return Ok(handle);
        }
        let handle = self.bootstrap.bootstrap().await?;
        self.slot.put(Arc::clone(&handle));
        Ok(handle)
    }

    /// Drop the cached handle so the next call bootstraps afresh
    pub fn invalidate(&self) {
        self.slot.clear();
    }
}

/// Bootstrap against the hosted copilot service and a BigQuery project
pub struct RemoteBootstrap {
    config: Config
}

impl RemoteBootstrap {
    pub fn new(config: Config) -> Self {
        Self {
            config
        }
    }
}

impl Bootstrap for RemoteBootstrap {
    type Handle = RemoteClient;

    async fn bootstrap(&self) -> AppResult<Arc<RemoteClient>> {
        let copilot = &self.config.copilot;
        let warehouse = &self.config.warehouse;

        let base_url = copilot.base_url.as_deref().ok_or_else(|| {
            config_error("copilot.base_url is required (set COPILOT_BASE_URL or the config file)")
        })?;
        let api_key = copilot.api_key.as_deref().ok_or_else(|| {
            config_error("copilot.api_key is required (set COPILOT_API_KEY or the config file)")
        })?;
        let model = copilot.model.as_deref().ok_or_else(|| {
            config_error("copilot.model is required (set COPILOT_MODEL or the config file)")
        })?;
        let project_id = warehouse.project_id.as_deref().ok_or_else(|| {
            config_error(
                "warehouse.project_id is required (set WAREHOUSE_PROJECT_ID or the config file)"
            )
        })?;
        let dataset = warehouse.dataset.as_deref().ok_or_else(|| {
            config_error(
                "warehouse.dataset is required (set WAREHOUSE_DATASET or the config file)"
            )
        })?;
        let credentials_path = warehouse
            .credentials_path
            .as_deref()
            .unwrap_or("bigquery_credentials.json");

        let raw = fs::read_to_string(credentials_path)
            .map_err(|e| file_read_error(credentials_path, e))?;
        let credentials: Value = serde_json::from_str(&raw).map_err(|e| {
            credentials_error(format!(
                "Invalid credentials file '{}': {}",
                credentials_path, e
            ))
        })?;

        let client = RemoteClient::new(base_url, api_key, model);
        client
            .connect_warehouse(project_id, &credentials, copilot.llm_api_key.as_deref())
            .await?;

        // Re-derive and re-submit the schema documents on every cold start;
        // the service treats plan submission as an upsert.
        let catalog = client
            .run_sql(&information_schema_query(project_id, dataset))
            .await?;
        let plan = TrainingPlan::derive(&catalog)?;
        client.train(&plan).await?;

        Ok(Arc::new(client))
    }
}
