//! The capability seam between plans and the wire.
//!
//! [`FabricTarget`] is the whole surface the run loop and discovery
//! need from a device fleet: apply one command block, ask one show
//! question. The production implementation rides `nxfab-api`; tests
//! substitute an in-memory target.

use nxfab_api::{CommandOutcome, Error as ApiError, SwitchClient, TransportConfig};

/// Apply command batches and run show queries against named devices.
#[allow(async_fn_in_trait)]
pub trait FabricTarget {
    /// Transmit one ordered command block to `device` and return the
    /// reconciled per-command outcomes.
    async fn apply(&self, device: &str, commands: &[String])
    -> Result<Vec<CommandOutcome>, ApiError>;

    /// Run a structured show query on `device`.
    async fn show_json(&self, device: &str, command: &str)
    -> Result<serde_json::Value, ApiError>;

    /// Run a raw-text show query on `device`.
    async fn show_ascii(&self, device: &str, command: &str) -> Result<String, ApiError>;
}

/// Production target: NX-API over HTTP, one shared connection pool
/// across every device in the run.
pub struct NxapiTarget {
    http: reqwest::Client,
    transport: TransportConfig,
}

impl NxapiTarget {
    pub fn new(transport: TransportConfig) -> Result<Self, ApiError> {
        let http = transport.build_client()?;
        Ok(Self { http, transport })
    }

    fn client(&self, device: &str) -> SwitchClient {
        SwitchClient::new(self.http.clone(), device, &self.transport)
    }
}

impl FabricTarget for NxapiTarget {
    async fn apply(
        &self,
        device: &str,
        commands: &[String],
    ) -> Result<Vec<CommandOutcome>, ApiError> {
        self.client(device).run_commands(commands).await
    }

    async fn show_json(&self, device: &str, command: &str) -> Result<serde_json::Value, ApiError> {
        self.client(device).show_json(command).await
    }

    async fn show_ascii(&self, device: &str, command: &str) -> Result<String, ApiError> {
        self.client(device).show_ascii(command).await
    }
}
