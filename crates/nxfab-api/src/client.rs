// NX-API HTTP client for a single switch.
//
// Wraps `reqwest::Client` with the fixed `/ins` endpoint, per-request
// content-type selection (JSON-RPC for config, plain JSON for show
// queries), basic auth, and reply parsing. The caller decides batch
// granularity; this module only moves one request and reconciles its
// reply.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, trace};

use crate::error::Error;
use crate::rpc::{self, CommandOutcome, RpcReply, RpcRequest};
use crate::show::{self, ShowRequest};
use crate::transport::TransportConfig;

/// Client bound to one device address.
///
/// Cheap to construct per device: `reqwest::Client` is internally
/// reference-counted, so a run over many switches shares one
/// connection pool.
pub struct SwitchClient {
    http: reqwest::Client,
    device: String,
    username: String,
    password: SecretString,
}

impl SwitchClient {
    /// Create a client for `device` (bare address or `host:port`) from
    /// a shared HTTP client and the transport credentials.
    pub fn new(http: reqwest::Client, device: impl Into<String>, transport: &TransportConfig) -> Self {
        Self {
            http,
            device: device.into(),
            username: transport.username.clone(),
            password: transport.password.clone(),
        }
    }

    /// The device address this client targets.
    pub fn device(&self) -> &str {
        &self.device
    }

    /// The fixed NX-API management endpoint for this device.
    fn endpoint(&self) -> String {
        format!("http://{}/ins", self.device)
    }

    // ── Configuration path ───────────────────────────────────────────

    /// Transmit one ordered command batch and reconcile the reply.
    ///
    /// Every command gets a sequential 1-based id; the whole list is
    /// serialized as the request body even for a single command. The
    /// reply may be a list or (for a single call) a bare object --
    /// both are reconciled the same way.
    pub async fn run_commands(&self, commands: &[String]) -> Result<Vec<CommandOutcome>, Error> {
        let requests = RpcRequest::batch(commands);
        debug!(device = %self.device, commands = requests.len(), "posting command batch");

        let response = self
            .http
            .post(self.endpoint())
            .header(reqwest::header::CONTENT_TYPE, "application/json-rpc")
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(&requests)
            .send()
            .await
            .map_err(Error::Transport)?;

        let body = self.read_body(response).await?;
        let replies = self.parse_replies(&body)?;
        Ok(rpc::reconcile(&requests, &replies))
    }

    // ── Show path ───────────────────────────────────────────────────

    /// Run a `cli_show` query and return the structured JSON body.
    pub async fn show_json(&self, command: &str) -> Result<serde_json::Value, Error> {
        debug!(device = %self.device, command, "show query (structured)");
        let body = self.post_show(&ShowRequest::structured(command)).await?;
        show::extract_body(&self.device, command, &body)
    }

    /// Run a `cli_show_ascii` query and return the raw text body.
    pub async fn show_ascii(&self, command: &str) -> Result<String, Error> {
        debug!(device = %self.device, command, "show query (ascii)");
        let body = self.post_show(&ShowRequest::ascii(command)).await?;
        let value = show::extract_body(&self.device, command, &body)?;
        match value {
            serde_json::Value::String(text) => Ok(text),
            _ => Err(Error::NotText {
                device: self.device.clone(),
                command: command.to_owned(),
            }),
        }
    }

    async fn post_show(&self, request: &ShowRequest<'_>) -> Result<String, Error> {
        let response = self
            .http
            .post(self.endpoint())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(request)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.read_body(response).await
    }

    // ── Shared response handling ────────────────────────────────────

    /// Check the HTTP status and return the body text.
    async fn read_body(&self, response: reqwest::Response) -> Result<String, Error> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                device: self.device.clone(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http {
                device: self.device.clone(),
                status: status.as_u16(),
                body: preview(&body).to_owned(),
            });
        }

        response.text().await.map_err(Error::Transport)
    }

    /// Parse a JSON-RPC reply body: a list of reply elements, or a
    /// bare object for a single call (treated as a one-element list).
    fn parse_replies(&self, body: &str) -> Result<Vec<RpcReply>, Error> {
        trace!(device = %self.device, "parsing reply body");
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| Error::Deserialization {
                device: self.device.clone(),
                message: format!("{e} (body preview: {:?})", preview(body)),
            })?;

        let result = if value.is_array() {
            serde_json::from_value::<Vec<RpcReply>>(value)
        } else {
            serde_json::from_value::<RpcReply>(value).map(|reply| vec![reply])
        };

        result.map_err(|e| Error::Deserialization {
            device: self.device.clone(),
            message: format!("{e} (body preview: {:?})", preview(body)),
        })
    }
}

/// First ~200 bytes of a body for diagnostics, without splitting a
/// UTF-8 character.
pub(crate) fn preview(body: &str) -> &str {
    if body.len() <= 200 {
        return body;
    }
    let mut end = 200;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
