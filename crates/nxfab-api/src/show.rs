//! `ins_api` envelopes for read-only show queries.
//!
//! Show queries use a different request shape from the JSON-RPC config
//! path: a single `ins_api` object with `type` either `cli_show`
//! (structured JSON body) or `cli_show_ascii` (raw text body), posted
//! with a plain `application/json` content type.

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ── Request ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ShowRequest<'a> {
    ins_api: InsEnvelope<'a>,
}

#[derive(Debug, Serialize)]
struct InsEnvelope<'a> {
    version: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    chunk: &'static str,
    sid: &'static str,
    input: &'a str,
    output_format: &'static str,
}

impl<'a> ShowRequest<'a> {
    /// A `cli_show` query returning a structured JSON body.
    pub fn structured(command: &'a str) -> Self {
        Self::with_kind(command, "cli_show")
    }

    /// A `cli_show_ascii` query returning the raw CLI text as a string body.
    pub fn ascii(command: &'a str) -> Self {
        Self::with_kind(command, "cli_show_ascii")
    }

    fn with_kind(command: &'a str, kind: &'static str) -> Self {
        Self {
            ins_api: InsEnvelope {
                version: "1.0",
                kind,
                chunk: "0",
                sid: "1",
                input: command,
                output_format: "json",
            },
        }
    }
}

// ── Response ────────────────────────────────────────────────────────

// Reply path: `ins_api.outputs.output.body`. Everything around the
// body (per-command code/msg) is ignored; a missing body is an error.

#[derive(Debug, Deserialize)]
struct ShowResponse {
    ins_api: ShowOutputs,
}

#[derive(Debug, Deserialize)]
struct ShowOutputs {
    outputs: ShowOutput,
}

#[derive(Debug, Deserialize)]
struct ShowOutput {
    output: ShowBody,
}

#[derive(Debug, Deserialize)]
struct ShowBody {
    #[serde(default)]
    body: Option<serde_json::Value>,
}

/// Parse a show reply and extract the output body.
pub(crate) fn extract_body(
    device: &str,
    command: &str,
    body_text: &str,
) -> Result<serde_json::Value, Error> {
    let parsed: ShowResponse =
        serde_json::from_str(body_text).map_err(|e| Error::Deserialization {
            device: device.to_owned(),
            message: format!("{e} (body preview: {:?})", crate::client::preview(body_text)),
        })?;

    parsed
        .ins_api
        .outputs
        .output
        .body
        .ok_or_else(|| Error::MissingOutput {
            device: device.to_owned(),
            command: command.to_owned(),
        })
}
