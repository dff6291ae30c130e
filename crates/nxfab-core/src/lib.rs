//! Business logic for the nxfab workspace.
//!
//! This crate owns everything between the CLI and the wire:
//!
//! - **[`TenantSpec`]** — tenant parameters loaded from the delimited
//!   tenant file, plus the ordered device list.
//! - **Intents** ([`intent`]) — typed configuration steps rendered to
//!   NX-OS command text by formatter methods; nothing else in the
//!   workspace spells out CLI syntax.
//! - **Plans** ([`plan`]) — ordered command blocks with a batching
//!   mode: the provisioner's single-shot 37-command batch, the
//!   decommissioner's per-block teardown sequence.
//! - **Discovery** ([`discovery`]) — the decommission-phase queries
//!   that find a tenant's VLANs and their VXLAN segment mappings
//!   across the fabric.
//! - **[`FabricTarget`]** — the capability seam over `nxfab-api`;
//!   the run loop and discovery are testable against an in-memory
//!   implementation.
//! - **Run loop** ([`run`]) — strictly sequential device-by-device
//!   execution with an explicit partial-failure policy, producing one
//!   [`DeviceReport`] per device.

pub mod discovery;
pub mod error;
pub mod intent;
pub mod plan;
pub mod run;
pub mod target;
pub mod tenant;

// ── Primary re-exports ──────────────────────────────────────────────
pub use discovery::{Discovery, discover};
pub use error::CoreError;
pub use intent::{CommandBlock, DecommissionStep, ProvisionStep};
pub use plan::{Batching, Plan, decommission_plan, provision_plan};
pub use run::{DeviceReport, FailurePolicy, apply_plan};
pub use target::{FabricTarget, NxapiTarget};
pub use tenant::{TenantSpec, load_device_file, load_tenant_file};

// Re-export the wire-level types: reports expose the outcome types
// directly, and callers match on transport errors.
pub use nxfab_api::{CommandOutcome, Disposition, Error as ApiError, TransportConfig};
