//! Command handlers, one module per resource.

pub mod config_cmd;
pub mod tenant;
