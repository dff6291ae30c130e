//! Tenant parameters and input-file loading.
//!
//! The tenant file is a comma-delimited text file with one header line
//! and one data row; the device file lists one switch address per
//! line. Both are read fully up front -- a malformed input terminates
//! the run before anything touches the network.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::CoreError;

/// Expected tenant-file header, used in parse diagnostics.
pub const TENANT_HEADER: &str = "TENANT_NAME,VLAN_ID,L2_VNID,L3_VNI_VLAN,L3_VNID,IP_ADDR,BGP_AS";

/// Parameters for one tenant, immutable once loaded.
///
/// All fields are kept as text: the management plane takes them as
/// command substitutions and range validation is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantSpec {
    /// Tenant (VRF) name.
    pub name: String,
    /// Initial access VLAN created within the tenant.
    pub vlan_id: String,
    /// VXLAN segment id bound to the access VLAN.
    pub l2_vni: String,
    /// VLAN backing the tenant's L3 VNI.
    pub l3_vni_vlan: String,
    /// VXLAN segment id bound to the L3-VNI VLAN.
    pub l3_vni: String,
    /// Gateway address for the access SVI (a /24 is assumed).
    pub gateway_ip: String,
    /// BGP AS of the leaf switches (iBGP assumed).
    pub bgp_as: String,
}

impl TenantSpec {
    /// Parse one comma-delimited data row.
    pub fn parse_row(row: &str) -> Result<Self, String> {
        let fields: Vec<&str> = row.split(',').map(str::trim).collect();
        if fields.len() != 7 {
            return Err(format!(
                "expected 7 comma-separated fields ({TENANT_HEADER}), found {}",
                fields.len()
            ));
        }
        if let Some(pos) = fields.iter().position(|f| f.is_empty()) {
            return Err(format!("field {} is empty ({TENANT_HEADER})", pos + 1));
        }
        Ok(Self {
            name: fields[0].to_owned(),
            vlan_id: fields[1].to_owned(),
            l2_vni: fields[2].to_owned(),
            l3_vni_vlan: fields[3].to_owned(),
            l3_vni: fields[4].to_owned(),
            gateway_ip: fields[5].to_owned(),
            bgp_as: fields[6].to_owned(),
        })
    }
}

/// Load the tenant spec from the first data row of a tenant file.
///
/// The first line is a header and is skipped; the first non-empty line
/// after it is the data row. Further rows are ignored.
pub fn load_tenant_file(path: &Path) -> Result<TenantSpec, CoreError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: display.clone(),
        source,
    })?;

    let mut lines = text.lines();
    if lines.next().is_none() {
        return Err(CoreError::TenantParse {
            path: display,
            reason: "file is empty".into(),
        });
    }

    let Some(row) = lines.find(|line| !line.trim().is_empty()) else {
        return Err(CoreError::TenantParse {
            path: display,
            reason: "no data row after the header line".into(),
        });
    };

    TenantSpec::parse_row(row).map_err(|reason| CoreError::TenantParse {
        path: display,
        reason,
    })
}

/// Load the ordered device list: one address per non-empty line.
///
/// Order determines processing order and nothing else.
pub fn load_device_file(path: &Path) -> Result<Vec<String>, CoreError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: display.clone(),
        source,
    })?;

    let devices: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();

    if devices.is_empty() {
        return Err(CoreError::EmptyDeviceList { path: display });
    }
    Ok(devices)
}
