//! Decommission-phase discovery: which VLANs belong to the tenant,
//! and which VXLAN segment backs each of them.
//!
//! Two read-only queries per device: `show ip interface brief vrf
//! <tenant>` (structured) yields the tenant's VLAN-backed interfaces,
//! `show vxlan` (ascii) yields the VLAN to segment-id table. The VLAN
//! set and the mapping are both accumulated across every device in
//! the list; a query failure aborts the run, since the teardown batch
//! cannot be assembled without this state.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::target::FabricTarget;

/// Tenant state discovered across the device list.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    /// VLAN ids with an SVI in the tenant VRF, across all devices.
    pub vlans: BTreeSet<String>,
    /// VLAN id to VXLAN segment id, merged across all devices
    /// (per-VLAN last write wins).
    pub vlan_to_vni: BTreeMap<String, String>,
}

/// Extract the tenant's VLAN ids from an interface-brief body.
///
/// `TABLE_intf` is either a single `ROW_intf` wrapper or a list of
/// them, depending on how many interfaces matched; an absent table
/// means the tenant has no interfaces on this device.
pub fn parse_interface_brief(body: &serde_json::Value) -> Vec<String> {
    let Some(table) = body.get("TABLE_intf") else {
        return Vec::new();
    };

    let rows: Vec<&serde_json::Value> = match table {
        serde_json::Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    rows.iter()
        .filter_map(|row| row.get("ROW_intf")?.get("intf-name")?.as_str())
        .filter_map(|name| name.strip_prefix("Vlan"))
        .map(str::to_owned)
        .collect()
}

/// Parse the tabular `show vxlan` text: one mapping per line, first
/// token the VLAN id, second the segment id. Lines without exactly
/// two tokens (headers, separators, blanks) are ignored.
pub fn parse_vxlan_table(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let vlan = tokens.next()?;
            let vni = tokens.next()?;
            if tokens.next().is_some() {
                return None;
            }
            Some((vlan.to_owned(), vni.to_owned()))
        })
        .collect()
}

/// Interrogate every device for the tenant's VLANs and their segment
/// mappings.
pub async fn discover<T: FabricTarget>(
    target: &T,
    devices: &[String],
    tenant: &str,
) -> Result<Discovery, CoreError> {
    let mut discovery = Discovery::default();
    let brief_cmd = format!("show ip interface brief vrf {tenant}");

    for device in devices {
        info!(%device, tenant, "discovering tenant state");

        let brief = target
            .show_json(device, &brief_cmd)
            .await
            .map_err(|source| CoreError::Discovery {
                device: device.clone(),
                source,
            })?;
        let vlans = parse_interface_brief(&brief);
        debug!(%device, count = vlans.len(), "tenant VLANs found");
        discovery.vlans.extend(vlans);

        let vxlan = target
            .show_ascii(device, "show vxlan")
            .await
            .map_err(|source| CoreError::Discovery {
                device: device.clone(),
                source,
            })?;
        discovery.vlan_to_vni.extend(parse_vxlan_table(&vxlan));
    }

    Ok(discovery)
}
