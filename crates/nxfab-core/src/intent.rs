//! Typed configuration intents and their CLI rendering.
//!
//! Business intent ("bind segment id X to VLAN Y") is decoupled from
//! exact NX-OS syntax: each step variant renders to a [`CommandBlock`]
//! through its formatter, and nothing outside this module spells out
//! command text. Templates are fixed -- only the embedded values vary.

use crate::tenant::TenantSpec;

/// One transmission unit: an ordered list of commands that must travel
/// in a single request (a multi-line CLI context such as entering a
/// sub-mode and issuing a sub-command).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBlock(Vec<String>);

impl CommandBlock {
    /// A standalone command.
    pub fn single(command: impl Into<String>) -> Self {
        Self(vec![command.into()])
    }

    /// Commands that must be posted together, in order.
    pub fn group<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let commands: Vec<String> = commands.into_iter().map(Into::into).collect();
        debug_assert!(!commands.is_empty(), "empty command block");
        Self(commands)
    }

    pub fn commands(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ── Provisioning intents ────────────────────────────────────────────

/// Steps of the tenant provisioning batch, in application order.
///
/// Order is significant: later steps reference VRF/VLAN objects
/// created by earlier ones within the same batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionStep {
    /// Create the access VLAN and bind its layer-2 segment id.
    AccessVlan {
        vlan: String,
        tenant: String,
        vni: String,
    },
    /// Create the L3-VNI VLAN and bind its layer-3 segment id.
    L3VniVlan {
        vlan: String,
        tenant: String,
        vni: String,
    },
    /// Create the tenant VRF with rd/route-target statements.
    VrfContext { tenant: String, l3_vni: String },
    /// Create the access-VLAN SVI: VRF member, gateway (/24 assumed),
    /// anycast gateway mode.
    AccessSvi {
        vlan: String,
        tenant: String,
        gateway: String,
    },
    /// Create the L3-VNI SVI bound to the same VRF.
    L3Svi { vlan: String, tenant: String },
    /// Attach both segment ids to the NVE interface: the layer-2
    /// member with ARP suppression and BGP ingress replication, the
    /// layer-3 member marked VRF-associated.
    NveMembers { l2_vni: String, l3_vni: String },
    /// Advertise the VRF's routes as EVPN under the BGP AS context.
    BgpVrf { bgp_as: String, tenant: String },
    /// Register the layer-2 segment in the global EVPN table with
    /// auto rd/route-targets.
    EvpnVni { l2_vni: String },
}

impl ProvisionStep {
    /// Render this intent to its CLI lines.
    pub fn render(&self) -> CommandBlock {
        match self {
            Self::AccessVlan { vlan, tenant, vni } => CommandBlock::group([
                format!("vlan {vlan}"),
                format!("  name {tenant}_VL{vlan}"),
                format!("  vn-segment {vni}"),
            ]),
            Self::L3VniVlan { vlan, tenant, vni } => CommandBlock::group([
                format!("vlan {vlan}"),
                format!("  name L3-vni-vlan-for-{tenant}"),
                format!("  vn-segment {vni}"),
            ]),
            Self::VrfContext { tenant, l3_vni } => CommandBlock::group([
                format!("vrf context {tenant}"),
                format!("  vni {l3_vni}"),
                "  rd auto".to_owned(),
                "  address-family ipv4 unicast".to_owned(),
                format!("    route-target import {l3_vni}:{l3_vni}"),
                format!("    route-target export {l3_vni}:{l3_vni}"),
                "    route-target both auto".to_owned(),
                "    route-target both auto evpn".to_owned(),
            ]),
            Self::AccessSvi {
                vlan,
                tenant,
                gateway,
            } => CommandBlock::group([
                format!(" interface Vlan{vlan}"),
                "  no shutdown".to_owned(),
                format!("  vrf member {tenant}"),
                format!("  ip address {gateway}/24"),
                "  fabric forwarding mode anycast-gateway".to_owned(),
            ]),
            Self::L3Svi { vlan, tenant } => CommandBlock::group([
                format!("interface Vlan{vlan}"),
                format!("  description L3-vni-for-{tenant}-Routing"),
                "  no shutdown".to_owned(),
                format!("  vrf member {tenant}"),
            ]),
            Self::NveMembers { l2_vni, l3_vni } => CommandBlock::group([
                "interface nve1".to_owned(),
                format!("  member vni {l2_vni}"),
                "    suppress-arp".to_owned(),
                "    ingress-replication protocol bgp".to_owned(),
                format!("  member vni {l3_vni} associate-vrf"),
            ]),
            Self::BgpVrf { bgp_as, tenant } => CommandBlock::group([
                format!("router bgp {bgp_as}"),
                format!("vrf {tenant}"),
                "    address-family ipv4 unicast".to_owned(),
                "      advertise l2vpn evpn".to_owned(),
            ]),
            Self::EvpnVni { l2_vni } => CommandBlock::group([
                "evpn".to_owned(),
                format!("  vni {l2_vni} l2"),
                "    rd auto".to_owned(),
                "    route-target import auto".to_owned(),
                "    route-target export auto".to_owned(),
            ]),
        }
    }
}

/// The fixed-order provisioning steps for one tenant.
pub fn provision_steps(spec: &TenantSpec) -> Vec<ProvisionStep> {
    vec![
        ProvisionStep::AccessVlan {
            vlan: spec.vlan_id.clone(),
            tenant: spec.name.clone(),
            vni: spec.l2_vni.clone(),
        },
        ProvisionStep::L3VniVlan {
            vlan: spec.l3_vni_vlan.clone(),
            tenant: spec.name.clone(),
            vni: spec.l3_vni.clone(),
        },
        ProvisionStep::VrfContext {
            tenant: spec.name.clone(),
            l3_vni: spec.l3_vni.clone(),
        },
        ProvisionStep::AccessSvi {
            vlan: spec.vlan_id.clone(),
            tenant: spec.name.clone(),
            gateway: spec.gateway_ip.clone(),
        },
        ProvisionStep::L3Svi {
            vlan: spec.l3_vni_vlan.clone(),
            tenant: spec.name.clone(),
        },
        ProvisionStep::NveMembers {
            l2_vni: spec.l2_vni.clone(),
            l3_vni: spec.l3_vni.clone(),
        },
        ProvisionStep::BgpVrf {
            bgp_as: spec.bgp_as.clone(),
            tenant: spec.name.clone(),
        },
        ProvisionStep::EvpnVni {
            l2_vni: spec.l2_vni.clone(),
        },
    ]
}

// ── Decommissioning intents ─────────────────────────────────────────

/// Steps of the tenant decommissioning batch.
///
/// The base steps are fixed; the per-VLAN steps are appended for each
/// VLAN discovered on the fabric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecommissionStep {
    /// Remove the layer-3 VNI association from the NVE interface.
    DetachL3Nve { l3_vni: String },
    /// Remove the tenant VRF from the BGP AS context.
    WithdrawBgpVrf { bgp_as: String, tenant: String },
    /// Delete the L3-VNI SVI.
    DeleteL3Svi { vlan: String },
    /// Delete the L3-VNI VLAN.
    DeleteL3VniVlan { vlan: String },
    /// Delete the tenant VRF.
    DeleteVrf { tenant: String },
    /// Remove a discovered VLAN's segment membership from the NVE.
    DetachNveMember { vni: String },
    /// Remove a discovered VLAN's entry from the global EVPN table.
    RemoveEvpnVni { vni: String },
    /// Delete a discovered VLAN's SVI.
    DeleteSvi { vlan: String },
    /// Delete a discovered VLAN.
    DeleteVlan { vlan: String },
}

impl DecommissionStep {
    /// Render this intent to its CLI lines.
    pub fn render(&self) -> CommandBlock {
        match self {
            Self::DetachL3Nve { l3_vni } => CommandBlock::group([
                "interface nve1".to_owned(),
                format!("no member vni {l3_vni} associate-vrf"),
            ]),
            Self::WithdrawBgpVrf { bgp_as, tenant } => CommandBlock::group([
                format!("router bgp {bgp_as}"),
                format!("no vrf {tenant}"),
            ]),
            Self::DeleteL3Svi { vlan } => CommandBlock::single(format!("no interface Vlan{vlan}")),
            Self::DeleteL3VniVlan { vlan } => CommandBlock::single(format!("no vlan {vlan}")),
            Self::DeleteVrf { tenant } => {
                CommandBlock::single(format!("no vrf context {tenant}"))
            }
            Self::DetachNveMember { vni } => CommandBlock::group([
                "interface nve1".to_owned(),
                format!("no member vni {vni}"),
            ]),
            Self::RemoveEvpnVni { vni } => {
                CommandBlock::group(["evpn".to_owned(), format!("no vni {vni} l2")])
            }
            Self::DeleteSvi { vlan } => CommandBlock::single(format!("no interface vlan {vlan}")),
            Self::DeleteVlan { vlan } => CommandBlock::single(format!("no vlan {vlan}")),
        }
    }
}

/// The fixed base steps that tear down the tenant's routing scaffold.
pub fn decommission_base_steps(spec: &TenantSpec) -> Vec<DecommissionStep> {
    vec![
        DecommissionStep::DetachL3Nve {
            l3_vni: spec.l3_vni.clone(),
        },
        DecommissionStep::WithdrawBgpVrf {
            bgp_as: spec.bgp_as.clone(),
            tenant: spec.name.clone(),
        },
        DecommissionStep::DeleteL3Svi {
            vlan: spec.l3_vni_vlan.clone(),
        },
        DecommissionStep::DeleteL3VniVlan {
            vlan: spec.l3_vni_vlan.clone(),
        },
        DecommissionStep::DeleteVrf {
            tenant: spec.name.clone(),
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn access_vlan_renders_name_and_segment_bind() {
        let block = ProvisionStep::AccessVlan {
            vlan: "100".into(),
            tenant: "blue".into(),
            vni: "10100".into(),
        }
        .render();
        assert_eq!(
            block.commands(),
            ["vlan 100", "  name blue_VL100", "  vn-segment 10100"]
        );
    }

    #[test]
    fn vrf_context_renders_route_targets() {
        let block = ProvisionStep::VrfContext {
            tenant: "blue".into(),
            l3_vni: "20100".into(),
        }
        .render();
        assert_eq!(
            block.commands(),
            [
                "vrf context blue",
                "  vni 20100",
                "  rd auto",
                "  address-family ipv4 unicast",
                "    route-target import 20100:20100",
                "    route-target export 20100:20100",
                "    route-target both auto",
                "    route-target both auto evpn",
            ]
        );
    }

    #[test]
    fn access_svi_assumes_a_slash_24() {
        let block = ProvisionStep::AccessSvi {
            vlan: "100".into(),
            tenant: "blue".into(),
            gateway: "10.1.1.1".into(),
        }
        .render();
        assert_eq!(
            block.commands(),
            [
                " interface Vlan100",
                "  no shutdown",
                "  vrf member blue",
                "  ip address 10.1.1.1/24",
                "  fabric forwarding mode anycast-gateway",
            ]
        );
    }

    #[test]
    fn nve_members_mark_the_l3_vni_vrf_associated() {
        let block = ProvisionStep::NveMembers {
            l2_vni: "10100".into(),
            l3_vni: "20100".into(),
        }
        .render();
        assert_eq!(
            block.commands(),
            [
                "interface nve1",
                "  member vni 10100",
                "    suppress-arp",
                "    ingress-replication protocol bgp",
                "  member vni 20100 associate-vrf",
            ]
        );
    }

    #[test]
    fn withdraw_bgp_vrf_is_a_grouped_pair() {
        let block = DecommissionStep::WithdrawBgpVrf {
            bgp_as: "65001".into(),
            tenant: "blue".into(),
        }
        .render();
        assert_eq!(block.commands(), ["router bgp 65001", "no vrf blue"]);
    }

    #[test]
    fn discovered_vlan_teardown_commands() {
        assert_eq!(
            DecommissionStep::DetachNveMember { vni: "10100".into() }
                .render()
                .commands(),
            ["interface nve1", "no member vni 10100"]
        );
        assert_eq!(
            DecommissionStep::RemoveEvpnVni { vni: "10100".into() }
                .render()
                .commands(),
            ["evpn", "no vni 10100 l2"]
        );
        assert_eq!(
            DecommissionStep::DeleteSvi { vlan: "100".into() }.render().commands(),
            ["no interface vlan 100"]
        );
        assert_eq!(
            DecommissionStep::DeleteVlan { vlan: "100".into() }.render().commands(),
            ["no vlan 100"]
        );
    }
}
