//! Plan assembly: ordered command blocks plus a transmission mode.
//!
//! The provisioner ships its entire batch in one request per device;
//! the decommissioner ships one request per block. Both are built
//! here from the typed intents in [`crate::intent`].

use tracing::warn;

use crate::discovery::Discovery;
use crate::intent::{
    CommandBlock, DecommissionStep, ProvisionStep, decommission_base_steps, provision_steps,
};
use crate::tenant::TenantSpec;

/// How a plan's blocks map onto requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Batching {
    /// Flatten every block into a single request per device. Order is
    /// significant: later commands depend on objects created earlier
    /// in the same request.
    SingleShot,
    /// One request per block, in order.
    PerBlock,
}

/// An ordered command batch ready for transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub blocks: Vec<CommandBlock>,
    pub batching: Batching,
}

impl Plan {
    /// All commands in transmission order, ignoring block boundaries.
    pub fn flattened(&self) -> Vec<String> {
        self.blocks
            .iter()
            .flat_map(|block| block.commands().iter().cloned())
            .collect()
    }

    /// The request bodies this plan produces for one device.
    pub fn requests(&self) -> Vec<Vec<String>> {
        match self.batching {
            Batching::SingleShot => vec![self.flattened()],
            Batching::PerBlock => self
                .blocks
                .iter()
                .map(|block| block.commands().to_vec())
                .collect(),
        }
    }

    /// Total command count across all blocks.
    pub fn command_count(&self) -> usize {
        self.blocks.iter().map(CommandBlock::len).sum()
    }
}

/// Build the fixed-order provisioning batch for one tenant.
///
/// The same plan is applied, unmodified, to every device in the run.
pub fn provision_plan(spec: &TenantSpec) -> Plan {
    Plan {
        blocks: provision_steps(spec).iter().map(ProvisionStep::render).collect(),
        batching: Batching::SingleShot,
    }
}

/// Build the decommissioning batch: the fixed base teardown, then the
/// per-VLAN teardown for every VLAN discovered on the fabric.
///
/// A discovered VLAN with no VXLAN segment mapping has nothing to
/// detach from the NVE or the EVPN table; its SVI and the VLAN itself
/// are still removed.
pub fn decommission_plan(spec: &TenantSpec, discovery: &Discovery) -> Plan {
    let mut blocks: Vec<CommandBlock> = decommission_base_steps(spec)
        .iter()
        .map(DecommissionStep::render)
        .collect();

    for vlan in &discovery.vlans {
        match discovery.vlan_to_vni.get(vlan) {
            Some(vni) => {
                blocks.push(DecommissionStep::DetachNveMember { vni: vni.clone() }.render());
                blocks.push(DecommissionStep::RemoveEvpnVni { vni: vni.clone() }.render());
            }
            None => {
                warn!(%vlan, "no VXLAN segment mapping discovered; skipping NVE and EVPN removal");
            }
        }
        blocks.push(DecommissionStep::DeleteSvi { vlan: vlan.clone() }.render());
        blocks.push(DecommissionStep::DeleteVlan { vlan: vlan.clone() }.render());
    }

    Plan {
        blocks,
        batching: Batching::PerBlock,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn spec() -> TenantSpec {
        TenantSpec {
            name: "blue".into(),
            vlan_id: "100".into(),
            l2_vni: "10100".into(),
            l3_vni_vlan: "200".into(),
            l3_vni: "20100".into(),
            gateway_ip: "10.1.1.1".into(),
            bgp_as: "65001".into(),
        }
    }

    #[test]
    fn provision_plan_is_37_commands_single_shot() {
        let plan = provision_plan(&spec());
        assert_eq!(plan.command_count(), 37);
        assert_eq!(plan.batching, Batching::SingleShot);
        assert_eq!(plan.requests().len(), 1);
        assert_eq!(plan.requests()[0].len(), 37);
    }

    #[test]
    fn provision_plan_order_is_fixed() {
        let flat = provision_plan(&spec()).flattened();
        assert_eq!(flat[0], "vlan 100");
        assert_eq!(flat[6], "vrf context blue");
        assert_eq!(flat[14], " interface Vlan100");
        assert_eq!(flat[17], "  ip address 10.1.1.1/24");
        assert_eq!(flat[23], "interface nve1");
        assert_eq!(flat[28], "router bgp 65001");
        assert_eq!(flat[32], "evpn");
        assert_eq!(flat[36], "    route-target export auto");
    }

    #[test]
    fn provision_templates_are_invariant_across_tenants() {
        let other = TenantSpec {
            name: "green".into(),
            vlan_id: "300".into(),
            l2_vni: "10300".into(),
            l3_vni_vlan: "400".into(),
            l3_vni: "20300".into(),
            gateway_ip: "10.3.3.1".into(),
            bgp_as: "65002".into(),
        };
        let a = provision_plan(&spec()).flattened();
        let b = provision_plan(&other).flattened();
        assert_eq!(a.len(), b.len());
        // Substituting one tenant's values into the other's batch must
        // reproduce it exactly: only embedded values differ.
        let substituted: Vec<String> = b
            .iter()
            .map(|cmd| {
                cmd.replace("green", "blue")
                    .replace("10300", "10100")
                    .replace("20300", "20100")
                    .replace("300", "100")
                    .replace("400", "200")
                    .replace("10.3.3.1", "10.1.1.1")
                    .replace("65002", "65001")
            })
            .collect();
        assert_eq!(a, substituted);
    }

    #[test]
    fn decommission_base_is_five_blocks_per_block_batched() {
        let plan = decommission_plan(&spec(), &Discovery::default());
        assert_eq!(plan.blocks.len(), 5);
        assert_eq!(plan.batching, Batching::PerBlock);
        assert_eq!(plan.requests().len(), 5);

        let requests = plan.requests();
        assert_eq!(
            requests[0],
            ["interface nve1", "no member vni 20100 associate-vrf"]
        );
        assert_eq!(requests[1], ["router bgp 65001", "no vrf blue"]);
        assert_eq!(requests[2], ["no interface Vlan200"]);
        assert_eq!(requests[3], ["no vlan 200"]);
        assert_eq!(requests[4], ["no vrf context blue"]);
    }

    #[test]
    fn decommission_appends_four_blocks_per_mapped_vlan() {
        let mut discovery = Discovery::default();
        discovery.vlans.insert("100".into());
        discovery.vlan_to_vni.insert("100".into(), "10100".into());

        let plan = decommission_plan(&spec(), &discovery);
        assert_eq!(plan.blocks.len(), 9);

        let requests = plan.requests();
        assert_eq!(requests[5], ["interface nve1", "no member vni 10100"]);
        assert_eq!(requests[6], ["evpn", "no vni 10100 l2"]);
        assert_eq!(requests[7], ["no interface vlan 100"]);
        assert_eq!(requests[8], ["no vlan 100"]);
    }

    #[test]
    fn unmapped_vlan_still_loses_svi_and_vlan() {
        let mut discovery = Discovery::default();
        discovery.vlans.insert("100".into());

        let plan = decommission_plan(&spec(), &discovery);
        assert_eq!(plan.blocks.len(), 7);

        let requests = plan.requests();
        assert_eq!(requests[5], ["no interface vlan 100"]);
        assert_eq!(requests[6], ["no vlan 100"]);
    }

    #[test]
    fn discovered_vlans_are_processed_in_deterministic_order() {
        let mut discovery = Discovery::default();
        for (vlan, vni) in [("120", "10120"), ("110", "10110")] {
            discovery.vlans.insert(vlan.into());
            discovery.vlan_to_vni.insert(vlan.into(), vni.into());
        }

        let flat = decommission_plan(&spec(), &discovery).flattened();
        let pos_110 = flat.iter().position(|c| c == "no vlan 110").unwrap();
        let pos_120 = flat.iter().position(|c| c == "no vlan 120").unwrap();
        assert!(pos_110 < pos_120);
    }
}
