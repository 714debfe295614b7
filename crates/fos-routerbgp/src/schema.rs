//! Field descriptor tables for the `router bgp` object.
//!
//! Prefixes the API returns as `[address, mask]` are ordered lists.
//! References to other objects (route maps, prefix lists, interfaces,
//! route targets) are sets.

use fos_objmap::{FieldDescriptor as F, ObjectSchema};

/// Object name, also the singleton resource identifier.
pub const ROUTER_BGP: &str = "RouterBgp";

/// API path below the device/VDOM scope.
pub const ROUTER_BGP_PATH: &str = "router/bgp";

/// The `router bgp` object.
pub const ROUTER_BGP_SCHEMA: ObjectSchema = ObjectSchema {
    name: ROUTER_BGP,
    path: ROUTER_BGP_PATH,
    fields: ROUTER_BGP_FIELDS,
};

/// Top-level fields.
pub const ROUTER_BGP_FIELDS: &[F] = &[
    F::string("additional_path"),
    F::int("additional_path_select"),
    F::int("additional_path_select6"),
    F::int("additional_path_select_vpnv4"),
    F::string("additional_path_vpnv4"),
    F::string("additional_path6"),
    F::block("admin_distance", ADMIN_DISTANCE),
    F::block("aggregate_address", AGGREGATE_ADDRESS),
    F::block("aggregate_address6", AGGREGATE_ADDRESS6),
    F::string("always_compare_med"),
    F::int("as"),
    F::string("bestpath_as_path_ignore"),
    F::string("bestpath_cmp_confed_aspath"),
    F::string("bestpath_cmp_routerid"),
    F::string("bestpath_med_confed"),
    F::string("bestpath_med_missing_as_worst"),
    F::string("client_to_client_reflection"),
    F::string("cluster_id"),
    F::int("confederation_identifier"),
    F::block("confederation_peers", CONFEDERATION_PEERS),
    F::string("cross_family_conditional_adv"),
    F::string("dampening"),
    F::int("dampening_max_suppress_time"),
    F::int("dampening_reachability_half_life"),
    F::int("dampening_reuse"),
    F::set("dampening_route_map"),
    F::int("dampening_suppress"),
    F::int("dampening_unreachability_half_life"),
    F::int("default_local_preference"),
    F::string("deterministic_med"),
    F::int("distance_external"),
    F::int("distance_internal"),
    F::int("distance_local"),
    F::string("ebgp_multipath"),
    F::string("enforce_first_as"),
    F::string("fast_external_failover"),
    F::string("graceful_end_on_timer"),
    F::string("graceful_restart"),
    F::int("graceful_restart_time"),
    F::int("graceful_stalepath_time"),
    F::int("graceful_update_delay"),
    F::int("holdtime_timer"),
    F::string("ibgp_multipath"),
    F::string("ignore_optional_capability"),
    F::int("keepalive_timer"),
    F::string("log_neighbour_changes"),
    F::string("multipath_recursive_distance"),
    F::block("neighbor", NEIGHBOR),
    F::block("neighbor_group", NEIGHBOR_GROUP),
    F::block("neighbor_range", NEIGHBOR_RANGE),
    F::block("neighbor_range6", NEIGHBOR_RANGE6),
    F::block("network", NETWORK),
    F::string("network_import_check"),
    F::block("network6", NETWORK6),
    F::string("recursive_inherit_priority"),
    F::string("recursive_next_hop"),
    F::block("redistribute", REDISTRIBUTE),
    F::block("redistribute6", REDISTRIBUTE),
    F::string("router_id"),
    F::int("scan_time"),
    F::string("synchronization"),
    F::string("tag_resolve_mode"),
    F::block("vrf", VRF),
    F::block("vrf_leak", VRF_LEAK),
    F::block("vrf_leak6", VRF_LEAK),
    F::block("vrf6", VRF),
];

pub const ADMIN_DISTANCE: &[F] = &[
    F::int("distance"),
    F::int("id"),
    F::list("neighbour_prefix"),
    F::set("route_list"),
];

pub const AGGREGATE_ADDRESS: &[F] = &[
    F::string("as_set"),
    F::int("id"),
    F::list("prefix"),
    F::string("summary_only"),
];

pub const AGGREGATE_ADDRESS6: &[F] = &[
    F::string("as_set"),
    F::int("id"),
    F::string("prefix6"),
    F::string("summary_only"),
];

pub const CONFEDERATION_PEERS: &[F] = &[F::string("peer")];

pub const CONDITIONAL_ADVERTISE: &[F] = &[
    F::set("advertise_routemap"),
    F::set("condition_routemap"),
    F::string("condition_type"),
];

pub const NEIGHBOR: &[F] = &[
    F::string("activate"),
    F::string("activate_evpn"),
    F::string("activate_vpnv4"),
    F::string("activate6"),
    F::string("additional_path"),
    F::string("additional_path6"),
    F::int("adv_additional_path"),
    F::int("adv_additional_path6"),
    F::int("advertisement_interval"),
    F::int("allowas_in"),
    F::string("allowas_in_enable"),
    F::string("allowas_in_enable6"),
    F::int("allowas_in6"),
    F::string("as_override"),
    F::string("as_override6"),
    F::string("attribute_unchanged"),
    F::string("attribute_unchanged6"),
    F::string("bfd"),
    F::string("capability_default_originate"),
    F::string("capability_default_originate6"),
    F::string("capability_dynamic"),
    F::string("capability_graceful_restart"),
    F::string("capability_graceful_restart6"),
    F::string("capability_orf"),
    F::string("capability_orf6"),
    F::string("capability_route_refresh"),
    F::block("conditional_advertise", CONDITIONAL_ADVERTISE),
    F::block("conditional_advertise6", CONDITIONAL_ADVERTISE),
    F::int("connect_timer"),
    F::set("default_originate_routemap"),
    F::set("default_originate_routemap6"),
    F::string("description"),
    F::set("distribute_list_in"),
    F::set("distribute_list_in6"),
    F::set("distribute_list_out"),
    F::set("distribute_list_out6"),
    F::string("dont_capability_negotiate"),
    F::string("ebgp_enforce_multihop"),
    F::int("ebgp_multihop_ttl"),
    F::set("filter_list_in"),
    F::set("filter_list_in6"),
    F::set("filter_list_out"),
    F::set("filter_list_out6"),
    F::int("holdtime_timer"),
    F::set("interface"),
    F::string("ip"),
    F::int("keep_alive_timer"),
    F::string("link_down_failover"),
    F::int("local_as"),
    F::string("local_as_no_prepend"),
    F::string("local_as_replace_as"),
    F::int("maximum_prefix"),
    F::int("maximum_prefix_threshold"),
    F::int("maximum_prefix_threshold6"),
    F::string("maximum_prefix_warning_only"),
    F::string("maximum_prefix_warning_only6"),
    F::int("maximum_prefix6"),
    F::string("next_hop_self"),
    F::string("next_hop_self_rr"),
    F::string("next_hop_self_rr6"),
    F::string("next_hop_self6"),
    F::string("override_capability"),
    F::string("passive"),
    F::string("password").sensitive(),
    F::set("prefix_list_in"),
    F::set("prefix_list_in6"),
    F::set("prefix_list_out"),
    F::set("prefix_list_out6"),
    F::int("remote_as"),
    F::string("remove_private_as"),
    F::string("remove_private_as6"),
    F::int("restart_time"),
    F::set("route_map_in"),
    F::set("route_map_in6"),
    F::set("route_map_out"),
    F::set("route_map_out6"),
    F::string("route_reflector_client"),
    F::string("route_reflector_client6"),
    F::string("route_server_client"),
    F::string("route_server_client6"),
    F::string("send_community"),
    F::string("send_community6"),
    F::string("shutdown"),
    F::string("soft_reconfiguration"),
    F::string("soft_reconfiguration6"),
    F::string("stale_route"),
    F::string("strict_capability_match"),
    F::set("unsuppress_map"),
    F::set("unsuppress_map6"),
    F::set("update_source"),
    F::int("weight"),
];

pub const NEIGHBOR_GROUP: &[F] = &[
    F::string("activate"),
    F::string("activate6"),
    F::int("advertisement_interval"),
    F::string("allowas_in_enable"),
    F::int("allowas_in"),
    F::string("as_override"),
    F::string("bfd"),
    F::string("capability_default_originate"),
    F::string("capability_dynamic"),
    F::string("capability_graceful_restart"),
    F::string("capability_route_refresh"),
    F::int("connect_timer"),
    F::string("description"),
    F::string("ebgp_enforce_multihop"),
    F::int("ebgp_multihop_ttl"),
    F::int("holdtime_timer"),
    F::set("interface"),
    F::int("keep_alive_timer"),
    F::string("link_down_failover"),
    F::int("local_as"),
    F::int("maximum_prefix"),
    F::string("name"),
    F::string("next_hop_self"),
    F::string("passive"),
    F::string("password").sensitive(),
    F::set("prefix_list_in"),
    F::set("prefix_list_out"),
    F::int("remote_as"),
    F::set("remote_as_filter"),
    F::set("route_map_in"),
    F::set("route_map_out"),
    F::string("route_reflector_client"),
    F::string("send_community"),
    F::string("shutdown"),
    F::string("soft_reconfiguration"),
    F::set("update_source"),
    F::int("weight"),
];

pub const NEIGHBOR_RANGE: &[F] = &[
    F::int("id"),
    F::int("max_neighbor_num"),
    F::set("neighbor_group"),
    F::list("prefix"),
];

pub const NEIGHBOR_RANGE6: &[F] = &[
    F::int("id"),
    F::int("max_neighbor_num"),
    F::set("neighbor_group"),
    F::string("prefix6"),
];

pub const NETWORK: &[F] = &[
    F::string("backdoor"),
    F::int("id"),
    F::string("network_import_check"),
    F::list("prefix"),
    F::set("route_map"),
];

pub const NETWORK6: &[F] = &[
    F::string("backdoor"),
    F::int("id"),
    F::string("network_import_check"),
    F::string("prefix6"),
    F::set("route_map"),
];

pub const REDISTRIBUTE: &[F] = &[
    F::string("name"),
    F::set("route_map"),
    F::string("status"),
];

pub const LEAK_TARGET: &[F] = &[
    F::set("interface"),
    F::set("route_map"),
    F::string("vrf"),
];

pub const VRF: &[F] = &[
    F::set("export_rt"),
    F::set("import_route_map"),
    F::set("import_rt"),
    F::block("leak_target", LEAK_TARGET),
    F::string("rd"),
    F::string("role"),
    F::string("vrf"),
];

pub const VRF_LEAK: &[F] = &[
    F::block("target", LEAK_TARGET),
    F::string("vrf"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use fos_objmap::FieldKind;
    use std::collections::HashSet;

    fn assert_unique(fields: &[F], path: &str) {
        let mut seen = HashSet::new();
        for desc in fields {
            assert!(seen.insert(desc.name), "duplicate field {}.{}", path, desc.name);
            if let Some(nested) = desc.block_fields() {
                assert_unique(nested, &format!("{}.{}", path, desc.name));
            }
        }
    }

    #[test]
    fn test_field_names_unique() {
        assert_unique(ROUTER_BGP_FIELDS, "router_bgp");
    }

    #[test]
    fn test_wire_names_are_hyphenated() {
        for desc in ROUTER_BGP_FIELDS {
            assert!(!desc.wire_name().contains('_'), "{}", desc.name);
        }
        assert_eq!(ROUTER_BGP_SCHEMA.field("router_id").unwrap().wire_name(), "router-id");
    }

    #[test]
    fn test_top_level_shape() {
        let blocks = ROUTER_BGP_FIELDS
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::Block(_)))
            .count();
        assert_eq!(blocks, 17);
        assert!(ROUTER_BGP_FIELDS.len() >= 65);
    }

    #[test]
    fn test_nested_paths_resolve() {
        let desc = ROUTER_BGP_SCHEMA
            .resolve("neighbor.0.conditional_advertise.0.condition_type")
            .unwrap();
        assert_eq!(desc.kind.name(), "string");

        let desc = ROUTER_BGP_SCHEMA.resolve("vrf.2.leak_target.0.route_map").unwrap();
        assert_eq!(desc.kind.name(), "set");

        let desc = ROUTER_BGP_SCHEMA.resolve("network.0.prefix").unwrap();
        assert_eq!(desc.kind.name(), "list");

        assert!(ROUTER_BGP_SCHEMA.resolve("neighbor.0.password").unwrap().sensitive);
    }
}
