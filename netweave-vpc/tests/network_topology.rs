//! End-to-end declaration tests for the network topology component

use netweave_core::engine::{ApplySummary, BoxFuture, Engine, EngineResult};
use netweave_core::graph::ResourceGraph;
use netweave_core::scope::{OutputValue, Scope};
use netweave_vpc::schemas;
use netweave_vpc::{FlowLogId, NetworkConfig, declare_network};
use pretty_assertions::assert_eq;

fn two_zone_config() -> NetworkConfig {
    NetworkConfig::new("10.0.0.0/16", "production", "payments").with_zones(
        vec!["us-east-1a".to_string(), "us-east-1b".to_string()],
        vec!["10.0.1.0/24".to_string(), "10.0.2.0/24".to_string()],
        vec!["10.0.11.0/24".to_string(), "10.0.12.0/24".to_string()],
    )
}

#[test]
fn two_zone_scenario_declares_expected_graph() {
    let mut scope = Scope::new("main");
    let outputs = declare_network(&mut scope, &two_zone_config()).unwrap();

    let summary = scope.graph().summary();
    assert_eq!(summary.count_of("vpc"), 1);
    assert_eq!(summary.count_of("internet_gateway"), 1);
    assert_eq!(summary.count_of("subnet"), 4);
    assert_eq!(summary.count_of("route_table"), 3); // 1 public + 2 private
    assert_eq!(summary.count_of("route"), 3); // 1 public + 2 private defaults
    assert_eq!(summary.count_of("route_table_association"), 4);
    assert_eq!(summary.count_of("eip"), 2);
    assert_eq!(summary.count_of("nat_gateway"), 2);
    assert_eq!(summary.count_of("default_security_group"), 1);
    assert_eq!(summary.count_of("log_group"), 1);
    assert_eq!(summary.count_of("iam_role"), 1);
    assert_eq!(summary.count_of("iam_role_policy"), 1);
    assert_eq!(summary.count_of("flow_log"), 1);

    assert_eq!(outputs.public_subnet_ids.len(), 2);
    assert_eq!(outputs.private_subnet_ids.len(), 2);
    assert_eq!(outputs.private_route_table_ids.len(), 2);
    assert_eq!(outputs.nat_gateway_ids.len(), 2);
    assert!(outputs.flow_log_id.is_enabled());
}

#[test]
fn subnet_id_lists_follow_zone_order() {
    let mut scope = Scope::new("main");
    let outputs = declare_network(&mut scope, &two_zone_config()).unwrap();

    assert_eq!(outputs.public_subnet_ids[0].binding, "main-public-subnet-0");
    assert_eq!(outputs.public_subnet_ids[1].binding, "main-public-subnet-1");
    assert_eq!(outputs.private_subnet_ids[0].binding, "main-private-subnet-0");
    assert_eq!(outputs.private_subnet_ids[1].binding, "main-private-subnet-1");
    assert_eq!(outputs.vpc_cidr, "10.0.0.0/16");
}

#[test]
fn public_subnets_share_one_route_table() {
    let mut scope = Scope::new("main");
    declare_network(&mut scope, &two_zone_config()).unwrap();
    let graph = scope.graph();

    for i in 0..2 {
        let binding = format!("main-public-rta-{}", i);
        let deps = graph.dependencies_of(&binding);
        assert!(deps.iter().any(|e| e.target == "main-public-rt"));
        assert!(
            deps.iter()
                .any(|e| e.target == format!("main-public-subnet-{}", i))
        );
    }

    let route_deps = graph.dependencies_of("main-public-default-route");
    assert!(route_deps.iter().any(|e| e.target == "main-igw"));
}

#[test]
fn private_route_targets_same_zone_nat_gateway() {
    let mut scope = Scope::new("main");
    declare_network(&mut scope, &two_zone_config()).unwrap();
    let graph = scope.graph();

    for i in 0..2 {
        let route = format!("main-private-default-route-{}", i);
        let deps = graph.dependencies_of(&route);
        assert!(
            deps.iter()
                .any(|e| e.target == format!("main-nat-{}", i) && e.used_in == "nat_gateway_id"),
            "route {} does not target its zone's NAT gateway",
            i
        );

        // NAT gateway sits in the same zone's public subnet
        let nat = format!("main-nat-{}", i);
        let deps = graph.dependencies_of(&nat);
        assert!(
            deps.iter()
                .any(|e| e.target == format!("main-public-subnet-{}", i))
        );
        assert!(
            deps.iter()
                .any(|e| e.target == format!("main-nat-eip-{}", i))
        );

        // Private association pairs subnet and route table by index
        let rta = format!("main-private-rta-{}", i);
        let deps = graph.dependencies_of(&rta);
        assert!(
            deps.iter()
                .any(|e| e.target == format!("main-private-subnet-{}", i))
        );
        assert!(
            deps.iter()
                .any(|e| e.target == format!("main-private-rt-{}", i))
        );
    }
}

#[test]
fn nat_disabled_omits_gateways_and_default_routes() {
    let mut scope = Scope::new("main");
    let config = two_zone_config().with_nat(false);
    let outputs = declare_network(&mut scope, &config).unwrap();

    let summary = scope.graph().summary();
    assert_eq!(summary.count_of("eip"), 0);
    assert_eq!(summary.count_of("nat_gateway"), 0);
    assert_eq!(summary.count_of("route"), 1); // only the public default route
    assert_eq!(summary.count_of("route_table"), 3);

    assert!(outputs.nat_gateway_ids.is_empty());
    assert_eq!(outputs.private_route_table_ids.len(), 2);

    // The private route tables have no route pointing at them
    for i in 0..2 {
        let rt = format!("main-private-rt-{}", i);
        let dependents = scope.graph().dependents_of(&rt);
        assert!(
            dependents
                .iter()
                .all(|d| !scope.graph().get(d).is_some_and(|r| r.id.kind == "route")),
            "private route table {} unexpectedly has a default route",
            i
        );
    }
}

#[test]
fn flow_logs_disabled_yields_explicit_absence() {
    let mut scope = Scope::new("main");
    let config = two_zone_config().with_flow_logs(false);
    let outputs = declare_network(&mut scope, &config).unwrap();

    assert_eq!(outputs.flow_log_id, FlowLogId::Disabled);
    assert_eq!(scope.output("flow_log_id"), Some(&OutputValue::Absent));

    let summary = scope.graph().summary();
    assert_eq!(summary.count_of("log_group"), 0);
    assert_eq!(summary.count_of("iam_role"), 0);
    assert_eq!(summary.count_of("iam_role_policy"), 0);
    assert_eq!(summary.count_of("flow_log"), 0);
}

#[test]
fn flow_log_bundle_is_all_or_nothing() {
    let mut scope = Scope::new("main");
    declare_network(&mut scope, &two_zone_config()).unwrap();

    let summary = scope.graph().summary();
    assert_eq!(summary.count_of("log_group"), 1);
    assert_eq!(summary.count_of("iam_role"), 1);
    assert_eq!(summary.count_of("iam_role_policy"), 1);
    assert_eq!(summary.count_of("flow_log"), 1);

    let deps = scope.graph().dependencies_of("main-flow-log");
    assert!(deps.iter().any(|e| e.target == "main-vpc"));
    assert!(deps.iter().any(|e| e.target == "main-flow-log-group"));
    assert!(deps.iter().any(|e| e.target == "main-flow-log-role"));
}

#[test]
fn graph_is_acyclic_with_no_dangling_references() {
    let mut scope = Scope::new("main");
    declare_network(&mut scope, &two_zone_config()).unwrap();

    assert!(!scope.graph().has_cycle());
    assert_eq!(scope.graph().unresolved_references(), vec![]);
}

#[test]
fn declarations_satisfy_their_schemas() {
    let mut scope = Scope::new("main");
    scope.register_schemas(schemas::all_schemas());

    // Schema validation runs inside declare; success means every declared
    // resource satisfied its kind's schema
    declare_network(&mut scope, &two_zone_config()).unwrap();
    assert!(!scope.graph().is_empty());
}

#[test]
fn repeated_declaration_is_structurally_identical() {
    let config = two_zone_config();

    let mut first = Scope::new("main");
    declare_network(&mut first, &config).unwrap();
    let mut second = Scope::new("main");
    declare_network(&mut second, &config).unwrap();

    assert_eq!(first.graph(), second.graph());
    assert_eq!(first.outputs(), second.outputs());
}

#[test]
fn outputs_are_exported_through_the_scope() {
    let mut scope = Scope::new("main");
    let outputs = declare_network(&mut scope, &two_zone_config()).unwrap();

    assert_eq!(
        scope.output("vpc_id"),
        Some(&OutputValue::Ref(outputs.vpc_id.clone()))
    );
    assert_eq!(
        scope.output("public_subnet_ids"),
        Some(&OutputValue::RefList(outputs.public_subnet_ids.clone()))
    );
    assert_eq!(
        scope.output("nat_gateway_ids"),
        Some(&OutputValue::RefList(outputs.nat_gateway_ids.clone()))
    );
    assert!(scope.output("vpc_cidr").is_some());
    assert!(scope.output("internet_gateway_id").is_some());
    assert!(scope.output("private_route_table_ids").is_some());
}

#[test]
fn rendered_graph_uses_provider_type_names() {
    let mut scope = Scope::new("main");
    declare_network(&mut scope, &two_zone_config()).unwrap();

    let rendered = netweave_vpc::render::render_graph(scope.graph()).unwrap();
    let resources = rendered["resources"].as_array().unwrap();
    assert_eq!(resources.len(), scope.graph().len());

    let vpc = resources
        .iter()
        .find(|r| r["type"] == "AWS::EC2::VPC")
        .unwrap();
    assert_eq!(vpc["properties"]["CidrBlock"], "10.0.0.0/16");

    let subnet = resources
        .iter()
        .find(|r| r["name"] == "main-public-subnet-0")
        .unwrap();
    assert_eq!(
        subnet["properties"]["VpcId"]["$ref"]["binding"],
        "main-vpc"
    );
}

struct RecordingEngine;

impl Engine for RecordingEngine {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn apply(&self, graph: &ResourceGraph) -> BoxFuture<'_, EngineResult<ApplySummary>> {
        let created = graph.len();
        Box::pin(async move {
            Ok(ApplySummary {
                created,
                unchanged: 0,
            })
        })
    }
}

#[tokio::test]
async fn declared_graph_hands_off_to_an_engine() {
    let mut scope = Scope::new("main");
    declare_network(&mut scope, &two_zone_config()).unwrap();
    let (graph, _outputs) = scope.into_parts();

    let engine = RecordingEngine;
    let summary = engine.apply(&graph).await.unwrap();
    assert_eq!(summary.created, 25);
}
