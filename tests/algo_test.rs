use privgraph::algo::{try_controllers, try_path_to_high_value, try_reachable_nodes, try_shortest_path};
use privgraph::{
    is_high_value_target, BuiltinClassifier, Edge, EscalationOptions, GraphStore, PropertyMap,
};
use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Log sink shared between a test and its subscriber
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Run `f` with warnings captured; returns its result and the log text
fn with_captured_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture.contents())
}

fn props(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A small Active Directory style environment
///
/// ```text
/// JDOE -MemberOf-> HELPDESK -GenericAll-> WS01 -HasSession-> SVC_SQL
/// SVC_SQL -AdminTo-> SQL01 -HasSession-> ADMINISTRATOR
/// SVC_SQL -MemberOf-> SERVER OPS -MemberOf-> DOMAIN ADMINS
/// DOMAIN ADMINS -AdminTo-> DC01
/// HELPDESK -ForceChangePassword-> JSMITH
/// ```
fn corp() -> GraphStore {
    let mut store = GraphStore::new();
    let nodes = [
        ("S-1001", "User", "JDOE@CORP.LOCAL"),
        ("S-1002", "User", "JSMITH@CORP.LOCAL"),
        ("S-1003", "User", "SVC_SQL@CORP.LOCAL"),
        ("S-500", "User", "ADMINISTRATOR@CORP.LOCAL"),
        ("S-2001", "Group", "HELPDESK@CORP.LOCAL"),
        ("S-2002", "Group", "SERVER OPERATORS@CORP.LOCAL"),
        ("S-512", "Group", "DOMAIN ADMINS@CORP.LOCAL"),
        ("H-01", "Computer", "WS01.CORP.LOCAL"),
        ("H-02", "Computer", "SQL01.CORP.LOCAL"),
    ];
    for (id, node_type, name) in nodes {
        store.add_node(id, node_type, name).unwrap();
    }
    store
        .add_node_with_properties(
            "H-03",
            "Computer",
            "PRIMARY.CORP.LOCAL",
            props(&[("distinguishedname", "CN=PRIMARY,OU=Domain Controllers,DC=corp,DC=local")]),
        )
        .unwrap();

    store.add_edge("S-1001", "S-2001", "MemberOf");
    store.add_edge("S-2001", "H-01", "GenericAll");
    store.add_edge("H-01", "S-1003", "HasSession");
    store.add_edge("S-1003", "H-02", "AdminTo");
    store.add_edge("H-02", "S-500", "HasSession");
    store.add_edge("S-1003", "S-2002", "MemberOf");
    store.add_edge("S-2002", "S-512", "MemberOf");
    store.add_edge("S-512", "H-03", "AdminTo");
    store.add_edge("S-2001", "S-1002", "ForceChangePassword");
    store
}

#[test]
fn test_member_of_scenario() {
    init_tracing();
    let mut store = GraphStore::new();
    store.add_node("U1", "User", "EVIL@CORP").unwrap();
    store.add_node("G1", "Group", "DOMAIN ADMINS@CORP").unwrap();
    store.add_edge("U1", "G1", "MemberOf");

    assert_eq!(
        store.shortest_path("EVIL@CORP", "DOMAIN ADMINS@CORP"),
        vec!["EVIL@CORP [User]", "(MemberOf) -> DOMAIN ADMINS@CORP [Group]"]
    );
    assert_eq!(
        store.path_to_high_value("EVIL@CORP"),
        vec![Edge::new("U1", "G1", "MemberOf")]
    );
}

#[test]
fn test_unknown_name_gives_empty_results() {
    init_tracing();
    let store = corp();

    assert!(store.shortest_path("GHOST@CORP.LOCAL", "JDOE@CORP.LOCAL").is_empty());
    assert!(store.shortest_path("JDOE@CORP.LOCAL", "GHOST@CORP.LOCAL").is_empty());
    assert!(store.path_to_high_value("GHOST@CORP.LOCAL").is_empty());

    let err = try_shortest_path(&store, "JDOE@CORP.LOCAL", "GHOST@CORP.LOCAL").unwrap_err();
    assert!(err.to_string().contains("GHOST@CORP.LOCAL"));
}

#[test]
fn test_unknown_name_is_reported() {
    let store = corp();
    let source_missing = "Source node not found: GHOST@CORP.LOCAL";
    let target_missing = "Target node not found: GHOST@CORP.LOCAL";

    let (hops, log) =
        with_captured_warnings(|| store.shortest_path("GHOST@CORP.LOCAL", "JDOE@CORP.LOCAL"));
    assert!(hops.is_empty());
    assert_eq!(log.matches(source_missing).count(), 1, "{}", log);
    assert!(log.contains("WARN"));

    let (hops, log) =
        with_captured_warnings(|| store.shortest_path("JDOE@CORP.LOCAL", "GHOST@CORP.LOCAL"));
    assert!(hops.is_empty());
    assert_eq!(log.matches(target_missing).count(), 1, "{}", log);
    assert_eq!(log.matches(source_missing).count(), 0, "{}", log);

    let (nodes, log) = with_captured_warnings(|| store.reachable_nodes("GHOST@CORP.LOCAL"));
    assert!(nodes.is_empty());
    assert_eq!(log.matches(source_missing).count(), 1, "{}", log);

    let (nodes, log) = with_captured_warnings(|| store.controllers("GHOST@CORP.LOCAL"));
    assert!(nodes.is_empty());
    assert_eq!(log.matches(target_missing).count(), 1, "{}", log);

    let (edges, log) = with_captured_warnings(|| store.path_to_high_value("GHOST@CORP.LOCAL"));
    assert!(edges.is_empty());
    assert_eq!(log.matches(source_missing).count(), 1, "{}", log);
}

#[test]
fn test_empty_result_is_not_reported() {
    let store = corp();

    // JSMITH has no outgoing edges: empty answers, but both names resolve
    let (hops, log) = with_captured_warnings(|| {
        store.shortest_path("JSMITH@CORP.LOCAL", "DOMAIN ADMINS@CORP.LOCAL")
    });
    assert!(hops.is_empty());
    assert!(log.is_empty(), "{}", log);

    let (edges, log) = with_captured_warnings(|| store.path_to_high_value("JSMITH@CORP.LOCAL"));
    assert!(edges.is_empty());
    assert!(log.is_empty(), "{}", log);
}

#[test]
fn test_disconnected_nodes() {
    let mut store = GraphStore::new();
    store.add_node("A", "User", "A@CORP").unwrap();
    store.add_node("B", "User", "B@CORP").unwrap();

    assert!(store.shortest_path("A@CORP", "B@CORP").is_empty());
    assert!(store.reachable_nodes("A@CORP").is_empty());
    assert!(store.reachable_nodes("B@CORP").is_empty());
    assert!(store.controllers("A@CORP").is_empty());
}

#[test]
fn test_shortest_path_across_environment() {
    let store = corp();

    assert_eq!(
        store.shortest_path("JDOE@CORP.LOCAL", "PRIMARY.CORP.LOCAL"),
        vec![
            "JDOE@CORP.LOCAL [User]",
            "(MemberOf) -> HELPDESK@CORP.LOCAL [Group]",
            "(GenericAll) -> WS01.CORP.LOCAL [Computer]",
            "(HasSession) -> SVC_SQL@CORP.LOCAL [User]",
            "(MemberOf) -> SERVER OPERATORS@CORP.LOCAL [Group]",
            "(MemberOf) -> DOMAIN ADMINS@CORP.LOCAL [Group]",
            "(AdminTo) -> PRIMARY.CORP.LOCAL [Computer]",
        ]
    );
}

#[test]
fn test_shortest_path_hops_are_real_edges() {
    let store = corp();
    let names: Vec<String> = store.all_nodes().iter().map(|n| n.name.clone()).collect();

    for from in &names {
        for to in &names {
            let Some(path) = try_shortest_path(&store, from, to).unwrap() else {
                continue;
            };
            let mut current = path.start;
            for step in &path.steps {
                assert!(step.edge.starts_from(&current.id));
                assert!(step.edge.ends_at(&step.node.id));
                assert!(store.outgoing_edges(current.id.as_str()).contains(&step.edge));
                current = step.node;
            }
            assert_eq!(current.name, *to);
        }
    }
}

#[test]
fn test_escalation_finds_nearest_target() {
    let store = corp();

    // ADMINISTRATOR (via SQL01) and DOMAIN ADMINS are both 5 hops away;
    // AdminTo SQL01 was inserted before MemberOf SERVER OPERATORS.
    let edges = store.path_to_high_value("JDOE@CORP.LOCAL");
    assert_eq!(
        edges,
        vec![
            Edge::new("S-1001", "S-2001", "MemberOf"),
            Edge::new("S-2001", "H-01", "GenericAll"),
            Edge::new("H-01", "S-1003", "HasSession"),
            Edge::new("S-1003", "H-02", "AdminTo"),
            Edge::new("H-02", "S-500", "HasSession"),
        ]
    );

    let target = store.get_node("S-500").unwrap();
    assert!(is_high_value_target(target));
}

#[test]
fn test_escalation_path_properties() {
    let store = corp();

    for node in store.all_nodes() {
        let found = try_path_to_high_value(&store, &node.name, &BuiltinClassifier, EscalationOptions::default())
            .unwrap();
        let Some(path) = found else { continue };

        assert_ne!(path.target.id, node.id);
        assert!(is_high_value_target(path.target));
        assert_eq!(path.edges.first().unwrap().source, node.id);
        assert_eq!(path.edges.last().unwrap().target, path.target.id);

        // No high-value node is strictly closer
        for other in store.all_nodes() {
            if other.id == node.id || !is_high_value_target(other) {
                continue;
            }
            if let Some(closer) = try_shortest_path(&store, &node.name, &other.name).unwrap() {
                assert!(closer.len() >= path.len());
            }
        }
    }
}

#[test]
fn test_escalation_from_domain_admins_skips_itself() {
    let store = corp();
    assert_eq!(
        store.path_to_high_value("DOMAIN ADMINS@CORP.LOCAL"),
        vec![Edge::new("S-512", "H-03", "AdminTo")]
    );
}

#[test]
fn test_reachable_matches_controllers_mirror() {
    let store = corp();
    let nodes = store.all_nodes();

    for source in &nodes {
        let reachable: HashSet<&str> = try_reachable_nodes(&store, &source.name)
            .unwrap()
            .iter()
            .map(|n| n.id.as_str())
            .collect();

        for target in &nodes {
            let controllers: HashSet<&str> = try_controllers(&store, &target.name)
                .unwrap()
                .iter()
                .map(|n| n.id.as_str())
                .collect();
            let forward = reachable.contains(target.id.as_str());
            let backward = controllers.contains(source.id.as_str());
            assert_eq!(forward, backward, "{} -> {}", source.name, target.name);
        }
    }
}

#[test]
fn test_reachable_and_controllers_order() {
    let store = corp();

    assert_eq!(
        store.reachable_nodes("HELPDESK@CORP.LOCAL"),
        vec![
            "WS01.CORP.LOCAL [Computer]",
            "JSMITH@CORP.LOCAL [User]",
            "SVC_SQL@CORP.LOCAL [User]",
            "SQL01.CORP.LOCAL [Computer]",
            "SERVER OPERATORS@CORP.LOCAL [Group]",
            "ADMINISTRATOR@CORP.LOCAL [User]",
            "DOMAIN ADMINS@CORP.LOCAL [Group]",
            "PRIMARY.CORP.LOCAL [Computer]",
        ]
    );
    assert_eq!(
        store.controllers("DOMAIN ADMINS@CORP.LOCAL"),
        vec![
            "SERVER OPERATORS@CORP.LOCAL [Group]",
            "SVC_SQL@CORP.LOCAL [User]",
            "WS01.CORP.LOCAL [Computer]",
            "HELPDESK@CORP.LOCAL [Group]",
            "JDOE@CORP.LOCAL [User]",
        ]
    );
}

#[test]
fn test_repeated_queries_are_identical() {
    let store = corp();

    for _ in 0..3 {
        assert_eq!(
            store.reachable_nodes("JDOE@CORP.LOCAL"),
            store.reachable_nodes("JDOE@CORP.LOCAL")
        );
        assert_eq!(
            store.path_to_high_value("JDOE@CORP.LOCAL"),
            store.path_to_high_value("JDOE@CORP.LOCAL")
        );
        assert_eq!(
            store.shortest_path("JDOE@CORP.LOCAL", "SQL01.CORP.LOCAL"),
            store.shortest_path("JDOE@CORP.LOCAL", "SQL01.CORP.LOCAL")
        );
    }
}

#[test]
fn test_dangling_edges_are_ignored() {
    let mut store = corp();
    store.add_edge("S-1002", "DELETED-OBJECT", "MemberOf");
    store.add_edge("DELETED-OBJECT", "S-512", "MemberOf");

    assert!(store.shortest_path("JSMITH@CORP.LOCAL", "DOMAIN ADMINS@CORP.LOCAL").is_empty());
    assert!(store.reachable_nodes("JSMITH@CORP.LOCAL").is_empty());
    assert!(store.path_to_high_value("JSMITH@CORP.LOCAL").is_empty());
    assert_eq!(store.statistics().dangling_edge_count, 2);
}
