use super::*;

fn node(name: &str, sizes: &[i64]) -> NodeSnapshot {
    NodeSnapshot::new(name).with_images(sizes.iter().copied().map(ImageRecord::new))
}

#[test]
fn empty_image_list_has_no_storage() {
    assert_eq!(node("n1", &[]).image_storage(), 0);
}

#[test]
fn duplicate_images_are_counted_independently() {
    let node = NodeSnapshot::new("n1").with_images([
        ImageRecord::named("registry.k8s.io/pause:3.9", 300),
        ImageRecord::named("registry.k8s.io/pause:3.9", 300),
        ImageRecord::new(400),
    ]);
    assert_eq!(node.image_storage(), 1000);
}

#[test]
fn first_observation_is_changed_even_when_empty() {
    let mut accountant = StorageAccountant::new();
    let observation = accountant.observe(&node("n1", &[]));
    assert!(observation.changed);
    assert_eq!(observation.previous, 0);
    assert_eq!(observation.aggregate, 0);
    assert_eq!(accountant.baseline().get("n1"), Some(0));
}

#[test]
fn observation_sequence() {
    let mut accountant = StorageAccountant::new();

    let first = accountant.observe(&node("n1", &[500, 500]));
    assert_eq!(
        first,
        Observation {
            node: "n1".to_string(),
            aggregate: 1000,
            previous: 0,
            changed: true,
        }
    );

    let second = accountant.observe(&node("n1", &[500, 500]));
    assert!(!second.changed);
    assert_eq!(second.previous, 1000);
    assert_eq!(second.aggregate, 1000);

    let third = accountant.observe(&node("n1", &[500, 500, 700]));
    assert!(third.changed);
    assert_eq!(third.previous, 1000);
    assert_eq!(third.aggregate, 1700);
}

#[test]
fn baseline_tracks_latest_aggregate_per_node() {
    let mut accountant = StorageAccountant::new();
    accountant.observe(&node("n1", &[100]));
    accountant.observe(&node("n2", &[200, 300]));
    accountant.observe(&node("n1", &[100]));
    accountant.observe(&node("n1", &[50]));

    let baseline = accountant.baseline();
    assert_eq!(baseline.len(), 2);
    assert_eq!(baseline.get("n1"), Some(50));
    assert_eq!(baseline.get("n2"), Some(500));
    assert!(!baseline.contains("n3"));
}

#[test]
fn shrinking_storage_is_a_change() {
    let mut accountant = StorageAccountant::new();
    accountant.observe(&node("n1", &[700, 300]));
    let observation = accountant.observe(&node("n1", &[]));
    assert!(observation.changed);
    assert_eq!(observation.previous, 1000);
    assert_eq!(observation.aggregate, 0);
}

#[test]
fn annotate_carries_resource_version() {
    let mut node = node("n1", &[]).with_resource_version("42");
    let mutation = node.annotate(CHECKED_ANNOTATION, CHECKED_VALUE);
    assert_eq!(node.annotation("checked"), Some("true"));
    assert_eq!(mutation.node, "n1");
    assert_eq!(mutation.resource_version.as_deref(), Some("42"));
    assert_eq!(mutation.to_string(), "n1: checked=true");
}

#[test]
fn conflict_error_names_the_node() {
    let mut node = NodeSnapshot::new("n1").with_resource_version("7");
    let err = NodeApiError::conflict(&node.annotate("checked", "true"));
    assert!(err.is_conflict());
    assert!(err.to_string().contains("n1"));
    assert!(!NodeApiError::Timeout(Duration::from_secs(1)).is_conflict());
}

#[test]
fn default_selector() {
    let selector: FieldSelector = DEFAULT_FIELD_SELECTOR.parse().unwrap();
    assert_eq!(selector, FieldSelector::node_name("minikube"));
    assert_eq!(selector.to_string(), "metadata.name=minikube");
}

#[test]
fn selector_parsing() {
    assert!("".parse::<FieldSelector>().unwrap().is_empty());
    assert_eq!(
        "metadata.name==worker-1".parse::<FieldSelector>().unwrap(),
        FieldSelector::node_name("worker-1")
    );

    let selector: FieldSelector = "metadata.name=a, spec.unschedulable=false"
        .parse()
        .unwrap();
    assert_eq!(selector.terms().count(), 2);
    assert_eq!(
        selector.to_string(),
        "metadata.name=a,spec.unschedulable=false"
    );

    assert_eq!(
        "metadata.name".parse::<FieldSelector>(),
        Err(SelectorError::Malformed("metadata.name".to_string()))
    );
    assert_eq!(
        "metadata.name!=a".parse::<FieldSelector>(),
        Err(SelectorError::UnsupportedOperator(
            "metadata.name!=a".to_string()
        ))
    );
    assert!("=a".parse::<FieldSelector>().is_err());
}

#[test]
fn selector_matches_by_name() {
    let selector = FieldSelector::node_name("n1");
    assert!(selector.matches(&NodeSnapshot::new("n1")));
    assert!(!selector.matches(&NodeSnapshot::new("n2")));
    assert!(FieldSelector::all().matches(&NodeSnapshot::new("n2")));

    let unknown: FieldSelector = "spec.unschedulable=true".parse().unwrap();
    assert!(!unknown.matches(&NodeSnapshot::new("n1")));
}
