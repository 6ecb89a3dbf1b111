// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Configuration file deployment tests

use hdds_jms::{
    AttributeValue, DestinationService, DestinationsConfig, InMemoryContext, NamingContext,
};
use std::sync::Arc;

const CONFIG: &str = r#"
domain = "acme.jms"

[[destinations]]
name = "OrderEvents"
type = "Topic"
jndi_name = "jms/OrderEvents"
data_writer_qos = "reliability.kind=reliable;history.depth=10"

[[destinations]]
name = "PriceTicks"
jndi_name = "jms/PriceTicks"
data_reader_qos = "time_based_filter.minimum_separation=100ms"
topic_qos = "durability.kind=transient_local"
"#;

#[test]
fn test_deploy_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("destinations.toml");
    std::fs::write(&path, CONFIG).unwrap();

    let config = DestinationsConfig::from_file(&path).unwrap();
    let ctx = Arc::new(InMemoryContext::new());
    let mut service = DestinationService::new(config.domain.clone(), ctx.clone());

    let names = service.deploy(&config).unwrap();
    let rendered: Vec<_> = names.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "acme.jms:destination=OrderEvents,type=Topic",
            "acme.jms:destination=PriceTicks,type=Topic",
        ]
    );

    service.start_all().unwrap();
    assert_eq!(
        ctx.list(),
        vec!["jms/OrderEvents".to_string(), "jms/PriceTicks".to_string()]
    );
    assert_eq!(
        service
            .registry()
            .get_attribute(&names[1], "TopicQosPolicy")
            .unwrap(),
        AttributeValue::from("durability.kind=transient_local")
    );

    assert!(service.stop_all().is_empty());
    assert!(ctx.is_empty());
}

#[test]
fn test_queue_destination_rejected_at_deploy() {
    let config = DestinationsConfig::from_toml(
        r#"
[[destinations]]
name = "Jobs"
type = "Queue"
jndi_name = "jms/Jobs"
"#,
    )
    .unwrap();

    let mut service = DestinationService::new("hdds.jms", Arc::new(InMemoryContext::new()));
    let err = service.deploy(&config).unwrap_err();
    assert!(err.to_string().contains("Jobs"));
    assert!(service.deployed().is_empty());
}

#[test]
fn test_empty_jndi_name_rejected_at_deploy() {
    let config = DestinationsConfig::from_toml(
        r#"
[[destinations]]
name = "Orders"
jndi_name = ""
"#,
    )
    .unwrap();

    let mut service = DestinationService::new("hdds.jms", Arc::new(InMemoryContext::new()));
    assert!(service.deploy(&config).is_err());
}
