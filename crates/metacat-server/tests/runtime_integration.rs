//! Integration tests for the service runtime.

use std::time::Duration;

use chrono::Utc;
use nng::options::protocol::pubsub::Subscribe;
use nng::options::{Options, RecvTimeout};
use nng::{Protocol, Socket};
use pretty_assertions::assert_eq;

use metacat_core::audit::MemoryChannel;
use metacat_core::model::{Dataset, Sample};
use metacat_core::{AuditError, Entity, EntityId};
use metacat_server::channel::decode_frame;
use metacat_server::{Error, Runtime, ServerConfig};

#[test]
fn start_builds_every_constraint_set() {
    let channel = MemoryChannel::new();
    let runtime = Runtime::start_with(ServerConfig::default(), &channel).unwrap();

    assert_eq!(runtime.engine().registry().len(), 4);
    assert_eq!(runtime.max_entities(), 10_000);
    assert!(runtime.publisher().is_running());

    runtime.shutdown();
    assert!(!runtime.publisher().is_running());
    assert!(channel.is_closed());
}

#[test]
fn unreachable_audit_channel_stops_start_up() {
    let channel = MemoryChannel::new();
    channel.refuse_connections();

    match Runtime::start_with(ServerConfig::default(), &channel) {
        Err(Error::Audit(AuditError::Connect { endpoint, .. })) => {
            assert_eq!(endpoint, "tcp://127.0.0.1:9100");
        }
        Err(other) => panic!("expected audit connect error, got {other:?}"),
        Ok(_) => panic!("expected start-up to fail"),
    }
}

#[test]
fn invalid_config_stops_start_up() {
    let channel = MemoryChannel::new();
    let config = ServerConfig::default().with_max_entities(0);

    assert!(matches!(
        Runtime::start_with(config, &channel),
        Err(Error::Config(_))
    ));
}

#[test]
fn create_request_is_validated_and_audited() {
    let channel = MemoryChannel::new();
    let runtime = Runtime::start_with(ServerConfig::default(), &channel).unwrap();

    let start = Utc::now();
    let mut sample = Sample::new(EntityId(2), "quartz");
    sample.base.stamp_created("root", start).unwrap();
    runtime.engine().validate(&sample).unwrap();
    sample.base.assign_id(EntityId(42)).unwrap();
    runtime
        .publisher()
        .publish("create", "10.0.0.5", &sample.describe(), start);

    let events = channel.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].operation, "create");
    assert_eq!(events[0].payload, "Sample:42");
}

#[test]
fn cascade_uses_configured_ceiling() {
    let channel = MemoryChannel::new();
    let runtime =
        Runtime::start_with(ServerConfig::default().with_max_entities(100), &channel).unwrap();

    let mut dataset = Dataset::new(EntityId(1), "run");
    let mut guard = runtime.quota_guard();
    guard.count(99).unwrap();
    assert_eq!(guard.finish(&mut dataset).unwrap(), 100);

    let mut guard = runtime.quota_guard();
    assert!(guard.count(100).is_err());
}

#[test]
fn events_reach_nng_subscribers() {
    let endpoint = "inproc://metacat-runtime-audit";
    let config = ServerConfig::new(endpoint).with_audit_topic("catalog/log");
    let runtime = Runtime::start(config).unwrap();

    let subscriber = Socket::new(Protocol::Sub0).unwrap();
    subscriber
        .set_opt::<Subscribe>(b"catalog/log".to_vec())
        .unwrap();
    subscriber
        .set_opt::<RecvTimeout>(Some(Duration::from_millis(100)))
        .unwrap();
    subscriber.dial(endpoint).unwrap();

    // PUB drops messages until the subscription has propagated.
    let mut received = None;
    for _ in 0..50 {
        runtime
            .publisher()
            .publish("delete", "10.0.0.9", "Datafile:7", Utc::now());
        if let Ok(msg) = subscriber.recv() {
            received = Some(msg);
            break;
        }
    }

    let msg = received.expect("subscriber never received an audit event");
    let event = decode_frame("catalog/log", &msg).unwrap().unwrap();
    assert_eq!(event.operation, "delete");
    assert_eq!(event.origin, "10.0.0.9");
    assert_eq!(event.payload, "Datafile:7");

    runtime.shutdown();
}
