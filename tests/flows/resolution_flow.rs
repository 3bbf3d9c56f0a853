mod common;

use common::{document, first_a, read_document, Stack, Upstream};
use dnsm_application::use_cases::ReloadRecordsUseCase;
use dnsm_domain::{Domain, Record, RecordType as LocalType};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{RData, RecordType};
use std::net::Ipv4Addr;

const DOMAINS: &str = r#"[[domains]]
name = "home.test"

[[domains.records]]
name = "nas.home.test"
type = "A"
value = "192.168.1.10"
ttl = 120

[[domains.records]]
name = "*.home.test"
type = "A"
value = "192.168.1.1"
ttl = 60

[[domains.records]]
name = "media.home.test"
type = "CNAME"
value = "nas.home.test"
"#;

#[tokio::test]
async fn test_local_records_are_answered_without_upstream() {
    let upstream = Upstream::answering(Ipv4Addr::new(1, 1, 1, 1)).await;
    let stack = Stack::start(&document(&[upstream.upstream()], DOMAINS)).await;

    let reply = stack.query(1, "NAS.home.test.", RecordType::A).await;
    assert_eq!(reply.id(), 1);
    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert_eq!(first_a(&reply), Some(Ipv4Addr::new(192, 168, 1, 10)));
    assert_eq!(reply.answers()[0].ttl(), 120);

    let reply = stack.query(2, "printer.home.test.", RecordType::A).await;
    assert_eq!(first_a(&reply), Some(Ipv4Addr::new(192, 168, 1, 1)));

    let reply = stack.query(3, "media.home.test.", RecordType::CNAME).await;
    match reply.answers()[0].data() {
        RData::CNAME(target) => assert_eq!(target.0.to_utf8(), "nas.home.test."),
        other => panic!("unexpected rdata {:?}", other),
    }

    let reply = stack.query(4, "nas.home.test.", RecordType::TXT).await;
    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert!(reply.answers().is_empty());

    assert_eq!(upstream.received(), 0);
    stack.engine.stop().await;
}

#[tokio::test]
async fn test_unconfigured_names_are_forwarded() {
    let upstream = Upstream::answering(Ipv4Addr::new(93, 184, 216, 34)).await;
    let stack = Stack::start(&document(&[upstream.upstream()], DOMAINS)).await;

    let reply = stack.query(77, "example.com.", RecordType::A).await;
    assert_eq!(reply.id(), 77);
    assert_eq!(first_a(&reply), Some(Ipv4Addr::new(93, 184, 216, 34)));

    let reply = stack.query(78, "example.com.", RecordType::MX).await;
    assert_eq!(reply.response_code(), ResponseCode::NXDomain);

    assert_eq!(upstream.received(), 2);
    stack.engine.stop().await;
}

#[tokio::test]
async fn test_mutations_are_served_and_persisted() {
    let upstream = Upstream::answering(Ipv4Addr::new(1, 1, 1, 1)).await;
    let stack = Stack::start(&document(&[upstream.upstream()], DOMAINS)).await;

    stack
        .store
        .add_or_update_domain(Domain::new(
            "lab.test",
            vec![Record::new("db.lab.test", LocalType::A, "10.20.0.5", 30)],
        ))
        .await
        .unwrap();

    let reply = stack.query(5, "db.lab.test.", RecordType::A).await;
    assert_eq!(first_a(&reply), Some(Ipv4Addr::new(10, 20, 0, 5)));

    stack.store.delete_domain("lab.test").await.unwrap();
    let reply = stack.query(6, "db.lab.test.", RecordType::A).await;
    assert_eq!(first_a(&reply), Some(Ipv4Addr::new(1, 1, 1, 1)));

    let written = read_document(&stack.path);
    assert!(written.contains("[login]\nusername = \"admin\""));
    assert!(!written.contains("lab.test"));
    assert!(written.contains("nas.home.test"));
    stack.engine.stop().await;
}

#[tokio::test]
async fn test_reload_picks_up_external_edits() {
    let upstream = Upstream::answering(Ipv4Addr::new(1, 1, 1, 1)).await;
    let stack = Stack::start(&document(&[upstream.upstream()], DOMAINS)).await;
    let reload = ReloadRecordsUseCase::new(stack.store.clone());

    let edited = document(
        &[upstream.upstream()],
        "[[domains]]\nname = \"home.test\"\n\n[[domains.records]]\nname = \"nas.home.test\"\ntype = \"A\"\nvalue = \"192.168.1.99\"\n",
    );
    std::fs::write(&stack.path, edited).unwrap();

    let before = stack.store.snapshot().await.version();
    let snapshot = reload.execute().await.unwrap();
    assert!(snapshot.version() > before);

    let reply = stack.query(7, "nas.home.test.", RecordType::A).await;
    assert_eq!(first_a(&reply), Some(Ipv4Addr::new(192, 168, 1, 99)));

    // The wildcard went away with the edit.
    let reply = stack.query(8, "printer.home.test.", RecordType::A).await;
    assert!(reply.answers().is_empty());

    std::fs::write(&stack.path, "not [ toml").unwrap();
    assert!(reload.execute().await.is_err());
    let reply = stack.query(9, "nas.home.test.", RecordType::A).await;
    assert_eq!(first_a(&reply), Some(Ipv4Addr::new(192, 168, 1, 99)));

    stack.engine.stop().await;
}
