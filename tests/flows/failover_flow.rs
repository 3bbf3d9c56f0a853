mod common;

use common::{document, first_a, Stack, Upstream};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType;
use std::net::Ipv4Addr;

#[tokio::test]
async fn test_silent_upstream_fails_over_to_next() {
    let silent = Upstream::silent().await;
    let healthy = Upstream::answering(Ipv4Addr::new(10, 9, 8, 7)).await;
    let stack = Stack::start(&document(&[silent.upstream(), healthy.upstream()], "")).await;

    let reply = stack.query(41, "service.example.", RecordType::A).await;

    assert_eq!(reply.id(), 41);
    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert_eq!(first_a(&reply), Some(Ipv4Addr::new(10, 9, 8, 7)));
    assert_eq!(silent.received(), 1);
    assert_eq!(healthy.received(), 1);
    stack.engine.stop().await;
}

#[tokio::test]
async fn test_all_upstreams_failing_is_servfail() {
    let first = Upstream::silent().await;
    let second = Upstream::silent().await;
    let stack = Stack::start(&document(&[first.upstream(), second.upstream()], "")).await;

    let reply = stack.query(42, "service.example.", RecordType::A).await;

    assert_eq!(reply.id(), 42);
    assert_eq!(reply.response_code(), ResponseCode::ServFail);
    assert!(!reply.recursion_available());
    assert!(reply.answers().is_empty());
    assert_eq!(reply.queries().len(), 1);
    stack.engine.stop().await;
}

#[tokio::test]
async fn test_upstream_list_follows_reload() {
    let old = Upstream::answering(Ipv4Addr::new(10, 0, 0, 1)).await;
    let new = Upstream::answering(Ipv4Addr::new(10, 0, 0, 2)).await;
    let stack = Stack::start(&document(&[old.upstream()], "")).await;

    let reply = stack.query(43, "svc.example.", RecordType::A).await;
    assert_eq!(first_a(&reply), Some(Ipv4Addr::new(10, 0, 0, 1)));

    std::fs::write(&stack.path, document(&[new.upstream()], "")).unwrap();
    stack.store.load().await.unwrap();

    let reply = stack.query(44, "svc.example.", RecordType::A).await;
    assert_eq!(first_a(&reply), Some(Ipv4Addr::new(10, 0, 0, 2)));
    assert_eq!(old.received(), 1);
    stack.engine.stop().await;
}
