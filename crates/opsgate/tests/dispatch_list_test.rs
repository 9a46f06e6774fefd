mod common;

use common::{MockProvider, acl, harness};
use opsgate::{Decision, Dispatcher};
use opsgate_core::CommandTarget;
use serde_json::json;

const ADMIN: i64 = 111;
const USER: i64 = 222;

#[tokio::test]
async fn listing_covers_every_authorized_provider() {
    let mocks = [
        MockProvider::with_servers("p1", &["web-1"]),
        MockProvider::unavailable("p2"),
        MockProvider::with_servers("p3", &["db-1", "db-2"]),
    ];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(json!({"admins": [ADMIN]}), &["p1", "p2", "p3"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let outcome = dispatcher.list(ADMIN, None).await.unwrap();

    // successes + failure markers cover exactly the authorized set, in
    // registry order, with nothing silently dropped
    let listed: Vec<&str> = outcome
        .listings
        .iter()
        .map(|l| l.provider.as_str())
        .collect();
    assert_eq!(listed, ["p1", "p3"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].provider, "p2");
    assert_eq!(outcome.total_servers(), 3);
    assert!(!outcome.is_empty());
    assert!(!outcome.all_failed());
}

#[tokio::test]
async fn non_admin_sees_only_allow_listed_servers() {
    let mocks = [MockProvider::with_servers("p1", &["web-1", "web-2", "db-1"])];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(
        json!({"users": {"222": {"p1": {"servers": ["web-1", "db-1"]}}}}),
        &["p1"],
    );
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let outcome = dispatcher.list(USER, None).await.unwrap();

    let names: Vec<&str> = outcome.listings[0]
        .servers
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, ["web-1", "db-1"]);
}

#[tokio::test]
async fn admin_sees_everything_unfiltered() {
    let mocks = [MockProvider::with_servers("p1", &["web-1", "web-2", "db-1"])];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(json!({"admins": [ADMIN]}), &["p1"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let outcome = dispatcher.list(ADMIN, None).await.unwrap();
    assert_eq!(outcome.listings[0].servers.len(), 3);
}

#[tokio::test]
async fn deny_all_grant_lists_zero_rows_without_failing() {
    let mocks = [MockProvider::with_servers("p1", &["web-1"])];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(json!({"users": {"222": {"p1": {"servers": []}}}}), &["p1"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let outcome = dispatcher.list(USER, None).await.unwrap();
    assert!(outcome.is_empty());
    assert_eq!(outcome.listings.len(), 1);
    assert!(outcome.listings[0].servers.is_empty());
}

#[tokio::test]
async fn empty_aggregate_and_all_failed_are_distinct() {
    let empty = [MockProvider::with_servers("p1", &[])];
    let (registry, credentials) = harness(&empty);
    let acl_doc = acl(json!({"admins": [ADMIN]}), &["p1"]);
    let dispatcher = Dispatcher::new(&acl_doc, &registry, &credentials);
    let outcome = dispatcher.list(ADMIN, None).await.unwrap();
    assert!(outcome.is_empty());
    assert!(!outcome.all_failed());

    let down = [MockProvider::unavailable("p1")];
    let (registry, credentials) = harness(&down);
    let dispatcher = Dispatcher::new(&acl_doc, &registry, &credentials);
    let outcome = dispatcher.list(ADMIN, None).await.unwrap();
    assert!(outcome.all_failed());
    assert!(!outcome.is_empty());
}

#[tokio::test]
async fn explicit_provider_restricts_the_listing() {
    let mocks = [
        MockProvider::with_servers("p1", &["web-1"]),
        MockProvider::with_servers("p2", &["db-1"]),
    ];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(json!({"admins": [ADMIN]}), &["p1", "p2"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let outcome = dispatcher.list(ADMIN, Some("p2")).await.unwrap();
    assert_eq!(outcome.listings.len(), 1);
    assert_eq!(outcome.listings[0].provider, "p2");
}

#[tokio::test]
async fn listing_denied_for_provider_without_grant() {
    let mocks = [
        MockProvider::with_servers("p1", &["web-1"]),
        MockProvider::with_servers("p2", &["db-1"]),
    ];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(json!({"users": {"222": {"p1": null}}}), &["p1", "p2"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let err = dispatcher.list(USER, Some("p2")).await.unwrap_err();
    assert_eq!(err.decision(), Some(Decision::DenyUnknownProvider));
}

#[tokio::test]
async fn find_and_list_share_target_parsing() {
    // pin the surface contract: a provider-prefixed argument routes the
    // same way for server-scoped commands
    let target = CommandTarget::parse("p2:db-1").unwrap();
    assert_eq!(target.provider.as_deref(), Some("p2"));
    assert_eq!(target.server, "db-1");
}
