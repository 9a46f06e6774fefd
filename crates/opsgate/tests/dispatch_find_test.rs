mod common;

use common::{MockProvider, acl, harness};
use opsgate::{Decision, Dispatcher, DispatchError, FindOutcome};
use opsgate_core::CommandTarget;
use serde_json::json;

const ADMIN: i64 = 111;
const USER: i64 = 222;

fn admin_only_acl() -> serde_json::Value {
    json!({"admins": [ADMIN]})
}

#[tokio::test]
async fn first_success_wins_and_failure_is_recorded() {
    let mocks = [
        MockProvider::unavailable("p1"),
        MockProvider::with_servers("p2", &["web-1"]),
    ];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(admin_only_acl(), &["p1", "p2"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let outcome = dispatcher
        .find(ADMIN, &CommandTarget::server("web-1"))
        .await
        .unwrap();

    match outcome {
        FindOutcome::Found {
            provider,
            server,
            failures,
        } => {
            assert_eq!(provider, "p2");
            assert_eq!(server.name, "web-1");
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].provider, "p1");
        }
        other => panic!("expected Found, got {other:?}"),
    }
}

#[tokio::test]
async fn not_found_everywhere_is_clean_not_found() {
    let mocks = [
        MockProvider::with_servers("p1", &["other"]),
        MockProvider::with_servers("p2", &[]),
    ];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(admin_only_acl(), &["p1", "p2"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let outcome = dispatcher
        .find(ADMIN, &CommandTarget::server("web-1"))
        .await
        .unwrap();

    match outcome {
        FindOutcome::NotFound { searched } => assert_eq!(searched, ["p1", "p2"]),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn failures_without_a_match_surface_as_unavailable() {
    let mocks = [
        MockProvider::unavailable("p1"),
        MockProvider::with_servers("p2", &[]),
    ];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(admin_only_acl(), &["p1", "p2"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let outcome = dispatcher
        .find(ADMIN, &CommandTarget::server("web-1"))
        .await
        .unwrap();

    match outcome {
        FindOutcome::Unavailable { searched, failures } => {
            assert_eq!(searched, ["p1", "p2"]);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].provider, "p1");
        }
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn explicit_provider_narrows_the_search() {
    let mocks = [
        MockProvider::with_servers("p1", &["web-1"]),
        MockProvider::with_servers("p2", &["web-1"]),
    ];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(admin_only_acl(), &["p1", "p2"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let outcome = dispatcher
        .find(ADMIN, &CommandTarget::on_provider("p2", "web-1"))
        .await
        .unwrap();

    match outcome {
        FindOutcome::Found { provider, .. } => assert_eq!(provider, "p2"),
        other => panic!("expected Found, got {other:?}"),
    }
}

#[tokio::test]
async fn grants_restrict_auto_detection() {
    let mocks = [
        MockProvider::with_servers("p1", &["web-1"]),
        MockProvider::with_servers("p2", &["web-1"]),
    ];
    let (registry, credentials) = harness(&mocks);
    // USER may only see p2
    let acl = acl(
        json!({"admins": [ADMIN], "users": {"222": {"p2": null}}}),
        &["p1", "p2"],
    );
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let outcome = dispatcher
        .find(USER, &CommandTarget::server("web-1"))
        .await
        .unwrap();

    match outcome {
        FindOutcome::Found { provider, .. } => assert_eq!(provider, "p2"),
        other => panic!("expected Found, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_user_is_denied_before_any_provider_call() {
    let mocks = [MockProvider::with_servers("p1", &["web-1"])];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(admin_only_acl(), &["p1"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let err = dispatcher
        .find(USER, &CommandTarget::server("web-1"))
        .await
        .unwrap_err();

    assert_eq!(err.decision(), Some(Decision::DenyUnknownUser));
    assert_eq!(mocks[0].finds(), 0);
}

#[tokio::test]
async fn explicit_unknown_provider_enumerates_supported_ones() {
    let mocks = [MockProvider::with_servers("p1", &["web-1"])];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(admin_only_acl(), &["p1"]);
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let err = dispatcher
        .find(ADMIN, &CommandTarget::on_provider("linode", "web-1"))
        .await
        .unwrap_err();

    match err {
        DispatchError::UnknownProvider { id, known } => {
            assert_eq!(id, "linode");
            assert_eq!(known, "p1");
        }
        other => panic!("expected UnknownProvider, got {other:?}"),
    }
}

#[tokio::test]
async fn denied_server_outside_allow_list() {
    let mocks = [MockProvider::with_servers("p1", &["web-1", "db-1"])];
    let (registry, credentials) = harness(&mocks);
    let acl = acl(
        json!({"users": {"222": {"p1": {"servers": ["web-1"]}}}}),
        &["p1"],
    );
    let dispatcher = Dispatcher::new(&acl, &registry, &credentials);

    let err = dispatcher
        .find(USER, &CommandTarget::on_provider("p1", "db-1"))
        .await
        .unwrap_err();

    assert_eq!(err.decision(), Some(Decision::DenyServer));
}
