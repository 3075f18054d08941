//! Integration tests for the personal storages service.

mod common;

use serde_json::json;

use common::{SECRET_PREFIX, leaf, sftp_config, user_fixture};
use mounthub_core::events::HookSignal;
use mounthub_core::traits::store::ConfigScope;
use mounthub_core::types::{MountTree, MountType};
use mounthub_service::StoragesService;

#[tokio::test]
async fn test_personal_round_trip_clears_applicable_users() {
    let fx = user_fixture("alice");

    let stored = fx.service.add_storage(sftp_config("docs")).await.unwrap();
    assert_eq!(stored.id, Some(1));

    let tree = fx.store.snapshot(&ConfigScope::personal("alice")).await;
    let user_bucket = tree.bucket(MountType::User).unwrap();
    assert!(user_bucket["alice"].contains_key("/alice/files/docs"));
    let entry = &user_bucket["alice"]["/alice/files/docs"];
    assert_eq!(entry.options["password"], json!(format!("{SECRET_PREFIX}secret")));

    let read_back = fx.service.get_storage(1).await.unwrap();
    assert_eq!(read_back.mount_point, "/docs");
    assert!(read_back.applicable_users.is_empty());
    assert_eq!(read_back.backend_options["password"], json!("secret"));
}

#[tokio::test]
async fn test_read_is_scoped_to_the_acting_user() {
    let fx = user_fixture("alice");

    // A document that also carries another principal's leaf, as a
    // corrupted or hand-edited personal document might.
    let mut tree = MountTree::new();
    tree.insert(MountType::User, "alice", "/alice/files/own", leaf(1, "sftp"));
    tree.insert(MountType::User, "bob", "/bob/files/other", leaf(2, "sftp"));
    fx.store.seed(ConfigScope::personal("alice"), tree).await;

    let storages = fx.service.read_config().await.unwrap();
    assert_eq!(storages.len(), 1);
    let config = &storages[&1];
    assert_eq!(config.mount_point, "/own");
    assert!(config.applicable_users.is_empty());
}

#[tokio::test]
async fn test_hooks_fire_once_for_the_acting_user() {
    let fx = user_fixture("alice");

    let stored = fx.service.add_storage(sftp_config("docs")).await.unwrap();
    let events = fx.hooks.take().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].signal, HookSignal::CreateMount);
    assert_eq!(events[0].mount_type, MountType::User);
    assert_eq!(events[0].applicable, "alice");

    fx.service.remove_storage(stored.id.unwrap()).await.unwrap();
    let events = fx.hooks.take().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].signal, HookSignal::DeleteMount);
    assert_eq!(events[0].applicable, "alice");
}

#[tokio::test]
async fn test_change_hooks_only_on_rename() {
    let fx = user_fixture("alice");
    let stored = fx.service.add_storage(sftp_config("docs")).await.unwrap();
    fx.hooks.take().await;

    // Option-only change: no hooks.
    let mut reconfigured = stored.clone();
    reconfigured.status = None;
    reconfigured
        .backend_options
        .insert("port".to_string(), json!(2222));
    let stored = fx.service.update_storage(reconfigured).await.unwrap();
    assert!(fx.hooks.take().await.is_empty());

    // Rename: delete old path, create new path, both for the owner.
    let mut renamed = stored.clone();
    renamed.set_mount_point("papers");
    fx.service.update_storage(renamed).await.unwrap();

    let events = fx.hooks.take().await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].signal, HookSignal::DeleteMount);
    assert_eq!(events[0].mount_point, "/docs");
    assert_eq!(events[1].signal, HookSignal::CreateMount);
    assert_eq!(events[1].mount_point, "/papers");
    assert!(events.iter().all(|e| e.applicable == "alice"));
}

#[tokio::test]
async fn test_personal_documents_do_not_leak_across_users() {
    let fx = user_fixture("alice");
    fx.service.add_storage(sftp_config("docs")).await.unwrap();

    let bob = mounthub_service::UserStoragesService::new(
        fx.store.clone(),
        std::sync::Arc::new(common::TaggingCipher),
        fx.hooks.clone(),
        "bob",
    );
    assert!(bob.read_config().await.unwrap().is_empty());
}
