//! Client-level cache behaviour against a recording mock transport.
//!
//! Every test builds a fresh client, so caches never leak between tests.

mod common;

use common::*;
use regcache::core::{Compatibility, Metadata, SchemaMetadata, ServerConfig};
use regcache::{CacheConfig, Method, RegistryError, ResolutionDomain, TransportError};
use serde_json::json;

// ── Registration ──────────────────────────────────────────────────

#[tokio::test]
async fn register_returns_id() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 1}));

    let id = client.register("mock-subject", &avro(USER_SCHEMA), false).await.unwrap();

    assert_eq!(id, 1);
    assert_eq!(transport.call_count(), 1);
    let call = transport.last_call();
    assert_eq!(call.method, Method::Post);
    assert_eq!(call.path, "/subjects/mock-subject/versions?normalize=false");
    assert_eq!(call.body.unwrap()["schemaType"], "AVRO");
}

#[tokio::test]
async fn register_twice_is_served_from_cache() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let first = avro(USER_SCHEMA);
    let second = avro(USER2_SCHEMA);

    transport.respond(json!({"id": 1}));
    assert_eq!(client.register("mock-subject", &first, false).await.unwrap(), 1);
    transport.respond(json!({"id": 2}));
    assert_eq!(client.register("mock-subject2", &second, false).await.unwrap(), 2);
    assert_eq!(transport.call_count(), 2);

    assert_eq!(client.register("mock-subject", &first, false).await.unwrap(), 1);
    assert_eq!(client.register("mock-subject2", &second, false).await.unwrap(), 2);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn register_full_response_is_cached() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let schema = avro(USER_SCHEMA).with_metadata(owner_metadata("Alice Bob", "Alice@bob.com"));
    transport.respond(json!({
        "id": 1,
        "version": 1,
        "schema": USER_SCHEMA,
        "metadata": {"properties": {"owner": "Alice Bob", "email": "Alice@bob.com"}}
    }));

    let result = client.register_full_response("mock-subject", &schema, false).await.unwrap();
    assert_eq!(result.id, 1);
    assert_eq!(result.version, Some(1));
    assert_eq!(result.schema, USER_SCHEMA);
    assert_eq!(result.metadata, schema.metadata);

    // `register` shares the registration domain.
    assert_eq!(client.register("mock-subject", &schema, false).await.unwrap(), 1);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn normalize_flag_is_part_of_the_key() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 4}));

    client.register("orders", &avro(USER_SCHEMA), false).await.unwrap();
    client.register("orders", &avro(USER_SCHEMA), true).await.unwrap();

    assert_eq!(transport.call_count(), 2);
    assert_eq!(
        transport.last_call().path,
        "/subjects/orders/versions?normalize=true"
    );
}

// ── Lookups ───────────────────────────────────────────────────────

#[tokio::test]
async fn get_id_is_cached_per_subject_and_schema() {
    let transport = MockTransport::new();
    let client = client(&transport);

    transport.respond(json!({"id": 1}));
    assert_eq!(client.get_id("mock-subject", &avro(USER_SCHEMA), false).await.unwrap(), 1);
    assert_eq!(transport.last_call().path, "/subjects/mock-subject?normalize=false");

    transport.respond(json!({"id": 2}));
    assert_eq!(client.get_id("mock-subject2", &avro(USER2_SCHEMA), false).await.unwrap(), 2);

    assert_eq!(client.get_id("mock-subject", &avro(USER_SCHEMA), false).await.unwrap(), 1);
    assert_eq!(client.get_id("mock-subject2", &avro(USER2_SCHEMA), false).await.unwrap(), 2);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn get_by_subject_and_id_is_cached() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 1, "version": 1, "schema": USER_SCHEMA}));

    let info = client.get_by_subject_and_id("mock-subject", 1).await.unwrap();
    assert_eq!(info.schema, USER_SCHEMA);
    assert_eq!(transport.last_call().path, "/subjects/mock-subject/versions/1");

    transport.respond(json!({"id": 2, "version": 1, "schema": USER2_SCHEMA}));
    let other = client.get_by_subject_and_id("mock-subject2", 2).await.unwrap();
    assert_eq!(other.schema, USER2_SCHEMA);

    let cached = client.get_by_subject_and_id("mock-subject", 1).await.unwrap();
    assert_eq!(cached, info);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn get_latest_schema_metadata_is_cached() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 5, "subject": "orders", "version": 3, "schema": USER_SCHEMA}));

    let latest = client.get_latest_schema_metadata("orders").await.unwrap();
    assert_eq!(latest.version, Some(3));
    assert_eq!(transport.last_call().path, "/subjects/orders/versions/latest");

    client.get_latest_schema_metadata("orders").await.unwrap();
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn get_schema_metadata_keys_on_deleted_flag() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 1, "version": 1, "schema": USER_SCHEMA}));

    client.get_schema_metadata("mock-subject", 1, true).await.unwrap();
    assert_eq!(
        transport.last_call().path,
        "/subjects/mock-subject/versions/1?deleted=true"
    );
    client.get_schema_metadata("mock-subject", 1, true).await.unwrap();
    assert_eq!(transport.call_count(), 1);

    client.get_schema_metadata("mock-subject", 1, false).await.unwrap();
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn get_latest_with_metadata_is_cached() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let metadata = owner_metadata("Alice Bob", "Alice@bob.com");
    let metadata2 = owner_metadata("Alice Bob2", "Alice@bob2.com");

    transport.respond(json!({"id": 1, "version": 1, "schema": USER_SCHEMA}));
    let result = client.get_latest_with_metadata("mock-subject", &metadata, false).await.unwrap();
    assert_eq!(result.id, 1);
    let call = transport.last_call();
    assert_eq!(call.method, Method::Get);
    assert_eq!(call.path, "/subjects/mock-subject/metadata?deleted=false");
    assert_eq!(call.body.unwrap()["properties"]["owner"], "Alice Bob");

    transport.respond(json!({"id": 2, "version": 1, "schema": USER2_SCHEMA}));
    let result2 = client
        .get_latest_with_metadata("mock-subject2", &metadata2, false)
        .await
        .unwrap();
    assert_eq!(result2.id, 2);

    let cached = client.get_latest_with_metadata("mock-subject", &metadata, false).await.unwrap();
    assert_eq!(cached, result);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn reordered_metadata_hits_the_cache() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 1, "version": 1}));

    let mut forward = Metadata::default();
    forward.properties.insert("owner".to_string(), "bob".to_string());
    forward.properties.insert("email".to_string(), "bob@acme.com".to_string());
    let mut backward = Metadata::default();
    backward.properties.insert("email".to_string(), "bob@acme.com".to_string());
    backward.properties.insert("owner".to_string(), "bob".to_string());

    client.get_latest_with_metadata("orders", &forward, false).await.unwrap();
    client.get_latest_with_metadata("orders", &backward, false).await.unwrap();

    let schema_a = avro(USER_SCHEMA).with_metadata(forward);
    let schema_b = avro(USER_SCHEMA).with_metadata(backward);
    transport.respond(json!({"id": 9}));
    client.get_id("orders", &schema_a, false).await.unwrap();
    client.get_id("orders", &schema_b, false).await.unwrap();

    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn get_version_reads_version_and_caches() {
    let transport = MockTransport::new();
    let client = client(&transport);

    transport.respond(json!({"version": 1}));
    assert_eq!(client.get_version("mock-subject", &avro(USER_SCHEMA), true).await.unwrap(), 1);
    assert_eq!(transport.last_call().path, "/subjects/mock-subject?normalize=true");

    transport.respond(json!({"version": 2}));
    assert_eq!(client.get_version("mock-subject2", &avro(USER2_SCHEMA), false).await.unwrap(), 2);

    assert_eq!(client.get_version("mock-subject", &avro(USER_SCHEMA), true).await.unwrap(), 1);
    assert_eq!(client.get_version("mock-subject2", &avro(USER2_SCHEMA), false).await.unwrap(), 2);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn malformed_response_is_a_decode_error_and_not_cached() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"unexpected": true}));

    let err = client.get_version("orders", &avro(USER_SCHEMA), false).await.unwrap_err();
    assert!(matches!(err, RegistryError::Decode(_)));
    assert_eq!(client.cache().size(ResolutionDomain::SchemaToVersion).await, 0);
}

#[tokio::test]
async fn empty_subject_never_reaches_transport() {
    let transport = MockTransport::new();
    let client = client(&transport);

    let err = client.get_latest_schema_metadata("").await.unwrap_err();
    assert!(matches!(err, RegistryError::KeyEncoding(_)));
    assert_eq!(transport.call_count(), 0);
}

// ── Errors ────────────────────────────────────────────────────────

#[tokio::test]
async fn miss_then_error_is_not_cached() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.fail(TransportError::Status {
        status: 409,
        body: "incompatible schema".to_string(),
    });

    let err = client.register("orders", &avro(USER_SCHEMA), false).await.unwrap_err();
    assert_eq!(
        err,
        RegistryError::Transport {
            status: 409,
            body: "incompatible schema".to_string()
        }
    );
    assert_eq!(client.cache().size(ResolutionDomain::InfoToSchemaMetadata).await, 0);

    transport.respond(json!({"id": 3}));
    assert_eq!(client.register("orders", &avro(USER_SCHEMA), false).await.unwrap(), 3);
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn network_errors_propagate_unchanged() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.fail(TransportError::Network("connection refused".to_string()));

    let err = client.get_all_subjects().await.unwrap_err();
    assert_eq!(err, RegistryError::Network("connection refused".to_string()));
    let err = client.get_by_subject_and_id("orders", 1).await.unwrap_err();
    assert_eq!(err, RegistryError::Network("connection refused".to_string()));
}

// ── Eviction and isolation ────────────────────────────────────────

#[tokio::test]
async fn capacity_evicts_least_recently_used() {
    let transport = MockTransport::new();
    let client = client_with(&transport, CacheConfig::with_capacity(2));
    transport.respond(json!({"id": 1}));

    client.get_by_subject_and_id("orders", 1).await.unwrap();
    client.get_by_subject_and_id("orders", 2).await.unwrap();
    // Touch id 1 so id 2 is least recently used.
    client.get_by_subject_and_id("orders", 1).await.unwrap();
    client.get_by_subject_and_id("orders", 3).await.unwrap();
    assert_eq!(transport.call_count(), 3);
    assert_eq!(client.cache().size(ResolutionDomain::IdToSchemaInfo).await, 2);

    client.get_by_subject_and_id("orders", 1).await.unwrap();
    client.get_by_subject_and_id("orders", 3).await.unwrap();
    assert_eq!(transport.call_count(), 3);

    client.get_by_subject_and_id("orders", 2).await.unwrap();
    assert_eq!(transport.call_count(), 4);
}

#[tokio::test]
async fn resolving_one_key_leaves_others_alone() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 1, "version": 1}));

    client.get_latest_schema_metadata("orders").await.unwrap();
    assert_eq!(client.cache().total_size().await, 1);
    assert_eq!(client.cache().size(ResolutionDomain::LatestToSchemaMetadata).await, 1);

    client.get_latest_schema_metadata("users").await.unwrap();
    client.get_latest_schema_metadata("orders").await.unwrap();
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn clients_do_not_share_caches() {
    let transport = MockTransport::new();
    let first = client(&transport);
    let second = client(&transport);
    transport.respond(json!({"id": 1}));

    first.get_id("orders", &avro(USER_SCHEMA), false).await.unwrap();
    second.get_id("orders", &avro(USER_SCHEMA), false).await.unwrap();
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn close_clears_cache() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 1}));

    client.get_id("orders", &avro(USER_SCHEMA), false).await.unwrap();
    client.close().await;
    assert_eq!(client.cache().total_size().await, 0);

    client.get_id("orders", &avro(USER_SCHEMA), false).await.unwrap();
    assert_eq!(transport.call_count(), 2);
}

// ── Deletes ───────────────────────────────────────────────────────

#[tokio::test]
async fn register_delete_then_lookup_refetches() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let schema = avro(USER_SCHEMA);

    transport.respond(json!({"id": 7}));
    assert_eq!(client.register("orders", &schema, false).await.unwrap(), 7);
    assert_eq!(client.register("orders", &schema, false).await.unwrap(), 7);
    assert_eq!(transport.count(Method::Post), 1);

    transport.respond(json!([1]));
    assert_eq!(client.delete_subject("orders", false).await.unwrap(), vec![1]);
    assert_eq!(transport.count(Method::Delete), 1);
    assert_eq!(transport.last_call().path, "/subjects/orders?permanent=false");

    transport.respond(json!({"id": 7}));
    assert_eq!(client.get_id("orders", &schema, false).await.unwrap(), 7);
    assert_eq!(transport.count(Method::Post), 2);

    // The registration entry was invalidated too.
    client.register("orders", &schema, false).await.unwrap();
    assert_eq!(transport.count(Method::Post), 3);
}

#[tokio::test]
async fn delete_subject_invalidates_every_domain_for_that_subject() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let schema = avro(USER_SCHEMA);
    let metadata = owner_metadata("bob", "bob@acme.com");
    transport.respond(json!({"id": 7, "version": 1, "schema": USER_SCHEMA}));

    for subject in ["orders", "users"] {
        client.register(subject, &schema, false).await.unwrap();
        client.get_id(subject, &schema, false).await.unwrap();
        client.get_version(subject, &schema, false).await.unwrap();
        client.get_by_subject_and_id(subject, 7).await.unwrap();
        client.get_latest_schema_metadata(subject).await.unwrap();
        client.get_schema_metadata(subject, 1, false).await.unwrap();
        client.get_latest_with_metadata(subject, &metadata, false).await.unwrap();
    }
    assert_eq!(client.cache().total_size().await, 14);
    let before = transport.call_count();

    transport.respond(json!([1]));
    client.delete_subject("orders", true).await.unwrap();
    assert_eq!(client.cache().total_size().await, 7);
    assert_eq!(transport.last_call().path, "/subjects/orders?permanent=true");

    // Untouched subject is still cached.
    client.get_latest_schema_metadata("users").await.unwrap();
    assert_eq!(transport.call_count(), before + 1);

    transport.respond(json!({"id": 7, "version": 1, "schema": USER_SCHEMA}));
    client.get_latest_schema_metadata("orders").await.unwrap();
    client.get_latest_with_metadata("orders", &metadata, false).await.unwrap();
    client.get_schema_metadata("orders", 1, false).await.unwrap();
    assert_eq!(transport.call_count(), before + 4);
}

#[tokio::test]
async fn delete_subject_version_invalidates_that_version() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let v1 = avro(USER_SCHEMA);
    let v2 = avro(USER2_SCHEMA);

    transport.respond(json!({"id": 1, "version": 1}));
    client.register("orders", &v1, false).await.unwrap();
    client.get_version("orders", &v1, false).await.unwrap();
    client.get_schema_metadata("orders", 1, false).await.unwrap();
    transport.respond(json!({"id": 2, "version": 2}));
    client.register("orders", &v2, false).await.unwrap();
    client.get_version("orders", &v2, false).await.unwrap();
    client.get_latest_schema_metadata("orders").await.unwrap();
    let before = transport.call_count();

    transport.respond(json!(1));
    assert_eq!(client.delete_subject_version("orders", 1, false).await.unwrap(), vec![1]);
    assert_eq!(
        transport.last_call().path,
        "/subjects/orders/versions/1?permanent=false"
    );

    // Version 2 entries survive.
    client.register("orders", &v2, false).await.unwrap();
    client.get_version("orders", &v2, false).await.unwrap();
    client.get_latest_schema_metadata("orders").await.unwrap();
    assert_eq!(transport.call_count(), before + 1);

    // Version 1 entries are gone.
    transport.respond(json!({"id": 1, "version": 1}));
    client.register("orders", &v1, false).await.unwrap();
    client.get_version("orders", &v1, false).await.unwrap();
    client.get_schema_metadata("orders", 1, false).await.unwrap();
    assert_eq!(transport.call_count(), before + 4);
}

#[tokio::test]
async fn delete_subject_version_drops_schema_id_learned_from_registration() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let v1 = avro(USER_SCHEMA);

    transport.respond(json!({"id": 1, "version": 1}));
    client.register("orders", &v1, false).await.unwrap();
    client.get_id("orders", &v1, false).await.unwrap();
    assert_eq!(transport.call_count(), 2);

    transport.respond(json!([1]));
    client.delete_subject_version("orders", 1, true).await.unwrap();
    assert_eq!(transport.call_count(), 3);

    transport.respond(json!({"id": 1}));
    client.get_id("orders", &v1, false).await.unwrap();
    assert_eq!(transport.call_count(), 4);
    assert_eq!(transport.last_call().path, "/subjects/orders?normalize=false");
}

#[tokio::test]
async fn failed_delete_still_leaves_cache_invalidated() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 1, "version": 1}));
    client.get_latest_schema_metadata("orders").await.unwrap();

    transport.fail(TransportError::Status {
        status: 404,
        body: "subject not found".to_string(),
    });
    let err = client.delete_subject("orders", false).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(client.cache().total_size().await, 0);
}

// ── Request paths ─────────────────────────────────────────────────

#[tokio::test]
async fn subject_is_encoded_as_one_path_segment() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 1, "version": 1}));

    client.get_latest_schema_metadata("com.acme/orders value").await.unwrap();
    assert_eq!(
        transport.last_call().path,
        "/subjects/com.acme%2Forders%20value/versions/latest"
    );

    client.get_id("a/versions/1", &avro(USER_SCHEMA), true).await.unwrap();
    assert_eq!(transport.last_call().path, "/subjects/a%2Fversions%2F1?normalize=true");

    transport.respond(json!([1]));
    client.delete_subject("a/versions/1", false).await.unwrap();
    assert_eq!(
        transport.last_call().path,
        "/subjects/a%2Fversions%2F1?permanent=false"
    );

    transport.respond(json!("FULL"));
    client.get_compatibility("team a/orders").await.unwrap();
    assert_eq!(transport.last_call().path, "/config/team%20a%2Forders/compatibility");
}

#[tokio::test]
async fn encoded_subjects_keep_their_own_cache_entries() {
    let transport = MockTransport::new();
    let client = client(&transport);
    transport.respond(json!({"id": 1, "version": 1}));

    client.get_latest_schema_metadata("orders value").await.unwrap();
    client.get_latest_schema_metadata("orders value").await.unwrap();
    assert_eq!(transport.call_count(), 1);

    transport.respond(json!([1]));
    client.delete_subject("orders value", false).await.unwrap();
    assert_eq!(client.cache().total_size().await, 0);
}

// ── Uncached operations ───────────────────────────────────────────

#[tokio::test]
async fn listing_is_never_cached() {
    let transport = MockTransport::new();
    let client = client(&transport);

    transport.respond(json!(["mock-subject", "mock-subject2"]));
    assert_eq!(
        client.get_all_subjects().await.unwrap(),
        vec!["mock-subject".to_string(), "mock-subject2".to_string()]
    );
    client.get_all_subjects().await.unwrap();
    assert_eq!(transport.last_call().path, "/subjects");

    transport.respond(json!([1, 2, 3]));
    assert_eq!(client.get_all_versions("mock-subject").await.unwrap(), vec![1, 2, 3]);
    assert_eq!(transport.last_call().path, "/subjects/mock-subject/versions");

    assert_eq!(transport.call_count(), 3);
    assert_eq!(client.cache().total_size().await, 0);
}

#[tokio::test]
async fn compatibility_checks() {
    let transport = MockTransport::new();
    let client = client(&transport);

    transport.respond(json!({"is_compatible": true}));
    assert!(client.test_subject_compatibility("orders", &avro(USER_SCHEMA)).await.unwrap());
    assert_eq!(
        transport.last_call().path,
        "/compatibility/subjects/orders/versions/latest"
    );

    transport.respond(json!(false));
    assert!(!client.test_compatibility("orders", 2, &avro(USER_SCHEMA)).await.unwrap());
    assert_eq!(
        transport.last_call().path,
        "/compatibility/subjects/orders/versions/2"
    );
}

#[tokio::test]
async fn compatibility_levels() {
    let transport = MockTransport::new();
    let client = client(&transport);

    transport.respond(json!({"compatibilityLevel": "BACKWARD"}));
    assert_eq!(client.get_compatibility("orders").await.unwrap(), Compatibility::Backward);
    assert_eq!(transport.last_call().path, "/config/orders/compatibility");

    transport.respond(json!({"compatibility": "FULL"}));
    assert_eq!(
        client.update_compatibility("orders", Compatibility::Full).await.unwrap(),
        Compatibility::Full
    );
    let call = transport.last_call();
    assert_eq!(call.method, Method::Put);
    assert_eq!(call.body.unwrap(), json!({"compatibility": "FULL"}));

    transport.respond(json!("NONE"));
    assert_eq!(client.get_default_compatibility().await.unwrap(), Compatibility::None);
    assert_eq!(
        client.update_default_compatibility(Compatibility::None).await.unwrap(),
        Compatibility::None
    );
    assert_eq!(transport.last_call().path, "/config");
}

#[tokio::test]
async fn server_config_round_trip() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let config = ServerConfig {
        normalize: Some(true),
        compatibility_level: Some(Compatibility::ForwardTransitive),
        ..ServerConfig::default()
    };

    transport.respond(serde_json::to_value(&config).unwrap());
    assert_eq!(client.update_config("orders", &config).await.unwrap(), config);
    assert_eq!(transport.last_call().path, "/config/orders");
    assert_eq!(client.get_config("orders").await.unwrap(), config);
    assert_eq!(client.get_global_config().await.unwrap(), config);
    assert_eq!(client.update_global_config(&config).await.unwrap(), config);
    assert_eq!(transport.last_call().path, "/config");
    assert_eq!(transport.count(Method::Put), 2);
}

#[tokio::test]
async fn cached_records_are_returned_verbatim() {
    let transport = MockTransport::new();
    let client = client(&transport);
    let expected = SchemaMetadata {
        id: 11,
        subject: Some("orders".to_string()),
        version: Some(4),
        schema: USER_SCHEMA.to_string(),
        schema_type: Some("AVRO".to_string()),
        ..SchemaMetadata::default()
    };
    transport.respond(serde_json::to_value(&expected).unwrap());

    assert_eq!(client.get_schema_metadata("orders", 4, false).await.unwrap(), expected);
    assert_eq!(client.get_schema_metadata("orders", 4, false).await.unwrap(), expected);
    assert_eq!(transport.call_count(), 1);
}
