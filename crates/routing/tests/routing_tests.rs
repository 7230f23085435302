//! Integration tests for registry behavior under concurrency.

mod common;

use std::sync::Arc;

use switchyard_routing::{
    DEFAULT_TARGET, RouterError, TenantContext, TenantId, TenantRegistry, TenantRouter,
};

use common::StubTarget;

fn router() -> Arc<TenantRouter<StubTarget>> {
    Arc::new(TenantRouter::new(StubTarget::named("default")))
}

/// Resolve the router's target for `tenant` as its own unit of work.
async fn resolve_as(router: &TenantRouter<StubTarget>, tenant: &str) -> &'static str {
    TenantContext::scope(TenantId::new(tenant), async { router.resolve().name }).await
}

#[tokio::test]
async fn test_registered_tenant_resolves_to_its_target() {
    let router = router();
    router.add("acme", StubTarget::named("acme")).unwrap();
    router.add("globex", StubTarget::named("globex")).unwrap();

    assert_eq!(resolve_as(&router, "acme").await, "acme");
    assert_eq!(resolve_as(&router, "globex").await, "globex");
}

#[tokio::test]
async fn test_unknown_and_removed_tenants_fall_back_to_default() {
    let router = router();
    router.add("acme", StubTarget::named("acme")).unwrap();

    assert_eq!(resolve_as(&router, "nobody").await, "default");

    router.remove("acme").unwrap();
    // Explicit fallback, not an error and not a stale previous target.
    assert_eq!(resolve_as(&router, "acme").await, "default");
}

#[tokio::test]
async fn test_default_target_cannot_be_removed() {
    let router = router();

    let err = router.remove(DEFAULT_TARGET).unwrap_err();
    assert!(matches!(err, RouterError::InvalidArgument(_)));

    // Still resolvable afterwards.
    assert_eq!(router.resolve().name, "default");
    assert_eq!(resolve_as(&router, "anyone").await, "default");
}

#[tokio::test]
async fn test_facade_forwards_to_registry() {
    let router = router();
    let registry: Arc<dyn TenantRegistry<StubTarget>> = router.clone();

    registry
        .add_data_source("acme", Arc::new(StubTarget::named("acme")))
        .unwrap();
    assert_eq!(resolve_as(&router, "acme").await, "acme");

    registry.remove_data_source("acme").unwrap();
    assert_eq!(resolve_as(&router, "acme").await, "default");

    assert!(registry.add_data_source("", Arc::new(StubTarget::named("x"))).is_err());
    assert!(registry.remove_data_source(DEFAULT_TARGET).is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_never_cross_targets() {
    let router = router();
    let barrier = Arc::new(tokio::sync::Barrier::new(2));

    let a = {
        let router = router.clone();
        let barrier = barrier.clone();
        tokio::spawn(async move {
            barrier.wait().await;
            router.add("t1", StubTarget::named("pool-a")).unwrap();
            resolve_as(&router, "t1").await
        })
    };
    let b = {
        let router = router.clone();
        let barrier = barrier.clone();
        tokio::spawn(async move {
            barrier.wait().await;
            router.add("t2", StubTarget::named("pool-b")).unwrap();
            resolve_as(&router, "t2").await
        })
    };

    assert_eq!(a.await.unwrap(), "pool-a");
    assert_eq!(b.await.unwrap(), "pool-b");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_resolution_during_churn_sees_consistent_state() {
    let router = router();
    router.add("acme", StubTarget::named("acme")).unwrap();

    // One task churns the entry while readers resolve; every observation
    // must be a value the map legitimately held, never anything torn.
    let mutator = {
        let router = router.clone();
        tokio::spawn(async move {
            for _ in 0..500 {
                router.remove("acme").unwrap();
                router.add("acme", StubTarget::named("acme")).unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    let mut readers = Vec::new();
    for _ in 0..4 {
        let router = router.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..500 {
                let name = resolve_as(&router, "acme").await;
                assert!(name == "acme" || name == "default", "saw '{name}'");
            }
        }));
    }

    mutator.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
}
