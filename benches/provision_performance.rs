//! Provisioning hot-path benchmarks.
//!
//! Measures the provision and find operations of a single handler variant
//! against the in-memory store.

use claim_broker::store::InMemoryStore;
use claim_broker::{
    ClusterHandler, ObjectRef, ReclaimPolicy, RequestContext, ResourceClaim, ResourceClass,
    ResourceHandler,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::collections::BTreeMap;

fn bench_class() -> ResourceClass {
    ResourceClass {
        name: "standard".to_string(),
        namespace: "bench".to_string(),
        uid: "class-uid-1".to_string(),
        parameters: BTreeMap::new(),
        provider_ref: ObjectRef {
            kind: "Provider".to_string(),
            namespace: "bench".to_string(),
            name: "default-account".to_string(),
            uid: "provider-uid-1".to_string(),
        },
        reclaim_policy: ReclaimPolicy::Retain,
    }
}

fn bench_claim(uid: String) -> ResourceClaim {
    ResourceClaim {
        name: format!("claim-{}", uid),
        namespace: "bench".to_string(),
        uid,
    }
}

fn provisioning_benchmarks(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    c.bench_function("provision_cluster", |b| {
        let store = InMemoryStore::new();
        let context = RequestContext::with_generated_id();
        let class = bench_class();
        let mut sequence = 0usize;
        b.iter(|| {
            sequence += 1;
            let claim = bench_claim(format!("bench-{}", sequence));
            let resource = rt
                .block_on(ClusterHandler.provision(&class, &claim, &store, &context))
                .unwrap();
            black_box(resource);
        });
    });

    c.bench_function("find_cluster", |b| {
        let store = InMemoryStore::new();
        let context = RequestContext::with_generated_id();
        let class = bench_class();
        let claim = bench_claim("bench-find".to_string());
        let key = rt
            .block_on(ClusterHandler.provision(&class, &claim, &store, &context))
            .unwrap()
            .key();
        b.iter(|| {
            let resource = rt
                .block_on(ClusterHandler.find(&key, &store, &context))
                .unwrap();
            black_box(resource);
        });
    });
}

criterion_group!(benches, provisioning_benchmarks);
criterion_main!(benches);
