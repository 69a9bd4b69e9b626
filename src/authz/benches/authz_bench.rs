//! Permission evaluation benchmarks
//!
//! Table scan vs. cached lookups, and the string parsing entry point.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hrm_authz::{
    has_permission, has_permission_str, Action, Authorizer, EngineConfig, PermissionTable,
    Resource, Scope,
};
use hrm_core::{Actor, Role};
use std::sync::Arc;

fn bench_table_scan(c: &mut Criterion) {
    let table = PermissionTable::builtin();
    let mut group = c.benchmark_group("table_scan");

    for role in Role::ALL {
        let actor = Actor::new("bench", role);
        group.bench_with_input(BenchmarkId::new("role", role), &actor, |b, actor| {
            b.iter(|| {
                has_permission(
                    black_box(&table),
                    black_box(&Resource::Announcements),
                    black_box(Action::Update),
                    black_box(Scope::Department),
                    Some(actor),
                )
            });
        });
    }

    group.finish();
}

fn bench_authorizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("authorizer");
    let actor = Some(Actor::new("bench", Role::DeptManager).with_department("d-1", "Sales"));

    for enable_cache in [false, true] {
        let authz = Authorizer::new(
            EngineConfig {
                enable_cache,
                enable_metrics: false,
                ..Default::default()
            },
            PermissionTable::builtin(),
            Arc::new(actor.clone()),
        );

        let label = if enable_cache { "cached" } else { "uncached" };
        group.bench_function(label, |b| {
            b.iter(|| {
                authz.has_permission(
                    black_box(&Resource::Goals),
                    black_box(Action::Update),
                    black_box(Scope::Own),
                )
            });
        });
    }

    group.finish();
}

fn bench_string_parsing(c: &mut Criterion) {
    let table = PermissionTable::builtin();
    let actor = Actor::new("bench", Role::Employee);

    c.bench_function("has_permission_str", |b| {
        b.iter(|| {
            has_permission_str(
                black_box(&table),
                black_box("absences"),
                black_box("create"),
                black_box("own"),
                Some(&actor),
            )
        });
    });
}

criterion_group!(benches, bench_table_scan, bench_authorizer, bench_string_parsing);
criterion_main!(benches);
