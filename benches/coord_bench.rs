//! Criterion benchmarks for relay-coordination search.
//!
//! Uses synthetic radial feeders to measure fitness evaluation cost and
//! full-run overhead as the relay count grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_relaycoord::ga::{GaConfig, GaRunner};
use u_relaycoord::random::create_rng;
use u_relaycoord::timing::evaluate_tmt;
use u_relaycoord::{derive_bounds, CoordinationProblem, Scenario};

// ===========================================================================
// Synthetic feeder: each relay backs up its downstream neighbour and the
// one after it.
// ===========================================================================

fn feeder(relays: usize) -> Scenario {
    let mut b = Scenario::builder(format!("feeder_{relays}"));
    for i in 0..relays - 1 {
        let current = 6000.0 - 4000.0 * i as f64 / relays as f64;
        b.add_pair(&format!("R{i}"), &format!("R{}", i + 1), current, current * 0.8)
            .expect("positive currents");
        if i + 2 < relays {
            b.add_pair(&format!("R{i}"), &format!("R{}", i + 2), current, current * 0.6)
                .expect("positive currents");
        }
    }
    b.build()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_tmt");
    for relays in [10, 50, 200] {
        let scenario = feeder(relays);
        let bounds = derive_bounds(&scenario).expect("valid feeder");
        let genes = bounds.sample_all(&mut create_rng(1));

        group.bench_with_input(BenchmarkId::from_parameter(relays), &genes, |b, genes| {
            b.iter(|| evaluate_tmt(black_box(genes), &scenario))
        });
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_run");
    group.sample_size(10);
    for relays in [10, 40] {
        let scenario = feeder(relays);
        let bounds = derive_bounds(&scenario).expect("valid feeder");
        let problem = CoordinationProblem::new(&scenario, &bounds).expect("matching bounds");
        let config = GaConfig::fast().with_log_interval(0);

        group.bench_with_input(BenchmarkId::from_parameter(relays), &config, |b, config| {
            b.iter(|| GaRunner::run(&problem, config, 42).expect("valid config"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_run);
criterion_main!(benches);
