use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rps_arena::{ArenaConfig, ContestResolver, Population, ScanStrategy};
use std::time::Duration;

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.sample_size(30);
    group.measurement_time(Duration::from_secs(5));

    // Group sizes can be overridden with RPS_BENCH_GROUPS=200,1000
    let groups: Vec<usize> = std::env::var("RPS_BENCH_GROUPS")
        .ok()
        .map(|s| {
            s.split(',')
                .filter_map(|t| t.trim().parse::<usize>().ok())
                .filter(|v| *v > 0)
                .collect::<Vec<_>>()
        })
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| vec![200_usize, 1000]);

    for &group_size in &groups {
        let config = ArenaConfig {
            group_size,
            ..ArenaConfig::default()
        };
        let mut population = Population::initialize(&config, Some(0xBEEF)).expect("valid config");
        // Let the clusters spread before measuring.
        for _ in 0..120 {
            population.advance();
        }

        for strategy in [ScanStrategy::BruteForce, ScanStrategy::Grid] {
            group.bench_function(format!("{:?}_agents{}", strategy, group_size * 3), |b| {
                let mut resolver = ContestResolver::new(config.contact_radius, strategy);
                b.iter_batched(
                    || population.clone(),
                    |mut population| resolver.resolve(&mut population),
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
