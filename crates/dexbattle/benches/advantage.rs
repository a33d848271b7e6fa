use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use dexbattle::{compute_advantage, Combatant, Stat, TypeChart};

struct Fighter {
    types: Vec<String>,
}

impl Combatant for Fighter {
    fn id(&self) -> u32 {
        1
    }
    fn name(&self) -> &str {
        "fighter"
    }
    fn types(&self) -> &[String] {
        &self.types
    }
    fn stats(&self) -> &[Stat] {
        &[]
    }
}

fn bench_advantage(c: &mut Criterion) {
    let mut group = c.benchmark_group("advantage");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("dual_vs_dual", |b| {
        let attacker = Fighter {
            types: vec!["electric".to_string(), "steel".to_string()],
        };
        let defender = Fighter {
            types: vec!["water".to_string(), "flying".to_string()],
        };

        b.iter(|| black_box(compute_advantage(&attacker, &defender)));
    });

    group.bench_function("full_chart_sweep", |b| {
        let chart = TypeChart::standard();
        let types: Vec<&str> = chart.attack_types().collect();

        b.iter(|| {
            let mut total = 0.0;
            for attack in &types {
                for defend in &types {
                    total += chart.multiplier(attack, defend);
                }
            }
            black_box(total)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_advantage);
criterion_main!(benches);
