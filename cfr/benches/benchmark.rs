use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hu_plo_cfr::holdem::calc_hand_score;
use hu_plo_cfr::solver::{CfrTrainer, TrainingConfig};

fn cfr_train_benchmark(c: &mut Criterion) {
    c.bench_function("cfr::train 50 iterations", |b| {
        b.iter(|| {
            let mut trainer = CfrTrainer::new();
            trainer.train(black_box(&TrainingConfig {
                iterations: 50,
                seed: Some(1),
            }));
        });
    });
}

fn hand_eval_benchmark(c: &mut Criterion) {
    // Ah Kh Qh Jh Th 2c 3d: a straight flush plus two off-suit kickers.
    let cards: Vec<u8> = vec![38, 37, 36, 35, 34, 0, 14];
    c.bench_function("calc_hand_score<straight flush + kickers>", |b| {
        b.iter(|| calc_hand_score(black_box(&cards)));
    });
}

criterion_group!(cfr_benches, cfr_train_benchmark, hand_eval_benchmark);
criterion_main!(cfr_benches);
