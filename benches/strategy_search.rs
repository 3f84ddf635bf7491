//! Benchmarks for move search and whole games.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use grid_duel::cards::Card;
use grid_duel::core::{GameRng, Player};
use grid_duel::grid::Grid;
use grid_duel::rules::{ComboRule, GameEngine, RuleSet};
use grid_duel::strategy::{play_out, Defensive, MaxFlips, Minimax, Strategy};

fn deck(n: usize) -> Vec<Card> {
    (0..n)
        .map(|i| {
            let v = |k: usize| ((i * k) % 10 + 1) as u8;
            Card::new(format!("card{i}"), v(1), v(3), v(7), v(9)).unwrap()
        })
        .collect()
}

fn dealt(rows: usize, cols: usize, rules: RuleSet) -> GameEngine {
    let mut engine = GameEngine::new(rules);
    engine
        .start_game(Grid::open(rows, cols).unwrap(), deck(rows * cols + 1), &mut GameRng::new(42))
        .unwrap();
    engine
}

fn bench_first_move(c: &mut Criterion) {
    let rules = RuleSet::standard().with_combo(ComboRule::Same);
    let engine = dealt(5, 5, rules);

    let strategies: Vec<Box<dyn Strategy>> = vec![
        Box::new(MaxFlips),
        Box::new(Defensive::default()),
        Box::new(Minimax::default()),
    ];

    for strategy in &strategies {
        c.bench_function(&format!("first_move_5x5_{}", strategy.name()), |b| {
            b.iter(|| black_box(strategy.find_best_move(black_box(&engine), Player::Red)));
        });
    }
}

fn bench_play_out(c: &mut Criterion) {
    let engine = dealt(3, 3, RuleSet::standard().with_reverse());

    c.bench_function("play_out_3x3_minimax_vs_defensive", |b| {
        b.iter(|| {
            let mut game = engine.clone();
            black_box(play_out(&mut game, &Minimax::default(), &Defensive::default()))
        });
    });
}

fn bench_engine_clone(c: &mut Criterion) {
    let engine = dealt(5, 5, RuleSet::standard());

    c.bench_function("engine_clone_5x5", |b| b.iter(|| black_box(engine.clone())));
}

criterion_group!(benches, bench_first_move, bench_play_out, bench_engine_clone);
criterion_main!(benches);
