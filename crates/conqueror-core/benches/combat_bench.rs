use criterion::{black_box, criterion_group, criterion_main, Criterion};
use conqueror_core::resolver::CombatResolver;
use conqueror_core::{Board, Faction, FactionSet, Game, GameConfig, TileCoord};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_resolve_lottery(c: &mut Criterion) {
    let board = Board::new(10, 10).unwrap();
    let resolver = CombatResolver::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    c.bench_function("resolve_lottery", |b| {
        b.iter(|| {
            // Both bonuses spent so every call takes the weighted path.
            let mut spent = FactionSet::PLAYER1 | FactionSet::PLAYER2;
            let mut board = board.clone();
            black_box(resolver.resolve(
                &mut board,
                &mut spent,
                black_box(TileCoord::new(0, 0)),
                black_box(TileCoord::new(1, 0)),
                &mut rng,
            ))
        })
    });
}

fn bench_territorial_power(c: &mut Criterion) {
    // Half the board held by Player1 makes every power lookup count tiles.
    let mut board = Board::new(10, 10).unwrap();
    for y in 0..5 {
        for x in 0..10 {
            board.place(TileCoord::new(x, y), Faction::Player1, 80.0).unwrap();
        }
    }

    c.bench_function("territorial_power_full_board", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for tile in board.tiles() {
                total += board.territorial_power(tile.coord()).unwrap();
            }
            black_box(total)
        })
    });
}

fn bench_scripted_match(c: &mut Criterion) {
    let pairs = [
        ((0, 0), (1, 0)),
        ((9, 9), (8, 9)),
        ((0, 0), (0, 1)),
        ((9, 9), (9, 8)),
    ];

    c.bench_function("scripted_match_40_moves", |b| {
        b.iter(|| {
            let mut game = Game::new(GameConfig::seeded(black_box(42))).unwrap();
            for _ in 0..10 {
                for &(first, second) in &pairs {
                    game.select(TileCoord::from(first));
                    game.select(TileCoord::from(second));
                }
            }
            black_box(game.snapshot())
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_lottery,
    bench_territorial_power,
    bench_scripted_match
);
criterion_main!(benches);
