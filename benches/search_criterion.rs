use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use quince_chess::game_state::game_state::GameState;
use quince_chess::search::board_scoring::PieceSquareScorer;
use quince_chess::search::{alpha_beta, minimax};

const MIDGAME_FEN: &str =
    "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.measurement_time(Duration::from_secs(10));

    let game = GameState::from_fen(MIDGAME_FEN).expect("bench FEN should parse");

    for depth in [2u8, 3u8] {
        group.bench_with_input(BenchmarkId::new("minimax", depth), &depth, |b, &depth| {
            b.iter(|| {
                minimax::search_best_move(&game, depth, &PieceSquareScorer)
                    .expect("search should succeed")
            });
        });

        group.bench_with_input(
            BenchmarkId::new("alpha_beta", depth),
            &depth,
            |b, &depth| {
                b.iter(|| {
                    alpha_beta::search_best_move(&game, depth, &PieceSquareScorer)
                        .expect("search should succeed")
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
