use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use konlsearch::{Engine, EngineConfig, SearchMode};
use rand::Rng;

fn korean_words() -> &'static [&'static str] {
    &["그", "비스크", "돌은", "사랑을", "한다", "마법", "특별", "해야", "다이아몬드"]
}

fn random_document(word_count: usize) -> String {
    let mut rng = rand::thread_rng();
    let words = korean_words();
    (0..word_count).map(|_| words[rng.gen_range(0..words.len())]).collect::<Vec<_>>().join(" ")
}

fn open_engine() -> (tempfile::TempDir, Engine) {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig { storage_path: dir.path().to_path_buf(), ..EngineConfig::default() };
    (dir, Engine::open(config).unwrap())
}

fn bench_single_index(c: &mut Criterion) {
    let (_dir, engine) = open_engine();
    let index = engine.index("bench").unwrap();

    c.bench_function("single_document_index", |b| {
        b.iter(|| {
            let doc = random_document(8);
            black_box(index.index(&doc).unwrap());
        });
    });
}

fn bench_search_or(c: &mut Criterion) {
    let (_dir, engine) = open_engine();
    let index = engine.index("bench_search").unwrap();
    for _ in 0..2000 {
        index.index(&random_document(8)).unwrap();
    }

    c.bench_function("search_or_single_token", |b| {
        b.iter(|| {
            black_box(index.search(&["마법".to_string()], SearchMode::Or).unwrap());
        });
    });
}

fn bench_batch_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_index");
    for batch_size in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &batch_size, |b, &batch_size| {
            b.iter(|| {
                let (_dir, engine) = open_engine();
                let index = engine.index("bench_batch").unwrap();
                let mut batch = index.to_batch().unwrap();
                for _ in 0..batch_size {
                    batch.index(&random_document(8)).unwrap();
                }
                batch.commit().unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_index, bench_search_or, bench_batch_index);
criterion_main!(benches);
