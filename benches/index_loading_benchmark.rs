use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use konlsearch::{Engine, EngineConfig};
use rand::Rng;

fn korean_words() -> &'static [&'static str] {
    &["그", "비스크", "돌은", "사랑을", "한다", "마법", "특별", "해야", "다이아몬드"]
}

fn random_document(word_count: usize) -> String {
    let mut rng = rand::thread_rng();
    let words = korean_words();
    (0..word_count).map(|_| words[rng.gen_range(0..words.len())]).collect::<Vec<_>>().join(" ")
}

fn seeded_engine(doc_count: usize) -> (tempfile::TempDir, Engine) {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig { storage_path: dir.path().to_path_buf(), ..EngineConfig::default() };
    let engine = Engine::open(config).unwrap();
    {
        let index = engine.index("seed").unwrap();
        for _ in 0..doc_count {
            index.index(&random_document(8)).unwrap();
        }
    }
    (dir, engine)
}

fn bench_reopen(c: &mut Criterion) {
    let mut group = c.benchmark_group("reopen_existing_store");
    for doc_count in [100usize, 1000, 10_000] {
        let (dir, engine) = seeded_engine(doc_count);
        engine.close();
        let path = dir.path().to_path_buf();

        group.bench_with_input(BenchmarkId::from_parameter(doc_count), &doc_count, |b, _| {
            b.iter(|| {
                let config = EngineConfig { storage_path: path.clone(), ..EngineConfig::default() };
                let engine = Engine::open(config).unwrap();
                black_box(engine.index("seed").unwrap().len().unwrap());
                engine.close();
            });
        });
    }
    group.finish();
}

fn bench_get_range_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_range_scan");
    for doc_count in [100usize, 1000, 10_000] {
        let (_dir, engine) = seeded_engine(doc_count);
        let index = engine.index("seed").unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(doc_count), &doc_count, |b, &doc_count| {
            b.iter(|| {
                black_box(index.get_range(1, doc_count as u64 + 1).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_get_multi(c: &mut Criterion) {
    let (_dir, engine) = seeded_engine(5000);
    let index = engine.index("seed").unwrap();
    let ids: Vec<u64> = (1..=200).collect();

    c.bench_function("get_multi_200_of_5000", |b| {
        b.iter(|| {
            black_box(index.get_multi(&ids).unwrap());
        });
    });
}

criterion_group!(benches, bench_reopen, bench_get_range_scan, bench_get_multi);
criterion_main!(benches);
