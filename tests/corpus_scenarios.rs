//! Exercises spec §8's corpus-scale scenarios against the 132-title
//! fixture: length, point lookups, ranged/multi lookups, delete, and
//! durability across reopen.

mod common;

use common::{open_engine, seeded_corpus, TITLES};
use konlsearch::{EngineConfig, Engine, IndexOutcome};

#[test]
fn corpus_length_matches_insert_count() {
    let (_dir, engine) = seeded_corpus();
    let index = engine.index("title").unwrap();
    assert_eq!(index.len().unwrap(), 132);
}

#[test]
fn corpus_get_returns_exact_stored_text() {
    let (_dir, engine) = seeded_corpus();
    let index = engine.index("title").unwrap();

    let record = index.get(10).unwrap().expect("document 10 must exist");
    assert_eq!(record.id, 10);
    assert_eq!(record.doc, "그 비스크 돌은 사랑을 한다");
    assert_eq!(TITLES[9], record.doc);
}

#[test]
fn get_range_excludes_deleted_id_and_stays_half_open() {
    let (_dir, engine) = seeded_corpus();
    let index = engine.index("title").unwrap();

    index.delete(20).unwrap();
    let result = index.get_range(10, 20).unwrap();
    let ids: Vec<u64> = result.iter().map(|r| r.id).collect();

    assert_eq!(ids, (10..20).collect::<Vec<u64>>());
}

#[test]
fn get_all_reflects_deletes() {
    let (_dir, engine) = seeded_corpus();
    let index = engine.index("title").unwrap();

    let before = index.get_all().unwrap();
    assert_eq!(before.len(), 132);

    index.delete(10).unwrap();
    index.delete(12).unwrap();

    assert_eq!(index.len().unwrap(), 130);
    assert_eq!(index.get_all().unwrap().len(), 130);
}

#[test]
fn get_multi_drops_absent_ids() {
    let (_dir, engine) = seeded_corpus();
    let index = engine.index("title").unwrap();

    let rows = index.get_multi(&[10, 15, 20, 1000]).unwrap();
    let ids: Vec<u64> = rows.iter().map(|r| r.id).collect();

    assert_eq!(ids, vec![10, 15, 20]);
}

#[test]
fn reindexing_identical_document_is_a_conflict_and_length_does_not_grow() {
    let (_dir, engine) = seeded_corpus();
    let index = engine.index("title").unwrap();

    let outcome = index.index(TITLES[9]).unwrap();
    assert_eq!(outcome, IndexOutcome::Conflict(10));
    assert_eq!(index.len().unwrap(), 132);
}

#[test]
fn deleting_a_document_removes_it_from_get_and_frees_its_hash() {
    let (_dir, engine) = seeded_corpus();
    let index = engine.index("title").unwrap();

    index.delete(10).unwrap();
    assert!(index.get(10).unwrap().is_none());
    assert_eq!(index.len().unwrap(), 131);

    // The same content can be indexed again, now under a fresh id.
    let outcome = index.index(TITLES[9]).unwrap();
    assert!(matches!(outcome, IndexOutcome::Success(_)));
}

#[test]
fn delete_on_missing_id_is_not_found() {
    let (_dir, engine) = seeded_corpus();
    let index = engine.index("title").unwrap();

    let err = index.delete(99_999).unwrap_err();
    assert!(matches!(err.kind, konlsearch::ErrorKind::NotFound));
}

#[test]
fn indexed_documents_survive_close_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_path_buf();

    {
        let config = EngineConfig { storage_path: path.clone(), ..EngineConfig::default() };
        let engine = Engine::open(config).unwrap();
        let index = engine.index("title").unwrap();
        for title in TITLES {
            index.index(title).unwrap();
        }
        engine.close();
    }

    let config = EngineConfig { storage_path: path, ..EngineConfig::default() };
    let engine = Engine::open(config).unwrap();
    let index = engine.index("title").unwrap();

    assert_eq!(index.len().unwrap(), 132);
    assert_eq!(index.get(10).unwrap().unwrap().doc, "그 비스크 돌은 사랑을 한다");
}

#[test]
fn engine_lists_every_registered_index() {
    let (_dir, engine) = open_engine();
    engine.index("title").unwrap();
    engine.index("suggestions").unwrap();

    let mut names = engine.list_indexes().unwrap();
    names.sort();
    assert_eq!(names, vec!["suggestions".to_string(), "title".to_string()]);
}
