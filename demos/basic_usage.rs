//! Walks through indexing, boolean/phrase search, suggestions, and a
//! batched write against a fresh engine.

use konlsearch::{BoolMode, Condition, Engine, EngineConfig, IndexOutcome, QueryNode, SearchMode, TokenSearchMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let dir = tempfile::tempdir()?;
    let config = EngineConfig { storage_path: dir.path().to_path_buf(), ..EngineConfig::default() };
    let engine = Engine::open(config)?;
    let index = engine.index("title")?;

    println!("Indexing documents...");
    for doc in ["마법 특별", "특별 마법", "상관없음"] {
        match index.index(doc)? {
            IndexOutcome::Success(id) => println!("  {doc:?} -> id {id}"),
            IndexOutcome::Conflict(id) => println!("  {doc:?} already indexed as id {id}"),
        }
    }
    println!("  total documents: {}\n", index.len()?);

    println!("OR search for [마법, 특별]:");
    let or_tokens = vec!["마법".to_string(), "특별".to_string()];
    println!("  {:?}\n", index.search(&or_tokens, SearchMode::Or)?);

    println!("AND search for [마법, 특별]:");
    println!("  {:?}\n", index.search(&or_tokens, SearchMode::And)?);

    println!("PHRASE search for [마법, 특별]:");
    println!("  {:?}\n", index.search(&or_tokens, SearchMode::Phrase)?);

    println!("Complex query (마법 AND 특별) OR (같은 AND 비스크):");
    let tree = QueryNode::Branch {
        condition1: Box::new(QueryNode::Leaf(Condition {
            tokens: vec!["마법".to_string(), "특별".to_string()],
            mode: TokenSearchMode::And,
        })),
        condition2: Box::new(QueryNode::Leaf(Condition {
            tokens: vec!["같은".to_string(), "비스크".to_string()],
            mode: TokenSearchMode::And,
        })),
        mode: BoolMode::Or,
    };
    println!("  {:?}\n", index.search_complex(&tree)?);

    println!("Suggestions for prefix 마:");
    println!("  {:?}\n", index.search_suggestions("마")?);

    println!("Batched write of two more documents:");
    let mut batch = index.to_batch()?;
    batch.index("배치 문서 하나")?;
    batch.index("배치 문서 둘")?;
    batch.commit()?;
    println!("  total documents after commit: {}", index.len()?);

    engine.close();
    Ok(())
}
