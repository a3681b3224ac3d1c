//! Frequency-ranked suggestions (spec §4.5 "Frequency variant"): wraps
//! `PrefixedCounter` so a completion chosen often outranks one chosen
//! rarely, without changing `Trie::suggest`'s plain lexicographic result.

use crate::containers::counter::PrefixedCounter;
use crate::core::error::Result;
use crate::store::Store;

pub struct TrieSuggestions<'a> {
    counter: PrefixedCounter<'a>,
}

impl<'a> TrieSuggestions<'a> {
    pub fn new(store: &'a Store, index_name: &str, max_size: usize) -> Result<Self> {
        let cf = store.cf(&format!("{index_name}_trie"))?;
        Ok(TrieSuggestions {
            counter: PrefixedCounter::new(store.raw(), cf, "suggest_rank".to_string(), Some(max_size)),
        })
    }

    /// Records that `completion` was chosen once more.
    pub fn record(&self, completion: &str) -> Result<()> {
        self.counter.increase(completion, 1).map(|_| ())
    }

    /// Top completions, highest count first.
    pub fn ranked(&self) -> Result<Vec<(String, u32)>> {
        self.counter.items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;

    #[test]
    fn ranked_orders_completions_by_choice_count() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig { storage_path: dir.path().to_path_buf(), ..EngineConfig::default() };
        let store = Store::open(&config).unwrap();
        let suggestions = TrieSuggestions::new(&store, "title", 10).unwrap();

        for _ in 0..3 {
            suggestions.record("특별").unwrap();
        }
        suggestions.record("특급").unwrap();

        let ranked = suggestions.ranked().unwrap();
        assert_eq!(ranked[0], ("특별".to_string(), 3));
        assert_eq!(ranked[1], ("특급".to_string(), 1));
    }
}
