//! The Korean morphological analyzer is an external collaborator (spec
//! §1): "assumed to return a list of morphs for a Unicode string." This
//! trait is the seam; `WhitespaceMorphAnalyzer` is the batteries-included
//! default so the crate is usable standalone. Embedders wire in a real
//! analyzer (e.g. a mecab binding) by implementing `MorphAnalyzer`.
pub trait MorphAnalyzer: Send + Sync {
    fn morphs(&self, text: &str) -> Vec<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceMorphAnalyzer;

impl MorphAnalyzer for WhitespaceMorphAnalyzer {
    fn morphs(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        let morphs = WhitespaceMorphAnalyzer.morphs("그 비스크 돌은");
        assert_eq!(morphs, vec!["그", "비스크", "돌은"]);
    }
}
