//! `sanitize(s)` removes the fixed set of punctuation characters the
//! tokenizer never wants to see, matching the original's
//! `_SPECIAL_CHARACTERS` constant exactly.

const SPECIAL_CHARACTERS: &str = "@_!#$%^&*()<>?/\\|}{~:]\",";

pub fn sanitize(s: &str) -> String {
    s.chars().filter(|c| !SPECIAL_CHARACTERS.contains(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_special_characters() {
        assert_eq!(sanitize("hello@world!"), "helloworld");
        assert_eq!(sanitize("그 비스크 돌은 사랑을 한다"), "그 비스크 돌은 사랑을 한다");
    }
}
