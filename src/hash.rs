//! Content-hash dedup (spec §1, §4.3): a 128-bit non-cryptographic hash,
//! stable across runs, rendered as the 32-hex-digit key used by the
//! forward index's hash→id map.

use xxhash_rust::xxh3::xxh3_128;

use crate::store::keys::encode_hash;

pub fn content_hash(doc: &str) -> u128 {
    xxh3_128(doc.as_bytes())
}

pub fn content_hash_key(doc: &str) -> String {
    encode_hash(content_hash(doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_content_sensitive() {
        let a = content_hash("그 비스크 돌은 사랑을 한다");
        let b = content_hash("그 비스크 돌은 사랑을 한다");
        let c = content_hash("다른 문서");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_key_is_32_hex_digits() {
        assert_eq!(content_hash_key("hello").len(), 32);
    }
}
