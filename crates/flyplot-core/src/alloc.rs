//! Optimized collection types.
//!
//! Re-exports the AHash-backed set so every flyplot crate hashes the same
//! way.

pub use ahash::AHashSet as HashSet;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashset_dedup() {
        let mut set = HashSet::new();
        assert!(set.insert("Time, s".to_string()));
        assert!(!set.insert("Time, s".to_string()));
        assert_eq!(set.len(), 1);
    }
}
