//! # Version Ordering
//!
//! Version identifiers are directory names (`v1`, `v2`, `2024-01`). They
//! sort "naturally": runs of digits compare by numeric value, so `v2`
//! precedes `v10`.

use std::cmp::Ordering;

/// Compare two version identifiers in natural order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l, r) {
                    (Chunk::Digits(l), Chunk::Digits(r)) => {
                        let l = l.trim_start_matches('0');
                        let r = r.trim_start_matches('0');
                        l.len().cmp(&r.len()).then_with(|| l.cmp(r))
                    }
                    (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
                    (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
                    (Chunk::Text(l), Chunk::Text(r)) => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Sort version identifiers in place, in natural order.
pub fn sort_versions(versions: &mut [String]) {
    versions.sort_by(|a, b| natural_cmp(a, b));
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if digits {
            Chunk::Digits(chunk)
        } else {
            Chunk::Text(chunk)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs_compare_by_value() {
        assert_eq!(natural_cmp("v2", "v10"), Ordering::Less);
        assert_eq!(natural_cmp("v10", "v9"), Ordering::Greater);
        assert_eq!(natural_cmp("v1", "v1"), Ordering::Equal);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("v1", "v1-beta"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp("v01", "v2"), Ordering::Less);
        assert_ne!(natural_cmp("v01", "v1"), Ordering::Equal);
    }

    #[test]
    fn test_sort_versions() {
        let mut versions = vec![
            "v10".to_string(),
            "v2".to_string(),
            "v1".to_string(),
            "beta".to_string(),
        ];
        sort_versions(&mut versions);
        assert_eq!(versions, vec!["beta", "v1", "v2", "v10"]);
    }
}
