//! Beat-pair generation for halved and quartered intervals
//!
//! **[CAP-PAIR-010]** Halved pairing: beat i ↔ beat i+N/2 for the first half
//! **[CAP-PAIR-020]** Quartered pairing: beat i ↔ beat (i+N/4) mod N for the
//! first three quarters, comparing each quarter to the next via modular
//! indexing
//!
//! Preconditions are checked explicitly; a failed precondition yields an
//! empty list, which callers treat as "not applicable" rather than an error.

/// Index pairs for the halved interval
///
/// Requires an even length ≥2; returns `(i, i + n/2)` for `i` in `[0, n/2)`.
pub fn halved_pairs(n: usize) -> Vec<(usize, usize)> {
    if n < 2 || n % 2 != 0 {
        return Vec::new();
    }
    let half = n / 2;
    (0..half).map(|i| (i, i + half)).collect()
}

/// Index pairs for the quartered interval
///
/// Requires a length divisible by 4 (and ≥4); returns
/// `(i, (i + n/4) mod n)` for `i` in `[0, 3n/4)`.
pub fn quartered_pairs(n: usize) -> Vec<(usize, usize)> {
    if n < 4 || n % 4 != 0 {
        return Vec::new();
    }
    let quarter = n / 4;
    (0..3 * quarter).map(|i| (i, (i + quarter) % n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halved_preconditions() {
        assert!(halved_pairs(0).is_empty());
        assert!(halved_pairs(1).is_empty());
        assert!(halved_pairs(7).is_empty());
    }

    #[test]
    fn test_halved_length_8() {
        let pairs = halved_pairs(8);
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs, vec![(0, 4), (1, 5), (2, 6), (3, 7)]);
    }

    #[test]
    fn test_halved_length_2() {
        assert_eq!(halved_pairs(2), vec![(0, 1)]);
    }

    #[test]
    fn test_quartered_preconditions() {
        assert!(quartered_pairs(0).is_empty());
        assert!(quartered_pairs(2).is_empty());
        assert!(quartered_pairs(6).is_empty());
        assert!(quartered_pairs(10).is_empty());
    }

    #[test]
    fn test_quartered_length_8() {
        let pairs = quartered_pairs(8);
        assert_eq!(pairs.len(), 6);
        assert_eq!(
            pairs,
            vec![(0, 2), (1, 3), (2, 4), (3, 5), (4, 6), (5, 7)]
        );
    }

    #[test]
    fn test_quartered_wraps_modularly() {
        let pairs = quartered_pairs(4);
        assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
        let pairs = quartered_pairs(12);
        assert_eq!(pairs.len(), 9);
        assert_eq!(pairs[8], (8, 11));
    }
}
