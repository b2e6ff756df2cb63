//! Capability and consistency measures
//!
//! All functions here are pure and operate on plain slices so they can be
//! reused for any per-trial boolean, not only "verdict matched expected".

/// Capability measure: at least one trial succeeded
///
/// An empty list is not capable.
pub fn pass_at_k(outcomes: &[bool]) -> bool {
    outcomes.iter().any(|&ok| ok)
}

/// Consistency measure (pass^k): every trial succeeded
///
/// An empty list is not consistent: no evidence of consistency is not
/// consistency.
pub fn pass_caret_k(outcomes: &[bool]) -> bool {
    !outcomes.is_empty() && outcomes.iter().all(|&ok| ok)
}

/// Most frequent verdict
///
/// Ties are broken by first occurrence: among the verdicts sharing the
/// highest count, the one that appears earliest in `verdicts` wins. Returns
/// `None` for an empty list.
pub fn majority_verdict<S: AsRef<str>>(verdicts: &[S]) -> Option<&str> {
    // (verdict, count) in first-seen order
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for verdict in verdicts {
        let verdict = verdict.as_ref();
        match counts.iter_mut().find(|(v, _)| *v == verdict) {
            Some((_, count)) => *count += 1,
            None => counts.push((verdict, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (verdict, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((verdict, count));
        }
    }
    best.map(|(verdict, _)| verdict)
}

/// Whether every verdict is identical; false for an empty list
pub fn all_agree<S: AsRef<str>>(verdicts: &[S]) -> bool {
    match verdicts.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v.as_ref() == first.as_ref()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_at_k() {
        assert!(!pass_at_k(&[]));
        assert!(pass_at_k(&[true]));
        assert!(!pass_at_k(&[false]));
        assert!(pass_at_k(&[false, false, true]));
        assert!(!pass_at_k(&[false, false, false]));
    }

    #[test]
    fn test_pass_caret_k() {
        assert!(!pass_caret_k(&[]));
        assert!(pass_caret_k(&[true]));
        assert!(!pass_caret_k(&[false]));
        assert!(pass_caret_k(&[true, true, true]));
        assert!(!pass_caret_k(&[true, false, true]));
    }

    #[test]
    fn test_measures_agree_on_single_trial() {
        for outcome in [true, false] {
            assert_eq!(pass_at_k(&[outcome]), outcome);
            assert_eq!(pass_caret_k(&[outcome]), outcome);
        }
    }

    #[test]
    fn test_single_false_effect() {
        // Every position of one `false` among otherwise-true outcomes
        for len in 2..=6 {
            for pos in 0..len {
                let mut outcomes = vec![true; len];
                outcomes[pos] = false;
                assert!(pass_at_k(&outcomes));
                assert!(!pass_caret_k(&outcomes));
            }
        }
    }

    #[test]
    fn test_exhaustive_small_lists() {
        // All boolean lists up to length 5
        for len in 0..=5u32 {
            for bits in 0..(1u32 << len) {
                let outcomes: Vec<bool> = (0..len).map(|i| bits & (1 << i) != 0).collect();
                assert_eq!(pass_at_k(&outcomes), outcomes.contains(&true));
                assert_eq!(
                    pass_caret_k(&outcomes),
                    !outcomes.is_empty() && !outcomes.contains(&false)
                );
            }
        }
    }

    #[test]
    fn test_majority_verdict() {
        assert_eq!(majority_verdict::<&str>(&[]), None);
        assert_eq!(majority_verdict(&["PASS"]), Some("PASS"));
        assert_eq!(
            majority_verdict(&["PASS", "PASS", "PASS", "FAIL", "PASS"]),
            Some("PASS")
        );
        assert_eq!(majority_verdict(&["FAIL", "PASS", "PASS"]), Some("PASS"));
    }

    #[test]
    fn test_majority_tie_breaks_on_first_seen() {
        assert_eq!(majority_verdict(&["A", "B", "A", "B"]), Some("A"));
        assert_eq!(majority_verdict(&["B", "A", "A", "B"]), Some("B"));
        assert_eq!(majority_verdict(&["C", "A", "B", "A", "B"]), Some("A"));
    }

    #[test]
    fn test_majority_accepts_owned_strings() {
        let verdicts = vec!["ERROR".to_string(), "PASS".to_string(), "ERROR".to_string()];
        assert_eq!(majority_verdict(&verdicts), Some("ERROR"));
    }

    #[test]
    fn test_all_agree() {
        assert!(!all_agree::<&str>(&[]));
        assert!(all_agree(&["PASS"]));
        assert!(all_agree(&["FAIL", "FAIL", "FAIL"]));
        assert!(!all_agree(&["PASS", "PASS", "FAIL"]));
    }
}
