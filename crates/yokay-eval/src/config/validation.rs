//! Schema validation for suite definitions
//!
//! Every rule is checked and every violation is collected; validation never
//! stops at the first problem.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::suite::{RawSuite, RawTestCase, SuiteConfig, TestCase, MAX_K, SUBJECT_PREFIX};
use crate::error::{ConfigError, Violation};

static SUBJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{}-[a-z-]+$", SUBJECT_PREFIX)).expect("Invalid subject regex")
});

static TEST_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,3}-\d{3}$").expect("Invalid test id regex"));

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Validate a raw suite and build the immutable config
pub(super) fn validate(
    raw: RawSuite,
    origin: &str,
    default_k: u32,
) -> Result<SuiteConfig, ConfigError> {
    let mut violations = Vec::new();

    match raw.agent.as_deref() {
        None => violations.push(Violation::new("agent", "is required")),
        Some(agent) if !SUBJECT_PATTERN.is_match(agent) => violations.push(Violation::new(
            "agent",
            format!("{:?} must match {}", agent, SUBJECT_PATTERN.as_str()),
        )),
        Some(_) => {}
    }

    match raw.consistency_threshold {
        None => violations.push(Violation::new("consistency_threshold", "is required")),
        Some(t) if !(0.0..=1.0).contains(&t) => violations.push(Violation::new(
            "consistency_threshold",
            format!("{} must be within [0.0, 1.0]", t),
        )),
        Some(_) => {}
    }

    if let Some(spec) = &raw.grader {
        if let Err(e) = spec.build() {
            violations.push(Violation::new("grader", e.to_string()));
        }
    }

    let raw_cases = raw.test_cases.unwrap_or_default();
    if raw_cases.is_empty() {
        violations.push(Violation::new("test_cases", "must contain at least one test case"));
    }

    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut test_cases = Vec::with_capacity(raw_cases.len());

    for (index, case) in raw_cases.into_iter().enumerate() {
        let field = |name: &str| format!("test_cases[{}].{}", index, name);

        if let Some(id) = non_blank(&case.id) {
            if let Some(&first) = first_seen.get(id) {
                violations.push(Violation::new(
                    field("id"),
                    format!(
                        "duplicate id {} (test_cases[{}] and test_cases[{}])",
                        id, first, index
                    ),
                ));
            } else {
                first_seen.insert(id.to_string(), index);
            }
        }

        if let Some(tc) = validate_case(case, default_k, &field, &mut violations) {
            test_cases.push(tc);
        }
    }

    if !violations.is_empty() {
        return Err(ConfigError::Invalid {
            origin: origin.to_string(),
            violations,
        });
    }

    Ok(SuiteConfig {
        agent: raw.agent.unwrap_or_default(),
        consistency_threshold: raw.consistency_threshold.unwrap_or_default(),
        test_cases,
        grader: raw.grader,
        origin: origin.to_string(),
    })
}

fn validate_case(
    case: RawTestCase,
    default_k: u32,
    field: &dyn Fn(&str) -> String,
    violations: &mut Vec<Violation>,
) -> Option<TestCase> {
    let before = violations.len();

    match non_blank(&case.id) {
        None => violations.push(Violation::new(field("id"), "is required")),
        Some(id) if !TEST_ID_PATTERN.is_match(id) => violations.push(Violation::new(
            field("id"),
            format!("{:?} must match {}", id, TEST_ID_PATTERN.as_str()),
        )),
        Some(_) => {}
    }

    if non_blank(&case.expected).is_none() {
        violations.push(Violation::new(field("expected"), "must not be empty"));
    }

    if non_blank(&case.rationale).is_none() {
        violations.push(Violation::new(field("rationale"), "must not be empty"));
    }

    let k = match case.k.unwrap_or(0) {
        0 => default_k,
        k if (1..=i64::from(MAX_K)).contains(&k) => k as u32,
        k => {
            violations.push(Violation::new(
                field("k"),
                format!("{} must be 0 (default) or within 1..={}", k, MAX_K),
            ));
            default_k
        }
    };

    match &case.input {
        None => violations.push(Violation::new(field("input"), "is required")),
        Some(input) => {
            if input.task_title.trim().is_empty() {
                violations.push(Violation::new(field("input.task_title"), "must not be empty"));
            }
            if !input.has_payload() {
                violations.push(Violation::new(
                    field("input"),
                    "needs at least one of task_description or implementation",
                ));
            }
        }
    }

    if violations.len() > before {
        return None;
    }

    Some(TestCase {
        id: case.id.unwrap_or_default(),
        name: case.name.unwrap_or_default(),
        input: case.input.unwrap_or_default(),
        expected: case.expected.unwrap_or_default(),
        k,
        rationale: case.rationale.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_pattern() {
        assert!(SUBJECT_PATTERN.is_match("yokay-spec-reviewer"));
        assert!(SUBJECT_PATTERN.is_match("yokay-brainstormer"));
        assert!(!SUBJECT_PATTERN.is_match("yokay-"));
        assert!(!SUBJECT_PATTERN.is_match("other-agent"));
        assert!(!SUBJECT_PATTERN.is_match("yokay-Spec"));
        assert!(!SUBJECT_PATTERN.is_match("yokay-spec2"));
    }

    #[test]
    fn test_test_id_pattern() {
        assert!(TEST_ID_PATTERN.is_match("BR-001"));
        assert!(TEST_ID_PATTERN.is_match("SRV-123"));
        assert!(!TEST_ID_PATTERN.is_match("B-001"));
        assert!(!TEST_ID_PATTERN.is_match("ABCD-001"));
        assert!(!TEST_ID_PATTERN.is_match("br-001"));
        assert!(!TEST_ID_PATTERN.is_match("BR-01"));
        assert!(!TEST_ID_PATTERN.is_match("BR-0001"));
    }
}
