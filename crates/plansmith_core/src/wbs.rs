//! Dotted WBS codes (`1`, `1.2`, `1.2.3`).
//!
//! # Invariants
//! - A valid code is one or more positive integers joined by `.`.
//! - Level is the number of separators, so root codes are level 0.
//! - Ordering compares segments numerically: `1.9 < 1.10`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

static WBS_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9][0-9]*(\.[1-9][0-9]*)*$").expect("valid wbs code regex"));

/// Code for a new task placed after `sibling_count` existing siblings.
pub fn generate_wbs_code(parent: Option<&str>, sibling_count: usize) -> String {
    match parent {
        Some(parent) if !parent.is_empty() => format!("{parent}.{}", sibling_count + 1),
        _ => (sibling_count + 1).to_string(),
    }
}

/// `None` for root-level codes.
pub fn parent_wbs_code(code: &str) -> Option<&str> {
    code.rsplit_once('.').map(|(parent, _)| parent)
}

pub fn wbs_level(code: &str) -> usize {
    code.matches('.').count()
}

/// Segment-wise comparison; numeric segments compare as numbers.
pub fn compare_wbs_codes(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ordering = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    _ => x.cmp(y),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

pub fn is_descendant_of(code: &str, ancestor: &str) -> bool {
    code.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('.'))
}

/// Direct children of `parent` among `all`; `None` selects root codes.
pub fn children_codes<'a>(all: &[&'a str], parent: Option<&str>) -> Vec<&'a str> {
    all.iter()
        .copied()
        .filter(|code| parent_wbs_code(code) == parent)
        .collect()
}

pub fn is_valid_wbs_code(code: &str) -> bool {
    WBS_CODE_RE.is_match(code)
}

#[cfg(test)]
mod tests {
    use super::{
        children_codes, compare_wbs_codes, generate_wbs_code, is_descendant_of,
        is_valid_wbs_code, parent_wbs_code, wbs_level,
    };
    use std::cmp::Ordering;

    #[test]
    fn generates_root_and_child_codes() {
        assert_eq!(generate_wbs_code(None, 0), "1");
        assert_eq!(generate_wbs_code(Some("2.1"), 2), "2.1.3");
        assert_eq!(generate_wbs_code(Some(""), 4), "5");
    }

    #[test]
    fn parent_and_level() {
        assert_eq!(parent_wbs_code("1.2.3"), Some("1.2"));
        assert_eq!(parent_wbs_code("4"), None);
        assert_eq!(wbs_level("1.2.3"), 2);
        assert_eq!(wbs_level("7"), 0);
    }

    #[test]
    fn numeric_segment_ordering() {
        assert_eq!(compare_wbs_codes("1.9", "1.10"), Ordering::Less);
        assert_eq!(compare_wbs_codes("2", "10"), Ordering::Less);
        assert_eq!(compare_wbs_codes("1.2", "1.2.1"), Ordering::Less);
        assert_eq!(compare_wbs_codes("3.1", "3.1"), Ordering::Equal);

        let mut codes = vec!["1.10", "2", "1.2", "1"];
        codes.sort_by(|a, b| compare_wbs_codes(a, b));
        assert_eq!(codes, vec!["1", "1.2", "1.10", "2"]);
    }

    #[test]
    fn descendants_need_a_separator() {
        assert!(is_descendant_of("1.2.3", "1.2"));
        assert!(!is_descendant_of("1.20", "1.2"));
        assert!(!is_descendant_of("1.2", "1.2"));
    }

    #[test]
    fn children_are_direct_only() {
        let all = ["1", "1.1", "1.1.1", "1.2", "2"];
        assert_eq!(children_codes(&all, Some("1")), vec!["1.1", "1.2"]);
        assert_eq!(children_codes(&all, None), vec!["1", "2"]);
    }

    #[test]
    fn validates_dotted_positive_integers() {
        assert!(is_valid_wbs_code("1"));
        assert!(is_valid_wbs_code("12.3.40"));
        assert!(!is_valid_wbs_code(""));
        assert!(!is_valid_wbs_code("1..2"));
        assert!(!is_valid_wbs_code("0.1"));
        assert!(!is_valid_wbs_code("1.a"));
    }
}
