//! Acceptance-criteria extraction from a task description document.
//!
//! A single-pass line classifier with three explicit states. Only the
//! first "## Acceptance Criteria" section in the document is honored;
//! once a subsequent heading closes it, scanning is done.

use regex_lite::Regex;
use std::sync::LazyLock;

static CRITERIA_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^##\s*Acceptance Criteria").unwrap());
static SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^##\s").unwrap());
static CHECKLIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[-*]\s*\[[ x]\]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Before,
    InCriteria,
    After,
}

/// Collect the checklist lines under the first "## Acceptance Criteria"
/// heading, verbatim (checkbox marker included), in document order.
/// Returns an empty list when the heading is absent or holds no checklist
/// lines before the next heading.
pub fn extract_acceptance_criteria(content: &str) -> Vec<String> {
    let mut state = ScanState::Before;
    let mut criteria = Vec::new();

    for line in content.lines() {
        match state {
            ScanState::Before => {
                if CRITERIA_HEADING.is_match(line) {
                    state = ScanState::InCriteria;
                }
            }
            ScanState::InCriteria => {
                if SECTION_HEADING.is_match(line) {
                    state = ScanState::After;
                } else if CHECKLIST_ITEM.is_match(line) {
                    criteria.push(line.to_string());
                }
            }
            ScanState::After => break,
        }
    }

    criteria
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_heading_returns_empty() {
        let doc = "# Task\n- [ ] looks like a criterion but has no section\n";
        assert!(extract_acceptance_criteria(doc).is_empty());
    }

    #[test]
    fn heading_with_no_items_returns_empty() {
        let doc = "## Acceptance Criteria\nSome prose, no checkboxes.\n## Notes\n- [ ] too late\n";
        assert!(extract_acceptance_criteria(doc).is_empty());
    }

    #[test]
    fn captures_items_verbatim_in_order() {
        let doc = "\
# Task 3

## Acceptance Criteria
- [ ] Login form validates email
prose between items is ignored
- [x] Session cookie is HttpOnly
* [X] Star bullets count too

## Implementation Notes
- [ ] not a criterion
";
        let items = extract_acceptance_criteria(doc);
        assert_eq!(
            items,
            vec![
                "- [ ] Login form validates email",
                "- [x] Session cookie is HttpOnly",
                "* [X] Star bullets count too",
            ]
        );
    }

    #[test]
    fn heading_match_is_case_insensitive() {
        let doc = "## ACCEPTANCE CRITERIA\n- [ ] shouty heading still counts\n";
        assert_eq!(extract_acceptance_criteria(doc).len(), 1);
    }

    #[test]
    fn deeper_headings_do_not_close_the_section() {
        let doc = "\
## Acceptance Criteria
- [ ] first
### Details
- [ ] still inside
## Next
- [ ] outside
";
        let items = extract_acceptance_criteria(doc);
        assert_eq!(items, vec!["- [ ] first", "- [ ] still inside"]);
    }

    #[test]
    fn second_criteria_section_is_ignored() {
        let doc = "\
## Acceptance Criteria
- [ ] from the first section
## Break
## Acceptance Criteria
- [ ] from the second section
";
        let items = extract_acceptance_criteria(doc);
        assert_eq!(items, vec!["- [ ] from the first section"]);
    }

    #[test]
    fn items_before_the_heading_are_never_captured() {
        let doc = "- [ ] early item\n## Acceptance Criteria\n- [ ] real item\n";
        let items = extract_acceptance_criteria(doc);
        assert_eq!(items, vec!["- [ ] real item"]);
    }
}
