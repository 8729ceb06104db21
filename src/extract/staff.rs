// src/extract/staff.rs
//
// Generic coaching-staff heuristic. Staff pages are usually card grids:
// divs whose class mentions "staff" or "coach", each holding a name element
// and (usually) a title element. A card without a recognizable name is
// skipped; duplicates across nested cards are not collapsed.

use crate::core::html::{self, attr_contains_ci, inner, next_tag_block_ci, open_tag, TagBlock};
use crate::model::StaffMember;

const NAME_TAGS: &[&str] = &["h3", "h4", "a", "span"];
const TITLE_TAGS: &[&str] = &["p", "span", "div"];

pub fn extract(doc: &str) -> Vec<StaffMember> {
    let mut coaches = Vec::new();

    let mut pos = 0usize;
    while let Some(card) = next_tag_block_ci(doc, "div", pos) {
        pos = card.open_end; // nested cards are scanned too

        let open = open_tag(doc, &card);
        if !attr_contains_ci(open, "class", "staff") && !attr_contains_ci(open, "class", "coach") {
            continue;
        }

        let body = inner(doc, &card);
        let Some(name) = find_classed_text(body, NAME_TAGS, "name") else {
            continue;
        };
        let title = find_classed_text(body, TITLE_TAGS, "title");
        coaches.push(StaffMember { name, title });
    }

    coaches
}

/// Text of the first element (document order, any of `tags`) whose class
/// contains `needle`.
fn find_classed_text(body: &str, tags: &[&str], needle: &str) -> Option<String> {
    let mut best: Option<TagBlock> = None;
    for tag in tags {
        let mut pos = 0usize;
        while let Some(b) = next_tag_block_ci(body, tag, pos) {
            pos = b.open_end;
            if !attr_contains_ci(open_tag(body, &b), "class", needle) {
                continue;
            }
            if best.map(|x| b.start < x.start).unwrap_or(true) {
                best = Some(b);
            }
            break; // earliest match for this tag found; compare across tags
        }
    }
    let b = best?;
    let text = html::text(body, &b);
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_without_name_are_skipped() {
        let doc = r#"
            <div class="staff-card"><p class="title">Analyst</p></div>
            <div class="coach-bio">
              <h3 class="coach-name">Pat Smith</h3>
              <p class="coach-title">Defensive Coordinator</p>
            </div>"#;
        let staff = extract(doc);
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].name, "Pat Smith");
        assert_eq!(staff[0].title.as_deref(), Some("Defensive Coordinator"));
    }

    #[test]
    fn title_is_optional() {
        let doc = r#"<div class="staff"><span class="name">Lee Ray</span></div>"#;
        let staff = extract(doc);
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].name, "Lee Ray");
        assert_eq!(staff[0].title, None);
    }

    #[test]
    fn class_match_is_substring_and_case_insensitive() {
        let doc = r#"
            <div class="FootballCoaches grid">
              <h4 class="display-name">Sam Hill</h4>
              <div class="job-title">Head Coach</div>
            </div>"#;
        let staff = extract(doc);
        assert_eq!(staff.len(), 1);
        assert_eq!(staff[0].title.as_deref(), Some("Head Coach"));
    }

    #[test]
    fn earliest_name_element_wins_across_tags() {
        // The <a class="name"> appears before the <h3 class="name">.
        let doc = r#"
            <div class="staff-entry">
              <a class="name" href="/x">First Listed</a>
              <h3 class="name">Second Listed</h3>
            </div>"#;
        let staff = extract(doc);
        assert_eq!(staff[0].name, "First Listed");
    }

    #[test]
    fn non_staff_divs_ignored() {
        let doc = r#"<div class="nav"><span class="name">Not A Coach</span></div>"#;
        assert!(extract(doc).is_empty());
    }
}
