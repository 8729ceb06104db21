// src/extract/roster.rs
//
// Generic roster heuristic. Most athletics sites render rosters as a table
// (or a table-shaped div) whose class or id names "roster"; the first row
// is assumed to be a header. Rows with fewer than three cells are dropped,
// everything past the third cell is ignored.

use crate::core::html::{self, attr_contains_ci, inner, next_tag_block_ci, open_tag, tag_attr};
use crate::model::Player;

pub fn extract(doc: &str) -> Vec<Player> {
    let Some(container) = find_container(doc) else {
        return Vec::new();
    };

    let mut players = Vec::new();
    let mut pos = 0usize;
    let mut header = true; // first row assumed header

    while let Some(tr) = next_tag_block_ci(container, "tr", pos) {
        pos = tr.end;
        if header {
            header = false;
            continue;
        }

        let cells = row_cells(inner(container, &tr));
        if cells.len() < 3 {
            continue;
        }

        let mut it = cells.into_iter();
        let name = it.next().unwrap_or_default();
        let position = it.next().filter(|c| !c.is_empty());
        let class_year = it.next().filter(|c| !c.is_empty());
        players.push(Player { name, position, class_year });
    }

    players
}

/// First match wins: table with "roster" in its class, table with "roster"
/// in its id, then a div with class exactly "roster-list".
fn find_container(doc: &str) -> Option<&str> {
    for attr in ["class", "id"] {
        let mut pos = 0usize;
        while let Some(b) = next_tag_block_ci(doc, "table", pos) {
            if attr_contains_ci(open_tag(doc, &b), attr, "roster") {
                return Some(inner(doc, &b));
            }
            pos = b.open_end; // nested tables count too
        }
    }

    let mut pos = 0usize;
    while let Some(b) = next_tag_block_ci(doc, "div", pos) {
        if tag_attr(open_tag(doc, &b), "class").as_deref() == Some("roster-list") {
            return Some(inner(doc, &b));
        }
        pos = b.open_end;
    }
    None
}

/// Cell text in document order, <td> and <th> alike.
fn row_cells(tr: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    loop {
        let td = next_tag_block_ci(tr, "td", pos);
        let th = next_tag_block_ci(tr, "th", pos);
        let cell = match (td, th) {
            (Some(a), Some(b)) => {
                if a.start < b.start {
                    a
                } else {
                    b
                }
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => break,
        };
        out.push(html::text(tr, &cell));
        pos = cell.end;
    }
    out
}
