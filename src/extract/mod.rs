// src/extract/mod.rs
//
// Heuristic extraction of records from fetched pages. Athletics-site markup
// varies, so extraction is pluggable per site: the tables below map a site
// id (host name) to a dedicated strategy, and everything else falls back to
// the generic class/id pattern heuristics. Strategies never fail; a page
// that doesn't match yields an empty list, indistinguishable from a page
// with no data.

pub mod portal;
pub mod roster;
pub mod staff;

use crate::model::{Player, StaffMember};

pub type RosterFn = fn(&str) -> Vec<Player>;
pub type StaffFn = fn(&str) -> Vec<StaffMember>;

// Per-site overrides. Add entries as site-specific markup gets mapped.
const ROSTER_SITES: &[(&str, RosterFn)] = &[];
const STAFF_SITES: &[(&str, StaffFn)] = &[];

pub fn roster_for_site(site: &str) -> RosterFn {
    ROSTER_SITES
        .iter()
        .find(|(s, _)| *s == site)
        .map(|(_, f)| *f)
        .unwrap_or(roster::extract)
}

pub fn staff_for_site(site: &str) -> StaffFn {
    STAFF_SITES
        .iter()
        .find(|(s, _)| *s == site)
        .map(|(_, f)| *f)
        .unwrap_or(staff::extract)
}

/// Site identifier of a URL: the host, scheme and path stripped.
pub fn site_id(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_id_strips_scheme_and_path() {
        assert_eq!(site_id("https://rolltide.com/sports/football/roster"), "rolltide.com");
        assert_eq!(site_id("http://x.test"), "x.test");
        assert_eq!(site_id("x.test/path"), "x.test");
    }

    #[test]
    fn unknown_site_falls_back_to_generic() {
        let f = roster_for_site("nobody.example");
        assert_eq!(f as usize, roster::extract as usize);
    }
}
