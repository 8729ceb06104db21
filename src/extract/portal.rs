// src/extract/portal.rs
//
// Transfer-portal sources. Tracking-site markup is too heterogeneous for
// one heuristic, so each source carries its own parser; the source list
// ships empty until individual sites are mapped.

use log::info;

use crate::core::net::Fetcher;
use crate::model::PortalEntry;

pub type PortalFn = fn(&str) -> Vec<PortalEntry>;

pub struct PortalSource {
    pub site: &'static str,
    pub url: &'static str,
    pub parse: PortalFn,
}

// Populate as tracking sites get dedicated parsers.
pub const SOURCES: &[PortalSource] = &[];

/// Fetch and parse every registered source. A source that fails to fetch
/// contributes nothing; there is no error to report.
pub fn scrape_sources(fetcher: &Fetcher) -> Vec<PortalEntry> {
    let mut entries = Vec::new();
    for source in SOURCES {
        match fetcher.fetch_page(source.url) {
            Some(doc) => {
                let found = (source.parse)(&doc);
                info!("{}: {} portal entries", source.site, found.len());
                entries.extend(found);
            }
            None => info!("{}: no document", source.site),
        }
    }
    entries
}
