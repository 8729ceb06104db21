// src/config/consts.rs

use std::time::Duration;

// Net config
pub const USER_AGENT: &str = "cfb_scrape/0.1 (Recruiting Research Bot; contact@cfbscrape.dev)";
pub const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

// Scrape
pub const SCRAPE_DELAY: Duration = Duration::from_secs(2); // be polite
pub const MAX_RETRIES: u32 = 3;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Rescrape intervals per priority tier
pub const TIER_1_INTERVAL_HOURS: i64 = 24;  // daily for top programs
pub const TIER_2_INTERVAL_HOURS: i64 = 72;  // every 3 days
pub const TIER_3_INTERVAL_HOURS: i64 = 168; // weekly

// Persistence
pub const REST_PATH: &str = "/rest/v1/";
pub const VERIFICATION_SOURCE: &str = "scraper";

// Tables (owned externally, never created here)
pub const PROGRAMS_TABLE: &str = "college_programs";
pub const COACHES_TABLE: &str = "college_coaches";
pub const PORTAL_TABLE: &str = "transfer_portal";
pub const STAFF_CHANGES_TABLE: &str = "staff_changes";

// Portal status literal this layer actually depends on; everything else
// is free-form and written through unvalidated.
pub const STATUS_IN_PORTAL: &str = "in_portal";
