// src/model.rs
//
// Flat records mirroring the four externally-owned tables, plus the
// scraped-but-not-yet-persisted shapes the extractors produce. Writable
// structs keep `id` optional and skip it on serialization so inserts and
// upserts leave key generation to the database.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::consts::{
    TIER_1_INTERVAL_HOURS, TIER_2_INTERVAL_HOURS, TIER_3_INTERVAL_HOURS,
};

/// Priority bucket controlling rescrape frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    One = 1,
    Two = 2,
    Three = 3,
}

#[derive(Debug, Error)]
#[error("priority tier out of range (1..=3): {0}")]
pub struct TierOutOfRange(pub i64);

impl Tier {
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn interval_hours(self) -> i64 {
        match self {
            Tier::One => TIER_1_INTERVAL_HOURS,
            Tier::Two => TIER_2_INTERVAL_HOURS,
            Tier::Three => TIER_3_INTERVAL_HOURS,
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = TierOutOfRange;

    fn try_from(v: u8) -> Result<Self, TierOutOfRange> {
        match v {
            1 => Ok(Tier::One),
            2 => Ok(Tier::Two),
            3 => Ok(Tier::Three),
            other => Err(TierOutOfRange(other as i64)),
        }
    }
}

/// A tracked college program. Created out-of-band; this system only ever
/// touches its verification timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct Program {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub roster_url: Option<String>,
    #[serde(default)]
    pub staff_url: Option<String>,
    pub is_active: bool,
    pub priority_tier: i16,
    #[serde(default)]
    pub last_verified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub verification_source: Option<String>,
}

/// One coach row. Natural key for upsert: (program_id, first_name, last_name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coach {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub program_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub is_active: bool,
}

/// Roster row as scraped: first three cells of a roster table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub position: Option<String>,
    pub class_year: Option<String>,
}

/// Staff-page card as scraped; split into first/last only at save time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffMember {
    pub name: String,
    pub title: Option<String>,
}

/// Transfer-portal row. `status` is free-form at this layer; only
/// "in_portal" is treated specially (insert default, active filter).
/// Status transitions are one-way writes with no legality check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub position: Option<String>,
    pub origin_school_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_school_name: Option<String>,
    pub entry_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_date: Option<NaiveDate>,
    pub status: String,
}

impl PortalEntry {
    /// First sighting of a player in the portal: status "in_portal",
    /// entry date defaulting to today.
    pub fn first_sighting(
        first_name: String,
        last_name: String,
        position: Option<String>,
        origin_school_name: String,
        entry_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: None,
            first_name,
            last_name,
            position,
            origin_school_name,
            destination_school_name: None,
            entry_date: entry_date.unwrap_or_else(|| Utc::now().date_naive()),
            committed_date: None,
            status: s!(crate::config::consts::STATUS_IN_PORTAL),
        }
    }
}

/// Destination half of a commitment, merged into the status update.
#[derive(Debug, Clone, Serialize)]
pub struct Destination {
    pub destination_school_name: String,
    pub committed_date: NaiveDate,
}

/// Append-only log record of a detected coaching change. Write-only here.
#[derive(Debug, Clone, Serialize)]
pub struct StaffChange {
    pub coach_name: String,
    pub change_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_program_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_title: Option<String>,
    pub announced_date: NaiveDate,
    pub source: String,
}
