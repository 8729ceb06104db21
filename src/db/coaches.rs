// src/db/coaches.rs

use chrono::Utc;
use serde_json::json;

use super::{rows, stamp, Db, DbError, Method, RestRequest};
use crate::config::consts::COACHES_TABLE;
use crate::model::Coach;

/// Operations on `college_coaches`. (program_id, first_name, last_name) is
/// the natural key: re-scraping the same name overwrites, never duplicates.
pub struct Coaches<'a> {
    pub(crate) db: &'a Db,
}

impl Coaches<'_> {
    /// Insert-or-update on the natural key; the incoming record's fields win.
    pub fn upsert(&self, coach: &Coach) -> Result<(), DbError> {
        let body = stamp(serde_json::to_value(coach)?);
        self.db.send(&RestRequest {
            method: Method::Post,
            table: COACHES_TABLE,
            query: vec![(s!("on_conflict"), s!("program_id,first_name,last_name"))],
            body: Some(body),
            prefer: Some("resolution=merge-duplicates"),
        })?;
        Ok(())
    }

    pub fn by_program(&self, program_id: &str) -> Result<Vec<Coach>, DbError> {
        let v = self.db.send(&RestRequest {
            method: Method::Get,
            table: COACHES_TABLE,
            query: vec![
                (s!("select"), s!("*")),
                (s!("program_id"), join!("eq.", program_id)),
            ],
            body: None,
            prefer: None,
        })?;
        rows(v)
    }

    /// Departures are not auto-detected; someone has to call this.
    pub fn mark_inactive(&self, coach_id: &str) -> Result<(), DbError> {
        self.db.send(&RestRequest {
            method: Method::Patch,
            table: COACHES_TABLE,
            query: vec![(s!("id"), join!("eq.", coach_id))],
            body: Some(json!({
                "is_active": false,
                "updated_at": Utc::now(),
            })),
            prefer: None,
        })?;
        Ok(())
    }
}
