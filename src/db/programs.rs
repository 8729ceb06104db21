// src/db/programs.rs

use serde_json::json;

use super::{rows, Db, DbError, Method, RestRequest};
use crate::config::consts::PROGRAMS_TABLE;
use crate::model::{Program, Tier};

/// Operations on `college_programs`. Rows are created out-of-band; this
/// system only reads candidates and bumps verification timestamps.
pub struct Programs<'a> {
    pub(crate) db: &'a Db,
}

impl Programs<'_> {
    /// Active programs, optionally narrowed to one priority tier.
    pub fn active(&self, tier: Option<Tier>) -> Result<Vec<Program>, DbError> {
        let mut query = vec![(s!("select"), s!("*")), (s!("is_active"), s!("eq.true"))];
        if let Some(t) = tier {
            query.push((s!("priority_tier"), join!("eq.", &t.as_i16().to_string())));
        }
        let v = self.db.send(&RestRequest {
            method: Method::Get,
            table: PROGRAMS_TABLE,
            query,
            body: None,
            prefer: None,
        })?;
        rows(v)
    }

    pub fn by_id(&self, id: &str) -> Result<Option<Program>, DbError> {
        let v = self.db.send(&RestRequest {
            method: Method::Get,
            table: PROGRAMS_TABLE,
            query: vec![
                (s!("select"), s!("*")),
                (s!("id"), join!("eq.", id)),
                (s!("limit"), s!("1")),
            ],
            body: None,
            prefer: None,
        })?;
        Ok(rows::<Program>(v)?.into_iter().next())
    }

    /// Mark a program as freshly verified by `source`.
    pub fn update_verification(&self, id: &str, source: &str) -> Result<(), DbError> {
        self.db.send(&RestRequest {
            method: Method::Patch,
            table: PROGRAMS_TABLE,
            query: vec![(s!("id"), join!("eq.", id))],
            body: Some(json!({
                "last_verified_at": chrono::Utc::now(),
                "verification_source": source,
            })),
            prefer: None,
        })?;
        Ok(())
    }
}
