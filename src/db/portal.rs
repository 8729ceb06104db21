// src/db/portal.rs

use chrono::Utc;
use serde_json::json;

use super::{rows, stamp, Db, DbError, Method, RestRequest};
use crate::config::consts::{PORTAL_TABLE, STATUS_IN_PORTAL};
use crate::model::{Destination, PortalEntry};

/// Operations on `transfer_portal`. Status values are written through as
/// given — nothing stops a committed entry from moving back to in_portal.
pub struct Portal<'a> {
    pub(crate) db: &'a Db,
}

impl Portal<'_> {
    pub fn insert(&self, entry: &PortalEntry) -> Result<(), DbError> {
        let body = stamp(serde_json::to_value(entry)?);
        self.db.send(&RestRequest {
            method: Method::Post,
            table: PORTAL_TABLE,
            query: Vec::new(),
            body: Some(body),
            prefer: None,
        })?;
        Ok(())
    }

    /// One-way status write. A destination, when present, is folded into
    /// the same update (school + committed date).
    pub fn update_status(
        &self,
        id: &str,
        status: &str,
        destination: Option<&Destination>,
    ) -> Result<(), DbError> {
        let mut body = json!({
            "status": status,
            "last_verified_at": Utc::now(),
        });
        if let Some(dest) = destination {
            let extra = serde_json::to_value(dest)?;
            if let (Some(map), serde_json::Value::Object(extra)) = (body.as_object_mut(), extra) {
                map.extend(extra);
            }
        }
        self.db.send(&RestRequest {
            method: Method::Patch,
            table: PORTAL_TABLE,
            query: vec![(s!("id"), join!("eq.", id))],
            body: Some(body),
            prefer: None,
        })?;
        Ok(())
    }

    /// Everyone currently sitting in the portal.
    pub fn in_portal(&self) -> Result<Vec<PortalEntry>, DbError> {
        let v = self.db.send(&RestRequest {
            method: Method::Get,
            table: PORTAL_TABLE,
            query: vec![
                (s!("select"), s!("*")),
                (s!("status"), join!("eq.", STATUS_IN_PORTAL)),
            ],
            body: None,
            prefer: None,
        })?;
        rows(v)
    }
}
