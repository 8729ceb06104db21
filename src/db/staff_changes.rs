// src/db/staff_changes.rs

use super::{Db, DbError, Method, RestRequest};
use crate::config::consts::STAFF_CHANGES_TABLE;
use crate::model::StaffChange;

/// Append-only log of detected coaching changes. Never read back here.
pub struct StaffChanges<'a> {
    pub(crate) db: &'a Db,
}

impl StaffChanges<'_> {
    pub fn log(&self, change: &StaffChange) -> Result<(), DbError> {
        self.db.send(&RestRequest {
            method: Method::Post,
            table: STAFF_CHANGES_TABLE,
            query: Vec::new(),
            body: Some(serde_json::to_value(change)?),
            prefer: None,
        })?;
        Ok(())
    }
}
