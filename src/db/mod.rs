// src/db/mod.rs
//
// Thin persistence layer over the hosted database's REST interface.
// Straight CRUD: no transactions, no optimistic concurrency. Concurrent
// writers to the same row race with last-write-wins semantics. Unlike
// fetch failures, persistence failures DO surface as errors.

pub mod client;
pub mod coaches;
pub mod portal;
pub mod programs;
pub mod staff_changes;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::config::consts::VERIFICATION_SOURCE;
use crate::config::Settings;

pub use client::{Backend, DbError, Method, RestRequest, UreqBackend};

pub struct Db {
    backend: Box<dyn Backend>,
}

impl Db {
    pub fn connect(settings: &Settings) -> Self {
        Self::with_backend(Box::new(UreqBackend::new(settings)))
    }

    pub fn with_backend(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn programs(&self) -> programs::Programs<'_> {
        programs::Programs { db: self }
    }

    pub fn coaches(&self) -> coaches::Coaches<'_> {
        coaches::Coaches { db: self }
    }

    pub fn portal(&self) -> portal::Portal<'_> {
        portal::Portal { db: self }
    }

    pub fn staff_changes(&self) -> staff_changes::StaffChanges<'_> {
        staff_changes::StaffChanges { db: self }
    }

    pub(crate) fn send(&self, req: &RestRequest) -> Result<Value, DbError> {
        self.backend.send(req)
    }
}

/// Decode a REST row array into typed records.
pub(crate) fn rows<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, DbError> {
    Ok(serde_json::from_value(value)?)
}

/// Stamp a write payload as produced by automated scraping.
pub(crate) fn stamp(mut payload: Value) -> Value {
    if let Some(map) = payload.as_object_mut() {
        map.insert(s!("last_verified_at"), json!(Utc::now()));
        map.insert(s!("verification_source"), json!(VERIFICATION_SOURCE));
    }
    payload
}
