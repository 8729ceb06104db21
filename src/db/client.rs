// src/db/client.rs
//
// REST wire plumbing (PostgREST dialect: eq. filters, on_conflict upserts,
// PATCH updates). Adapters build RestRequests; the backend trait is the
// seam tests use to record requests instead of hitting a server.

use serde_json::Value;
use thiserror::Error;

use crate::config::consts::{REQUEST_TIMEOUT, REST_PATH, USER_AGENT};
use crate::config::Settings;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("transport: {0}")]
    Transport(String),
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

#[derive(Debug, Clone)]
pub struct RestRequest {
    pub method: Method,
    pub table: &'static str,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Prefer header, e.g. "resolution=merge-duplicates" on upserts.
    pub prefer: Option<&'static str>,
}

pub trait Backend {
    fn send(&self, req: &RestRequest) -> Result<Value, DbError>;
}

pub struct UreqBackend {
    agent: ureq::Agent,
    base: String,
    key: String,
}

impl UreqBackend {
    pub fn new(settings: &Settings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            base: settings.db_url.trim_end_matches('/').to_string(),
            key: settings.db_service_key.clone(),
        }
    }

    fn url(&self, req: &RestRequest) -> String {
        let mut url = join!(&self.base, REST_PATH, req.table);
        for (i, (k, v)) in req.query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(k);
            url.push('=');
            url.push_str(&urlencoding::encode(v));
        }
        url
    }
}

impl Backend for UreqBackend {
    fn send(&self, req: &RestRequest) -> Result<Value, DbError> {
        let url = self.url(req);
        let mut http = match req.method {
            Method::Get => self.agent.get(&url),
            Method::Post => self.agent.post(&url),
            Method::Patch => self.agent.request("PATCH", &url),
        };
        http = http
            .set("apikey", &self.key)
            .set("Authorization", &join!("Bearer ", &self.key));
        if let Some(prefer) = req.prefer {
            http = http.set("Prefer", prefer);
        }

        let resp = match &req.body {
            Some(body) => http
                .set("Content-Type", "application/json")
                .send_string(&body.to_string()),
            None => http.call(),
        };
        let resp = resp.map_err(|e| match e {
            ureq::Error::Status(status, r) => DbError::Status {
                status,
                body: r.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(t) => DbError::Transport(t.to_string()),
        })?;

        let text = resp
            .into_string()
            .map_err(|e| DbError::Transport(e.to_string()))?;
        if text.trim().is_empty() {
            // Writes without a return representation come back bodyless.
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
