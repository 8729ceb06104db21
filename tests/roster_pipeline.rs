// tests/roster_pipeline.rs
//
// Full roster pass against scripted pages and a scripted backend:
// candidates → fetch → extract → upsert → mark verified.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};

use cfb_scrape::core::net::{FetchError, Fetcher, Transport};
use cfb_scrape::db::{Backend, Db, DbError, Method, RestRequest};
use cfb_scrape::model::Tier;
use cfb_scrape::runner;

const STAFF_HTML: &str = r#"
    <html><body>
      <div class="staff-card">
        <h3 class="coach-name">Pat Smith</h3>
        <p class="coach-title">Head Coach</p>
      </div>
      <div class="staff-card">
        <h3 class="coach-name">Lee Ray</h3>
        <p class="coach-title">Defensive Coordinator</p>
      </div>
    </body></html>"#;

const ROSTER_HTML: &str = r#"
    <table class="team-roster">
      <tr><th>Name</th><th>Pos</th><th>Class</th></tr>
      <tr><td>Jane Doe</td><td>QB</td><td>SR</td></tr>
      <tr><td>X</td><td>Y</td></tr>
    </table>"#;

struct Pages;

impl Transport for Pages {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        if url.ends_with("/staff") {
            Ok(STAFF_HTML.into())
        } else if url.ends_with("/roster") {
            Ok(ROSTER_HTML.into())
        } else {
            Err(FetchError::Status(404))
        }
    }
}

#[derive(Clone)]
struct Scripted {
    log: Arc<Mutex<Vec<RestRequest>>>,
}

impl Backend for Scripted {
    fn send(&self, req: &RestRequest) -> Result<Value, DbError> {
        self.log.lock().unwrap().push(req.clone());
        Ok(match (req.method, req.table) {
            (Method::Get, "college_programs") => json!([{
                "id": "p1",
                "name": "State",
                "roster_url": "https://state.test/roster",
                "staff_url": "https://state.test/staff",
                "is_active": true,
                "priority_tier": 1,
                "last_verified_at": null,
                "verification_source": null
            }]),
            // Pat Smith is already on staff; Lee Ray is new.
            (Method::Get, "college_coaches") => json!([{
                "id": "c1",
                "program_id": "p1",
                "first_name": "Pat",
                "last_name": "Smith",
                "title": "Head Coach",
                "is_active": true
            }]),
            (Method::Get, _) => json!([]),
            _ => Value::Null,
        })
    }
}

#[test]
fn roster_pass_scrapes_saves_and_verifies() {
    let backend = Scripted { log: Arc::default() };
    let db = Db::with_backend(Box::new(backend.clone()));
    let fetcher = Fetcher::with_transport(Box::new(Pages), Duration::ZERO);

    let summary = runner::run_roster(&db, &fetcher, Tier::One, None).unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.coaches_saved, 2);
    assert_eq!(summary.roster_rows, 1); // two-cell row dropped
    assert!(summary.failures.is_empty());

    let reqs = backend.log.lock().unwrap().clone();

    let upserts: Vec<&RestRequest> = reqs
        .iter()
        .filter(|r| r.method == Method::Post && r.table == "college_coaches")
        .collect();
    assert_eq!(upserts.len(), 2);
    let first = upserts[0].body.as_ref().unwrap();
    assert_eq!(first["first_name"], "Pat");
    assert_eq!(first["last_name"], "Smith");
    assert_eq!(first["program_id"], "p1");
    assert_eq!(first["is_active"], true);

    // Only the coach not already on staff gets a change logged.
    let changes: Vec<&RestRequest> = reqs
        .iter()
        .filter(|r| r.table == "staff_changes")
        .collect();
    assert_eq!(changes.len(), 1);
    let change = changes[0].body.as_ref().unwrap();
    assert_eq!(change["coach_name"], "Lee Ray");
    assert_eq!(change["change_type"], "hire");

    // Verification is the final write for the program.
    let last = reqs.last().unwrap();
    assert_eq!(last.method, Method::Patch);
    assert_eq!(last.table, "college_programs");
    assert!(last.query.contains(&("id".into(), "eq.p1".into())));
}

#[test]
fn fresh_programs_are_skipped_not_scraped() {
    #[derive(Clone)]
    struct FreshProgram {
        log: Arc<Mutex<Vec<RestRequest>>>,
    }
    impl Backend for FreshProgram {
        fn send(&self, req: &RestRequest) -> Result<Value, DbError> {
            self.log.lock().unwrap().push(req.clone());
            Ok(match (req.method, req.table) {
                (Method::Get, "college_programs") => json!([{
                    "id": "p1",
                    "name": "State",
                    "roster_url": "https://state.test/roster",
                    "staff_url": null,
                    "is_active": true,
                    "priority_tier": 1,
                    "last_verified_at": chrono::Utc::now(),
                    "verification_source": "scraper"
                }]),
                (Method::Get, _) => json!([]),
                _ => Value::Null,
            })
        }
    }

    let backend = FreshProgram { log: Arc::default() };
    let db = Db::with_backend(Box::new(backend.clone()));
    let fetcher = Fetcher::with_transport(Box::new(Pages), Duration::ZERO);

    let summary = runner::run_roster(&db, &fetcher, Tier::One, None).unwrap();
    assert_eq!(summary.processed, 0);
    assert_eq!(summary.skipped, 1);

    // Nothing but the candidate read happened.
    assert_eq!(backend.log.lock().unwrap().len(), 1);
}

#[test]
fn transfers_pass_with_no_sources_reads_portal_only() {
    let backend = Scripted { log: Arc::default() };
    let db = Db::with_backend(Box::new(backend.clone()));
    let fetcher = Fetcher::with_transport(Box::new(Pages), Duration::ZERO);

    let summary = runner::run_transfers(&db, &fetcher, None).unwrap();
    assert_eq!(summary.sources, 0);
    assert_eq!(summary.found, 0);
    assert_eq!(summary.added, 0);

    let reqs = backend.log.lock().unwrap().clone();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].table, "transfer_portal");
}
