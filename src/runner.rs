// src/runner.rs
//
// The deterministic pipeline: read candidates → for each, scrape →
// normalize → persist → mark verified. One program failing its unit of
// work is recorded and the pass moves on; the summary carries the
// per-item accounting.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};

use crate::config::consts::VERIFICATION_SOURCE;
use crate::core::net::Fetcher;
use crate::core::sanitize::split_name;
use crate::db::{Db, DbError};
use crate::extract::{self, portal};
use crate::model::{Coach, Program, StaffChange, StaffMember, Tier};
use crate::progress::Progress;

/// Explicit rescrape policy: due when never verified, or when the last
/// verification is older than the tier's interval.
pub fn due_for_rescrape(program: &Program, tier: Tier, now: DateTime<Utc>) -> bool {
    match program.last_verified_at {
        None => true,
        Some(t) => now - t >= Duration::hours(tier.interval_hours()),
    }
}

#[derive(Debug)]
pub struct Failure {
    pub item: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct RosterSummary {
    pub processed: usize,
    pub skipped: usize,
    pub coaches_saved: usize,
    pub roster_rows: usize,
    pub failures: Vec<Failure>,
}

impl fmt::Display for RosterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} programs processed, {} skipped, {} coaches saved, {} roster rows, {} failed",
            self.processed,
            self.skipped,
            self.coaches_saved,
            self.roster_rows,
            self.failures.len()
        )?;
        for failure in &self.failures {
            write!(f, "\n  {}: {}", failure.item, failure.error)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct TransferSummary {
    pub sources: usize,
    pub found: usize,
    pub added: usize,
    pub failures: Vec<Failure>,
}

impl fmt::Display for TransferSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sources scraped, {} entries found, {} new, {} failed",
            self.sources,
            self.found,
            self.added,
            self.failures.len()
        )?;
        for failure in &self.failures {
            write!(f, "\n  {}: {}", failure.item, failure.error)?;
        }
        Ok(())
    }
}

/// Roster/staff pass for one priority tier.
///
/// The candidate read itself failing is fatal; everything after that is
/// per-program and only marks that program failed.
pub fn run_roster(
    db: &Db,
    fetcher: &Fetcher,
    tier: Tier,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RosterSummary, DbError> {
    let programs = db.programs().active(Some(tier))?;
    let now = Utc::now();
    let mut summary = RosterSummary::default();

    // Candidates: something to scrape, and due under the tier's interval.
    let candidates: Vec<&Program> = programs
        .iter()
        .filter(|p| p.roster_url.is_some() || p.staff_url.is_some())
        .filter(|p| due_for_rescrape(p, tier, now))
        .collect();
    summary.skipped = programs.len() - candidates.len();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(candidates.len());
        p.log(&format!(
            "Scraping {} tier-{} programs…",
            candidates.len(),
            tier.as_i16()
        ));
    }

    for program in candidates {
        match scrape_program(db, fetcher, program, &mut summary) {
            Ok(()) => summary.processed += 1,
            Err(e) => {
                warn!("{}: {e}", program.name);
                summary.failures.push(Failure {
                    item: program.name.clone(),
                    error: e.to_string(),
                });
            }
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&program.name);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}

fn scrape_program(
    db: &Db,
    fetcher: &Fetcher,
    program: &Program,
    summary: &mut RosterSummary,
) -> Result<(), DbError> {
    if let Some(url) = &program.staff_url {
        match fetcher.fetch_page(url) {
            Some(doc) => {
                let staff = (extract::staff_for_site(extract::site_id(url)))(&doc);
                save_coaches(db, program, &staff, summary)?;
            }
            // No document is a silent outcome, not a failure.
            None => info!("{}: staff page yielded no document", program.name),
        }
    }

    if let Some(url) = &program.roster_url {
        match fetcher.fetch_page(url) {
            Some(doc) => {
                let players = (extract::roster_for_site(extract::site_id(url)))(&doc);
                info!("{}: {} roster entries", program.name, players.len());
                summary.roster_rows += players.len();
            }
            None => info!("{}: roster page yielded no document", program.name),
        }
    }

    db.programs().update_verification(&program.id, VERIFICATION_SOURCE)
}

fn save_coaches(
    db: &Db,
    program: &Program,
    staff: &[StaffMember],
    summary: &mut RosterSummary,
) -> Result<(), DbError> {
    let existing = db.coaches().by_program(&program.id)?;

    for member in staff {
        let (first, last) = split_name(&member.name);

        // A name not on the program's current staff list is a hire worth
        // logging. Departures are NOT inferred here.
        let known = existing
            .iter()
            .any(|c| c.first_name == first && c.last_name == last);
        if !known {
            db.staff_changes().log(&StaffChange {
                coach_name: member.name.clone(),
                change_type: s!("hire"),
                to_program_id: Some(program.id.clone()),
                to_title: member.title.clone(),
                announced_date: Utc::now().date_naive(),
                source: s!(VERIFICATION_SOURCE),
            })?;
        }

        db.coaches().upsert(&Coach {
            id: None,
            program_id: program.id.clone(),
            first_name: first,
            last_name: last,
            title: member.title.clone(),
            is_active: true,
        })?;
        summary.coaches_saved += 1;
    }

    info!("Saved {} coaches for program {}", staff.len(), program.id);
    Ok(())
}

/// Transfer-portal pass: scrape every registered source and persist the
/// entries we haven't seen in the portal yet.
pub fn run_transfers(
    db: &Db,
    fetcher: &Fetcher,
    mut progress: Option<&mut dyn Progress>,
) -> Result<TransferSummary, DbError> {
    let mut summary = TransferSummary {
        sources: portal::SOURCES.len(),
        ..Default::default()
    };

    if let Some(p) = progress.as_deref_mut() {
        p.begin(portal::SOURCES.len());
        p.log("Scraping transfer portal sources…");
    }

    let scraped = portal::scrape_sources(fetcher);
    summary.found = scraped.len();

    let existing = db.portal().in_portal()?;
    for entry in scraped {
        let known = existing.iter().any(|e| {
            e.first_name == entry.first_name
                && e.last_name == entry.last_name
                && e.origin_school_name == entry.origin_school_name
        });
        if known {
            continue;
        }
        match db.portal().insert(&entry) {
            Ok(()) => summary.added += 1,
            Err(e) => {
                let who = format!("{} {}", entry.first_name, entry.last_name);
                warn!("{who}: {e}");
                summary.failures.push(Failure {
                    item: who,
                    error: e.to_string(),
                });
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(summary)
}

/// Tier-1 roster pass followed by the transfer monitor.
pub fn run_all(
    db: &Db,
    fetcher: &Fetcher,
    mut progress: Option<&mut dyn Progress>,
) -> Result<(RosterSummary, TransferSummary), DbError> {
    let roster = run_roster(
        db,
        fetcher,
        Tier::One,
        progress.as_mut().map(|p| &mut **p as &mut dyn Progress),
    )?;
    let transfers = run_transfers(db, fetcher, progress)?;
    Ok((roster, transfers))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(last_verified_at: Option<DateTime<Utc>>) -> Program {
        Program {
            id: s!("p1"),
            name: s!("State"),
            roster_url: Some(s!("https://x.test/roster")),
            staff_url: None,
            is_active: true,
            priority_tier: 1,
            last_verified_at,
            verification_source: None,
        }
    }

    #[test]
    fn never_verified_is_due() {
        assert!(due_for_rescrape(&program(None), Tier::One, Utc::now()));
    }

    #[test]
    fn fresh_verification_is_not_due() {
        let now = Utc::now();
        let p = program(Some(now - Duration::hours(2)));
        assert!(!due_for_rescrape(&p, Tier::One, now));
    }

    #[test]
    fn due_follows_tier_interval() {
        let now = Utc::now();
        let p = program(Some(now - Duration::hours(48)));
        assert!(due_for_rescrape(&p, Tier::One, now)); // 24h interval
        assert!(!due_for_rescrape(&p, Tier::Two, now)); // 72h interval
        assert!(!due_for_rescrape(&p, Tier::Three, now)); // 168h interval
    }

    #[test]
    fn roster_summary_display_includes_failures() {
        let s = RosterSummary {
            processed: 2,
            skipped: 1,
            coaches_saved: 9,
            roster_rows: 40,
            failures: vec![Failure { item: s!("State"), error: s!("boom") }],
        };
        let text = s.to_string();
        assert!(text.contains("2 programs processed"));
        assert!(text.contains("State: boom"));
    }
}
