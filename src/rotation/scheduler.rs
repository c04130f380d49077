// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cron driven rotation trigger.

use crate::rotation::RotationJob;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use cron::Schedule;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// Parse a cron expression.
///
/// Five-field crontab expressions (`minute hour day month weekday`) are
/// accepted and fire at second zero. Their numeric weekdays use crontab
/// numbering (0 or 7 is Sunday) and are translated to the 1 = Sunday numbering
/// of the `cron` crate. Expressions that already carry a seconds field are
/// passed through untouched.
pub fn parse_schedule(expression: &str) -> Result<Schedule> {
    let fields: Vec<&str> = expression.split_whitespace().collect();
    let normalized = if fields.len() == 5 {
        let weekdays = crontab_weekdays(fields[4])
            .with_context(|| format!("Invalid cron expression '{}'", expression))?;
        format!("0 {} {}", fields[..4].join(" "), weekdays)
    } else {
        expression.trim().to_string()
    };

    Schedule::from_str(&normalized)
        .with_context(|| format!("Invalid cron expression '{}'", expression))
}

/// Rewrite a crontab day-of-week field into `cron` crate numbering.
/// Day names are kept as written.
fn crontab_weekdays(field: &str) -> Result<String> {
    let mut days = BTreeSet::new();
    let mut names = Vec::new();

    for element in field.split(',') {
        if element.chars().any(|c| c.is_ascii_alphabetic()) {
            names.push(element);
            continue;
        }
        if element == "*" || element == "?" {
            return Ok(element.to_string());
        }

        let (range, step) = match element.split_once('/') {
            Some((range, step)) => (range, Some(weekday_number(step)?)),
            None => (element, None),
        };
        let (first, last) = match (range, range.split_once('-')) {
            ("*", _) => (0, 6),
            (_, Some((first, last))) => (weekday_number(first)?, weekday_number(last)?),
            (single, None) => {
                let day = weekday_number(single)?;
                (day, if step.is_some() { 7 } else { day })
            }
        };
        if first > last || last > 7 || step == Some(0) {
            bail!("invalid day-of-week '{}'", element);
        }

        for day in (first..=last).step_by(step.unwrap_or(1) as usize) {
            days.insert(day % 7 + 1);
        }
    }

    if days.len() == 7 && names.is_empty() {
        return Ok("*".to_string());
    }

    Ok(days
        .iter()
        .map(u8::to_string)
        .chain(names.into_iter().map(str::to_string))
        .collect::<Vec<_>>()
        .join(","))
}

fn weekday_number(value: &str) -> Result<u8> {
    value
        .parse()
        .with_context(|| format!("invalid day-of-week '{}'", value))
}

pub struct Scheduler {
    schedule: Schedule,
    job: Arc<RotationJob>,
}

impl Scheduler {
    pub fn new(expression: &str, job: Arc<RotationJob>) -> Result<Self> {
        Ok(Self {
            schedule: parse_schedule(expression)?,
            job,
        })
    }

    /// Next firing time strictly after `now`
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&now).next()
    }

    /// Rotate once immediately, then on every schedule tick. Never returns
    /// unless the schedule runs out of firing times.
    pub async fn run(self) -> Result<()> {
        info!("Scheduler started, running initial rotation...");
        self.tick().await;

        loop {
            let now = Utc::now();
            let Some(next) = self.next_after(now) else {
                warn!("Schedule has no upcoming firing times, stopping scheduler");
                return Ok(());
            };

            info!("Next rotation scheduled at {}", next);
            // A negative delta means we are already late, fire right away
            sleep((next - now).to_std().unwrap_or_default()).await;

            self.tick().await;
        }
    }

    #[instrument(skip(self))]
    async fn tick(&self) {
        let outcome = self.job.run().await;
        if outcome.is_success() {
            info!("Scheduled rotation finished: {:?}", outcome);
        } else {
            warn!("Scheduled rotation failed: {:?}, retrying on next tick", outcome);
        }
    }
}
