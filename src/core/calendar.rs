//! Christmas date arithmetic.
//!
//! Every function here is pure: it takes the target year and one sampled
//! instant `now` (local wall-clock time) and never touches the system clock.
//! [`CalendarEngine`] wraps an injected [`Clock`] for callers that want the
//! "implicit now" form, sampling it exactly once per call.
//!
//! Two rollover rules coexist on purpose:
//! - countdown and days-remaining switch to next year's Christmas as soon as
//!   `now` passes Dec 25 00:00;
//! - year progress measures the nominal year, and the target year only
//!   advances from Dec 26 00:00.
//!
//! Years chrono cannot represent produce neutral results (zero countdown,
//! 0 progress, `false`) instead of panicking.

use crate::domain::model::{CountdownTime, ReminderKind};
use crate::domain::ports::Clock;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

fn midnight(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)
}

pub fn year_start(year: i32) -> Option<NaiveDateTime> {
    midnight(year, 1, 1)
}

pub fn christmas_eve(year: i32) -> Option<NaiveDateTime> {
    midnight(year, 12, 24)
}

pub fn christmas(year: i32) -> Option<NaiveDateTime> {
    midnight(year, 12, 25)
}

pub fn day_after_christmas(year: i32) -> Option<NaiveDateTime> {
    midnight(year, 12, 26)
}

/// Christmas of `year`, or of `year + 1` once `now` is past it.
pub fn countdown_target(year: i32, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let this_year = christmas(year)?;
    if now > this_year {
        christmas(year.checked_add(1)?)
    } else {
        Some(this_year)
    }
}

fn millis_between(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_milliseconds() as f64
}

pub fn compute_countdown(year: i32, now: NaiveDateTime) -> CountdownTime {
    let Some(target) = countdown_target(year, now) else {
        return CountdownTime::ZERO;
    };

    let diff = target - now;
    if diff <= Duration::zero() {
        return CountdownTime::ZERO;
    }

    // num_seconds 向零截斷，正數時即為 floor
    let total_seconds = u64::try_from(diff.num_seconds()).unwrap_or(0);
    CountdownTime::from_total_seconds(total_seconds)
}

pub fn compute_year_progress(year: i32, now: NaiveDateTime) -> f64 {
    let (Some(start), Some(end)) = (year_start(year), christmas(year)) else {
        return 0.0;
    };

    let total_days = millis_between(start, end) / MILLIS_PER_DAY;
    let elapsed_days = millis_between(start, now) / MILLIS_PER_DAY;

    if elapsed_days < 0.0 {
        return 0.0;
    }
    if elapsed_days > total_days {
        return 100.0;
    }

    (elapsed_days / total_days * 100.0).clamp(0.0, 100.0)
}

pub fn compute_days_remaining(year: i32, now: NaiveDateTime) -> u64 {
    let Some(target) = countdown_target(year, now) else {
        return 0;
    };

    let diff = target - now;
    if diff <= Duration::zero() {
        return 0;
    }

    // ceil：不足一天也算一天
    let whole_days = diff.num_days();
    let days = if diff > Duration::days(whole_days) {
        whole_days + 1
    } else {
        whole_days
    };
    u64::try_from(days).unwrap_or(0)
}

pub fn is_christmas_day(year: i32, now: NaiveDateTime) -> bool {
    match (christmas(year), day_after_christmas(year)) {
        (Some(start), Some(end)) => start <= now && now < end,
        _ => false,
    }
}

pub fn compute_tree_decoration_progress(year: i32, now: NaiveDateTime) -> f64 {
    let (Some(eve), Some(day)) = (christmas_eve(year), christmas(year)) else {
        return 0.0;
    };

    if now < eve {
        return 0.0;
    }
    if now >= day {
        return 100.0;
    }

    let total_ms = millis_between(eve, day);
    let elapsed_ms = millis_between(eve, now);
    (elapsed_ms / total_ms * 100.0).clamp(0.0, 100.0)
}

pub fn should_show_tree(year: i32, now: NaiveDateTime) -> bool {
    match (christmas_eve(year), day_after_christmas(year)) {
        (Some(start), Some(end)) => start <= now && now < end,
        _ => false,
    }
}

/// Year whose Christmas is being counted toward. Advances from Dec 26 00:00.
pub fn resolve_target_year(selected_year: i32, now: NaiveDateTime) -> i32 {
    match day_after_christmas(selected_year) {
        Some(cutoff) if now >= cutoff => selected_year.checked_add(1).unwrap_or(selected_year),
        _ => selected_year,
    }
}

/// Instant at which the reminder of `kind` fires for `year`.
pub fn reminder_trigger(year: i32, kind: ReminderKind) -> Option<NaiveDateTime> {
    christmas(year)?.checked_sub_signed(Duration::days(kind.days_before()))
}

/// Every calendar answer for one sampled instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalendarSnapshot {
    pub now: NaiveDateTime,
    pub selected_year: i32,
    pub target_year: i32,
    pub countdown: CountdownTime,
    pub days_remaining: u64,
    pub year_progress: f64,
    pub tree_decoration_progress: f64,
    pub is_christmas_day: bool,
    pub show_tree: bool,
}

impl CalendarSnapshot {
    pub fn evaluate(selected_year: i32, now: NaiveDateTime) -> Self {
        let target_year = resolve_target_year(selected_year, now);
        Self {
            now,
            selected_year,
            target_year,
            countdown: compute_countdown(target_year, now),
            days_remaining: compute_days_remaining(target_year, now),
            year_progress: compute_year_progress(target_year, now),
            tree_decoration_progress: compute_tree_decoration_progress(target_year, now),
            is_christmas_day: is_christmas_day(target_year, now),
            show_tree: should_show_tree(target_year, now),
        }
    }

    pub fn year_advanced(&self) -> bool {
        self.target_year != self.selected_year
    }
}

pub struct CalendarEngine<C: Clock> {
    clock: C,
}

impl<C: Clock> CalendarEngine<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn countdown(&self, year: i32) -> CountdownTime {
        compute_countdown(year, self.clock.now())
    }

    pub fn year_progress(&self, year: i32) -> f64 {
        compute_year_progress(year, self.clock.now())
    }

    pub fn days_remaining(&self, year: i32) -> u64 {
        compute_days_remaining(year, self.clock.now())
    }

    pub fn is_christmas_day(&self, year: i32) -> bool {
        is_christmas_day(year, self.clock.now())
    }

    pub fn tree_decoration_progress(&self, year: i32) -> f64 {
        compute_tree_decoration_progress(year, self.clock.now())
    }

    pub fn should_show_tree(&self, year: i32) -> bool {
        should_show_tree(year, self.clock.now())
    }

    pub fn resolve_target_year(&self, selected_year: i32) -> i32 {
        resolve_target_year(selected_year, self.clock.now())
    }

    pub fn snapshot(&self, selected_year: i32) -> CalendarSnapshot {
        CalendarSnapshot::evaluate(selected_year, self.clock.now())
    }
}
