use crate::core::calendar::{CalendarEngine, CalendarSnapshot};
use crate::domain::ports::Clock;
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Re-evaluates the calendar on a fixed cadence, one clock sample per tick.
pub struct CountdownTicker<C: Clock> {
    engine: CalendarEngine<C>,
    tick_interval: Duration,
}

impl<C: Clock> CountdownTicker<C> {
    pub fn new(clock: C) -> Self {
        Self::with_interval(clock, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_interval(clock: C, tick_interval: Duration) -> Self {
        Self {
            engine: CalendarEngine::new(clock),
            tick_interval,
        }
    }

    pub fn engine(&self) -> &CalendarEngine<C> {
        &self.engine
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// 執行到 `max_ticks` 或回呼要求停止為止，回傳實際執行的 tick 數
    pub async fn run<F>(&self, selected_year: i32, max_ticks: Option<u64>, mut on_tick: F) -> u64
    where
        F: FnMut(&CalendarSnapshot) -> ControlFlow<()>,
    {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut ticks = 0u64;
        let mut last_target = None;

        while max_ticks.map_or(true, |max| ticks < max) {
            interval.tick().await;
            let snapshot = self.engine.snapshot(selected_year);
            ticks += 1;

            if last_target != Some(snapshot.target_year) {
                if last_target.is_some() {
                    tracing::info!("📅 Counting toward Christmas {}", snapshot.target_year);
                }
                last_target = Some(snapshot.target_year);
            }
            tracing::trace!("⏱️ tick {}: {}", ticks, snapshot.countdown);

            if on_tick(&snapshot).is_break() {
                break;
            }
        }

        ticks
    }
}

/// Text shared from the countdown screen.
pub fn share_message(snapshot: &CalendarSnapshot) -> String {
    let countdown = snapshot.countdown;
    format!(
        "🎄 Countdown until Christmas {}! Only {} days, {} hours, {} minutes, and {} seconds left!",
        snapshot.target_year, countdown.days, countdown.hours, countdown.minutes, countdown.seconds
    )
}

/// One-line status used by the CLI.
pub fn render_status_line(snapshot: &CalendarSnapshot) -> String {
    if snapshot.is_christmas_day {
        return format!("🎅 Merry Christmas {}!", snapshot.target_year);
    }

    let mut line = format!(
        "🎄 {} until Christmas {} ({} days) | year {:.1}%",
        snapshot.countdown,
        snapshot.target_year,
        snapshot.days_remaining,
        snapshot.year_progress
    );
    if snapshot.show_tree {
        line.push_str(&format!(" | tree {:.1}%", snapshot.tree_decoration_progress));
    }
    line
}
