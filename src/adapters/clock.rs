use crate::domain::ports::Clock;
use crate::utils::error::{CountdownError, Result};
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

/// 本地牆上時間
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the instant it was built with.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// 解析 `YYYY-MM-DDTHH:MM:SS`（可帶小數秒）
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f"))
            .map(Self::new)
            .map_err(|e| CountdownError::InvalidDateTime {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
