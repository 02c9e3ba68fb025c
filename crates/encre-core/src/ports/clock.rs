//! Clock port: time and the fixed-delay wait.
//!
//! The choreography's only coordination is "dispatch, wait a fixed delay,
//! read back", so the wait lives behind the same seam as the current time.
//!
//! # テスト容易性
//! - trait により時刻と待機を差し替え可能
//! - テストでは FixedClock を使用（sleep は no-op）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Wait out the fixed delay between a webhook dispatch and the
    /// datastore read-back.
    async fn sleep(&self, duration: Duration);
}

/// Production clock: wall time and a real tokio sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Test clock: a pinned instant and an instant sleep.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

#[async_trait]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    async fn sleep(&self, _duration: Duration) {}
}
