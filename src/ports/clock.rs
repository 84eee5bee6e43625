use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Time source. Lets retry backoff run against a fake clock in tests.
#[async_trait]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}
