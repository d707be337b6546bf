//! # Resilient Calls
//!
//! The one place the live/demo fallback policy lives. Every screen backed by an
//! external collaborator (soil, leaf, price, weather, chat) goes through
//! [`ResilientCall`], so the policy is applied identically everywhere:
//!
//! - **No credential** (`live` is `None`): wait the configured demo delay, then
//!   return the canned payload as [`Outcome::Canned`].
//! - **Live call fails** (network, status, malformed JSON, timeout): log a warning
//!   and return the canned payload as [`Outcome::Canned`].
//! - **Live call succeeds**: return [`Outcome::Live`].
//!
//! A raw error never escapes, so callers always get a result of the same shape.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use lib_core::resilient::{Outcome, ResilientCall};
//!
//! # async fn demo() {
//! let call = ResilientCall::new("soil").demo_delay(Duration::ZERO);
//! let live: Option<std::future::Ready<lib_core::Result<u32>>> = None;
//! let outcome = call.run(live, || 7).await;
//! assert_eq!(outcome, Outcome::Canned(7));
//! # }
//! ```

use std::future::Future;
use std::time::{Duration, Instant};

use crate::error::{CoreError, Result};

/// Result of a resilient call. Both arms carry the same payload shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Live(T),
    Canned(T),
}

impl<T> Outcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Live(value) | Outcome::Canned(value) => value,
        }
    }

    pub fn is_canned(&self) -> bool {
        matches!(self, Outcome::Canned(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Live(value) => Outcome::Live(f(value)),
            Outcome::Canned(value) => Outcome::Canned(f(value)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResilientCall {
    label: &'static str,
    timeout: Option<Duration>,
    demo_delay: Duration,
}

impl ResilientCall {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            timeout: None,
            demo_delay: Duration::ZERO,
        }
    }

    /// Upper bound on the live call. Expiry counts as a failure.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Simulated latency before a canned payload is returned in demo mode.
    pub fn demo_delay(mut self, delay: Duration) -> Self {
        self.demo_delay = delay;
        self
    }

    /// Run `live` when present, falling back to `canned` in every other case.
    pub async fn run<T, Fut, C>(&self, live: Option<Fut>, canned: C) -> Outcome<T>
    where
        Fut: Future<Output = Result<T>>,
        C: FnOnce() -> T,
    {
        match live {
            None => self.demo(canned).await,
            Some(fut) => match self.attempt(fut).await {
                Ok(value) => Outcome::Live(value),
                Err(_) => Outcome::Canned(canned()),
            },
        }
    }

    /// Like [`run`](Self::run), with separate payloads for demo mode and failure.
    pub async fn run_split<T, Fut, D, F>(&self, live: Option<Fut>, demo: D, failure: F) -> Outcome<T>
    where
        Fut: Future<Output = Result<T>>,
        D: FnOnce() -> T,
        F: FnOnce() -> T,
    {
        match live {
            None => self.demo(demo).await,
            Some(fut) => match self.attempt(fut).await {
                Ok(value) => Outcome::Live(value),
                Err(_) => Outcome::Canned(failure()),
            },
        }
    }

    async fn demo<T>(&self, canned: impl FnOnce() -> T) -> Outcome<T> {
        tracing::info!(call = self.label, "No credential configured, using demo data");
        if !self.demo_delay.is_zero() {
            tokio::time::sleep(self.demo_delay).await;
        }
        Outcome::Canned(canned())
    }

    async fn attempt<T, Fut>(&self, fut: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(result) => result,
                Err(_) => Err(CoreError::Timeout(format!(
                    "{} exceeded {}ms",
                    self.label,
                    limit.as_millis()
                ))),
            },
            None => fut.await,
        };

        match &result {
            Ok(_) => tracing::debug!(
                call = self.label,
                duration_ms = start.elapsed().as_millis(),
                "Live call succeeded"
            ),
            Err(e) => tracing::warn!(
                call = self.label,
                error = %e,
                duration_ms = start.elapsed().as_millis(),
                "Live call failed, using fallback"
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::{ready, Ready};

    type Live = Ready<Result<&'static str>>;

    #[tokio::test(start_paused = true)]
    async fn test_no_credential_waits_demo_delay() {
        let call = ResilientCall::new("soil").demo_delay(Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        let outcome = call.run(None::<Live>, || "canned").await;

        assert_eq!(outcome, Outcome::Canned("canned"));
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_live_success() {
        let call = ResilientCall::new("price");
        let outcome = call.run(Some(ready(Ok("live"))), || "canned").await;
        assert_eq!(outcome, Outcome::Live("live"));
        assert!(!outcome.is_canned());
    }

    #[tokio::test]
    async fn test_live_error_falls_back_without_delay() {
        let call = ResilientCall::new("price").demo_delay(Duration::from_secs(60));
        let live: Live = ready(Err(CoreError::Decode("bad json".into())));
        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            call.run_split(Some(live), || "demo", || "failure"),
        )
        .await
        .unwrap();
        assert_eq!(outcome, Outcome::Canned("failure"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_counts_as_failure() {
        let call = ResilientCall::new("leaf").timeout(Duration::from_secs(15));
        let slow = async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("late")
        };
        let outcome = call.run(Some(slow), || "canned").await;
        assert_eq!(outcome.into_inner(), "canned");
    }
}
