//! Periodic refresh trigger.
//!
//! Runs [`WeatherService::refresh`] for one city on a fixed interval until
//! the shutdown token is cancelled. Cycles never overlap: a slow cycle
//! delays the next one, and ticks missed meanwhile are skipped.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use weather_types::{City, HealthResponse, HealthStatus, ReadingRepository, WeatherProvider};

use crate::WeatherService;

/// Consecutive failed cycles after which health reports `degraded`.
pub const DEGRADED_AFTER_FAILURES: u32 = 3;

const NEVER: i64 = i64::MIN;

/// Outcome counters of the refresh loop, shared with the health endpoint.
#[derive(Debug)]
pub struct RefreshHealth {
    consecutive_failures: AtomicU32,
    last_success_ms: AtomicI64,
}

impl Default for RefreshHealth {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshHealth {
    pub fn new() -> Self {
        Self {
            consecutive_failures: AtomicU32::new(0),
            last_success_ms: AtomicI64::new(NEVER),
        }
    }

    pub fn record_success(&self, at: DateTime<Utc>) {
        self.consecutive_failures.store(0, Ordering::Relaxed);
        self.last_success_ms
            .store(at.timestamp_millis(), Ordering::Relaxed);
    }

    /// Records a failed cycle and returns the new failure streak.
    pub fn record_failure(&self) -> u32 {
        self.consecutive_failures
            .fetch_add(1, Ordering::Relaxed)
            .saturating_add(1)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        match self.last_success_ms.load(Ordering::Relaxed) {
            NEVER => None,
            ms => DateTime::from_timestamp_millis(ms),
        }
    }

    pub fn status(&self) -> HealthStatus {
        if self.consecutive_failures() >= DEGRADED_AFTER_FAILURES {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }

    pub fn snapshot(&self) -> HealthResponse {
        HealthResponse {
            status: self.status(),
            consecutive_failures: self.consecutive_failures(),
            last_success: self.last_success(),
        }
    }
}

/// Fixed-interval driver of the refresh pipeline for one city.
pub struct RefreshScheduler<P: WeatherProvider, R: ReadingRepository> {
    service: Arc<WeatherService<P, R>>,
    city: City,
    interval: Duration,
    health: Arc<RefreshHealth>,
}

impl<P: WeatherProvider, R: ReadingRepository> RefreshScheduler<P, R> {
    /// Creates a scheduler. A zero interval is raised to one millisecond.
    pub fn new(
        service: Arc<WeatherService<P, R>>,
        city: City,
        interval: Duration,
        health: Arc<RefreshHealth>,
    ) -> Self {
        Self {
            service,
            city,
            interval: interval.max(Duration::from_millis(1)),
            health,
        }
    }

    /// Runs until `shutdown` is cancelled.
    ///
    /// The first cycle starts immediately. Cancellation also aborts a cycle
    /// that is still in flight.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            city = %self.city,
            interval_ms = self.interval.as_millis() as u64,
            "Starting refresh scheduler"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    tracing::info!(city = %self.city, "Refresh cycle cancelled by shutdown");
                    break;
                }
                _ = self.run_cycle() => {}
            }
        }

        tracing::info!("Refresh scheduler stopped");
    }

    /// Runs one cycle, logging and swallowing any error.
    pub async fn run_cycle(&self) {
        match self.service.refresh(&self.city).await {
            Ok(reading) => {
                self.health.record_success(Utc::now());
                tracing::info!(
                    city = %self.city,
                    temperature = reading.temperature_2m,
                    time = %reading.time,
                    "Weather refreshed"
                );
            }
            Err(e) => {
                let failures = self.health.record_failure();
                tracing::error!(
                    city = %self.city,
                    consecutive_failures = failures,
                    "Weather refresh failed: {}",
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use crate::service_tests::tests::{Behaviour, MockRepo, StubProvider, reading};

    fn scheduler(
        provider: StubProvider,
        interval: Duration,
    ) -> (
        RefreshScheduler<StubProvider, MockRepo>,
        Arc<WeatherService<StubProvider, MockRepo>>,
        Arc<RefreshHealth>,
    ) {
        let service = Arc::new(WeatherService::new(provider, MockRepo::new()));
        let health = Arc::new(RefreshHealth::new());
        let scheduler = RefreshScheduler::new(
            service.clone(),
            City::new("moscow").unwrap(),
            interval,
            health.clone(),
        );
        (scheduler, service, health)
    }

    #[test]
    fn test_health_degrades_after_threshold() {
        let health = RefreshHealth::new();
        assert_eq!(health.status(), HealthStatus::Healthy);

        for _ in 0..DEGRADED_AFTER_FAILURES {
            health.record_failure();
        }
        assert_eq!(health.status(), HealthStatus::Degraded);

        health.record_success(Utc::now());
        assert_eq!(health.status(), HealthStatus::Healthy);
        assert_eq!(health.consecutive_failures(), 0);
        assert!(health.last_success().is_some());
    }

    #[test]
    fn test_health_snapshot_without_success() {
        let snapshot = RefreshHealth::new().snapshot();
        assert_eq!(snapshot.status, HealthStatus::Healthy);
        assert_eq!(snapshot.consecutive_failures, 0);
        assert!(snapshot.last_success.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_immediately_then_every_interval() {
        let (scheduler, service, health) = scheduler(
            StubProvider::returning(vec![reading(12, -4.0)]),
            Duration::from_secs(10),
        );
        let token = CancellationToken::new();
        let handle = tokio::spawn(scheduler.run(token.clone()));

        // Cycles at t=0, t=10 and t=20.
        tokio::time::sleep(Duration::from_secs(25)).await;
        token.cancel();
        handle.await.unwrap();

        assert_eq!(service.repo().save_calls.load(Ordering::SeqCst), 3);
        assert_eq!(health.consecutive_failures(), 0);
        assert!(health.last_success().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keeps_ticking_after_errors() {
        let (scheduler, service, health) = scheduler(
            StubProvider::with_behaviour(Behaviour::NoMatch),
            Duration::from_secs(10),
        );
        let token = CancellationToken::new();
        let handle = tokio::spawn(scheduler.run(token.clone()));

        tokio::time::sleep(Duration::from_secs(35)).await;
        token.cancel();
        handle.await.unwrap();

        assert_eq!(service.provider().resolve_calls.load(Ordering::SeqCst), 4);
        assert_eq!(service.repo().save_calls.load(Ordering::SeqCst), 0);
        assert_eq!(health.consecutive_failures(), 4);
        assert_eq!(health.status(), HealthStatus::Degraded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_cycles_never_overlap() {
        let (scheduler, service, _health) = scheduler(
            StubProvider::with_delays(vec![Duration::from_secs(25); 8]),
            Duration::from_secs(10),
        );
        let token = CancellationToken::new();
        let handle = tokio::spawn(scheduler.run(token.clone()));

        // Each cycle outlasts two ticks; cycles start at t=0, 25, 50 and 75.
        tokio::time::sleep(Duration::from_secs(99)).await;
        token.cancel();
        handle.await.unwrap();

        let provider = service.provider();
        assert_eq!(provider.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(provider.resolve_calls.load(Ordering::SeqCst), 4);
        assert_eq!(service.repo().save_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missed_ticks_are_skipped_not_replayed() {
        let (scheduler, service, _health) = scheduler(
            StubProvider::with_delays(vec![Duration::from_secs(25)]),
            Duration::from_secs(10),
        );
        let token = CancellationToken::new();
        let handle = tokio::spawn(scheduler.run(token.clone()));

        // The t=10 and t=20 ticks fall inside the first cycle. One late
        // tick fires at t=25, then the grid resumes at t=30, 40 and 50.
        // Replaying the missed ticks would add a second call at t=25.
        tokio::time::sleep(Duration::from_secs(55)).await;
        token.cancel();
        handle.await.unwrap();

        assert_eq!(service.provider().resolve_calls.load(Ordering::SeqCst), 5);
        assert_eq!(service.provider().max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_in_flight_cycle() {
        let (scheduler, service, health) = scheduler(
            StubProvider::with_behaviour(Behaviour::Hang),
            Duration::from_secs(10),
        );
        let token = CancellationToken::new();
        let handle = tokio::spawn(scheduler.run(token.clone()));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(service.provider().resolve_calls.load(Ordering::SeqCst), 1);

        token.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("scheduler should stop promptly")
            .unwrap();

        assert_eq!(health.consecutive_failures(), 0);
        assert!(health.last_success().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_start_runs_nothing() {
        let (scheduler, service, _health) = scheduler(
            StubProvider::returning(vec![reading(12, -4.0)]),
            Duration::from_secs(10),
        );
        let token = CancellationToken::new();
        token.cancel();

        scheduler.run(token).await;

        assert_eq!(service.provider().resolve_calls.load(Ordering::SeqCst), 0);
    }
}
