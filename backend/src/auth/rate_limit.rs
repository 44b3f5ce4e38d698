use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::AppState;

/// Fixed-window request counter keyed by client, held in process memory.
/// Only suitable for a single instance.
#[derive(Clone)]
pub struct RateLimitState {
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
    max_requests: u32,
    window: Duration,
}

struct RateLimitEntry {
    count: u32,
    window_start: Instant,
}

impl RateLimitState {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Count a request for `key`. Returns Ok(remaining) or Err(retry_after).
    pub async fn check(&self, key: &str) -> Result<u32, Duration> {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        let entry = entries.entry(key.to_string()).or_insert(RateLimitEntry {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) > self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_requests {
            let retry_after = self
                .window
                .saturating_sub(now.duration_since(entry.window_start));
            return Err(retry_after);
        }

        entry.count += 1;
        Ok(self.max_requests - entry.count)
    }

    /// Drop entries idle for more than two windows.
    pub async fn cleanup(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let keep_for = self.window * 2;
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.window_start) < keep_for);
        before - entries.len()
    }
}

/// Periodically purge stale limiter entries.
pub fn spawn_cleanup_worker(limiter: RateLimitState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            let removed = limiter.cleanup().await;
            if removed > 0 {
                tracing::debug!(removed = removed, "Rate limiter entries purged");
            }
        }
    });
}

/// Per IP and path, so login and register are limited separately.
pub async fn rate_limit_auth(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = addr.ip().to_string();
    let path = req.uri().path().to_string();
    let key = format!("{}:{}", ip, path);

    match state.rate_limiter.check(&key).await {
        Ok(remaining) => {
            tracing::debug!(ip = %ip, path = %path, remaining = remaining, "Rate limit check passed");
            Ok(next.run(req).await)
        }
        Err(retry_after) => {
            tracing::warn!(
                ip = %ip,
                path = %path,
                retry_after_secs = retry_after.as_secs(),
                "Rate limit exceeded"
            );
            Err(AppError::RateLimited)
        }
    }
}
