//! Fixed-window request limiter keyed by client IP. Applied to ticket purchases so a
//! single client cannot sweep an event's inventory in a burst.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

const MAX_TRACKED_CLIENTS: usize = 10_000;

#[derive(Clone)]
struct RateLimitEntry {
    count: u32,
    reset_at: Instant,
}

#[derive(Clone)]
pub struct RateLimiter {
    limits: Arc<RwLock<HashMap<String, RateLimitEntry>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            limits: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(window_seconds),
        }
    }

    /// When 0, rate limiting is disabled (useful for local dev/testing).
    pub fn is_disabled(&self) -> bool {
        self.max_requests == 0
    }

    pub async fn check_limit(&self, key: &str) -> Result<(), StatusCode> {
        let mut limits = self.limits.write().await;
        let now = Instant::now();

        if limits.len() > MAX_TRACKED_CLIENTS {
            limits.retain(|_, entry| entry.reset_at > now);
        }

        match limits.get_mut(key) {
            Some(entry) if entry.reset_at > now => {
                if entry.count >= self.max_requests {
                    return Err(StatusCode::TOO_MANY_REQUESTS);
                }
                entry.count += 1;
                Ok(())
            }
            // window expired or first request from this client
            _ => {
                limits.insert(
                    key.to_string(),
                    RateLimitEntry {
                        count: 1,
                        reset_at: now + self.window,
                    },
                );
                Ok(())
            }
        }
    }
}

// Client IP as reported by a reverse proxy; all direct connections share one bucket.
fn extract_ip(req: &Request) -> String {
    if let Some(forwarded_for) = req.headers().get("x-forwarded-for") {
        if let Ok(ip) = forwarded_for.to_str() {
            return ip.split(',').next().unwrap_or("unknown").trim().to_string();
        }
    }

    if let Some(real_ip) = req.headers().get("x-real-ip") {
        if let Ok(ip) = real_ip.to_str() {
            return ip.to_string();
        }
    }

    "unknown".to_string()
}

pub async fn rate_limit_middleware(
    State(rate_limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    if rate_limiter.is_disabled() {
        return next.run(req).await;
    }

    let ip = extract_ip(&req);
    if let Err(status) = rate_limiter.check_limit(&ip).await {
        tracing::warn!("Rate limit exceeded for {} on {}", ip, req.uri().path());
        return (
            status,
            Json(serde_json::json!({"error": "Too many requests, slow down"})),
        )
            .into_response();
    }

    next.run(req).await
}
