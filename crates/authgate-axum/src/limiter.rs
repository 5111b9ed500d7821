// Fixed-window, IP-based rate limiting with in-memory storage.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Rate limit configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,
    /// Window size in seconds.
    pub window: u64,
    /// Maximum requests per window.
    pub max: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window: 60,
            max: 100,
        }
    }
}

/// An in-memory rate limit entry.
#[derive(Debug, Clone)]
struct RateLimitEntry {
    count: u64,
    window_start: Instant,
}

/// Raised when a client exhausts its window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimited {
    /// Seconds until the window resets.
    pub retry_after: u64,
}

/// In-memory rate limiter using a fixed-window algorithm.
///
/// Thread-safe via `Mutex<HashMap>`. For production use at scale,
/// consider replacing with `DashMap` or Redis-backed storage.
pub struct RateLimiter {
    config: RateLimitConfig,
    store: Mutex<HashMap<String, RateLimitEntry>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            store: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether `key` may proceed.
    ///
    /// The first request in a window creates the entry; once the window
    /// elapses the counter resets. Over-limit requests do not extend the
    /// window.
    pub fn check(&self, key: &str) -> Result<(), RateLimited> {
        if !self.config.enabled {
            return Ok(());
        }

        let mut store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let window_duration = Duration::from_secs(self.config.window);

        match store.get_mut(key) {
            Some(entry) => {
                let elapsed = now.duration_since(entry.window_start);

                if elapsed >= window_duration {
                    // Window has passed
                    entry.count = 1;
                    entry.window_start = now;
                    Ok(())
                } else if entry.count >= self.config.max {
                    let retry_after = (window_duration - elapsed).as_secs() + 1;
                    Err(RateLimited { retry_after })
                } else {
                    entry.count += 1;
                    Ok(())
                }
            }
            None => {
                store.insert(
                    key.to_string(),
                    RateLimitEntry {
                        count: 1,
                        window_start: now,
                    },
                );
                Ok(())
            }
        }
    }

    /// Clean up expired entries to prevent memory growth.
    pub fn cleanup(&self) {
        let mut store = self.store.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        store.retain(|_, entry| {
            let elapsed = now.duration_since(entry.window_start);
            elapsed < Duration::from_secs(self.config.window * 2)
        });
    }
}
