//! Per-client fixed-window rate limiting with two budgets: per minute and
//! per day. Windows are tracked independently per client address. Best
//! effort: races under concurrent access can let a slightly over-limit
//! burst through, which the shell tolerates by design.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct ClientWindows {
    minute_start: Instant,
    minute_count: u32,
    day_start: Instant,
    day_count: u32,
}

pub struct RateLimiter {
    per_minute: u32,
    per_day: u32,
    minute_window: Duration,
    day_window: Duration,
    clients: Mutex<HashMap<IpAddr, ClientWindows>>,
}

impl RateLimiter {
    pub fn new(per_minute: u32, per_day: u32) -> Self {
        Self::with_windows(
            per_minute,
            per_day,
            Duration::from_secs(60),
            Duration::from_secs(86_400),
        )
    }

    /// Custom window durations, for tests.
    pub fn with_windows(
        per_minute: u32,
        per_day: u32,
        minute_window: Duration,
        day_window: Duration,
    ) -> Self {
        Self {
            per_minute,
            per_day,
            minute_window,
            day_window,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Record one call from `client`. Returns false when either budget is
    /// exhausted for the current window.
    pub fn allow(&self, client: IpAddr) -> bool {
        let now = Instant::now();
        let mut clients = self.clients.lock().unwrap();
        let entry = clients.entry(client).or_insert_with(|| ClientWindows {
            minute_start: now,
            minute_count: 0,
            day_start: now,
            day_count: 0,
        });

        if now.duration_since(entry.minute_start) >= self.minute_window {
            entry.minute_start = now;
            entry.minute_count = 0;
        }
        if now.duration_since(entry.day_start) >= self.day_window {
            entry.day_start = now;
            entry.day_count = 0;
        }

        if entry.minute_count >= self.per_minute || entry.day_count >= self.per_day {
            return false;
        }
        entry.minute_count += 1;
        entry.day_count += 1;
        true
    }
}
