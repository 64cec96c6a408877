use crate::chat::{DisabledReplyProvider, HttpReplyProvider, ReplyProvider};
use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::store::MemoryStore;
use dashmap::DashMap;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// User, lesson, and session storage
    pub store: Arc<MemoryStore>,

    /// Rate limit tracking: user id -> (count, window_start)
    pub rate_limiter: DashMap<u64, (u32, std::time::Instant)>,

    /// External conversational-reply backend
    pub chat: Arc<dyn ReplyProvider>,
}

impl AppState {
    /// Create new server state
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let chat: Arc<dyn ReplyProvider> = match &config.chat_api_url {
            Some(url) => Arc::new(HttpReplyProvider::new(
                url.clone(),
                config.chat_api_key.clone(),
            )?),
            None => Arc::new(DisabledReplyProvider),
        };

        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(MemoryStore::new()),
            rate_limiter: DashMap::new(),
            chat,
        })
    }

    /// Check rate limit for an authenticated user
    pub fn check_rate_limit(&self, user_id: u64) -> bool {
        let now = std::time::Instant::now();
        let window = std::time::Duration::from_secs(60);
        let limit = self.config.rate_limit_per_minute;

        let mut entry = self.rate_limiter.entry(user_id).or_insert((0, now));
        let (count, window_start) = entry.value_mut();

        // Reset if window has passed
        if now.duration_since(*window_start) > window {
            *count = 0;
            *window_start = now;
        }

        if *count >= limit {
            return false;
        }

        *count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_trips_after_configured_count() {
        let config = ServerConfig {
            rate_limit_per_minute: 3,
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();

        assert!(state.check_rate_limit(1));
        assert!(state.check_rate_limit(1));
        assert!(state.check_rate_limit(1));
        assert!(!state.check_rate_limit(1));
        // Other users are unaffected
        assert!(state.check_rate_limit(2));
    }
}
