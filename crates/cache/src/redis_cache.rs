use crate::error::Result;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub url: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("REDIS_URL").unwrap_or_else(|_| Self::default().url),
        }
    }
}

/// Thin wrapper over a multiplexed Redis connection. Used for rate-limit
/// counters and revoked-token tracking.
#[derive(Clone)]
pub struct Cache {
    manager: ConnectionManager,
}

impl Cache {
    pub async fn new(config: CacheConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let manager = client.get_connection_manager().await?;
        Ok(Self { manager })
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        Ok(conn.get(key).await?)
    }

    /// Set a value, with an optional TTL in seconds.
    pub async fn set(&self, key: &str, value: &str, ttl_seconds: Option<usize>) -> Result<()> {
        let mut conn = self.manager.clone();
        match ttl_seconds {
            Some(ttl) => conn.set_ex::<_, _, ()>(key, value, ttl as u64).await?,
            None => conn.set::<_, _, ()>(key, value).await?,
        }
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    pub async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.manager.clone();
        Ok(conn.exists(key).await?)
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        redis::cmd("PING").query_async::<()>(&mut conn).await?;
        Ok(())
    }
}

pub fn rate_limit_key(scope: &str, client: &str) -> String {
    format!("rate_limit:{}:{}", scope, client)
}

pub fn revoked_token_key(jti: &str) -> String {
    format!("revoked_token:{}", jti)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_helpers() {
        assert_eq!(rate_limit_key("login", "1.2.3.4"), "rate_limit:login:1.2.3.4");
        assert_eq!(revoked_token_key("abc"), "revoked_token:abc");
    }

    #[tokio::test]
    #[ignore] // Only run with Redis available
    async fn test_cache_roundtrip() {
        let cache = Cache::new(CacheConfig::from_env())
            .await
            .expect("Failed to connect to Redis");
        cache.ping().await.expect("Redis ping failed");

        cache.set("test:key", "value", Some(5)).await.unwrap();
        assert_eq!(cache.get("test:key").await.unwrap().as_deref(), Some("value"));
        cache.delete("test:key").await.unwrap();
        assert_eq!(cache.get("test:key").await.unwrap(), None);
    }
}
