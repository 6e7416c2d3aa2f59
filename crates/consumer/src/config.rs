use std::time::Duration;

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

use crate::queue::ReceiveOptions;

/// Configuration for the intake queue consumer.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerConfig {
    /// Queue endpoint URL.
    pub queue_url: String,

    /// Provider region.
    pub region: String,

    #[serde(serialize_with = "serialize_secret")]
    pub access_key_id: Secret<String>,

    #[serde(serialize_with = "serialize_secret")]
    pub secret_access_key: Secret<String>,

    /// Max messages fetched per poll cycle.
    pub batch_size: u32,

    /// Long-poll wait per receive call (seconds).
    pub wait_secs: u64,

    /// Visibility timeout granted per receive (seconds).
    pub visibility_timeout_secs: u64,

    /// Delay between poll cycles (milliseconds).
    pub idle_delay_ms: u64,
}

impl ConsumerConfig {
    #[must_use]
    pub fn receive_options(&self) -> ReceiveOptions {
        ReceiveOptions {
            max_messages: self.batch_size,
            wait: Duration::from_secs(self.wait_secs),
            visibility_timeout: Duration::from_secs(self.visibility_timeout_secs),
        }
    }

    #[must_use]
    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.idle_delay_ms)
    }
}

impl std::fmt::Debug for ConsumerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsumerConfig")
            .field("queue_url", &self.queue_url)
            .field("region", &self.region)
            .field("access_key_id", &"[REDACTED]")
            .field("secret_access_key", &"[REDACTED]")
            .field("batch_size", &self.batch_size)
            .field("wait_secs", &self.wait_secs)
            .field("visibility_timeout_secs", &self.visibility_timeout_secs)
            .field("idle_delay_ms", &self.idle_delay_ms)
            .finish()
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            queue_url: String::new(),
            region: String::new(),
            access_key_id: Secret::new(String::new()),
            secret_access_key: Secret::new(String::new()),
            batch_size: 10,
            wait_secs: 5,
            visibility_timeout_secs: 30,
            idle_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = ConsumerConfig::default();
        assert_eq!(cfg.batch_size, 10);
        assert_eq!(cfg.wait_secs, 5);
        assert_eq!(cfg.visibility_timeout_secs, 30);
        assert_eq!(cfg.idle_delay_ms, 1000);
    }

    #[test]
    fn deserialize_from_json() {
        let json = r#"{
            "queue_url": "https://queue.example/intake",
            "region": "ap-south-1",
            "access_key_id": "AKIA123",
            "batch_size": 5
        }"#;
        let cfg: ConsumerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.queue_url, "https://queue.example/intake");
        assert_eq!(cfg.access_key_id.expose_secret(), "AKIA123");
        assert_eq!(cfg.batch_size, 5);
        // defaults for unspecified fields
        assert_eq!(cfg.wait_secs, 5);
        assert_eq!(cfg.idle_delay_ms, 1000);
    }

    #[test]
    fn debug_redacts_credentials() {
        let cfg = ConsumerConfig {
            secret_access_key: Secret::new("super-secret".into()),
            ..Default::default()
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn receive_options_reflect_config() {
        let cfg = ConsumerConfig {
            batch_size: 3,
            wait_secs: 2,
            visibility_timeout_secs: 45,
            ..Default::default()
        };
        let options = cfg.receive_options();
        assert_eq!(options.max_messages, 3);
        assert_eq!(options.wait, Duration::from_secs(2));
        assert_eq!(options.visibility_timeout, Duration::from_secs(45));
    }
}
