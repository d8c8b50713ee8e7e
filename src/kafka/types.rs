use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings of one cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KafkaConfig {
    pub broker: String,
    // Legacy flag kept for older config files; `security_type` takes precedence
    pub ssl_enabled: bool,
    /// Optional security type: "plaintext" | "ssl" | "sasl_plaintext" | "sasl_ssl"
    #[serde(rename = "security_type", alias = "securityType")]
    pub security_type: Option<String>,
    /// PEM CA file or directory
    #[serde(rename = "ssl_ca_location", alias = "sslCaLocation")]
    pub ssl_ca_location: Option<String>,
    #[serde(rename = "ssl_certificate", alias = "sslCertificate")]
    pub ssl_certificate: Option<String>,
    #[serde(rename = "ssl_key", alias = "sslKey")]
    pub ssl_key: Option<String>,
    #[serde(rename = "ssl_key_password", alias = "sslKeyPassword")]
    pub ssl_key_password: Option<String>,
    /// PKCS#12 keystore (.p12/.pfx)
    #[serde(rename = "keystore_location", alias = "keystoreLocation")]
    pub keystore_location: Option<String>,
    #[serde(rename = "keystore_password", alias = "keystorePassword")]
    pub keystore_password: Option<String>,
    /// Optional SASL mechanism (e.g., PLAIN, SCRAM-SHA-256, SCRAM-SHA-512)
    #[serde(rename = "sasl_mechanism", alias = "saslMechanism")]
    pub sasl_mechanism: Option<String>,
    /// JAAS-like config string; username/password are parsed out of it
    #[serde(rename = "sasl_jaas_config", alias = "saslJaasConfig")]
    pub sasl_jaas_config: Option<String>,
    #[serde(rename = "request_timeout_ms", alias = "requestTimeoutMs")]
    pub request_timeout_ms: u64,
}

impl KafkaConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Effective security protocol, honouring the legacy `ssl_enabled` flag.
    pub fn security_protocol(&self) -> String {
        self.security_type
            .as_deref()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| if self.ssl_enabled { "ssl".into() } else { "plaintext".into() })
    }
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            broker: "localhost:9092".into(),
            ssl_enabled: false,
            security_type: None,
            ssl_ca_location: None,
            ssl_certificate: None,
            ssl_key: None,
            ssl_key_password: None,
            keystore_location: None,
            keystore_password: None,
            sasl_mechanism: None,
            sasl_jaas_config: None,
            request_timeout_ms: 5000,
        }
    }
}
