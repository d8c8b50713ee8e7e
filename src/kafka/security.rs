//! Helpers turning the security part of a `KafkaConfig` into librdkafka settings.

use std::path::Path;

use log::warn;
use rdkafka::config::ClientConfig;
use regex::Regex;

use super::types::KafkaConfig;

/// Helper: decide whether a path is a valid CA file/dir for OpenSSL (PEM or directory)
pub fn is_likely_ca_path(p: &str) -> bool {
    if Path::new(p).is_dir() {
        return true;
    }
    let lower = p.to_ascii_lowercase();
    [".pem", ".crt", ".cer", ".bundle"].iter().any(|ext| lower.ends_with(ext))
}

/// Apply `security.protocol` and the matching SSL/SASL options.
pub fn configure_security(cc: &mut ClientConfig, config: &KafkaConfig) -> anyhow::Result<()> {
    match config.security_protocol().as_str() {
        "ssl" => {
            cc.set("security.protocol", "ssl");
            configure_ssl(cc, config)?;
        }
        "sasl_plaintext" => {
            cc.set("security.protocol", "sasl_plaintext");
            configure_sasl(cc, config);
        }
        "sasl_ssl" => {
            cc.set("security.protocol", "sasl_ssl");
            configure_ssl(cc, config)?;
            configure_sasl(cc, config);
        }
        "plaintext" => {}
        other => return Err(anyhow::anyhow!("Unsupported security type '{}'", other)),
    }
    Ok(())
}

/// Configure CA, client certificate and keystore options.
/// Callers set `security.protocol` beforehand.
pub fn configure_ssl(cc: &mut ClientConfig, config: &KafkaConfig) -> anyhow::Result<()> {
    if let Some(path) = config.ssl_ca_location.as_deref() {
        if is_likely_ca_path(path) {
            cc.set("ssl.ca.location", path);
        } else {
            warn!("ssl_ca_location '{}' does not look like a PEM CA file or directory; skipping", path);
        }
    }

    match (config.ssl_certificate.as_deref(), config.ssl_key.as_deref()) {
        (Some(cert), Some(key)) => {
            cc.set("ssl.certificate.location", cert);
            cc.set("ssl.key.location", key);
        }
        (None, None) => {}
        _ => {
            return Err(anyhow::anyhow!(
                "ssl_certificate and ssl_key must be configured together"
            ))
        }
    }
    if let Some(pass) = config.ssl_key_password.as_deref() {
        cc.set("ssl.key.password", pass);
    }

    if let Some(path) = config.keystore_location.as_deref() {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".jks") || lower.ends_with(".jceks") {
            return Err(anyhow::anyhow!(
                "Java keystores are not supported, convert '{}' to PKCS#12 first",
                path
            ));
        }
        cc.set("ssl.keystore.location", path);
        if let Some(pass) = config.keystore_password.as_deref() {
            cc.set("ssl.keystore.password", pass);
        }
    }
    Ok(())
}

/// Configure SASL mechanism and credentials parsed from the JAAS string.
pub fn configure_sasl(cc: &mut ClientConfig, config: &KafkaConfig) {
    let mech = config
        .sasl_mechanism
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("SCRAM-SHA-512");
    cc.set("sasl.mechanism", mech);

    if let Some(jaas) = config.sasl_jaas_config.as_deref() {
        match parse_username_password_from_jaas(jaas) {
            Some((user, pass)) => {
                cc.set("sasl.username", &user);
                cc.set("sasl.password", &pass);
            }
            None => warn!("No username/password found in sasl_jaas_config"),
        }
    }
}

/// Extract `username` and `password` from a JAAS login module line such as
/// `org.apache.kafka.common.security.scram.ScramLoginModule required username="u" password="p";`.
pub fn parse_username_password_from_jaas(s: &str) -> Option<(String, String)> {
    Some((jaas_field(s, "username")?, jaas_field(s, "password")?))
}

fn jaas_field(s: &str, field: &str) -> Option<String> {
    let re = Regex::new(&format!(
        r#"(?i)(?:^|[^A-Za-z0-9_]){}\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s;]+))"#,
        regex::escape(field)
    ))
    .ok()?;
    let caps = re.captures(s)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}
