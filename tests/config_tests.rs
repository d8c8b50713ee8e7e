use std::io::Write;

use rktopics::auth::{AttributeValue, TOPICS_FILTER_REGEXP};
use rktopics::config::{AppConfig, TopicSettings};
use rktopics::kafka::KafkaConfig;

#[test]
fn default_connection_is_sane() {
    let cfg = KafkaConfig::default();
    assert_eq!(cfg.broker, "localhost:9092");
    assert!(!cfg.ssl_enabled);
    assert_eq!(cfg.security_protocol(), "plaintext");
    assert_eq!(cfg.request_timeout().as_millis(), 5000);
}

#[test]
fn legacy_ssl_flag_selects_ssl() {
    let cfg = KafkaConfig { ssl_enabled: true, ..KafkaConfig::default() };
    assert_eq!(cfg.security_protocol(), "ssl");
    let cfg = KafkaConfig { ssl_enabled: true, security_type: Some("SASL_SSL".into()), ..KafkaConfig::default() };
    assert_eq!(cfg.security_protocol(), "sasl_ssl");
}

#[test]
fn default_topic_settings() {
    let settings = TopicSettings::default();
    assert_eq!(settings.internal_regexps, vec!["^_.*$"]);
    assert_eq!(settings.stream_regexps.len(), 3);
    assert!(!settings.skip_consumer_groups);
}

#[test]
fn empty_document_uses_defaults() {
    let cfg = AppConfig::from_json("{}").unwrap();
    assert!(cfg.connections.is_empty());
    assert_eq!(cfg.topic.internal_regexps, TopicSettings::default().internal_regexps);
    assert!(cfg.security.default_groups.is_empty());
}

#[test]
fn loads_full_document_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "connections": {{
                "prod": {{ "broker": "kafka-1:9093", "securityType": "sasl_ssl", "saslMechanism": "PLAIN" }}
            }},
            "topic": {{ "internalRegexps": ["^__.*$"], "skipConsumerGroups": true }},
            "security": {{
                "defaultGroups": ["reader"],
                "groups": {{
                    "reader": {{ "attributes": {{ "topics-filter-regexp": ["public-.*"] }} }}
                }}
            }}
        }}"#
    )
    .unwrap();

    let cfg = AppConfig::from_file(file.path()).unwrap();
    let prod = &cfg.connections["prod"];
    assert_eq!(prod.broker, "kafka-1:9093");
    assert_eq!(prod.security_protocol(), "sasl_ssl");
    assert_eq!(prod.sasl_mechanism.as_deref(), Some("PLAIN"));
    assert_eq!(prod.request_timeout_ms, 5000);

    assert_eq!(cfg.topic.internal_regexps, vec!["^__.*$"]);
    assert_eq!(cfg.topic.stream_regexps, TopicSettings::default().stream_regexps);
    assert!(cfg.topic.skip_consumer_groups);

    assert_eq!(cfg.security.default_groups, vec!["reader"]);
    assert_eq!(
        cfg.security.groups["reader"].attributes.get(TOPICS_FILTER_REGEXP),
        Some(&AttributeValue::List(vec!["public-.*".into()]))
    );
}

#[test]
fn unreadable_file_names_the_path() {
    let err = AppConfig::from_file("/nonexistent/rktopics.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/rktopics.json"), "{err}");
}
