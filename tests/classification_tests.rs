use rktopics::config::TopicSettings;
use rktopics::topic::{ClassificationPolicy, TopicListView};

fn policy(internal: &[&str], stream: &[&str]) -> ClassificationPolicy {
    let settings = TopicSettings {
        internal_regexps: internal.iter().map(|s| s.to_string()).collect(),
        stream_regexps: stream.iter().map(|s| s.to_string()).collect(),
        skip_consumer_groups: false,
    };
    ClassificationPolicy::new(&settings).expect("patterns compile")
}

#[test]
fn internal_match_covers_whole_name() {
    let p = policy(&["_sch.*", "connect-offsets"], &[]);
    assert!(p.is_internal("_schemas"));
    assert!(p.is_internal("connect-offsets"));
    // substring hits are not enough
    assert!(!p.is_internal("my-connect-offsets"));
    assert!(!p.is_internal("connect-offsets-v2"));
    assert!(!p.is_internal("x_schemas"));
}

#[test]
fn explicit_anchors_are_accepted() {
    let p = policy(&["^_.*$"], &["^.*-changelog$"]);
    assert!(p.is_internal("_confluent-metrics"));
    assert!(p.is_stream("app-store-changelog"));
    assert!(!p.is_stream("app-store-changelog-old"));
}

#[test]
fn alternation_is_anchored_as_a_whole() {
    let p = policy(&[], &["a|b"]);
    assert!(p.is_stream("a"));
    assert!(p.is_stream("b"));
    assert!(!p.is_stream("ab"));
    assert!(!p.is_stream("xb"));
}

#[test]
fn no_patterns_classify_nothing() {
    let p = policy(&[], &[]);
    assert!(!p.is_internal("_schemas"));
    assert!(!p.is_stream("app-changelog"));
}

#[test]
fn default_settings_classify_common_names() {
    let p = ClassificationPolicy::new(&TopicSettings::default()).unwrap();
    assert!(p.is_internal("__consumer_offsets"));
    assert!(p.is_internal("_schemas"));
    assert!(p.is_stream("app-KSTREAM-AGGREGATE-STATE-STORE-0000000001-changelog"));
    assert!(p.is_stream("app-KSTREAM-AGGREGATE-STATE-STORE-0000000001-repartition"));
    assert!(p.is_stream("orders-rekey"));
    assert!(!p.is_internal("orders"));
    assert!(!p.is_stream("orders"));
}

#[test]
fn malformed_pattern_fails_at_startup() {
    let settings = TopicSettings {
        internal_regexps: vec!["(unclosed".into()],
        ..TopicSettings::default()
    };
    let err = ClassificationPolicy::new(&settings).unwrap_err();
    assert!(err.to_string().contains("internal_regexps"), "{err}");
}

#[test]
fn schemas_is_hidden_by_hide_internal() {
    let p = policy(&["^_.*"], &[]);
    assert!(!TopicListView::HideInternal.passes(&p, "_schemas"));
    assert!(TopicListView::All.passes(&p, "_schemas"));
}
