//! Config loading and validation.
//!
//! Config files are hand-edited, so every field must default when absent and
//! settings that cannot produce a meaningful run must fail at load time.

use termdelta_core::config::defaults;
use termdelta_core::{LabelPolicy, TermDeltaConfig, TermDeltaError, TermDeltaErrorCode};

// ═══════════════════════════════════════════════════════════════════════════
// Defaults
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn empty_toml_yields_defaults() {
    let config = TermDeltaConfig::from_toml("").unwrap();
    assert_eq!(config, TermDeltaConfig::default());
    assert_eq!(config.engine.label_policy, LabelPolicy::LatestActive);
    assert!(config.engine.parallel);
    assert_eq!(config.engine.threads, None);
    assert_eq!(config.engine.default_attribute_value, "0");
    assert_eq!(config.engine.default_attribute_label, "Not specified");
    assert_eq!(config.rf2.fsn_type_id, defaults::FSN_TYPE_ID);
    assert_eq!(config.rf2.historical_refset_ids.len(), 12);
    assert_eq!(config.rf2.excluded_creation_times, vec![20020131]);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config = TermDeltaConfig::from_toml(
        r#"
        [engine]
        label_policy = "as_of_event"
        threads = 4
        "#,
    )
    .unwrap();
    assert_eq!(config.engine.label_policy, LabelPolicy::AsOfEvent);
    assert_eq!(config.engine.threads, Some(4));
    assert_eq!(config.engine.relation_separator, ", ");
    assert_eq!(config.rf2.inactivation_refset_id, defaults::CONCEPT_INACTIVATION_REFSET_ID);
}

#[test]
fn config_serializes_back_to_equal_toml() {
    let mut config = TermDeltaConfig::default();
    config.engine.latest_per_component = true;
    config.rf2.excluded_creation_times = vec![20020131, 20030131];

    let text = toml::to_string(&config).unwrap();
    assert_eq!(TermDeltaConfig::from_toml(&text).unwrap(), config);
}

// ═══════════════════════════════════════════════════════════════════════════
// Validation: fatal at startup
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn zero_threads_is_rejected() {
    let err = TermDeltaConfig::from_toml("[engine]\nthreads = 0\n").unwrap_err();
    assert!(matches!(err, TermDeltaError::Config(_)));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn empty_refset_list_is_rejected() {
    let err = TermDeltaConfig::from_toml("[rf2]\nhistorical_refset_ids = []\n").unwrap_err();
    assert!(err.to_string().contains("historical_refset_ids"));
}

#[test]
fn unknown_label_policy_is_a_parse_error() {
    let err = TermDeltaConfig::from_toml("[engine]\nlabel_policy = \"newest\"\n").unwrap_err();
    assert!(matches!(err, TermDeltaError::ConfigParse(_)));
}
