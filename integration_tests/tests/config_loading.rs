mod common;

use bank_core::{
    load_bank_detection_config_from_env, BankDetectionConfig, BankDetectionConfigError,
    CONFIG_PATH_ENV,
};

// Only this test touches the environment variable.
#[test]
fn env_override_then_builtin_fallback() {
    common::init_tracing();

    let strict = common::fixture_path("strict_bank_config.json");
    std::env::set_var(CONFIG_PATH_ENV, &strict);
    let (config, metadata) = load_bank_detection_config_from_env();
    assert_eq!(metadata.path(), Some(&strict));
    assert_eq!(config.height_threshold, 4.0);
    assert_eq!(config.slope_threshold, 10.0);
    assert_eq!(config.min_consecutive, 2);
    assert_eq!(config.buffer_distance, 200.0);

    // an invalid document is reported and the builtin is used instead
    std::env::set_var(CONFIG_PATH_ENV, common::fixture_path("invalid_bank_config.json"));
    let (config, metadata) = load_bank_detection_config_from_env();
    assert!(metadata.is_builtin());
    assert_eq!(*config, BankDetectionConfig::default());

    std::env::remove_var(CONFIG_PATH_ENV);
    let (_, metadata) = load_bank_detection_config_from_env();
    assert!(metadata.is_builtin());
}

#[test]
fn invalid_fixture_fails_validation() {
    let err = BankDetectionConfig::from_file(&common::fixture_path("invalid_bank_config.json"))
        .expect_err("min_consecutive of zero is rejected");
    assert!(matches!(err, BankDetectionConfigError::Invalid(_)));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = BankDetectionConfig::from_json_str("{ \"height_threshold\": ")
        .expect_err("truncated document");
    let wrapped = BankDetectionConfigError::from(err);
    assert!(wrapped.to_string().starts_with("failed to parse bank detection config"));
}
