use super::*;

#[test]
fn test_defaults_follow_limits() {
    let options = MergeOptions::default();
    assert!(!options.strict_unions);
    assert!(options.warn_duplicate_properties);
    assert_eq!(options.max_alias_depth, limits::MAX_ALIAS_DEPTH);
    assert_eq!(
        options.max_decomposition_steps,
        limits::MAX_DECOMPOSITION_STEPS
    );
}

#[test]
fn test_partial_json_keeps_defaults() {
    let options = MergeOptions::from_json(r#"{ "strict_unions": true, "max_alias_depth": 8 }"#)
        .expect("valid options");
    assert!(options.strict_unions);
    assert_eq!(options.max_alias_depth, 8);
    assert!(options.warn_duplicate_properties);
}

#[test]
fn test_invalid_json_is_rejected() {
    assert!(MergeOptions::from_json(r#"{ "strict_unions": "yes" }"#).is_err());
}

#[test]
fn test_strict_preset() {
    let options = MergeOptions::strict();
    assert!(options.strict_unions);
    assert_eq!(options.max_alias_depth, MergeOptions::default().max_alias_depth);
}

#[test]
fn test_alias_depth_is_clamped_to_limit() {
    let options = MergeOptions::from_json(r#"{ "max_alias_depth": 100 }"#).expect("valid options");
    assert_eq!(options.max_alias_depth, 100);
    assert_eq!(options.alias_depth(), limits::MAX_ALIAS_DEPTH);

    let shallow = MergeOptions {
        max_alias_depth: 8,
        ..MergeOptions::default()
    };
    assert_eq!(shallow.alias_depth(), 8);
}
