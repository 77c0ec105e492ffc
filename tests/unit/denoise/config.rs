use super::*;
use crate::plugin::args::ArgValue;

#[test]
fn defaults_match_parameter_table() {
    let c = FilterConfig::default();
    assert_eq!(c.radius, 2);
    assert_eq!(c.alpha_low, 0.7);
    assert_eq!(c.alpha_mid, 0.4);
    assert_eq!(c.alpha_high, 0.1);
    assert_eq!(c.strength, 1.0);
    assert_eq!(c.window_len(), 5);
}

#[test]
fn from_args_applies_defaults_for_absent_keys() {
    let c = FilterConfig::from_args(&ArgMap::new()).unwrap();
    assert_eq!(c, FilterConfig::default());

    let args = ArgMap::new()
        .with("radius", ArgValue::Int(0))
        .with("alphaMid", ArgValue::Float(0.25))
        .with("strength", ArgValue::Int(2));
    let c = FilterConfig::from_args(&args).unwrap();
    assert_eq!(c.radius, 0);
    assert_eq!(c.alpha_low, 0.7);
    assert_eq!(c.alpha_mid, 0.25);
    assert_eq!(c.strength, 2.0);
    assert_eq!(c.window_len(), 1);
}

#[test]
fn coefficients_are_not_range_checked() {
    let args = ArgMap::new()
        .with("alphaLow", ArgValue::Float(-3.0))
        .with("alphaHigh", ArgValue::Float(42.0));
    let c = FilterConfig::from_args(&args).unwrap();
    assert_eq!(c.alpha_low, -3.0);
    assert_eq!(c.alpha_high, 42.0);
}

#[test]
fn negative_or_oversized_radius_is_a_config_error() {
    let err = FilterConfig::from_args(&ArgMap::new().with("radius", ArgValue::Int(-1)))
        .unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("radius must be >= 0"));

    let err = FilterConfig::from_args(&ArgMap::new().with("radius", ArgValue::Int(1 << 40)))
        .unwrap_err();
    assert!(err.is_config());

    let at_limit = ArgMap::new().with("radius", ArgValue::Int(i64::from(MAX_RADIUS)));
    assert_eq!(FilterConfig::from_args(&at_limit).unwrap().radius, MAX_RADIUS);

    let huge = ArgMap::new().with("radius", ArgValue::Int(i64::from(i32::MAX)));
    let err = FilterConfig::from_args(&huge).unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("exceeds the maximum of 1024"));
}

#[test]
fn oversized_radius_is_rejected_from_json_and_struct_literals() {
    let err = FilterConfig::from_json_str(r#"{ "radius": 4294967295 }"#).unwrap_err();
    assert!(err.to_string().contains("exceeds the maximum"));

    let config = FilterConfig {
        radius: MAX_RADIUS + 1,
        ..FilterConfig::default()
    };
    assert!(config.validate().unwrap_err().is_config());
}

#[test]
fn mistyped_argument_is_a_config_error() {
    let err = FilterConfig::from_args(
        &ArgMap::new().with("alphaLow", ArgValue::Data("high".to_string())),
    )
    .unwrap_err();
    assert!(err.is_config());
}

#[test]
fn json_uses_camel_case_keys_and_defaults() {
    let c = FilterConfig::from_json_str(r#"{ "radius": 3, "alphaHigh": 0.05 }"#).unwrap();
    assert_eq!(c.radius, 3);
    assert_eq!(c.alpha_high, 0.05);
    assert_eq!(c.alpha_low, 0.7);

    assert!(FilterConfig::from_json_str(r#"{ "alpha_low": 1.0 }"#).is_err());
    assert!(FilterConfig::from_json_str(r#"{ "radius": -2 }"#).is_err());
}
