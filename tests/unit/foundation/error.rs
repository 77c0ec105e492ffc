use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DenoiseError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        DenoiseError::format("x")
            .to_string()
            .contains("format error:")
    );
    assert!(
        DenoiseError::kernel("x")
            .to_string()
            .contains("kernel error:")
    );
    assert!(
        DenoiseError::internal("x")
            .to_string()
            .contains("internal error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DenoiseError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn io_errors_convert_transparently() {
    let err: DenoiseError = std::io::Error::other("disk gone").into();
    assert!(matches!(err, DenoiseError::Io(_)));
    assert_eq!(err.to_string(), "disk gone");
}

#[test]
fn only_config_errors_report_is_config() {
    assert!(DenoiseError::config("clip required").is_config());
    assert!(!DenoiseError::internal("bad index").is_config());
}
