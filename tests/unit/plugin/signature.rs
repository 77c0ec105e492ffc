use super::*;

const SIG: &str = "clip:vnode;radius:int:opt;alphaLow:float:opt;";

#[test]
fn parses_declarations_in_order() {
    let sig: Signature = SIG.parse().unwrap();
    let names: Vec<_> = sig.args().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["clip", "radius", "alphaLow"]);
    assert_eq!(sig.args()[0].kind, ArgKind::Node);
    assert!(!sig.args()[0].optional);
    assert!(sig.args()[2].optional);
}

#[test]
fn rejects_malformed_declarations() {
    assert!("clip".parse::<Signature>().is_err());
    assert!("clip:vclip;".parse::<Signature>().is_err());
    assert!("clip:vnode:maybe;".parse::<Signature>().is_err());
    assert!("clip:vnode:opt:x;".parse::<Signature>().is_err());
    assert!("1clip:vnode;".parse::<Signature>().is_err());
    assert!("a:int;a:float;".parse::<Signature>().is_err());
    assert!("".parse::<Signature>().unwrap().args().is_empty());
}

#[test]
fn validate_reports_missing_required_argument() {
    let sig: Signature = SIG.parse().unwrap();
    let err = sig
        .validate("TemporalDenoise", &ArgMap::new().with("radius", ArgValue::Int(1)))
        .unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("TemporalDenoise: clip required."));
}

#[test]
fn validate_accepts_int_for_float_but_not_float_for_int() {
    let sig: Signature = "alphaLow:float:opt;radius:int:opt;".parse().unwrap();
    assert!(
        sig.validate("f", &ArgMap::new().with("alphaLow", ArgValue::Int(1)))
            .is_ok()
    );
    assert!(
        sig.validate("f", &ArgMap::new().with("radius", ArgValue::Float(1.5)))
            .is_err()
    );
}

#[test]
fn validate_rejects_unknown_arguments() {
    let sig: Signature = "radius:int:opt;".parse().unwrap();
    let err = sig
        .validate("f", &ArgMap::new().with("radiu", ArgValue::Int(1)))
        .unwrap_err();
    assert!(err.to_string().contains("unknown argument 'radiu'"));
}
