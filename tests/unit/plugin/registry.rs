use super::*;
use crate::plugin::args::ArgValue;
use crate::source::memory::BlankSource;

fn blank_plugin() -> Plugin {
    let mut p = Plugin::new("com.example.blank", "blank", "Blank clips", (1, 0));
    p.register_function("Blank", "frames:int;", "clip:vnode;", |args| {
        let frames = args.get_int("frames")?.unwrap_or(1);
        Node::new(BlankSource::gray8(4, 4, frames as u64, 0)?)
    })
    .unwrap();
    p
}

#[test]
fn invoke_validates_then_constructs() {
    let p = blank_plugin();
    let node = p
        .invoke("Blank", &ArgMap::new().with("frames", ArgValue::Int(3)))
        .unwrap();
    assert_eq!(node.video_info().num_frames, 3);

    let err = p.invoke("Blank", &ArgMap::new()).unwrap_err();
    assert!(err.to_string().contains("Blank: frames required."));
}

#[test]
fn unknown_and_duplicate_functions_are_config_errors() {
    let mut p = blank_plugin();
    assert!(p.invoke("Nope", &ArgMap::new()).unwrap_err().is_config());
    let dup = p.register_function("Blank", "", "clip:vnode;", |_| {
        Err(DenoiseError::internal("unused"))
    });
    assert!(dup.unwrap_err().is_config());
    assert_eq!(p.functions().count(), 1);
    assert_eq!(p.function("Blank").unwrap().args().args().len(), 1);
}

#[test]
fn bad_signature_fails_registration() {
    let mut p = Plugin::new("id", "ns", "name", (0, 1));
    assert!(
        p.register_function("F", "x:bogus;", "clip:vnode;", |_| {
            Err(DenoiseError::internal("unused"))
        })
        .is_err()
    );
    assert_eq!(p.version(), (0, 1));
    assert_eq!(p.namespace(), "ns");
}
