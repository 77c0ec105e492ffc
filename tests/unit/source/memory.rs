use super::*;
use crate::host::core::Core;
use crate::host::node::Node;

fn gray(value: u8) -> VideoFrame {
    let mut f = VideoFrame::new(VideoFormat::gray8(), 4, 4).unwrap();
    f.fill_plane(0, u16::from(value));
    f
}

#[test]
fn memory_source_serves_the_shared_frame() {
    let src = MemorySource::new("mem", vec![gray(1), gray(2)], Fps::default()).unwrap();
    assert_eq!(src.video_info().num_frames, 2);
    let node = Node::new(src).unwrap();

    let core = Core::default();
    let f = core.get_frame(&node, FrameIndex(1)).unwrap();
    assert_eq!(f.packed_plane(0)[0], 2);
}

#[test]
fn memory_source_rejects_empty_and_mixed_geometry() {
    assert!(MemorySource::new("mem", vec![], Fps::default()).is_err());

    let other = VideoFrame::new(VideoFormat::gray8(), 8, 4).unwrap();
    let err = MemorySource::new("mem", vec![gray(1), other], Fps::default())
        .err()
        .unwrap();
    assert!(err.to_string().contains("frame 1"));
}

#[test]
fn blank_source_fills_planes_and_numbers_frames() {
    let info = VideoInfo {
        format: VideoFormat::yuv420p8(),
        width: 8,
        height: 4,
        num_frames: 3,
        fps: Fps::new(30, 1).unwrap(),
    };
    let node = Node::new(BlankSource::new(info, &[16, 128, 240]).unwrap()).unwrap();
    let f = Core::default().get_frame(&node, FrameIndex(2)).unwrap();
    assert!(f.packed_plane(0).iter().all(|&v| v == 16));
    assert!(f.packed_plane(2).iter().all(|&v| v == 240));
    assert_eq!(f.props().get_int("_FrameNumber"), Some(2));
    assert_eq!(f.props().get_int("_DurationDen"), Some(30));
}

#[test]
fn blank_source_validates_plane_values() {
    let info = VideoInfo {
        format: VideoFormat::gray8(),
        width: 2,
        height: 2,
        num_frames: 1,
        fps: Fps::default(),
    };
    assert!(BlankSource::new(info, &[1, 2]).is_err());
    assert!(BlankSource::new(info, &[300]).is_err());
}

#[test]
fn blank_source_float_planes_hold_the_requested_value() {
    let info = VideoInfo {
        format: VideoFormat::new(
            crate::format::video::ColorFamily::Gray,
            crate::format::video::SampleType::Float,
            32,
            0,
            0,
        )
        .unwrap(),
        width: 4,
        height: 2,
        num_frames: 1,
        fps: Fps::default(),
    };
    let node = Node::new(BlankSource::new(info, &[1]).unwrap()).unwrap();
    let f = Core::default().get_frame(&node, FrameIndex(0)).unwrap();
    let packed = f.packed_plane(0);
    assert_eq!(packed.len(), 4 * 2 * 4);
    for px in packed.chunks_exact(4) {
        assert_eq!(f32::from_ne_bytes([px[0], px[1], px[2], px[3]]), 1.0);
    }
}

#[test]
fn blank_source_rejects_inconsistent_formats() {
    let mut format = VideoFormat::gray8();
    format.bits_per_sample = 0;
    let info = VideoInfo {
        format,
        width: 2,
        height: 2,
        num_frames: 1,
        fps: Fps::default(),
    };
    let err = BlankSource::new(info, &[0]).err().unwrap();
    assert!(err.to_string().contains("unsupported sample layout"));
}
