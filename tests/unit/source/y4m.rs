use super::*;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::encode::y4m::Y4mSink;
use crate::foundation::core::FrameIndex;
use crate::host::node::Filter;

fn two_frame_stream() -> Vec<u8> {
    let mut s = b"YUV4MPEG2 W4 H2 F30:1 Ip A1:1 C420jpeg\n".to_vec();
    for v in [10u8, 20] {
        s.extend_from_slice(b"FRAME\n");
        s.extend(std::iter::repeat_n(v, 8));
        s.extend(std::iter::repeat_n(128, 2));
        s.extend(std::iter::repeat_n(129, 2));
    }
    s
}

#[test]
fn colorspace_tags_map_to_formats() {
    assert_eq!(parse_colorspace("420jpeg").unwrap(), VideoFormat::yuv420p8());
    assert_eq!(parse_colorspace("420mpeg2").unwrap(), VideoFormat::yuv420p8());
    assert_eq!(parse_colorspace("422").unwrap(), VideoFormat::yuv422p8());
    assert_eq!(parse_colorspace("444p16").unwrap(), VideoFormat::yuv444p16());
    assert_eq!(parse_colorspace("mono").unwrap(), VideoFormat::gray8());
    assert_eq!(parse_colorspace("mono16").unwrap(), VideoFormat::gray16());
    assert!(parse_colorspace("411").is_err());

    let p10 = parse_colorspace("420p10").unwrap();
    assert_eq!(p10.bits_per_sample, 10);
    assert_eq!(p10.bytes_per_sample, 2);
    assert_eq!(colorspace_tag(&p10).unwrap(), "420p10");
    assert_eq!(colorspace_tag(&VideoFormat::yuv420p8()).unwrap(), "420jpeg");
    assert!(colorspace_tag(&VideoFormat::rgb24()).is_err());
}

#[test]
fn reads_frames_planes_and_props() {
    let src = read_y4m(two_frame_stream().as_slice()).unwrap();
    let info = *src.video_info();
    assert_eq!((info.width, info.height, info.num_frames), (4, 2, 2));
    assert_eq!(info.fps, Fps::new(30, 1).unwrap());

    let f1 = &src.frames()[1];
    assert!(f1.packed_plane(0).iter().all(|&v| v == 20));
    assert_eq!(f1.packed_plane(2), vec![129, 129]);
    assert_eq!(f1.props().get_int("_FrameNumber"), Some(1));
}

#[test]
fn truncated_and_unmarked_frames_fail() {
    let mut s = two_frame_stream();
    s.truncate(s.len() - 3);
    assert!(read_y4m(s.as_slice()).is_err());

    let bad = b"YUV4MPEG2 W2 H2 C mono\nFRAMX\n0000".to_vec();
    assert!(read_y4m(bad.as_slice()).is_err());
    assert!(read_y4m(b"NOTY4M W2 H2\n".as_slice()).is_err());
    assert!(read_y4m(b"YUV4MPEG2 H2\n".as_slice()).is_err());
}

#[test]
fn sink_writes_back_identical_stream() {
    let input = two_frame_stream();
    let src = read_y4m(input.as_slice()).unwrap();

    let mut sink = Y4mSink::new(Vec::new());
    sink.begin(SinkConfig {
        info: *src.video_info(),
        frame_count: 2,
    })
    .unwrap();
    for (i, f) in src.frames().iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), f).unwrap();
    }
    sink.end().unwrap();
    assert_eq!(sink.into_inner(), input);
}
