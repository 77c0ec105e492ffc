use super::*;
use crate::frame::props::PropValue;
use crate::format::video::ColorFamily;

#[test]
fn strides_are_aligned_and_cover_rows() {
    let f = VideoFrame::new(VideoFormat::yuv420p8(), 100, 20).unwrap();
    assert_eq!(f.num_planes(), 3);
    assert_eq!(f.stride(0), 128);
    assert_eq!(f.width(1), 50);
    assert_eq!(f.height(1), 10);
    assert_eq!(f.stride(1), 64);
    assert_eq!(f.plane(1).data.len(), 64 * 10);
}

#[test]
fn sixteen_bit_rows_double_the_byte_width() {
    let f = VideoFrame::new(VideoFormat::gray16(), 40, 2).unwrap();
    assert_eq!(f.row_bytes(0), 80);
    assert_eq!(f.stride(0), 128);
}

#[test]
fn new_like_copies_geometry_and_props_but_not_pixels() {
    let mut src = VideoFrame::new(VideoFormat::yuv444p8(), 8, 4).unwrap();
    src.fill_plane(0, 200);
    src.props_mut().set("_DurationNum", PropValue::Int(1001));

    let out = VideoFrame::new_like(&src).unwrap();
    assert_eq!(out.format(), src.format());
    for p in 0..3 {
        assert_eq!(out.width(p), src.width(p));
        assert_eq!(out.height(p), src.height(p));
    }
    assert_eq!(out.props().get_int("_DurationNum"), Some(1001));
    assert!(out.packed_plane(0).iter().all(|&v| v == 0));
}

#[test]
fn packed_plane_roundtrip_drops_padding() {
    let mut f = VideoFrame::new(VideoFormat::gray8(), 3, 2).unwrap();
    f.write_packed_plane(0, &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(f.packed_plane(0), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(f.plane(0).row(1, 3), &[4, 5, 6]);
    assert!(f.write_packed_plane(0, &[1, 2]).is_err());
}

#[test]
fn fingerprint_ignores_stride_padding_only() {
    let mut a = VideoFrame::new(VideoFormat::gray8(), 4, 2).unwrap();
    let mut b = a.clone();
    a.fill_plane(0, 7);
    b.fill_plane(0, 7);
    // Scribble into the padding of `b`.
    b.plane_mut(0).data[10] = 99;
    assert_eq!(a.fingerprint(), b.fingerprint());

    b.fill_plane(0, 8);
    assert_ne!(a.fingerprint(), b.fingerprint());
}

#[test]
fn zero_sized_frames_are_rejected() {
    assert!(VideoFrame::new(VideoFormat::gray8(), 0, 2).is_err());
}

#[test]
fn fill_plane_writes_float_samples() {
    let single = VideoFormat::new(ColorFamily::Gray, SampleType::Float, 32, 0, 0).unwrap();
    let mut f = VideoFrame::new(single, 3, 2).unwrap();
    f.fill_plane(0, 1);
    let packed = f.packed_plane(0);
    assert_eq!(packed.len(), 3 * 2 * 4);
    for px in packed.chunks_exact(4) {
        assert_eq!(f32::from_ne_bytes([px[0], px[1], px[2], px[3]]), 1.0);
    }

    let half = VideoFormat::new(ColorFamily::Gray, SampleType::Float, 16, 0, 0).unwrap();
    let mut f = VideoFrame::new(half, 2, 1).unwrap();
    f.fill_plane(0, 3);
    let packed = f.packed_plane(0);
    assert_eq!(u16::from_ne_bytes([packed[0], packed[1]]), 0x4200);
}

#[test]
fn half_bits_matches_known_encodings() {
    assert_eq!(half_bits(0), 0);
    assert_eq!(half_bits(1), 0x3c00);
    assert_eq!(half_bits(2048), 0x6800);
    assert_eq!(half_bits(65504), 0x7bff);
}

#[test]
fn hand_built_formats_are_rejected() {
    let mut broken = VideoFormat::gray8();
    broken.bits_per_sample = 0;
    assert!(VideoFrame::new(broken, 4, 4).is_err());
}
