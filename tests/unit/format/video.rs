use super::*;

fn info(format: VideoFormat, width: u32, height: u32) -> VideoInfo {
    VideoInfo {
        format,
        width,
        height,
        num_frames: 1,
        fps: Fps::default(),
    }
}

#[test]
fn presets_match_validated_constructor() {
    let built = VideoFormat::new(ColorFamily::Yuv, SampleType::Integer, 8, 1, 1).unwrap();
    assert_eq!(built, VideoFormat::yuv420p8());
    let built = VideoFormat::new(ColorFamily::Gray, SampleType::Integer, 16, 0, 0).unwrap();
    assert_eq!(built, VideoFormat::gray16());
}

#[test]
fn chroma_planes_follow_subsampling() {
    let f = VideoFormat::yuv420p8();
    assert_eq!(f.plane_width(0, 64), 64);
    assert_eq!(f.plane_height(0, 32), 32);
    assert_eq!(f.plane_width(1, 64), 32);
    assert_eq!(f.plane_height(2, 32), 16);

    let f = VideoFormat::yuv422p8();
    assert_eq!(f.plane_width(1, 64), 32);
    assert_eq!(f.plane_height(1, 32), 32);

    let f = VideoFormat::rgb24();
    assert_eq!(f.plane_width(2, 64), 64);
}

#[test]
fn constructor_rejects_odd_layouts() {
    assert!(VideoFormat::new(ColorFamily::Gray, SampleType::Integer, 7, 0, 0).is_err());
    assert!(VideoFormat::new(ColorFamily::Rgb, SampleType::Integer, 8, 1, 0).is_err());
    assert!(VideoFormat::new(ColorFamily::Yuv, SampleType::Float, 8, 0, 0).is_err());
}

#[test]
fn validate_rejects_geometry_not_divisible_by_subsampling() {
    assert!(info(VideoFormat::yuv420p8(), 64, 32).validate().is_ok());
    assert!(info(VideoFormat::yuv420p8(), 63, 32).validate().is_err());
    assert!(info(VideoFormat::yuv444p8(), 63, 31).validate().is_ok());
    assert!(info(VideoFormat::gray8(), 0, 4).validate().is_err());
}

#[test]
fn max_sample_value_tracks_bit_depth() {
    assert_eq!(VideoFormat::gray8().max_sample_value(), 255);
    assert_eq!(VideoFormat::gray16().max_sample_value(), 65535);
}

#[test]
fn validate_catches_formats_built_field_by_field() {
    assert!(VideoFormat::yuv420p16().validate().is_ok());

    let mut zero_bits = VideoFormat::gray8();
    zero_bits.bits_per_sample = 0;
    assert_eq!(zero_bits.max_sample_value(), 0);
    assert!(zero_bits.validate().is_err());
    assert!(info(zero_bits, 4, 4).validate().is_err());

    let mut wide = VideoFormat::gray8();
    wide.bytes_per_sample = 2;
    assert!(wide.validate().is_err());

    let mut planes = VideoFormat::yuv444p8();
    planes.num_planes = 1;
    assert!(planes.validate().is_err());

    let decoded: VideoFormat = serde_json::from_str(
        r#"{"color_family":"Gray","sample_type":"Integer","bits_per_sample":8,
            "bytes_per_sample":1,"sub_sampling_w":0,"sub_sampling_h":7,"num_planes":1}"#,
    )
    .unwrap();
    assert!(info(decoded, 4, 4).validate().is_err());
}
