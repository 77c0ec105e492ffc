use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::foundation::core::Fps;
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::format::video::{ColorFamily, SampleType, VideoFormat};
use crate::frame::props::PropValue;
use crate::frame::video_frame::VideoFrame;
use crate::source::memory::MemorySource;

const MAGIC: &str = "YUV4MPEG2";

/// Stream parameters parsed from a YUV4MPEG2 header line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Y4mHeader {
    /// Luma width.
    pub width: u32,
    /// Luma height.
    pub height: u32,
    /// Frame rate.
    pub fps: Fps,
    /// Planar format named by the `C` tag.
    pub format: VideoFormat,
}

/// Map a `C` tag (`420jpeg`, `422`, `444p10`, `mono16`, ...) to a format.
pub fn parse_colorspace(tag: &str) -> DenoiseResult<VideoFormat> {
    let (family, rest) = if let Some(rest) = tag.strip_prefix("mono") {
        (None, rest)
    } else if let Some(rest) = tag.strip_prefix("420") {
        (Some((1, 1)), rest)
    } else if let Some(rest) = tag.strip_prefix("422") {
        (Some((1, 0)), rest)
    } else if let Some(rest) = tag.strip_prefix("444") {
        (Some((0, 0)), rest)
    } else {
        return Err(DenoiseError::format(format!(
            "unsupported y4m colorspace '{tag}'"
        )));
    };

    let bits = match rest {
        "" | "jpeg" | "paldv" | "mpeg2" => 8,
        _ => {
            let digits = rest.strip_prefix('p').unwrap_or(rest);
            digits.parse::<u8>().map_err(|_| {
                DenoiseError::format(format!("unsupported y4m colorspace '{tag}'"))
            })?
        }
    };

    match family {
        None => VideoFormat::new(ColorFamily::Gray, SampleType::Integer, bits, 0, 0),
        Some((ssw, ssh)) => {
            VideoFormat::new(ColorFamily::Yuv, SampleType::Integer, bits, ssw, ssh)
        }
    }
}

/// Inverse of [`parse_colorspace`].
pub fn colorspace_tag(format: &VideoFormat) -> DenoiseResult<String> {
    if format.sample_type != SampleType::Integer {
        return Err(DenoiseError::format("y4m only carries integer samples"));
    }
    let base = match (
        format.color_family,
        format.sub_sampling_w,
        format.sub_sampling_h,
    ) {
        (ColorFamily::Gray, 0, 0) => "mono",
        (ColorFamily::Yuv, 1, 1) => "420",
        (ColorFamily::Yuv, 1, 0) => "422",
        (ColorFamily::Yuv, 0, 0) => "444",
        _ => {
            return Err(DenoiseError::format(format!(
                "no y4m colorspace for {format:?}"
            )));
        }
    };
    Ok(match (format.color_family, format.bits_per_sample) {
        (ColorFamily::Gray, 8) => base.to_string(),
        (ColorFamily::Gray, bits) => format!("{base}{bits}"),
        (_, 8) if base == "420" => "420jpeg".to_string(),
        (_, 8) => base.to_string(),
        (_, bits) => format!("{base}p{bits}"),
    })
}

fn parse_header(line: &str) -> DenoiseResult<Y4mHeader> {
    let mut tokens = line.split_ascii_whitespace();
    if tokens.next() != Some(MAGIC) {
        return Err(DenoiseError::format("missing YUV4MPEG2 signature"));
    }
    let (mut width, mut height, mut fps) = (None, None, Fps::default());
    let mut format = VideoFormat::yuv420p8();
    for tok in tokens {
        let Some((key, value)) = tok.split_at_checked(1) else {
            continue;
        };
        match key {
            "W" => width = value.parse::<u32>().ok(),
            "H" => height = value.parse::<u32>().ok(),
            "F" => {
                let bad_rate = || DenoiseError::format(format!("bad y4m frame rate '{value}'"));
                let (num, den) = value.split_once(':').ok_or_else(bad_rate)?;
                let num = num.parse::<u32>().map_err(|_| bad_rate())?;
                let den = den.parse::<u32>().map_err(|_| bad_rate())?;
                fps = Fps::new(num, den)?;
            }
            "C" => format = parse_colorspace(value)?,
            _ => {}
        }
    }
    let width = width.ok_or_else(|| DenoiseError::format("y4m header lacks a W tag"))?;
    let height = height.ok_or_else(|| DenoiseError::format("y4m header lacks an H tag"))?;
    Ok(Y4mHeader {
        width,
        height,
        fps,
        format,
    })
}

fn read_line<R: BufRead>(reader: &mut R) -> DenoiseResult<Option<String>> {
    let mut buf = Vec::new();
    let n = reader.read_until(b'\n', &mut buf)?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| DenoiseError::format("y4m header line is not valid UTF-8"))
}

/// Swap little-endian stream samples into native order (no-op on little-endian hosts).
pub(crate) fn le_to_native(bytes: &mut [u8], bytes_per_sample: u8) {
    if cfg!(target_endian = "big") && bytes_per_sample == 2 {
        for px in bytes.chunks_exact_mut(2) {
            px.swap(0, 1);
        }
    }
}

/// Decode a whole YUV4MPEG2 stream into an in-memory source.
pub fn read_y4m<R: Read>(reader: R) -> DenoiseResult<MemorySource> {
    let mut reader = BufReader::new(reader);
    let header_line =
        read_line(&mut reader)?.ok_or_else(|| DenoiseError::format("empty y4m stream"))?;
    let header = parse_header(&header_line)?;
    let template = VideoFrame::new(header.format, header.width, header.height)?;
    let bps = header.format.bytes_per_sample;

    let mut frames = Vec::new();
    while let Some(line) = read_line(&mut reader)? {
        if !line.starts_with("FRAME") {
            return Err(DenoiseError::format(format!(
                "expected FRAME marker before frame {}",
                frames.len()
            )));
        }
        let mut frame = VideoFrame::new_like(&template)?;
        for p in 0..frame.num_planes() {
            let mut packed = vec![0u8; frame.row_bytes(p) * frame.height(p) as usize];
            reader.read_exact(&mut packed).map_err(|e| {
                DenoiseError::format(format!("truncated y4m frame {}: {e}", frames.len()))
            })?;
            le_to_native(&mut packed, bps);
            frame.write_packed_plane(p, &packed)?;
        }
        let props = frame.props_mut();
        props.set("_DurationNum", PropValue::Int(i64::from(header.fps.den)));
        props.set("_DurationDen", PropValue::Int(i64::from(header.fps.num)));
        props.set("_FrameNumber", PropValue::Int(frames.len() as i64));
        frames.push(frame);
    }

    tracing::debug!(
        width = header.width,
        height = header.height,
        frames = frames.len(),
        "decoded y4m stream"
    );
    MemorySource::new("Y4mSource", frames, header.fps)
}

/// Open and decode a `.y4m` file.
pub fn open_y4m(path: impl AsRef<Path>) -> DenoiseResult<MemorySource> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        DenoiseError::Other(anyhow::Error::new(e).context(format!("open '{}'", path.display())))
    })?;
    read_y4m(file)
}

#[cfg(test)]
#[path = "../../tests/unit/source/y4m.rs"]
mod tests;
