use std::io::Write;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::frame::video_frame::VideoFrame;
use crate::source::y4m::{colorspace_tag, le_to_native};

/// Writes frames as a YUV4MPEG2 stream.
pub struct Y4mSink<W: Write + Send> {
    out: W,
    started: bool,
}

impl<W: Write + Send> Y4mSink<W> {
    /// Wrap a writer. Nothing is written until [`FrameSink::begin`].
    pub fn new(out: W) -> Self {
        Self {
            out,
            started: false,
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> FrameSink for Y4mSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> DenoiseResult<()> {
        let info = cfg.info;
        let tag = colorspace_tag(&info.format)?;
        writeln!(
            self.out,
            "YUV4MPEG2 W{} H{} F{}:{} Ip A1:1 C{tag}",
            info.width, info.height, info.fps.num, info.fps.den
        )?;
        self.started = true;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &VideoFrame) -> DenoiseResult<()> {
        if !self.started {
            return Err(DenoiseError::internal("y4m frame pushed before begin"));
        }
        self.out.write_all(b"FRAME\n")?;
        let bps = frame.format().bytes_per_sample;
        for p in 0..frame.num_planes() {
            let mut packed = frame.packed_plane(p);
            // Byte swapping is its own inverse.
            le_to_native(&mut packed, bps);
            self.out.write_all(&packed)?;
        }
        Ok(())
    }

    fn end(&mut self) -> DenoiseResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
