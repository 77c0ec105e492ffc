use std::io::Write;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::frame::video_frame::VideoFrame;

/// Writes one `"<index> <fingerprint>"` line per frame and keeps no pixels.
pub struct FingerprintSink<W: Write + Send> {
    out: W,
    started: bool,
    written: u64,
}

impl<W: Write + Send> FingerprintSink<W> {
    /// Wrap a writer.
    pub fn new(out: W) -> Self {
        Self {
            out,
            started: false,
            written: 0,
        }
    }

    /// Lines written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> FrameSink for FingerprintSink<W> {
    fn begin(&mut self, _cfg: SinkConfig) -> DenoiseResult<()> {
        self.started = true;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &VideoFrame) -> DenoiseResult<()> {
        if !self.started {
            return Err(DenoiseError::internal("fingerprint pushed before begin"));
        }
        writeln!(self.out, "{} {:016x}", idx.0, frame.fingerprint())?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> DenoiseResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/fingerprint.rs"]
mod tests;
