use smallvec::SmallVec;

use crate::denoise::kernel::PlaneView;
use crate::foundation::error::{DenoiseError, DenoiseResult};
use crate::frame::video_frame::VideoFrame;
use crate::host::context::FrameHandle;

/// Split fetched window frames and the output frame into per-plane kernel views.
///
/// Source `k` of every view comes from `frames[k]`, so window order is kept. Views borrow the
/// frames, which therefore stay alive until every kernel call has returned.
pub fn marshal_planes<'a>(
    frames: &'a [FrameHandle],
    out: &'a mut VideoFrame,
) -> DenoiseResult<Vec<PlaneView<'a>>> {
    let format = out.format();
    let num_planes = out.num_planes();
    let geometry: SmallVec<[(u32, u32); 3]> =
        (0..num_planes).map(|p| (out.width(p), out.height(p))).collect();

    for (k, f) in frames.iter().enumerate() {
        if f.format() != format || f.num_planes() != num_planes {
            return Err(DenoiseError::internal(format!(
                "window frame {k} has {} planes of a different format, output has {num_planes}",
                f.num_planes()
            )));
        }
        for (p, &(w, h)) in geometry.iter().enumerate() {
            if f.width(p) != w || f.height(p) != h {
                return Err(DenoiseError::internal(format!(
                    "window frame {k} plane {p} is {}x{}, expected {w}x{h}",
                    f.width(p),
                    f.height(p)
                )));
            }
        }
    }

    Ok(out
        .planes_mut()
        .zip(geometry)
        .enumerate()
        .map(move |(plane, (target, (width, height)))| PlaneView {
            plane,
            width,
            height,
            format,
            sources: frames.iter().map(|f| f.frame_ref().plane(plane)).collect(),
            target,
        })
        .collect())
}
