//! Sound output seam. The simulation never plays anything itself; the
//! frame loop hands each `FrameReport` to `play_frame`.

use std::io::Write;

use crate::compute::FrameReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clip {
    /// A projectile hit a target.
    Gong,
}

pub trait AudioSink {
    fn play_one_shot(&mut self, clip: Clip);
    fn stop_all(&mut self);
}

/// One clip per hit; a reset silences whatever is still playing.
pub fn play_frame(report: &FrameReport, sink: &mut impl AudioSink) {
    if report.reset {
        sink.stop_all();
    }
    for _ in 0..report.hits {
        sink.play_one_shot(Clip::Gong);
    }
}

/// Rings the terminal bell. A bell cannot be cut short, so `stop_all`
/// has nothing to do.
pub struct Bell<W: Write> {
    out: W,
}

impl<W: Write> Bell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioSink for Bell<W> {
    fn play_one_shot(&mut self, _clip: Clip) {
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            log::warn!("bell failed: {}", e);
        }
    }

    fn stop_all(&mut self) {}
}

pub struct Mute;

impl AudioSink for Mute {
    fn play_one_shot(&mut self, _clip: Clip) {}
    fn stop_all(&mut self) {}
}
