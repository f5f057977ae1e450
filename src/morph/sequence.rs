//! Time schedules, frame sinks and the sequence driver.

use super::Morpher;
use crate::image::Image;
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{MorphError, MorphResult};
#[cfg(feature = "image-io")]
use std::path::{Path, PathBuf};

/// Evenly spaced time samples `0, step, 2*step, ...` up to and including 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSchedule {
    step: f64,
}

impl FrameSchedule {
    /// Default spacing between frames.
    pub const DEFAULT_STEP: f64 = 0.05;

    /// Creates a schedule; `step` must be finite and in `(0, 1]`, and the
    /// resulting frame count must fit in `usize`.
    pub fn new(step: f64) -> MorphResult<Self> {
        if !step.is_finite() || step <= 0.0 || step > 1.0 {
            return Err(MorphError::InvalidInput("frame step must be in (0, 1]"));
        }
        if 1.0 / step >= usize::MAX as f64 {
            return Err(MorphError::InvalidInput("frame step is too small to count frames"));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of frames in the schedule.
    pub fn len(&self) -> usize {
        // Tolerance keeps steps like 0.05 from losing the t = 1 frame.
        ((1.0 / self.step + 1e-9).floor() as usize).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates over the time samples; none exceeds 1.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| (i as f64 * self.step).min(1.0))
    }
}

impl Default for FrameSchedule {
    fn default() -> Self {
        Self {
            step: Self::DEFAULT_STEP,
        }
    }
}

/// Destination for rendered frames.
pub trait FrameSink {
    /// Stores frame number `index` (1-based) rendered at time `t`.
    fn write_frame(&mut self, index: usize, t: f64, frame: &Image) -> MorphResult<()>;
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<(usize, f64, Image)>,
}

impl FrameSink for MemorySink {
    fn write_frame(&mut self, index: usize, t: f64, frame: &Image) -> MorphResult<()> {
        self.frames.push((index, t, frame.clone()));
        Ok(())
    }
}

/// Writes frames as `{prefix}{index:03}.png` into a directory.
#[cfg(feature = "image-io")]
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    prefix: String,
}

#[cfg(feature = "image-io")]
impl DirectorySink {
    /// Default file name prefix.
    pub const DEFAULT_PREFIX: &'static str = "frame_";

    /// Prepares `dir` for output. With `clean`, an existing directory and its
    /// contents are removed first so the run starts from an empty folder.
    pub fn create<P: AsRef<Path>>(dir: P, clean: bool) -> MorphResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        let io_err = |err: std::io::Error| MorphError::ImageIo {
            path: dir.clone(),
            reason: err.to_string(),
        };
        if clean && dir.exists() {
            std::fs::remove_dir_all(&dir).map_err(io_err)?;
        }
        std::fs::create_dir_all(&dir).map_err(io_err)?;
        Ok(Self {
            dir,
            prefix: Self::DEFAULT_PREFIX.to_string(),
        })
    }

    /// Overrides the file name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path that frame `index` is written to.
    pub fn path_for(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}{index:03}.png", self.prefix))
    }
}

#[cfg(feature = "image-io")]
impl FrameSink for DirectorySink {
    fn write_frame(&mut self, index: usize, _t: f64, frame: &Image) -> MorphResult<()> {
        crate::image::io::save_image(frame, self.path_for(index))
    }
}

/// Time stamp of a frame that was rendered and stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStamp {
    pub index: usize,
    pub t: f64,
}

/// A frame that could not be rendered or stored.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameFailure {
    pub index: usize,
    pub t: f64,
    pub error: MorphError,
}

/// Outcome of a sequence run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SequenceReport {
    pub completed: Vec<FrameStamp>,
    pub failures: Vec<FrameFailure>,
}

impl SequenceReport {
    /// Returns `true` when no frame failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.completed.len() + self.failures.len()
    }
}

impl Morpher {
    /// Renders every frame of `schedule` into `sink`.
    ///
    /// A frame that fails to render or store is recorded in the report and
    /// the run continues with the next time sample.
    pub fn run_sequence<S: FrameSink + ?Sized>(
        &self,
        schedule: &FrameSchedule,
        sink: &mut S,
    ) -> SequenceReport {
        let _span = trace_span!("sequence", frames = schedule.len()).entered();
        let mut report = SequenceReport::default();
        for (i, t) in schedule.times().enumerate() {
            let index = i + 1;
            let result = self
                .frame(t)
                .and_then(|frame| sink.write_frame(index, t, &frame));
            match result {
                Ok(()) => {
                    trace_event!("frame_written", index = index, t = t);
                    report.completed.push(FrameStamp { index, t });
                }
                Err(error) => {
                    let reason = error.to_string();
                    trace_warn!("frame_failed", index = index, t = t, error = reason.as_str());
                    report.failures.push(FrameFailure { index, t, error });
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameSchedule, FrameSink, MemorySink};
    use crate::correspondence::Correspondences;
    use crate::geometry::LineSegment;
    use crate::image::Image;
    use crate::morph::Morpher;
    use crate::util::{MorphError, MorphResult};

    #[test]
    fn default_schedule_has_21_frames_ending_at_one() {
        let schedule = FrameSchedule::default();
        let times: Vec<f64> = schedule.times().collect();
        assert_eq!(times.len(), 21);
        assert_eq!(times[0], 0.0);
        assert_eq!(*times.last().unwrap(), 1.0);
        assert!(times.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn coarse_schedule_stops_before_one() {
        let schedule = FrameSchedule::new(0.3).unwrap();
        let times: Vec<f64> = schedule.times().collect();
        assert_eq!(times.len(), 4);
        assert!(times.iter().all(|&t| t <= 1.0));
        assert_eq!(FrameSchedule::new(1.0).unwrap().len(), 2);
    }

    #[test]
    fn schedule_rejects_bad_steps() {
        for step in [0.0, -0.1, 1.5, f64::NAN] {
            assert!(FrameSchedule::new(step).is_err());
        }
    }

    #[test]
    fn schedule_rejects_steps_too_small_to_count() {
        for step in [1e-300, f64::MIN_POSITIVE, 1e-20] {
            assert_eq!(
                FrameSchedule::new(step),
                Err(MorphError::InvalidInput(
                    "frame step is too small to count frames"
                ))
            );
        }
        let fine = FrameSchedule::new(1.0 / 1_048_576.0).unwrap();
        assert_eq!(fine.len(), 1_048_577);
        assert_eq!(fine.times().last(), Some(1.0));
    }

    struct FailingSink {
        fail_on: usize,
        written: Vec<usize>,
    }

    impl FrameSink for FailingSink {
        fn write_frame(&mut self, index: usize, _t: f64, _frame: &Image) -> MorphResult<()> {
            if index == self.fail_on {
                return Err(MorphError::InvalidInput("disk full"));
            }
            self.written.push(index);
            Ok(())
        }
    }

    fn identity_morpher() -> Morpher {
        let a = Image::from_fn(4, 4, 1, |r, c, _| (r * 10 + c) as u8).unwrap();
        let b = Image::from_fn(4, 4, 1, |r, c, _| (200 - r * 10 - c) as u8).unwrap();
        let seg = LineSegment::from_coords(0.0, 0.0, 2.0, 0.0);
        Morpher::new(a, b, Correspondences::from_pairs([(seg, seg)])).unwrap()
    }

    #[test]
    fn sequence_collects_all_frames() {
        let morpher = identity_morpher();
        let mut sink = MemorySink::default();
        let report = morpher.run_sequence(&FrameSchedule::new(0.25).unwrap(), &mut sink);
        assert!(report.is_complete());
        assert_eq!(report.total(), 5);
        let indices: Vec<usize> = sink.frames.iter().map(|(i, _, _)| *i).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sequence_continues_after_failed_frame() {
        let morpher = identity_morpher();
        let mut sink = FailingSink {
            fail_on: 2,
            written: Vec::new(),
        };
        let report = morpher.run_sequence(&FrameSchedule::new(0.5).unwrap(), &mut sink);
        assert_eq!(sink.written, vec![1, 3]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 2);
        assert_eq!(report.failures[0].t, 0.5);
        assert_eq!(report.failures[0].error, MorphError::InvalidInput("disk full"));
    }
}
