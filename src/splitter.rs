//! Split orchestrator for vidchunk.
//!
//! Coordinates duration probing, boundary planning and chunk extraction for
//! one video. Operations run strictly one after another; concurrent splits of
//! different videos are isolated by their job directories.

use crate::chunking::{
    fixed_ranges, plan_silence_aware, AdjustedPlan, BoundaryDecision, ChunkMetadata, ChunkRange,
};
use crate::config::{Settings, SplitConfig, SplitMode};
use crate::error::{Result, VidchunkError};
use crate::media::{CutRange, DetectSilence, FfmpegTools, ProbeDuration};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Where the final ranges of a plan came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    /// Video fits in one chunk.
    NoSplit,
    /// Fixed ranges, as configured.
    Fixed,
    /// Silence-adjusted ranges.
    Silence,
    /// Silence-aware mode was configured but fell back to fixed ranges.
    FixedFallback,
}

impl std::fmt::Display for PlanSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanSource::NoSplit => write!(f, "no split"),
            PlanSource::Fixed => write!(f, "fixed"),
            PlanSource::Silence => write!(f, "silence"),
            PlanSource::FixedFallback => write!(f, "fixed (silence fallback)"),
        }
    }
}

/// Result of the silence-aware attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SilenceOutcome {
    Adjusted(AdjustedPlan),
    /// Detection failed or produced nothing usable; keep fixed ranges.
    Fallback { reason: String },
}

/// Ranges chosen for one video, before any file is written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitPlan {
    pub duration: f64,
    pub source: PlanSource,
    pub ranges: Vec<ChunkRange>,
    /// Empty unless `source` is [`PlanSource::Silence`].
    pub decisions: Vec<BoundaryDecision>,
}

impl SplitPlan {
    /// True when the source file can be used as-is.
    pub fn is_single_chunk(&self) -> bool {
        self.ranges.len() <= 1
    }
}

/// Splits videos into chunk files under a per-job directory.
pub struct VideoSplitter {
    config: SplitConfig,
    temp_dir: PathBuf,
    prober: Arc<dyn ProbeDuration>,
    detector: Arc<dyn DetectSilence>,
    cutter: Arc<dyn CutRange>,
}

impl VideoSplitter {
    /// Create a splitter backed by ffprobe/ffmpeg.
    pub fn new(settings: &Settings, config: SplitConfig) -> Result<Self> {
        let tools = Arc::new(FfmpegTools::new(&settings.tools));
        Self::with_components(config, settings.temp_dir(), tools.clone(), tools.clone(), tools)
    }

    /// Create a splitter with custom media tools.
    pub fn with_components(
        config: SplitConfig,
        temp_dir: PathBuf,
        prober: Arc<dyn ProbeDuration>,
        detector: Arc<dyn DetectSilence>,
        cutter: Arc<dyn CutRange>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            temp_dir,
            prober,
            detector,
            cutter,
        })
    }

    /// Directory that holds the chunk files of `job_id`.
    pub fn job_dir(&self, job_id: &str) -> Result<PathBuf> {
        let valid = !job_id.is_empty()
            && job_id != "."
            && job_id != ".."
            && !job_id.contains(['/', '\\']);
        if !valid {
            return Err(VidchunkError::InvalidInput(format!("Invalid job id: {:?}", job_id)));
        }
        Ok(self.temp_dir.join(job_id))
    }

    /// Probe a video and decide its chunk ranges without cutting anything.
    #[instrument(skip(self, video_path), fields(video = %video_path.display()))]
    pub async fn plan(&self, video_path: &Path) -> Result<SplitPlan> {
        let duration = self.prober.probe_duration(video_path).await?;
        Ok(self.plan_for_duration(video_path, duration).await)
    }

    async fn plan_for_duration(&self, video_path: &Path, duration: f64) -> SplitPlan {
        let fixed = fixed_ranges(duration, self.config.chunk_seconds);

        // Nothing to cut, so skip the detector pass entirely.
        if fixed.len() <= 1 {
            return SplitPlan {
                duration,
                source: PlanSource::NoSplit,
                ranges: fixed,
                decisions: Vec::new(),
            };
        }

        match self.config.mode {
            SplitMode::Fixed => SplitPlan {
                duration,
                source: PlanSource::Fixed,
                ranges: fixed,
                decisions: Vec::new(),
            },
            SplitMode::Silence => match self.attempt_silence(video_path, duration, &fixed).await {
                SilenceOutcome::Adjusted(plan) => SplitPlan {
                    duration,
                    source: PlanSource::Silence,
                    ranges: plan.ranges,
                    decisions: plan.decisions,
                },
                SilenceOutcome::Fallback { reason } => {
                    warn!("Silence-aware split failed, using fixed chunks: {}", reason);
                    SplitPlan {
                        duration,
                        source: PlanSource::FixedFallback,
                        ranges: fixed,
                        decisions: Vec::new(),
                    }
                }
            },
        }
    }

    /// Detect silence and adjust the fixed boundaries toward it.
    pub async fn attempt_silence(
        &self,
        video_path: &Path,
        duration: f64,
        fixed: &[ChunkRange],
    ) -> SilenceOutcome {
        let intervals = match self
            .detector
            .detect_silence(
                video_path,
                self.config.silence_noise_db,
                self.config.silence_min_duration_seconds,
                duration,
            )
            .await
        {
            Ok(intervals) => intervals,
            Err(e) => return SilenceOutcome::Fallback { reason: e.to_string() },
        };

        debug!("Using {} silence intervals", intervals.len());

        match plan_silence_aware(duration, fixed, &intervals, &self.config) {
            Some(plan) => SilenceOutcome::Adjusted(plan),
            None => SilenceOutcome::Fallback {
                reason: "adjusted boundaries left no usable chunk".to_string(),
            },
        }
    }

    /// Split a video into chunk files under the job directory.
    ///
    /// Chunk files are left in place; remove them with [`Self::cleanup_job`]
    /// once the job is finished or has failed.
    #[instrument(skip(self, video_path), fields(video = %video_path.display()))]
    pub async fn split_video(&self, video_path: &Path, job_id: &str) -> Result<Vec<ChunkMetadata>> {
        let plan = self.plan(video_path).await?;
        self.execute_plan(video_path, job_id, &plan).await
    }

    /// Cut every range of `plan`, in order. The first failure aborts the split.
    pub async fn execute_plan(
        &self,
        video_path: &Path,
        job_id: &str,
        plan: &SplitPlan,
    ) -> Result<Vec<ChunkMetadata>> {
        if plan.is_single_chunk() {
            info!("Video is {:.1}s, no split needed", plan.duration);
            return Ok(vec![ChunkMetadata::original(
                video_path.to_path_buf(),
                plan.duration,
            )]);
        }

        let job_dir = self.job_dir(job_id)?;
        std::fs::create_dir_all(&job_dir)?;

        let video_name = video_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("video");
        let total = plan.ranges.len();
        let mut chunks = Vec::with_capacity(total);

        for (idx, range) in plan.ranges.iter().enumerate() {
            let chunk_path = job_dir.join(format!("{}_chunk_{:03}.mp4", video_name, idx + 1));

            self.cutter
                .cut_range(video_path, &chunk_path, range.start, range.duration())
                .await
                .map_err(|e| VidchunkError::ChunkExtraction {
                    chunk: idx + 1,
                    message: e.to_string(),
                })?;

            debug!(
                "Created chunk {}/{} ({:.1}s - {:.1}s)",
                idx + 1,
                total,
                range.start,
                range.end
            );
            chunks.push(ChunkMetadata::from_range(chunk_path, idx, total, range));
        }

        info!("Created {} chunks ({})", total, plan.source);
        Ok(chunks)
    }

    /// Delete the job directory and every chunk in it.
    ///
    /// Returns `false` if there was nothing to delete.
    pub fn cleanup_job(&self, job_id: &str) -> Result<bool> {
        let job_dir = self.job_dir(job_id)?;
        if !job_dir.exists() {
            return Ok(false);
        }
        std::fs::remove_dir_all(&job_dir)?;
        debug!("Removed {:?}", job_dir);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::BoundaryReason;
    use crate::silence::SilenceInterval;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted media tools.
    struct FakeTools {
        duration: Option<f64>,
        silence: Option<Vec<SilenceInterval>>,
        fail_cut_at: Option<usize>,
        cuts: Mutex<Vec<(PathBuf, f64, f64)>>,
        detector_calls: AtomicUsize,
    }

    impl FakeTools {
        fn new(duration: f64) -> Self {
            Self {
                duration: Some(duration),
                silence: Some(Vec::new()),
                fail_cut_at: None,
                cuts: Mutex::new(Vec::new()),
                detector_calls: AtomicUsize::new(0),
            }
        }

        fn with_silence(mut self, silence: Vec<SilenceInterval>) -> Self {
            self.silence = Some(silence);
            self
        }

        fn without_silence_detection(mut self) -> Self {
            self.silence = None;
            self
        }

        fn cuts(&self) -> Vec<(PathBuf, f64, f64)> {
            self.cuts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProbeDuration for FakeTools {
        async fn probe_duration(&self, _path: &Path) -> Result<f64> {
            self.duration
                .ok_or_else(|| VidchunkError::DurationProbe("no format section".into()))
        }
    }

    #[async_trait]
    impl DetectSilence for FakeTools {
        async fn detect_silence(
            &self,
            _path: &Path,
            _noise_db: f64,
            _min_duration: f64,
            _media_duration: f64,
        ) -> Result<Vec<SilenceInterval>> {
            self.detector_calls.fetch_add(1, Ordering::SeqCst);
            self.silence
                .clone()
                .ok_or_else(|| VidchunkError::SilenceDetection("detector crashed".into()))
        }
    }

    #[async_trait]
    impl CutRange for FakeTools {
        async fn cut_range(
            &self,
            _source: &Path,
            dest: &Path,
            start: f64,
            length: f64,
        ) -> Result<()> {
            let mut cuts = self.cuts.lock().unwrap();
            if self.fail_cut_at == Some(cuts.len() + 1) {
                return Err(VidchunkError::ToolFailed("invalid data".into()));
            }
            cuts.push((dest.to_path_buf(), start, length));
            Ok(())
        }
    }

    fn config(mode: SplitMode) -> SplitConfig {
        SplitConfig {
            chunk_seconds: 600.0,
            mode,
            min_chunk_seconds: 30.0,
            search_window_seconds: 30.0,
            ..SplitConfig::default()
        }
    }

    fn splitter(tools: &Arc<FakeTools>, config: SplitConfig, temp_dir: &Path) -> VideoSplitter {
        VideoSplitter::with_components(
            config,
            temp_dir.to_path_buf(),
            tools.clone(),
            tools.clone(),
            tools.clone(),
        )
        .unwrap()
    }

    fn spans(chunks: &[ChunkMetadata]) -> Vec<(f64, f64)> {
        chunks.iter().map(|c| (c.start_time, c.end_time)).collect()
    }

    #[tokio::test]
    async fn test_short_video_is_not_split() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(FakeTools::new(300.0));
        let splitter = splitter(&tools, config(SplitMode::Silence), dir.path());

        let chunks = splitter.split_video(Path::new("/videos/talk.mp4"), "job1").await.unwrap();

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_original);
        assert_eq!(chunks[0].path, PathBuf::from("/videos/talk.mp4"));
        assert_eq!(spans(&chunks), vec![(0.0, 300.0)]);
        assert!(tools.cuts().is_empty());
        assert!(!dir.path().join("job1").exists());
    }

    #[tokio::test]
    async fn test_even_fixed_split() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(FakeTools::new(1200.0));
        let splitter = splitter(&tools, config(SplitMode::Fixed), dir.path());

        let chunks = splitter.split_video(Path::new("/videos/talk.mp4"), "job1").await.unwrap();

        assert_eq!(spans(&chunks), vec![(0.0, 600.0), (600.0, 1200.0)]);
        assert_eq!(chunks[0].path, dir.path().join("job1").join("talk_chunk_001.mp4"));
        assert_eq!(chunks[1].path, dir.path().join("job1").join("talk_chunk_002.mp4"));
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_number, i + 1);
            assert_eq!(chunk.total_chunks, 2);
            assert_eq!(chunk.duration, 600.0);
            assert!(!chunk.is_original);
        }

        let cuts = tools.cuts();
        assert_eq!(cuts.len(), 2);
        assert_eq!((cuts[1].1, cuts[1].2), (600.0, 600.0));
    }

    #[tokio::test]
    async fn test_silence_nudge() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(
            FakeTools::new(1200.0).with_silence(vec![SilenceInterval::new(580.0, 620.0)]),
        );
        let splitter = splitter(&tools, config(SplitMode::Silence), dir.path());

        let plan = splitter.plan(Path::new("talk.mp4")).await.unwrap();
        assert_eq!(plan.source, PlanSource::Silence);
        assert_eq!(plan.decisions.len(), 1);
        assert_eq!(plan.decisions[0].reason, BoundaryReason::Silence);
        assert_eq!(plan.decisions[0].boundary, 600.0);

        let chunks = splitter.execute_plan(Path::new("talk.mp4"), "job1", &plan).await.unwrap();
        assert_eq!(spans(&chunks), vec![(0.0, 600.0), (600.0, 1200.0)]);
    }

    #[tokio::test]
    async fn test_silence_shifts_cut_points() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(
            FakeTools::new(1500.0).with_silence(vec![
                SilenceInterval::new(585.0, 589.0),
                SilenceInterval::new(1210.0, 1216.0),
            ]),
        );
        let splitter = splitter(&tools, config(SplitMode::Silence), dir.path());

        let chunks = splitter.split_video(Path::new("talk.mp4"), "job1").await.unwrap();

        assert_eq!(
            spans(&chunks),
            vec![(0.0, 587.0), (587.0, 1213.0), (1213.0, 1500.0)]
        );
        assert_eq!(tools.cuts()[1].1, 587.0);
        assert_eq!(tools.cuts()[1].2, 626.0);
    }

    #[tokio::test]
    async fn test_no_silence_in_window_keeps_target() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(
            FakeTools::new(1200.0).with_silence(vec![SilenceInterval::new(100.0, 140.0)]),
        );
        let splitter = splitter(&tools, config(SplitMode::Silence), dir.path());

        let plan = splitter.plan(Path::new("talk.mp4")).await.unwrap();
        assert_eq!(plan.decisions[0].reason, BoundaryReason::FixedFallback);
        assert_eq!(plan.decisions[0].boundary, 600.0);
    }

    #[tokio::test]
    async fn test_tiny_trailing_remainder_is_suppressed() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(FakeTools::new(600.3));

        for mode in [SplitMode::Fixed, SplitMode::Silence] {
            let splitter = splitter(&tools, config(mode), dir.path());
            let plan = splitter.plan(Path::new("talk.mp4")).await.unwrap();
            assert_eq!(plan.source, PlanSource::NoSplit);

            let chunks = splitter.execute_plan(Path::new("talk.mp4"), "job1", &plan).await.unwrap();
            assert_eq!(spans(&chunks), vec![(0.0, 600.3)]);
            assert!(chunks[0].is_original);
        }
        assert!(tools.cuts().is_empty());
        assert_eq!(tools.detector_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_single_range_skips_detector_even_when_it_would_fail() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(FakeTools::new(600.3).without_silence_detection());
        let splitter = splitter(&tools, config(SplitMode::Silence), dir.path());

        let plan = splitter.plan(Path::new("talk.mp4")).await.unwrap();

        assert_eq!(plan.source, PlanSource::NoSplit);
        assert_eq!(plan.ranges, vec![ChunkRange::new(0.0, 600.3)]);
        assert_eq!(tools.detector_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_detector_failure_degrades_to_fixed() {
        for duration in [600.3, 601.0, 1200.0, 1200.3, 1799.5, 3600.0, 7265.25] {
            let dir = tempfile::tempdir().unwrap();
            let tools = Arc::new(FakeTools::new(duration).without_silence_detection());
            let splitter = splitter(&tools, config(SplitMode::Silence), dir.path());

            let plan = tokio_test::block_on(splitter.plan(Path::new("talk.mp4"))).unwrap();
            let fixed = fixed_ranges(duration, 600.0);

            assert_eq!(plan.ranges, fixed, "duration {duration}");
            assert!(plan.decisions.is_empty());
            if fixed.len() > 1 {
                assert_eq!(plan.source, PlanSource::FixedFallback);
            } else {
                assert_eq!(plan.source, PlanSource::NoSplit);
            }
        }
    }

    #[tokio::test]
    async fn test_probe_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut tools = FakeTools::new(0.0);
        tools.duration = None;
        let tools = Arc::new(tools);
        let splitter = splitter(&tools, config(SplitMode::Silence), dir.path());

        let err = splitter.split_video(Path::new("talk.mp4"), "job1").await.unwrap_err();
        assert!(matches!(err, VidchunkError::DurationProbe(_)));
    }

    #[tokio::test]
    async fn test_cut_failure_aborts_split() {
        let dir = tempfile::tempdir().unwrap();
        let mut tools = FakeTools::new(1800.0);
        tools.fail_cut_at = Some(2);
        let tools = Arc::new(tools);
        let splitter = splitter(&tools, config(SplitMode::Fixed), dir.path());

        let err = splitter.split_video(Path::new("talk.mp4"), "job1").await.unwrap_err();

        assert!(matches!(err, VidchunkError::ChunkExtraction { chunk: 2, .. }));
        assert_eq!(tools.cuts().len(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_job() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(FakeTools::new(1200.0));
        let splitter = splitter(&tools, config(SplitMode::Fixed), dir.path());

        splitter.split_video(Path::new("talk.mp4"), "job1").await.unwrap();
        let job_dir = dir.path().join("job1");
        assert!(job_dir.exists());

        assert!(splitter.cleanup_job("job1").unwrap());
        assert!(!job_dir.exists());
        assert!(!splitter.cleanup_job("job1").unwrap());
    }

    #[test]
    fn test_job_id_validation() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(FakeTools::new(1200.0));
        let splitter = splitter(&tools, config(SplitMode::Fixed), dir.path());

        assert!(splitter.job_dir("3f2a-job").is_ok());
        for bad in ["", ".", "..", "a/b", "..\\x"] {
            assert!(splitter.job_dir(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(FakeTools::new(1200.0));
        let mut bad = config(SplitMode::Fixed);
        bad.chunk_seconds = -1.0;

        let result = VideoSplitter::with_components(
            bad,
            dir.path().to_path_buf(),
            tools.clone(),
            tools.clone(),
            tools,
        );
        assert!(matches!(result, Err(VidchunkError::Config(_))));
    }

    #[test]
    fn test_repeated_plans_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let tools = Arc::new(FakeTools::new(3000.0).with_silence(vec![
            SilenceInterval::new(590.0, 594.0),
            SilenceInterval::new(606.0, 610.0),
            SilenceInterval::new(1790.0, 1830.0),
        ]));
        let splitter = splitter(&tools, config(SplitMode::Silence), dir.path());

        let first = tokio_test::block_on(splitter.plan(Path::new("talk.mp4"))).unwrap();
        for _ in 0..5 {
            let again = tokio_test::block_on(splitter.plan(Path::new("talk.mp4"))).unwrap();
            assert_eq!(again, first);
        }
        assert_eq!(first.decisions[0].boundary, 592.0);
    }
}
