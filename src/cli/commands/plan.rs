//! Plan command - show chunk ranges without cutting.

use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, SplitOverrides};
use crate::config::{Settings, SplitMode};
use crate::splitter::{PlanSource, VideoSplitter};
use anyhow::Result;
use std::path::Path;

/// Run the plan command.
pub async fn run_plan(
    input: &str,
    json: bool,
    overrides: &SplitOverrides,
    settings: Settings,
) -> Result<()> {
    let config = overrides.apply(&settings);
    let needs_detector = config.mode == SplitMode::Silence;

    if let Err(e) = preflight::check(Operation::Plan { needs_detector }, &settings.tools) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vidchunk doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let video_path = Path::new(input);
    if !video_path.is_file() {
        anyhow::bail!("Video file not found: {}", video_path.display());
    }

    let splitter = VideoSplitter::new(&settings, config)?;

    let spinner = Output::spinner("Planning chunk boundaries...");
    let plan = splitter.plan(video_path).await;
    spinner.finish_and_clear();
    let plan = plan?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    Output::header("Plan");
    Output::kv("Duration", &format!("{:.2}s", plan.duration));
    Output::kv("Boundaries", &plan.source.to_string());
    Output::kv("Chunks", &plan.ranges.len().to_string());
    println!();

    for (idx, range) in plan.ranges.iter().enumerate() {
        Output::range(idx + 1, range);
    }

    if !plan.decisions.is_empty() {
        Output::header("Boundary decisions");
        for decision in &plan.decisions {
            Output::decision(decision);
        }
    }

    if plan.source == PlanSource::FixedFallback {
        println!();
        Output::warning("Silence detection unavailable, using fixed boundaries.");
    }

    Ok(())
}
