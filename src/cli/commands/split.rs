//! Split command implementation.

use crate::chunking::ChunkMetadata;
use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, SplitOverrides};
use crate::config::{Settings, SplitMode};
use crate::splitter::{PlanSource, VideoSplitter};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// JSON manifest written next to a split.
#[derive(Debug, Serialize)]
struct SplitManifest<'a> {
    job_id: &'a str,
    source: &'a Path,
    created_at: DateTime<Utc>,
    mode: SplitMode,
    plan: PlanSource,
    chunks: &'a [ChunkMetadata],
}

/// Run the split command.
pub async fn run_split(
    input: &str,
    job_id: Option<String>,
    manifest: Option<String>,
    overrides: &SplitOverrides,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Split, &settings.tools) {
        Output::error(&format!("{}", e));
        Output::info("Run 'vidchunk doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let video_path = PathBuf::from(input);
    if !video_path.is_file() {
        anyhow::bail!("Video file not found: {}", video_path.display());
    }

    let config = overrides.apply(&settings);
    let mode = config.mode;
    let splitter = VideoSplitter::new(&settings, config)?;
    let job_id = job_id.unwrap_or_else(|| Uuid::new_v4().to_string());

    Output::info(&format!("Splitting: {}", video_path.display()));

    let spinner = Output::spinner("Planning chunk boundaries...");
    let plan = match splitter.plan(&video_path).await {
        Ok(plan) => plan,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e.into());
        }
    };
    spinner.finish_and_clear();

    if plan.source == PlanSource::FixedFallback {
        Output::warning("Silence detection unavailable, using fixed boundaries.");
    }

    let spinner = Output::spinner(&format!("Cutting {} chunk(s)...", plan.ranges.len()));
    let chunks = match splitter.execute_plan(&video_path, &job_id, &plan).await {
        Ok(chunks) => chunks,
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("{}", e));
            Output::info(&format!(
                "Partial output may remain; remove it with: vidchunk clean {}",
                job_id
            ));
            return Err(e.into());
        }
    };
    spinner.finish_and_clear();

    Output::header("Chunks");
    Output::kv("Job", &job_id);
    Output::kv("Boundaries", &plan.source.to_string());
    for chunk in &chunks {
        Output::chunk(chunk);
    }

    if let Some(manifest_path) = manifest {
        let manifest = SplitManifest {
            job_id: &job_id,
            source: &video_path,
            created_at: Utc::now(),
            mode,
            plan: plan.source,
            chunks: &chunks,
        };
        write_manifest(Path::new(&manifest_path), &manifest)?;
        Output::info(&format!("Manifest written to {}", manifest_path));
    }

    if chunks.iter().any(|c| c.is_original) {
        Output::success("Video fits in a single chunk; using the original file.");
    } else {
        Output::success(&format!("Created {} chunks", chunks.len()));
    }

    Ok(())
}

fn write_manifest(path: &Path, manifest: &SplitManifest<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_shape() {
        let chunks = vec![ChunkMetadata::original(PathBuf::from("/videos/a.mp4"), 42.0)];
        let manifest = SplitManifest {
            job_id: "job-1",
            source: Path::new("/videos/a.mp4"),
            created_at: Utc::now(),
            mode: SplitMode::Silence,
            plan: PlanSource::NoSplit,
            chunks: &chunks,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        write_manifest(&path, &manifest).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["job_id"], "job-1");
        assert_eq!(value["mode"], "silence");
        assert_eq!(value["plan"], "no_split");
        assert_eq!(value["chunks"][0]["is_original"], true);
        assert_eq!(value["chunks"][0]["total_chunks"], 1);
    }
}
