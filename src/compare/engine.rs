use std::path::Path;

use tracing::{error, info, warn};

use crate::{
    audio::{AudioBuffer, AudioLoader},
    compare::report::{BatchReport, PairOutcome, SideOutcome},
    config::Config,
    error::Result,
    pairing::{build_name_map, collect_audio_files, common_stems},
    plot::{AmplitudeRange, WaveformRenderer, DEFAULT_EPSILON},
};

/// Pipeline orchestrator for the whole comparison run
///
/// The engine follows a linear pipeline:
/// 1. Collect - enumerate audio files under both source directories
/// 2. Pair - map stems to paths and intersect the two sides
/// 3. Scale - compute a shared amplitude range per pair
/// 4. Render - draw both sides of each pair with that range
///
/// Empty input on either side and an empty intersection are terminal
/// conditions, not errors. Per-pair failures are recorded and skipped.
pub struct ComparisonEngine {
    config: Config,
}

impl ComparisonEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the comparison: pair files under `dir_a` and `dir_b` and render
    /// waveform images under `image_root`
    ///
    /// Output layout is `<image_root>/<basename(dir)>/wave_<stem>.<ext>`,
    /// overwriting existing images. Returns a [`BatchReport`] with one
    /// outcome per pair.
    pub async fn compare<P: AsRef<Path>>(
        &self,
        dir_a: P,
        dir_b: P,
        image_root: P,
    ) -> Result<BatchReport> {
        let dir_a = dir_a.as_ref();
        let dir_b = dir_b.as_ref();
        let image_root = image_root.as_ref();

        info!("🔎 Pairing audio by filename stem");
        info!("   A: {:?}", dir_a);
        info!("   B: {:?}", dir_b);

        // Pipeline step 1: collect candidate files on both sides
        let files_a = collect_audio_files(dir_a, &self.config.scan.extensions);
        if files_a.is_empty() {
            warn!("⚠️ No audio files found in {:?}", dir_a);
            return Ok(BatchReport::empty());
        }

        let files_b = collect_audio_files(dir_b, &self.config.scan.extensions);
        if files_b.is_empty() {
            warn!("⚠️ No audio files found in {:?}", dir_b);
            return Ok(BatchReport::empty());
        }

        // Pipeline step 2: stem maps and their intersection
        let map_a = build_name_map(files_a);
        let map_b = build_name_map(files_b);

        let stems = common_stems(&map_a, &map_b);
        if stems.is_empty() {
            warn!("⚠️ No same-name audio pairs found between the two directories");
            return Ok(BatchReport::empty());
        }

        let out_dir_a = image_root.join(dir_tag(dir_a));
        let out_dir_b = image_root.join(dir_tag(dir_b));
        std::fs::create_dir_all(&out_dir_a)?;
        std::fs::create_dir_all(&out_dir_b)?;

        info!(
            "✅ Found {} pairs. Generating waveforms with shared scales...",
            stems.len()
        );

        // Pipeline steps 3 and 4: per-pair shared range and rendering
        let renderer = WaveformRenderer::new(self.config.plot.clone())?;
        let mut report = BatchReport {
            pairs: Vec::with_capacity(stems.len()),
            out_dir_a: Some(out_dir_a.clone()),
            out_dir_b: Some(out_dir_b.clone()),
        };

        let total = stems.len();
        for (index, stem) in stems.iter().enumerate() {
            info!("   [{}/{}] {}", index + 1, total, stem);
            let outcome = self
                .process_pair(&renderer, stem, &map_a[stem], &map_b[stem], &out_dir_a, &out_dir_b)
                .await;
            report.pairs.push(outcome);
        }

        info!(
            "🎉 All done: {} of {} pairs fully rendered",
            report.complete_pairs(),
            total
        );
        info!("   Images for A saved to: {:?}", out_dir_a);
        info!("   Images for B saved to: {:?}", out_dir_b);

        Ok(report)
    }

    /// Process one matched pair; failures are captured, never propagated
    async fn process_pair(
        &self,
        renderer: &WaveformRenderer,
        stem: &str,
        path_a: &Path,
        path_b: &Path,
        out_dir_a: &Path,
        out_dir_b: &Path,
    ) -> PairOutcome {
        let ext = &self.config.plot.image_ext;
        let image_a = out_dir_a.join(format!("wave_{}.{}", stem, ext));
        let image_b = out_dir_b.join(format!("wave_{}.{}", stem, ext));

        let loaded_a = AudioLoader::load(path_a).await;
        let loaded_b = AudioLoader::load(path_b).await;

        // A shared scale needs both buffers. When one side fails to decode,
        // the surviving side still renders, auto-scaled to its own peak.
        let shared = match (&loaded_a, &loaded_b) {
            (Ok(a), Ok(b)) => Some(AmplitudeRange::shared_with(
                Some(a),
                Some(b),
                DEFAULT_EPSILON,
                self.config.plot.margin_factor,
            )),
            _ => None,
        };

        let a = Self::render_side(renderer, stem, loaded_a, &image_a, shared).await;
        let b = Self::render_side(renderer, stem, loaded_b, &image_b, shared).await;

        PairOutcome {
            stem: stem.to_string(),
            a,
            b,
        }
    }

    async fn render_side(
        renderer: &WaveformRenderer,
        stem: &str,
        loaded: Result<AudioBuffer>,
        output: &Path,
        range: Option<AmplitudeRange>,
    ) -> SideOutcome {
        let buffer = match loaded {
            Ok(buffer) => buffer,
            Err(e) => {
                error!("❌ Decode failed for pair '{}': {}", stem, e);
                return SideOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match renderer.render(&buffer, output, range).await {
            Ok(()) => SideOutcome::Rendered {
                path: output.to_path_buf(),
            },
            Err(e) => {
                error!("❌ Render failed for {:?}: {}", output, e);
                SideOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Base name of a source directory, used as the output subdirectory name
fn dir_tag(dir: &Path) -> String {
    dir.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .unwrap_or_else(|| "audio".to_string())
}
