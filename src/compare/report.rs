use std::path::PathBuf;

/// What happened to one side of a pair
#[derive(Debug, Clone)]
pub enum SideOutcome {
    /// Image written to the given path
    Rendered { path: PathBuf },

    /// Decode or render failed; no image was produced for this side
    Failed { reason: String },
}

impl SideOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Outcome of processing one matched pair
#[derive(Debug, Clone)]
pub struct PairOutcome {
    /// Join key: filename without extension
    pub stem: String,

    /// Outcome for the A-side file
    pub a: SideOutcome,

    /// Outcome for the B-side file
    pub b: SideOutcome,
}

impl PairOutcome {
    /// Both sides rendered successfully
    pub fn is_complete(&self) -> bool {
        self.a.is_rendered() && self.b.is_rendered()
    }
}

/// Result of a whole comparison run
///
/// Collected per-item outcomes replace console scraping: tests assert on
/// this report directly.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One outcome per common stem, in processing (sorted) order
    pub pairs: Vec<PairOutcome>,

    /// Output directory for A-side images, if the run got that far
    pub out_dir_a: Option<PathBuf>,

    /// Output directory for B-side images, if the run got that far
    pub out_dir_b: Option<PathBuf>,
}

impl BatchReport {
    /// Report for a run that stopped before any pairing happened
    pub fn empty() -> Self {
        Self::default()
    }

    /// No pairs were processed
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs where both sides rendered
    pub fn complete_pairs(&self) -> usize {
        self.pairs.iter().filter(|p| p.is_complete()).count()
    }

    /// Total images written across all pairs
    pub fn rendered_images(&self) -> usize {
        self.pairs
            .iter()
            .map(|p| p.a.is_rendered() as usize + p.b.is_rendered() as usize)
            .sum()
    }

    /// Total sides that failed to decode or render
    pub fn failed_sides(&self) -> usize {
        self.pairs.len() * 2 - self.rendered_images()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered() -> SideOutcome {
        SideOutcome::Rendered {
            path: PathBuf::from("wave_x.png"),
        }
    }

    fn failed() -> SideOutcome {
        SideOutcome::Failed {
            reason: "decode error".to_string(),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = BatchReport::empty();
        assert!(report.is_empty());
        assert_eq!(report.rendered_images(), 0);
        assert_eq!(report.failed_sides(), 0);
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport {
            pairs: vec![
                PairOutcome {
                    stem: "kick".to_string(),
                    a: rendered(),
                    b: rendered(),
                },
                PairOutcome {
                    stem: "snare".to_string(),
                    a: rendered(),
                    b: failed(),
                },
            ],
            out_dir_a: None,
            out_dir_b: None,
        };

        assert_eq!(report.complete_pairs(), 1);
        assert_eq!(report.rendered_images(), 3);
        assert_eq!(report.failed_sides(), 1);
    }
}
