use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use plotters::chart::ChartContext;
use plotters::coord::{CoordTranslate, Shift};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::warn;

use crate::audio::AudioBuffer;
use crate::config::{parse_hex_color, PlotConfig};
use crate::error::{ConfigError, RenderError, Result, WavecmpError};
use crate::plot::range::{AmplitudeRange, DEFAULT_EPSILON};

/// Number of evenly spaced ticks across the vertical range
const Y_TICK_COUNT: usize = 5;

/// Number of time ticks along the bottom axis
const X_TICK_COUNT: usize = 6;

const MARGIN_PX: u32 = 12;
const X_LABEL_AREA_PX: u32 = 26;
const Y_LABEL_AREA_PX: u32 = 54;

/// Renders a mono audio buffer as a styled waveform PNG
///
/// Styling is fixed per configuration: hidden top/right spines, light
/// horizontal grid at the tick positions, muted axis text, optional
/// transparent background.
pub struct WaveformRenderer {
    config: PlotConfig,
    wave: RGBColor,
    axis: RGBColor,
    spine: RGBColor,
    grid: RGBColor,
    background: RGBColor,
}

impl WaveformRenderer {
    /// Create a renderer, parsing the configured colors up front
    pub fn new(config: PlotConfig) -> Result<Self> {
        let wave = color_from_config("plot.wave_color", &config.wave_color)?;
        let axis = color_from_config("plot.axis_color", &config.axis_color)?;
        let spine = color_from_config("plot.spine_color", &config.spine_color)?;
        let grid = color_from_config("plot.grid_color", &config.grid_color)?;
        let background = color_from_config("plot.background_color", &config.background_color)?;

        Ok(Self {
            config,
            wave,
            axis,
            spine,
            grid,
            background,
        })
    }

    /// Render `audio` to `output`
    ///
    /// When `range` is supplied it becomes the vertical axis bounds so two
    /// renders of a pair share one scale; otherwise the plot auto-scales to
    /// the buffer's own peak with the configured headroom. Parent
    /// directories of `output` are created as needed.
    pub async fn render(
        &self,
        audio: &AudioBuffer,
        output: &Path,
        range: Option<AmplitudeRange>,
    ) -> Result<()> {
        let range = range.unwrap_or_else(|| {
            AmplitudeRange::around_peak(audio.peak(), DEFAULT_EPSILON, self.config.margin_factor)
        });

        let (width, height) = (self.config.width, self.config.height);
        let mut rgb = vec![0u8; width as usize * height as usize * 3];

        self.draw_chart(audio, range, &mut rgb, output)?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let image = self.to_rgba(&rgb, width, height);
        image.save(output).map_err(|e| RenderError::WriteFailed {
            path: output.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }

    fn draw_chart(
        &self,
        audio: &AudioBuffer,
        range: AmplitudeRange,
        buf: &mut [u8],
        output: &Path,
    ) -> Result<()> {
        let root = BitMapBackend::with_buffer(buf, (self.config.width, self.config.height))
            .into_drawing_area();
        root.fill(&self.background)
            .map_err(|e| chart_failed(output, e))?;

        let x_max = audio.duration().max(1e-3);
        let mut chart = ChartBuilder::on(&root)
            .margin(MARGIN_PX)
            .x_label_area_size(X_LABEL_AREA_PX)
            .y_label_area_size(Y_LABEL_AREA_PX)
            .build_cartesian_2d(0f64..x_max, range.min as f64..range.max as f64)
            .map_err(|e| chart_failed(output, e))?;

        let ticks = range.ticks(Y_TICK_COUNT);

        // Light horizontal grid at the tick positions
        let grid_style = ShapeStyle::from(&self.grid).stroke_width(1);
        for &tick in &ticks {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(0.0, tick as f64), (x_max, tick as f64)],
                    grid_style,
                )))
                .map_err(|e| chart_failed(output, e))?;
        }

        // Waveform as a min/max envelope, one column per horizontal pixel
        let columns = chart.plotting_area().dim_in_pixel().0 as usize;
        let wave_style = ShapeStyle::from(&self.wave).stroke_width(1);
        let env = envelope(&audio.samples, columns);
        chart
            .draw_series(env.iter().enumerate().map(|(i, &(lo, hi))| {
                let t = (i as f64 + 0.5) / columns as f64 * x_max;
                PathElement::new(vec![(t, lo as f64), (t, hi as f64)], wave_style)
            }))
            .map_err(|e| chart_failed(output, e))?;

        // Left and bottom spines only; top and right stay hidden
        let spine_style = ShapeStyle::from(&self.spine).stroke_width(1);
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, range.min as f64), (0.0, range.max as f64)],
                spine_style,
            )))
            .map_err(|e| chart_failed(output, e))?;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, range.min as f64), (x_max, range.min as f64)],
                spine_style,
            )))
            .map_err(|e| chart_failed(output, e))?;

        // Tick labels are cosmetic; a missing system font must not fail the render
        if let Err(e) = self.draw_tick_labels(&root, &chart, &ticks, range, x_max) {
            warn!("Skipping tick labels for {:?}: {}", output, e);
        }

        root.present().map_err(|e| chart_failed(output, e))?;
        Ok(())
    }

    fn draw_tick_labels<DB, CT>(
        &self,
        root: &DrawingArea<DB, Shift>,
        chart: &ChartContext<'_, DB, CT>,
        ticks: &[f32],
        range: AmplitudeRange,
        x_max: f64,
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>>
    where
        DB: DrawingBackend,
        CT: CoordTranslate<From = (f64, f64)>,
    {
        let y_style = ("sans-serif", 11)
            .into_font()
            .color(&self.axis)
            .pos(Pos::new(HPos::Right, VPos::Center));
        for &tick in ticks {
            let (px, py) = chart.plotting_area().map_coordinate(&(0.0, tick as f64));
            root.draw(&Text::new(
                format!("{:.2}", tick),
                (px - 6, py),
                y_style.clone(),
            ))?;
        }

        let x_style = ("sans-serif", 11)
            .into_font()
            .color(&self.axis)
            .pos(Pos::new(HPos::Center, VPos::Top));
        for i in 0..X_TICK_COUNT {
            let t = x_max * i as f64 / (X_TICK_COUNT - 1) as f64;
            let (px, py) = chart.plotting_area().map_coordinate(&(t, range.min as f64));
            root.draw(&Text::new(
                format_seconds(t, x_max),
                (px, py + 5),
                x_style.clone(),
            ))?;
        }

        Ok(())
    }

    /// Convert the RGB backend buffer to RGBA, keying out the background
    /// color when a transparent PNG was requested
    fn to_rgba(&self, rgb: &[u8], width: u32, height: u32) -> RgbaImage {
        let bg = self.background;
        let mut image = RgbaImage::new(width, height);

        for (i, px) in rgb.chunks_exact(3).enumerate() {
            let x = i as u32 % width;
            let y = i as u32 / width;
            let is_background = px[0] == bg.0 && px[1] == bg.1 && px[2] == bg.2;
            let alpha = if self.config.transparent && is_background {
                0
            } else {
                255
            };
            image.put_pixel(x, y, Rgba([px[0], px[1], px[2], alpha]));
        }

        image
    }
}

/// Per-column min/max envelope of the sample buffer
///
/// Each column covers an equal share of the samples; a column always sees at
/// least one sample, so short buffers repeat samples across columns.
fn envelope(samples: &[f32], columns: usize) -> Vec<(f32, f32)> {
    if samples.is_empty() || columns == 0 {
        return Vec::new();
    }

    let n = samples.len();
    (0..columns)
        .map(|column| {
            let start = column * n / columns;
            let end = ((column + 1) * n / columns).max(start + 1).min(n);

            let mut lo = f32::MAX;
            let mut hi = f32::MIN;
            for &sample in &samples[start..end] {
                lo = lo.min(sample);
                hi = hi.max(sample);
            }
            (lo, hi)
        })
        .collect()
}

fn format_seconds(t: f64, x_max: f64) -> String {
    if x_max < 10.0 {
        format!("{:.1}s", t)
    } else {
        format!("{:.0}s", t)
    }
}

fn color_from_config(key: &str, value: &str) -> Result<RGBColor> {
    let (r, g, b) = parse_hex_color(value).ok_or_else(|| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })?;
    Ok(RGBColor(r, g, b))
}

fn chart_failed(output: &Path, reason: impl std::fmt::Display) -> WavecmpError {
    RenderError::ChartFailed {
        path: output.display().to_string(),
        reason: reason.to_string(),
    }
    .into()
}
