//! Static Chart Renderer
//! Renders the three dashboard charts to SVG with plotters.
//!
//! Charts:
//! 1. Segment-wise sales: one line per vehicle segment
//! 2. Total sales: filled area under the yearly total
//! 3. Market penetration: one bar per year

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use rayon::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::data::DataProcessor;
use crate::metrics::format_thousands;
use crate::report::DashboardReport;

use super::{segment_color, PENETRATION_COLOR, TOTAL_COLOR};

/// Default output size in pixels (width, height).
pub const DEFAULT_CHART_SIZE: (u32, u32) = (1000, 600);

type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type DrawResult = Result<(), DrawingAreaErrorKind<std::io::Error>>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No data to plot for {0:?}")]
    EmptySeries(ChartKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SegmentSales,
    TotalSales,
    Penetration,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::SegmentSales,
        ChartKind::TotalSales,
        ChartKind::Penetration,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::SegmentSales => "segment_sales.svg",
            ChartKind::TotalSales => "total_sales.svg",
            ChartKind::Penetration => "market_penetration.svg",
        }
    }

    pub fn title(self, report: &DashboardReport) -> String {
        match self {
            ChartKind::SegmentSales => {
                format!("EV Segment-wise Sales ({})", report.year_range())
            }
            ChartKind::TotalSales => format!("Total EV Sales in India ({})", report.year_range()),
            ChartKind::Penetration => "EV Market Penetration % Over the Years".to_string(),
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            ChartKind::SegmentSales => "Sales",
            ChartKind::TotalSales => "Total Sales",
            ChartKind::Penetration => "Market Share (%)",
        }
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart as an SVG document.
    pub fn render_svg(
        report: &DashboardReport,
        kind: ChartKind,
        size: (u32, u32),
    ) -> Result<String, RenderError> {
        Self::check_data(report, kind)?;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
            match kind {
                ChartKind::SegmentSales => Self::draw_segment_sales(&root, report),
                ChartKind::TotalSales => Self::draw_total_sales(&root, report),
                ChartKind::Penetration => Self::draw_penetration(&root, report),
            }
            .map_err(|e| RenderError::Draw(e.to_string()))?;
            root.present()
                .map_err(|e| RenderError::Draw(e.to_string()))?;
        }
        debug!(?kind, bytes = svg.len(), "rendered chart");
        Ok(svg)
    }

    fn check_data(report: &DashboardReport, kind: ChartKind) -> Result<(), RenderError> {
        let empty = match kind {
            ChartKind::SegmentSales => report.segment_sales.is_empty(),
            ChartKind::TotalSales => report.total_sales.is_empty(),
            ChartKind::Penetration => report.penetration.is_empty(),
        };
        if empty {
            Err(RenderError::EmptySeries(kind))
        } else {
            Ok(())
        }
    }

    /// Render all charts in parallel and write them into `dir`.
    pub fn export_all(
        report: &DashboardReport,
        dir: &Path,
        size: (u32, u32),
    ) -> Result<Vec<PathBuf>, RenderError> {
        fs::create_dir_all(dir).map_err(|source| RenderError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let written = ChartKind::ALL
            .par_iter()
            .map(|&kind| {
                let svg = Self::render_svg(report, kind, size)?;
                let path = dir.join(kind.file_name());
                fs::write(&path, svg).map_err(|source| RenderError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(path)
            })
            .collect::<Result<Vec<PathBuf>, RenderError>>()?;

        info!(dir = %dir.display(), charts = written.len(), "exported charts");
        Ok(written)
    }

    fn year_axis(report: &DashboardReport) -> Range<f64> {
        report.first_year as f64 - 0.5..report.last_year as f64 + 0.5
    }

    /// Upper y bound with headroom; never collapses to an empty range.
    fn y_ceiling(max: f64) -> f64 {
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }

    fn draw_segment_sales(root: &SvgArea<'_>, report: &DashboardReport) -> DrawResult {
        let series = DataProcessor::series_by_segment(&report.segment_sales);
        let max = series
            .values()
            .flatten()
            .map(|&(_, value)| value as f64)
            .fold(0.0, f64::max);

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::SegmentSales.title(report), ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(90)
            .build_cartesian_2d(Self::year_axis(report), 0f64..Self::y_ceiling(max))?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(ChartKind::SegmentSales.y_label())
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format_thousands(y.round() as i64))
            .draw()?;

        for (segment, points) in &series {
            let (r, g, b) = segment_color(*segment as usize);
            let color = RGBColor(r, g, b);
            chart
                .draw_series(LineSeries::new(
                    points
                        .iter()
                        .map(|&(year, value)| (year as f64, value as f64)),
                    color.stroke_width(2),
                ))?
                .label(segment.column_name())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
        Ok(())
    }

    fn draw_total_sales(root: &SvgArea<'_>, report: &DashboardReport) -> DrawResult {
        let max = report
            .total_sales
            .iter()
            .map(|&(_, total)| total as f64)
            .fold(0.0, f64::max);
        let (r, g, b) = TOTAL_COLOR;
        let color = RGBColor(r, g, b);

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::TotalSales.title(report), ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(90)
            .build_cartesian_2d(Self::year_axis(report), 0f64..Self::y_ceiling(max))?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc(ChartKind::TotalSales.y_label())
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format_thousands(y.round() as i64))
            .draw()?;

        chart.draw_series(
            AreaSeries::new(
                report
                    .total_sales
                    .iter()
                    .map(|&(year, total)| (year as f64, total as f64)),
                0.0,
                color.mix(0.3),
            )
            .border_style(color.stroke_width(2)),
        )?;
        Ok(())
    }

    fn draw_penetration(root: &SvgArea<'_>, report: &DashboardReport) -> DrawResult {
        let max = report
            .penetration
            .iter()
            .map(|&(_, share)| share)
            .fold(0.0, f64::max);
        let (r, g, b) = PENETRATION_COLOR;
        let color = RGBColor(r, g, b);

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .caption(ChartKind::Penetration.title(report), ("sans-serif", 24))
            .margin(16)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(Self::year_axis(report), 0f64..Self::y_ceiling(max))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Year")
            .y_desc(ChartKind::Penetration.y_label())
            .x_label_formatter(&|x| format!("{:.0}", x))
            .draw()?;

        chart.draw_series(report.penetration.iter().map(|&(year, share)| {
            let x = year as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, share)], color.filled())
        }))?;
        Ok(())
    }
}
