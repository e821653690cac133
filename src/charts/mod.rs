//! Charts module - Chart rendering

#[cfg(feature = "gui")]
mod plotter;
mod renderer;

#[cfg(feature = "gui")]
pub use plotter::ChartPlotter;
pub use renderer::{ChartKind, RenderError, StaticChartRenderer, DEFAULT_CHART_SIZE};

/// Segment line colors, in `Segment::ALL` order.
pub const SEGMENT_PALETTE: [(u8, u8, u8); 4] = [
    (231, 76, 60),  // Red
    (46, 204, 113), // Green
    (155, 89, 182), // Purple
    (243, 156, 18), // Orange
];

/// Total sales area color.
pub const TOTAL_COLOR: (u8, u8, u8) = (52, 152, 219); // Blue

/// Market penetration bar color.
pub const PENETRATION_COLOR: (u8, u8, u8) = (26, 188, 156); // Teal

/// Color for the segment at `index`, wrapping around the palette.
pub fn segment_color(index: usize) -> (u8, u8, u8) {
    SEGMENT_PALETTE[index % SEGMENT_PALETTE.len()]
}
