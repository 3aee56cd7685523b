//! Declarative plot grammar.
//!
//! A plot is a list of marks drawn over shared scales. Each mark draws one
//! glyph per datum of its data, with visual channels bound to columns of
//! that data, to columns taken from another dataset, or to literal values.
//!
//! # Components
//!
//! - **Channels**: Bindings from visual properties (x, y, stroke, fill) to data
//! - **Marks**: Glyphs drawn per datum (bars, dots, horizontal rules)
//! - **Options**: Axis labels, tick formats, gridlines and color schemes
//! - **Rendering**: Scale fitting and layout into SVG elements
//!
//! # Example
//!
//! ```rust
//! use tableplot::data::TabularDataset;
//! use tableplot::grammar::*;
//! use tableplot::scale::ColorScheme;
//!
//! let data = TabularDataset::builder()
//!     .column("Anomaly", [-0.2, 0.1, 0.6])
//!     .column("Year", [1900i64, 1950, 2000])
//!     .build()
//!     .unwrap();
//!
//! let plot = Plot::new()
//!     .mark(Mark::rule_y([0.0]))
//!     .mark(Mark::dot(&data, Channels::new().x("Year").y("Anomaly").stroke("Anomaly")))
//!     .y(AxisOptions::new().tick_format(TickFormat::parse("+f").unwrap()).grid(true))
//!     .color(ColorOptions::new().scheme(ColorScheme::BuRd))
//!     .plot()
//!     .unwrap();
//!
//! assert_eq!(plot.group("dot").map(<[_]>::len), Some(3));
//! ```
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.

mod channel;
mod mark;
mod options;
mod plot;
mod render;

pub use channel::{Channel, ChannelSource, Channels};
pub use mark::{Mark, MarkData, MarkKind, DEFAULT_DOT_RADIUS, DEFAULT_STROKE_WIDTH};
pub use options::{
    precision_fixed, AxisOptions, ColorOptions, FormatType, SignMode, TickFormat, MINUS,
};
pub use plot::{Plot, PlotSpec};
pub use render::RenderedPlot;
