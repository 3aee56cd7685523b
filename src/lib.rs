//! # tableplot
//!
//! Columnar tables to declarative plots.
//!
//! Datasets are Arrow record batches built from literal columns or loaded
//! from CSV with automatic type inference. Plots are described as marks
//! (bars, dots, rules) whose visual channels are bound to dataset columns,
//! and rendered to SVG.
//!
//! ## Quick Start
//!
//! ```rust
//! use tableplot::prelude::*;
//!
//! let data = TabularDataset::builder()
//!     .column("name", ["Alice", "Bob", "Charlie"])
//!     .column("age", [35i64, 25, 45])
//!     .build()?;
//!
//! let plot = Mark::bar_y(&data, Channels::new().x("name").y("age")).plot().plot()?;
//! let svg = plot.to_svg();
//! assert!(svg.contains("<rect"));
//! # Ok::<(), tableplot::Error>(())
//! ```
//!
//! ## Ready-made plots
//!
//! [`demos::table_to_bar_chart`] and [`demos::csv_to_anomaly_dot`] build the
//! people bar chart and the GISTEMP temperature anomaly dot chart.
//!
//! ## References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color type used by scales and output.
pub mod color;

/// Columnar datasets and CSV loading.
pub mod data;

/// Scale functions for data-to-visual mappings.
pub mod scale;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Declarative plot grammar.
pub mod grammar;

/// Output encoders (SVG).
pub mod output;

/// Ready-made plots.
pub mod demos;

// ============================================================================
// Configuration and Errors
// ============================================================================

/// Plot configuration.
pub mod config;

/// Error types for tableplot operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use tableplot::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::PlotConfig;
    pub use crate::data::{load_csv, read_csv, TabularDataset, Value};
    pub use crate::error::{Error, Result};
    pub use crate::grammar::{
        AxisOptions, Channel, Channels, ColorOptions, Mark, Plot, PlotSpec, RenderedPlot,
        TickFormat,
    };
    pub use crate::scale::{BandScale, ColorScale, ColorScheme, LinearScale, Scale};
}
