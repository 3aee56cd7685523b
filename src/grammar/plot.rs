//! Plot builder.
//!
//! Collects marks and scale options, validates them once in
//! [`Plot::build`], and produces an immutable [`PlotSpec`].

use tracing::debug;

use super::mark::Mark;
use super::options::{AxisOptions, ColorOptions};
use super::render::{self, RenderedPlot};
use crate::config::{Margin, PlotConfig};
use crate::error::{Error, Result};

/// Builder for a plot description.
///
/// # Example
///
/// ```rust
/// use tableplot::data::TabularDataset;
/// use tableplot::grammar::{Channels, Mark, Plot};
///
/// let data = TabularDataset::builder()
///     .column("name", ["Alice", "Bob"])
///     .column("age", [35i64, 25])
///     .build()
///     .unwrap();
///
/// let plot = Plot::new()
///     .mark(Mark::bar_y(&data, Channels::new().x("name").y("age")))
///     .plot()
///     .unwrap();
///
/// assert_eq!(plot.group("bar").map(<[_]>::len), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct Plot {
    marks: Vec<Mark>,
    x: AxisOptions,
    y: AxisOptions,
    color: ColorOptions,
    width: u32,
    height: u32,
    margin: Margin,
}

impl Default for Plot {
    fn default() -> Self {
        let config = PlotConfig::default();
        Self {
            marks: Vec::new(),
            x: AxisOptions::default(),
            y: AxisOptions::default(),
            color: ColorOptions::default(),
            width: config.width,
            height: config.height,
            margin: config.margin,
        }
    }
}

impl Plot {
    /// Create an empty plot with default dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mark. Marks are drawn in the order they are added.
    #[must_use]
    pub fn mark(mut self, mark: Mark) -> Self {
        self.marks.push(mark);
        self
    }

    /// Add several marks.
    #[must_use]
    pub fn marks(mut self, marks: impl IntoIterator<Item = Mark>) -> Self {
        self.marks.extend(marks);
        self
    }

    /// Set x axis options.
    #[must_use]
    pub fn x(mut self, options: AxisOptions) -> Self {
        self.x = options;
        self
    }

    /// Set y axis options.
    #[must_use]
    pub fn y(mut self, options: AxisOptions) -> Self {
        self.y = options;
        self
    }

    /// Set color scale options.
    #[must_use]
    pub fn color(mut self, options: ColorOptions) -> Self {
        self.color = options;
        self
    }

    /// Set output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set frame margins.
    #[must_use]
    pub fn margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Apply dimensions and margins from a configuration.
    #[must_use]
    pub fn config(self, config: &PlotConfig) -> Self {
        self.dimensions(config.width, config.height).margin(config.margin)
    }

    /// Validate the marks and freeze the description.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMarks`] for a plot without marks, or the first
    /// channel binding error of any mark.
    pub fn build(self) -> Result<PlotSpec> {
        if self.marks.is_empty() {
            return Err(Error::NoMarks);
        }
        for mark in &self.marks {
            mark.validate()?;
        }

        debug!(marks = self.marks.len(), width = self.width, height = self.height, "built plot");

        Ok(PlotSpec {
            marks: self.marks,
            x: self.x,
            y: self.y,
            color: self.color,
            width: self.width,
            height: self.height,
            margin: self.margin,
        })
    }

    /// Build and render in one step.
    ///
    /// # Errors
    ///
    /// Returns any error from [`build`](Self::build) or
    /// [`PlotSpec::render`].
    pub fn plot(self) -> Result<RenderedPlot> {
        self.build()?.render()
    }
}

/// A validated plot description.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    marks: Vec<Mark>,
    x: AxisOptions,
    y: AxisOptions,
    color: ColorOptions,
    width: u32,
    height: u32,
    margin: Margin,
}

impl PlotSpec {
    /// Marks in drawing order.
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// X axis options.
    #[must_use]
    pub fn x(&self) -> &AxisOptions {
        &self.x
    }

    /// Y axis options.
    #[must_use]
    pub fn y(&self) -> &AxisOptions {
        &self.y
    }

    /// Color options.
    #[must_use]
    pub fn color(&self) -> &ColorOptions {
        &self.color
    }

    /// Output width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame margins.
    #[must_use]
    pub fn margin(&self) -> Margin {
        self.margin
    }

    /// Resolve scales and lay out every mark.
    ///
    /// # Errors
    ///
    /// Returns an error if a channel cannot be read.
    pub fn render(&self) -> Result<RenderedPlot> {
        render::render(self)
    }
}
