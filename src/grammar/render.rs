//! Scene layout.
//!
//! Rendering resolves every channel of every mark, fits shared position and
//! color scales across all marks, and lays out the frame, axes and mark
//! glyphs as labeled groups of [`SvgElement`]s.

use std::path::Path;

use chrono::Datelike;
use tracing::{debug, trace};

use super::channel::{Channel, ChannelSource};
use super::mark::{Mark, MarkKind};
use super::options::{AxisOptions, ColorOptions, TickFormat};
use super::plot::PlotSpec;
use crate::color::Rgba;
use crate::data::{date_from_days, Value};
use crate::error::Result;
use crate::output::{SvgElement, SvgEncoder, TextAnchor};
use crate::scale::{
    tick_increment, year_ticks, BandScale, ColorScale, ColorScheme, LinearScale, Scale,
};

const FONT_SIZE: f32 = 10.0;
const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

/// Color of marks and axes without a color channel.
const CURRENT_COLOR: Rgba = Rgba::BLACK;

/// Gridline color (10% black).
const GRID_COLOR: Rgba = Rgba::BLACK.with_alpha(26);

/// A rendered plot: its plot description and the laid-out scene.
#[derive(Debug, Clone)]
pub struct RenderedPlot {
    spec: PlotSpec,
    width: u32,
    height: u32,
    groups: Vec<SvgElement>,
}

impl RenderedPlot {
    /// Specification the plot was rendered from.
    #[must_use]
    pub fn spec(&self) -> &PlotSpec {
        &self.spec
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

    /// Top-level groups in drawing order.
    #[must_use]
    pub fn groups(&self) -> &[SvgElement] {
        &self.groups
    }

    /// Elements of the first group with the given label.
    ///
    /// Axes are labeled `x-axis`, `y-axis`, `x-grid` and `y-grid`; marks are
    /// labeled by kind (`bar`, `dot`, `rule`).
    #[must_use]
    pub fn group(&self, label: &str) -> Option<&[SvgElement]> {
        self.groups.iter().find_map(|group| match group {
            SvgElement::Group { label: l, elements } if l == label => Some(elements.as_slice()),
            _ => None,
        })
    }

    /// Total number of drawn elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.groups.iter().map(SvgElement::leaf_count).sum()
    }

    fn encoder(&self) -> SvgEncoder {
        let mut encoder = SvgEncoder::new(self.width, self.height);
        for group in &self.groups {
            encoder.add_element(group.clone());
        }
        encoder
    }

    /// Serialize to an SVG document.
    #[must_use]
    pub fn to_svg(&self) -> String {
        self.encoder().render()
    }

    /// Write the SVG document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        self.encoder().write_to_file(path)
    }
}

/// Inner plotting area in pixels.
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    height: f64,
}

impl Frame {
    fn new(spec: &PlotSpec) -> Self {
        let margin = spec.margin();
        let width = f64::from(spec.width());
        let height = f64::from(spec.height());
        Self {
            left: f64::from(margin.left),
            right: width - f64::from(margin.right),
            top: f64::from(margin.top),
            bottom: height - f64::from(margin.bottom),
            height,
        }
    }

    fn inner_width(&self) -> f64 {
        self.right - self.left
    }

    fn inner_height(&self) -> f64 {
        self.bottom - self.top
    }

    fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// A mark with every bound channel read into values.
struct ResolvedMark<'a> {
    mark: &'a Mark,
    x: Option<Vec<Value>>,
    y: Option<Vec<Value>>,
    stroke: Option<Vec<Value>>,
    fill: Option<Vec<Value>>,
}

impl<'a> ResolvedMark<'a> {
    fn new(mark: &'a Mark) -> Result<Self> {
        Ok(Self {
            mark,
            x: mark.resolve(Channel::X)?,
            y: mark.resolve(Channel::Y)?,
            stroke: mark.resolve(Channel::Stroke)?,
            fill: mark.resolve(Channel::Fill)?,
        })
    }

    fn is_bar(&self) -> bool {
        matches!(self.mark.kind(), MarkKind::BarY { .. })
    }
}

/// Horizontal position scale.
enum XScale {
    Band(BandScale),
    Linear { scale: LinearScale, temporal: bool },
}

impl XScale {
    fn fit(marks: &[ResolvedMark<'_>], frame: &Frame, options: &AxisOptions) -> Result<Self> {
        let values: Vec<&Value> = marks
            .iter()
            .filter_map(|m| m.x.as_deref())
            .flatten()
            .filter(|v| !v.is_null())
            .collect();

        let banded = marks.iter().any(|m| m.is_bar() && m.x.is_some()) || is_categorical(&values);
        if banded {
            let domain = ordinal_domain(&values);
            trace!(?domain, "x band domain");
            return Ok(XScale::Band(BandScale::new(domain, (frame.left, frame.right))));
        }

        let temporal = values.iter().any(|v| matches!(v, Value::Date(_)))
            && !values.iter().any(|v| matches!(v, Value::Int(_) | Value::Float(_)));
        let domain = padded_domain(extent(values.iter().filter_map(|v| v.as_f64())));
        trace!(?domain, temporal, "x linear domain");

        let mut scale = LinearScale::new(domain, (frame.left, frame.right))?;
        if options.nice && !temporal {
            scale = scale.nice(tick_count(frame.inner_width(), 80.0));
        }
        Ok(XScale::Linear { scale, temporal })
    }

    /// Center position of a value.
    fn position(&self, value: &Value) -> Option<f64> {
        match self {
            XScale::Band(band) => {
                band.scale(&value.to_string()).map(|start| start + band.bandwidth() / 2.0)
            }
            XScale::Linear { scale, .. } => value.as_f64().map(|v| scale.scale(v)),
        }
    }

    /// Start and width of the band holding a value.
    fn band(&self, value: &Value) -> Option<(f64, f64)> {
        match self {
            XScale::Band(band) => {
                band.scale(&value.to_string()).map(|start| (start, band.bandwidth()))
            }
            XScale::Linear { .. } => None,
        }
    }

    fn ticks(&self, count: usize, format: Option<&TickFormat>) -> Vec<(f64, String)> {
        match self {
            XScale::Band(band) => band
                .domain()
                .iter()
                .filter_map(|key| {
                    band.scale(key).map(|start| (start + band.bandwidth() / 2.0, key.clone()))
                })
                .collect(),
            XScale::Linear { scale, temporal: true } => year_ticks(scale.domain(), count)
                .into_iter()
                .filter_map(|t| {
                    let date = date_from_days(t as i32)?;
                    Some((scale.scale(t), date.year().to_string()))
                })
                .collect(),
            XScale::Linear { scale, temporal: false } => linear_ticks(scale, count, format),
        }
    }

    fn is_band(&self) -> bool {
        matches!(self, XScale::Band(_))
    }
}

/// Shared color scale for stroke and fill channels.
enum ColorMapping {
    Unbound,
    Continuous(ColorScale),
    Ordinal { domain: Vec<String>, palette: Vec<Rgba> },
}

impl ColorMapping {
    fn fit(marks: &[ResolvedMark<'_>], options: &ColorOptions) -> Result<Self> {
        let values: Vec<&Value> = marks
            .iter()
            .flat_map(|m| m.stroke.iter().chain(m.fill.iter()))
            .flatten()
            .filter(|v| !v.is_null())
            .collect();

        if values.is_empty() {
            return Ok(ColorMapping::Unbound);
        }

        if is_categorical(&values) || options.scheme.is_some_and(ColorScheme::is_categorical) {
            let palette = options.scheme.unwrap_or(ColorScheme::Tableau10).colors();
            return Ok(ColorMapping::Ordinal { domain: ordinal_domain(&values), palette });
        }

        let Some(extent) = extent(values.iter().filter_map(|v| v.as_f64())) else {
            return Ok(ColorMapping::Unbound);
        };
        let scheme = options.scheme.unwrap_or(ColorScheme::Viridis);
        trace!(?extent, ?scheme, "color domain");
        Ok(ColorMapping::Continuous(ColorScale::from_scheme(scheme, padded_domain(Some(extent)))?))
    }

    fn color(&self, value: &Value) -> Option<Rgba> {
        match self {
            ColorMapping::Unbound => None,
            ColorMapping::Continuous(scale) => value.as_f64().map(|v| scale.scale(v)),
            ColorMapping::Ordinal { domain, palette } => {
                let key = value.to_string();
                let index = domain.iter().position(|k| *k == key)?;
                palette.get(index.checked_rem(palette.len())?).copied()
            }
        }
    }
}

/// Fit scales and lay out the scene of a plot.
pub(crate) fn render(spec: &PlotSpec) -> Result<RenderedPlot> {
    let frame = Frame::new(spec);
    let marks = spec.marks().iter().map(ResolvedMark::new).collect::<Result<Vec<_>>>()?;

    let x_scale = XScale::fit(&marks, &frame, spec.x())?;
    let y_scale = fit_y(&marks, &frame, spec.y())?;
    let colors = ColorMapping::fit(&marks, spec.color())?;

    let x_count = tick_count(frame.inner_width(), 80.0);
    let y_count = tick_count(frame.inner_height(), 35.0);
    let x_ticks = x_scale.ticks(x_count, spec.x().tick_format.as_ref());
    let y_ticks = linear_ticks(&y_scale, y_count, spec.y().tick_format.as_ref());

    let mut groups = Vec::with_capacity(marks.len() + 4);

    if spec.y().grid {
        let lines = y_ticks
            .iter()
            .map(|(y, _)| line(frame.left, *y, frame.right, *y, GRID_COLOR, 1.0))
            .collect();
        groups.push(SvgElement::group("y-grid", lines));
    }
    if spec.x().grid {
        let lines = x_ticks
            .iter()
            .map(|(x, _)| line(*x, frame.top, *x, frame.bottom, GRID_COLOR, 1.0))
            .collect();
        groups.push(SvgElement::group("x-grid", lines));
    }

    let y_label = spec.y().label.clone().or_else(|| default_label(spec, Channel::Y));
    groups.push(SvgElement::group("y-axis", y_axis(&frame, &y_ticks, y_label.as_deref())));

    let x_label = spec.x().label.clone().or_else(|| default_label(spec, Channel::X));
    groups.push(SvgElement::group(
        "x-axis",
        x_axis(&frame, &x_ticks, x_label.as_deref(), x_scale.is_band()),
    ));

    for mark in &marks {
        let elements = match *mark.mark.kind() {
            MarkKind::BarY { inset } => {
                bars(mark, &x_scale, &y_scale, &colors, &frame, f64::from(inset))
            }
            MarkKind::Dot { r, stroke_width } => {
                dots(mark, &x_scale, &y_scale, &colors, &frame, r, stroke_width)
            }
            MarkKind::RuleY { stroke_width } => {
                rules(mark, &y_scale, &colors, &frame, stroke_width)
            }
        };
        groups.push(SvgElement::group(mark.mark.kind().name(), elements));
    }

    let rendered =
        RenderedPlot { spec: spec.clone(), width: spec.width(), height: spec.height(), groups };
    debug!(
        marks = marks.len(),
        groups = rendered.groups.len(),
        elements = rendered.element_count(),
        "rendered plot"
    );
    Ok(rendered)
}

fn fit_y(marks: &[ResolvedMark<'_>], frame: &Frame, options: &AxisOptions) -> Result<LinearScale> {
    let values = marks.iter().filter_map(|m| m.y.as_deref()).flatten().filter_map(Value::as_f64);
    // Bars grow from zero.
    let baseline = marks.iter().any(ResolvedMark::is_bar).then_some(0.0);

    let domain = padded_domain(extent(values.chain(baseline)));
    trace!(?domain, "y domain");

    let scale = LinearScale::new(domain, (frame.bottom, frame.top))?;
    Ok(if options.nice { scale.nice(tick_count(frame.inner_height(), 35.0)) } else { scale })
}

fn bars(
    mark: &ResolvedMark<'_>,
    x: &XScale,
    y: &LinearScale,
    colors: &ColorMapping,
    frame: &Frame,
    inset: f64,
) -> Vec<SvgElement> {
    let Some(ys) = &mark.y else {
        return Vec::new();
    };
    let baseline = y.scale(0.0);

    (0..mark.mark.len())
        .filter_map(|i| {
            let top = y.scale(ys[i].as_f64()?);
            let (start, width) = match &mark.x {
                Some(xs) => x.band(&xs[i])?,
                None => (frame.left, frame.inner_width()),
            };
            let fill =
                mark.fill.as_ref().and_then(|f| colors.color(&f[i])).unwrap_or(CURRENT_COLOR);
            let stroke = mark.stroke.as_ref().and_then(|s| colors.color(&s[i]));

            Some(SvgElement::Rect {
                x: px(start + inset),
                y: px(top.min(baseline)),
                width: px((width - 2.0 * inset).max(0.0)),
                height: px((top - baseline).abs()),
                fill,
                stroke,
                stroke_width: 1.0,
            })
        })
        .collect()
}

fn dots(
    mark: &ResolvedMark<'_>,
    x: &XScale,
    y: &LinearScale,
    colors: &ColorMapping,
    frame: &Frame,
    r: f32,
    stroke_width: f32,
) -> Vec<SvgElement> {
    (0..mark.mark.len())
        .filter_map(|i| {
            let cx = match &mark.x {
                Some(xs) => x.position(&xs[i])?,
                None => frame.center_x(),
            };
            let cy = match &mark.y {
                Some(ys) => y.scale(ys[i].as_f64()?),
                None => frame.center_y(),
            };
            let stroke =
                mark.stroke.as_ref().and_then(|s| colors.color(&s[i])).unwrap_or(CURRENT_COLOR);
            let fill = mark.fill.as_ref().and_then(|f| colors.color(&f[i]));

            Some(SvgElement::Circle {
                cx: px(cx),
                cy: px(cy),
                r,
                fill,
                stroke: Some(stroke),
                stroke_width,
            })
        })
        .collect()
}

fn rules(
    mark: &ResolvedMark<'_>,
    y: &LinearScale,
    colors: &ColorMapping,
    frame: &Frame,
    stroke_width: f32,
) -> Vec<SvgElement> {
    let Some(ys) = &mark.y else {
        return Vec::new();
    };

    ys.iter()
        .enumerate()
        .filter_map(|(i, value)| {
            let position = y.scale(value.as_f64()?);
            let stroke =
                mark.stroke.as_ref().and_then(|s| colors.color(&s[i])).unwrap_or(CURRENT_COLOR);
            Some(line(frame.left, position, frame.right, position, stroke, stroke_width))
        })
        .collect()
}

fn y_axis(frame: &Frame, ticks: &[(f64, String)], label: Option<&str>) -> Vec<SvgElement> {
    let mut elements = Vec::with_capacity(ticks.len() * 2 + 1);
    for (y, text) in ticks {
        elements.push(line(frame.left - TICK_SIZE, *y, frame.left, *y, CURRENT_COLOR, 1.0));
        elements.push(text_at(
            frame.left - TICK_SIZE - TICK_PADDING,
            y + f64::from(FONT_SIZE) * 0.32,
            text,
            Rgba::BLACK,
            TextAnchor::End,
        ));
    }
    if let Some(label) = label {
        elements.push(text_at(
            3.0,
            (frame.top - 8.0).max(f64::from(FONT_SIZE)),
            &format!("\u{2191} {label}"),
            Rgba::GREY,
            TextAnchor::Start,
        ));
    }
    elements
}

fn x_axis(
    frame: &Frame,
    ticks: &[(f64, String)],
    label: Option<&str>,
    band: bool,
) -> Vec<SvgElement> {
    let mut elements = Vec::with_capacity(ticks.len() * 2 + 1);
    for (x, text) in ticks {
        elements.push(line(*x, frame.bottom, *x, frame.bottom + TICK_SIZE, CURRENT_COLOR, 1.0));
        elements.push(text_at(
            *x,
            frame.bottom + TICK_SIZE + TICK_PADDING + f64::from(FONT_SIZE) * 0.8,
            text,
            Rgba::BLACK,
            TextAnchor::Middle,
        ));
    }
    if let Some(label) = label {
        let baseline = frame.height - 3.0;
        elements.push(if band {
            text_at(frame.center_x(), baseline, label, Rgba::GREY, TextAnchor::Middle)
        } else {
            let label = format!("{label} \u{2192}");
            text_at(frame.right, baseline, &label, Rgba::GREY, TextAnchor::End)
        });
    }
    elements
}

/// Axis label taken from the first mark binding a column to the channel.
fn default_label(spec: &PlotSpec, channel: Channel) -> Option<String> {
    spec.marks().iter().find_map(|mark| match mark.channel_bindings().get(channel)? {
        ChannelSource::Field(name) => Some(name.clone()),
        ChannelSource::Column(column) => Some(column.name().to_string()),
        ChannelSource::Literal(_) => None,
    })
}

fn linear_ticks(
    scale: &LinearScale,
    count: usize,
    format: Option<&TickFormat>,
) -> Vec<(f64, String)> {
    let (lo, hi) = scale.domain();
    let step = tick_increment(lo.min(hi), lo.max(hi), count);
    let format = format.copied().unwrap_or_default();
    scale
        .ticks(count)
        .into_iter()
        .map(|t| (scale.scale(t), format.format_with_step(t, step)))
        .collect()
}

fn tick_count(extent: f64, spacing: f64) -> usize {
    (extent.abs() / spacing).round().max(1.0) as usize
}

/// Smallest and largest finite value.
fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Domain for an extent: (0, 1) when empty, widened when degenerate.
///
/// The widening is one unit, or a billionth of the magnitude when that is
/// larger, so the bounds stay distinct after rounding.
fn padded_domain(extent: Option<(f64, f64)>) -> (f64, f64) {
    match extent {
        None => (0.0, 1.0),
        Some((lo, hi)) if (hi - lo).abs() <= f64::EPSILON * lo.abs().max(1.0) => {
            let pad = (lo.abs() * 1e-9).max(1.0);
            (lo - pad, hi + pad)
        }
        Some(domain) => domain,
    }
}

/// Present values that are all text or booleans. Text markers mixed into a
/// numeric or date column are treated as missing instead.
fn is_categorical(values: &[&Value]) -> bool {
    !values.is_empty() && values.iter().all(|v| matches!(v, Value::Text(_) | Value::Bool(_)))
}

/// Distinct values in ascending order: numeric when every value is a number
/// or date, lexicographic otherwise.
fn ordinal_domain(values: &[&Value]) -> Vec<String> {
    let mut keys: Vec<(Option<f64>, String)> =
        values.iter().map(|v| (v.as_f64(), v.to_string())).collect();

    if keys.iter().all(|(n, _)| n.is_some()) {
        keys.sort_by(|a, b| a.0.unwrap_or(0.0).total_cmp(&b.0.unwrap_or(0.0)));
    } else {
        keys.sort_by(|a, b| a.1.cmp(&b.1));
    }
    keys.dedup_by(|a, b| a.1 == b.1);
    keys.into_iter().map(|(_, key)| key).collect()
}

/// Round to hundredths of a pixel.
fn px(value: f64) -> f32 {
    ((value * 100.0).round() / 100.0) as f32
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgba, stroke_width: f32) -> SvgElement {
    SvgElement::Line { x1: px(x1), y1: px(y1), x2: px(x2), y2: px(y2), stroke, stroke_width }
}

fn text_at(x: f64, y: f64, text: &str, fill: Rgba, anchor: TextAnchor) -> SvgElement {
    SvgElement::Text {
        x: px(x),
        y: px(y),
        text: text.to_string(),
        font_size: FONT_SIZE,
        fill,
        anchor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TabularDataset;
    use crate::grammar::{Channels, Plot};
    use approx::assert_relative_eq;
    use arrow::array::{ArrayRef, Float64Array};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn people() -> TabularDataset {
        TabularDataset::builder()
            .column("id", [1i64, 2, 3])
            .column("name", ["Alice", "Bob", "Charlie"])
            .column("age", [35i64, 25, 45])
            .build()
            .unwrap()
    }

    fn anomalies(values: &[(i32, f64)]) -> TabularDataset {
        let dates = values
            .iter()
            .map(|(y, _)| NaiveDate::from_ymd_opt(*y, 1, 1).unwrap())
            .collect::<Vec<_>>();
        let anomaly = values.iter().map(|(_, a)| *a).collect::<Vec<_>>();
        TabularDataset::builder().column("Date", dates).column("Anomaly", anomaly).build().unwrap()
    }

    fn anomaly_plot(data: &TabularDataset) -> RenderedPlot {
        Plot::new()
            .mark(Mark::rule_y([0.0]))
            .mark(Mark::dot(data, Channels::new().x("Date").y("Anomaly").stroke("Anomaly")))
            .y(AxisOptions::new()
                .label("Anomaly")
                .tick_format(TickFormat::parse("+f").unwrap())
                .grid(true))
            .color(ColorOptions::new().scheme(ColorScheme::BuRd))
            .plot()
            .unwrap()
    }

    fn rects(elements: &[SvgElement]) -> Vec<(f32, f32, f32, f32)> {
        elements
            .iter()
            .filter_map(|e| match e {
                SvgElement::Rect { x, y, width, height, .. } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    fn texts(elements: &[SvgElement]) -> Vec<&str> {
        elements
            .iter()
            .filter_map(|e| match e {
                SvgElement::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_bar_chart_layout() {
        let plot = Mark::bar_y(people(), Channels::new().x("name").y("age")).plot().plot().unwrap();
        let bars = rects(plot.group("bar").unwrap());
        assert_eq!(bars.len(), 3);

        // Bars share the zero baseline at the bottom of the frame.
        for (_, y, _, height) in &bars {
            assert_relative_eq!(y + height, 370.0, epsilon = 0.02);
        }

        // Band order follows sorted names and the tallest bar is Charlie's.
        assert!(bars[0].0 < bars[1].0 && bars[1].0 < bars[2].0);
        assert!(bars[2].3 > bars[0].3 && bars[0].3 > bars[1].3);
        assert_relative_eq!(bars[2].3, 350.0, epsilon = 0.02);
    }

    #[test]
    fn test_bar_chart_axis_labels() {
        let plot = Mark::bar_y(people(), Channels::new().x("name").y("age")).plot().plot().unwrap();

        let x_labels = texts(plot.group("x-axis").unwrap());
        assert_eq!(x_labels, vec!["Alice", "Bob", "Charlie", "name"]);

        let y_labels = texts(plot.group("y-axis").unwrap());
        assert_eq!(y_labels.first(), Some(&"0"));
        assert_eq!(y_labels.last(), Some(&"\u{2191} age"));
    }

    #[test]
    fn test_dot_chart_layout() {
        let data = anomalies(&[(1880, -0.2), (1950, -0.05), (2016, 1.0)]);
        let plot = anomaly_plot(&data);

        assert_eq!(plot.group("dot").unwrap().len(), 3);
        let rule = plot.group("rule").unwrap();
        assert_eq!(rule.len(), 1);

        let resolved: Vec<ResolvedMark<'_>> =
            plot.spec().marks().iter().map(|m| ResolvedMark::new(m).unwrap()).collect();
        let y = fit_y(&resolved, &Frame::new(plot.spec()), plot.spec().y()).unwrap();
        match &rule[0] {
            SvgElement::Line { y1, y2, x1, x2, .. } => {
                assert_relative_eq!(*y1, px(y.scale(0.0)));
                assert_eq!(y1, y2);
                assert_relative_eq!(*x1, 40.0);
                assert_relative_eq!(*x2, 620.0);
            }
            other => panic!("Expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_dot_chart_signed_ticks_and_grid() {
        let data = anomalies(&[(1880, -0.5), (2016, 1.0)]);
        let plot = anomaly_plot(&data);

        // Ticks step by 0.2, so one decimal is shown.
        let labels = texts(plot.group("y-axis").unwrap());
        assert!(labels.contains(&"+0.0"));
        assert!(labels.contains(&"+0.2"));
        assert!(labels.contains(&"\u{2212}0.4"));
        assert!(labels.contains(&"\u{2191} Anomaly"));

        let tick_count = plot
            .group("y-axis")
            .unwrap()
            .iter()
            .filter(|e| matches!(e, SvgElement::Line { .. }))
            .count();
        assert_eq!(plot.group("y-grid").unwrap().len(), tick_count);
    }

    #[test]
    fn test_dot_chart_year_ticks() {
        let data = anomalies(&[(1880, -0.5), (2016, 1.0)]);
        let plot = anomaly_plot(&data);
        let labels = texts(plot.group("x-axis").unwrap());
        assert!(labels.contains(&"1900"));
        assert!(labels.contains(&"2000"));
        assert_eq!(labels.last(), Some(&"Date \u{2192}"));
    }

    #[test]
    fn test_diverging_stroke_colors() {
        let data = anomalies(&[(1900, -0.5), (1950, 0.0), (2000, 1.0)]);
        let plot = anomaly_plot(&data);
        let strokes: Vec<Rgba> = plot
            .group("dot")
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                SvgElement::Circle { stroke, .. } => *stroke,
                _ => None,
            })
            .collect();

        assert_eq!(strokes.len(), 3);
        assert!(strokes[0].b > strokes[0].r, "negative anomaly should be blue");
        assert!(strokes[2].r > strokes[2].b, "positive anomaly should be red");
        // Zero sits on the neutral midpoint of the symmetric domain.
        assert_eq!(strokes[1], Rgba::rgb(247, 247, 247));
    }

    #[test]
    fn test_empty_dataset_keeps_rule() {
        let empty = TabularDataset::builder()
            .column("Date", Vec::<NaiveDate>::new())
            .column("Anomaly", Vec::<f64>::new())
            .build()
            .unwrap();
        let plot = anomaly_plot(&empty);

        assert!(plot.group("dot").unwrap().is_empty());
        assert_eq!(plot.group("rule").unwrap().len(), 1);
    }

    #[test]
    fn test_null_rows_skipped() {
        let data = TabularDataset::builder()
            .column("x", [1.0, 2.0, 3.0])
            .array("y", Arc::new(Float64Array::from(vec![Some(1.0), None, Some(3.0)])) as ArrayRef)
            .build()
            .unwrap();

        let plot = Mark::dot(&data, Channels::new().x("x").y("y")).plot().plot().unwrap();
        assert_eq!(plot.group("dot").unwrap().len(), 2);
    }

    #[test]
    fn test_single_value_domain() {
        let data = TabularDataset::builder().column("x", [5.0]).column("y", [5.0]).build().unwrap();
        let plot = Mark::dot(&data, Channels::new().x("x").y("y")).plot().plot().unwrap();

        match &plot.group("dot").unwrap()[0] {
            SvgElement::Circle { cx, cy, .. } => {
                assert_relative_eq!(*cx, 330.0);
                assert_relative_eq!(*cy, 195.0);
            }
            other => panic!("Expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_categorical_stroke() {
        let data = TabularDataset::builder()
            .column("x", [1.0, 2.0, 3.0])
            .column("y", [1.0, 2.0, 3.0])
            .column("group", ["b", "a", "b"])
            .build()
            .unwrap();
        let plot =
            Mark::dot(&data, Channels::new().x("x").y("y").stroke("group")).plot().plot().unwrap();

        let palette = ColorScheme::Tableau10.colors();
        let strokes: Vec<Option<Rgba>> = plot
            .group("dot")
            .unwrap()
            .iter()
            .map(|e| match e {
                SvgElement::Circle { stroke, .. } => *stroke,
                _ => None,
            })
            .collect();
        assert_eq!(strokes, vec![Some(palette[1]), Some(palette[0]), Some(palette[1])]);
    }

    #[test]
    fn test_categorical_scheme_on_numbers() {
        let data = TabularDataset::builder()
            .column("x", [1.0, 2.0, 3.0])
            .column("y", [1.0, 2.0, 3.0])
            .column("level", [30i64, 4, 30])
            .build()
            .unwrap();
        let plot = Mark::dot(&data, Channels::new().x("x").y("y").stroke("level"))
            .plot()
            .color(ColorOptions::new().scheme(ColorScheme::Tableau10))
            .plot()
            .unwrap();

        let palette = ColorScheme::Tableau10.colors();
        let strokes: Vec<Option<Rgba>> = plot
            .group("dot")
            .unwrap()
            .iter()
            .map(|e| match e {
                SvgElement::Circle { stroke, .. } => *stroke,
                _ => None,
            })
            .collect();
        assert_eq!(strokes, vec![Some(palette[1]), Some(palette[0]), Some(palette[1])]);
    }

    #[test]
    fn test_numeric_band_order() {
        let data = TabularDataset::builder()
            .column("k", [10i64, 2, 1])
            .column("v", [1i64, 2, 3])
            .build()
            .unwrap();
        let plot = Mark::bar_y(&data, Channels::new().x("k").y("v")).plot().plot().unwrap();
        let labels = texts(plot.group("x-axis").unwrap());
        assert_eq!(labels, vec!["1", "2", "10", "k"]);
    }

    #[test]
    fn test_nice_domain() {
        let data = TabularDataset::builder()
            .column("x", [13.0, 97.0])
            .column("y", [13.0, 97.0])
            .build()
            .unwrap();
        let plot = Mark::dot(&data, Channels::new().x("x").y("y"))
            .plot()
            .y(AxisOptions::new().nice(true))
            .plot()
            .unwrap();
        let labels = texts(plot.group("y-axis").unwrap());
        assert_eq!(labels.first(), Some(&"10"));
        assert_eq!(labels.iter().rev().nth(1), Some(&"100"));
    }

    #[test]
    fn test_group_order() {
        let plot = anomaly_plot(&anomalies(&[(1900, 0.1)]));
        let labels: Vec<&str> = plot
            .groups()
            .iter()
            .filter_map(|g| match g {
                SvgElement::Group { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["y-grid", "y-axis", "x-axis", "rule", "dot"]);
    }

    #[test]
    fn test_to_svg_and_write() {
        let plot = anomaly_plot(&anomalies(&[(1900, -0.3), (2000, 0.4)]));
        let svg = plot.to_svg();
        assert!(svg.contains("<g aria-label=\"dot\">"));
        assert_eq!(svg.matches("<circle").count(), 2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anomaly.svg");
        plot.write_svg(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), svg);
    }

    #[test]
    fn test_render_is_deterministic() {
        let data = anomalies(&[(1900, -0.3), (2000, 0.4)]);
        assert_eq!(anomaly_plot(&data).to_svg(), anomaly_plot(&data).to_svg());
    }

    #[test]
    fn test_ordinal_domain_dedup() {
        let values = [Value::from("b"), Value::from("a"), Value::from("b")];
        let refs: Vec<&Value> = values.iter().collect();
        assert_eq!(ordinal_domain(&refs), vec!["a", "b"]);
    }

    #[test]
    fn test_padded_domain() {
        assert_eq!(padded_domain(None), (0.0, 1.0));
        assert_eq!(padded_domain(Some((2.0, 2.0))), (1.0, 3.0));
        assert_eq!(padded_domain(Some((-1.0, 4.0))), (-1.0, 4.0));

        let (lo, hi) = padded_domain(Some((1e17, 1e17)));
        assert!(lo < 1e17 && hi > 1e17);
        assert_relative_eq!(hi - lo, 2e8);
    }

    #[test]
    fn test_single_huge_value_renders() {
        let data =
            TabularDataset::builder().column("x", [1e17]).column("y", [1e17]).build().unwrap();
        let plot = Mark::dot(&data, Channels::new().x("x").y("y")).plot().plot().unwrap();

        match &plot.group("dot").unwrap()[0] {
            SvgElement::Circle { cx, cy, .. } => {
                assert_relative_eq!(*cx, 330.0);
                assert_relative_eq!(*cy, 195.0);
            }
            other => panic!("Expected circle, got {other:?}"),
        }
    }

    #[test]
    fn test_text_markers_in_numeric_column() {
        let data = crate::data::read_csv(
            b"Date,Anomaly\n1900-01-01,-0.5\n1901-01-01,***\n1902-01-01,1.0\n",
        )
        .unwrap();
        let plot = anomaly_plot(&data);

        let dots = plot.group("dot").unwrap();
        assert_eq!(dots.len(), 2);
        for dot in dots {
            let stroke = match dot {
                SvgElement::Circle { stroke, .. } => *stroke,
                _ => None,
            };
            assert!(stroke.is_some_and(|s| s != CURRENT_COLOR));
        }

        // The y domain comes from the two numeric rows.
        let labels = texts(plot.group("y-axis").unwrap());
        assert!(labels.contains(&"\u{2212}0.4"));
        assert!(labels.contains(&"+1.0"));
    }
}
