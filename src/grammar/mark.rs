//! Mark types.
//!
//! A mark is a geometric shape drawn once per datum, with its position and
//! color driven by channel bindings.

use super::channel::{Channel, ChannelSource, Channels};
use super::plot::Plot;
use crate::data::{TabularDataset, Value};
use crate::error::{Error, Result};

/// Default dot radius in pixels.
pub const DEFAULT_DOT_RADIUS: f32 = 3.0;

/// Default stroke width for dots and rules.
pub const DEFAULT_STROKE_WIDTH: f32 = 1.5;

/// Shape drawn for each datum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkKind {
    /// Vertical bars from zero to y, one band per x value.
    BarY {
        /// Pixels removed from each side of a band.
        inset: f32,
    },
    /// Hollow circles at (x, y).
    Dot {
        /// Circle radius.
        r: f32,
        /// Outline width.
        stroke_width: f32,
    },
    /// Horizontal lines spanning the frame at y.
    RuleY {
        /// Line width.
        stroke_width: f32,
    },
}

impl MarkKind {
    /// Short name, used to label rendered groups.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            MarkKind::BarY { .. } => "bar",
            MarkKind::Dot { .. } => "dot",
            MarkKind::RuleY { .. } => "rule",
        }
    }
}

/// Data a mark draws from.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkData {
    /// One datum per dataset row.
    Table(TabularDataset),
    /// One datum per value.
    Values(Vec<Value>),
}

impl MarkData {
    /// Number of data.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            MarkData::Table(data) => data.num_rows(),
            MarkData::Values(values) => values.len(),
        }
    }

    /// Check for no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<TabularDataset> for MarkData {
    fn from(data: TabularDataset) -> Self {
        MarkData::Table(data)
    }
}

impl From<&TabularDataset> for MarkData {
    fn from(data: &TabularDataset) -> Self {
        MarkData::Table(data.clone())
    }
}

impl From<Vec<Value>> for MarkData {
    fn from(values: Vec<Value>) -> Self {
        MarkData::Values(values)
    }
}

impl From<Vec<f64>> for MarkData {
    fn from(values: Vec<f64>) -> Self {
        MarkData::Values(values.into_iter().map(Value::Float).collect())
    }
}

impl<const N: usize> From<[f64; N]> for MarkData {
    fn from(values: [f64; N]) -> Self {
        MarkData::Values(values.into_iter().map(Value::Float).collect())
    }
}

/// A mark layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    kind: MarkKind,
    data: MarkData,
    channels: Channels,
}

impl Mark {
    /// Create a vertical bar mark.
    ///
    /// The mark draws one bar per datum, so a dataset with N rows yields N
    /// bars.
    #[must_use]
    pub fn bar_y(data: impl Into<MarkData>, channels: Channels) -> Self {
        Self { kind: MarkKind::BarY { inset: 0.5 }, data: data.into(), channels }
    }

    /// Create a dot mark.
    #[must_use]
    pub fn dot(data: impl Into<MarkData>, channels: Channels) -> Self {
        Self {
            kind: MarkKind::Dot { r: DEFAULT_DOT_RADIUS, stroke_width: DEFAULT_STROKE_WIDTH },
            data: data.into(),
            channels,
        }
    }

    /// Create a horizontal rule at each of `values`.
    ///
    /// ```rust
    /// use tableplot::grammar::Mark;
    ///
    /// let zero = Mark::rule_y([0.0]);
    /// assert_eq!(zero.len(), 1);
    /// ```
    #[must_use]
    pub fn rule_y(values: impl Into<MarkData>) -> Self {
        let data = values.into();
        let channels = match &data {
            MarkData::Values(values) => Channels::new().y(values.clone()),
            MarkData::Table(_) => Channels::new(),
        };
        Self { kind: MarkKind::RuleY { stroke_width: 1.0 }, data, channels }
    }

    /// Set the dot radius. Has no effect on other marks.
    #[must_use]
    pub fn r(mut self, radius: f32) -> Self {
        if let MarkKind::Dot { r, .. } = &mut self.kind {
            *r = radius;
        }
        self
    }

    /// Add or replace channel bindings.
    #[must_use]
    pub fn channels(mut self, channels: &Channels) -> Self {
        self.channels = self.channels.merge(channels);
        self
    }

    /// Mark kind.
    #[must_use]
    pub fn kind(&self) -> &MarkKind {
        &self.kind
    }

    /// Mark data.
    #[must_use]
    pub fn data(&self) -> &MarkData {
        &self.data
    }

    /// Channel bindings.
    #[must_use]
    pub fn channel_bindings(&self) -> &Channels {
        &self.channels
    }

    /// Number of glyphs the mark draws.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check for a mark with no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resolve a channel to one value per datum.
    ///
    /// Returns `Ok(None)` if the channel is unbound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if a field binding names a column
    /// missing from the mark's dataset (or the mark has no dataset), and
    /// [`Error::ChannelLengthMismatch`] if the source length differs from
    /// the mark length.
    pub fn resolve(&self, channel: Channel) -> Result<Option<Vec<Value>>> {
        let Some(source) = self.channels.get(channel) else {
            return Ok(None);
        };

        let values = match source {
            ChannelSource::Field(name) => match &self.data {
                MarkData::Table(data) => data.column(name)?.values()?,
                MarkData::Values(_) => return Err(Error::ColumnNotFound(name.clone())),
            },
            ChannelSource::Column(column) => column.values()?,
            ChannelSource::Literal(values) => values.clone(),
        };

        if values.len() != self.len() {
            return Err(Error::ChannelLengthMismatch {
                channel: channel.name(),
                expected: self.len(),
                actual: values.len(),
            });
        }
        Ok(Some(values))
    }

    /// Check every binding without reading column values.
    pub(crate) fn validate(&self) -> Result<()> {
        for (channel, source) in self.channels.iter() {
            let actual = match source {
                ChannelSource::Field(name) => match &self.data {
                    MarkData::Table(data) => data.column(name)?.len(),
                    MarkData::Values(_) => return Err(Error::ColumnNotFound(name.clone())),
                },
                ChannelSource::Column(column) => column.len(),
                ChannelSource::Literal(values) => values.len(),
            };
            if actual != self.len() {
                return Err(Error::ChannelLengthMismatch {
                    channel: channel.name(),
                    expected: self.len(),
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Start a plot containing only this mark.
    #[must_use]
    pub fn plot(self) -> Plot {
        Plot::new().mark(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> TabularDataset {
        TabularDataset::builder()
            .column("id", [1i64, 2, 3])
            .column("name", ["Alice", "Bob", "Charlie"])
            .column("age", [35i64, 25, 45])
            .build()
            .unwrap()
    }

    #[test]
    fn test_bar_length_follows_rows() {
        let data = people();
        let mark = Mark::bar_y(&data, Channels::new().x("name").y("age"));
        assert_eq!(mark.len(), 3);
        assert_eq!(mark.kind().name(), "bar");
    }

    #[test]
    fn test_resolve_field() {
        let mark = Mark::bar_y(people(), Channels::new().x("name").y("age"));
        let ys = mark.resolve(Channel::Y).unwrap().unwrap();
        assert_eq!(ys, vec![Value::Int(35), Value::Int(25), Value::Int(45)]);
    }

    #[test]
    fn test_resolve_column_handle() {
        let data = people();
        let mark = Mark::bar_y(
            &data,
            Channels::new().x(data.column("name").unwrap()).y(data.column("age").unwrap()),
        );
        let xs = mark.resolve(Channel::X).unwrap().unwrap();
        assert_eq!(xs, vec![Value::from("Alice"), Value::from("Bob"), Value::from("Charlie")]);
    }

    #[test]
    fn test_resolve_unbound() {
        let mark = Mark::bar_y(people(), Channels::new().x("name"));
        assert!(mark.resolve(Channel::Stroke).unwrap().is_none());
    }

    #[test]
    fn test_resolve_missing_field() {
        let mark = Mark::dot(people(), Channels::new().x("height"));
        assert!(matches!(mark.resolve(Channel::X), Err(Error::ColumnNotFound(_))));
        assert!(matches!(mark.validate(), Err(Error::ColumnNotFound(_))));
    }

    #[test]
    fn test_validate_length_mismatch() {
        let short = TabularDataset::builder().column("v", [1i64, 2]).build().unwrap();
        let mark = Mark::bar_y(people(), Channels::new().y(short.column("v").unwrap()));

        match mark.validate() {
            Err(Error::ChannelLengthMismatch { channel, expected, actual }) => {
                assert_eq!(channel, "y");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("Expected ChannelLengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_rule_y_identity() {
        let rule = Mark::rule_y([0.0, 1.0]);
        assert_eq!(rule.len(), 2);
        assert_eq!(
            rule.resolve(Channel::Y).unwrap().unwrap(),
            vec![Value::Float(0.0), Value::Float(1.0)]
        );
        rule.validate().unwrap();
    }

    #[test]
    fn test_field_on_values_mark_fails() {
        let rule = Mark::rule_y([0.0]).channels(&Channels::new().stroke("Anomaly"));
        assert!(matches!(rule.validate(), Err(Error::ColumnNotFound(ref n)) if n == "Anomaly"));
    }

    #[test]
    fn test_dot_radius() {
        let mark = Mark::dot(people(), Channels::new()).r(5.0);
        assert!(matches!(mark.kind(), MarkKind::Dot { r, .. } if (*r - 5.0).abs() < f32::EPSILON));

        let bar = Mark::bar_y(people(), Channels::new()).r(5.0);
        assert!(matches!(bar.kind(), MarkKind::BarY { .. }));
    }

    #[test]
    fn test_empty_table_mark() {
        let empty = TabularDataset::builder().column("Anomaly", Vec::<f64>::new()).build().unwrap();
        let mark = Mark::dot(&empty, Channels::new().y("Anomaly").stroke("Anomaly"));
        assert!(mark.is_empty());
        mark.validate().unwrap();
        assert_eq!(mark.resolve(Channel::Y).unwrap().unwrap(), Vec::<Value>::new());
    }
}
