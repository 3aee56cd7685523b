//! Channel mappings for marks.
//!
//! Binds visual channels (x, y, stroke, fill) to data sources.

use std::collections::BTreeMap;
use std::fmt;

use crate::data::{ColumnRef, Value};

/// A visual property driven by data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Outline color.
    Stroke,
    /// Fill color.
    Fill,
}

impl Channel {
    /// Lowercase channel name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Stroke => "stroke",
            Channel::Fill => "fill",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a channel takes its values from.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelSource {
    /// A column of the mark's own dataset, by name.
    Field(String),
    /// A column handle taken from a dataset.
    Column(ColumnRef),
    /// Literal values, one per mark.
    Literal(Vec<Value>),
}

impl From<&str> for ChannelSource {
    fn from(name: &str) -> Self {
        ChannelSource::Field(name.to_string())
    }
}

impl From<String> for ChannelSource {
    fn from(name: String) -> Self {
        ChannelSource::Field(name)
    }
}

impl From<ColumnRef> for ChannelSource {
    fn from(column: ColumnRef) -> Self {
        ChannelSource::Column(column)
    }
}

impl From<Vec<Value>> for ChannelSource {
    fn from(values: Vec<Value>) -> Self {
        ChannelSource::Literal(values)
    }
}

/// Channel bindings of a mark.
///
/// ```rust
/// use tableplot::grammar::{Channel, ChannelSource, Channels};
///
/// let channels = Channels::new().x("Date").y("Anomaly").stroke("Anomaly");
/// assert_eq!(channels.get(Channel::X), Some(&ChannelSource::Field("Date".into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channels {
    bindings: BTreeMap<Channel, ChannelSource>,
}

impl Channels {
    /// Create an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a channel to a source, replacing any previous binding.
    #[must_use]
    pub fn bind(mut self, channel: Channel, source: impl Into<ChannelSource>) -> Self {
        self.bindings.insert(channel, source.into());
        self
    }

    /// Bind horizontal position.
    #[must_use]
    pub fn x(self, source: impl Into<ChannelSource>) -> Self {
        self.bind(Channel::X, source)
    }

    /// Bind vertical position.
    #[must_use]
    pub fn y(self, source: impl Into<ChannelSource>) -> Self {
        self.bind(Channel::Y, source)
    }

    /// Bind outline color.
    #[must_use]
    pub fn stroke(self, source: impl Into<ChannelSource>) -> Self {
        self.bind(Channel::Stroke, source)
    }

    /// Bind fill color.
    #[must_use]
    pub fn fill(self, source: impl Into<ChannelSource>) -> Self {
        self.bind(Channel::Fill, source)
    }

    /// Source bound to a channel.
    #[must_use]
    pub fn get(&self, channel: Channel) -> Option<&ChannelSource> {
        self.bindings.get(&channel)
    }

    /// Iterate over bindings in channel order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &ChannelSource)> {
        self.bindings.iter().map(|(c, s)| (*c, s))
    }

    /// Number of bound channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check for no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Merge another set of bindings, with other taking precedence.
    #[must_use]
    pub fn merge(&self, other: &Channels) -> Channels {
        let mut bindings = self.bindings.clone();
        bindings.extend(other.bindings.iter().map(|(c, s)| (*c, s.clone())));
        Channels { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TabularDataset;

    #[test]
    fn test_channels_builder() {
        let channels = Channels::new().x("Date").y("Anomaly").stroke("Anomaly");

        assert_eq!(channels.len(), 3);
        assert_eq!(channels.get(Channel::Y), Some(&ChannelSource::Field("Anomaly".into())));
        assert!(channels.get(Channel::Fill).is_none());
    }

    #[test]
    fn test_channels_column_source() {
        let data = TabularDataset::builder().column("age", [35i64, 25, 45]).build().unwrap();
        let channels = Channels::new().y(data.column("age").unwrap());

        match channels.get(Channel::Y) {
            Some(ChannelSource::Column(c)) => assert_eq!(c.name(), "age"),
            other => panic!("Expected column source, got {other:?}"),
        }
    }

    #[test]
    fn test_channels_literal_source() {
        let channels = Channels::new().y(vec![Value::Float(0.0)]);
        assert_eq!(
            channels.get(Channel::Y),
            Some(&ChannelSource::Literal(vec![Value::Float(0.0)]))
        );
    }

    #[test]
    fn test_channels_rebind_replaces() {
        let channels = Channels::new().x("a").x("b");
        assert_eq!(channels.len(), 1);
        assert_eq!(channels.get(Channel::X), Some(&ChannelSource::Field("b".into())));
    }

    #[test]
    fn test_channels_merge() {
        let base = Channels::new().x("x").y("y");
        let other = Channels::new().y("y2").stroke("c");

        let merged = base.merge(&other);
        assert_eq!(merged.get(Channel::X), Some(&ChannelSource::Field("x".into())));
        assert_eq!(merged.get(Channel::Y), Some(&ChannelSource::Field("y2".into())));
        assert_eq!(merged.get(Channel::Stroke), Some(&ChannelSource::Field("c".into())));
    }

    #[test]
    fn test_channels_iter_order() {
        let channels = Channels::new().stroke("s").y("y").x("x");
        let order: Vec<Channel> = channels.iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec![Channel::X, Channel::Y, Channel::Stroke]);
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Stroke.to_string(), "stroke");
        assert_eq!(Channel::X.name(), "x");
    }
}
