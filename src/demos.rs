//! Ready-made plots.
//!
//! Two entry points that build a dataset and render it:
//!
//! - [`table_to_bar_chart`]: literal columns to a bar chart of ages by name.
//! - [`csv_to_anomaly_dot`]: the GISTEMP temperature anomaly CSV to a dot
//!   chart with a zero rule, signed ticks, gridlines and a diverging
//!   blue-red stroke.
//!
//! Both are independent and hold no shared state.

use tracing::debug;

use crate::config::PlotConfig;
use crate::data::{load_csv, TabularDataset};
use crate::error::Result;
use crate::grammar::{
    AxisOptions, Channels, ColorOptions, Mark, Plot, PlotSpec, RenderedPlot, TickFormat,
};
use crate::scale::ColorScheme;

/// Default location of the temperature anomaly CSV.
pub const GISTEMP_CSV: &str = "data/gistemp.csv";

/// Y axis label of the anomaly chart.
pub const ANOMALY_LABEL: &str = "Temperature anomaly (°C)";

/// The three-row people table: `id`, `name` and `age`.
///
/// # Errors
///
/// Only fails if the literal columns disagree in length.
pub fn people_table() -> Result<TabularDataset> {
    TabularDataset::builder()
        .column("id", [1i64, 2, 3])
        .column("name", ["Alice", "Bob", "Charlie"])
        .column("age", [35i64, 25, 45])
        .build()
}

/// Bar chart of age by name, one bar per table row.
///
/// # Errors
///
/// Returns an error if the table cannot be built.
pub fn table_to_bar_chart_spec() -> Result<PlotSpec> {
    let table = people_table()?;
    let channels = Channels::new().x(table.column("name")?).y(table.column("age")?);
    Mark::bar_y(&table, channels).plot().build()
}

/// Render the people bar chart.
///
/// Runs to completion without suspending.
///
/// # Errors
///
/// Returns an error if the table cannot be built.
#[allow(clippy::unused_async)]
pub async fn table_to_bar_chart() -> Result<RenderedPlot> {
    table_to_bar_chart_spec()?.render()
}

/// Anomaly dot chart over any dataset with `Date` and `Anomaly` columns.
///
/// # Errors
///
/// Returns [`Error::ColumnNotFound`](crate::Error::ColumnNotFound) if a
/// column is missing.
pub fn anomaly_spec(data: &TabularDataset, config: &PlotConfig) -> Result<PlotSpec> {
    let dots = Mark::dot(data, Channels::new().x("Date").y("Anomaly").stroke("Anomaly"))
        .r(config.dot_radius);

    Plot::new()
        .y(AxisOptions::new().label(ANOMALY_LABEL).tick_format(TickFormat::parse("+f")?).grid(true))
        .color(ColorOptions::new().scheme(ColorScheme::BuRd))
        .mark(Mark::rule_y([0.0]))
        .mark(dots)
        .config(config)
        .build()
}

/// Load `data/gistemp.csv` and render the anomaly chart.
///
/// # Errors
///
/// Read and parse failures propagate unchanged as
/// [`Error::Io`](crate::Error::Io) or [`Error::Arrow`](crate::Error::Arrow).
pub async fn csv_to_anomaly_dot() -> Result<RenderedPlot> {
    csv_to_anomaly_dot_with(&PlotConfig::default()).await
}

/// Like [`csv_to_anomaly_dot`], reading the CSV from the configured data
/// directory and sizing the plot from the configuration.
///
/// # Errors
///
/// Same as [`csv_to_anomaly_dot`].
pub async fn csv_to_anomaly_dot_with(config: &PlotConfig) -> Result<RenderedPlot> {
    let path = config.gistemp_path();
    let data = load_csv(&path).await?;
    debug!(path = %path.display(), rows = data.num_rows(), "rendering anomaly chart");
    anomaly_spec(&data, config)?.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use crate::grammar::{Channel, MarkKind};

    #[test]
    fn test_people_table() {
        let table = people_table().unwrap();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.column_names(), vec!["id", "name", "age"]);
    }

    #[test]
    fn test_bar_chart_spec() {
        let spec = table_to_bar_chart_spec().unwrap();
        assert_eq!(spec.marks().len(), 1);

        let bar = &spec.marks()[0];
        assert!(matches!(bar.kind(), MarkKind::BarY { .. }));
        assert_eq!(bar.len(), 3);
        assert_eq!(
            bar.resolve(Channel::X).unwrap().unwrap(),
            vec![Value::from("Alice"), Value::from("Bob"), Value::from("Charlie")]
        );
        assert_eq!(
            bar.resolve(Channel::Y).unwrap().unwrap(),
            vec![Value::Int(35), Value::Int(25), Value::Int(45)]
        );
    }

    #[test]
    fn test_anomaly_spec_options() {
        let data = crate::data::read_csv(b"Date,Anomaly\n1900-01-01,-0.1\n").unwrap();
        let spec = anomaly_spec(&data, &PlotConfig::default()).unwrap();

        assert_eq!(spec.y().label.as_deref(), Some(ANOMALY_LABEL));
        assert_eq!(spec.y().tick_format.map(|f| f.to_string()), Some("+f".to_string()));
        assert!(spec.y().grid);
        assert_eq!(spec.color().scheme, Some(ColorScheme::BuRd));

        let kinds: Vec<&str> = spec.marks().iter().map(|m| m.kind().name()).collect();
        assert_eq!(kinds, vec!["rule", "dot"]);
    }

    #[test]
    fn test_anomaly_spec_missing_column() {
        let data = crate::data::read_csv(b"Year,Value\n1900,0.1\n").unwrap();
        assert!(anomaly_spec(&data, &PlotConfig::default()).is_err());
    }

    #[test]
    fn test_anomaly_spec_dot_radius() {
        let data = crate::data::read_csv(b"Date,Anomaly\n1900-01-01,-0.1\n").unwrap();
        let config = PlotConfig { dot_radius: 2.0, ..PlotConfig::default() };
        let spec = anomaly_spec(&data, &config).unwrap();
        assert!(matches!(
            spec.marks()[1].kind(),
            MarkKind::Dot { r, .. } if (*r - 2.0).abs() < f32::EPSILON
        ));
    }

    #[tokio::test]
    async fn test_table_to_bar_chart() {
        let plot = table_to_bar_chart().await.unwrap();
        assert_eq!(plot.group("bar").map(<[_]>::len), Some(3));
    }
}
