//! Render both ready-made plots to SVG files.
//!
//! Run: cargo run --example render_demos
//!
//! Writes `bar_chart.svg` and `anomaly_dot.svg` to the current directory.
//! Set `RUST_LOG=tableplot=debug` to see dataset and render events.

use tableplot::demos::{csv_to_anomaly_dot, table_to_bar_chart};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> tableplot::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bars = table_to_bar_chart().await?;
    bars.write_svg("bar_chart.svg")?;
    println!("bar_chart.svg: {} elements", bars.element_count());

    let dots = csv_to_anomaly_dot().await?;
    dots.write_svg("anomaly_dot.svg")?;
    println!("anomaly_dot.svg: {} elements", dots.element_count());

    Ok(())
}
