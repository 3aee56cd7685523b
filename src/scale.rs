//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use std::str::FromStr;

use chrono::Datelike;

use crate::color::Rgba;
use crate::data::{date_from_days, days_from_date};
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max or a bound is not finite.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(Error::ScaleDomain("Domain bounds must be finite".to_string()));
        }
        if (domain.0 - domain.1).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Extend the domain outward to round tick values.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (mut lo, mut hi) = (self.domain_min, self.domain_max);
        let reversed = hi < lo;
        if reversed {
            std::mem::swap(&mut lo, &mut hi);
        }

        let mut prev = 0.0;
        for _ in 0..10 {
            let step = tick_increment(lo, hi, count);
            if (step - prev).abs() <= f64::EPSILON * step {
                break;
            }
            lo = (lo / step).floor() * step;
            hi = (hi / step).ceil() * step;
            prev = step;
        }

        let (domain_min, domain_max) = if reversed { (hi, lo) } else { (lo, hi) };
        Self { domain_min, domain_max, ..self }
    }

    /// Round tick values covering the domain, about `count` of them.
    #[must_use]
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let lo = self.domain_min.min(self.domain_max);
        let hi = self.domain_min.max(self.domain_max);
        let step = tick_increment(lo, hi, count);

        // Steps below one are applied as divisions so that 0.1 * 3 lands on 0.3.
        if step < 1.0 {
            let inv = (1.0 / step).round();
            let first = (lo * inv).ceil() as i64;
            let last = (hi * inv).floor() as i64;
            (first..=last).map(|i| i as f64 / inv).collect()
        } else {
            let first = (lo / step).ceil() as i64;
            let last = (hi / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        }
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// Step between round ticks: 1, 2 or 5 times a power of ten.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if span <= 0.0 || !span.is_finite() {
        return 1.0;
    }

    let step = span / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    factor * 10f64.powf(power)
}

/// Tick positions (days since the epoch) on January 1st of round years.
#[must_use]
pub fn year_ticks(domain: (f64, f64), count: usize) -> Vec<f64> {
    const STEPS: [i32; 11] = [1, 2, 5, 10, 20, 25, 50, 100, 200, 500, 1000];

    let lo = domain.0.min(domain.1).ceil() as i32;
    let hi = domain.0.max(domain.1).floor() as i32;
    let (Some(first), Some(last)) = (date_from_days(lo), date_from_days(hi)) else {
        return Vec::new();
    };

    let span = last.year() - first.year();
    let step =
        STEPS.iter().copied().find(|s| span / s <= count.max(1) as i32).unwrap_or(STEPS[10]);

    let start = first.year().div_euclid(step) * step;
    (0..)
        .map(|i| start + i * step)
        .take_while(|year| *year <= last.year())
        .filter_map(|year| chrono::NaiveDate::from_ymd_opt(year, 1, 1))
        .map(days_from_date)
        .filter(|days| *days >= lo && *days <= hi)
        .map(f64::from)
        .collect()
}

/// Band scale for categorical positions (bar charts).
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    /// Create a band scale with 0.1 padding, centered in the range.
    #[must_use]
    pub fn new(domain: Vec<String>, range: (f64, f64)) -> Self {
        Self { domain, range, padding_inner: 0.1, padding_outer: 0.1, align: 0.5 }
    }

    /// Categories in band order.
    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        (self.range.1 - self.range.0) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0)
    }

    /// Width of each band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start position of the band for `key`, or None if unknown.
    #[must_use]
    pub fn scale(&self, key: &str) -> Option<f64> {
        let index = self.domain.iter().position(|k| k == key)?;
        let n = self.domain.len() as f64;
        let step = self.step();
        let start =
            self.range.0
                + (self.range.1 - self.range.0 - step * (n - self.padding_inner)) * self.align;
        Some(start + step * index as f64)
    }
}

/// Named color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    /// Diverging blue (low) to red (high).
    BuRd,
    /// Diverging red (low) to blue (high).
    RdBu,
    /// Sequential blues.
    Blues,
    /// Sequential reds.
    Reds,
    /// Sequential greys.
    Greys,
    /// Viridis (perceptually uniform).
    Viridis,
    /// Magma (perceptually uniform).
    Magma,
    /// Ten categorical colors.
    Tableau10,
}

impl ColorScheme {
    /// Color stops of the scheme, low end first.
    #[must_use]
    pub fn colors(self) -> Vec<Rgba> {
        match self {
            ColorScheme::RdBu => vec![
                Rgba::rgb(178, 24, 43),
                Rgba::rgb(239, 138, 98),
                Rgba::rgb(247, 247, 247),
                Rgba::rgb(103, 169, 207),
                Rgba::rgb(33, 102, 172),
            ],
            ColorScheme::BuRd => {
                let mut colors = ColorScheme::RdBu.colors();
                colors.reverse();
                colors
            }
            ColorScheme::Blues => vec![
                Rgba::rgb(247, 251, 255),
                Rgba::rgb(198, 219, 239),
                Rgba::rgb(107, 174, 214),
                Rgba::rgb(33, 113, 181),
                Rgba::rgb(8, 48, 107),
            ],
            ColorScheme::Reds => vec![
                Rgba::hex(0xfee5d9),
                Rgba::hex(0xfcae91),
                Rgba::hex(0xfb6a4a),
                Rgba::hex(0xde2d26),
                Rgba::hex(0xa50f15),
            ],
            ColorScheme::Greys => vec![Rgba::hex(0xf7f7f7), Rgba::hex(0x252525)],
            ColorScheme::Viridis => vec![
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
            ColorScheme::Magma => vec![
                Rgba::rgb(0, 0, 4),
                Rgba::rgb(81, 18, 124),
                Rgba::rgb(183, 55, 121),
                Rgba::rgb(252, 137, 97),
                Rgba::rgb(252, 253, 191),
            ],
            ColorScheme::Tableau10 => vec![
                Rgba::hex(0x4e79a7),
                Rgba::hex(0xf28e2c),
                Rgba::hex(0xe15759),
                Rgba::hex(0x76b7b2),
                Rgba::hex(0x59a14f),
                Rgba::hex(0xedc949),
                Rgba::hex(0xaf7aa1),
                Rgba::hex(0xff9da7),
                Rgba::hex(0x9c755f),
                Rgba::hex(0xbab0ab),
            ],
        }
    }

    /// Whether the scheme diverges around a midpoint.
    #[must_use]
    pub fn is_diverging(self) -> bool {
        matches!(self, ColorScheme::BuRd | ColorScheme::RdBu)
    }

    /// Whether the scheme is a categorical palette.
    #[must_use]
    pub fn is_categorical(self) -> bool {
        matches!(self, ColorScheme::Tableau10)
    }
}

impl FromStr for ColorScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "burd" => Ok(ColorScheme::BuRd),
            "rdbu" => Ok(ColorScheme::RdBu),
            "blues" => Ok(ColorScheme::Blues),
            "reds" => Ok(ColorScheme::Reds),
            "greys" | "grays" => Ok(ColorScheme::Greys),
            "viridis" => Ok(ColorScheme::Viridis),
            "magma" => Ok(ColorScheme::Magma),
            "tableau10" => Ok(ColorScheme::Tableau10),
            _ => Err(Error::UnknownScheme(s.to_string())),
        }
    }
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f64,
    domain_max: f64,
}

impl ColorScale {
    /// Create a new color scale interpolating `colors` across `domain`.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or domain is invalid.
    pub fn new(colors: Vec<Rgba>, domain: (f64, f64)) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }

        if (domain.0 - domain.1).abs() < f64::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self { colors, domain_min: domain.0, domain_max: domain.1 })
    }

    /// Create a diverging scale whose midpoint color sits on `pivot`.
    ///
    /// The domain is made symmetric around the pivot so that equal distances
    /// above and below it get equally saturated colors.
    ///
    /// # Errors
    ///
    /// Returns an error if colors is empty or every value equals the pivot.
    pub fn diverging(colors: Vec<Rgba>, extent: (f64, f64), pivot: f64) -> Result<Self> {
        let reach = (extent.0 - pivot).abs().max((extent.1 - pivot).abs());
        Self::new(colors, (pivot - reach, pivot + reach))
    }

    /// Create a scale for a named scheme over the extent of the data.
    ///
    /// Diverging schemes pivot on zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the extent is degenerate.
    pub fn from_scheme(scheme: ColorScheme, extent: (f64, f64)) -> Result<Self> {
        if scheme.is_diverging() {
            Self::diverging(scheme.colors(), extent, 0.0)
        } else {
            Self::new(scheme.colors(), extent)
        }
    }
}

impl Scale<f64, Rgba> for ColorScale {
    fn scale(&self, value: f64) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f64).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f64 - segment as f64;

        self.colors[segment].lerp(self.colors[segment + 1], local_t as f32)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}
