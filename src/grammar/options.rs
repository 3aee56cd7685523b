//! Axis and color options.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::scale::ColorScheme;

/// Minus sign used for negative numbers (U+2212).
pub const MINUS: char = '\u{2212}';

/// Sign policy of a [`TickFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignMode {
    /// Minus for negative numbers, nothing otherwise.
    #[default]
    Minus,
    /// Minus for negative numbers, plus otherwise.
    Plus,
    /// Minus for negative numbers, a space otherwise.
    Space,
}

/// Notation of a [`TickFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatType {
    /// Shortest decimal representation.
    #[default]
    Default,
    /// Fixed point (`f`).
    Fixed,
    /// Rounded integer (`d`).
    Integer,
    /// Multiplied by 100 with a percent sign (`%`).
    Percent,
}

/// Number format for axis tick labels.
///
/// Parsed from strings of the form `[sign][.precision][type]`, where sign is
/// one of `-`, `+` or a space and type is `f`, `d`, `%` or absent.
///
/// ```rust
/// use tableplot::grammar::TickFormat;
///
/// let format = TickFormat::parse("+f").unwrap();
/// assert_eq!(format.format(0.5), "+0.5");
/// assert_eq!(format.format(-0.5), "\u{2212}0.5");
/// assert_eq!(format.format(0.0), "+0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickFormat {
    sign: SignMode,
    precision: Option<usize>,
    kind: FormatType,
}

impl TickFormat {
    /// Parse a format string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] if the string does not match
    /// `[sign][.precision][type]`.
    pub fn parse(pattern: &str) -> Result<Self> {
        let invalid = || Error::InvalidFormat(pattern.to_string());

        let (sign, mut rest) = if let Some(rest) = pattern.strip_prefix('+') {
            (SignMode::Plus, rest)
        } else if let Some(rest) = pattern.strip_prefix(' ') {
            (SignMode::Space, rest)
        } else {
            (SignMode::Minus, pattern.strip_prefix('-').unwrap_or(pattern))
        };

        let mut precision = None;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let digits = after_dot.chars().take_while(char::is_ascii_digit).count();
            if digits == 0 {
                return Err(invalid());
            }
            precision = Some(after_dot[..digits].parse().map_err(|_| invalid())?);
            rest = &after_dot[digits..];
        }

        let kind = match rest {
            "" => FormatType::Default,
            "f" => FormatType::Fixed,
            "d" => FormatType::Integer,
            "%" => FormatType::Percent,
            _ => return Err(invalid()),
        };

        Ok(Self { sign, precision, kind })
    }

    /// Sign policy.
    #[must_use]
    pub fn sign(&self) -> SignMode {
        self.sign
    }

    /// Explicit precision, if any.
    #[must_use]
    pub fn precision(&self) -> Option<usize> {
        self.precision
    }

    /// Notation.
    #[must_use]
    pub fn kind(&self) -> FormatType {
        self.kind
    }

    /// Format a number.
    ///
    /// Without an explicit precision, fixed and default notation print the
    /// shortest decimal form.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        self.format_precision(value, self.precision)
    }

    /// Format a tick value, taking the precision from the tick step when
    /// the format has none.
    #[must_use]
    pub fn format_with_step(&self, value: f64, step: f64) -> String {
        let precision = self.precision.or_else(|| match self.kind {
            FormatType::Fixed | FormatType::Default => Some(precision_fixed(step)),
            FormatType::Percent => Some(precision_fixed(step * 100.0)),
            FormatType::Integer => None,
        });
        self.format_precision(value, precision)
    }

    fn format_precision(&self, value: f64, precision: Option<usize>) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }

        let (magnitude, suffix) = match self.kind {
            FormatType::Percent => (value.abs() * 100.0, "%"),
            _ => (value.abs(), ""),
        };

        let digits = match (self.kind, precision) {
            (FormatType::Integer, _) => format!("{}", magnitude.round()),
            (_, Some(p)) => format!("{magnitude:.p$}"),
            (_, None) => shortest(magnitude),
        };

        // A value that rounds to zero takes the positive sign.
        let is_zero = digits.chars().all(|c| c == '0' || c == '.');
        let sign = if value.is_sign_negative() && !is_zero {
            MINUS.to_string()
        } else {
            match self.sign {
                SignMode::Minus => String::new(),
                SignMode::Plus => "+".to_string(),
                SignMode::Space => " ".to_string(),
            }
        };

        format!("{sign}{digits}{suffix}")
    }
}

impl FromStr for TickFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TickFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign {
            SignMode::Minus => {}
            SignMode::Plus => f.write_str("+")?,
            SignMode::Space => f.write_str(" ")?,
        }
        if let Some(p) = self.precision {
            write!(f, ".{p}")?;
        }
        match self.kind {
            FormatType::Default => Ok(()),
            FormatType::Fixed => f.write_str("f"),
            FormatType::Integer => f.write_str("d"),
            FormatType::Percent => f.write_str("%"),
        }
    }
}

/// Decimal places needed to tell apart multiples of `step`.
#[must_use]
pub fn precision_fixed(step: f64) -> usize {
    let step = step.abs();
    if step == 0.0 || !step.is_finite() {
        return 0;
    }
    // Exponent of the step in scientific notation, e.g. -1 for 5e-1.
    let exponent = format!("{step:e}")
        .split_once('e')
        .and_then(|(_, exp)| exp.parse::<i32>().ok())
        .unwrap_or(0);
    usize::try_from(-exponent).unwrap_or(0)
}

/// Shortest decimal form, rounded to 12 places to hide binary noise.
fn shortest(value: f64) -> String {
    if !value.is_finite() {
        return "Infinity".to_string();
    }
    let fixed = format!("{value:.12}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Options for one position axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisOptions {
    /// Axis label.
    pub label: Option<String>,
    /// Tick label format.
    pub tick_format: Option<TickFormat>,
    /// Draw gridlines at each tick.
    pub grid: bool,
    /// Extend the domain to round tick values.
    pub nice: bool,
}

impl AxisOptions {
    /// Create default axis options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the axis label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the tick format.
    #[must_use]
    pub fn tick_format(mut self, format: TickFormat) -> Self {
        self.tick_format = Some(format);
        self
    }

    /// Toggle gridlines.
    #[must_use]
    pub fn grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Toggle domain rounding.
    #[must_use]
    pub fn nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }
}

/// Options for the color scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorOptions {
    /// Named scheme; sequential or categorical default when unset.
    pub scheme: Option<ColorScheme>,
}

impl ColorOptions {
    /// Create default color options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color scheme.
    #[must_use]
    pub fn scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }
}
