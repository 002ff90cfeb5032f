//! Parsing of raw width/height/padding values.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::errors::PropsError;

/// A width or height as declared by a tile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "unit", content = "value", rename_all = "lowercase"))]
pub enum Dimension {
    /// No declared size; shares leftover space with other auto tiles
    #[default]
    Unset,
    /// Pixels
    Absolute(f64),
    /// Fraction of the available space (1.0 = 100%)
    Percentage(f64),
}

/// Unit of a [`Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DimensionUnit {
    Unset,
    Percentage,
    Absolute,
}

/// A dimension value as written by the user: a number or a string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum RawDimension {
    Number(f64),
    Text(String),
}

impl From<f64> for RawDimension {
    fn from(value: f64) -> Self {
        RawDimension::Number(value)
    }
}

impl From<i32> for RawDimension {
    fn from(value: i32) -> Self {
        RawDimension::Number(value as f64)
    }
}

impl From<&str> for RawDimension {
    fn from(value: &str) -> Self {
        RawDimension::Text(value.to_string())
    }
}

impl From<String> for RawDimension {
    fn from(value: String) -> Self {
        RawDimension::Text(value)
    }
}

impl fmt::Display for RawDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDimension::Number(n) => write!(f, "{n}"),
            RawDimension::Text(s) => f.write_str(s),
        }
    }
}

impl Dimension {
    /// Parse a raw dimension.
    ///
    /// Numbers in `(0, 1)` and strings containing a `.` are fractions, a
    /// trailing `%` is a percentage, a trailing `px` or any other number is
    /// absolute. Zero is absolute unless written with `%`.
    pub fn parse(raw: &RawDimension) -> Result<Self, PropsError> {
        match raw {
            RawDimension::Number(n) => Self::from_number(*n, raw),
            RawDimension::Text(s) => s.parse(),
        }
    }

    fn from_number(n: f64, raw: &RawDimension) -> Result<Self, PropsError> {
        if !n.is_finite() || n < 0.0 {
            return Err(PropsError::InvalidDimension {
                value: raw.to_string(),
            });
        }
        if n > 0.0 && n < 1.0 {
            Ok(Dimension::Percentage(n))
        } else {
            Ok(Dimension::Absolute(n))
        }
    }

    pub fn unit(&self) -> DimensionUnit {
        match self {
            Dimension::Unset => DimensionUnit::Unset,
            Dimension::Absolute(_) => DimensionUnit::Absolute,
            Dimension::Percentage(_) => DimensionUnit::Percentage,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Dimension::Unset => None,
            Dimension::Absolute(v) | Dimension::Percentage(v) => Some(*v),
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, Dimension::Absolute(_))
    }

    pub fn is_percentage(&self) -> bool {
        matches!(self, Dimension::Percentage(_))
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Dimension::Unset)
    }

    /// Size in pixels, if absolute.
    pub fn size(&self) -> Option<f64> {
        match self {
            Dimension::Absolute(v) => Some(*v),
            _ => None,
        }
    }

    /// Size relative to `full`, if a percentage.
    pub fn rel_size(&self, full: f64) -> Option<f64> {
        match self {
            Dimension::Percentage(p) => Some(p * full),
            _ => None,
        }
    }

    /// Compare by unit only (absolute > percentage > unset).
    pub fn compare_unit(&self, other: &Dimension) -> Ordering {
        self.unit().cmp(&other.unit())
    }
}

impl FromStr for Dimension {
    type Err = PropsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PropsError::InvalidDimension {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        let number = |text: &str| -> Result<f64, PropsError> {
            let n: f64 = text.trim().parse().map_err(|_| invalid())?;
            if !n.is_finite() || n < 0.0 {
                return Err(invalid());
            }
            Ok(n)
        };

        if let Some(pct) = trimmed.strip_suffix('%') {
            return Ok(Dimension::Percentage(number(pct)? / 100.0));
        }
        if let Some(px) = trimmed.strip_suffix("px") {
            return Ok(Dimension::Absolute(number(px)?));
        }

        let n = number(trimmed)?;
        if n == 0.0 {
            Ok(Dimension::Absolute(0.0))
        } else if trimmed.contains('.') || n < 1.0 {
            Ok(Dimension::Percentage(n))
        } else {
            Ok(Dimension::Absolute(n))
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Unset => f.write_str("auto"),
            Dimension::Absolute(v) => write!(f, "{v}px"),
            Dimension::Percentage(p) => write!(f, "{}%", p * 100.0),
        }
    }
}

/// Parse a padding value (pixels only).
pub fn parse_padding(raw: &RawDimension) -> Result<f64, PropsError> {
    let invalid = || PropsError::InvalidPadding {
        value: raw.to_string(),
    };
    let value = match raw {
        RawDimension::Number(n) => *n,
        RawDimension::Text(s) => {
            let s = s.trim();
            let s = s.strip_suffix("px").unwrap_or(s);
            s.trim().parse::<f64>().map_err(|_| invalid())?
        }
    };
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}
