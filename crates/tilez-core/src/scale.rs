//! Linear mapping from a domain interval onto a range interval.

use crate::errors::ScaleError;

/// Maps `[x1, x2]` linearly onto `[y1, y2]`.
///
/// Either interval may be reversed. The domain must not be empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            domain: [0.0, 1.0],
            range: [0.0, 1.0],
        }
    }
}

impl LinearScale {
    /// Create a scale, rejecting an empty domain.
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Result<Self, ScaleError> {
        validate_domain(domain)?;
        Ok(Self { domain, range })
    }

    /// Replace the domain.
    pub fn with_domain(mut self, domain: [f64; 2]) -> Result<Self, ScaleError> {
        validate_domain(domain)?;
        self.domain = domain;
        Ok(self)
    }

    /// Replace the range.
    pub fn with_range(mut self, range: [f64; 2]) -> Self {
        self.range = range;
        self
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Map a domain value into the range. Values outside the domain extrapolate.
    pub fn call(&self, x: f64) -> f64 {
        let [x1, x2] = self.domain;
        let [y1, y2] = self.range;

        (y1 * (x2 - x) + y2 * (x - x1)) / (x2 - x1)
    }
}

fn validate_domain([start, end]: [f64; 2]) -> Result<(), ScaleError> {
    if start == end {
        return Err(ScaleError::EmptyDomain { start, end });
    }
    Ok(())
}
