//! Values with first-order (linear) uncertainty propagation.
//!
//! A [`Measurement`] is a nominal value plus its sensitivity to a set of named,
//! mutually independent uncertainty sources. Each term stores
//! `∂f/∂x_k · σ_k` for source `k`, so:
//!
//! ```text
//! σ_f² = Σ_k (∂f/∂x_k · σ_k)²
//! ```
//!
//! Arithmetic follows the usual first-order rules:
//!
//! - sum/difference: terms add/subtract
//! - product `xy`:   `y·dx + x·dy`
//! - quotient `x/y`: `dx/y − x·dy/y²`
//!
//! Because terms are keyed by source, a quantity that enters an expression
//! twice stays fully correlated with itself, while distinct sources combine in
//! quadrature.

use std::ops::{Add, Div, Mul, Neg, Sub};

/// Name of an independent uncertainty source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub &'static str);

#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    nominal: f64,
    terms: Vec<(SourceId, f64)>,
}

impl Measurement {
    /// A value with no uncertainty.
    pub fn exact(nominal: f64) -> Self {
        Self {
            nominal,
            terms: Vec::new(),
        }
    }

    /// A value carrying one independent source with standard deviation `sigma`.
    pub fn with_source(nominal: f64, sigma: f64, source: SourceId) -> Self {
        let terms = if sigma != 0.0 { vec![(source, sigma)] } else { Vec::new() };
        Self { nominal, terms }
    }

    /// Relative counting factor `1 ± sqrt(n)/n` of an observed count `n > 0`.
    ///
    /// Callers handle `n == 0` themselves; the factor is undefined there.
    pub fn relative_counting(count: f64, source: SourceId) -> Self {
        Self::with_source(1.0, count.sqrt() / count, source)
    }

    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    pub fn std_dev(&self) -> f64 {
        // Scale by the largest term so squares of large yields do not overflow.
        let scale = self.terms.iter().map(|(_, t)| t.abs()).fold(0.0_f64, f64::max);
        if scale == 0.0 || !scale.is_finite() {
            return scale;
        }
        scale * self.terms.iter().map(|(_, t)| (t / scale).powi(2)).sum::<f64>().sqrt()
    }

    /// Contribution of one source to the standard deviation (signed).
    pub fn term(&self, source: SourceId) -> f64 {
        self.terms
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, t)| *t)
            .unwrap_or(0.0)
    }

    /// Linear combination `a·self + b·other` of the source terms, with a new nominal.
    fn combine(&self, a: f64, other: &Measurement, b: f64, nominal: f64) -> Measurement {
        let mut terms: Vec<(SourceId, f64)> = self.terms.iter().map(|&(s, t)| (s, a * t)).collect();
        for &(source, t) in &other.terms {
            match terms.iter_mut().find(|(s, _)| *s == source) {
                Some((_, existing)) => *existing += b * t,
                None => terms.push((source, b * t)),
            }
        }
        Measurement { nominal, terms }
    }

    fn scale(&self, k: f64) -> Measurement {
        Measurement {
            nominal: self.nominal * k,
            terms: self.terms.iter().map(|&(s, t)| (s, k * t)).collect(),
        }
    }
}

impl Add for Measurement {
    type Output = Measurement;

    fn add(self, rhs: Measurement) -> Measurement {
        self.combine(1.0, &rhs, 1.0, self.nominal + rhs.nominal)
    }
}

impl Sub for Measurement {
    type Output = Measurement;

    fn sub(self, rhs: Measurement) -> Measurement {
        self.combine(1.0, &rhs, -1.0, self.nominal - rhs.nominal)
    }
}

impl Mul for Measurement {
    type Output = Measurement;

    fn mul(self, rhs: Measurement) -> Measurement {
        self.combine(rhs.nominal, &rhs, self.nominal, self.nominal * rhs.nominal)
    }
}

impl Div for Measurement {
    type Output = Measurement;

    fn div(self, rhs: Measurement) -> Measurement {
        let y = rhs.nominal;
        self.combine(1.0 / y, &rhs, -self.nominal / (y * y), self.nominal / y)
    }
}

impl Neg for Measurement {
    type Output = Measurement;

    fn neg(self) -> Measurement {
        self.scale(-1.0)
    }
}

impl Mul<f64> for Measurement {
    type Output = Measurement;

    fn mul(self, rhs: f64) -> Measurement {
        self.scale(rhs)
    }
}

impl Mul<Measurement> for f64 {
    type Output = Measurement;

    fn mul(self, rhs: Measurement) -> Measurement {
        rhs.scale(self)
    }
}

impl Sub<Measurement> for f64 {
    type Output = Measurement;

    fn sub(self, rhs: Measurement) -> Measurement {
        Measurement::exact(self) - rhs
    }
}
