//! Validated value sequences and seeded input generation.
//!
//! Every engine reads its values from a [`Sequence`]. Validation happens once,
//! here, so that no engine can start emitting steps over input it would later
//! have to reject.

use std::ops::Index;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::{Error, Result};

/// An ordered list of finite values, the subject of sorting.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct Sequence(Vec<f64>);

impl Sequence {
    /// Validate and wrap a list of values.
    ///
    /// Fails with [`Error::InvalidInput`] on the first NaN or infinite value.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            let value = values[position];
            warn!(position, %value, "rejecting non-finite input");
            return Err(Error::InvalidInput {
                position,
                value: value.to_string(),
            });
        }
        Ok(Self(values))
    }

    /// Build a sequence from integers, which are always finite.
    pub fn from_integers<I: IntoIterator<Item = i64>>(values: I) -> Self {
        Self(values.into_iter().map(|v| v as f64).collect())
    }

    /// Draw `config.size` integers in `[config.min, config.max)` from a
    /// generator seeded with `config.seed`.
    pub fn random(config: &InputConfig) -> Result<Self> {
        if config.min >= config.max {
            return Err(Error::InvalidConfig(format!(
                "empty value range {}..{}",
                config.min, config.max
            )));
        }
        let mut rng = StdRng::seed_from_u64(config.seed);
        let values = (0..config.size)
            .map(|_| rng.gen_range(config.min..config.max))
            .collect::<Vec<_>>();
        debug!(size = config.size, seed = config.seed, "generated random input");
        Ok(Self::from_integers(values))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// First position whose value is smaller than its predecessor.
    pub fn first_descent(&self) -> Option<usize> {
        self.0.windows(2).position(|w| w[0] > w[1]).map(|p| p + 1)
    }

    /// Whether the values are already non-decreasing.
    pub fn is_sorted(&self) -> bool {
        self.first_descent().is_none()
    }
}

impl Index<usize> for Sequence {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl TryFrom<Vec<f64>> for Sequence {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl From<Sequence> for Vec<f64> {
    fn from(sequence: Sequence) -> Self {
        sequence.0
    }
}

/// Parses comma and/or whitespace separated numbers, e.g. `"5, 3, 8"`.
impl FromStr for Sequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .enumerate()
            .map(|(position, part)| {
                part.parse::<f64>().map_err(|_| Error::InvalidInput {
                    position,
                    value: part.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(values)
    }
}

/// Configuration for seeded random input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputConfig {
    /// Number of values to draw
    pub size: usize,
    /// Seed for deterministic generation
    pub seed: u64,
    /// Smallest value (inclusive)
    pub min: i64,
    /// Upper bound (exclusive)
    pub max: i64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            size: 8,
            seed: 42,
            min: 1,
            max: 70,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nan_and_infinity() {
        let err = Sequence::new(vec![1.0, f64::NAN, 3.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { position: 1, .. }));

        let err = Sequence::new(vec![f64::NEG_INFINITY]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { position: 0, .. }));
    }

    #[test]
    fn parses_mixed_separators() {
        let seq: Sequence = "5, 3 8,1".parse().unwrap();
        assert_eq!(seq.values(), &[5.0, 3.0, 8.0, 1.0]);
    }

    #[test]
    fn parse_rejects_non_numeric() {
        let err = "4, x, 2".parse::<Sequence>().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInput {
                position: 1,
                value: "x".to_string()
            }
        );
    }

    #[test]
    fn sortedness() {
        assert!(Sequence::from_integers([1, 2, 2, 5]).is_sorted());
        assert!(Sequence::default().is_sorted());
        assert_eq!(Sequence::from_integers([1, 3, 2]).first_descent(), Some(2));
    }

    #[test]
    fn random_is_deterministic() {
        let config = InputConfig::default();
        let a = Sequence::random(&config).unwrap();
        let b = Sequence::random(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        assert!(a.values().iter().all(|&v| (1.0..70.0).contains(&v)));
    }

    #[test]
    fn random_rejects_empty_range() {
        let config = InputConfig {
            min: 5,
            max: 5,
            ..InputConfig::default()
        };
        assert!(matches!(
            Sequence::random(&config),
            Err(Error::InvalidConfig(_))
        ));
    }
}
