//! Moment reporting: which moments to compute and how they come back.
//!
//! Every family computes its closed-form [`Moments`] in one go; a caller
//! picks the subset it wants with a [`MomentSelector`] and receives a
//! [`Stats`] with exactly those slots filled. Moments that do not exist
//! for the given parameters are reported as `NaN` (undefined) or `±∞`
//! (divergent), never omitted. Kurtosis is excess (Fisher) kurtosis.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Error parsing a [`MomentSelector`] from its letter code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MomentSelectorError {
    /// A character outside `m`, `v`, `s`, `k`.
    UnknownCode(char),
}

impl fmt::Display for MomentSelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MomentSelectorError::UnknownCode(c) => {
                write!(f, "unknown moment code '{c}' (expected any of \"mvsk\")")
            }
        }
    }
}

impl std::error::Error for MomentSelectorError {}

/// Set of moments requested from [`Distribution::stats`](super::Distribution::stats).
///
/// Selectors combine with `|` and parse from the letter code used by
/// most statistics packages: `m`ean, `v`ariance, `s`kew, `k`urtosis.
///
/// # Examples
/// ```
/// use u_probability::distributions::MomentSelector;
/// let sel: MomentSelector = "mv".parse().unwrap();
/// assert_eq!(sel, MomentSelector::MEAN | MomentSelector::VARIANCE);
/// assert_eq!(sel.to_string(), "mv");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentSelector {
    pub mean: bool,
    pub variance: bool,
    pub skew: bool,
    pub kurtosis: bool,
}

impl MomentSelector {
    pub const NONE: Self = Self {
        mean: false,
        variance: false,
        skew: false,
        kurtosis: false,
    };
    pub const MEAN: Self = Self {
        mean: true,
        ..Self::NONE
    };
    pub const VARIANCE: Self = Self {
        variance: true,
        ..Self::NONE
    };
    pub const SKEW: Self = Self {
        skew: true,
        ..Self::NONE
    };
    pub const KURTOSIS: Self = Self {
        kurtosis: true,
        ..Self::NONE
    };
    pub const ALL: Self = Self {
        mean: true,
        variance: true,
        skew: true,
        kurtosis: true,
    };

    /// True if every moment in `other` is also in `self`.
    pub fn contains(self, other: Self) -> bool {
        (self | other) == self
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }
}

/// Mean and variance, matching the customary `"mv"` default.
impl Default for MomentSelector {
    fn default() -> Self {
        Self::MEAN | Self::VARIANCE
    }
}

impl BitOr for MomentSelector {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            mean: self.mean || rhs.mean,
            variance: self.variance || rhs.variance,
            skew: self.skew || rhs.skew,
            kurtosis: self.kurtosis || rhs.kurtosis,
        }
    }
}

impl BitOrAssign for MomentSelector {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl FromStr for MomentSelector {
    type Err = MomentSelectorError;

    /// Any subset of `"mvsk"` in any order; repeats are harmless.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars().try_fold(Self::NONE, |acc, c| {
            let flag = match c {
                'm' => Self::MEAN,
                'v' => Self::VARIANCE,
                's' => Self::SKEW,
                'k' => Self::KURTOSIS,
                other => return Err(MomentSelectorError::UnknownCode(other)),
            };
            Ok(acc | flag)
        })
    }
}

impl fmt::Display for MomentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, code) in [
            (self.mean, 'm'),
            (self.variance, 'v'),
            (self.skew, 's'),
            (self.kurtosis, 'k'),
        ] {
            if on {
                write!(f, "{code}")?;
            }
        }
        Ok(())
    }
}

/// The first four moments of a distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
    pub skew: f64,
    /// Excess kurtosis (0 for the normal distribution).
    pub kurtosis: f64,
}

impl Moments {
    /// Moments that are all undefined.
    pub const UNDEFINED: Self = Self {
        mean: f64::NAN,
        variance: f64::NAN,
        skew: f64::NAN,
        kurtosis: f64::NAN,
    };
}

/// The moments requested by a [`MomentSelector`].
///
/// A slot is `Some` exactly when its moment was requested, even if the
/// value is `NaN` or infinite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub mean: Option<f64>,
    pub variance: Option<f64>,
    pub skew: Option<f64>,
    pub kurtosis: Option<f64>,
}

impl Stats {
    /// Keeps the moments named by `selector`.
    pub fn select(moments: &Moments, selector: MomentSelector) -> Self {
        Self {
            mean: selector.mean.then_some(moments.mean),
            variance: selector.variance.then_some(moments.variance),
            skew: selector.skew.then_some(moments.skew),
            kurtosis: selector.kurtosis.then_some(moments.kurtosis),
        }
    }

    /// Present moments as `(name, value)` pairs in `mvsk` order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("mean", self.mean),
            ("variance", self.variance),
            ("skew", self.skew),
            ("kurtosis", self.kurtosis),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
