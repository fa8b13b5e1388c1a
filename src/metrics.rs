//! Lattice operations over robustness values.
//!
//! The robustness of a conjunction is the [infimum] of the robustness of its conjuncts and the
//! robustness of a disjunction is the [supremum] of its disjuncts. A zone is the conjunction of its
//! per-dimension constraints and a zone set is the disjunction of its zones, so these two
//! operations are all that is needed to evaluate a match set.
//!
//! [infimum]: https://en.wikipedia.org/wiki/Infimum_and_supremum
//! [supremum]: https://en.wikipedia.org/wiki/Infimum_and_supremum

use std::fmt::{Display, Formatter};
use std::ops::Neg;

use num_traits::{Signed, Zero};

use crate::rational::{self, Rational};

/// Trait representing a type with a global maximum.
///
/// The value returned by the `top` method should be greater than all other values in the type.
/// That is there should be no other value `v` such that `v > top`.
pub trait Top {
    /// Compute the global maximum for the type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use robust_tre::{Robustness, Top};
    /// let top = Robustness::top();  // Robustness::PosInfinity
    /// ```
    fn top() -> Self;
}

/// Trait representing a type with a global minimum.
///
/// The value returned by the `bottom` method should be less than all other values in the type.
/// That is there should be no other value `v` such that `v < bottom`. The bottom value is the
/// robustness of an empty disjunction.
pub trait Bottom {
    /// Compute the global minimum value for the type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use robust_tre::{Bottom, Robustness};
    /// let bottom = Robustness::bottom();  // Robustness::NegInfinity
    /// ```
    fn bottom() -> Self;
}

/// Trait representing a type that can compute the infimum of two values.
///
/// [`Meet::min`] takes its parameters as references rather than by value because rational values
/// are heap allocated and the operation is not required to return one of its arguments.
pub trait Meet: PartialOrd {
    /// This method returns the infimum of two values.
    fn min(&self, other: &Self) -> Self;
}

/// Trait representing a type that can compute the supremum of two values.
pub trait Join: PartialOrd {
    /// This method returns the supremum of two values.
    fn max(&self, other: &Self) -> Self;
}

/// Signed robustness of a point with respect to a match set.
///
/// Positive values indicate that the point is inside the set with the given margin, negative values
/// that it is outside and zero that it lies on a boundary. The infinite values are the robustness
/// of degenerate inputs: an empty zone or zone set is [`Robustness::NegInfinity`] everywhere.
///
/// The derived ordering places `NegInfinity` below every finite value and `PosInfinity` above.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Robustness {
    NegInfinity,
    Finite(Rational),
    PosInfinity,
}

impl Robustness {
    /// The finite value, if there is one.
    pub fn finite(&self) -> Option<&Rational> {
        match self {
            Self::Finite(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Self::NegInfinity => false,
            Self::Finite(value) => value.is_positive(),
            Self::PosInfinity => true,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Self::NegInfinity => true,
            Self::Finite(value) => value.is_negative(),
            Self::PosInfinity => false,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Finite(value) if value.is_zero())
    }

    /// Nearest float, for rendering only.
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::NegInfinity => f64::NEG_INFINITY,
            Self::Finite(value) => rational::to_f64(value),
            Self::PosInfinity => f64::INFINITY,
        }
    }
}

impl From<Rational> for Robustness {
    fn from(value: Rational) -> Self {
        Self::Finite(value)
    }
}

impl PartialEq<Rational> for Robustness {
    fn eq(&self, other: &Rational) -> bool {
        self.finite() == Some(other)
    }
}

impl Neg for Robustness {
    type Output = Robustness;

    fn neg(self) -> Self::Output {
        match self {
            Self::NegInfinity => Self::PosInfinity,
            Self::Finite(value) => Self::Finite(-value),
            Self::PosInfinity => Self::NegInfinity,
        }
    }
}

impl Display for Robustness {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegInfinity => write!(f, "-inf"),
            Self::Finite(value) => write!(f, "{}", value),
            Self::PosInfinity => write!(f, "inf"),
        }
    }
}

impl Top for Robustness {
    fn top() -> Self {
        Self::PosInfinity
    }
}

impl Bottom for Robustness {
    fn bottom() -> Self {
        Self::NegInfinity
    }
}

impl Meet for Robustness {
    fn min(&self, other: &Self) -> Self {
        if other < self {
            other.clone()
        } else {
            self.clone()
        }
    }
}

impl Join for Robustness {
    fn max(&self, other: &Self) -> Self {
        if other > self {
            other.clone()
        } else {
            self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Bottom, Join, Meet, Robustness, Top};
    use crate::rational::integer;

    fn finite(value: i64) -> Robustness {
        Robustness::Finite(integer(value))
    }

    #[test]
    fn ordering() {
        assert!(Robustness::NegInfinity < finite(-1_000_000));
        assert!(finite(-1) < finite(0));
        assert!(finite(1_000_000) < Robustness::PosInfinity);
        assert_eq!(Robustness::bottom(), Robustness::NegInfinity);
        assert_eq!(Robustness::top(), Robustness::PosInfinity);
    }

    #[test]
    fn meet_and_join() {
        assert_eq!(Meet::min(&finite(3), &finite(-2)), finite(-2));
        assert_eq!(Join::max(&finite(3), &finite(-2)), finite(3));
        assert_eq!(Join::max(&Robustness::bottom(), &finite(-7)), finite(-7));
        assert_eq!(Meet::min(&Robustness::top(), &finite(7)), finite(7));
    }

    #[test]
    fn sign_predicates() {
        assert!(finite(2).is_positive());
        assert!(finite(-2).is_negative());
        assert!(finite(0).is_zero());
        assert!(!finite(0).is_positive() && !finite(0).is_negative());
        assert!(Robustness::NegInfinity.is_negative());
        assert_eq!(-Robustness::NegInfinity, Robustness::PosInfinity);
        assert_eq!(-finite(4), finite(-4));
    }

    #[test]
    fn display() {
        assert_eq!(finite(-3).to_string(), "-3");
        assert_eq!(Robustness::NegInfinity.to_string(), "-inf");
        assert_eq!(Robustness::NegInfinity.to_f64(), f64::NEG_INFINITY);
    }
}
