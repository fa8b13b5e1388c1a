//! Exact boundary values of zone constraints.
//!
//! A [`Bound`] is a rational value together with a flag indicating whether the boundary value is
//! itself part of the constrained region. Bounds are ordered by value first, and at equal values
//! an open bound is ordered before a closed one, because the closed bound is looser and includes
//! more.
//!
//! ```rust
//! use robust_tre::bound::Bound;
//! use robust_tre::rational::integer;
//!
//! assert!(Bound::open(integer(2)) < Bound::closed(integer(2)));
//! assert!(Bound::closed(integer(2)) < Bound::open(integer(3)));
//! ```

use std::cmp::Ordering;

use crate::rational::Rational;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bound {
    pub value: Rational,
    pub closed: bool,
}

impl Bound {
    pub fn new(value: Rational, closed: bool) -> Self {
        Self { value, closed }
    }

    pub fn closed(value: Rational) -> Self {
        Self::new(value, true)
    }

    pub fn open(value: Rational) -> Self {
        Self::new(value, false)
    }

    /// Move the bound by `amount`, keeping its closedness.
    pub fn shift(&self, amount: &Rational) -> Self {
        Self::new(&self.value + amount, self.closed)
    }

    /// Check if `value` satisfies this bound when it is used as a lower bound.
    pub fn admits_above(&self, value: &Rational) -> bool {
        match value.cmp(&self.value) {
            Ordering::Greater => true,
            Ordering::Equal => self.closed,
            Ordering::Less => false,
        }
    }

    /// Check if `value` satisfies this bound when it is used as an upper bound.
    pub fn admits_below(&self, value: &Rational) -> bool {
        match value.cmp(&self.value) {
            Ordering::Less => true,
            Ordering::Equal => self.closed,
            Ordering::Greater => false,
        }
    }

    /// Order two lower bounds from tightest to loosest.
    ///
    /// A lower bound is tighter when its value is larger, or when the values are equal and it is
    /// open.
    pub fn cmp_as_lower(&self, other: &Self) -> Ordering {
        other
            .value
            .cmp(&self.value)
            .then_with(|| self.closed.cmp(&other.closed))
    }

    /// Order two upper bounds from tightest to loosest.
    ///
    /// An upper bound is tighter when its value is smaller, or when the values are equal and it is
    /// open.
    pub fn cmp_as_upper(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    pub fn tighter_lower<'a>(&'a self, other: &'a Self) -> &'a Self {
        match self.cmp_as_lower(other) {
            Ordering::Greater => other,
            _ => self,
        }
    }

    pub fn tighter_upper<'a>(&'a self, other: &'a Self) -> &'a Self {
        match self.cmp_as_upper(other) {
            Ordering::Greater => other,
            _ => self,
        }
    }

    pub fn looser_lower<'a>(&'a self, other: &'a Self) -> &'a Self {
        match self.cmp_as_lower(other) {
            Ordering::Less => other,
            _ => self,
        }
    }

    pub fn looser_upper<'a>(&'a self, other: &'a Self) -> &'a Self {
        match self.cmp_as_upper(other) {
            Ordering::Less => other,
            _ => self,
        }
    }
}

impl PartialOrd for Bound {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bound {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.closed.cmp(&other.closed))
    }
}

/// A bound tagged with the role it plays in a zone constraint.
///
/// [`Zone::make`](crate::zone::Zone::make) consumes a sequence of tagged bounds and uses the tags
/// to verify that the sequence alternates between lower and upper bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ZoneBound {
    Lower(Bound),
    Upper(Bound),
}

impl ZoneBound {
    pub fn lower(value: Rational, closed: bool) -> Self {
        Self::Lower(Bound::new(value, closed))
    }

    pub fn upper(value: Rational, closed: bool) -> Self {
        Self::Upper(Bound::new(value, closed))
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Lower(_) => Role::Lower,
            Self::Upper(_) => Role::Upper,
        }
    }

    pub fn into_bound(self) -> Bound {
        match self {
            Self::Lower(bound) | Self::Upper(bound) => bound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Lower,
    Upper,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lower => write!(f, "lower"),
            Self::Upper => write!(f, "upper"),
        }
    }
}
