//! Number representations.
//!
//! [`Number`] is a closed sum over the representations the engine knows:
//!
//! - [`FastDecimal`]: an `f64`, cheap and approximate
//! - [`PreciseDecimal`]: an arbitrary-precision decimal with a
//!   magnitude-relative error bound
//!
//! Binary operations require both operands to share a representation;
//! mixing them is a promotion failure, because promotion is a registry-level
//! decision (see the evaluator's promotion manager), not a number-level one.
//!
//! Every representation exposes [`Number::max_error`], the smallest increment
//! it can resolve at the current magnitude. Series expansions stop once their
//! next term falls below it.

mod fast;
mod precise;

use std::cmp::Ordering;
use std::fmt;

use abacus_diagnostic::{invalid_number, mixed_representations, AbacusResult};

pub use fast::{FastDecimal, FAST_MAX_ERROR, FAST_MAX_PRECISION};
pub use precise::{PreciseDecimal, GUARD_DIGITS, INTERNAL_PRECISION, OUTPUT_PRECISION};

/// Representation tag, used for dispatch, promotion lookups and cache keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumberKind {
    Fast,
    Precise,
}

impl NumberKind {
    pub const ALL: [NumberKind; 2] = [NumberKind::Fast, NumberKind::Precise];

    pub fn as_str(self) -> &'static str {
        match self {
            NumberKind::Fast => "fast",
            NumberKind::Precise => "precise",
        }
    }
}

impl fmt::Display for NumberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Fast(FastDecimal),
    Precise(PreciseDecimal),
}

/// Check literal text: optional `-`, digits, at most one `.`, at least one digit.
fn is_literal(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    let mut seen_point = false;
    let mut seen_digit = false;
    for c in body.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    seen_digit
}

macro_rules! same_kind {
    ($left:expr, $right:expr, |$a:ident, $b:ident| $fast:expr, $precise:expr) => {
        match ($left, $right) {
            (Number::Fast($a), Number::Fast($b)) => $fast,
            (Number::Precise($a), Number::Precise($b)) => $precise,
            (l, r) => Err(mixed_representations(l.kind().as_str(), r.kind().as_str())),
        }
    };
}

impl Number {
    /// Parse literal text such as `12`, `.5` or `3.` in the given representation.
    pub fn parse(kind: NumberKind, text: &str) -> AbacusResult<Number> {
        if !is_literal(text) {
            return Err(invalid_number(text));
        }
        let parsed = match kind {
            NumberKind::Fast => FastDecimal::parse(text).map(Number::Fast),
            NumberKind::Precise => PreciseDecimal::parse(text).map(Number::Precise),
        };
        parsed.ok_or_else(|| invalid_number(text))
    }

    pub fn from_i64(kind: NumberKind, n: i64) -> Number {
        match kind {
            NumberKind::Fast => Number::Fast(FastDecimal(n as f64)),
            NumberKind::Precise => Number::Precise(PreciseDecimal::from_i64(n)),
        }
    }

    pub fn zero(kind: NumberKind) -> Number {
        Self::from_i64(kind, 0)
    }

    pub fn one(kind: NumberKind) -> Number {
        Self::from_i64(kind, 1)
    }

    pub fn kind(&self) -> NumberKind {
        match self {
            Number::Fast(_) => NumberKind::Fast,
            Number::Precise(_) => NumberKind::Precise,
        }
    }

    pub fn add(&self, other: &Number) -> AbacusResult<Number> {
        same_kind!(self, other, |a, b| Ok(Number::Fast(a.add(*b))), Ok(Number::Precise(a.add(b))))
    }

    pub fn sub(&self, other: &Number) -> AbacusResult<Number> {
        same_kind!(self, other, |a, b| Ok(Number::Fast(a.sub(*b))), Ok(Number::Precise(a.sub(b))))
    }

    pub fn mul(&self, other: &Number) -> AbacusResult<Number> {
        same_kind!(self, other, |a, b| Ok(Number::Fast(a.mul(*b))), Ok(Number::Precise(a.mul(b))))
    }

    /// Fails with a domain error on a zero divisor.
    pub fn div(&self, other: &Number) -> AbacusResult<Number> {
        same_kind!(
            self,
            other,
            |a, b| a.div(*b).map(Number::Fast),
            a.div(b).map(Number::Precise)
        )
    }

    /// Three-way comparison; fails only on mixed representations.
    pub fn compare(&self, other: &Number) -> AbacusResult<Ordering> {
        same_kind!(self, other, |a, b| Ok(a.compare(*b)), Ok(a.compare(b)))
    }

    #[must_use]
    pub fn neg(&self) -> Number {
        match self {
            Number::Fast(a) => Number::Fast(a.neg()),
            Number::Precise(a) => Number::Precise(a.neg()),
        }
    }

    /// `|self|`.
    #[must_use]
    pub fn abs(&self) -> Number {
        if self.signum() < 0 {
            self.neg()
        } else {
            self.clone()
        }
    }

    pub fn int_pow(&self, exponent: i64) -> AbacusResult<Number> {
        match self {
            Number::Fast(a) => a.int_pow(exponent).map(Number::Fast),
            Number::Precise(a) => a.int_pow(exponent).map(Number::Precise),
        }
    }

    pub fn signum(&self) -> i32 {
        match self {
            Number::Fast(a) => a.signum(),
            Number::Precise(a) => a.signum(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.signum() == 0
    }

    #[must_use]
    pub fn floor(&self) -> Number {
        match self {
            Number::Fast(a) => Number::Fast(a.floor()),
            Number::Precise(a) => Number::Precise(a.floor()),
        }
    }

    #[must_use]
    pub fn ceiling(&self) -> Number {
        match self {
            Number::Fast(a) => Number::Fast(a.ceiling()),
            Number::Precise(a) => Number::Precise(a.ceiling()),
        }
    }

    /// `self - floor(self)`, always in `[0, 1)`.
    #[must_use]
    pub fn fractional_part(&self) -> Number {
        match self {
            Number::Fast(a) => Number::Fast(a.fractional_part()),
            Number::Precise(a) => Number::Precise(a.fractional_part()),
        }
    }

    pub fn is_integer(&self) -> bool {
        match self {
            Number::Fast(a) => a.is_integer(),
            Number::Precise(a) => a.is_integer(),
        }
    }

    /// `false` only for a fast value that overflowed to infinity or NaN.
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Fast(a) => a.0.is_finite(),
            Number::Precise(_) => true,
        }
    }

    /// Integer part, truncated toward zero. `None` when out of `i64` range.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Number::Fast(a) => a.to_i64(),
            Number::Precise(a) => a.to_i64(),
        }
    }

    /// Lossy conversion for display-independent inspection.
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Fast(a) => a.value(),
            Number::Precise(a) => a.to_f64(),
        }
    }

    /// Round away digits beyond internal precision plus guard digits.
    ///
    /// Products of precise numbers are exact, so a running power inside a
    /// series grows without bound unless trimmed. Fast numbers are returned
    /// unchanged.
    #[must_use]
    pub fn trimmed(&self) -> Number {
        match self {
            Number::Fast(_) => self.clone(),
            Number::Precise(a) => Number::Precise(a.round_to(INTERNAL_PRECISION + GUARD_DIGITS)),
        }
    }

    /// Significant digits the representation retains.
    pub fn max_precision(&self) -> u32 {
        match self {
            Number::Fast(_) => FAST_MAX_PRECISION,
            Number::Precise(_) => u32::try_from(INTERNAL_PRECISION).unwrap_or(u32::MAX),
        }
    }

    /// Smallest increment resolvable at this value's magnitude.
    pub fn max_error(&self) -> Number {
        match self {
            Number::Fast(_) => Number::Fast(FastDecimal(FAST_MAX_ERROR)),
            Number::Precise(a) => Number::Precise(a.max_error()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Fast(a) => fmt::Display::fmt(a, f),
            Number::Precise(a) => fmt::Display::fmt(a, f),
        }
    }
}
