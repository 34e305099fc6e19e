//! Closed numeric ranges over mixed representations.

use abacus_diagnostic::AbacusResult;
use abacus_number::Number;

use crate::PromotionManager;

/// `[start, end]`, either bound in any representation.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberRange {
    pub start: Number,
    pub end: Number,
}

impl NumberRange {
    pub fn new(start: Number, end: Number) -> Self {
        NumberRange { start, end }
    }

    /// Whether `start <= value <= end`, after promoting the bounds and
    /// `value` to one representation.
    pub fn contains(&self, promotions: &PromotionManager, value: &Number) -> AbacusResult<bool> {
        let target = promotions
            .target(&[self.start.clone(), self.end.clone(), value.clone()])?
            .unwrap_or_else(|| value.kind());
        let start = promotions.promote_to(&self.start, target)?;
        let end = promotions.promote_to(&self.end, target)?;
        let value = promotions.promote_to(value, target)?;
        Ok(value.compare(&start)?.is_ge() && value.compare(&end)?.is_le())
    }
}

#[cfg(test)]
mod tests {
    use super::NumberRange;
    use crate::test_plugin::loaded_manager;
    use abacus_diagnostic::ErrorKind;
    use abacus_number::{Number, NumberKind};
    use pretty_assertions::assert_eq;

    fn naive(n: i64) -> Number {
        Number::from_i64(NumberKind::Fast, n)
    }

    fn precise(n: i64) -> Number {
        Number::from_i64(NumberKind::Precise, n)
    }

    #[test]
    fn bounds_are_inclusive() {
        let manager = loaded_manager();
        let promotions = manager.registry().promotions();
        let range = NumberRange::new(naive(0), naive(10));
        for (value, inside) in [(-10, false), (0, true), (5, true), (10, true), (20, false)] {
            assert_eq!(range.contains(promotions, &naive(value)), Ok(inside), "{value}");
        }
    }

    #[test]
    fn mixed_representations_are_promoted() {
        let manager = loaded_manager();
        let promotions = manager.registry().promotions();
        let range = NumberRange::new(naive(0), naive(10));
        assert_eq!(range.contains(promotions, &precise(5)), Ok(true));
        assert_eq!(range.contains(promotions, &precise(20)), Ok(false));
        let precise_bounds = NumberRange::new(precise(0), naive(10));
        assert_eq!(precise_bounds.contains(promotions, &naive(10)), Ok(true));
    }

    #[test]
    fn missing_promotion_path_fails() {
        let manager = crate::PluginManager::new();
        let range = NumberRange::new(naive(0), naive(10));
        assert_eq!(
            range
                .contains(manager.registry().promotions(), &precise(5))
                .map_err(|e| e.kind()),
            Err(ErrorKind::Promotion)
        );
    }
}
