//! Mixed-representation promotion.
//!
//! Built from the registered number implementations once plugins have
//! loaded. For every pair of implementations the lower-priority one may
//! declare a conversion into the higher; [`PromotionManager::promote`] moves
//! a set of operands to the highest-priority representation among them and
//! fails when some operand has no declared path there.

use abacus_diagnostic::{no_promotion_path, AbacusResult};
use abacus_number::{Number, NumberKind};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::function::{NumberImplementation, PromotionFn};
use crate::EvalResult;

#[derive(Default)]
pub struct PromotionManager {
    priorities: FxHashMap<NumberKind, i32>,
    paths: FxHashMap<(NumberKind, NumberKind), PromotionFn>,
}

impl PromotionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute every path between the given `(name, implementation)` pairs.
    pub fn from_implementations<'a>(
        implementations: impl IntoIterator<Item = (&'a str, &'a NumberImplementation)>,
    ) -> Self {
        let implementations: Vec<_> = implementations.into_iter().collect();
        let mut manager = PromotionManager::new();
        for (_, implementation) in &implementations {
            manager
                .priorities
                .insert(implementation.kind, implementation.priority);
        }
        for (_, from) in &implementations {
            for (to_name, to) in &implementations {
                if from.kind == to.kind || from.priority > to.priority {
                    continue;
                }
                if let Some(path) = from.promotions.get(*to_name) {
                    manager.paths.insert((from.kind, to.kind), *path);
                }
            }
        }
        debug!(
            implementations = implementations.len(),
            paths = manager.paths.len(),
            "computed promotion paths"
        );
        manager
    }

    pub fn clear(&mut self) {
        self.priorities.clear();
        self.paths.clear();
    }

    pub fn priority(&self, kind: NumberKind) -> Option<i32> {
        self.priorities.get(&kind).copied()
    }

    /// Convert `number` into `target`.
    pub fn promote_to(&self, number: &Number, target: NumberKind) -> EvalResult {
        let from = number.kind();
        if from == target {
            return Ok(number.clone());
        }
        match self.paths.get(&(from, target)) {
            Some(path) => path(number),
            None => Err(no_promotion_path(from.as_str(), target.as_str())),
        }
    }

    /// The representation a set of operands promotes to.
    pub fn target(&self, numbers: &[Number]) -> AbacusResult<Option<NumberKind>> {
        let mut best: Option<(i32, NumberKind)> = None;
        for number in numbers {
            let kind = number.kind();
            let priority = self
                .priority(kind)
                .ok_or_else(|| no_promotion_path(kind.as_str(), "any registered implementation"))?;
            if !matches!(best, Some((p, _)) if priority <= p) {
                best = Some((priority, kind));
            }
        }
        Ok(best.map(|(_, kind)| kind))
    }

    /// Move every operand to the highest-priority representation among them.
    pub fn promote(&self, numbers: &[Number]) -> AbacusResult<Vec<Number>> {
        let Some(target) = self.target(numbers)? else {
            return Ok(Vec::new());
        };
        numbers.iter().map(|n| self.promote_to(n, target)).collect()
    }
}
