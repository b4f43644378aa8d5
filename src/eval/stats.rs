use super::helpers::{finite, reals};
use super::{BasicEngine, CalcError, Engine, Operator};
use crate::value::NumericValue;

/// Whole-stack reductions. The stack is read, never consumed; the result
/// is pushed on top so reductions compose.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatsEngine;

/// Middle value of the sorted values; mean of the two middle ones for an
/// even count
fn median(mut nums: Vec<f64>) -> f64 {
    nums.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let len = nums.len();
    if len % 2 == 0 {
        (nums[len / 2 - 1] + nums[len / 2]) / 2.0
    } else {
        nums[len / 2]
    }
}

impl Engine for StatsEngine {
    fn supports(&self, op: Operator) -> bool {
        BasicEngine::is_basic(op)
            || matches!(op, Operator::Sum | Operator::Average | Operator::Median)
    }

    fn evaluate(&self, op: Operator, operands: &[NumericValue]) -> Result<NumericValue, CalcError> {
        if BasicEngine::is_basic(op) {
            return BasicEngine.evaluate(op, operands);
        }

        let nums = reals(operands);
        if nums.is_empty() {
            return Err(CalcError::EmptyStack {
                required: 1,
                available: 0,
            });
        }

        let result = match op {
            Operator::Sum => nums.iter().sum::<f64>(),
            Operator::Average => nums.iter().sum::<f64>() / nums.len() as f64,
            Operator::Median => median(nums),
            _ => {
                return Err(CalcError::Domain(format!(
                    "{} is not a statistics operation",
                    op.formula()
                )))
            }
        };
        finite(result, op.formula())
    }
}
