//! Inert and reserved cells.

use super::{ActivateContext, EvalContext, Rule};
use crate::error::RuleError;

/// Empty cells and level placeholders: no behaviour.
pub struct InertRule;

impl Rule for InertRule {
    fn evaluate(&self, _ctx: &mut EvalContext) -> Result<(), RuleError> {
        Ok(())
    }

    fn activate(&self, _ctx: &mut ActivateContext) -> Result<(), RuleError> {
        Ok(())
    }
}

/// Detector: the type id is reserved but has no rule. Reaching it aborts the
/// tick instead of silently doing nothing.
pub struct ReservedRule;

impl Rule for ReservedRule {
    fn evaluate(&self, ctx: &mut EvalContext) -> Result<(), RuleError> {
        Err(ctx.unimplemented())
    }

    fn activate(&self, ctx: &mut ActivateContext) -> Result<(), RuleError> {
        Err(ctx.unimplemented())
    }

    fn block(&self, ctx: &mut ActivateContext) -> Result<(), RuleError> {
        Err(ctx.unimplemented())
    }
}
