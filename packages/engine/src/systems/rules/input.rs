//! InputRule - random generator and buttons
//!
//! Fire forward from `Orange`. Buttons are pressed from outside the tick via
//! `force_signal`; the directional button also latches on power.

use super::{xorshift32, ActivateContext, EvalContext, Rule};
use crate::domain::cells::{CellType, Signal};
use crate::error::RuleError;

pub struct InputRule;

impl Rule for InputRule {
    fn evaluate(&self, ctx: &mut EvalContext) -> Result<(), RuleError> {
        if ctx.cell.signal == Signal::Orange {
            ctx.power_forward(1);
        }
        ctx.cell.signal = Signal::None;
        Ok(())
    }

    fn activate(&self, ctx: &mut ActivateContext) -> Result<(), RuleError> {
        match ctx.cell.kind {
            // Picks between None and Block, never Orange, so a random cell
            // never fires. Kept as-is until the intended outcome set is known.
            CellType::Random => {
                ctx.cell.signal = if xorshift32(ctx.rng) & 1 == 0 {
                    Signal::None
                } else {
                    Signal::Block
                };
            }
            CellType::DirectionalButton => ctx.cell.signal = Signal::Orange,
            _ => {}
        }
        Ok(())
    }
}
