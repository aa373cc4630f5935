//! WireRule - red-signal wires, splitters and the blocker
//!
//! All of them fire only from `Red`, then fall back to `None`.

use super::{ActivateContext, EvalContext, Rule};
use crate::domain::cells::{CellType, Signal};
use crate::error::RuleError;

pub struct WireRule;

impl Rule for WireRule {
    fn evaluate(&self, ctx: &mut EvalContext) -> Result<(), RuleError> {
        if ctx.cell.signal != Signal::Red {
            ctx.cell.signal = Signal::None;
            return Ok(());
        }
        let dir = ctx.cell.direction;
        match ctx.cell.kind {
            CellType::Blocker => {
                let (dx, dy) = dir.offset();
                ctx.block_at(dx, dy);
            }
            CellType::SplitterUpDown => {
                ctx.power_toward(dir, 1);
                ctx.power_toward(dir.opposite(), 1);
            }
            CellType::SplitterUpRight => {
                ctx.power_toward(dir, 1);
                let side = ctx.side();
                ctx.power_toward(side, 1);
            }
            CellType::SplitterUpRightLeft => {
                ctx.power_toward(dir, 1);
                ctx.power_toward(dir.right(), 1);
                ctx.power_toward(dir.left(), 1);
            }
            _ => ctx.power_forward(1),
        }
        ctx.cell.signal = Signal::None;
        Ok(())
    }

    fn activate(&self, ctx: &mut ActivateContext) -> Result<(), RuleError> {
        ctx.cell.signal = Signal::Red;
        Ok(())
    }
}
