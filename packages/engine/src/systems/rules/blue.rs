//! BlueRule - blue-signal wires: long arrow, diagonal and blue splitters
//!
//! Blue elements fire only from `Blue` and can skip a cell (two steps forward).

use super::{ActivateContext, EvalContext, Rule};
use crate::domain::cells::{CellType, Signal};
use crate::error::RuleError;

pub struct BlueRule;

impl Rule for BlueRule {
    fn evaluate(&self, ctx: &mut EvalContext) -> Result<(), RuleError> {
        if ctx.cell.signal != Signal::Blue {
            ctx.cell.signal = Signal::None;
            return Ok(());
        }
        match ctx.cell.kind {
            CellType::Diagonal => ctx.power_diagonal(),
            CellType::BlueSplitterUpUp => {
                ctx.power_forward(1);
                ctx.power_forward(2);
            }
            CellType::BlueSplitterRightUp => {
                ctx.power_forward(2);
                let side = ctx.side();
                ctx.power_toward(side, 1);
            }
            CellType::BlueSplitterUpDiagonal => {
                ctx.power_forward(1);
                ctx.power_diagonal();
            }
            _ => ctx.power_forward(2),
        }
        ctx.cell.signal = Signal::None;
        Ok(())
    }

    fn activate(&self, ctx: &mut ActivateContext) -> Result<(), RuleError> {
        ctx.cell.signal = Signal::Blue;
        Ok(())
    }
}
