//! GateRule - NOT, AND, XOR, latch and flip-flop
//!
//! Gates hold their output as `Yellow`. Multi-input gates decide from the
//! number of power messages received in the current apply pass.

use super::{ActivateContext, EvalContext, Rule};
use crate::domain::cells::{CellType, Signal};
use crate::error::RuleError;

pub struct GateRule;

impl GateRule {
    #[inline]
    fn high_if(cond: bool) -> Signal {
        if cond { Signal::Yellow } else { Signal::None }
    }
}

impl Rule for GateRule {
    fn evaluate(&self, ctx: &mut EvalContext) -> Result<(), RuleError> {
        let high = ctx.cell.signal == Signal::Yellow;
        match ctx.cell.kind {
            // Default-high inverter: a power message pulls it low for one
            // tick, after which it recovers without emitting.
            CellType::Not => {
                if high {
                    ctx.power_forward(1);
                } else {
                    ctx.cell.signal = Signal::Yellow;
                }
            }
            // Held outputs keep firing every tick while high.
            CellType::Latch | CellType::Flipflop => {
                if high {
                    ctx.power_forward(1);
                } else {
                    ctx.cell.signal = Signal::None;
                }
            }
            _ => {
                if high {
                    ctx.power_forward(1);
                }
                ctx.cell.signal = Signal::None;
            }
        }
        Ok(())
    }

    fn activate(&self, ctx: &mut ActivateContext) -> Result<(), RuleError> {
        let pulses = ctx.cell.pulse_count;
        match ctx.cell.kind {
            CellType::Not => ctx.cell.signal = Signal::None,
            CellType::And | CellType::Latch => ctx.cell.signal = Self::high_if(pulses >= 2),
            CellType::Xor => ctx.cell.signal = Self::high_if(pulses % 2 == 1),
            CellType::Flipflop => {
                // Only the first pulse of a tick toggles.
                if pulses <= 1 {
                    ctx.cell.signal = Self::high_if(ctx.cell.signal == Signal::None);
                }
            }
            _ => {}
        }
        Ok(())
    }
}
