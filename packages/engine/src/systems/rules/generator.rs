//! GeneratorRule - source, pulse oscillator and delay line
//!
//! These drive their own state machines during evaluate instead of simply
//! forwarding what they receive.

use super::{ActivateContext, EvalContext, Rule};
use crate::domain::cells::{CellType, Signal};
use crate::error::RuleError;

pub struct GeneratorRule;

impl GeneratorRule {
    /// Primes on the first tick, then broadcasts every tick.
    #[inline]
    fn update_source(ctx: &mut EvalContext) {
        if ctx.cell.signal == Signal::Red {
            ctx.power_neighbors();
        } else {
            ctx.cell.signal = Signal::Red;
        }
    }

    /// Arm (-> Red), fire (Red -> Blue), then stay charged in Blue.
    #[inline]
    fn update_pulse(ctx: &mut EvalContext) {
        match ctx.cell.signal {
            Signal::None | Signal::Block | Signal::DelayedAfterRed => ctx.cell.signal = Signal::Red,
            Signal::Red => {
                ctx.power_neighbors();
                ctx.cell.signal = Signal::Blue;
            }
            Signal::Blue | Signal::Yellow | Signal::Orange => {}
        }
    }

    /// Blue -> Red -> (fire) DelayedAfterRed -> None.
    #[inline]
    fn update_delay(ctx: &mut EvalContext) {
        match ctx.cell.signal {
            Signal::Block | Signal::DelayedAfterRed => ctx.cell.signal = Signal::None,
            Signal::Blue => ctx.cell.signal = Signal::Red,
            Signal::Red => {
                ctx.power_forward(1);
                ctx.cell.signal = Signal::DelayedAfterRed;
            }
            Signal::None | Signal::Yellow | Signal::Orange => {}
        }
    }
}

impl Rule for GeneratorRule {
    fn evaluate(&self, ctx: &mut EvalContext) -> Result<(), RuleError> {
        match ctx.cell.kind {
            CellType::Source => Self::update_source(ctx),
            CellType::Pulse => Self::update_pulse(ctx),
            CellType::Delay => Self::update_delay(ctx),
            _ => {}
        }
        Ok(())
    }

    fn activate(&self, ctx: &mut ActivateContext) -> Result<(), RuleError> {
        // Sources and pulses ignore input; a delay loads on an idle line and
        // is pushed straight to its firing state otherwise.
        if ctx.cell.kind == CellType::Delay {
            ctx.cell.signal = if ctx.cell.signal == Signal::None {
                Signal::Blue
            } else {
                Signal::Red
            };
        }
        Ok(())
    }
}
