//! Rules - per-cell transition functions
//!
//! Each family of cell types implements [`Rule`]:
//! - `evaluate` runs once per tick per cell in an awake chunk, reads only the
//!   cell itself and queues messages into the owning chunk's outbox
//! - `activate` runs during apply for every power message that reaches a
//!   cell that is not blocked
//!
//! Message bookkeeping common to every type (block handling, pulse counting)
//! lives in [`RuleRegistry::deliver`].

mod wire;
mod blue;
mod gate;
mod generator;
mod input;
mod inert;

pub use wire::WireRule;
pub use blue::BlueRule;
pub use gate::GateRule;
pub use generator::GeneratorRule;
pub use input::InputRule;
pub use inert::{InertRule, ReservedRule};

use crate::domain::cells::{Cell, CellType, Direction, Signal};
use crate::error::RuleError;
use crate::spatial::chunks::{Message, MessageKind};

/// Evaluate context: the cell being evaluated and where its messages go.
pub struct EvalContext<'a> {
    pub cell: &'a mut Cell,
    pub x: i32,
    pub y: i32,
    outbox: &'a mut Vec<Message>,
}

impl<'a> EvalContext<'a> {
    pub fn new(cell: &'a mut Cell, x: i32, y: i32, outbox: &'a mut Vec<Message>) -> Self {
        Self { cell, x, y, outbox }
    }

    #[inline]
    fn target(&self, dx: i32, dy: i32) -> (i32, i32) {
        (self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }

    #[inline]
    pub fn power_at(&mut self, dx: i32, dy: i32) {
        let (x, y) = self.target(dx, dy);
        self.outbox.push(Message::power(x, y));
    }

    #[inline]
    pub fn block_at(&mut self, dx: i32, dy: i32) {
        let (x, y) = self.target(dx, dy);
        self.outbox.push(Message::block(x, y));
    }

    /// Power the cell `steps` cells away along `dir`.
    #[inline]
    pub fn power_toward(&mut self, dir: Direction, steps: i32) {
        let (dx, dy) = dir.offset();
        self.power_at(dx * steps, dy * steps);
    }

    #[inline]
    pub fn power_forward(&mut self, steps: i32) {
        self.power_toward(self.cell.direction, steps);
    }

    /// Side branch of an asymmetric element: right, or left when flipped.
    #[inline]
    pub fn side(&self) -> Direction {
        if self.cell.flipped {
            self.cell.direction.left()
        } else {
            self.cell.direction.right()
        }
    }

    /// Diagonal branch: forward-right, or forward-left when flipped.
    #[inline]
    pub fn power_diagonal(&mut self) {
        let dir = if self.cell.flipped {
            self.cell.direction.left()
        } else {
            self.cell.direction
        };
        let (dx, dy) = dir.diagonal_offset();
        self.power_at(dx, dy);
    }

    /// Broadcast to all four cardinal neighbours (east, west, south, north).
    #[inline]
    pub fn power_neighbors(&mut self) {
        self.power_at(1, 0);
        self.power_at(-1, 0);
        self.power_at(0, 1);
        self.power_at(0, -1);
    }

    fn unimplemented(&self) -> RuleError {
        RuleError::Unimplemented { kind: self.cell.kind, x: self.x, y: self.y }
    }
}

/// Activation context for one power message during apply.
pub struct ActivateContext<'a> {
    pub cell: &'a mut Cell,
    pub x: i32,
    pub y: i32,
    pub rng: &'a mut u32,
}

impl ActivateContext<'_> {
    fn unimplemented(&self) -> RuleError {
        RuleError::Unimplemented { kind: self.cell.kind, x: self.x, y: self.y }
    }
}

/// Rule trait - each cell family implements this
pub trait Rule: Sync {
    fn evaluate(&self, ctx: &mut EvalContext) -> Result<(), RuleError>;

    fn activate(&self, ctx: &mut ActivateContext) -> Result<(), RuleError>;

    /// A block message: the cell rejects power for the rest of this apply.
    fn block(&self, ctx: &mut ActivateContext) -> Result<(), RuleError> {
        ctx.cell.signal = Signal::Block;
        ctx.cell.pulse_count = 0;
        Ok(())
    }
}

/// How a message was received, for tick statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Blocked,
    Powered,
    /// Power into a blocked cell; dropped for this tick.
    Dropped,
}

/// Family a cell type dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellFamily {
    Wire,
    Blue,
    Gate,
    Generator,
    Input,
    Inert,
    Reserved,
}

impl CellFamily {
    pub fn of(kind: CellType) -> CellFamily {
        match kind {
            CellType::Arrow
            | CellType::Blocker
            | CellType::SplitterUpDown
            | CellType::SplitterUpRight
            | CellType::SplitterUpRightLeft => CellFamily::Wire,
            CellType::BlueArrow
            | CellType::Diagonal
            | CellType::BlueSplitterUpUp
            | CellType::BlueSplitterRightUp
            | CellType::BlueSplitterUpDiagonal => CellFamily::Blue,
            CellType::Not | CellType::And | CellType::Xor | CellType::Latch | CellType::Flipflop => {
                CellFamily::Gate
            }
            CellType::Source | CellType::Pulse | CellType::Delay => CellFamily::Generator,
            CellType::Random | CellType::Button | CellType::DirectionalButton => CellFamily::Input,
            CellType::Empty | CellType::LevelSource | CellType::LevelTarget => CellFamily::Inert,
            CellType::Detector => CellFamily::Reserved,
        }
    }
}

/// Xorshift32 random number generator
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Rule registry - dispatch by cell family
pub struct RuleRegistry {
    wire: WireRule,
    blue: BlueRule,
    gate: GateRule,
    generator: GeneratorRule,
    input: InputRule,
    inert: InertRule,
    reserved: ReservedRule,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            wire: WireRule,
            blue: BlueRule,
            gate: GateRule,
            generator: GeneratorRule,
            input: InputRule,
            inert: InertRule,
            reserved: ReservedRule,
        }
    }

    fn rule(&self, kind: CellType) -> &dyn Rule {
        match CellFamily::of(kind) {
            CellFamily::Wire => &self.wire,
            CellFamily::Blue => &self.blue,
            CellFamily::Gate => &self.gate,
            CellFamily::Generator => &self.generator,
            CellFamily::Input => &self.input,
            CellFamily::Inert => &self.inert,
            CellFamily::Reserved => &self.reserved,
        }
    }

    /// Run the evaluate rule for one cell. The pulse counter is cleared
    /// afterwards whatever the outcome.
    pub fn evaluate(&self, ctx: &mut EvalContext) -> Result<(), RuleError> {
        let result = self.rule(ctx.cell.kind).evaluate(ctx);
        ctx.cell.pulse_count = 0;
        result
    }

    /// Deliver one message to `cell` at `(x, y)`. Effects are immediate, so
    /// later messages in the same apply pass see them.
    pub fn deliver(
        &self,
        cell: &mut Cell,
        x: i32,
        y: i32,
        kind: MessageKind,
        rng: &mut u32,
    ) -> Result<Delivery, RuleError> {
        let rule = self.rule(cell.kind);
        let mut ctx = ActivateContext { cell, x, y, rng };
        match kind {
            MessageKind::Block => {
                rule.block(&mut ctx)?;
                Ok(Delivery::Blocked)
            }
            MessageKind::Power => {
                if ctx.cell.signal == Signal::Block {
                    return Ok(Delivery::Dropped);
                }
                ctx.cell.pulse_count = ctx.cell.pulse_count.saturating_add(1);
                rule.activate(&mut ctx)?;
                Ok(Delivery::Powered)
            }
        }
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
