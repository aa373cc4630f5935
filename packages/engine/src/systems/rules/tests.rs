use super::*;

const X: i32 = 10;
const Y: i32 = 10;

fn eval(cell: Cell) -> (Cell, Vec<Message>) {
    let rules = RuleRegistry::new();
    let mut cell = cell;
    let mut outbox = Vec::new();
    let mut ctx = EvalContext::new(&mut cell, X, Y, &mut outbox);
    rules.evaluate(&mut ctx).expect("rule should be defined");
    (cell, outbox)
}

fn targets(messages: &[Message]) -> Vec<(i32, i32)> {
    messages.iter().map(|m| (m.x - X, m.y - Y)).collect()
}

fn with_signal(kind: CellType, dir: Direction, signal: Signal) -> Cell {
    Cell { signal, ..Cell::new(kind, dir) }
}

fn power(cell: &mut Cell, rng: &mut u32) -> Delivery {
    RuleRegistry::new()
        .deliver(cell, X, Y, MessageKind::Power, rng)
        .expect("rule should be defined")
}

#[test]
fn every_type_but_detector_handles_every_signal() {
    let rules = RuleRegistry::new();
    let mut rng = 7u32;
    for kind in CellType::ALL {
        if kind == CellType::Detector {
            continue;
        }
        for signal in Signal::ALL {
            for dir in Direction::ALL {
                for flipped in [false, true] {
                    let mut cell = with_signal(kind, dir, signal).flipped(flipped);
                    let mut outbox = Vec::new();
                    let mut ctx = EvalContext::new(&mut cell, X, Y, &mut outbox);
                    assert!(rules.evaluate(&mut ctx).is_ok(), "{kind:?} evaluate {signal:?}");
                    assert_eq!(cell.pulse_count, 0);

                    let mut cell = with_signal(kind, dir, signal).flipped(flipped);
                    for msg in [MessageKind::Power, MessageKind::Power, MessageKind::Block] {
                        assert!(rules.deliver(&mut cell, X, Y, msg, &mut rng).is_ok());
                    }
                }
            }
        }
    }
}

#[test]
fn detector_fails_loudly_in_both_phases() {
    let rules = RuleRegistry::new();
    let mut cell = Cell::new(CellType::Detector, Direction::North);
    let mut outbox = Vec::new();
    let mut ctx = EvalContext::new(&mut cell, 3, -4, &mut outbox);
    assert_eq!(
        rules.evaluate(&mut ctx),
        Err(RuleError::Unimplemented { kind: CellType::Detector, x: 3, y: -4 })
    );

    let mut rng = 1u32;
    assert!(rules.deliver(&mut cell, 3, -4, MessageKind::Power, &mut rng).is_err());
    assert!(rules.deliver(&mut cell, 3, -4, MessageKind::Block, &mut rng).is_err());
}

#[test]
fn block_message_goes_through_the_cell_rule() {
    let rules = RuleRegistry::new();
    let mut rng = 1u32;

    let mut detector = Cell::new(CellType::Detector, Direction::East);
    assert_eq!(
        rules.deliver(&mut detector, -2, 9, MessageKind::Block, &mut rng),
        Err(RuleError::Unimplemented { kind: CellType::Detector, x: -2, y: 9 })
    );
    assert_eq!(detector.signal, Signal::None);

    let mut gate = Cell { pulse_count: 1, ..with_signal(CellType::And, Direction::East, Signal::Yellow) };
    assert_eq!(rules.deliver(&mut gate, 0, 0, MessageKind::Block, &mut rng), Ok(Delivery::Blocked));
    assert_eq!(gate.signal, Signal::Block);
    assert_eq!(gate.pulse_count, 0);
}

#[test]
fn arrow_forwards_red_once() {
    let (cell, out) = eval(with_signal(CellType::Arrow, Direction::East, Signal::Red));
    assert_eq!(cell.signal, Signal::None);
    assert_eq!(targets(&out), vec![(1, 0)]);
    assert_eq!(out[0].kind, MessageKind::Power);

    let (cell, out) = eval(with_signal(CellType::Arrow, Direction::East, Signal::Blue));
    assert_eq!(cell.signal, Signal::None);
    assert!(out.is_empty());
}

#[test]
fn blocker_sends_block_forward() {
    let (_, out) = eval(with_signal(CellType::Blocker, Direction::South, Signal::Red));
    assert_eq!(out, vec![Message::block(X, Y + 1)]);
}

#[test]
fn splitters_pick_branches_from_direction_and_flip() {
    let (_, out) = eval(with_signal(CellType::SplitterUpDown, Direction::North, Signal::Red));
    assert_eq!(targets(&out), vec![(0, -1), (0, 1)]);

    let (_, out) = eval(with_signal(CellType::SplitterUpRight, Direction::North, Signal::Red));
    assert_eq!(targets(&out), vec![(0, -1), (1, 0)]);

    let flipped = with_signal(CellType::SplitterUpRight, Direction::North, Signal::Red).flipped(true);
    let (_, out) = eval(flipped);
    assert_eq!(targets(&out), vec![(0, -1), (-1, 0)]);

    let (_, out) = eval(with_signal(CellType::SplitterUpRightLeft, Direction::East, Signal::Red));
    assert_eq!(targets(&out), vec![(1, 0), (0, 1), (0, -1)]);
}

#[test]
fn blue_family_reaches_past_neighbors() {
    let (_, out) = eval(with_signal(CellType::BlueArrow, Direction::West, Signal::Blue));
    assert_eq!(targets(&out), vec![(-2, 0)]);

    let (_, out) = eval(with_signal(CellType::Diagonal, Direction::North, Signal::Blue));
    assert_eq!(targets(&out), vec![(1, -1)]);
    let (_, out) = eval(with_signal(CellType::Diagonal, Direction::North, Signal::Blue).flipped(true));
    assert_eq!(targets(&out), vec![(-1, -1)]);

    let (_, out) = eval(with_signal(CellType::BlueSplitterUpUp, Direction::South, Signal::Blue));
    assert_eq!(targets(&out), vec![(0, 1), (0, 2)]);

    let (_, out) = eval(with_signal(CellType::BlueSplitterRightUp, Direction::North, Signal::Blue));
    assert_eq!(targets(&out), vec![(0, -2), (1, 0)]);

    let (_, out) = eval(with_signal(CellType::BlueSplitterUpDiagonal, Direction::East, Signal::Blue));
    assert_eq!(targets(&out), vec![(1, 0), (1, 1)]);

    // Red does not travel on blue wires.
    let (cell, out) = eval(with_signal(CellType::BlueArrow, Direction::West, Signal::Red));
    assert!(out.is_empty());
    assert_eq!(cell.signal, Signal::None);
}

#[test]
fn source_primes_then_broadcasts() {
    let (primed, out) = eval(Cell::new(CellType::Source, Direction::North));
    assert_eq!(primed.signal, Signal::Red);
    assert!(out.is_empty());

    let (cell, out) = eval(primed);
    assert_eq!(cell.signal, Signal::Red);
    assert_eq!(targets(&out), vec![(1, 0), (-1, 0), (0, 1), (0, -1)]);
}

#[test]
fn pulse_arms_fires_then_charges() {
    let (armed, out) = eval(Cell::new(CellType::Pulse, Direction::North));
    assert_eq!(armed.signal, Signal::Red);
    assert!(out.is_empty());

    let (fired, out) = eval(armed);
    assert_eq!(fired.signal, Signal::Blue);
    assert_eq!(out.len(), 4);

    let (charged, out) = eval(fired);
    assert_eq!(charged.signal, Signal::Blue);
    assert!(out.is_empty());
}

#[test]
fn delay_walks_its_cycle() {
    let mut rng = 1u32;
    let mut cell = Cell::new(CellType::Delay, Direction::East);
    assert_eq!(power(&mut cell, &mut rng), Delivery::Powered);
    assert_eq!(cell.signal, Signal::Blue);

    let (cell, out) = eval(cell);
    assert_eq!(cell.signal, Signal::Red);
    assert!(out.is_empty());

    let (cell, out) = eval(cell);
    assert_eq!(cell.signal, Signal::DelayedAfterRed);
    assert_eq!(targets(&out), vec![(1, 0)]);

    let (cell, out) = eval(cell);
    assert_eq!(cell.signal, Signal::None);
    assert!(out.is_empty());
}

#[test]
fn delay_already_loaded_skips_to_fire() {
    let mut rng = 1u32;
    let mut cell = with_signal(CellType::Delay, Direction::East, Signal::Blue);
    power(&mut cell, &mut rng);
    assert_eq!(cell.signal, Signal::Red);
}

#[test]
fn not_gate_recovers_after_one_quiet_tick() {
    let mut rng = 1u32;
    let (high, out) = eval(Cell::new(CellType::Not, Direction::North));
    assert_eq!(high.signal, Signal::Yellow);
    assert!(out.is_empty());

    let (high, out) = eval(high);
    assert_eq!(high.signal, Signal::Yellow);
    assert_eq!(targets(&out), vec![(0, -1)]);

    let mut pulled = high;
    power(&mut pulled, &mut rng);
    assert_eq!(pulled.signal, Signal::None);
    let (recovered, out) = eval(pulled);
    assert!(out.is_empty());
    assert_eq!(recovered.signal, Signal::Yellow);
}

#[test]
fn and_needs_two_pulses_in_one_pass() {
    let mut rng = 1u32;
    let mut cell = Cell::new(CellType::And, Direction::North);
    power(&mut cell, &mut rng);
    assert_eq!(cell.signal, Signal::None);
    power(&mut cell, &mut rng);
    assert_eq!(cell.signal, Signal::Yellow);

    let (cell, out) = eval(cell);
    assert_eq!(cell.signal, Signal::None);
    assert_eq!(out.len(), 1);
}

#[test]
fn xor_tracks_parity() {
    let mut rng = 1u32;
    let mut cell = Cell::new(CellType::Xor, Direction::North);
    power(&mut cell, &mut rng);
    assert_eq!(cell.signal, Signal::Yellow);
    power(&mut cell, &mut rng);
    assert_eq!(cell.signal, Signal::None);
    power(&mut cell, &mut rng);
    assert_eq!(cell.signal, Signal::Yellow);
}

#[test]
fn latch_holds_output() {
    let mut rng = 1u32;
    let mut cell = Cell::new(CellType::Latch, Direction::North);
    power(&mut cell, &mut rng);
    power(&mut cell, &mut rng);
    let (cell, out) = eval(cell);
    assert_eq!(cell.signal, Signal::Yellow);
    assert_eq!(out.len(), 1);
    let (cell, out) = eval(cell);
    assert_eq!(cell.signal, Signal::Yellow);
    assert_eq!(out.len(), 1);
}

#[test]
fn flipflop_toggles_on_first_pulse_only() {
    let mut rng = 1u32;
    let mut cell = Cell::new(CellType::Flipflop, Direction::North);
    power(&mut cell, &mut rng);
    assert_eq!(cell.signal, Signal::Yellow);
    power(&mut cell, &mut rng);
    assert_eq!(cell.signal, Signal::Yellow);

    let (mut cell, _) = eval(cell);
    power(&mut cell, &mut rng);
    assert_eq!(cell.signal, Signal::None);
}

#[test]
fn block_suppresses_power_until_next_evaluate() {
    let rules = RuleRegistry::new();
    let mut rng = 1u32;
    let mut cell = with_signal(CellType::Arrow, Direction::North, Signal::None);
    cell.pulse_count = 3;
    assert_eq!(
        rules.deliver(&mut cell, X, Y, MessageKind::Block, &mut rng),
        Ok(Delivery::Blocked)
    );
    assert_eq!(cell.pulse_count, 0);
    assert_eq!(power(&mut cell, &mut rng), Delivery::Dropped);
    assert_eq!(cell.signal, Signal::Block);

    let (cell, out) = eval(cell);
    assert!(out.is_empty());
    assert_eq!(cell.signal, Signal::None);
}

#[test]
fn random_never_arms_its_output() {
    let mut rng = 12345u32;
    for _ in 0..64 {
        let mut cell = Cell::new(CellType::Random, Direction::North);
        power(&mut cell, &mut rng);
        assert!(matches!(cell.signal, Signal::None | Signal::Block));
        let (_, out) = eval(cell);
        assert!(out.is_empty());
    }
}

#[test]
fn buttons_fire_from_orange() {
    let mut rng = 1u32;
    let mut button = Cell::new(CellType::Button, Direction::West);
    power(&mut button, &mut rng);
    assert_eq!(button.signal, Signal::None);

    let (cell, out) = eval(with_signal(CellType::Button, Direction::West, Signal::Orange));
    assert_eq!(targets(&out), vec![(-1, 0)]);
    assert_eq!(cell.signal, Signal::None);

    let mut directional = Cell::new(CellType::DirectionalButton, Direction::South);
    power(&mut directional, &mut rng);
    assert_eq!(directional.signal, Signal::Orange);
    let (_, out) = eval(directional);
    assert_eq!(targets(&out), vec![(0, 1)]);
}

#[test]
fn evaluate_clears_pulse_count() {
    let mut cell = Cell::new(CellType::And, Direction::North);
    cell.pulse_count = 5;
    let (cell, _) = eval(cell);
    assert_eq!(cell.pulse_count, 0);
}
