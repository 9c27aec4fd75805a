//! Property-based tests for plan ordering and composition equivalence.

use proptest::prelude::*;
use weft_tests::prelude::*;

/// One composition call.
#[derive(Debug, Clone)]
enum Op {
    Append(bool),
    Choice(bool, bool),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Append),
        (any::<bool>(), any::<bool>()).prop_map(|(p, f)| Op::Choice(p, f)),
    ]
}

fn apply_ops(
    mut builder: ActionSequenceBuilder<Transaction>,
    probe: &Probe,
    ops: &[Op],
) -> BuildResult<ActionSequenceBuilder<Transaction>> {
    for (i, op) in ops.iter().enumerate() {
        builder = match *op {
            Op::Append(ok) => builder.append(probe.step(format!("s{i}"), ok))?,
            Op::Choice(p, f) => builder.append_choice(
                probe.step(format!("p{i}"), p),
                probe.step(format!("f{i}"), f),
            )?,
        };
    }
    Ok(builder)
}

fn expected_results(ops: &[Op]) -> Vec<bool> {
    ops.iter()
        .map(|op| match *op {
            Op::Append(ok) => ok,
            Op::Choice(p, f) => p || f,
        })
        .collect()
}

fn expected_calls(ops: &[Op]) -> Vec<String> {
    let mut calls = Vec::new();
    for (i, op) in ops.iter().enumerate() {
        match *op {
            Op::Append(_) => calls.push(format!("s{i}")),
            Op::Choice(p, _) => {
                calls.push(format!("p{i}"));
                if !p {
                    calls.push(format!("f{i}"));
                }
            }
        }
    }
    calls
}

proptest! {
    /// Playing a plan yields one result per composition call, in call order.
    #[test]
    fn plan_follows_call_order(ops in prop::collection::vec(op_strategy(), 0..24)) {
        let stm = Arc::new(Stm::new());
        let probe = Probe::new();

        let builder = transaction(&stm).start_build().unwrap();
        let tx = apply_ops(builder, &probe, &ops)
            .and_then(|b| b.finalize())
            .unwrap()
            .retrieve();

        prop_assert_eq!(tx.action_count(), ops.len());
        prop_assert!(probe.is_untouched());
        prop_assert_eq!(play(&tx).unwrap(), expected_results(&ops));
        prop_assert_eq!(probe.calls(), expected_calls(&ops));
    }

    /// Starting with a step is the same as starting empty and appending it.
    #[test]
    fn start_with_step_equals_start_then_append(
        first in any::<bool>(),
        rest in prop::collection::vec(any::<bool>(), 0..12),
    ) {
        let stm = Arc::new(Stm::new());
        let short_probe = Probe::new();
        let long_probe = Probe::new();
        let ops: Vec<Op> = rest.iter().copied().map(Op::Append).collect();

        let short = transaction(&stm)
            .start_build_with(short_probe.step("first", first))
            .and_then(|b| apply_ops(b, &short_probe, &ops))
            .and_then(|b| b.finalize())
            .unwrap()
            .retrieve();
        let long = transaction(&stm)
            .start_build()
            .and_then(|b| b.append(long_probe.step("first", first)))
            .and_then(|b| apply_ops(b, &long_probe, &ops))
            .and_then(|b| b.finalize())
            .unwrap()
            .retrieve();

        prop_assert_eq!(short.action_count(), long.action_count());
        prop_assert_eq!(play(&short), play(&long));
        prop_assert_eq!(short_probe.calls(), long_probe.calls());
    }

    /// Finalizing again without appends installs the same actions.
    #[test]
    fn finalize_is_idempotent(ops in prop::collection::vec(op_strategy(), 0..12)) {
        let stm = Arc::new(Stm::new());
        let probe = Probe::new();

        let builder = transaction(&stm).start_build().unwrap();
        let builder = apply_ops(builder, &probe, &ops).and_then(|b| b.finalize()).unwrap();
        let first = builder.handle().plan().unwrap();
        let builder = builder.finalize().unwrap();
        let second = builder.handle().plan().unwrap();

        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            prop_assert!(a.ptr_eq(b));
        }
    }

    /// Calls made before `start_build` never install a plan.
    #[test]
    fn calls_before_start_install_nothing(op in op_strategy()) {
        let stm = Arc::new(Stm::new());
        let probe = Probe::new();
        let builder = transaction(&stm);
        let handle = Arc::clone(builder.handle());

        let result = apply_ops(builder, &probe, std::slice::from_ref(&op));

        prop_assert!(result.unwrap_err().is_not_started());
        prop_assert!(handle.plan().is_none());
    }
}
