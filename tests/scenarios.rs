//! End-to-end scenarios over a small fetch workflow.

use flowstate::core::State;
use flowstate::effects::{Hook, HookError, HookPhase, StateMachine};
use flowstate::graph::{StateConfig, StateGraph, Transition};
use flowstate::state_enum;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

state_enum! {
    enum Fetch {
        Idle,
        Loading,
        Success,
    }
    final: [Success]
}

fn fetch_machine(start: Transition<Fetch>) -> StateMachine<Fetch> {
    let graph = StateGraph::builder()
        .initial(Fetch::Idle)
        .state(StateConfig::new(Fetch::Idle).on("start", start))
        .state(StateConfig::new(Fetch::Loading).on("success", Transition::to(Fetch::Success)))
        .state(StateConfig::new(Fetch::Success))
        .build()
        .unwrap();
    StateMachine::new(graph).unwrap()
}

#[tokio::test]
async fn successful_flow_records_newest_first() {
    let machine = fetch_machine(Transition::to(Fetch::Loading));

    assert!(machine.transition("start").await.unwrap());
    assert!(machine.transition("success").await.unwrap());

    assert_eq!(machine.current_state(), Fetch::Success);
    let history: Vec<(String, Fetch, Fetch)> = machine
        .history()
        .into_iter()
        .map(|record| (record.event, record.from, record.to))
        .collect();
    assert_eq!(
        history,
        vec![
            ("success".to_string(), Fetch::Loading, Fetch::Success),
            ("start".to_string(), Fetch::Idle, Fetch::Loading),
        ]
    );
}

#[tokio::test]
async fn rejecting_guard_leaves_machine_untouched() {
    let machine = fetch_machine(Transition::to(Fetch::Loading).when(|| false));

    assert!(!machine.can("start"));
    assert!(!machine.transition("start").await.unwrap());
    assert_eq!(machine.current_state(), Fetch::Idle);
    assert!(machine.history().is_empty());
}

#[tokio::test]
async fn failing_action_rolls_back_and_rethrows() {
    let machine = fetch_machine(
        Transition::to(Fetch::Loading)
            .action(Hook::sync(|| Err::<(), HookError>("boom".into()))),
    );

    let err = machine.transition("start").await.unwrap_err();
    assert_eq!(err.phase(), Some(HookPhase::Transition));
    assert_eq!(machine.current_state(), Fetch::Idle);
    assert!(!machine.is_transitioning());
    assert!(machine.history().is_empty());
    assert_eq!(err.into_hook_error().unwrap().to_string(), "boom");
}

#[tokio::test]
async fn concurrent_transitions_run_hooks_once() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let machine = fetch_machine(Transition::to(Fetch::Loading).action(Hook::future(move || {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<(), HookError>(())
        }
    })));

    let (first, second, third) = tokio::join!(
        machine.transition("start"),
        machine.transition("start"),
        machine.transition("start"),
    );
    let outcomes = [first.unwrap(), second.unwrap(), third.unwrap()];

    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(outcomes.iter().filter(|accepted| **accepted).count(), 1);
    assert_eq!(machine.current_state(), Fetch::Loading);
    assert_eq!(machine.history().len(), 1);
    assert!(!machine.is_transitioning());
}

#[tokio::test]
async fn busy_flag_is_visible_while_hooks_run() {
    let machine = Arc::new(fetch_machine(Transition::to(Fetch::Loading).action(Hook::future(
        || async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok::<(), HookError>(())
        },
    ))));

    let runner = Arc::clone(&machine);
    let task = tokio::spawn(async move { runner.transition("start").await });

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(machine.is_transitioning());
    assert!(!machine.transition("start").await.unwrap());

    assert!(task.await.unwrap().unwrap());
    assert!(!machine.is_transitioning());
    assert_eq!(machine.current_state(), Fetch::Loading);
}

#[tokio::test]
async fn reset_recovers_from_terminal_state() {
    let machine = fetch_machine(Transition::to(Fetch::Loading));
    assert!(machine.transition("start").await.unwrap());
    assert!(machine.transition("success").await.unwrap());
    assert!(machine.current_state().is_final());
    assert!(machine.available_transitions().is_empty());

    machine.reset(Fetch::Idle).unwrap();

    assert_eq!(machine.current_state(), Fetch::Idle);
    let latest = machine.last_transition().unwrap();
    assert!(latest.is_reset());
    assert_eq!(latest.from, Fetch::Success);
    assert_eq!(machine.history().len(), 3);
    assert!(machine.transition("start").await.unwrap());
}

#[tokio::test]
async fn history_serializes_for_audit_export() {
    let machine = fetch_machine(Transition::to(Fetch::Loading));
    assert!(machine.transition("start").await.unwrap());

    let json = serde_json::to_value(machine.history()).unwrap();
    assert_eq!(json[0]["event"], "start");
    assert_eq!(json[0]["from"], "Idle");
    assert_eq!(json[0]["to"], "Loading");
    assert_eq!(Fetch::Loading.name(), "Loading");
}
