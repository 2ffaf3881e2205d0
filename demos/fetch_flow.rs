//! Fetch Flow
//!
//! This example drives a document fetch through idle, loading and a
//! terminal state, with a guard that blocks the retry.
//!
//! Key concepts:
//! - Declaring a graph with the fluent builder
//! - `can` versus `transition` for guarded events
//! - Newest-first history and `reset`
//! - Exporting the static graph as a Mermaid diagram
//!
//! Run with: cargo run --example fetch_flow

use flowstate::core::State;
use flowstate::effects::StateMachine;
use flowstate::graph::{StateConfig, StateGraph, Transition};
use flowstate::helper::StateMachineHelper;
use flowstate::state_enum;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

state_enum! {
    enum FetchState {
        Idle,
        Loading,
        Success,
        Failure,
    }
    final: [Success]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Fetch Flow Example ===\n");

    let online = Arc::new(AtomicBool::new(false));
    let retry_gate = Arc::clone(&online);

    let graph = StateGraph::builder()
        .initial(FetchState::Idle)
        .state(StateConfig::new(FetchState::Idle).on("start", Transition::to(FetchState::Loading)))
        .state(
            StateConfig::new(FetchState::Loading)
                .on("success", Transition::to(FetchState::Success))
                .on("error", Transition::to(FetchState::Failure)),
        )
        .state(StateConfig::new(FetchState::Failure).on(
            "retry",
            Transition::to(FetchState::Loading).when(move || retry_gate.load(Ordering::SeqCst)),
        ))
        .state(StateConfig::new(FetchState::Success))
        .build()?;

    let machine = StateMachine::new(graph)?;
    let _subscription = machine.subscribe(|record| {
        println!("  {} --{}--> {}", record.from.name(), record.event, record.to.name());
    });

    machine.transition("start").await?;
    machine.transition("error").await?;

    println!("\nOffline: can retry? {}", machine.can("retry"));
    println!("Retry accepted: {}", machine.transition("retry").await?);

    online.store(true, Ordering::SeqCst);
    println!("Online: can retry? {}", machine.can("retry"));
    machine.transition("retry").await?;
    machine.transition("success").await?;
    println!("Final state reached: {}", machine.current_state().is_final());

    machine.reset(FetchState::Idle)?;
    println!("\nHistory (newest first):");
    for record in machine.history() {
        println!("  {:>7}: {} -> {}", record.event, record.from.name(), record.to.name());
    }

    println!("\nDiagram:\n{}", StateMachineHelper::visualize(&machine));
    println!("=== Example Complete ===");
    Ok(())
}
