//! Async Hooks
//!
//! This example runs an upload workflow whose hooks await real work, and
//! shows what happens when a second caller races an in-flight transition
//! and when a hook fails.
//!
//! Key concepts:
//! - Sync and async lifecycle hooks (exit, action, enter)
//! - Single-flight transitions: racing callers get `false`
//! - Rollback when a hook fails
//!
//! Run with: cargo run --example async_hooks

use flowstate::effects::{Hook, HookError, StateMachine};
use flowstate::graph::{StateConfig, StateGraph, Transition};
use flowstate::state_enum;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

state_enum! {
    enum UploadState {
        Idle,
        Uploading,
        Indexed,
    }
    final: [Indexed]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Async Hooks Example ===\n");

    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);

    let graph = StateGraph::builder()
        .initial(UploadState::Idle)
        .state(
            StateConfig::new(UploadState::Idle)
                .on_exit(Hook::sync(|| {
                    println!("  exit Idle");
                    Ok(())
                }))
                .on(
                    "upload",
                    Transition::to(UploadState::Uploading).action(Hook::future(move || {
                        let counter = Arc::clone(&counter);
                        async move {
                            let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
                            println!("  uploading (attempt {attempt})");
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            if attempt == 1 {
                                return Err::<(), HookError>("connection reset".into());
                            }
                            Ok(())
                        }
                    })),
                ),
        )
        .state(
            StateConfig::new(UploadState::Uploading)
                .on_enter(Hook::future(|| async {
                    println!("  enter Uploading");
                    Ok::<(), HookError>(())
                }))
                .on("indexed", Transition::to(UploadState::Indexed)),
        )
        .state(StateConfig::new(UploadState::Indexed))
        .build()?;

    let machine = StateMachine::new(graph)?;

    println!("First attempt:");
    match machine.transition("upload").await {
        Ok(accepted) => println!("  accepted: {accepted}"),
        Err(err) => println!("  failed: {err}"),
    }
    println!("  state after failure: {:?}", machine.current_state());

    println!("\nSecond attempt, raced by another caller:");
    let (first, second) = tokio::join!(machine.transition("upload"), machine.transition("upload"));
    println!("  first caller: {}", first?);
    println!("  second caller: {}", second?);
    println!("  state: {:?}", machine.current_state());

    machine.transition("indexed").await?;
    println!("\nUpload attempts made: {}", attempts.load(Ordering::SeqCst));
    println!("Transitions recorded: {}", machine.history().len());

    println!("\n=== Example Complete ===");
    Ok(())
}
