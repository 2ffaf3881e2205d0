//! The live side of the library: hooks, subscribers and the machine itself.
//!
//! # Key Concepts
//!
//! - **Hooks**: Enter/exit callbacks and transition actions, sync or async
//! - **Subscriptions**: Listeners notified after each successful transition
//! - **State Machine**: Runs transitions one at a time and keeps history
//!
//! Hooks are the only suspension points. `can`, `reset` and every accessor
//! complete without awaiting.

mod error;
mod hook;
mod machine;
mod subscription;

pub use error::MachineError;
pub use hook::{Hook, HookError, HookPhase, HookResult};
pub use machine::StateMachine;
pub use subscription::{Listener, Subscription, SubscriptionHub};
