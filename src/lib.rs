#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod error;
pub mod lifecycle;
pub mod state;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, ErrorKind, UserError};
pub use lifecycle::mapping::{settled_target, state_class, successors};
pub use lifecycle::{LifecycleEngine, StateClass, TransitionDecision};
pub use state::{InstanceState, STATE_CODE_MASK, STATE_CODE_MAX, code_from_f64};
pub use types::{RawInstance, RawInstanceState, parse_instances};
