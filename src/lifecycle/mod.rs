pub mod mapping;

use crate::state::InstanceState;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum StateClass {
    Stable,
    Transitional,
    Terminal,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr,
)]
pub enum TransitionDecision {
    Apply,
    NoChange,
    IgnoreTerminalViolation,
    IgnoreRegression,
}

impl InstanceState {
    pub fn class(self) -> StateClass {
        mapping::state_class(self)
    }

    pub fn is_terminal(self) -> bool {
        self.class() == StateClass::Terminal
    }

    pub fn is_transitional(self) -> bool {
        self.class() == StateClass::Transitional
    }
}

pub struct LifecycleEngine;

impl LifecycleEngine {
    pub fn successors(state: InstanceState) -> &'static [InstanceState] {
        mapping::successors(state)
    }

    /// Whether `to` can follow `from` after one or more lifecycle steps.
    ///
    /// Pollers can miss intermediate states, so an observation is accepted as
    /// long as some path leads to it.
    pub fn is_reachable(from: InstanceState, to: InstanceState) -> bool {
        let mut visited = [false; InstanceState::ALL.len()];
        let mut stack: Vec<InstanceState> = mapping::successors(from).to_vec();

        while let Some(state) = stack.pop() {
            if state == to {
                return true;
            }
            // Discriminants follow `InstanceState::ALL` order.
            let slot = &mut visited[state as usize];
            if *slot {
                continue;
            }
            *slot = true;
            stack.extend_from_slice(mapping::successors(state));
        }
        false
    }

    pub fn decide_transition(
        current: Option<InstanceState>,
        observed: InstanceState,
    ) -> TransitionDecision {
        let Some(current) = current else {
            return TransitionDecision::Apply;
        };

        if current == observed {
            return TransitionDecision::NoChange;
        }

        if current.is_terminal() {
            tracing::debug!(%current, %observed, "ignoring transition out of terminal state");
            return TransitionDecision::IgnoreTerminalViolation;
        }

        if Self::is_reachable(current, observed) {
            TransitionDecision::Apply
        } else {
            tracing::debug!(%current, %observed, "ignoring unreachable transition");
            TransitionDecision::IgnoreRegression
        }
    }
}
