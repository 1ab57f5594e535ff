use crate::lifecycle::StateClass;
use crate::state::InstanceState;

/// Classification of a state by whether the instance is expected to leave it
/// on its own.
pub fn state_class(state: InstanceState) -> StateClass {
    match state {
        InstanceState::Running | InstanceState::Stopped => StateClass::Stable,
        InstanceState::Pending | InstanceState::Stopping | InstanceState::ShuttingDown => {
            StateClass::Transitional
        }
        InstanceState::Terminated => StateClass::Terminal,
    }
}

/// Direct successors in the EC2 instance lifecycle.
///
/// Reboot keeps an instance in `running`, so it has no edge here. Any
/// non-terminal state can be terminated, which always passes through
/// `shutting-down`.
pub fn successors(state: InstanceState) -> &'static [InstanceState] {
    match state {
        InstanceState::Pending => &[InstanceState::Running, InstanceState::ShuttingDown],
        InstanceState::Running => &[InstanceState::Stopping, InstanceState::ShuttingDown],
        InstanceState::Stopping => &[InstanceState::Stopped, InstanceState::ShuttingDown],
        InstanceState::Stopped => &[InstanceState::Pending, InstanceState::ShuttingDown],
        InstanceState::ShuttingDown => &[InstanceState::Terminated],
        InstanceState::Terminated => &[],
    }
}

/// State an instance settles in once the current transition completes, or
/// `None` if it is not transitioning.
pub fn settled_target(state: InstanceState) -> Option<InstanceState> {
    match state {
        InstanceState::Pending => Some(InstanceState::Running),
        InstanceState::Stopping => Some(InstanceState::Stopped),
        InstanceState::ShuttingDown => Some(InstanceState::Terminated),
        InstanceState::Running | InstanceState::Stopped | InstanceState::Terminated => None,
    }
}
