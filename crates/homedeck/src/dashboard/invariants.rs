use crate::error::{CoreError, CoreResult};
use crate::tools::registry::ToolRegistry;

use super::state::DashboardState;

/// Validate dashboard invariants. Returns an error if any is violated.
pub fn validate_invariants(
    state: &DashboardState,
    registry: &ToolRegistry,
    teardown_count: usize,
) -> CoreResult<()> {
    // Invariant 1: a closed dashboard holds no resource handles.
    if state.active.is_none() && teardown_count > 0 {
        return Err(CoreError::InvariantViolation(format!(
            "closed dashboard holds {teardown_count} teardown handles"
        )));
    }

    // Invariant 2: a mounted placeholder cannot own resources — only
    // registered tools start anything releasable.
    if let Some(active) = state.active.as_ref() {
        if !registry.contains(&active.tool_id) && teardown_count > 0 {
            return Err(CoreError::InvariantViolation(format!(
                "placeholder tool {} owns {teardown_count} teardown handles",
                active.tool_id
            )));
        }
    }

    // Invariant 3: timestamps are monotone.
    if state.last_modified < state.created_at {
        return Err(CoreError::InvariantViolation(
            "last_modified precedes created_at".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_registry() -> ToolRegistry {
        ToolRegistry::new()
    }

    #[test]
    fn closed_empty_state_passes() {
        let state = DashboardState::new();
        assert!(validate_invariants(&state, &empty_registry(), 0).is_ok());
    }

    #[test]
    fn closed_state_with_teardowns_fails() {
        let state = DashboardState::new();
        let err = validate_invariants(&state, &empty_registry(), 1).unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));
    }

    #[test]
    fn placeholder_with_teardowns_fails() {
        let mut state = DashboardState::new();
        state.mount("unregistered");
        let err = validate_invariants(&state, &empty_registry(), 2).unwrap_err();
        match err {
            CoreError::InvariantViolation(msg) => {
                assert!(msg.contains("placeholder"), "got: {msg}");
            }
            _ => panic!("expected InvariantViolation"),
        }
    }

    #[test]
    fn placeholder_without_teardowns_passes() {
        let mut state = DashboardState::new();
        state.mount("unregistered");
        assert!(validate_invariants(&state, &empty_registry(), 0).is_ok());
    }

    #[test]
    fn backwards_timestamps_fail() {
        let mut state = DashboardState::new();
        state.last_modified = state.created_at - 1;
        let err = validate_invariants(&state, &empty_registry(), 0).unwrap_err();
        assert!(matches!(err, CoreError::InvariantViolation(_)));
    }
}
