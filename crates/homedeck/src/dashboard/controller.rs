use crate::bus::Bus;
use crate::error::{CoreError, CoreResult};
use crate::event::{CoreEvent, ToolLifecyclePayload};
use crate::tools::registry::ToolRegistry;
use crate::tools::schema::ToolView;

use super::state::DashboardState;
use super::teardown::Teardown;

/// Owns the "currently open tool" lifecycle.
///
/// Two states: closed ⇄ open. Opening while already open is a direct
/// transition to the new tool; the outgoing tool's resources are released
/// during that transition, exactly as on close.
pub struct Controller {
    state: DashboardState,
    registry: ToolRegistry,
    teardowns: Vec<Teardown>,
    bus: Bus,
}

impl Controller {
    pub fn new(registry: ToolRegistry, bus: Bus) -> Self {
        Self {
            state: DashboardState::new(),
            registry,
            teardowns: Vec::new(),
            bus,
        }
    }

    /// Open a tool by key. Unknown keys mount a placeholder view rather than
    /// failing, so the transition semantics stay uniform.
    pub fn open(&mut self, tool_id: &str) -> ToolView {
        self.open_with(tool_id, Vec::new)
    }

    /// Open a tool and run its init, adopting whatever teardown handles the
    /// init returns.
    pub fn open_with<F>(&mut self, tool_id: &str, init: F) -> ToolView
    where
        F: FnOnce() -> Vec<Teardown>,
    {
        self.release_active();
        let view = self.registry.render(tool_id);
        self.state.mount(tool_id);
        self.teardowns = init();
        self.bus.publish(CoreEvent::ToolOpened(ToolLifecyclePayload {
            tool_id: tool_id.to_string(),
        }));
        view
    }

    /// Close the dashboard. A no-op when nothing is open.
    pub fn close(&mut self) {
        if !self.state.is_open() {
            return;
        }
        self.release_active();
        self.state.unmount();
    }

    /// Register a resource handle with the currently open tool.
    pub fn adopt(&mut self, teardown: Teardown) -> CoreResult<()> {
        if !self.state.is_open() {
            return Err(CoreError::InvalidInput(
                "no tool is open to own the resource".to_string(),
            ));
        }
        self.teardowns.push(teardown);
        Ok(())
    }

    fn release_active(&mut self) {
        for teardown in &mut self.teardowns {
            teardown.dispose();
        }
        self.teardowns.clear();
        if let Some(active) = self.state.active.as_ref() {
            self.bus.publish(CoreEvent::ToolClosed(ToolLifecyclePayload {
                tool_id: active.tool_id.clone(),
            }));
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn teardown_count(&self) -> usize {
        self.teardowns.len()
    }

    /// Validate the controller's invariants (see [`super::invariants`]).
    pub fn validate(&self) -> CoreResult<()> {
        super::invariants::validate_invariants(&self.state, &self.registry, self.teardowns.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::schema::{ToolDefinition, ToolHandler};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn make_handler() -> ToolHandler {
        Box::new(|_args, _ctx| Ok(json!({"ok": true})))
    }

    fn make_tool(id: &str, title: &str) -> ToolDefinition {
        ToolDefinition {
            tool_id: id.to_string(),
            title: title.to_string(),
            icon: "🔧".to_string(),
            keywords: vec![],
            input_schema: json!({}),
            output_schema: json!({}),
            handler: make_handler(),
        }
    }

    fn make_controller() -> Controller {
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("metronome", "Metronome"));
        registry.register(make_tool("timer", "Timer"));
        Controller::new(registry, Bus::new(8))
    }

    fn counting_teardown(count: &Arc<AtomicUsize>) -> Teardown {
        let c = count.clone();
        Teardown::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn open_mounts_and_renders() {
        let mut controller = make_controller();
        let view = controller.open("metronome");
        assert!(view.known);
        assert_eq!(view.title, "Metronome");
        assert!(controller.state().is_open());
        controller.validate().expect("invariants");
    }

    #[test]
    fn open_unknown_key_mounts_placeholder() {
        let mut controller = make_controller();
        let view = controller.open("mystery");
        assert!(!view.known);
        assert!(controller.state().is_open());
        controller.validate().expect("invariants");
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut controller = make_controller();
        controller.close();
        assert!(!controller.state().is_open());
        controller.validate().expect("invariants");
    }

    #[test]
    fn close_releases_resources() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut controller = make_controller();
        controller.open_with("metronome", || vec![counting_teardown(&count)]);
        assert_eq!(controller.teardown_count(), 1);

        controller.close();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(controller.teardown_count(), 0);
        controller.validate().expect("invariants");
    }

    #[test]
    fn switching_tools_releases_previous_resources() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut controller = make_controller();
        controller.open_with("metronome", || {
            vec![counting_teardown(&count), counting_teardown(&count)]
        });

        // Direct open-over-open transition: every metronome handle must go.
        controller.open("timer");
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(controller.teardown_count(), 0);
        assert_eq!(controller.state().active.as_ref().unwrap().tool_id, "timer");
        controller.validate().expect("invariants");
    }

    #[test]
    fn adopt_requires_open_tool() {
        let mut controller = make_controller();
        let err = controller.adopt(Teardown::noop()).expect_err("closed");
        assert!(matches!(err, CoreError::InvalidInput(_)));

        controller.open("timer");
        controller.adopt(Teardown::noop()).expect("open");
        assert_eq!(controller.teardown_count(), 1);
    }

    #[test]
    fn adopted_resources_release_on_close() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut controller = make_controller();
        controller.open("timer");
        controller.adopt(counting_teardown(&count)).expect("adopt");

        controller.close();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn lifecycle_events_published() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("timer", "Timer"));
        let mut controller = Controller::new(registry, bus);

        controller.open("timer");
        controller.close();

        let first = rx.recv().await.expect("opened");
        assert!(matches!(first, CoreEvent::ToolOpened(ref p) if p.tool_id == "timer"));
        let second = rx.recv().await.expect("closed");
        assert!(matches!(second, CoreEvent::ToolClosed(ref p) if p.tool_id == "timer"));
    }
}
