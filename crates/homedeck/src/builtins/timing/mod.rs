//! Timing tools. The state machines live in the submodules; the spawn
//! helpers here run them on the tokio clock and report through the bus.
//! Every spawned task hands back a [`Teardown`] for the controller to own.

pub mod metronome;
pub mod pomodoro;
pub mod timer;

use std::time::Duration;

use serde_json::json;

use crate::bus::Bus;
use crate::dashboard::Teardown;
use crate::error::CoreError;
use crate::event::{CoreEvent, PomodoroPhasePayload};
use crate::tools::schema::ToolDefinition;

/// Run a countdown of `total_secs`, publishing a notification when it fires.
pub fn run_countdown(total_secs: u32, bus: Bus) -> Teardown {
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await; // first tick completes immediately
        for _ in 0..total_secs {
            interval.tick().await;
        }
        bus.publish(CoreEvent::TimerFinished);
        bus.publish(CoreEvent::notification("Timer", "Timer finished!"));
    });
    Teardown::from_abort(handle.abort_handle())
}

/// Arm an alarm `delay_secs` from now. Fires once.
pub fn run_alarm(delay_secs: u32, bus: Bus) -> Teardown {
    let handle = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(delay_secs as u64)).await;
        bus.publish(CoreEvent::notification("Alarm", "⏰ Alarm!"));
    });
    Teardown::from_abort(handle.abort_handle())
}

/// Drive a pomodoro cycle, publishing every phase change.
pub fn run_pomodoro(mut cycle: pomodoro::Pomodoro, bus: Bus) -> Teardown {
    cycle.start();
    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Some(change) = cycle.tick() {
                bus.publish(CoreEvent::PomodoroPhase(PomodoroPhasePayload {
                    phase: change.phase.label().to_string(),
                    session: change.session,
                }));
                let message = match change.phase {
                    pomodoro::Phase::Break => "Work session complete! Take a break.",
                    pomodoro::Phase::Work => "Break over! Back to work.",
                };
                bus.publish(CoreEvent::notification("Pomodoro", message));
            }
        }
    });
    Teardown::from_abort(handle.abort_handle())
}

pub fn timer_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "timer".to_string(),
        title: "Timer & Stopwatch".to_string(),
        icon: "⏱️".to_string(),
        keywords: vec!["countdown".into(), "stopwatch".into(), "alarm".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "seconds": {"type": "integer"},
                "time": {"type": "string"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, _ctx| {
            let op = args.get("op").and_then(|v| v.as_str()).unwrap_or("");
            match op {
                "format" => {
                    let seconds = args.get("seconds").and_then(|v| v.as_u64()).unwrap_or(0) as u32;
                    Ok(json!({ "display": timer::format_hms(seconds) }))
                }
                "alarmDelay" => {
                    let input = args.get("time").and_then(|v| v.as_str()).unwrap_or("");
                    let target = timer::parse_alarm_time(input)?;
                    let now = chrono::Local::now().time();
                    Ok(json!({ "delaySecs": timer::alarm_delay_secs(now, target) }))
                }
                other => Err(CoreError::InvalidInput(format!(
                    "unknown timer op: {other}"
                ))),
            }
        }),
    }
}

pub fn pomodoro_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "pomodoro".to_string(),
        title: "Pomodoro Timer".to_string(),
        icon: "🍅".to_string(),
        keywords: vec!["focus".into(), "work".into(), "break".into()],
        input_schema: json!({
            "type": "object",
            "properties": {
                "workMinutes": {"type": "integer"},
                "breakMinutes": {"type": "integer"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, _ctx| {
            let work = args
                .get("workMinutes")
                .and_then(|v| v.as_u64())
                .unwrap_or(pomodoro::DEFAULT_WORK_MINUTES as u64) as u32;
            let brk = args
                .get("breakMinutes")
                .and_then(|v| v.as_u64())
                .unwrap_or(pomodoro::DEFAULT_BREAK_MINUTES as u64) as u32;
            let cycle = pomodoro::Pomodoro::new(work, brk)?;
            Ok(json!({
                "display": cycle.display(),
                "phase": cycle.phase().label(),
                "workMinutes": work,
                "breakMinutes": brk
            }))
        }),
    }
}

pub fn metronome_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "metronome".to_string(),
        title: "Metronome".to_string(),
        icon: "🎵".to_string(),
        keywords: vec!["bpm".into(), "tempo".into(), "beat".into()],
        input_schema: json!({
            "type": "object",
            "properties": {
                "bpm": {"type": "integer"}
            }
        }),
        output_schema: json!({
            "type": "object",
            "properties": {
                "bpm": {"type": "integer"},
                "periodMs": {"type": "integer"}
            }
        }),
        handler: Box::new(|args, _ctx| {
            let bpm = args
                .get("bpm")
                .and_then(|v| v.as_u64())
                .unwrap_or(metronome::DEFAULT_BPM as u64) as u32;
            let bpm = metronome::clamp_bpm(bpm);
            Ok(json!({
                "bpm": bpm,
                "periodMs": metronome::beat_period(bpm).as_millis() as u64
            }))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test(start_paused = true)]
    async fn countdown_fires_finished_and_notification() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let _teardown = run_countdown(3, bus);

        let first = timeout(Duration::from_secs(10), rx.recv())
            .await
            .expect("timeout")
            .expect("recv");
        assert!(matches!(first, CoreEvent::TimerFinished));
        let second = rx.recv().await.expect("notification");
        assert!(matches!(second, CoreEvent::Notification(ref n) if n.title == "Timer"));
    }

    #[tokio::test(start_paused = true)]
    async fn disposed_countdown_never_fires() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let mut teardown = run_countdown(5, bus);
        teardown.dispose();

        assert!(timeout(Duration::from_secs(30), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn alarm_fires_once_after_delay() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let _teardown = run_alarm(60, bus);

        let event = timeout(Duration::from_secs(120), rx.recv())
            .await
            .expect("timeout")
            .expect("recv");
        assert!(matches!(event, CoreEvent::Notification(ref n) if n.title == "Alarm"));
        assert!(timeout(Duration::from_secs(120), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn pomodoro_task_reports_phase_change() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let cycle = pomodoro::Pomodoro::new(1, 1).unwrap();
        let _teardown = run_pomodoro(cycle, bus);

        let event = timeout(Duration::from_secs(120), rx.recv())
            .await
            .expect("timeout")
            .expect("recv");
        match event {
            CoreEvent::PomodoroPhase(change) => {
                assert_eq!(change.phase, "break");
                assert_eq!(change.session, 1);
            }
            other => panic!("expected phase change, got {other:?}"),
        }
    }
}
