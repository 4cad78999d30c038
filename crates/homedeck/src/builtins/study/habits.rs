//! Habit tracker with per-day marks and streaks.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::storage::docs::{Habit, HabitLog};
use crate::tools::schema::ToolDefinition;

pub const TOOL_ID: &str = "habit-tracker";

pub fn add(log: &mut HabitLog, name: &str) -> CoreResult<Habit> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::InvalidInput("habit name is empty".to_string()));
    }
    let habit = Habit {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        dates: Default::default(),
    };
    log.habits.push(habit.clone());
    Ok(habit)
}

pub fn remove(log: &mut HabitLog, id: &str) -> CoreResult<()> {
    let before = log.habits.len();
    log.habits.retain(|habit| habit.id != id);
    if log.habits.len() == before {
        return Err(CoreError::NotFound(format!("habit {id}")));
    }
    Ok(())
}

/// Toggle today's mark. Returns whether the habit is now done today.
pub fn mark_day(log: &mut HabitLog, id: &str, day: NaiveDate) -> CoreResult<bool> {
    let habit = log
        .habits
        .iter_mut()
        .find(|habit| habit.id == id)
        .ok_or_else(|| CoreError::NotFound(format!("habit {id}")))?;
    if habit.dates.remove(&day) {
        Ok(false)
    } else {
        habit.dates.insert(day);
        Ok(true)
    }
}

/// Consecutive marked days ending today — or yesterday, so an unmarked
/// today does not zero a live streak.
pub fn streak(habit: &Habit, today: NaiveDate) -> u32 {
    let mut day = if habit.dates.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };
    let mut count = 0;
    while habit.dates.contains(&day) {
        count += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    count
}

pub fn tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: TOOL_ID.to_string(),
        title: "Habit Tracker".to_string(),
        icon: "📅".to_string(),
        keywords: vec!["streak".into(), "daily".into(), "routine".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "name": {"type": "string"},
                "id": {"type": "string"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, ctx| {
            let op = args.get("op").and_then(|v| v.as_str()).unwrap_or("");
            let today = chrono::Local::now().date_naive();
            match op {
                "list" => {
                    let habits: Vec<serde_json::Value> = ctx
                        .docs
                        .habits()
                        .habits
                        .iter()
                        .map(|habit| {
                            json!({
                                "id": habit.id,
                                "name": habit.name,
                                "doneToday": habit.dates.contains(&today),
                                "streak": streak(habit, today)
                            })
                        })
                        .collect();
                    Ok(json!({ "habits": habits }))
                }
                "add" => {
                    let name = args.get("name").and_then(|v| v.as_str()).unwrap_or("");
                    let habit = add(ctx.docs.habits_mut(), name)?;
                    Ok(json!({ "id": habit.id, "name": habit.name }))
                }
                "markToday" => {
                    let id = args.get("id").and_then(|v| v.as_str()).unwrap_or("");
                    let done = mark_day(ctx.docs.habits_mut(), id, today)?;
                    Ok(json!({ "doneToday": done }))
                }
                "delete" => {
                    let id = args.get("id").and_then(|v| v.as_str()).unwrap_or("");
                    remove(ctx.docs.habits_mut(), id)?;
                    Ok(json!({ "deleted": true }))
                }
                other => Err(CoreError::InvalidInput(format!(
                    "unknown habit op: {other}"
                ))),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_requires_name() {
        let mut log = HabitLog::default();
        assert!(add(&mut log, "").is_err());
        assert!(add(&mut log, "read 20 mins").is_ok());
    }

    #[test]
    fn mark_day_toggles() {
        let mut log = HabitLog::default();
        let habit = add(&mut log, "stretch").unwrap();
        let today = date(2026, 8, 6);
        assert!(mark_day(&mut log, &habit.id, today).unwrap());
        assert!(!mark_day(&mut log, &habit.id, today).unwrap());
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let mut log = HabitLog::default();
        let habit = add(&mut log, "run").unwrap();
        let today = date(2026, 8, 6);
        for offset in 0..3 {
            mark_day(&mut log, &habit.id, today - chrono::Days::new(offset)).unwrap();
        }
        assert_eq!(streak(&log.habits[0], today), 3);
    }

    #[test]
    fn gap_breaks_streak() {
        let mut log = HabitLog::default();
        let habit = add(&mut log, "run").unwrap();
        let today = date(2026, 8, 6);
        mark_day(&mut log, &habit.id, today).unwrap();
        // Two days ago, with yesterday missing.
        mark_day(&mut log, &habit.id, date(2026, 8, 4)).unwrap();
        assert_eq!(streak(&log.habits[0], today), 1);
    }

    #[test]
    fn unmarked_today_keeps_yesterdays_streak() {
        let mut log = HabitLog::default();
        let habit = add(&mut log, "run").unwrap();
        mark_day(&mut log, &habit.id, date(2026, 8, 5)).unwrap();
        mark_day(&mut log, &habit.id, date(2026, 8, 4)).unwrap();
        assert_eq!(streak(&log.habits[0], date(2026, 8, 6)), 2);
    }

    #[test]
    fn no_marks_means_zero_streak() {
        let mut log = HabitLog::default();
        add(&mut log, "run").unwrap();
        assert_eq!(streak(&log.habits[0], date(2026, 8, 6)), 0);
    }
}
