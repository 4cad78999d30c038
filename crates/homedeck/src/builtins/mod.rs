//! Built-in tools. `register_all` is the single place the dashboard's tool
//! set is assembled.

pub mod calculator;
pub mod color;
pub mod convert;
pub mod games;
pub mod lookup;
pub mod security;
pub mod study;
pub mod text;
pub mod timing;

use crate::tools::registry::ToolRegistry;

/// Register every built-in tool.
pub fn register_all(registry: &mut ToolRegistry) {
    registry.register(calculator::tool());
    registry.register(convert::tool());

    registry.register(timing::timer_tool());
    registry.register(timing::pomodoro_tool());
    registry.register(timing::metronome_tool());

    registry.register(color::color_picker_tool());
    registry.register(color::gradient_tool());
    registry.register(color::palette_tool());

    registry.register(text::word_counter_tool());
    registry.register(text::base64_tool());
    registry.register(text::lorem_tool());
    registry.register(text::ascii_art_tool());
    registry.register(text::markdown_tool());

    registry.register(security::password_generator_tool());
    registry.register(security::password_strength_tool());
    registry.register(security::hash_tool());

    registry.register(games::dice_tool());
    registry.register(games::eight_ball_tool());
    registry.register(games::quick_maths_tool());
    registry.register(games::typing_tool());
    registry.register(games::memory_tool());
    registry.register(games::simon_tool());
    registry.register(games::reaction_tool());

    registry.register(study::todo::tool());
    registry.register(study::habits::tool());
    registry.register(study::flashcards::tool());
    registry.register(study::quiz::tool());
    registry.register(study::sticky_notes::tool());

    registry.register(lookup::qr_tool());
    registry.register(lookup::dictionary_tool());
    registry.register(lookup::translator_tool());
}

/// A registry with every built-in registered.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_the_full_tool_set() {
        let registry = default_registry();
        assert_eq!(registry.len(), 31);
        for id in [
            "calculator",
            "metronome",
            "timer",
            "pomodoro",
            "color-picker",
            "todo-list",
            "habit-tracker",
            "flashcards",
            "quiz-maker",
            "dice-roller",
            "typing-test",
            "dictionary",
            "translator",
            "qr-generator",
        ] {
            assert!(registry.contains(id), "missing tool {id}");
        }
    }

    #[test]
    fn every_tool_has_title_and_icon() {
        let registry = default_registry();
        for tool in registry.iter() {
            assert!(!tool.title.is_empty(), "{} has no title", tool.tool_id);
            assert!(!tool.icon.is_empty(), "{} has no icon", tool.tool_id);
        }
    }
}
