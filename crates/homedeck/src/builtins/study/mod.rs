//! Study tools: CRUD over one persisted document each.

pub mod flashcards;
pub mod habits;
pub mod quiz;
pub mod sticky_notes;
pub mod todo;
