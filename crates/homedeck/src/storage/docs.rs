//! Versioned typed documents.
//!
//! Every tool that persists anything owns exactly one document under the
//! `docs/` prefix. Documents carry a version field so a future schema change
//! can migrate instead of silently misreading old data.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{CoreError, CoreResult};
use crate::storage::Storage;

const DOCS_PREFIX: &str = "docs";

/// A persistable document with a stable key and schema version.
pub trait Document: Serialize + DeserializeOwned + Default {
    const KEY: &'static str;
    const VERSION: u32;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<D> {
    version: u32,
    data: D,
}

/// Load a document, returning the default when it has never been written.
pub async fn load<D: Document>(storage: &dyn Storage) -> CoreResult<D> {
    match storage.read(&[DOCS_PREFIX, D::KEY]).await? {
        None => Ok(D::default()),
        Some(value) => {
            let envelope: Envelope<D> = serde_json::from_value(value).map_err(|error| {
                CoreError::Internal(format!("document {} parse error: {error}", D::KEY))
            })?;
            if envelope.version != D::VERSION {
                return Err(CoreError::InvalidInput(format!(
                    "document {} has version {}, expected {}",
                    D::KEY,
                    envelope.version,
                    D::VERSION
                )));
            }
            Ok(envelope.data)
        }
    }
}

/// Persist a document under its key.
pub async fn save<D: Document>(storage: &dyn Storage, doc: &D) -> CoreResult<()> {
    let envelope = Envelope {
        version: D::VERSION,
        data: doc,
    };
    let value = serde_json::to_value(&envelope)
        .map_err(|error| CoreError::Internal(format!("document {} serialize error: {error}", D::KEY)))?;
    storage.write(&[DOCS_PREFIX, D::KEY], &value).await
}

// --- Tool documents ---

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TodoList {
    pub items: Vec<TodoItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl Document for TodoList {
    const KEY: &'static str = "todos";
    const VERSION: u32 = 1;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HabitLog {
    pub habits: Vec<Habit>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    pub id: String,
    pub name: String,
    /// ISO dates on which the habit was marked done.
    pub dates: BTreeSet<chrono::NaiveDate>,
}

impl Document for HabitLog {
    const KEY: &'static str = "habits";
    const VERSION: u32 = 1;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlashcardDecks {
    pub decks: BTreeMap<String, Vec<Flashcard>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

impl Document for FlashcardDecks {
    const KEY: &'static str = "flashcards";
    const VERSION: u32 = 1;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuizBank {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

impl Document for QuizBank {
    const KEY: &'static str = "quiz";
    const VERSION: u32 = 1;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StickyNotes {
    pub notes: Vec<StickyNote>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StickyNote {
    pub id: String,
    pub text: String,
    pub color: String,
}

impl Document for StickyNotes {
    const KEY: &'static str = "sticky-notes";
    const VERSION: u32 = 1;
}

/// One scalar per game, keyed by game id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BestScores {
    pub scores: BTreeMap<String, i64>,
}

impl Document for BestScores {
    const KEY: &'static str = "best-scores";
    const VERSION: u32 = 1;
}

impl BestScores {
    /// Record a score; `higher_is_better` decides the keep direction.
    /// Returns `true` when the stored best changed.
    pub fn record(&mut self, game: &str, score: i64, higher_is_better: bool) -> bool {
        match self.scores.get(game) {
            Some(&best) if higher_is_better && score <= best => false,
            Some(&best) if !higher_is_better && score >= best => false,
            _ => {
                self.scores.insert(game.to_string(), score);
                true
            }
        }
    }
}

/// The working set of documents tool handlers may touch.
///
/// Handlers are synchronous; the invoke layer loads this set up front, hands
/// mutable access to the handler, and persists everything back only when a
/// mutable accessor was taken.
#[derive(Debug, Default)]
pub struct DocumentSet {
    todos: TodoList,
    habits: HabitLog,
    flashcards: FlashcardDecks,
    quiz: QuizBank,
    sticky_notes: StickyNotes,
    best_scores: BestScores,
    dirty: bool,
}

impl DocumentSet {
    pub async fn load_all(storage: &dyn Storage) -> CoreResult<Self> {
        Ok(Self {
            todos: load(storage).await?,
            habits: load(storage).await?,
            flashcards: load(storage).await?,
            quiz: load(storage).await?,
            sticky_notes: load(storage).await?,
            best_scores: load(storage).await?,
            dirty: false,
        })
    }

    pub async fn save_all(&self, storage: &dyn Storage) -> CoreResult<()> {
        save(storage, &self.todos).await?;
        save(storage, &self.habits).await?;
        save(storage, &self.flashcards).await?;
        save(storage, &self.quiz).await?;
        save(storage, &self.sticky_notes).await?;
        save(storage, &self.best_scores).await?;
        Ok(())
    }

    pub fn todos(&self) -> &TodoList {
        &self.todos
    }

    pub fn todos_mut(&mut self) -> &mut TodoList {
        self.dirty = true;
        &mut self.todos
    }

    pub fn habits(&self) -> &HabitLog {
        &self.habits
    }

    pub fn habits_mut(&mut self) -> &mut HabitLog {
        self.dirty = true;
        &mut self.habits
    }

    pub fn flashcards(&self) -> &FlashcardDecks {
        &self.flashcards
    }

    pub fn flashcards_mut(&mut self) -> &mut FlashcardDecks {
        self.dirty = true;
        &mut self.flashcards
    }

    pub fn quiz(&self) -> &QuizBank {
        &self.quiz
    }

    pub fn quiz_mut(&mut self) -> &mut QuizBank {
        self.dirty = true;
        &mut self.quiz
    }

    pub fn sticky_notes(&self) -> &StickyNotes {
        &self.sticky_notes
    }

    pub fn sticky_notes_mut(&mut self) -> &mut StickyNotes {
        self.dirty = true;
        &mut self.sticky_notes
    }

    pub fn best_scores(&self) -> &BestScores {
        &self.best_scores
    }

    pub fn best_scores_mut(&mut self) -> &mut BestScores {
        self.dirty = true;
        &mut self.best_scores
    }

    /// Clears and returns the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;
    use serde_json::json;

    #[tokio::test]
    async fn missing_document_loads_default() {
        let storage = MemoryStorage::new();
        let todos: TodoList = load(&storage).await.expect("load");
        assert!(todos.items.is_empty());
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let storage = MemoryStorage::new();
        let mut todos = TodoList::default();
        todos.items.push(TodoItem {
            id: "1".to_string(),
            text: "water plants".to_string(),
            completed: false,
        });
        save(&storage, &todos).await.expect("save");
        let loaded: TodoList = load(&storage).await.expect("load");
        assert_eq!(loaded, todos);
    }

    #[tokio::test]
    async fn version_mismatch_rejected() {
        let storage = MemoryStorage::new();
        storage
            .write(
                &["docs", TodoList::KEY],
                &json!({ "version": 99, "data": { "items": [] } }),
            )
            .await
            .expect("write");
        let err = load::<TodoList>(&storage).await.expect_err("version");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn document_set_saves_only_when_dirty() {
        let storage = MemoryStorage::new();
        let mut set = DocumentSet::load_all(&storage).await.expect("load");
        assert!(!set.take_dirty());

        set.todos_mut().items.push(TodoItem {
            id: "1".to_string(),
            text: "ship it".to_string(),
            completed: false,
        });
        assert!(set.take_dirty());
        assert!(!set.take_dirty());

        set.save_all(&storage).await.expect("save");
        let reloaded = DocumentSet::load_all(&storage).await.expect("reload");
        assert_eq!(reloaded.todos().items.len(), 1);
    }

    #[test]
    fn best_scores_keep_direction() {
        let mut best = BestScores::default();
        assert!(best.record("quick-maths", 10, true));
        assert!(!best.record("quick-maths", 9, true));
        assert!(best.record("quick-maths", 11, true));

        assert!(best.record("reaction", 250, false));
        assert!(!best.record("reaction", 300, false));
        assert!(best.record("reaction", 200, false));
        assert_eq!(best.scores["reaction"], 200);
    }
}
