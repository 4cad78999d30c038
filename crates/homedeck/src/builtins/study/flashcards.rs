//! Flashcard decks with a wraparound review session.

use serde_json::json;

use crate::error::{CoreError, CoreResult};
use crate::storage::docs::{Flashcard, FlashcardDecks};
use crate::tools::schema::ToolDefinition;

pub const TOOL_ID: &str = "flashcards";

pub fn create_deck(decks: &mut FlashcardDecks, name: &str) -> CoreResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::InvalidInput("deck name is empty".to_string()));
    }
    if decks.decks.contains_key(name) {
        return Err(CoreError::InvalidInput(format!(
            "deck already exists: {name}"
        )));
    }
    decks.decks.insert(name.to_string(), Vec::new());
    Ok(())
}

pub fn add_card(
    decks: &mut FlashcardDecks,
    deck: &str,
    front: &str,
    back: &str,
) -> CoreResult<Flashcard> {
    let front = front.trim();
    let back = back.trim();
    if front.is_empty() || back.is_empty() {
        return Err(CoreError::InvalidInput(
            "both card sides are required".to_string(),
        ));
    }
    let cards = decks
        .decks
        .get_mut(deck)
        .ok_or_else(|| CoreError::NotFound(format!("deck {deck}")))?;
    let card = Flashcard {
        front: front.to_string(),
        back: back.to_string(),
    };
    cards.push(card.clone());
    Ok(card)
}

pub fn delete_deck(decks: &mut FlashcardDecks, name: &str) -> CoreResult<()> {
    decks
        .decks
        .remove(name)
        .map(|_| ())
        .ok_or_else(|| CoreError::NotFound(format!("deck {name}")))
}

/// One pass through a deck: next/prev wrap around, flipping shows the back.
#[derive(Debug)]
pub struct DeckSession {
    cards: Vec<Flashcard>,
    index: usize,
    flipped: bool,
}

impl DeckSession {
    pub fn open(decks: &FlashcardDecks, name: &str) -> CoreResult<Self> {
        let cards = decks
            .decks
            .get(name)
            .ok_or_else(|| CoreError::NotFound(format!("deck {name}")))?;
        if cards.is_empty() {
            return Err(CoreError::InvalidInput(format!("deck {name} is empty")));
        }
        Ok(Self {
            cards: cards.clone(),
            index: 0,
            flipped: false,
        })
    }

    pub fn visible_side(&self) -> &str {
        let card = &self.cards[self.index];
        if self.flipped {
            &card.back
        } else {
            &card.front
        }
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Moving always lands on the front side.
    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.cards.len();
        self.flipped = false;
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.cards.len() - 1) % self.cards.len();
        self.flipped = false;
    }

    /// `(current, total)` counter, 1-based.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.cards.len())
    }
}

pub fn tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: TOOL_ID.to_string(),
        title: "Flashcards".to_string(),
        icon: "🗂️".to_string(),
        keywords: vec!["deck".into(), "study".into(), "memorize".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "deck": {"type": "string"},
                "front": {"type": "string"},
                "back": {"type": "string"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, ctx| {
            let op = args.get("op").and_then(|v| v.as_str()).unwrap_or("");
            match op {
                "listDecks" => {
                    let names: Vec<&String> = ctx.docs.flashcards().decks.keys().collect();
                    Ok(json!({ "decks": names }))
                }
                "createDeck" => {
                    let name = args.get("deck").and_then(|v| v.as_str()).unwrap_or("");
                    create_deck(ctx.docs.flashcards_mut(), name)?;
                    Ok(json!({ "created": name }))
                }
                "addCard" => {
                    let deck = args.get("deck").and_then(|v| v.as_str()).unwrap_or("");
                    let front = args.get("front").and_then(|v| v.as_str()).unwrap_or("");
                    let back = args.get("back").and_then(|v| v.as_str()).unwrap_or("");
                    let card = add_card(ctx.docs.flashcards_mut(), deck, front, back)?;
                    Ok(json!({ "card": card }))
                }
                "cards" => {
                    let deck = args.get("deck").and_then(|v| v.as_str()).unwrap_or("");
                    let cards = ctx
                        .docs
                        .flashcards()
                        .decks
                        .get(deck)
                        .ok_or_else(|| CoreError::NotFound(format!("deck {deck}")))?;
                    Ok(json!({ "cards": cards }))
                }
                "deleteDeck" => {
                    let deck = args.get("deck").and_then(|v| v.as_str()).unwrap_or("");
                    delete_deck(ctx.docs.flashcards_mut(), deck)?;
                    Ok(json!({ "deleted": true }))
                }
                other => Err(CoreError::InvalidInput(format!(
                    "unknown flashcards op: {other}"
                ))),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_decks() -> FlashcardDecks {
        let mut decks = FlashcardDecks::default();
        create_deck(&mut decks, "Rust").unwrap();
        add_card(&mut decks, "Rust", "ownership", "one owner at a time").unwrap();
        add_card(&mut decks, "Rust", "borrow", "reference without owning").unwrap();
        decks
    }

    #[test]
    fn deck_names_must_be_unique_and_non_empty() {
        let mut decks = FlashcardDecks::default();
        assert!(create_deck(&mut decks, " ").is_err());
        create_deck(&mut decks, "A").unwrap();
        assert!(create_deck(&mut decks, "A").is_err());
    }

    #[test]
    fn cards_need_both_sides() {
        let mut decks = sample_decks();
        assert!(add_card(&mut decks, "Rust", "front only", "").is_err());
        assert!(add_card(&mut decks, "Missing", "a", "b").is_err());
    }

    #[test]
    fn session_flips_and_wraps() {
        let decks = sample_decks();
        let mut session = DeckSession::open(&decks, "Rust").unwrap();
        assert_eq!(session.visible_side(), "ownership");
        session.flip();
        assert_eq!(session.visible_side(), "one owner at a time");

        session.next();
        assert_eq!(session.visible_side(), "borrow");
        assert_eq!(session.position(), (2, 2));

        // Wraps forward to the first card, front side up.
        session.next();
        assert_eq!(session.visible_side(), "ownership");

        // And backwards to the last.
        session.prev();
        assert_eq!(session.visible_side(), "borrow");
    }

    #[test]
    fn empty_deck_cannot_be_reviewed() {
        let mut decks = FlashcardDecks::default();
        create_deck(&mut decks, "Empty").unwrap();
        assert!(DeckSession::open(&decks, "Empty").is_err());
        assert!(DeckSession::open(&decks, "Missing").is_err());
    }

    #[test]
    fn delete_deck_removes_it() {
        let mut decks = sample_decks();
        delete_deck(&mut decks, "Rust").unwrap();
        assert!(decks.decks.is_empty());
        assert!(delete_deck(&mut decks, "Rust").is_err());
    }
}
