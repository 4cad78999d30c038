//! Command palette: substring search over everything launchable.

use serde::Serialize;
use utoipa::ToSchema;

use crate::tools::registry::ToolRegistry;

/// Maximum number of results shown at once.
pub const MAX_RESULTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Tool,
    Link,
    Action,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    pub id: String,
    pub kind: EntryKind,
    pub name: String,
    pub icon: String,
    pub keywords: Vec<String>,
}

/// What pressing Enter on a selected entry means for the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub id: String,
    pub kind: EntryKind,
}

/// The palette holds a statically built entry list and a selection cursor
/// over the current filtered view. No fuzzy scoring, no ranking: entries
/// match in registration order.
pub struct CommandPalette {
    entries: Vec<PaletteEntry>,
    filtered: Vec<usize>,
    selected: usize,
}

impl CommandPalette {
    /// Build the palette from the registry plus link and action entries.
    /// Registration order is: tools (registry order), links, actions.
    pub fn build(
        registry: &ToolRegistry,
        links: &[(String, String)],
        actions: &[(String, String, Vec<String>)],
    ) -> Self {
        let mut entries = Vec::new();

        for tool in registry.iter() {
            let mut keywords = vec![tool.tool_id.clone(), tool.title.to_lowercase()];
            keywords.extend(tool.keywords.iter().map(|k| k.to_lowercase()));
            entries.push(PaletteEntry {
                id: format!("tool-{}", tool.tool_id),
                kind: EntryKind::Tool,
                name: tool.title.clone(),
                icon: tool.icon.clone(),
                keywords,
            });
        }

        for (name, url) in links {
            entries.push(PaletteEntry {
                id: format!("link-{url}"),
                kind: EntryKind::Link,
                name: name.clone(),
                icon: "🔗".to_string(),
                keywords: vec![name.to_lowercase()],
            });
        }

        for (id, name, keywords) in actions {
            entries.push(PaletteEntry {
                id: format!("action-{id}"),
                kind: EntryKind::Action,
                name: name.clone(),
                icon: "⚙️".to_string(),
                keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            });
        }

        let filtered = (0..entries.len().min(MAX_RESULTS)).collect();
        Self {
            entries,
            filtered,
            selected: 0,
        }
    }

    /// Filter the entries. Case-insensitive; an entry matches when the query
    /// is empty, or is a substring of its name or of any keyword. Resets the
    /// selection to the first result.
    pub fn filter(&mut self, query: &str) -> Vec<&PaletteEntry> {
        let needle = query.to_lowercase();
        self.filtered = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                needle.is_empty()
                    || entry.name.to_lowercase().contains(&needle)
                    || entry.keywords.iter().any(|kw| kw.contains(&needle))
            })
            .map(|(i, _)| i)
            .take(MAX_RESULTS)
            .collect();
        self.selected = 0;
        self.results()
    }

    /// The current (filtered, capped) results.
    pub fn results(&self) -> Vec<&PaletteEntry> {
        self.filtered.iter().map(|&i| &self.entries[i]).collect()
    }

    /// Index of the selected result within the current results.
    pub fn selected_index(&self) -> Option<usize> {
        if self.filtered.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    /// Move the selection down, wrapping past the last result.
    pub fn select_next(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = (self.selected + 1) % self.filtered.len();
        }
    }

    /// Move the selection up, wrapping past the first result.
    pub fn select_prev(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = (self.selected + self.filtered.len() - 1) % self.filtered.len();
        }
    }

    /// Enter: what the selected entry activates, if anything is selected.
    pub fn activate(&self) -> Option<Activation> {
        self.selected_index().map(|i| {
            let entry = &self.entries[self.filtered[i]];
            Activation {
                id: entry.id.clone(),
                kind: entry.kind,
            }
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
