//! User preferences: interface language and theme.
//!
//! Loaded once at startup and rewritten on every toggle, mirroring how the
//! dashboard's previous incarnation kept them in two storage keys.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::docs::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hu,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub language: Language,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::Hu,
            theme: Theme::Light,
        }
    }
}

impl Document for Settings {
    const KEY: &'static str = "settings";
    const VERSION: u32 = 1;
}

impl Settings {
    pub fn toggle_language(&mut self) {
        self.language = match self.language {
            Language::Hu => Language::En,
            Language::En => Language::Hu,
        };
    }

    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::docs::{load, save};
    use crate::storage::memory::MemoryStorage;

    #[test]
    fn defaults_match_first_run() {
        let settings = Settings::default();
        assert_eq!(settings.language, Language::Hu);
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn toggles_flip_back_and_forth() {
        let mut settings = Settings::default();
        settings.toggle_language();
        assert_eq!(settings.language, Language::En);
        settings.toggle_language();
        assert_eq!(settings.language, Language::Hu);

        settings.toggle_theme();
        assert_eq!(settings.theme, Theme::Dark);
        settings.toggle_theme();
        assert_eq!(settings.theme, Theme::Light);
    }

    #[tokio::test]
    async fn persists_as_document() {
        let storage = MemoryStorage::new();
        let mut settings = Settings::default();
        settings.toggle_theme();
        save(&storage, &settings).await.expect("save");
        let loaded: Settings = load(&storage).await.expect("load");
        assert_eq!(loaded.theme, Theme::Dark);
    }
}
