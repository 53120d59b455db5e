use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Campo traduzível: um valor por locale ("en-us", "fr", ...).
/// O mapa pode ser parcial — nem todo locale tem entrada.
pub type LocalizedField = BTreeMap<String, String>;

fn default_locale() -> String {
    "en-us".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Listing {
    #[serde(default)]
    pub slug: String,

    #[serde(default = "default_locale")]
    pub default_locale: String,

    #[serde(default)]
    pub kind: ListingKind,

    #[serde(default)]
    pub name: LocalizedField,

    #[serde(default)]
    pub summary: LocalizedField,

    #[serde(default)]
    pub description: LocalizedField,

    // Entrada crua do formulário: "tag1, tag2, tag3"
    #[serde(default)]
    pub tags: String,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub license: String,

    #[serde(default)]
    pub support_url: Option<String>,

    #[serde(default)]
    pub homepage: Option<String>,

    // "#RRGGBB" na entrada; persistido sem o '#'
    #[serde(default)]
    pub accent_color: Option<String>,

    #[serde(default)]
    pub text_color: Option<String>,

    #[serde(default)]
    pub artwork_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Extension,
    StaticTheme,
    Dictionary,
    LanguagePack,
}

impl Default for ListingKind {
    fn default() -> Self {
        ListingKind::Extension
    }
}
