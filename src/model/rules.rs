use serde::{Deserialize, Serialize};

fn default_name_max() -> usize {
    50
}

fn default_name_min() -> usize {
    2
}

fn default_summary_max() -> usize {
    250
}

fn default_summary_min() -> usize {
    2
}

fn default_description_max() -> usize {
    500
}

fn default_description_min() -> usize {
    10
}

fn default_slug_max() -> usize {
    30
}

fn default_combined_budget() -> usize {
    70
}

fn default_max_tags() -> usize {
    20
}

fn default_tag_max() -> usize {
    128
}

fn default_max_categories() -> usize {
    2
}

fn default_denied_slugs() -> Vec<String> {
    vec!["submit".to_string()]
}

/// Limites e switches da validação. Os defaults são os do marketplace;
/// o UI pode mandar um RuleSet parcial que o serde completa.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RuleSet {
    #[serde(default = "default_name_max")]
    pub name_max: usize,

    #[serde(default = "default_name_min")]
    pub name_min: usize,

    #[serde(default = "default_summary_max")]
    pub summary_max: usize,

    #[serde(default = "default_summary_min")]
    pub summary_min: usize,

    #[serde(default = "default_description_max")]
    pub description_max: usize,

    #[serde(default = "default_description_min")]
    pub description_min: usize,

    #[serde(default = "default_slug_max")]
    pub slug_max: usize,

    #[serde(default = "default_combined_budget")]
    pub combined_budget: usize,

    #[serde(default = "default_max_tags")]
    pub max_tags: usize,

    #[serde(default = "default_tag_max")]
    pub tag_max: usize,

    #[serde(default = "default_max_categories")]
    pub max_categories: usize,

    // Vazio = qualquer licença passa na checagem de formato
    #[serde(default)]
    pub allowed_licenses: Vec<String>,

    #[serde(default)]
    pub trademark_terms: Vec<String>,

    #[serde(default = "default_denied_slugs")]
    pub denied_slugs: Vec<String>,

    /// Orçamento combinado name+summary ativo (mais os mínimos por campo).
    #[serde(default)]
    pub content_optimization: bool,

    /// Permite cortar silenciosamente locales secundários.
    /// Sem efeito quando content_optimization está desligado.
    #[serde(default)]
    pub auto_crop: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            name_max: default_name_max(),
            name_min: default_name_min(),
            summary_max: default_summary_max(),
            summary_min: default_summary_min(),
            description_max: default_description_max(),
            description_min: default_description_min(),
            slug_max: default_slug_max(),
            combined_budget: default_combined_budget(),
            max_tags: default_max_tags(),
            tag_max: default_tag_max(),
            max_categories: default_max_categories(),
            allowed_licenses: Vec::new(),
            trademark_terms: Vec::new(),
            denied_slugs: default_denied_slugs(),
            content_optimization: false,
            auto_crop: false,
        }
    }
}
