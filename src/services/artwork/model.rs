use serde::{Deserialize, Serialize};

/// Um upload registrado: o token é o que o formulário referencia,
/// o checksum é o que detecta duplicata de conteúdo.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ArtworkRecord {
    pub token: String,

    pub source_path: String,

    #[serde(default)]
    pub checksum: String,
}
