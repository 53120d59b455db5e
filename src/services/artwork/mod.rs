pub mod hash;
pub mod matcher;
pub mod model;
pub mod store;

use std::path::{Path, PathBuf};

use rand::{thread_rng, Rng};
use serde::Serialize;

use self::model::ArtworkRecord;

pub fn registry_base_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DEVHUB_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        return PathBuf::from(local).join("DevHub");
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

#[derive(Debug, Serialize)]
pub struct RegisterOutcome {
    pub token: String,
    pub checksum: String,

    /// Token do upload mais antigo com o mesmo conteúdo, se houver.
    pub duplicate_of: Option<String>,
}

/// Registra um upload: lê o arquivo, calcula o checksum, cunha um
/// token e detecta duplicata. O arquivo em si fica onde está — mover
/// e gerar thumbnails é tarefa do pipeline de imagens, não daqui.
pub fn register_in(base: &Path, source_path: &str) -> Result<RegisterOutcome, String> {
    let checksum = hash::checksum_file(Path::new(source_path))?;

    let mut records = store::load_in(base);

    let duplicate_of = matcher::find_duplicate(&records, &checksum).map(|r| r.token.clone());
    let token = mint_token(&records);

    records.push(ArtworkRecord {
        token: token.clone(),
        source_path: source_path.to_string(),
        checksum: checksum.clone(),
    });

    store::save_in(base, &records)?;

    Ok(RegisterOutcome {
        token,
        checksum,
        duplicate_of,
    })
}

pub fn token_exists_in(base: &Path, token: &str) -> bool {
    store::load_in(base).iter().any(|r| r.token == token)
}

fn mint_token(records: &[ArtworkRecord]) -> String {
    loop {
        let mut bytes = [0u8; 8];
        thread_rng().fill(&mut bytes);
        let token = hex::encode(bytes);

        if !records.iter().any(|r| r.token == token) {
            return token;
        }
    }
}
