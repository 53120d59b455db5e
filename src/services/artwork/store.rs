use std::fs;
use std::path::{Path, PathBuf};

use super::hash;
use super::model::ArtworkRecord;

const REGISTRY_FILE: &str = "artwork_registry.json";

/// Carrega o registro de uploads. Arquivo ausente ou corrompido vira
/// registro vazio — o pior caso é re-registrar um upload.
pub fn load_in(base: &Path) -> Vec<ArtworkRecord> {
    let path = base.join(REGISTRY_FILE);

    if !path.exists() {
        return Vec::new();
    }

    let data = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[artwork] failed to read {REGISTRY_FILE}: {e}");
            return Vec::new();
        }
    };

    let mut records: Vec<ArtworkRecord> = match serde_json::from_str(&data) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("[artwork] failed to parse {REGISTRY_FILE}: {e}");
            return Vec::new();
        }
    };

    // Migração: registros antigos podem não ter checksum gravado.
    // Recalcula do arquivo fonte enquanto ele ainda existir.
    let mut migrated = false;
    for r in records.iter_mut() {
        migrated |= ensure_checksum(r);
    }

    if migrated {
        if let Err(e) = save_in(base, &records) {
            eprintln!("[artwork] failed to persist migration: {e}");
        }
    }

    records
}

/// Grava o registro preservando a ordem de chegada (a detecção de
/// duplicata depende dela).
pub fn save_in(base: &Path, records: &[ArtworkRecord]) -> Result<(), String> {
    let json = serde_json::to_string_pretty(records).map_err(|e| e.to_string())?;
    write_atomic(&base.join(REGISTRY_FILE), json.as_bytes())
}

fn ensure_checksum(r: &mut ArtworkRecord) -> bool {
    if !r.checksum.is_empty() {
        return false;
    }

    match hash::checksum_file(Path::new(&r.source_path)) {
        Ok(sum) => {
            r.checksum = sum;
            true
        }
        Err(_) => false,
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    fs::write(&tmp, bytes).map_err(|e| e.to_string())?;

    if path.exists() {
        fs::remove_file(path).map_err(|e| e.to_string())?;
    }

    fs::rename(&tmp, path).map_err(|e| e.to_string())?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "artwork".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
