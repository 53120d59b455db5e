use std::fs;
use std::path::{Path, PathBuf};

use crate::model::listing::Listing;
use crate::services::slug;

const LISTING_FILE: &str = "listing.json";

pub fn listings_base_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DEVHUB_DATA_DIR") {
        return PathBuf::from(dir).join("Listings");
    }
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        return PathBuf::from(local).join("DevHub").join("Listings");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("Listings")
}

pub fn list_listings() -> Vec<Listing> {
    list_listings_in(&listings_base_dir())
}

pub fn list_listings_in(base: &Path) -> Vec<Listing> {
    let mut listings = Vec::new();

    if let Ok(entries) = fs::read_dir(base) {
        for entry in entries.flatten() {
            let path = entry.path().join(LISTING_FILE);
            if path.exists() {
                if let Ok(data) = fs::read_to_string(&path) {
                    if let Ok(listing) = serde_json::from_str::<Listing>(&data) {
                        listings.push(listing);
                    }
                }
            }
        }
    }

    listings.sort_by(|a, b| a.slug.cmp(&b.slug));
    listings
}

/// Slugs já persistidos, para a checagem de unicidade.
/// `exclude` deixa de fora o próprio listing quando é um update.
pub fn existing_slugs_in(base: &Path, exclude: Option<&str>) -> Vec<String> {
    let excluded = exclude.map(slug::normalize);

    list_listings_in(base)
        .into_iter()
        .map(|l| l.slug)
        .filter(|s| excluded.as_deref() != Some(slug::normalize(s).as_str()))
        .collect()
}

/// Persiste o listing JÁ validado/limpo em `<slug>/listing.json`.
/// A validação acontece antes, no protocolo — aqui é só storage.
pub fn save_listing_in(base: &Path, listing: &Listing) -> Result<(), String> {
    if listing.slug.is_empty() {
        return Err("listing.slug is required".into());
    }

    let dir = base.join(&listing.slug);
    fs::create_dir_all(&dir).map_err(|e| format!("failed to create listing directory: {e}"))?;

    let json = serde_json::to_string_pretty(listing)
        .map_err(|e| format!("failed to serialize listing: {e}"))?;

    write_atomic(&dir.join(LISTING_FILE), json.as_bytes())
}

pub fn open_listing_in(base: &Path, slug_raw: &str) -> Result<Listing, String> {
    let path = base.join(slug::normalize(slug_raw)).join(LISTING_FILE);

    if !path.exists() {
        return Err("listing.json not found".into());
    }

    let data = fs::read_to_string(&path).map_err(|_| "failed to read listing.json")?;

    serde_json::from_str::<Listing>(&data).map_err(|_| "invalid listing.json".into())
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
        None => "listing".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
