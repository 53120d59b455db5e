use regex::Regex;

/// Normaliza o slug como o banco compara: trim + minúsculas.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Slug válido: letras/dígitos ASCII, '-' e '_'.
pub fn is_well_formed(slug: &str) -> bool {
    let re = Regex::new(r"^[a-z0-9_-]+$").unwrap();
    re.is_match(slug)
}

/// Slug só de dígitos colide com rotas por id, então é reservado.
pub fn is_all_digits(slug: &str) -> bool {
    !slug.is_empty() && slug.chars().all(|c| c.is_ascii_digit())
}

pub fn is_denied(slug: &str, denied: &[String]) -> bool {
    denied.iter().any(|d| normalize(d) == slug)
}

/// Conflito contra slugs já persistidos (comparação normalizada).
pub fn collides(slug: &str, existing: &[String]) -> bool {
    existing.iter().any(|e| normalize(e) == slug)
}
