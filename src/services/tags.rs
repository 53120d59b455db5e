/// Entrada crua "tag1, Tag2, tag1" -> ["tag1", "tag2"].
/// Trim + minúsculas, descarta vazios, dedup mantendo a ordem.
pub fn parse(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    for piece in raw.split(',') {
        let tag = piece.trim().to_lowercase();
        if tag.is_empty() {
            continue;
        }
        if !out.contains(&tag) {
            out.push(tag);
        }
    }

    out
}

/// Forma canônica persistida: "tag1, tag2".
pub fn join(tags: &[String]) -> String {
    tags.join(", ")
}
