use crate::model::listing::LocalizedField;

/// Corte combinado name+summary por locale.
///
/// Para cada locale presente nos DOIS mapas, garante
/// `chars(primary) + chars(secondary) <= budget` cortando o fim do
/// secundário. O primário nunca é alterado. Locale secundário sem
/// contraparte no primário é descartado (tradução de summary sem
/// name correspondente não participa do orçamento).
///
/// O locale padrão passa intocado: texto canônico não pode ser
/// alterado sem o autor saber, então ele cai na validação dura em
/// vez do corte silencioso.
pub fn crop_pair(
    primary: &LocalizedField,
    secondary: &LocalizedField,
    budget: usize,
    default_locale: &str,
) -> LocalizedField {
    let mut out = LocalizedField::new();

    for (locale, text) in secondary {
        let Some(primary_text) = primary.get(locale) else {
            continue;
        };

        if locale == default_locale {
            out.insert(locale.clone(), text.clone());
            continue;
        }

        let allowed = budget.saturating_sub(char_len(primary_text));
        out.insert(locale.clone(), truncate_chars(text, allowed));
    }

    out
}

/// Comprimento em caracteres (não bytes) — o orçamento é de
/// caracteres visíveis ao autor.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Corta no limite de caracteres, sempre em fronteira de char.
/// O resultado é prefixo byte a byte do original; sem reticências.
fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
