use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::listing::{Listing, ListingKind, LocalizedField};
use crate::model::rules::RuleSet;
use crate::services::{crop, slug, tags};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FieldIssue {
    pub field: String,
    pub locale: Option<String>,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationOutcome {
    pub listing: Listing,
    pub issues: Vec<FieldIssue>,
}

fn issue(field: &str, locale: Option<&str>, code: &str, message: String) -> FieldIssue {
    FieldIssue {
        field: field.to_string(),
        locale: locale.map(|l| l.to_string()),
        code: code.to_string(),
        message,
    }
}

fn too_long(max: usize, actual: usize) -> String {
    format!("Ensure this value has at most {max} characters (it has {actual}).")
}

fn too_short(min: usize, actual: usize) -> String {
    format!("Ensure this value has at least {min} characters (it has {actual}).")
}

/// Valida o listing inteiro e devolve a versão limpa junto com TODOS
/// os problemas encontrados. Cada campo é checado de forma
/// independente: um erro em name não impede os erros de slug etc., o
/// chamador renderiza a lista completa de uma vez.
pub fn run(listing: &Listing, rules: &RuleSet, existing_slugs: &[String]) -> ValidationOutcome {
    let mut cleaned = listing.clone();
    let mut issues: Vec<FieldIssue> = Vec::new();

    let default_locale = cleaned.default_locale.clone();

    // Obrigatoriedade antes do corte: o corte descarta summary sem
    // name correspondente e não pode mascarar o que o autor mandou.
    let has_name = required_in_default("name", &cleaned.name, &default_locale, &mut issues);
    let has_summary = required_in_default("summary", &cleaned.summary, &default_locale, &mut issues);

    // Corte automático só nos locales secundários; o padrão cai nas
    // checagens duras logo abaixo.
    if rules.content_optimization && rules.auto_crop {
        cleaned.summary = crop::crop_pair(
            &cleaned.name,
            &cleaned.summary,
            rules.combined_budget,
            &default_locale,
        );
    }

    check_name_summary_bounds(&cleaned, rules, has_name && has_summary, &mut issues);
    check_description(&cleaned, rules, &mut issues);
    check_slug(&mut cleaned, rules, existing_slugs, &mut issues);
    check_colors(&mut cleaned, &mut issues);
    check_urls(&cleaned, &mut issues);
    check_tags(&mut cleaned, rules, &mut issues);
    check_categories(&cleaned, rules, &mut issues);
    check_license(&cleaned, rules, &mut issues);

    ValidationOutcome {
        listing: cleaned,
        issues,
    }
}

fn required_in_default(
    field: &str,
    values: &LocalizedField,
    default_locale: &str,
    issues: &mut Vec<FieldIssue>,
) -> bool {
    match values.get(default_locale) {
        Some(v) if !v.trim().is_empty() => true,
        _ => {
            issues.push(issue(
                field,
                Some(default_locale),
                "REQUIRED_FIELD_MISSING",
                "This field is required.".to_string(),
            ));
            false
        }
    }
}

fn check_name_summary_bounds(
    listing: &Listing,
    rules: &RuleSet,
    has_pair: bool,
    issues: &mut Vec<FieldIssue>,
) {
    let default_locale = listing.default_locale.as_str();

    check_trademarks(&listing.name, &rules.trademark_terms, issues);

    if rules.content_optimization {
        // Com o orçamento combinado ativo, os limites individuais valem
        // só para o locale padrão: os secundários são tratados pelo
        // corte, nunca por falha dura (não quebrar tradutores).
        let name_max = rules.combined_budget.saturating_sub(rules.summary_min);
        let summary_max = rules.combined_budget.saturating_sub(rules.name_min);

        check_default_bounds("name", &listing.name, default_locale, rules.name_min, name_max, issues);
        check_default_bounds(
            "summary",
            &listing.summary,
            default_locale,
            rules.summary_min,
            summary_max,
            issues,
        );

        if has_pair {
            let name_len = crop::char_len(&listing.name[default_locale]);
            let summary_len = crop::char_len(&listing.summary[default_locale]);
            let total = name_len + summary_len;

            if total > rules.combined_budget {
                issues.push(issue(
                    "name",
                    Some(default_locale),
                    "LENGTH_EXCEEDED",
                    format!(
                        "Ensure name and summary combined are at most {} characters (they have {}).",
                        rules.combined_budget, total
                    ),
                ));
            }
        }
    } else {
        check_max_all_locales("name", &listing.name, rules.name_max, issues);
        check_max_all_locales("summary", &listing.summary, rules.summary_max, issues);
    }
}

fn check_trademarks(name: &LocalizedField, terms: &[String], issues: &mut Vec<FieldIssue>) {
    for (locale, value) in name {
        let lower = value.trim().to_lowercase();

        for term in terms {
            let term_lower = term.to_lowercase();
            if !lower.contains(&term_lower) {
                continue;
            }

            // "Foo for <Marca>" é a única forma permitida
            if lower.ends_with(&format!("for {term_lower}")) {
                continue;
            }

            issues.push(issue(
                "name",
                Some(locale.as_str()),
                "FORMAT_INVALID",
                format!("Add-on names cannot contain the {term} trademark."),
            ));
            break;
        }
    }
}

fn check_default_bounds(
    field: &str,
    values: &LocalizedField,
    default_locale: &str,
    min: usize,
    max: usize,
    issues: &mut Vec<FieldIssue>,
) {
    let Some(value) = values.get(default_locale) else {
        return;
    };
    let len = crop::char_len(value);

    if len > 0 && len < min {
        issues.push(issue(
            field,
            Some(default_locale),
            "LENGTH_TOO_SHORT",
            too_short(min, len),
        ));
    }
    if len > max {
        issues.push(issue(
            field,
            Some(default_locale),
            "LENGTH_EXCEEDED",
            too_long(max, len),
        ));
    }
}

fn check_max_all_locales(
    field: &str,
    values: &LocalizedField,
    max: usize,
    issues: &mut Vec<FieldIssue>,
) {
    for (locale, value) in values {
        let len = crop::char_len(value);
        if len > max {
            issues.push(issue(field, Some(locale.as_str()), "LENGTH_EXCEEDED", too_long(max, len)));
        }
    }
}

fn check_description(listing: &Listing, rules: &RuleSet, issues: &mut Vec<FieldIssue>) {
    check_max_all_locales("description", &listing.description, rules.description_max, issues);

    // Só extensões têm descrição obrigatória, e só com o switch ligado
    if !rules.content_optimization || listing.kind != ListingKind::Extension {
        return;
    }

    let default_locale = listing.default_locale.as_str();
    match listing.description.get(default_locale) {
        None => {
            issues.push(issue(
                "description",
                Some(default_locale),
                "REQUIRED_FIELD_MISSING",
                "This field is required.".to_string(),
            ));
        }
        Some(value) => {
            let len = crop::char_len(value.trim());
            if len == 0 {
                issues.push(issue(
                    "description",
                    Some(default_locale),
                    "REQUIRED_FIELD_MISSING",
                    "This field is required.".to_string(),
                ));
            } else if len < rules.description_min {
                issues.push(issue(
                    "description",
                    Some(default_locale),
                    "LENGTH_TOO_SHORT",
                    too_short(rules.description_min, len),
                ));
            }
        }
    }
}

fn check_slug(
    listing: &mut Listing,
    rules: &RuleSet,
    existing_slugs: &[String],
    issues: &mut Vec<FieldIssue>,
) {
    let normalized = slug::normalize(&listing.slug);
    listing.slug = normalized.clone();

    if normalized.is_empty() {
        issues.push(issue(
            "slug",
            None,
            "REQUIRED_FIELD_MISSING",
            "This field is required.".to_string(),
        ));
        return;
    }

    let len = crop::char_len(&normalized);
    if len > rules.slug_max {
        issues.push(issue("slug", None, "LENGTH_EXCEEDED", too_long(rules.slug_max, len)));
    }

    if !slug::is_well_formed(&normalized) {
        issues.push(issue(
            "slug",
            None,
            "FORMAT_INVALID",
            "Enter a valid slug consisting of letters, numbers, underscores or hyphens."
                .to_string(),
        ));
    } else if slug::is_all_digits(&normalized) || slug::is_denied(&normalized, &rules.denied_slugs)
    {
        issues.push(issue(
            "slug",
            None,
            "FORMAT_INVALID",
            format!("The slug cannot be \"{normalized}\". Please choose another."),
        ));
    }

    if slug::collides(&normalized, existing_slugs) {
        issues.push(issue(
            "slug",
            None,
            "UNIQUENESS_CONFLICT",
            "This slug is already in use. Please choose another.".to_string(),
        ));
    }
}

fn check_colors(listing: &mut Listing, issues: &mut Vec<FieldIssue>) {
    let re = Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();

    for (field, value) in [
        ("accent_color", &mut listing.accent_color),
        ("text_color", &mut listing.text_color),
    ] {
        let Some(raw) = value.as_deref() else { continue };
        if raw.is_empty() {
            continue;
        }

        if re.is_match(raw) {
            // Persistido sem o '#', como o resto do sistema espera
            *value = Some(raw.trim_start_matches('#').to_string());
        } else {
            issues.push(issue(
                field,
                None,
                "FORMAT_INVALID",
                "This must be a valid hex color code, such as #000000.".to_string(),
            ));
        }
    }
}

fn check_urls(listing: &Listing, issues: &mut Vec<FieldIssue>) {
    // Só http/https: "javascript:" e "ftp:" são recusados
    let re = Regex::new(r"(?i)^https?://[^\s/]+\.[^\s]+$").unwrap();

    for (field, value) in [
        ("support_url", &listing.support_url),
        ("homepage", &listing.homepage),
    ] {
        let Some(raw) = value.as_deref() else { continue };
        if raw.is_empty() {
            continue;
        }

        if !re.is_match(raw) {
            issues.push(issue(
                field,
                None,
                "FORMAT_INVALID",
                "Enter a valid URL.".to_string(),
            ));
        }
    }
}

fn check_tags(listing: &mut Listing, rules: &RuleSet, issues: &mut Vec<FieldIssue>) {
    let parsed = tags::parse(&listing.tags);

    for tag in &parsed {
        let len = crop::char_len(tag);
        if len > rules.tag_max {
            issues.push(issue("tags", None, "LENGTH_EXCEEDED", too_long(rules.tag_max, len)));
        }
    }

    if parsed.len() > rules.max_tags {
        issues.push(issue(
            "tags",
            None,
            "LENGTH_EXCEEDED",
            format!("You have {} too many tags.", parsed.len() - rules.max_tags),
        ));
    }

    listing.tags = tags::join(&parsed);
}

fn check_categories(listing: &Listing, rules: &RuleSet, issues: &mut Vec<FieldIssue>) {
    if listing.categories.is_empty() {
        issues.push(issue(
            "categories",
            None,
            "REQUIRED_FIELD_MISSING",
            "This field is required.".to_string(),
        ));
    } else if listing.categories.len() > rules.max_categories {
        issues.push(issue(
            "categories",
            None,
            "LENGTH_EXCEEDED",
            format!("You can have only {} categories.", rules.max_categories),
        ));
    }
}

fn check_license(listing: &Listing, rules: &RuleSet, issues: &mut Vec<FieldIssue>) {
    let license = listing.license.trim();

    if license.is_empty() {
        issues.push(issue(
            "license",
            None,
            "REQUIRED_FIELD_MISSING",
            "A license must be selected.".to_string(),
        ));
        return;
    }

    if !rules.allowed_licenses.is_empty()
        && !rules.allowed_licenses.iter().any(|l| l == license)
    {
        issues.push(issue(
            "license",
            None,
            "FORMAT_INVALID",
            "Select a valid choice. That choice is not one of the available choices.".to_string(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn field(pairs: &[(&str, &str)]) -> LocalizedField {
        pairs
            .iter()
            .map(|(l, v)| (l.to_string(), v.to_string()))
            .collect()
    }

    fn base_listing() -> Listing {
        Listing {
            slug: "special-slug".to_string(),
            default_locale: "en-us".to_string(),
            kind: ListingKind::Extension,
            name: field(&[("en-us", "new name")]),
            summary: field(&[("en-us", "a short summary")]),
            description: field(&[("en-us", "new description")]),
            tags: "tag1, tag2, tag3".to_string(),
            categories: vec!["bookmarks".to_string()],
            license: "cc-by-4.0".to_string(),
            support_url: None,
            homepage: None,
            accent_color: None,
            text_color: None,
            artwork_token: None,
        }
    }

    fn codes_for<'a>(outcome: &'a ValidationOutcome, f: &str) -> Vec<&'a str> {
        outcome
            .issues
            .iter()
            .filter(|i| i.field == f)
            .map(|i| i.code.as_str())
            .collect()
    }

    fn messages_for<'a>(outcome: &'a ValidationOutcome, f: &str) -> Vec<&'a str> {
        outcome
            .issues
            .iter()
            .filter(|i| i.field == f)
            .map(|i| i.message.as_str())
            .collect()
    }

    #[test]
    fn valid_listing_has_no_issues() {
        let out = run(&base_listing(), &RuleSet::default(), &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
    }

    #[test]
    fn name_required_in_default_locale() {
        let mut listing = base_listing();
        listing.name = BTreeMap::new();

        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(codes_for(&out, "name"), vec!["REQUIRED_FIELD_MISSING"]);
        assert_eq!(messages_for(&out, "name"), vec!["This field is required."]);
    }

    #[test]
    fn name_over_max_length() {
        let mut listing = base_listing();
        listing.name = field(&[("en-us", &"a".repeat(51))]);

        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(
            messages_for(&out, "name"),
            vec!["Ensure this value has at most 50 characters (it has 51)."]
        );
    }

    #[test]
    fn translation_over_max_is_reported_without_content_optimization() {
        let mut listing = base_listing();
        listing.name.insert("fr".to_string(), "n".repeat(51));

        let out = run(&listing, &RuleSet::default(), &[]);
        let locales: Vec<_> = out
            .issues
            .iter()
            .filter(|i| i.field == "name")
            .map(|i| i.locale.clone())
            .collect();
        assert_eq!(locales, vec![Some("fr".to_string())]);
    }

    #[test]
    fn trademark_in_name_is_rejected() {
        let mut rules = RuleSet::default();
        rules.trademark_terms = vec!["Nimbus".to_string()];

        let mut listing = base_listing();
        listing.name = field(&[("en-us", "Delicious Nimbus")]);

        let out = run(&listing, &rules, &[]);
        assert_eq!(codes_for(&out, "name"), vec!["FORMAT_INVALID"]);
        assert!(messages_for(&out, "name")[0].starts_with("Add-on names cannot contain"));
    }

    #[test]
    fn trademark_allowed_as_for_suffix() {
        let mut rules = RuleSet::default();
        rules.trademark_terms = vec!["Nimbus".to_string()];

        let mut listing = base_listing();
        listing.name = field(&[("en-us", "Delicious for Nimbus")]);

        let out = run(&listing, &rules, &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
    }

    #[test]
    fn unrelated_name_passes_trademark_filter() {
        let mut rules = RuleSet::default();
        rules.trademark_terms = vec!["Nimbus".to_string()];

        let mut listing = base_listing();
        listing.name = field(&[("en-us", "Delicious Dumdidum")]);

        let out = run(&listing, &rules, &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
    }

    #[test]
    fn slug_required() {
        let mut listing = base_listing();
        listing.slug = "".to_string();

        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(codes_for(&out, "slug"), vec!["REQUIRED_FIELD_MISSING"]);
    }

    #[test]
    fn slug_over_max_length() {
        let mut listing = base_listing();
        listing.slug = "a".repeat(31);

        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(
            messages_for(&out, "slug"),
            vec!["Ensure this value has at most 30 characters (it has 31)."]
        );
    }

    #[test]
    fn denied_slug_is_rejected() {
        let mut listing = base_listing();
        listing.slug = "submit".to_string();

        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(
            messages_for(&out, "slug"),
            vec!["The slug cannot be \"submit\". Please choose another."]
        );
    }

    #[test]
    fn digit_only_slug_is_rejected() {
        let mut listing = base_listing();
        listing.slug = "123".to_string();

        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(
            messages_for(&out, "slug"),
            vec!["The slug cannot be \"123\". Please choose another."]
        );
    }

    #[test]
    fn slug_collision_is_case_and_whitespace_insensitive() {
        let existing = vec!["harry-potter".to_string()];

        for candidate in ["Harry-Potter", "  harry-potter  ", "harry-potter"] {
            let mut listing = base_listing();
            listing.slug = candidate.to_string();

            let out = run(&listing, &RuleSet::default(), &existing);
            assert_eq!(codes_for(&out, "slug"), vec!["UNIQUENESS_CONFLICT"], "{candidate:?}");
            assert_eq!(
                messages_for(&out, "slug"),
                vec!["This slug is already in use. Please choose another."]
            );
        }
    }

    #[test]
    fn description_optional_by_default() {
        let mut listing = base_listing();
        listing.description = BTreeMap::new();

        let out = run(&listing, &RuleSet::default(), &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
    }

    #[test]
    fn description_over_max_length() {
        let mut listing = base_listing();
        listing.description = field(&[("en-us", &"a".repeat(501))]);

        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(
            messages_for(&out, "description"),
            vec!["Ensure this value has at most 500 characters (it has 501)."]
        );
    }

    #[test]
    fn description_required_for_extensions_under_content_optimization() {
        let mut rules = RuleSet::default();
        rules.content_optimization = true;

        let mut listing = base_listing();
        listing.description = BTreeMap::new();

        let out = run(&listing, &rules, &[]);
        assert_eq!(codes_for(&out, "description"), vec!["REQUIRED_FIELD_MISSING"]);

        // Temas não precisam de descrição
        listing.kind = ListingKind::StaticTheme;
        let out = run(&listing, &rules, &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);

        // E com descrição longa o bastante, extensão volta a passar
        listing.kind = ListingKind::Extension;
        listing.description = field(&[("en-us", "1234567890")]);
        let out = run(&listing, &rules, &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
    }

    #[test]
    fn description_min_length_under_content_optimization() {
        let mut rules = RuleSet::default();
        rules.content_optimization = true;

        let mut listing = base_listing();
        listing.description = field(&[("en-us", "123456789")]);

        let out = run(&listing, &rules, &[]);
        assert_eq!(codes_for(&out, "description"), vec!["LENGTH_TOO_SHORT"]);

        // Sem o switch, nove caracteres passam
        let out = run(&listing, &RuleSet::default(), &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
    }

    #[test]
    fn colors_optional_but_must_be_hex() {
        let mut listing = base_listing();
        listing.accent_color = Some("".to_string());
        listing.text_color = Some("#EFFFFF".to_string());

        let out = run(&listing, &RuleSet::default(), &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
        assert_eq!(out.listing.text_color.as_deref(), Some("EFFFFF"));

        listing.accent_color = Some("#BALLIN".to_string());
        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(
            messages_for(&out, "accent_color"),
            vec!["This must be a valid hex color code, such as #000000."]
        );
    }

    #[test]
    fn support_url_scheme_is_restricted() {
        for bad in ["javascript://something.com", "ftp://foo.com"] {
            let mut listing = base_listing();
            listing.support_url = Some(bad.to_string());

            let out = run(&listing, &RuleSet::default(), &[]);
            assert_eq!(messages_for(&out, "support_url"), vec!["Enter a valid URL."], "{bad:?}");
        }

        let mut listing = base_listing();
        listing.support_url = Some("http://foo.com".to_string());
        let out = run(&listing, &RuleSet::default(), &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
    }

    #[test]
    fn tags_are_normalized_and_counted() {
        let mut listing = base_listing();
        listing.tags = "ag, SW, ag".to_string();

        let out = run(&listing, &RuleSet::default(), &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
        assert_eq!(out.listing.tags, "ag, sw");

        let mut rules = RuleSet::default();
        rules.max_tags = 2;
        listing.tags = "a, b, c, d".to_string();
        let out = run(&listing, &rules, &[]);
        assert_eq!(messages_for(&out, "tags"), vec!["You have 2 too many tags."]);
    }

    #[test]
    fn categories_required_and_bounded() {
        let mut listing = base_listing();
        listing.categories = Vec::new();

        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(codes_for(&out, "categories"), vec!["REQUIRED_FIELD_MISSING"]);

        listing.categories = vec!["a".into(), "b".into(), "c".into()];
        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(
            messages_for(&out, "categories"),
            vec!["You can have only 2 categories."]
        );
    }

    #[test]
    fn license_required_and_checked_against_choices() {
        let mut listing = base_listing();
        listing.license = "".to_string();

        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(
            messages_for(&out, "license"),
            vec!["A license must be selected."]
        );

        let mut rules = RuleSet::default();
        rules.allowed_licenses = vec!["cc-by-4.0".to_string()];
        listing.license = "wtfpl".to_string();
        let out = run(&listing, &rules, &[]);
        assert_eq!(codes_for(&out, "license"), vec!["FORMAT_INVALID"]);
    }

    #[test]
    fn errors_are_collected_across_fields() {
        let mut listing = base_listing();
        listing.name = BTreeMap::new();
        listing.slug = "".to_string();
        listing.license = "".to_string();

        let out = run(&listing, &RuleSet::default(), &[]);
        let fields: Vec<_> = out.issues.iter().map(|i| i.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"slug"));
        assert!(fields.contains(&"license"));
    }

    #[test]
    fn min_lengths_apply_under_content_optimization() {
        let mut rules = RuleSet::default();
        rules.content_optimization = true;

        let mut listing = base_listing();
        listing.name = field(&[("en-us", "n")]);
        listing.summary = field(&[("en-us", "s")]);
        listing.description = field(&[("en-us", "1234567890")]);

        // Sem o switch, nomes curtos passam
        let out = run(&listing, &RuleSet::default(), &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);

        let out = run(&listing, &rules, &[]);
        assert_eq!(
            messages_for(&out, "name"),
            vec!["Ensure this value has at least 2 characters (it has 1)."]
        );
        assert_eq!(
            messages_for(&out, "summary"),
            vec!["Ensure this value has at least 2 characters (it has 1)."]
        );
    }

    #[test]
    fn combined_budget_hard_failure_on_default_locale() {
        let mut rules = RuleSet::default();
        rules.content_optimization = true;

        let name = "this is a name that hits the 50 char limit almost";
        let summary =
            "this is a summary that doesn`t get close to the existing 250 limit but is over 70";
        assert_eq!(name.len() + summary.len(), 130);

        let mut listing = base_listing();
        listing.name = field(&[("en-us", name)]);
        listing.summary = field(&[("en-us", summary)]);
        listing.description = field(&[("en-us", "1234567890")]);

        // Sem o orçamento combinado os dois campos são válidos
        let out = run(&listing, &RuleSet::default(), &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);

        let out = run(&listing, &rules, &[]);
        assert_eq!(
            messages_for(&out, "name"),
            vec!["Ensure name and summary combined are at most 70 characters (they have 130)."]
        );
        assert_eq!(
            messages_for(&out, "summary"),
            vec!["Ensure this value has at most 68 characters (it has 81)."]
        );
    }

    #[test]
    fn long_name_allowed_when_combined_fits() {
        let mut rules = RuleSet::default();
        rules.content_optimization = true;

        let name = "this is a name that is over the 50 char limit by a few";
        assert_eq!(name.len(), 54);

        let mut listing = base_listing();
        listing.name = field(&[("en-us", name)]);
        listing.summary = field(&[("en-us", "ab")]);
        listing.description = field(&[("en-us", "1234567890")]);

        // 55 > 50: o limite clássico reclama
        let out = run(&listing, &RuleSet::default(), &[]);
        assert_eq!(codes_for(&out, "name"), vec!["LENGTH_EXCEEDED"]);

        // Com orçamento combinado só o total importa (57 <= 70)
        let out = run(&listing, &rules, &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
    }

    #[test]
    fn auto_crop_shortens_secondary_locales_only() {
        let mut rules = RuleSet::default();
        rules.content_optimization = true;
        rules.auto_crop = true;

        let mut listing = base_listing();
        listing.name = field(&[("en-us", &"a".repeat(25)), ("fr", &"b".repeat(30))]);
        listing.summary = field(&[("en-us", &"c".repeat(45)), ("fr", &"d".repeat(45))]);
        listing.description = field(&[("en-us", &"z".repeat(10))]);

        let out = run(&listing, &rules, &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
        assert_eq!(out.listing.name["en-us"], "a".repeat(25));
        assert_eq!(out.listing.summary["en-us"], "c".repeat(45));
        assert_eq!(out.listing.name["fr"], "b".repeat(30));
        assert_eq!(out.listing.summary["fr"], "d".repeat(40));
    }

    #[test]
    fn auto_crop_drops_summary_locale_without_name() {
        let mut rules = RuleSet::default();
        rules.content_optimization = true;
        rules.auto_crop = true;

        let mut listing = base_listing();
        listing.name = field(&[("en-us", &"a".repeat(25))]);
        listing.summary = field(&[("en-us", &"c".repeat(45)), ("fr", &"d".repeat(50))]);
        listing.description = field(&[("en-us", &"z".repeat(10))]);

        let out = run(&listing, &rules, &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
        assert!(!out.listing.summary.contains_key("fr"));
        assert_eq!(out.listing.summary["en-us"], "c".repeat(45));
    }

    #[test]
    fn auto_crop_never_touches_the_name() {
        let mut rules = RuleSet::default();
        rules.content_optimization = true;
        rules.auto_crop = true;

        let mut listing = base_listing();
        listing.name = field(&[("en-us", &"a".repeat(50)), ("fr", &"b".repeat(69))]);
        listing.summary = field(&[("en-us", &"c".repeat(20)), ("fr", &"d".repeat(3))]);
        listing.description = field(&[("en-us", &"z".repeat(10))]);

        let out = run(&listing, &rules, &[]);
        assert!(out.issues.is_empty(), "{:?}", out.issues);
        // O name fica como o autor mandou; só o summary encolhe
        assert_eq!(out.listing.name["fr"], "b".repeat(69));
        assert_eq!(out.listing.summary["fr"], "d".repeat(1));
    }

    #[test]
    fn auto_crop_does_not_rescue_the_default_locale() {
        let mut rules = RuleSet::default();
        rules.content_optimization = true;
        rules.auto_crop = true;

        let mut listing = base_listing();
        listing.name = field(&[("en-us", &"a".repeat(40))]);
        listing.summary = field(&[("en-us", &"c".repeat(40))]);
        listing.description = field(&[("en-us", &"z".repeat(10))]);

        let out = run(&listing, &rules, &[]);
        assert_eq!(
            messages_for(&out, "name"),
            vec!["Ensure name and summary combined are at most 70 characters (they have 80)."]
        );
        // E o texto não foi alterado por baixo dos panos
        assert_eq!(out.listing.summary["en-us"], "c".repeat(40));
    }
}
