use serde_json::{json, Value};

use crate::model::listing::{Listing, LocalizedField};
use crate::model::rules::RuleSet;
use crate::services::validate::FieldIssue;
use crate::services::{artwork, crop, listing as store, slug, validate};

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn parse_listing_from_payload(payload: &Value) -> Result<Listing, String> {
    let v = payload
        .get("listing")
        .cloned()
        .ok_or_else(|| "payload.listing is required".to_string())?;

    serde_json::from_value::<Listing>(v).map_err(|e| format!("invalid payload.listing: {e}"))
}

fn parse_rules_from_payload(payload: &Value) -> Result<RuleSet, String> {
    match payload.get("rules") {
        None | Some(Value::Null) => Ok(RuleSet::default()),
        Some(v) => serde_json::from_value::<RuleSet>(v.clone())
            .map_err(|e| format!("invalid payload.rules: {e}")),
    }
}

fn parse_locale_map(payload: &Value, key: &str) -> Result<LocalizedField, String> {
    match payload.get(key) {
        None | Some(Value::Null) => Ok(LocalizedField::new()),
        Some(v) => serde_json::from_value::<LocalizedField>(v.clone())
            .map_err(|e| format!("invalid payload.{key}: {e}")),
    }
}

fn parse_slug_list(payload: &Value, key: &str) -> Vec<String> {
    payload
        .get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Checagem dura do par no locale padrão — o corte silencioso nunca
/// resgata esse locale, com ou sem auto_crop.
fn combined_issues(
    primary: &LocalizedField,
    secondary: &LocalizedField,
    budget: usize,
    default_locale: &str,
) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    if let (Some(p), Some(s)) = (primary.get(default_locale), secondary.get(default_locale)) {
        let total = crop::char_len(p) + crop::char_len(s);
        if total > budget {
            issues.push(FieldIssue {
                field: "secondary".to_string(),
                locale: Some(default_locale.to_string()),
                code: "LENGTH_EXCEEDED".to_string(),
                message: format!(
                    "Ensure primary and secondary combined are at most {budget} characters (they have {total})."
                ),
            });
        }
    }

    issues
}

pub fn handle(input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let payload = get_payload(&req);

    match Command::from(get_cmd(&req)) {
        Command::Ping => ok(id, json!({ "message": "devhub-core alive" })),

        Command::ValidateListing => {
            let listing = match parse_listing_from_payload(payload) {
                Ok(l) => l,
                Err(e) => return err(id, e),
            };
            let rules = match parse_rules_from_payload(payload) {
                Ok(r) => r,
                Err(e) => return err(id, e),
            };
            let existing = parse_slug_list(payload, "existing_slugs");

            let outcome = validate::run(&listing, &rules, &existing);
            ok(
                id,
                json!({
                    "valid": outcome.issues.is_empty(),
                    "listing": outcome.listing,
                    "issues": outcome.issues
                }),
            )
        }

        Command::CropFields => {
            let primary = match parse_locale_map(payload, "primary") {
                Ok(m) => m,
                Err(e) => return err(id, e),
            };
            let secondary = match parse_locale_map(payload, "secondary") {
                Ok(m) => m,
                Err(e) => return err(id, e),
            };

            let budget = payload
                .get("budget")
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .unwrap_or_else(|| RuleSet::default().combined_budget);
            let default_locale = payload
                .get("default_locale")
                .and_then(|v| v.as_str())
                .unwrap_or("en-us");
            let auto_crop = payload
                .get("auto_crop")
                .and_then(|v| v.as_bool())
                .unwrap_or(true);

            if budget == 0 {
                return err(id, "payload.budget must be greater than zero");
            }

            let issues = combined_issues(&primary, &secondary, budget, default_locale);

            // Sem auto_crop o secundário passa intocado e quem chamou
            // trata o estouro como erro de validação.
            let secondary_out = if auto_crop {
                crop::crop_pair(&primary, &secondary, budget, default_locale)
            } else {
                secondary
            };

            ok(id, json!({ "secondary": secondary_out, "issues": issues }))
        }

        Command::ListingList => ok(id, json!({ "listings": store::list_listings() })),

        Command::ListingSave => {
            let listing = match parse_listing_from_payload(payload) {
                Ok(l) => l,
                Err(e) => return err(id, e),
            };
            let rules = match parse_rules_from_payload(payload) {
                Ok(r) => r,
                Err(e) => return err(id, e),
            };

            // Update manda previous_slug para não colidir consigo mesmo
            let previous_slug = payload
                .get("previous_slug")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());

            let base = store::listings_base_dir();
            let existing = store::existing_slugs_in(&base, previous_slug.as_deref());

            let mut outcome = validate::run(&listing, &rules, &existing);

            // Token de artwork precisa existir no registro antes do save
            if let Some(token) = outcome.listing.artwork_token.as_deref() {
                if !token.is_empty()
                    && !artwork::token_exists_in(&artwork::registry_base_dir(), token)
                {
                    outcome.issues.push(FieldIssue {
                        field: "artwork_token".to_string(),
                        locale: None,
                        code: "FORMAT_INVALID".to_string(),
                        message: "There was an error with your upload. Please try again."
                            .to_string(),
                    });
                }
            }

            if !outcome.issues.is_empty() {
                return ok(id, json!({ "saved": false, "issues": outcome.issues }));
            }

            if let Err(e) = store::save_listing_in(&base, &outcome.listing) {
                return err(id, e);
            }

            // Rename: remove o diretório antigo para não duplicar na lista
            if let Some(prev) = previous_slug.as_deref() {
                let prev_norm = slug::normalize(prev);
                if !prev_norm.is_empty() && prev_norm != outcome.listing.slug {
                    let _ = std::fs::remove_dir_all(base.join(&prev_norm));
                }
            }

            ok(id, json!({ "saved": true, "listing": outcome.listing }))
        }

        Command::ListingOpen => {
            let slug_raw = payload.get("slug").and_then(|v| v.as_str()).unwrap_or("");
            if slug_raw.is_empty() {
                return err(id, "payload.slug is required");
            }

            match store::open_listing_in(&store::listings_base_dir(), slug_raw) {
                Ok(l) => ok(id, json!({ "listing": l })),
                Err(e) => err(id, e),
            }
        }

        Command::ArtworkRegister => {
            let path = payload.get("path").and_then(|v| v.as_str()).unwrap_or("");
            if path.is_empty() {
                return err(id, "payload.path is required");
            }

            match artwork::register_in(&artwork::registry_base_dir(), path) {
                Ok(outcome) => ok(id, serde_json::to_value(outcome).unwrap_or(json!({}))),
                Err(e) => err(id, e),
            }
        }

        Command::Unknown => err(id, "unknown command"),
    }
}
