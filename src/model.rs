//! The translation model: the `LocalizedString` tree, its placeholder
//! specs and form maps, and the JSON strings-file loader that builds the
//! tree (spec.md §3, §6).
//!
//! A strings file is a single top-level JSON object; each entry is
//! either a bare string (shorthand for `{"translation": "..."}`) or an
//! object with `translation`, `commentary`, `placeholders` and
//! `alternatives` fields. Alternative bodies recurse through the same
//! shorthand.

use crate::error::{EngineError, Result};
use crate::expr::{self, Expr};
use crate::expr::lexer::reserved_lang_form;
use crate::form::{Cardinal, FormFamily, FormValue, Gender, Ordinal};
use serde_json::Value as Json;
use std::collections::HashMap;

/// A single translatable entry, possibly with conditional alternatives
/// and form-dependent placeholders. See spec.md §3.
#[derive(Debug, Clone)]
pub struct LocalizedString {
    pub key: String,
    pub translation: Option<String>,
    pub commentary: Option<String>,
    pub placeholders: HashMap<String, PlaceholderSpec>,
    pub alternatives: Vec<Alternative>,
}

/// A conditional override: if `expression` evaluates true, `body` (a
/// full nested `LocalizedString`) is recursed into instead of using the
/// parent's `translation`.
#[derive(Debug, Clone)]
pub struct Alternative {
    pub expression: Expr,
    pub body: LocalizedString,
}

/// How a placeholder's replacement text is chosen.
#[derive(Debug, Clone)]
pub enum PlaceholderSpec {
    /// Classify `source`'s value and emit the matching template.
    Value { source: String, translations: FormMap },
    /// Classify `start` and `end` as cardinals, derive the range
    /// cardinal, and emit the matching template.
    Range {
        start: String,
        end: String,
        translations: FormMap,
    },
}

/// A mapping from one Plural Form enumeration (or Gender) to a template
/// string. All keys belong to exactly one enumeration; mixing is
/// rejected at load time (`MixedFormMap`).
#[derive(Debug, Clone)]
pub enum FormMap {
    Cardinal(HashMap<Cardinal, String>),
    Ordinal(HashMap<Ordinal, String>),
    Gender(HashMap<Gender, String>),
}

impl FormMap {
    pub fn get_cardinal(&self, form: Cardinal) -> Option<&str> {
        match self {
            FormMap::Cardinal(map) => map.get(&form).map(String::as_str),
            _ => None,
        }
    }

    pub fn get_ordinal(&self, form: Ordinal) -> Option<&str> {
        match self {
            FormMap::Ordinal(map) => map.get(&form).map(String::as_str),
            _ => None,
        }
    }

    pub fn get_gender(&self, form: Gender) -> Option<&str> {
        match self {
            FormMap::Gender(map) => map.get(&form).map(String::as_str),
            _ => None,
        }
    }
}

/// All the `LocalizedString`s defined for one locale.
#[derive(Debug, Clone)]
pub struct TranslationSet {
    pub locale: String,
    pub entries: HashMap<String, LocalizedString>,
}

impl TranslationSet {
    pub fn get(&self, key: &str) -> Option<&LocalizedString> {
        self.entries.get(key)
    }
}

/// Parse a whole strings file's JSON text into a `TranslationSet`.
/// `locale_tag` labels both load errors and the resulting set's locale.
pub fn parse_strings_file(locale_tag: &str, contents: &str) -> Result<TranslationSet> {
    let json: Json = serde_json::from_str(contents).map_err(|source| EngineError::MalformedFile {
        path: locale_tag.to_string(),
        source,
    })?;
    let obj = json.as_object().ok_or_else(|| EngineError::MalformedStructure {
        path: locale_tag.to_string(),
        reason: "top-level value must be a JSON object".to_string(),
    })?;
    let mut entries = HashMap::new();
    for (key, value) in obj {
        entries.insert(key.clone(), parse_localized_string(key, value)?);
    }
    Ok(TranslationSet {
        locale: locale_tag.to_string(),
        entries,
    })
}

fn parse_localized_string(key: &str, json: &Json) -> Result<LocalizedString> {
    match json {
        Json::String(s) => Ok(LocalizedString {
            key: key.to_string(),
            translation: Some(s.clone()),
            commentary: None,
            placeholders: HashMap::new(),
            alternatives: Vec::new(),
        }),
        Json::Object(obj) => {
            let translation = obj.get("translation").and_then(Json::as_str).map(str::to_string);
            let commentary = obj.get("commentary").and_then(Json::as_str).map(str::to_string);

            let placeholders = match obj.get("placeholders") {
                Some(Json::Object(map)) => parse_placeholders(key, map)?,
                Some(_) => {
                    return Err(EngineError::MalformedStructure {
                        path: key.to_string(),
                        reason: "`placeholders` must be an object".to_string(),
                    })
                }
                None => HashMap::new(),
            };

            let alternatives = match obj.get("alternatives") {
                Some(Json::Array(items)) => parse_alternatives(key, items)?,
                Some(_) => {
                    return Err(EngineError::MalformedStructure {
                        path: key.to_string(),
                        reason: "`alternatives` must be an array".to_string(),
                    })
                }
                None => Vec::new(),
            };

            Ok(LocalizedString {
                key: key.to_string(),
                translation,
                commentary,
                placeholders,
                alternatives,
            })
        }
        _ => Err(EngineError::MalformedStructure {
            path: key.to_string(),
            reason: "a translation entry must be a string or an object".to_string(),
        }),
    }
}

fn parse_placeholders(
    key: &str,
    map: &serde_json::Map<String, Json>,
) -> Result<HashMap<String, PlaceholderSpec>> {
    let mut placeholders = HashMap::new();
    for (name, spec_json) in map {
        let obj = spec_json.as_object().ok_or_else(|| EngineError::MalformedStructure {
            path: key.to_string(),
            reason: format!("placeholder {name:?} must be an object"),
        })?;
        let has_value = obj.contains_key("value");
        let has_range = obj.contains_key("range");
        if has_value && has_range {
            return Err(EngineError::PlaceholderSpecConflict {
                key: key.to_string(),
                placeholder: name.clone(),
            });
        }

        let translations_obj = obj
            .get("translations")
            .and_then(Json::as_object)
            .ok_or_else(|| EngineError::MalformedStructure {
                path: key.to_string(),
                reason: format!("placeholder {name:?} is missing a `translations` object"),
            })?;
        let translations = build_form_map(key, name, translations_obj)?;

        let spec = if has_value {
            let source = obj
                .get("value")
                .and_then(Json::as_str)
                .ok_or_else(|| EngineError::MalformedStructure {
                    path: key.to_string(),
                    reason: format!("placeholder {name:?}'s `value` must be a string"),
                })?
                .to_string();
            PlaceholderSpec::Value { source, translations }
        } else if has_range {
            let range_obj = obj
                .get("range")
                .and_then(Json::as_object)
                .ok_or_else(|| EngineError::MalformedStructure {
                    path: key.to_string(),
                    reason: format!("placeholder {name:?}'s `range` must be an object"),
                })?;
            let start = range_obj
                .get("start")
                .and_then(Json::as_str)
                .ok_or_else(|| EngineError::MalformedStructure {
                    path: key.to_string(),
                    reason: format!("placeholder {name:?}'s range is missing `start`"),
                })?
                .to_string();
            let end = range_obj
                .get("end")
                .and_then(Json::as_str)
                .ok_or_else(|| EngineError::MalformedStructure {
                    path: key.to_string(),
                    reason: format!("placeholder {name:?}'s range is missing `end`"),
                })?
                .to_string();
            PlaceholderSpec::Range { start, end, translations }
        } else {
            return Err(EngineError::MalformedStructure {
                path: key.to_string(),
                reason: format!("placeholder {name:?} specifies neither `value` nor `range`"),
            });
        };
        placeholders.insert(name.clone(), spec);
    }
    Ok(placeholders)
}

fn build_form_map(
    key: &str,
    placeholder: &str,
    translations: &serde_json::Map<String, Json>,
) -> Result<FormMap> {
    let mut family: Option<FormFamily> = None;
    let mut cardinal = HashMap::new();
    let mut ordinal = HashMap::new();
    let mut gender = HashMap::new();

    for (label, template) in translations {
        let template = template.as_str().ok_or_else(|| EngineError::MalformedStructure {
            path: key.to_string(),
            reason: format!("translation for form {label:?} must be a string"),
        })?;
        let form = reserved_lang_form(label).ok_or_else(|| EngineError::MalformedStructure {
            path: key.to_string(),
            reason: format!("unrecognized form label {label:?}"),
        })?;
        let this_family = match form {
            FormValue::Cardinal(_) => FormFamily::Cardinal,
            FormValue::Ordinal(_) => FormFamily::Ordinal,
            FormValue::Gender(_) => FormFamily::Gender,
        };
        match family {
            None => family = Some(this_family),
            Some(f) if f == this_family => {}
            Some(_) => {
                return Err(EngineError::MixedFormMap {
                    key: key.to_string(),
                    placeholder: placeholder.to_string(),
                })
            }
        }
        match form {
            FormValue::Cardinal(c) => {
                cardinal.insert(c, template.to_string());
            }
            FormValue::Ordinal(o) => {
                ordinal.insert(o, template.to_string());
            }
            FormValue::Gender(g) => {
                gender.insert(g, template.to_string());
            }
        }
    }

    match family {
        Some(FormFamily::Cardinal) => Ok(FormMap::Cardinal(cardinal)),
        Some(FormFamily::Ordinal) => Ok(FormMap::Ordinal(ordinal)),
        Some(FormFamily::Gender) => Ok(FormMap::Gender(gender)),
        None => Err(EngineError::MalformedStructure {
            path: key.to_string(),
            reason: format!("placeholder {placeholder:?}'s `translations` object is empty"),
        }),
    }
}

fn parse_alternatives(key: &str, items: &[Json]) -> Result<Vec<Alternative>> {
    let mut alternatives = Vec::with_capacity(items.len());
    for item in items {
        let obj = item.as_object().ok_or_else(|| EngineError::MalformedStructure {
            path: key.to_string(),
            reason: "each alternative must be a single-key object".to_string(),
        })?;
        if obj.len() != 1 {
            return Err(EngineError::MalformedStructure {
                path: key.to_string(),
                reason: format!(
                    "each alternative must have exactly one key (the expression), found {}",
                    obj.len()
                ),
            });
        }
        let (expression_str, body_json) = obj.iter().next().expect("checked len == 1 above");
        let expression = expr::parse(expression_str)?;
        let body = parse_localized_string(key, body_json)?;
        alternatives.push(Alternative { expression, body });
    }
    Ok(alternatives)
}
