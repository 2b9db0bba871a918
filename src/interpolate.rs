//! Substitutes `{{name}}` placeholder tokens in a translation template.
//!
//! Per spec.md §4.4 step 4: for each `{{name}}` occurrence, prefer the
//! resolved placeholder map `P`, then fall back to the raw query context
//! (stringified), and leave the token literal if neither has a value.

use crate::value::Context;
use std::collections::HashMap;

/// Render `template`, replacing each `{{name}}` with `placeholders[name]`
/// if present, else `ctx[name]` stringified, else leaving it untouched.
pub fn interpolate(template: &str, placeholders: &HashMap<String, String>, ctx: &Context) -> String {
    let mut out = String::with_capacity(template.len());
    let bytes = template.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'{' && bytes.get(i + 1) == Some(&b'{') {
            if let Some((name, end)) = scan_placeholder(template, i) {
                if let Some(value) = placeholders.get(name).cloned() {
                    out.push_str(&value);
                } else if let Some(value) = ctx.get(name) {
                    out.push_str(&value.to_display_string());
                } else {
                    out.push_str(&template[i..end]);
                }
                i = end;
                continue;
            }
        }
        let ch = template[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

/// If `template[start..]` begins with `{{`, followed by one or more
/// `[A-Za-z0-9]` characters, followed by `}}`, returns the name and the
/// index just past the closing `}}`.
fn scan_placeholder(template: &str, start: usize) -> Option<(&str, usize)> {
    let rest = &template[start + 2..];
    let name_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    if name_len == 0 {
        return None;
    }
    if rest.as_bytes().get(name_len) == Some(&b'}') && rest.as_bytes().get(name_len + 1) == Some(&b'}') {
        Some((&rest[..name_len], start + 2 + name_len + 2))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn resolved_placeholder_wins_over_context() {
        let mut placeholders = HashMap::new();
        placeholders.insert("bookCount".to_string(), "3 books".to_string());
        let mut ctx = Context::new();
        ctx.insert("bookCount", Value::integer(3));
        assert_eq!(
            interpolate("I read {{bookCount}}.", &placeholders, &ctx),
            "I read 3 books."
        );
    }

    #[test]
    fn falls_back_to_context_when_unresolved() {
        let placeholders = HashMap::new();
        let mut ctx = Context::new();
        ctx.insert("n", Value::integer(5));
        assert_eq!(interpolate("n={{n}}", &placeholders, &ctx), "n=5");
    }

    #[test]
    fn leaves_unmatched_placeholder_literal() {
        let placeholders = HashMap::new();
        let ctx = Context::new();
        assert_eq!(interpolate("hi {{name}}", &placeholders, &ctx), "hi {{name}}");
    }

    #[test]
    fn not_a_placeholder_is_left_alone() {
        let placeholders = HashMap::new();
        let ctx = Context::new();
        assert_eq!(interpolate("{{ }} and {{}}", &placeholders, &ctx), "{{ }} and {{}}");
    }
}
