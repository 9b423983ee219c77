//! Placeholder substitution for view templates.
//!
//! `{{ key }}` inserts the bound value HTML-escaped, `{!! key !!}` inserts it
//! verbatim. Strings are inserted as-is, `null` and unbound keys render as
//! nothing, anything else renders as compact JSON. Unterminated tags are left
//! in the output untouched.

use serde_json::{Map, Value};

const ESCAPED: (&str, &str) = ("{{", "}}");
const RAW: (&str, &str) = ("{!!", "!!}");

pub fn render(template: &str, data: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some((start, raw)) = next_tag(rest) {
        let (open, close) = if raw { RAW } else { ESCAPED };
        let after_open = &rest[start + open.len()..];
        let Some(end) = after_open.find(close) else {
            break;
        };

        out.push_str(&rest[..start]);
        let key = after_open[..end].trim();
        let value = display_value(data.get(key));
        if raw {
            out.push_str(&value);
        } else {
            escape_into(&mut out, &value);
        }
        rest = &after_open[end + close.len()..];
    }

    out.push_str(rest);
    out
}

/// Position of the next tag and whether it is a raw one.
fn next_tag(s: &str) -> Option<(usize, bool)> {
    match (s.find(RAW.0), s.find(ESCAPED.0)) {
        (Some(r), Some(e)) if r <= e => Some((r, true)),
        (_, Some(e)) => Some((e, false)),
        (Some(r), None) => Some((r, true)),
        (None, None) => None,
    }
}

fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_escaped_and_raw() {
        let d = data(json!({ "title": "<b>", "content": "<div>ok</div>" }));
        assert_eq!(
            render("<h1>{{ title }}</h1>{!! content !!}", &d),
            "<h1>&lt;b&gt;</h1><div>ok</div>"
        );
    }

    #[test]
    fn test_missing_and_null_render_empty() {
        let d = data(json!({ "content": null }));
        assert_eq!(render("[{{ content }}][{!! other !!}]", &d), "[][]");
    }

    #[test]
    fn test_non_string_values_render_as_json() {
        let d = data(json!({ "n": 3, "list": [1, 2], "flag": true }));
        assert_eq!(render("{{n}} {!!list!!} {!! flag !!}", &d), "3 [1,2] true");
    }

    #[test]
    fn test_unterminated_tag_is_kept() {
        let d = data(json!({ "a": "x" }));
        assert_eq!(render("{{ a }} and {{ b", &d), "x and {{ b");
    }

    #[test]
    fn test_no_tags() {
        assert_eq!(render("plain", &Map::new()), "plain");
    }
}
