//! Safe placeholder substitution for message templates
//!
//! Recognizes `$name` and `${name}` placeholders. A placeholder whose
//! name is present in the context is replaced by the value's string
//! form; an absent name leaves the placeholder literally unchanged, so
//! substitution can never fail. `$$` produces a literal `$`.

use serde_json::{Map, Value};

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// String form of a context value: strings render bare, everything else
/// as compact JSON.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Substitute `$name` / `${name}` placeholders from `context`.
///
/// Missing names stay as literal text; there is no strict mode.
pub fn safe_substitute(template: &str, context: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some((_, '$')) => {
                chars.next();
                out.push('$');
            }
            Some((brace_idx, '{')) => {
                // ${name}: scan to the closing brace
                let name_start = brace_idx + 1;
                let rest = &template[name_start..];
                match rest.find('}') {
                    Some(end) if end > 0 => {
                        let name = &rest[..end];
                        match context.get(name) {
                            Some(value) => out.push_str(&value_to_string(value)),
                            None => out.push_str(&template[idx..name_start + end + 1]),
                        }
                        // consume up to and including the '}'
                        let close_idx = name_start + end;
                        while let Some(&(i, _)) = chars.peek() {
                            if i <= close_idx {
                                chars.next();
                            } else {
                                break;
                            }
                        }
                    }
                    _ => out.push(c),
                }
            }
            Some((name_start, n)) if is_ident_start(n) => {
                let mut name_end = name_start + n.len_utf8();
                chars.next();
                while let Some(&(i, nc)) = chars.peek() {
                    if is_ident_continue(nc) {
                        name_end = i + nc.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let name = &template[name_start..name_end];
                match context.get(name) {
                    Some(value) => out.push_str(&value_to_string(value)),
                    None => out.push_str(&template[idx..name_end]),
                }
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_simple_substitution() {
        let context = ctx(&[("var", json!(1))]);
        assert_eq!(
            safe_substitute("statement with variable $var", &context),
            "statement with variable 1"
        );
    }

    #[test]
    fn test_braced_substitution() {
        let context = ctx(&[("user", json!("alice"))]);
        assert_eq!(
            safe_substitute("hello ${user}!", &context),
            "hello alice!"
        );
    }

    #[test]
    fn test_missing_key_left_literal() {
        let context = Map::new();
        assert_eq!(safe_substitute("$missing", &context), "$missing");
        assert_eq!(safe_substitute("${missing}", &context), "${missing}");
    }

    #[test]
    fn test_string_values_render_bare() {
        let context = ctx(&[("app", json!("API"))]);
        assert_eq!(safe_substitute("from $app", &context), "from API");
    }

    #[test]
    fn test_non_scalar_values_render_as_json() {
        let context = ctx(&[("tags", json!(["a", "b"]))]);
        assert_eq!(safe_substitute("t=$tags", &context), "t=[\"a\",\"b\"]");
    }

    #[test]
    fn test_dollar_escape() {
        let context = ctx(&[("x", json!(5))]);
        assert_eq!(safe_substitute("cost $$$x", &context), "cost $5");
    }

    #[test]
    fn test_lone_dollar_is_literal() {
        let context = Map::new();
        assert_eq!(safe_substitute("100$ only", &context), "100$ only");
        assert_eq!(safe_substitute("trailing $", &context), "trailing $");
    }

    #[test]
    fn test_adjacent_placeholders() {
        let context = ctx(&[("a", json!("x")), ("b", json!("y"))]);
        assert_eq!(safe_substitute("$a$b", &context), "xy");
    }

    #[test]
    fn test_name_boundary() {
        let context = ctx(&[("id", json!(42))]);
        assert_eq!(safe_substitute("$id: done", &context), "42: done");
        // $idx is a different name and stays literal
        assert_eq!(safe_substitute("$idx", &context), "$idx");
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        let context = ctx(&[("a", json!(1))]);
        assert_eq!(safe_substitute("${a", &context), "${a");
    }
}
