//! Toolkit definition strings.
//!
//! Registrations carry an optional definition string of `key=value` pairs:
//!
//! ```text
//! min=0 max=10 step=0.1 label='Top speed' readonly
//! ```
//!
//! Values may be quoted with `'`, `"` or `` ` `` to include spaces. A bare
//! key is shorthand for `key=true`. Backends use [`parse_definition`] to turn
//! the string into ordered parameters.

use crate::error::ToolkitError;
use crate::toolkit::ParamValue;

/// Parse a definition string into `(key, value)` pairs, in order.
///
/// # Example
///
/// ```rust
/// use retweak_bar::parse_definition;
///
/// let params = parse_definition("min=0 label='Top speed' readonly").unwrap();
/// let keys: Vec<_> = params.iter().map(|(k, _)| k.as_str()).collect();
/// assert_eq!(keys, ["min", "label", "readonly"]);
/// ```
pub fn parse_definition(def: &str) -> Result<Vec<(String, ParamValue)>, ToolkitError> {
    let invalid = |reason: &str| ToolkitError::InvalidDefinition {
        def: def.to_string(),
        reason: reason.to_string(),
    };

    let mut params = Vec::new();
    let mut chars = def.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
            key.push(c);
        }
        if key.is_empty() {
            return Err(invalid("missing key before '='"));
        }

        if chars.next_if_eq(&'=').is_none() {
            params.push((key, ParamValue::Text("true".to_string())));
            continue;
        }

        let mut value = String::new();
        match chars.peek().copied() {
            Some(quote @ ('\'' | '"' | '`')) => {
                chars.next();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == quote {
                        closed = true;
                        break;
                    }
                    value.push(c);
                }
                if !closed {
                    return Err(invalid(&format!("unterminated {quote} quote for '{key}'")));
                }
            }
            _ => {
                while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                    value.push(c);
                }
            }
        }
        params.push((key, ParamValue::Text(value)));
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ParamValue {
        ParamValue::Text(s.to_string())
    }

    #[test]
    fn empty_definition() {
        assert_eq!(parse_definition(""), Ok(Vec::new()));
        assert_eq!(parse_definition("   "), Ok(Vec::new()));
    }

    #[test]
    fn plain_pairs() {
        let params = parse_definition(" min=0 max=10  step=0.5 ").unwrap();
        assert_eq!(
            params,
            vec![
                ("min".to_string(), text("0")),
                ("max".to_string(), text("10")),
                ("step".to_string(), text("0.5")),
            ]
        );
    }

    #[test]
    fn quoted_values() {
        let params = parse_definition("label='Top speed' help=\"in m/s\" group=`A B`").unwrap();
        assert_eq!(params[0].1, text("Top speed"));
        assert_eq!(params[1].1, text("in m/s"));
        assert_eq!(params[2].1, text("A B"));
    }

    #[test]
    fn bare_key_is_true() {
        let params = parse_definition("readonly").unwrap();
        assert_eq!(params, vec![("readonly".to_string(), text("true"))]);
    }

    #[test]
    fn empty_value() {
        let params = parse_definition("label= min=1").unwrap();
        assert_eq!(params[0], ("label".to_string(), text("")));
        assert_eq!(params[1], ("min".to_string(), text("1")));
    }

    #[test]
    fn unterminated_quote() {
        let err = parse_definition("label='Top speed").unwrap_err();
        assert!(matches!(err, ToolkitError::InvalidDefinition { .. }));
        assert!(err.to_string().contains("unterminated"), "{err}");
    }

    #[test]
    fn missing_key() {
        assert!(parse_definition("=5").is_err());
    }
}
