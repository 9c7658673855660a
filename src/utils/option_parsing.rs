use std::collections::BTreeMap;

use crate::config::ConfigError;

/// Removes one matching pair of `'` or `"` around `s`, if present.
pub fn strip_surrounding_quotes(s: &str) -> &str {
    ['\'', '"']
        .into_iter()
        .find_map(|q| s.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(s)
}

/// Splits on commas outside single or double quotes. Tokens are trimmed,
/// quotes are kept, and empty tokens are dropped.
pub fn split_preserving_quotes(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes: Option<char> = None;

    for ch in line.chars() {
        match in_quotes {
            Some(q) => {
                if ch == q {
                    in_quotes = None;
                }
                cur.push(ch);
            }
            None => {
                if ch == '"' || ch == '\'' {
                    in_quotes = Some(ch);
                    cur.push(ch);
                } else if ch == ',' {
                    push_token(&mut out, &cur);
                    cur.clear();
                } else {
                    cur.push(ch);
                }
            }
        }
    }
    push_token(&mut out, &cur);
    out
}

fn push_token(out: &mut Vec<String>, token: &str) {
    let token = token.trim();
    if !token.is_empty() {
        out.push(token.to_string());
    }
}

/// Parses `"key=value, key2='a,b'"` into a key → raw value map.
///
/// Keys and values are trimmed and values lose one layer of surrounding
/// quotes. Only the first `=` separates key from value.
pub fn parse_options(line: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let mut options = BTreeMap::new();
    for token in split_preserving_quotes(line) {
        let Some((key, value)) = token.split_once('=') else {
            return Err(ConfigError::MalformedOption(token));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::MalformedOption(token));
        }
        let value = strip_surrounding_quotes(value.trim()).to_string();
        if options.insert(key.to_string(), value).is_some() {
            return Err(ConfigError::DuplicateKey(key.to_string()));
        }
    }
    Ok(options)
}
