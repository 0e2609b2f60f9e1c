use serde_json::Value;

/// Flatten a structured address into tag tokens.
///
/// Every string-valued field becomes one lowercased, trimmed token, ordered
/// by field name (`serde_json` keeps object keys sorted). Non-string fields (numbers, nested
/// objects) and blank strings are skipped, and duplicates are dropped; it is
/// common for `city` and `state` to share a name. Anything other than a JSON
/// object yields no tokens.
pub fn flatten_address(address: &Value) -> Vec<String> {
    let Some(fields) = address.as_object() else {
        return Vec::new();
    };
    let mut tokens: Vec<String> = Vec::with_capacity(fields.len());
    for value in fields.values() {
        let Some(token) = value.as_str().map(|s| s.trim().to_lowercase()) else {
            continue;
        };
        if !token.is_empty() && !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}
