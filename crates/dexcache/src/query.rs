//! User query handling

use crate::error::{DexError, DexResult};

/// Most suggestions returned for a prefix
pub const SUGGESTION_LIMIT: usize = 6;

/// Canonical lookup key for a name-or-id query
///
/// Names are trimmed and lowercased. A query that parses as an integer is an
/// id; it must be positive and is written without leading zeros.
pub fn normalize_query(input: &str) -> DexResult<String> {
    let query = input.trim().to_lowercase();
    if query.is_empty() {
        return Err(DexError::InvalidQuery {
            message: "empty query".to_string(),
        });
    }

    match query.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id.to_string()),
        Ok(_) => Err(DexError::InvalidQuery {
            message: format!("invalid id: {}", query),
        }),
        Err(_) if query.bytes().all(|b| b.is_ascii_digit()) => Err(DexError::InvalidQuery {
            message: format!("invalid id: {}", query),
        }),
        Err(_) => Ok(query),
    }
}

/// Names starting with `input`, case-insensitively, in index order
pub fn suggest<'a>(names: &'a [String], input: &str, limit: usize) -> Vec<&'a str> {
    let prefix = input.trim().to_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }

    names
        .iter()
        .map(String::as_str)
        .filter(|name| name.starts_with(&prefix))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_lowercased() {
        assert_eq!(normalize_query("  Pikachu ").unwrap(), "pikachu");
        assert_eq!(normalize_query("mr-mime").unwrap(), "mr-mime");
    }

    #[test]
    fn test_ids_are_canonical() {
        assert_eq!(normalize_query("007").unwrap(), "7");
        assert_eq!(normalize_query("25").unwrap(), "25");
    }

    #[test]
    fn test_rejects_bad_input() {
        for input in ["", "   ", "0", "-3", "000", "99999999999999999999"] {
            let err = normalize_query(input).unwrap_err();
            assert!(matches!(err, DexError::InvalidQuery { .. }), "{}", input);
        }
    }

    #[test]
    fn test_suggest() {
        let names: Vec<String> = ["pichu", "pikachu", "pidgey", "pidgeotto", "pineco", "piplup", "pignite", "raichu"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let hits = suggest(&names, "PI", SUGGESTION_LIMIT);
        assert_eq!(hits, vec!["pichu", "pikachu", "pidgey", "pidgeotto", "pineco", "piplup"]);
        assert_eq!(suggest(&names, "rai", SUGGESTION_LIMIT), vec!["raichu"]);
        assert!(suggest(&names, "zz", SUGGESTION_LIMIT).is_empty());
        assert!(suggest(&names, "", SUGGESTION_LIMIT).is_empty());
    }
}
