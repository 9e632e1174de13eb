use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CODE_FENCE: Regex =
        Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("valid regex");
}

/// Models often wrap their JSON in markdown code fences. Return the fenced
/// payload when present, the trimmed input otherwise.
pub fn extract_json(raw: &str) -> &str {
    match CODE_FENCE.captures(raw) {
        Some(captures) => captures.get(1).map_or(raw.trim(), |m| m.as_str()),
        None => raw.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_fenced_json() {
        let raw = "Here you go:\n```json\n{\"a\": 1}\n```\nEnjoy!";
        assert_eq!(extract_json(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_extracts_unlabelled_fence() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_passes_through_bare_json() {
        assert_eq!(extract_json("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn test_handles_multiline_payload() {
        let raw = "```json\n{\n  \"monday\": {}\n}\n```";
        assert_eq!(extract_json(raw), "{\n  \"monday\": {}\n}");
    }
}
