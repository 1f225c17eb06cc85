use ai_client::strip_code_blocks;

use crate::error::SalesAgentError;
use crate::types::SalesResponse;

/// Parse raw model output into a [`SalesResponse`].
///
/// One surrounding Markdown code fence is stripped; everything else must be a
/// single JSON object with `thought`, `answer` and `related_tags`. Extra keys
/// are ignored. There is no repair of malformed output.
pub fn parse_response(raw: &str) -> Result<SalesResponse, SalesAgentError> {
    serde_json::from_str(strip_code_blocks(raw)).map_err(|source| SalesAgentError::Parse {
        source,
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r##"{"thought": "공구리는 콘크리트", "answer": "FastFix 300을 추천드립니다.", "related_tags": ["#흙손", "#프라이머", "#보수/방수"]}"##;

    #[test]
    fn parses_plain_json() {
        let response = parse_response(VALID).unwrap();
        assert_eq!(response.thought, "공구리는 콘크리트");
        assert_eq!(response.answer, "FastFix 300을 추천드립니다.");
        assert_eq!(response.related_tags, vec!["#흙손", "#프라이머", "#보수/방수"]);
    }

    #[test]
    fn strips_json_code_fence() {
        let fenced = format!("```json\n{VALID}\n```");
        assert_eq!(parse_response(&fenced).unwrap(), parse_response(VALID).unwrap());
    }

    #[test]
    fn strips_uppercase_fence_tag() {
        let fenced = format!("```JSON\n{VALID}\n```");
        assert_eq!(parse_response(&fenced).unwrap(), parse_response(VALID).unwrap());
    }

    #[test]
    fn ignores_extra_keys() {
        let raw = r#"{"thought": "t", "answer": "a", "related_tags": [], "confidence": 0.9}"#;
        assert_eq!(parse_response(raw).unwrap().answer, "a");
    }

    #[test]
    fn missing_field_is_parse_error() {
        let raw = r#"{"thought": "t", "answer": "a"}"#;
        let err = parse_response(raw).unwrap_err();
        assert!(matches!(err, SalesAgentError::Parse { .. }));
        assert_eq!(err.raw_output(), Some(raw));
    }

    #[test]
    fn prose_around_json_is_parse_error() {
        let raw = format!("물론이죠! 답변입니다:\n{VALID}");
        assert!(matches!(
            parse_response(&raw),
            Err(SalesAgentError::Parse { .. })
        ));
    }

    #[test]
    fn truncated_json_is_parse_error() {
        let raw = &VALID[..VALID.len() - 10];
        let err = parse_response(raw).unwrap_err();
        assert_eq!(err.raw_output(), Some(raw));
    }

    #[test]
    fn wrong_tag_type_is_parse_error() {
        let raw = r##"{"thought": "t", "answer": "a", "related_tags": "#롤러"}"##;
        assert!(parse_response(raw).is_err());
    }
}
