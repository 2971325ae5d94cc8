//! # 문자열 유틸리티
//!
//! 문자열 정리, ObjectId 파싱, 응답용 시각 포맷 함수들입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use crate::core::AppError;

/// 선택적 문자열 필드 정리
///
/// 빈 문자열이나 공백만 있는 경우 `None`, 그 외에는 앞뒤 공백을 제거해서 반환합니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  Hello  ".to_string())), Some("Hello".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 경로/본문의 16진수 ID를 ObjectId로 변환합니다. 형식이 틀리면 400입니다.
pub fn parse_object_id(value: &str) -> Result<ObjectId, AppError> {
    Ok(ObjectId::parse_str(value.trim())?)
}

pub fn parse_optional_object_id(value: Option<&str>) -> Result<Option<ObjectId>, AppError> {
    value.map(parse_object_id).transpose()
}

/// BSON 시각을 RFC 3339 문자열로 변환합니다.
pub fn to_rfc3339(value: &DateTime) -> String {
    value.try_to_rfc3339_string().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(parse_object_id("xyz"), Err(AppError::ValidationError(_))));
        assert_eq!(parse_optional_object_id(None).unwrap(), None);
    }

    #[test]
    fn test_to_rfc3339() {
        let dt = DateTime::from_millis(0);
        assert_eq!(to_rfc3339(&dt), "1970-01-01T00:00:00Z");
    }
}
