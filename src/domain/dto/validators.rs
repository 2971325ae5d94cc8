//! 요청 DTO에서 공유하는 검증 규칙
use mongodb::bson::oid::ObjectId;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// 라틴/키릴 문자(우크라이나어 포함), 공백, 아포스트로피, 하이픈
pub static NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Zа-яА-ЯіІїЇєЄґҐ'’ -]+$").expect("NAME_REGEX 컴파일 실패")
});

/// `#RRGGBB`
pub static COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("COLOR_REGEX 컴파일 실패")
});

/// 최소 8자, 대문자와 숫자를 하나 이상 포함
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= 8;
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(long_enough && has_uppercase && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 8자 이상이며 대문자와 숫자를 포함해야 합니다".into()));
    }

    Ok(())
}

/// 24자리 16진수 ObjectId 문자열
pub fn validate_object_id(value: &str) -> Result<(), ValidationError> {
    ObjectId::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("object_id").with_message("올바르지 않은 ID 형식입니다".into()))
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("빈 값은 허용되지 않습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_regex() {
        assert!(NAME_REGEX.is_match("Київ"));
        assert!(NAME_REGEX.is_match("Ivano-Frankivsk"));
        assert!(NAME_REGEX.is_match("Кам'янське"));
        assert!(!NAME_REGEX.is_match("Kyiv1"));
        assert!(!NAME_REGEX.is_match("<script>"));
    }

    #[test]
    fn test_color_regex() {
        assert!(COLOR_REGEX.is_match("#00ff7A"));
        assert!(!COLOR_REGEX.is_match("00ff7a"));
        assert!(!COLOR_REGEX.is_match("#fff"));
    }

    #[test]
    fn test_password_strength() {
        assert!(validate_password_strength("Password1").is_ok());
        assert!(validate_password_strength("password1").is_err());
        assert!(validate_password_strength("Password").is_err());
        assert!(validate_password_strength("Pass1").is_err());
    }

    #[test]
    fn test_object_id() {
        assert!(validate_object_id(&ObjectId::new().to_hex()).is_ok());
        assert!(validate_object_id("123").is_err());
    }
}
