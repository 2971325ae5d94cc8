use serde::Deserialize;
use validator::Validate;
use crate::domain::dto::validators::{validate_object_id, COLOR_REGEX, NAME_REGEX};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCityRequest {
    #[validate(length(min = 2, max = 50, message = "이름은 2~50자여야 합니다"))]
    #[validate(regex(path = *NAME_REGEX, message = "이름은 문자, 공백, 아포스트로피, 하이픈만 사용할 수 있습니다"))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCityRequest {
    #[validate(length(min = 2, max = 50, message = "이름은 2~50자여야 합니다"))]
    #[validate(regex(path = *NAME_REGEX, message = "이름은 문자, 공백, 아포스트로피, 하이픈만 사용할 수 있습니다"))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSourceRequest {
    #[validate(length(min = 2, max = 50, message = "이름은 2~50자여야 합니다"))]
    #[validate(regex(path = *NAME_REGEX, message = "이름은 문자, 공백, 아포스트로피, 하이픈만 사용할 수 있습니다"))]
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSourceRequest {
    #[validate(length(min = 2, max = 50, message = "이름은 2~50자여야 합니다"))]
    #[validate(regex(path = *NAME_REGEX, message = "이름은 문자, 공백, 아포스트로피, 하이픈만 사용할 수 있습니다"))]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStatusRequest {
    #[validate(length(min = 2, max = 50, message = "이름은 2~50자여야 합니다"))]
    #[validate(regex(path = *NAME_REGEX, message = "이름은 문자, 공백, 아포스트로피, 하이픈만 사용할 수 있습니다"))]
    pub name: String,

    #[validate(regex(path = *COLOR_REGEX, message = "색상은 #RRGGBB 형식이어야 합니다"))]
    pub color: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 2, max = 50, message = "이름은 2~50자여야 합니다"))]
    #[validate(regex(path = *NAME_REGEX, message = "이름은 문자, 공백, 아포스트로피, 하이픈만 사용할 수 있습니다"))]
    pub name: Option<String>,

    #[validate(regex(path = *COLOR_REGEX, message = "색상은 #RRGGBB 형식이어야 합니다"))]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBranchRequest {
    #[validate(length(min = 2, max = 50, message = "이름은 2~50자여야 합니다"))]
    #[validate(regex(path = *NAME_REGEX, message = "이름은 문자, 공백, 아포스트로피, 하이픈만 사용할 수 있습니다"))]
    pub name: String,

    #[validate(custom(function = "validate_object_id"))]
    pub city: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateBranchRequest {
    #[validate(length(min = 2, max = 50, message = "이름은 2~50자여야 합니다"))]
    #[validate(regex(path = *NAME_REGEX, message = "이름은 문자, 공백, 아포스트로피, 하이픈만 사용할 수 있습니다"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_object_id"))]
    pub city: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateIntegrationRequest {
    #[validate(length(min = 3, max = 100, message = "이름은 3~100자여야 합니다"))]
    pub name: String,

    #[validate(url(message = "유효한 URL 형식이 아닙니다"))]
    pub url: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateIntegrationRequest {
    #[validate(length(min = 3, max = 100, message = "이름은 3~100자여야 합니다"))]
    pub name: Option<String>,

    #[validate(url(message = "유효한 URL 형식이 아닙니다"))]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_name_rules() {
        assert!(CreateCityRequest { name: "Львів".to_string() }.validate().is_ok());
        assert!(CreateCityRequest { name: "L".to_string() }.validate().is_err());
        assert!(CreateCityRequest { name: "Lviv 2".to_string() }.validate().is_err());
    }

    #[test]
    fn test_status_color_rule() {
        let ok = CreateStatusRequest { name: "Інтерв'ю".to_string(), color: "#12ab34".to_string() };
        let bad = CreateStatusRequest { name: "Інтерв'ю".to_string(), color: "green".to_string() };
        assert!(ok.validate().is_ok());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_update_allows_empty_body() {
        assert!(UpdateBranchRequest::default().validate().is_ok());
        let bad_city = UpdateBranchRequest { name: None, city: Some("xyz".to_string()) };
        assert!(bad_city.validate().is_err());
    }

    #[test]
    fn test_integration_url() {
        let bad = CreateIntegrationRequest { name: "Work.ua".to_string(), url: "not a url".to_string() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_name_error_carries_message() {
        let err = CreateCityRequest { name: "Kyiv!".to_string() }.validate().unwrap_err();
        assert!(err.to_string().contains("아포스트로피"));
    }
}
