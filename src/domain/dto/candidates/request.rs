use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;
use crate::domain::dto::validators::{validate_not_blank, validate_object_id};

/// 후보자 생성 요청
///
/// `recruiterId`는 관리자만 지정할 수 있습니다. 생략하면 요청자가 담당자가 됩니다.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidateRequest {
    #[validate(length(max = 100), custom(function = "validate_not_blank"))]
    pub first_name: String,

    #[validate(length(max = 100), custom(function = "validate_not_blank"))]
    pub last_name: String,

    #[validate(length(max = 100))]
    pub middle_name: Option<String>,

    #[validate(range(min = 18, max = 100, message = "나이는 18세 이상이어야 합니다"))]
    pub age: i32,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 5, max = 30, message = "전화번호는 5~30자여야 합니다"))]
    pub phone: String,

    #[validate(url(message = "유효한 URL 형식이 아닙니다"))]
    pub photo_url: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_object_id"))]
    pub city: Option<String>,

    #[validate(range(min = 0.0, message = "급여는 0 이상이어야 합니다"))]
    pub salary: f64,

    #[validate(custom(function = "validate_object_id"))]
    pub status: Option<String>,

    pub expiration_date: Option<NaiveDate>,

    #[validate(custom(function = "validate_object_id"))]
    pub source: Option<String>,

    #[validate(custom(function = "validate_object_id"))]
    pub recruiter_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidateRequest {
    #[validate(length(max = 100), custom(function = "validate_not_blank"))]
    pub first_name: Option<String>,
    #[validate(length(max = 100), custom(function = "validate_not_blank"))]
    pub last_name: Option<String>,
    #[validate(length(max = 100))]
    pub middle_name: Option<String>,
    #[validate(range(min = 18, max = 100, message = "나이는 18세 이상이어야 합니다"))]
    pub age: Option<i32>,
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,
    #[validate(length(min = 5, max = 30, message = "전화번호는 5~30자여야 합니다"))]
    pub phone: Option<String>,
    #[validate(url(message = "유효한 URL 형식이 아닙니다"))]
    pub photo_url: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_object_id"))]
    pub city: Option<String>,
    #[validate(range(min = 0.0, message = "급여는 0 이상이어야 합니다"))]
    pub salary: Option<f64>,
    #[validate(custom(function = "validate_object_id"))]
    pub status: Option<String>,
    /// 상태 변경과 함께 이력에 기록됩니다.
    pub expiration_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_object_id"))]
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> serde_json::Value {
        serde_json::json!({
            "firstName": "Олена",
            "lastName": "Коваль",
            "age": 25,
            "email": "olena@example.com",
            "phone": "+380501112233",
            "salary": 1200.5
        })
    }

    #[test]
    fn test_minimal_candidate_is_valid() {
        let req: CreateCandidateRequest = serde_json::from_value(body()).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_underage_and_negative_salary_rejected() {
        let mut value = body();
        value["age"] = serde_json::json!(17);
        let req: CreateCandidateRequest = serde_json::from_value(value).unwrap();
        assert!(req.validate().is_err());

        let mut value = body();
        value["salary"] = serde_json::json!(-1);
        let req: CreateCandidateRequest = serde_json::from_value(value).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_blank_last_name_rejected() {
        let mut value = body();
        value["lastName"] = serde_json::json!(" ");
        let req: CreateCandidateRequest = serde_json::from_value(value).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_phone_fails_to_parse() {
        let mut value = body();
        value.as_object_mut().unwrap().remove("phone");
        assert!(serde_json::from_value::<CreateCandidateRequest>(value).is_err());
    }
}
