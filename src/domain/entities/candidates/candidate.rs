use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 상태 변경 이력 한 건 (추가만 가능)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub status: ObjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    pub changed_at: DateTime,
}

impl StatusHistoryEntry {
    pub fn new(status: ObjectId, expiration_date: Option<NaiveDate>) -> Self {
        Self { status, expiration_date, changed_at: DateTime::now() }
    }
}

/// `candidates` 컬렉션 문서
///
/// `createdBy`는 최초 생성자로 고정되고, `assignedTo`는 현재 담당 리크루터입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub age: i32,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<ObjectId>,
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ObjectId>,
    pub created_by: ObjectId,
    pub assigned_to: ObjectId,
    #[serde(default)]
    pub status_history: Vec<StatusHistoryEntry>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 후보자 부분 수정 내용
///
/// `None` 필드는 변경하지 않습니다. 저장소는 `$set`과 `$push`를 한 번의 문서 쓰기로 적용합니다.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ObjectId>,
    #[serde(skip)]
    pub history_entry: Option<StatusHistoryEntry>,
}

impl CandidateChanges {
    /// 메모리 저장소 및 테스트용: 변경 내용을 문서에 직접 적용합니다.
    pub fn apply_to(&self, candidate: &mut Candidate) {
        let changes = self.clone();

        if let Some(v) = changes.first_name { candidate.first_name = v; }
        if let Some(v) = changes.last_name { candidate.last_name = v; }
        if let Some(v) = changes.middle_name { candidate.middle_name = Some(v); }
        if let Some(v) = changes.age { candidate.age = v; }
        if let Some(v) = changes.email { candidate.email = v; }
        if let Some(v) = changes.phone { candidate.phone = v; }
        if let Some(v) = changes.photo_url { candidate.photo_url = Some(v); }
        if let Some(v) = changes.description { candidate.description = Some(v); }
        if let Some(v) = changes.city { candidate.city = Some(v); }
        if let Some(v) = changes.salary { candidate.salary = v; }
        if let Some(v) = changes.status { candidate.status = Some(v); }
        if let Some(v) = changes.source { candidate.source = Some(v); }
        if let Some(entry) = changes.history_entry {
            candidate.status_history.push(entry);
        }

        candidate.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        let owner = ObjectId::new();
        Candidate {
            id: Some(ObjectId::new()),
            first_name: "Олена".to_string(),
            last_name: "Коваль".to_string(),
            middle_name: None,
            age: 25,
            email: "olena@example.com".to_string(),
            phone: "+380501112233".to_string(),
            photo_url: None,
            description: None,
            city: None,
            salary: 1000.0,
            status: None,
            source: None,
            created_by: owner,
            assigned_to: owner,
            status_history: Vec::new(),
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn test_apply_changes_appends_history() {
        let mut c = candidate();
        let status = ObjectId::new();
        let changes = CandidateChanges {
            salary: Some(1500.0),
            status: Some(status),
            history_entry: Some(StatusHistoryEntry::new(status, None)),
            ..Default::default()
        };

        changes.apply_to(&mut c);
        changes.apply_to(&mut c);

        assert_eq!(c.salary, 1500.0);
        assert_eq!(c.status, Some(status));
        assert_eq!(c.status_history.len(), 2);
        assert_eq!(c.first_name, "Олена");
    }

    #[test]
    fn test_changes_serialize_only_present_fields() {
        let changes = CandidateChanges { phone: Some("1".to_string()), ..Default::default() };
        let doc = mongodb::bson::to_document(&changes).unwrap();

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.get_str("phone").unwrap(), "1");
    }
}
