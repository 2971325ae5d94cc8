use chrono::NaiveDate;
use serde::Serialize;
use crate::domain::entities::candidates::{Candidate, StatusHistoryEntry};
use crate::utils::string_utils::to_rfc3339;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryResponse {
    pub status: String,
    pub expiration_date: Option<NaiveDate>,
    pub changed_at: String,
}

impl From<StatusHistoryEntry> for StatusHistoryResponse {
    fn from(entry: StatusHistoryEntry) -> Self {
        Self {
            status: entry.status.to_hex(),
            expiration_date: entry.expiration_date,
            changed_at: to_rfc3339(&entry.changed_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub age: i32,
    pub email: String,
    pub phone: String,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
    pub salary: f64,
    pub status: Option<String>,
    pub source: Option<String>,
    pub created_by: String,
    pub assigned_to: String,
    pub status_history: Vec<StatusHistoryResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Candidate> for CandidateResponse {
    fn from(candidate: Candidate) -> Self {
        let hex = |id: Option<mongodb::bson::oid::ObjectId>| id.map(|id| id.to_hex());

        Self {
            id: hex(candidate.id).unwrap_or_default(),
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            middle_name: candidate.middle_name,
            age: candidate.age,
            email: candidate.email,
            phone: candidate.phone,
            photo_url: candidate.photo_url,
            description: candidate.description,
            city: hex(candidate.city),
            salary: candidate.salary,
            status: hex(candidate.status),
            source: hex(candidate.source),
            created_by: candidate.created_by.to_hex(),
            assigned_to: candidate.assigned_to.to_hex(),
            status_history: candidate.status_history.into_iter().map(Into::into).collect(),
            created_at: to_rfc3339(&candidate.created_at),
            updated_at: to_rfc3339(&candidate.updated_at),
        }
    }
}
