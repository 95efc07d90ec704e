use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::Entity;

/// A company record. `id` is assigned at creation and never changes; the
/// descriptive fields are nullable.
#[derive(Debug, Clone, Serialize)]
pub struct Company {
    pub id: String,
    pub company: Option<String>,
    pub tlp: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Company {
    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

/// Payload for `POST /api/companies`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyCreate {
    pub company: String,
    #[serde(default)]
    pub tlp: Option<String>,
}

impl CompanyCreate {
    pub fn parse(payload: Value) -> Result<Self, ApiError> {
        if !payload.is_object() {
            return Err(ApiError::bad_request("request body must be a JSON object"));
        }

        let create: Self = serde_json::from_value(payload)
            .map_err(|e| ApiError::validation_error(e.to_string(), None))?;

        if create.company.trim().is_empty() {
            let mut field_errors = HashMap::new();
            field_errors.insert("company".to_string(), "must not be empty".to_string());
            return Err(ApiError::validation_error(
                "invalid company payload",
                Some(field_errors),
            ));
        }

        Ok(create)
    }

    pub fn into_record(self) -> Company {
        let now = Utc::now();
        Company {
            id: Uuid::new_v4().to_string(),
            company: Some(self.company),
            tlp: self.tlp,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for `PATCH /api/companies/:id`. A field absent from the
/// body leaves the stored value untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompanyPatch {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub tlp: Option<String>,
}

impl CompanyPatch {
    pub fn parse(payload: Value) -> Result<Self, ApiError> {
        if !payload.is_object() {
            return Err(ApiError::bad_request("request body must be a JSON object"));
        }

        serde_json::from_value(payload).map_err(|e| ApiError::validation_error(e.to_string(), None))
    }

    pub fn apply_to(&self, record: &mut Company) {
        if let Some(company) = &self.company {
            record.company = Some(company.clone());
        }
        if let Some(tlp) = &self.tlp {
            record.tlp = Some(tlp.clone());
        }
    }
}
