use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::store::Entity;

/// An employee record, following the same shape rules as [`Company`]:
/// immutable id, nullable descriptive fields, store-managed timestamps.
///
/// [`Company`]: crate::models::Company
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Employee {
    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

/// Payload for `POST /api/employees`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeeCreate {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl EmployeeCreate {
    pub fn parse(payload: Value) -> Result<Self, ApiError> {
        if !payload.is_object() {
            return Err(ApiError::bad_request("request body must be a JSON object"));
        }

        let create: Self = serde_json::from_value(payload)
            .map_err(|e| ApiError::validation_error(e.to_string(), None))?;

        if create.name.trim().is_empty() {
            let mut field_errors = HashMap::new();
            field_errors.insert("name".to_string(), "must not be empty".to_string());
            return Err(ApiError::validation_error(
                "invalid employee payload",
                Some(field_errors),
            ));
        }

        Ok(create)
    }

    pub fn into_record(self) -> Employee {
        let now = Utc::now();
        Employee {
            id: Uuid::new_v4().to_string(),
            name: Some(self.name),
            email: self.email,
            position: self.position,
            phone: self.phone,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for `PATCH /api/employees/:id`; absent fields keep their
/// stored values.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmployeePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl EmployeePatch {
    pub fn parse(payload: Value) -> Result<Self, ApiError> {
        if !payload.is_object() {
            return Err(ApiError::bad_request("request body must be a JSON object"));
        }

        serde_json::from_value(payload).map_err(|e| ApiError::validation_error(e.to_string(), None))
    }

    pub fn apply_to(&self, record: &mut Employee) {
        if let Some(name) = &self.name {
            record.name = Some(name.clone());
        }
        if let Some(email) = &self.email {
            record.email = Some(email.clone());
        }
        if let Some(position) = &self.position {
            record.position = Some(position.clone());
        }
        if let Some(phone) = &self.phone {
            record.phone = Some(phone.clone());
        }
    }
}
