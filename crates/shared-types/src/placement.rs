//! NOC requests and internship applications.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::SectionId;

#[cfg(feature = "validation")]
use validator::Validate;

/// Lifecycle of a No-Objection Certificate request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    /// Whether a reviewer may set this status.
    pub fn is_decision(&self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

/// Stored NOC request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NocRequest {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub student_email: String,
    pub company: String,
    pub role_title: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    pub duration_weeks: i32,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: RequestStatus,
    #[serde(default)]
    pub reviewer_id: Option<Uuid>,
    #[serde(default)]
    pub reviewer_note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request DTO for submitting a NOC request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewNocRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 120, message = "Company is required (max 120 characters)"))
    )]
    pub company: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 120, message = "Role title is required (max 120 characters)"))
    )]
    pub role_title: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1, max = 52, message = "Duration must be between 1 and 52 weeks"))
    )]
    pub duration_weeks: i32,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 1000, message = "Notes must be at most 1000 characters"))
    )]
    pub notes: Option<String>,
}

impl NewNocRequest {
    /// Trimmed copy; blank notes become `None`. Validate this, not the raw
    /// input, so whitespace-only fields count as empty.
    pub fn normalized(&self) -> Self {
        Self {
            company: self.company.trim().to_string(),
            role_title: self.role_title.trim().to_string(),
            start_date: self.start_date,
            duration_weeks: self.duration_weeks,
            notes: trimmed_opt(self.notes.as_deref()),
        }
    }
}

fn trimmed_opt(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Request DTO for approving or rejecting a NOC request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NocReview {
    pub decision: RequestStatus,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 500, message = "Note must be at most 500 characters"))
    )]
    pub note: Option<String>,
}

/// Progress of an internship application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Shortlisted,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Selected,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

/// Stored internship application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Application {
    pub id: Uuid,
    pub student_id: Uuid,
    pub student_name: String,
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub applied_on: Option<NaiveDate>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request DTO for recording an application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewApplication {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 120, message = "Company is required (max 120 characters)"))
    )]
    pub company: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 120, message = "Position is required (max 120 characters)"))
    )]
    pub position: String,
    #[serde(default)]
    pub applied_on: Option<NaiveDate>,
}

impl NewApplication {
    pub fn normalized(&self) -> Self {
        Self {
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            applied_on: self.applied_on,
        }
    }
}

/// Request DTO for moving an application to a new status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct ApplicationStatusUpdate {
    pub status: ApplicationStatus,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 500, message = "Note must be at most 500 characters"))
    )]
    pub note: Option<String>,
}

/// One tile on the overview page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatCard {
    pub label: String,
    pub value: i64,
    #[serde(default)]
    pub link: Option<SectionId>,
}
