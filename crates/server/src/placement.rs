//! NOC requests, internship applications and the overview counters.

use serde_json::Value;
use shared_types::{
    AppError, Application, ApplicationStatus, ApplicationStatusUpdate, NewApplication,
    NewNocRequest, NocRequest, NocReview, RequestStatus, Role, SectionId, Session, StatCard,
};
use uuid::Uuid;

use crate::error_convert::ValidateRequest;
use crate::profile::ProfileBridge;
use crate::store::{from_row, DataStore, Query, Row, StoreError, Table};

fn reviews_nocs(session: &Session) -> bool {
    session.descriptor().allows(SectionId::NocApprovals)
}

fn manages_applications(session: &Session) -> bool {
    matches!(session.role(), Some(Role::TpOfficer | Role::SuperAdmin))
}

fn require_student(session: &Session, action: &str) -> Result<(), AppError> {
    if session.role() == Some(Role::Student) {
        Ok(())
    } else {
        Err(AppError::unauthorized(format!("Only students can {action}")))
    }
}

fn not_found_as(what: &'static str) -> impl Fn(StoreError) -> AppError {
    move |e| match e {
        StoreError::NotFound { .. } => AppError::not_found(format!("{what} not found")),
        other => other.into(),
    }
}

fn already_reviewed(status: RequestStatus) -> AppError {
    AppError::bad_request(format!("Request is already {}", status.as_str()))
}

fn opt_string(value: Option<&str>) -> Value {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Value::String(s.to_string()))
        .unwrap_or(Value::Null)
}

fn decode_all<T: serde::de::DeserializeOwned>(
    table: Table,
    rows: Vec<Value>,
) -> Result<Vec<T>, AppError> {
    rows.into_iter()
        .map(|row| from_row(table, row).map_err(AppError::from))
        .collect()
}

pub struct Placements<'a> {
    store: &'a dyn DataStore,
}

impl<'a> Placements<'a> {
    pub fn new(store: &'a dyn DataStore) -> Self {
        Self { store }
    }

    pub async fn submit_noc(
        &self,
        session: &Session,
        request: &NewNocRequest,
    ) -> Result<NocRequest, AppError> {
        require_student(session, "request a NOC")?;
        let request = request.normalized();
        request.validate_request()?;

        let mut row = Row::new();
        row.insert("student_id".into(), Value::String(session.user_id.to_string()));
        row.insert("student_name".into(), Value::String(session.display_name.clone()));
        row.insert("student_email".into(), Value::String(session.email.clone()));
        row.insert("company".into(), Value::String(request.company.clone()));
        row.insert("role_title".into(), Value::String(request.role_title.clone()));
        row.insert(
            "start_date".into(),
            serde_json::to_value(request.start_date).unwrap_or(Value::Null),
        );
        row.insert("duration_weeks".into(), Value::from(request.duration_weeks));
        row.insert("notes".into(), opt_string(request.notes.as_deref()));
        row.insert("status".into(), Value::String(RequestStatus::Pending.as_str().into()));

        let created: NocRequest = from_row(Table::NocRequests, self.store.insert(Table::NocRequests, row).await?)?;
        tracing::info!(request_id = %created.id, student_id = %session.user_id, "NOC request submitted");
        Ok(created)
    }

    /// Reviewers see every request, students only their own. Newest first.
    pub async fn list_noc(
        &self,
        session: &Session,
        status: Option<RequestStatus>,
    ) -> Result<Vec<NocRequest>, AppError> {
        let mut query = Query::new().order_desc("created_at");
        if !reviews_nocs(session) {
            require_student(session, "view NOC requests")?;
            query = query.eq("student_id", session.user_id.to_string());
        }
        if let Some(status) = status {
            query = query.eq("status", status.as_str());
        }
        decode_all(Table::NocRequests, self.store.select(Table::NocRequests, &query).await?)
    }

    async fn find_noc(&self, id: Uuid) -> Result<Option<NocRequest>, AppError> {
        self.store
            .select(Table::NocRequests, &Query::new().eq("id", id.to_string()).limit(1))
            .await?
            .into_iter()
            .next()
            .map(|row| from_row(Table::NocRequests, row).map_err(AppError::from))
            .transpose()
    }

    /// Approve or reject a pending request. The pending check is repeated
    /// inside the write, so of two concurrent reviews only one lands.
    pub async fn review_noc(
        &self,
        session: &Session,
        id: Uuid,
        review: &NocReview,
    ) -> Result<NocRequest, AppError> {
        if !reviews_nocs(session) {
            return Err(AppError::unauthorized("Your role cannot review NOC requests"));
        }
        review.validate_request()?;
        if !review.decision.is_decision() {
            return Err(AppError::bad_request("Decision must be approved or rejected"));
        }

        let current = self
            .find_noc(id)
            .await?
            .ok_or_else(|| AppError::not_found("NOC request not found"))?;
        if current.status != RequestStatus::Pending {
            return Err(already_reviewed(current.status));
        }

        let mut changes = Row::new();
        changes.insert("status".into(), Value::String(review.decision.as_str().into()));
        changes.insert("reviewer_id".into(), Value::String(session.user_id.to_string()));
        changes.insert("reviewer_note".into(), opt_string(review.note.as_deref()));
        let still_pending = Query::new().eq("status", RequestStatus::Pending.as_str());
        let Some(row) = self
            .store
            .update_where(Table::NocRequests, id, &still_pending, changes)
            .await?
        else {
            // Another reviewer decided between the read and the write.
            let current = self
                .find_noc(id)
                .await?
                .ok_or_else(|| AppError::not_found("NOC request not found"))?;
            tracing::info!(request_id = %id, reviewer_id = %session.user_id, "NOC review lost to a concurrent decision");
            return Err(already_reviewed(current.status));
        };

        tracing::info!(
            request_id = %id,
            reviewer_id = %session.user_id,
            decision = review.decision.as_str(),
            "NOC request reviewed"
        );
        Ok(from_row(Table::NocRequests, row)?)
    }

    pub async fn record_application(
        &self,
        session: &Session,
        application: &NewApplication,
    ) -> Result<Application, AppError> {
        require_student(session, "record applications")?;
        let application = application.normalized();
        application.validate_request()?;

        let applied_on = application
            .applied_on
            .unwrap_or_else(|| chrono::Utc::now().date_naive());
        let mut row = Row::new();
        row.insert("student_id".into(), Value::String(session.user_id.to_string()));
        row.insert("student_name".into(), Value::String(session.display_name.clone()));
        row.insert("company".into(), Value::String(application.company.clone()));
        row.insert("position".into(), Value::String(application.position.clone()));
        row.insert(
            "applied_on".into(),
            serde_json::to_value(applied_on).unwrap_or(Value::Null),
        );
        row.insert("status".into(), Value::String(ApplicationStatus::Applied.as_str().into()));

        let created: Application =
            from_row(Table::Applications, self.store.insert(Table::Applications, row).await?)?;
        tracing::info!(application_id = %created.id, student_id = %session.user_id, "Application recorded");
        Ok(created)
    }

    pub async fn list_applications(&self, session: &Session) -> Result<Vec<Application>, AppError> {
        let mut query = Query::new().order_desc("created_at");
        if !manages_applications(session) {
            require_student(session, "view applications")?;
            query = query.eq("student_id", session.user_id.to_string());
        }
        decode_all(
            Table::Applications,
            self.store.select(Table::Applications, &query).await?,
        )
    }

    pub async fn update_application_status(
        &self,
        session: &Session,
        id: Uuid,
        update: &ApplicationStatusUpdate,
    ) -> Result<Application, AppError> {
        if !manages_applications(session) {
            return Err(AppError::unauthorized("Your role cannot update applications"));
        }
        update.validate_request()?;

        let mut changes = Row::new();
        changes.insert("status".into(), Value::String(update.status.as_str().into()));
        if update.note.is_some() {
            changes.insert("note".into(), opt_string(update.note.as_deref()));
        }
        let row = self
            .store
            .update(Table::Applications, id, changes)
            .await
            .map_err(not_found_as("Application"))?;
        Ok(from_row(Table::Applications, row)?)
    }

    /// Counters for the overview page, chosen by role.
    pub async fn overview(&self, session: &Session) -> Result<Vec<StatCard>, AppError> {
        let own = || Query::new().eq("student_id", session.user_id.to_string());
        let pending = || Query::new().eq("status", RequestStatus::Pending.as_str());
        let card = |label: &str, value: i64, link: Option<SectionId>| StatCard {
            label: label.to_string(),
            value,
            link,
        };
        let profiles = ProfileBridge::new(self.store);

        let cards = match session.role() {
            Some(Role::Student) => vec![
                card(
                    "NOC requests",
                    self.store.count(Table::NocRequests, &own()).await?,
                    Some(SectionId::NocRequest),
                ),
                card(
                    "Awaiting approval",
                    self.store
                        .count(Table::NocRequests, &own().eq("status", RequestStatus::Pending.as_str()))
                        .await?,
                    Some(SectionId::NocRequest),
                ),
                card(
                    "Applications",
                    self.store.count(Table::Applications, &own()).await?,
                    Some(SectionId::Applications),
                ),
                card(
                    "Offers",
                    self.store
                        .count(
                            Table::Applications,
                            &own().eq("status", ApplicationStatus::Selected.as_str()),
                        )
                        .await?,
                    Some(SectionId::Applications),
                ),
            ],
            Some(Role::Teacher) => vec![
                card(
                    "Pending approvals",
                    self.store.count(Table::NocRequests, &pending()).await?,
                    Some(SectionId::NocApprovals),
                ),
                card(
                    "Students",
                    profiles.count_by_role(Role::Student).await?,
                    Some(SectionId::Students),
                ),
            ],
            Some(Role::TpOfficer) => vec![
                card(
                    "Pending approvals",
                    self.store.count(Table::NocRequests, &pending()).await?,
                    Some(SectionId::NocApprovals),
                ),
                card(
                    "Applications",
                    self.store.count(Table::Applications, &Query::new()).await?,
                    Some(SectionId::Applications),
                ),
                card(
                    "Selected",
                    self.store
                        .count(
                            Table::Applications,
                            &Query::new().eq("status", ApplicationStatus::Selected.as_str()),
                        )
                        .await?,
                    Some(SectionId::Applications),
                ),
                card(
                    "Students",
                    profiles.count_by_role(Role::Student).await?,
                    Some(SectionId::Students),
                ),
            ],
            Some(Role::SuperAdmin) => {
                let mut cards = vec![card(
                    "Pending approvals",
                    self.store.count(Table::NocRequests, &pending()).await?,
                    Some(SectionId::NocApprovals),
                )];
                for role in Role::ALL {
                    let label = shared_types::describe(role.as_str()).display_label;
                    cards.push(card(
                        &format!("{label} accounts"),
                        profiles.count_by_role(role).await?,
                        Some(SectionId::Users),
                    ));
                }
                cards
            }
            None => Vec::new(),
        };
        Ok(cards)
    }
}
