//! Authorization gate: decides whether a session may open a section.
//!
//! A gate starts in `Loading`, moves once to `Authorized` or `Denied`, and
//! only leaves that state on a fresh navigation or a session refresh.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::role::{RoleDescriptor, SectionId};
use crate::session::Session;

/// Why a section was refused.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Denial {
    /// No valid session.
    Unauthenticated,
    /// Valid session whose role lacks the section. `fallback` is the role's
    /// default section.
    Unauthorized { role: String, fallback: SectionId },
}

impl Denial {
    /// Where the caller should be sent. `requested` is the path that was
    /// refused, carried through sign-in so the user lands back on it.
    pub fn redirect_to(&self, requested: &str) -> String {
        match self {
            Denial::Unauthenticated => login_path(Some(requested)),
            Denial::Unauthorized { fallback, .. } => fallback.path().to_string(),
        }
    }

    pub fn to_error(&self, section: SectionId) -> AppError {
        match self {
            Denial::Unauthenticated => AppError::unauthenticated("Sign in required"),
            Denial::Unauthorized { role, .. } => AppError::unauthorized(format!(
                "Role '{role}' cannot open section '{section}'"
            )),
        }
    }
}

/// Sign-in entry point, optionally remembering where to return.
pub fn login_path(redirect: Option<&str>) -> String {
    match redirect {
        Some(path) if !path.is_empty() && path != "/" => {
            format!("/login?redirect={}", urlencoding::encode(path))
        }
        _ => "/login".to_string(),
    }
}

/// Single evaluation of the gate for one section.
pub fn evaluate(
    session: Option<&Session>,
    section: SectionId,
) -> Result<&'static RoleDescriptor, Denial> {
    let session = session.ok_or(Denial::Unauthenticated)?;
    let descriptor = session.descriptor();
    if descriptor.allows(section) {
        Ok(descriptor)
    } else {
        Err(Denial::Unauthorized {
            role: session.role.clone(),
            fallback: descriptor.default_section,
        })
    }
}

/// Observable gate state for one navigation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    Loading,
    Authorized { session: Session, section: SectionId },
    Denied { section: SectionId, denial: Denial },
}

/// Gate bound to the section currently being navigated to.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationGate {
    section: SectionId,
    state: GateState,
}

impl AuthorizationGate {
    pub fn new(section: SectionId) -> Self {
        Self {
            section,
            state: GateState::Loading,
        }
    }

    pub fn section(&self) -> SectionId {
        self.section
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self.state, GateState::Authorized { .. })
    }

    /// Apply the resolver's answer. Only a `Loading` gate transitions; a
    /// settled gate ignores late or repeated answers.
    pub fn resolve(&mut self, session: Option<&Session>) -> &GateState {
        if self.state == GateState::Loading {
            self.state = self.decide(session);
        }
        &self.state
    }

    /// The session was refreshed (sign-in, sign-out, role change).
    /// Re-evaluates from scratch.
    pub fn session_refreshed(&mut self, session: Option<&Session>) -> &GateState {
        self.state = self.decide(session);
        &self.state
    }

    /// A fresh navigation. Returns the gate to `Loading` for the new section.
    pub fn navigate(&mut self, section: SectionId) {
        self.section = section;
        self.state = GateState::Loading;
    }

    fn decide(&self, session: Option<&Session>) -> GateState {
        let Some(session) = session else {
            return GateState::Denied {
                section: self.section,
                denial: Denial::Unauthenticated,
            };
        };
        match evaluate(Some(session), self.section) {
            Ok(_) => GateState::Authorized {
                session: session.clone(),
                section: self.section,
            },
            Err(denial) => GateState::Denied {
                section: self.section,
                denial,
            },
        }
    }
}

/// Answer of `GET /api/sections/{section}/access`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SectionAccess {
    pub section: SectionId,
    pub authorized: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

impl SectionAccess {
    pub fn evaluate(session: Option<&Session>, section: SectionId) -> Self {
        match evaluate(session, section) {
            Ok(_) => Self {
                section,
                authorized: true,
                redirect_to: None,
            },
            Err(denial) => Self {
                section,
                authorized: false,
                redirect_to: Some(denial.redirect_to(section.path())),
            },
        }
    }
}
