use dioxus::prelude::*;
use shared_types::{SectionId, Session};

/// Global authentication state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub session: Signal<Option<Session>>,
    /// Section the gate last authorized. Drives nav highlighting.
    pub active: Signal<Option<SectionId>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            session: Signal::new(None),
            active: Signal::new(None),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// Store a freshly resolved session, skipping the write when nothing
    /// changed so readers are not woken needlessly.
    pub fn set_session(&mut self, session: Session) {
        if self.session.peek().as_ref() != Some(&session) {
            self.session.set(Some(session));
        }
    }

    pub fn set_active(&mut self, section: SectionId) {
        if *self.active.peek() != Some(section) {
            self.active.set(Some(section));
        }
    }

    pub fn clear_auth(&mut self) {
        self.session.set(None);
        self.active.set(None);
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// The signed-in user's id, if any.
pub fn use_user_id() -> Option<uuid::Uuid> {
    let auth = use_auth();
    let binding = auth.session.read();
    binding.as_ref().map(|s| s.user_id)
}
