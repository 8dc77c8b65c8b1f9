pub mod applications;
pub mod login;
pub mod noc_approvals;
pub mod noc_request;
pub mod not_found;
pub mod overview;
pub mod profile;
pub mod students;
pub mod users;

use crate::auth::use_auth;
use dioxus::prelude::*;
use shared_types::{compose, AuthorizationGate, GateState, SectionId};
use shared_ui::AppShell;

use applications::Applications;
use login::Login;
use noc_approvals::NocApprovals;
use noc_request::NocRequestForm;
use not_found::NotFound;
use overview::Overview;
use profile::MyProfile;
use students::Students;
use users::Users;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login?:redirect&:error")]
    Login {
        redirect: Option<String>,
        error: Option<String>,
    },
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/")]
    Overview {},
    #[route("/profile")]
    MyProfile {},
    #[route("/noc-request")]
    NocRequestForm {},
    #[route("/applications")]
    Applications {},
    #[route("/noc-approvals")]
    NocApprovals {},
    #[route("/students")]
    Students {},
    #[route("/users")]
    Users {},
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

impl Route {
    /// Dashboard section a route belongs to. Public pages have none.
    pub fn section(&self) -> Option<SectionId> {
        match self {
            Route::Overview {} => Some(SectionId::Overview),
            Route::MyProfile {} => Some(SectionId::Profile),
            Route::NocRequestForm {} => Some(SectionId::NocRequest),
            Route::Applications {} => Some(SectionId::Applications),
            Route::NocApprovals {} => Some(SectionId::NocApprovals),
            Route::Students {} => Some(SectionId::Students),
            Route::Users {} => Some(SectionId::Users),
            Route::Login { .. } | Route::NotFound { .. } => None,
        }
    }
}

/// Resolves the session and runs the authorization gate for the section
/// being opened. Renders the page only once the gate authorizes it.
#[component]
fn AuthGuard() -> Element {
    let mut auth = use_auth();
    let route: Route = use_route();
    let section = route.section().unwrap_or(SectionId::Overview);

    // `?` propagates RenderError during suspension so Dioxus knows to
    // re-render this component when the server future resolves.
    let resource =
        use_server_future(move || async move { server::api::get_current_session().await })?;

    let result = resource.read().as_ref().cloned();

    let mut gate = AuthorizationGate::new(section);
    let state = match result {
        None => gate.state().clone(),
        Some(Ok(session)) => gate.resolve(session.as_ref()).clone(),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "Session lookup failed");
            gate.resolve(None).clone()
        }
    };

    match state {
        GateState::Authorized { session, section } => {
            auth.set_session(session);
            auth.set_active(section);
            rsx! { Outlet::<Route> {} }
        }
        GateState::Denied { denial, .. } => {
            if matches!(denial, shared_types::Denial::Unauthenticated) {
                auth.clear_auth();
            }
            let target = denial.redirect_to(&route.to_string());
            match target.parse::<Route>() {
                Ok(next) => navigator().replace(next),
                Err(_) => navigator().replace(NavigationTarget::<Route>::External(target)),
            };
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting..." }
                }
            }
        }
        GateState::Loading => rsx! {
            div { class: "auth-guard-loading",
                p { "Loading..." }
            }
        },
    }
}

/// Dashboard chrome for the signed-in role.
#[component]
fn AppLayout() -> Element {
    let mut auth = use_auth();
    let session = auth.session.read().clone();
    let active = *auth.active.read();
    let plan = compose(session.as_ref(), active);

    let sign_out = move |_: ()| {
        spawn(async move {
            if let Err(e) = server::api::logout().await {
                tracing::warn!(error = %e, "Sign-out request failed");
            }
            auth.clear_auth();
            navigator().replace(Route::Login {
                redirect: None,
                error: None,
            });
        });
    };

    rsx! {
        AppShell { plan, on_sign_out: sign_out,
            Outlet::<Route> {}
        }
    }
}

/// Load failure with a manual retry.
#[component]
pub fn LoadError(error: String, on_retry: EventHandler<()>) -> Element {
    let message = shared_types::AppError::friendly_message(&error);
    rsx! {
        div { class: "page-error", role: "alert",
            p { "{message}" }
            button {
                class: "button",
                "data-style": "secondary",
                onclick: move |_| on_retry.call(()),
                "Try again"
            }
        }
    }
}
