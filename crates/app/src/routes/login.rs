use crate::auth::use_auth;
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::FeatureFlags;
use shared_ui::{Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle};

/// Login page. `redirect` is the page the user was sent away from;
/// after Google sign-in the callback lands them back there. `error` is the
/// callback's failure message.
#[component]
pub fn Login(redirect: Option<String>, error: Option<String>) -> Element {
    let auth = use_auth();
    let flags: FeatureFlags = use_context();

    let oauth_enabled = flags.oauth;
    let redirect_for_oauth = redirect.clone();
    let google_url = use_server_future(move || {
        let redir = redirect_for_oauth.clone();
        async move {
            if !oauth_enabled {
                return None;
            }
            server::api::oauth_authorize_url(redir).await.ok()
        }
    })?;
    let google_url = google_url.read().as_ref().cloned().flatten();

    if auth.is_authenticated() {
        let target = redirect.clone().unwrap_or_else(|| "/".to_string());
        match target.parse::<Route>() {
            Ok(next) => navigator().replace(next),
            Err(_) => navigator().replace(Route::Overview {}),
        };
    }

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./login.css") }

        div { class: "auth-page",
            Card { class: "auth-card",
                CardHeader {
                    CardTitle { "InternHub" }
                    CardDescription { "Sign in to manage your internship" }
                }

                CardContent {
                    if let Some(message) = error.as_deref() {
                        div { class: "auth-error", role: "alert", "{message}" }
                    }

                    if flags.oauth {
                        div { class: "auth-oauth-buttons",
                            a {
                                class: "auth-oauth-btn",
                                href: google_url.as_deref().unwrap_or("#"),
                                "aria-disabled": if google_url.is_none() { "true" } else { "false" },
                                "Continue with Google"
                            }
                        }
                    } else {
                        p { class: "auth-disabled",
                            "Sign-in is not configured on this server."
                        }
                    }
                }

                CardFooter {
                    p { class: "auth-link",
                        "Use the Google account issued by your institution."
                    }
                }
            }
        }
    }
}
