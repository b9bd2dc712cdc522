//! Login page with username/password sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by the shell whenever it is `Unauthenticated`. A successful
//! sign-in applies `ShellState::on_login_succeeded`; the routed shell then
//! replaces this page without a navigation.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use session::auth::validate_credentials;

use crate::components::navbar::BRAND;
use crate::state::auth::AuthContext;

/// Login page.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let username_value = username.get_untracked();
        let password_value = password.get_untracked();
        if let Some(message) = form_error(&username_value, &password_value) {
            error.set(message);
            return;
        }
        busy.set(true);
        error.set(String::new());
        submit(&auth, username_value, password_value, error, busy);
    };

    let on_input = move |field: RwSignal<String>, value: String| {
        field.set(value);
        if !error.get_untracked().is_empty() {
            error.set(String::new());
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card card shadow-lg border-0">
                <div class="card-body p-5">
                    <div class="text-center mb-4">
                        <i class="bi bi-cup-hot login-card__icon"></i>
                        <h2 class="fw-bold text-dark mb-2">{BRAND}</h2>
                        <p class="text-muted">"Sign in to manage your catering business"</p>
                    </div>
                    <Show when=move || !error.get().is_empty()>
                        <div class="alert alert-danger mb-3" role="alert">
                            <i class="bi bi-exclamation-triangle me-2"></i>
                            {move || error.get()}
                        </div>
                    </Show>
                    <form on:submit=on_submit>
                        <div class="mb-3">
                            <label class="form-label fw-semibold" for="username">
                                <i class="bi bi-person me-2"></i>
                                "Username"
                            </label>
                            <input
                                id="username"
                                class="form-control"
                                type="text"
                                autocomplete="username"
                                placeholder="Enter your username"
                                disabled=move || busy.get()
                                prop:value=move || username.get()
                                on:input=move |ev| on_input(username, event_target_value(&ev))
                            />
                        </div>
                        <div class="mb-4">
                            <label class="form-label fw-semibold" for="password">
                                <i class="bi bi-lock me-2"></i>
                                "Password"
                            </label>
                            <input
                                id="password"
                                class="form-control"
                                type="password"
                                autocomplete="current-password"
                                placeholder="Enter your password"
                                disabled=move || busy.get()
                                prop:value=move || password.get()
                                on:input=move |ev| on_input(password, event_target_value(&ev))
                            />
                        </div>
                        <button class="btn btn-primary btn-lg w-100 fw-semibold" type="submit" disabled=move || busy.get()>
                            {move || submit_label(busy.get())}
                        </button>
                    </form>
                    <div class="text-center mt-4 login-demo">
                        <small class="text-muted">
                            <strong>"Demo Credentials:"</strong>
                            <br/>
                            "Username: "
                            <code>"admin"</code>
                            <br/>
                            "Password: "
                            <code>"admin123"</code>
                        </small>
                    </div>
                </div>
            </div>
        </div>
    }
}

/// Send the credentials and apply the outcome to the shell.
fn submit(auth: &AuthContext, username: String, password: String, error: RwSignal<String>, busy: RwSignal<bool>) {
    #[cfg(feature = "hydrate")]
    {
        let auth = auth.clone();
        leptos::task::spawn_local(async move {
            match auth.client.login(&username, &password).await {
                Ok(_) => auth.transition(session::shell::ShellState::on_login_succeeded),
                Err(e) => error.set(e.to_string()),
            }
            busy.set(false);
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (auth, username, password, error);
        busy.set(false);
    }
}

/// Message to show before any request is sent, if the form is incomplete.
fn form_error(username: &str, password: &str) -> Option<String> {
    validate_credentials(username, password).err().map(|e| e.to_string())
}

fn submit_label(busy: bool) -> &'static str {
    if busy { "Signing in..." } else { "Sign In" }
}
