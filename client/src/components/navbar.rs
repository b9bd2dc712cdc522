//! Top bar with the brand, sidebar toggle and the signed-in user menu.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only rendered inside the authenticated shell. "Sign Out" hands off to
//! `AuthContext::sign_out`, which returns the shell to the login screen
//! without waiting on the server.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use protocol::UserProfile;

use crate::state::auth::AuthContext;
use crate::state::ui::UiState;

/// Brand shown in the navbar and on the login card.
pub const BRAND: &str = "Catering Management";

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let ui = expect_context::<RwSignal<UiState>>();
    let menu_open = RwSignal::new(false);
    let user = auth.user;

    let on_toggle_sidebar = move |_| ui.update(UiState::toggle_sidebar);
    let on_toggle_menu = move |_| menu_open.update(|open| *open = !*open);
    let on_sign_out = move |_: leptos::ev::MouseEvent| close_and_sign_out(&auth, menu_open);

    view! {
        <nav class="navbar navbar-expand-lg bg-white shadow-sm border-bottom app-navbar">
            <div class="container-fluid">
                <div class="d-flex align-items-center">
                    <button class="btn btn-link text-dark p-0 me-3" on:click=on_toggle_sidebar aria-label="Toggle sidebar">
                        <i class="bi bi-list"></i>
                    </button>
                    <span class="navbar-brand fw-bold text-primary mb-0">
                        <i class="bi bi-cup-hot me-2"></i>
                        {BRAND}
                    </span>
                </div>
                <div class="ms-auto dropdown">
                    <button class="btn btn-link text-decoration-none text-dark d-flex align-items-center" on:click=on_toggle_menu>
                        <div class="rounded-circle bg-primary text-white d-flex align-items-center justify-content-center me-2 user-avatar">
                            {move || avatar_initial(user.get().as_ref()).to_string()}
                        </div>
                        <div class="d-none d-md-block text-start">
                            <div class="fw-semibold">{move || display_name(user.get().as_ref())}</div>
                            <div class="text-muted small">{move || display_role(user.get().as_ref())}</div>
                        </div>
                        <i class="bi bi-chevron-down ms-2"></i>
                    </button>
                    <Show when=move || menu_open.get()>
                        <div class="dropdown-menu dropdown-menu-end show shadow border-0">
                            <div class="dropdown-header">
                                <div class="fw-semibold">{move || display_name(user.get().as_ref())}</div>
                                <div class="text-muted small">{move || display_email(user.get().as_ref())}</div>
                            </div>
                            <div class="dropdown-divider"></div>
                            <button class="dropdown-item d-flex align-items-center text-danger" on:click=on_sign_out.clone()>
                                <i class="bi bi-box-arrow-right me-2"></i>
                                "Sign Out"
                            </button>
                        </div>
                    </Show>
                </div>
            </div>
        </nav>
    }
}

/// The `<Show>` children re-run on every open, so this may be called any
/// number of times.
fn close_and_sign_out(auth: &AuthContext, menu_open: RwSignal<bool>) {
    menu_open.set(false);
    auth.sign_out();
}

fn avatar_initial(user: Option<&UserProfile>) -> char {
    user.and_then(UserProfile::initial).unwrap_or('A')
}

fn display_name(user: Option<&UserProfile>) -> String {
    user.map(|u| u.full_name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("Admin User")
        .to_owned()
}

fn display_role(user: Option<&UserProfile>) -> String {
    user.map(|u| u.role.as_str())
        .filter(|role| !role.is_empty())
        .unwrap_or("Administrator")
        .to_owned()
}

fn display_email(user: Option<&UserProfile>) -> String {
    user.map(|u| u.email.as_str())
        .filter(|email| !email.is_empty())
        .unwrap_or("admin@catering.com")
        .to_owned()
}
