//! Dashboard landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Default route of the authenticated shell; `/`, `/dashboard` and any
//! unknown path end up here.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use protocol::UserProfile;
use session::routes::{NAV_ITEMS, NavItem};

use crate::state::auth::AuthContext;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let user = auth.user;

    view! {
        <div class="dashboard-page">
            <div class="mb-4">
                <h1 class="h3 fw-bold mb-1">"Dashboard"</h1>
                <p class="text-muted mb-0">{move || greeting(user.get().as_ref())}</p>
            </div>
            <div class="row g-3">
                {shortcuts()
                    .map(|item| {
                        view! {
                            <div class="col-12 col-md-6 col-xl-4">
                                <a href=item.path class="card dashboard-tile text-decoration-none h-100">
                                    <div class="card-body d-flex align-items-center">
                                        <i class=format!("bi {} fs-3 me-3", item.icon)></i>
                                        <span class="fw-semibold">{item.label}</span>
                                    </div>
                                </a>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

fn greeting(user: Option<&UserProfile>) -> String {
    match user.map(|u| u.full_name.trim()).filter(|name| !name.is_empty()) {
        Some(name) => format!("Welcome back, {name}!"),
        None => "Welcome back!".to_owned(),
    }
}

/// Every section except the dashboard itself.
fn shortcuts() -> impl Iterator<Item = NavItem> {
    NAV_ITEMS.into_iter().filter(|item| item.path != "/dashboard")
}
