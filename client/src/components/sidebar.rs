//! Section menu on the left of the authenticated shell.
//!
//! Plain anchors are enough; the router intercepts same-origin clicks.

#[cfg(test)]
#[path = "sidebar_test.rs"]
mod sidebar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use session::routes::{NAV_ITEMS, NavItem};

use crate::state::ui::UiState;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let pathname = use_location().pathname;

    let container_class = move || sidebar_class(ui.get());
    let container_style = move || format!("width: {}px;", ui.get().sidebar_width());

    view! {
        <div class=container_class style=container_style>
            <ul class="nav flex-column p-3">
                {NAV_ITEMS
                    .iter()
                    .map(|item| {
                        let item = *item;
                        let item_class = move || link_class(item, &pathname.get());
                        view! {
                            <li class="nav-item mb-2">
                                <a href=item.path class=item_class>
                                    <i class=format!("bi {} me-3", item.icon)></i>
                                    <Show when=move || !ui.get().sidebar_collapsed>
                                        <span>{item.label}</span>
                                    </Show>
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

fn sidebar_class(ui: UiState) -> &'static str {
    if ui.sidebar_collapsed {
        "sidebar bg-white shadow-sm border-end collapsed"
    } else {
        "sidebar bg-white shadow-sm border-end"
    }
}

fn link_class(item: NavItem, current_path: &str) -> &'static str {
    if item.is_active(current_path) {
        "nav-link d-flex align-items-center rounded-3 p-3 active"
    } else {
        "nav-link d-flex align-items-center rounded-3 p-3"
    }
}
