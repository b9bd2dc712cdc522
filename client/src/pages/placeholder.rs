//! Stand-in screen for the business sections (orders, employees, inventory,
//! customers, tasks, reports). Only the heading and breadcrumbs are real.

#[cfg(test)]
#[path = "placeholder_test.rs"]
mod placeholder_test;

use leptos::prelude::*;
use session::routes::Route;

#[component]
pub fn PlaceholderPage(route: Route) -> impl IntoView {
    let heading = heading(&route);
    let parent = parent(&route);

    view! {
        <div class="placeholder-page">
            {parent
                .map(|(href, label)| {
                    view! {
                        <nav aria-label="breadcrumb">
                            <ol class="breadcrumb">
                                <li class="breadcrumb-item">
                                    <a href=href>{label}</a>
                                </li>
                                <li class="breadcrumb-item active" aria-current="page">
                                    {route.title()}
                                </li>
                            </ol>
                        </nav>
                    }
                })}
            <h1 class="h3 fw-bold">{heading}</h1>
            <p class="text-muted">"This section is not available yet."</p>
        </div>
    }
}

fn heading(route: &Route) -> String {
    match route {
        Route::EditOrder(id) | Route::EditEmployee(id) => format!("{} #{id}", route.title()),
        _ => route.title().to_owned(),
    }
}

/// Breadcrumb parent for nested routes.
fn parent(route: &Route) -> Option<(&'static str, &'static str)> {
    match route {
        Route::NewOrder | Route::EditOrder(_) => Some(("/orders", "Orders")),
        Route::NewEmployee | Route::EditEmployee(_) => Some(("/employees", "Employees")),
        _ => None,
    }
}
