//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server renders [`shell`] for every page path; the browser hydrates
//! [`App`]. Every path lands on the same [`AppShell`] view, which asks the
//! shell state's route guard what may render for the current location.

use leptos::prelude::*;
use leptos::tachys::view::any_view::{AnyView, IntoAny};
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route as RouterRoute, Router, Routes};
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::{NavigateOptions, StaticSegment, WildcardSegment};
use session::auth::AuthClient;
use session::routes::{Route, redirect_target};
use session::shell::Screen;

use crate::components::loading_screen::LoadingScreen;
use crate::components::navbar::{BRAND, Navbar};
use crate::components::sidebar::Sidebar;
use crate::net::api::HttpAuthApi;
use crate::pages::{dashboard::DashboardPage, login::LoginPage, placeholder::PlaceholderPage};
use crate::state::auth::AuthContext;
use crate::state::ui::UiState;
use crate::util::storage::BrowserStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css"/>
                <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Builds the auth client, provides the shared contexts and starts the
/// startup status check.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::new(AuthClient::new(HttpAuthApi::same_origin(), BrowserStorage));
    let ui = RwSignal::new(UiState::default());
    provide_context(auth.clone());
    provide_context(ui);
    auth.init();

    view! {
        <Stylesheet id="leptos" href="/pkg/catering.css"/>
        <Title text=BRAND/>

        <Router>
            <Routes fallback=|| view! { <AppShell/> }>
                <RouterRoute path=StaticSegment("") view=AppShell/>
                <RouterRoute path=WildcardSegment("any") view=AppShell/>
            </Routes>
        </Router>
    }
}

/// Route guard: loading spinner, login page or the authenticated layout.
#[component]
fn AppShell() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let pathname = use_location().pathname;
    let screen = Memo::new(move |_| auth.shell.get().screen(&pathname.get()));

    move || match screen.get() {
        Screen::Loading => view! { <LoadingScreen/> }.into_any(),
        Screen::Login => view! { <LoginPage/> }.into_any(),
        Screen::Routed(route) => view! { <AuthenticatedLayout route/> }.into_any(),
    }
}

/// Navbar, sidebar and the page for `route`.
#[component]
fn AuthenticatedLayout(route: Route) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let pathname = use_location().pathname;
    let navigate = use_navigate();

    // `/` and unknown paths are shown as the dashboard; make the URL agree.
    Effect::new(move || {
        if let Some(target) = redirect_target(&pathname.get()) {
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        <div class="App">
            <Navbar/>
            <Sidebar/>
            <main class="main-content" style=move || ui.get().main_style()>
                {page(route)}
            </main>
        </div>
    }
}

fn page(route: Route) -> AnyView {
    match route {
        Route::Dashboard => view! { <DashboardPage/> }.into_any(),
        other => view! { <PlaceholderPage route=other/> }.into_any(),
    }
}
