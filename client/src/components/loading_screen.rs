//! Full-page spinner shown while the startup status check runs.

use leptos::prelude::*;

#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen d-flex justify-content-center align-items-center vh-100">
            <div class="text-center">
                <div class="spinner-border text-primary" role="status">
                    <span class="visually-hidden">"Loading..."</span>
                </div>
                <div class="mt-3">"Loading Catering Management System..."</div>
            </div>
        </div>
    }
}
