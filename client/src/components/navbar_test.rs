use session::auth::AuthClient;
use session::shell::ShellState;

use super::*;
use crate::net::api::HttpAuthApi;
use crate::util::storage::BrowserStorage;

fn caterer() -> UserProfile {
    UserProfile {
        id: None,
        username: "priya".to_owned(),
        full_name: "priya sharma".to_owned(),
        email: "priya@catering.com".to_owned(),
        role: "MANAGER".to_owned(),
        created_at: None,
    }
}

#[test]
fn avatar_initial_is_uppercased_first_letter() {
    assert_eq!(avatar_initial(Some(&caterer())), 'P');
}

#[test]
fn user_fields_are_shown_verbatim() {
    let user = caterer();
    assert_eq!(display_name(Some(&user)), "priya sharma");
    assert_eq!(display_role(Some(&user)), "MANAGER");
    assert_eq!(display_email(Some(&user)), "priya@catering.com");
}

#[test]
fn missing_profile_uses_defaults() {
    assert_eq!(avatar_initial(None), 'A');
    assert_eq!(display_name(None), "Admin User");
    assert_eq!(display_role(None), "Administrator");
    assert_eq!(display_email(None), "admin@catering.com");
}

#[test]
fn blank_fields_use_defaults() {
    let mut user = caterer();
    user.full_name.clear();
    user.email.clear();
    assert_eq!(avatar_initial(Some(&user)), 'A');
    assert_eq!(display_name(Some(&user)), "Admin User");
    assert_eq!(display_email(Some(&user)), "admin@catering.com");
}

#[test]
fn sign_out_from_reopened_menu_signs_out_each_time() {
    let owner = leptos::prelude::Owner::new();
    owner.set();
    let auth = AuthContext::new(AuthClient::new(HttpAuthApi::same_origin(), BrowserStorage));
    let menu_open = RwSignal::new(false);

    for _ in 0..2 {
        auth.shell.set(ShellState::Authenticated);
        auth.user.set(Some(caterer()));
        menu_open.set(true);

        close_and_sign_out(&auth, menu_open);

        assert!(!menu_open.get_untracked());
        assert_eq!(auth.shell.get_untracked(), ShellState::Unauthenticated);
        assert_eq!(auth.user.get_untracked(), None);
    }
}
