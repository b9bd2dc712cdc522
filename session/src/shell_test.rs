use std::sync::Arc;

use futures::executor::block_on;
use protocol::{AuthResult, StatusResponse};

use super::*;
use crate::test_helpers::{Reply, admin_user, client, network_down};

fn shell(replies: Vec<Reply>) -> AppShell<crate::test_helpers::ScriptedApi, Arc<crate::store::MemoryStore>> {
    let (auth, _) = client(replies);
    AppShell::new(Arc::new(auth))
}

// =============================================================================
// Pure transitions
// =============================================================================

#[test]
fn starts_loading() {
    assert_eq!(ShellState::default(), ShellState::Loading);
}

#[test]
fn status_check_only_leaves_loading() {
    assert_eq!(ShellState::Loading.on_status_checked(true), ShellState::Authenticated);
    assert_eq!(ShellState::Loading.on_status_checked(false), ShellState::Unauthenticated);
    assert_eq!(ShellState::Authenticated.on_status_checked(false), ShellState::Authenticated);
    assert_eq!(ShellState::Unauthenticated.on_status_checked(true), ShellState::Unauthenticated);
}

#[test]
fn login_success_authenticates_after_loading() {
    assert_eq!(ShellState::Unauthenticated.on_login_succeeded(), ShellState::Authenticated);
    assert_eq!(ShellState::Authenticated.on_login_succeeded(), ShellState::Authenticated);
    assert_eq!(ShellState::Loading.on_login_succeeded(), ShellState::Loading);
}

#[test]
fn logout_always_unauthenticates() {
    for state in [ShellState::Loading, ShellState::Unauthenticated, ShellState::Authenticated] {
        assert_eq!(state.on_logout(), ShellState::Unauthenticated);
    }
}

#[test]
fn guard_renders_nothing_routed_until_authenticated() {
    assert_eq!(ShellState::Loading.screen("/orders"), Screen::Loading);
    assert_eq!(ShellState::Unauthenticated.screen("/orders"), Screen::Login);
    assert_eq!(ShellState::Authenticated.screen("/orders"), Screen::Routed(Route::Orders));
}

#[test]
fn guard_falls_back_to_dashboard_when_authenticated() {
    assert_eq!(ShellState::Authenticated.screen("/missing"), Screen::Routed(Route::Dashboard));
    assert_eq!(ShellState::Authenticated.screen("/"), Screen::Routed(Route::Dashboard));
}

// =============================================================================
// Driver
// =============================================================================

#[test]
fn init_with_empty_storage_shows_login_without_network() {
    let mut shell = shell(vec![]);
    assert_eq!(shell.screen("/dashboard"), Screen::Loading);

    assert_eq!(block_on(shell.init()), ShellState::Unauthenticated);
    assert_eq!(shell.screen("/dashboard"), Screen::Login);
    assert!(shell.auth().api().calls().is_empty());
}

#[test]
fn init_runs_status_check_once() {
    let mut shell = shell(vec![]);
    block_on(shell.init());
    block_on(shell.init());
    assert!(shell.auth().api().calls().is_empty());
    assert_eq!(shell.state(), ShellState::Unauthenticated);
}

#[test]
fn login_success_moves_to_authenticated() {
    let mut shell = shell(vec![Reply::Auth(Ok(AuthResult::ok("Login successful", Some(admin_user()))))]);
    block_on(shell.init());

    let state = block_on(shell.login("admin", "admin123")).unwrap();

    assert_eq!(state, ShellState::Authenticated);
    assert_eq!(shell.auth().current_user().map(|u| u.full_name), Some("Admin User".to_owned()));
    assert_eq!(shell.screen("/tasks"), Screen::Routed(Route::Tasks));
}

#[test]
fn login_failure_stays_unauthenticated_with_message() {
    let mut shell = shell(vec![Reply::Auth(Ok(AuthResult::rejected("Invalid credentials")))]);
    block_on(shell.init());

    let err = block_on(shell.login("x", "wrong")).unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(shell.state(), ShellState::Unauthenticated);
}

#[test]
fn restored_session_authenticates_on_init() {
    let (auth, _) = client(vec![
        Reply::Auth(Ok(AuthResult::ok("Login successful", Some(admin_user())))),
        Reply::Status(Ok(StatusResponse { authenticated: true, user: None, message: None })),
    ]);
    block_on(auth.login("admin", "admin123")).unwrap();
    let mut shell = AppShell::new(Arc::new(auth));

    assert_eq!(block_on(shell.init()), ShellState::Authenticated);
}

#[test]
fn logout_unauthenticates_even_when_server_fails() {
    let mut shell = shell(vec![
        Reply::Auth(Ok(AuthResult::ok("Login successful", Some(admin_user())))),
        Reply::Logout(Err(network_down())),
    ]);
    block_on(shell.init());
    block_on(shell.login("admin", "admin123")).unwrap();

    assert_eq!(block_on(shell.logout()), ShellState::Unauthenticated);
    assert_eq!(shell.auth().current_user(), None);
    assert_eq!(shell.screen("/dashboard"), Screen::Login);
}
