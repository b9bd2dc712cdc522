use super::*;

#[test]
fn form_error_requires_both_fields() {
    let expected = Some("Please enter both username and password".to_owned());
    assert_eq!(form_error("", "admin123"), expected);
    assert_eq!(form_error("admin", ""), expected);
    assert_eq!(form_error("   ", "admin123"), expected);
}

#[test]
fn form_error_none_for_complete_form() {
    assert_eq!(form_error("admin", "admin123"), None);
}

#[test]
fn submit_label_tracks_busy_state() {
    assert_eq!(submit_label(false), "Sign In");
    assert_eq!(submit_label(true), "Signing in...");
}
