use super::*;

#[test]
fn collapsed_sidebar_gets_modifier_class() {
    assert!(sidebar_class(UiState { sidebar_collapsed: true }).ends_with(" collapsed"));
    assert!(!sidebar_class(UiState::default()).contains("collapsed"));
}

#[test]
fn section_link_is_active_on_child_routes() {
    let employees = NAV_ITEMS[2];
    assert!(link_class(employees, "/employees/edit/4").ends_with(" active"));
    assert!(!link_class(employees, "/orders").ends_with(" active"));
}
