use super::*;

#[test]
fn ui_state_default_has_no_error() {
    let state = UiState::default();
    assert_eq!(state.error, None);
    assert!(!state.sidebar_open);
}

#[test]
fn show_error_replaces_previous_message() {
    let mut state = UiState::default();
    state.show_error("primero");
    state.show_error("segundo");
    assert_eq!(state.error.as_deref(), Some("segundo"));
}

#[test]
fn show_error_ignores_blank_messages() {
    let mut state = UiState::default();
    state.show_error("  ");
    assert_eq!(state.error, None);
}

#[test]
fn clear_error_dismisses_banner() {
    let mut state = UiState::default();
    state.show_error("fallo");
    state.clear_error();
    assert_eq!(state.error, None);
}

#[test]
fn toggle_sidebar_flips_flag() {
    let mut state = UiState::default();
    state.toggle_sidebar();
    assert!(state.sidebar_open);
    state.toggle_sidebar();
    assert!(!state.sidebar_open);
}
