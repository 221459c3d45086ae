use super::*;

#[test]
fn status_error_prefers_server_message() {
    let err = ApiError::Status { status: 400, message: "Lote duplicado".to_owned() };
    assert_eq!(err.user_message(), "Lote duplicado");
}

#[test]
fn status_error_without_message_reports_code() {
    let err = ApiError::Status { status: 500, message: String::new() };
    assert_eq!(err.user_message(), "Error del servidor (500).");
    assert_eq!(err.to_string(), "request failed: status 500");
}

#[test]
fn unauthorized_is_flagged() {
    assert!(ApiError::Unauthorized.is_unauthorized());
    assert!(!ApiError::Network("down".to_owned()).is_unauthorized());
}

#[test]
fn body_message_reads_json_message_field() {
    assert_eq!(body_message(r#"{"message":"Credenciales inválidas"}"#), "Credenciales inválidas");
    assert_eq!(body_message(r#"{"title":"One or more validation errors occurred."}"#), "One or more validation errors occurred.");
}

#[test]
fn body_message_passes_plain_text_through() {
    assert_eq!(body_message("  Usuario no encontrado \n"), "Usuario no encontrado");
    assert_eq!(body_message(r#""texto""#), "texto");
}

#[test]
fn body_message_is_empty_for_unhelpful_json() {
    assert_eq!(body_message("[1,2]"), "");
    assert_eq!(body_message(r#"{"code":7}"#), "");
}
