use super::*;

#[test]
fn sort_by_name_ignores_case() {
    let mut names = vec!["beta", "Alfa", "gamma"];
    sort_by_name(&mut names, SortOrder::Asc, |n| *n);
    assert_eq!(names, vec!["Alfa", "beta", "gamma"]);
    sort_by_name(&mut names, SortOrder::Desc, |n| *n);
    assert_eq!(names, vec!["gamma", "beta", "Alfa"]);
}

#[test]
fn validate_cliente_requires_digit_phone() {
    let errors = validate_cliente(None, "Tienda", "Centro", "09-12").expect_err("invalid");
    assert_eq!(errors.get("telefono").as_deref(), Some("Solo se permiten números."));
    assert_eq!(errors.get("nombre_cliente"), None);
}

#[test]
fn validate_cliente_builds_payload() {
    let payload = validate_cliente(Some(4), " Tienda ", "Centro", "0991").expect("valid");
    assert_eq!(payload.cliente_id, Some(4));
    assert_eq!(payload.nombre_cliente, "Tienda");
}
