use super::*;

fn usuario(id: i64, name: &str, role: &str, estado: bool) -> Usuario {
    Usuario { id, nombre_user: name.to_owned(), email: format!("{name}@granja.gt"), role: role.to_owned(), estado }
}

fn roles() -> Vec<RoleOption> {
    vec![RoleOption { id: 1, nombre: "Admin".to_owned() }, RoleOption { id: 2, nombre: "Gestor".to_owned() }]
}

#[test]
fn prefill_matches_role_by_name() {
    let inputs = UsuarioInputs::from_usuario(&usuario(5, "ana", "Gestor", true), &roles());
    assert_eq!(inputs.role_id, "2");
    assert_eq!(inputs.contrasena, "");
    let unknown = UsuarioInputs::from_usuario(&usuario(5, "ana", "Otro", true), &roles());
    assert_eq!(unknown.role_id, "");
}

#[test]
fn register_requires_password() {
    let inputs = UsuarioInputs {
        nombre_user: "ana".to_owned(),
        email: "ana@granja.gt".to_owned(),
        role_id: "1".to_owned(),
        contrasena: String::new(),
    };
    let errors = inputs.validate(false).expect_err("password missing");
    assert!(errors.get("contrasena").is_some());

    let payload = inputs.validate(true).expect("update keeps password");
    assert_eq!(payload.contrasena, None);
    assert_eq!(payload.role_id, 1);
}

#[test]
fn role_is_required() {
    let inputs = UsuarioInputs { nombre_user: "ana".to_owned(), email: "a@b".to_owned(), ..UsuarioInputs::default() };
    let errors = inputs.validate(true).expect_err("role missing");
    assert_eq!(errors.get("role_id").as_deref(), Some("Este campo es obligatorio."));
}

#[test]
fn split_filters_then_partitions() {
    let all = vec![usuario(1, "Ana", "Admin", true), usuario(2, "anibal", "User", false), usuario(3, "Beto", "User", true)];
    let (active, inactive) = split_usuarios(&all, "an");
    assert_eq!(active.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1]);
    assert_eq!(inactive.iter().map(|u| u.id).collect::<Vec<_>>(), vec![2]);
}
