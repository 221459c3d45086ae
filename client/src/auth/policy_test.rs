use super::*;

const ALL: &[Capability] = &[
    Capability::ManageLotes,
    Capability::ViewProduccion,
    Capability::ManageProduccion,
    Capability::ViewClasificacion,
    Capability::ManageClasificacion,
    Capability::ViewEstadoLote,
    Capability::ManageEstadoLote,
    Capability::ViewCorrales,
    Capability::ManageCorrales,
    Capability::ManageRazas,
    Capability::ManageUsuarios,
    Capability::ManageClientes,
    Capability::ManageProductos,
    Capability::ViewVentas,
    Capability::ManageVentas,
    Capability::ViewReports,
];

fn roles(names: &[&str]) -> RoleSet {
    names.iter().copied().collect()
}

#[test]
fn empty_role_set_allows_nothing() {
    let empty = RoleSet::default();
    for cap in ALL {
        assert!(!cap.allowed(&empty), "{cap:?} must fail closed");
    }
}

#[test]
fn unknown_roles_allow_nothing() {
    let unknown = roles(&["Visitor", "admin"]);
    for cap in ALL {
        assert!(!cap.allowed(&unknown), "{cap:?} must not be granted to unknown roles");
    }
}

#[test]
fn admin_allows_everything() {
    let admin = roles(&["Admin"]);
    for cap in ALL {
        assert!(cap.allowed(&admin), "{cap:?} should be granted to Admin");
    }
}

#[test]
fn user_sees_produccion_and_corrales_only() {
    let user = roles(&["User"]);
    let allowed: Vec<_> = ALL.iter().copied().filter(|c| c.allowed(&user)).collect();
    assert_eq!(allowed, vec![Capability::ViewProduccion, Capability::ViewCorrales]);
}

#[test]
fn gestor_can_classify_and_see_sales() {
    let gestor = roles(&["Gestor"]);
    assert!(Capability::ManageClasificacion.allowed(&gestor));
    assert!(Capability::ViewVentas.allowed(&gestor));
    assert!(Capability::ViewReports.allowed(&gestor));
    assert!(!Capability::ManageVentas.allowed(&gestor));
    assert!(!Capability::ManageLotes.allowed(&gestor));
}

#[test]
fn multiple_roles_union_their_grants() {
    let both = roles(&["User", "Gestor"]);
    assert!(Capability::ViewProduccion.allowed(&both));
    assert!(Capability::ManageClasificacion.allowed(&both));
    assert!(!Capability::ManageUsuarios.allowed(&both));
}

#[test]
fn nav_for_empty_roles_shows_only_ungated_entries() {
    let hrefs: Vec<_> = nav_entries(&RoleSet::default()).iter().map(|e| e.href).collect();
    assert_eq!(hrefs, vec!["/dashboard", "/lotes"]);
}

#[test]
fn nav_for_admin_shows_everything() {
    assert_eq!(nav_entries(&roles(&["Admin"])).len(), NAV.len());
}

#[test]
fn lote_destinations_follow_capabilities() {
    assert!(lote_destinations(&RoleSet::default()).is_empty());
    assert_eq!(lote_destinations(&roles(&["User"])), vec![("produccion", "Producción")]);
    assert_eq!(lote_destinations(&roles(&["Admin"])).len(), 3);
}

#[test]
fn role_names_match_api_spelling() {
    assert_eq!(Role::Admin.to_string(), "Admin");
    assert_eq!(Role::User.as_str(), "User");
    assert_eq!(Role::Gestor.as_str(), "Gestor");
}
