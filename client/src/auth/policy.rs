//! Role-conditioned UI policy.
//!
//! Every mutating control in the console is tied to a `Capability`. Screens
//! evaluate `Capability::allowed` against the live `RoleSet` on each render
//! and omit the control when it is not allowed. An empty role set allows
//! nothing.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use super::roles::RoleSet;

/// Role names issued by the farm API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    User,
    Gestor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
            Role::Gestor => "Gestor",
        }
    }

    pub fn held_by(self, roles: &RoleSet) -> bool {
        roles.contains(self.as_str())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gated action or view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    ManageLotes,
    ViewProduccion,
    ManageProduccion,
    ViewClasificacion,
    ManageClasificacion,
    ViewEstadoLote,
    ManageEstadoLote,
    ViewCorrales,
    ManageCorrales,
    ManageRazas,
    ManageUsuarios,
    ManageClientes,
    ManageProductos,
    ViewVentas,
    ManageVentas,
    ViewReports,
}

impl Capability {
    /// Roles that grant this capability.
    pub fn granted_to(self) -> &'static [Role] {
        match self {
            Capability::ViewProduccion | Capability::ViewCorrales => &[Role::Admin, Role::User],
            Capability::ManageClasificacion | Capability::ViewVentas | Capability::ViewReports => {
                &[Role::Admin, Role::Gestor]
            }
            Capability::ManageLotes
            | Capability::ManageProduccion
            | Capability::ViewClasificacion
            | Capability::ViewEstadoLote
            | Capability::ManageEstadoLote
            | Capability::ManageCorrales
            | Capability::ManageRazas
            | Capability::ManageUsuarios
            | Capability::ManageClientes
            | Capability::ManageProductos
            | Capability::ManageVentas => &[Role::Admin],
        }
    }

    pub fn allowed(self, roles: &RoleSet) -> bool {
        self.granted_to().iter().any(|role| role.held_by(roles))
    }
}

/// A sidebar navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub href: &'static str,
    pub requires: Option<Capability>,
}

const NAV: &[NavEntry] = &[
    NavEntry { label: "Dashboard", href: "/dashboard", requires: None },
    NavEntry { label: "Lotes", href: "/lotes", requires: None },
    NavEntry { label: "Gestión de lotes", href: "/gestion", requires: Some(Capability::ViewProduccion) },
    NavEntry { label: "Corrales", href: "/corrales", requires: Some(Capability::ViewCorrales) },
    NavEntry { label: "Razas", href: "/razasg", requires: Some(Capability::ManageRazas) },
    NavEntry { label: "Clientes", href: "/cliente", requires: Some(Capability::ManageClientes) },
    NavEntry { label: "Productos", href: "/producto", requires: Some(Capability::ManageProductos) },
    NavEntry { label: "Ventas", href: "/venta", requires: Some(Capability::ViewVentas) },
    NavEntry { label: "Reportes", href: "/reportes", requires: Some(Capability::ViewReports) },
    NavEntry { label: "Usuarios", href: "/usuario", requires: Some(Capability::ManageUsuarios) },
];

/// Navigation entries visible to `roles`.
pub fn nav_entries(roles: &RoleSet) -> Vec<NavEntry> {
    NAV.iter()
        .filter(|entry| entry.requires.is_none_or(|cap| cap.allowed(roles)))
        .copied()
        .collect()
}

/// Per-lote navigation targets offered in the lote card selector.
pub fn lote_destinations(roles: &RoleSet) -> Vec<(&'static str, &'static str)> {
    let mut out = Vec::new();
    if Capability::ViewProduccion.allowed(roles) {
        out.push(("produccion", "Producción"));
    }
    if Capability::ViewClasificacion.allowed(roles) {
        out.push(("clasificacion", "Clasificación"));
    }
    if Capability::ViewEstadoLote.allowed(roles) {
        out.push(("estado", "Estado"));
    }
    out
}
