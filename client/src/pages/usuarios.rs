//! User accounts: search, register/update with a role, enable/disable.

#[cfg(test)]
#[path = "usuarios_test.rs"]
mod usuarios_test;

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::components::field::{Field, SelectField};
use crate::components::pagination::Pagination;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{RoleOption, Usuario, UsuarioPayload};
use crate::util::form::{FormErrors, parse_choice, required_text};
use crate::util::listing::{Page, matches_search, paginate, total_pages};

use super::{spawn_request, use_page};

const PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct UsuarioInputs {
    pub nombre_user: String,
    pub email: String,
    pub role_id: String,
    pub contrasena: String,
}

impl UsuarioInputs {
    /// Prefill from an account; the role is matched by name. The password is
    /// never prefilled.
    pub(crate) fn from_usuario(usuario: &Usuario, roles: &[RoleOption]) -> Self {
        let role_id = roles.iter().find(|r| r.nombre == usuario.role).map(|r| r.id.to_string()).unwrap_or_default();
        Self { nombre_user: usuario.nombre_user.clone(), email: usuario.email.clone(), role_id, contrasena: String::new() }
    }

    /// A password is required to register; on update a blank one keeps the
    /// current password.
    pub(crate) fn validate(&self, updating: bool) -> Result<UsuarioPayload, FormErrors> {
        let mut errors = FormErrors::default();
        let nombre_user = errors.check("nombre_user", required_text(&self.nombre_user));
        let email = errors.check("email", required_text(&self.email));
        let role_id = errors.check("role_id", parse_choice(&self.role_id));
        let contrasena = if updating && self.contrasena.trim().is_empty() {
            Some(None)
        } else {
            errors.check("contrasena", required_text(&self.contrasena)).map(Some)
        };
        match (nombre_user, email, role_id, contrasena) {
            (Some(nombre_user), Some(email), Some(role_id), Some(contrasena)) => {
                Ok(UsuarioPayload { nombre_user, email, role_id, contrasena })
            }
            _ => Err(errors),
        }
    }
}

/// Accounts matching `search` by name, split into (active, inactive).
pub(crate) fn split_usuarios(usuarios: &[Usuario], search: &str) -> (Vec<Usuario>, Vec<Usuario>) {
    usuarios.iter().filter(|u| matches_search(&u.nombre_user, search)).cloned().partition(|u| u.estado)
}

/// Browser confirmation; outside the browser nothing is confirmed.
fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|w| w.confirm_with_message(message).ok()).unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

#[component]
pub fn UsuariosPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ManageUsuarios>
            <UsuariosView/>
        </RequireCapability>
    }
}

#[component]
fn UsuariosView() -> impl IntoView {
    let page = use_page();
    let (client, ui) = (page.client, page.ui);

    let usuarios = RwSignal::new(Vec::<Usuario>::new());
    let roles = RwSignal::new(Vec::<RoleOption>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0_u32);
    let search = RwSignal::new(String::new());
    let current = RwSignal::new(1_usize);

    let nombre_user = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let role_id = RwSignal::new(String::new());
    let contrasena = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::default());
    let editing = RwSignal::new(None::<i64>);
    let open = RwSignal::new(false);

    Effect::new(move || {
        spawn_request(ui, async move {
            roles.set(api::list_roles(client).await?);
            Ok(())
        });
    });

    Effect::new(move || {
        reload.track();
        spawn_request(ui, async move {
            let result = api::list_usuarios(client).await;
            loading.set(false);
            usuarios.set(result?);
            Ok(())
        });
    });

    let split = Memo::new(move |_| {
        let needle = search.get();
        usuarios.with(|u| split_usuarios(u, &needle))
    });
    let pages = Signal::derive(move || total_pages(split.with(|(active, _)| active.len()), PAGE_SIZE));
    let role_options = Signal::derive(move || {
        roles.get().into_iter().map(|r| (r.id.to_string(), r.nombre)).collect::<Vec<_>>()
    });

    let fill = move |inputs: UsuarioInputs, id: Option<i64>| {
        nombre_user.set(inputs.nombre_user);
        email.set(inputs.email);
        role_id.set(inputs.role_id);
        contrasena.set(inputs.contrasena);
        errors.set(FormErrors::default());
        editing.set(id);
        open.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let inputs = UsuarioInputs {
            nombre_user: nombre_user.get_untracked(),
            email: email.get_untracked(),
            role_id: role_id.get_untracked(),
            contrasena: contrasena.get_untracked(),
        };
        let id = editing.get_untracked();
        match inputs.validate(id.is_some()) {
            Ok(payload) => spawn_request(ui, async move {
                match id {
                    Some(id) => api::update_usuario(client, id, &payload).await?,
                    None => api::register_usuario(client, &payload).await?,
                }
                open.set(false);
                reload.update(|n| *n += 1);
                Ok(())
            }),
            Err(e) => errors.set(e),
        }
    };

    let set_enabled = move |id: i64, enabled: bool| {
        let verb = if enabled { "habilitar" } else { "deshabilitar" };
        if !confirm(&format!("¿Estás seguro de que deseas {verb} este usuario?")) {
            return;
        }
        spawn_request(ui, async move {
            api::set_usuario_enabled(client, id, enabled).await?;
            reload.update(|n| *n += 1);
            Ok(())
        });
    };

    let row = move |usuario: Usuario| {
        let id = usuario.id;
        let enabled = usuario.estado;
        let source = usuario.clone();
        view! {
            <tr>
                <td>{usuario.nombre_user}</td>
                <td>{usuario.email}</td>
                <td>{usuario.role}</td>
                <td class="table__actions">
                    <Show when=move || enabled>
                        <button
                            class="btn"
                            on:click={
                                let source = source.clone();
                                move |_| fill(roles.with(|r| UsuarioInputs::from_usuario(&source, r)), Some(id))
                            }
                        >
                            "Actualizar"
                        </button>
                    </Show>
                    <button class="btn" on:click=move |_| set_enabled(id, !enabled)>
                        {if enabled { "Deshabilitar" } else { "Habilitar" }}
                    </button>
                </td>
            </tr>
        }
    };

    view! {
        <section class="page usuarios-page">
            <header class="page__header">
                <h2>"Lista de Usuarios"</h2>
                <input
                    class="page__search"
                    type="search"
                    placeholder="Buscar usuario"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        current.set(1);
                    }
                />
                <button
                    class="btn btn--primary"
                    on:click=move |_| if open.get_untracked() { open.set(false) } else { fill(UsuarioInputs::default(), None) }
                >
                    {move || if open.get() { "Cerrar Formulario" } else { "Agregar Usuario" }}
                </button>
            </header>

            <Show when=move || open.get()>
                <form class="entity-form" on:submit=on_submit>
                    <h3>{move || if editing.get().is_some() { "Actualizar Usuario" } else { "Registrar Usuario" }}</h3>
                    <Field label="Nombre de usuario" name="nombre_user" value=nombre_user errors=errors/>
                    <Field label="Correo electrónico" name="email" value=email errors=errors input_type="email"/>
                    <Field label="Contraseña" name="contrasena" value=contrasena errors=errors input_type="password"/>
                    <SelectField label="Rol" name="role_id" value=role_id errors=errors options=role_options/>
                    <div class="entity-form__actions">
                        <button class="btn btn--primary" type="submit">"Guardar"</button>
                        <button class="btn" type="button" on:click=move |_| fill(UsuarioInputs::default(), editing.get_untracked())>
                            "Limpiar"
                        </button>
                        <button class="btn" type="button" on:click=move |_| open.set(false)>
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando usuarios..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Usuario"</th>
                            <th>"Correo"</th>
                            <th>"Rol"</th>
                            <th>"Acciones"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let (active, _) = split.get();
                            paginate(&active, Page::clamped(current.get(), PAGE_SIZE, active.len()))
                                .iter()
                                .cloned()
                                .map(row)
                                .collect_view()
                        }}
                    </tbody>
                </table>
                <Pagination page=current total=pages/>

                <h3>"Usuarios deshabilitados"</h3>
                <table class="table table--inactive">
                    <tbody>{move || split.get().1.into_iter().map(row).collect_view()}</tbody>
                </table>
            </Show>
        </section>
    }
}
