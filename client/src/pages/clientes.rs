//! Customer catalogue: active clientes, sortable by name, soft delete.

#[cfg(test)]
#[path = "clientes_test.rs"]
mod clientes_test;

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::components::field::Field;
use crate::components::pagination::Pagination;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{Cliente, ClientePayload};
use crate::util::form::{FormErrors, digits_text, required_text};
use crate::util::listing::{Page, SortOrder, paginate, total_pages};

use super::{spawn_request, use_page};

const PAGE_SIZE: usize = 10;

/// Case-insensitive name order.
pub(crate) fn sort_by_name<T>(items: &mut [T], order: SortOrder, name: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| {
        let ord = name(a).to_lowercase().cmp(&name(b).to_lowercase());
        if order == SortOrder::Asc { ord } else { ord.reverse() }
    });
}

pub(crate) fn validate_cliente(
    cliente_id: Option<i64>,
    nombre: &str,
    direccion: &str,
    telefono: &str,
) -> Result<ClientePayload, FormErrors> {
    let mut errors = FormErrors::default();
    let nombre_cliente = errors.check("nombre_cliente", required_text(nombre));
    let direccion = errors.check("direccion", required_text(direccion));
    let telefono = errors.check("telefono", digits_text(telefono));
    match (nombre_cliente, direccion, telefono) {
        (Some(nombre_cliente), Some(direccion), Some(telefono)) => {
            Ok(ClientePayload { cliente_id, nombre_cliente, direccion, telefono })
        }
        _ => Err(errors),
    }
}

#[component]
pub fn ClientesPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ManageClientes>
            <ClientesView/>
        </RequireCapability>
    }
}

#[component]
fn ClientesView() -> impl IntoView {
    let page = use_page();
    let (client, ui) = (page.client, page.ui);

    let clientes = RwSignal::new(Vec::<Cliente>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0_u32);
    let order = RwSignal::new(SortOrder::Asc);
    let current = RwSignal::new(1_usize);

    let nombre = RwSignal::new(String::new());
    let direccion = RwSignal::new(String::new());
    let telefono = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::default());
    let editing = RwSignal::new(None::<i64>);
    let open = RwSignal::new(false);

    Effect::new(move || {
        reload.track();
        spawn_request(ui, async move {
            let result = api::list_clientes(client).await;
            loading.set(false);
            clientes.set(result?);
            Ok(())
        });
    });

    let sorted = Memo::new(move |_| {
        let mut rows = clientes.get();
        sort_by_name(&mut rows, order.get(), |c| c.nombre_cliente.as_str());
        rows
    });
    let pages = Signal::derive(move || total_pages(sorted.with(Vec::len), PAGE_SIZE));

    let fill = move |cliente: Option<&Cliente>| {
        nombre.set(cliente.map(|c| c.nombre_cliente.clone()).unwrap_or_default());
        direccion.set(cliente.map(|c| c.direccion.clone()).unwrap_or_default());
        telefono.set(cliente.map(|c| c.telefono.clone()).unwrap_or_default());
        errors.set(FormErrors::default());
        editing.set(cliente.map(|c| c.cliente_id));
        open.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let result = validate_cliente(
            editing.get_untracked(),
            &nombre.get_untracked(),
            &direccion.get_untracked(),
            &telefono.get_untracked(),
        );
        match result {
            Ok(payload) => spawn_request(ui, async move {
                if payload.cliente_id.is_some() {
                    api::update_cliente(client, &payload).await?;
                } else {
                    api::create_cliente(client, &payload).await?;
                }
                open.set(false);
                reload.update(|n| *n += 1);
                Ok(())
            }),
            Err(e) => errors.set(e),
        }
    };

    view! {
        <section class="page clientes-page">
            <header class="page__header">
                <h2>"Clientes"</h2>
                <button class="btn btn--primary" on:click=move |_| fill(None)>
                    "Agregar Cliente"
                </button>
            </header>

            <Show when=move || open.get()>
                <form class="entity-form" on:submit=on_submit>
                    <Field label="Nombre" name="nombre_cliente" value=nombre errors=errors/>
                    <Field label="Dirección" name="direccion" value=direccion errors=errors/>
                    <Field label="Teléfono" name="telefono" value=telefono errors=errors input_type="tel"/>
                    <div class="entity-form__actions">
                        <button class="btn btn--primary" type="submit">"Guardar"</button>
                        <button class="btn" type="button" on:click=move |_| open.set(false)>
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando clientes..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th class="table__sortable" on:click=move |_| order.update(|o| *o = o.toggled())>
                                "Nombre "
                                {move || if order.get() == SortOrder::Asc { "▲" } else { "▼" }}
                            </th>
                            <th>"Dirección"</th>
                            <th>"Teléfono"</th>
                            <th>"Acciones"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = sorted.get();
                            paginate(&rows, Page::clamped(current.get(), PAGE_SIZE, rows.len()))
                                .iter()
                                .cloned()
                                .map(|cliente| {
                                    let id = cliente.cliente_id;
                                    let source = cliente.clone();
                                    view! {
                                        <tr>
                                            <td>{cliente.nombre_cliente}</td>
                                            <td>{cliente.direccion}</td>
                                            <td>{cliente.telefono}</td>
                                            <td class="table__actions">
                                                <button class="btn" on:click=move |_| fill(Some(&source))>
                                                    "Editar"
                                                </button>
                                                <button
                                                    class="btn btn--danger"
                                                    on:click=move |_| {
                                                        spawn_request(ui, async move {
                                                            api::disable_cliente(client, id).await?;
                                                            reload.update(|n| *n += 1);
                                                            Ok(())
                                                        });
                                                    }
                                                >
                                                    "Eliminar"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
                <Pagination page=current total=pages/>
            </Show>
        </section>
    }
}
