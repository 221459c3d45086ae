//! Product catalogue for sales.

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::components::field::Field;
use crate::components::pagination::Pagination;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{Producto, ProductoPayload};
use crate::util::form::{FormErrors, required_text};
use crate::util::listing::{Page, SortOrder, paginate, total_pages};

use super::clientes::sort_by_name;
use super::{spawn_request, use_page};

const PAGE_SIZE: usize = 10;

#[component]
pub fn ProductosPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ManageProductos>
            <ProductosView/>
        </RequireCapability>
    }
}

#[component]
fn ProductosView() -> impl IntoView {
    let page = use_page();
    let (client, ui) = (page.client, page.ui);

    let productos = RwSignal::new(Vec::<Producto>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0_u32);
    let order = RwSignal::new(SortOrder::Asc);
    let current = RwSignal::new(1_usize);

    let nombre = RwSignal::new(String::new());
    let descripcion = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::default());
    let editing = RwSignal::new(None::<i64>);
    let open = RwSignal::new(false);

    Effect::new(move || {
        reload.track();
        spawn_request(ui, async move {
            let result = api::list_productos(client).await;
            loading.set(false);
            productos.set(result?);
            Ok(())
        });
    });

    let sorted = Memo::new(move |_| {
        let mut rows = productos.get();
        sort_by_name(&mut rows, order.get(), |p| p.nombre_producto.as_str());
        rows
    });
    let pages = Signal::derive(move || total_pages(sorted.with(Vec::len), PAGE_SIZE));

    let fill = move |producto: Option<&Producto>| {
        nombre.set(producto.map(|p| p.nombre_producto.clone()).unwrap_or_default());
        descripcion.set(producto.map(|p| p.descripcion.clone()).unwrap_or_default());
        errors.set(FormErrors::default());
        editing.set(producto.map(|p| p.producto_id));
        open.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let mut found = FormErrors::default();
        let nombre_producto = found.check("nombre_producto", required_text(&nombre.get_untracked()));
        let desc = found.check("descripcion", required_text(&descripcion.get_untracked()));
        let (Some(nombre_producto), Some(descripcion)) = (nombre_producto, desc) else {
            errors.set(found);
            return;
        };
        let payload = ProductoPayload { producto_id: editing.get_untracked(), nombre_producto, descripcion };
        spawn_request(ui, async move {
            if payload.producto_id.is_some() {
                api::update_producto(client, &payload).await?;
            } else {
                api::create_producto(client, &payload).await?;
            }
            open.set(false);
            reload.update(|n| *n += 1);
            Ok(())
        });
    };

    view! {
        <section class="page productos-page">
            <header class="page__header">
                <h2>"Productos"</h2>
                <button class="btn btn--primary" on:click=move |_| fill(None)>
                    "Agregar Producto"
                </button>
            </header>

            <Show when=move || open.get()>
                <form class="entity-form" on:submit=on_submit>
                    <Field label="Nombre" name="nombre_producto" value=nombre errors=errors/>
                    <Field label="Descripción" name="descripcion" value=descripcion errors=errors/>
                    <div class="entity-form__actions">
                        <button class="btn btn--primary" type="submit">"Guardar"</button>
                        <button class="btn" type="button" on:click=move |_| open.set(false)>
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando productos..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th class="table__sortable" on:click=move |_| order.update(|o| *o = o.toggled())>
                                "Nombre "
                                {move || if order.get() == SortOrder::Asc { "▲" } else { "▼" }}
                            </th>
                            <th>"Descripción"</th>
                            <th>"Acciones"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = sorted.get();
                            paginate(&rows, Page::clamped(current.get(), PAGE_SIZE, rows.len()))
                                .iter()
                                .cloned()
                                .map(|producto| {
                                    let id = producto.producto_id;
                                    let source = producto.clone();
                                    view! {
                                        <tr>
                                            <td>{producto.nombre_producto}</td>
                                            <td>{producto.descripcion}</td>
                                            <td class="table__actions">
                                                <button class="btn" on:click=move |_| fill(Some(&source))>
                                                    "Editar"
                                                </button>
                                                <button
                                                    class="btn btn--danger"
                                                    on:click=move |_| {
                                                        spawn_request(ui, async move {
                                                            api::disable_producto(client, id).await?;
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
