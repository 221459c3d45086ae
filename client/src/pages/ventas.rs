//! Sales: active ventas with their detalle lines, and the venta editor.
//!
//! DESIGN
//! ======
//! Detalles are fetched once per venta after the list arrives and kept in a
//! map so expanding a row never refetches. The editor holds one
//! `DetalleInputs` per line; validation yields one `FormErrors` per line so
//! each line shows its own messages.

#[cfg(test)]
#[path = "ventas_test.rs"]
mod ventas_test;

use std::collections::{HashMap, HashSet};

use leptos::prelude::*;
use leptos_router::components::A;

use crate::auth::policy::Capability;
use crate::components::date_filter::{DateFilter, DateFilterBar};
use crate::components::field::{Field, SelectField};
use crate::components::pagination::Pagination;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{
    Cliente, DetalleVenta, NuevaVenta, Producto, StockHuevos, Venta, VentaPayload, VentaUpdatePayload,
};
use crate::state::ui::UiState;
use crate::util::form::{FieldError, FormErrors, parse_amount, parse_choice, parse_positive, required_date, required_text};
use crate::util::listing::{DateRange, Page, format_date, input_date, paginate, sort_by_date, total_pages};
use crate::util::reports::{UNKNOWN, detalle_total, money};

use super::{spawn_request, use_page};

const PAGE_SIZE: usize = 5;

pub(crate) const TIPOS_EMPAQUE: [&str; 3] = ["Cartón", "Caja", "Sueltos"];
pub(crate) const TAMANOS_VENTA: [&str; 5] = ["Extra Grande", "Grande", "Mediano", "Pequeño", "Defectuosos"];
pub(crate) const LAST_LINE: &str = "No se puede eliminar el último detalle de venta.";

/// Ventas of `cliente` (all when `None`) whose fecha falls in `range`.
pub(crate) fn filter_ventas(ventas: &[Venta], cliente: Option<i64>, range: DateRange) -> Vec<Venta> {
    ventas
        .iter()
        .filter(|v| cliente.is_none_or(|id| v.cliente_id == id))
        .filter(|v| range.contains_raw(&v.fecha_venta))
        .cloned()
        .collect()
}

pub(crate) fn format_money(value: f64) -> String {
    format!("Q {}", money(value))
}

/// Raw inputs of one detalle line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DetalleInputs {
    pub producto_id: String,
    pub tipo_empaque: String,
    pub tamano_huevo: String,
    pub cantidad: String,
    pub precio: String,
}

impl DetalleInputs {
    pub(crate) fn from_detalle(d: &DetalleVenta) -> Self {
        Self {
            producto_id: d.producto_id.to_string(),
            tipo_empaque: d.tipo_empaque.clone(),
            tamano_huevo: d.tamano_huevo.clone(),
            cantidad: d.cantidad_vendida.to_string(),
            precio: d.precio_unitario.to_string(),
        }
    }

    pub(crate) fn validate(&self) -> Result<DetalleVenta, FormErrors> {
        let mut errors = FormErrors::default();
        let producto_id = errors.check("producto_id", parse_choice(&self.producto_id));
        let tipo_empaque = errors.check("tipo_empaque", required_text(&self.tipo_empaque));
        let tamano_huevo = errors.check("tamano_huevo", required_text(&self.tamano_huevo));
        let cantidad = errors.check("cantidad", parse_positive(&self.cantidad));
        let precio = errors.check(
            "precio",
            parse_amount(&self.precio).and_then(|p| if p > 0.0 { Ok(p) } else { Err(FieldError::NotPositive) }),
        );
        match (producto_id, tipo_empaque, tamano_huevo, cantidad, precio) {
            (Some(producto_id), Some(tipo_empaque), Some(tamano_huevo), Some(cantidad_vendida), Some(precio_unitario)) => {
                Ok(DetalleVenta { producto_id, tipo_empaque, tamano_huevo, cantidad_vendida, precio_unitario, total: None })
            }
            _ => Err(errors),
        }
    }
}

/// Errors of the venta header and of each line, index-aligned with the
/// lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct VentaErrors {
    pub venta: FormErrors,
    pub lines: Vec<FormErrors>,
}

impl VentaErrors {
    pub(crate) fn line(&self, index: usize, field: &str) -> Option<String> {
        self.lines.get(index).and_then(|e| e.get(field))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct VentaInputs {
    pub cliente_id: String,
    pub fecha_venta: String,
    pub lines: Vec<DetalleInputs>,
}

impl VentaInputs {
    pub(crate) fn blank() -> Self {
        Self { lines: vec![DetalleInputs::default()], ..Self::default() }
    }

    pub(crate) fn from_venta(venta: &Venta, detalles: &[DetalleVenta]) -> Self {
        let mut lines: Vec<_> = detalles.iter().map(DetalleInputs::from_detalle).collect();
        if lines.is_empty() {
            lines.push(DetalleInputs::default());
        }
        Self { cliente_id: venta.cliente_id.to_string(), fecha_venta: input_date(&venta.fecha_venta), lines }
    }

    /// Drop line `index`; the last remaining line cannot be removed.
    pub(crate) fn remove_line(&mut self, index: usize) -> Result<(), &'static str> {
        if self.lines.len() <= 1 {
            return Err(LAST_LINE);
        }
        if index < self.lines.len() {
            self.lines.remove(index);
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<VentaPayload, VentaErrors> {
        let mut venta = FormErrors::default();
        let cliente_id = venta.check("cliente_id", parse_choice(&self.cliente_id));
        let fecha_venta = venta.check("fecha_venta", required_date(&self.fecha_venta));

        let mut detalles = Vec::with_capacity(self.lines.len());
        let mut lines = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            match line.validate() {
                Ok(detalle) => {
                    detalles.push(detalle);
                    lines.push(FormErrors::default());
                }
                Err(e) => lines.push(e),
            }
        }

        match (cliente_id, fecha_venta) {
            (Some(cliente_id), Some(fecha_venta)) if detalles.len() == self.lines.len() => {
                Ok(VentaPayload { venta: NuevaVenta { cliente_id, fecha_venta }, detalles_venta: detalles })
            }
            _ => Err(VentaErrors { venta, lines }),
        }
    }
}

pub(crate) fn update_payload(venta_id: i64, payload: VentaPayload) -> VentaUpdatePayload {
    VentaUpdatePayload {
        venta_id,
        cliente_id: payload.venta.cliente_id,
        fecha_venta: payload.venta.fecha_venta,
        detalles_venta: payload.detalles_venta,
    }
}

fn cliente_name(clientes: &[Cliente], cliente_id: i64) -> String {
    clientes.iter().find(|c| c.cliente_id == cliente_id).map_or_else(|| UNKNOWN.to_owned(), |c| c.nombre_cliente.clone())
}

fn producto_name(productos: &[Producto], producto_id: i64) -> String {
    productos
        .iter()
        .find(|p| p.producto_id == producto_id)
        .map_or_else(|| UNKNOWN.to_owned(), |p| p.nombre_producto.clone())
}

#[component]
pub fn VentasPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ViewVentas>
            <VentasView/>
        </RequireCapability>
    }
}

#[component]
fn VentasView() -> impl IntoView {
    let page = use_page();
    let (session, client, ui) = (page.session, page.client, page.ui);

    let ventas = RwSignal::new(Vec::<Venta>::new());
    let detalles = RwSignal::new(HashMap::<i64, Vec<DetalleVenta>>::new());
    let clientes = RwSignal::new(Vec::<Cliente>::new());
    let productos = RwSignal::new(Vec::<Producto>::new());
    let stock = RwSignal::new(Vec::<StockHuevos>::new());
    let expanded = RwSignal::new(HashSet::<i64>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0_u32);

    let cliente_filter = RwSignal::new(String::new());
    let filter = DateFilter::new();
    let current = RwSignal::new(1_usize);

    let form = RwSignal::new(VentaInputs::blank());
    let errors = RwSignal::new(VentaErrors::default());
    let editing = RwSignal::new(None::<i64>);
    let open = RwSignal::new(false);

    Effect::new(move || {
        spawn_request(ui, async move {
            clientes.set(api::list_clientes(client).await?);
            productos.set(api::list_productos(client).await?);
            Ok(())
        });
    });

    Effect::new(move || {
        reload.track();
        spawn_request(ui, async move {
            let result = api::list_ventas(client).await;
            loading.set(false);
            let rows = result?;
            let mut by_venta = HashMap::with_capacity(rows.len());
            for venta in &rows {
                by_venta.insert(venta.venta_id, api::list_detalles(client, venta.venta_id).await?);
            }
            ventas.set(rows);
            detalles.set(by_venta);
            stock.set(api::stock_huevos(client).await?);
            Ok(())
        });
    });

    Effect::new(move || {
        cliente_filter.track();
        filter.track();
        current.set(1);
    });

    let visible = Memo::new(move |_| {
        let cliente = cliente_filter.with(|c| parse_choice(c).ok());
        let mut rows = ventas.with(|v| filter_ventas(v, cliente, filter.range()));
        sort_by_date(&mut rows, filter.order.get(), |v| v.fecha_venta.as_str());
        rows
    });
    let pages = Signal::derive(move || total_pages(visible.with(Vec::len), PAGE_SIZE));
    let cliente_options = Signal::derive(move || {
        clientes.get().into_iter().map(|c| (c.cliente_id.to_string(), c.nombre_cliente)).collect::<Vec<_>>()
    });
    let producto_options = Signal::derive(move || {
        productos.get().into_iter().map(|p| (p.producto_id.to_string(), p.nombre_producto)).collect::<Vec<_>>()
    });

    let start_edit = move |venta: &Venta| {
        let lines = detalles.with(|d| d.get(&venta.venta_id).cloned().unwrap_or_default());
        form.set(VentaInputs::from_venta(venta, &lines));
        errors.set(VentaErrors::default());
        editing.set(Some(venta.venta_id));
        open.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        ui.update(UiState::clear_error);
        match form.with_untracked(VentaInputs::validate) {
            Ok(payload) => {
                errors.set(VentaErrors::default());
                let venta_id = editing.get_untracked();
                spawn_request(ui, async move {
                    match venta_id {
                        Some(venta_id) => api::update_venta(client, &update_payload(venta_id, payload)).await?,
                        None => api::create_venta(client, &payload).await?,
                    }
                    open.set(false);
                    reload.update(|n| *n += 1);
                    Ok(())
                });
            }
            Err(e) => errors.set(e),
        }
    };

    view! {
        <section class="page ventas-page">
            <h2>"Ventas Activas"</h2>
            <div class="page__toolbar">
                <label class="field">
                    <span class="field__label">"Cliente"</span>
                    <select
                        class="field__input"
                        prop:value=move || cliente_filter.get()
                        on:change=move |ev| cliente_filter.set(event_target_value(&ev))
                    >
                        <option value="">"Todos"</option>
                        {move || {
                            cliente_options
                                .get()
                                .into_iter()
                                .map(|(id, name)| view! { <option value=id>{name}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                <DateFilterBar filter=filter/>
                <Show when=move || session.allows(Capability::ViewReports)>
                    <A href="/reportes">"Reportes de ventas"</A>
                </Show>
                <Show when=move || session.allows(Capability::ManageVentas)>
                    <button
                        class="btn btn--primary"
                        on:click=move |_| {
                            if open.get_untracked() {
                                open.set(false);
                            } else {
                                form.set(VentaInputs::blank());
                                errors.set(VentaErrors::default());
                                editing.set(None);
                                open.set(true);
                            }
                        }
                    >
                        {move || if open.get() { "Ocultar Formulario" } else { "Agregar Nueva Venta" }}
                    </button>
                </Show>
            </div>

            <Show when=move || open.get() && session.allows(Capability::ManageVentas)>
                <VentaForm
                    form=form
                    errors=errors
                    clientes=clientes
                    producto_options=producto_options
                    editing=editing
                    on_submit=on_submit
                    on_cancel=move || open.set(false)
                />
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando ventas..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Cliente"</th>
                            <th>"Fecha"</th>
                            <th>"Total"</th>
                            <th>"Acciones"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = visible.get();
                            if rows.is_empty() {
                                return view! {
                                    <tr>
                                        <td colspan="4">"No hay ventas para mostrar."</td>
                                    </tr>
                                }
                                    .into_any();
                            }
                            paginate(&rows, Page::clamped(current.get(), PAGE_SIZE, rows.len()))
                                .iter()
                                .cloned()
                                .map(|venta| {
                                    let id = venta.venta_id;
                                    let is_open = move || expanded.with(|e| e.contains(&id));
                                    let toggle = move |_| {
                                        expanded.update(|e| {
                                            if !e.remove(&id) {
                                                e.insert(id);
                                            }
                                        });
                                    };
                                    let edit_target = venta.clone();
                                    view! {
                                        <tr>
                                            <td>{move || clientes.with(|c| cliente_name(c, venta.cliente_id))}</td>
                                            <td>{format_date(&venta.fecha_venta)}</td>
                                            <td>{format_money(venta.total_venta)}</td>
                                            <td class="table__actions">
                                                <button class="btn" on:click=toggle>
                                                    {move || if is_open() { "Ocultar Detalles" } else { "Ver Detalles" }}
                                                </button>
                                                <Show when=move || session.allows(Capability::ManageVentas)>
                                                    <button
                                                        class="btn"
                                                        on:click={
                                                            let edit_target = edit_target.clone();
                                                            move |_| start_edit(&edit_target)
                                                        }
                                                    >
                                                        "Editar"
                                                    </button>
                                                </Show>
                                            </td>
                                        </tr>
                                        <Show when=is_open>
                                            <tr class="table__detail">
                                                <td colspan="4">
                                                    <DetalleTable
                                                        rows=Signal::derive(move || {
                                                            detalles.with(|d| d.get(&id).cloned().unwrap_or_default())
                                                        })
                                                        productos=productos
                                                    />
                                                </td>
                                            </tr>
                                        </Show>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>
                </table>
                <Pagination page=current total=pages/>
            </Show>

            <StockTable stock=stock/>
        </section>
    }
}

#[component]
fn DetalleTable(#[prop(into)] rows: Signal<Vec<DetalleVenta>>, productos: RwSignal<Vec<Producto>>) -> impl IntoView {
    view! {
        <table class="table table--nested">
            <thead>
                <tr>
                    <th>"Producto"</th>
                    <th>"Empaque"</th>
                    <th>"Tamaño"</th>
                    <th>"Cantidad"</th>
                    <th>"Precio unitario"</th>
                    <th>"Total"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    rows.get()
                        .into_iter()
                        .map(|d| {
                            let total = d.total.unwrap_or_else(|| detalle_total(&d));
                            view! {
                                <tr>
                                    <td>{move || productos.with(|p| producto_name(p, d.producto_id))}</td>
                                    <td>{d.tipo_empaque}</td>
                                    <td>{d.tamano_huevo}</td>
                                    <td>{d.cantidad_vendida}</td>
                                    <td>{format_money(d.precio_unitario)}</td>
                                    <td>{format_money(total)}</td>
                                </tr>
                            }
                        })
                        .collect_view()
                }}
            </tbody>
        </table>
    }
}

#[component]
fn StockTable(stock: RwSignal<Vec<StockHuevos>>) -> impl IntoView {
    view! {
        <div class="stock">
            <h3>"Stock disponible"</h3>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Tamaño"</th>
                        <th>"Cajas"</th>
                        <th>"Cartones"</th>
                        <th>"Sueltos"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        stock
                            .get()
                            .into_iter()
                            .map(|s| {
                                view! {
                                    <tr>
                                        <td>{s.tamano}</td>
                                        <td>{s.cajas}</td>
                                        <td>{s.cartones_extras}</td>
                                        <td>{s.huevos_sueltos}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </div>
    }
}

/// Header fields are mirrored into their own signals so `Field` can bind
/// to them; detalle lines bind straight into `form`.
#[component]
fn VentaForm<S, C>(
    form: RwSignal<VentaInputs>,
    errors: RwSignal<VentaErrors>,
    clientes: RwSignal<Vec<Cliente>>,
    #[prop(into)] producto_options: Signal<Vec<(String, String)>>,
    editing: RwSignal<Option<i64>>,
    on_submit: S,
    on_cancel: C,
) -> impl IntoView
where
    S: Fn(leptos::ev::SubmitEvent) + Clone + Send + Sync + 'static,
    C: Fn() + Clone + Send + Sync + 'static,
{
    let ui = use_page().ui;
    let cliente_id = RwSignal::new(form.with_untracked(|f| f.cliente_id.clone()));
    let fecha = RwSignal::new(form.with_untracked(|f| f.fecha_venta.clone()));
    let header_errors = RwSignal::new(FormErrors::default());

    Effect::new(move || {
        let (c, f) = (cliente_id.get(), fecha.get());
        form.update(|v| {
            v.cliente_id = c;
            v.fecha_venta = f;
        });
    });
    Effect::new(move || header_errors.set(errors.with(|e| e.venta.clone())));

    let direccion = move || {
        let id = parse_choice(&cliente_id.get()).ok()?;
        clientes.with(|c| c.iter().find(|c| c.cliente_id == id).map(|c| c.direccion.clone()))
    };
    let cliente_options = Signal::derive(move || {
        clientes.get().into_iter().map(|c| (c.cliente_id.to_string(), c.nombre_cliente)).collect::<Vec<_>>()
    });
    let line_count = Memo::new(move |_| form.with(|f| f.lines.len()));

    view! {
        <form class="entity-form venta-form" on:submit=on_submit>
            <h3>{move || if editing.get().is_some() { "Editar Venta" } else { "Nueva Venta" }}</h3>
            <SelectField label="Cliente" name="cliente_id" value=cliente_id errors=header_errors options=cliente_options/>
            {move || direccion().map(|d| view! { <p class="venta-form__direccion">"Dirección: "{d}</p> })}
            <Field label="Fecha de venta" name="fecha_venta" value=fecha errors=header_errors input_type="date"/>

            <h4>"Detalles de venta"</h4>
            {move || {
                (0..line_count.get())
                    .map(|index| {
                        view! {
                            <DetalleLine
                                index=index
                                form=form
                                errors=errors
                                producto_options=producto_options
                                on_remove=move || {
                                    let mut result = Ok(());
                                    form.update(|f| result = f.remove_line(index));
                                    if let Err(message) = result {
                                        ui.update(|u| u.show_error(message));
                                    }
                                }
                            />
                        }
                    })
                    .collect_view()
            }}
            <button
                class="btn"
                type="button"
                on:click=move |_| form.update(|f| f.lines.push(DetalleInputs::default()))
            >
                "Agregar detalle"
            </button>

            <div class="entity-form__actions">
                <button class="btn btn--primary" type="submit">"Guardar"</button>
                <button
                    class="btn"
                    type="button"
                    on:click=move |_| {
                        cliente_id.set(String::new());
                        fecha.set(String::new());
                        form.set(VentaInputs::blank());
                        errors.set(VentaErrors::default());
                    }
                >
                    "Limpiar"
                </button>
                <button class="btn" type="button" on:click=move |_| on_cancel()>
                    "Cancelar"
                </button>
            </div>
        </form>
    }
}

/// Which field of a `DetalleInputs` an input edits.
#[derive(Clone, Copy)]
enum LineField {
    Producto,
    Empaque,
    Tamano,
    Cantidad,
    Precio,
}

impl LineField {
    fn name(self) -> &'static str {
        match self {
            LineField::Producto => "producto_id",
            LineField::Empaque => "tipo_empaque",
            LineField::Tamano => "tamano_huevo",
            LineField::Cantidad => "cantidad",
            LineField::Precio => "precio",
        }
    }

    fn value(self, line: &DetalleInputs) -> &str {
        match self {
            LineField::Producto => &line.producto_id,
            LineField::Empaque => &line.tipo_empaque,
            LineField::Tamano => &line.tamano_huevo,
            LineField::Cantidad => &line.cantidad,
            LineField::Precio => &line.precio,
        }
    }

    fn slot(self, line: &mut DetalleInputs) -> &mut String {
        match self {
            LineField::Producto => &mut line.producto_id,
            LineField::Empaque => &mut line.tipo_empaque,
            LineField::Tamano => &mut line.tamano_huevo,
            LineField::Cantidad => &mut line.cantidad,
            LineField::Precio => &mut line.precio,
        }
    }
}

#[component]
fn DetalleLine<R>(
    index: usize,
    form: RwSignal<VentaInputs>,
    errors: RwSignal<VentaErrors>,
    #[prop(into)] producto_options: Signal<Vec<(String, String)>>,
    on_remove: R,
) -> impl IntoView
where
    R: Fn() + Send + Sync + 'static,
{
    let read = move |field: LineField| {
        form.with(|f| f.lines.get(index).map(|l| field.value(l).to_owned()).unwrap_or_default())
    };
    let write = move |field: LineField, value: String| {
        form.update(|f| {
            if let Some(line) = f.lines.get_mut(index) {
                *field.slot(line) = value;
            }
        });
    };
    let error = move |field: LineField| errors.with(|e| e.line(index, field.name()));
    let fixed = |values: &'static [&'static str]| {
        values.iter().map(|v| view! { <option value=*v>{*v}</option> }).collect_view()
    };

    view! {
        <div class="venta-line">
            <select
                class="field__input"
                prop:value=move || read(LineField::Producto)
                on:change=move |ev| write(LineField::Producto, event_target_value(&ev))
            >
                <option value="">"Seleccione un producto"</option>
                {move || {
                    producto_options
                        .get()
                        .into_iter()
                        .map(|(id, name)| view! { <option value=id>{name}</option> })
                        .collect_view()
                }}
            </select>
            <select
                class="field__input"
                prop:value=move || read(LineField::Empaque)
                on:change=move |ev| write(LineField::Empaque, event_target_value(&ev))
            >
                <option value="">"Tipo de empaque"</option>
                {fixed(TIPOS_EMPAQUE.as_slice())}
            </select>
            <select
                class="field__input"
                prop:value=move || read(LineField::Tamano)
                on:change=move |ev| write(LineField::Tamano, event_target_value(&ev))
            >
                <option value="">"Tamaño"</option>
                {fixed(TAMANOS_VENTA.as_slice())}
            </select>
            <input
                class="field__input"
                type="number"
                placeholder="Cantidad"
                prop:value=move || read(LineField::Cantidad)
                on:input=move |ev| write(LineField::Cantidad, event_target_value(&ev))
            />
            <input
                class="field__input"
                type="text"
                inputmode="decimal"
                placeholder="Precio unitario"
                prop:value=move || read(LineField::Precio)
                on:input=move |ev| write(LineField::Precio, event_target_value(&ev))
            />
            <button class="btn btn--danger" type="button" on:click=move |_| on_remove()>
                "Quitar"
            </button>
            <ul class="field__errors">
                {move || {
                    [LineField::Producto, LineField::Empaque, LineField::Tamano, LineField::Cantidad, LineField::Precio]
                        .into_iter()
                        .filter_map(error)
                        .map(|message| view! { <li class="field__error">{message}</li> })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
