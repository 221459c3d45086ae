//! Printable sales reports (`/reportes`).

#[cfg(test)]
#[path = "reportes_test.rs"]
mod reportes_test;

use std::collections::HashMap;

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{Cliente, DetalleVenta, Producto, Venta};
use crate::util::form::parse_choice;
use crate::util::listing::DateRange;
use crate::util::reports::{
    SalesData, VentaReport, general_report, grand_total, money, print_page, report_by_cliente, report_by_date,
};

use super::{spawn_request, use_page};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum ReportKind {
    #[default]
    General,
    PorCliente,
    PorFecha,
}

impl ReportKind {
    pub(crate) const ALL: [ReportKind; 3] = [ReportKind::General, ReportKind::PorCliente, ReportKind::PorFecha];

    pub(crate) fn key(self) -> &'static str {
        match self {
            ReportKind::General => "general",
            ReportKind::PorCliente => "cliente",
            ReportKind::PorFecha => "fecha",
        }
    }

    pub(crate) fn from_key(raw: &str) -> Self {
        Self::ALL.into_iter().find(|k| k.key() == raw).unwrap_or_default()
    }

    pub(crate) fn title(self) -> &'static str {
        match self {
            ReportKind::General => "Reporte General de Ventas",
            ReportKind::PorCliente => "Reporte de Ventas por Cliente",
            ReportKind::PorFecha => "Reporte de Ventas por Fecha",
        }
    }
}

/// Rows for `kind`. A by-cliente report without a chosen cliente is empty.
pub(crate) fn build_report(
    data: SalesData<'_>,
    kind: ReportKind,
    cliente: Option<i64>,
    range: DateRange,
) -> Vec<VentaReport> {
    match kind {
        ReportKind::General => general_report(data),
        ReportKind::PorCliente => cliente.map(|id| report_by_cliente(data, id)).unwrap_or_default(),
        ReportKind::PorFecha => report_by_date(data, range),
    }
}

#[component]
pub fn ReportesPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ViewReports>
            <ReportesView/>
        </RequireCapability>
    }
}

#[component]
fn ReportesView() -> impl IntoView {
    let page = use_page();
    let (client, ui) = (page.client, page.ui);

    let ventas = RwSignal::new(Vec::<Venta>::new());
    let detalles = RwSignal::new(HashMap::<i64, Vec<DetalleVenta>>::new());
    let clientes = RwSignal::new(Vec::<Cliente>::new());
    let productos = RwSignal::new(Vec::<Producto>::new());
    let loading = RwSignal::new(true);

    let kind = RwSignal::new(ReportKind::default());
    let cliente = RwSignal::new(String::new());
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());

    Effect::new(move || {
        spawn_request(ui, async move {
            clientes.set(api::list_clientes(client).await?);
            productos.set(api::list_productos(client).await?);
            let result = api::list_ventas(client).await;
            loading.set(false);
            let rows = result?;
            let mut by_venta = HashMap::with_capacity(rows.len());
            for venta in &rows {
                by_venta.insert(venta.venta_id, api::list_detalles(client, venta.venta_id).await?);
            }
            detalles.set(by_venta);
            ventas.set(rows);
            Ok(())
        });
    });

    let report = Memo::new(move |_| {
        let (kind, cliente_id) = (kind.get(), cliente.with(|c| parse_choice(c).ok()));
        let range = DateRange::from_inputs(&start.get(), &end.get());
        ventas.with(|v| {
            detalles.with(|d| {
                clientes.with(|c| {
                    productos.with(|p| {
                        build_report(SalesData { ventas: v, detalles: d, clientes: c, productos: p }, kind, cliente_id, range)
                    })
                })
            })
        })
    });

    view! {
        <section class="page reportes-page">
            <div class="page__toolbar no-print">
                <label class="field">
                    <span class="field__label">"Tipo de reporte"</span>
                    <select
                        class="field__input"
                        on:change=move |ev| kind.set(ReportKind::from_key(&event_target_value(&ev)))
                    >
                        {ReportKind::ALL
                            .into_iter()
                            .map(|k| view! { <option value=k.key()>{k.title()}</option> })
                            .collect_view()}
                    </select>
                </label>
                <Show when=move || kind.get() == ReportKind::PorCliente>
                    <label class="field">
                        <span class="field__label">"Cliente"</span>
                        <select
                            class="field__input"
                            prop:value=move || cliente.get()
                            on:change=move |ev| cliente.set(event_target_value(&ev))
                        >
                            <option value="">"Seleccione un cliente"</option>
                            {move || {
                                clientes
                                    .get()
                                    .into_iter()
                                    .map(|c| view! { <option value=c.cliente_id.to_string()>{c.nombre_cliente}</option> })
                                    .collect_view()
                            }}
                        </select>
                    </label>
                </Show>
                <Show when=move || kind.get() == ReportKind::PorFecha>
                    <label class="field">
                        <span class="field__label">"Desde"</span>
                        <input type="date" prop:value=move || start.get() on:input=move |ev| start.set(event_target_value(&ev))/>
                    </label>
                    <label class="field">
                        <span class="field__label">"Hasta"</span>
                        <input type="date" prop:value=move || end.get() on:input=move |ev| end.set(event_target_value(&ev))/>
                    </label>
                </Show>
                <button class="btn btn--primary" on:click=move |_| print_page()>
                    "Imprimir / PDF"
                </button>
            </div>

            <h2>{move || kind.get().title()}</h2>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando ventas..."</p> }>
                <table class="table report">
                    <thead>
                        <tr>
                            <th>"Venta"</th>
                            <th>"Cliente"</th>
                            <th>"Fecha"</th>
                            <th>"Detalle"</th>
                            <th>"Total"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            report
                                .get()
                                .into_iter()
                                .map(|row| {
                                    view! {
                                        <tr>
                                            <td>{row.venta_id}</td>
                                            <td>{row.cliente}</td>
                                            <td>{row.fecha}</td>
                                            <td>
                                                <ul class="report__lines">
                                                    {row
                                                        .detalles
                                                        .into_iter()
                                                        .map(|d| {
                                                            view! {
                                                                <li>
                                                                    {format!(
                                                                        "{} x{} ({}, {}) a Q {} = Q {}",
                                                                        d.producto,
                                                                        d.cantidad,
                                                                        d.tipo_empaque,
                                                                        d.tamano_huevo,
                                                                        money(d.precio_unitario),
                                                                        money(d.total),
                                                                    )}
                                                                </li>
                                                            }
                                                        })
                                                        .collect_view()}
                                                </ul>
                                            </td>
                                            <td>{format!("Q {}", money(row.total))}</td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                    <tfoot>
                        <tr>
                            <td colspan="4">"Total general"</td>
                            <td>{move || format!("Q {}", report.with(|r| money(grand_total(r))))}</td>
                        </tr>
                    </tfoot>
                </table>
            </Show>
        </section>
    }
}
