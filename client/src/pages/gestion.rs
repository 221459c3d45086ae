//! Lote management overview (`/gestion`): charts and a printable summary
//! for one lote, active or dado de baja.
//!
//! Classification and status history are only requested when the session
//! may view them; otherwise those sections stay empty.

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::components::line_chart::LineChart;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{Clasificacion, ClasificacionPoint, EstadoLote, Lote, Period, Produccion, ProduccionPoint};
use crate::util::charts::{clasificacion_chart, estado_chart, produccion_chart};
use crate::util::reports::{LoteReport, lote_report, print_page};

use super::dashboard::pick_lote;
use super::{spawn_request, use_page};

#[component]
pub fn GestionPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ViewProduccion>
            <GestionView/>
        </RequireCapability>
    }
}

#[component]
fn GestionView() -> impl IntoView {
    let page = use_page();
    let (session, client, ui) = (page.session, page.client, page.ui);

    let dados_de_baja = RwSignal::new(false);
    let lotes = RwSignal::new(Vec::<Lote>::new());
    let selected = RwSignal::new(None::<i64>);
    let period = RwSignal::new(Period::default());

    let produccion_series = RwSignal::new(Vec::<ProduccionPoint>::new());
    let clasificacion_series = RwSignal::new(Vec::<ClasificacionPoint>::new());
    let produccion = RwSignal::new(Vec::<Produccion>::new());
    let clasificacion = RwSignal::new(Vec::<Clasificacion>::new());
    let estados = RwSignal::new(Vec::<EstadoLote>::new());

    Effect::new(move || {
        let baja = dados_de_baja.get();
        spawn_request(ui, async move {
            let rows = api::list_lotes(client, baja).await?;
            selected.set(pick_lote(&rows, None));
            lotes.set(rows);
            Ok(())
        });
    });

    Effect::new(move || {
        let (Some(id_lote), period) = (selected.get(), period.get()) else { return };
        spawn_request(ui, async move {
            produccion_series.set(api::produccion_series(client, id_lote, period).await?);
            clasificacion_series.set(api::clasificacion_series(client, id_lote, period).await?);
            Ok(())
        });
    });

    Effect::new(move || {
        let Some(id_lote) = selected.get() else { return };
        let with_clasificacion = session.allows(Capability::ViewClasificacion);
        let with_estado = session.allows(Capability::ViewEstadoLote);
        spawn_request(ui, async move {
            produccion.set(api::list_produccion(client, id_lote).await?);
            clasificacion.set(if with_clasificacion { api::list_clasificacion(client, id_lote).await? } else { Vec::new() });
            estados.set(if with_estado { api::list_estado_lote(client, id_lote).await? } else { Vec::new() });
            Ok(())
        });
    });

    let report = Memo::new(move |_| {
        let id = selected.get()?;
        let lote = lotes.with(|l| l.iter().find(|l| l.id_lote == id).cloned())?;
        Some(produccion.with(|p| clasificacion.with(|c| estados.with(|e| lote_report(&lote, p, c, e)))))
    });

    let produccion_data = Signal::derive(move || produccion_series.with(|p| produccion_chart(p)));
    let clasificacion_data = Signal::derive(move || clasificacion_series.with(|c| clasificacion_chart(c)));
    let estado_data = Signal::derive(move || estados.with(|e| estado_chart(e)));

    view! {
        <section class="page gestion-page">
            <div class="page__toolbar no-print">
                <label class="field">
                    <span class="field__label">"Lote"</span>
                    <select
                        class="field__input"
                        prop:value=move || selected.get().map(|id| id.to_string()).unwrap_or_default()
                        on:change=move |ev| selected.set(event_target_value(&ev).parse().ok())
                    >
                        <option value="">"Seleccione un Lote..."</option>
                        {move || {
                            lotes
                                .get()
                                .into_iter()
                                .map(|l| view! { <option value=l.id_lote.to_string()>{l.num_lote}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                <button class="btn" on:click=move |_| dados_de_baja.update(|b| *b = !*b)>
                    {move || if dados_de_baja.get() { "Mostrar Activos" } else { "Mostrar Dados de Baja" }}
                </button>
                {Period::ALL
                    .into_iter()
                    .map(|p| {
                        view! {
                            <button class="btn" class:btn--primary=move || period.get() == p on:click=move |_| period.set(p)>
                                {p.label()}
                            </button>
                        }
                    })
                    .collect_view()}
                <button class="btn btn--primary" on:click=move |_| print_page()>
                    "Imprimir reporte"
                </button>
            </div>

            {move || report.get().map(|r| view! { <LoteSummary report=r/> })}

            <LineChart title="Producción" data=produccion_data/>
            <Show when=move || session.allows(Capability::ViewClasificacion)>
                <LineChart title="Clasificación" data=clasificacion_data/>
            </Show>
            <Show when=move || session.allows(Capability::ViewEstadoLote)>
                <LineChart title="Estado del Lote" data=estado_data/>
            </Show>
        </section>
    }
}

#[component]
fn LoteSummary(report: LoteReport) -> impl IntoView {
    view! {
        <div class="report lote-report">
            <h2>"Reporte del Lote "{report.num_lote}</h2>
            <dl class="report__facts">
                <dt>"Fecha de adquisición"</dt>
                <dd>{report.fecha_adq}</dd>
                <dt>"Gallinas iniciales"</dt>
                <dd>{report.gallinas_iniciales}</dd>
                <dt>"Gallinas actuales"</dt>
                <dd>{report.gallinas_actuales}</dd>
                <dt>"Bajas registradas"</dt>
                <dd>{report.total_bajas}</dd>
                <dt>"Huevos producidos"</dt>
                <dd>{report.total_producido}</dd>
                <dt>"Defectuosos"</dt>
                <dd>{report.total_defectuosos}</dd>
                <dt>"Registros de producción"</dt>
                <dd>{report.registros_produccion}</dd>
                <dt>"Registros de estado"</dt>
                <dd>{report.registros_estado}</dd>
            </dl>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Tamaño"</th>
                        <th>"Huevos clasificados"</th>
                    </tr>
                </thead>
                <tbody>
                    {report
                        .clasificado
                        .into_iter()
                        .map(|(size, total)| {
                            view! {
                                <tr>
                                    <td>{size}</td>
                                    <td>{total}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
