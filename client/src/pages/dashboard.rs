//! Dashboard: headline numbers and charts for one active lote.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. Any authenticated session may
//! see it; it only reads. The selected lote defaults to the first active
//! lote and both charts refetch when the lote or the period changes.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::line_chart::LineChart;
use crate::net::api;
use crate::net::types::{ClasificacionPoint, InfoLote, Lote, Period, ProduccionPoint};
use crate::util::charts::{clasificacion_chart, produccion_chart};

use super::{spawn_request, use_page};

const NOT_AVAILABLE: &str = "No disponible";

/// Keep `current` while it is still listed, otherwise fall back to the
/// first lote.
pub(crate) fn pick_lote(lotes: &[Lote], current: Option<i64>) -> Option<i64> {
    current
        .filter(|id| lotes.iter().any(|l| l.id_lote == *id))
        .or_else(|| lotes.first().map(|l| l.id_lote))
}

pub(crate) fn or_not_available(value: Option<i64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), |v| v.to_string())
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let page = use_page();
    let (client, ui) = (page.client, page.ui);

    let lotes = RwSignal::new(Vec::<Lote>::new());
    let selected = RwSignal::new(None::<i64>);
    let period = RwSignal::new(Period::default());
    let info = RwSignal::new(InfoLote::default());
    let produccion = RwSignal::new(Vec::<ProduccionPoint>::new());
    let clasificacion = RwSignal::new(Vec::<ClasificacionPoint>::new());

    Effect::new(move || {
        spawn_request(ui, async move {
            let rows = api::list_lotes(client, false).await?;
            selected.set(pick_lote(&rows, selected.get_untracked()));
            lotes.set(rows);
            Ok(())
        });
    });

    Effect::new(move || {
        let Some(id_lote) = selected.get() else { return };
        spawn_request(ui, async move {
            info.set(api::info_lote(client, id_lote).await?);
            Ok(())
        });
    });

    Effect::new(move || {
        let (Some(id_lote), period) = (selected.get(), period.get()) else { return };
        spawn_request(ui, async move {
            produccion.set(api::produccion_series(client, id_lote, period).await?);
            clasificacion.set(api::clasificacion_series(client, id_lote, period).await?);
            Ok(())
        });
    });

    let produccion_data = Signal::derive(move || produccion.with(|p| produccion_chart(p)));
    let clasificacion_data = Signal::derive(move || clasificacion.with(|c| clasificacion_chart(c)));

    view! {
        <section class="page dashboard-page">
            <label class="field">
                <span class="field__label">"Seleccione un lote"</span>
                <select
                    class="field__input"
                    prop:value=move || selected.get().map(|id| id.to_string()).unwrap_or_default()
                    on:change=move |ev| selected.set(event_target_value(&ev).parse().ok())
                >
                    {move || {
                        lotes
                            .get()
                            .into_iter()
                            .map(|l| view! { <option value=l.id_lote.to_string()>"Lote "{l.num_lote}</option> })
                            .collect_view()
                    }}
                </select>
            </label>

            <div class="dashboard__cards">
                <div class="info-card">
                    <span class="info-card__label">"Producción total"</span>
                    <strong>{move || format!("{} huevos", info.with(|i| i.produccion_total))}</strong>
                </div>
                <div class="info-card">
                    <span class="info-card__label">"Gallinas actuales"</span>
                    <strong>{move || info.with(|i| or_not_available(i.cantidad_gallinas_actual))}</strong>
                </div>
                <div class="info-card">
                    <span class="info-card__label">"Gallinas iniciales"</span>
                    <strong>{move || info.with(|i| or_not_available(i.cantidad_gallinas))}</strong>
                </div>
                <div class="info-card">
                    <span class="info-card__label">"Bajas"</span>
                    <strong>{move || info.with(|i| or_not_available(i.bajas))}</strong>
                </div>
                <div class="info-card">
                    <span class="info-card__label">"Raza"</span>
                    <strong>{move || info.with(|i| i.raza.clone().unwrap_or_else(|| NOT_AVAILABLE.to_owned()))}</strong>
                </div>
            </div>

            <div class="dashboard__periods">
                {Period::ALL
                    .into_iter()
                    .map(|p| {
                        view! {
                            <button
                                class="btn"
                                class:btn--primary=move || period.get() == p
                                on:click=move |_| period.set(p)
                            >
                                {p.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <LineChart title="Producción" data=produccion_data/>
            <LineChart title="Clasificación" data=clasificacion_data/>
        </section>
    }
}
