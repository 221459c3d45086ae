//! Weekly status records of one lote (`/estado/:id`).
//!
//! Only the most recent record may be edited; older weeks are history.
//! Removal is a soft delete.

#[cfg(test)]
#[path = "estado_lote_test.rs"]
mod estado_lote_test;

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::components::date_filter::{DateFilter, DateFilterBar};
use crate::components::field::{Field, SelectField};
use crate::components::line_chart::LineChart;
use crate::components::lote_nav::LoteNav;
use crate::components::pagination::Pagination;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{EstadoLote, EstadoLotePayload, Etapa, Lote};
use crate::util::charts::estado_chart;
use crate::util::form::{FormErrors, date_input_to_api, parse_choice, parse_count, required_text};
use crate::util::listing::{Page, filter_by_date, format_date, paginate, parse_api_date, sort_by_date, total_pages};

use super::{spawn_request, use_page, use_route_id};

const PAGE_SIZE: usize = 10;

/// Id of the newest record by fecha; ties go to the higher id.
pub(crate) fn most_recent_id(estados: &[EstadoLote]) -> Option<i64> {
    estados.iter().max_by_key(|e| (parse_api_date(&e.fecha_registro), e.id_estado)).map(|e| e.id_estado)
}

pub(crate) fn etapa_name(etapas: &[Etapa], id_etapa: i64) -> String {
    etapas.iter().find(|e| e.id_etapa == id_etapa).map_or_else(|| "-".to_owned(), |e| e.nombre.clone())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct EstadoInputs {
    pub bajas: String,
    pub semana: String,
    pub id_etapa: String,
    pub fecha_registro: String,
    pub descripcion: String,
}

impl EstadoInputs {
    pub(crate) fn from_estado(e: &EstadoLote) -> Self {
        Self {
            bajas: e.bajas.to_string(),
            semana: e.semana.to_string(),
            id_etapa: e.id_etapa.to_string(),
            fecha_registro: String::new(),
            descripcion: e.descripcion.clone().unwrap_or_default(),
        }
    }

    /// The fecha is only sent, and only required, on create.
    pub(crate) fn validate(&self, id_estado: Option<i64>, id_lote: i64) -> Result<EstadoLotePayload, FormErrors> {
        let mut errors = FormErrors::default();
        let bajas = errors.check("bajas", parse_count(&self.bajas));
        let semana = errors.check("semana", parse_count(&self.semana));
        let id_etapa = errors.check("id_etapa", parse_choice(&self.id_etapa));
        let descripcion = errors.check("descripcion", required_text(&self.descripcion));
        let fecha_registro = if id_estado.is_some() {
            Some(None)
        } else {
            errors.check("fecha_registro", date_input_to_api(&self.fecha_registro)).map(Some)
        };
        match (bajas, semana, id_etapa, descripcion, fecha_registro) {
            (Some(bajas), Some(semana), Some(id_etapa), Some(descripcion), Some(fecha_registro)) => {
                Ok(EstadoLotePayload { id_estado, bajas, fecha_registro, semana, id_etapa, id_lote, descripcion })
            }
            _ => Err(errors),
        }
    }
}

#[component]
pub fn EstadoLotePage() -> impl IntoView {
    let id = use_route_id();

    view! {
        <RequireCapability capability=Capability::ViewEstadoLote>
            {move || match id.get() {
                Some(id_lote) => view! { <EstadoLoteView id_lote=id_lote/> }.into_any(),
                None => view! { <p class="page__empty">"Lote no válido."</p> }.into_any(),
            }}
        </RequireCapability>
    }
}

#[component]
fn EstadoLoteView(id_lote: i64) -> impl IntoView {
    let page = use_page();
    let (session, client, ui) = (page.session, page.client, page.ui);

    let lote = RwSignal::new(None::<Lote>);
    let estados = RwSignal::new(Vec::<EstadoLote>::new());
    let etapas = RwSignal::new(Vec::<Etapa>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0_u32);
    let filter = DateFilter::new();
    let current = RwSignal::new(1_usize);

    let bajas = RwSignal::new(String::new());
    let semana = RwSignal::new(String::new());
    let id_etapa = RwSignal::new(String::new());
    let fecha = RwSignal::new(String::new());
    let descripcion = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::default());
    let editing = RwSignal::new(None::<i64>);
    let open = RwSignal::new(false);

    Effect::new(move || {
        spawn_request(ui, async move {
            lote.set(api::get_lote(client, id_lote).await?);
            etapas.set(api::list_etapas(client).await?);
            Ok(())
        });
    });

    Effect::new(move || {
        reload.track();
        spawn_request(ui, async move {
            let result = api::list_estado_lote(client, id_lote).await;
            loading.set(false);
            estados.set(result?);
            Ok(())
        });
    });

    // Any narrowing of the list starts again from page 1.
    Effect::new(move || {
        filter.track();
        current.set(1);
    });

    let dado_de_baja = move || lote.with(|l| l.as_ref().is_some_and(|l| l.estado_baja));
    let can_edit = move || session.allows(Capability::ManageEstadoLote) && !dado_de_baja();
    let latest = Memo::new(move |_| estados.with(|e| most_recent_id(e)));

    let visible = Memo::new(move |_| {
        let mut rows = estados.with(|e| filter_by_date(e, filter.range(), |r| r.fecha_registro.as_str()));
        sort_by_date(&mut rows, filter.order.get(), |r| r.fecha_registro.as_str());
        rows
    });
    let pages = Signal::derive(move || total_pages(visible.with(Vec::len), PAGE_SIZE));
    let chart = Signal::derive(move || estados.with(|e| estado_chart(e)));
    let etapa_options = Signal::derive(move || {
        etapas.get().into_iter().map(|e| (e.id_etapa.to_string(), e.nombre)).collect::<Vec<_>>()
    });

    let fill = move |inputs: EstadoInputs, id: Option<i64>| {
        bajas.set(inputs.bajas);
        semana.set(inputs.semana);
        id_etapa.set(inputs.id_etapa);
        fecha.set(inputs.fecha_registro);
        descripcion.set(inputs.descripcion);
        errors.set(FormErrors::default());
        editing.set(id);
        open.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let inputs = EstadoInputs {
            bajas: bajas.get_untracked(),
            semana: semana.get_untracked(),
            id_etapa: id_etapa.get_untracked(),
            fecha_registro: fecha.get_untracked(),
            descripcion: descripcion.get_untracked(),
        };
        match inputs.validate(editing.get_untracked(), id_lote) {
            Ok(payload) => spawn_request(ui, async move {
                if payload.id_estado.is_some() {
                    api::update_estado_lote(client, &payload).await?;
                } else {
                    api::create_estado_lote(client, &payload).await?;
                }
                open.set(false);
                reload.update(|n| *n += 1);
                Ok(())
            }),
            Err(e) => errors.set(e),
        }
    };

    view! {
        <section class="page estado-page">
            <LoteNav title="Estado del Lote" id_lote=id_lote lote=lote/>

            <div class="page__toolbar">
                <DateFilterBar filter=filter/>
                <Show when=can_edit>
                    <button class="btn btn--primary" on:click=move |_| fill(EstadoInputs::default(), None)>
                        "Agregar Estado"
                    </button>
                </Show>
            </div>

            <Show when=move || open.get() && can_edit()>
                <form class="entity-form" on:submit=on_submit>
                    <Field label="Bajas" name="bajas" value=bajas errors=errors input_type="number"/>
                    <Field label="Semana" name="semana" value=semana errors=errors input_type="number"/>
                    <SelectField label="Etapa" name="id_etapa" value=id_etapa errors=errors options=etapa_options/>
                    <Show when=move || editing.get().is_none()>
                        <Field label="Fecha de registro" name="fecha_registro" value=fecha errors=errors input_type="date"/>
                    </Show>
                    <Field label="Descripción" name="descripcion" value=descripcion errors=errors/>
                    <div class="entity-form__actions">
                        <button class="btn btn--primary" type="submit">"Guardar"</button>
                        <button class="btn" type="button" on:click=move |_| open.set(false)>
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando estados..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Fecha"</th>
                            <th>"Semana"</th>
                            <th>"Etapa"</th>
                            <th>"Gallinas"</th>
                            <th>"Bajas"</th>
                            <th>"Descripción"</th>
                            <Show when=can_edit>
                                <th>"Acciones"</th>
                            </Show>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = visible.get();
                            paginate(&rows, Page::clamped(current.get(), PAGE_SIZE, rows.len()))
                                .iter()
                                .cloned()
                                .map(|e| {
                                    let id = e.id_estado;
                                    let inputs = EstadoInputs::from_estado(&e);
                                    let is_latest = move || latest.get() == Some(id);
                                    view! {
                                        <tr>
                                            <td>{format_date(&e.fecha_registro)}</td>
                                            <td>{e.semana}</td>
                                            <td>{move || etapas.with(|all| etapa_name(all, e.id_etapa))}</td>
                                            <td>{e.cantidad_g}</td>
                                            <td>{e.bajas}</td>
                                            <td>{e.descripcion.clone().unwrap_or_default()}</td>
                                            <Show when=can_edit>
                                                {
                                                    let inputs = inputs.clone();
                                                    view! {
                                                        <td class="table__actions">
                                                            <Show when=is_latest>
                                                                <button
                                                                    class="btn"
                                                                    on:click={
                                                                        let inputs = inputs.clone();
                                                                        move |_| fill(inputs.clone(), Some(id))
                                                                    }
                                                                >
                                                                    "Editar"
                                                                </button>
                                                            </Show>
                                                            <button
                                                                class="btn btn--danger"
                                                                on:click=move |_| {
                                                                    spawn_request(ui, async move {
                                                                        api::disable_estado_lote(client, id).await?;
                                                                        reload.update(|n| *n += 1);
                                                                        Ok(())
                                                                    });
                                                                }
                                                            >
                                                                "Eliminar"
                                                            </button>
                                                        </td>
                                                    }
                                                }
                                            </Show>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
                <Pagination page=current total=pages/>
            </Show>

            <LineChart title="Gallinas y bajas por fecha" data=chart/>
        </section>
    }
}
