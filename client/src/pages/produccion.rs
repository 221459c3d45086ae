//! Production history of one lote (`/produccion/:id`).
//!
//! Records are sorted by fecha and paginated. Adding or editing requires
//! `ManageProduccion` and is disabled while the lote is dado de baja.

#[cfg(test)]
#[path = "produccion_test.rs"]
mod produccion_test;

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::components::field::Field;
use crate::components::lote_nav::LoteNav;
use crate::components::pagination::Pagination;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{Lote, Produccion, ProduccionPayload};
use crate::util::form::{FormErrors, MAX_CARTONES, MAX_SUELTOS, date_input_to_api, parse_bounded, parse_count};
use crate::util::listing::{Page, SortOrder, format_date, input_date, paginate, sort_by_date, total_pages};

use super::{spawn_request, use_page, use_route_id};

const PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ProduccionInputs {
    pub cant_cajas: String,
    pub cant_cartones: String,
    pub cant_sueltos: String,
    pub defectuosos: String,
    pub fecha_registro_p: String,
}

impl Default for ProduccionInputs {
    fn default() -> Self {
        Self {
            cant_cajas: "0".to_owned(),
            cant_cartones: "0".to_owned(),
            cant_sueltos: "0".to_owned(),
            defectuosos: String::new(),
            fecha_registro_p: String::new(),
        }
    }
}

impl ProduccionInputs {
    pub(crate) fn from_produccion(p: &Produccion) -> Self {
        Self {
            cant_cajas: p.cant_cajas.to_string(),
            cant_cartones: p.cant_cartones.to_string(),
            cant_sueltos: p.cant_sueltos.to_string(),
            defectuosos: p.defectuosos.to_string(),
            fecha_registro_p: input_date(&p.fecha_registro_p),
        }
    }

    pub(crate) fn validate(&self, id_prod: Option<i64>, id_lote: i64) -> Result<ProduccionPayload, FormErrors> {
        let mut errors = FormErrors::default();
        let cajas = errors.check("cant_cajas", parse_count(&self.cant_cajas));
        let cartones = errors.check("cant_cartones", parse_bounded(&self.cant_cartones, MAX_CARTONES));
        let sueltos = errors.check("cant_sueltos", parse_bounded(&self.cant_sueltos, MAX_SUELTOS));
        let defectuosos = errors.check("defectuosos", parse_bounded(&self.defectuosos, MAX_SUELTOS));
        let fecha = errors.check("fecha_registro_p", date_input_to_api(&self.fecha_registro_p));
        match (cajas, cartones, sueltos, defectuosos, fecha) {
            (Some(cant_cajas), Some(cant_cartones), Some(cant_sueltos), Some(defectuosos), Some(fecha)) => {
                Ok(ProduccionPayload {
                    id_prod,
                    cant_cajas,
                    cant_cartones,
                    cant_sueltos,
                    id_lote,
                    defectuosos: Some(defectuosos),
                    fecha_registro_p: Some(fecha),
                })
            }
            _ => Err(errors),
        }
    }
}

#[component]
pub fn ProduccionPage() -> impl IntoView {
    let id = use_route_id();

    view! {
        <RequireCapability capability=Capability::ViewProduccion>
            {move || match id.get() {
                Some(id_lote) => view! { <ProduccionView id_lote=id_lote/> }.into_any(),
                None => view! { <p class="page__empty">"Lote no válido."</p> }.into_any(),
            }}
        </RequireCapability>
    }
}

#[component]
fn ProduccionView(id_lote: i64) -> impl IntoView {
    let page = use_page();
    let (session, client, ui) = (page.session, page.client, page.ui);

    let lote = RwSignal::new(None::<Lote>);
    let historial = RwSignal::new(Vec::<Produccion>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0_u32);
    let order = RwSignal::new(SortOrder::Desc);
    let current = RwSignal::new(1_usize);

    let cant_cajas = RwSignal::new(String::new());
    let cant_cartones = RwSignal::new(String::new());
    let cant_sueltos = RwSignal::new(String::new());
    let defectuosos = RwSignal::new(String::new());
    let fecha = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::default());
    let editing = RwSignal::new(None::<i64>);
    let open = RwSignal::new(false);

    Effect::new(move || {
        spawn_request(ui, async move {
            lote.set(api::get_lote(client, id_lote).await?);
            Ok(())
        });
    });

    Effect::new(move || {
        reload.track();
        spawn_request(ui, async move {
            let result = api::list_produccion(client, id_lote).await;
            loading.set(false);
            historial.set(result?);
            Ok(())
        });
    });

    // A new sort order starts again from page 1.
    Effect::new(move || {
        order.track();
        current.set(1);
    });

    let dado_de_baja = move || lote.with(|l| l.as_ref().is_some_and(|l| l.estado_baja));
    let can_edit = move || session.allows(Capability::ManageProduccion) && !dado_de_baja();

    let sorted = Memo::new(move |_| {
        let mut rows = historial.get();
        sort_by_date(&mut rows, order.get(), |p| p.fecha_registro_p.as_str());
        rows
    });
    let pages = Signal::derive(move || total_pages(sorted.with(Vec::len), PAGE_SIZE));

    let fill = move |inputs: ProduccionInputs, id: Option<i64>| {
        cant_cajas.set(inputs.cant_cajas);
        cant_cartones.set(inputs.cant_cartones);
        cant_sueltos.set(inputs.cant_sueltos);
        defectuosos.set(inputs.defectuosos);
        fecha.set(inputs.fecha_registro_p);
        errors.set(FormErrors::default());
        editing.set(id);
        open.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let inputs = ProduccionInputs {
            cant_cajas: cant_cajas.get_untracked(),
            cant_cartones: cant_cartones.get_untracked(),
            cant_sueltos: cant_sueltos.get_untracked(),
            defectuosos: defectuosos.get_untracked(),
            fecha_registro_p: fecha.get_untracked(),
        };
        match inputs.validate(editing.get_untracked(), id_lote) {
            Ok(payload) => spawn_request(ui, async move {
                if payload.id_prod.is_some() {
                    api::update_produccion(client, &payload).await?;
                } else {
                    api::create_produccion(client, &payload).await?;
                }
                open.set(false);
                reload.update(|n| *n += 1);
                Ok(())
            }),
            Err(e) => errors.set(e),
        }
    };

    view! {
        <section class="page produccion-page">
            <LoteNav title="Historial de Producción" id_lote=id_lote lote=lote/>
            <div class="page__toolbar">
                <button class="btn" on:click=move |_| order.update(|o| *o = o.toggled())>
                    {move || if order.get() == SortOrder::Desc { "Más recientes primero" } else { "Más antiguos primero" }}
                </button>
                <Show when=move || session.allows(Capability::ManageProduccion)>
                    <button
                        class="btn btn--primary"
                        disabled=dado_de_baja
                        on:click=move |_| fill(ProduccionInputs::default(), None)
                    >
                        "Agregar Producción"
                    </button>
                </Show>
            </div>

            <Show when=move || open.get() && can_edit()>
                <form class="entity-form" on:submit=on_submit>
                    <h3>{move || if editing.get().is_some() { "Actualizar Producción" } else { "Agregar Producción" }}</h3>
                    <Field label="Cajas" name="cant_cajas" value=cant_cajas errors=errors input_type="number"/>
                    <Field label="Cartones" name="cant_cartones" value=cant_cartones errors=errors input_type="number"/>
                    <Field label="Sueltos" name="cant_sueltos" value=cant_sueltos errors=errors input_type="number"/>
                    <Field label="Defectuosos" name="defectuosos" value=defectuosos errors=errors input_type="number"/>
                    <Field label="Fecha de registro" name="fecha_registro_p" value=fecha errors=errors input_type="date"/>
                    <div class="entity-form__actions">
                        <button class="btn btn--primary" type="submit">"Guardar"</button>
                        <button class="btn" type="button" on:click=move |_| open.set(false)>
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando producción..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Fecha"</th>
                            <th>"Cajas"</th>
                            <th>"Cartones"</th>
                            <th>"Sueltos"</th>
                            <th>"Defectuosos"</th>
                            <th>"Total"</th>
                            <Show when=can_edit>
                                <th>"Acciones"</th>
                            </Show>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = sorted.get();
                            paginate(&rows, Page::clamped(current.get(), PAGE_SIZE, rows.len()))
                                .iter()
                                .cloned()
                                .map(|p| {
                                    let inputs = ProduccionInputs::from_produccion(&p);
                                    let id = p.id_prod;
                                    view! {
                                        <tr>
                                            <td>{format_date(&p.fecha_registro_p)}</td>
                                            <td>{p.cant_cajas}</td>
                                            <td>{p.cant_cartones}</td>
                                            <td>{p.cant_sueltos}</td>
                                            <td>{p.defectuosos}</td>
                                            <td>{p.cant_total}</td>
                                            <Show when=can_edit>
                                                <td>
                                                    <button
                                                        class="btn"
                                                        on:click={
                                                            let inputs = inputs.clone();
                                                            move |_| fill(inputs.clone(), Some(id))
                                                        }
                                                    >
                                                        "Editar"
                                                    </button>
                                                </td>
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
        </section>
    }
}
