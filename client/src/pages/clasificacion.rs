//! Egg classification history of one lote (`/clasificacion/:id`).
//!
//! DESIGN
//! ======
//! Rows are filtered by size text and by a date range over either the
//! classification date or the production date, then grouped by production
//! date. Pagination counts groups, two per page. The stock table shows what
//! each production record still has unclassified.

#[cfg(test)]
#[path = "clasificacion_test.rs"]
mod clasificacion_test;

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::components::date_filter::{DateFilter, DateFilterBar};
use crate::components::field::{Field, SelectField};
use crate::components::lote_nav::LoteNav;
use crate::components::pagination::Pagination;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{Clasificacion, ClasificacionPayload, Lote, StockLote};
use crate::util::charts::SIZE_CATEGORIES;
use crate::util::form::{FormErrors, date_input_to_api, parse_choice, parse_count, required_text};
use crate::util::listing::{
    DateRange, Page, SortOrder, format_date, group_by_date, matches_search, paginate, sort_by_date, total_pages,
};

use super::{spawn_request, use_page, use_route_id};

const GROUPS_PER_PAGE: usize = 2;

/// Which date the range filter applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum DateField {
    #[default]
    Clasificacion,
    Produccion,
}

impl DateField {
    fn of(self, row: &Clasificacion) -> &str {
        match self {
            DateField::Clasificacion => row.fecha_cla_s.as_deref().unwrap_or_default(),
            DateField::Produccion => row.fecha_registro_p.as_deref().unwrap_or_default(),
        }
    }
}

/// Filter, sort by classification date, and group by production date.
pub(crate) fn clasificacion_groups(
    rows: &[Clasificacion],
    search: &str,
    range: DateRange,
    field: DateField,
    order: SortOrder,
) -> Vec<(String, Vec<Clasificacion>)> {
    let mut selected: Vec<Clasificacion> = rows
        .iter()
        .filter(|row| matches_search(&row.tamano, search) && range.contains_raw(field.of(row)))
        .cloned()
        .collect();
    sort_by_date(&mut selected, order, |row| DateField::Clasificacion.of(row));
    group_by_date(selected, |row| DateField::Produccion.of(row))
}

pub(crate) fn validate_clasificacion(
    id: Option<i64>,
    tamano: &str,
    cajas: &str,
    cartones_extras: &str,
    huevos_sueltos: &str,
    id_prod: &str,
    fecha_cla_s: &str,
) -> Result<ClasificacionPayload, FormErrors> {
    let mut errors = FormErrors::default();
    let tamano = errors.check("tamano", required_text(tamano));
    let cajas = errors.check("cajas", parse_count(cajas));
    let cartones_extras = errors.check("cartones_extras", parse_count(cartones_extras));
    let huevos_sueltos = errors.check("huevos_sueltos", parse_count(huevos_sueltos));
    let id_prod = errors.check("id_prod", parse_choice(id_prod));
    // The classification date is fixed once recorded.
    let fecha_cla_s = if id.is_some() { Some(None) } else { errors.check("fecha_cla_s", date_input_to_api(fecha_cla_s)).map(Some) };
    match (tamano, cajas, cartones_extras, huevos_sueltos, id_prod, fecha_cla_s) {
        (Some(tamano), Some(cajas), Some(cartones_extras), Some(huevos_sueltos), Some(id_prod), Some(fecha_cla_s)) => {
            Ok(ClasificacionPayload { id, tamano, cajas, cartones_extras, huevos_sueltos, id_prod, fecha_cla_s })
        }
        _ => Err(errors),
    }
}

#[component]
pub fn ClasificacionPage() -> impl IntoView {
    let id = use_route_id();

    view! {
        <RequireCapability capability=Capability::ViewClasificacion>
            {move || match id.get() {
                Some(id_lote) => view! { <ClasificacionView id_lote=id_lote/> }.into_any(),
                None => view! { <p class="page__empty">"Lote no válido."</p> }.into_any(),
            }}
        </RequireCapability>
    }
}

#[component]
fn ClasificacionView(id_lote: i64) -> impl IntoView {
    let page = use_page();
    let (session, client, ui) = (page.session, page.client, page.ui);

    let lote = RwSignal::new(None::<Lote>);
    let rows = RwSignal::new(Vec::<Clasificacion>::new());
    let stock = RwSignal::new(Vec::<StockLote>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0_u32);
    let search = RwSignal::new(String::new());
    let field = RwSignal::new(DateField::default());
    let filter = DateFilter::new();
    let current = RwSignal::new(1_usize);

    let tamano = RwSignal::new(String::new());
    let cajas = RwSignal::new(String::new());
    let cartones = RwSignal::new(String::new());
    let sueltos = RwSignal::new(String::new());
    let id_prod = RwSignal::new(String::new());
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
            let result = api::list_clasificacion(client, id_lote).await;
            loading.set(false);
            rows.set(result?);
            stock.set(api::view_stock(client, id_lote).await?);
            Ok(())
        });
    });

    let dado_de_baja = move || lote.with(|l| l.as_ref().is_some_and(|l| l.estado_baja));
    let can_edit = move || session.allows(Capability::ManageClasificacion) && !dado_de_baja();

    // Any narrowing of the list starts again from page 1.
    Effect::new(move || {
        search.track();
        field.track();
        filter.track();
        current.set(1);
    });

    let groups = Memo::new(move |_| {
        rows.with(|r| clasificacion_groups(r, &search.get(), filter.range(), field.get(), filter.order.get()))
    });
    let pages = Signal::derive(move || total_pages(groups.with(Vec::len), GROUPS_PER_PAGE));

    let size_options = Signal::derive(|| SIZE_CATEGORIES.iter().map(|s| ((*s).to_owned(), (*s).to_owned())).collect::<Vec<_>>());
    let prod_options = Signal::derive(move || {
        stock
            .get()
            .into_iter()
            .map(|s| (s.id_produccion.to_string(), format!("{} ({} disponibles)", format_date(&s.fecha_produ), s.stock_restante)))
            .collect::<Vec<_>>()
    });

    let fill = move |row: Option<&Clasificacion>| {
        tamano.set(row.map(|r| r.tamano.clone()).unwrap_or_default());
        cajas.set(row.map_or_else(String::new, |r| r.cajas.to_string()));
        cartones.set(row.map_or_else(String::new, |r| r.cartones_extras.to_string()));
        sueltos.set(row.map_or_else(String::new, |r| r.huevos_sueltos.to_string()));
        id_prod.set(row.map_or_else(String::new, |r| r.id_prod.to_string()));
        fecha.set(String::new());
        errors.set(FormErrors::default());
        editing.set(row.map(|r| r.id));
        open.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let result = validate_clasificacion(
            editing.get_untracked(),
            &tamano.get_untracked(),
            &cajas.get_untracked(),
            &cartones.get_untracked(),
            &sueltos.get_untracked(),
            &id_prod.get_untracked(),
            &fecha.get_untracked(),
        );
        match result {
            Ok(payload) => spawn_request(ui, async move {
                if payload.id.is_some() {
                    api::update_clasificacion(client, &payload).await?;
                } else {
                    api::create_clasificacion(client, &payload).await?;
                }
                open.set(false);
                reload.update(|n| *n += 1);
                Ok(())
            }),
            Err(e) => errors.set(e),
        }
    };

    view! {
        <section class="page clasificacion-page">
            <LoteNav title="Clasificación de Huevos" id_lote=id_lote lote=lote/>

            <div class="page__toolbar">
                <input
                    class="page__search"
                    type="search"
                    placeholder="Buscar por tamaño"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                    }
                />
                <select
                    on:change=move |ev| {
                        field.set(if event_target_value(&ev) == "produccion" { DateField::Produccion } else { DateField::Clasificacion });
                    }
                >
                    <option value="clasificacion">"Fecha de clasificación"</option>
                    <option value="produccion">"Fecha de producción"</option>
                </select>
                <DateFilterBar filter=filter/>
                <Show when=can_edit>
                    <button class="btn btn--primary" on:click=move |_| fill(None)>
                        "Agregar Clasificación"
                    </button>
                </Show>
            </div>

            <Show when=move || open.get() && can_edit()>
                <form class="entity-form" on:submit=on_submit>
                    <SelectField label="Tamaño" name="tamano" value=tamano errors=errors options=size_options/>
                    <Field label="Cajas" name="cajas" value=cajas errors=errors input_type="number"/>
                    <Field label="Cartones extra" name="cartones_extras" value=cartones errors=errors input_type="number"/>
                    <Field label="Huevos sueltos" name="huevos_sueltos" value=sueltos errors=errors input_type="number"/>
                    <SelectField label="Producción" name="id_prod" value=id_prod errors=errors options=prod_options/>
                    <Show when=move || editing.get().is_none()>
                        <Field label="Fecha de clasificación" name="fecha_cla_s" value=fecha errors=errors input_type="date"/>
                    </Show>
                    <div class="entity-form__actions">
                        <button class="btn btn--primary" type="submit">"Guardar"</button>
                        <button class="btn" type="button" on:click=move |_| open.set(false)>
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando clasificación..."</p> }>
                {move || {
                    let all = groups.get();
                    paginate(&all, Page::clamped(current.get(), GROUPS_PER_PAGE, all.len()))
                        .iter()
                        .cloned()
                        .map(|(fecha_prod, items)| {
                            view! {
                                <div class="group">
                                    <h3 class="group__title">"Producción del " {fecha_prod}</h3>
                                    <table class="table">
                                        <thead>
                                            <tr>
                                                <th>"Tamaño"</th>
                                                <th>"Cajas"</th>
                                                <th>"Cartones"</th>
                                                <th>"Sueltos"</th>
                                                <th>"Total"</th>
                                                <th>"Clasificado"</th>
                                                <Show when=can_edit>
                                                    <th>"Acciones"</th>
                                                </Show>
                                            </tr>
                                        </thead>
                                        <tbody>
                                            {items
                                                .into_iter()
                                                .map(|row| {
                                                    let source = row.clone();
                                                    view! {
                                                        <tr>
                                                            <td>{row.tamano}</td>
                                                            <td>{row.cajas}</td>
                                                            <td>{row.cartones_extras}</td>
                                                            <td>{row.huevos_sueltos}</td>
                                                            <td>{row.total_unitaria}</td>
                                                            <td>{format_date(row.fecha_cla_s.as_deref().unwrap_or_default())}</td>
                                                            <Show when=can_edit>
                                                                <td>
                                                                    <button
                                                                        class="btn"
                                                                        on:click={
                                                                            let source = source.clone();
                                                                            move |_| fill(Some(&source))
                                                                        }
                                                                    >
                                                                        "Editar"
                                                                    </button>
                                                                </td>
                                                            </Show>
                                                        </tr>
                                                    }
                                                })
                                                .collect_view()}
                                        </tbody>
                                    </table>
                                </div>
                            }
                        })
                        .collect_view()
                }}
                <Pagination page=current total=pages/>
            </Show>

            <h3>"Stock por producción"</h3>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Fecha"</th>
                        <th>"Producido"</th>
                        <th>"Restante"</th>
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
                                        <td>{format_date(&s.fecha_produ)}</td>
                                        <td>{s.cantidad_total_produccion}</td>
                                        <td>{s.stock_restante}</td>
                                        <td>{s.cajas_restantes}</td>
                                        <td>{s.cartones_restantes}</td>
                                        <td>{s.huevos_sueltos_restantes}</td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </section>
    }
}
