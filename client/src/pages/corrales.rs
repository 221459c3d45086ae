//! Corral inventory: searchable, sortable, paginated table.
//!
//! A corral holding an active lote is marked in use and cannot be disabled.

#[cfg(test)]
#[path = "corrales_test.rs"]
mod corrales_test;

use std::cmp::Ordering;

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::components::field::{CheckField, Field};
use crate::components::pagination::Pagination;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{Corral, CorralPayload, Lote};
use crate::util::form::{FormErrors, parse_count, required_text};
use crate::util::listing::{Page, SortOrder, matches_search, paginate, total_pages};

use super::{spawn_request, use_page};

const PAGE_SIZE: usize = 10;

/// Order by the numeric value of `num_corral`; non-numeric codes go last.
pub(crate) fn sort_corrales(corrales: &mut [Corral], order: SortOrder) {
    corrales.sort_by(|a, b| {
        match (a.num_corral.trim().parse::<i64>().ok(), b.num_corral.trim().parse::<i64>().ok()) {
            (Some(x), Some(y)) => match order {
                SortOrder::Asc => x.cmp(&y),
                SortOrder::Desc => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.num_corral.cmp(&b.num_corral),
        }
    });
}

pub(crate) fn corral_in_use(lotes: &[Lote], id_corral: i64) -> bool {
    lotes.iter().any(|l| l.id_corral == id_corral && !l.estado_baja)
}

fn yes_no(value: bool) -> &'static str {
    if value { "Sí" } else { "No" }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CorralInputs {
    pub num_corral: String,
    pub capacidad: String,
    pub alto: String,
    pub ancho: String,
    pub largo: String,
    pub agua: bool,
    pub comederos: String,
    pub bebederos: String,
    pub ponederos: String,
}

impl CorralInputs {
    pub(crate) fn from_corral(c: &Corral) -> Self {
        Self {
            num_corral: c.num_corral.clone(),
            capacidad: c.capacidad.to_string(),
            alto: c.alto.to_string(),
            ancho: c.ancho.to_string(),
            largo: c.largo.to_string(),
            agua: c.agua,
            comederos: c.comederos.to_string(),
            bebederos: c.bebederos.to_string(),
            ponederos: c.ponederos.to_string(),
        }
    }

    /// New corrales start enabled; edits keep `estado`.
    pub(crate) fn validate(&self, id_corral: Option<i64>, estado: bool) -> Result<CorralPayload, FormErrors> {
        let mut errors = FormErrors::default();
        let num_corral = errors.check("num_corral", required_text(&self.num_corral));
        let capacidad = errors.check("capacidad", parse_count(&self.capacidad));
        let alto = errors.check("alto", parse_count(&self.alto));
        let ancho = errors.check("ancho", parse_count(&self.ancho));
        let largo = errors.check("largo", parse_count(&self.largo));
        let comederos = errors.check("comederos", parse_count(&self.comederos));
        let bebederos = errors.check("bebederos", parse_count(&self.bebederos));
        let ponederos = errors.check("ponederos", parse_count(&self.ponederos));
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CorralPayload {
            id_corral,
            num_corral: num_corral.unwrap_or_default(),
            capacidad: capacidad.unwrap_or_default(),
            alto: alto.unwrap_or_default(),
            ancho: ancho.unwrap_or_default(),
            largo: largo.unwrap_or_default(),
            agua: self.agua,
            comederos: comederos.unwrap_or_default(),
            bebederos: bebederos.unwrap_or_default(),
            ponederos: ponederos.unwrap_or_default(),
            estado,
        })
    }
}

#[derive(Clone, Copy)]
struct CorralForm {
    num_corral: RwSignal<String>,
    capacidad: RwSignal<String>,
    alto: RwSignal<String>,
    ancho: RwSignal<String>,
    largo: RwSignal<String>,
    agua: RwSignal<bool>,
    comederos: RwSignal<String>,
    bebederos: RwSignal<String>,
    ponederos: RwSignal<String>,
    errors: RwSignal<FormErrors>,
    editing: RwSignal<Option<(i64, bool)>>,
    open: RwSignal<bool>,
}

impl CorralForm {
    fn new() -> Self {
        Self {
            num_corral: RwSignal::new(String::new()),
            capacidad: RwSignal::new(String::new()),
            alto: RwSignal::new(String::new()),
            ancho: RwSignal::new(String::new()),
            largo: RwSignal::new(String::new()),
            agua: RwSignal::new(false),
            comederos: RwSignal::new(String::new()),
            bebederos: RwSignal::new(String::new()),
            ponederos: RwSignal::new(String::new()),
            errors: RwSignal::new(FormErrors::default()),
            editing: RwSignal::new(None),
            open: RwSignal::new(false),
        }
    }

    fn fill(&self, inputs: CorralInputs, editing: Option<(i64, bool)>) {
        self.num_corral.set(inputs.num_corral);
        self.capacidad.set(inputs.capacidad);
        self.alto.set(inputs.alto);
        self.ancho.set(inputs.ancho);
        self.largo.set(inputs.largo);
        self.agua.set(inputs.agua);
        self.comederos.set(inputs.comederos);
        self.bebederos.set(inputs.bebederos);
        self.ponederos.set(inputs.ponederos);
        self.errors.set(FormErrors::default());
        self.editing.set(editing);
        self.open.set(true);
    }

    fn inputs(&self) -> CorralInputs {
        CorralInputs {
            num_corral: self.num_corral.get_untracked(),
            capacidad: self.capacidad.get_untracked(),
            alto: self.alto.get_untracked(),
            ancho: self.ancho.get_untracked(),
            largo: self.largo.get_untracked(),
            agua: self.agua.get_untracked(),
            comederos: self.comederos.get_untracked(),
            bebederos: self.bebederos.get_untracked(),
            ponederos: self.ponederos.get_untracked(),
        }
    }
}

#[component]
pub fn CorralesPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ViewCorrales>
            <CorralesView/>
        </RequireCapability>
    }
}

#[component]
fn CorralesView() -> impl IntoView {
    let page = use_page();
    let (session, client, ui) = (page.session, page.client, page.ui);

    let corrales = RwSignal::new(Vec::<Corral>::new());
    let lotes = RwSignal::new(Vec::<Lote>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0_u32);
    let search = RwSignal::new(String::new());
    let order = RwSignal::new(SortOrder::Asc);
    let current = RwSignal::new(1_usize);
    let form = CorralForm::new();

    Effect::new(move || {
        reload.track();
        spawn_request(ui, async move {
            let result = api::list_corrales(client).await;
            loading.set(false);
            corrales.set(result?);
            lotes.set(api::list_lotes(client, false).await?);
            Ok(())
        });
    });

    let can_manage = move || session.allows(Capability::ManageCorrales);
    let refresh = move || reload.update(|n| *n += 1);

    let visible = Memo::new(move |_| {
        let needle = search.get();
        let mut rows: Vec<Corral> =
            corrales.get().into_iter().filter(|c| matches_search(&c.num_corral, &needle)).collect();
        sort_corrales(&mut rows, order.get());
        rows
    });
    let active = Memo::new(move |_| visible.get().into_iter().filter(|c| c.estado).collect::<Vec<_>>());
    let inactive = Memo::new(move |_| visible.get().into_iter().filter(|c| !c.estado).collect::<Vec<_>>());
    let pages = Signal::derive(move || total_pages(active.with(Vec::len), PAGE_SIZE));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (id, estado) = form.editing.get_untracked().map_or((None, true), |(id, estado)| (Some(id), estado));
        match form.inputs().validate(id, estado) {
            Ok(payload) => spawn_request(ui, async move {
                if payload.id_corral.is_some() {
                    api::update_corral(client, &payload).await?;
                } else {
                    api::create_corral(client, &payload).await?;
                }
                form.open.set(false);
                refresh();
                Ok(())
            }),
            Err(errors) => form.errors.set(errors),
        }
    };

    let set_estado = move |id: i64, estado: bool| {
        spawn_request(ui, async move {
            api::set_corral_estado(client, id, estado).await?;
            refresh();
            Ok(())
        });
    };

    let row = move |corral: Corral| {
        let in_use = lotes.with(|l| corral_in_use(l, corral.id_corral));
        let id = corral.id_corral;
        let estado = corral.estado;
        let edit_source = corral.clone();
        view! {
            <tr class:table__row--in-use=in_use>
                <td>{corral.num_corral}</td>
                <td>{corral.capacidad}</td>
                <td>{format!("{} x {} x {}", corral.alto, corral.ancho, corral.largo)}</td>
                <td>{yes_no(corral.agua)}</td>
                <td>{corral.comederos}</td>
                <td>{corral.bebederos}</td>
                <td>{corral.ponederos}</td>
                <td>{if in_use { "En uso" } else { "Libre" }}</td>
                <Show when=can_manage>
                    <td class="table__actions">
                        <button
                            class="btn"
                            on:click={
                                let corral = edit_source.clone();
                                move |_| form.fill(CorralInputs::from_corral(&corral), Some((corral.id_corral, corral.estado)))
                            }
                        >
                            "Editar"
                        </button>
                        <button class="btn" disabled=in_use on:click=move |_| set_estado(id, !estado)>
                            {if estado { "Deshabilitar" } else { "Habilitar" }}
                        </button>
                    </td>
                </Show>
            </tr>
        }
    };

    view! {
        <section class="page corrales-page">
            <header class="page__header">
                <h2>"Corrales"</h2>
                <input
                    class="page__search"
                    type="search"
                    placeholder="Buscar corral"
                    prop:value=move || search.get()
                    on:input=move |ev| {
                        search.set(event_target_value(&ev));
                        current.set(1);
                    }
                />
                <Show when=can_manage>
                    <button class="btn btn--primary" on:click=move |_| form.fill(CorralInputs::default(), None)>
                        "Agregar Corral"
                    </button>
                </Show>
            </header>

            <Show when=move || form.open.get() && can_manage()>
                <form class="entity-form" on:submit=on_submit>
                    <Field label="Número de corral" name="num_corral" value=form.num_corral errors=form.errors/>
                    <Field label="Capacidad" name="capacidad" value=form.capacidad errors=form.errors input_type="number"/>
                    <Field label="Alto" name="alto" value=form.alto errors=form.errors input_type="number"/>
                    <Field label="Ancho" name="ancho" value=form.ancho errors=form.errors input_type="number"/>
                    <Field label="Largo" name="largo" value=form.largo errors=form.errors input_type="number"/>
                    <CheckField label="Agua" value=form.agua/>
                    <Field label="Comederos" name="comederos" value=form.comederos errors=form.errors input_type="number"/>
                    <Field label="Bebederos" name="bebederos" value=form.bebederos errors=form.errors input_type="number"/>
                    <Field label="Ponederos" name="ponederos" value=form.ponederos errors=form.errors input_type="number"/>
                    <div class="entity-form__actions">
                        <button class="btn btn--primary" type="submit">"Guardar"</button>
                        <button class="btn" type="button" on:click=move |_| form.open.set(false)>
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando corrales..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th class="table__sortable" on:click=move |_| order.update(|o| *o = o.toggled())>
                                "Corral "
                                {move || if order.get() == SortOrder::Asc { "▲" } else { "▼" }}
                            </th>
                            <th>"Capacidad"</th>
                            <th>"Medidas"</th>
                            <th>"Agua"</th>
                            <th>"Comederos"</th>
                            <th>"Bebederos"</th>
                            <th>"Ponederos"</th>
                            <th>"Uso"</th>
                            <Show when=can_manage>
                                <th>"Acciones"</th>
                            </Show>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = active.get();
                            paginate(&rows, Page::clamped(current.get(), PAGE_SIZE, rows.len()))
                                .iter()
                                .cloned()
                                .map(row)
                                .collect_view()
                        }}
                    </tbody>
                </table>
                <Pagination page=current total=pages/>

                <Show when=move || !inactive.with(Vec::is_empty)>
                    <h3>"Corrales deshabilitados"</h3>
                    <table class="table table--muted">
                        <tbody>{move || inactive.get().into_iter().map(row).collect_view()}</tbody>
                    </table>
                </Show>
            </Show>
        </section>
    }
}
