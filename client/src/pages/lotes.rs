//! Lote management: active lotes as cards, dados de baja as a table.
//!
//! SYSTEM CONTEXT
//! ==============
//! Entry point to the per-lote screens. Each active card carries a
//! destination select (producción, clasificación, estado) filtered by the
//! caller's capabilities. Only `ManageLotes` may create, edit, delete, dar
//! de baja, or reactivate.

#[cfg(test)]
#[path = "lotes_test.rs"]
mod lotes_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::auth::policy::{Capability, lote_destinations};
use crate::components::field::{Field, SelectField};
use crate::net::api;
use crate::net::types::{Corral, Lote, LotePayload, Raza};
use crate::util::form::{FormErrors, alphanumeric_text, parse_choice, parse_positive, required_date};
use crate::util::listing::{format_date, input_date};

use super::{spawn_request, use_page};

/// Raw lote form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LoteInputs {
    pub num_lote: String,
    pub cantidad_g: String,
    pub id_raza: String,
    pub fecha_adq: String,
    pub id_corral: String,
}

impl LoteInputs {
    pub(crate) fn from_lote(lote: &Lote) -> Self {
        Self {
            num_lote: lote.num_lote.clone(),
            cantidad_g: lote.cantidad_g.to_string(),
            id_raza: lote.id_raza.to_string(),
            fecha_adq: input_date(&lote.fecha_adq),
            id_corral: lote.id_corral.to_string(),
        }
    }

    pub(crate) fn validate(&self, id_lote: Option<i64>) -> Result<LotePayload, FormErrors> {
        let mut errors = FormErrors::default();
        let num_lote = errors.check("num_lote", alphanumeric_text(&self.num_lote));
        let cantidad_g = errors.check("cantidad_g", parse_positive(&self.cantidad_g));
        let id_raza = errors.check("id_raza", parse_choice(&self.id_raza));
        let fecha_adq = errors.check("fecha_adq", required_date(&self.fecha_adq));
        let id_corral = errors.check("id_corral", parse_choice(&self.id_corral));
        match (num_lote, cantidad_g, id_raza, fecha_adq, id_corral) {
            (Some(num_lote), Some(cantidad_g), Some(id_raza), Some(fecha_adq), Some(id_corral)) => {
                Ok(LotePayload { id_lote, num_lote, cantidad_g, id_raza, fecha_adq, id_corral })
            }
            _ => Err(errors),
        }
    }
}

/// Corrales a lote may be placed in: enabled, and not holding another
/// active lote unless it is the one being edited.
pub(crate) fn available_corrales(corrales: &[Corral], lotes: &[Lote], editing: Option<i64>) -> Vec<(String, String)> {
    corrales
        .iter()
        .filter(|c| c.estado)
        .filter(|c| lotes.iter().all(|l| l.id_corral != c.id_corral || Some(l.id_lote) == editing))
        .map(|c| (c.id_corral.to_string(), c.num_corral.clone()))
        .collect()
}

pub(crate) fn raza_name(razas: &[Raza], id_raza: i64) -> String {
    razas.iter().find(|r| r.id_raza == id_raza).map_or_else(|| "-".to_owned(), |r| r.raza.clone())
}

#[derive(Clone, Copy)]
struct LoteForm {
    num_lote: RwSignal<String>,
    cantidad_g: RwSignal<String>,
    id_raza: RwSignal<String>,
    fecha_adq: RwSignal<String>,
    id_corral: RwSignal<String>,
    errors: RwSignal<FormErrors>,
    editing: RwSignal<Option<i64>>,
    open: RwSignal<bool>,
}

impl LoteForm {
    fn new() -> Self {
        Self {
            num_lote: RwSignal::new(String::new()),
            cantidad_g: RwSignal::new(String::new()),
            id_raza: RwSignal::new(String::new()),
            fecha_adq: RwSignal::new(String::new()),
            id_corral: RwSignal::new(String::new()),
            errors: RwSignal::new(FormErrors::default()),
            editing: RwSignal::new(None),
            open: RwSignal::new(false),
        }
    }

    fn fill(&self, inputs: LoteInputs, editing: Option<i64>) {
        self.num_lote.set(inputs.num_lote);
        self.cantidad_g.set(inputs.cantidad_g);
        self.id_raza.set(inputs.id_raza);
        self.fecha_adq.set(inputs.fecha_adq);
        self.id_corral.set(inputs.id_corral);
        self.errors.set(FormErrors::default());
        self.editing.set(editing);
    }

    fn inputs(&self) -> LoteInputs {
        LoteInputs {
            num_lote: self.num_lote.get_untracked(),
            cantidad_g: self.cantidad_g.get_untracked(),
            id_raza: self.id_raza.get_untracked(),
            fecha_adq: self.fecha_adq.get_untracked(),
            id_corral: self.id_corral.get_untracked(),
        }
    }
}

#[component]
pub fn LotesPage() -> impl IntoView {
    let page = use_page();
    let (session, client, ui) = (page.session, page.client, page.ui);
    let navigate = use_navigate();

    let activos = RwSignal::new(Vec::<Lote>::new());
    let de_baja = RwSignal::new(Vec::<Lote>::new());
    let razas = RwSignal::new(Vec::<Raza>::new());
    let corrales = RwSignal::new(Vec::<Corral>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0_u32);
    let form = LoteForm::new();

    Effect::new(move || {
        reload.track();
        loading.set(true);
        spawn_request(ui, async move {
            let result = api::list_lotes(client, false).await;
            loading.set(false);
            activos.set(result?);
            de_baja.set(api::list_lotes(client, true).await?);
            Ok(())
        });
    });

    Effect::new(move || {
        spawn_request(ui, async move {
            razas.set(api::list_razas(client).await?.into_iter().filter(|r| r.estado).collect());
            corrales.set(api::list_corrales(client).await?);
            Ok(())
        });
    });

    let can_manage = move || session.allows(Capability::ManageLotes);
    let refresh = move || reload.update(|n| *n += 1);

    let on_new = move |_| {
        form.fill(LoteInputs::default(), None);
        form.open.set(true);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let editing = form.editing.get_untracked();
        match form.inputs().validate(editing) {
            Ok(payload) => {
                form.errors.set(FormErrors::default());
                spawn_request(ui, async move {
                    if payload.id_lote.is_some() {
                        api::update_lote(client, &payload).await?;
                    } else {
                        api::create_lote(client, &payload).await?;
                    }
                    form.open.set(false);
                    refresh();
                    Ok(())
                });
            }
            Err(errors) => form.errors.set(errors),
        }
    };

    let raza_options = Signal::derive(move || {
        razas.get().into_iter().map(|r| (r.id_raza.to_string(), r.raza)).collect::<Vec<_>>()
    });
    let corral_options = Signal::derive(move || {
        activos.with(|lotes| corrales.with(|all| available_corrales(all, lotes, form.editing.get())))
    });

    let card = move |lote: Lote| {
        let id = lote.id_lote;
        let navigate = navigate.clone();
        let destinations = lote_destinations(&session.roles());
        let edit_source = lote.clone();
        view! {
            <div class="lote-card">
                <h3 class="lote-card__title">{format!("Lote {}", lote.num_lote)}</h3>
                <p>"Gallinas: " {lote.cantidad_gctual.unwrap_or(lote.cantidad_g)} " / " {lote.cantidad_g}</p>
                <p>"Raza: " {move || razas.with(|r| raza_name(r, lote.id_raza))}</p>
                <p>"Adquisición: " {format_date(&lote.fecha_adq)}</p>
                {(!destinations.is_empty())
                    .then(|| {
                        view! {
                            <select
                                class="lote-card__goto"
                                prop:value=""
                                on:change=move |ev| {
                                    let target = event_target_value(&ev);
                                    if !target.is_empty() {
                                        navigate(&format!("/{target}/{id}"), NavigateOptions::default());
                                    }
                                }
                            >
                                <option value="" disabled=true>"Selecciona una opción"</option>
                                {destinations
                                    .into_iter()
                                    .map(|(value, label)| view! { <option value=value>{label}</option> })
                                    .collect_view()}
                            </select>
                        }
                    })}
                <Show when=can_manage>
                    <div class="lote-card__actions">
                        <button
                            class="btn"
                            on:click={
                                let lote = edit_source.clone();
                                move |_| {
                                    form.fill(LoteInputs::from_lote(&lote), Some(lote.id_lote));
                                    form.open.set(true);
                                }
                            }
                        >
                            "Editar"
                        </button>
                        <button
                            class="btn btn--danger"
                            on:click=move |_| {
                                spawn_request(ui, async move {
                                    api::delete_lote(client, id).await?;
                                    refresh();
                                    Ok(())
                                });
                            }
                        >
                            "Eliminar"
                        </button>
                        <button
                            class="btn"
                            on:click=move |_| {
                                spawn_request(ui, async move {
                                    api::set_lote_baja(client, id, true).await?;
                                    refresh();
                                    Ok(())
                                });
                            }
                        >
                            "Dar de Baja"
                        </button>
                    </div>
                </Show>
            </div>
        }
    };

    view! {
        <section class="page lotes-page">
            <header class="page__header">
                <h2>"Lotes activos"</h2>
                <Show when=can_manage>
                    <button class="btn btn--primary" on:click=on_new>
                        "Agregar Nuevo Lote"
                    </button>
                </Show>
            </header>

            <Show when=move || form.open.get() && can_manage()>
                <form class="entity-form" on:submit=on_submit>
                    <h3>{move || if form.editing.get().is_some() { "Editar Lote" } else { "Nuevo Lote" }}</h3>
                    <Field label="Número de lote" name="num_lote" value=form.num_lote errors=form.errors/>
                    <Field
                        label="Cantidad de gallinas"
                        name="cantidad_g"
                        value=form.cantidad_g
                        errors=form.errors
                        input_type="number"
                    />
                    <SelectField label="Raza" name="id_raza" value=form.id_raza errors=form.errors options=raza_options/>
                    <Field
                        label="Fecha de adquisición"
                        name="fecha_adq"
                        value=form.fecha_adq
                        errors=form.errors
                        input_type="date"
                    />
                    <SelectField
                        label="Corral"
                        name="id_corral"
                        value=form.id_corral
                        errors=form.errors
                        options=corral_options
                    />
                    <div class="entity-form__actions">
                        <button class="btn btn--primary" type="submit">"Guardar"</button>
                        <button class="btn" type="button" on:click=move |_| form.fill(LoteInputs::default(), form.editing.get_untracked())>
                            "Limpiar"
                        </button>
                        <button class="btn" type="button" on:click=move |_| form.open.set(false)>
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando lotes..."</p> }>
                <div class="lote-grid">
                    {
                        let card = card.clone();
                        move || activos.get().into_iter().map(card.clone()).collect_view()
                    }
                </div>
            </Show>

            <h2>"Lotes dados de baja"</h2>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Lote"</th>
                        <th>"Gallinas"</th>
                        <th>"Adquisición"</th>
                        <Show when=can_manage>
                            <th>"Acciones"</th>
                        </Show>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        de_baja
                            .get()
                            .into_iter()
                            .map(|lote| {
                                let id = lote.id_lote;
                                view! {
                                    <tr>
                                        <td>{lote.num_lote}</td>
                                        <td>{lote.cantidad_g}</td>
                                        <td>{format_date(&lote.fecha_adq)}</td>
                                        <Show when=can_manage>
                                            <td>
                                                <button
                                                    class="btn"
                                                    on:click=move |_| {
                                                        spawn_request(ui, async move {
                                                            api::set_lote_baja(client, id, false).await?;
                                                            refresh();
                                                            Ok(())
                                                        });
                                                    }
                                                >
                                                    "Reactivar"
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
        </section>
    }
}
