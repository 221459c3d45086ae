//! Breed catalogue.

use leptos::prelude::*;

use crate::auth::policy::Capability;
use crate::components::field::Field;
use crate::components::pagination::Pagination;
use crate::components::require_auth::RequireCapability;
use crate::net::api;
use crate::net::types::{Raza, RazaPayload};
use crate::util::form::{FormErrors, required_text};
use crate::util::listing::{Page, paginate, total_pages};

use super::{spawn_request, use_page};

const PAGE_SIZE: usize = 10;

#[derive(Clone, Copy)]
struct RazaForm {
    raza: RwSignal<String>,
    origen: RwSignal<String>,
    color: RwSignal<String>,
    color_h: RwSignal<String>,
    caract_espec: RwSignal<String>,
    errors: RwSignal<FormErrors>,
    editing: RwSignal<Option<i64>>,
    open: RwSignal<bool>,
}

impl RazaForm {
    fn new() -> Self {
        Self {
            raza: RwSignal::new(String::new()),
            origen: RwSignal::new(String::new()),
            color: RwSignal::new(String::new()),
            color_h: RwSignal::new(String::new()),
            caract_espec: RwSignal::new(String::new()),
            errors: RwSignal::new(FormErrors::default()),
            editing: RwSignal::new(None),
            open: RwSignal::new(false),
        }
    }

    fn fill(&self, raza: Option<&Raza>) {
        let text = |f: fn(&Raza) -> &String| raza.map(f).cloned().unwrap_or_default();
        self.raza.set(text(|r| &r.raza));
        self.origen.set(text(|r| &r.origen));
        self.color.set(text(|r| &r.color));
        self.color_h.set(text(|r| &r.color_h));
        self.caract_espec.set(text(|r| &r.caract_espec));
        self.errors.set(FormErrors::default());
        self.editing.set(raza.map(|r| r.id_raza));
        self.open.set(true);
    }

    fn validate(&self) -> Result<RazaPayload, FormErrors> {
        let mut errors = FormErrors::default();
        let raza = errors.check("raza", required_text(&self.raza.get_untracked()));
        let origen = errors.check("origen", required_text(&self.origen.get_untracked()));
        let color = errors.check("color", required_text(&self.color.get_untracked()));
        let color_h = errors.check("color_h", required_text(&self.color_h.get_untracked()));
        let caract_espec = errors.check("caract_espec", required_text(&self.caract_espec.get_untracked()));
        match (raza, origen, color, color_h, caract_espec) {
            (Some(raza), Some(origen), Some(color), Some(color_h), Some(caract_espec)) => Ok(RazaPayload {
                id_raza: self.editing.get_untracked(),
                raza,
                origen,
                color,
                color_h,
                caract_espec,
            }),
            _ => Err(errors),
        }
    }
}

#[component]
pub fn RazasPage() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ManageRazas>
            <RazasView/>
        </RequireCapability>
    }
}

#[component]
fn RazasView() -> impl IntoView {
    let page = use_page();
    let (client, ui) = (page.client, page.ui);

    let razas = RwSignal::new(Vec::<Raza>::new());
    let loading = RwSignal::new(true);
    let reload = RwSignal::new(0_u32);
    let current = RwSignal::new(1_usize);
    let form = RazaForm::new();

    Effect::new(move || {
        reload.track();
        spawn_request(ui, async move {
            let result = api::list_razas(client).await;
            loading.set(false);
            razas.set(result?);
            Ok(())
        });
    });

    let pages = Signal::derive(move || total_pages(razas.with(Vec::len), PAGE_SIZE));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match form.validate() {
            Ok(payload) => spawn_request(ui, async move {
                if payload.id_raza.is_some() {
                    api::update_raza(client, &payload).await?;
                } else {
                    api::create_raza(client, &payload).await?;
                }
                form.open.set(false);
                reload.update(|n| *n += 1);
                Ok(())
            }),
            Err(errors) => form.errors.set(errors),
        }
    };

    view! {
        <section class="page razas-page">
            <header class="page__header">
                <h2>"Razas"</h2>
                <button class="btn btn--primary" on:click=move |_| form.fill(None)>
                    "Agregar Raza"
                </button>
            </header>

            <Show when=move || form.open.get()>
                <form class="entity-form" on:submit=on_submit>
                    <Field label="Raza" name="raza" value=form.raza errors=form.errors/>
                    <Field label="Origen" name="origen" value=form.origen errors=form.errors/>
                    <Field label="Color" name="color" value=form.color errors=form.errors/>
                    <Field label="Color del huevo" name="color_h" value=form.color_h errors=form.errors/>
                    <Field label="Características" name="caract_espec" value=form.caract_espec errors=form.errors/>
                    <div class="entity-form__actions">
                        <button class="btn btn--primary" type="submit">"Guardar"</button>
                        <button class="btn" type="button" on:click=move |_| form.open.set(false)>
                            "Cancelar"
                        </button>
                    </div>
                </form>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <p class="page__loading">"Cargando razas..."</p> }>
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Raza"</th>
                            <th>"Origen"</th>
                            <th>"Color"</th>
                            <th>"Color del huevo"</th>
                            <th>"Características"</th>
                            <th>"Estado"</th>
                            <th>"Acciones"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let rows = razas.get();
                            paginate(&rows, Page::clamped(current.get(), PAGE_SIZE, rows.len()))
                                .iter()
                                .cloned()
                                .map(|raza| {
                                    let source = raza.clone();
                                    view! {
                                        <tr>
                                            <td>{raza.raza}</td>
                                            <td>{raza.origen}</td>
                                            <td>{raza.color}</td>
                                            <td>{raza.color_h}</td>
                                            <td>{raza.caract_espec}</td>
                                            <td>{if raza.estado { "Activa" } else { "Inactiva" }}</td>
                                            <td>
                                                <button class="btn" on:click=move |_| form.fill(Some(&source))>
                                                    "Editar"
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
