//! Date range inputs and sort toggle shared by the history screens.

use leptos::prelude::*;

use crate::util::listing::{DateRange, SortOrder};

/// Filter state owned by the page.
#[derive(Clone, Copy)]
pub struct DateFilter {
    pub start: RwSignal<String>,
    pub end: RwSignal<String>,
    pub order: RwSignal<SortOrder>,
}

impl DateFilter {
    pub fn new() -> Self {
        Self {
            start: RwSignal::new(String::new()),
            end: RwSignal::new(String::new()),
            order: RwSignal::new(SortOrder::default()),
        }
    }

    /// Subscribe the current reactive scope to every filter input.
    pub fn track(&self) {
        self.start.track();
        self.end.track();
        self.order.track();
    }

    /// Reactive range built from the two inputs.
    pub fn range(&self) -> DateRange {
        DateRange::from_inputs(&self.start.get(), &self.end.get())
    }
}

impl Default for DateFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn DateFilterBar(filter: DateFilter) -> impl IntoView {
    let DateFilter { start, end, order } = filter;

    view! {
        <div class="date-filter">
            <label class="field">
                <span class="field__label">"Desde"</span>
                <input type="date" prop:value=move || start.get() on:input=move |ev| start.set(event_target_value(&ev))/>
            </label>
            <label class="field">
                <span class="field__label">"Hasta"</span>
                <input type="date" prop:value=move || end.get() on:input=move |ev| end.set(event_target_value(&ev))/>
            </label>
            <button class="btn" on:click=move |_| order.update(|o| *o = o.toggled())>
                {move || match order.get() {
                    SortOrder::Asc => "Más antiguos primero",
                    SortOrder::Desc => "Más recientes primero",
                }}
            </button>
            <button
                class="btn"
                on:click=move |_| {
                    start.set(String::new());
                    end.set(String::new());
                }
            >
                "Limpiar"
            </button>
        </div>
    }
}
