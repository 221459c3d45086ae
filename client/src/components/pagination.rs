//! Page selector for list screens.

use leptos::prelude::*;

use crate::util::listing::{clamp_page, page_window};

const VISIBLE_PAGES: usize = 3;

/// Previous/next buttons around a window of page numbers. `page` is
/// one-based.
#[component]
pub fn Pagination(page: RwSignal<usize>, #[prop(into)] total: Signal<usize>) -> impl IntoView {
    // Keep the selection on an existing page after the list shrinks.
    Effect::new(move || {
        let clamped = clamp_page(page.get_untracked(), total.get());
        if clamped != page.get_untracked() {
            page.set(clamped);
        }
    });
    let on_prev = move |_| page.update(|p| *p = p.saturating_sub(1).max(1));
    let on_next = move |_: leptos::ev::MouseEvent| {
        let last = total.get();
        page.update(|p| *p = (*p + 1).min(last.max(1)));
    };

    view! {
        <Show when=move || { total.get() > 1 }>
            <div class="pagination">
                <button class="btn pagination__step" disabled=move || page.get() <= 1 on:click=on_prev>
                    "Anterior"
                </button>
                {move || {
                    page_window(page.get(), total.get(), VISIBLE_PAGES)
                        .into_iter()
                        .map(|n| {
                            view! {
                                <button
                                    class="btn pagination__page"
                                    class:pagination__page--active=move || page.get() == n
                                    on:click=move |_| page.set(n)
                                >
                                    {n}
                                </button>
                            }
                        })
                        .collect_view()
                }}
                <button class="btn pagination__step" disabled=move || page.get() >= total.get() on:click=on_next>
                    "Siguiente"
                </button>
            </div>
        </Show>
    }
}
