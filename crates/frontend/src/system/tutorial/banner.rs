use leptos::prelude::*;

use super::context::{use_tutorial, STEPS};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;

#[component]
pub fn TutorialBanner() -> impl IntoView {
    let tutorial = use_tutorial();
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    move || {
        let state = tutorial.state();
        let step = state.current()?;
        let is_first = state.step == 0;
        let is_last = state.is_last();
        let page = step.page;

        Some(view! {
            <div class="tutorial-banner">
                <div class="tutorial-banner__icon">{icon("help")}</div>
                <div class="tutorial-banner__body">
                    <div class="tutorial-banner__title">
                        {format!("{} ({}/{})", step.title, state.step + 1, STEPS.len())}
                    </div>
                    <div class="tutorial-banner__text">{step.text}</div>
                </div>
                <div class="tutorial-banner__actions">
                    <button
                        class="button button--secondary"
                        on:click=move |_| ctx.open_tab(page, &tab_label_for_key(page))
                    >
                        "ไปที่หน้า"
                    </button>
                    <button
                        class="button button--secondary"
                        disabled=is_first
                        on:click=move |_| tutorial.prev()
                    >
                        "ก่อนหน้า"
                    </button>
                    <button class="button button--primary" on:click=move |_| tutorial.next()>
                        {if is_last { "เสร็จสิ้น" } else { "ถัดไป" }}
                    </button>
                    <button class="icon-button" title="ปิด" on:click=move |_| tutorial.dismiss()>
                        {icon("x")}
                    </button>
                </div>
            </div>
        })
    }
}
