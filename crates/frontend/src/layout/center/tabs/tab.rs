use crate::layout::global_context::{AppGlobalContext, Tab as TabData, HOME_PAGE};
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn Tab(tab: TabData) -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let key = StoredValue::new(tab.key.clone());
    let is_active = Memo::new(move |_| {
        key.with_value(|k| tabs_store.active.with(|a| a.as_deref() == Some(k.as_str())))
    });
    let closable = tab.key != HOME_PAGE;

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        key.with_value(|k| tabs_store.close_tab(k));
    };

    view! {
        <div
            class="tabs__tab"
            class:tabs__tab--active=move || is_active.get()
            on:click=move |_| key.with_value(|k| tabs_store.activate_tab(k))
        >
            <span>{tab.title}</span>
            {closable.then(|| view! {
                <button class="tabs__close" title="ปิด" on:click=on_close>{icon("x")}</button>
            })}
        </div>
    }
}
