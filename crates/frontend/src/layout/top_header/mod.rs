//! Верхняя панель: переключатель меню, название системы, пользователь и выход.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::tutorial::use_tutorial;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let tutorial = use_tutorial();

    let is_sidebar_visible = move || ctx.left_open.get();

    let logout = move |_| {
        spawn_local(async move {
            auth.sign_out().await;
            tutorial.reset();
            ctx.clear();
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "ซ่อนเมนู" } else { "แสดงเมนู" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"ระบบคลังอุปกรณ์ไอที"</span>
            </div>

            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("user")}
                    <span>{move || auth.display_name()}</span>
                    {move || auth.is_admin().then(|| view! {
                        <span class="badge badge--info">"ผู้ดูแล"</span>
                    })}
                </div>
                <button class="top-header__icon-btn" on:click=logout title="ออกจากระบบ">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
