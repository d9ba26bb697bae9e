use leptos::prelude::*;

use super::context::use_auth;
use crate::shared::icons::icon;

/// Страница только для администратора; остальным показывается заглушка
#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.is_authenticated() && auth.is_admin()
            fallback=|| view! {
                <div class="access-denied">
                    {icon("lock")}
                    <span>"หน้านี้สำหรับผู้ดูแลระบบเท่านั้น"</span>
                </div>
            }
        >
            {children()}
        </Show>
    }
}
