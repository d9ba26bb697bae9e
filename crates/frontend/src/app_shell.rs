//! Application Shell:
//! - `AppShell` - auth gate (LoginPage или MainLayout)
//! - `MainLayout` - Shell + Sidebar + вкладки

use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::Sidebar;
use crate::layout::Shell;
use crate::shared::breakdown_cache::use_breakdown_cache;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use crate::system::tutorial::TutorialBanner;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store =
        use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let cache = use_breakdown_cache();

    // Один раз при входе: открыть сохранённую страницу
    tabs_store.restore_active_page();
    on_cleanup(move || cache.clear());

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! {
                <TutorialBanner />
                <Tabs />
            }
            .into_any()
        />
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.is_initialized()
            fallback=|| view! { <div class="app-loading">"กำลังโหลด..."</div> }
        >
            <Show
                when=move || auth.is_authenticated()
                fallback=|| view! { <LoginPage /> }
            >
                <MainLayout />
            </Show>
        </Show>
    }
}
