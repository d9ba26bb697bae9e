use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::breakdown_cache::BreakdownCache;
use crate::shared::components::AppErrorBoundary;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::AuthContext;
use crate::system::tutorial::TutorialContext;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let auth = AuthContext::new();
    let tutorial = TutorialContext::new();

    provide_context(auth);
    provide_context(tutorial);
    provide_context(AppGlobalContext::new());
    provide_context(ToastService::new());
    provide_context(BreakdownCache::new());

    auth.init();
    tutorial.init();

    view! {
        <AppErrorBoundary>
            <AppShell />
        </AppErrorBoundary>
        <ToastHost />
    }
}
