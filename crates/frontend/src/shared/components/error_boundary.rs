//! Граница ошибок рендера для всего приложения.
//!
//! Ловит `Err(..)`, отрисованные внутри дочерних view, пишет их в консоль и
//! показывает экран с действиями: повторить, сбросить вкладки, перезагрузить
//! страницу, вернуться на главную.

use std::fmt;

use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;

/// Ошибка, которую страница может отрисовать как `Err(PageError)`
#[derive(Debug, Clone, PartialEq)]
pub enum PageError {
    UnknownPage(String),
    Load(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::UnknownPage(key) => write!(f, "ไม่พบหน้า: {}", key),
            PageError::Load(message) => write!(f, "โหลดข้อมูลไม่สำเร็จ: {}", message),
        }
    }
}

impl std::error::Error for PageError {}

fn reload_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().reload() {
            log::error!("reload failed: {:?}", e);
        }
    }
}

#[component]
pub fn AppErrorBoundary(children: Children) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let fallback = move |errors: ArcRwSignal<Errors>| {
        let messages: Vec<String> = errors
            .read()
            .iter()
            .map(|(_, e)| e.to_string())
            .collect();
        for message in &messages {
            log::error!("render error: {}", message);
        }

        let errors_retry = errors.clone();
        let errors_reset = errors.clone();
        let errors_home = errors;

        view! {
            <div class="error-boundary">
                <div class="error-boundary__title">
                    {icon("alert")}
                    <h2>"เกิดข้อผิดพลาด"</h2>
                </div>
                <ul class="error-boundary__list">
                    {messages.into_iter().map(|m| view! { <li>{m}</li> }).collect_view()}
                </ul>
                <div class="error-boundary__actions">
                    <button class="button button--primary" on:click=move |_| {
                        errors_retry.update(|e| *e = Errors::default());
                    }>"ลองใหม่"</button>
                    <button class="button button--secondary" on:click=move |_| {
                        ctx.reset();
                        errors_reset.update(|e| *e = Errors::default());
                    }>"รีเซ็ต"</button>
                    <button class="button button--secondary" on:click=move |_| reload_page()>
                        "โหลดหน้าใหม่"
                    </button>
                    <button class="button button--secondary" on:click=move |_| {
                        ctx.go_home();
                        errors_home.update(|e| *e = Errors::default());
                    }>"หน้าหลัก"</button>
                </div>
            </div>
        }
    };

    view! { <ErrorBoundary fallback=fallback>{children()}</ErrorBoundary> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_error_messages() {
        assert_eq!(
            PageError::UnknownPage("x_page".into()).to_string(),
            "ไม่พบหน้า: x_page"
        );
        assert!(PageError::Load("HTTP 500".into())
            .to_string()
            .ends_with("HTTP 500"));
    }
}
