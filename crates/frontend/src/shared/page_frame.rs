//! PageFrame: корневая обёртка страницы внутри вкладки.
//!
//! ```ignore
//! view! {
//!     <PageFrame page_id="a003_inventory--list" category=PAGE_CAT_LIST title="คลังอุปกรณ์">
//!         ...
//!     </PageFrame>
//! }
//! ```

use super::page_standard::*;
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// `{page}--{category}`
    page_id: &'static str,
    /// Одна из констант PAGE_CAT_*
    category: &'static str,
    /// Заголовок страницы; пустой - без шапки
    #[prop(optional)]
    title: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) {
        log::warn!("PageFrame: unexpected page id '{}'", page_id);
    }
    let class = match category {
        PAGE_CAT_FORM => "page page--form",
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_ADMIN => "page page--admin",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {(!title.is_empty()).then(|| view! {
                <div class="page__header">
                    <h1 class="page__title">{title}</h1>
                </div>
            })}
            <div class="page__content">{children()}</div>
        </div>
    }
}
