//! Ключ вкладки → View. Все ключи страниц собраны здесь.

use crate::domain::a001_inventory_config::ui::settings::InventoryConfigSettings;
use crate::domain::a002_office::ui::details::OfficeDetails;
use crate::domain::a002_office::ui::list::OfficeList;
use crate::domain::a003_inventory_item::ui::list::InventoryList;
use crate::domain::a003_inventory_item::ui::new::AddEquipmentForm;
use crate::domain::a004_equipment_request::ui::list::RequestList;
use crate::domain::a004_equipment_request::ui::request_form::EquipmentRequestForm;
use crate::domain::a004_equipment_request::ui::return_form::EquipmentReturnForm;
use crate::domain::a005_it_issue::ui::report_form::IssueReportForm;
use crate::domain::a005_it_issue::ui::tracking::IssueTracking;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{OFFICE_DETAIL_PREFIX, USER_DETAIL_PREFIX};
use crate::shared::components::PageError;
use crate::system::auth::guard::RequireAdmin;
use crate::system::pages::admin_tools::AdminToolsPage;
use crate::system::users::ui::details::UserDetails;
use crate::system::users::ui::list::UsersListPage;
use leptos::prelude::*;

fn detail_id(id: &str) -> Option<String> {
    (id != "new").then(|| id.to_string())
}

/// Рендерит контент вкладки по ключу. Неизвестный ключ отдаётся в
/// `AppErrorBoundary` как `PageError::UnknownPage`.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    match key {
        // ── для всех сотрудников ──────────────────────────────────────────
        "a003_inventory" => view! { <InventoryList /> }.into_any(),
        "a004_request_form" => view! { <EquipmentRequestForm /> }.into_any(),
        "a004_return_form" => view! { <EquipmentReturnForm /> }.into_any(),
        "a004_requests" => view! { <RequestList /> }.into_any(),
        "a005_issue_form" => view! { <IssueReportForm /> }.into_any(),
        "a005_issues" => view! { <IssueTracking /> }.into_any(),

        // ── администратор ─────────────────────────────────────────────────
        "a003_inventory_new" => view! {
            <RequireAdmin>
                <AddEquipmentForm on_close=close />
            </RequireAdmin>
        }
        .into_any(),
        "a001_inventory_config" => view! {
            <RequireAdmin>
                <InventoryConfigSettings />
            </RequireAdmin>
        }
        .into_any(),
        "a002_offices" => view! {
            <RequireAdmin>
                <OfficeList />
            </RequireAdmin>
        }
        .into_any(),
        k if k.starts_with(OFFICE_DETAIL_PREFIX) => {
            let id = detail_id(&k[OFFICE_DETAIL_PREFIX.len()..]);
            view! {
                <RequireAdmin>
                    <OfficeDetails id=id.clone() on_close=close />
                </RequireAdmin>
            }
            .into_any()
        }
        "sys_users" => view! {
            <RequireAdmin>
                <UsersListPage />
            </RequireAdmin>
        }
        .into_any(),
        k if k.starts_with(USER_DETAIL_PREFIX) => {
            let id = detail_id(&k[USER_DETAIL_PREFIX.len()..]);
            view! {
                <RequireAdmin>
                    <UserDetails id=id.clone() on_close=close />
                </RequireAdmin>
            }
            .into_any()
        }
        "sys_admin_tools" => view! {
            <RequireAdmin>
                <AdminToolsPage />
            </RequireAdmin>
        }
        .into_any(),

        _ => {
            log::warn!("unknown tab key: {}", key);
            let error = PageError::UnknownPage(key.to_string());
            view! { {Err::<(), PageError>(error)} }.into_any()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_id() {
        assert_eq!(detail_id("new"), None);
        assert_eq!(detail_id("abc"), Some("abc".to_string()));
    }
}
