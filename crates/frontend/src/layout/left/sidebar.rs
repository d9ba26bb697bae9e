//! Боковое меню: группы страниц, группа администратора видна только админу.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
    admin_only: bool,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "inventory",
            label: "คลังอุปกรณ์",
            icon: "inventory",
            items: vec![
                ("a003_inventory", "package"),
                ("a004_request_form", "file-text"),
                ("a004_return_form", "undo"),
                ("a004_requests", "list"),
            ],
            admin_only: false,
        },
        MenuGroup {
            id: "it_support",
            label: "แจ้งปัญหาไอที",
            icon: "alert",
            items: vec![("a005_issue_form", "alert"), ("a005_issues", "list")],
            admin_only: false,
        },
        MenuGroup {
            id: "admin",
            label: "ผู้ดูแลระบบ",
            icon: "settings",
            items: vec![
                ("a003_inventory_new", "plus"),
                ("a001_inventory_config", "settings"),
                ("a002_offices", "building"),
                ("sys_users", "users"),
                ("sys_admin_tools", "tool"),
            ],
            admin_only: true,
        },
    ]
}

fn visible_groups(is_admin: bool) -> Vec<MenuGroup> {
    get_menu_groups()
        .into_iter()
        .filter(|g| is_admin || !g.admin_only)
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();

    let expanded_groups = RwSignal::new(vec!["inventory", "it_support"]);

    move || {
        visible_groups(auth.is_admin())
            .into_iter()
            .map(|group| {
                let group_id = group.id;
                let toggle = move |_| {
                    expanded_groups.update(|items| {
                        if let Some(pos) = items.iter().position(|x| *x == group_id) {
                            items.remove(pos);
                        } else {
                            items.push(group_id);
                        }
                    });
                };
                let is_expanded = move || expanded_groups.with(|items| items.contains(&group_id));

                view! {
                    <div class="app-sidebar__group">
                        <div class="app-sidebar__item" style:padding-left="12px" on:click=toggle>
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=is_expanded
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>
                        <Show when=is_expanded>
                            <div class="app-sidebar__children">
                                {group
                                    .items
                                    .clone()
                                    .into_iter()
                                    .map(|(key, icon_name)| {
                                        let label = tab_label_for_key(key);
                                        let label_for_click = label.clone();
                                        view! {
                                            <div
                                                class="app-sidebar__item"
                                                class:app-sidebar__item--active=move || {
                                                    ctx.active.with(|a| a.as_deref() == Some(key))
                                                }
                                                style:padding-left="10px"
                                                on:click=move |_| ctx.open_tab(key, &label_for_click)
                                            >
                                                <div class="app-sidebar__item-content">
                                                    {icon(icon_name)}
                                                    <span>{label}</span>
                                                </div>
                                            </div>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            })
            .collect_view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_group_hidden_for_regular_users() {
        assert!(visible_groups(false).iter().all(|g| !g.admin_only));
        assert!(visible_groups(true).iter().any(|g| g.id == "admin"));
    }

    #[test]
    fn test_every_menu_item_has_a_label() {
        for group in get_menu_groups() {
            for (key, _) in group.items {
                assert_ne!(tab_label_for_key(key), key, "missing label for {}", key);
            }
        }
    }
}
