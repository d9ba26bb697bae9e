mod state;

use std::cmp::Ordering;

use contracts::system::users::User;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, USER_DETAIL_PREFIX};
use crate::shared::date_utils::{format_thai_datetime, format_thai_datetime_opt};
use crate::shared::dialog::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::{cmp_opt_str, filter_list, sort_list, Searchable, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_ADMIN;
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;
use crate::system::users::api;
use state::create_state;

impl Searchable for User {
    fn matches_filter(&self, filter: &str) -> bool {
        self.username.to_lowercase().contains(filter)
            || self
                .full_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(filter))
            || self
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(filter))
    }
}

impl Sortable for User {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "full_name" => cmp_opt_str(self.full_name.as_deref(), other.full_name.as_deref()),
            "email" => cmp_opt_str(self.email.as_deref(), other.email.as_deref()),
            "role" => self.is_admin().cmp(&other.is_admin()).reverse(),
            "is_active" => self.is_active.cmp(&other.is_active).reverse(),
            "last_login_at" => self.last_login_at.cmp(&other.last_login_at),
            _ => self
                .username
                .to_lowercase()
                .cmp(&other.username.to_lowercase()),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn UsersListPage() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let toast = use_toast();
    let state = create_state();

    let all_users = RwSignal::new(Vec::<User>::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let load_data = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_users().await {
                Ok(data) => {
                    all_users.set(data);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(format!("โหลดรายชื่อผู้ใช้ไม่สำเร็จ: {}", e))),
            }
            set_loading.set(false);
        });
    };

    ctx.on_activate("sys_users", load_data);

    let visible = Memo::new(move |_| {
        let show_inactive = state.show_inactive.get();
        let mut data: Vec<User> = filter_list(all_users.get(), &state.search_query.get())
            .into_iter()
            .filter(|u| show_inactive || u.is_active)
            .collect();
        sort_list(&mut data, state.sort.field.get(), state.sort.ascending.get());
        data
    });

    let open_details = move |id: Option<String>| {
        let id = id.unwrap_or_else(|| "new".to_string());
        let key = format!("{}{}", USER_DETAIL_PREFIX, id);
        ctx.open_tab(&key, &detail_tab_label("ผู้ใช้", &id));
    };

    let handle_delete = move |user: User| {
        if !confirm(&format!("ลบผู้ใช้ \"{}\" ใช่หรือไม่?", user.username)) {
            return;
        }
        spawn_local(async move {
            match api::delete_user(&user.id).await {
                Ok(()) => {
                    toast.success(format!("ลบผู้ใช้ {} แล้ว", user.username));
                    all_users.update(|list| list.retain(|u| u.id != user.id));
                }
                Err(e) => toast.error(e),
            }
        });
    };

    let sort = state.sort;
    let header = move |field: &'static str, label: &'static str| {
        view! {
            <div class="table__sortable-header" on:click=move |_| sort.toggle(field)>
                {label}
                <span class="table__sort-indicator">{move || sort.indicator(field)}</span>
            </div>
        }
    };

    view! {
        <PageFrame page_id="sys_users--admin" category=PAGE_CAT_ADMIN title="ผู้ใช้งาน">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::End>
                <Space>
                    <Input value=state.search_query placeholder="ชื่อผู้ใช้ ชื่อ-นามสกุล หรืออีเมล" />
                    <Checkbox checked=state.show_inactive label="แสดงผู้ใช้ที่ปิดใช้งาน" />
                    <Badge>{move || visible.with(|v| v.len()).to_string()}</Badge>
                </Space>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " เพิ่มผู้ใช้"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " รีเฟรช"
                    </Button>
                </Space>
            </Flex>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=140.0>{header("username", "ชื่อผู้ใช้")}</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=180.0>{header("full_name", "ชื่อ-นามสกุล")}</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=180.0>{header("email", "อีเมล")}</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>{header("role", "บทบาท")}</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>{header("is_active", "สถานะ")}</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>{header("last_login_at", "เข้าระบบล่าสุด")}</TableHeaderCell>
                        <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || visible.get()
                        key=|u| (u.id.clone(), u.metadata.updated_at)
                        children=move |user: User| {
                            let id = user.id.clone();
                            let is_self = auth
                                .username_untracked()
                                .is_some_and(|name| name == user.username);
                            let user_for_delete = user.clone();
                            let username = user.username.clone();
                            let full_name = user.full_name.clone().unwrap_or_default();
                            let email = user.email.clone().unwrap_or_default();
                            let role_color = if user.is_admin() { BadgeColor::Brand } else { BadgeColor::Informative };
                            let role_name = user.role.display_name();
                            let is_active = user.is_active;
                            let created_at_title = format_thai_datetime(user.metadata.created_at);
                            let last_login = format_thai_datetime_opt(user.last_login_at);
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout>
                                            <a
                                                href="#"
                                                class="table__link"
                                                on:click=move |e| {
                                                    e.prevent_default();
                                                    open_details(Some(id.clone()));
                                                }
                                            >
                                                {username}
                                            </a>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {full_name}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>
                                            {email}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <Badge
                                                appearance=BadgeAppearance::Tint
                                                color=role_color
                                            >
                                                {role_name}
                                            </Badge>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            {if is_active {
                                                view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"ใช้งาน"</Badge> }.into_any()
                                            } else {
                                                view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"ปิดใช้งาน"</Badge> }.into_any()
                                            }}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout attr:title=created_at_title>
                                            {last_login}
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            {(!is_self).then(|| view! {
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| handle_delete(user_for_delete.clone())
                                                >
                                                    {icon("delete")}
                                                </Button>
                                            })}
                                        </TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contracts::domain::common::EntityMetadata;
    use contracts::system::users::UserRole;

    fn user(username: &str, full_name: Option<&str>, role: UserRole) -> User {
        User {
            id: username.into(),
            username: username.into(),
            full_name: full_name.map(str::to_string),
            email: None,
            role,
            is_active: true,
            last_login_at: None,
            metadata: EntityMetadata::new(Utc::now()),
        }
    }

    #[test]
    fn test_search_matches_full_name() {
        let users = vec![
            user("admin", Some("ผู้ดูแลระบบ"), UserRole::Admin),
            user("somchai", Some("Somchai Jaidee"), UserRole::User),
        ];
        let found = filter_list(users, "jaidee");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "somchai");
    }

    #[test]
    fn test_sort_by_role_puts_admins_first() {
        let mut users = vec![
            user("b", None, UserRole::User),
            user("a", None, UserRole::Admin),
        ];
        sort_list(&mut users, "role", true);
        assert_eq!(users[0].username, "a");
    }
}
