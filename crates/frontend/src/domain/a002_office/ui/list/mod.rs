use contracts::domain::a002_office::Office;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_office::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, OFFICE_DETAIL_PREFIX};
use crate::shared::dialog::confirm;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_ADMIN;
use crate::shared::toast::use_toast;

#[component]
#[allow(non_snake_case)]
pub fn OfficeList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let (items, set_items) = signal::<Vec<Office>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(v) => {
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    let open_details = move |id: Option<String>| {
        let id = id.unwrap_or_else(|| "new".to_string());
        let key = format!("{}{}", OFFICE_DETAIL_PREFIX, id);
        ctx.open_tab(&key, &detail_tab_label("สาขา", &id));
    };

    let handle_delete = move |office: Office| {
        if !confirm(&format!("ลบสาขา \"{}\" ใช่หรือไม่?", office.name)) {
            return;
        }
        spawn_local(async move {
            match api::delete(&office.id).await {
                Ok(()) => {
                    toast.success("ลบสาขาแล้ว");
                    fetch();
                }
                Err(e) => toast.error(e),
            }
        });
    };

    ctx.on_activate("a002_offices", fetch);

    view! {
        <PageFrame page_id="a002_offices--admin" category=PAGE_CAT_ADMIN title="สาขา">
            <Flex justify=FlexJustify::End>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                        {icon("plus")}
                        " เพิ่มสาขา"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| fetch()
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
                        <TableHeaderCell resizable=true min_width=200.0>"ชื่อสาขา"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=240.0>"รายละเอียด"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"สถานะ"</TableHeaderCell>
                        <TableHeaderCell min_width=100.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|office| {
                        let id_for_link = office.id.clone();
                        let is_default = office.is_default;
                        let office_for_delete = office.clone();
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>
                                        <a
                                            href="#"
                                            class="table__link"
                                            on:click=move |e| {
                                                e.prevent_default();
                                                open_details(Some(id_for_link.clone()));
                                            }
                                        >
                                            {office.name}
                                        </a>
                                        {is_default.then(|| view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>"สาขาหลัก"</Badge>
                                        })}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {office.description.unwrap_or_else(|| "-".to_string())}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {if office.is_active {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"ใช้งาน"</Badge> }.into_any()
                                        } else {
                                            view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"ปิดใช้งาน"</Badge> }.into_any()
                                        }}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {(!is_default).then(|| view! {
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| handle_delete(office_for_delete.clone())
                                            >
                                                {icon("delete")}
                                            </Button>
                                        })}
                                    </TableCellLayout>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>
        </PageFrame>
    }
}
