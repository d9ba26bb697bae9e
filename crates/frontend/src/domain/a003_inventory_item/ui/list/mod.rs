//! Склад: строки сгруппированы по (категория, наименование). Колонка
//! "พร้อมใช้งาน" обёрнута в `StatusCell` с подсказкой-разбивкой.

use contracts::domain::a001_inventory_config::ConfigKind;
use contracts::domain::a003_inventory_item::{BreakdownQuery, InventoryFilter, InventoryGroupRow};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_inventory_item::api::{self, non_empty};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::breakdown_cache::use_breakdown_cache;
use crate::shared::components::StatusCell;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::reference_data::ReferenceData;
use crate::system::auth::context::use_auth;

fn totals(rows: &[InventoryGroupRow]) -> (u32, u32, u32) {
    rows.iter().fold((0, 0, 0), |(t, a, u), r| {
        (t + r.total, a + r.available, u + r.in_use)
    })
}

#[component]
#[allow(non_snake_case)]
pub fn InventoryList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let cache = use_breakdown_cache();
    let refs = ReferenceData::load();

    let (rows, set_rows) = signal::<Vec<InventoryGroupRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let search = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let office = RwSignal::new(String::new());

    let build_filter = move || InventoryFilter {
        search: non_empty(search.get_untracked()),
        category_id: non_empty(category.get_untracked()),
        office_id: non_empty(office.get_untracked()),
        status_id: None,
    };

    let fetch = move || {
        let filter = build_filter();
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_grouped(&filter).await {
                Ok(v) => {
                    set_rows.set(v);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("inventory: load failed: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    // обновление = новые данные и пустой кэш разбивок
    let refresh = move || {
        cache.clear();
        fetch();
    };

    ctx.on_activate("a003_inventory", refresh);

    let summary = Memo::new(move |_| rows.with(|r| totals(r)));

    view! {
        <PageFrame page_id="a003_inventory--list" category=PAGE_CAT_LIST title="คลังอุปกรณ์">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::End>
                <Space>
                    <Input value=search placeholder="ค้นหาชื่ออุปกรณ์ / S/N / เบอร์โทร" />
                    <Select value=category>
                        <option value="">"ทุกหมวดหมู่"</option>
                        {move || refs.entries(ConfigKind::Category).into_iter().map(|c| view! {
                            <option value=c.id>{c.name}</option>
                        }).collect_view()}
                    </Select>
                    <Select value=office>
                        <option value="">"ทุกสาขา"</option>
                        {move || refs.offices.get().into_iter().map(|o| view! {
                            <option value=o.id>{o.name}</option>
                        }).collect_view()}
                    </Select>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| fetch()>
                        "ค้นหา"
                    </Button>
                </Space>
                <Space>
                    {move || auth.is_admin().then(|| view! {
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| ctx.open_tab("a003_inventory_new", &tab_label_for_key("a003_inventory_new"))
                        >
                            {icon("plus")}
                            " เพิ่มอุปกรณ์"
                        </Button>
                    })}
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| refresh()
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
                        <TableHeaderCell resizable=true min_width=240.0>"ชื่ออุปกรณ์"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=140.0>"หมวดหมู่"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"ทั้งหมด"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"พร้อมใช้งาน"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"ถูกเบิก"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || rows.get()
                        key=|row| (row.category_id.clone(), row.item_name.clone(), row.total, row.available)
                        children=move |row: InventoryGroupRow| {
                            let query = BreakdownQuery {
                                item_name: row.item_name.clone(),
                                category_id: row.category_id.clone(),
                            };
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout>{row.item_name}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{row.category_name}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{row.total}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <StatusCell query=query>
                                                <span class="status-cell__count">{row.available}</span>
                                            </StatusCell>
                                        </TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>{row.in_use}</TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>

            <div class="table__footer">
                {move || {
                    let (total, available, in_use) = summary.get();
                    format!(
                        "{} รายการ · ทั้งหมด {} · พร้อมใช้งาน {} · ถูกเบิก {}",
                        rows.with(|r| r.len()),
                        total,
                        available,
                        in_use
                    )
                }}
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(total: u32, available: u32, in_use: u32) -> InventoryGroupRow {
        InventoryGroupRow {
            item_name: "เมาส์".into(),
            category_id: "cat_peripheral".into(),
            category_name: "อุปกรณ์ต่อพ่วง".into(),
            total,
            available,
            in_use,
        }
    }

    #[test]
    fn test_totals() {
        assert_eq!(totals(&[]), (0, 0, 0));
        assert_eq!(totals(&[row(5, 3, 2), row(2, 0, 1)]), (7, 3, 3));
    }
}
