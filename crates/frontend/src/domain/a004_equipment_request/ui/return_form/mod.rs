//! Форма คืนอุปกรณ์: выбираются конкретные выданные единицы, для каждой
//! указывается состояние при возврате. Возврат проводится сразу.

use contracts::domain::a001_inventory_config::aggregate::{CONDITION_WORKING, STATUS_IN_USE};
use contracts::domain::a001_inventory_config::ConfigKind;
use contracts::domain::a003_inventory_item::{InventoryFilter, InventoryItem};
use contracts::domain::a004_equipment_request::{RequestKind, RequestLine};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::requester::{RequesterFields, RequesterVm};
use crate::domain::a003_inventory_item::api::{self as inventory_api, non_empty};
use crate::domain::a004_equipment_request::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::breakdown_cache::use_breakdown_cache;
use crate::shared::form_submit::FormSubmit;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_FORM;
use crate::shared::reference_data::ReferenceData;
use crate::shared::toast::use_toast;

#[derive(Clone)]
struct ReturnPick {
    item: InventoryItem,
    condition: RwSignal<String>,
}

fn return_line(item: &InventoryItem, condition_id: String) -> RequestLine {
    RequestLine {
        item_name: item.item_name.clone(),
        category_id: item.category_id.clone(),
        quantity: 1,
        item_id: Some(item.id.clone()),
        serial_number: item.serial_number.clone(),
        condition_id: Some(condition_id).filter(|c| !c.is_empty()),
    }
}

/// Единицы, выданные `holder` (без учёта регистра); пустое имя - все
fn held_by<'a>(items: &'a [InventoryItem], holder: &str) -> Vec<&'a InventoryItem> {
    let holder = holder.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            holder.is_empty()
                || item
                    .assigned_to
                    .as_deref()
                    .is_some_and(|a| a.to_lowercase().contains(&holder))
        })
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn EquipmentReturnForm() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let cache = use_breakdown_cache();
    let refs = ReferenceData::load();
    let requester = RequesterVm::new();
    requester.prefill(refs);
    let submit = FormSubmit::new();

    let error = RwSignal::new(None::<String>);
    let in_use = RwSignal::new(Vec::<InventoryItem>::new());
    let picks = RwSignal::new(Vec::<ReturnPick>::new());
    let search = RwSignal::new(String::new());
    let only_mine = RwSignal::new(true);

    let load_items = move || {
        let filter = InventoryFilter {
            search: non_empty(search.get_untracked()),
            status_id: Some(STATUS_IN_USE.to_string()),
            ..Default::default()
        };
        spawn_local(async move {
            match inventory_api::fetch_items(&filter).await {
                Ok(items) => in_use.set(items),
                Err(e) => error.set(Some(e)),
            }
        });
    };
    ctx.on_activate("a004_return_form", load_items);

    let visible = Memo::new(move |_| {
        let holder = if only_mine.get() {
            requester.requester_name.get()
        } else {
            String::new()
        };
        in_use.with(|items| held_by(items, &holder).into_iter().cloned().collect::<Vec<_>>())
    });

    let toggle_pick = move |item: InventoryItem| {
        picks.update(|p| {
            if let Some(pos) = p.iter().position(|pick| pick.item.id == item.id) {
                p.remove(pos);
            } else {
                p.push(ReturnPick {
                    item,
                    condition: RwSignal::new(CONDITION_WORKING.to_string()),
                });
            }
        });
    };

    let submit_for_save = submit.clone();
    let handle_save = move |_| {
        let lines: Vec<RequestLine> = picks.with_untracked(|p| {
            p.iter()
                .map(|pick| return_line(&pick.item, pick.condition.get_untracked()))
                .collect()
        });
        let dto = requester.build_dto(RequestKind::Return, lines);
        if let Err(e) = dto.validate() {
            error.set(Some(e));
            return;
        }
        error.set(None);
        submit_for_save.run(move || async move {
            match api::create(&dto).await {
                Ok(created) => {
                    cache.clear();
                    toast.success(format!(
                        "คืนอุปกรณ์เข้าคลังแล้ว {} ชิ้น",
                        created.total_quantity()
                    ));
                    picks.set(Vec::new());
                    requester.reset_after_submit();
                    load_items();
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let pending = submit.pending_signal();

    view! {
        <PageFrame page_id="a004_return_form--form" category=PAGE_CAT_FORM title="คืนอุปกรณ์">
            {move || error.get().or_else(|| refs.error.get()).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Card>
                <RequesterFields vm=requester refs=refs show_delivery=false />
            </Card>

            <Card>
                <h2 class="form__section-title">"อุปกรณ์ที่ถือครอง"</h2>
                <Flex align=FlexAlign::Center>
                    <Input value=search placeholder="ชื่ออุปกรณ์ / S/N" />
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_items()>
                        {icon("refresh")}
                        " ค้นหา"
                    </Button>
                    <Checkbox checked=only_mine label="เฉพาะที่ผู้ขอถือครอง" />
                </Flex>
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=40.0>""</TableHeaderCell>
                            <TableHeaderCell resizable=true min_width=220.0>"ชื่ออุปกรณ์"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"S/N"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"ผู้ถือครอง"</TableHeaderCell>
                            <TableHeaderCell min_width=160.0>"สภาพตอนคืน"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || visible.get()
                            key=|item| item.id.clone()
                            children=move |item: InventoryItem| {
                                let id = item.id.clone();
                                let id_for_condition = item.id.clone();
                                let item_for_toggle = item.clone();
                                let is_picked = Memo::new(move |_| {
                                    picks.with(|p| p.iter().any(|pick| pick.item.id == id))
                                });
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <input
                                                type="checkbox"
                                                prop:checked=move || is_picked.get()
                                                on:change=move |_| toggle_pick(item_for_toggle.clone())
                                            />
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{item.item_name.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {item.serial_number.clone().unwrap_or_else(|| "-".into())}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {item.assigned_to.clone().unwrap_or_else(|| "-".into())}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            {move || {
                                                let condition = picks.with(|p| {
                                                    p.iter()
                                                        .find(|pick| pick.item.id == id_for_condition)
                                                        .map(|pick| pick.condition)
                                                });
                                                condition.map(|condition| view! {
                                                    <Select value=condition>
                                                        {refs.entries(ConfigKind::Condition).into_iter().map(|c| view! {
                                                            <option value=c.id>{c.name}</option>
                                                        }).collect_view()}
                                                    </Select>
                                                })
                                            }}
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
                {move || visible.with(|v| v.is_empty()).then(|| view! {
                    <div class="form__hint">"ไม่พบอุปกรณ์ที่ถูกเบิกอยู่"</div>
                })}
                <div class="form__group">
                    <label class="form__label">"หมายเหตุ"</label>
                    <Textarea value=requester.notes />
                </div>
            </Card>

            <Flex justify=FlexJustify::End>
                <Button appearance=ButtonAppearance::Primary on_click=handle_save disabled=pending>
                    {icon("undo")}
                    {move || {
                        let n = picks.with(|p| p.len());
                        if pending.get() {
                            " กำลังบันทึก...".to_string()
                        } else {
                            format!(" คืนอุปกรณ์ ({})", n)
                        }
                    }}
                </Button>
            </Flex>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::EntityMetadata;

    fn item(id: &str, holder: Option<&str>) -> InventoryItem {
        InventoryItem {
            id: id.into(),
            item_name: "Notebook".into(),
            category_id: "cat_notebook".into(),
            serial_number: Some(format!("SN-{}", id)),
            phone_number: None,
            status_id: STATUS_IN_USE.into(),
            condition_id: CONDITION_WORKING.into(),
            office_id: "office-hq".into(),
            ownership: Default::default(),
            assigned_to: holder.map(str::to_string),
            notes: None,
            metadata: EntityMetadata::new(chrono::Utc::now()),
        }
    }

    #[test]
    fn test_return_line_carries_item_identity() {
        let line = return_line(&item("i1", Some("สมชาย")), "cond_damaged".into());
        assert_eq!(line.item_id.as_deref(), Some("i1"));
        assert_eq!(line.serial_number.as_deref(), Some("SN-i1"));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.condition_id.as_deref(), Some("cond_damaged"));
        assert_eq!(return_line(&item("i2", None), String::new()).condition_id, None);
    }

    #[test]
    fn test_held_by() {
        let items = vec![item("a", Some("Somchai Jaidee")), item("b", Some("Manee")), item("c", None)];
        assert_eq!(held_by(&items, "").len(), 3);
        let mine = held_by(&items, " somchai ");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "a");
    }
}
