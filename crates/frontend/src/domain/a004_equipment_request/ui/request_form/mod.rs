//! Форма เบิกอุปกรณ์: контакт заявителя + строки "что и сколько".
//! Наименования берутся из сгруппированного склада, доступны только
//! позиции со свободным остатком.

use contracts::domain::a003_inventory_item::{InventoryFilter, InventoryGroupRow};
use contracts::domain::a004_equipment_request::{RequestKind, RequestLine};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::requester::{RequesterFields, RequesterVm};
use crate::domain::a003_inventory_item::api as inventory_api;
use crate::domain::a004_equipment_request::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::form_submit::FormSubmit;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_FORM;
use crate::shared::reference_data::ReferenceData;
use crate::shared::toast::use_toast;

const KEY_SEPARATOR: &str = "::";

fn stock_key(row: &InventoryGroupRow) -> String {
    format!("{}{}{}", row.category_id, KEY_SEPARATOR, row.item_name)
}

#[derive(Clone, Copy)]
struct LineVm {
    uid: usize,
    stock: RwSignal<String>,
    quantity: RwSignal<String>,
}

impl LineVm {
    fn new(uid: usize) -> Self {
        Self {
            uid,
            stock: RwSignal::new(String::new()),
            quantity: RwSignal::new("1".to_string()),
        }
    }
}

/// Черновики строк (ключ склада, количество) → строки заявки
fn build_lines(
    drafts: &[(String, String)],
    stock: &[InventoryGroupRow],
) -> Result<Vec<RequestLine>, String> {
    drafts
        .iter()
        .enumerate()
        .map(|(pos, (key, quantity))| {
            let n = pos + 1;
            let row = stock
                .iter()
                .find(|r| stock_key(r) == *key)
                .ok_or_else(|| format!("รายการที่ {}: กรุณาเลือกอุปกรณ์", n))?;
            let quantity: u32 = quantity
                .trim()
                .parse()
                .map_err(|_| format!("รายการที่ {}: จำนวนต้องเป็นตัวเลข", n))?;
            if quantity > row.available {
                return Err(format!(
                    "รายการที่ {}: \"{}\" คงเหลือ {} ชิ้น",
                    n, row.item_name, row.available
                ));
            }
            Ok(RequestLine {
                item_name: row.item_name.clone(),
                category_id: row.category_id.clone(),
                quantity,
                ..Default::default()
            })
        })
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn EquipmentRequestForm() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let toast = use_toast();
    let refs = ReferenceData::load();
    let requester = RequesterVm::new();
    requester.prefill(refs);
    let submit = FormSubmit::new();

    let error = RwSignal::new(None::<String>);
    let stock = RwSignal::new(Vec::<InventoryGroupRow>::new());
    let next_uid = StoredValue::new(1usize);
    let lines = RwSignal::new(vec![LineVm::new(0)]);

    let load_stock = move || {
        spawn_local(async move {
            match inventory_api::fetch_grouped(&InventoryFilter::default()).await {
                Ok(rows) => stock.set(rows.into_iter().filter(|r| r.available > 0).collect()),
                Err(e) => error.set(Some(e)),
            }
        });
    };
    ctx.on_activate("a004_request_form", load_stock);

    let add_line = move |_| {
        let uid = next_uid.get_value();
        next_uid.set_value(uid + 1);
        lines.update(|l| l.push(LineVm::new(uid)));
    };

    let remove_line = move |uid: usize| {
        lines.update(|l| {
            if l.len() > 1 {
                l.retain(|line| line.uid != uid);
            }
        });
    };

    let submit_for_save = submit.clone();
    let handle_save = move |_| {
        let drafts: Vec<(String, String)> = lines.with_untracked(|l| {
            l.iter()
                .map(|line| (line.stock.get_untracked(), line.quantity.get_untracked()))
                .collect()
        });
        let built = stock.with_untracked(|s| build_lines(&drafts, s));
        let dto = match built {
            Ok(request_lines) => requester.build_dto(RequestKind::Request, request_lines),
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        if let Err(e) = dto.validate() {
            error.set(Some(e));
            return;
        }
        error.set(None);
        submit_for_save.run(move || async move {
            match api::create(&dto).await {
                Ok(created) => {
                    toast.success(format!(
                        "ส่งคำขอเบิกแล้ว ({} ชิ้น) รอผู้ดูแลอนุมัติ",
                        created.total_quantity()
                    ));
                    requester.reset_after_submit();
                    lines.set(vec![LineVm::new(next_uid.get_value())]);
                    next_uid.update_value(|v| *v += 1);
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let pending = submit.pending_signal();

    view! {
        <PageFrame page_id="a004_request_form--form" category=PAGE_CAT_FORM title="เบิกอุปกรณ์">
            {move || error.get().or_else(|| refs.error.get()).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Card>
                <RequesterFields vm=requester refs=refs show_delivery=true />
            </Card>

            <Card>
                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                    <h2 class="form__section-title">"รายการอุปกรณ์"</h2>
                    <Button appearance=ButtonAppearance::Secondary size=ButtonSize::Small on_click=add_line>
                        {icon("plus")}
                        " เพิ่มรายการ"
                    </Button>
                </Flex>
                <For
                    each=move || lines.get()
                    key=|line| line.uid
                    children=move |line: LineVm| {
                        let uid = line.uid;
                        view! {
                            <div class="request-line">
                                <Select value=line.stock>
                                    <option value="">"-- เลือกอุปกรณ์ --"</option>
                                    {move || stock.get().into_iter().map(|row| {
                                        let label = format!(
                                            "{} ({}) คงเหลือ {}",
                                            row.item_name, row.category_name, row.available
                                        );
                                        view! { <option value=stock_key(&row)>{label}</option> }
                                    }).collect_view()}
                                </Select>
                                <Input value=line.quantity placeholder="จำนวน" />
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    size=ButtonSize::Small
                                    on_click=move |_| remove_line(uid)
                                    disabled=Signal::derive(move || lines.with(|l| l.len() <= 1))
                                >
                                    {icon("delete")}
                                </Button>
                            </div>
                        }
                    }
                />
                <div class="form__group">
                    <label class="form__label">"หมายเหตุ"</label>
                    <Textarea value=requester.notes placeholder="เหตุผลการเบิก" />
                </div>
            </Card>

            <Flex justify=FlexJustify::End>
                <Button appearance=ButtonAppearance::Primary on_click=handle_save disabled=pending>
                    {icon("check")}
                    {move || if pending.get() { " กำลังส่ง..." } else { " ส่งคำขอเบิก" }}
                </Button>
            </Flex>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock() -> Vec<InventoryGroupRow> {
        vec![InventoryGroupRow {
            item_name: "เมาส์ Logitech".into(),
            category_id: "cat_peripheral".into(),
            category_name: "อุปกรณ์ต่อพ่วง".into(),
            total: 5,
            available: 3,
            in_use: 2,
        }]
    }

    #[test]
    fn test_build_lines_resolves_stock_key() {
        let key = stock_key(&stock()[0]);
        let lines = build_lines(&[(key, "2".into())], &stock()).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].item_name, "เมาส์ Logitech");
        assert_eq!(lines[0].category_id, "cat_peripheral");
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].item_id, None);
    }

    #[test]
    fn test_build_lines_errors() {
        let key = stock_key(&stock()[0]);
        assert!(build_lines(&[(String::new(), "1".into())], &stock()).is_err());
        assert!(build_lines(&[(key.clone(), "x".into())], &stock()).is_err());
        let err = build_lines(&[(key, "4".into())], &stock()).unwrap_err();
        assert!(err.contains("คงเหลือ 3"));
    }
}
