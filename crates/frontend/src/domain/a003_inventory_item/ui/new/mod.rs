use contracts::domain::a001_inventory_config::aggregate::{
    CATEGORY_SIM_CARD, CONDITION_WORKING, STATUS_AVAILABLE,
};
use contracts::domain::a001_inventory_config::ConfigKind;
use contracts::domain::a003_inventory_item::{CreateInventoryItemDto, OwnershipType};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a003_inventory_item::api::{self, non_empty};
use crate::shared::breakdown_cache::use_breakdown_cache;
use crate::shared::form_submit::FormSubmit;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_FORM;
use crate::shared::reference_data::ReferenceData;
use crate::shared::toast::use_toast;

#[derive(Clone, Copy)]
struct AddEquipmentVm {
    item_name: RwSignal<String>,
    category_id: RwSignal<String>,
    serial_number: RwSignal<String>,
    phone_number: RwSignal<String>,
    quantity: RwSignal<String>,
    status_id: RwSignal<String>,
    condition_id: RwSignal<String>,
    office_id: RwSignal<String>,
    ownership: RwSignal<String>,
    assigned_to: RwSignal<String>,
    notes: RwSignal<String>,
    error: RwSignal<Option<String>>,
}

impl AddEquipmentVm {
    fn new() -> Self {
        Self {
            item_name: RwSignal::new(String::new()),
            category_id: RwSignal::new(String::new()),
            serial_number: RwSignal::new(String::new()),
            phone_number: RwSignal::new(String::new()),
            quantity: RwSignal::new("1".to_string()),
            status_id: RwSignal::new(STATUS_AVAILABLE.to_string()),
            condition_id: RwSignal::new(CONDITION_WORKING.to_string()),
            office_id: RwSignal::new(String::new()),
            ownership: RwSignal::new(OwnershipType::Company.as_str().to_string()),
            assigned_to: RwSignal::new(String::new()),
            notes: RwSignal::new(String::new()),
            error: RwSignal::new(None),
        }
    }

    fn build_dto(&self) -> Result<CreateInventoryItemDto, String> {
        let quantity = parse_quantity(&self.quantity.get_untracked())?;
        let ownership = self.ownership.get_untracked();
        Ok(CreateInventoryItemDto {
            item_name: self.item_name.get_untracked().trim().to_string(),
            category_id: self.category_id.get_untracked(),
            serial_number: non_empty(self.serial_number.get_untracked()),
            phone_number: non_empty(self.phone_number.get_untracked()),
            quantity,
            status_id: non_empty(self.status_id.get_untracked()),
            condition_id: non_empty(self.condition_id.get_untracked()),
            office_id: self.office_id.get_untracked(),
            ownership: OwnershipType::all()
                .into_iter()
                .find(|o| o.as_str() == ownership),
            assigned_to: non_empty(self.assigned_to.get_untracked()),
            notes: non_empty(self.notes.get_untracked()),
        })
    }

    /// После сохранения форма остаётся открытой для следующей позиции
    fn clear_item_fields(&self) {
        self.serial_number.set(String::new());
        self.phone_number.set(String::new());
        self.quantity.set("1".to_string());
        self.assigned_to.set(String::new());
        self.notes.set(String::new());
    }
}

fn parse_quantity(raw: &str) -> Result<u32, String> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| "จำนวนต้องเป็นตัวเลข".to_string())
}

#[component]
#[allow(non_snake_case)]
pub fn AddEquipmentForm(on_close: Callback<()>) -> impl IntoView {
    let vm = AddEquipmentVm::new();
    let refs = ReferenceData::load();
    let toast = use_toast();
    let cache = use_breakdown_cache();
    let submit = FormSubmit::new();

    // офис по умолчанию подставляется, когда справочник загрузился
    Effect::new(move |_| {
        if vm.office_id.with_untracked(|o| o.is_empty()) {
            if let Some(id) = refs.default_office_id() {
                vm.office_id.set(id);
            }
        }
    });

    let is_sim = Memo::new(move |_| vm.category_id.with(|c| c == CATEGORY_SIM_CARD));
    let has_serial = Memo::new(move |_| vm.serial_number.with(|s| !s.trim().is_empty()));

    // S/N и ซิม всегда по одной штуке
    Effect::new(move |_| {
        if is_sim.get() || has_serial.get() {
            vm.quantity.set("1".to_string());
        }
    });

    let submit_for_save = submit.clone();
    let handle_save = move |_| {
        let dto = match vm.build_dto() {
            Ok(dto) => dto,
            Err(e) => {
                vm.error.set(Some(e));
                return;
            }
        };
        if let Err(e) = refs.config.with_untracked(|config| dto.validate(config)) {
            vm.error.set(Some(e));
            return;
        }
        vm.error.set(None);
        submit_for_save.run(move || async move {
            match api::create(&dto).await {
                Ok(items) => {
                    cache.clear();
                    toast.success(format!(
                        "เพิ่ม \"{}\" จำนวน {} ชิ้นแล้ว",
                        dto.item_name,
                        items.len()
                    ));
                    vm.clear_item_fields();
                }
                Err(e) => vm.error.set(Some(e)),
            }
        });
    };

    let pending = submit.pending_signal();
    let quantity_locked = Signal::derive(move || is_sim.get() || has_serial.get());

    let config_options = move |kind: ConfigKind| {
        refs.entries(kind)
            .into_iter()
            .map(|e| view! { <option value=e.id>{e.name}</option> })
            .collect_view()
    };

    view! {
        <PageFrame page_id="a003_inventory_new--form" category=PAGE_CAT_FORM title="เพิ่มอุปกรณ์">
            {move || vm.error.get().or_else(|| refs.error.get()).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Card>
                <div class="form__grid">
                    <div class="form__group">
                        <label class="form__label">
                            "ชื่ออุปกรณ์"
                            <span class="form__required">"*"</span>
                        </label>
                        <Input value=vm.item_name placeholder="เช่น Notebook Dell Latitude 5440" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">
                            "หมวดหมู่"
                            <span class="form__required">"*"</span>
                        </label>
                        <Select value=vm.category_id>
                            <option value="">"-- เลือกหมวดหมู่ --"</option>
                            {move || config_options(ConfigKind::Category)}
                        </Select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"หมายเลขซีเรียล (S/N)"</label>
                        <Input value=vm.serial_number placeholder="เว้นว่างได้ถ้าไม่มี" />
                    </div>
                    <Show when=move || is_sim.get()>
                        <div class="form__group">
                            <label class="form__label">
                                "เบอร์โทรศัพท์"
                                <span class="form__required">"*"</span>
                            </label>
                            <Input value=vm.phone_number placeholder="0812345678" />
                        </div>
                    </Show>
                    <div class="form__group">
                        <label class="form__label">"จำนวน"</label>
                        <Input value=vm.quantity disabled=quantity_locked />
                        {move || quantity_locked.get().then(|| view! {
                            <div class="form__hint">"อุปกรณ์ที่มี S/N หรือซิมการ์ดเพิ่มได้ทีละ 1 ชิ้น"</div>
                        })}
                    </div>
                    <div class="form__group">
                        <label class="form__label">
                            "สาขา"
                            <span class="form__required">"*"</span>
                        </label>
                        <Select value=vm.office_id>
                            {move || refs.offices.get().into_iter().map(|o| view! {
                                <option value=o.id>{o.name}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"สถานะ"</label>
                        <Select value=vm.status_id>
                            {move || config_options(ConfigKind::Status)}
                        </Select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"สภาพ"</label>
                        <Select value=vm.condition_id>
                            {move || config_options(ConfigKind::Condition)}
                        </Select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"ความเป็นเจ้าของ"</label>
                        <Select value=vm.ownership>
                            {OwnershipType::all().into_iter().map(|o| view! {
                                <option value=o.as_str()>{o.display_name()}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"ผู้ถือครอง"</label>
                        <Input value=vm.assigned_to placeholder="ชื่อผู้ใช้ (ถ้ามี)" />
                    </div>
                </div>
                <div class="form__group">
                    <label class="form__label">"หมายเหตุ"</label>
                    <Textarea value=vm.notes />
                </div>
            </Card>

            <Flex justify=FlexJustify::End>
                <Space>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "ปิด"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=handle_save
                        disabled=pending
                    >
                        {icon("plus")}
                        {move || if pending.get() { " กำลังบันทึก..." } else { " เพิ่มอุปกรณ์" }}
                    </Button>
                </Space>
            </Flex>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 3 "), Ok(3));
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("-1").is_err());
        assert!(parse_quantity("สอง").is_err());
    }
}
