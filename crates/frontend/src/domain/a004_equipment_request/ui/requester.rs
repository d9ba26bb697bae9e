//! Общая часть форм เบิก/คืน: кто подаёт заявку и куда доставить.

use contracts::domain::a004_equipment_request::{
    CreateEquipmentRequestDto, RequestKind, RequestLine, Urgency,
};
use contracts::shared::validation::digits_only;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a003_inventory_item::api::non_empty;
use crate::shared::reference_data::ReferenceData;
use crate::system::auth::context::use_auth;

#[derive(Clone, Copy)]
pub struct RequesterVm {
    pub requester_name: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub office_id: RwSignal<String>,
    pub department: RwSignal<String>,
    pub urgency: RwSignal<String>,
    pub delivery_location: RwSignal<String>,
    pub notes: RwSignal<String>,
}

impl RequesterVm {
    pub fn new() -> Self {
        Self {
            requester_name: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            office_id: RwSignal::new(String::new()),
            department: RwSignal::new(String::new()),
            urgency: RwSignal::new(Urgency::Normal.as_str().to_string()),
            delivery_location: RwSignal::new(String::new()),
            notes: RwSignal::new(String::new()),
        }
    }

    /// Имя пользователя и офис по умолчанию, пока поля пустые
    pub fn prefill(&self, refs: ReferenceData) {
        let auth = use_auth();
        let this = *self;
        Effect::new(move |_| {
            if this.requester_name.with_untracked(|n| n.is_empty()) {
                if let Some(user) = auth.user_info() {
                    this.requester_name.set(user.display_name().to_string());
                }
            }
            if this.office_id.with_untracked(|o| o.is_empty()) {
                if let Some(id) = refs.default_office_id() {
                    this.office_id.set(id);
                }
            }
        });
    }

    pub fn build_dto(&self, kind: RequestKind, lines: Vec<RequestLine>) -> CreateEquipmentRequestDto {
        CreateEquipmentRequestDto {
            kind,
            requester_name: self.requester_name.get_untracked().trim().to_string(),
            phone: digits_only(&self.phone.get_untracked()),
            office_id: self.office_id.get_untracked(),
            department: non_empty(self.department.get_untracked()),
            urgency: Urgency::parse(&self.urgency.get_untracked()).unwrap_or_default(),
            delivery_location: non_empty(self.delivery_location.get_untracked()),
            lines,
            notes: non_empty(self.notes.get_untracked()),
        }
    }

    /// Поля строк и примечание очищаются, контакт остаётся
    pub fn reset_after_submit(&self) {
        self.notes.set(String::new());
        self.delivery_location.set(String::new());
    }
}

impl Default for RequesterVm {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
#[allow(non_snake_case)]
pub fn RequesterFields(vm: RequesterVm, refs: ReferenceData, show_delivery: bool) -> impl IntoView {
    view! {
        <div class="form__grid">
            <div class="form__group">
                <label class="form__label">
                    "ชื่อผู้ขอ"
                    <span class="form__required">"*"</span>
                </label>
                <Input value=vm.requester_name placeholder="ชื่อ-นามสกุล" />
            </div>
            <div class="form__group">
                <label class="form__label">
                    "เบอร์โทรศัพท์"
                    <span class="form__required">"*"</span>
                </label>
                <Input value=vm.phone placeholder="0812345678" />
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
                <label class="form__label">"แผนก"</label>
                <Input value=vm.department />
            </div>
            <div class="form__group">
                <label class="form__label">"ความเร่งด่วน"</label>
                <Select value=vm.urgency>
                    {Urgency::all().into_iter().map(|u| view! {
                        <option value=u.as_str()>{u.display_name()}</option>
                    }).collect_view()}
                </Select>
            </div>
            {show_delivery.then(|| view! {
                <div class="form__group">
                    <label class="form__label">"สถานที่จัดส่ง"</label>
                    <Input value=vm.delivery_location placeholder="เช่น ชั้น 3 ฝ่ายบัญชี" />
                </div>
            })}
        </div>
    }
}
