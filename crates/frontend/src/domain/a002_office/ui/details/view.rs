use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::view_model::OfficeDetailsVm;
use crate::domain::a002_office::api;
use crate::shared::form_submit::FormSubmit;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::toast::use_toast;

#[component]
#[allow(non_snake_case)]
pub fn OfficeDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let vm = OfficeDetailsVm::new();
    let toast = use_toast();
    let submit = FormSubmit::new();
    let is_edit = id.is_some();

    if let Some(office_id) = id {
        spawn_local(async move {
            match api::fetch_by_id(&office_id).await {
                Ok(office) => vm.load(office),
                Err(e) => vm.error.set(Some(e)),
            }
        });
    }

    let submit_for_save = submit.clone();
    let handle_save = move |_| {
        let dto = vm.build_dto();
        if let Err(e) = dto.validate() {
            vm.error.set(Some(e));
            return;
        }
        vm.error.set(None);
        submit_for_save.run(move || async move {
            match api::save(&dto).await {
                Ok(office) => {
                    toast.success(format!("บันทึกสาขา \"{}\" แล้ว", office.name));
                    on_close.run(());
                }
                Err(e) => vm.error.set(Some(e)),
            }
        });
    };

    let pending = submit.pending_signal();

    view! {
        <PageFrame
            page_id="a002_office--detail"
            category=PAGE_CAT_DETAIL
            title=if is_edit { "แก้ไขสาขา" } else { "เพิ่มสาขา" }
        >
            {move || vm.error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Card>
                <div class="form__group">
                    <label class="form__label">
                        "ชื่อสาขา"
                        <span class="form__required">"*"</span>
                    </label>
                    <Input value=vm.name placeholder="เช่น สาขาเชียงใหม่" />
                </div>
                <div class="form__group">
                    <label class="form__label">"รายละเอียด"</label>
                    <Textarea value=vm.description placeholder="ที่อยู่ หรือหมายเหตุ" />
                </div>
                <div class="form__group">
                    <Checkbox checked=vm.is_active label="เปิดใช้งาน" />
                    {move || vm.is_default.get().then(|| view! {
                        <div class="form__hint">"สาขาหลักไม่สามารถปิดใช้งานหรือลบได้"</div>
                    })}
                </div>
            </Card>

            <Flex justify=FlexJustify::End>
                <Space>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "ยกเลิก"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=handle_save
                        disabled=pending
                    >
                        {icon("check")}
                        {move || if pending.get() { " กำลังบันทึก..." } else { " บันทึก" }}
                    </Button>
                </Space>
            </Flex>
        </PageFrame>
    }
}
