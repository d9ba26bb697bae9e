use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::view_model::UserDetailsVm;
use crate::shared::form_submit::FormSubmit;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::toast::use_toast;
use crate::system::users::api;

#[component]
#[allow(non_snake_case)]
pub fn UserDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let vm = UserDetailsVm::new();
    let toast = use_toast();
    let submit = FormSubmit::new();
    let title = if id.is_some() { "แก้ไขผู้ใช้" } else { "เพิ่มผู้ใช้" };

    if let Some(user_id) = id {
        spawn_local(async move {
            match api::fetch_user(&user_id).await {
                Ok(user) => vm.load(user),
                Err(e) => vm.error.set(Some(e)),
            }
        });
    }

    let submit_for_save = submit.clone();
    let handle_save = move |_| {
        match vm.id.get_untracked() {
            Some(id) => {
                let dto = vm.build_update_dto();
                vm.error.set(None);
                submit_for_save.run(move || async move {
                    match api::update_user(&id, &dto).await {
                        Ok(user) => {
                            toast.success(format!("บันทึกผู้ใช้ {} แล้ว", user.username));
                            on_close.run(());
                        }
                        Err(e) => vm.error.set(Some(e)),
                    }
                });
            }
            None => {
                let dto = vm.build_create_dto();
                if let Err(e) = dto.validate() {
                    vm.error.set(Some(e));
                    return;
                }
                vm.error.set(None);
                submit_for_save.run(move || async move {
                    match api::create_user(&dto).await {
                        Ok(user) => {
                            toast.success(format!(
                                "สร้างผู้ใช้ {} แล้ว (รหัสผ่านเริ่มต้น: password)",
                                user.username
                            ));
                            on_close.run(());
                        }
                        Err(e) => vm.error.set(Some(e)),
                    }
                });
            }
        }
    };

    let pending = submit.pending_signal();

    view! {
        <PageFrame page_id="sys_user--detail" category=PAGE_CAT_DETAIL title=title>
            {move || vm.error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Card>
                <div class="form__group">
                    <label class="form__label">
                        "ชื่อผู้ใช้"
                        <span class="form__required">"*"</span>
                    </label>
                    <Input
                        value=vm.username
                        disabled=Signal::derive(move || vm.is_edit())
                        placeholder="ภาษาอังกฤษ ไม่มีช่องว่าง"
                    />
                </div>
                <div class="form__group">
                    <label class="form__label">"ชื่อ-นามสกุล"</label>
                    <Input value=vm.full_name />
                </div>
                <div class="form__group">
                    <label class="form__label">"อีเมล"</label>
                    <Input value=vm.email placeholder="name@example.com" />
                </div>
                <div class="form__group">
                    <Checkbox checked=vm.is_admin label="ผู้ดูแลระบบ" />
                </div>
                <Show when=move || vm.is_edit()>
                    <div class="form__group">
                        <Checkbox checked=vm.is_active label="เปิดใช้งาน" />
                    </div>
                </Show>
            </Card>

            <Flex justify=FlexJustify::End>
                <Space>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        "ยกเลิก"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=handle_save disabled=pending>
                        {icon("check")}
                        {move || if pending.get() { " กำลังบันทึก..." } else { " บันทึก" }}
                    </Button>
                </Space>
            </Flex>
        </PageFrame>
    }
}
