//! Инструменты администратора: переименование оборудования во всех
//! коллекциях (preview → rename → rollback), починка данных и проверка
//! авторизации.

use contracts::domain::a001_inventory_config::ConfigKind;
use contracts::shared::validation::confirmation_matches;
use contracts::system::auth::AuthStatusReport;
use contracts::system::maintenance::{
    FixReport, RenameAction, RenameItemRequest, RenameItemResult, RENAME_CONFIRMATION,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_inventory_item::api::non_empty;
use crate::shared::breakdown_cache::use_breakdown_cache;
use crate::shared::dialog::confirm;
use crate::shared::form_submit::FormSubmit;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_ADMIN;
use crate::shared::reference_data::ReferenceData;
use crate::shared::toast::use_toast;
use crate::system::auth::api as auth_api;
use crate::system::maintenance::api::{self, FixKind};

/// Переименование разрешено только после preview тех же имён и ввода
/// слова подтверждения
fn can_rename(
    preview: Option<&RenameItemResult>,
    old_name: &str,
    new_name: &str,
    typed: &str,
) -> bool {
    let Some(preview) = preview else {
        return false;
    };
    preview.action == RenameAction::Preview
        && preview.old_name == old_name.trim()
        && preview.new_name == new_name.trim()
        && preview.total_affected() > 0
        && confirmation_matches(RENAME_CONFIRMATION, typed)
}

#[component]
fn RenameResultTable(result: RenameItemResult) -> impl IntoView {
    let total = result.total_affected();
    view! {
        <div class="admin-tools__result">
            <div class="admin-tools__result-title">
                {format!("\"{}\" → \"{}\": {} รายการ", result.old_name, result.new_name, total)}
            </div>
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=180.0>"ข้อมูล"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"ก่อน"</TableHeaderCell>
                        <TableHeaderCell min_width=80.0>"หลัง"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {result.collections.into_iter().map(|c| view! {
                        <TableRow>
                            <TableCell><TableCellLayout>{c.collection}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{c.before}</TableCellLayout></TableCell>
                            <TableCell><TableCellLayout>{c.after}</TableCellLayout></TableCell>
                        </TableRow>
                    }).collect_view()}
                </TableBody>
            </Table>
            {result.backup_id.map(|id| view! {
                <div class="form__hint">{format!("รหัสสำรองข้อมูล: {}", id)}</div>
            })}
        </div>
    }
}

#[component]
fn RenameItemTool() -> impl IntoView {
    let toast = use_toast();
    let cache = use_breakdown_cache();
    let refs = ReferenceData::load();
    let submit = FormSubmit::new();

    let old_name = RwSignal::new(String::new());
    let new_name = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let typed = RwSignal::new(String::new());
    let backup_id = RwSignal::new(String::new());
    let preview = RwSignal::new(None::<RenameItemResult>);
    let last_result = RwSignal::new(None::<RenameItemResult>);
    let error = RwSignal::new(None::<String>);

    let request = move |action: RenameAction| RenameItemRequest {
        action,
        old_name: old_name.get_untracked().trim().to_string(),
        new_name: new_name.get_untracked().trim().to_string(),
        category_id: non_empty(category.get_untracked()),
        backup_id: non_empty(backup_id.get_untracked()),
    };

    let send = {
        let submit = submit.clone();
        move |req: RenameItemRequest| {
            if let Err(e) = req.validate() {
                error.set(Some(e));
                return;
            }
            error.set(None);
            submit.run(move || async move {
                match api::rename_item(&req).await {
                    Ok(result) => match result.action {
                        RenameAction::Preview => preview.set(Some(result)),
                        RenameAction::Rename | RenameAction::Rollback => {
                            cache.clear();
                            toast.success(format!(
                                "ดำเนินการแล้ว {} รายการ",
                                result.total_affected()
                            ));
                            if let Some(id) = &result.backup_id {
                                backup_id.set(id.clone());
                            }
                            preview.set(None);
                            typed.set(String::new());
                            last_result.set(Some(result));
                        }
                    },
                    Err(e) => error.set(Some(e)),
                }
            });
        }
    };

    let rename_allowed = Signal::derive(move || {
        preview.with(|p| can_rename(p.as_ref(), &old_name.get(), &new_name.get(), &typed.get()))
    });
    let pending = submit.pending_signal();

    let send_preview = send.clone();
    let send_rename = send.clone();
    let send_rollback = send;

    view! {
        <Card>
            <h2 class="form__section-title">"เปลี่ยนชื่ออุปกรณ์"</h2>
            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
            <div class="form__grid">
                <div class="form__group">
                    <label class="form__label">"ชื่อเดิม"</label>
                    <Input value=old_name />
                </div>
                <div class="form__group">
                    <label class="form__label">"ชื่อใหม่"</label>
                    <Input value=new_name />
                </div>
                <div class="form__group">
                    <label class="form__label">"หมวดหมู่"</label>
                    <Select value=category>
                        <option value="">"ทุกหมวดหมู่"</option>
                        {move || refs.entries(ConfigKind::Category).into_iter().map(|c| view! {
                            <option value=c.id>{c.name}</option>
                        }).collect_view()}
                    </Select>
                </div>
            </div>
            <Space>
                {view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=pending
                        on_click=move |_| send_preview(request(RenameAction::Preview))
                    >
                        "ตรวจสอบก่อน"
                    </Button>
                }.into_any()}
            </Space>

            {move || preview.get().map(|result| view! { <RenameResultTable result=result /> })}

            <Show when=move || preview.with(|p| p.is_some())>
                <div class="form__group">
                    <label class="form__label">
                        {format!("พิมพ์ {} เพื่อยืนยัน", RENAME_CONFIRMATION)}
                    </label>
                    <Input value=typed placeholder=RENAME_CONFIRMATION />
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || pending.get() || !rename_allowed.get())
                    on_click={
                        let send_rename = send_rename.clone();
                        move |_| send_rename(request(RenameAction::Rename))
                    }
                >
                    {icon("edit")}
                    " เปลี่ยนชื่อ"
                </Button>
            </Show>

            {move || last_result.get().map(|result| view! { <RenameResultTable result=result /> })}

            <div class="form__group">
                <label class="form__label">"ย้อนกลับจากรหัสสำรองข้อมูล"</label>
                <Flex align=FlexAlign::Center>
                    <Input value=backup_id placeholder="รหัสสำรองข้อมูล" />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=pending
                        on_click=move |_| {
                            if confirm("ย้อนกลับการเปลี่ยนชื่อครั้งนี้ใช่หรือไม่?") {
                                send_rollback(request(RenameAction::Rollback));
                            }
                        }
                    >
                        {icon("undo")}
                        " ย้อนกลับ"
                    </Button>
                </Flex>
            </div>
        </Card>
    }
}

#[component]
fn FixReportView(report: FixReport) -> impl IntoView {
    view! {
        <div class="admin-tools__result">
            <Badge
                appearance=BadgeAppearance::Tint
                color=if report.success { BadgeColor::Success } else { BadgeColor::Warning }
            >
                {report.message}
            </Badge>
            {(!report.details.is_empty()).then(|| view! {
                <ul class="admin-tools__details">
                    {report.details.into_iter().map(|d| view! {
                        <li class:admin-tools__detail--unresolved=!d.fixed>
                            {format!("{}: {}", d.record_id, d.description)}
                        </li>
                    }).collect_view()}
                </ul>
            })}
        </div>
    }
}

#[component]
fn FixTool(kind: FixKind) -> impl IntoView {
    let toast = use_toast();
    let cache = use_breakdown_cache();
    let submit = FormSubmit::new();
    let report = RwSignal::new(None::<FixReport>);
    let pending = submit.pending_signal();

    let run = move |_| {
        if !confirm(&format!("{} ใช่หรือไม่?", kind.title())) {
            return;
        }
        submit.run(move || async move {
            match api::run_fix(kind).await {
                Ok(r) => {
                    if r.summary.fixed > 0 {
                        cache.clear();
                    }
                    report.set(Some(r));
                }
                Err(e) => toast.error(e),
            }
        });
    };

    view! {
        <div class="admin-tools__fix">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <span>{kind.title()}</span>
                <Button appearance=ButtonAppearance::Secondary disabled=pending on_click=run>
                    {icon("tool")}
                    {move || if pending.get() { " กำลังทำงาน..." } else { " เริ่ม" }}
                </Button>
            </Flex>
            {move || report.get().map(|r| view! { <FixReportView report=r /> })}
        </div>
    }
}

#[component]
fn AuthStatusPanel() -> impl IntoView {
    let report = RwSignal::new(None::<Result<AuthStatusReport, String>>);

    let check = move |_| {
        spawn_local(async move {
            report.set(Some(auth_api::auth_status().await));
        });
    };

    let yes_no = |v: bool| if v { "ใช่" } else { "ไม่" };

    view! {
        <Card>
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2 class="form__section-title">"ตรวจสอบการยืนยันตัวตน"</h2>
                <Button appearance=ButtonAppearance::Secondary on_click=check>
                    {icon("lock")}
                    " ตรวจสอบ"
                </Button>
            </Flex>
            {move || report.get().map(|r| match r {
                Ok(status) => view! {
                    <dl class="details-list">
                        <dt>"ส่ง Authorization header"</dt>
                        <dd>{yes_no(status.has_authorization_header)}</dd>
                        <dt>"โทเค็นใช้ได้"</dt>
                        <dd>{yes_no(status.token_valid)}</dd>
                        <dt>"ผู้ดูแลระบบ"</dt>
                        <dd>{yes_no(status.is_admin)}</dd>
                        <dt>"ผู้ใช้"</dt>
                        <dd>{status.user.map(|u| u.display_name().to_string()).unwrap_or_else(|| "-".into())}</dd>
                        <dt>"ข้อความ"</dt>
                        <dd>{status.message}</dd>
                    </dl>
                }.into_any(),
                Err(e) => view! {
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__text">{e}</span>
                    </div>
                }.into_any(),
            })}
        </Card>
    }
}

#[component]
pub fn AdminToolsPage() -> impl IntoView {
    view! {
        <PageFrame page_id="sys_admin_tools--admin" category=PAGE_CAT_ADMIN title="เครื่องมือผู้ดูแล">
            <RenameItemTool />
            <Card>
                <h2 class="form__section-title">"ซ่อมแซมข้อมูล"</h2>
                {FixKind::all().into_iter().map(|kind| view! { <FixTool kind=kind /> }).collect_view()}
            </Card>
            <AuthStatusPanel />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::maintenance::CollectionCount;

    fn preview(before: u32) -> RenameItemResult {
        RenameItemResult {
            action: RenameAction::Preview,
            old_name: "Mouse".into(),
            new_name: "เมาส์".into(),
            collections: vec![CollectionCount {
                collection: "inventory".into(),
                before,
                after: 0,
            }],
            backup_id: None,
        }
    }

    #[test]
    fn test_can_rename_requires_preview_and_confirmation() {
        assert!(!can_rename(None, "Mouse", "เมาส์", "RENAME"));
        assert!(!can_rename(Some(&preview(3)), "Mouse", "เมาส์", "rename"));
        assert!(can_rename(Some(&preview(3)), " Mouse ", "เมาส์", "RENAME"));
    }

    #[test]
    fn test_can_rename_rejects_stale_or_empty_preview() {
        assert!(!can_rename(Some(&preview(3)), "Keyboard", "เมาส์", "RENAME"));
        assert!(!can_rename(Some(&preview(0)), "Mouse", "เมาส์", "RENAME"));
    }
}
