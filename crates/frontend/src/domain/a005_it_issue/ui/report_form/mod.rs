use contracts::domain::a004_equipment_request::Urgency;
use contracts::domain::a005_it_issue::aggregate::MAX_DESCRIPTION_LEN;
use contracts::domain::a005_it_issue::{CreateItIssueDto, IssueType, ItIssue};
use contracts::shared::validation::digits_only;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a005_it_issue::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::form_submit::FormSubmit;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_FORM;
use crate::shared::reference_data::ReferenceData;
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;

#[component]
#[allow(non_snake_case)]
pub fn IssueReportForm() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let toast = use_toast();
    let refs = ReferenceData::load();
    let submit = FormSubmit::new();

    let reporter_name = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let office_id = RwSignal::new(String::new());
    let issue_type = RwSignal::new(IssueType::Computer.as_str().to_string());
    let urgency = RwSignal::new(Urgency::Normal.as_str().to_string());
    let description = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let created = RwSignal::new(None::<ItIssue>);

    Effect::new(move |_| {
        if reporter_name.with_untracked(|n| n.is_empty()) {
            if let Some(user) = auth.user_info() {
                reporter_name.set(user.display_name().to_string());
            }
        }
        if office_id.with_untracked(|o| o.is_empty()) {
            if let Some(id) = refs.default_office_id() {
                office_id.set(id);
            }
        }
    });

    let length = Memo::new(move |_| description.with(|d| d.chars().count()));

    let submit_for_save = submit.clone();
    let handle_save = move |_| {
        let dto = CreateItIssueDto {
            reporter_name: reporter_name.get_untracked().trim().to_string(),
            phone: digits_only(&phone.get_untracked()),
            office_id: office_id.get_untracked(),
            issue_type: IssueType::parse(&issue_type.get_untracked()).unwrap_or(IssueType::Other),
            urgency: Urgency::parse(&urgency.get_untracked()).unwrap_or_default(),
            description: description.get_untracked().trim().to_string(),
        };
        if let Err(e) = dto.validate() {
            error.set(Some(e));
            return;
        }
        error.set(None);
        submit_for_save.run(move || async move {
            match api::create(&dto).await {
                Ok(issue) => {
                    toast.success(format!("รับแจ้งปัญหาแล้ว เลขที่ {}", issue.issue_no));
                    description.set(String::new());
                    created.set(Some(issue));
                }
                Err(e) => error.set(Some(e)),
            }
        });
    };

    let pending = submit.pending_signal();

    view! {
        <PageFrame page_id="a005_issue_form--form" category=PAGE_CAT_FORM title="แจ้งปัญหาไอที">
            {move || error.get().or_else(|| refs.error.get()).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || created.get().map(|issue| view! {
                <div class="info-box">
                    <span>{format!("เลขที่แจ้งปัญหา: {} ({})", issue.issue_no, issue.status.display_name())}</span>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| ctx.open_tab("a005_issues", &tab_label_for_key("a005_issues"))
                    >
                        "ติดตามสถานะ"
                    </Button>
                </div>
            })}

            <Card>
                <div class="form__grid">
                    <div class="form__group">
                        <label class="form__label">
                            "ชื่อผู้แจ้ง"
                            <span class="form__required">"*"</span>
                        </label>
                        <Input value=reporter_name />
                    </div>
                    <div class="form__group">
                        <label class="form__label">
                            "เบอร์โทรศัพท์"
                            <span class="form__required">"*"</span>
                        </label>
                        <Input value=phone placeholder="0812345678" />
                    </div>
                    <div class="form__group">
                        <label class="form__label">
                            "สาขา"
                            <span class="form__required">"*"</span>
                        </label>
                        <Select value=office_id>
                            {move || refs.offices.get().into_iter().map(|o| view! {
                                <option value=o.id>{o.name}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"ประเภทปัญหา"</label>
                        <Select value=issue_type>
                            {IssueType::all().into_iter().map(|t| view! {
                                <option value=t.as_str()>{t.display_name()}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"ความเร่งด่วน"</label>
                        <Select value=urgency>
                            {Urgency::all().into_iter().map(|u| view! {
                                <option value=u.as_str()>{u.display_name()}</option>
                            }).collect_view()}
                        </Select>
                    </div>
                </div>
                <div class="form__group">
                    <label class="form__label">
                        "รายละเอียดปัญหา"
                        <span class="form__required">"*"</span>
                    </label>
                    <Textarea value=description placeholder="อธิบายอาการ เช่น เปิดเครื่องไม่ติด มีเสียงดัง" />
                    <div
                        class="form__hint"
                        class:form__hint--error={move || length.get() > MAX_DESCRIPTION_LEN}
                    >
                        {move || format!("{}/{}", length.get(), MAX_DESCRIPTION_LEN)}
                    </div>
                </div>
            </Card>

            <Flex justify=FlexJustify::End>
                <Button appearance=ButtonAppearance::Primary on_click=handle_save disabled=pending>
                    {icon("alert")}
                    {move || if pending.get() { " กำลังส่ง..." } else { " แจ้งปัญหา" }}
                </Button>
            </Flex>
        </PageFrame>
    }
}
