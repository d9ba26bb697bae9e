use contracts::domain::a004_equipment_request::{
    EquipmentRequest, RequestKind, RequestStatus, UpdateRequestStatusDto, Urgency,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_equipment_request::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::breakdown_cache::use_breakdown_cache;
use crate::shared::date_utils::format_thai_datetime;
use crate::shared::dialog::confirm;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::reference_data::ReferenceData;
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;

/// Куда админ может перевести заявку из текущего статуса
fn next_statuses(current: RequestStatus) -> Vec<RequestStatus> {
    [
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Completed,
    ]
    .into_iter()
    .filter(|next| current.can_transition_to(*next))
    .collect()
}

fn status_color(status: RequestStatus) -> BadgeColor {
    match status {
        RequestStatus::Pending => BadgeColor::Warning,
        RequestStatus::Approved => BadgeColor::Brand,
        RequestStatus::Rejected => BadgeColor::Danger,
        RequestStatus::Completed => BadgeColor::Success,
    }
}

fn kind_filter(value: &str) -> Option<RequestKind> {
    match value {
        "request" => Some(RequestKind::Request),
        "return" => Some(RequestKind::Return),
        _ => None,
    }
}

fn lines_summary(request: &EquipmentRequest) -> String {
    request
        .lines
        .iter()
        .map(|l| format!("{} x{}", l.item_name, l.quantity))
        .collect::<Vec<_>>()
        .join(", ")
}

#[component]
#[allow(non_snake_case)]
pub fn RequestList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let toast = use_toast();
    let cache = use_breakdown_cache();
    let refs = ReferenceData::load();

    let (items, set_items) = signal::<Vec<EquipmentRequest>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let kind = RwSignal::new(String::new());
    let busy_id = RwSignal::new(None::<String>);

    let fetch = move || {
        let kind = kind_filter(&kind.get_untracked());
        set_loading.set(true);
        spawn_local(async move {
            match api::list(kind).await {
                Ok(v) => {
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    ctx.on_activate("a004_requests", fetch);

    // смена фильтра вида - сразу перечитать
    Effect::new(move |prev: Option<()>| {
        kind.track();
        if prev.is_some() {
            fetch();
        }
    });

    let change_status = move |request: EquipmentRequest, next: RequestStatus| {
        let question = format!(
            "เปลี่ยนสถานะคำขอของ {} เป็น \"{}\" ใช่หรือไม่?",
            request.requester_name,
            next.display_name()
        );
        if !confirm(&question) {
            return;
        }
        busy_id.set(Some(request.id.clone()));
        spawn_local(async move {
            let dto = UpdateRequestStatusDto {
                status: next,
                notes: None,
            };
            match api::update_status(&request.id, &dto).await {
                Ok(updated) => {
                    if updated.status == RequestStatus::Completed {
                        cache.clear();
                    }
                    set_items.update(|list| {
                        if let Some(slot) = list.iter_mut().find(|r| r.id == updated.id) {
                            *slot = updated;
                        }
                    });
                    toast.success(format!("สถานะ: {}", next.display_name()));
                }
                Err(e) => toast.error(e),
            }
            busy_id.set(None);
        });
    };

    view! {
        <PageFrame page_id="a004_requests--list" category=PAGE_CAT_LIST title="รายการเบิก/คืน">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::End>
                <Select value=kind>
                    <option value="">"ทั้งหมด"</option>
                    <option value="request">{RequestKind::Request.display_name()}</option>
                    <option value="return">{RequestKind::Return.display_name()}</option>
                </Select>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| fetch()
                    disabled=Signal::derive(move || loading.get())
                >
                    {icon("refresh")}
                    " รีเฟรช"
                </Button>
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
                        <TableHeaderCell min_width=140.0>"วันที่"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"ประเภท"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=160.0>"ผู้ขอ"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"สาขา"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=240.0>"รายการ"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"สถานะ"</TableHeaderCell>
                        <TableHeaderCell min_width=180.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|request| {
                        let summary = lines_summary(&request);
                        let office = refs.office_name(&request.office_id);
                        let status = request.status;
                        let id = request.id.clone();
                        let actions = auth.is_admin().then(|| {
                            next_statuses(status).into_iter().map(|next| {
                                let request = request.clone();
                                let id = id.clone();
                                view! {
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Secondary
                                        disabled=Signal::derive(move || busy_id.with(|b| b.as_deref() == Some(id.as_str())))
                                        on_click=move |_| change_status(request.clone(), next)
                                    >
                                        {next.display_name()}
                                    </Button>
                                }
                            }).collect_view()
                        });
                        view! {
                            <TableRow>
                                <TableCell>
                                    <TableCellLayout>{format_thai_datetime(request.metadata.created_at)}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{request.kind.display_name()}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {request.requester_name.clone()}
                                        {(request.urgency == Urgency::VeryUrgent).then(|| view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                                                {Urgency::VeryUrgent.display_name()}
                                            </Badge>
                                        })}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{office}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{summary}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <Badge appearance=BadgeAppearance::Tint color=status_color(status)>
                                            {status.display_name()}
                                        </Badge>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <Space>{actions.into_any()}</Space>
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_statuses() {
        assert_eq!(
            next_statuses(RequestStatus::Pending),
            vec![RequestStatus::Approved, RequestStatus::Rejected]
        );
        assert_eq!(
            next_statuses(RequestStatus::Approved),
            vec![RequestStatus::Completed]
        );
        assert!(next_statuses(RequestStatus::Completed).is_empty());
        assert!(next_statuses(RequestStatus::Rejected).is_empty());
    }

    #[test]
    fn test_kind_filter() {
        assert_eq!(kind_filter("return"), Some(RequestKind::Return));
        assert_eq!(kind_filter(""), None);
    }
}
