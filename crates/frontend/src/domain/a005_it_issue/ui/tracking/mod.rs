//! ติดตามปัญหา: список заявок в IT с фильтром по статусу и офису.
//! Админ открывает заявку и переводит её по статусам, указывая
//! ответственного и примечание.

use contracts::domain::a005_it_issue::{IssueFilter, IssueStatus, ItIssue, UpdateIssueStatusDto};
use contracts::domain::a004_equipment_request::Urgency;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a003_inventory_item::api::non_empty;
use crate::domain::a005_it_issue::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::date_utils::{format_thai_datetime, format_thai_datetime_opt};
use crate::shared::form_submit::FormSubmit;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::reference_data::ReferenceData;
use crate::shared::toast::use_toast;
use crate::system::auth::context::use_auth;

fn status_color(status: IssueStatus) -> BadgeColor {
    match status {
        IssueStatus::Pending => BadgeColor::Warning,
        IssueStatus::InProgress => BadgeColor::Brand,
        IssueStatus::Completed => BadgeColor::Success,
        IssueStatus::Closed => BadgeColor::Subtle,
    }
}

fn next_statuses(current: IssueStatus) -> Vec<IssueStatus> {
    IssueStatus::all()
        .into_iter()
        .filter(|next| current.can_transition_to(*next))
        .collect()
}

/// Счётчики по статусам для шапки
fn count_by_status(issues: &[ItIssue]) -> Vec<(IssueStatus, usize)> {
    IssueStatus::all()
        .into_iter()
        .map(|s| (s, issues.iter().filter(|i| i.status == s).count()))
        .collect()
}

#[component]
fn IssueAdminPanel(issue: ItIssue, on_updated: Callback<ItIssue>) -> impl IntoView {
    let toast = use_toast();
    let submit = FormSubmit::new();
    let assigned_admin = RwSignal::new(issue.assigned_admin.clone().unwrap_or_default());
    let notes = RwSignal::new(issue.notes.clone().unwrap_or_default());
    let id = issue.id.clone();
    let pending = submit.pending_signal();

    let buttons = next_statuses(issue.status)
        .into_iter()
        .map(|next| {
            let submit = submit.clone();
            let id = id.clone();
            view! {
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    disabled=pending
                    on_click=move |_| {
                        let dto = UpdateIssueStatusDto {
                            status: next,
                            assigned_admin: non_empty(assigned_admin.get_untracked()),
                            notes: non_empty(notes.get_untracked()),
                        };
                        let id = id.clone();
                        submit.run(move || async move {
                            match api::update_status(&id, &dto).await {
                                Ok(updated) => {
                                    toast.success(format!(
                                        "{}: {}",
                                        updated.issue_no,
                                        updated.status.display_name()
                                    ));
                                    on_updated.run(updated);
                                }
                                Err(e) => toast.error(e),
                            }
                        });
                    }
                >
                    {next.display_name()}
                </Button>
            }
        })
        .collect_view();

    view! {
        <div class="issue-admin">
            <div class="form__grid">
                <div class="form__group">
                    <label class="form__label">"ผู้รับผิดชอบ"</label>
                    <Input value=assigned_admin placeholder="เว้นว่าง = ตัวท่านเอง" />
                </div>
                <div class="form__group">
                    <label class="form__label">"บันทึกการแก้ไข"</label>
                    <Textarea value=notes />
                </div>
            </div>
            <Space>{buttons}</Space>
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn IssueTracking() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth = use_auth();
    let refs = ReferenceData::load();

    let (items, set_items) = signal::<Vec<ItIssue>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let status = RwSignal::new(String::new());
    let office = RwSignal::new(String::new());
    let selected = RwSignal::new(None::<String>);

    let fetch = move || {
        let filter = IssueFilter {
            status: IssueStatus::parse(&status.get_untracked()),
            office_id: non_empty(office.get_untracked()),
        };
        set_loading.set(true);
        spawn_local(async move {
            match api::list(&filter).await {
                Ok(v) => {
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    ctx.on_activate("a005_issues", fetch);

    Effect::new(move |prev: Option<()>| {
        status.track();
        office.track();
        if prev.is_some() {
            fetch();
        }
    });

    let on_updated = Callback::new(move |updated: ItIssue| {
        set_items.update(|list| {
            if let Some(slot) = list.iter_mut().find(|i| i.id == updated.id) {
                *slot = updated;
            }
        });
    });

    let selected_issue = Memo::new(move |_| {
        let id = selected.get()?;
        items.with(|list| list.iter().find(|i| i.id == id).cloned())
    });

    view! {
        <PageFrame page_id="a005_issues--list" category=PAGE_CAT_LIST title="ติดตามปัญหา">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::End>
                <Space>
                    <Select value=status>
                        <option value="">"ทุกสถานะ"</option>
                        {IssueStatus::all().into_iter().map(|s| view! {
                            <option value=s.as_str()>{s.display_name()}</option>
                        }).collect_view()}
                    </Select>
                    <Select value=office>
                        <option value="">"ทุกสาขา"</option>
                        {move || refs.offices.get().into_iter().map(|o| view! {
                            <option value=o.id>{o.name}</option>
                        }).collect_view()}
                    </Select>
                </Space>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| fetch()
                    disabled=Signal::derive(move || loading.get())
                >
                    {icon("refresh")}
                    " รีเฟรช"
                </Button>
            </Flex>

            <div class="issue-counters">
                {move || items.with(|list| count_by_status(list)).into_iter().map(|(s, n)| view! {
                    <Badge appearance=BadgeAppearance::Tint color=status_color(s)>
                        {format!("{} {}", s.display_name(), n)}
                    </Badge>
                }).collect_view()}
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=150.0>"เลขที่"</TableHeaderCell>
                        <TableHeaderCell min_width=140.0>"วันที่แจ้ง"</TableHeaderCell>
                        <TableHeaderCell resizable=true min_width=160.0>"ผู้แจ้ง"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"สาขา"</TableHeaderCell>
                        <TableHeaderCell min_width=130.0>"ประเภท"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"สถานะ"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"ผู้รับผิดชอบ"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|issue| {
                        let id = issue.id.clone();
                        let id_for_class = issue.id.clone();
                        view! {
                            <TableRow
                                class:table__row--selected=move || selected.with(|s| s.as_deref() == Some(id_for_class.as_str()))
                                on:click=move |_| selected.set(Some(id.clone()))
                            >
                                <TableCell>
                                    <TableCellLayout>
                                        {issue.issue_no.clone()}
                                        {(issue.urgency == Urgency::VeryUrgent).then(|| view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                                                {Urgency::VeryUrgent.display_name()}
                                            </Badge>
                                        })}
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{format_thai_datetime(issue.metadata.created_at)}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{issue.reporter_name.clone()}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{refs.office_name(&issue.office_id)}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>{issue.issue_type.display_name()}</TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        <Badge appearance=BadgeAppearance::Tint color=status_color(issue.status)>
                                            {issue.status.display_name()}
                                        </Badge>
                                    </TableCellLayout>
                                </TableCell>
                                <TableCell>
                                    <TableCellLayout>
                                        {issue.assigned_admin.clone().unwrap_or_else(|| "-".into())}
                                    </TableCellLayout>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>

            {move || selected_issue.get().map(|issue| {
                let admin_panel = (auth.is_admin() && !next_statuses(issue.status).is_empty())
                    .then(|| view! { <IssueAdminPanel issue=issue.clone() on_updated=on_updated /> });
                view! {
                    <Card>
                        <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                            <h2 class="form__section-title">{format!("{} - {}", issue.issue_no, issue.reporter_name)}</h2>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                on_click=move |_| selected.set(None)
                            >
                                {icon("x")}
                            </Button>
                        </Flex>
                        <dl class="details-list">
                            <dt>"โทร"</dt>
                            <dd>{issue.phone.clone()}</dd>
                            <dt>"รายละเอียด"</dt>
                            <dd class="details-list__text">{issue.description.clone()}</dd>
                            <dt>"บันทึกการแก้ไข"</dt>
                            <dd>{issue.notes.clone().unwrap_or_else(|| "-".into())}</dd>
                            <dt>"เสร็จเมื่อ"</dt>
                            <dd>{format_thai_datetime_opt(issue.completed_at)}</dd>
                        </dl>
                        {admin_panel}
                    </Card>
                }
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_statuses() {
        assert_eq!(next_statuses(IssueStatus::Pending), vec![IssueStatus::InProgress]);
        assert_eq!(
            next_statuses(IssueStatus::Completed),
            vec![IssueStatus::InProgress, IssueStatus::Closed]
        );
        assert!(next_statuses(IssueStatus::Closed).is_empty());
    }

    #[test]
    fn test_count_by_status_empty() {
        let counts = count_by_status(&[]);
        assert_eq!(counts.len(), 4);
        assert!(counts.iter().all(|(_, n)| *n == 0));
    }
}
