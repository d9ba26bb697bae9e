//! Настройка справочников склада: категории, статусы, состояния.
//!
//! Страница владеет `InventoryConfig`; каждый `OrderedListEditor` получает
//! свой срез и сообщает изменения колбэками. Изменение применяется сразу
//! (оптимистично), при ошибке сервера справочник перечитывается.

use contracts::domain::a001_inventory_config::ordering::sorted_by_order;
use contracts::domain::a001_inventory_config::{ConfigEntry, ConfigKind, InventoryConfig};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_inventory_config::api;
use crate::shared::breakdown_cache::use_breakdown_cache;
use crate::shared::components::OrderedListEditor;
use crate::shared::dialog::confirm;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_ADMIN;
use crate::shared::toast::use_toast;

#[derive(Clone, Copy)]
struct ConfigStore {
    config: RwSignal<InventoryConfig>,
    error: RwSignal<Option<String>>,
    loading: RwSignal<bool>,
}

impl ConfigStore {
    fn reload(self) {
        self.loading.set(true);
        spawn_local(async move {
            match api::fetch_admin_config().await {
                Ok(config) => {
                    self.config.set(config);
                    self.error.set(None);
                }
                Err(e) => {
                    log::error!("inventory config: load failed: {}", e);
                    self.error.set(Some(e));
                }
            }
            self.loading.set(false);
        });
    }

    fn set_entries(self, kind: ConfigKind, entries: Vec<ConfigEntry>) {
        self.config.update(|c| *c.entries_mut(kind) = entries);
    }

    fn upsert(self, kind: ConfigKind, entry: ConfigEntry) {
        self.config.update(|c| {
            let entries = c.entries_mut(kind);
            match entries.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        });
    }

    fn sorted(self, kind: ConfigKind) -> Vec<ConfigEntry> {
        self.config.with_untracked(|c| sorted_by_order(c.entries(kind)))
    }
}

#[component]
fn ConfigSection(kind: ConfigKind, store: ConfigStore) -> impl IntoView {
    let toast = use_toast();
    let cache = use_breakdown_cache();
    let saving = RwSignal::new(false);

    let entries = Signal::derive(move || store.config.with(|c| c.entries(kind).to_vec()));

    // общий хвост: сообщение, сброс кэша разбивок, перечитать при ошибке
    let finish = move |result: Result<(), String>, done: &'static str| {
        saving.set(false);
        match result {
            Ok(()) => {
                cache.clear();
                toast.success(done);
            }
            Err(e) => {
                toast.error(format!("บันทึก{}ไม่สำเร็จ: {}", kind.display_name(), e));
                store.reload();
            }
        }
    };

    let on_reorder = Callback::new(move |reordered: Vec<ConfigEntry>| {
        store.set_entries(kind, reordered.clone());
        saving.set(true);
        spawn_local(async move {
            let result = api::replace_entries(kind, &reordered)
                .await
                .map(|saved| store.set_entries(kind, saved));
            finish(result, "จัดลำดับแล้ว");
        });
    });

    let on_update = Callback::new(move |(_index, entry): (usize, ConfigEntry)| {
        store.upsert(kind, entry.clone());
        saving.set(true);
        spawn_local(async move {
            let result = api::rename_entry(kind, &entry.id, entry.name.clone())
                .await
                .map(|saved| store.upsert(kind, saved));
            finish(result, "เปลี่ยนชื่อแล้ว");
        });
    });

    let on_delete = Callback::new(move |index: usize| {
        let Some(entry) = store.sorted(kind).into_iter().nth(index) else {
            return;
        };
        if !confirm(&format!("ลบ \"{}\" ใช่หรือไม่?", entry.name)) {
            return;
        }
        saving.set(true);
        spawn_local(async move {
            let result = api::delete_entry(kind, &entry.id)
                .await
                .map(|remaining| store.set_entries(kind, remaining));
            finish(result, "ลบแล้ว");
        });
    });

    let on_add = Callback::new(move |name: String| {
        saving.set(true);
        spawn_local(async move {
            let result = api::add_entry(kind, name)
                .await
                .map(|created| store.upsert(kind, created));
            finish(result, "เพิ่มแล้ว");
        });
    });

    view! {
        <Card>
            <div class="config-section">
                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                    <h2 class="config-section__title">{kind.display_name()}</h2>
                    {move || saving.get().then(|| view! { <Spinner size=SpinnerSize::Tiny /> })}
                </Flex>
                <OrderedListEditor
                    entries=entries
                    on_reorder=on_reorder
                    on_update=on_update
                    on_delete=on_delete
                    on_add=on_add
                    placeholder=format!("เพิ่ม{}ใหม่", kind.display_name())
                    disabled=saving
                />
            </div>
        </Card>
    }
}

#[component]
pub fn InventoryConfigSettings() -> impl IntoView {
    let store = ConfigStore {
        config: RwSignal::new(InventoryConfig::default()),
        error: RwSignal::new(None),
        loading: RwSignal::new(false),
    };
    store.reload();

    view! {
        <PageFrame page_id="a001_inventory_config--admin" category=PAGE_CAT_ADMIN title="ตั้งค่าคลัง">
            <Flex justify=FlexJustify::End>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| store.reload()
                    disabled=Signal::derive(move || store.loading.get())
                >
                    {icon("refresh")}
                    " โหลดใหม่"
                </Button>
            </Flex>
            {move || store.error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">{icon("alert")}</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}
            <div class="config-grid">
                {ConfigKind::all()
                    .into_iter()
                    .map(|kind| view! { <ConfigSection kind=kind store=store /> })
                    .collect_view()}
            </div>
        </PageFrame>
    }
}
