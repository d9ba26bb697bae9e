//! Редактор упорядоченного списка справочника (категории, статусы, состояния).
//!
//! Коллекцией владеет родитель: компонент сортирует её по `order`, а все
//! изменения отдаёт наверх через колбэки. Индексы в колбэках относятся к
//! отсортированному виду. Внутри хранится только `ListEditorState`
//! (какая строка редактируется, черновик, текст новой записи).
//!
//! Перетаскивание мышью (`SortableDnd`), с клавиатуры Alt+↑/Alt+↓ на
//! строке в фокусе.

use chrono::{DateTime, Utc};
use contracts::domain::a001_inventory_config::editor::{EditorOutcome, ListEditorState};
use contracts::domain::a001_inventory_config::ordering::sorted_by_order;
use contracts::domain::a001_inventory_config::ConfigEntry;
use leptos::prelude::*;

use crate::shared::dnd::SortableDnd;
use crate::shared::icons::icon;

#[derive(Clone, Copy)]
struct EditorCallbacks {
    on_reorder: Callback<Vec<ConfigEntry>>,
    on_update: Callback<(usize, ConfigEntry)>,
    on_delete: Callback<usize>,
    on_add: Option<Callback<String>>,
}

impl EditorCallbacks {
    fn emit(&self, outcome: EditorOutcome<ConfigEntry>) {
        match outcome {
            EditorOutcome::Reorder(entries) => self.on_reorder.run(entries),
            EditorOutcome::Update { index, entry } => self.on_update.run((index, entry)),
            EditorOutcome::Delete(index) => self.on_delete.run(index),
            EditorOutcome::Add(name) => {
                if let Some(on_add) = self.on_add {
                    on_add.run(name);
                }
            }
        }
    }
}

#[derive(Clone, Copy)]
struct Editor {
    state: RwSignal<ListEditorState>,
    sorted: Memo<Vec<ConfigEntry>>,
    callbacks: EditorCallbacks,
}

impl Editor {
    /// Один шаг: изменить состояние и, если нужно, сообщить родителю
    fn step<F>(self, f: F)
    where
        F: FnOnce(&mut ListEditorState, &[ConfigEntry], DateTime<Utc>) -> Option<EditorOutcome<ConfigEntry>>,
    {
        let entries = self.sorted.get_untracked();
        let now = Utc::now();
        let outcome = self.state.try_update(|s| f(s, &entries, now)).flatten();
        if let Some(outcome) = outcome {
            self.callbacks.emit(outcome);
        }
    }
}

#[component]
pub fn OrderedListEditor(
    #[prop(into)] entries: Signal<Vec<ConfigEntry>>,
    on_reorder: Callback<Vec<ConfigEntry>>,
    on_update: Callback<(usize, ConfigEntry)>,
    on_delete: Callback<usize>,
    /// Без колбэка строка добавления не рисуется
    #[prop(optional)]
    on_add: Option<Callback<String>>,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    let editor = Editor {
        state: RwSignal::new(ListEditorState::new()),
        sorted: Memo::new(move |_| sorted_by_order(&entries.get())),
        callbacks: EditorCallbacks {
            on_reorder,
            on_update,
            on_delete,
            on_add,
        },
    };
    let editing = Memo::new(move |_| editor.state.with(|s| s.editing_index()));

    let dnd = SortableDnd::new(Callback::new(move |(from, to): (usize, usize)| {
        if disabled.get_untracked() {
            return;
        }
        editor.step(|s, sorted, now| s.drop_item(sorted, from, to, now));
    }));

    let render_row = move |index: usize, entry: ConfigEntry| {
        let is_editing = editing.get() == Some(index);
        let can_delete = ListEditorState::can_delete(&entry);
        let name_for_edit = entry.name.clone();

        let on_row_keydown = move |ev: leptos::ev::KeyboardEvent| {
            if !ev.alt_key() || disabled.get_untracked() {
                return;
            }
            let delta = match ev.key().as_str() {
                "ArrowUp" => -1,
                "ArrowDown" => 1,
                _ => return,
            };
            ev.prevent_default();
            editor.step(|s, sorted, now| s.move_by(sorted, index, delta, now));
        };

        let name_cell = if is_editing {
            let draft = editor.state.with_untracked(|s| s.draft().to_string());
            view! {
                <input
                    class="ordered-list__input"
                    type="text"
                    prop:value=draft
                    autofocus=true
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        editor.state.update(|s| s.set_draft(value));
                    }
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        ev.stop_propagation();
                        let key = ev.key();
                        editor.step(|s, sorted, now| s.handle_edit_key(&key, sorted, now));
                    }
                />
                <button class="icon-button" title="บันทึก" on:click=move |_| {
                    editor.step(|s, sorted, now| s.commit_edit(sorted, now));
                }>{icon("check")}</button>
                <button class="icon-button" title="ยกเลิก" on:click=move |_| {
                    editor.state.update(|s| s.cancel_edit());
                }>{icon("x")}</button>
            }
            .into_any()
        } else {
            view! {
                <span class="ordered-list__name">{entry.name.clone()}</span>
                {entry.is_system_config.then(|| view! {
                    <span class="badge badge--neutral" title="รายการของระบบ ลบไม่ได้">{icon("lock")}" ระบบ"</span>
                })}
                <button
                    class="icon-button"
                    title="แก้ไข"
                    disabled=move || disabled.get()
                    on:click=move |_| {
                        let name = name_for_edit.clone();
                        editor.state.update(|s| s.begin_edit(index, &name));
                    }
                >{icon("edit")}</button>
                {can_delete.then(|| view! {
                    <button
                        class="icon-button icon-button--danger"
                        title="ลบ"
                        disabled=move || disabled.get()
                        on:click=move |_| editor.step(|s, sorted, _| s.request_delete(sorted, index))
                    >{icon("delete")}</button>
                })}
            }
            .into_any()
        };

        view! {
            <li
                class="ordered-list__row"
                class:ordered-list__row--dragging=move || dnd.is_dragging(index)
                class:ordered-list__row--over=move || dnd.is_drop_target(index)
                tabindex="0"
                data-entry-id=entry.id.clone()
                on:keydown=on_row_keydown
                on:mouseenter=move |_| dnd.on_row_enter(index)
            >
                <span
                    class="ordered-list__handle"
                    title="ลากเพื่อจัดลำดับ (Alt+↑/↓)"
                    on:mousedown=move |ev| {
                        if !disabled.get_untracked() {
                            dnd.on_mousedown(index, &ev);
                        }
                    }
                >{icon("grip")}</span>
                <span class="ordered-list__order">{entry.order}</span>
                {name_cell}
            </li>
        }
    };

    let add_row = on_add.map(|_| {
        let submit = move || editor.step(|s, _, _| s.submit_new_item());
        view! {
            <div class="ordered-list__add">
                <input
                    type="text"
                    class="ordered-list__input"
                    placeholder=placeholder.unwrap_or_else(|| "เพิ่มรายการใหม่".to_string())
                    prop:value=move || editor.state.with(|s| s.new_item().to_string())
                    disabled=move || disabled.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        editor.state.update(|s| s.set_new_item(value));
                    }
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            submit();
                        }
                    }
                />
                <button
                    class="button button--primary"
                    disabled=move || disabled.get()
                    on:click=move |_| submit()
                >
                    {icon("plus")}
                    " เพิ่ม"
                </button>
            </div>
        }
    });

    view! {
        <div class="ordered-list" class:ordered-list--dragging=move || dnd.is_active()>
            <ul class="ordered-list__rows">
                {move || {
                    editor
                        .sorted
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, entry)| render_row(index, entry))
                        .collect_view()
                }}
            </ul>
            {add_row}
        </div>
    }
}
