//! StatusCell: ячейка таблицы склада с подсказкой-разбивкой.
//!
//! Данные берутся из общего [`BreakdownCache`]; если их там нет, ячейка
//! сама запрашивает разбивку на следующем animation frame. Все переходы
//! состояния делает `BreakdownLoader`, компонент только исполняет команды
//! (запрос, таймеры) и рисует результат.

use std::time::Duration;

use contracts::domain::a003_inventory_item::{BreakdownBucket, BreakdownQuery, ItemBreakdown};
use contracts::shared::breakdown_loader::{
    BreakdownLoader, LoadState, LoaderCommand, DATA_TIMEOUT_MS, HARD_TIMEOUT_MS,
};
use contracts::shared::tooltip_placement::{
    fit_to_viewport, initial_placement, Placement, Rect, Size, TOOLTIP_GAP, VIEWPORT_MARGIN,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::breakdown_cache::{use_breakdown_cache, BreakdownCache};

/// Ширина подсказки до первого измерения
const ESTIMATED_TOOLTIP_WIDTH: f64 = 280.0;

/// Исполнитель команд загрузчика для одной ячейки
#[derive(Clone, Copy)]
struct CellDriver {
    loader: StoredValue<BreakdownLoader>,
    state: RwSignal<LoadState>,
    timers: StoredValue<Vec<TimeoutHandle>>,
    query: StoredValue<BreakdownQuery>,
    cache: BreakdownCache,
}

impl CellDriver {
    fn apply(self, step: impl FnOnce(&mut BreakdownLoader) -> Vec<LoaderCommand>) {
        // после размонтирования хранилище уже освобождено
        let Some((commands, state)) = self.loader.try_update_value(|loader| {
            let commands = step(loader);
            (commands, loader.state().clone())
        }) else {
            return;
        };
        self.state.try_set(state);
        for command in commands {
            self.execute(command);
        }
    }

    fn execute(self, command: LoaderCommand) {
        match command {
            LoaderCommand::ScheduleFetch(generation) => {
                request_animation_frame(move || {
                    let should_fetch = self
                        .loader
                        .try_with_value(|loader| loader.should_fetch(generation))
                        .unwrap_or(false);
                    let Some(query) = self.query.try_get_value() else {
                        return;
                    };
                    if !should_fetch {
                        return;
                    }
                    spawn_local(async move {
                        let outcome = self.cache.load(query).await;
                        self.apply(|loader| loader.on_fetch_resolved(generation, outcome));
                    });
                });
            }
            LoaderCommand::ArmHardTimeout(generation) => {
                self.arm(HARD_TIMEOUT_MS, move || {
                    self.apply(|loader| loader.on_hard_timeout(generation))
                });
            }
            LoaderCommand::ArmDataTimeout(generation) => {
                self.arm(DATA_TIMEOUT_MS, move || {
                    self.apply(|loader| loader.on_data_timeout(generation))
                });
            }
            LoaderCommand::CancelTimers => self.cancel_timers(),
        }
    }

    fn arm(self, ms: u32, callback: impl FnOnce() + 'static) {
        match set_timeout_with_handle(callback, Duration::from_millis(ms as u64)) {
            Ok(handle) => {
                self.timers.try_update_value(|timers| timers.push(handle));
            }
            Err(e) => log::error!("StatusCell: failed to arm timer: {:?}", e),
        }
    }

    fn cancel_timers(self) {
        self.timers.try_update_value(|timers| {
            for handle in timers.drain(..) {
                handle.clear();
            }
        });
    }
}

fn element_rect(element: &web_sys::Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

fn viewport_size() -> Size {
    let Some(window) = web_sys::window() else {
        return Size::new(0.0, 0.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Size::new(width, height)
}

#[component]
fn BucketList(title: &'static str, buckets: Vec<BreakdownBucket>) -> impl IntoView {
    view! {
        <div class="breakdown__section">
            <div class="breakdown__title">{title}</div>
            {if buckets.is_empty() {
                view! { <div class="breakdown__empty">"-"</div> }.into_any()
            } else {
                buckets
                    .into_iter()
                    .map(|b| view! {
                        <div class="breakdown__row">
                            <span>{b.label}</span>
                            <span class="breakdown__count">{b.count}</span>
                        </div>
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

fn render_breakdown(breakdown: ItemBreakdown) -> AnyView {
    view! {
        <div class="breakdown">
            <div class="breakdown__header">
                <strong>{breakdown.item_name}</strong>
                <span>{format!("ทั้งหมด {} ชิ้น", breakdown.total)}</span>
            </div>
            <BucketList title="สถานะ" buckets=breakdown.by_status />
            <BucketList title="สภาพ" buckets=breakdown.by_condition />
            <BucketList title="ประเภทการถือครอง" buckets=breakdown.by_ownership />
        </div>
    }
    .into_any()
}

#[component]
pub fn StatusCell(query: BreakdownQuery, children: Children) -> impl IntoView {
    let cache = use_breakdown_cache();
    let key = query.cache_key();

    let driver = CellDriver {
        loader: StoredValue::new(BreakdownLoader::new()),
        state: RwSignal::new(LoadState::Idle),
        timers: StoredValue::new(Vec::new()),
        query: StoredValue::new(query),
        cache,
    };

    let breakdown = Memo::new(move |_| cache.get(&key));

    // первый прогон = монтирование, дальше = изменения внешнего кэша
    Effect::new(move |prev: Option<bool>| {
        let present = breakdown.with(|b| b.is_some());
        match prev {
            None => driver.apply(|loader| loader.on_mount(present)),
            Some(was) if was != present => {
                driver.apply(|loader| loader.on_breakdown_changed(present))
            }
            Some(_) => {}
        }
        present
    });

    on_cleanup(move || driver.cancel_timers());

    // --- подсказка ---
    let hovered = RwSignal::new(false);
    let pinned = RwSignal::new(false);
    let placement = RwSignal::new(None::<Placement>);
    let trigger_ref = NodeRef::<leptos::html::Span>::new();
    let tooltip_ref = NodeRef::<leptos::html::Div>::new();

    let refine = move || {
        let (Some(trigger), Some(tooltip)) = (trigger_ref.get_untracked(), tooltip_ref.get_untracked())
        else {
            return;
        };
        let tooltip_rect = element_rect(&tooltip);
        placement.set(Some(fit_to_viewport(
            element_rect(&trigger),
            Size::new(tooltip_rect.width, tooltip_rect.height),
            viewport_size(),
            TOOLTIP_GAP,
            VIEWPORT_MARGIN,
        )));
    };

    let show = move || {
        let Some(trigger) = trigger_ref.get_untracked() else {
            return;
        };
        placement.set(Some(initial_placement(
            element_rect(&trigger),
            ESTIMATED_TOOLTIP_WIDTH,
            TOOLTIP_GAP,
        )));
        // кадр 1: подсказка отрисована, кадр 2: размер устоялся
        request_animation_frame(move || {
            refine();
            request_animation_frame(refine);
        });
    };

    let visible = move || (hovered.get() || pinned.get()) && placement.get().is_some();

    let on_enter = move |_| {
        hovered.set(true);
        if !pinned.get_untracked() {
            show();
        }
    };
    let on_leave = move |_| hovered.set(false);
    let on_trigger_click = move |_| {
        let next = !pinned.get_untracked();
        pinned.set(next);
        if next {
            show();
        }
    };

    let on_retry = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        driver.apply(|loader| loader.retry());
    };

    let tooltip_body = move || match driver.state.get() {
        LoadState::Success => match breakdown.get() {
            Some(b) => render_breakdown(b),
            None => view! { <div class="breakdown__loading">"กำลังโหลด..."</div> }.into_any(),
        },
        LoadState::Loading => {
            view! { <div class="breakdown__loading">"กำลังโหลด..."</div> }.into_any()
        }
        LoadState::Error(failure) => view! {
            <div class="breakdown__error">
                <span>{failure.message()}</span>
                <button class="button button--secondary" on:click=on_retry>"ลองใหม่"</button>
            </div>
        }
        .into_any(),
        LoadState::Idle => view! { <div class="breakdown__empty">"-"</div> }.into_any(),
    };

    view! {
        <span
            class="status-cell"
            class:status-cell--pinned=move || pinned.get()
            class:status-cell--loading=move || driver.state.with(|s| *s == LoadState::Loading)
            node_ref=trigger_ref
            on:mouseenter=on_enter
            on:mouseleave=on_leave
            on:click=on_trigger_click
        >
            {children()}
        </span>
        <Show when=move || pinned.get()>
            <div
                class="status-cell__backdrop"
                style="position: fixed; inset: 0; z-index: 999;"
                on:click=move |_| pinned.set(false)
            ></div>
        </Show>
        <Show when=visible>
            <div
                class="status-cell__tooltip"
                node_ref=tooltip_ref
                style=move || placement.get().map(|p| p.to_style()).unwrap_or_default()
                on:mouseenter=move |_| hovered.set(true)
                on:mouseleave=move |_| hovered.set(false)
            >
                {tooltip_body}
            </div>
        </Show>
    }
}
