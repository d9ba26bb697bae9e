//! Вводный тур по системе. Шаг и признак "закрыто" хранятся в
//! localStorage, при выходе из системы тур начинается заново.

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::system::auth::storage;

const TUTORIAL_KEY: &str = "tutorial_state";

pub struct TutorialStep {
    pub title: &'static str,
    pub text: &'static str,
    /// Вкладка, которую открывает кнопка шага
    pub page: &'static str,
}

pub const STEPS: &[TutorialStep] = &[
    TutorialStep {
        title: "คลังอุปกรณ์",
        text: "ดูจำนวนอุปกรณ์คงเหลือ วางเมาส์บนตัวเลขเพื่อดูรายละเอียดตามสถานะ สภาพ และการถือครอง",
        page: "a003_inventory",
    },
    TutorialStep {
        title: "เบิกอุปกรณ์",
        text: "กรอกแบบฟอร์มเบิกอุปกรณ์ เลือกสาขาและรายการที่ต้องการ",
        page: "a004_request_form",
    },
    TutorialStep {
        title: "คืนอุปกรณ์",
        text: "เลือกอุปกรณ์ที่ต้องการคืนจากรายการที่ถูกเบิก",
        page: "a004_return_form",
    },
    TutorialStep {
        title: "แจ้งปัญหาไอที",
        text: "แจ้งปัญหาพร้อมระดับความเร่งด่วน แล้วติดตามสถานะได้ที่หน้าติดตาม",
        page: "a005_issue_form",
    },
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TutorialState {
    pub step: usize,
    pub dismissed: bool,
}

impl TutorialState {
    pub fn current(&self) -> Option<&'static TutorialStep> {
        if self.dismissed {
            return None;
        }
        STEPS.get(self.step)
    }

    pub fn is_last(&self) -> bool {
        self.step + 1 >= STEPS.len()
    }

    /// Следующий шаг; после последнего тур закрывается
    pub fn next(&mut self) {
        if self.is_last() {
            self.dismissed = true;
        } else {
            self.step += 1;
        }
    }

    pub fn prev(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }
}

fn load() -> TutorialState {
    storage::read_item(TUTORIAL_KEY)
        .and_then(|raw| serde_json::from_str::<TutorialState>(&raw).ok())
        .filter(|s| s.step < STEPS.len())
        .unwrap_or_default()
}

fn save(state: &TutorialState) {
    match serde_json::to_string(state) {
        Ok(raw) => storage::write_item(TUTORIAL_KEY, &raw),
        Err(e) => log::warn!("tutorial: failed to serialize state: {}", e),
    }
}

#[derive(Clone, Copy)]
pub struct TutorialContext {
    state: RwSignal<TutorialState>,
}

impl TutorialContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(TutorialState::default()),
        }
    }

    /// Прочитать сохранённое состояние
    pub fn init(&self) {
        self.state.set(load());
    }

    pub fn state(&self) -> TutorialState {
        self.state.get()
    }

    fn change(&self, f: impl FnOnce(&mut TutorialState)) {
        self.state.update(|s| {
            f(s);
            save(s);
        });
    }

    pub fn next(&self) {
        self.change(TutorialState::next);
    }

    pub fn prev(&self) {
        self.change(TutorialState::prev);
    }

    pub fn dismiss(&self) {
        self.change(TutorialState::dismiss);
    }

    /// Сброс при выходе из системы
    pub fn reset(&self) {
        storage::remove_item(TUTORIAL_KEY);
        self.state.set(TutorialState::default());
    }
}

impl Default for TutorialContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_tutorial() -> TutorialContext {
    use_context::<TutorialContext>().expect("TutorialContext not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_through_steps_and_closes_after_last() {
        let mut state = TutorialState::default();
        assert_eq!(state.current().map(|s| s.page), Some("a003_inventory"));
        for _ in 1..STEPS.len() {
            state.next();
            assert!(!state.dismissed);
        }
        assert!(state.is_last());
        state.next();
        assert!(state.dismissed);
        assert!(state.current().is_none());
    }

    #[test]
    fn test_prev_stops_at_first_step() {
        let mut state = TutorialState { step: 1, dismissed: false };
        state.prev();
        state.prev();
        assert_eq!(state.step, 0);
    }

    #[test]
    fn test_state_round_trips_as_json() {
        let raw = r#"{"step":2,"dismissed":false}"#;
        let state: TutorialState = serde_json::from_str(raw).expect("state");
        assert_eq!(state.current().map(|s| s.title), Some("คืนอุปกรณ์"));
    }
}
