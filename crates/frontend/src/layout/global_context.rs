use leptos::prelude::*;

use crate::layout::tabs::tab_label_for_key;
use crate::system::auth::storage;

/// Вкладка, которая открывается после входа и по кнопке "หน้าหลัก"
pub const HOME_PAGE: &str = "a003_inventory";

const ACTIVE_PAGE_KEY: &str = "app_active_page";

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Открывает сохранённую активную страницу (или главную) и дальше
    /// пишет активную вкладку в localStorage.
    pub fn restore_active_page(&self) {
        let key = storage::read_item(ACTIVE_PAGE_KEY)
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| HOME_PAGE.to_string());
        if key != HOME_PAGE {
            self.open_tab(HOME_PAGE, &tab_label_for_key(HOME_PAGE));
        }
        self.open_tab(&key, &tab_label_for_key(&key));

        let this = *self;
        Effect::new(move |_| match this.active.get() {
            Some(key) => storage::write_item(ACTIVE_PAGE_KEY, &key),
            None => storage::remove_item(ACTIVE_PAGE_KEY),
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: key='{}'", key);
        self.opened.update(|tabs| open_in(tabs, key, title));
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: key='{}'", key);
        let was_active = self
            .active
            .with_untracked(|active| active.as_deref() == Some(key));
        let mut next = None;
        self.opened.update(|tabs| next = close_in(tabs, key));
        if was_active {
            self.active.set(next);
        }
    }

    /// Закрыть вкладку формы и открыть другую (например, список после сохранения)
    pub fn replace_tab(&self, closing: &str, key: &str) {
        self.close_tab(closing);
        self.open_tab(key, &tab_label_for_key(key));
    }

    pub fn go_home(&self) {
        self.open_tab(HOME_PAGE, &tab_label_for_key(HOME_PAGE));
    }

    /// Все вкладки закрываются, остаётся главная
    pub fn reset(&self) {
        self.opened.set(vec![]);
        self.go_home();
    }

    /// Выход из системы: вкладки и сохранённая страница сбрасываются
    pub fn clear(&self) {
        self.opened.set(vec![]);
        self.active.set(None);
        storage::remove_item(ACTIVE_PAGE_KEY);
    }

    /// Вызывает `f` каждый раз, когда вкладка `key` становится активной
    /// (в том числе при открытии). Списки так перечитывают данные после
    /// закрытия формы.
    pub fn on_activate(&self, key: &'static str, f: impl Fn() + 'static) {
        let active = self.active;
        Effect::new(move |was_active: Option<bool>| {
            let is_active = active.with(|a| a.as_deref() == Some(key));
            if is_active && was_active != Some(true) {
                f();
            }
            is_active
        });
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

fn open_in(tabs: &mut Vec<Tab>, key: &str, title: &str) {
    if !tabs.iter().any(|tab| tab.key == key) {
        tabs.push(Tab {
            key: key.to_string(),
            title: title.to_string(),
        });
    }
}

/// Удаляет вкладку и возвращает ключ той, что станет активной
fn close_in(tabs: &mut Vec<Tab>, key: &str) -> Option<String> {
    tabs.retain(|tab| tab.key != key);
    tabs.last().map(|t| t.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_is_idempotent() {
        let mut tabs = vec![];
        open_in(&mut tabs, "a003_inventory", "คลังอุปกรณ์");
        open_in(&mut tabs, "a005_issues", "ติดตามปัญหา");
        open_in(&mut tabs, "a003_inventory", "คลังอุปกรณ์");
        assert_eq!(tabs.len(), 2);
    }

    #[test]
    fn test_close_activates_last_remaining() {
        let mut tabs = vec![];
        open_in(&mut tabs, "a", "A");
        open_in(&mut tabs, "b", "B");
        open_in(&mut tabs, "c", "C");
        assert_eq!(close_in(&mut tabs, "c"), Some("b".to_string()));
        assert_eq!(close_in(&mut tabs, "a"), Some("b".to_string()));
        assert_eq!(close_in(&mut tabs, "b"), None);
    }
}
