use leptos::prelude::*;

use crate::shared::list_utils::SortState;

/// Состояние списка пользователей, живёт пока открыта вкладка
#[derive(Clone, Copy)]
pub struct UsersListState {
    pub search_query: RwSignal<String>,
    pub sort: SortState,
    pub show_inactive: RwSignal<bool>,
}

pub fn create_state() -> UsersListState {
    UsersListState {
        search_query: RwSignal::new(String::new()),
        sort: SortState::new("username"),
        show_inactive: RwSignal::new(true),
    }
}
