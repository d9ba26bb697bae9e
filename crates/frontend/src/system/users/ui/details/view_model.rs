use contracts::system::users::{CreateUserDto, UpdateUserDto, User, UserRole};
use leptos::prelude::*;

use crate::domain::a003_inventory_item::api::non_empty;

#[derive(Clone, Copy)]
pub struct UserDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub username: RwSignal<String>,
    pub full_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub is_admin: RwSignal<bool>,
    pub is_active: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl UserDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            username: RwSignal::new(String::new()),
            full_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            is_admin: RwSignal::new(false),
            is_active: RwSignal::new(true),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.with(|id| id.is_some())
    }

    pub fn load(&self, user: User) {
        self.id.set(Some(user.id));
        self.username.set(user.username);
        self.full_name.set(user.full_name.unwrap_or_default());
        self.email.set(user.email.unwrap_or_default());
        self.is_admin.set(user.role == UserRole::Admin);
        self.is_active.set(user.is_active);
    }

    fn role(&self) -> UserRole {
        if self.is_admin.get_untracked() {
            UserRole::Admin
        } else {
            UserRole::User
        }
    }

    pub fn build_create_dto(&self) -> CreateUserDto {
        CreateUserDto {
            username: self.username.get_untracked().trim().to_string(),
            email: non_empty(self.email.get_untracked()),
            full_name: non_empty(self.full_name.get_untracked()),
            role: self.role(),
        }
    }

    pub fn build_update_dto(&self) -> UpdateUserDto {
        UpdateUserDto {
            email: non_empty(self.email.get_untracked()),
            full_name: non_empty(self.full_name.get_untracked()),
            role: self.role(),
            is_active: self.is_active.get_untracked(),
        }
    }
}

impl Default for UserDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
