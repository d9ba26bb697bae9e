use contracts::domain::a002_office::{Office, OfficeDto};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct OfficeDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub is_active: RwSignal<bool>,
    pub is_default: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl OfficeDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
            is_default: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn load(&self, office: Office) {
        self.id.set(Some(office.id));
        self.name.set(office.name);
        self.description.set(office.description.unwrap_or_default());
        self.is_active.set(office.is_active);
        self.is_default.set(office.is_default);
    }

    pub fn build_dto(&self) -> OfficeDto {
        let description = self.description.get_untracked();
        OfficeDto {
            id: self.id.get_untracked(),
            name: self.name.get_untracked().trim().to_string(),
            description: (!description.trim().is_empty()).then(|| description.trim().to_string()),
            is_active: Some(self.is_active.get_untracked()),
        }
    }
}

impl Default for OfficeDetailsVm {
    fn default() -> Self {
        Self::new()
    }
}
