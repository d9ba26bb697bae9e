//! Справочники для форм и фильтров: категории/статусы/состояния и
//! активные офисы. Каждая страница загружает свой экземпляр.

use contracts::domain::a001_inventory_config::{ConfigEntry, ConfigKind, InventoryConfig};
use contracts::domain::a001_inventory_config::ordering::sorted_by_order;
use contracts::domain::a002_office::Office;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::{a001_inventory_config, a002_office};

#[derive(Clone, Copy)]
pub struct ReferenceData {
    pub config: RwSignal<InventoryConfig>,
    pub offices: RwSignal<Vec<Office>>,
    pub error: RwSignal<Option<String>>,
}

impl ReferenceData {
    pub fn load() -> Self {
        let data = Self {
            config: RwSignal::new(InventoryConfig::default()),
            offices: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
        };
        spawn_local(async move {
            let config = a001_inventory_config::api::fetch_config().await;
            let offices = a002_office::api::fetch_active().await;
            match config {
                Ok(c) => {
                    data.config.try_set(c);
                }
                Err(e) => {
                    log::error!("reference data: config: {}", e);
                    data.error.try_set(Some(e));
                }
            }
            match offices {
                Ok(o) => {
                    data.offices.try_set(o);
                }
                Err(e) => {
                    log::error!("reference data: offices: {}", e);
                    data.error.try_set(Some(e));
                }
            }
        });
        data
    }

    /// Записи справочника в порядке `order`
    pub fn entries(&self, kind: ConfigKind) -> Vec<ConfigEntry> {
        self.config.with(|c| sorted_by_order(c.entries(kind)))
    }

    pub fn name_of(&self, kind: ConfigKind, id: &str) -> String {
        self.config.with(|c| c.name_of(kind, id))
    }

    pub fn office_name(&self, id: &str) -> String {
        self.offices.with(|offices| {
            offices
                .iter()
                .find(|o| o.id == id)
                .map(|o| o.name.clone())
                .unwrap_or_else(|| id.to_string())
        })
    }

    /// Офис по умолчанию для новых форм
    pub fn default_office_id(&self) -> Option<String> {
        self.offices.with(|offices| {
            offices
                .iter()
                .find(|o| o.is_default)
                .or_else(|| offices.first())
                .map(|o| o.id.clone())
        })
    }
}
