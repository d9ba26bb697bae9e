use chrono::{DateTime, Duration, Utc};
use contracts::domain::a001_inventory_config::InventoryConfig;
use contracts::domain::a002_office::Office;
use contracts::domain::a003_inventory_item::InventoryItem;
use contracts::domain::a004_equipment_request::EquipmentRequest;
use contracts::domain::a005_it_issue::ItIssue;
use contracts::system::users::User;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::seed;
use crate::shared::config::Config;

static STORE: OnceCell<MockStore> = OnceCell::new();

/// Сессия входа (mock, без JWT)
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Резервная копия массового переименования: какие записи были затронуты
#[derive(Debug, Clone)]
pub struct RenameBackup {
    pub id: String,
    pub old_name: String,
    pub new_name: String,
    pub item_ids: Vec<String>,
    /// (id заявки, индекс строки)
    pub request_lines: Vec<(String, usize)>,
    pub created_at: DateTime<Utc>,
}

/// In-memory хранилище вместо БД. Каждая коллекция под своим RwLock.
#[derive(Debug)]
pub struct MockStore {
    latency: std::time::Duration,
    session_ttl: Duration,
    pub config: RwLock<InventoryConfig>,
    pub offices: RwLock<Vec<Office>>,
    pub items: RwLock<Vec<InventoryItem>>,
    pub requests: RwLock<Vec<EquipmentRequest>>,
    pub issues: RwLock<Vec<ItIssue>>,
    pub users: RwLock<Vec<User>>,
    pub sessions: RwLock<HashMap<String, Session>>,
    pub rename_backups: RwLock<HashMap<String, RenameBackup>>,
}

impl MockStore {
    /// Пустое хранилище: только системные записи справочников
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            latency: std::time::Duration::ZERO,
            session_ttl: Duration::minutes(480),
            config: RwLock::new(InventoryConfig::seeded(now)),
            offices: RwLock::new(Vec::new()),
            items: RwLock::new(Vec::new()),
            requests: RwLock::new(Vec::new()),
            issues: RwLock::new(Vec::new()),
            users: RwLock::new(Vec::new()),
            sessions: RwLock::new(HashMap::new()),
            rename_backups: RwLock::new(HashMap::new()),
        }
    }

    /// Хранилище с демо-данными
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let data = seed::demo_data(now);
        let store = Self::empty(now);
        Self {
            config: RwLock::new(data.config),
            offices: RwLock::new(data.offices),
            items: RwLock::new(data.items),
            requests: RwLock::new(data.requests),
            issues: RwLock::new(data.issues),
            users: RwLock::new(data.users),
            ..store
        }
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency = std::time::Duration::from_millis(latency_ms);
        self
    }

    pub fn with_session_ttl(mut self, minutes: i64) -> Self {
        self.session_ttl = Duration::minutes(minutes);
        self
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Имитация сетевой задержки настоящей БД
    pub async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

pub fn initialize_store(config: &Config) -> anyhow::Result<()> {
    let now = Utc::now();
    let store = if config.mock.seed {
        MockStore::seeded(now)
    } else {
        MockStore::empty(now)
    }
    .with_latency(config.mock.latency_ms)
    .with_session_ttl(config.auth.session_ttl_minutes);

    tracing::info!(
        "Mock store initialized: seed={}, latency={}ms",
        config.mock.seed,
        config.mock.latency_ms
    );

    STORE
        .set(store)
        .map_err(|_| anyhow::anyhow!("Mock store already initialized"))
}

pub fn get_store() -> &'static MockStore {
    STORE
        .get()
        .expect("Mock store has not been initialized")
}
