use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Метаданные записи (lifecycle tracking)
///
/// Встраивается в агрегаты через `#[serde(flatten)]`, поэтому на проводе
/// поля выглядят как `createdAt` / `updatedAt` верхнего уровня.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    pub updated_at: DateTime<Utc>,
}

impl EntityMetadata {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Новый строковый идентификатор (UUID v4)
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_keeps_created_at() {
        let t0 = Utc::now();
        let mut meta = EntityMetadata::new(t0);
        let t1 = t0 + chrono::Duration::seconds(5);
        meta.touch(t1);
        assert_eq!(meta.created_at, t0);
        assert_eq!(meta.updated_at, t1);
    }

    #[test]
    fn test_new_id_is_unique() {
        assert_ne!(new_id(), new_id());
    }
}
