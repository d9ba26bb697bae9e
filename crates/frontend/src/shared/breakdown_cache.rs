//! Общий кэш разбивок склада. Живёт в контексте приложения; строки
//! таблицы (`StatusCell`) читают из него реактивно, а список склада
//! очищает его при обновлении.

use std::collections::HashMap;

use contracts::domain::a003_inventory_item::{BreakdownQuery, ItemBreakdown};
use contracts::shared::breakdown_loader::FetchOutcome;
use leptos::prelude::*;

use crate::shared::api_utils::api_url_with_query;
use crate::shared::http::{self, error_payload_message};

/// Разбор ответа `/api/inventory/breakdown`
pub fn classify_response(status: u16, text: &str) -> Result<ItemBreakdown, FetchOutcome> {
    if let Some(message) = error_payload_message(text) {
        return Err(FetchOutcome::ErrorPayload(message));
    }
    if !(200..300).contains(&status) {
        return Err(FetchOutcome::Failed(format!("HTTP {}", status)));
    }
    serde_json::from_str::<ItemBreakdown>(text)
        .map_err(|e| FetchOutcome::Failed(format!("Failed to parse response: {}", e)))
}

#[derive(Clone, Copy)]
pub struct BreakdownCache {
    entries: RwSignal<HashMap<String, ItemBreakdown>>,
}

impl BreakdownCache {
    pub fn new() -> Self {
        Self {
            entries: RwSignal::new(HashMap::new()),
        }
    }

    /// Реактивное чтение
    pub fn get(&self, key: &str) -> Option<ItemBreakdown> {
        self.entries.with(|entries| entries.get(key).cloned())
    }

    pub fn contains_untracked(&self, key: &str) -> bool {
        self.entries.with_untracked(|entries| entries.contains_key(key))
    }

    /// Сброс после обновления списка: все ячейки перезагрузятся
    pub fn clear(&self) {
        self.entries.update(|entries| entries.clear());
    }

    /// Загрузить разбивку и положить в кэш
    pub async fn load(&self, query: BreakdownQuery) -> FetchOutcome {
        let url = match api_url_with_query("/api/inventory/breakdown", &query) {
            Ok(url) => url,
            Err(e) => return FetchOutcome::Failed(e),
        };
        let (status, text) = match http::get_text(&url).await {
            Ok(answer) => answer,
            Err(e) => return FetchOutcome::Failed(e),
        };
        match classify_response(status, &text) {
            Ok(breakdown) => {
                let key = query.cache_key();
                self.entries.update(|entries| {
                    entries.insert(key, breakdown);
                });
                FetchOutcome::Delivered
            }
            Err(outcome) => outcome,
        }
    }
}

pub fn use_breakdown_cache() -> BreakdownCache {
    use_context::<BreakdownCache>().expect("BreakdownCache not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_shaped_body_is_failure_even_with_200() {
        let outcome = classify_response(200, r#"{"error":true,"message":"ไม่พบรายการ"}"#);
        assert_eq!(outcome, Err(FetchOutcome::ErrorPayload("ไม่พบรายการ".into())));
    }

    #[test]
    fn test_valid_breakdown_is_delivered() {
        let body = r#"{"itemName":"เมาส์","categoryId":"cat_peripheral","total":2,
            "byStatus":[{"key":"status_available","label":"พร้อมใช้งาน","count":2}],
            "byCondition":[],"byOwnership":[]}"#;
        let breakdown = classify_response(200, body).expect("breakdown");
        assert_eq!(breakdown.total, 2);
        assert_eq!(breakdown.by_status[0].count, 2);
    }

    #[test]
    fn test_garbage_is_fetch_failure() {
        assert!(matches!(
            classify_response(200, "<html>"),
            Err(FetchOutcome::Failed(_))
        ));
        assert!(matches!(
            classify_response(502, "bad gateway"),
            Err(FetchOutcome::Failed(_))
        ));
    }
}
