//! Операции над упорядоченными справочниками.
//!
//! Все индексы относятся к списку, отсортированному по `order`, а не к
//! исходному порядку массива у вызывающего кода. После любой мутации
//! значения `order` образуют перестановку `1..=N`.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Запись, которую можно переупорядочивать, переименовывать и удалять
pub trait OrderedEntry: Clone {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn order(&self) -> u32;
    fn set_order(&mut self, order: u32);
    /// Системные записи нельзя удалить
    fn is_system(&self) -> bool;
    fn rename(&mut self, name: String);
    fn touch(&mut self, now: DateTime<Utc>);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    #[error("Index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Entry {0} is a system entry and cannot be deleted")]
    SystemEntry(String),
}

/// Копия списка, отсортированная по `order` (стабильно)
pub fn sorted_by_order<T: OrderedEntry>(entries: &[T]) -> Vec<T> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| e.order());
    sorted
}

/// Перемещает элемент с позиции `from` на позицию `to`, сдвигая промежуточные.
/// Возвращает `false`, если индексы вне диапазона.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// order := позиция + 1, updated_at := now для всех записей
pub fn restamp<T: OrderedEntry>(entries: &mut [T], now: DateTime<Utc>) {
    for (pos, entry) in entries.iter_mut().enumerate() {
        entry.set_order(pos as u32 + 1);
        entry.touch(now);
    }
}

/// Перенумерация после удаления: трогаем только записи, у которых сменился order
fn renumber<T: OrderedEntry>(entries: &mut [T], now: DateTime<Utc>) {
    for (pos, entry) in entries.iter_mut().enumerate() {
        let order = pos as u32 + 1;
        if entry.order() != order {
            entry.set_order(order);
            entry.touch(now);
        }
    }
}

/// Перестановка drag-and-drop.
///
/// `None`, если позиция не изменилась или индексы вне диапазона; иначе
/// весь список с пересчитанными `order` и `updated_at`.
pub fn reorder<T: OrderedEntry>(
    entries: &[T],
    from: usize,
    to: usize,
    now: DateTime<Utc>,
) -> Option<Vec<T>> {
    if from == to {
        return None;
    }
    let mut sorted = sorted_by_order(entries);
    if !move_item(&mut sorted, from, to) {
        return None;
    }
    restamp(&mut sorted, now);
    Some(sorted)
}

/// Добавление в конец списка с order = N + 1
pub fn append<T: OrderedEntry>(entries: &[T], mut entry: T) -> Vec<T> {
    let mut sorted = sorted_by_order(entries);
    entry.set_order(sorted.len() as u32 + 1);
    sorted.push(entry);
    sorted
}

/// Удаление записи по индексу отсортированного списка
pub fn remove_at<T: OrderedEntry>(
    entries: &[T],
    index: usize,
    now: DateTime<Utc>,
) -> Result<Vec<T>, OrderingError> {
    let mut sorted = sorted_by_order(entries);
    let entry = sorted.get(index).ok_or(OrderingError::IndexOutOfRange {
        index,
        len: entries.len(),
    })?;
    if entry.is_system() {
        return Err(OrderingError::SystemEntry(entry.id().to_string()));
    }
    sorted.remove(index);
    renumber(&mut sorted, now);
    Ok(sorted)
}

/// Переименование: обрезает пробелы, пустое имя игнорируется (`None`)
pub fn rename_at<T: OrderedEntry>(
    entries: &[T],
    index: usize,
    name: &str,
    now: DateTime<Utc>,
) -> Option<T> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut entry = sorted_by_order(entries).get(index)?.clone();
    entry.rename(trimmed.to_string());
    entry.touch(now);
    Some(entry)
}

/// Заменяет запись с тем же id (результат `rename_at`) и возвращает отсортированный список
pub fn replace_entry<T: OrderedEntry>(entries: &[T], updated: T) -> Vec<T> {
    sorted_by_order(entries)
        .into_iter()
        .map(|e| if e.id() == updated.id() { updated.clone() } else { e })
        .collect()
}

/// Значения order образуют ровно 1..=N
pub fn is_dense<T: OrderedEntry>(entries: &[T]) -> bool {
    let mut orders: Vec<u32> = entries.iter().map(|e| e.order()).collect();
    orders.sort_unstable();
    orders.iter().enumerate().all(|(pos, order)| *order == pos as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_inventory_config::ConfigEntry;
    use std::collections::BTreeSet;

    fn entry(id: &str, name: &str, order: u32) -> ConfigEntry {
        let mut e = ConfigEntry::new(name, order, Utc::now());
        e.id = id.to_string();
        e
    }

    fn xyz() -> Vec<ConfigEntry> {
        vec![entry("a", "X", 1), entry("b", "Y", 2), entry("c", "Z", 3)]
    }

    fn ids(entries: &[ConfigEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_drag_last_to_first() {
        let now = Utc::now();
        let result = reorder(&xyz(), 2, 0, now).unwrap();
        assert_eq!(ids(&result), vec!["c", "a", "b"]);
        let orders: Vec<u32> = result.iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert!(result.iter().all(|e| e.metadata.updated_at == now));
    }

    #[test]
    fn test_reorder_keeps_ids_and_dense_order() {
        let entries: Vec<ConfigEntry> = (1..=6)
            .map(|i| entry(&format!("id{i}"), &format!("n{i}"), i))
            .collect();
        let before: BTreeSet<String> = entries.iter().map(|e| e.id.clone()).collect();
        for (from, to) in [(0, 5), (5, 0), (2, 3), (4, 1)] {
            let result = reorder(&entries, from, to, Utc::now()).unwrap();
            let after: BTreeSet<String> = result.iter().map(|e| e.id.clone()).collect();
            assert_eq!(before, after);
            for (pos, e) in result.iter().enumerate() {
                assert_eq!(e.order, pos as u32 + 1);
            }
            assert_eq!(result[to].id, entries[from].id);
        }
    }

    #[test]
    fn test_reorder_uses_sorted_view() {
        // массив у вызывающего кода не отсортирован
        let entries = vec![entry("c", "Z", 3), entry("a", "X", 1), entry("b", "Y", 2)];
        let result = reorder(&entries, 0, 2, Utc::now()).unwrap();
        assert_eq!(ids(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_reorder_same_position_or_out_of_range() {
        assert!(reorder(&xyz(), 1, 1, Utc::now()).is_none());
        assert!(reorder(&xyz(), 0, 3, Utc::now()).is_none());
        assert!(reorder(&xyz(), 7, 0, Utc::now()).is_none());
    }

    #[test]
    fn test_append_assigns_next_order() {
        let now = Utc::now();
        let result = append(&xyz(), ConfigEntry::new("W", 0, now));
        assert_eq!(result.len(), 4);
        assert_eq!(result[3].name, "W");
        assert_eq!(result[3].order, 4);
        assert!(is_dense(&result));
    }

    #[test]
    fn test_remove_renumbers_remainder() {
        let t0 = Utc::now();
        let entries = xyz();
        let t1 = t0 + chrono::Duration::seconds(10);
        let result = remove_at(&entries, 0, t1).unwrap();
        assert_eq!(ids(&result), vec!["b", "c"]);
        assert_eq!(result[0].order, 1);
        assert_eq!(result[1].order, 2);
        assert_eq!(result[0].metadata.updated_at, t1);
    }

    #[test]
    fn test_remove_rejects_system_entry() {
        let now = Utc::now();
        let entries = vec![
            ConfigEntry::system("sys", "พร้อมใช้งาน", 1, now),
            entry("u", "อื่นๆ", 2),
        ];
        assert_eq!(
            remove_at(&entries, 0, now),
            Err(OrderingError::SystemEntry("sys".into()))
        );
        assert!(matches!(
            remove_at(&entries, 4, now),
            Err(OrderingError::IndexOutOfRange { index: 4, len: 2 })
        ));
    }

    #[test]
    fn test_rename_trims_and_ignores_blank() {
        let now = Utc::now();
        let renamed = rename_at(&xyz(), 1, "  ใหม่  ", now).unwrap();
        assert_eq!(renamed.id, "b");
        assert_eq!(renamed.name, "ใหม่");
        assert_eq!(renamed.metadata.updated_at, now);

        assert!(rename_at(&xyz(), 1, "   ", now).is_none());
        assert!(rename_at(&xyz(), 9, "ok", now).is_none());
    }

    #[test]
    fn test_replace_entry() {
        let now = Utc::now();
        let entries = xyz();
        let renamed = rename_at(&entries, 2, "Zeta", now).unwrap();
        let result = replace_entry(&entries, renamed);
        assert_eq!(result[2].name, "Zeta");
        assert_eq!(result[0].name, "X");
    }

    #[test]
    fn test_is_dense() {
        assert!(is_dense(&xyz()));
        assert!(is_dense::<ConfigEntry>(&[]));
        let gap = vec![entry("a", "X", 1), entry("b", "Y", 3)];
        assert!(!is_dense(&gap));
    }
}
