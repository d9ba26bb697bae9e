/// Поиск и сортировка списков на клиенте
use std::cmp::Ordering;

use leptos::prelude::*;

/// Тип, который можно найти по строке поиска
pub trait Searchable {
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Тип, который сортируется по имени поля
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Пустой фильтр возвращает список целиком
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(&filter))
        .collect()
}

/// Сравнение необязательных строк без учёта регистра, пустые в конце
pub fn cmp_opt_str(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Поле и направление сортировки таблицы
#[derive(Clone, Copy)]
pub struct SortState {
    pub field: RwSignal<&'static str>,
    pub ascending: RwSignal<bool>,
}

impl SortState {
    pub fn new(field: &'static str) -> Self {
        Self {
            field: RwSignal::new(field),
            ascending: RwSignal::new(true),
        }
    }

    /// Повторный клик по тому же полю меняет направление
    pub fn toggle(&self, field: &'static str) {
        if self.field.get_untracked() == field {
            self.ascending.update(|v| *v = !*v);
        } else {
            self.field.set(field);
            self.ascending.set(true);
        }
    }

    pub fn indicator(&self, field: &'static str) -> &'static str {
        get_sort_indicator(self.field.get(), field, self.ascending.get())
    }
}

/// Индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(&'static str, u32);

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            self.0.to_lowercase().contains(filter)
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "n" => self.1.cmp(&other.1),
                _ => self.0.cmp(other.0),
            }
        }
    }

    #[test]
    fn test_sort_and_filter() {
        let mut rows = vec![Row("b", 1), Row("a", 3), Row("c", 2)];
        sort_list(&mut rows, "n", false);
        assert_eq!(rows[0], Row("a", 3));
        sort_list(&mut rows, "name", true);
        assert_eq!(rows[0], Row("a", 3));
        assert_eq!(filter_list(rows.clone(), "  ").len(), 3);
        assert_eq!(filter_list(rows, "B"), vec![Row("b", 1)]);
    }

    #[test]
    fn test_cmp_opt_str_puts_empty_last() {
        assert_eq!(cmp_opt_str(Some("A"), Some("a")), Ordering::Equal);
        assert_eq!(cmp_opt_str(Some("x"), None), Ordering::Less);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("a", "a", true), " ▲");
        assert_eq!(get_sort_indicator("a", "b", true), " ⇅");
    }
}
