//! Категории страниц, открываемых во вкладках.
//!
//! Корневой элемент каждой страницы несёт `id` вида `{page}--{category}`
//! (например `"a003_inventory--list"`) и `data-page-category`.

/// Таблица записей
pub const PAGE_CAT_LIST: &str = "list";

/// Форма ввода (заявка, отчёт о проблеме, новое оборудование)
pub const PAGE_CAT_FORM: &str = "form";

/// Карточка одной записи
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Страницы администратора
pub const PAGE_CAT_ADMIN: &str = "admin";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_FORM, PAGE_CAT_DETAIL, PAGE_CAT_ADMIN];

pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((page, category)) => !page.is_empty() && is_known_category(category),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a003_inventory--list"));
        assert!(is_valid_page_id("sys_admin_tools--admin"));
        assert!(!is_valid_page_id("a003_inventory"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a003_inventory--dashboard"));
    }
}
