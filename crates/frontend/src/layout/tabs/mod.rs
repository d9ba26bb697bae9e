//! Вкладки:
//! - `page` - обёртка контента вкладки
//! - `registry` - ключ вкладки → View
//! - `tab_labels` - заголовки вкладок

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, tab_label_for_key, OFFICE_DETAIL_PREFIX, USER_DETAIL_PREFIX};
