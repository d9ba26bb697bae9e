pub mod api_utils;
pub mod breakdown_cache;
pub mod components;
pub mod date_utils;
pub mod dialog;
pub mod dnd;
pub mod form_submit;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod page_frame;
pub mod page_standard;
pub mod reference_data;
pub mod toast;
