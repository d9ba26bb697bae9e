//! Карточка офиса (MVVM):
//! - view_model.rs: OfficeDetailsVm с RwSignal полями формы
//! - view.rs: компонент OfficeDetails

mod view;
mod view_model;

pub use view::OfficeDetails;
pub use view_model::OfficeDetailsVm;
