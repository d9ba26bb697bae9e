//! Карточка пользователя (MVVM), как у офисов:
//! - view_model.rs: UserDetailsVm
//! - view.rs: компонент UserDetails

mod view;
mod view_model;

pub use view::UserDetails;
pub use view_model::UserDetailsVm;
