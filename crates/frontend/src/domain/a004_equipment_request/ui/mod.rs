pub mod list;
pub mod request_form;
pub mod requester;
pub mod return_form;
