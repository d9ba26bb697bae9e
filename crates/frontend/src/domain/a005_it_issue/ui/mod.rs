pub mod report_form;
pub mod tracking;
