pub mod a001_inventory_config;
pub mod a002_office;
pub mod a003_inventory_item;
pub mod a004_equipment_request;
pub mod a005_it_issue;
pub mod common;
