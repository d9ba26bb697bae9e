use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    // ========================================
    // ADMIN ROUTES (require_admin)
    // ========================================
    let admin = Router::new()
        .route(
            "/api/admin/inventory-config",
            get(handlers::a001_inventory_config::get_config),
        )
        .route(
            "/api/admin/inventory-config/:kind",
            put(handlers::a001_inventory_config::replace_entries)
                .post(handlers::a001_inventory_config::add_entry),
        )
        .route(
            "/api/admin/inventory-config/:kind/:id",
            put(handlers::a001_inventory_config::rename_entry)
                .delete(handlers::a001_inventory_config::delete_entry),
        )
        .route(
            "/api/admin/offices",
            get(handlers::a002_office::list_all).post(handlers::a002_office::create),
        )
        .route(
            "/api/admin/offices/:id",
            get(handlers::a002_office::get_by_id)
                .put(handlers::a002_office::update)
                .delete(handlers::a002_office::delete),
        )
        .route(
            "/api/admin/equipment-reports/available-items",
            get(handlers::a003_inventory_item::available_items),
        )
        .route(
            "/api/admin/equipment-requests/:id/status",
            put(handlers::a004_equipment_request::update_status),
        )
        .route(
            "/api/admin/it-issues/:id/status",
            put(handlers::a005_it_issue::update_status),
        )
        .route_layer(middleware::from_fn(system::auth::middleware::require_admin));

    Router::new()
        // ========================================
        // REFERENCE DATA (PUBLIC)
        // ========================================
        .route(
            "/api/inventory-config",
            get(handlers::a001_inventory_config::get_config),
        )
        .route("/api/offices", get(handlers::a002_office::list_active))
        // ========================================
        // INVENTORY
        // ========================================
        .route(
            "/api/inventory",
            get(handlers::a003_inventory_item::list_grouped)
                .post(handlers::a003_inventory_item::create),
        )
        .route(
            "/api/inventory/items",
            get(handlers::a003_inventory_item::list_items),
        )
        .route(
            "/api/inventory/breakdown",
            get(handlers::a003_inventory_item::breakdown),
        )
        // ========================================
        // EQUIPMENT REQUESTS / IT ISSUES
        // ========================================
        .route(
            "/api/equipment-requests",
            get(handlers::a004_equipment_request::list)
                .post(handlers::a004_equipment_request::create),
        )
        .route(
            "/api/it-issues",
            get(handlers::a005_it_issue::list).post(handlers::a005_it_issue::create),
        )
        .route(
            "/api/it-issues/:id",
            get(handlers::a005_it_issue::get_by_id),
        )
        .merge(admin)
        .merge(system::api::routes::configure_system_routes())
}
