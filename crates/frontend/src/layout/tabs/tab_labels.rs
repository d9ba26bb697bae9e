//! Заголовки вкладок по ключу страницы.

/// Ключи карточек: `{prefix}{id}` или `{prefix}new`
pub const OFFICE_DETAIL_PREFIX: &str = "a002_office_detail_";
pub const USER_DETAIL_PREFIX: &str = "sys_user_detail_";

fn static_label(key: &str) -> Option<&'static str> {
    Some(match key {
        "a003_inventory" => "คลังอุปกรณ์",
        "a003_inventory_new" => "เพิ่มอุปกรณ์",
        "a004_request_form" => "เบิกอุปกรณ์",
        "a004_return_form" => "คืนอุปกรณ์",
        "a004_requests" => "รายการเบิก/คืน",
        "a005_issue_form" => "แจ้งปัญหาไอที",
        "a005_issues" => "ติดตามปัญหา",
        "a001_inventory_config" => "ตั้งค่าคลัง",
        "a002_offices" => "สาขา",
        "sys_users" => "ผู้ใช้งาน",
        "sys_admin_tools" => "เครื่องมือผู้ดูแล",
        _ => return None,
    })
}

/// Читаемый заголовок вкладки. Fallback: сам ключ.
pub fn tab_label_for_key(key: &str) -> String {
    if let Some(label) = static_label(key) {
        return label.to_string();
    }
    if let Some(id) = key.strip_prefix(OFFICE_DETAIL_PREFIX) {
        return detail_tab_label("สาขา", id);
    }
    if let Some(id) = key.strip_prefix(USER_DETAIL_PREFIX) {
        return detail_tab_label("ผู้ใช้", id);
    }
    key.to_string()
}

pub fn detail_tab_label(entity: &str, id: &str) -> String {
    if id == "new" {
        format!("{} (ใหม่)", entity)
    } else {
        format!("{}: {}", entity, short_id(id))
    }
}

fn short_id(id: &str) -> &str {
    id.char_indices().nth(8).map(|(i, _)| &id[..i]).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_and_detail_labels() {
        assert_eq!(tab_label_for_key("a003_inventory"), "คลังอุปกรณ์");
        assert_eq!(tab_label_for_key("a002_office_detail_new"), "สาขา (ใหม่)");
        assert_eq!(
            tab_label_for_key("sys_user_detail_0f8fad5b-d9cb-469f"),
            "ผู้ใช้: 0f8fad5b"
        );
        assert_eq!(tab_label_for_key("unknown_page"), "unknown_page");
    }
}
