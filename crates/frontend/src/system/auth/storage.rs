use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";

pub fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

pub fn read_item(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

pub fn write_item(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage: failed to write '{}'", key);
        }
    }
}

pub fn remove_item(key: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn save_access_token(token: &str) {
    write_item(ACCESS_TOKEN_KEY, token);
}

pub fn get_access_token() -> Option<String> {
    read_item(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
}

pub fn clear_tokens() {
    remove_item(ACCESS_TOKEN_KEY);
}
