//! Общие проверки полей форм

/// Телефон: ровно 10 цифр, начинается с 0 (мобильный или городской с кодом)
pub fn is_valid_thai_phone(phone: &str) -> bool {
    let phone = phone.trim();
    phone.len() == 10 && phone.starts_with('0') && phone.chars().all(|c| c.is_ascii_digit())
}

/// Оставляет только цифры (для поля ввода телефона), не длиннее 10
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).take(10).collect()
}

/// Обязательное поле
pub fn required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("กรุณากรอก{}", field))
    } else {
        Ok(())
    }
}

/// Подтверждение опасного действия вводом текста
pub fn confirmation_matches(expected: &str, typed: &str) -> bool {
    !expected.trim().is_empty() && expected.trim() == typed.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone() {
        assert!(is_valid_thai_phone("0812345678"));
        assert!(is_valid_thai_phone(" 0212345678 "));
        assert!(!is_valid_thai_phone("812345678"));
        assert!(!is_valid_thai_phone("1812345678"));
        assert!(!is_valid_thai_phone("08123456789"));
        assert!(!is_valid_thai_phone("08-1234567"));
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("081-234-5678"), "0812345678");
        assert_eq!(digits_only("0812345678999"), "0812345678");
    }

    #[test]
    fn test_required() {
        assert!(required("ชื่อ", "  ").is_err());
        assert_eq!(required("ชื่อ", " ").unwrap_err(), "กรุณากรอกชื่อ");
        assert!(required("ชื่อ", "ก").is_ok());
    }

    #[test]
    fn test_confirmation() {
        assert!(confirmation_matches("โน้ตบุ๊ก", " โน้ตบุ๊ก "));
        assert!(!confirmation_matches("โน้ตบุ๊ก", "โน้ตบุก"));
        assert!(!confirmation_matches("", ""));
    }
}
