//! Защита форм от повторной отправки (двойной клик, повторный рендер).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Флаг "идёт отправка". Клонируется дёшево, все клоны делят один флаг.
/// Должен быть `Send + Sync`, т.к. захватывается в замыкания Leptos.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    submitting: Arc<AtomicBool>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true`, если отправку можно начинать; флаг выставляется сразу
    pub fn try_begin(&self) -> bool {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Вызывается в обработчике завершения (успех или ошибка)
    pub fn finish(&self) {
        self.submitting.store(false, Ordering::Release);
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Начать отправку и получить токен, который снимет флаг при drop
    pub fn begin(&self) -> Option<SubmitToken> {
        self.try_begin().then(|| SubmitToken {
            guard: self.clone(),
        })
    }
}

/// Снимает флаг отправки при уничтожении
#[derive(Debug)]
pub struct SubmitToken {
    guard: SubmitGuard,
}

impl Drop for SubmitToken {
    fn drop(&mut self) {
        self.guard.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Имитация формы: клик отправляет POST, если guard пропускает
    struct FakeForm {
        guard: SubmitGuard,
        posts: Cell<u32>,
        in_flight: std::cell::RefCell<Option<SubmitToken>>,
    }

    impl FakeForm {
        fn new() -> Self {
            Self {
                guard: SubmitGuard::new(),
                posts: Cell::new(0),
                in_flight: Default::default(),
            }
        }

        fn click(&self) {
            if let Some(token) = self.guard.begin() {
                self.posts.set(self.posts.get() + 1);
                *self.in_flight.borrow_mut() = Some(token);
            }
        }

        fn complete(&self) {
            self.in_flight.borrow_mut().take();
        }
    }

    #[test]
    fn test_double_click_posts_once() {
        let form = FakeForm::new();
        form.click();
        form.click();
        assert_eq!(form.posts.get(), 1);
        assert!(form.guard.is_submitting());

        form.complete();
        assert!(!form.guard.is_submitting());
        form.click();
        assert_eq!(form.posts.get(), 2);
    }

    #[test]
    fn test_clones_share_flag() {
        let guard = SubmitGuard::new();
        let other = guard.clone();
        assert!(guard.try_begin());
        assert!(!other.try_begin());
        other.finish();
        assert!(guard.try_begin());
    }
}
