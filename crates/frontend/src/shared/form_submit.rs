//! Отправка формы под `SubmitGuard`: повторный клик, пока запрос в пути,
//! игнорируется, а `pending()` даёт реактивный флаг для кнопок.

use std::future::Future;
use std::pin::Pin;

use contracts::shared::submit_guard::SubmitGuard;
use leptos::prelude::*;
use leptos::task::spawn_local;

type SubmitTask = Pin<Box<dyn Future<Output = ()>>>;

#[derive(Clone)]
pub struct FormSubmit {
    guard: SubmitGuard,
    pending: RwSignal<bool>,
}

impl FormSubmit {
    pub fn new() -> Self {
        Self {
            guard: SubmitGuard::new(),
            pending: RwSignal::new(false),
        }
    }

    pub fn pending(&self) -> bool {
        self.pending.get()
    }

    pub fn pending_signal(&self) -> Signal<bool> {
        self.pending.into()
    }

    /// Запускает `f`, если отправка ещё не идёт. Флаг снимается, когда
    /// future завершится (успехом или ошибкой).
    pub fn run<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        let pending = self.pending;
        let Some(task) = guarded(&self.guard, f, move || {
            pending.try_set(false);
        }) else {
            log::debug!("submit ignored: request already in flight");
            return;
        };
        self.pending.set(true);
        spawn_local(task);
    }
}

impl Default for FormSubmit {
    fn default() -> Self {
        Self::new()
    }
}

/// Future отправки, если guard свободен; иначе `f` не вызывается.
/// Токен guard живёт до конца future, затем вызывается `on_done`.
fn guarded<F, Fut, D>(guard: &SubmitGuard, f: F, on_done: D) -> Option<SubmitTask>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()> + 'static,
    D: FnOnce() + 'static,
{
    let token = guard.begin()?;
    let fut = f();
    Some(Box::pin(async move {
        fut.await;
        drop(token);
        on_done();
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::Arc;
    use std::task::{Context, Poll, Wake, Waker};

    struct NoopWake;

    impl Wake for NoopWake {
        fn wake(self: Arc<Self>) {}
    }

    fn poll_once(task: &mut SubmitTask) -> Poll<()> {
        let waker = Waker::from(Arc::new(NoopWake));
        task.as_mut().poll(&mut Context::from_waker(&waker))
    }

    /// Future, который завершается со второго опроса (запрос "в пути")
    struct InFlight(bool);

    impl Future for InFlight {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                Poll::Pending
            }
        }
    }

    #[test]
    fn test_second_submit_ignored_while_in_flight() {
        let guard = SubmitGuard::new();
        let posts = Rc::new(Cell::new(0));
        let done = Rc::new(Cell::new(false));

        let submit = || {
            let posts = posts.clone();
            let done = done.clone();
            guarded(
                &guard,
                move || {
                    posts.set(posts.get() + 1);
                    InFlight(false)
                },
                move || done.set(true),
            )
        };

        let mut first = submit().expect("first submit starts");
        assert!(submit().is_none());
        assert_eq!(posts.get(), 1);

        assert_eq!(poll_once(&mut first), Poll::Pending);
        assert!(submit().is_none());
        assert!(guard.is_submitting());
        assert!(!done.get());

        assert_eq!(poll_once(&mut first), Poll::Ready(()));
        assert!(done.get());
        assert!(!guard.is_submitting());

        assert!(submit().is_some());
        assert_eq!(posts.get(), 2);
    }

    #[test]
    fn test_dropped_task_releases_guard() {
        let guard = SubmitGuard::new();
        let task = guarded(&guard, || async {}, || {});
        assert!(task.is_some());
        assert!(guard.is_submitting());
        drop(task);
        assert!(!guard.is_submitting());
    }
}
