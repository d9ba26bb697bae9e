//! Состояние ленивой загрузки разбивки для одной строки склада.
//!
//! Сам компонент (`StatusCell`) только исполняет команды: планирует
//! запрос на следующий animation frame, взводит и снимает таймеры. Все
//! решения принимает [`BreakdownLoader`]. Каждый запуск загрузки получает
//! свой номер поколения; таймеры и ответы старого поколения игнорируются.

/// Запрос выполнился, а данные в кэше так и не появились
pub const DATA_TIMEOUT_MS: u32 = 5_000;
/// Общий потолок ожидания, чтобы спиннер не крутился вечно
pub const HARD_TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// Сетевая ошибка, ошибка разбора или ответ `{error: true, message}`
    Fetch(String),
    NoDataAfterFetch,
    HardTimeout,
}

impl LoadFailure {
    /// Текст для пользователя
    pub fn message(&self) -> String {
        match self {
            LoadFailure::Fetch(message) if message.trim().is_empty() => {
                "เกิดข้อผิดพลาดในการโหลดข้อมูล".to_string()
            }
            LoadFailure::Fetch(message) => message.clone(),
            LoadFailure::NoDataAfterFetch => "ไม่สามารถโหลดข้อมูลได้".to_string(),
            LoadFailure::HardTimeout => "หมดเวลาในการโหลดข้อมูล กรุณาลองใหม่".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(LoadFailure),
}

/// Результат запроса, как его видит компонент
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Запрос успешен, данные ушли в общий кэш
    Delivered,
    /// HTTP прошёл, но тело имеет форму `{error: true, message}`
    ErrorPayload(String),
    /// Запрос упал (сеть, разбор)
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderCommand {
    /// Выполнить запрос на следующем animation frame
    ScheduleFetch(u64),
    ArmHardTimeout(u64),
    ArmDataTimeout(u64),
    CancelTimers,
}

#[derive(Debug, Clone, Default)]
pub struct BreakdownLoader {
    state: LoadState,
    has_tried_fetch: bool,
    has_breakdown: bool,
    generation: u64,
    fetch_count: u32,
}

impl BreakdownLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match &self.state {
            LoadState::Error(failure) => Some(failure),
            _ => None,
        }
    }

    /// Сколько раз загрузка была запущена
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count
    }

    /// Колбэк animation frame должен выполнить запрос только для текущего поколения
    pub fn should_fetch(&self, generation: u64) -> bool {
        generation == self.generation && self.is_loading()
    }

    pub fn on_mount(&mut self, has_breakdown: bool) -> Vec<LoaderCommand> {
        self.has_breakdown = has_breakdown;
        if has_breakdown {
            self.state = LoadState::Success;
            return Vec::new();
        }
        if self.has_tried_fetch {
            return Vec::new();
        }
        self.start()
    }

    /// Внешний кэш изменился. Пропажа данных означает сброс кэша:
    /// флаги сбрасываются и загрузка начинается заново.
    pub fn on_breakdown_changed(&mut self, present: bool) -> Vec<LoaderCommand> {
        let had = self.has_breakdown;
        self.has_breakdown = present;
        match (had, present) {
            (_, true) if self.state != LoadState::Success => {
                self.state = LoadState::Success;
                vec![LoaderCommand::CancelTimers]
            }
            (true, false) => {
                self.has_tried_fetch = false;
                self.state = LoadState::Idle;
                let mut commands = vec![LoaderCommand::CancelTimers];
                commands.extend(self.start());
                commands
            }
            _ => Vec::new(),
        }
    }

    pub fn on_fetch_resolved(&mut self, generation: u64, outcome: FetchOutcome) -> Vec<LoaderCommand> {
        if !self.should_fetch(generation) {
            return Vec::new();
        }
        match outcome {
            FetchOutcome::Delivered if self.has_breakdown => {
                self.state = LoadState::Success;
                vec![LoaderCommand::CancelTimers]
            }
            FetchOutcome::Delivered => vec![LoaderCommand::ArmDataTimeout(generation)],
            FetchOutcome::ErrorPayload(message) | FetchOutcome::Failed(message) => {
                self.fail(LoadFailure::Fetch(message))
            }
        }
    }

    pub fn on_data_timeout(&mut self, generation: u64) -> Vec<LoaderCommand> {
        if !self.should_fetch(generation) || self.has_breakdown {
            return Vec::new();
        }
        self.fail(LoadFailure::NoDataAfterFetch)
    }

    pub fn on_hard_timeout(&mut self, generation: u64) -> Vec<LoaderCommand> {
        if !self.should_fetch(generation) {
            return Vec::new();
        }
        self.fail(LoadFailure::HardTimeout)
    }

    /// Доступно только в состоянии ошибки
    pub fn retry(&mut self) -> Vec<LoaderCommand> {
        if !matches!(self.state, LoadState::Error(_)) {
            return Vec::new();
        }
        self.has_tried_fetch = false;
        self.start()
    }

    fn start(&mut self) -> Vec<LoaderCommand> {
        self.has_tried_fetch = true;
        self.generation += 1;
        self.fetch_count += 1;
        self.state = LoadState::Loading;
        vec![
            LoaderCommand::ScheduleFetch(self.generation),
            LoaderCommand::ArmHardTimeout(self.generation),
        ]
    }

    fn fail(&mut self, failure: LoadFailure) -> Vec<LoaderCommand> {
        self.state = LoadState::Error(failure);
        vec![LoaderCommand::CancelTimers]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduled(commands: &[LoaderCommand]) -> Option<u64> {
        commands.iter().find_map(|c| match c {
            LoaderCommand::ScheduleFetch(generation) => Some(*generation),
            _ => None,
        })
    }

    #[test]
    fn test_success_fetches_once() {
        let mut loader = BreakdownLoader::new();
        let commands = loader.on_mount(false);
        let generation = scheduled(&commands).unwrap();
        assert!(loader.is_loading());
        assert!(loader.should_fetch(generation));

        let commands = loader.on_fetch_resolved(generation, FetchOutcome::Delivered);
        assert_eq!(commands, vec![LoaderCommand::ArmDataTimeout(generation)]);

        loader.on_breakdown_changed(true);
        assert_eq!(loader.state(), &LoadState::Success);

        // повторный рендер с данными из кэша
        assert!(loader.on_mount(true).is_empty());
        assert!(loader.on_breakdown_changed(true).is_empty());
        assert!(loader.on_data_timeout(generation).is_empty());
        assert!(loader.on_hard_timeout(generation).is_empty());
        assert_eq!(loader.state(), &LoadState::Success);
        assert_eq!(loader.fetch_count(), 1);
    }

    #[test]
    fn test_mount_with_cached_data_does_not_fetch() {
        let mut loader = BreakdownLoader::new();
        assert!(loader.on_mount(true).is_empty());
        assert_eq!(loader.state(), &LoadState::Success);
        assert_eq!(loader.fetch_count(), 0);
    }

    #[test]
    fn test_rejected_fetch_then_retry() {
        let mut loader = BreakdownLoader::new();
        let generation = scheduled(&loader.on_mount(false)).unwrap();
        loader.on_fetch_resolved(generation, FetchOutcome::Failed("network".into()));
        assert_eq!(
            loader.failure(),
            Some(&LoadFailure::Fetch("network".into()))
        );
        assert_eq!(loader.fetch_count(), 1);

        let retry = loader.retry();
        assert!(scheduled(&retry).is_some());
        assert!(loader.is_loading());
        assert_eq!(loader.fetch_count(), 2);

        // retry вне ошибки ничего не делает
        assert!(loader.retry().is_empty());
        assert_eq!(loader.fetch_count(), 2);
    }

    #[test]
    fn test_error_payload_is_failure() {
        let mut loader = BreakdownLoader::new();
        let generation = scheduled(&loader.on_mount(false)).unwrap();
        loader.on_fetch_resolved(
            generation,
            FetchOutcome::ErrorPayload("ไม่พบข้อมูล".into()),
        );
        assert_eq!(loader.failure().map(|f| f.message()), Some("ไม่พบข้อมูล".to_string()));
    }

    #[test]
    fn test_data_timeout_after_delivery_without_data() {
        let mut loader = BreakdownLoader::new();
        let generation = scheduled(&loader.on_mount(false)).unwrap();
        loader.on_fetch_resolved(generation, FetchOutcome::Delivered);
        loader.on_data_timeout(generation);
        assert_eq!(loader.failure(), Some(&LoadFailure::NoDataAfterFetch));
    }

    #[test]
    fn test_hard_timeout_and_stale_generation() {
        let mut loader = BreakdownLoader::new();
        let first = scheduled(&loader.on_mount(false)).unwrap();
        loader.on_hard_timeout(first);
        assert_eq!(loader.failure(), Some(&LoadFailure::HardTimeout));

        let second = scheduled(&loader.retry()).unwrap();
        assert_ne!(first, second);
        // таймер и ответ первого поколения уже не действуют
        assert!(loader.on_hard_timeout(first).is_empty());
        assert!(loader
            .on_fetch_resolved(first, FetchOutcome::Failed("late".into()))
            .is_empty());
        assert!(loader.is_loading());
    }

    #[test]
    fn test_cleared_cache_triggers_fresh_fetch() {
        let mut loader = BreakdownLoader::new();
        loader.on_mount(true);
        let commands = loader.on_breakdown_changed(false);
        assert!(scheduled(&commands).is_some());
        assert!(loader.is_loading());
        assert_eq!(loader.fetch_count(), 1);
    }
}
