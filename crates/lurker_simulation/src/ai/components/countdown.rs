//! Countdown: явный таймер вместо suspended coroutine.

/// Таймер обратного отсчёта, продвигается frame delta.
///
/// `Idle` = не запущен или отменён. Отмена посреди отсчёта: просто `cancel()`,
/// никакого "висящего" callback'а не остаётся.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Countdown {
    #[default]
    Idle,
    CountingDown {
        remaining: f32,
    },
}

impl Countdown {
    pub fn start(duration: f32) -> Self {
        Self::CountingDown {
            remaining: duration.max(0.0),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::CountingDown { .. })
    }

    pub fn remaining(&self) -> Option<f32> {
        match self {
            Self::Idle => None,
            Self::CountingDown { remaining } => Some(*remaining),
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Продвигает таймер на `delta`.
    ///
    /// Возвращает `true` ровно в тот тик, когда отсчёт закончился (таймер становится `Idle`).
    pub fn tick(&mut self, delta: f32) -> bool {
        let Self::CountingDown { remaining } = self else {
            return false;
        };

        let left = *remaining - delta;
        if left <= 0.0 {
            *self = Self::Idle;
            true
        } else {
            *remaining = left;
            false
        }
    }
}
