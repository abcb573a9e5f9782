use std::time::Duration;

use crate::core::color::ColorLabel;

pub const HOLD_DURATION_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldState {
    #[default]
    Idle,
    Holding { label: ColorLabel, since_ms: u64 },
}

/// 当前保持进度，用于界面倒计时
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldProgress {
    pub label: ColorLabel,
    pub since_ms: u64,
    pub elapsed_ms: u64,
    pub remaining_secs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// `None` while idle, otherwise the running hold.
    Pending(Option<HoldProgress>),
    Confirmed(ColorLabel),
}

impl HoldOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, HoldOutcome::Confirmed(_))
    }

    pub fn confirmed_label(&self) -> Option<ColorLabel> {
        match self {
            HoldOutcome::Confirmed(label) => Some(*label),
            HoldOutcome::Pending(_) => None,
        }
    }

    pub fn progress(&self) -> Option<&HoldProgress> {
        match self {
            HoldOutcome::Pending(progress) => progress.as_ref(),
            HoldOutcome::Confirmed(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HoldConfig {
    pub hold_duration: Duration,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            hold_duration: Duration::from_millis(HOLD_DURATION_MS),
        }
    }
}

impl HoldConfig {
    pub fn with_duration_ms(hold_ms: u64) -> Self {
        Self {
            hold_duration: Duration::from_millis(hold_ms),
        }
    }

    pub fn hold_ms(&self) -> u64 {
        self.hold_duration.as_millis() as u64
    }

    fn remaining_secs(&self, elapsed_ms: u64) -> u32 {
        let remaining_ms = self.hold_ms().saturating_sub(elapsed_ms);
        remaining_ms.div_ceil(1000) as u32
    }
}

impl HoldState {
    pub fn label(&self) -> Option<ColorLabel> {
        match self {
            HoldState::Idle => None,
            HoldState::Holding { label, .. } => Some(*label),
        }
    }

    pub fn since_ms(&self) -> Option<u64> {
        match self {
            HoldState::Idle => None,
            HoldState::Holding { since_ms, .. } => Some(*since_ms),
        }
    }

    pub fn transition(
        &self,
        observed: Option<ColorLabel>,
        now_ms: u64,
        config: &HoldConfig,
    ) -> (HoldState, HoldOutcome) {
        let Some(observed) = observed else {
            return (HoldState::Idle, HoldOutcome::Pending(None));
        };

        match *self {
            HoldState::Holding { label, since_ms } if label == observed => {
                // Out-of-order timestamps count as zero elapsed.
                let elapsed_ms = now_ms.saturating_sub(since_ms);
                if elapsed_ms >= config.hold_ms() {
                    (HoldState::Idle, HoldOutcome::Confirmed(label))
                } else {
                    (
                        *self,
                        HoldOutcome::Pending(Some(HoldProgress {
                            label,
                            since_ms,
                            elapsed_ms,
                            remaining_secs: config.remaining_secs(elapsed_ms),
                        })),
                    )
                }
            }
            _ => (
                HoldState::Holding {
                    label: observed,
                    since_ms: now_ms,
                },
                HoldOutcome::Pending(Some(HoldProgress {
                    label: observed,
                    since_ms: now_ms,
                    elapsed_ms: 0,
                    remaining_secs: config.remaining_secs(0),
                })),
            ),
        }
    }
}

/// 保持确认状态机：同一颜色需连续保持 `hold_duration` 才确认，任何中断都会重新计时
///
/// Timestamps passed to [`HoldTracker::observe`] must be non-decreasing.
/// The tracker takes `&mut self` and is meant to be driven by a single loop.
#[derive(Debug, Clone, Default)]
pub struct HoldTracker {
    state: HoldState,
    config: HoldConfig,
    observation_count: u64,
}

impl HoldTracker {
    pub fn new() -> Self {
        Self::with_config(HoldConfig::default())
    }

    pub fn with_config(config: HoldConfig) -> Self {
        Self {
            state: HoldState::Idle,
            config,
            observation_count: 0,
        }
    }

    pub fn observe(&mut self, label: Option<ColorLabel>, now_ms: u64) -> HoldOutcome {
        self.observation_count += 1;

        let (new_state, outcome) = self.state.transition(label, now_ms, &self.config);
        self.state = new_state;

        outcome
    }

    pub fn state(&self) -> &HoldState {
        &self.state
    }

    pub fn config(&self) -> &HoldConfig {
        &self.config
    }

    pub fn observation_count(&self) -> u64 {
        self.observation_count
    }

    pub fn reset(&mut self) {
        self.state = HoldState::Idle;
        self.observation_count = 0;
    }
}
