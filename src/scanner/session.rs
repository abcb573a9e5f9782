use std::sync::Arc;

use log::{debug, info};

use super::error::ScanError;
use super::frame::{Frame, RawFrame};
use crate::core::category::{CategoryRecord, CategoryTable};
use crate::core::color::{ClassifierConfig, ColorClassifier, ColorLabel, PixelSample};
use crate::core::hold::{HoldConfig, HoldOutcome, HoldProgress, HoldState, HoldTracker};

#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    pub classifier: ClassifierConfig,
    pub hold: HoldConfig,
}

impl ScanConfig {
    /// 较短的保持时间，用于演示或调试
    pub fn quick() -> Self {
        Self {
            hold: HoldConfig::with_duration_ms(2000),
            ..Default::default()
        }
    }

    pub fn strict() -> Self {
        Self {
            classifier: ClassifierConfig {
                min_saturation: 35.0,
                min_lightness: 20.0,
                max_lightness: 85.0,
            },
            hold: HoldConfig::with_duration_ms(8000),
        }
    }
}

/// 确认后的扫描结果
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub label: ColorLabel,
    pub record: CategoryRecord,
    pub confirmed_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// 未在扫描，忽略该帧
    Inactive,
    /// 没有可确认的颜色
    Searching,
    Holding(HoldProgress),
    Confirmed(ScanResult),
}

impl ScanEvent {
    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            ScanEvent::Confirmed(result) => Some(result),
            _ => None,
        }
    }
}

/// 扫描会话：持有 scanning 标志、分类器、保持状态机和分类表
///
/// Driven by the host once per displayed frame. A confirmation stops the
/// session; the host calls [`ScanSession::restart`] to scan again.
pub struct ScanSession {
    classifier: ColorClassifier,
    tracker: HoldTracker,
    categories: Arc<CategoryTable>,
    scanning: bool,
    tick_count: u64,
}

impl ScanSession {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default(), Arc::new(CategoryTable::default()))
    }

    pub fn with_config(config: ScanConfig, categories: Arc<CategoryTable>) -> Self {
        Self {
            classifier: ColorClassifier::with_config(config.classifier),
            tracker: HoldTracker::with_config(config.hold),
            categories,
            scanning: false,
            tick_count: 0,
        }
    }

    pub fn start(&mut self) {
        self.tracker.reset();
        self.scanning = true;
        info!("Scan started");
    }

    pub fn restart(&mut self) {
        self.start();
    }

    pub fn stop(&mut self) {
        self.tracker.reset();
        self.scanning = false;
        info!("Scan stopped");
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    pub fn hold_state(&self) -> &HoldState {
        self.tracker.state()
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn tick(&mut self, sample: PixelSample, now_ms: u64) -> Result<ScanEvent, ScanError> {
        let label = self.classifier.classify(sample);
        self.tick_label(label, now_ms)
    }

    pub fn tick_frame(&mut self, frame: &Frame) -> Result<ScanEvent, ScanError> {
        let sample = frame.center_sample()?;
        self.tick(sample, frame.timestamp_ms())
    }

    pub fn tick_raw_frame(&mut self, raw_frame: &RawFrame) -> Result<ScanEvent, ScanError> {
        let sample = raw_frame.center_sample()?;
        self.tick(sample, raw_frame.timestamp_ms)
    }

    /// Feeds an already classified observation.
    pub fn tick_label(
        &mut self,
        label: Option<ColorLabel>,
        now_ms: u64,
    ) -> Result<ScanEvent, ScanError> {
        if !self.scanning {
            return Ok(ScanEvent::Inactive);
        }
        self.tick_count += 1;

        let previous = self.tracker.state().label();
        let outcome = self.tracker.observe(label, now_ms);

        match outcome {
            HoldOutcome::Pending(None) => {
                if let Some(lost) = previous {
                    debug!("Color lost ({lost}) - resetting hold");
                }
                Ok(ScanEvent::Searching)
            }
            HoldOutcome::Pending(Some(progress)) => {
                if previous != Some(progress.label) {
                    debug!("Started holding: {}", progress.label);
                }
                Ok(ScanEvent::Holding(progress))
            }
            HoldOutcome::Confirmed(label) => {
                // The hold is consumed either way, so stop before the lookup.
                self.scanning = false;
                let record = self.categories.lookup(label)?.clone();
                info!("Confirmed {label} at {now_ms}ms after {} ticks", self.tick_count);
                Ok(ScanEvent::Confirmed(ScanResult {
                    label,
                    record,
                    confirmed_at_ms: now_ms,
                }))
            }
        }
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}
