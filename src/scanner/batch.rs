//! 批量扫描：并行分类，再按时间顺序喂给保持状态机

use std::sync::{Arc, Mutex};

use log::warn;
use rayon::prelude::*;

use super::error::ScanError;
use super::frame::Frame;
use super::session::{ScanConfig, ScanEvent, ScanResult, ScanSession};
use crate::core::category::CategoryTable;
use crate::core::color::{ColorClassifier, ColorLabel};
use crate::core::hold::HoldProgress;

/// 单批次扫描结果
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// 实际喂入状态机的帧数（确认后即停止）
    pub frames_consumed: usize,
    pub unreadable_frames: usize,
    pub result: Option<ScanResult>,
    pub last_progress: Option<HoldProgress>,
}

/// 扫描统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub processed_frames: u64,
    pub confirmed_scans: u64,
}

pub struct BatchScanner {
    config: ScanConfig,
    categories: Arc<CategoryTable>,
    frame_count: Arc<Mutex<u64>>,
    confirmed_count: Arc<Mutex<u64>>,
}

impl BatchScanner {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default(), Arc::new(CategoryTable::default()))
    }

    pub fn with_config(config: ScanConfig, categories: Arc<CategoryTable>) -> Self {
        Self {
            config,
            categories,
            frame_count: Arc::new(Mutex::new(0)),
            confirmed_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn get_stats(&self) -> ScanStats {
        ScanStats {
            processed_frames: self.frame_count.lock().map(|c| *c).unwrap_or(0),
            confirmed_scans: self.confirmed_count.lock().map(|c| *c).unwrap_or(0),
        }
    }

    pub fn reset(&self) {
        if let Ok(mut count) = self.frame_count.lock() {
            *count = 0;
        }
        if let Ok(mut confirmed) = self.confirmed_count.lock() {
            *confirmed = 0;
        }
    }

    /// Each batch is an independent scan; frames need not arrive sorted.
    pub fn scan(&self, frames: &[Frame]) -> Result<BatchReport, ScanError> {
        let classifier = ColorClassifier::with_config(self.config.classifier.clone());

        let mut observations: Vec<(u64, Option<ColorLabel>, bool)> = frames
            .par_iter()
            .map(|frame| match frame.center_sample() {
                Ok(sample) => (frame.timestamp_ms(), classifier.classify(sample), true),
                Err(err) => {
                    warn!("Frame {} unreadable: {err}", frame.frame_number);
                    (frame.timestamp_ms(), None, false)
                }
            })
            .collect();
        observations.sort_by_key(|(ts, _, _)| *ts);

        let mut session = ScanSession::with_config(self.config.clone(), self.categories.clone());
        session.start();

        let mut report = BatchReport::default();
        for (ts, label, readable) in observations {
            report.frames_consumed += 1;
            if !readable {
                report.unreadable_frames += 1;
            }

            match session.tick_label(label, ts)? {
                ScanEvent::Confirmed(result) => {
                    report.result = Some(result);
                    report.last_progress = None;
                    break;
                }
                ScanEvent::Holding(progress) => report.last_progress = Some(progress),
                ScanEvent::Searching | ScanEvent::Inactive => report.last_progress = None,
            }
        }

        if let Ok(mut count) = self.frame_count.lock() {
            *count += report.frames_consumed as u64;
        }
        if report.result.is_some() {
            if let Ok(mut confirmed) = self.confirmed_count.lock() {
                *confirmed += 1;
            }
        }

        Ok(report)
    }
}

impl Default for BatchScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn create_uniform_frame(rgb: [u8; 3], frame_number: u64) -> Frame {
        let img = RgbaImage::from_pixel(16, 16, Rgba([rgb[0], rgb[1], rgb[2], 255]));
        Frame::from_image(img, frame_number * 500, frame_number)
    }

    #[test]
    fn test_scanner_creation() {
        let scanner = BatchScanner::new();
        let stats = scanner.get_stats();
        assert_eq!(stats.processed_frames, 0);
        assert_eq!(stats.confirmed_scans, 0);
    }

    #[test]
    fn test_batch_confirms_and_stops() {
        let scanner = BatchScanner::new();
        // 0..=14 at 500ms spacing, confirmation lands on frame 10 (5000ms)
        let frames: Vec<_> = (0..15).map(|n| create_uniform_frame([0, 0, 255], n)).collect();

        let report = scanner.scan(&frames).unwrap();
        let result = report.result.expect("blue should confirm");
        assert_eq!(result.label, ColorLabel::Blue);
        assert_eq!(result.confirmed_at_ms, 5000);
        assert_eq!(report.frames_consumed, 11);

        let stats = scanner.get_stats();
        assert_eq!(stats.processed_frames, 11);
        assert_eq!(stats.confirmed_scans, 1);
    }

    #[test]
    fn test_batch_sorts_by_timestamp() {
        let scanner = BatchScanner::new();
        let mut frames: Vec<_> = (0..11).map(|n| create_uniform_frame([0, 200, 0], n)).collect();
        frames.reverse();

        let report = scanner.scan(&frames).unwrap();
        assert_eq!(report.result.map(|r| r.label), Some(ColorLabel::Green));
    }

    #[test]
    fn test_batch_interrupted_hold_stays_pending() {
        let scanner = BatchScanner::new();
        let frames: Vec<_> = (0..12)
            .map(|n| {
                if n == 6 {
                    create_uniform_frame([128, 128, 128], n)
                } else {
                    create_uniform_frame([220, 30, 30], n)
                }
            })
            .collect();

        let report = scanner.scan(&frames).unwrap();
        assert!(report.result.is_none());
        let progress = report.last_progress.expect("still holding");
        assert_eq!(progress.since_ms, 3500);
        assert_eq!(report.frames_consumed, 12);
    }

    #[test]
    fn test_unreadable_frames_break_hold() {
        let scanner = BatchScanner::new();
        let mut frames: Vec<_> = (0..11).map(|n| create_uniform_frame([0, 0, 255], n)).collect();
        frames[4] = Frame::new(16, 16, vec![0u8; 8], 2000, 4);

        let report = scanner.scan(&frames).unwrap();
        assert!(report.result.is_none());
        assert_eq!(report.unreadable_frames, 1);
    }

    #[test]
    fn test_scanner_reset() {
        let scanner = BatchScanner::new();
        let frames: Vec<_> = (0..3).map(|n| create_uniform_frame([0, 0, 255], n)).collect();
        scanner.scan(&frames).unwrap();
        assert_eq!(scanner.get_stats().processed_frames, 3);

        scanner.reset();
        assert_eq!(scanner.get_stats().processed_frames, 0);
    }
}
