//! 颜色扫描器

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use flutter_rust_bridge::frb;
use log::info;

use crate::api::models::scan::{BatchScanInfo, RgbaFrameData, ScanStatus, ScanUpdate};
use crate::core::category::CategoryTable;
use crate::core::color::{classify, ColorLabel, PixelSample};
use crate::scanner::{
    BatchScanner, Frame, RawFrame, ScanConfig, ScanError, ScanSession, ScanStats,
};

/// 颜色扫描器 - 中心取样 + 5 秒保持确认
///
/// ```dart
/// final scanner = ColorScanner.create();
/// scanner.start();
/// final update = scanner.processRgba(width: w, height: h, rgba: bytes, timestampMs: t);
/// if (update.status == ScanStatus.confirmed) showResult(update.result!);
/// ```
#[frb(opaque)]
pub struct ColorScanner {
    session: Mutex<ScanSession>,
    batch: BatchScanner,
    origin: Instant,
}

impl ColorScanner {
    /// 使用内置分类表创建
    #[frb(sync)]
    pub fn create() -> Self {
        crate::init_logging();
        info!("🎨 ColorScanner: created");
        Self::from_table(Arc::new(CategoryTable::default()))
    }

    /// 使用宿主提供的 JSON 分类表创建
    #[frb(sync)]
    pub fn with_categories_json(json: String) -> Result<Self, ScanError> {
        crate::init_logging();
        let table = CategoryTable::from_json(&json)?;
        info!("🎨 ColorScanner: created with custom categories");
        Ok(Self::from_table(Arc::new(table)))
    }

    fn from_table(categories: Arc<CategoryTable>) -> Self {
        Self {
            session: Mutex::new(ScanSession::with_config(
                ScanConfig::default(),
                categories.clone(),
            )),
            batch: BatchScanner::with_config(ScanConfig::default(), categories),
            origin: Instant::now(),
        }
    }

    fn session(&self) -> MutexGuard<'_, ScanSession> {
        // A poisoned session is still structurally valid.
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[frb(sync)]
    pub fn start(&self) {
        self.session().start();
    }

    #[frb(sync)]
    pub fn stop(&self) {
        self.session().stop();
    }

    #[frb(sync, getter)]
    pub fn is_scanning(&self) -> bool {
        self.session().is_scanning()
    }

    /// 处理一帧 RGBA 数据
    #[frb(sync)]
    pub fn process_rgba(
        &self,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
        timestamp_ms: u64,
    ) -> Result<ScanUpdate, ScanError> {
        let frame = Frame::new(width, height, rgba, timestamp_ms, 0);
        Ok(self.session().tick_frame(&frame)?.into())
    }

    /// 处理一帧 YUV420 数据（Android 相机原生格式）
    #[frb(sync)]
    pub fn process_yuv(
        &self,
        width: u32,
        height: u32,
        y_plane: Vec<u8>,
        u_plane: Vec<u8>,
        v_plane: Vec<u8>,
        timestamp_ms: u64,
    ) -> Result<ScanUpdate, ScanError> {
        let raw_frame = RawFrame {
            width,
            height,
            y_plane,
            u_plane,
            v_plane,
            timestamp_ms,
            frame_number: 0,
        };
        Ok(self.session().tick_raw_frame(&raw_frame)?.into())
    }

    /// 处理已取样的中心像素，时间戳取自扫描器创建后的单调时钟
    #[frb(sync)]
    pub fn process_sample_now(&self, r: i32, g: i32, b: i32) -> Result<ScanUpdate, ScanError> {
        let now_ms = self.origin.elapsed().as_millis() as u64;
        let sample = PixelSample::clamped(r, g, b);
        Ok(self.session().tick(sample, now_ms)?.into())
    }

    /// 批量扫描录制好的帧（并行分类），与实时会话互不影响
    #[frb]
    pub fn scan_batch(&self, frames: Vec<RgbaFrameData>) -> Result<BatchScanInfo, ScanError> {
        let frames: Vec<Frame> = frames.into_iter().map(Frame::from).collect();
        Ok(self.batch.scan(&frames)?.into())
    }

    #[frb(sync, getter)]
    pub fn batch_stats(&self) -> ScanStats {
        self.batch.get_stats()
    }

    /// 单次分类，不影响保持状态
    #[frb(sync)]
    pub fn classify_rgb(r: i32, g: i32, b: i32) -> Option<ColorLabel> {
        classify(PixelSample::clamped(r, g, b))
    }
}

impl Drop for ColorScanner {
    fn drop(&mut self) {
        info!("🗑️ ColorScanner: released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_rgba(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        (0..width * height)
            .flat_map(|_| [rgb[0], rgb[1], rgb[2], 255])
            .collect()
    }

    #[test]
    fn test_scanner_flow() {
        let scanner = ColorScanner::create();
        let frame = || solid_rgba(8, 8, [255, 255, 0]);

        let idle = scanner.process_rgba(8, 8, frame(), 0).unwrap();
        assert_eq!(idle.status, ScanStatus::Inactive);

        scanner.start();
        assert!(scanner.is_scanning());

        let holding = scanner.process_rgba(8, 8, frame(), 0).unwrap();
        assert_eq!(holding.status, ScanStatus::Holding);
        assert_eq!(holding.label, Some(ColorLabel::Yellow));
        assert_eq!(holding.remaining_seconds, Some(5));

        let done = scanner.process_rgba(8, 8, frame(), 5000).unwrap();
        assert_eq!(done.status, ScanStatus::Confirmed);
        let result = done.result.unwrap();
        assert_eq!(result.level, 6.5);
        assert_eq!(result.scale_position, 65.0);
        assert_eq!(result.advice_lines.len(), 4);
        assert!(!scanner.is_scanning());
    }

    #[test]
    fn test_stop_resets() {
        let scanner = ColorScanner::create();
        scanner.start();
        scanner.process_rgba(8, 8, solid_rgba(8, 8, [0, 0, 255]), 0).unwrap();
        scanner.stop();

        let update = scanner.process_rgba(8, 8, solid_rgba(8, 8, [0, 0, 255]), 6000).unwrap();
        assert_eq!(update.status, ScanStatus::Inactive);
    }

    #[test]
    fn test_yuv_frame() {
        let scanner = ColorScanner::create();
        scanner.start();
        let update = scanner
            .process_yuv(4, 4, vec![128; 16], vec![128; 4], vec![128; 4], 0)
            .unwrap();
        assert_eq!(update.status, ScanStatus::Searching);
    }

    #[test]
    fn test_scan_batch_confirms_without_touching_session() {
        let scanner = ColorScanner::create();
        let frames: Vec<_> = (0..12)
            .map(|n| RgbaFrameData {
                width: 8,
                height: 8,
                rgba: solid_rgba(8, 8, [0, 200, 0]),
                timestamp_ms: n * 500,
                frame_number: n,
            })
            .collect();

        let info = scanner.scan_batch(frames).unwrap();
        let result = info.result.expect("green should confirm");
        assert_eq!(result.label, ColorLabel::Green);
        assert_eq!(info.frames_consumed, 11);
        assert_eq!(scanner.batch_stats().confirmed_scans, 1);
        assert!(!scanner.is_scanning());
    }

    #[test]
    fn test_scan_batch_reports_pending_hold() {
        let scanner = ColorScanner::create();
        let frames = vec![RgbaFrameData {
            width: 8,
            height: 8,
            rgba: solid_rgba(8, 8, [0, 0, 255]),
            timestamp_ms: 0,
            frame_number: 0,
        }];

        let info = scanner.scan_batch(frames).unwrap();
        assert!(info.result.is_none());
        assert_eq!(info.holding_label, Some(ColorLabel::Blue));
        assert_eq!(info.remaining_seconds, Some(5));
    }

    #[test]
    fn test_classify_rgb_clamps() {
        assert_eq!(ColorScanner::classify_rgb(400, -5, -5), Some(ColorLabel::Red));
        assert_eq!(ColorScanner::classify_rgb(128, 128, 128), None);
    }

    #[test]
    fn test_invalid_categories_json() {
        let err = ColorScanner::with_categories_json("{}".to_string()).err().unwrap();
        assert!(matches!(err, ScanError::Category(_)));
    }

    #[test]
    fn test_update_serializes_camel_case() {
        let scanner = ColorScanner::create();
        scanner.start();
        let update = scanner.process_sample_now(0, 200, 0).unwrap();
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"remainingSeconds\""));
        assert!(json.contains("\"holding\""));
    }
}
