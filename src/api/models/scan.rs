use serde::{Deserialize, Serialize};

use crate::core::color::ColorLabel;
use crate::scanner::{BatchReport, Frame, ScanEvent, ScanResult};

/// 扫描状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScanStatus {
    Inactive,
    Searching,
    Holding,
    Confirmed,
}

/// 确认结果，供结果页渲染
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResultInfo {
    pub label: ColorLabel,
    pub level: f32,
    pub explanation: String,
    pub advice_lines: Vec<String>,
    /// 刻度指针位置（百分比）
    pub scale_position: f32,
    pub confirmed_at_ms: u64,
}

impl From<ScanResult> for ScanResultInfo {
    fn from(result: ScanResult) -> Self {
        Self {
            label: result.label,
            level: result.record.level,
            explanation: result.record.explanation.clone(),
            advice_lines: result
                .record
                .advice_lines()
                .into_iter()
                .map(str::to_string)
                .collect(),
            scale_position: result.record.scale_position,
            confirmed_at_ms: result.confirmed_at_ms,
        }
    }
}

/// 每帧返回给宿主的更新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanUpdate {
    pub status: ScanStatus,
    pub label: Option<ColorLabel>,
    /// 倒计时秒数，仅在 Holding 时存在
    pub remaining_seconds: Option<u32>,
    pub result: Option<ScanResultInfo>,
}

impl From<ScanEvent> for ScanUpdate {
    fn from(event: ScanEvent) -> Self {
        match event {
            ScanEvent::Inactive => Self::bare(ScanStatus::Inactive),
            ScanEvent::Searching => Self::bare(ScanStatus::Searching),
            ScanEvent::Holding(progress) => Self {
                status: ScanStatus::Holding,
                label: Some(progress.label),
                remaining_seconds: Some(progress.remaining_secs),
                result: None,
            },
            ScanEvent::Confirmed(result) => Self {
                status: ScanStatus::Confirmed,
                label: Some(result.label),
                remaining_seconds: None,
                result: Some(result.into()),
            },
        }
    }
}

impl ScanUpdate {
    fn bare(status: ScanStatus) -> Self {
        Self {
            status,
            label: None,
            remaining_seconds: None,
            result: None,
        }
    }
}

/// 宿主批量上传的一帧 RGBA 数据
#[derive(Debug, Clone)]
pub struct RgbaFrameData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    pub timestamp_ms: u64,
    pub frame_number: u64,
}

impl From<RgbaFrameData> for Frame {
    fn from(data: RgbaFrameData) -> Self {
        Frame::new(
            data.width,
            data.height,
            data.rgba,
            data.timestamp_ms,
            data.frame_number,
        )
    }
}

/// 批量扫描结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchScanInfo {
    pub frames_consumed: u32,
    pub unreadable_frames: u32,
    /// 未确认时仍在保持的颜色
    pub holding_label: Option<ColorLabel>,
    pub remaining_seconds: Option<u32>,
    pub result: Option<ScanResultInfo>,
}

impl From<BatchReport> for BatchScanInfo {
    fn from(report: BatchReport) -> Self {
        Self {
            frames_consumed: report.frames_consumed as u32,
            unreadable_frames: report.unreadable_frames as u32,
            holding_label: report.last_progress.map(|p| p.label),
            remaining_seconds: report.last_progress.map(|p| p.remaining_secs),
            result: report.result.map(ScanResultInfo::from),
        }
    }
}
