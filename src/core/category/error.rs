use thiserror::Error;

use crate::core::color::ColorLabel;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("分类表 JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("分类表缺少颜色: {0}")]
    MissingCategory(ColorLabel),
    #[error("Scale position out of range for {label}: {value}")]
    InvalidScalePosition { label: ColorLabel, value: f32 },
    #[error("Level out of range for {label}: {value}")]
    InvalidLevel { label: ColorLabel, value: f32 },
}
