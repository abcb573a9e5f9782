use thiserror::Error;

use crate::core::category::CategoryError;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("空帧: {width}x{height}")]
    Empty { width: u32, height: u32 },
    #[error("帧数据长度不足: expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
    #[error("图像解码失败: {0}")]
    Decode(#[from] image::ImageError),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Frame(#[from] FrameError),
    #[error(transparent)]
    Category(#[from] CategoryError),
}
