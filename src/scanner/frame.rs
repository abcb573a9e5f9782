use std::time::Duration;

use image::RgbaImage;

use super::error::FrameError;
use crate::core::color::PixelSample;

/// 帧数据结构
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // RGBA 格式
    pub timestamp: Duration,
    pub frame_number: u64,
}

impl Frame {
    pub fn new(
        width: u32,
        height: u32,
        data: Vec<u8>,
        timestamp_ms: u64,
        frame_number: u64,
    ) -> Self {
        Self {
            width,
            height,
            data,
            timestamp: Duration::from_millis(timestamp_ms),
            frame_number,
        }
    }

    pub fn from_image(image: RgbaImage, timestamp_ms: u64, frame_number: u64) -> Self {
        let (width, height) = image.dimensions();
        Self::new(width, height, image.into_raw(), timestamp_ms, frame_number)
    }

    /// 解码 JPEG / PNG / BMP 快照
    pub fn decode(bytes: &[u8], timestamp_ms: u64, frame_number: u64) -> Result<Self, FrameError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self::from_image(image, timestamp_ms, frame_number))
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp.as_millis() as u64
    }

    /// 读取画面中心像素 (width / 2, height / 2)
    pub fn center_sample(&self) -> Result<PixelSample, FrameError> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::Empty {
                width: self.width,
                height: self.height,
            });
        }

        let expected = self.pixel_count() * 4;
        if self.data.len() < expected {
            return Err(FrameError::BufferTooSmall {
                expected,
                actual: self.data.len(),
            });
        }

        let (cx, cy) = center_of(self.width, self.height);
        let idx = (cy * self.width as usize + cx) * 4;
        Ok(PixelSample::new(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
        ))
    }
}

/// 帧元数据（轻量级，用于传递信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    pub width: u32,
    pub height: u32,
    pub timestamp_ms: u64,
    pub frame_number: u64,
}

impl FrameInfo {
    pub fn from_frame(frame: &Frame) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            timestamp_ms: frame.timestamp_ms(),
            frame_number: frame.frame_number,
        }
    }
}

/// 从原生相机层传递的 YUV420 平面帧
#[derive(Debug)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub y_plane: Vec<u8>,
    pub u_plane: Vec<u8>,
    pub v_plane: Vec<u8>,
    pub timestamp_ms: u64,
    pub frame_number: u64,
}

impl RawFrame {
    /// 只转换中心像素，不做整帧 RGBA 转换
    pub fn center_sample(&self) -> Result<PixelSample, FrameError> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::Empty {
                width: self.width,
                height: self.height,
            });
        }

        let w = self.width as usize;
        let (cx, cy) = center_of(self.width, self.height);
        let y_idx = cy * w + cx;
        // Chroma rows round up on odd widths.
        let uv_idx = (cy / 2) * w.div_ceil(2) + cx / 2;

        let y_val = *self.y_plane.get(y_idx).ok_or(FrameError::BufferTooSmall {
            expected: y_idx + 1,
            actual: self.y_plane.len(),
        })? as f32;
        let chroma_len = self.u_plane.len().min(self.v_plane.len());
        if uv_idx >= chroma_len {
            return Err(FrameError::BufferTooSmall {
                expected: uv_idx + 1,
                actual: chroma_len,
            });
        }
        let u_val = self.u_plane[uv_idx] as f32 - 128.0;
        let v_val = self.v_plane[uv_idx] as f32 - 128.0;

        let r = (y_val + 1.402 * v_val).clamp(0.0, 255.0) as u8;
        let g = (y_val - 0.344136 * u_val - 0.714136 * v_val).clamp(0.0, 255.0) as u8;
        let b = (y_val + 1.772 * u_val).clamp(0.0, 255.0) as u8;

        Ok(PixelSample::new(r, g, b))
    }
}

fn center_of(width: u32, height: u32) -> (usize, usize) {
    ((width / 2) as usize, (height / 2) as usize)
}
