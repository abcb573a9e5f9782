//! 颜色扫描器 - 从相机帧中心取样，颜色保持 5 秒后确认
//!
//! 核心流程：
//! 1. 取样 - 读取帧中心像素（RGBA / YUV420 / 编码快照）
//! 2. 分类 - RGB → HSL → 红 / 黄 / 绿 / 蓝
//! 3. 保持确认 - 同一颜色连续保持才确认，中断即重新计时
//! 4. 查表 - 确认后返回对应的分类记录

pub mod batch;
pub mod error;
pub mod frame;
pub mod session;

pub use batch::{BatchReport, BatchScanner, ScanStats};
pub use error::{FrameError, ScanError};
pub use frame::{Frame, FrameInfo, RawFrame};
pub use session::{ScanConfig, ScanEvent, ScanResult, ScanSession};
