//! 颜色分类：中心像素 → HSL → 四种颜色类别之一

pub mod classifier;
pub mod hsl;
pub mod label;

pub use classifier::{classify, label_for_hue, ClassifierConfig, ColorClassifier};
pub use hsl::{Hsl, PixelSample};
pub use label::ColorLabel;
