use super::hsl::{Hsl, PixelSample};
use super::label::ColorLabel;

/// 饱和度/亮度门限，低于或超出时视为无可靠色相
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    pub min_saturation: f64,
    pub min_lightness: f64,
    pub max_lightness: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_saturation: 20.0,
            min_lightness: 15.0,
            max_lightness: 90.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColorClassifier {
    config: ClassifierConfig,
}

impl ColorClassifier {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn classify(&self, sample: PixelSample) -> Option<ColorLabel> {
        self.classify_hsl(Hsl::from_sample(sample))
    }

    pub fn classify_hsl(&self, hsl: Hsl) -> Option<ColorLabel> {
        if hsl.saturation < self.config.min_saturation
            || hsl.lightness < self.config.min_lightness
            || hsl.lightness > self.config.max_lightness
        {
            return None;
        }
        label_for_hue(hsl.hue)
    }
}

/// Classifies a sample with the default thresholds.
pub fn classify(sample: PixelSample) -> Option<ColorLabel> {
    ColorClassifier::new().classify(sample)
}

/// Maps a hue angle onto the four fixed bands. Hues between bands are unmapped.
pub fn label_for_hue(hue: f64) -> Option<ColorLabel> {
    if (0.0..15.0).contains(&hue) || (hue > 330.0 && hue <= 360.0) {
        Some(ColorLabel::Red)
    } else if (45.0..75.0).contains(&hue) {
        Some(ColorLabel::Yellow)
    } else if (90.0..160.0).contains(&hue) {
        Some(ColorLabel::Green)
    } else if (180.0..260.0).contains(&hue) {
        Some(ColorLabel::Blue)
    } else {
        None
    }
}
