/// 单个采样像素（RGB 三通道）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelSample {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a sample from untrusted integer channels, clamping each into [0, 255].
    pub fn clamped(r: i32, g: i32, b: i32) -> Self {
        let clamp = |v: i32| v.clamp(0, 255) as u8;
        Self {
            r: clamp(r),
            g: clamp(g),
            b: clamp(b),
        }
    }

    /// 从 RGBA 像素切片读取，忽略 alpha
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2])
    }
}

impl From<[u8; 3]> for PixelSample {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

/// HSL 表示：hue ∈ [0, 360)，saturation / lightness ∈ [0, 100]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn from_sample(sample: PixelSample) -> Self {
        let PixelSample { r, g, b } = sample;
        let max_channel = r.max(g).max(b);
        let min_channel = r.min(g).min(b);

        let rf = r as f64 / 255.0;
        let gf = g as f64 / 255.0;
        let bf = b as f64 / 255.0;
        let max = max_channel as f64 / 255.0;
        let min = min_channel as f64 / 255.0;
        let lightness = (max + min) / 2.0;

        if max_channel == min_channel {
            return Self::new(0.0, 0.0, lightness * 100.0);
        }

        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        // Channel ties resolve red first, then green.
        let sector = if max_channel == r {
            (gf - bf) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max_channel == g {
            (bf - rf) / delta + 2.0
        } else {
            (rf - gf) / delta + 4.0
        };

        Self::new(
            normalize_hue(sector * 60.0),
            saturation * 100.0,
            lightness * 100.0,
        )
    }
}

impl From<PixelSample> for Hsl {
    fn from(sample: PixelSample) -> Self {
        Self::from_sample(sample)
    }
}

fn normalize_hue(hue: f64) -> f64 {
    let wrapped = hue.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.1
    }

    #[test]
    fn test_red_sample() {
        let hsl = Hsl::from_sample(PixelSample::new(220, 30, 30));
        assert!(approx(hsl.hue, 0.0));
        assert!(approx(hsl.saturation, 76.0));
        assert!(approx(hsl.lightness, 49.0));
    }

    #[test]
    fn test_primary_hues() {
        assert!(approx(Hsl::from_sample(PixelSample::new(255, 255, 0)).hue, 60.0));
        assert!(approx(Hsl::from_sample(PixelSample::new(0, 200, 0)).hue, 120.0));
        assert!(approx(Hsl::from_sample(PixelSample::new(0, 0, 255)).hue, 240.0));
    }

    #[test]
    fn test_gray_has_no_saturation() {
        let hsl = Hsl::from_sample(PixelSample::new(128, 128, 128));
        assert_eq!(hsl.hue, 0.0);
        assert_eq!(hsl.saturation, 0.0);
        assert!(approx(hsl.lightness, 50.2));
    }

    #[test]
    fn test_hue_wraps_below_red() {
        let hsl = Hsl::from_sample(PixelSample::new(255, 0, 40));
        assert!(hsl.hue > 330.0 && hsl.hue < 360.0);
    }

    #[test]
    fn test_bright_saturation_branch() {
        // lightness > 50 uses the 2 - max - min denominator
        let hsl = Hsl::from_sample(PixelSample::new(255, 200, 200));
        assert!(hsl.lightness > 50.0);
        assert!(approx(hsl.saturation, 100.0));
    }

    #[test]
    fn test_clamped_sample() {
        let sample = PixelSample::clamped(300, -20, 128);
        assert_eq!(sample, PixelSample::new(255, 0, 128));
    }
}
