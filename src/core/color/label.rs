use serde::{Deserialize, Serialize};
use std::fmt;

/// 可识别的四种颜色类别，"无" 用 `Option::None` 表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorLabel {
    Red,
    Yellow,
    Green,
    Blue,
}

impl ColorLabel {
    pub const ALL: [ColorLabel; 4] = [
        ColorLabel::Red,
        ColorLabel::Yellow,
        ColorLabel::Green,
        ColorLabel::Blue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ColorLabel::Red => "Red",
            ColorLabel::Yellow => "Yellow",
            ColorLabel::Green => "Green",
            ColorLabel::Blue => "Blue",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|label| label.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ColorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup() {
        assert_eq!(ColorLabel::from_name("yellow"), Some(ColorLabel::Yellow));
        assert_eq!(ColorLabel::from_name("Blue"), Some(ColorLabel::Blue));
        assert_eq!(ColorLabel::from_name("purple"), None);
    }

    #[test]
    fn test_serde_uses_variant_names() {
        let json = serde_json::to_string(&ColorLabel::Green).unwrap();
        assert_eq!(json, "\"Green\"");
    }
}
