use std::collections::BTreeMap;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::error::CategoryError;
use crate::core::color::ColorLabel;

/// 每种颜色对应的压力等级记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    /// 压力分值，0–10
    pub level: f32,
    pub explanation: String,
    /// 建议文本，每行一条
    pub advice: String,
    /// 指针在刻度条上的位置（百分比）
    #[serde(rename = "scalePos")]
    pub scale_position: f32,
}

impl CategoryRecord {
    pub fn advice_lines(&self) -> Vec<&str> {
        self.advice
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    fn validate(&self, label: ColorLabel) -> Result<(), CategoryError> {
        if !(0.0..=100.0).contains(&self.scale_position) {
            return Err(CategoryError::InvalidScalePosition {
                label,
                value: self.scale_position,
            });
        }
        if !(0.0..=10.0).contains(&self.level) {
            return Err(CategoryError::InvalidLevel {
                label,
                value: self.level,
            });
        }
        Ok(())
    }
}

static BUILTIN: Lazy<CategoryTable> = Lazy::new(CategoryTable::build_builtin);

type RecordMap = BTreeMap<ColorLabel, CategoryRecord>;

/// 颜色 → 记录 的静态查找表，由宿主注入
///
/// Deserialization goes through [`TryFrom`], so every table in hand covers all labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecordMap", into = "RecordMap")]
pub struct CategoryTable {
    records: RecordMap,
}

impl TryFrom<RecordMap> for CategoryTable {
    type Error = CategoryError;

    fn try_from(records: RecordMap) -> Result<Self, Self::Error> {
        let table = Self { records };
        table.validate()?;
        Ok(table)
    }
}

impl From<CategoryTable> for RecordMap {
    fn from(table: CategoryTable) -> Self {
        table.records
    }
}

impl CategoryTable {
    pub fn builtin() -> &'static CategoryTable {
        &BUILTIN
    }

    /// Parses a table keyed by label name. Every label must be present.
    pub fn from_json(json: &str) -> Result<Self, CategoryError> {
        let records: RecordMap = serde_json::from_str(json)?;
        let table = CategoryTable::try_from(records)?;
        debug!("Loaded category table with {} records", table.records.len());
        Ok(table)
    }

    pub fn from_records(
        records: impl IntoIterator<Item = (ColorLabel, CategoryRecord)>,
    ) -> Result<Self, CategoryError> {
        Self::try_from(records.into_iter().collect::<RecordMap>())
    }

    pub fn to_json(&self) -> Result<String, CategoryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, label: ColorLabel) -> Option<&CategoryRecord> {
        self.records.get(&label)
    }

    pub fn lookup(&self, label: ColorLabel) -> Result<&CategoryRecord, CategoryError> {
        self.get(label).ok_or(CategoryError::MissingCategory(label))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn validate(&self) -> Result<(), CategoryError> {
        for label in ColorLabel::ALL {
            self.lookup(label)?.validate(label)?;
        }
        Ok(())
    }

    fn build_builtin() -> Self {
        let record = |level: f32, explanation: &str, advice: &str, scale_position: f32| {
            CategoryRecord {
                level,
                explanation: explanation.to_string(),
                advice: advice.to_string(),
                scale_position,
            }
        };

        let records = [
            (
                ColorLabel::Red,
                record(
                    9.2,
                    "ระดับความเครียดสูงมาก (High Stress Detected) พบคลื่นความพี่สีแดงที่บ่งบอกถึงความกดดันอย่างรุนแรง",
                    "• หยุดพักทันที 15-20 นาที\n• ทำสมาธิหรือฝึกลมหายใจช้าๆ\n• ดื่มน้ำเปล่าเพื่อปรับสมดุล\n• หลีกเลี่ยงหน้าจอหรืองานเร่งด่วน",
                    90.0,
                ),
            ),
            (
                ColorLabel::Yellow,
                record(
                    6.5,
                    "ความเครียดสะสมปานกลาง (Moderate Stress) พลังงานมีความแปรปรวนแต่ยังควบคุมได้",
                    "• พักสายตา 5-10 นาที\n• ยืดเหยียดร่างกายเบาๆ\n• ฟังเพลงผ่อนคลาย\n• หาถั่วหรือผลไม้ทานเล่น",
                    65.0,
                ),
            ),
            (
                ColorLabel::Green,
                record(
                    4.2,
                    "ร่างกายอยู่ในภาวะสมดุล (Balanced State) ระบบประสาทผ่อนคลายและพร้อมทำงาน",
                    "• รักษาสภาพแวดล้อมปัจจุบันไว้\n• ทำงานที่ใช้สมาธิต่อได้ดี\n• ยิ้มรับความสดชื่น",
                    35.0,
                ),
            ),
            (
                ColorLabel::Blue,
                record(
                    2.5,
                    "ภาวะสงบนิ่งเป็นพิเศษ (Deep Calm) สภาวะจิตใจแจ่มใสและมั่นคงมาก",
                    "• เหมาะสำหรับการวางแผนระยะยาว\n• แบ่งปันพลังงานบวกให้คนรอบข้าง\n• จดบันทึกไอเดียดีๆ ที่เกิดขึ้น",
                    15.0,
                ),
            ),
        ];

        Self {
            records: records.into_iter().collect(),
        }
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
