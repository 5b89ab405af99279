use crate::utils::error::{Result, StatsError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 學系代碼，宣告順序即目錄順序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Branch {
    Cse,
    Csbs,
    Cys,
    Aiml,
    Ds,
    Iot,
    It,
    Ece,
    Eee,
    Eie,
    Mech,
    Civil,
    Auto,
    Ame,
    Aids,
}

impl Branch {
    pub const ALL: [Branch; 15] = [
        Branch::Cse,
        Branch::Csbs,
        Branch::Cys,
        Branch::Aiml,
        Branch::Ds,
        Branch::Iot,
        Branch::It,
        Branch::Ece,
        Branch::Eee,
        Branch::Eie,
        Branch::Mech,
        Branch::Civil,
        Branch::Auto,
        Branch::Ame,
        Branch::Aids,
    ];

    /// Branches whose per-company offer counts are recorded on company rows.
    pub const RECRUITMENT: [Branch; 13] = [
        Branch::Cse,
        Branch::Csbs,
        Branch::Cys,
        Branch::Aiml,
        Branch::Ds,
        Branch::Iot,
        Branch::It,
        Branch::Ece,
        Branch::Eee,
        Branch::Eie,
        Branch::Mech,
        Branch::Civil,
        Branch::Auto,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Branch::Cse => "CSE",
            Branch::Csbs => "CSBS",
            Branch::Cys => "CYS",
            Branch::Aiml => "AIML",
            Branch::Ds => "DS",
            Branch::Iot => "IOT",
            Branch::It => "IT",
            Branch::Ece => "ECE",
            Branch::Eee => "EEE",
            Branch::Eie => "EIE",
            Branch::Mech => "MECH",
            Branch::Civil => "CIVIL",
            Branch::Auto => "AUTO",
            Branch::Ame => "AME",
            Branch::Aids => "AIDS",
        }
    }

    pub fn is_recruitment(&self) -> bool {
        Self::RECRUITMENT.contains(self)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Branch {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        Branch::ALL
            .iter()
            .copied()
            .find(|b| b.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| StatsError::InvalidRecordError {
                entity: "branch".to_string(),
                message: format!("unknown branch code '{}'", s),
            })
    }
}

impl TryFrom<String> for Branch {
    type Error = StatsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// 手動輸入的資料可能缺欄位或型別錯誤，一律視為 0
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(count_from_value).unwrap_or(0))
}

fn lenient_percentage<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 100.0))
        .unwrap_or(0.0))
}

/// Salary is only meaningful as a JSON number; anything else means "not disclosed".
fn lenient_salary<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|s| s.is_finite() && *s >= 0.0))
}

/// Negative counts clamp to 0 and fractional counts are truncated.
fn count_from_value(value: &Value) -> u32 {
    match value.as_f64() {
        Some(n) if n.is_finite() && n > 0.0 => n.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub year: i32,
    pub branch: Branch,
    #[serde(default, deserialize_with = "lenient_count")]
    pub class_total: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub selected_total: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub selected_male: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub selected_female: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub registered: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub not_registered: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub eligible: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub not_eligible: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub single_offers: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub multiple_offers: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_offers: u32,
    #[serde(default, deserialize_with = "lenient_percentage")]
    pub total_percentage_single: f64,
}

impl PlacementRecord {
    pub fn new(year: i32, branch: Branch, class_total: u32, selected_total: u32) -> Self {
        Self {
            year,
            branch,
            class_total,
            selected_total,
            selected_male: 0,
            selected_female: 0,
            registered: 0,
            not_registered: 0,
            eligible: 0,
            not_eligible: 0,
            single_offers: 0,
            multiple_offers: 0,
            total_offers: 0,
            total_percentage_single: 0.0,
        }
    }
}

/// 公司資料的原始格式：各學系錄取數是以學系代碼為 key 的頂層欄位
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCompanyRecord {
    year: i32,
    #[serde(default)]
    company_name: String,
    #[serde(default, deserialize_with = "lenient_salary")]
    salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient_count")]
    internship_ppo: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    total_offers: u32,
    #[serde(flatten)]
    branches: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCompanyRecord", into = "RawCompanyRecord")]
pub struct CompanyRecord {
    pub year: i32,
    pub company_name: String,
    pub salary: Option<f64>,
    pub internship_ppo: u32,
    pub branch_offers: BTreeMap<Branch, u32>,
    pub total_offers: u32,
}

impl CompanyRecord {
    pub fn new(year: i32, company_name: impl Into<String>, total_offers: u32) -> Self {
        Self {
            year,
            company_name: company_name.into(),
            salary: None,
            internship_ppo: 0,
            branch_offers: BTreeMap::new(),
            total_offers,
        }
    }

    pub fn with_salary(mut self, salary: f64) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn with_branch(mut self, branch: Branch, count: u32) -> Self {
        self.branch_offers.insert(branch, count);
        self
    }

    pub fn offers_for(&self, branch: Branch) -> u32 {
        self.branch_offers.get(&branch).copied().unwrap_or(0)
    }
}

impl From<RawCompanyRecord> for CompanyRecord {
    fn from(raw: RawCompanyRecord) -> Self {
        // 只採計招募目錄內的學系欄位，其它 key 忽略
        let branch_offers = raw
            .branches
            .iter()
            .filter_map(|(key, value)| {
                let branch = key.parse::<Branch>().ok()?;
                branch
                    .is_recruitment()
                    .then(|| (branch, count_from_value(value)))
            })
            .collect();

        Self {
            year: raw.year,
            company_name: raw.company_name,
            salary: raw.salary,
            internship_ppo: raw.internship_ppo,
            branch_offers,
            total_offers: raw.total_offers,
        }
    }
}

impl From<CompanyRecord> for RawCompanyRecord {
    fn from(record: CompanyRecord) -> Self {
        let branches = record
            .branch_offers
            .into_iter()
            .map(|(branch, count)| (branch.code().to_string(), Value::from(count)))
            .collect();

        Self {
            year: record.year,
            company_name: record.company_name,
            salary: record.salary,
            internship_ppo: record.internship_ppo,
            total_offers: record.total_offers,
            branches,
        }
    }
}

/// A row left out of the record set because its `year` is missing or unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub entity: String,
    pub row: usize,
}

/// 一次抓取的完整資料快照，聚合運算只讀不寫
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub placements: Vec<PlacementRecord>,
    pub companies: Vec<CompanyRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl RecordSet {
    pub fn new(placements: Vec<PlacementRecord>, companies: Vec<CompanyRecord>) -> Self {
        Self {
            placements,
            companies,
            skipped: Vec::new(),
        }
    }

    /// Builds a record set from the two JSON payloads returned by the record source.
    ///
    /// Each payload must be a JSON array, or an object wrapping the array under
    /// `data`. Any other shape is an input-shape error. Rows without a usable
    /// `year` are dropped and listed in `skipped`.
    pub fn from_json(placements: Value, companies: Value) -> Result<Self> {
        let placements = records_from_value::<PlacementRecord>("placement", placements)?;
        let companies = records_from_value::<CompanyRecord>("company", companies)?;

        let skipped = placements
            .skipped
            .iter()
            .map(|row| SkippedRow {
                entity: "placement".to_string(),
                row: *row,
            })
            .chain(companies.skipped.iter().map(|row| SkippedRow {
                entity: "company".to_string(),
                row: *row,
            }))
            .collect();

        Ok(Self {
            placements: placements.records,
            companies: companies.records,
            skipped,
        })
    }

    pub fn placements_in(&self, year: i32) -> impl Iterator<Item = &PlacementRecord> + '_ {
        self.placements.iter().filter(move |r| r.year == year)
    }

    pub fn companies_in(&self, year: i32) -> impl Iterator<Item = &CompanyRecord> + '_ {
        self.companies.iter().filter(move |r| r.year == year)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty() && self.companies.is_empty()
    }
}

/// Rows decoded from one collection, plus the indices of rows dropped for lacking a year.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRows<T> {
    pub records: Vec<T>,
    pub skipped: Vec<usize>,
}

pub fn records_from_value<T>(entity: &str, value: Value) -> Result<DecodedRows<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(StatsError::InputShapeError {
                    entity: entity.to_string(),
                    found: "object without a `data` array".to_string(),
                })
            }
        },
        other => {
            return Err(StatsError::InputShapeError {
                entity: entity.to_string(),
                found: json_kind(&other).to_string(),
            })
        }
    };

    let mut decoded = DecodedRows {
        records: Vec::with_capacity(items.len()),
        skipped: Vec::new(),
    };

    for (index, mut item) in items.into_iter().enumerate() {
        if let Value::Object(map) = &mut item {
            match lenient_year(map.get("year")) {
                Some(year) => {
                    map.insert("year".to_string(), Value::from(year));
                }
                None => {
                    decoded.skipped.push(index);
                    continue;
                }
            }
        }

        let record = serde_json::from_value(item).map_err(|e| StatsError::InvalidRecordError {
            entity: entity.to_string(),
            message: format!("row {}: {}", index, e),
        })?;
        decoded.records.push(record);
    }

    Ok(decoded)
}

/// 表單清空年份時會存成 null；整數或數字字串才算有效年份
fn lenient_year(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
