#![allow(dead_code)]

use keylens::dataset::{Competition, Dataset, KeywordRow};
use serde_json::{json, Map, Value};

/// Builder for raw keyword records as the search API returns them.
pub struct RecordBuilder {
    fields: Map<String, Value>,
}

impl RecordBuilder {
    pub fn new(keyword: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("relKeyword".to_string(), json!(keyword));
        Self { fields }
    }

    pub fn pc(self, value: impl Into<Value>) -> Self {
        self.field("monthlyPcQcCnt", value)
    }

    pub fn mobile(self, value: impl Into<Value>) -> Self {
        self.field("monthlyMobileQcCnt", value)
    }

    pub fn comp(self, value: impl Into<Value>) -> Self {
        self.field("compIdx", value)
    }

    pub fn depth(self, value: impl Into<Value>) -> Self {
        self.field("plAvgDepth", value)
    }

    pub fn ctr(self, value: impl Into<Value>) -> Self {
        self.field("monthlyAveCtr", value)
    }

    pub fn clicks(self, value: impl Into<Value>) -> Self {
        self.field("monthlyAvePcClkCnt", value)
    }

    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// The two-record search used across the suite.
pub fn vitamin_records() -> Value {
    Value::Array(vec![
        RecordBuilder::new("vitamin").pc(1200).mobile("< 10").comp("낮음").build(),
        RecordBuilder::new("vitamin c").pc(300).mobile(700).comp("높음").build(),
    ])
}

pub fn row(keyword: &str, pc: u64, mobile: u64, competition: Competition) -> KeywordRow {
    KeywordRow::new(keyword, pc, mobile, competition)
}

/// Ten keywords in three obvious (volume, competition) groups.
pub fn grouped_dataset() -> Dataset {
    Dataset::from_rows(vec![
        row("a1", 50_000, 50_000, Competition::HIGH),
        row("a2", 48_000, 50_000, Competition::HIGH),
        row("a3", 51_000, 50_000, Competition::HIGH),
        row("b1", 5_000, 5_000, Competition::MEDIUM),
        row("b2", 4_800, 5_000, Competition::MEDIUM),
        row("b3", 5_100, 5_000, Competition::MEDIUM),
        row("c1", 10, 20, Competition::LOW),
        row("c2", 12, 20, Competition::LOW),
        row("c3", 9, 20, Competition::LOW),
        row("c4", 11, 20, Competition::LOW),
    ])
}
