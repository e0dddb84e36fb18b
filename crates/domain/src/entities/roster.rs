//! 课程名册实体定义
//!
//! 名册是标识到学生信息的映射。名册文件的格式由外部维护，
//! 这里只保证键按不区分大小写的方式唯一。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value_objects::ComputingId;

/// 名册文件中单条记录的原始格式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub name: String,
    pub role: String,
}

/// 名册条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// 学生标识（小写）
    pub identifier: ComputingId,
    /// 全名
    pub full_name: String,
    /// 角色描述，自由文本
    pub role_label: String,
}

impl RosterEntry {
    pub fn new(
        identifier: &str,
        full_name: impl Into<String>,
        role_label: impl Into<String>,
    ) -> Self {
        Self {
            identifier: ComputingId::normalize(identifier),
            full_name: full_name.into(),
            role_label: role_label.into(),
        }
    }

    /// 角色描述中包含 "student"（不区分大小写）即视为学生
    pub fn is_student(&self) -> bool {
        self.role_label.to_lowercase().contains("student")
    }
}

/// 一门课程的名册
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: BTreeMap<ComputingId, RosterEntry>,
}

impl Roster {
    /// 由名册文件的原始映射构建名册。
    ///
    /// 键统一转为小写；大小写冲突时按原始键排序保留第一条。
    pub fn from_records(records: BTreeMap<String, RosterRecord>) -> Self {
        let mut entries = BTreeMap::new();
        for (key, record) in records {
            let entry = RosterEntry::new(&key, record.name, record.role);
            entries.entry(entry.identifier.clone()).or_insert(entry);
        }
        Self { entries }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = RosterEntry>) -> Self {
        let mut map = BTreeMap::new();
        for entry in entries {
            map.entry(entry.identifier.clone()).or_insert(entry);
        }
        Self { entries: map }
    }

    pub fn get(&self, identifier: &ComputingId) -> Option<&RosterEntry> {
        self.entries.get(identifier)
    }

    /// 按标识升序遍历
    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
