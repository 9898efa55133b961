//! 实体描述符
//!
//! 四种实体（教师、学生、班级、科目）的页面行为完全一致，
//! 区别只在字段集合与端点。`EntitySchema` 描述这些差异，
//! 通用页面和同步逻辑只依赖 [`Entity`] trait。

use crate::directory::GradeDirectory;
use crate::error::ValidationError;
use crate::{EntityId, Gender};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::BTreeMap;

// =========================================================
// 字段描述
// =========================================================

/// 表单输入控件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    /// 固定选项下拉框
    Choice(&'static [&'static str]),
    /// 班级下拉框，选项来自 `/grade/`
    GradeSelect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// 表单键，同时也是提交时的 JSON 字段名
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
        }
    }
}

pub const GENDER_CHOICES: &[&str] = &["Male", "Female"];

/// 实体描述符：端点、显示名称、表单字段与表格列
#[derive(Debug)]
pub struct EntitySchema {
    /// 集合端点名，如 `teacher`、`students`
    pub collection: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
    pub fields: &'static [FieldSpec],
    /// 表格表头（不含 ID 与操作列）
    pub columns: &'static [&'static str],
    /// 是否需要加载班级列表用于下拉框与显示
    pub needs_grades: bool,
}

impl EntitySchema {
    pub fn collection_path(&self) -> String {
        format!("/{}/", self.collection)
    }

    pub fn item_path(&self, id: EntityId) -> String {
        format!("/{}/{}/", self.collection, id)
    }

    /// 日志与错误上下文中使用的操作名
    pub fn op(&self, action: &str) -> String {
        format!("{}.{}", self.collection, action)
    }

    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }
}

// =========================================================
// 表单值
// =========================================================

/// 表单原始输入，键为 [`FieldSpec::key`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// 缺失的键视为空字符串
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }
}

/// 读取表单并累积校验错误
///
/// 每个读取方法在字段为空或无法解析时返回 `None` 并记录错误，
/// 调用方最后用 [`FormReader::into_error`] 取出完整的错误列表。
pub struct FormReader<'a> {
    schema: &'static EntitySchema,
    form: &'a FormValues,
    error: ValidationError,
}

impl<'a> FormReader<'a> {
    pub fn new(schema: &'static EntitySchema, form: &'a FormValues) -> Self {
        Self {
            schema,
            form,
            error: ValidationError::default(),
        }
    }

    fn label(&self, key: &str) -> &'static str {
        self.schema.field(key).map(|f| f.label).unwrap_or("field")
    }

    fn present(&mut self, key: &str) -> Option<&'a str> {
        let form: &'a FormValues = self.form;
        let value = form.get(key).trim();
        if value.is_empty() {
            let label = self.label(key);
            self.error.missing.push(label);
            None
        } else {
            Some(value)
        }
    }

    fn invalid(&mut self, key: &str) {
        let label = self.label(key);
        self.error.invalid.push(label);
    }

    pub fn text(&mut self, key: &str) -> Option<String> {
        self.present(key).map(str::to_string)
    }

    pub fn number(&mut self, key: &str) -> Option<u32> {
        let raw = self.present(key)?;
        let parsed = raw.parse::<u32>().ok();
        if parsed.is_none() {
            self.invalid(key);
        }
        parsed
    }

    pub fn gender(&mut self, key: &str) -> Option<Gender> {
        let raw = self.present(key)?;
        let parsed = Gender::parse(raw);
        if parsed.is_none() {
            self.invalid(key);
        }
        parsed
    }

    /// 班级下拉框的值是 id；也接受班级名称，通过目录解析为 id
    pub fn grade(&mut self, key: &str, grades: &GradeDirectory) -> Option<EntityId> {
        let raw = self.present(key)?;
        let resolved = grades.resolve_input(raw);
        if resolved.is_none() {
            self.invalid(key);
        }
        resolved
    }

    pub fn into_error(self) -> ValidationError {
        self.error
    }
}

// =========================================================
// 实体 Trait
// =========================================================

/// 可在通用列表页中管理的实体
pub trait Entity:
    Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// 创建/更新时提交的载荷
    type Draft: Clone + Serialize + Send + Sync + 'static;

    fn schema() -> &'static EntitySchema;

    fn id(&self) -> EntityId;

    /// 以已提交的载荷和既有 id 构造本地记录（用于更新后的本地修补）
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// 更新时的表单预填值
    fn to_form(&self, grades: &GradeDirectory) -> FormValues;

    /// 校验并解析表单
    fn parse_form(
        form: &FormValues,
        grades: &GradeDirectory,
    ) -> Result<Self::Draft, ValidationError>;

    /// 表格行内容，与 `schema().columns` 一一对应
    fn cells(&self, grades: &GradeDirectory) -> Vec<String>;
}
