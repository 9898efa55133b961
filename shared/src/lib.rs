//! 学校管理后台的共享层
//!
//! 纯 Rust 实现，不依赖 DOM，可在本机直接测试：
//! - 领域模型（教师、学生、班级、科目、会话）
//! - `http` / `api`: HTTP 抽象与强类型 REST 门面
//! - `session`: 会话存储（内存 + 持久化键值存储）
//! - `config`: 后端地址配置
//! - `route`: 路由定义与认证守卫
//! - `entity` / `collection` / `sync`: 通用的「列表-变更-同步」模式

use serde::{Deserialize, Serialize};

pub mod api;
pub mod collection;
pub mod config;
pub mod directory;
pub mod entity;
pub mod error;
pub mod http;
pub mod protocol;
pub mod route;
pub mod schema;
pub mod serde_helper;
pub mod session;
pub mod sync;

pub use api::SchoolApi;
pub use collection::{EntityCollection, Mutation};
pub use directory::GradeDirectory;
pub use entity::{Entity, EntitySchema, FieldKind, FieldSpec, FormValues};
pub use error::{ApiError, ApiErrorKind, ApiResult, ValidationError};
pub use session::{KeyValueStore, Session, SessionStore};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_TOKEN_KEY: &str = "token";
pub const STORAGE_REFRESH_KEY: &str = "refresh";
pub const STORAGE_USER_KEY: &str = "user";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 服务端分配的数字主键
pub type EntityId = u64;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// 班级引用
///
/// 服务端在不同接口中分别以 id 或名称引用班级，这里两种都接受，
/// 由 [`GradeDirectory`] 统一规范化为 id。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GradeRef {
    Id(EntityId),
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    #[serde(deserialize_with = "serde_helper::u32_from_str_or_number")]
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub grade: Option<GradeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    #[serde(deserialize_with = "serde_helper::u32_from_str_or_number")]
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub grade: Option<GradeRef>,
}

/// 班级（界面上也称作 Class）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: EntityId,
    pub name: String,
    #[serde(deserialize_with = "serde_helper::string_from_str_or_number")]
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub grade: Option<GradeRef>,
}

// =========================================================
// 提交载荷 (Drafts)
// =========================================================

/// 教师与学生共用的表单载荷，班级始终以 id 提交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: Gender,
    pub grade: EntityId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeDraft {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectDraft {
    pub name: String,
    pub grade: EntityId,
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserInfo,
}

/// 首页统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub teachers: usize,
    pub students: usize,
    pub classes: usize,
    pub subjects: usize,
}
