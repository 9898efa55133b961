use crate::http::HttpMethod;
use crate::{LoginRequest, LoginResponse};
use serde::{Serialize, de::DeserializeOwned};

/// 定义固定端点的请求与响应绑定关系
///
/// 实体的增删改查路径依赖 id，由 [`crate::EntitySchema`] 生成，不走这里。
pub trait ApiRequest: Serialize {
    /// 该请求对应的响应类型
    type Response: DeserializeOwned;
    /// 相对于 base URL 的路径
    const PATH: &'static str;
    const METHOD: HttpMethod;
}

// =========================================================
// Request Definitions
// =========================================================

/// 登录，换取 access / refresh token
impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/login/";
    const METHOD: HttpMethod = HttpMethod::Post;
}
