use crate::entity::Entity;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::protocol::ApiRequest;
use crate::session::Session;
use crate::{
    DashboardCounts, EntityId, Grade, HEADER_AUTHORIZATION, LoginRequest, Student, Subject,
    Teacher,
};

/// 学校管理 REST API 的强类型门面
///
/// 不做重试，不设拦截器；非 2xx 响应一律转换为 [`ApiError`]。
#[derive(Clone, Debug, PartialEq)]
pub struct SchoolApi<C> {
    base_url: String,
    token: Option<String>,
    client: C,
}

impl<C: HttpClient> SchoolApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            token: None,
            client,
        }
    }

    /// 附带会话的 bearer token
    pub fn with_session(mut self, session: Option<&Session>) -> Self {
        self.token = session.map(|s| s.access_token.clone());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let req = HttpRequest::new(&self.url(path), method);
        match &self.token {
            Some(token) => req.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token)),
            None => req,
        }
    }

    /// 发送请求并检查状态码
    async fn execute(&self, req: HttpRequest, op: &str) -> ApiResult<HttpResponse> {
        log::debug!("[Api] {} {}", req.method.as_str(), req.url);
        let res = self
            .client
            .send(req)
            .await
            .map_err(|e| e.in_op(op))?;

        if !res.ok() {
            let detail = res.body.trim();
            let message = if detail.is_empty() {
                format!("request failed with status {}", res.status)
            } else {
                format!("request failed with status {}: {}", res.status, detail)
            };
            return Err(ApiError::status(res.status, message).in_op(op));
        }
        Ok(res)
    }

    /// 发送固定端点的强类型请求
    pub async fn send<R: ApiRequest>(&self, body: &R) -> ApiResult<R::Response> {
        let req = self
            .request(R::METHOD, R::PATH)
            .with_json(body)
            .map_err(|e| e.in_op(R::PATH))?;
        let res = self.execute(req, R::PATH).await?;
        res.json::<R::Response>().map_err(|e| e.in_op(R::PATH))
    }

    /// 登录并返回新会话
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let res = self.send(&req).await?;
        Ok(Session::from(res))
    }

    // =========================================================
    // 通用实体端点
    // =========================================================

    pub async fn list<T: Entity>(&self) -> ApiResult<Vec<T>> {
        let schema = T::schema();
        let op = schema.op("list");
        let req = self.request(HttpMethod::Get, &schema.collection_path());
        let res = self.execute(req, &op).await?;
        res.json::<Vec<T>>().map_err(|e| e.in_op(op))
    }

    /// 创建记录，返回服务端分配了 id 的记录
    pub async fn create<T: Entity>(&self, draft: &T::Draft) -> ApiResult<T> {
        let schema = T::schema();
        let op = schema.op("create");
        let req = self
            .request(HttpMethod::Post, &schema.collection_path())
            .with_json(draft)
            .map_err(|e| e.in_op(&op))?;
        let res = self.execute(req, &op).await?;
        res.json::<T>().map_err(|e| e.in_op(op))
    }

    /// 更新记录；响应体被忽略，本地以提交值修补
    pub async fn update<T: Entity>(&self, id: EntityId, draft: &T::Draft) -> ApiResult<()> {
        let schema = T::schema();
        let op = schema.op("update");
        let req = self
            .request(HttpMethod::Put, &schema.item_path(id))
            .with_json(draft)
            .map_err(|e| e.in_op(&op))?;
        self.execute(req, &op).await?;
        Ok(())
    }

    pub async fn delete<T: Entity>(&self, id: EntityId) -> ApiResult<()> {
        let schema = T::schema();
        let op = schema.op("delete");
        let req = self.request(HttpMethod::Delete, &schema.item_path(id));
        self.execute(req, &op).await?;
        Ok(())
    }

    /// 并发获取四个集合并统计数量
    pub async fn dashboard_counts(&self) -> ApiResult<DashboardCounts> {
        let (teachers, students, classes, subjects) = futures::join!(
            self.list::<Teacher>(),
            self.list::<Student>(),
            self.list::<Grade>(),
            self.list::<Subject>(),
        );
        Ok(DashboardCounts {
            teachers: teachers?.len(),
            students: students?.len(),
            classes: classes?.len(),
            subjects: subjects?.len(),
        })
    }
}

#[cfg(test)]
mod tests;
