use crate::error::{ApiError, ApiResult};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// 以 JSON 作为请求体，同时设置 Content-Type
    pub fn with_json<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::encode(e.to_string()))?;
        self.body = Some(body);
        Ok(self.with_header("Content-Type", "application/json"))
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// 检查响应是否成功 (2xx)
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::decode(e.to_string()))
    }
}

/// HTTP 客户端特性
///
/// 浏览器中由 `fetch` 实现；(?Send) 是因为 WASM 环境下的 future 不是 Send 的。
/// 实现只负责传输，非 2xx 响应同样以 `Ok` 返回，由调用方判断。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub struct MockHttpClient {
    // ("METHOD URL", (Status, Response Body))
    responses: RefCell<HashMap<String, (u16, String)>>,
    // 模拟网络层失败的请求
    network_failures: RefCell<Vec<String>>,
    // 记录发出的请求 (Method, URL, Headers, Body)
    pub requests: RefCell<Vec<(HttpMethod, String, HashMap<String, String>, Option<String>)>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            network_failures: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(
        &self,
        method: HttpMethod,
        url: &str,
        status: u16,
        body: serde_json::Value,
    ) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), (status, body.to_string()));
    }

    pub fn mock_network_failure(&self, method: HttpMethod, url: &str) {
        self.network_failures
            .borrow_mut()
            .push(Self::key(method, url));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push((
            req.method,
            req.url.clone(),
            req.headers.clone(),
            req.body.clone(),
        ));

        let key = Self::key(req.method, &req.url);
        if self.network_failures.borrow().contains(&key) {
            return Err(ApiError::network("connection refused"));
        }

        let responses = self.responses.borrow();
        if let Some((status, body)) = responses.get(&key) {
            Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            })
        } else {
            Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            })
        }
    }
}
