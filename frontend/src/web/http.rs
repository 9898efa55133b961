//! 基于 `gloo-net` 的 HTTP 客户端

use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder};
use schooladmin_shared::error::{ApiError, ApiResult};
use schooladmin_shared::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// 浏览器 `fetch` 实现
///
/// 无状态，克隆即复制。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchHttpClient;

fn builder(method: HttpMethod, url: &str) -> RequestBuilder {
    match method {
        HttpMethod::Get => Request::get(url),
        HttpMethod::Post => Request::post(url),
        HttpMethod::Put => Request::put(url),
        HttpMethod::Delete => Request::delete(url),
    }
}

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = builder(req.method, &req.url);
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let response = match req.body {
            Some(body) => {
                let request = builder
                    .body(body)
                    .map_err(|e| ApiError::encode(format!("请求构建失败: {}", e)))?;
                request.send().await
            }
            None => builder.send().await,
        }
        .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::decode(format!("读取响应失败: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
