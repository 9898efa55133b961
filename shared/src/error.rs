use thiserror::Error;

// =========================================================
// 错误类型枚举
// =========================================================

/// 错误分类
///
/// 视图层对所有类别一视同仁（记录日志 + 弹窗提示），
/// 分类仅用于日志与测试断言。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 网络/传输层失败
    Network,
    /// 服务端返回非 2xx
    Status(u16),
    /// 响应体无法解析
    Decode,
    /// 请求体无法序列化
    Encode,
    /// 提交前的必填项校验失败
    Validation,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Status(_) => "HTTP_STATUS",
            ApiErrorKind::Decode => "DECODE_ERROR",
            ApiErrorKind::Encode => "ENCODE_ERROR",
            ApiErrorKind::Validation => "VALIDATION_ERROR",
        }
    }
}

// =========================================================
// 校验错误
// =========================================================

/// 表单校验失败，记录缺失或格式错误的字段标签
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", describe(.missing, .invalid))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
    pub invalid: Vec<&'static str>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

fn describe(missing: &[&str], invalid: &[&str]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("All fields are required: {}", missing.join(", ")));
    }
    if !invalid.is_empty() {
        parts.push(format!("Invalid value for: {}", invalid.join(", ")));
    }
    parts.join(". ")
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端统一错误
///
/// - kind: 错误类别
/// - message: 可展示给用户的消息
/// - operation: 出错时正在执行的操作（如 `teacher.create`）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{}] {message}{}", .kind.error_code(), op_suffix(.operation))]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub operation: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            operation: None,
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Status(status), message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Encode, message)
    }

    /// 记录出错时的操作名
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn status_code(&self) -> Option<u16> {
        match self.kind {
            ApiErrorKind::Status(code) => Some(code),
            _ => None,
        }
    }
}

fn op_suffix(operation: &Option<String>) -> String {
    operation
        .as_ref()
        .map(|op| format!(" (in {})", op))
        .unwrap_or_default()
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::new(ApiErrorKind::Validation, e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
