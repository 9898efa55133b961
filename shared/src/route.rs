//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义了应用的所有路由及其守卫规则，浏览器侧的路由服务只负责执行。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 首页统计
    Home,
    Teachers,
    Students,
    Classes,
    Subjects,
    AddTeacher,
    AddSubject,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 侧边栏中的导航项，按显示顺序
    pub const SIDEBAR: [AppRoute; 5] = [
        AppRoute::Home,
        AppRoute::Teachers,
        AppRoute::Classes,
        AppRoute::Subjects,
        AppRoute::Students,
    ];

    /// 将 URL path 解析为路由枚举，忽略末尾的 `/`
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/login" => Self::Login,
            "/home" => Self::Home,
            "/teachers" => Self::Teachers,
            "/students" => Self::Students,
            "/classes" => Self::Classes,
            "/subjects" => Self::Subjects,
            "/add-teacher" => Self::AddTeacher,
            "/add-subjects" => Self::AddSubject,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Home => "/home",
            Self::Teachers => "/teachers",
            Self::Students => "/students",
            Self::Classes => "/classes",
            Self::Subjects => "/subjects",
            Self::AddTeacher => "/add-teacher",
            Self::AddSubject => "/add-subjects",
            Self::NotFound => "/404",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Home => "Dashboard",
            Self::Teachers => "Teachers",
            Self::Students => "Students",
            Self::Classes => "Classes",
            Self::Subjects => "Subjects",
            Self::AddTeacher => "Add Teacher",
            Self::AddSubject => "Add Subject",
            Self::NotFound => "Not Found",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(AppRoute),
    Redirect(AppRoute),
}

impl Navigation {
    /// 最终要显示的路由
    pub fn route(&self) -> AppRoute {
        match self {
            Navigation::Render(route) | Navigation::Redirect(route) => *route,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Navigation::Redirect(_))
    }
}

/// 路由守卫：给定目标路由与认证状态，决定渲染还是重定向
pub fn guard(target: AppRoute, is_authenticated: bool) -> Navigation {
    if target.requires_auth() && !is_authenticated {
        Navigation::Redirect(AppRoute::auth_failure_redirect())
    } else if target.should_redirect_when_authenticated() && is_authenticated {
        Navigation::Redirect(AppRoute::auth_success_redirect())
    } else {
        Navigation::Render(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTECTED: [&str; 7] = [
        "/home",
        "/teachers",
        "/students",
        "/classes",
        "/subjects",
        "/add-teacher",
        "/add-subjects",
    ];

    #[test]
    fn test_unauthenticated_protected_routes_redirect_to_login() {
        for path in PROTECTED {
            let nav = guard(AppRoute::from_path(path), false);
            assert_eq!(nav, Navigation::Redirect(AppRoute::Login), "path {}", path);
        }
    }

    #[test]
    fn test_authenticated_protected_routes_render() {
        for path in PROTECTED {
            let route = AppRoute::from_path(path);
            assert_eq!(guard(route, true), Navigation::Render(route));
        }
    }

    #[test]
    fn test_login_page() {
        assert_eq!(guard(AppRoute::Login, false), Navigation::Render(AppRoute::Login));
        assert_eq!(guard(AppRoute::Login, true), Navigation::Redirect(AppRoute::Home));
    }

    #[test]
    fn test_not_found_is_public() {
        let route = AppRoute::from_path("/nope");
        assert_eq!(route, AppRoute::NotFound);
        assert_eq!(guard(route, false), Navigation::Render(AppRoute::NotFound));
    }

    #[test]
    fn test_path_round_trip_and_trailing_slash() {
        for path in PROTECTED {
            assert_eq!(AppRoute::from_path(path).to_path(), path);
        }
        assert_eq!(AppRoute::from_path("/teachers/"), AppRoute::Teachers);
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
    }
}
