//! 错误类型模块
//!
//! 客户端错误分为两类：
//! - `ApiError`：与服务端交互产生的错误（认证、业务校验、网络）
//! - `SessionError`：本地会话状态相关的错误
//!
//! 所有错误都在 UI 边界处以提示消息的形式展示给用户，
//! 不会导致进程退出，也不会破坏已加载的会话状态。

use thiserror::Error;

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 未登录或会话过期（服务端返回 401）
    #[error("未登录或登录已过期，请重新登录")]
    AuthRequired,

    /// 服务端返回的业务错误，消息原样展示
    #[error("{message}")]
    Validation { message: String },

    /// 网络请求失败
    #[error("网络错误，请稍后重试 ({source})")]
    Network {
        #[from]
        source: reqwest::Error,
    },
}

/// 会话状态错误
#[derive(Debug, Error)]
pub enum SessionError {
    /// 答案为空（客户端前置校验，不会发起请求）
    #[error("请选择或输入答案")]
    EmptyAnswer,

    /// 当前没有进行中的会话
    #[error("当前没有进行中的会话")]
    NoActiveSession,

    /// 当前会话不是考试模式
    #[error("当前会话不是考试模式")]
    NotInExam,

    /// 已有进行中的考试会话
    #[error("已有进行中的考试，请先完成考试")]
    ExamInProgress,

    /// 服务端返回了空题目列表
    #[error("没有题目可显示")]
    EmptyQuestionList,
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// 应用程序结果类型
pub type Result<T> = std::result::Result<T, AppError>;
