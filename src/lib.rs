//! # Quiz Client
//!
//! 刷题系统的终端客户端：加载题目、练习判分、模拟考试与学习统计
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 能力层（Clients）
//! - `clients/` - 封装与服务端的全部 HTTP 调用
//! - `QuizClient` - 每个端点一个方法，Cookie 凭证自动携带
//!
//! ### ② 模型层（Models）
//! - `models/` - 与服务端 JSON 契约对应的线上结构
//! - `AnswerInput` - 作答输入及其序列化规则
//!
//! ### ③ 会话层（Session）
//! - `session/` - 核心状态机，唯一持有可变状态的地方
//! - `SessionController` - 加载 → 导航 → 提交 → 交卷的编排
//! - `Countdown` - 可取消的考试倒计时任务
//!
//! ### ④ 交互层（App / Views）
//! - `views/` - 状态 → 文本的纯投影，与状态机完全解耦
//! - `app` - 终端命令循环，错误在此转为提示消息

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod session;
pub mod utils;
pub mod views;

// 重新导出常用类型
pub use app::App;
pub use clients::QuizClient;
pub use config::Config;
pub use error::{ApiError, AppError, Result, SessionError};
pub use models::{AnswerInput, Answered, Question, QuestionType};
pub use session::{Countdown, ExamSession, SessionController, SessionMode};
