//! 会话层（核心状态机）
//!
//! ## 职责
//!
//! 本层管理"一次练习 / 一次考试"的完整生命周期，是整个客户端
//! 唯一持有可变状态的地方。
//!
//! ## 模块划分
//!
//! ### `state` - 会话状态
//! - 模式（练习 / 考试）、题目列表、当前下标
//! - 导航在边界处截断，下标永远在界内
//!
//! ### `countdown` - 考试倒计时
//! - 每秒递减共享剩余秒数的可取消任务
//! - 到期通知至多发布一次，取消幂等
//!
//! ### `controller` - 会话控制器
//! - 编排加载、导航、提交、交卷
//! - 失败时不改动本地状态
//!
//! ## 层次关系
//!
//! ```text
//! app (交互循环)
//!     ↓
//! session::SessionController (生命周期编排)
//!     ↓
//! clients::QuizClient (HTTP 能力)
//! ```

pub mod controller;
pub mod countdown;
pub mod state;

pub use controller::SessionController;
pub use countdown::Countdown;
pub use state::{ExamSession, SessionMode};
