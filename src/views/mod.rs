//! 视图层（投影层）
//!
//! 状态 → 文本的纯投影函数，不持有也不修改任何状态。
//! 会话状态机的变化与渲染完全解耦，控制器可以脱离渲染面测试。

pub mod question;
pub mod summary;

pub use question::{render_answer_result, render_question_page};
pub use summary::{
    render_categories, render_exam_history, render_exam_result, render_stats, render_welcome,
    render_wrong_questions,
};
