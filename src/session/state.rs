//! 会话状态
//!
//! 一次练习或考试对应一个 `ExamSession`，由控制器独占持有，
//! 完成或离开后整体销毁。不存在全局可变状态。

use crate::error::SessionError;
use crate::models::Question;
use crate::session::countdown::Countdown;

/// 会话模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    /// 练习模式：逐题判分，不限时
    Practice,
    /// 考试模式：限时，交卷时统一判分
    Exam {
        /// 服务端分配的考试会话 ID
        exam_id: String,
    },
}

/// 活动会话
///
/// 不变式：只要会话存在，`current_index` 始终落在
/// `[0, questions.len() - 1]` 区间内。题目列表为空的会话无法构造。
pub struct ExamSession {
    pub mode: SessionMode,
    questions: Vec<Question>,
    current_index: usize,
    /// 考试倒计时，练习模式与不限时考试为 None
    pub countdown: Option<Countdown>,
}

impl ExamSession {
    /// 创建练习会话
    pub fn practice(questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionList);
        }
        Ok(Self {
            mode: SessionMode::Practice,
            questions,
            current_index: 0,
            countdown: None,
        })
    }

    /// 创建考试会话
    pub fn exam(
        exam_id: String,
        questions: Vec<Question>,
        countdown: Option<Countdown>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionList);
        }
        Ok(Self {
            mode: SessionMode::Exam { exam_id },
            questions,
            current_index: 0,
            countdown,
        })
    }

    /// 是否为考试模式
    pub fn is_exam(&self) -> bool {
        matches!(self.mode, SessionMode::Exam { .. })
    }

    /// 题目总数
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 当前题目下标（从 0 开始）
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 当前题目
    pub fn current_question(&self) -> &Question {
        // 构造时已保证列表非空且下标在界内
        &self.questions[self.current_index]
    }

    /// 是否在第一题
    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    /// 是否在最后一题
    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    /// 下一题；已在最后一题时不动
    ///
    /// # 返回
    /// 返回是否发生了移动
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            false
        } else {
            self.current_index += 1;
            true
        }
    }

    /// 上一题；已在第一题时不动
    ///
    /// # 返回
    /// 返回是否发生了移动
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            false
        } else {
            self.current_index -= 1;
            true
        }
    }

    /// 剩余考试时间（秒），不限时会话为 None
    pub fn remaining_seconds(&self) -> Option<i64> {
        self.countdown.as_ref().map(|c| c.remaining_seconds())
    }
}
