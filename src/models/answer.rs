use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// 用户作答输入
///
/// 由交互层收集，序列化后提交给服务端，提交完即丢弃。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    /// 单选 / 判断：一个选项值
    Choice(String),
    /// 多选：若干选项值
    MultiChoice(Vec<String>),
    /// 简答：自由文本
    Text(String),
}

impl AnswerInput {
    /// 按题目规则序列化为提交串
    ///
    /// - 多选题以逗号连接，顺序固定为选项在题目中出现的顺序
    ///   （与原始选项列表的位置一致，不受勾选先后影响）
    /// - 单选 / 判断原样提交
    /// - 简答去除首尾空白
    ///
    /// 返回空串表示未作答，调用方须拦截而不是发起提交。
    pub fn serialize(&self, question: &Question) -> String {
        match self {
            AnswerInput::Choice(value) => value.trim().to_string(),
            AnswerInput::Text(text) => text.trim().to_string(),
            AnswerInput::MultiChoice(selected) => {
                let options = question.option_list();
                let mut ordered: Vec<&str> = options
                    .iter()
                    .copied()
                    .filter(|opt| selected.iter().any(|s| s == opt))
                    .collect();
                // 不在选项列表里的值按输入顺序附加在末尾
                for value in selected {
                    if !options.contains(&value.as_str()) {
                        ordered.push(value.as_str());
                    }
                }
                ordered.join(",")
            }
        }
    }
}

/// 答题请求
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRequest {
    pub question_id: u64,
    pub answer: String,
}

/// 练习模式的判分结果
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerResult {
    pub is_correct: bool,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// 提交回执（考试模式只确认收到，判分延迟到交卷）
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

/// 一次作答的结果
#[derive(Debug, Clone)]
pub enum Answered {
    /// 练习模式：服务端立即判分
    Graded(AnswerResult),
    /// 考试模式：仅确认已保存
    Saved,
}

/// 错题记录
#[derive(Debug, Clone, Deserialize)]
pub struct WrongQuestion {
    pub question_id: u64,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub category: String,
    #[serde(default)]
    pub answered_at: String,
}

/// 错题本响应
#[derive(Debug, Clone, Deserialize)]
pub struct WrongQuestionsResponse {
    #[serde(default)]
    pub wrong_questions: Vec<WrongQuestion>,
    #[serde(default)]
    pub total: i64,
}
