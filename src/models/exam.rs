use serde::Deserialize;

use crate::models::question::Question;

/// 开始考试响应
#[derive(Debug, Clone, Deserialize)]
pub struct ExamStartResponse {
    pub session_id: String,
    #[serde(default)]
    pub exam_type: String,
    pub questions: Vec<Question>,
    /// 考试时长（分钟），0 表示不限时
    #[serde(default)]
    pub duration: i64,
}

/// 交卷后的考试结果
#[derive(Debug, Clone, Deserialize)]
pub struct ExamResult {
    pub total_questions: i64,
    pub correct_answers: i64,
    pub score: f64,
    /// 答题用时（分钟）
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl ExamResult {
    /// 正确率（百分比）
    pub fn accuracy(&self) -> f64 {
        if self.total_questions > 0 {
            self.correct_answers as f64 / self.total_questions as f64 * 100.0
        } else {
            0.0
        }
    }

    /// 是否及格（60 分）
    pub fn passed(&self) -> bool {
        self.score >= 60.0
    }
}

/// 历史考试记录
#[derive(Debug, Clone, Deserialize)]
pub struct ExamRecord {
    pub id: u64,
    pub exam_type: String,
    pub total_count: i64,
    pub correct_count: i64,
    pub score: f64,
    /// 答题用时（秒）
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

/// 考试历史响应
#[derive(Debug, Clone, Deserialize)]
pub struct ExamHistoryResponse {
    #[serde(default)]
    pub exam_records: Vec<ExamRecord>,
    #[serde(default)]
    pub total: i64,
}
