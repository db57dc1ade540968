use serde::{Deserialize, Serialize};

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 单选题
    Single,
    /// 多选题
    Multiple,
    /// 判断题
    Judge,
    /// 服务端未标注类型的题目按简答题处理
    #[serde(other)]
    FreeText,
}

impl QuestionType {
    /// 题目类型的展示文本
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::Single => "单选题",
            QuestionType::Multiple => "多选题",
            QuestionType::Judge => "判断题",
            QuestionType::FreeText => "简答题",
        }
    }
}

/// 题目
///
/// 从服务端获取后不再修改，以 `id` 作为唯一标识。
/// 服务端不会在题目列表里附带判分信息，判分始终在服务端完成。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    /// 服务端以 `|` 连接的选项串，可能为空
    #[serde(default)]
    pub options: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// 解析选项列表
    pub fn option_list(&self) -> Vec<&str> {
        if self.options.is_empty() {
            Vec::new()
        } else {
            self.options.split('|').collect()
        }
    }

    /// 是否需要自由文本作答（非判断题且没有选项）
    pub fn expects_free_text(&self) -> bool {
        self.question_type != QuestionType::Judge && self.option_list().is_empty()
    }
}

/// 分类信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub count: i64,
}

/// 题目列表响应
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub total: i64,
}

/// 分类列表响应
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub total: i64,
}

/// 题目搜索响应
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub questions: Vec<Question>,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub keyword: String,
}
