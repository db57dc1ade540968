use serde::{Deserialize, Serialize};

use crate::models::answer::WrongQuestion;

/// 用户信息
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}

/// 注册 / 登录请求
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 注册 / 登录响应
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: String,
    pub user: User,
}

/// 用户信息响应
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
}

/// 分类维度的答题统计
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub total: i64,
    pub correct: i64,
    pub accuracy: f64,
}

/// 用户学习统计
#[derive(Debug, Clone, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total_answered: i64,
    #[serde(default)]
    pub correct_count: i64,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub category_stats: Vec<CategoryStats>,
    #[serde(default)]
    pub wrong_questions: Vec<WrongQuestion>,
}
