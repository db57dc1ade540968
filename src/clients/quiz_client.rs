//! 刷题系统 API 客户端
//!
//! 封装所有与服务端的 HTTP 调用，每个端点对应一个方法。
//! 使用内置 Cookie 存储保存登录会话凭证，每次请求自动携带。

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    Ack, AnswerRequest, AnswerResult, AuthResponse, CategoriesResponse, Credentials,
    ExamHistoryResponse, ExamResult, ExamStartResponse, ProfileResponse, QuestionListResponse,
    SearchResponse, UserStats, WrongQuestionsResponse,
};

/// 刷题系统 API 客户端
pub struct QuizClient {
    base_url: String,
    http: reqwest::Client,
}

impl QuizClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    // ========== 用户 / 认证 ==========

    /// 获取当前登录用户信息
    pub async fn profile(&self) -> Result<ProfileResponse, ApiError> {
        let resp = self.http.get(self.url("/user/profile")).send().await?;
        decode("/user/profile", resp).await
    }

    /// 用户注册
    pub async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let resp = self
            .http
            .post(self.url("/auth/register"))
            .json(credentials)
            .send()
            .await?;
        decode("/auth/register", resp).await
    }

    /// 用户登录（成功后会话凭证写入 Cookie 存储）
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await?;
        decode("/auth/login", resp).await
    }

    /// 用户登出
    pub async fn logout(&self) -> Result<Ack, ApiError> {
        let resp = self.http.post(self.url("/auth/logout")).send().await?;
        decode("/auth/logout", resp).await
    }

    // ========== 题目 ==========

    /// 获取分类列表
    pub async fn categories(&self) -> Result<CategoriesResponse, ApiError> {
        let resp = self
            .http
            .get(self.url("/questions/categories"))
            .send()
            .await?;
        decode("/questions/categories", resp).await
    }

    /// 获取题目列表
    ///
    /// # 参数
    /// - `category`: 按分类过滤，None 表示随机
    /// - `limit`: 题目数量上限
    pub async fn questions(
        &self,
        category: Option<&str>,
        limit: usize,
    ) -> Result<QuestionListResponse, ApiError> {
        let mut query: Vec<(&str, String)> = vec![("limit", limit.to_string())];
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }

        let resp = self
            .http
            .get(self.url("/questions"))
            .query(&query)
            .send()
            .await?;
        decode("/questions", resp).await
    }

    /// 提交练习答案，服务端立即判分
    pub async fn submit_practice_answer(
        &self,
        request: &AnswerRequest,
    ) -> Result<AnswerResult, ApiError> {
        debug!("提交练习答案: 题目 {}", request.question_id);

        let resp = self
            .http
            .post(self.url("/questions/submit"))
            .json(request)
            .send()
            .await?;
        decode("/questions/submit", resp).await
    }

    /// 搜索题目
    pub async fn search_questions(
        &self,
        keyword: &str,
        limit: usize,
    ) -> Result<SearchResponse, ApiError> {
        let resp = self
            .http
            .get(self.url("/questions/search"))
            .query(&[("keyword", keyword.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;
        decode("/questions/search", resp).await
    }

    /// 获取错题本
    pub async fn wrong_questions(&self) -> Result<WrongQuestionsResponse, ApiError> {
        let resp = self.http.get(self.url("/questions/wrong")).send().await?;
        decode("/questions/wrong", resp).await
    }

    /// 获取学习统计
    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        let resp = self.http.get(self.url("/user/stats")).send().await?;
        decode("/user/stats", resp).await
    }

    // ========== 考试 ==========

    /// 开始考试，服务端分配会话 ID 并下发固定题目集
    pub async fn start_exam(&self, exam_type: &str) -> Result<ExamStartResponse, ApiError> {
        debug!("开始考试: 类型 {}", exam_type);

        let resp = self
            .http
            .post(self.url("/exam/start"))
            .query(&[("type", exam_type)])
            .send()
            .await?;
        decode("/exam/start", resp).await
    }

    /// 提交考试答案，仅保存不判分
    pub async fn submit_exam_answer(
        &self,
        session_id: &str,
        request: &AnswerRequest,
    ) -> Result<Ack, ApiError> {
        debug!("提交考试答案: 会话 {} 题目 {}", session_id, request.question_id);

        let endpoint = format!("/exam/{}/answer", session_id);
        let resp = self
            .http
            .post(self.url(&endpoint))
            .json(request)
            .send()
            .await?;
        decode(&endpoint, resp).await
    }

    /// 交卷，服务端判分并返回考试结果
    pub async fn complete_exam(&self, session_id: &str) -> Result<ExamResult, ApiError> {
        debug!("交卷: 会话 {}", session_id);

        let endpoint = format!("/exam/{}/complete", session_id);
        let resp = self.http.post(self.url(&endpoint)).send().await?;
        decode(&endpoint, resp).await
    }

    /// 获取考试历史
    pub async fn exam_history(&self, limit: usize) -> Result<ExamHistoryResponse, ApiError> {
        let resp = self
            .http
            .get(self.url("/exam/history"))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        decode("/exam/history", resp).await
    }

    /// 拼接完整 URL
    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

// ========== 辅助函数 ==========

/// 解析响应
///
/// - 401 → `AuthRequired`，交互层据此回到登录页
/// - 其他非 2xx → 提取响应体中的 `error` 字段原样展示
/// - 2xx → 反序列化为目标类型
async fn decode<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T, ApiError> {
    let status = resp.status();

    if status == StatusCode::UNAUTHORIZED {
        debug!("请求未认证: {}", endpoint);
        return Err(ApiError::AuthRequired);
    }

    if !status.is_success() {
        let message = resp
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| {
                body.get("error")
                    .and_then(|e| e.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("请求失败 (HTTP {})", status.as_u16()));

        debug!("请求被拒绝: {} → {}", endpoint, message);
        return Err(ApiError::Validation { message });
    }

    Ok(resp.json::<T>().await?)
}
