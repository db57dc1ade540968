//! 会话控制器
//!
//! 核心职责：管理"一次练习 / 一次考试"的完整生命周期
//!
//! 操作顺序：
//! 1. start_practice / start_exam → 加载题目，建立会话
//! 2. next / previous → 题目间导航（本地操作）
//! 3. record_answer → 提交答案（练习立即判分，考试仅保存）
//! 4. complete → 交卷，清理会话与倒计时
//!
//! 失败语义：任何服务端调用失败都不会改动本地状态，
//! 题目列表和当前下标保持原样，用户可以直接重试。
//! 控制器的所有操作都要求 `&mut self`，独占借用本身就排除了
//! 提交与导航在同一会话上交错执行的可能。

use tokio::sync::watch;
use tracing::{info, warn};

use crate::clients::QuizClient;
use crate::error::{Result, SessionError};
use crate::models::{AnswerInput, AnswerRequest, Answered, ExamResult};
use crate::session::countdown::Countdown;
use crate::session::state::{ExamSession, SessionMode};

/// 会话控制器
///
/// 同一时刻至多持有一个活动会话
pub struct SessionController {
    client: QuizClient,
    session: Option<ExamSession>,
    /// 当前考试的到期通知，交互层用它触发自动交卷
    expiry_rx: Option<watch::Receiver<bool>>,
}

impl SessionController {
    /// 创建新的会话控制器
    pub fn new(client: QuizClient) -> Self {
        Self {
            client,
            session: None,
            expiry_rx: None,
        }
    }

    /// 当前活动会话
    pub fn session(&self) -> Option<&ExamSession> {
        self.session.as_ref()
    }

    /// 底层 API 客户端（用于会话之外的查询操作）
    pub fn client(&self) -> &QuizClient {
        &self.client
    }

    /// 当前考试的到期通知接收端
    pub fn expiry_signal(&self) -> Option<watch::Receiver<bool>> {
        self.expiry_rx.clone()
    }

    /// 丢弃到期通知
    ///
    /// 自动交卷只触发一次；失败后不做自动重试，由用户手动交卷
    pub fn dismiss_expiry(&mut self) {
        self.expiry_rx = None;
    }

    /// 开始练习
    ///
    /// # 参数
    /// - `category`: 按分类过滤，None 表示随机抽题
    /// - `limit`: 本批题目数量
    pub async fn start_practice(&mut self, category: Option<&str>, limit: usize) -> Result<()> {
        self.ensure_no_exam_in_progress()?;

        let response = self.client.questions(category, limit).await?;
        let session = ExamSession::practice(response.questions)?;

        info!("📝 开始练习: 共 {} 道题目", session.len());
        self.replace_session(session, None);
        Ok(())
    }

    /// 开始考试
    ///
    /// 服务端分配会话 ID 并下发固定题目集；
    /// 如果时长大于 0，启动倒计时，到期后由交互层自动交卷
    pub async fn start_exam(&mut self, exam_type: &str) -> Result<()> {
        self.ensure_no_exam_in_progress()?;

        let response = self.client.start_exam(exam_type).await?;

        let (countdown, expiry_rx) = if response.duration > 0 {
            let (countdown, rx) = Countdown::start(response.duration);
            (Some(countdown), Some(rx))
        } else {
            (None, None)
        };

        let session = ExamSession::exam(response.session_id, response.questions, countdown)?;

        if response.duration > 0 {
            info!(
                "📋 开始考试: 共 {} 道题目，限时 {} 分钟",
                session.len(),
                response.duration
            );
        } else {
            info!("📋 开始考试: 共 {} 道题目，不限时", session.len());
        }

        self.replace_session(session, expiry_rx);
        Ok(())
    }

    /// 下一题；已在最后一题时不动
    pub fn next(&mut self) -> Result<usize> {
        let session = self
            .session
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;
        session.next();
        Ok(session.current_index())
    }

    /// 上一题；已在第一题时不动
    pub fn previous(&mut self) -> Result<usize> {
        let session = self
            .session
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;
        session.previous();
        Ok(session.current_index())
    }

    /// 提交当前题目的答案
    ///
    /// 空答案在本地拦截，不发起任何请求。
    /// 练习模式返回服务端的即时判分；考试模式只返回保存回执，
    /// 判分延迟到交卷。判分始终在服务端完成，客户端不做本地比对。
    pub async fn record_answer(&mut self, input: &AnswerInput) -> Result<Answered> {
        let session = self
            .session
            .as_ref()
            .ok_or(SessionError::NoActiveSession)?;

        let question = session.current_question();
        let answer = input.serialize(question);
        if answer.is_empty() {
            return Err(SessionError::EmptyAnswer.into());
        }

        let request = AnswerRequest {
            question_id: question.id,
            answer,
        };

        match &session.mode {
            SessionMode::Practice => {
                let result = self.client.submit_practice_answer(&request).await?;
                Ok(Answered::Graded(result))
            }
            SessionMode::Exam { exam_id } => {
                let exam_id = exam_id.clone();
                self.client.submit_exam_answer(&exam_id, &request).await?;
                Ok(Answered::Saved)
            }
        }
    }

    /// 交卷
    ///
    /// 仅考试模式可用。服务端判分成功后清理本地会话并取消倒计时。
    /// 同一场考试不允许交卷两次：会话在第一次成功交卷时销毁，
    /// 第二次调用（无论来自用户还是倒计时到期）在发起请求之前
    /// 就会以 `NoActiveSession` 失败，不会重复提交。
    pub async fn complete(&mut self) -> Result<ExamResult> {
        let session = self
            .session
            .as_ref()
            .ok_or(SessionError::NoActiveSession)?;

        let exam_id = match &session.mode {
            SessionMode::Exam { exam_id } => exam_id.clone(),
            SessionMode::Practice => return Err(SessionError::NotInExam.into()),
        };

        // 先请求后清理：失败时本地会话保持原样，允许重试
        let result = self.client.complete_exam(&exam_id).await?;

        self.clear();
        info!(
            "✅ 考试完成: {}/{} 正确，得分 {:.1}",
            result.correct_answers, result.total_questions, result.score
        );
        Ok(result)
    }

    /// 清理当前会话（完成练习或离开页面时调用）
    ///
    /// 倒计时随会话一并取消；没有会话时是无操作
    pub fn clear(&mut self) {
        if let Some(mut session) = self.session.take() {
            if let Some(countdown) = session.countdown.as_mut() {
                countdown.cancel();
            }
        }
        self.expiry_rx = None;
    }

    // ========== 辅助方法 ==========

    /// 已有进行中的考试时拒绝开启新会话，避免丢失服务端考试进度
    fn ensure_no_exam_in_progress(&self) -> Result<()> {
        if self.session.as_ref().is_some_and(|s| s.is_exam()) {
            warn!("⚠️ 已有进行中的考试，拒绝开启新会话");
            return Err(SessionError::ExamInProgress.into());
        }
        Ok(())
    }

    fn replace_session(&mut self, session: ExamSession, expiry_rx: Option<watch::Receiver<bool>>) {
        // 练习会话可以被直接替换，旧倒计时（如有）一并取消
        self.clear();
        self.session = Some(session);
        self.expiry_rx = expiry_rx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::AppError;
    use crate::models::{Question, QuestionType};

    /// 指向不可达地址的控制器：任何真正发出的请求都会得到
    /// `ApiError::Network`，因此断言到 `SessionError` 即可证明
    /// 请求在本地就被拦截，没有到达服务端
    fn offline_controller() -> SessionController {
        let config = Config {
            api_base_url: "http://127.0.0.1:9/api".to_string(),
            ..Config::default()
        };
        SessionController::new(QuizClient::new(&config).unwrap())
    }

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                id: i as u64 + 1,
                question_type: QuestionType::Multiple,
                question: format!("题目 {}", i + 1),
                options: "A|B|C".to_string(),
                category: "测试".to_string(),
                explanation: None,
            })
            .collect()
    }

    fn with_practice_session(controller: &mut SessionController, n: usize) {
        controller.session = Some(ExamSession::practice(questions(n)).unwrap());
    }

    fn with_exam_session(controller: &mut SessionController, n: usize) {
        controller.session =
            Some(ExamSession::exam("exam_test".to_string(), questions(n), None).unwrap());
    }

    #[tokio::test]
    async fn navigation_without_session_is_rejected() {
        let mut controller = offline_controller();
        assert!(matches!(
            controller.next(),
            Err(AppError::Session(SessionError::NoActiveSession))
        ));
        assert!(matches!(
            controller.previous(),
            Err(AppError::Session(SessionError::NoActiveSession))
        ));
    }

    #[tokio::test]
    async fn navigation_clamps_at_bounds() {
        let mut controller = offline_controller();
        with_practice_session(&mut controller, 2);

        assert_eq!(controller.previous().unwrap(), 0);
        assert_eq!(controller.next().unwrap(), 1);
        assert_eq!(controller.next().unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_answer_never_reaches_the_service() {
        let mut controller = offline_controller();
        with_practice_session(&mut controller, 1);

        let input = AnswerInput::MultiChoice(Vec::new());
        // 网络不可达：若守卫失效，错误会是 Api(Network) 而不是 EmptyAnswer
        assert!(matches!(
            controller.record_answer(&input).await,
            Err(AppError::Session(SessionError::EmptyAnswer))
        ));
    }

    #[tokio::test]
    async fn whitespace_text_answer_is_rejected_locally() {
        let mut controller = offline_controller();
        controller.session = Some(
            ExamSession::practice(vec![Question {
                id: 1,
                question_type: QuestionType::FreeText,
                question: "简述借用检查".to_string(),
                options: String::new(),
                category: "测试".to_string(),
                explanation: None,
            }])
            .unwrap(),
        );

        let input = AnswerInput::Text("   ".to_string());
        assert!(matches!(
            controller.record_answer(&input).await,
            Err(AppError::Session(SessionError::EmptyAnswer))
        ));
    }

    #[tokio::test]
    async fn complete_requires_an_active_exam() {
        let mut controller = offline_controller();

        // 没有会话：在构造请求之前就失败
        assert!(matches!(
            controller.complete().await,
            Err(AppError::Session(SessionError::NoActiveSession))
        ));

        // 练习会话：同样不发起请求
        with_practice_session(&mut controller, 1);
        assert!(matches!(
            controller.complete().await,
            Err(AppError::Session(SessionError::NotInExam))
        ));
    }

    #[tokio::test]
    async fn second_complete_fails_without_calling_the_service() {
        let mut controller = offline_controller();
        with_exam_session(&mut controller, 1);

        // 模拟第一次交卷成功后的状态：会话已销毁
        controller.clear();

        // 第二次交卷（用户或倒计时到期触发）不会重复提交
        assert!(matches!(
            controller.complete().await,
            Err(AppError::Session(SessionError::NoActiveSession))
        ));
    }

    #[tokio::test]
    async fn failed_completion_keeps_session_intact() {
        let mut controller = offline_controller();
        with_exam_session(&mut controller, 3);
        controller.next().unwrap();

        // 网络不可达，交卷失败
        assert!(matches!(
            controller.complete().await,
            Err(AppError::Api(_))
        ));

        // 本地状态未被破坏，可以直接重试
        let session = controller.session().unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.len(), 3);
        assert!(session.is_exam());
    }

    #[tokio::test]
    async fn exam_in_progress_blocks_new_sessions() {
        let mut controller = offline_controller();
        with_exam_session(&mut controller, 1);

        assert!(matches!(
            controller.start_practice(None, 20).await,
            Err(AppError::Session(SessionError::ExamInProgress))
        ));
        assert!(matches!(
            controller.start_exam("mock_exam").await,
            Err(AppError::Session(SessionError::ExamInProgress))
        ));

        // 原会话保持原样
        assert!(controller.session().is_some());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let mut controller = offline_controller();
        with_practice_session(&mut controller, 1);

        controller.clear();
        controller.clear();
        assert!(controller.session().is_none());
        assert!(controller.expiry_signal().is_none());
    }
}
