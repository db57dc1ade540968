//! 交互层
//!
//! 终端命令循环：读取用户命令驱动会话控制器，把状态投影为
//! 文本视图输出。同时监听考试倒计时的到期通知，到期时自动交卷。
//!
//! 所有错误都在这一层转为提示消息展示，不会中断循环，
//! 也不会改动已加载的会话状态，用户可以直接重试。

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::info;

use crate::clients::QuizClient;
use crate::config::Config;
use crate::error::{ApiError, AppError};
use crate::models::{AnswerInput, Answered, Credentials, Question, QuestionType, User};
use crate::session::SessionController;
use crate::views;

/// 应用主结构
pub struct App {
    config: Config,
    controller: SessionController,
    user: Option<User>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let client = QuizClient::new(&config)?;
        Ok(Self {
            controller: SessionController::new(client),
            config,
            user: None,
        })
    }

    /// 运行交互循环
    pub async fn run(&mut self) -> Result<()> {
        self.check_auth().await;

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        loop {
            let mut expiry = self.controller.expiry_signal();

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if !self.dispatch(line.trim()).await {
                        break;
                    }
                }
                _ = wait_expiry(&mut expiry) => {
                    self.auto_complete().await;
                }
            }
        }

        info!("👋 程序退出");
        Ok(())
    }

    /// 启动时检查登录状态
    async fn check_auth(&mut self) {
        match self.controller.client().profile().await {
            Ok(profile) => {
                println!("{}", views::render_welcome(&profile.user.username));
                self.user = Some(profile.user);
            }
            Err(ApiError::AuthRequired) => {
                println!("请先登录: login <用户名> <密码>，或注册: register <用户名> <密码>");
            }
            Err(e) => self.print_error(e.into()),
        }
    }

    /// 处理一条命令
    ///
    /// # 返回
    /// 返回是否继续循环
    async fn dispatch(&mut self, line: &str) -> bool {
        let (command, rest) = split_command(line);

        match command {
            "" => self.show_current(),
            "help" | "h" => {
                let username = self.user.as_ref().map(|u| u.username.as_str()).unwrap_or("同学");
                println!("{}", views::render_welcome(username));
            }
            "register" => self.register(rest).await,
            "login" => self.login(rest).await,
            "logout" => self.logout().await,
            "cats" | "categories" => self.show_categories().await,
            "practice" => self.start_practice(rest).await,
            "exam" => self.start_exam(rest).await,
            "answer" | "a" => self.answer(rest).await,
            "n" | "next" => self.navigate(true),
            "p" | "prev" | "previous" => self.navigate(false),
            "done" | "complete" => self.finish().await,
            "wrong" => self.show_wrong_questions().await,
            "stats" => self.show_stats().await,
            "search" => self.search(rest).await,
            "history" => self.show_history().await,
            "quit" | "exit" | "q" => return false,
            other => println!("未知命令: {}（输入 help 查看帮助）", other),
        }

        true
    }

    // ========== 认证 ==========

    async fn register(&mut self, rest: &str) {
        let Some(credentials) = parse_credentials(rest) else {
            println!("用法: register <用户名> <密码>");
            return;
        };
        match self.controller.client().register(&credentials).await {
            Ok(_) => println!("注册成功！请登录: login {} <密码>", credentials.username),
            Err(e) => self.print_error(e.into()),
        }
    }

    async fn login(&mut self, rest: &str) {
        let Some(credentials) = parse_credentials(rest) else {
            println!("用法: login <用户名> <密码>");
            return;
        };
        match self.controller.client().login(&credentials).await {
            Ok(auth) => {
                println!("登录成功！");
                println!("{}", views::render_welcome(&auth.user.username));
                self.user = Some(auth.user);
            }
            Err(e) => self.print_error(e.into()),
        }
    }

    async fn logout(&mut self) {
        // 离开页面即销毁会话（含倒计时）
        self.controller.clear();
        match self.controller.client().logout().await {
            Ok(_) => {
                self.user = None;
                println!("已退出登录");
            }
            Err(e) => self.print_error(e.into()),
        }
    }

    // ========== 会话操作 ==========

    async fn start_practice(&mut self, rest: &str) {
        let category = if rest.is_empty() { None } else { Some(rest) };
        let limit = self.config.practice_limit;

        match self.controller.start_practice(category, limit).await {
            Ok(()) => self.show_current(),
            Err(e) => self.print_error(e),
        }
    }

    async fn start_exam(&mut self, rest: &str) {
        let exam_type = if rest.is_empty() { "mock_exam" } else { rest };

        match self.controller.start_exam(exam_type).await {
            Ok(()) => self.show_current(),
            Err(e) => self.print_error(e),
        }
    }

    async fn answer(&mut self, rest: &str) {
        let Some(session) = self.controller.session() else {
            println!("当前没有进行中的会话，输入 practice 或 exam 开始");
            return;
        };
        let question = session.current_question().clone();
        let was_last = session.is_last();
        let input = parse_answer(&question, rest);

        match self.controller.record_answer(&input).await {
            Ok(Answered::Graded(result)) => {
                println!("{}", views::render_answer_result(&result));
            }
            Ok(Answered::Saved) => {
                println!("✓ 答案已保存");
                // 考试模式提交后自动进入下一题；最后一题提示交卷
                if was_last {
                    println!("已是最后一题，输入 done 交卷");
                } else {
                    let _ = self.controller.next();
                    self.show_current();
                }
            }
            Err(e) => self.print_error(e),
        }
    }

    fn navigate(&mut self, forward: bool) {
        let moved = if forward {
            self.controller.next()
        } else {
            self.controller.previous()
        };
        match moved {
            Ok(_) => self.show_current(),
            Err(e) => self.print_error(e),
        }
    }

    /// 完成当前会话：考试交卷，练习直接结束
    async fn finish(&mut self) {
        let Some(session) = self.controller.session() else {
            println!("当前没有进行中的会话");
            return;
        };

        if session.is_exam() {
            match self.controller.complete().await {
                Ok(result) => println!("{}", views::render_exam_result(&result)),
                Err(e) => self.print_error(e),
            }
        } else {
            self.controller.clear();
            println!("练习结束，输入 wrong 查看错题或 stats 查看统计");
        }
    }

    /// 倒计时到期：自动交卷，整个考试只会发生一次
    async fn auto_complete(&mut self) {
        println!("\n⏰ 考试时间到！系统将自动交卷。");
        // 通知只消费一次；交卷失败时由用户手动重试（done）
        self.controller.dismiss_expiry();
        match self.controller.complete().await {
            Ok(result) => println!("{}", views::render_exam_result(&result)),
            // 与手动交卷在同一秒竞争时，晚到的一方在这里失败，不会重复提交
            Err(e) => self.print_error(e),
        }
    }

    // ========== 查询 ==========

    async fn show_categories(&mut self) {
        match self.controller.client().categories().await {
            Ok(resp) => println!("{}", views::render_categories(&resp.categories)),
            Err(e) => self.print_error(e.into()),
        }
    }

    async fn show_wrong_questions(&mut self) {
        match self.controller.client().wrong_questions().await {
            Ok(resp) => println!("{}", views::render_wrong_questions(&resp.wrong_questions)),
            Err(e) => self.print_error(e.into()),
        }
    }

    async fn show_stats(&mut self) {
        match self.controller.client().user_stats().await {
            Ok(stats) => println!("{}", views::render_stats(&stats)),
            Err(e) => self.print_error(e.into()),
        }
    }

    async fn search(&mut self, rest: &str) {
        if rest.is_empty() {
            println!("用法: search <关键词>");
            return;
        }
        match self.controller.client().search_questions(rest, 50).await {
            Ok(resp) => {
                println!("找到 {} 道题目:", resp.questions.len());
                for q in &resp.questions {
                    println!(
                        "  [{}] {}",
                        q.category,
                        crate::utils::truncate_text(&q.question, 50)
                    );
                }
            }
            Err(e) => self.print_error(e.into()),
        }
    }

    async fn show_history(&mut self) {
        match self.controller.client().exam_history(10).await {
            Ok(resp) => println!("{}", views::render_exam_history(&resp.exam_records)),
            Err(e) => self.print_error(e.into()),
        }
    }

    // ========== 输出辅助 ==========

    /// 显示当前题目页；没有会话时显示首页菜单
    fn show_current(&self) {
        match self.controller.session() {
            Some(session) => println!("{}", views::render_question_page(session)),
            None => {
                let username = self.user.as_ref().map(|u| u.username.as_str()).unwrap_or("同学");
                println!("{}", views::render_welcome(username));
            }
        }
    }

    /// 把错误转为用户可见的提示消息，循环继续运行
    fn print_error(&self, err: AppError) {
        match &err {
            AppError::Api(ApiError::AuthRequired) => {
                println!("❌ {}（login <用户名> <密码>）", err);
            }
            _ => println!("❌ {}", err),
        }
    }
}

// ========== 辅助函数 ==========

/// 等待考试到期通知；没有活动倒计时则永远挂起
async fn wait_expiry(rx: &mut Option<watch::Receiver<bool>>) {
    match rx {
        Some(rx) => {
            if rx.changed().await.is_err() {
                // 倒计时已取消，通道关闭，不再触发
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}

/// 拆分命令与参数
fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

fn parse_credentials(rest: &str) -> Option<Credentials> {
    let mut parts = rest.split_whitespace();
    let username = parts.next()?.to_string();
    let password = parts.next()?.to_string();
    Some(Credentials { username, password })
}

/// 把终端输入解析为作答
///
/// 选择题支持按选项序号作答（从 1 开始），也接受直接输入选项值；
/// 判断题接受 1/2 或 正确/错误；多选以逗号或空格分隔
fn parse_answer(question: &Question, raw: &str) -> AnswerInput {
    let raw = raw.trim();

    match question.question_type {
        QuestionType::FreeText => AnswerInput::Text(raw.to_string()),
        QuestionType::Judge => {
            let value = match raw {
                "1" | "正确" | "对" => "正确",
                "2" | "错误" | "错" => "错误",
                other => other,
            };
            AnswerInput::Choice(value.to_string())
        }
        QuestionType::Single => AnswerInput::Choice(resolve_option(question, raw)),
        QuestionType::Multiple => {
            let values = raw
                .split([',', '，', ' '])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| resolve_option(question, s))
                .collect();
            AnswerInput::MultiChoice(values)
        }
    }
}

/// 把序号解析为选项值；不是合法序号时按原文提交
fn resolve_option(question: &Question, token: &str) -> String {
    let options = question.option_list();
    if let Ok(index) = token.parse::<usize>() {
        if index >= 1 && index <= options.len() {
            return options[index - 1].to_string();
        }
    }
    token.to_string()
}
