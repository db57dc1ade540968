//! 题目页投影
//!
//! 把会话状态投影为纯文本视图，不读写任何状态，
//! 控制器因此可以在没有渲染面的情况下独立测试。

use std::fmt::Write;

use crate::models::{AnswerResult, QuestionType};
use crate::session::ExamSession;
use crate::utils::{format_mmss, progress_bar};

/// 渲染当前题目页
pub fn render_question_page(session: &ExamSession) -> String {
    let question = session.current_question();
    let index = session.current_index();
    let total = session.len();

    let mut out = String::new();

    // 进度区
    let _ = write!(out, "第 {} 题 / 共 {} 题", index + 1, total);
    if let Some(remaining) = session.remaining_seconds() {
        let _ = write!(out, "    ⏰ 剩余时间: {}", format_mmss(remaining));
    }
    out.push('\n');
    let percent = (index + 1) as f64 / total as f64 * 100.0;
    let _ = writeln!(out, "{}", progress_bar(percent, 30));
    out.push('\n');

    // 题目区
    let _ = writeln!(
        out,
        "【{}】 {}",
        question.question_type.label(),
        question.category
    );
    let _ = writeln!(out, "{}", question.question);
    out.push('\n');

    // 选项区
    match question.question_type {
        QuestionType::Judge => {
            out.push_str("  1. 正确\n  2. 错误\n");
        }
        _ => {
            let options = question.option_list();
            if options.is_empty() {
                out.push_str("  （简答题，请直接输入答案文本）\n");
            } else {
                for (i, option) in options.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", i + 1, option);
                }
            }
        }
    }

    // 操作提示
    out.push('\n');
    out.push_str(answer_hint(question.question_type));
    out.push('\n');

    out
}

/// 渲染练习模式的判分反馈
pub fn render_answer_result(result: &AnswerResult) -> String {
    let mut out = String::new();

    if result.is_correct {
        out.push_str("✓ 回答正确\n");
    } else {
        out.push_str("✗ 回答错误\n");
    }
    let _ = writeln!(out, "正确答案：{}", result.correct_answer);
    if let Some(explanation) = &result.explanation {
        if !explanation.is_empty() {
            let _ = writeln!(out, "解析：{}", explanation);
        }
    }

    out
}

fn answer_hint(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::Single => "作答: answer <选项序号>，导航: n 下一题 / p 上一题",
        QuestionType::Multiple => "作答: answer <序号,序号,...>，导航: n 下一题 / p 上一题",
        QuestionType::Judge => "作答: answer 1 (正确) 或 answer 2 (错误)，导航: n / p",
        QuestionType::FreeText => "作答: answer <答案文本>，导航: n 下一题 / p 上一题",
    }
}
