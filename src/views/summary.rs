//! 汇总页投影
//!
//! 考试结果、错题本、学习统计、分类与历史列表的文本视图

use std::fmt::Write;

use crate::models::{Category, ExamRecord, ExamResult, UserStats, WrongQuestion};
use crate::utils::{format_date, progress_bar, truncate_text};

/// 渲染首页菜单
pub fn render_welcome(username: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "=".repeat(46));
    let _ = writeln!(out, "欢迎来到刷题系统，{}！", username);
    let _ = writeln!(out, "{}", "=".repeat(46));
    out.push_str("  cats              查看分类\n");
    out.push_str("  practice [分类]   分类练习 / 随机练习\n");
    out.push_str("  exam              模拟考试 (180 题 180 分钟)\n");
    out.push_str("  search <关键词>   搜索题目\n");
    out.push_str("  wrong             错题本\n");
    out.push_str("  stats             学习统计\n");
    out.push_str("  history           考试历史\n");
    out.push_str("  logout            退出登录\n");
    out.push_str("  quit              退出程序\n");
    out
}

/// 渲染考试结果页
pub fn render_exam_result(result: &ExamResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "=".repeat(46));
    if result.passed() {
        out.push_str("🎉 恭喜通过！\n");
    } else {
        out.push_str("😔 继续努力！\n");
    }
    let _ = writeln!(out, "{}", "=".repeat(46));
    let _ = writeln!(out, "总题数:   {}", result.total_questions);
    let _ = writeln!(out, "正确数:   {}", result.correct_answers);
    let _ = writeln!(out, "正确率:   {:.1}%", result.accuracy());
    let _ = writeln!(out, "得分:     {:.1}", result.score);
    let _ = writeln!(out, "用时:     {} 分钟", result.duration);

    out
}

/// 渲染分类列表
pub fn render_categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "暂无分类\n".to_string();
    }

    let mut out = String::from("选择分类 (practice <分类名> 开始练习):\n");
    for category in categories {
        let _ = writeln!(out, "  {} ({} 道题目)", category.name, category.count);
    }
    out
}

/// 渲染错题本
pub fn render_wrong_questions(wrong: &[WrongQuestion]) -> String {
    if wrong.is_empty() {
        return "🎉 太棒了！您还没有错题，继续保持！\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "错题本 (共 {} 道题目)", wrong.len());
    let _ = writeln!(out, "{}", "─".repeat(46));
    for item in wrong {
        let _ = writeln!(
            out,
            "[{}] {}  {}",
            item.category,
            format_date(&item.answered_at),
            truncate_text(&item.question, 40)
        );
        let user_answer = if item.user_answer.is_empty() {
            "未作答"
        } else {
            &item.user_answer
        };
        let _ = writeln!(out, "    您的答案: {}", user_answer);
        let _ = writeln!(out, "    正确答案: {}", item.correct_answer);
    }
    out
}

/// 渲染学习统计
pub fn render_stats(stats: &UserStats) -> String {
    let mut out = String::from("学习统计\n");
    let _ = writeln!(out, "{}", "─".repeat(46));
    let _ = writeln!(out, "已答题数:   {}", stats.total_answered);
    let _ = writeln!(out, "正确题数:   {}", stats.correct_count);
    let _ = writeln!(out, "总体正确率: {:.1}%", stats.accuracy);

    if !stats.category_stats.is_empty() {
        out.push('\n');
        out.push_str("分类统计:\n");
        for stat in &stats.category_stats {
            let _ = writeln!(
                out,
                "  {:<12} {} {:.1}% ({}/{})",
                stat.category,
                progress_bar(stat.accuracy, 20),
                stat.accuracy,
                stat.correct,
                stat.total
            );
        }
    }

    out
}

/// 渲染考试历史
pub fn render_exam_history(records: &[ExamRecord]) -> String {
    if records.is_empty() {
        return "暂无考试记录\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "考试历史 (最近 {} 次)", records.len());
    let _ = writeln!(out, "{}", "─".repeat(46));
    for record in records {
        let exam_type = match record.exam_type.as_str() {
            "mock_exam" => "模拟考试",
            "practice" => "练习",
            other => other,
        };
        let _ = writeln!(
            out,
            "{}  {}  {}/{}  得分 {:.1}",
            format_date(&record.started_at),
            exam_type,
            record.correct_count,
            record.total_count,
            record.score
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exam_result_marks_pass_and_fail() {
        let passed = ExamResult {
            total_questions: 180,
            correct_answers: 150,
            score: 83.3,
            duration: 120,
            completed_at: None,
        };
        assert!(render_exam_result(&passed).contains("恭喜通过"));

        let failed = ExamResult {
            total_questions: 180,
            correct_answers: 60,
            score: 33.3,
            duration: 90,
            completed_at: None,
        };
        assert!(render_exam_result(&failed).contains("继续努力"));
    }

    #[test]
    fn empty_wrong_book_celebrates() {
        assert!(render_wrong_questions(&[]).contains("还没有错题"));
    }

    #[test]
    fn wrong_book_shows_unanswered_marker() {
        let wrong = vec![WrongQuestion {
            question_id: 1,
            question: "哪个关键字声明不可变绑定？".to_string(),
            user_answer: String::new(),
            correct_answer: "let".to_string(),
            category: "语法".to_string(),
            answered_at: "2025-08-01T10:00:00+08:00".to_string(),
        }];
        let view = render_wrong_questions(&wrong);
        assert!(view.contains("未作答"));
        assert!(view.contains("正确答案: let"));
    }

    #[test]
    fn stats_include_category_bars() {
        let stats = UserStats {
            total_answered: 40,
            correct_count: 30,
            accuracy: 75.0,
            category_stats: vec![crate::models::CategoryStats {
                category: "语法".to_string(),
                total: 20,
                correct: 15,
                accuracy: 75.0,
            }],
            wrong_questions: Vec::new(),
        };
        let view = render_stats(&stats);
        assert!(view.contains("总体正确率: 75.0%"));
        assert!(view.contains("语法"));
        assert!(view.contains("(15/20)"));
    }
}
