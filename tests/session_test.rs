//! 会话状态机的场景测试
//!
//! 不依赖服务端：直接构造会话与倒计时，验证导航不变式、
//! 到期通知与视图投影的配合。

use std::time::Duration;

use quiz_client::views::{render_question_page, render_welcome};
use quiz_client::{AnswerInput, Countdown, ExamSession, Question, QuestionType};

fn sample_questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question {
            id: i as u64 + 1,
            question_type: if i % 3 == 0 {
                QuestionType::Single
            } else if i % 3 == 1 {
                QuestionType::Multiple
            } else {
                QuestionType::Judge
            },
            question: format!("第 {} 道测试题", i + 1),
            options: if i % 3 == 2 {
                String::new()
            } else {
                "A|B|C|D".to_string()
            },
            category: "综合".to_string(),
            explanation: None,
        })
        .collect()
}

#[test]
fn index_stays_in_bounds_under_random_navigation() {
    let mut session = ExamSession::practice(sample_questions(7)).unwrap();

    // 伪随机的导航序列，下标始终在界内
    let moves = [true, true, false, true, true, true, true, true, false, false];
    for (step, forward) in moves.iter().cycle().take(100).enumerate() {
        if *forward {
            session.next();
        } else {
            session.previous();
        }
        assert!(
            session.current_index() < session.len(),
            "第 {} 步后下标越界",
            step
        );
    }
}

#[test]
fn multi_choice_serialization_is_canonical() {
    let question = &sample_questions(2)[1];
    assert_eq!(question.question_type, QuestionType::Multiple);

    // 勾选顺序不同，序列化结果相同
    let first = AnswerInput::MultiChoice(vec!["A".to_string(), "C".to_string()]);
    let second = AnswerInput::MultiChoice(vec!["C".to_string(), "A".to_string()]);
    assert_eq!(first.serialize(question), "A,C");
    assert_eq!(second.serialize(question), "A,C");
}

#[tokio::test(start_paused = true)]
async fn timed_exam_session_counts_down_and_expires() {
    // 模拟考试：服务端返回 duration=180 时客户端启动倒计时
    let (countdown, mut expired) = Countdown::start(180);
    let session = ExamSession::exam(
        "exam_0001".to_string(),
        sample_questions(3),
        Some(countdown),
    )
    .unwrap();

    assert_eq!(session.remaining_seconds(), Some(180 * 60));

    // 题目页显示剩余时间
    let page = render_question_page(&session);
    assert!(page.contains("剩余时间: 180:00"));

    // 经过 180×60 次 tick 后到期通知恰好到达一次
    tokio::task::yield_now().await;
    tokio::time::advance(Duration::from_secs(180 * 60)).await;
    expired.changed().await.unwrap();
    assert!(*expired.borrow_and_update());
    assert_eq!(session.remaining_seconds(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_session_cancels_its_countdown() {
    let (countdown, rx) = Countdown::start(5);
    let session =
        ExamSession::exam("exam_0002".to_string(), sample_questions(1), Some(countdown)).unwrap();

    drop(session);
    tokio::time::advance(Duration::from_secs(5 * 60)).await;
    tokio::task::yield_now().await;

    // 倒计时随会话销毁而取消，不会发布到期
    assert!(!*rx.borrow());
}

#[test]
fn welcome_view_lists_all_entry_points() {
    let view = render_welcome("tester");
    for command in ["practice", "exam", "wrong", "stats", "history", "search"] {
        assert!(view.contains(command), "首页缺少入口: {}", command);
    }
}
