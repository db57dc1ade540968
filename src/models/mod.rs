//! 数据模型模块
//!
//! 与服务端 JSON 契约一一对应的线上结构，以及客户端的作答输入类型

pub mod answer;
pub mod exam;
pub mod question;
pub mod user;

pub use answer::{Ack, AnswerInput, AnswerRequest, AnswerResult, Answered, WrongQuestion, WrongQuestionsResponse};
pub use exam::{ExamHistoryResponse, ExamRecord, ExamResult, ExamStartResponse};
pub use question::{CategoriesResponse, Category, Question, QuestionListResponse, QuestionType, SearchResponse};
pub use user::{AuthResponse, CategoryStats, Credentials, ProfileResponse, User, UserStats};
