/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 刷题系统 API 根地址（含 /api 前缀）
    pub api_base_url: String,
    /// 练习模式每批题目数量
    pub practice_limit: usize,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:50442/api".to_string(),
            practice_limit: 20,
            request_timeout_secs: 15,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("QUIZ_API_BASE_URL").unwrap_or(default.api_base_url),
            practice_limit: std::env::var("QUIZ_PRACTICE_LIMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.practice_limit),
            request_timeout_secs: std::env::var("QUIZ_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
