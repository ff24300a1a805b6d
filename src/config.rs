use dotenvy::dotenv;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Auto-close ceiling: a session open longer than this many hours is
    /// force-closed on the employee's next clock-in attempt.
    pub max_shift_hours: i64,

    /// Clock-ins this many minutes (or fewer) before the scheduled start
    /// require an explicit early-start choice.
    pub early_login_window_minutes: i64,

    /// Reporting baseline only; the pay formula never reads this.
    pub standard_monthly_hours: i64,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            max_shift_hours: env::var("MAX_SHIFT_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("MAX_SHIFT_HOURS must be an integer"),
            early_login_window_minutes: env::var("EARLY_LOGIN_WINDOW_MINUTES")
                .unwrap_or_else(|_| "240".to_string())
                .parse()
                .expect("EARLY_LOGIN_WINDOW_MINUTES must be an integer"),
            standard_monthly_hours: env::var("STANDARD_MONTHLY_HOURS")
                .unwrap_or_else(|_| "160".to_string())
                .parse()
                .expect("STANDARD_MONTHLY_HOURS must be an integer"),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        }
    }
}
