//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `DATABASE_MAX_CONNECTIONS`: 연결 풀 최대 크기
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후 사용합니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/blogly.db")
    pub database_url: String,
    /// 연결 풀의 최대 연결 수 (기본값: 5)
    pub max_connections: u32,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?, // 필수: 없으면 에러
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 5),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("PORT", 3000),
        })
    }

    /// `host:port` 형태의 바인딩 주소
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 환경변수를 숫자로 파싱합니다. 없거나 파싱에 실패하면 기본값을 사용합니다.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_falls_back_on_missing_or_garbage() {
        assert_eq!(parse_or::<u16>("BLOGLY_TEST_SURELY_UNSET_PORT", 3000), 3000);

        env::set_var("BLOGLY_TEST_GARBAGE_PORT", "not-a-port");
        assert_eq!(parse_or::<u16>("BLOGLY_TEST_GARBAGE_PORT", 8080), 8080);

        env::set_var("BLOGLY_TEST_REAL_PORT", "4321");
        assert_eq!(parse_or::<u16>("BLOGLY_TEST_REAL_PORT", 8080), 4321);
    }

    #[test]
    fn addr_joins_host_and_port() {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 8000,
        };
        assert_eq!(config.addr(), "127.0.0.1:8000");
    }
}
