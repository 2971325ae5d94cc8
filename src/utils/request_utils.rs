//! 요청 메타데이터 추출

use actix_web::HttpRequest;

const UNKNOWN: &str = "unknown";

/// 세션 기록에 남기는 클라이언트 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

impl ClientInfo {
    pub fn from_request(req: &HttpRequest) -> Self {
        Self {
            ip: extract_client_ip(req),
            user_agent: extract_user_agent(req),
        }
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self { ip: UNKNOWN.to_string(), user_agent: UNKNOWN.to_string() }
    }
}

/// `X-Forwarded-For`의 첫 번째 값, `X-Real-IP`, 연결 주소 순으로 확인합니다.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    if let Some(forwarded) = header("x-forwarded-for") {
        if let Some(first) = forwarded.split(',').map(str::trim).find(|ip| !ip.is_empty()) {
            return first.to_string();
        }
    }

    if let Some(real_ip) = header("x-real-ip") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn extract_user_agent(req: &HttpRequest) -> String {
    req.headers()
        .get(actix_web::http::header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .filter(|ua| !ua.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_forwarded_for_takes_precedence() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "198.51.100.1"))
            .to_http_request();

        assert_eq!(extract_client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_then_peer_addr() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "198.51.100.1"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "198.51.100.1");

        let req = TestRequest::default()
            .peer_addr("192.0.2.10:5555".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "192.0.2.10");
    }

    #[test]
    fn test_client_info_defaults_to_unknown() {
        let info = ClientInfo::from_request(&TestRequest::default().to_http_request());
        assert_eq!(info, ClientInfo::default());

        let req = TestRequest::default()
            .insert_header(("User-Agent", "Mozilla/5.0"))
            .to_http_request();
        assert_eq!(extract_user_agent(&req), "Mozilla/5.0");
    }
}
