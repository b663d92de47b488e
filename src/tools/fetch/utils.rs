use reqwest::StatusCode;

/// Reject any non-2xx status with a readable reason.
pub(super) fn validate_status(status: u16) -> Result<(), String> {
    let status_code = match StatusCode::from_u16(status) {
        Ok(code) => code,
        Err(_) => return Err(format!("status {} (invalid)", status)),
    };

    if status_code.is_success() {
        return Ok(());
    }

    let reason = match status_code {
        StatusCode::TOO_MANY_REQUESTS => "rate limited",
        StatusCode::FORBIDDEN => "forbidden",
        StatusCode::NOT_FOUND => "not found",
        StatusCode::UNAUTHORIZED => "unauthorized",
        StatusCode::BAD_REQUEST => "bad request",
        StatusCode::GONE => "gone",
        code if code.is_redirection() => "unfollowed redirect",
        code if code.is_server_error() => "server error",
        _ => "unknown error",
    };
    Err(format!("status {} ({})", status, reason))
}
