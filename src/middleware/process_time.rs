use axum::{
    middleware::Next,
    response::Response,
    http::{Request, HeaderValue},
    body::Body,
};
use std::time::{Duration, Instant};

pub const PROCESS_TIME_HEADER: &str = "x-process-time";

fn format_process_time(duration: Duration) -> String {
    let process_time_ms = duration.as_micros() as f64 / 1000.0;

    if process_time_ms < 10.0 {
        format!("{:.1} ms", process_time_ms)
    } else {
        format!("{:.0} ms", process_time_ms)
    }
}

pub async fn process_time_middleware(
    request: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();

    let mut response = next.run(request).await;

    let process_time_header = format_process_time(start_time.elapsed());
    if let Ok(value) = HeaderValue::from_str(&process_time_header) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_process_time() {
        assert_eq!(format_process_time(Duration::from_micros(0)), "0.0 ms");
        assert_eq!(format_process_time(Duration::from_micros(2_340)), "2.3 ms");
        assert_eq!(format_process_time(Duration::from_micros(9_940)), "9.9 ms");
        assert_eq!(format_process_time(Duration::from_millis(10)), "10 ms");
        assert_eq!(format_process_time(Duration::from_micros(123_600)), "124 ms");
    }
}
