/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! HTTPアクセスログの出力を担当するモジュール
//!

use std::fmt;
use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::time::Instant;

use actix_web::body::{BodySize, MessageBody};
use actix_web::dev::{
    forward_ready, Service, ServiceRequest, ServiceResponse, Transform,
};
use actix_web::http::{header, StatusCode, Version};
use actix_web::{Error, HttpRequest};
use log::{info, warn};

///
/// HTTPアクセスログの出力ミドルウェア
///
pub(crate) struct AccessLogger;

impl AccessLogger {
    ///
    /// アクセスロガーの生成
    ///
    pub(crate) fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>
        + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AccessLoggerMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLoggerMiddleware { service }))
    }
}

///
/// HTTPアクセスログの出力処理を提供するミドルウェア
///
pub(crate) struct AccessLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AccessLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>
        + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<
        dyn Future<Output = Result<Self::Response, Self::Error>> + 'static
    >>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            let record = AccessRecord::new(
                res.request(),
                res.status(),
                res.response().body().size(),
                start.elapsed().as_secs_f64(),
            );

            // サーバ側の異常は通常のアクセスログと区別できるようにする
            if record.status.is_server_error() {
                warn!("{}", record);
            } else {
                info!("{}", record);
            }

            Ok(res)
        })
    }
}

///
/// アクセスログ1行分の情報
///
struct AccessRecord {
    /// 接続元アドレス
    addr: String,

    /// リクエストライン(メソッド、パス、HTTPバージョン)
    request_line: String,

    /// レスポンスのステータス
    status: StatusCode,

    /// レスポンスボディのサイズ(バイト)
    size: usize,

    /// Refererヘッダ
    referer: String,

    /// User-Agentヘッダ
    user_agent: String,

    /// 処理時間(秒)
    elapsed: f64,
}

impl AccessRecord {
    ///
    /// リクエストとレスポンスの情報からログ情報を構築
    ///
    fn new(
        request: &HttpRequest,
        status: StatusCode,
        size: BodySize,
        elapsed: f64,
    ) -> Self {
        let addr = request
            .peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "-".to_string());
        let path = request
            .uri()
            .path_and_query()
            .map(|v| v.as_str())
            .unwrap_or_else(|| request.path());

        Self {
            addr,
            request_line: format!(
                "{} {} {}",
                request.method().as_str(),
                path,
                http_version(request.version())
            ),
            status,
            size: body_size(size),
            referer: header_value(request, header::REFERER),
            user_agent: header_value(request, header::USER_AGENT),
            elapsed,
        }
    }
}

// Displayトレイトの実装
impl fmt::Display for AccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \"{}\" {} {} \"{}\" \"{}\" {:.6}",
            self.addr,
            self.request_line,
            self.status.as_u16(),
            self.size,
            self.referer,
            self.user_agent,
            self.elapsed
        )
    }
}

///
/// ヘッダの値をログ用文字列として取得
///
fn header_value(request: &HttpRequest, name: header::HeaderName) -> String {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

///
/// レスポンスボディのサイズを取得
///
fn body_size(size: BodySize) -> usize {
    match size {
        BodySize::Sized(size) => usize::try_from(size).unwrap_or(0),
        _ => 0,
    }
}

///
/// HTTPバージョンの表示文字列を取得
///
fn http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn record_formats_request_line_and_headers() {
        let request = TestRequest::get()
            .uri("/actors/7?x=1")
            .insert_header((header::USER_AGENT, "tester"))
            .peer_addr("127.0.0.1:50000".parse().expect("addr"))
            .to_http_request();

        let record = AccessRecord::new(
            &request,
            StatusCode::OK,
            BodySize::Sized(64),
            0.5,
        );

        assert_eq!(
            record.to_string(),
            "127.0.0.1 \"GET /actors/7?x=1 HTTP/1.1\" 200 64 \"-\" \"tester\" 0.500000"
        );
    }

    #[test]
    fn unsized_body_is_logged_as_zero() {
        assert_eq!(body_size(BodySize::Stream), 0);
        assert_eq!(body_size(BodySize::None), 0);
    }
}
