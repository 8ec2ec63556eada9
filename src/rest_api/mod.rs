/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! REST APIの実装を集約するモジュール
//!

mod actors;
mod refresh;

use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpResponse};
use serde_json::json;

/// キャッシュを禁止させる場合のCache-Controlヘッダのテンプレート
const NO_CACHE_TEMPLATE: &str = concat!(
    "no-store, ",
    "no-cache, ",
    "must-revalidate, ",
    "max-age=0",
);

///
/// Success (200)でJSONを返す場合のレスポンスビルド関数
///
/// # 引数
/// * `body` - レスポンスのボディに設定するJSON文字列
///
/// # 戻り値
/// レスポンスオブジェクト
///
/// # 注記
/// 設定値は実行中に変わり得るため、クライアント側でのキャッシュは禁止する。
///
fn resp_json_200<S>(body: S) -> HttpResponse
where
    S: ToString,
{
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, NO_CACHE_TEMPLATE))
        .content_type("application/json")
        .body(body.to_string())
}

///
/// JSON形式のエラーレスポンスを返す場合のレスポンスビルド関数
///
/// # 引数
/// * `status` - ステータスコード
/// * `reason` - エラー理由
///
/// # 戻り値
/// レスポンスオブジェクト
///
fn resp_error_json<S>(status: StatusCode, reason: S) -> HttpResponse
where
    S: ToString,
{
    let body = json!({
        "reason": reason.to_string(),
    });

    HttpResponse::build(status)
        .insert_header((header::CACHE_CONTROL, NO_CACHE_TEMPLATE))
        .content_type("application/json")
        .body(body.to_string())
}

///
/// エンドポイントの登録
///
/// # 引数
/// * `cfg` - 登録先のサービス設定
///
/// # 注記
/// メソッドが一致しないリクエストに405を返させるため、リソース単位で登録
/// する。
///
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(
            web::resource("/actors/{id}")
                .route(web::get().to(actors::get))
        )
        .service(
            web::resource("/refresh")
                .route(web::post().to(refresh::post))
        );
}

///
/// テスト用サービスの生成
///
/// # 引数
/// * `$store` - 共有させる設定ストア(`Arc<ConfigStore>`)
///
#[cfg(test)]
macro_rules! init_test_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::ErrorHandlers::new().handler(
                    actix_web::http::StatusCode::NOT_FOUND,
                    crate::http_server::not_found_handler,
                ))
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new(
                    crate::http_server::app_state::AppState::new($store)
                ))
                .configure(crate::rest_api::configure)
        ).await
    };
}

#[cfg(test)]
pub(crate) use init_test_app;
