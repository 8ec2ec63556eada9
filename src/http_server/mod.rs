/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! HTTPサーバに関する処理を集約するモジュール
//!

pub(crate) mod app_state;
pub(crate) mod logger;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use actix_web::{web, App, HttpResponse, HttpServer};
use actix_web::dev::{Server, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers, NormalizePath};
use log::{info, warn};
use tokio::runtime::Builder;
use tokio::time;

use crate::live_config::ConfigStore;
use crate::rest_api;

use self::app_state::AppState;
use self::logger::AccessLogger;

///
/// ルーティングに一致しなかったリクエストへのレスポンスをJSON化する
///
pub(crate) fn not_found_handler<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, _) = res.into_parts();
    let body = serde_json::json!({
        "reason": "not found",
    });
    let resp = HttpResponse::build(StatusCode::NOT_FOUND)
        .content_type("application/json")
        .body(body.to_string())
        .map_into_right_body();
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, resp),
    ))
}

///
/// HTTPサーバの実行
///
/// # 引数
/// * `addr` - サーバーをバインドさせるアドレス
/// * `port` - サーバーをバインドさせるポート番号
/// * `store` - 設定ストア
/// * `refresh_period` - 設定ファイルの監視間隔(`None`の場合は監視しない)
///
/// # 戻り値
/// サーバが正常に終了した場合は`Ok(())`を返す。
///
pub(crate) fn run(
    addr: String,
    port: u16,
    store: Arc<ConfigStore>,
    refresh_period: Option<Duration>,
) -> Result<()> {
    /*
     * Tokioランタイムの構築
     */
    let rt = Builder::new_multi_thread()
        .enable_all()
        .build()?;

    /*
     * 共有状態の生成
     */
    let state = web::Data::new(AppState::new(store));

    /*
     * 設定ファイル監視タスクの起動
     */
    if let Some(period) = refresh_period {
        info!("config watch enabled: every {}s", period.as_secs());
        rt.spawn(config_refresh_task(state.clone(), period));
    }

    /*
     * Tokioランタイムでのサーバの起動
     */
    info!("HTTP server start: {}:{}", addr, port);

    match rt.block_on(async { create_server(addr, port, state)?.await }) {
        Ok(()) => {
            info!("HTTP server exit");
            Ok(())
        }

        Err(err) => {
            info!("HTTP server failed");
            Err(err.into())
        }
    }
}

///
/// HTTPサーバーの生成
///
/// # 引数
/// * `addr` - サーバーをバインドさせるアドレス
/// * `port` - サーバーをバインドさせるポート番号
/// * `state` - 共有状態
///
fn create_server(
    addr: String,
    port: u16,
    state: web::Data<AppState>,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            // ロガーの設定
            .wrap(AccessLogger::new())
            .wrap(ErrorHandlers::new().handler(
                StatusCode::NOT_FOUND,
                not_found_handler,
            ))

            // 末尾のスラッシュは無視する
            .wrap(NormalizePath::trim())

            // エンドポイント設定
            .app_data(state.clone())
            .configure(rest_api::configure)
    })
    .bind((addr.as_str(), port))?;

    Ok(server.run())
}

///
/// 設定ファイル監視タスク
///
/// # 引数
/// * `state` - 共有状態
/// * `period` - 監視間隔
///
async fn config_refresh_task(state: web::Data<AppState>, period: Duration) {
    let mut interval = time::interval(period);

    // 初回のtickは即時に完了するので読み捨てる
    interval.tick().await;

    loop {
        interval.tick().await;

        if let Err(err) = state.config().refresh_if_modified() {
            warn!("config refresh failed: {}", err);
        }
    }
}
