/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! API REFRESHの実装を行うモジュール
//!

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use log::warn;

use crate::http_server::app_state::AppState;
use super::{resp_error_json, resp_json_200};

///
/// POST /refresh の実体
///
/// # 概要
/// 設定ファイルを再読み込みし、値が変化したキーの一覧をJSON配列で返す。
/// 読み込みに失敗した場合は現在の設定を維持したまま500を返す。
///
/// # 引数
/// * `state` - 共有状態
///
/// # APIレスポンスの種別
/// application/json
///
/// # 戻り値
/// actix-webのレスポンスオブジェクト
///
pub async fn post(
    state: web::Data<AppState>,
)
    -> actix_web::Result<HttpResponse>
{
    let keys = match state.config().refresh() {
        Ok(keys) => keys,
        Err(err) => {
            warn!("manual refresh failed: {}", err);
            return Ok(resp_error_json(StatusCode::INTERNAL_SERVER_ERROR, err));
        }
    };

    match serde_json::to_string(&keys) {
        Ok(body) => Ok(resp_json_200(body)),
        Err(err) => Ok(resp_error_json(StatusCode::INTERNAL_SERVER_ERROR, err)),
    }
}
