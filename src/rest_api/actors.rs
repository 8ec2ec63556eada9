/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! API ACTORSの実装を行うモジュール
//!

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use log::debug;

use crate::http_server::app_state::AppState;
use refreshable_actors::Actor;
use super::{resp_error_json, resp_json_200};

///
/// GET /actors/{id} の実体
///
/// # 概要
/// パスで指定されたIDと、リクエスト時点で有効な`app.message`からアクター
/// 情報を構築して返す。
///
/// # 引数
/// * `state` - 共有状態
/// * `path` - パスパラメータ(アクターID)
///
/// # APIレスポンスの種別
/// application/json
///
/// # 戻り値
/// actix-webのレスポンスオブジェクト
///
pub async fn get(
    state: web::Data<AppState>,
    path: web::Path<String>,
)
    -> actix_web::Result<HttpResponse>
{
    let id = path.into_inner();

    /*
     * 現在の設定の取得(起動時の値を保持せず毎回参照する)
     */
    let settings = match state.config().current() {
        Ok(settings) => settings,
        Err(err) => {
            return Ok(resp_error_json(StatusCode::INTERNAL_SERVER_ERROR, err));
        }
    };

    /*
     * アクター情報の構築と返却
     */
    let actor = Actor::build(&id, settings.message());
    debug!("actor built: {:?}", actor);

    match serde_json::to_string(&actor) {
        Ok(body) => Ok(resp_json_200(body)),
        Err(err) => Ok(resp_error_json(StatusCode::INTERNAL_SERVER_ERROR, err)),
    }
}
