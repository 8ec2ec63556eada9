/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! APIで返却するデータモデルの定義
//!

use serde::{Deserialize, Serialize};

///
/// アクター情報
///
/// # 注記
/// リクエスト毎に生成され、構築後に変更されることはない。
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// アクターID(リクエストで指定された値そのもの)
    actor_id: String,

    /// 名
    first_name: String,

    /// 姓
    last_name: String,
}

impl Actor {
    ///
    /// アクター情報の構築
    ///
    /// # 引数
    /// * `id` - アクターID
    /// * `message` - 姓の末尾に付与するメッセージ
    ///
    /// # 戻り値
    /// 生成したアクター情報を返す。
    ///
    pub fn build(id: &str, message: &str) -> Self {
        Self {
            actor_id: id.to_string(),
            first_name: format!("First{}", id),
            last_name: format!("Last{}. {}", id, message),
        }
    }

    ///
    /// アクターIDへのアクセサ
    ///
    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    ///
    /// 名へのアクセサ
    ///
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    ///
    /// 姓へのアクセサ
    ///
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}
