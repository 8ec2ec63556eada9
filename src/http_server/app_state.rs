/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! HTTPサーバが共有する状態をまとめたモジュール
//!

use std::sync::Arc;

use crate::live_config::ConfigStore;

///
/// HTTPサーバの共有状態
///
/// # 注記
/// 設定ストアは内部で排他制御を行うため、共有状態自体はロックで包まない。
///
pub(crate) struct AppState {
    /// 設定ストア
    config: Arc<ConfigStore>,
}

impl AppState {
    ///
    /// 共有状態オブジェクトの生成
    ///
    /// # 引数
    /// * `config` - 参照する設定ストア
    ///
    /// # 戻り値
    /// 生成したオブジェクトを返す。
    ///
    pub(crate) fn new(config: Arc<ConfigStore>) -> Self {
        Self { config }
    }

    ///
    /// 設定ストアへのアクセサ
    ///
    /// # 戻り値
    /// 設定ストアへの参照を返す。
    ///
    pub(crate) fn config(&self) -> &ConfigStore {
        &self.config
    }
}
