/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! サブコマンドrunの実装
//!

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::info;

use crate::cmd_args::{Options, RunOpts};
use crate::http_server;
use crate::live_config::ConfigStore;
use super::CommandContext;

///
/// runサブコマンドのコンテキスト情報をパックした構造体
///
struct RunCommandContext {
    /// バインド先のアドレス
    bind_addr: String,

    /// バインド先のポート番号
    bind_port: u16,

    /// 設定ファイルへのパス
    config_path: PathBuf,

    /// 設定ファイルの再読み込み間隔(0の場合は無効)
    refresh_interval: u64,
}

impl RunCommandContext {
    ///
    /// オブジェクトの生成
    ///
    fn new(opts: &Options, sub_opts: &RunOpts) -> Result<Self> {
        Ok(Self {
            bind_addr: sub_opts.bind_addr(),
            bind_port: sub_opts.bind_port(),
            config_path: opts.config_path(),
            refresh_interval: sub_opts.refresh_interval(),
        })
    }

    ///
    /// 再読み込み間隔の取得
    ///
    /// # 戻り値
    /// 定期的な再読み込みを行う場合はその間隔を`Some()`で返す。
    ///
    fn refresh_period(&self) -> Option<Duration> {
        if self.refresh_interval == 0 {
            None
        } else {
            Some(Duration::from_secs(self.refresh_interval))
        }
    }
}

// トレイトCommandContextの実装
impl CommandContext for RunCommandContext {
    fn exec(&self) -> Result<()> {
        /*
         * 設定ストアの構築
         */
        let store = Arc::new(ConfigStore::open(&self.config_path)?);
        info!(
            "config source: {} (message={:?})",
            self.config_path.display(),
            store.current()?.message()
        );

        /*
         * HTTPサーバの起動
         */
        http_server::run(
            self.bind_addr.clone(),
            self.bind_port,
            store,
            self.refresh_period(),
        )
    }
}

///
/// コマンドコンテキストの生成
///
pub(crate) fn build_context(opts: &Options, sub_opts: &RunOpts)
    -> Result<Box<dyn CommandContext>>
{
    Ok(Box::new(RunCommandContext::new(opts, sub_opts)?))
}
