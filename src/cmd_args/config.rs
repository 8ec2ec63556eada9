/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! コンフィギュレーション情報の定義
//!

use std::default::Default;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use super::{
    default_log_path, LogLevel, DEFAULT_BIND_ADDR, DEFAULT_BIND_PORT,
    DEFAULT_REFRESH_INTERVAL,
};
use crate::live_config::AppSettings;

///
/// コンフィギュレーションデータを集約する構造体
///
#[derive(Debug, Deserialize, Serialize)]
pub(super) struct Config {
    #[serde(skip)]
    config_path: Option<PathBuf>,

    /// グローバルオプションに対する情報
    global: Option<GlobalInfo>,

    /// runサブコマンド用の設定
    run: Option<RunInfo>,

    /// アプリケーション設定(実行中の再読み込み対象)
    app: Option<AppSection>,
}

impl Config {
    ///
    /// グローバル設定のログレベルを更新
    ///
    pub(super) fn set_log_level(&mut self, level: LogLevel) {
        let global = self.ensure_global();
        global.log_level = Some(level);
    }

    ///
    /// グローバル設定のログ出力先を更新
    ///
    pub(super) fn set_log_output(&mut self, path: PathBuf) {
        let global = self.ensure_global();
        global.log_output = Some(path);
    }

    ///
    /// run設定のバインド先アドレスを更新
    ///
    pub(super) fn set_run_bind_addr(&mut self, addr: String) {
        let run = self.ensure_run();
        run.bind_addr = Some(addr);
    }

    ///
    /// run設定のバインド先ポートを更新
    ///
    pub(super) fn set_run_bind_port(&mut self, port: u16) {
        let run = self.ensure_run();
        run.bind_port = Some(port);
    }

    ///
    /// run設定の再読み込み間隔を更新
    ///
    pub(super) fn set_run_refresh_interval(&mut self, secs: u64) {
        let run = self.ensure_run();
        run.refresh_interval = Some(secs);
    }

    ///
    /// ログレベルへのアクセサ
    ///
    /// # 戻り値
    /// ログレベルが設定されている場合は`Some()`で返す。
    ///
    pub(super) fn log_level(&self) -> Option<LogLevel> {
        self.global.as_ref().and_then(|global| global.log_level)
    }

    ///
    /// ログ出力先へのアクセサ
    ///
    /// # 戻り値
    /// ログ出力先が設定されている場合はconfig.tomlの位置を基準に解決したパ
    /// スを`Some()`で返す。
    ///
    pub(super) fn log_output(&self) -> Option<PathBuf> {
        self.global
            .as_ref()
            .and_then(|global| global.log_output.as_ref())
            .map(|path| self.resolve_path(path))
    }

    ///
    /// バインド先アドレスへのアクセサ
    ///
    pub(super) fn run_bind_addr(&self) -> Option<String> {
        self.run.as_ref().and_then(|run| run.bind_addr.clone())
    }

    ///
    /// バインド先ポートへのアクセサ
    ///
    pub(super) fn run_bind_port(&self) -> Option<u16> {
        self.run.as_ref().and_then(|run| run.bind_port)
    }

    ///
    /// 再読み込み間隔(秒)へのアクセサ
    ///
    pub(super) fn run_refresh_interval(&self) -> Option<u64> {
        self.run.as_ref().and_then(|run| run.refresh_interval)
    }

    ///
    /// アプリケーション設定へのアクセサ
    ///
    /// # 戻り値
    /// `[app]`セクションの内容から生成したアプリケーション設定を返す。セク
    /// ションが存在しない場合は全項目未設定の状態を返す。
    ///
    pub(super) fn app_settings(&self) -> AppSettings {
        AppSettings::new(
            self.app.as_ref().and_then(|app| app.message.clone())
        )
    }

    ///
    /// コンフィギュレーション情報の保存
    ///
    /// # 戻り値
    /// 保存に成功した場合は`Ok(())`を返す。失敗した場合はエラー情報を`Err()`で
    /// ラップして返す。
    ///
    pub(super) fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>
    {
        if let Err(err) = std::fs::write(path, &toml::to_string(self)?) {
            Err(anyhow!("write config error: {}", err))
        } else {
            Ok(())
        }
    }

    ///
    /// グローバル設定の初期化または取得
    ///
    fn ensure_global(&mut self) -> &mut GlobalInfo {
        if self.global.is_none() {
            self.global = Some(GlobalInfo {
                log_level: None,
                log_output: None,
            });
        }

        self.global.as_mut().expect("global must be initialized")
    }

    ///
    /// run設定の初期化または取得
    ///
    fn ensure_run(&mut self) -> &mut RunInfo {
        if self.run.is_none() {
            self.run = Some(RunInfo {
                bind_addr: None,
                bind_port: None,
                refresh_interval: None,
            });
        }

        self.run.as_mut().expect("run must be initialized")
    }

    ///
    /// コンフィギュレーションのパスに応じてパスを解決
    ///
    /// # 戻り値
    /// config.tomlが存在するディレクトリを基準に解決したパスを返す。
    ///
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }

        if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                return Self::normalize_path(parent.join(path));
            }
        }

        path.to_path_buf()
    }

    fn normalize_path(path: PathBuf) -> PathBuf {
        let mut result = PathBuf::new();
        let mut segments: Vec<OsString> = Vec::new();
        let mut prefix: Option<std::path::PrefixComponent<'_>> = None;
        let mut has_root = false;

        for component in path.components() {
            match component {
                Component::Prefix(value) => prefix = Some(value),
                Component::RootDir => has_root = true,
                Component::CurDir => {}
                Component::ParentDir => {
                    if segments.pop().is_none() && !has_root {
                        segments.push(OsString::from(".."));
                    }
                }
                Component::Normal(value) => segments.push(value.to_os_string()),
            }
        }

        if let Some(value) = prefix {
            result.push(value.as_os_str());
        }

        if has_root {
            result.push(Path::new("/"));
        }

        for segment in segments {
            result.push(segment);
        }

        result
    }
}

// Defaultトレイトの実装
impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            global: Some(GlobalInfo {
                log_level: Some(LogLevel::Info),
                log_output: Some(default_log_path()),
            }),

            run: Some(RunInfo {
                bind_addr: Some(DEFAULT_BIND_ADDR.to_string()),
                bind_port: Some(DEFAULT_BIND_PORT),
                refresh_interval: Some(DEFAULT_REFRESH_INTERVAL),
            }),

            // app.messageは未設定時のフォールバックを持つので既定では書かない
            app: None,
        }
    }
}

///
/// グローバル設定を格納する構造体
///
#[derive(Debug, Deserialize, Serialize)]
struct GlobalInfo {
    /// ログレベル
    log_level: Option<LogLevel>,

    /// ログの出力先
    log_output: Option<PathBuf>,
}

///
/// runサブコマンドの設定情報
///
#[derive(Debug, Deserialize, Serialize)]
struct RunInfo {
    /// バインド先のアドレス
    bind_addr: Option<String>,

    /// バインド先のポート番号
    bind_port: Option<u16>,

    /// 設定ファイルの再読み込み間隔(秒)
    refresh_interval: Option<u64>,
}

///
/// アプリケーション設定(`app.*`)
///
#[derive(Debug, Deserialize, Serialize)]
struct AppSection {
    /// 姓に付与するメッセージ(`app.message`)
    message: Option<String>,
}

///
/// 文字列からのコンフィギュレーション情報の解析
///
pub(super) fn parse(text: &str) -> Result<Config> {
    Ok(toml::from_str(text)?)
}

///
/// コンフィギュレーション情報の読み込み
///
pub(super) fn load<P>(path: P) -> Result<Config>
where
    P: AsRef<Path>
{
    let path = path.as_ref();
    let mut config = parse(&std::fs::read_to_string(path)?)?;
    config.config_path = Some(path.to_path_buf());
    Ok(config)
}
