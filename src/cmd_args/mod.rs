/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! コマンドライン引数を取り扱うモジュール
//!

mod config;
mod logger;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::command::{actor, commands, run, CommandContext};
use crate::live_config::AppSettings;
use config::Config;

/// サーバのデフォルトのバインド先アドレス
pub(crate) const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

/// サーバのデフォルトのバインド先ポート
pub(crate) const DEFAULT_BIND_PORT: u16 = 8080;

/// 設定ファイルのデフォルトの再読み込み間隔(秒)
pub(crate) const DEFAULT_REFRESH_INTERVAL: u64 = 10;

/// デフォルトのコンフィギュレーションパス
static DEFAULT_CONFIG_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    BaseDirs::new()
        .unwrap()
        .config_local_dir()
        .join(env!("CARGO_PKG_NAME"))
        .to_path_buf()
});

/// デフォルトのデータパス
static DEFAULT_DATA_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    BaseDirs::new()
        .unwrap()
        .data_local_dir()
        .join(env!("CARGO_PKG_NAME"))
        .to_path_buf()
});

///
/// デフォルトのコンフィグレーションファイルのパス情報を生成
///
/// # 戻り値
/// コンフィギュレーションファイルのパス情報
///
fn default_config_path() -> PathBuf {
    DEFAULT_CONFIG_PATH.join("config.toml")
}

///
/// デフォルトのログ出力先のパスを生成
///
/// # 戻り値
/// ログ出力先ディレクトリのパス情報
///
fn default_log_path() -> PathBuf {
    DEFAULT_DATA_PATH.join("log")
}

///
/// show_options()実装を要求するトレイト
///
trait ShowOptions {
    ///
    /// オプション設定内容の表示
    ///
    fn show_options(&self);
}

///
/// validate()実装を要求するトレイト
///
trait Validate {
    ///
    /// オプション設定内容の検証
    ///
    fn validate(&mut self) -> Result<()>;
}

///
/// apply_config()実装を要求するトレイト
///
trait ApplyConfig {
    ///
    /// オプション設定へのコンフィギュレーションの反映
    ///
    fn apply_config(&mut self, config: &Config);
}

///
/// ログレベルを指し示す列挙子
///
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum, Deserialize, Serialize)]
#[clap(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "UPPERCASE")]
enum LogLevel {
    /// ログを記録しない
    #[serde(alias = "off", alias = "OFF")]
    #[value(alias = "off")]
    None,

    /// エラー情報以上のレベルを記録
    Error,

    /// 警告情報以上のレベルを記録
    Warn,

    /// 一般情報以上のレベルを記録
    Info,

    /// デバッグ情報以上のレベルを記録
    Debug,

    /// トレース情報以上のレベルを記録
    Trace,
}

// AsRefトレイトの実装
impl AsRef<str> for LogLevel {
    fn as_ref(&self) -> &str {
        match self {
            Self::None => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

///
/// グローバルオプション情報を格納する構造体
///
#[derive(Parser, Debug, Clone)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    about = "設定の再読み込みに対応したアクター情報APIサーバ",
    version,
    long_about = None,
    subcommand_required = false,
    arg_required_else_help = true,
)]
pub struct Options {
    /// config.tomlを使用する場合のパス
    #[arg(short = 'c', long = "config-path")]
    config_path: Option<PathBuf>,

    /// 記録するログレベルの指定
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL",
        ignore_case = true)]
    log_level: Option<LogLevel>,

    /// ログの出力先の指定
    #[arg(short = 'L', long = "log-output", value_name = "PATH")]
    log_output: Option<PathBuf>,

    /// ログを標準エラー出力にも同時出力するか否か
    #[arg(long = "log-tee")]
    log_tee: bool,

    /// 設定情報の表示
    #[arg(long = "show-options")]
    show_options: bool,

    /// 設定情報の保存
    #[arg(long = "save-config")]
    save_config: bool,

    /// 実行するサブコマンド
    #[command(subcommand)]
    command: Option<Command>,
}

impl Options {
    ///
    /// ログレベルへのアクセサ
    ///
    /// # 戻り値
    /// 設定されたログレベルを返す
    fn log_level(&self) -> LogLevel {
        if let Some(level) = self.log_level {
            level
        } else {
            LogLevel::Info
        }
    }

    ///
    /// ログの出力先へのアクセサ
    ///
    /// # 戻り値
    /// ログの出力先として設定されたパス情報を返す。未設定の場合はデフォルトの
    /// パスを返す。
    ///
    fn log_output(&self) -> PathBuf {
        if let Some(path) = &self.log_output {
            path.clone()
        } else {
            default_log_path()
        }
    }

    ///
    /// ログの標準エラー出力同時出力フラグへのアクセサ
    ///
    fn log_tee(&self) -> bool {
        self.log_tee
    }

    ///
    /// コンフィギュレーションファイルのパスへのアクセサ
    ///
    /// # 戻り値
    /// オプションで指定されたパスを返す。未指定の場合はデフォルトのパスを返
    /// す。
    ///
    pub(crate) fn config_path(&self) -> PathBuf {
        if let Some(path) = &self.config_path {
            path.clone()
        } else {
            default_config_path()
        }
    }

    ///
    /// コンフィギュレーションファイルの適用
    ///
    /// # 戻り値
    /// 処理に成功した場合は`Ok(())`を返す。
    ///
    /// # 注記
    /// config.tomlを読み込みオプション情報に反映する。
    ///
    fn apply_config(&mut self) -> Result<()> {
        let path = if let Some(path) = &self.config_path {
            // オプションでコンフィギュレーションファイルのパスが指定されて
            // いる場合、そのパスに何もなければエラー
            if !path.exists() {
                return Err(anyhow!("{} is not exists", path.display()));
            }

            path.clone()

        } else {
            default_config_path()
        };

        // この時点でパスに何も無い場合はそのまま何もせず正常終了
        if !path.exists() {
            return Ok(());
        }

        // 指定されたパスにあるのがファイルでなければエラー
        if !path.is_file() {
            return Err(anyhow!("{} is not file", path.display()));
        }

        match config::load(&path) {
            Ok(config) => {
                if self.log_level.is_none() {
                    if let Some(level) = config.log_level() {
                        self.log_level = Some(level);
                    }
                }

                if self.log_output.is_none() {
                    if let Some(path) = &config.log_output() {
                        self.log_output = Some(path.clone());
                    }
                }

                // コマンド毎のオプション情報へもコンフィギュレーションの内容を
                // 反映する。
                let opts: Option<&mut dyn ApplyConfig> = match
                    &mut self.command
                {
                    Some(Command::Run(opts)) => Some(opts),
                    _ => None,
                };

                if let Some(opts) = opts {
                    opts.apply_config(&config);
                }

                Ok(())
            }

            Err(err) => Err(anyhow!("{}: {}", path.display(), err))
        }
    }

    ///
    /// オプション情報のバリデート
    ///
    /// # 戻り値
    /// オプション情報に矛盾が無い場合は`Ok(())`を返す。
    ///
    fn validate(&mut self) -> Result<()> {
        if self.show_options && self.save_config {
            return Err(anyhow!(
                "--show-options and --save-config can't be specified mutually"
            ));
        }

        if let Some(command) = &mut self.command {
            let opts: Option<&mut dyn Validate> = match command {
                Command::Run(opts) => Some(opts),
                Command::Actor(opts) => Some(opts),
                Command::Commands => None,
                Command::HelpAll => None,
            };

            if let Some(opts) = opts {
                opts.validate()?;
            }
        }

        Ok(())
    }

    ///
    /// オプション設定内容の表示
    ///
    fn show_options(&self) {
        let config_path = if let Some(path) = &self.config_path {
            path.display().to_string()
        } else {
            let path = default_config_path();

            if path.exists() {
                path.display().to_string()
            } else {
                "(none)".to_string()
            }
        };

        println!("global options");
        println!("   config path:      {}", config_path);
        println!("   log level:        {}", self.log_level().as_ref());
        println!("   log output:       {}", self.log_output().display());
        println!("   log tee:          {}", self.log_tee());

        if let Some(command) = &self.command {
            let opts: Option<&dyn ShowOptions> = match command {
                Command::Run(opts) => Some(opts),
                Command::Actor(opts) => Some(opts),
                Command::Commands => None,
                Command::HelpAll => None,
            };

            if let Some(opts) = opts {
                println!("");
                opts.show_options();
            }
        }
    }

    ///
    /// サブコマンドのコマンドコンテキストの生成
    ///
    pub(crate) fn build_context(&self) -> Result<Box<dyn CommandContext>> {
        match &self.command {
            Some(Command::Run(opts)) => run::build_context(self, opts),
            Some(Command::Actor(opts)) => actor::build_context(self, opts),
            Some(Command::Commands) => commands::build_context(self),
            Some(Command::HelpAll) => commands::build_help_all_context(self),
            None => Err(anyhow!("command not specified")),
        }
    }
}

///
/// サブコマンドの定義
///
#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// サーバの起動
    #[command(name = "run", alias = "r")]
    Run(RunOpts),

    /// アクター情報の表示
    #[command(name = "actor", alias = "a")]
    Actor(ActorOpts),

    /// サブコマンド一覧の表示
    #[command(name = "commands")]
    Commands,

    /// 全サブコマンドのヘルプ出力
    #[command(name = "help-all")]
    HelpAll,
}

///
/// サブコマンドrunのオプション
///
#[derive(Clone, Args, Debug)]
pub(crate) struct RunOpts {
    /// 設定ファイルの再読み込み間隔(秒、0で無効)
    #[arg(short = 'i', long = "refresh-interval", value_name = "SECS")]
    refresh_interval: Option<u64>,

    /// サーバのバインド先
    #[arg()]
    bind_addr: Option<String>,

    /// サーバのバインド先ポート
    #[arg(skip)]
    bind_port: Option<u16>,
}

impl RunOpts {
    ///
    /// バインド先のアドレスへのアクセサ
    ///
    pub(crate) fn bind_addr(&self) -> String {
        if let Some(addr) = &self.bind_addr {
            addr.clone()
        } else {
            DEFAULT_BIND_ADDR.to_string()
        }
    }

    ///
    /// バインド先のポート番号へのアクセサ
    ///
    pub(crate) fn bind_port(&self) -> u16 {
        if let Some(port) = self.bind_port {
            port
        } else {
            DEFAULT_BIND_PORT
        }
    }

    ///
    /// 再読み込み間隔へのアクセサ
    ///
    /// # 戻り値
    /// 設定ファイルの再読み込み間隔(秒)を返す。0の場合は定期的な再読み込み
    /// を行わない。
    ///
    pub(crate) fn refresh_interval(&self) -> u64 {
        self.refresh_interval.unwrap_or(DEFAULT_REFRESH_INTERVAL)
    }
}

// Validateトレイトの実装
impl Validate for RunOpts {
    fn validate(&mut self) -> Result<()> {
        if let Some(value) = &self.bind_addr {
            let (addr, port) = parse_bind_value(value)?;

            if let Some(current_port) = self.bind_port {
                if let Some(parsed_port) = port {
                    if current_port != parsed_port {
                        return Err(anyhow!(
                            "bind port is inconsistent: {} vs {}",
                            current_port,
                            parsed_port
                        ));
                    }
                }
            }

            self.bind_addr = Some(addr);
            if self.bind_port.is_none() {
                self.bind_port = port;
            }
        }

        Ok(())
    }
}

// ApplyConfigトレイトの実装
impl ApplyConfig for RunOpts {
    fn apply_config(&mut self, config: &Config) {
        if let Some(value) = &self.bind_addr {
            if self.bind_port.is_none() {
                if let Ok((addr, port)) = parse_bind_value(value) {
                    self.bind_addr = Some(addr);
                    self.bind_port = port;
                }
            }
        } else if let Some(addr) = config.run_bind_addr() {
            self.bind_addr = Some(addr);
        }

        if self.bind_port.is_none() {
            if let Some(port) = config.run_bind_port() {
                self.bind_port = Some(port);
            }
        }

        if self.refresh_interval.is_none() {
            if let Some(secs) = config.run_refresh_interval() {
                self.refresh_interval = Some(secs);
            }
        }
    }
}

// ShowOptionsトレイトの実装
impl ShowOptions for RunOpts {
    fn show_options(&self) {
        println!("run command options");
        println!("   bind:             {}:{}", self.bind_addr(), self.bind_port());
        println!("   refresh interval: {}", self.refresh_interval());
    }
}

///
/// バインド先指定文字列の解析
///
/// # 概要
/// IPv6の`[ADDR]:PORT`形式、`ADDR:PORT`形式、`ADDR`のみの形式を解析し、
/// バインド先のアドレスとポートを返す。
///
/// # 引数
/// * `value` - 解析対象の文字列
///
/// # 戻り値
/// 解析に成功した場合は`(bind_addr, bind_port)`を返す。ポートが指定されて
/// いない場合は`None`を返す。
///
fn parse_bind_value(value: &str) -> Result<(String, Option<u16>)> {
    /*
     * 入力の事前チェック
     */
    if value.is_empty() {
        return Err(anyhow!("bind address is empty"));
    }

    /*
     * IPv6角括弧形式の解析
     */
    if let Some(rest) = value.strip_prefix('[') {
        let close_pos = rest.find(']')
            .ok_or_else(|| anyhow!("invalid bind address: {}", value))?;
        let addr = &rest[..close_pos];
        if addr.is_empty() {
            return Err(anyhow!("bind address is empty"));
        }

        let tail = &rest[close_pos + 1..];
        if tail.is_empty() {
            return Ok((addr.to_string(), None));
        }

        if let Some(port_str) = tail.strip_prefix(':') {
            if port_str.is_empty() {
                return Err(anyhow!("bind port is empty"));
            }

            return Ok((addr.to_string(), Some(port_str.parse()?)));
        }

        return Err(anyhow!("invalid bind address: {}", value));
    }

    /*
     * IPv4/ホスト名形式の解析
     */
    let colon_count = value.matches(':').count();
    if colon_count == 0 {
        return Ok((value.to_string(), None));
    }

    if colon_count == 1 {
        let mut iter = value.splitn(2, ':');
        let addr = iter.next().unwrap_or_default();
        let port_str = iter.next().unwrap_or_default();

        if addr.is_empty() {
            return Err(anyhow!("bind address is empty"));
        }
        if port_str.is_empty() {
            return Err(anyhow!("bind port is empty"));
        }

        return Ok((addr.to_string(), Some(port_str.parse()?)));
    }

    /*
     * IPv6リテラル形式の解析
     */
    Ok((value.to_string(), None))
}

///
/// サブコマンドactorのオプション
///
#[derive(Clone, Args, Debug)]
pub(crate) struct ActorOpts {
    /// 整形して出力する
    #[arg(short = 'p', long = "pretty")]
    pretty: bool,

    /// アクターID
    #[arg()]
    actor_id: String,
}

impl ActorOpts {
    ///
    /// アクターIDへのアクセサ
    ///
    pub(crate) fn actor_id(&self) -> String {
        self.actor_id.clone()
    }

    ///
    /// 整形出力指定へのアクセサ
    ///
    pub(crate) fn is_pretty(&self) -> bool {
        self.pretty
    }
}

// Validateトレイトの実装
impl Validate for ActorOpts {
    fn validate(&mut self) -> Result<()> {
        if self.actor_id.is_empty() {
            return Err(anyhow!("actor id is empty"));
        }

        Ok(())
    }
}

// ShowOptionsトレイトの実装
impl ShowOptions for ActorOpts {
    fn show_options(&self) {
        println!("actor command options");
        println!("   actor_id: {}", self.actor_id);
        println!("   pretty:   {}", self.pretty);
    }
}

///
/// 設定ファイルの内容からアプリケーション設定を取り出す
///
/// # 引数
/// * `text` - 設定ファイルの内容(TOML)
///
/// # 戻り値
/// 解析したアプリケーション設定を返す。
///
pub(crate) fn parse_app_settings(text: &str) -> Result<AppSettings> {
    Ok(config::parse(text)?.app_settings())
}

///
/// コマンドライン引数のパース処理
///
/// # 戻り値
/// オプション情報をまとめたオブジェクトを返す。
///
pub(crate) fn parse() -> Result<Arc<Options>> {
    let mut opts = Options::parse();

    /*
     * デフォルトデータパスの作成
     */
    std::fs::create_dir_all(DEFAULT_DATA_PATH.clone())?;

    /*
     * コンフィギュレーションファイルの適用
     */
    opts.apply_config()?;

    /*
     * 設定情報のバリデーション
     */
    opts.validate()?;

    /*
     * ログ機能の初期化
     */
    logger::init(&opts)?;

    /*
     * 設定情報の表示
     */
    if opts.show_options {
        opts.show_options();
        std::process::exit(0);
    }

    /*
     * 設定の保存
     */
    if opts.save_config {
        save_config(&opts)?;
        std::process::exit(0);
    }

    /*
     * 設定情報の返却
     */
    Ok(Arc::new(opts))
}

///
/// 設定保存が必要であればconfig.tomlへ書き込みを行う
///
/// # 概要
/// 既存の設定ファイルがある場合は読み込み、現在の設定内容で更新した上で保存
/// する。`[app]`セクションは既存の内容をそのまま維持する。
///
/// # 引数
/// * `opts` - コマンドラインとコンフィグ適用後の設定情報
///
/// # 戻り値
/// 保存処理に成功した場合は`Ok(())`を返す。
///
fn save_config(opts: &Options) -> Result<()> {
    let path = opts.config_path();

    /*
     * 既存ファイルの上書き確認
     */
    if path.exists() {
        if !confirm_overwrite(&path)? {
            return Ok(());
        }
    }

    /*
     * 保存先ディレクトリの作成
     */
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    /*
     * 現在の設定内容を反映
     */
    let mut config = if path.exists() {
        config::load(&path)?
    } else {
        Config::default()
    };

    config.set_log_level(opts.log_level());
    config.set_log_output(opts.log_output());

    if let Some(Command::Run(opts)) = &opts.command {
        config.set_run_bind_addr(opts.bind_addr());
        config.set_run_bind_port(opts.bind_port());
        config.set_run_refresh_interval(opts.refresh_interval());
    }

    /*
     * 保存処理の実行
     */
    config.save(&path)?;

    Ok(())
}

///
/// config.tomlの上書き可否を標準入出力で問い合わせる
///
/// # 引数
/// * `path` - 対象となるパス
///
/// # 戻り値
/// 上書きを許可する場合は`true`、拒否された場合は`false`を返す。
///
fn confirm_overwrite(path: &Path) -> Result<bool> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut input = stdin.lock();
    let mut output = stdout.lock();

    confirm_overwrite_with_io(path, &mut input, &mut output)
}

///
/// 任意の入出力を使ってconfig.tomlの上書き可否を問い合わせる
///
/// # 引数
/// * `path` - 対象となるパス
/// * `input` - 入力ストリーム（質問への回答を受け取る）
/// * `output` - 出力ストリーム（質問を表示する）
///
/// # 戻り値
/// 上書きを許可する場合は`true`、拒否された場合は`false`を返す。
///
fn confirm_overwrite_with_io<R, W>(path: &Path, input: &mut R, output: &mut W,)
    -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(
        output,
        "{} は既に存在します。上書きしますか？ [y/N]: ",
        path.display()
    )?;
    output.flush()?;

    let mut buf = String::new();
    input.read_line(&mut buf)?;

    let ans = buf.trim().to_lowercase();
    Ok(ans == "y" || ans == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use clap::Parser;
    use tempfile::TempDir;

    fn run_opts(opts: Options) -> RunOpts {
        match opts.command {
            Some(Command::Run(run_opts)) => run_opts,
            _ => panic!("run options missing"),
        }
    }

    #[test]
    fn parse_run_bind_and_interval() {
        let args = [
            "refreshable-actors", "run", "-i", "3", "127.0.0.1:18080",
        ];

        let mut opts = Options::try_parse_from(args).expect("parse failed");
        opts.validate().expect("validate failed");

        let run_opts = run_opts(opts);
        assert_eq!(run_opts.bind_addr(), "127.0.0.1");
        assert_eq!(run_opts.bind_port(), 18080);
        assert_eq!(run_opts.refresh_interval(), 3);
    }

    #[test]
    fn run_defaults_are_used_without_config() {
        let args = ["refreshable-actors", "run"];

        let mut opts = Options::try_parse_from(args).expect("parse failed");
        opts.validate().expect("validate failed");

        let run_opts = run_opts(opts);
        assert_eq!(run_opts.bind_addr(), DEFAULT_BIND_ADDR);
        assert_eq!(run_opts.bind_port(), DEFAULT_BIND_PORT);
        assert_eq!(run_opts.refresh_interval(), DEFAULT_REFRESH_INTERVAL);
    }

    #[test]
    fn config_values_fill_missing_run_options() {
        let dir = TempDir::new().expect("temp dir");
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[run]\nbind_addr = \"127.0.0.1\"\nbind_port = 9000\n\
             refresh_interval = 2\n",
        ).expect("write config failed");
        let config_arg = config_path.to_string_lossy().to_string();

        let args = ["refreshable-actors", "-c", &config_arg, "run"];
        let mut opts = Options::try_parse_from(args).expect("parse failed");
        opts.apply_config().expect("apply failed");
        opts.validate().expect("validate failed");

        let run_opts = run_opts(opts);
        assert_eq!(run_opts.bind_addr(), "127.0.0.1");
        assert_eq!(run_opts.bind_port(), 9000);
        assert_eq!(run_opts.refresh_interval(), 2);
    }

    #[test]
    fn command_line_overrides_config() {
        let dir = TempDir::new().expect("temp dir");
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "[run]\nbind_port = 9000\nrefresh_interval = 2\n",
        ).expect("write config failed");
        let config_arg = config_path.to_string_lossy().to_string();

        let args = [
            "refreshable-actors", "-c", &config_arg,
            "run", "--refresh-interval", "0", "localhost:7000",
        ];
        let mut opts = Options::try_parse_from(args).expect("parse failed");
        opts.apply_config().expect("apply failed");
        opts.validate().expect("validate failed");

        let run_opts = run_opts(opts);
        assert_eq!(run_opts.bind_addr(), "localhost");
        assert_eq!(run_opts.bind_port(), 7000);
        assert_eq!(run_opts.refresh_interval(), 0);
    }

    #[test]
    fn missing_explicit_config_is_error() {
        let dir = TempDir::new().expect("temp dir");
        let config_arg = dir.path()
            .join("nothing.toml")
            .to_string_lossy()
            .to_string();

        let args = ["refreshable-actors", "-c", &config_arg, "run"];
        let mut opts = Options::try_parse_from(args).expect("parse failed");
        assert!(opts.apply_config().is_err());
    }

    #[test]
    fn show_and_save_are_exclusive() {
        let args = [
            "refreshable-actors", "--show-options", "--save-config", "run",
        ];
        let mut opts = Options::try_parse_from(args).expect("parse failed");
        assert!(opts.validate().is_err());
    }

    #[test]
    fn parse_bind_value_variants() {
        assert_eq!(
            parse_bind_value("[::1]:8081").expect("v6 failed"),
            ("::1".to_string(), Some(8081))
        );
        assert_eq!(
            parse_bind_value("::1").expect("v6 literal failed"),
            ("::1".to_string(), None)
        );
        assert_eq!(
            parse_bind_value("example.com").expect("host failed"),
            ("example.com".to_string(), None)
        );
        assert!(parse_bind_value("").is_err());
        assert!(parse_bind_value("host:").is_err());
        assert!(parse_bind_value("host:port").is_err());
    }

    #[test]
    fn save_config_writes_run_settings() {
        let dir = TempDir::new().expect("temp dir");
        let config_path = dir.path().join("conf").join("config.toml");
        let config_arg = config_path.to_string_lossy().to_string();
        let args = [
            "refreshable-actors",
            "--config-path",
            &config_arg,
            "run",
            "-i",
            "4",
            "127.0.0.1:8123",
        ];

        let mut opts = Options::try_parse_from(args).expect("parse failed");
        opts.validate().expect("validate failed");
        save_config(&opts).expect("save failed");

        let config = config::load(&config_path).expect("load failed");
        assert_eq!(config.run_bind_addr(), Some("127.0.0.1".to_string()));
        assert_eq!(config.run_bind_port(), Some(8123));
        assert_eq!(config.run_refresh_interval(), Some(4));
        assert_eq!(config.app_settings().message(), "Default");
    }

    #[test]
    fn parse_app_settings_reads_message() {
        let settings = parse_app_settings("[app]\nmessage = \"Hello\"\n")
            .expect("parse failed");
        assert_eq!(settings.message(), "Hello");

        let settings = parse_app_settings("").expect("parse failed");
        assert_eq!(settings.message(), "Default");

        assert!(parse_app_settings("[app\n").is_err());
    }

    #[test]
    fn confirm_overwrite_accepts_yes_only() {
        let path = Path::new("config.toml");

        let mut output = Vec::new();
        let mut input = Cursor::new("Yes\n".as_bytes());
        assert!(
            confirm_overwrite_with_io(path, &mut input, &mut output)
                .expect("confirm failed")
        );

        let mut output = Vec::new();
        let mut input = Cursor::new("\n".as_bytes());
        assert!(
            !confirm_overwrite_with_io(path, &mut input, &mut output)
                .expect("confirm failed")
        );
    }
}
