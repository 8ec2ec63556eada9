/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! 結合テスト用の共通ヘルパー
//!

#![allow(dead_code)]

use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::blocking::Client;

///
/// テスト用の作業ディレクトリ
///
pub struct TestDirs {
    /// ベースディレクトリ
    pub base: PathBuf,

    /// 設定ファイルのパス
    pub config_path: PathBuf,

    /// ログ出力先ディレクトリ
    pub log_dir: PathBuf,
}

impl Drop for TestDirs {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.base);
    }
}

///
/// テスト用ディレクトリを準備する
///
/// # 戻り値
/// 作業ディレクトリ情報
///
pub fn prepare_test_dirs() -> TestDirs {
    let base = Path::new("tests").join("tmp").join(unique_suffix());
    let log_dir = base.join("log");

    fs::create_dir_all(&log_dir).expect("create log dir failed");

    TestDirs {
        config_path: base.join("config.toml"),
        log_dir,
        base,
    }
}

///
/// 一意なサフィックス文字列を生成する
///
/// # 戻り値
/// サフィックス文字列
///
pub fn unique_suffix() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let pid = std::process::id();
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time failed")
        .as_nanos();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", pid, now, seq)
}

///
/// ローカル空きポートを確保する
///
/// # 戻り値
/// ポート番号
///
pub fn reserve_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("bind failed");
    listener.local_addr().expect("addr failed").port()
}

///
/// 設定ファイルを書き出す
///
/// # 引数
/// * `path` - 設定ファイルのパス
/// * `message` - `app.message`の値(`None`の場合は書き出さない)
/// * `refresh_interval` - 再読み込み間隔(秒)
///
pub fn write_config(path: &Path, message: Option<&str>, refresh_interval: u64) {
    let mut body = format!("[run]\nrefresh_interval = {}\n", refresh_interval);

    if let Some(message) = message {
        body.push_str(&format!("\n[app]\nmessage = \"{}\"\n", message));
    }

    fs::write(path, body).expect("write config failed");
}

///
/// サーバの起動を管理するガード
///
pub struct ServerGuard {
    child: Child,
}

impl ServerGuard {
    ///
    /// サーバを起動する
    ///
    /// # 引数
    /// * `port` - 待受ポート
    /// * `dirs` - 作業ディレクトリ
    ///
    /// # 戻り値
    /// ServerGuard
    ///
    pub fn start(port: u16, dirs: &TestDirs) -> Self {
        let child = base_command(dirs)
            .arg("run")
            .arg(format!("127.0.0.1:{}", port))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn server failed");

        Self { child }
    }
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

///
/// CLIを実行して結果を取得する
///
/// # 引数
/// * `dirs` - 作業ディレクトリ
/// * `args` - 追加の引数
///
/// # 戻り値
/// 実行結果
///
pub fn run_cli(dirs: &TestDirs, args: &[&str]) -> Output {
    base_command(dirs)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("run cli failed")
}

///
/// 共通の引数を設定したコマンドを生成する
///
fn base_command(dirs: &TestDirs) -> Command {
    let mut command = Command::new(test_binary_path());
    command
        .env("XDG_CONFIG_HOME", &dirs.base)
        .env("XDG_DATA_HOME", &dirs.base)
        .arg("--config-path")
        .arg(&dirs.config_path)
        .arg("--log-output")
        .arg(&dirs.log_dir);

    command
}

///
/// サーバの起動完了を待機する
///
/// # 引数
/// * `port` - 待受ポート
///
/// # 戻り値
/// APIのベースURL
///
pub fn wait_for_server(port: u16) -> String {
    let base_url = format!("http://127.0.0.1:{}", port);
    let client = build_client();

    for _ in 0..50 {
        let response = client
            .get(format!("{}/actors/ping", base_url))
            .send();

        if let Ok(resp) = response {
            if resp.status().as_u16() == 200 {
                return base_url;
            }
        }

        thread::sleep(Duration::from_millis(100));
    }

    panic!("server did not start");
}

///
/// HTTPクライアントを生成する
///
/// # 戻り値
/// HTTPクライアント
///
pub fn build_client() -> Client {
    Client::builder()
        .timeout(Duration::from_millis(7000))
        .build()
        .expect("client build failed")
}

///
/// テスト実行バイナリを取得する
///
/// # 戻り値
/// 実行バイナリのパス
///
pub fn test_binary_path() -> PathBuf {
    if let Some(exe) = std::env::var_os("CARGO_BIN_EXE_refreshable-actors") {
        return PathBuf::from(exe);
    }

    let mut path = std::env::current_exe().expect("current exe missing");
    path.pop(); // deps
    path.pop(); // debug
    path.push("refreshable-actors");
    if cfg!(windows) {
        path.set_extension("exe");
    }

    if !path.exists() {
        panic!("refreshable-actors binary not found: {}", path.display());
    }

    path
}
