/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! ログ機能の初期化を行うモジュール
//!

use std::sync::OnceLock;

use anyhow::Result;
use flexi_logger::{
    detailed_format, Cleanup, Criterion, Duplicate, FileSpec, Logger,
    LoggerHandle, Naming,
};

use super::{LogLevel, Options};

/// ログファイルをローテートするサイズ(1MiB)
const LOG_ROTATE_SIZE: u64 = 1024 * 1024;

/// 保持するローテート済みログファイルの数
const LOG_KEEP_FILES: usize = 5;

/// ロガーのハンドル(プロセス終了まで保持する)
static LOGGER_HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

///
/// ログ機能の初期化
///
/// # 引数
/// * `opts` - オプション情報
///
/// # 戻り値
/// 初期化に成功した場合は`Ok(())`を返す。
///
/// # 注記
/// ログレベルに`NONE`が指定されている場合はロガーを登録しない。
///
pub(super) fn init(opts: &Options) -> Result<()> {
    let level = opts.log_level();
    if level == LogLevel::None {
        return Ok(());
    }

    /*
     * 出力先ディレクトリの作成
     */
    let dir = opts.log_output();
    std::fs::create_dir_all(&dir)?;

    /*
     * ロガーの起動
     */
    let duplicate = if opts.log_tee() {
        Duplicate::All
    } else {
        Duplicate::None
    };

    let spec = FileSpec::default()
        .directory(dir)
        .basename(env!("CARGO_PKG_NAME"))
        .suppress_timestamp();

    let handle = Logger::try_with_str(level.as_ref())?
        .log_to_file(spec)
        .format_for_files(detailed_format)
        .duplicate_to_stderr(duplicate)
        .append()
        .rotate(
            Criterion::Size(LOG_ROTATE_SIZE),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_KEEP_FILES),
        )
        .start()?;

    let _ = LOGGER_HANDLE.set(handle);

    Ok(())
}
