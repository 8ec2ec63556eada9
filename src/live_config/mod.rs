/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! 実行中に再読み込み可能なアプリケーション設定を扱うモジュール
//!

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use log::{debug, info};

use crate::cmd_args::parse_app_settings;

/// `app.message`が未設定の場合に使用するメッセージ
pub(crate) const DEFAULT_APP_MESSAGE: &str = "Default";

/// `app.message`のキー名
pub(crate) const KEY_APP_MESSAGE: &str = "app.message";

///
/// アプリケーション設定のスナップショット
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AppSettings {
    /// 姓に付与するメッセージ
    message: Option<String>,
}

impl AppSettings {
    ///
    /// オブジェクトの生成
    ///
    /// # 引数
    /// * `message` - `app.message`の値(未設定の場合は`None`)
    ///
    pub(crate) fn new(message: Option<String>) -> Self {
        Self { message }
    }

    ///
    /// メッセージへのアクセサ
    ///
    /// # 戻り値
    /// `app.message`の値を返す。未設定の場合は`"Default"`を返す。
    ///
    pub(crate) fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_APP_MESSAGE)
    }

    ///
    /// 変更されたキーの一覧を取得
    ///
    /// # 引数
    /// * `other` - 比較対象の設定
    ///
    /// # 戻り値
    /// 値が異なるキー名の一覧を返す。
    ///
    pub(crate) fn changed_keys(&self, other: &AppSettings) -> Vec<String> {
        let mut keys = Vec::new();

        if self.message != other.message {
            keys.push(KEY_APP_MESSAGE.to_string());
        }

        keys
    }
}

///
/// 設定ファイルの更新判定に用いる情報
///
#[derive(Debug, Clone, PartialEq, Eq)]
enum FileContent {
    /// ファイルが存在しない
    Missing,

    /// ファイルの内容
    Present(String),
}

impl FileContent {
    ///
    /// ファイルの内容の取得
    ///
    /// # 引数
    /// * `path` - 対象ファイルのパス
    ///
    /// # 戻り値
    /// ファイルが存在しない場合は`Missing`を返す。読み込みに失敗した場合は
    /// エラー情報を`Err()`でラップして返す。
    ///
    fn read(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::Present(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::Missing),
            Err(err) => {
                Err(anyhow!("config read failed: {}: {}", path.display(), err))
            }
        }
    }

    ///
    /// アプリケーション設定への変換
    ///
    fn to_settings(&self, path: &Path) -> Result<AppSettings> {
        match self {
            Self::Missing => Ok(AppSettings::default()),
            Self::Present(text) => parse_app_settings(text).map_err(|err| {
                anyhow!("config load failed: {}: {}", path.display(), err)
            }),
        }
    }
}

///
/// ストアが保持する状態
///
struct Snapshot {
    /// 現在有効な設定
    settings: Arc<AppSettings>,

    /// 最後に読み込んだ時点のファイルの内容
    loaded: Option<FileContent>,

    /// 変化を検出したが、まだ読み込んでいないファイルの内容
    pending: Option<FileContent>,
}

///
/// 実行中に差し替え可能な設定ストア
///
/// # 注記
/// 読み出し側はスナップショットの`Arc`を複製するだけで、ロックを保持した
/// まま処理を行うことはない。
///
pub(crate) struct ConfigStore {
    /// 設定ファイルのパス(未指定の場合は既定値のみを提供する)
    path: Option<PathBuf>,

    /// 現在のスナップショット
    snapshot: RwLock<Snapshot>,
}

impl ConfigStore {
    ///
    /// 設定ファイルを読み込んでストアを生成
    ///
    /// # 引数
    /// * `path` - 設定ファイルのパス
    ///
    /// # 戻り値
    /// 生成したストアを返す。ファイルが存在しない場合は全項目未設定の状態で
    /// 生成する。読み込みに失敗した場合はエラー情報を`Err()`でラップして返
    /// す。
    ///
    pub(crate) fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref().to_path_buf();
        let content = FileContent::read(&path)?;
        let settings = content.to_settings(&path)?;

        Ok(Self {
            path: Some(path),
            snapshot: RwLock::new(Snapshot {
                settings: Arc::new(settings),
                loaded: Some(content),
                pending: None,
            }),
        })
    }

    ///
    /// 設定ファイルを伴わないストアの生成
    ///
    /// # 引数
    /// * `settings` - 初期設定
    ///
    #[cfg(test)]
    pub(crate) fn with_settings(settings: AppSettings) -> Self {
        Self {
            path: None,
            snapshot: RwLock::new(Snapshot {
                settings: Arc::new(settings),
                loaded: None,
                pending: None,
            }),
        }
    }

    ///
    /// 現在の設定の取得
    ///
    /// # 戻り値
    /// 現在有効な設定のスナップショットを返す。
    ///
    pub(crate) fn current(&self) -> Result<Arc<AppSettings>> {
        match self.snapshot.read() {
            Ok(snapshot) => Ok(snapshot.settings.clone()),
            Err(_) => Err(anyhow!("config store lock failed")),
        }
    }

    ///
    /// 設定の差し替え
    ///
    /// # 引数
    /// * `settings` - 新しい設定
    ///
    /// # 戻り値
    /// 値が変化したキーの一覧を返す。
    ///
    pub(crate) fn replace(&self, settings: AppSettings) -> Result<Vec<String>> {
        let mut snapshot = self.lock_snapshot()?;
        let keys = snapshot.settings.changed_keys(&settings);
        snapshot.settings = Arc::new(settings);

        if !keys.is_empty() {
            info!(
                "config refreshed: {} (message={:?})",
                keys.join(", "),
                snapshot.settings.message()
            );
        }

        Ok(keys)
    }

    ///
    /// 設定ファイルの再読み込み
    ///
    /// # 戻り値
    /// 値が変化したキーの一覧を返す。読み込みに失敗した場合は現在の設定を維
    /// 持したままエラー情報を`Err()`でラップして返す。
    ///
    pub(crate) fn refresh(&self) -> Result<Vec<String>> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(Vec::new()),
        };

        let content = FileContent::read(path)?;
        let settings = content.to_settings(path)?;
        let keys = self.replace(settings)?;
        self.mark_loaded(content)?;

        Ok(keys)
    }

    ///
    /// 設定ファイルが更新されている場合のみ再読み込み
    ///
    /// # 戻り値
    /// 再読み込みを行った場合は変化したキーの一覧を`Some()`で返す。ファイル
    /// に変化がない場合、または書き込み途中の可能性がある場合は`None`を返す。
    ///
    /// # 注記
    /// 変化を検出したファイルは、次の呼び出しでも同じ内容であった場合にのみ
    /// 読み込む。
    ///
    pub(crate) fn refresh_if_modified(&self) -> Result<Option<Vec<String>>> {
        let path = match &self.path {
            Some(path) => path,
            None => return Ok(None),
        };

        let content = FileContent::read(path)?;

        {
            let mut snapshot = self.lock_snapshot()?;

            if snapshot.loaded.as_ref() == Some(&content) {
                snapshot.pending = None;
                return Ok(None);
            }

            if snapshot.pending.as_ref() != Some(&content) {
                debug!("config file change detected: {}", path.display());
                snapshot.pending = Some(content);
                return Ok(None);
            }
        }

        /*
         * 読み込みに失敗した場合も同じ内容で何度も失敗しないように内容だけは
         * 記録しておく
         */
        let result = content.to_settings(path);
        self.mark_loaded(content)?;

        Ok(Some(self.replace(result?)?))
    }

    ///
    /// 読み込み済みのファイル内容の記録
    ///
    fn mark_loaded(&self, content: FileContent) -> Result<()> {
        let mut snapshot = self.lock_snapshot()?;
        snapshot.loaded = Some(content);
        snapshot.pending = None;
        Ok(())
    }

    ///
    /// スナップショットの書き込みロックの取得
    ///
    fn lock_snapshot(&self) -> Result<RwLockWriteGuard<'_, Snapshot>> {
        match self.snapshot.write() {
            Ok(snapshot) => Ok(snapshot),
            Err(_) => Err(anyhow!("config store lock failed")),
        }
    }
}
