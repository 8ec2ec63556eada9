/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! サブコマンドactorの実装
//!

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::cmd_args::{ActorOpts, Options};
use crate::live_config::ConfigStore;
use refreshable_actors::Actor;
use super::CommandContext;

///
/// actorサブコマンドのコンテキスト情報をパックした構造体
///
struct ActorCommandContext {
    /// 設定ファイルへのパス
    config_path: PathBuf,

    /// アクターID
    actor_id: String,

    /// 整形出力の有無
    pretty: bool,
}

impl ActorCommandContext {
    ///
    /// オブジェクトの生成
    ///
    fn new(opts: &Options, sub_opts: &ActorOpts) -> Self {
        Self {
            config_path: opts.config_path(),
            actor_id: sub_opts.actor_id(),
            pretty: sub_opts.is_pretty(),
        }
    }

    ///
    /// アクター情報の書き出し
    ///
    /// # 引数
    /// * `store` - 設定ストア
    /// * `output` - 出力先
    ///
    fn write_to<W>(&self, store: &ConfigStore, output: &mut W) -> Result<()>
    where
        W: Write,
    {
        let settings = store.current()?;
        let actor = Actor::build(&self.actor_id, settings.message());

        let json = if self.pretty {
            serde_json::to_string_pretty(&actor)?
        } else {
            serde_json::to_string(&actor)?
        };

        writeln!(output, "{}", json)?;
        Ok(())
    }
}

// トレイトCommandContextの実装
impl CommandContext for ActorCommandContext {
    fn exec(&self) -> Result<()> {
        let store = ConfigStore::open(&self.config_path)?;
        let stdout = io::stdout();
        let mut output = stdout.lock();

        self.write_to(&store, &mut output)
    }
}

///
/// コマンドコンテキストの生成
///
pub(crate) fn build_context(opts: &Options, sub_opts: &ActorOpts)
    -> Result<Box<dyn CommandContext>>
{
    Ok(Box::new(ActorCommandContext::new(opts, sub_opts)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live_config::AppSettings;

    fn context(actor_id: &str, pretty: bool) -> ActorCommandContext {
        ActorCommandContext {
            config_path: PathBuf::from("unused.toml"),
            actor_id: actor_id.to_string(),
            pretty,
        }
    }

    #[test]
    fn writes_compact_json_line() {
        let store = ConfigStore::with_settings(
            AppSettings::new(Some("Hello".to_string()))
        );
        let mut output = Vec::new();

        context("42", false)
            .write_to(&store, &mut output)
            .expect("write failed");

        assert_eq!(
            String::from_utf8(output).expect("utf8"),
            "{\"actorId\":\"42\",\"firstName\":\"First42\",\
             \"lastName\":\"Last42. Hello\"}\n"
        );
    }

    #[test]
    fn pretty_output_is_indented() {
        let store = ConfigStore::with_settings(AppSettings::default());
        let mut output = Vec::new();

        context("1", true)
            .write_to(&store, &mut output)
            .expect("write failed");

        let text = String::from_utf8(output).expect("utf8");
        assert!(text.contains("\n  \"lastName\": \"Last1. Default\""));
    }
}
