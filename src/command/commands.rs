/*
 * Actor resource server with refreshable configuration
 *
 *  Copyright (C) 2025 Hiroshi KUWAGATA <kgt9221@gmail.com>
 */

//!
//! サブコマンド"commands"および"help-all"の実装
//!

use anyhow::Result;
use clap::CommandFactory;

use crate::cmd_args::Options;
use super::CommandContext;

///
/// サブコマンド一覧の要素
///
struct CommandEntry {
    /// ルートからのコマンドパス(例: "run")
    path: String,

    /// コマンドの説明
    description: String,

    /// clapのコマンド定義
    command: clap::Command,
}

///
/// 出力形式
///
#[derive(Clone, Copy, Debug, PartialEq)]
enum ListStyle {
    /// 名前と説明の一覧
    Summary,

    /// 全コマンドのロングヘルプ
    LongHelp,
}

///
/// "commands"/"help-all"サブコマンドのコンテキスト情報をパックした構造体
///
struct CommandsCommandContext {
    style: ListStyle,
}

impl CommandsCommandContext {
    ///
    /// 一覧の出力
    ///
    fn print(&self) {
        let root = Options::command();

        match self.style {
            ListStyle::Summary => {
                for entry in collect_commands(&root, false) {
                    println!("{:<16} {}", entry.path, entry.description);
                }
            }

            ListStyle::LongHelp => {
                for mut entry in collect_commands(&root, true) {
                    println!("\n----------------------------------------------");
                    println!("{}\n", entry.path);
                    let help = entry.command.render_long_help().to_string();
                    for line in help.lines() {
                        println!("  {}", line);
                    }
                }
            }
        }
    }
}

// CommandContextの実装
impl CommandContext for CommandsCommandContext {
    fn exec(&self) -> Result<()> {
        self.print();
        Ok(())
    }
}

///
/// コマンド定義の収集
///
/// # 引数
/// * `root` - ルートのコマンド定義
/// * `include_root` - ルート自身を結果に含めるか否か
///
/// # 戻り値
/// 深さ優先順に並べたコマンド一覧を返す。
///
fn collect_commands(root: &clap::Command, include_root: bool)
    -> Vec<CommandEntry>
{
    let mut entries = Vec::new();

    if include_root {
        entries.push(CommandEntry {
            path: root.get_name().to_string(),
            description: describe(root),
            command: root.clone(),
        });
    }

    collect_subcommands(root, "", &mut entries);
    entries
}

fn collect_subcommands(
    cmd: &clap::Command,
    prefix: &str,
    entries: &mut Vec<CommandEntry>,
) {
    for sub in cmd.get_subcommands() {
        let path = if prefix.is_empty() {
            sub.get_name().to_string()
        } else {
            format!("{} {}", prefix, sub.get_name())
        };

        entries.push(CommandEntry {
            path: path.clone(),
            description: describe(sub),
            command: sub.clone(),
        });
        collect_subcommands(sub, &path, entries);
    }
}

fn describe(cmd: &clap::Command) -> String {
    cmd.get_long_about()
        .or(cmd.get_about())
        .map(|value| value.to_string())
        .unwrap_or_default()
}

///
/// "commands"のコマンドコンテキストの生成
///
pub(crate) fn build_context(
    _opts: &Options,
) -> Result<Box<dyn CommandContext>> {
    Ok(Box::new(CommandsCommandContext { style: ListStyle::Summary }))
}

///
/// "help-all"のコマンドコンテキストの生成
///
pub(crate) fn build_help_all_context(
    _opts: &Options,
) -> Result<Box<dyn CommandContext>> {
    Ok(Box::new(CommandsCommandContext { style: ListStyle::LongHelp }))
}
