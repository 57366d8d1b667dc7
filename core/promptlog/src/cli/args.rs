use crate::domain::{AllocatorKind, AppCommand, LogFormat, OutputLayout, Prompt, RunOptions, SyncMode};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;
use common::llm::ProviderType;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    /// --no-interactive: 確認プロンプトを出さない（同期 ask は never 扱い）
    pub non_interactive: bool,
    /// --trim: 前後の空白と末尾の % を除く
    pub trim: bool,
    pub provider: Option<ProviderType>,
    pub endpoint: Option<String>,
    pub max_tokens: Option<u32>,
    pub out_dir: Option<PathBuf>,
    pub layout: Option<OutputLayout>,
    pub log_format: Option<LogFormat>,
    pub log_file: Option<PathBuf>,
    pub allocator: Option<AllocatorKind>,
    pub sync: Option<SyncMode>,
    pub commit_message: Option<String>,
    pub prompt_words: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

pub(crate) fn build_clap_command() -> clap::Command {
    clap::Command::new("promptlog")
        .about("Send a prompt to a completion API and record the prompt/completion pair on disk")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Mirror structured logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("no-interactive")
                .long("no-interactive")
                .help("Do not ask for confirmation (sync 'ask' becomes 'never')")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("trim")
                .long("trim")
                .help("Trim surrounding whitespace and trailing '%' from the prompt")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("provider")
                .short('p')
                .long("provider")
                .value_name("provider")
                .help("Completion provider (openai, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("endpoint")
                .short('e')
                .long("endpoint")
                .value_name("url")
                .help("Completions endpoint URL")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("max-tokens")
                .long("max-tokens")
                .value_name("n")
                .help("Maximum number of tokens to generate (default: 3000)")
                .value_parser(value_parser!(u32))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("out-dir")
                .short('d')
                .long("out-dir")
                .value_name("dir")
                .help("Directory that receives prompt/, pc/, compl/ and the record log (default: current directory)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("layout")
                .long("layout")
                .value_name("layout")
                .help("What to write: artifacts, log, both (default: both)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("log-format")
                .long("log-format")
                .value_name("format")
                .help("Record log format: jsonl, array, concat (default: jsonl)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("log-file")
                .long("log-file")
                .value_name("path")
                .help("Record log path, relative to the output directory")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("allocator")
                .long("allocator")
                .value_name("allocator")
                .help("Sequence allocation: counter, scan (default: counter)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("sync")
                .long("sync")
                .value_name("mode")
                .help("Commit and push with git: ask, always, never (default: ask)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("commit-message")
                .long("commit-message")
                .value_name("message")
                .help("Commit message used when syncing")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("positional")
                .index(1)
                .help("Prompt words (read from stdin when omitted)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn parse_opt<T>(matches: &clap::ArgMatches, id: &str) -> Result<Option<T>, Error>
where
    T: std::str::FromStr<Err = Error>,
{
    matches
        .get_one::<String>(id)
        .map(|s| s.parse::<T>())
        .transpose()
}

fn matches_to_config(matches: &clap::ArgMatches) -> Result<Config, Error> {
    Ok(Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        non_interactive: matches.get_flag("no-interactive"),
        trim: matches.get_flag("trim"),
        provider: parse_opt(matches, "provider")?,
        endpoint: matches.get_one::<String>("endpoint").cloned(),
        max_tokens: matches.get_one::<u32>("max-tokens").copied(),
        out_dir: matches.get_one::<PathBuf>("out-dir").cloned(),
        layout: parse_opt(matches, "layout")?,
        log_format: parse_opt(matches, "log-format")?,
        log_file: matches.get_one::<PathBuf>("log-file").cloned(),
        allocator: parse_opt(matches, "allocator")?,
        sync: parse_opt(matches, "sync")?,
        commit_message: matches.get_one::<String>("commit-message").cloned(),
        prompt_words: matches
            .get_many::<String>("positional")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    })
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)?))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    matches_to_config(&matches)
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "promptlog", &mut std::io::stdout());
}

/// Config を AppCommand に変換する
pub fn config_to_command(config: Config) -> AppCommand {
    if config.help {
        return AppCommand::Help;
    }

    AppCommand::Run(RunOptions {
        prompt: Prompt::from_words(&config.prompt_words),
        provider: config.provider,
        endpoint: config.endpoint,
        max_tokens: config.max_tokens,
        out_dir: config.out_dir,
        layout: config.layout,
        log_format: config.log_format,
        log_file: config.log_file,
        allocator: config.allocator,
        sync: config.sync,
        commit_message: config.commit_message,
        trim: config.trim,
        non_interactive: config.non_interactive,
    })
}
