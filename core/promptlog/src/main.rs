mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use domain::{AppCommand, RunOptions};
use ports::inbound::UseCaseRunner;
use usecase::app::{RunRequest, SyncOutcome};
use usecase::settings::resolve_settings;
use wiring::{wire_base, wire_use_case, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    fn log(&self, record: LogRecord) {
        let _ = self.app.logger.log(&record.layer("cli"));
    }

    /// 設定解決 → 補完と記録 → 結果表示 → 同期
    fn run_completion(&self, opts: &RunOptions) -> Result<i32, Error> {
        let file_config = self.app.config_loader.load()?;
        let settings = resolve_settings(opts, &file_config, self.app.env_resolver.as_ref())?;
        let use_case = wire_use_case(&self.app, &settings)?;

        let request = RunRequest::from_settings(&settings, opts.prompt.clone());
        let outcome = use_case.complete_and_record(&request)?;

        println!("Prompt:       {}", outcome.record.prompt);
        println!("Completions:  {}", outcome.record.completions);

        if let SyncOutcome::Failed(message) = use_case.sync(settings.sync, &settings.commit_message) {
            eprintln!("promptlog: warning: {}", message);
        }
        Ok(0)
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config);
        let command_name = cmd_name_for_log(&cmd);
        self.log(
            LogRecord::new(LogLevel::Info, "command started")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = match cmd {
            AppCommand::Help => {
                print_help();
                Ok(0)
            }
            AppCommand::Run(opts) => self.run_completion(&opts),
        };

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        self.log(
            LogRecord::new(LogLevel::Info, "command finished")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            self.log(LogRecord::new(LogLevel::Error, e.to_string()).kind("error"));
        }
        result
    }
}

fn cmd_name_for_log(cmd: &AppCommand) -> &'static str {
    match cmd {
        AppCommand::Help => "help",
        AppCommand::Run(_) => "run",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("promptlog: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match outcome {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_base(config.verbose);
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: promptlog [options] [prompt...]");
}

fn print_help() {
    println!("Usage: promptlog [options] [prompt...]");
    println!("Options:");
    println!("  -h, --help                  Show this help message");
    println!("  -p, --provider <provider>   Completion provider: openai (default), echo (offline)");
    println!("  -e, --endpoint <url>        Completions endpoint URL");
    println!("      --max-tokens <n>        Maximum number of tokens to generate (default: 3000)");
    println!("  -d, --out-dir <dir>         Output directory (default: current directory)");
    println!("      --layout <layout>       artifacts | log | both (default: both)");
    println!("      --log-format <format>   jsonl (default) | array | concat");
    println!("      --log-file <path>       Record log path (default: pc.jsonl or pc.json in the output directory)");
    println!("      --allocator <kind>      counter (default, locked) | scan (directory entry count + 1)");
    println!("      --sync <mode>           ask (default) | always | never: git add, commit and push afterwards (.promptlog/ is not staged)");
    println!("      --commit-message <msg>  Commit message for --sync");
    println!("      --no-interactive        Never ask for confirmation (ask becomes never)");
    println!("      --trim                  Trim whitespace and trailing '%' from the prompt");
    println!("  -v, --verbose               Mirror structured logs to stderr");
    println!("      --generate <shell>      Generate shell completion script (bash, zsh, fish)");
    println!("  [prompt...]                 Prompt words. When omitted, one line is read from stdin.");
    println!();
    println!("Environment:");
    println!("  OPENAI_API_KEY    API key for the openai provider (name configurable via api_key_env).");
    println!("  PROMPTLOG_HOME    Home directory for config.json and state/logs. Default: $XDG_CONFIG_HOME/promptlog or ~/.config/promptlog.");
    println!();
    println!("Layout (relative to the output directory):");
    println!("  prompt/promptN.txt   raw prompt");
    println!("  pc/pcN.json          \"Prompt: <p>\\n\\nCompletions: <c>\"");
    println!("  compl/complN.json    raw completion");
}
