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
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome, BIN_NAME};
use domain::EvaluateCommand;
use ports::inbound::UseCaseRunner;
use usecase::{render_compact, render_pretty, EvaluateOptions};
use wiring::{wire_evaluate, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    /// 実行して標準出力に書く内容を返す（出力は呼び出し側）
    fn execute(&self, cmd: EvaluateCommand) -> Result<Option<String>, Error> {
        match cmd {
            EvaluateCommand::Help => Ok(Some(help_text())),
            EvaluateCommand::ListProfiles => {
                let (names, default) = self.app.use_case.list_profiles()?;
                let lines: Vec<String> = names
                    .iter()
                    .map(|name| {
                        if *name == default {
                            format!("{} (default)", name)
                        } else {
                            name.clone()
                        }
                    })
                    .collect();
                Ok(Some(lines.join("\n")))
            }
            EvaluateCommand::PrintSchema => render_pretty(self.app.use_case.json_schema()).map(Some),
            EvaluateCommand::Evaluate {
                input,
                selection,
                system,
                compact,
            } => {
                let document = self.app.use_case.read_document(&input)?;
                let options = EvaluateOptions { selection, system };
                let evaluation = self.app.use_case.evaluate(&document, &options)?;
                let out = if compact {
                    render_compact(&evaluation)?
                } else {
                    render_pretty(&evaluation)?
                };
                Ok(Some(out))
            }
        }
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config);
        let command_name = cmd_name_for_log(&cmd);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = self.execute(cmd).map(|out| {
            if let Some(out) = out {
                println!("{}", out);
            }
            0
        });

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self
                .app
                .logger
                .log(&LogRecord::new(LogLevel::Error, e.to_string()).layer("cli").kind("error"));
        }
        result
    }
}

fn cmd_name_for_log(cmd: &EvaluateCommand) -> &'static str {
    match cmd {
        EvaluateCommand::Help => "help",
        EvaluateCommand::ListProfiles => "list-profiles",
        EvaluateCommand::PrintSchema => "print-schema",
        EvaluateCommand::Evaluate { .. } => "evaluate",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("{}: {}", BIN_NAME, e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_evaluate()?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: evaluate [options] [FILE]");
}

fn help_text() -> String {
    [
        "Usage: evaluate [options] [FILE]",
        "Options:",
        "  -h, --help                    Show this help message",
        "  -L, --list-profiles           List currently available provider profiles (from profiles.json + built-ins)",
        "  -p, --profile <profile>       Specify provider profile (openai, groq, or a profiles.json entry). Default: profiles.json default, or openai",
        "  -m, --model <model>           Specify model name. Default: profile model, or gpt-4o (openai) / llama3-70b-8192 (groq)",
        "  -S, --system <instruction>    Set a system instruction sent before the document",
        "  --max-attempts <n>            Request again with the validation errors when the response does not match the schema (default: 1)",
        "  --compact                     Print the result as single-line JSON",
        "  --print-schema                Print the response JSON Schema and exit (no request is sent)",
        "  --generate <shell>            Generate shell completion script (bash, zsh, fish, elvish, powershell)",
        "",
        "Arguments:",
        "  FILE    Strategy document to evaluate. Omit or use '-' to read stdin.",
        "",
        "Environment:",
        "  OPENAI_API_KEY     API key for the openai profile",
        "  GROQ_API_KEY       API key for the groq profile",
        "  EVALUATE_HOME      Home directory. Profiles: $EVALUATE_HOME/profiles.json",
        "                     If unset, $XDG_CONFIG_HOME/evaluate (e.g. ~/.config/evaluate) is used.",
        "  EVALUATE_LOG_FILE  JSONL log file. Default: <home>/logs/evaluate.jsonl",
        "",
        "Exit status:",
        "  0 success, 64 usage or environment error, 65 response does not match the schema,",
        "  74 I/O or provider/network error",
        "",
        "Examples:",
        "  evaluate proposal.txt",
        "  cat proposal.txt | evaluate -p groq",
        "  evaluate --max-attempts 3 -S \"You are a strict reviewer.\" proposal.txt",
    ]
    .join("\n")
}
