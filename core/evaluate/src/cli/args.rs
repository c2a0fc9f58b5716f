use crate::domain::{EvaluateCommand, InputSource, ModelSelection};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;

/// コマンド名（補完スクリプト・エラー表示用）
pub const BIN_NAME: &str = "evaluate";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -L / --list-profiles: 現在有効なプロファイル一覧を表示
    pub list_profiles: bool,
    /// --print-schema: 応答スキーマを表示して終了
    pub print_schema: bool,
    /// --compact: 結果を 1 行 JSON で出力
    pub compact: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub system: Option<String>,
    /// --max-attempts: スキーマ不適合時の試行回数上限（1 以上）
    pub max_attempts: Option<u32>,
    /// 文書ファイル。None または "-" は標準入力
    pub input: Option<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new(BIN_NAME)
        .about("Evaluate a strategy document with an LLM and print the structured result as JSON")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("list-profiles")
                .short('L')
                .long("list-profiles")
                .help("List currently available provider profiles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Specify provider profile (openai, groq, or a profiles.json entry)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Specify model name (e.g. gpt-4o, llama3-70b-8192)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("system")
                .short('S')
                .long("system")
                .value_name("instruction")
                .help("Set system instruction for the evaluation request")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("max-attempts")
                .long("max-attempts")
                .value_name("n")
                .help("Maximum requests when the response does not match the schema")
                .value_parser(value_parser!(u32).range(1..))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("compact")
                .long("compact")
                .help("Print the result as single-line JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("print-schema")
                .long("print-schema")
                .help("Print the response JSON Schema and exit")
                .action(ArgAction::SetTrue),
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
            clap::Arg::new("file")
                .index(1)
                .value_name("FILE")
                .help("Strategy document to evaluate (omit or '-' to read stdin)")
                .num_args(1),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        list_profiles: matches.get_flag("list-profiles"),
        print_schema: matches.get_flag("print-schema"),
        compact: matches.get_flag("compact"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        system: matches.get_one::<String>("system").cloned(),
        max_attempts: matches.get_one::<u32>("max-attempts").copied(),
        input: matches.get_one::<String>("file").cloned(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
}

/// Config を EvaluateCommand に変換する
pub fn config_to_command(config: Config) -> EvaluateCommand {
    if config.help {
        return EvaluateCommand::Help;
    }

    if config.list_profiles {
        return EvaluateCommand::ListProfiles;
    }

    if config.print_schema {
        return EvaluateCommand::PrintSchema;
    }

    EvaluateCommand::Evaluate {
        input: InputSource::from_arg(config.input.as_deref()),
        selection: ModelSelection {
            profile: config.profile,
            model: config.model,
            max_attempts: config.max_attempts,
        },
        system: config.system,
        compact: config.compact,
    }
}
