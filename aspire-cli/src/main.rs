//! Aspire CLI - command line front end for the Aspire parser.
//! Aspire CLI - Aspire 解析器的命令行界面。

mod commands;
mod output;

use aspire_parser::{Grammar, ParseOptions, Rule};
use clap::{Parser, Subcommand};
use commands::Context;

/// Main CLI structure.
/// 主 CLI 结构体。
#[derive(Parser)]
#[command(name = "aspire")]
#[command(author, version, about = "Aspire - parse and diagnose Aspire programs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output. / 启用详细输出。
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress output. / 抑制输出。
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Maximum nesting depth of values and blocks. / 值与代码块的最大嵌套深度。
    #[arg(long, global = true, default_value_t = ParseOptions::DEFAULT_MAX_NESTING)]
    max_nesting: usize,
}

/// Available CLI commands.
/// 可用的 CLI 命令。
#[derive(Subcommand)]
enum Commands {
    /// Check that a file is a valid program. / 检查文件是否为合法程序。
    Check {
        /// The file to check. / 要检查的文件。
        file: String,
    },

    /// Parse input and print the syntax tree. / 解析输入并打印语法树。
    Parse {
        /// A file, or the text itself with `--inline`. / 文件，或配合 `--inline` 的文本本身。
        input: String,

        /// Rule to parse the input as. / 用于解析输入的规则。
        #[arg(short, long, default_value = "program")]
        rule: Rule,

        /// Treat the input argument as source text. / 将输入参数视为源码文本。
        #[arg(short, long)]
        inline: bool,

        /// Print the tree as JSON. / 以 JSON 格式打印语法树。
        #[arg(long)]
        json: bool,
    },

    /// Show the failure tree of a parse and the cause it reports. / 显示失败原因树及其报告的原因。
    Explain {
        /// A file, or the text itself with `--inline`. / 文件，或配合 `--inline` 的文本本身。
        input: String,

        /// Rule to parse the input as. / 用于解析输入的规则。
        #[arg(short, long, default_value = "program")]
        rule: Rule,

        /// Treat the input argument as source text. / 将输入参数视为源码文本。
        #[arg(short, long)]
        inline: bool,

        /// Maximum number of tree lines to print. / 打印的最大行数。
        #[arg(long, default_value_t = 200)]
        max_lines: usize,
    },

    /// Start an interactive REPL. / 启动交互式 REPL。
    Repl {
        /// Rule each line is parsed as. / 每行使用的解析规则。
        #[arg(short, long, default_value = "value")]
        rule: Rule,
    },
}

/// Main entry point.
/// 主入口点。
fn main() {
    let cli = Cli::parse();
    output::init_logger(cli.verbose, cli.quiet);

    let ctx = Context {
        grammar: Grammar::new(ParseOptions {
            max_nesting: cli.max_nesting,
        }),
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Check { file } => commands::check::run(&file, &ctx),
        Commands::Parse {
            input,
            rule,
            inline,
            json,
        } => commands::parse::run(&input, rule, inline, json, &ctx),
        Commands::Explain {
            input,
            rule,
            inline,
            max_lines,
        } => commands::explain::run(&input, rule, inline, max_lines, &ctx),
        Commands::Repl { rule } => commands::repl::run(rule, &ctx),
    };

    if let Err(e) = result {
        if !cli.quiet {
            output::error(&e);
        }
        std::process::exit(1);
    }
}
