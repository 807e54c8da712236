use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use pinbt::{transcode_file, Operation, PiNbtError};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

/// pi-nbt - 为 Minecraft: Pi Edition 的 level.dat 添加或移除8字节存储头
#[derive(Parser)]
#[command(name = "pi-nbt", author, version, about, long_about = None)]
#[command(override_usage = "pi-nbt <add-header|remove-header> <input-file> <output-file>")]
#[command(arg_required_else_help = true)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// 要执行的操作
    #[arg(value_enum)]
    operation: OperationArg,

    /// 输入文件路径
    #[arg(allow_hyphen_values = true)]
    input: PathBuf,

    /// 输出文件路径（可以与输入相同）
    #[arg(allow_hyphen_values = true)]
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum OperationArg {
    /// 在数据前写入存储头
    AddHeader,
    /// 去掉已有的存储头
    RemoveHeader,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::AddHeader => Operation::AddHeader,
            OperationArg::RemoveHeader => Operation::RemoveHeader,
        }
    }
}

fn main() -> ExitCode {
    // 诊断信息只写入 stderr，stdout 不输出任何内容
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_failure(e),
    };

    let operation = Operation::from(cli.operation);
    tracing::debug!(
        "{}: {} -> {}",
        operation,
        cli.input.display(),
        cli.output.display()
    );

    match transcode_file(operation, &cli.input, &cli.output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_failure(e: clap::Error) -> ExitCode {
    // 只接受三个位置参数，--help 之类的单独参数也按参数错误处理
    match e.kind() {
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            eprint!("{}", e.render());
            ExitCode::FAILURE
        }
        kind => {
            let err = PiNbtError::InvalidArguments(kind.to_string());
            tracing::error!("{}", err);
            eprint!("{}", e.render());
            ExitCode::FAILURE
        }
    }
}
