mod cli;

use clap::Parser;
use cli::Cli;
use colored::*;
use std::process::ExitCode;

fn main() -> ExitCode {
    // 初始化日志系统
    burp2postman::logger::init_logger();

    let cli = Cli::parse();
    match cli::run(cli) {
        Ok(path) => {
            println!(
                "{} {}",
                "Successfully converted and saved to".green(),
                path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
