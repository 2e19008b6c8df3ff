use labsh::config::Config;
use labsh::error::ShellError;
use labsh::flags::{version_line, Flags};
use labsh::shell::Shell;
use std::{env, process};

const EXIT_FATAL: i32 = 1;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        process::exit(EXIT_FATAL);
    }
}

fn run() -> Result<(), ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("{}", version_line());
        return Ok(());
    }

    let config = Config::from_flags(&flags);
    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    let mut shell = Shell::new(config)?;
    shell.run()
}
