use clap::Parser;
use img2dcpu::cli::{handle_config_action, run_convert, show_info, Args, Command};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config_path = args.config.as_deref();

    let result = match args.command {
        Command::Convert(ref convert) => run_convert(convert, config_path),
        Command::Info { ref input } => show_info(input),
        Command::Config { ref action } => handle_config_action(action.clone(), config_path),
    };

    if let Err(e) = result {
        log::debug!("{:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
