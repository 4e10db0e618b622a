use anyhow::Context;
use book_catalog::utils::{logger, validation::Validate};
use book_catalog::{render, Action, CatalogError, CatalogSession, CliConfig, TomlConfig};
use clap::Parser;

fn main() {
    let cli = CliConfig::parse();

    let file_config = match load_file_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML");
            std::process::exit(3);
        }
    };
    let config = cli.resolve(file_config.as_ref());

    if cli.log_json {
        logger::init_json_logger(config.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level.as_deref());
    }
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let format = config.output_format;
    let action = Action::from(cli.command);

    let result = CatalogSession::open(config)
        .and_then(|mut session| session.execute(action))
        .and_then(|outcome| render(&outcome, format));

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => fail(&e),
    }
}

fn load_file_config(path: Option<&str>) -> anyhow::Result<Option<TomlConfig>> {
    let Some(path) = path else {
        return Ok(None);
    };

    let config = TomlConfig::from_file(path)
        .with_context(|| format!("failed to load config file '{}'", path))?;
    config
        .validate()
        .with_context(|| format!("invalid settings in '{}'", path))?;
    Ok(Some(config))
}

fn fail(e: &CatalogError) -> ! {
    tracing::error!("{}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
