use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;

/// Handle the `init` command
///
/// Writes the default configuration (canonical date columns, default column
/// pairs, bucket partition, bar axis) to the standard location or to the
/// path given with `--config`.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let custom = cli.config.as_deref().map(expand_tilde);
    let path = Config::init_all(custom.as_deref(), cli.test)?;

    println!("⚙️  Initializing caseboard…");
    println!("📄 Config file : {}", path.display());

    if cli.test {
        println!("🧪 Test mode: configuration not written");
    } else {
        success(format!("Configuration written to {}", path.display()));
    }
    Ok(())
}
