use anyhow::Result;
use langref::Config;

fn main() -> Result<()> {
    let config = Config::parse();
    langref::logging::init_tracing(config.verbose, config.quiet)?;

    langref::run(&config)
}
