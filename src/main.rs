//! appbadge - a platform-aware app download page.

mod assets;
mod cli;
mod config;
mod device;
mod i18n;
mod init;
mod locale;
mod logger;
mod page;
mod render;
mod serve;
mod utils;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, SignalArgs};
use config::SiteConfig;
use init::new_site;
use page::{PageController, Signals};
use render::RenderContext;
use serve::serve_site;
use std::{fs, io::Write, path::Path};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Init { .. } => new_site(config),
        Commands::Serve { .. } => serve_site(config),
        Commands::Render {
            route,
            signals,
            loading,
            output,
            ..
        } => render_route(config, route, signals, *loading, output.as_deref()),
        Commands::Classify { signals } => {
            let state = page::PageState::classified(&to_signals(signals));
            println!("platform: {}", state.platform);
            println!("locale: {}", state.locale);
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;

    if cli.is_init() {
        if config.config_path.exists() {
            bail!("Config file already exists. Remove it manually or init in a different path.");
        }
    } else {
        config.validate()?;
    }

    Ok(config)
}

fn to_signals(args: &SignalArgs) -> Signals {
    Signals::new(args.user_agent.as_str(), args.language.as_str())
}

/// Mount one page for the given signals and write its markup.
///
/// Waits out the route's artificial delay unless `loading` asks for the
/// initial state.
fn render_route(
    config: &SiteConfig,
    path: &str,
    signals: &SignalArgs,
    loading: bool,
    output: Option<&Path>,
) -> Result<()> {
    let Some(route) = config.route(path) else {
        bail!("No route configured for `{path}`");
    };
    let translations = config.translations()?;
    let ctx = RenderContext::for_route(route, &translations, &config.stores);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start timer runtime")?;

    let state = if loading {
        PageController::new(ctx.options, runtime.handle().clone()).state()
    } else {
        let mut page = PageController::new(ctx.options, runtime.handle().clone());
        page.mount(&to_signals(signals));
        runtime
            .block_on(page.ready())
            .context("page was torn down before it became ready")?
    };

    let html = ctx.render_page(&state);
    let html = utils::minify::minify_html(html.as_bytes(), config);

    match output {
        Some(path) => {
            fs::write(path, &html).with_context(|| format!("Failed to write {}", path.display()))?;
            log!("render"; "{} → {}", route.path, path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&html)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
