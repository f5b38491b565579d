use chansel_engine::ChannelSelector;
use chansel_engine::config::ConfigLoader;
use chansel_engine::strategy::ProviderProfile;
use chansel_h::{HeadlessSession, LaunchOptions};
use clap::Parser as ClapParser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(author, version, about = "Tune a live-TV player page to a channel", long_about = None)]
struct Args {
    /// Player page to open. Falls back to the preset's URL.
    #[arg(long)]
    url: Option<String>,

    /// Named preset from the config file or the built-in catalog
    #[arg(long, conflicts_with_all = ["strategy", "selector"])]
    preset: Option<String>,

    /// Selection strategy id (tile, guide, none)
    #[arg(long, requires = "selector")]
    strategy: Option<String>,

    /// Channel key handed to the strategy
    #[arg(long)]
    selector: Option<String>,

    /// CSS selector of a follow-up element to click, such as a play button
    #[arg(long)]
    confirm: Option<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Launch a headed browser
    #[arg(long)]
    visible: bool,

    /// Persistent browser profile directory (overrides CHANSEL_USER_DATA_DIR)
    #[arg(long)]
    user_data_dir: Option<PathBuf>,

    /// List the known presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ConfigLoader::load(args.config.as_deref()).await?;
    let mut selector = ChannelSelector::new(config);

    if args.list_presets {
        for preset in selector.presets().list() {
            println!(
                "{}\t{}\t{}",
                preset.name,
                preset.profile.strategy,
                preset.profile.selector.as_deref().unwrap_or("-")
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let (profile, preset_url) = resolve_profile(&args, &selector)?;
    let url = args
        .url
        .clone()
        .or(preset_url)
        .ok_or("no --url given and the preset has none")?;

    let mut options = LaunchOptions::from_env(args.visible);
    if let Some(dir) = &args.user_data_dir {
        options = options.with_user_data_dir(dir);
    }
    let mut session = HeadlessSession::new(options);
    session.launch().await?;

    let outcome = run(&mut session, &mut selector, &url, &profile).await;
    session.close().await?;
    let result = outcome?;

    if args.json {
        println!("{}", serde_json::to_string(&result)?);
    } else {
        println!("{}", result);
    }

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(
    session: &mut HeadlessSession,
    selector: &mut ChannelSelector,
    url: &str,
    profile: &ProviderProfile,
) -> Result<chansel_common::SelectorResult, Box<dyn std::error::Error>> {
    let landed = session.navigate(url).await?;
    tracing::info!("Navigated to {}", landed);

    let mut page = session.page()?;
    Ok(selector.select_channel(&mut page, profile).await)
}

fn resolve_profile(
    args: &Args,
    selector: &ChannelSelector,
) -> Result<(ProviderProfile, Option<String>), Box<dyn std::error::Error>> {
    let (mut profile, url) = match (&args.preset, &args.strategy) {
        (Some(name), _) => {
            let preset = selector
                .presets()
                .get(name)
                .ok_or_else(|| format!("unknown preset: {}", name))?;
            (preset.profile.clone(), preset.url.clone())
        }
        (None, Some(strategy)) => {
            let value = args.selector.clone().unwrap_or_default();
            (ProviderProfile::new(strategy.clone(), value), None)
        }
        (None, None) => (ProviderProfile::default(), None),
    };

    if let Some(confirm) = &args.confirm {
        profile.confirm_selector = Some(confirm.clone());
    }
    Ok((profile, url))
}
