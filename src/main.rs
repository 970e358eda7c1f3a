use cosmic_config::{Config, CosmicConfigEntry};
use navigation_notice::{NoticeConfig, app};
use tracing_subscriber::{EnvFilter, prelude::*};

fn main() -> anyhow::Result<()> {
    color_backtrace::install();
    init_logging();

    let config = load_config();
    tracing::info!("Starting navigation-notice demo v{}", env!("CARGO_PKG_VERSION"));

    app::run(config)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

    let registry = tracing_subscriber::registry().with(filter).with(fmt_layer);

    #[cfg(feature = "systemd")]
    let registry = registry.with(tracing_journald::layer().ok());

    registry.init();
}

fn load_config() -> NoticeConfig {
    let helper = Config::new(navigation_notice_config::ID, NoticeConfig::VERSION).ok();

    helper
        .as_ref()
        .map(|helper| {
            NoticeConfig::get_entry(helper).unwrap_or_else(|(errors, config)| {
                for err in errors {
                    if err.is_err() {
                        tracing::error!("{:?}", err);
                    }
                }
                config
            })
        })
        .unwrap_or_default()
}
