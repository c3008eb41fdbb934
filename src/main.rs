//! Entry point for the **sv-dashboard** launcher.
//!
//! Prepares the process environment and fonts, loads settings and the tile
//! catalog, then hands the main thread to the GTK front-end.
//!
//! `--print-css [day|dusk|night]` prints the generated style sheet at full
//! scale and exits; it works without a display.

use log::{error, info, warn};
use sv_dashboard::catalog::{catalog_path, IconConfig};
use sv_dashboard::config::{config_path, Config};
use sv_dashboard::fonts::FontRegistry;
use sv_dashboard::launch::DetachedSpawner;
use sv_dashboard::scale::UiScale;
use sv_dashboard::shell::LauncherShell;
use sv_dashboard::theme::{build_css, Scheme};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(pos) = args.iter().position(|a| a == "--print-css") {
        print_css(args.get(pos + 1).map(String::as_str));
        return;
    }

    // Must run before GTK / Pango read anything.
    sv_dashboard::env::bootstrap();
    register_fonts();

    let config = Config::load_or_default(&config_path());
    let catalog = IconConfig::load_or_builtin(&catalog_path());
    let shell = LauncherShell::new(catalog, &config, DetachedSpawner::new());

    start_event_loop(shell, config);
}

fn register_fonts() {
    match FontRegistry::new().register(&sv_dashboard::env::cache_root()) {
        Ok(reg) => info!("icon fonts ready ({} file(s))", reg.fonts.len()),
        Err(e) => warn!("{}; icons may fall back to placeholder boxes", e),
    }
}

fn print_css(scheme: Option<&str>) {
    let scheme = match scheme {
        None => Scheme::Day,
        Some(name) => match serde_json::from_value::<Scheme>(serde_json::Value::String(name.into())) {
            Ok(s) => s,
            Err(_) => {
                error!("unknown scheme {:?} (expected day, dusk or night)", name);
                std::process::exit(2);
            }
        },
    };
    let catalog = IconConfig::load_or_builtin(&catalog_path());
    print!("{}", build_css(scheme, &UiScale::FULL, &catalog.palette));
}

#[cfg(feature = "view-gtk")]
fn start_event_loop(shell: LauncherShell<DetachedSpawner>, config: Config) {
    if let Err(e) = sv_dashboard::ui::gtk::run_main_loop(shell, &config.window) {
        error!("failed to start GTK: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "view-gtk"))]
fn start_event_loop(_shell: LauncherShell<DetachedSpawner>, _config: Config) {
    error!("sv-dashboard needs the `view-gtk` feature to show a window");
    std::process::exit(1);
}
