// blazestd - main.rs
//
// BlazeVM launcher entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Banner output for the compiled file (from a path or the environment)

use blazestd::app::vm::{self, BannerInfo};
use blazestd::core::console::Console;
use blazestd::platform::{self, config::PlatformPaths};
use blazestd::util::{self, constants, error};

use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// BlazeVM - launcher for compiled Blaze programs.
///
/// Prints the VM banner for the given compiled file. Without a path, the
/// file name and content are taken from the `bze_name` and `bze_content`
/// environment variables.
#[derive(Parser, Debug)]
#[command(name = "blazevm", version, about)]
struct Cli {
    /// Compiled Blaze file to load.
    path: Option<PathBuf>,

    /// Print the platform name and exit.
    #[arg(long = "platform")]
    platform: bool,

    /// Directory containing config.toml (defaults to the platform config dir).
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_dir);
    let (config, config_warnings) = platform::config::load_config(&config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    tracing::info!(
        version = constants::APP_VERSION,
        vm_version = constants::VM_VERSION,
        platform = platform::os::platform(),
        max_input_string_len = config.max_input_string_len,
        debug = cli.debug,
        "BlazeVM starting"
    );

    let mut console = Console::stdio(config.max_input_string_len);
    let code = match run(&cli, &mut console) {
        Ok(()) => constants::EXIT_SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "BlazeVM failed");
            console.error(&format!("Error: {e}"))
        }
    };
    std::process::exit(code);
}

fn run<R: BufRead, W: Write, E: Write>(
    cli: &Cli,
    console: &mut Console<R, W, E>,
) -> error::Result<()> {
    if cli.platform {
        console.println("%s", &[platform::os::platform().into()])?;
        return Ok(());
    }

    let info = match cli.path {
        Some(ref path) => {
            tracing::debug!(path = %path.display(), "Loading compiled file");
            BannerInfo::from_file(path)?
        }
        None => BannerInfo::from_env()?,
    };

    vm::render_banner(console.output(), &info)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn test_console() -> Console<Cursor<&'static str>, Vec<u8>, Vec<u8>> {
        Console::new(Cursor::new(""), Vec::new(), Vec::new(), 8)
    }

    #[test]
    fn test_platform_flag_prints_name() {
        let cli = Cli::parse_from(["blazevm", "--platform"]);
        let mut console = test_console();
        run(&cli, &mut console).unwrap();
        let (_, out, _) = console.into_parts();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", platform::os::platform()));
    }

    #[test]
    fn test_path_argument_renders_banner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.bze");
        std::fs::write(&path, "HALT").unwrap();

        let cli = Cli::parse_from([std::ffi::OsStr::new("blazevm"), path.as_os_str()]);
        let mut console = test_console();
        run(&cli, &mut console).unwrap();
        let (_, out, _) = console.into_parts();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(constants::VM_BANNER_TITLE));
        assert!(text.ends_with("Content: HALT\n"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bze");
        let cli = Cli::parse_from([std::ffi::OsStr::new("blazevm"), path.as_os_str()]);
        let mut console = test_console();
        let err = run(&cli, &mut console).unwrap_err();
        assert!(matches!(err, error::BlazeError::Vm(_)));
    }
}
