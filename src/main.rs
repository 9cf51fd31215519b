//! Command-line entry point.
//!
//! ```text
//! keycap-renderer app <bundle> <badge> <selected:0|1> <output>
//! keycap-renderer control <role> <label> <output>
//! ```
//!
//! Exit status: 0 on success, 1 on a malformed invocation, 2 when an app key
//! has no obtainable icon.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use keycap_renderer::{
    Backend, DefaultsReader, ExitStatus, RenderRequest, Renderer, RendererConfig, Role, SipsRasterizer,
};

#[derive(Debug, Parser)]
#[command(name = "keycap-renderer")]
#[command(about = "Render 72x72 keypad button images", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render an application's icon with optional decorations
    App {
        /// Application bundle (e.g. /Applications/Safari.app)
        bundle: PathBuf,
        /// Badge text; empty for none
        #[arg(allow_hyphen_values = true)]
        badge: String,
        /// "1" draws the selection ring
        selected: String,
        /// Output PNG path
        output: PathBuf,
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<String>,
    },
    /// Render a control key for a symbolic role
    Control {
        /// Role name (home, page_prev, page_next, move_left, move_right, mode_back, refresh, idle, ...)
        role: String,
        /// Label text; empty for the role's default
        #[arg(allow_hyphen_values = true)]
        label: String,
        /// Output PNG path
        output: PathBuf,
        #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
        extra: Vec<String>,
    },
}

impl From<Commands> for RenderRequest {
    fn from(command: Commands) -> Self {
        match command {
            Commands::App {
                bundle,
                badge,
                selected,
                output,
                ..
            } => RenderRequest::App {
                bundle,
                badge,
                selected: selected == "1",
                output,
            },
            Commands::Control {
                role,
                label,
                output,
                ..
            } => RenderRequest::Control {
                role: Role::from(role.as_str()),
                label,
                output,
            },
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitStatus::Failure.into()
            } else {
                // --help / --version
                ExitCode::SUCCESS
            };
        }
    };

    let config = RendererConfig::from_env();
    let backend = Backend::probe(&config);
    let renderer = Renderer::new(config, DefaultsReader, SipsRasterizer, backend);

    let request: RenderRequest = cli.command.into();
    renderer.run(&request).into()
}
