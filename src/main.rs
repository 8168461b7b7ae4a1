mod app;
mod cli;

use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use structopt::StructOpt;
use structopt_flags::LogLevel;

use app::GameApp;
use cli::Opt;

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();

    if let Some(shell) = opt.completions {
        Opt::clap().gen_completions_to("game-2048", shell, &mut std::io::stdout());
        return Ok(());
    }

    // stdout carries the board and the move log
    TermLogger::init(
        opt.verbose.get_level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    GameApp::new(opt.to_app_config()).run()
}
