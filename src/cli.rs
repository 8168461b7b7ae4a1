use std::path::PathBuf;

use game_2048::GameConfig;
use structopt::clap::Shell;
use structopt::StructOpt;
use structopt_flags::QuietVerbose;

fn load_config(s: &str) -> Result<GameConfig, String> {
    GameConfig::load(&PathBuf::from(s)).map_err(|e| e.to_string())
}

#[derive(Debug)]
pub struct AppConfig {
    pub game: GameConfig,
    /// Echo every command and tile to stdout in script format.
    pub log: bool,
    /// Read commands and tiles from stdin.
    pub testing: bool,
    pub display: bool,
}

#[derive(Debug, StructOpt)]
#[structopt(name = "2048", about = "Play 2048 in the terminal")]
pub struct Opt {
    #[structopt(flatten)]
    pub verbose: QuietVerbose,

    #[structopt(parse(try_from_str = load_config), long, help = "JSON game configuration")]
    config: Option<GameConfig>,

    #[structopt(long, help = "Random seed for new tiles")]
    seed: Option<u64>,

    #[structopt(long, help = "Record moves and random tiles on stdout")]
    log: bool,

    #[structopt(long, help = "Take random tiles and moves from standard input")]
    testing: bool,

    #[structopt(long, help = "Do not draw the board")]
    no_display: bool,

    #[structopt(long, possible_values = &Shell::variants(), case_insensitive = true, help = "Generate shell completions and exit")]
    pub completions: Option<Shell>,
}

impl Opt {
    pub fn to_app_config(self) -> AppConfig {
        let mut game = self.config.unwrap_or_default();

        if self.seed.is_some() {
            game.seed = self.seed;
        }

        AppConfig {
            game,
            log: self.log,
            testing: self.testing,
            display: !self.no_display,
        }
    }
}
