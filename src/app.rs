use std::io::{self, Write};

use game_2048::render::{Renderer, TerminalRenderer};
use game_2048::source::{CommandSource, Keyboard, RandomTiles, Recorder, Script, Sources, TileSource};
use game_2048::{Game, GameSession};
use log::info;
use rand::rngs::OsRng;
use rand::Rng;

use crate::cli::AppConfig;

pub struct GameApp {
    config: AppConfig,
}

impl GameApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let stdin = io::stdin().lock();

        if self.config.testing {
            info!("Reading moves and tiles from standard input");
            return self.launch(Script::new(stdin));
        }

        let seed = self.config.game.seed.unwrap_or_else(|| OsRng.gen());
        info!("Using seed: {}", seed);

        self.launch(Sources {
            commands: Keyboard::new(stdin),
            tiles: RandomTiles::new(seed, self.config.game.four_probability),
        })
    }

    fn launch<I>(&self, input: I) -> anyhow::Result<()>
    where
        I: CommandSource + TileSource,
    {
        if self.config.log {
            self.play(Recorder::new(input, io::stdout()))
        } else {
            self.play(input)
        }
    }

    fn play<I>(&self, input: I) -> anyhow::Result<()>
    where
        I: CommandSource + TileSource,
    {
        let session = GameSession::new(self.config.game.target);
        let mut game = Game::new(session, input);

        for renderer in self.create_renderers() {
            game = game.with_renderer(renderer);
        }

        game.run()?;

        info!("Best score: {}", game.session().max_score());
        Ok(())
    }

    fn create_renderers(&self) -> Vec<Box<dyn Renderer>> {
        let mut renderers: Vec<Box<dyn Renderer>> = Vec::new();

        if self.config.display {
            // the move log owns stdout
            let out: Box<dyn Write> = if self.config.log {
                Box::new(io::stderr())
            } else {
                Box::new(io::stdout())
            };

            renderers.push(Box::new(TerminalRenderer::new(out)));
        }

        renderers
    }
}
