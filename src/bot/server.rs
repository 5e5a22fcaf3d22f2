//! Interactive console transport.
//!
//! Reads one line per action from stdin and prints the rendered view, the
//! same request/response shape a chat platform adapter would drive. All
//! game rules live behind [`GameEngine`]; this loop only parses, routes,
//! and renders.

use anyhow::{Context, Result};
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::bot::commands::{parse_command, BotCommand};
use crate::bot::render;
use crate::bot::session::Session;
use crate::config::Config;
use crate::game::seed_loader::load_game_data;
use crate::game::types::Screen;
use crate::game::{GameEngine, GameStore};
use crate::logutil::escape_log;
use crate::metrics;

pub struct BotServer {
    config: Config,
    engine: GameEngine,
}

impl BotServer {
    /// Open the store, load content tables (with any seed overrides), and
    /// build the engine.
    pub fn new(config: Config) -> Result<Self> {
        let store = GameStore::open(&config.storage.data_dir)
            .with_context(|| format!("opening store at {}", config.storage.data_dir))?;
        let data = load_game_data(config.storage.seeds_dir.as_deref())
            .context("loading content tables")?;
        let engine = GameEngine::new(store, data, config.game.clone())
            .context("building game engine")?;
        Ok(Self { config, engine })
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Run the interactive session until the player quits or stdin closes.
    pub async fn run(&mut self, player: Option<String>) -> Result<()> {
        let player_id = player.unwrap_or_else(|| self.config.bot.default_player.clone());
        let mut session = Session::new(player_id.clone());
        info!("session started for player {}", session.player_id);

        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        let mut stdout = tokio::io::stdout();

        let state = self.engine.load_or_new(&session.player_id);
        let banner = format!(
            "{}\n\n{}\n",
            self.config.bot.welcome_message,
            render::screen_view(session.screen, &state, self.engine.data())
        );
        stdout.write_all(banner.as_bytes()).await?;
        stdout.flush().await?;

        while let Some(line) = lines.next_line().await? {
            session.record_command();
            let output = self.handle_line(&mut session, &line);
            let Some(output) = output else {
                break; // quit
            };
            stdout.write_all(output.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        info!(
            "session for {} ended after {} commands",
            session.player_id, session.commands_handled
        );
        Ok(())
    }

    /// Route one input line. Returns the text to print, or `None` to end
    /// the session.
    fn handle_line(&self, session: &mut Session, line: &str) -> Option<String> {
        let state = self.engine.load_or_new(&session.player_id);
        let command = parse_command(line, &state, self.engine.data());
        debug!(
            "player {} input '{}' -> {:?}",
            session.player_id,
            escape_log(line),
            command
        );

        let data = self.engine.data();
        match command {
            BotCommand::Act(action) => {
                let reply = self.engine.apply(&session.player_id, &action);
                session.screen = Screen::Main;
                if reply.game_over {
                    let mut out = render::main_view(&reply.state, data);
                    out.push_str("\n\nYou are out. Type 'new' to play again.");
                    Some(out)
                } else {
                    Some(render::main_view(&reply.state, data))
                }
            }
            BotCommand::ShowInventory => {
                let state = self.engine.navigate(&session.player_id, session.screen);
                session.screen = Screen::Inventory;
                Some(render::inventory_view(&state, data))
            }
            BotCommand::ShowCharacter => {
                let state = self.engine.navigate(&session.player_id, session.screen);
                session.screen = Screen::Character;
                Some(render::character_view(&state, data))
            }
            BotCommand::ShowCraft => {
                let state = self.engine.navigate(&session.player_id, session.screen);
                session.screen = Screen::Craft;
                Some(render::craft_view(&state, data))
            }
            BotCommand::Back => {
                let (state, screen) = self.engine.navigate_back(&session.player_id);
                session.screen = screen;
                Some(render::screen_view(screen, &state, data))
            }
            BotCommand::Help => Some(render::help_view()),
            BotCommand::NewGame => {
                let state = self.engine.new_game(&session.player_id);
                session.screen = Screen::Main;
                Some(render::main_view(&state, data))
            }
            BotCommand::Quit => None,
            BotCommand::Unknown(input) => Some(format!(
                "Unknown command: '{}'. Type 'help' for the command list.",
                input
            )),
        }
    }

    /// Print a summary of stored games and process counters.
    pub fn show_status(&self) -> Result<()> {
        let ids = self.engine.store().list_player_ids()?;
        println!("{}: {} saved game(s)", self.config.bot.name, ids.len());
        for id in ids {
            match self.engine.store().load(&id) {
                Ok(Some(state)) => println!(
                    "  {} - day {}, hp {}, karma {}",
                    id, state.day, state.hp, state.karma
                ),
                Ok(None) => {}
                Err(e) => println!("  {} - unreadable: {}", id, e),
            }
        }
        let snap = metrics::snapshot();
        println!(
            "actions resolved: {}, saves failed: {}, games completed: {}",
            snap.actions_resolved, snap.saves_failed, snap.games_completed
        );
        Ok(())
    }
}
