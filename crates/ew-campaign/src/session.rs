//! The campaign loop.
//!
//! `Campaign` owns the player, the live world graph, and the random source.
//! Each line of input is corrected against the tokens valid right now and
//! then executed as one command: travel (with its arrival event), a look at
//! status or inventory, a sub-area or boss visit, item use, or save/quit.

use rand::SeedableRng;
use rand::rngs::StdRng;

use ew_core::{CoreError, GameContent, Player, Presenter, Scene};
use ew_fiction::parser::{Command, Direction, KEYWORDS, is_affirmative, resolve};
use ew_fiction::{
    Outcome, SubAreaKind, Travel, WorldGraph, challenge_boss, dispatch, enter_sub_area,
    standard_world,
};
use ew_mechanics::items::{UseContext, describe, use_item};

use crate::config::CampaignConfig;
use crate::error::CampaignResult;
use crate::persistence::SaveStore;

/// Name used when the player gives none.
pub const DEFAULT_NAME: &str = "Adventurer";

/// How a campaign ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignEnd {
    /// The player chose to leave.
    Quit,
    /// The player fell with no way back.
    Defeated,
    /// Input ran out.
    InputClosed,
}

/// A running campaign.
pub struct Campaign<'c> {
    content: &'c GameContent,
    world: WorldGraph,
    player: Player,
    current_room: String,
    saves: SaveStore,
    rng: StdRng,
    named: bool,
}

impl<'c> Campaign<'c> {
    /// A new campaign in the standard world.
    pub fn new(content: &'c GameContent, config: CampaignConfig) -> CampaignResult<Self> {
        Ok(Self::with_world(content, standard_world()?, config))
    }

    /// A new campaign in a custom world.
    pub fn with_world(content: &'c GameContent, world: WorldGraph, config: CampaignConfig) -> Self {
        let named = config.player_name.is_some();
        let name = config
            .player_name
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        Self {
            content,
            player: Player::new(name, content.starting_health, content.starting_gold),
            current_room: world.start().to_string(),
            world,
            saves: SaveStore::new(config.save_path),
            rng: StdRng::seed_from_u64(config.seed),
            named,
        }
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Id of the current room.
    pub fn current_room(&self) -> &str {
        &self.current_room
    }

    /// The live world graph.
    pub fn world(&self) -> &WorldGraph {
        &self.world
    }

    /// Start, then play until the campaign ends.
    pub fn play(&mut self, presenter: &mut dyn Presenter) -> CampaignResult<CampaignEnd> {
        match self.begin(presenter) {
            Ok(()) => self.run(presenter),
            Err(e) if e.is_input_closed() => Ok(CampaignEnd::InputClosed),
            Err(e) => Err(e),
        }
    }

    /// Offer to resume a save, otherwise greet a new player.
    pub fn begin(&mut self, presenter: &mut dyn Presenter) -> CampaignResult<()> {
        presenter.render(&["Welcome to Emberwake!".to_string()]);
        if self.saves.exists() {
            let answer = ask(presenter, "A saved game was found. Load it? (y/n) ")?;
            if is_affirmative(&answer) {
                if self.load() {
                    presenter.render(&[format!("Welcome back, {}!", self.player.name)]);
                    return self.describe_room(presenter);
                }
                presenter
                    .render(&["The save could not be loaded. Starting a new game.".to_string()]);
            }
        }
        if !self.named {
            let name = ask(presenter, "Enter your name: ")?;
            if !name.is_empty() {
                self.player.name = name;
            }
        }
        presenter.render(&[format!(
            "Hello, {}! Your adventure begins now.",
            self.player.name
        )]);
        self.describe_room(presenter)
    }

    /// Read and execute commands until the campaign ends.
    pub fn run(&mut self, presenter: &mut dyn Presenter) -> CampaignResult<CampaignEnd> {
        loop {
            presenter.render_sidebar(&self.player);
            let Some(input) = presenter.prompt("What would you like to do? ") else {
                return Ok(CampaignEnd::InputClosed);
            };
            match self.handle(presenter, &input) {
                Ok(Some(end)) => {
                    tracing::info!(?end, room = %self.current_room, "campaign over");
                    return Ok(end);
                }
                Ok(None) => {}
                Err(e) if e.is_input_closed() => return Ok(CampaignEnd::InputClosed),
                Err(e) => return Err(e),
            }
        }
    }

    /// Correct and execute one line of input.
    ///
    /// Returns `Some` when the campaign is over.
    pub fn handle(
        &mut self,
        presenter: &mut dyn Presenter,
        input: &str,
    ) -> CampaignResult<Option<CampaignEnd>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        let input = Direction::parse(input)
            .map_or_else(|| input.to_string(), |d| d.name().to_string());
        let valid = self.valid_tokens();
        let token = {
            let mut scene = Scene::new(&mut self.player, self.content, presenter, &mut self.rng);
            resolve(&mut scene, &input, &valid)?
        };
        let Some(token) = token else {
            return Ok(None);
        };
        let command = Command::from_token(&token);
        tracing::debug!(?command, room = %self.current_room, "command");
        self.execute(presenter, command)
    }

    fn valid_tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = Direction::ALL.iter().map(|d| d.name().to_string()).collect();
        tokens.extend(KEYWORDS.iter().map(|k| k.to_string()));
        tokens.extend(self.player.inventory.iter().map(|s| s.name.clone()));
        tokens
    }

    fn execute(
        &mut self,
        presenter: &mut dyn Presenter,
        command: Command,
    ) -> CampaignResult<Option<CampaignEnd>> {
        let outcome = match command {
            Command::Move(direction) => self.travel(presenter, direction)?,
            Command::Status => {
                presenter.render(&self.player.status_lines());
                Outcome::Continue
            }
            Command::Inventory => {
                presenter.render(&self.player.inventory_lines());
                Outcome::Continue
            }
            Command::Explore => self.explore(presenter)?,
            Command::Boss => self.boss(presenter)?,
            Command::Map => {
                let lines = self.world.map_lines(&self.current_room)?;
                presenter.render(&lines);
                Outcome::Continue
            }
            Command::Save => {
                self.save_and_report(presenter);
                Outcome::Continue
            }
            Command::Quit => return self.quit(presenter).map(Some),
            Command::Help => {
                presenter.render(&self.help_lines());
                Outcome::Continue
            }
            Command::Use(item) => {
                let result = use_item(&mut self.player, &item, None, UseContext::Exploration);
                presenter.render(&result.lines);
                Outcome::Continue
            }
        };
        Ok(match outcome {
            Outcome::Continue => None,
            Outcome::Defeated => Some(CampaignEnd::Defeated),
        })
    }

    fn travel(
        &mut self,
        presenter: &mut dyn Presenter,
        direction: Direction,
    ) -> CampaignResult<Outcome> {
        match self
            .world
            .travel(&self.current_room, direction, &mut self.player)?
        {
            Travel::Moved { to, unlocked } => {
                if unlocked.is_some() {
                    presenter.render(&[format!("The way {direction} lies open now.")]);
                }
                self.current_room = to;
                self.describe_room(presenter)?;
                let events = self.world.room(&self.current_room)?.unique_events.clone();
                let mut scene =
                    Scene::new(&mut self.player, self.content, presenter, &mut self.rng);
                let outcome = dispatch(&mut scene, &events)?;
                scene.pause();
                Ok(outcome)
            }
            Travel::Blocked(message) => {
                presenter.render(&[message]);
                Ok(Outcome::Continue)
            }
            Travel::NoExit => {
                presenter.render(&["You can't go that way.".to_string()]);
                Ok(Outcome::Continue)
            }
        }
    }

    fn describe_room(&self, presenter: &mut dyn Presenter) -> CampaignResult<()> {
        let room = self.world.room(&self.current_room)?;
        let exits: Vec<&str> = self
            .world
            .directions_from(&self.current_room)
            .into_iter()
            .map(Direction::name)
            .collect();
        presenter.render(&[
            format!("== {} ==", room.name),
            room.description.clone(),
            format!("Exits: {}", exits.join(", ")),
        ]);
        Ok(())
    }

    fn explore(&mut self, presenter: &mut dyn Presenter) -> CampaignResult<Outcome> {
        let room = self.world.room(&self.current_room)?.clone();
        if room.sub_areas.is_empty() {
            presenter.render(&["There is nothing here to explore.".to_string()]);
            return Ok(Outcome::Continue);
        }
        let mut listing = vec!["Places to explore:".to_string()];
        listing.extend(
            room.sub_areas
                .iter()
                .enumerate()
                .map(|(i, a)| format!("  {}. {}", i + 1, a.name)),
        );

        let mut scene = Scene::new(&mut self.player, self.content, presenter, &mut self.rng);
        scene.tell(&listing);
        let answer = scene.ask("Where would you like to go? (name or number, blank to stay) ")?;
        if answer.is_empty() {
            return Ok(Outcome::Continue);
        }
        let area = match answer.parse::<usize>() {
            Ok(n) if (1..=room.sub_areas.len()).contains(&n) => Some(room.sub_areas[n - 1].clone()),
            _ => {
                let names: Vec<&str> = room.sub_areas.iter().map(|a| a.name.as_str()).collect();
                resolve(&mut scene, &answer, &names)?.and_then(|name| room.sub_area(&name).cloned())
            }
        };
        match area {
            Some(area) => Ok(enter_sub_area(&mut scene, &room, &area)?),
            None => Ok(Outcome::Continue),
        }
    }

    fn boss(&mut self, presenter: &mut dyn Presenter) -> CampaignResult<Outcome> {
        let room = self.world.room(&self.current_room)?.clone();
        let has_lair = room.sub_areas.iter().any(|a| a.kind == SubAreaKind::Lair);
        if room.boss.is_none() || !has_lair {
            presenter.render(&["There is no boss here.".to_string()]);
            return Ok(Outcome::Continue);
        }
        let mut scene = Scene::new(&mut self.player, self.content, presenter, &mut self.rng);
        Ok(challenge_boss(&mut scene, &room)?)
    }

    /// Write the save slot.
    pub fn save(&self) -> CampaignResult<()> {
        self.saves.save(&self.player, &self.current_room)
    }

    /// Replace the current state with the save slot's. Returns whether a
    /// usable save was found.
    pub fn load(&mut self) -> bool {
        match self.saves.load(&mut self.world) {
            Some(snapshot) => {
                self.player = snapshot.player;
                self.current_room = snapshot.current_room;
                true
            }
            None => false,
        }
    }

    fn save_and_report(&self, presenter: &mut dyn Presenter) {
        let line = match self.save() {
            Ok(()) => "Game saved.".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                format!("Could not save the game: {e}")
            }
        };
        presenter.render(&[line]);
    }

    fn quit(&mut self, presenter: &mut dyn Presenter) -> CampaignResult<CampaignEnd> {
        let answer = ask(presenter, "Save before quitting? (y/n) ")?;
        if is_affirmative(&answer) {
            self.save_and_report(presenter);
        }
        presenter.render(&["Thank you for playing!".to_string()]);
        Ok(CampaignEnd::Quit)
    }

    fn help_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = [
            "Commands:",
            "  north, south, east, west, up, down (or 'go <direction>'): travel",
            "  status: show health, level, and gold",
            "  inventory: list what you carry",
            "  explore: visit a place in this area",
            "  boss: challenge the boss of this area",
            "  map: show the exits from here",
            "  save: save your progress",
            "  quit: leave the game",
            "  <item> (or 'use <item>'): use an item",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        if !self.player.inventory.is_empty() {
            lines.push("Your items:".to_string());
            for stack in &self.player.inventory {
                let text = self
                    .content
                    .describe_item(&stack.name)
                    .map(str::to_string)
                    .or_else(|| describe(&stack.name))
                    .unwrap_or_else(|| "No description.".to_string());
                lines.push(format!("  {stack}: {text}"));
            }
        }
        lines
    }
}

fn ask(presenter: &mut dyn Presenter, message: &str) -> CampaignResult<String> {
    presenter
        .prompt(message)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| CoreError::InputClosed.into())
}
