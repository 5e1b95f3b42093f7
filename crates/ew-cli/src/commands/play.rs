use std::path::{Path, PathBuf};

use colored::Colorize;

use ew_campaign::{Campaign, CampaignConfig, CampaignEnd};

use crate::terminal::TerminalPresenter;

pub fn run(
    content: Option<&Path>,
    seed: Option<u64>,
    save: PathBuf,
    name: Option<String>,
) -> Result<(), String> {
    let content = super::load_content(content)?;
    let seed = seed.unwrap_or_else(rand::random);
    let mut config = CampaignConfig::default().with_seed(seed).with_save_path(save);
    if let Some(name) = name {
        config = config.with_player_name(name);
    }
    tracing::info!(seed, "starting campaign");

    let mut campaign =
        Campaign::new(&content, config).map_err(|e| format!("failed to start campaign: {e}"))?;
    let mut presenter = TerminalPresenter::stdio();
    let end = campaign.play(&mut presenter).map_err(|e| e.to_string())?;

    if end == CampaignEnd::Defeated {
        println!("  {}", "Your journey ends here.".red().bold());
    }
    Ok(())
}
