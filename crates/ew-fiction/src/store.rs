//! The store: buy items from the content catalog with gold.

use ew_core::{CoreResult, Scene};
use ew_mechanics::items::add_item;

/// Let the player buy from the catalog until they leave.
pub fn visit_store(scene: &mut Scene<'_>) -> CoreResult<()> {
    let content = scene.content;
    if content.store.is_empty() {
        scene.say("The stalls are bare today.");
        return Ok(());
    }
    let catalog: Vec<(&String, u32)> = content.store.iter().map(|(k, v)| (k, *v)).collect();
    let mut options: Vec<String> = catalog
        .iter()
        .map(|(item, price)| format!("{item} ({price} gold)"))
        .collect();
    options.push("Leave".to_string());
    let options: Vec<&str> = options.iter().map(String::as_str).collect();

    loop {
        scene.say(format!(
            "Welcome to the market! You have {} gold.",
            scene.player.gold
        ));
        match scene.choose(&options)? {
            Some(i) if i < catalog.len() => {
                let (item, price) = catalog[i];
                if scene.player.spend_gold(price) {
                    let name = add_item(scene.player, item);
                    tracing::debug!(item = %name, price, "bought");
                    scene.say(format!("You bought a {name} for {price} gold."));
                } else {
                    scene.say(format!("You can't afford the {item}."));
                }
            }
            Some(_) => {
                scene.say("You leave the market.");
                return Ok(());
            }
            None => scene.say("Invalid choice. Please try again."),
        }
    }
}
