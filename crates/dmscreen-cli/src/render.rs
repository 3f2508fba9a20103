//! Plain-text rendering of session snapshots.

use std::fmt::Write as _;

use dmscreen_core::character::Character;
use dmscreen_core::message::Message;
use dmscreen_rules::domain::ability::modifier_row;
use dmscreen_rules::domain::dice::DiceRollResult;
use dmscreen_session::domain::state::SessionState;

/// One log entry, e.g. `[10:00] Thorin: I draw my axe.`
#[must_use]
pub fn message_line(state: &SessionState, message: &Message) -> String {
    let at = message.timestamp.format("%H:%M");
    match state.author_of(message) {
        Some(author) => format!("[{at}] {author}: {}", message.content),
        None => format!("[{at}] * {}", message.content),
    }
}

/// The whole adventure log, oldest first.
#[must_use]
pub fn log(state: &SessionState) -> String {
    if state.messages.is_empty() {
        return "The adventure log is empty.".to_owned();
    }
    state
        .messages
        .iter()
        .map(|message| message_line(state, message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A character card.
#[must_use]
pub fn character_card(character: &Character) -> String {
    let mut card = format!(
        "{} ({}, level {})\n  HP {}/{}  AC {}\n ",
        character.name,
        character.summary(),
        character.level,
        character.current_hp,
        character.max_hp,
        character.armor_class,
    );
    for (label, modifier) in modifier_row(&character.abilities) {
        let _ = write!(card, " {label} {modifier}");
    }
    if !character.personality_traits.is_empty() {
        let _ = write!(card, "\n  Traits: {}", character.personality_traits.join(", "));
    }
    if !character.background.is_empty() {
        let _ = write!(card, "\n  Background: {}", character.background);
    }
    if !character.inventory.is_empty() {
        let _ = write!(card, "\n  Inventory: {}", character.inventory.join(", "));
    }
    card
}

/// The party in roster order.
#[must_use]
pub fn party(state: &SessionState) -> String {
    match &state.campaign {
        None => "No campaign is loaded.".to_owned(),
        Some(campaign) => {
            let mut listing = format!("{} (campaign {})", campaign.name, campaign.id);
            if !campaign.description.is_empty() {
                let _ = write!(listing, "\n{}", campaign.description);
            }
            for character in state.party.values() {
                let _ = write!(listing, "\n\n{}", character_card(character));
            }
            listing
        }
    }
}

/// A roll outcome, e.g. `3d6+2 = 13  Rolls: [4, 6, 1] +2`.
#[must_use]
pub fn roll(result: &DiceRollResult) -> String {
    format!("{} = {}  {}", result.spec, result.final_total, result.details())
}

/// Numbered suggestions, or a note that there are none.
#[must_use]
pub fn suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return "No suggestions available.".to_owned();
    }
    suggestions
        .iter()
        .enumerate()
        .map(|(i, suggestion)| format!("  {}. {suggestion}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dmscreen_core::character::CharacterId;
    use dmscreen_core::dice::{DiceKind, DiceRollSpec, RemoteRoll};
    use dmscreen_core::message::{MessageId, MessageRecord};
    use dmscreen_session::application::loader::SessionLoader;
    use dmscreen_session::domain::store::SessionStore;
    use dmscreen_test_support::{ScriptedCampaignService, character, fixed_now, sample_campaign};

    use super::*;

    async fn loaded_state() -> SessionState {
        let store = Arc::new(SessionStore::new());
        let loader = SessionLoader::new(
            store,
            Arc::new(ScriptedCampaignService::new().with_history(vec![
                MessageRecord::dm("You reach the gate.", fixed_now()),
                MessageRecord::player(CharacterId(2), "I knock.", fixed_now()),
            ])),
        );
        loader.bootstrap(sample_campaign()).await.unwrap()
    }

    #[tokio::test]
    async fn test_log_lines_name_authors() {
        let state = loaded_state().await;

        assert_eq!(
            log(&state),
            "[10:00] Dungeon Master: You reach the gate.\n[10:00] Lyra: I knock."
        );
    }

    #[tokio::test]
    async fn test_system_and_unknown_authors() {
        let state = loaded_state().await;
        let notice =
            MessageRecord::system("Rest complete.", fixed_now()).into_message(MessageId(90));
        let stranger = MessageRecord::player(CharacterId(50), "Psst.", fixed_now())
            .into_message(MessageId(91));

        assert_eq!(message_line(&state, &notice), "[10:00] * Rest complete.");
        assert_eq!(message_line(&state, &stranger), "[10:00] Unknown: Psst.");
    }

    #[test]
    fn test_character_card() {
        let mut thorin = character(1, "Thorin");
        thorin.abilities.strength = 16;
        thorin.abilities.dexterity = 9;

        let card = character_card(&thorin);

        assert!(card.starts_with("Thorin (Human Fighter, level 1)\n  HP 10/10  AC 14"));
        assert!(card.contains("STR +3 DEX -1 CON +0 INT +0 WIS +0 CHA +0"));
        assert!(card.contains("Traits: Brave"));
        assert!(card.contains("Inventory: Longsword"));
    }

    #[tokio::test]
    async fn test_party_listing() {
        let state = loaded_state().await;

        let listing = party(&state);

        assert!(listing.starts_with("The Lost Mines (campaign 1)"));
        let thorin = listing.find("Thorin").unwrap();
        let lyra = listing.find("Lyra").unwrap();
        assert!(thorin < lyra);
        assert_eq!(
            party(&SessionStore::new().current()),
            "No campaign is loaded."
        );
    }

    #[test]
    fn test_roll_line() {
        let result = DiceRollResult::from_remote(
            DiceRollSpec::new(DiceKind::D6, 3, 2),
            RemoteRoll {
                rolls: vec![4, 6, 1],
                modifier: 2,
                final_total: 13,
            },
        )
        .unwrap();

        assert_eq!(roll(&result), "3d6+2 = 13  Rolls: [4, 6, 1] +2");
    }

    #[test]
    fn test_suggestions() {
        assert_eq!(suggestions(&[]), "No suggestions available.");
        assert_eq!(
            suggestions(&["An ambush".to_owned(), "A storm".to_owned()]),
            "  1. An ambush\n  2. A storm"
        );
    }
}
