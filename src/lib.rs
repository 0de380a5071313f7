pub mod client;
pub mod config;
pub mod error;
pub mod ingredients;
pub mod model;
pub mod prompt;
pub mod providers;
pub mod session;

pub use client::{ConversationClient, GENERATION_FAILED_MESSAGE};
pub use config::Settings;
pub use error::{GenerationError, InvalidInput};
pub use ingredients::{normalize, IngredientSet};
pub use model::{ConversationHistory, Role, Turn};
pub use prompt::{build_recipe_prompt, Cuisine, Dietary, Preferences, SpiceLevel};
pub use session::{dispatch, Action, Session};

/// Runs the whole suggestion flow once: normalize the ingredient input,
/// build the recipe prompt, and hold one exchange with the model starting
/// from an empty history.
///
/// Returns the recipe text (or the user-facing failure message) together
/// with the conversation history to feed into follow-ups.
pub async fn suggest_recipe(
    client: &ConversationClient,
    selected: &[String],
    free_text: &str,
    prefs: &Preferences,
) -> Result<(String, ConversationHistory), InvalidInput> {
    let ingredients = normalize(selected, free_text)?;
    let prompt = build_recipe_prompt(&ingredients, prefs);
    Ok(client.converse(&prompt, Vec::new()).await)
}

/// Asks a follow-up question against an existing conversation.
pub async fn ask_followup(
    client: &ConversationClient,
    question: &str,
    history: ConversationHistory,
) -> (String, ConversationHistory) {
    client.converse(question, history).await
}
