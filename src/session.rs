use crate::client::ConversationClient;
use crate::error::InvalidInput;
use crate::ingredients::normalize;
use crate::model::ConversationHistory;
use crate::prompt::{build_recipe_prompt, Preferences};

/// One interactive session's state: the accumulated recipe document, the
/// conversation history behind it, and the busy flag the front end uses to
/// block a second click while an action is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Accumulated Markdown: the latest recipe plus appended follow-up Q&A.
    pub recipe: String,
    pub history: ConversationHistory,
    pub busy: bool,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn has_recipe(&self) -> bool {
        !self.recipe.is_empty()
    }
}

/// A user-triggered action on a session.
#[derive(Debug, Clone)]
pub enum Action {
    /// Build a fresh recipe from ingredients and preferences.
    Generate {
        selected: Vec<String>,
        free_text: String,
        prefs: Preferences,
    },
    /// Ask a question about the current recipe.
    FollowUp { question: String },
    /// Discard the recipe and history and start over.
    Reset,
}

/// Applies one action and produces the next session record.
///
/// The input session is left untouched; callers replace their copy with the
/// returned one. `Err(InvalidInput)` is the only failure and means the
/// action was not attempted, so the caller keeps the old session and shows
/// a warning. Generation failures never surface here; the conversation
/// client folds them into the returned text.
pub async fn dispatch(
    session: &Session,
    action: Action,
    client: &ConversationClient,
) -> Result<Session, InvalidInput> {
    match action {
        Action::Generate {
            selected,
            free_text,
            prefs,
        } => {
            let ingredients = normalize(&selected, &free_text)?;
            let prompt = build_recipe_prompt(&ingredients, &prefs);
            let (text, history) = client.converse(&prompt, session.history.clone()).await;
            Ok(Session {
                recipe: text,
                history,
                busy: false,
            })
        }
        Action::FollowUp { question } => {
            let question = question.trim();
            // An empty question means the control never fired; nothing to send
            if question.is_empty() {
                return Ok(session.clone());
            }
            let (answer, history) = client.converse(question, session.history.clone()).await;
            let mut recipe = session.recipe.clone();
            recipe.push_str(&format!(
                "\n\n---\n\n**Your Question:** {question}\n\n**Chef's Answer:** {answer}"
            ));
            Ok(Session {
                recipe,
                history,
                busy: false,
            })
        }
        Action::Reset => Ok(Session::default()),
    }
}
