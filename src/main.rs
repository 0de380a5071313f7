use std::fmt::Display;
use std::io::{self, Write};
use std::str::FromStr;

use bawarchi::{dispatch, Action, ConversationClient, GenerationError, Preferences, Session, Settings};

/// Common pantry staples offered as a quick pick before the free-text field.
const COMMON_INGREDIENTS: &[&str] = &[
    "chicken",
    "beef",
    "lamb",
    "fish",
    "lentils",
    "chickpeas",
    "potatoes",
    "onions",
    "tomatoes",
    "garlic",
    "ginger",
    "yogurt",
    "rice",
    "flour",
    "ghee",
    "green chilies",
    "coriander",
    "mint",
    "lemon",
];

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        // EOF behaves like an empty answer
        return Ok(String::new());
    }
    Ok(line.trim_end().to_string())
}

/// Numbered pick over the common-ingredient list, e.g. "1, 4, 9".
fn pick_common_ingredients() -> io::Result<Vec<String>> {
    println!("Common ingredients:");
    for (i, name) in COMMON_INGREDIENTS.iter().enumerate() {
        println!("  {:2}. {}", i + 1, name);
    }
    let answer = read_line("Pick by number (comma-separated, blank for none): ")?;

    let mut selected = Vec::new();
    for piece in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match piece.parse::<usize>() {
            Ok(n) if (1..=COMMON_INGREDIENTS.len()).contains(&n) => {
                selected.push(COMMON_INGREDIENTS[n - 1].to_string());
            }
            _ => println!("Ignoring {piece:?} (not a listed number)"),
        }
    }
    Ok(selected)
}

/// Reads one preference field, falling back to its default on empty input.
fn read_preference<T>(label: &str, choices: &str) -> io::Result<T>
where
    T: FromStr<Err = String> + Default + Display,
{
    loop {
        let answer = read_line(&format!("{label} [{choices}] (default {}): ", T::default()))?;
        if answer.trim().is_empty() {
            return Ok(T::default());
        }
        match answer.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(e) => println!("{e}"),
        }
    }
}

fn read_preferences() -> io::Result<Preferences> {
    let dietary = read_preference("Dietary preference", "Any/Halal/Vegetarian/Vegan")?;
    let cuisine = read_preference(
        "Cuisine type",
        "Any/Pakistani/Indian/Middle Eastern/Fusion",
    )?;
    let spice = read_preference("Spice level", "Mild/Medium/Hot/Extra Hot")?;
    Ok(Preferences {
        dietary,
        cuisine,
        spice,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = Settings::load().map_err(GenerationError::Config)?;
    let client = ConversationClient::new(&settings);
    if !client.is_configured() {
        eprintln!(
            "FATAL: Google Gemini API key is not configured. \
             Set GOOGLE_API_KEY or add api_key to config.toml."
        );
        std::process::exit(1);
    }

    println!("bawarchi - your AI chef. Tell me what's in the kitchen and I'll suggest a recipe.");
    println!();

    let mut session = Session::new();
    loop {
        if !session.has_recipe() {
            let selected = pick_common_ingredients()?;
            let free_text = read_line("Extra ingredients (comma-separated, blank for none): ")?;
            if selected.is_empty() && free_text.trim().is_empty() {
                println!("Please provide at least one ingredient.");
                continue;
            }
            let prefs = read_preferences()?;

            println!("\nYour AI chef is thinking...\n");
            let action = Action::Generate {
                selected,
                free_text,
                prefs,
            };
            match dispatch(&session, action, &client).await {
                Ok(next) => {
                    session = next;
                    println!("{}\n", session.recipe);
                }
                Err(warning) => println!("{warning}\n"),
            }
        } else {
            let line =
                read_line("Ask a follow-up question ('new' to start over, 'quit' to exit): ")?;
            match line.trim() {
                "" => continue,
                "quit" | "exit" => break,
                "new" => {
                    session = dispatch(&session, Action::Reset, &client)
                        .await
                        .unwrap_or_default();
                    println!();
                }
                question => {
                    let before = session.recipe.len();
                    let action = Action::FollowUp {
                        question: question.to_string(),
                    };
                    match dispatch(&session, action, &client).await {
                        Ok(next) => {
                            session = next;
                            // Only print what this exchange appended
                            println!("{}\n", &session.recipe[before..]);
                        }
                        Err(warning) => println!("{warning}\n"),
                    }
                }
            }
        }
    }

    Ok(())
}
