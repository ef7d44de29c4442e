// src/commands/mod.rs

pub mod admin;
pub mod reports;
pub mod submit;

use crate::config::Config;
use crate::error::BotError;
use crate::state::AppState;

const WELCOME_TEXT: &str = "Welcome! Use /help to learn how to use this bot.";

const HELP_TEXT: &str = "\
Welcome to the SAT Test Bot! Here are the available commands:

/addtest <code> <part> <answer_key> - Add a new test part (math or english).
/viewtest <code> <part> - View the answer key for a specific test part.
/removetest <code> - Remove a test (both parts) from the database.
/studentscores <name> - View scores for a specific student.
/updatetest <code> <part> <new_answer_key> - Update the answer key for a test part.
/rankings <test_code> - View rankings for a specific test.
/progress <student_name> - View progress for a specific student.
/deletesubmission <student_name> <test_code> <part> - Delete a student's submission for a specific test part.
Submit answers: <test_code>_<part>*<answers> - Submit your answers for a test part.

Example for Math: math01_math*2,6,3/2,7,3.14
Example for English: math01_english*a,b,c,d,a,b,c,d";

/// Transport-neutral entry point: one inbound chat message in, at most one
/// text reply out. Slash commands are dispatched by name; any other text
/// containing `*` is treated as an answer submission; everything else is
/// ignored. All errors are converted to reply text here, so callers never
/// see a `BotError`.
pub async fn handle_message(state: &AppState, sender: &str, text: &str) -> Option<String> {
    let text = text.trim();

    let result = if text.starts_with('/') {
        dispatch_command(state, sender, text).await
    } else if text.contains('*') {
        submit::handle_submission(&state.pool, sender, text).await.map(Some)
    } else {
        Ok(None)
    };

    match result {
        Ok(reply) => reply,
        Err(err) => Some(err.reply_text()),
    }
}

/// Routes a slash command to its handler. Admin-only commands are gated
/// here, before the handler runs, mirroring middleware-style authorization
/// at the routing layer. Unknown commands get no reply.
async fn dispatch_command(
    state: &AppState,
    sender: &str,
    text: &str,
) -> Result<Option<String>, BotError> {
    let (command, args) = match text.split_once(' ') {
        Some((command, args)) => (command, args.trim()),
        None => (text, ""),
    };

    let pool = &state.pool;
    let reply = match command {
        "/start" => WELCOME_TEXT.to_string(),
        "/help" => HELP_TEXT.to_string(),
        "/addtest" => {
            require_admin(&state.config, sender)?;
            admin::add_test(pool, args).await?
        }
        "/viewtest" => reports::view_test(pool, args).await?,
        "/removetest" => {
            require_admin(&state.config, sender)?;
            admin::remove_test(pool, args).await?
        }
        "/updatetest" => {
            require_admin(&state.config, sender)?;
            admin::update_test(pool, args).await?
        }
        "/studentscores" => {
            require_admin(&state.config, sender)?;
            reports::student_scores(pool, args).await?
        }
        "/rankings" => reports::rankings(pool, args).await?,
        "/progress" => reports::progress(pool, args).await?,
        "/deletesubmission" => {
            require_admin(&state.config, sender)?;
            admin::delete_submission(pool, args).await?
        }
        _ => return Ok(None),
    };

    Ok(Some(reply))
}

fn require_admin(config: &Config, sender: &str) -> Result<(), BotError> {
    if config.is_admin(sender) {
        Ok(())
    } else {
        Err(BotError::Unauthorized)
    }
}
