use crate::config::SYSTEM_PROMPT;
use crate::models::{Message, Role};
use crate::providers::ChatTurn;

/// Build the exact ordered turn list submitted to the model.
///
/// The fixed system turn always comes first. With context enabled the full
/// message log follows in order; otherwise only the most recent turn is
/// included. Each turn carries role and content only.
///
/// Pure: no side effects, deterministic for identical inputs.
pub fn build_request_turns(log: &[Message], context_enabled: bool) -> Vec<ChatTurn> {
    let mut turns = vec![ChatTurn {
        role: Role::System,
        content: SYSTEM_PROMPT.to_string(),
    }];

    if context_enabled {
        turns.extend(log.iter().map(ChatTurn::from));
    } else if let Some(last) = log.last() {
        turns.push(ChatTurn::from(last));
    }

    turns
}
