// Centralized terminal strings and labels. ASCII-friendly by default.

// User messages: '|' prefix
pub const PREFIX_USER: &str = "| ";
// Assistant messages: '>' prefix
pub const PREFIX_ASSISTANT: &str = "> ";

pub const PROMPT: &str = "you> ";

pub const HELP: &str = "Commands: /topic <name> switch subject, /clear forget the conversation, \
/help this text, /quit leave. Ctrl-C cancels a pending answer.";

pub fn welcome(topic: &str) -> String {
    format!("Code tutor ready. Topic: {}. Type a question, or /help.", topic)
}

pub fn topic_changed(topic: &str) -> String {
    format!("[info] topic set to '{}', conversation cleared", topic)
}

pub const CLEARED: &str = "[info] conversation cleared";

pub const THINKING: &str = "[thinking... Ctrl-C to cancel]";

pub fn unknown_command(cmd: &str) -> String {
    format!("[info] unknown command '/{}', try /help", cmd)
}

pub fn review_header(path: &str, language: &str) -> String {
    format!("Reviewing {} as {}", path, language)
}
