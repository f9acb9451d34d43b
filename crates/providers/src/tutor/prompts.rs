// Prompt text and the user-facing apology lines shown when a call fails.

pub fn tutor_system_prompt(topic: &str) -> String {
    format!(
        "You are an expert tutor in {topic}. Provide helpful, accurate, and educational \
         responses to help the user learn {topic}. Include code examples when relevant. \
         Keep your responses concise but informative."
    )
}

pub fn code_review_system_prompt(language: &str) -> String {
    format!(
        "You are an expert coding tutor specializing in {language}. Analyze the provided code, \
         identify potential issues, suggest improvements for best practices, and provide \
         constructive feedback. Be specific and educational in your feedback."
    )
}

pub fn code_review_user_prompt(code: &str, language: &str) -> String {
    format!("Please review this {language} code and provide feedback:\n\n```{language}\n{code}\n```")
}

pub fn tutor_apology(topic: &str) -> String {
    format!(
        "I'm having trouble connecting right now, but I'll try to help with your question \
         about {topic}. Could you please try again or rephrase your question?"
    )
}

pub fn feedback_apology(language: &str) -> String {
    format!(
        "I'm having trouble analyzing your {language} code right now. \
         Please try again in a moment."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_prompt_fences_code_with_language_tag() {
        let p = code_review_user_prompt("print(1)", "python");
        assert!(p.ends_with("```python\nprint(1)\n```"));
        assert!(p.starts_with("Please review this python code"));
    }

    #[test]
    fn apologies_name_the_subject() {
        assert!(tutor_apology("Rust").contains("Rust"));
        assert!(feedback_apology("java").contains("java"));
    }

    #[test]
    fn system_prompts_carry_subject() {
        assert!(tutor_system_prompt("Go").starts_with("You are an expert tutor in Go."));
        assert!(code_review_system_prompt("cpp").contains("specializing in cpp"));
    }
}
