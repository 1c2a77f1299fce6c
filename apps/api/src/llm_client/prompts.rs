// Shared prompt fragments. Each service that calls the backend keeps its own
// prompts.rs alongside it; only cross-cutting text lives here.

/// Appended to every system instruction that expects schema-shaped JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Provide the output ONLY in a valid JSON format \
    that matches the provided schema. Do not include any markdown formatting like ```json.";

/// Wraps free user text between separators so it reads as data, not instructions.
pub fn fenced_user_text(text: &str) -> String {
    format!("---\n\n{}\n\n---", text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_user_text_trims() {
        assert_eq!(fenced_user_text("  hi \n"), "---\n\nhi\n\n---");
    }
}
