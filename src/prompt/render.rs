use crate::error::PromptError;
use crate::prompt::templates::PromptKind;

/// Fill `${name}` placeholders of a built-in prompt.
///
/// Every occurrence of each supplied variable is replaced. Placeholders with
/// no supplied value are left as they are. The result is trimmed.
pub fn get_prompt(key: &str, variables: &[(&str, &str)]) -> Result<String, PromptError> {
    let kind = PromptKind::from_key(key)?;
    Ok(render(kind, variables))
}

pub fn render(kind: PromptKind, variables: &[(&str, &str)]) -> String {
    let mut prompt = kind.template().to_string();

    for (name, value) in variables {
        let placeholder = format!("${{{name}}}");
        prompt = prompt.replace(&placeholder, value);
    }

    prompt.trim().to_string()
}

/// Escape triple backticks so user content cannot close a fenced block.
pub fn escape_code_blocks(text: &str) -> String {
    text.replace("```", "\\`\\`\\`")
}
