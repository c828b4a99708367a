use crate::dto::GenerationRequest;

pub const DIRECTIVE: &str = "Generate a professional email reply for the following email content. \
     Please do not generate the subject line.";

/// Builds the instruction sent to the model: directive, optional tone clause,
/// then the original email verbatim. The tone is not validated.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::from(DIRECTIVE);

    if let Some(tone) = request.tone.as_deref().filter(|t| !t.is_empty()) {
        prompt.push_str(" Use a ");
        prompt.push_str(tone);
        prompt.push_str(" tone.");
    }

    prompt.push_str("\n Original Email: ");
    prompt.push_str(&request.email_content);
    prompt
}
