//! Grounded prompt assembly.

/// Template for the grounded prompt sent to the chat model.
///
/// The assembled prompt carries a grounding preamble, the retrieved context,
/// and the user's question in labelled sections:
///
/// ```text
/// {preamble}
///
/// Context:
/// {chunk}
/// {chunk}
///
/// User Question:
/// {question}
/// ```
///
/// When retrieval finds nothing the `Context:` section is empty rather than
/// omitted, so the model still sees that it was given no grounding material.
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    system: String,
    preamble: String,
}

/// Default system instruction for the chat model.
const DEFAULT_SYSTEM: &str = "You are a helpful AI assistant.";

/// Default grounding instruction placed above the context section.
const DEFAULT_PREAMBLE: &str = "Answer professionally and clearly using ONLY the context below.";

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM.into(),
            preamble: DEFAULT_PREAMBLE.into(),
        }
    }
}

impl PromptTemplate {
    /// Creates a template with a custom system instruction and preamble.
    #[must_use]
    pub fn new(system: impl Into<String>, preamble: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            preamble: preamble.into(),
        }
    }

    /// Replaces the grounding preamble, keeping the system instruction.
    #[must_use]
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    /// The system instruction sent alongside every assembled prompt.
    #[must_use]
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Assembles the grounded prompt from retrieved context and a question.
    ///
    /// Context entries are joined with newlines in retrieval order, best
    /// match first.
    #[must_use]
    pub fn assemble(&self, context: &[String], question: &str) -> String {
        let context = context.join("\n");
        format!(
            "{}\n\nContext:\n{}\n\nUser Question:\n{}",
            self.preamble, context, question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_appear_in_order() {
        let template = PromptTemplate::default();
        let context = vec!["first chunk".to_owned(), "second chunk".to_owned()];
        let prompt = template.assemble(&context, "What do you sell?");

        let preamble_at = prompt.find(DEFAULT_PREAMBLE).unwrap();
        let context_at = prompt.find("Context:\nfirst chunk\nsecond chunk").unwrap();
        let question_at = prompt.find("User Question:\nWhat do you sell?").unwrap();
        assert!(preamble_at < context_at);
        assert!(context_at < question_at);
    }

    #[test]
    fn empty_context_keeps_the_section() {
        let template = PromptTemplate::default();
        let prompt = template.assemble(&[], "Anyone there?");
        assert!(prompt.contains("Context:\n\n"));
        assert!(prompt.contains("User Question:\nAnyone there?"));
    }

    #[test]
    fn custom_preamble_replaces_default() {
        let template = PromptTemplate::default().with_preamble("Cite your sources.");
        let prompt = template.assemble(&[], "hi");
        assert!(prompt.starts_with("Cite your sources."));
        assert!(!prompt.contains(DEFAULT_PREAMBLE));
    }

    #[test]
    fn system_instruction_is_separate_from_prompt() {
        let template = PromptTemplate::default();
        assert_eq!(template.system(), DEFAULT_SYSTEM);
        let prompt = template.assemble(&[], "hi");
        assert!(!prompt.contains(DEFAULT_SYSTEM));
    }
}
