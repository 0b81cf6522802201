//! Prompt templates for the blog steps.

/// Builds the outline prompt for a topic.
///
/// Asks for exactly five outline points without elaboration.
#[must_use]
pub fn outline_prompt(title: &str) -> String {
    format!(
        "Generate a blog post outline for the topic: '{title}'.Only write 5 outline points, not detail)."
    )
}

/// Builds the post prompt from a topic and its outline.
///
/// The outline is embedded verbatim. Asks for ten lines, two per outline
/// point.
#[must_use]
pub fn blog_prompt(title: &str, outline: &str) -> String {
    format!(
        "Write a well-structured blog post based on the title '{title}' and this outline:\n\n{outline}\n\nEnsure the blog flows naturally and expands on each outline point. Only write 10 lines of content. Each Outline point has only 2 lines of content."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_prompt_mentions_title_and_count() {
        let prompt = outline_prompt("Benefits of Sleep");
        assert!(prompt.contains("'Benefits of Sleep'"));
        assert!(prompt.contains("5 outline points"));
    }

    #[test]
    fn test_blog_prompt_embeds_outline_verbatim() {
        let outline = "1. Rest\n2. Memory\n3. Mood\n4. Health\n5. Focus";
        let prompt = blog_prompt("Benefits of Sleep", outline);

        assert!(prompt.contains(outline));
        assert!(prompt.contains("'Benefits of Sleep'"));
        assert!(prompt.contains("Only write 10 lines of content"));
        assert!(prompt.contains("2 lines of content"));
    }

    #[test]
    fn test_titles_are_not_escaped() {
        let prompt = outline_prompt("{input} and 'quotes'");
        assert!(prompt.contains("'{input} and 'quotes''"));
    }
}
