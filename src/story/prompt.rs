//! Story Prompt
//!
//! Fixed instruction template wrapping the campus context and the user's
//! idea. Both are substituted verbatim; nothing is escaped.

use super::StoryRequest;

/// Build the full prompt for a validated story request
pub fn build_story_prompt(request: &StoryRequest) -> String {
    format!(
        r#"
You are a creative storyteller. Write a short, engaging story (around 250–400 words)
that takes place entirely on the campus of Sanjay Ghodawat University (SGU), Kolhapur.
You should explain whole story in simple english so that any age group can read the story easily.

**SGU Campus Details:**
{campus_context}

**User's Story Idea:**
{user_prompt}

**Instructions:**
1. Make the story feel authentic to the SGU campus experience.
2. Mention at least 2-3 specific SGU locations (e.g., Central Library, Food Court, School of Technology building, Stadium, Star Local Mart, Robotic Lab).
3. Ensure the story is appropriate for all audiences and positive in tone.
4. Generate *only* the story text, using clear paragraphs. Do not add a title.
5. Please make sure that story is easy to read by any age group.

**Story:**
"#,
        campus_context = request.campus_context(),
        user_prompt = request.user_prompt(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::context::CAMPUS_CONTEXT;
    use proptest::prelude::*;

    #[test]
    fn test_prompt_structure() {
        let request = StoryRequest::new("A lost key in the Central Library").unwrap();
        let prompt = build_story_prompt(&request);

        assert!(prompt.contains("around 250–400 words"));
        assert!(prompt.contains("**User's Story Idea:**\nA lost key in the Central Library\n"));
        assert!(prompt.contains("Mention at least 2-3 specific SGU locations"));
        assert!(prompt.contains("Do not add a title."));
        assert!(prompt.trim_end().ends_with("**Story:**"));

        let instructions = (1..=5)
            .filter(|n| prompt.contains(&format!("\n{}. ", n)))
            .count();
        assert_eq!(instructions, 5);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = StoryRequest::new("Rain at the Stadium").unwrap();
        assert_eq!(build_story_prompt(&request), build_story_prompt(&request));
    }

    #[test]
    fn test_markup_is_not_escaped() {
        let request = StoryRequest::new("<b>bold</b> & {braces} \"quotes\"").unwrap();
        let prompt = build_story_prompt(&request);
        assert!(prompt.contains("<b>bold</b> & {braces} \"quotes\""));
    }

    proptest! {
        #[test]
        fn prop_idea_and_context_embedded_verbatim(idea in "[^\\s]{1}[\\PC]{0,498}[^\\s]{1}") {
            let request = StoryRequest::new(&idea).unwrap();
            let prompt = build_story_prompt(&request);

            prop_assert!(prompt.contains(request.user_prompt()));
            prop_assert_eq!(request.user_prompt(), idea.as_str());
            prop_assert!(prompt.contains(CAMPUS_CONTEXT));
        }
    }
}
