use crate::models::{Length, Mode};

pub const AUDIO_SCRIPT_MARKER: &str = "Audio Script:";
pub const IMAGE_PROMPT_MARKER: &str = "IMG-PROMPT:";

pub const OFF_TOPIC_REPLY: &str = "I apologize, but I can only provide information about Artificial Intelligence, Machine Learning, and related topics.";

/// Builds the full instruction prompt for one generation request.
pub fn build_prompt(topic: &str, length: Length, mode: Mode) -> String {
    let mut prompt = format!(
        r#"
You are an expert Machine Learning tutor providing educational content ONLY for topics related to Artificial Intelligence (AI), Machine Learning (ML), and Deep Learning.

IMPORTANT RESTRICTIONS:
- You MUST ONLY respond to topics related to AI, ML, or Deep Learning.
- If the topic '{topic}' is NOT related to AI/ML/DL, respond with:
  "{refusal}"
- Do NOT provide information about topics outside of AI/ML/DL domains.

Topic: "{topic}"
Required format: {mode}
Explanation depth: {length}

Teaching Guidelines:
- Start with a clear learning objective
- Provide structured explanations with examples
- Use appropriate technical depth for the topic
- Include practical applications when relevant
- Ensure accuracy and clarity
- Format output as clean text WITHOUT markdown symbols like *, #, `, etc.
- Use plain text formatting with clear paragraphs and line breaks
- For headings, use ALL CAPS or underlines instead of # symbols
- For emphasis, use uppercase or quotation marks instead of * or **
"#,
        topic = topic,
        refusal = OFF_TOPIC_REPLY,
        mode = mode.label(),
        length = length.as_str(),
    );

    prompt.push_str(&mode_instructions(topic, mode));
    prompt
}

fn mode_instructions(topic: &str, mode: Mode) -> String {
    match mode {
        Mode::Text => String::new(),
        Mode::Code => format!(
            r#"
- You MUST also generate a Python program that demonstrates how {topic} works.
- Before the Python code block, provide a detailed beginner-friendly explanation.
  This explanation should cover the model, key functions, and evaluation.
- The Python code itself should be enclosed in a single ```python ``` block.
- Include helpful comments in the code explaining key steps.
- Show expected outputs or results where applicable.
"#
        ),
        Mode::Audio => format!(
            r#"
- After the explanation, write a clear and engaging narration script for listeners.
- Start the narration on its own line with the exact marker "{marker}".
- Use simple language and a conversational, structured tone.
"#,
            marker = AUDIO_SCRIPT_MARKER
        ),
        Mode::Image => format!(
            r#"
- After the explanation, describe 2 to 4 diagrams that illustrate {topic}.
- Start each diagram description on its own line with the exact marker "{marker}".
- Each description should name the components, their labels, and how they relate.
"#,
            marker = IMAGE_PROMPT_MARKER
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_topic_mode_and_depth() {
        let prompt = build_prompt("Gradient Descent", Length::Detailed, Mode::Text);
        assert!(prompt.contains("Topic: \"Gradient Descent\""));
        assert!(prompt.contains("Required format: Text explanation"));
        assert!(prompt.contains("Explanation depth: Detailed"));
        assert!(prompt.contains(OFF_TOPIC_REPLY));
        assert!(!prompt.contains("```python"));
    }

    #[test]
    fn test_mode_specific_instructions() {
        let code = build_prompt("k-means", Length::Brief, Mode::Code);
        assert!(code.contains("demonstrates how k-means works"));
        assert!(code.contains("```python ```"));

        let audio = build_prompt("k-means", Length::Brief, Mode::Audio);
        assert!(audio.contains(AUDIO_SCRIPT_MARKER));

        let image = build_prompt("k-means", Length::Brief, Mode::Image);
        assert!(image.contains(IMAGE_PROMPT_MARKER));
        assert!(image.contains("Required format: Image Explanation"));
    }
}
