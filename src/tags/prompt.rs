/// Build the tag-extraction prompt for `content`.
pub fn build_prompt(content: &str, max_tags: usize) -> String {
    format!(
        r#"
You are a tag generation system. Analyze the following content and extract the most relevant tags.
Focus on:
1. Current events, trending topics, and newsworthy items
2. People, organizations, and entities mentioned
3. Concepts, technologies, and themes
4. Geographic locations relevant to the content

Return ONLY a JSON array of tags, with no additional text or explanation.
Each tag should be a single word or short phrase (1-3 words maximum).
Limit to {max_tags} most relevant tags.

CONTENT:
{content}
"#
    )
}
