//! Prompt contract for the bias analysis call.

/// Persona and output-shape constraints.
pub const SYSTEM_PROMPT: &str = "You are an expert at analyzing text for bias, credibility, and \
political leanings. Always respond with a raw JSON object. Credibility scores are numbers \
between 0 and 1; politicalBias is a number between -1 and 1. Do not include any markdown \
formatting or additional text in your response.";

/// Example of the expected response; also the shape strict validation accepts.
pub const EXAMPLE_RESPONSE: &str = r#"{
    "credibility": {
        "deceptive": 0.1,
        "deceptiveReason": "No misleading claims detected",
        "fakeNews": 0.05,
        "fakeNewsReason": "Factual statements are verifiable",
        "trustworthy": 0.85,
        "trustworthyReason": "Clear sender and consistent tone",
        "objective": 0.7,
        "objectiveReason": "Mostly neutral wording"
    },
    "politicalBias": 0.0,
    "structureAnalysis": {
        "format": "Standard",
        "paragraphs": 4,
        "readability": "High"
    }
}"#;

/// User message; `{content}` is replaced with the literal email text.
pub const ANALYZE_PROMPT: &str = r#"Analyze the following email content for bias and provide a structured analysis.
Return ONLY a JSON object with no markdown formatting or additional text.
The JSON must have these sections:

1. "credibility" - scores between 0 and 1, each with a one-sentence reason:
   - "deceptive": likelihood of deceptive content ("deceptiveReason")
   - "fakeNews": likelihood of fake news ("fakeNewsReason")
   - "trustworthy": overall trustworthiness ("trustworthyReason")
   - "objective": level of objectivity ("objectiveReason")

2. "politicalBias" - a single number between -1 and 1:
   -1 is strongly left-leaning, 0 is neutral, 1 is strongly right-leaning

3. "structureAnalysis":
   - "format": "Simple", "Standard", or "Complex"
   - "paragraphs": number of paragraphs (whole number, at least 1)
   - "readability": "Low", "Medium", or "High"

Example response:
{example}

Email content:
{content}"#;

/// Build the user message for `content`.
pub fn format_analyze_prompt(content: &str) -> String {
    ANALYZE_PROMPT
        .replace("{example}", EXAMPLE_RESPONSE)
        .replace("{content}", content)
}
