use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use sharescrape_common::{Conversation, Message, Result, SharescrapeError, SourceProfile};

use crate::render::render_html;
use crate::text::{element_text, normalize_whitespace, trim_end_whitespace};

const CODE_SEPARATOR: &str = "\n---\n";

/// Compiled structural markers for one chat-share platform.
///
/// Building an `Extractor` is the only fallible step: every marker must be a
/// valid CSS selector. Extraction itself never fails, malformed markup is
/// recovered by the HTML parser.
#[derive(Debug, Clone)]
pub struct Extractor {
    profile: SourceProfile,
    question: Selector,
    answer: Selector,
    paragraph: Selector,
    code_block: Selector,
}

impl Extractor {
    pub fn new(profile: SourceProfile) -> Result<Self> {
        let markers = &profile.markers;
        let question = compile("question", &markers.question)?;
        let answer = compile("answer", &markers.answer)?;
        let paragraph = compile_in_answer("paragraph", &markers.paragraph)?;
        let code_block = compile_in_answer("code_block", &markers.code_block)?;

        Ok(Self {
            profile,
            question,
            answer,
            paragraph,
            code_block,
        })
    }

    /// Extractor for DeepSeek share pages.
    pub fn deepseek() -> Result<Self> {
        Self::new(SourceProfile::default())
    }

    pub fn profile(&self) -> &SourceProfile {
        &self.profile
    }

    /// Extract, render and stamp with the current time.
    pub fn extract(&self, html: &str) -> Conversation {
        self.extract_at(html, Utc::now())
    }

    /// Same as [`extract`](Self::extract) with a caller supplied timestamp.
    pub fn extract_at(&self, html: &str, scraped_at: DateTime<Utc>) -> Conversation {
        let messages = self.messages(html);
        let content = render_html(&messages, &self.profile.display_name);

        Conversation {
            model: self.profile.model.clone(),
            content,
            scraped_at,
            source_html_bytes: html.len(),
        }
    }

    /// Pair question and answer nodes by position and turn them into messages.
    ///
    /// Nodes past the shorter of the two lists are ignored. A question whose
    /// text normalizes to nothing is skipped, its answer is still emitted.
    pub fn messages(&self, html: &str) -> Vec<Message> {
        let document = Html::parse_document(html);
        let questions: Vec<ElementRef<'_>> = document.select(&self.question).collect();
        let answers: Vec<ElementRef<'_>> = document.select(&self.answer).collect();
        let pairs = questions.len().min(answers.len());

        tracing::debug!(
            model = %self.profile.model,
            html_bytes = html.len(),
            questions = questions.len(),
            answers = answers.len(),
            pairs,
            "located chat-share nodes"
        );

        let mut messages = Vec::with_capacity(pairs * 2);
        for (i, (question, answer)) in questions.iter().zip(answers.iter()).enumerate() {
            let question_text = normalize_whitespace(&element_text(question));
            if question_text.is_empty() {
                tracing::trace!(pair = i, "empty question skipped");
            } else {
                messages.push(Message::question(question_text));
            }

            let reply = self.answer_message(answer);
            tracing::trace!(
                pair = i,
                content_len = reply.content.len(),
                has_code = reply.code.is_some(),
                "answer extracted"
            );
            messages.push(reply);
        }
        messages
    }

    fn answer_message(&self, answer: &ElementRef<'_>) -> Message {
        let paragraphs: Vec<String> = answer
            .select(&self.paragraph)
            .map(|p| normalize_whitespace(&element_text(&p)))
            .filter(|p| !p.is_empty())
            .collect();

        let blocks: Vec<String> = answer
            .select(&self.code_block)
            .map(|pre| trim_end_whitespace(&element_text(&pre)).to_string())
            .filter(|code| !code.is_empty())
            .collect();

        let code = (!blocks.is_empty()).then(|| blocks.join(CODE_SEPARATOR));
        Message::answer(paragraphs.join("\n"), code)
    }
}

fn compile(field: &'static str, marker: &str) -> Result<Selector> {
    parse_marker(field, marker, marker)
}

/// Compile a marker matched inside an answer. Every alternative is anchored
/// with `:scope`, so ancestor parts such as `div.md-code-block` in
/// `div.md-code-block pre` must also lie within the answer element.
fn compile_in_answer(field: &'static str, marker: &str) -> Result<Selector> {
    parse_marker(field, marker, &scoped(marker))
}

fn parse_marker(field: &'static str, marker: &str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SharescrapeError::InvalidMarker {
        field,
        marker: marker.to_string(),
        reason: e.to_string(),
    })
}

fn scoped(marker: &str) -> String {
    split_alternatives(marker)
        .into_iter()
        .map(str::trim)
        .map(|alt| {
            if alt.starts_with(":scope") {
                alt.to_string()
            } else {
                format!(":scope {alt}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Split a selector list on its top-level commas.
fn split_alternatives(marker: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in marker.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&marker[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&marker[start..]);
    parts
}

/// Extract a DeepSeek share page.
///
/// Returns `Result` because it goes through [`Extractor::deepseek`], which
/// compiles the default markers like any configured profile. Callers
/// extracting many pages should build one [`Extractor`] and reuse it.
///
/// ```
/// let html = r#"<html><body>
///   <div class="fbb737a4">  What is   2+2? </div>
///   <div class="ds-markdown ds-markdown--block">
///     <p class="ds-markdown-paragraph">It is 4.</p>
///   </div>
/// </body></html>"#;
///
/// let convo = sharescrape_extract::extract(html).unwrap();
/// assert_eq!(convo.model, "deepSeek");
/// assert_eq!(convo.source_html_bytes, html.len());
/// assert!(convo.content.contains("QUESTION:"));
/// assert!(convo.content.contains("<div>What is 2+2?</div>"));
/// assert!(!convo.content.contains("<pre>"));
/// ```
pub fn extract(html: &str) -> Result<Conversation> {
    Ok(Extractor::deepseek()?.extract(html))
}
