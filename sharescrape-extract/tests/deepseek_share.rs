mod common;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use sharescrape_common::{Message, Role};
use sharescrape_config::SharescrapeConfigLoader;
use sharescrape_extract::{Extractor, extract};

#[test]
fn saved_share_page_yields_aligned_messages() {
    common::init_test_tracing();
    let html = common::fixture("deepseek_share.html");

    let messages = Extractor::deepseek().unwrap().messages(&html);

    assert_eq!(
        messages,
        vec![
            Message::question("How do I reverse a list in Python?"),
            Message::answer(
                "You can use reversed() or slicing:\nOr create a copy:",
                Some("for x in reversed(items):\n    print(x)\n---\nrev = items[::-1]".into()),
            ),
            Message::answer("Is 3 < 4? Yes.", None),
        ]
    );

    let questions = messages.iter().filter(|m| m.role == Role::Question).count();
    let answers = messages.iter().filter(|m| m.role == Role::Answer).count();
    assert_eq!((questions, answers), (1, 2));
}

#[test]
fn conversation_carries_model_size_and_rendered_page() {
    common::init_test_tracing();
    let html = common::fixture("deepseek_share.html");
    let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();

    let convo = Extractor::deepseek().unwrap().extract_at(&html, at);

    assert_eq!(convo.model, "deepSeek");
    assert_eq!(convo.source_html_bytes, html.len());
    assert_eq!(convo.scraped_at_iso(), "2026-10-18T09:30:00.000Z");

    let page = &convo.content;
    assert_eq!(page.matches("<div class=\"message\">").count(), 3);
    assert_eq!(page.matches("QUESTION:").count(), 1);
    assert_eq!(page.matches("ANSWER:").count(), 2);
    assert!(page.contains("<div>You can use reversed() or slicing:<br>Or create a copy:</div>"));
    assert!(page.contains("<pre>for x in reversed(items):\n    print(x)\n---\nrev = items[::-1]</pre>"));
    assert!(page.contains("<div>Is 3 < 4? Yes.</div>"));
    assert!(!page.contains("never got an answer"));
}

#[test]
fn byte_count_is_utf8_length() {
    let html = "<html><body><p>héllo — ✓</p></body></html>";
    let convo = extract(html).unwrap();
    assert_eq!(convo.source_html_bytes, html.len());
    assert!(convo.source_html_bytes > html.chars().count());
    assert_eq!(convo.content.matches("<div class=\"message\">").count(), 0);
    assert!(convo.content.contains("<h1>Parsed Conversation from DeepSeek</h1>"));
}

#[test]
fn malformed_markup_is_recovered() {
    let html = r#"<div class="fbb737a4">unclosed <b>question
        <div class="ds-markdown ds-markdown--block"><p class="ds-markdown-paragraph">still parsed"#;
    let convo = extract(html).unwrap();
    assert!(convo.content.contains("ANSWER:"));
    assert_eq!(convo.source_html_bytes, html.len());
}

#[test]
fn configured_profile_drives_markers_and_labels() {
    common::init_test_tracing();
    let cfg = SharescrapeConfigLoader::new()
        .with_yaml_str(
            r#"
sources:
  - id: example-chat
    model: exampleChat
    display_name: Example Chat
    markers:
      question: "section.turn-user"
      answer: "section.turn-bot"
      paragraph: "p"
      code_block: "pre.code"
"#,
        )
        .load()
        .unwrap();
    let spec = cfg.require_source("example-chat").unwrap();
    let extractor = Extractor::new(spec.profile.clone()).unwrap();
    assert_eq!(extractor.profile(), &spec.profile);
    assert_eq!(extractor.profile().markers.code_block, "pre.code");

    let html = r#"<html><body>
        <section class="turn-user">Ping?</section>
        <section class="turn-bot"><p>Pong.</p><pre class="code">pong()</pre></section>
    </body></html>"#;

    let convo = extractor.extract(html);
    assert_eq!(convo.model, "exampleChat");
    assert!(convo.content.contains("<title>Conversation from Example Chat</title>"));
    assert!(convo.content.contains("<div>Ping?</div>"));
    assert!(convo.content.contains("<pre>pong()</pre>"));
}

#[test]
fn conversation_serializes_for_callers() {
    let html = common::fixture("deepseek_share.html");
    let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let convo = Extractor::deepseek().unwrap().extract_at(&html, at);

    let v = serde_json::to_value(&convo).unwrap();
    assert_eq!(v["model"], "deepSeek");
    assert_eq!(v["scrapedAt"], "2026-01-02T03:04:05.000Z");
    assert_eq!(v["sourceHtmlBytes"], html.len());
    assert!(v["content"].as_str().unwrap().contains("Parsed Conversation"));
}
