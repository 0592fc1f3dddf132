//! Standalone HTML view of an extracted conversation.
//!
//! Message text is inserted as-is, without escaping. Content comes from text
//! nodes of the source page, so entity-decoded markup characters in answers
//! (e.g. a `<` in a code block) reach the output verbatim.

use sharescrape_common::Message;

const STYLE: &str = concat!(
    "    body { font-family: Arial, sans-serif; padding: 2em; line-height: 1.6; background: #f9f9f9; }\n",
    "    .message { margin-bottom: 2em; }\n",
    "    .Question { color: #0b5394; font-weight: bold; }\n",
    "    .Answer { color: #38761d; font-weight: bold; }\n",
    "    pre { background: #eee; padding: 1em; border-radius: 5px; overflow-x: auto; }",
);

/// Render `messages` into a complete HTML document titled after `display_name`.
pub fn render_html(messages: &[Message], display_name: &str) -> String {
    let body = messages
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n");

    let mut out = String::with_capacity(1024 + body.len());
    out.push_str("\n<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"UTF-8\">\n");
    out.push_str(&format!("  <title>Conversation from {display_name}</title>\n"));
    out.push_str("  <style>\n");
    out.push_str(STYLE);
    out.push_str("\n  </style>\n</head>\n<body>\n");
    out.push_str(&format!("  <h1>Parsed Conversation from {display_name}</h1>\n"));
    out.push_str("  ");
    out.push_str(&body);
    out.push_str("\n</body>\n</html>\n");
    out
}

fn render_message(msg: &Message) -> String {
    let pre = msg
        .code
        .as_deref()
        .map(|code| format!("<pre>{code}</pre>"))
        .unwrap_or_default();

    format!(
        "\n    <div class=\"message\">\n      <div class=\"{role}\">{label}:</div>\n      <div>{content}</div>\n      {pre}\n    </div>\n  ",
        role = msg.role,
        label = msg.role.label(),
        content = msg.content.replace('\n', "<br>"),
    )
}
