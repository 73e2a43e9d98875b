// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use pulldown_cmark::CowStr;
use pulldown_cmark::Event;
use pulldown_cmark::Parser;
use pulldown_cmark::html::push_html;

/// Render Markdown to HTML. When `highlight` is given, occurrences of it in
/// the text (ignoring ASCII case) are wrapped in `<mark>` tags.
pub fn markdown_to_html(markdown: &str, highlight: Option<&str>) -> String {
    let mut events: Vec<Event<'_>> = Vec::new();
    for event in Parser::new(markdown) {
        match (event, highlight) {
            (Event::Text(text), Some(word)) if !word.is_empty() => {
                events.extend(highlight_text(&text, word));
            }
            (event, _) => events.push(event),
        }
    }
    let mut html_output: String = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

pub fn markdown_to_html_inline(markdown: &str, highlight: Option<&str>) -> String {
    let text = markdown_to_html(markdown, highlight);
    if text.starts_with("<p>") && text.ends_with("</p>\n") {
        let len = text.len();
        text[3..len - 5].to_string()
    } else {
        text
    }
}

fn highlight_text(text: &str, word: &str) -> Vec<Event<'static>> {
    let mut events = Vec::new();
    let bytes = text.as_bytes();
    let needle = word.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i + needle.len() <= bytes.len() {
        let end = i + needle.len();
        if text.is_char_boundary(i)
            && text.is_char_boundary(end)
            && bytes[i..end].eq_ignore_ascii_case(needle)
        {
            if start < i {
                events.push(Event::Text(CowStr::from(text[start..i].to_string())));
            }
            events.push(Event::InlineHtml(CowStr::from("<mark>")));
            events.push(Event::Text(CowStr::from(text[i..end].to_string())));
            events.push(Event::InlineHtml(CowStr::from("</mark>")));
            start = end;
            i = end;
        } else {
            i += 1;
        }
    }
    if start < text.len() {
        events.push(Event::Text(CowStr::from(text[start..].to_string())));
    }
    events
}
