use scraper::ElementRef;

/// Elements that start and end a line when rendered
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tbody",
    "thead",
    "tfoot",
    "tr",
    "ul",
];

/// Table cells, separated from their neighbours on the same line
const CELL_TAGS: &[&str] = &["td", "th"];

/// Never rendered
const HIDDEN_TAGS: &[&str] = &["script", "style", "template", "noscript"];

/// Approximate the visible text of an element the way a browser renders it.
///
/// Whitespace runs collapse to a single space, `<br>` and block element
/// boundaries become line breaks, and every line is trimmed. Empty lines
/// are dropped.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    render_into(element, &mut raw);

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_into(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            push_collapsed(out, text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if name == "br" {
                out.push('\n');
            } else if HIDDEN_TAGS.contains(&name) {
                continue;
            } else if CELL_TAGS.contains(&name) {
                push_collapsed(out, " ");
                render_into(child_element, out);
            } else if BLOCK_TAGS.contains(&name) {
                out.push('\n');
                render_into(child_element, out);
                out.push('\n');
            } else {
                render_into(child_element, out);
            }
        }
    }
}

/// Lazily split the text under `element` at every `<br>` element.
///
/// Text is taken from all descendants, so wrapper and inline elements
/// contribute their text but never their tags. Entities arrive decoded.
/// Hidden elements are skipped. The last piece is yielded even when empty.
pub fn break_pieces<'a>(element: ElementRef<'a>) -> impl Iterator<Item = String> + 'a {
    let mut stack = vec![element.children()];
    let mut piece = String::new();
    let mut finished = false;

    std::iter::from_fn(move || {
        if finished {
            return None;
        }

        while let Some(children) = stack.last_mut() {
            let Some(child) = children.next() else {
                stack.pop();
                continue;
            };

            if let Some(text) = child.value().as_text() {
                piece.push_str(text);
            } else if let Some(child_element) = ElementRef::wrap(child) {
                let name = child_element.value().name();
                if name == "br" {
                    return Some(std::mem::take(&mut piece));
                }
                if !HIDDEN_TAGS.contains(&name) {
                    stack.push(child_element.children());
                }
            }
        }

        finished = true;
        Some(std::mem::take(&mut piece))
    })
}

fn push_collapsed(out: &mut String, text: &str) {
    for c in text.chars() {
        if c.is_whitespace() {
            if !matches!(out.chars().last(), None | Some(' ') | Some('\n')) {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
}
