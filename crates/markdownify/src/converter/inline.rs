//! Inline converters: links, emphasis, code spans, images, line breaks.

use crate::dom::NodeRef;
use crate::text::chomp;

/// Wrap trimmed text in `marker`, keeping one boundary space on each side.
fn wrap(text: &str, marker: &str) -> String {
    let (prefix, suffix, core) = chomp(text);
    if core.is_empty() {
        return String::new();
    }
    format!("{prefix}{marker}{core}{marker}{suffix}")
}

/// ` "title"` with inner double quotes escaped, or nothing.
fn title_clause(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" \"{}\"", title.replace('"', "\\\""))
    }
}

pub(crate) fn convert_a(el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    let (prefix, suffix, core) = chomp(text);
    if core.is_empty() {
        return String::new();
    }

    let href = el.attr_or_empty("href");
    let title = el.attr_or_empty("title");
    if title.is_empty() && core.replace(r"\_", "_") == href {
        return format!("<{href}>");
    }
    if href.is_empty() {
        return core.to_string();
    }
    format!("{prefix}[{core}]({href}{}){suffix}", title_clause(title))
}

pub(crate) fn convert_b(_el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    wrap(text, "**")
}

pub(crate) fn convert_em(_el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    wrap(text, "*")
}

pub(crate) fn convert_del(_el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    wrap(text, "~~")
}

pub(crate) fn convert_code(el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    // Already inside a fence.
    if el.parent_name() == Some("pre") {
        return text.to_string();
    }
    wrap(text, "`")
}

pub(crate) fn convert_sub(_el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    wrap(text, "")
}

pub(crate) fn convert_img(el: NodeRef<'_>, _text: &str, as_inline: bool) -> String {
    let alt = el.attr_or_empty("alt");
    if as_inline {
        return alt.to_string();
    }
    let src = el.attr_or_empty("src");
    if src.is_empty() && alt.is_empty() {
        return String::new();
    }
    let title = el.attr_or_empty("title");
    format!("![{alt}]({src}{})", title_clause(title))
}

pub(crate) fn convert_br(_el: NodeRef<'_>, _text: &str, as_inline: bool) -> String {
    if as_inline { String::new() } else { "  \n".to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn element(name: &str, attrs: &[(&str, &str)]) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let attributes = attrs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        doc.append_element(root, name, attributes);
        doc
    }

    fn first(doc: &Document) -> NodeRef<'_> {
        doc.node(doc.node(doc.root()).child_ids()[0])
    }

    #[test]
    fn test_a_autolink() {
        let doc = element("a", &[("href", "http://x.com")]);
        assert_eq!(convert_a(first(&doc), "http://x.com", false), "<http://x.com>");
    }

    #[test]
    fn test_a_autolink_reverses_underscore_escape() {
        let doc = element("a", &[("href", "http://x.com/a_b")]);
        assert_eq!(convert_a(first(&doc), r"http://x.com/a\_b", false), "<http://x.com/a_b>");
    }

    #[test]
    fn test_a_with_title_and_spaces() {
        let doc = element("a", &[("href", "/docs"), ("title", "The \"docs\"")]);
        assert_eq!(
            convert_a(first(&doc), " read me ", false),
            r#" [read me](/docs "The \"docs\"") "#
        );
    }

    #[test]
    fn test_a_without_href_is_plain_text() {
        let doc = element("a", &[]);
        assert_eq!(convert_a(first(&doc), " anchor ", false), "anchor");
    }

    #[test]
    fn test_emphasis_family() {
        let doc = element("b", &[]);
        let el = first(&doc);
        assert_eq!(convert_b(el, " bold", false), " **bold**");
        assert_eq!(convert_em(el, "it ", false), "*it* ");
        assert_eq!(convert_del(el, "gone", false), "~~gone~~");
        assert_eq!(convert_sub(el, " 2 ", false), " 2 ");
        assert_eq!(convert_b(el, "   ", false), "");
    }

    #[test]
    fn test_code_inside_pre_passes_through() {
        let mut doc = Document::new();
        let root = doc.root();
        let pre = doc.append_element(root, "pre", Vec::new());
        let code = doc.append_element(pre, "code", Vec::new());
        assert_eq!(convert_code(doc.node(code), "  x = 1\n", false), "  x = 1\n");
    }

    #[test]
    fn test_code_inline() {
        let doc = element("code", &[]);
        assert_eq!(convert_code(first(&doc), "run ", false), "`run` ");
    }

    #[test]
    fn test_img() {
        let doc = element("img", &[("src", "a.png"), ("alt", "A"), ("title", "t")]);
        assert_eq!(convert_img(first(&doc), "", false), "![A](a.png \"t\")");
        assert_eq!(convert_img(first(&doc), "", true), "A");
    }

    #[test]
    fn test_br() {
        let doc = element("br", &[]);
        assert_eq!(convert_br(first(&doc), "", false), "  \n");
        assert_eq!(convert_br(first(&doc), "", true), "");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let doc = element("x", &[]);
        let el = first(&doc);
        for convert in [convert_a, convert_b, convert_em, convert_del, convert_code, convert_sub, convert_img] {
            assert_eq!(convert(el, "", false), "");
            assert_eq!(convert(el, "", true), "");
        }
    }
}
