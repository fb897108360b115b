//! List converters and bullet resolution.

use crate::dom::NodeRef;

/// Bullets for unordered lists, cycled by nesting depth.
const BULLETS: [char; 3] = ['*', '+', '-'];

/// Bullet for an unordered item at `depth` (0 = top level).
///
/// Negative depths wrap around, so an `<li>` outside any `<ul>` gets `-`.
#[must_use]
pub fn unordered_bullet(depth: i64) -> char {
    // rem_euclid(3) is always 0..=2.
    let index = usize::try_from(depth.rem_euclid(3)).unwrap_or(0);
    BULLETS[index]
}

/// Number of `<ul>` ancestors minus one.
fn unordered_depth(el: NodeRef<'_>) -> i64 {
    let count = el.ancestors().filter(|ancestor| ancestor.is("ul")).count();
    i64::try_from(count).unwrap_or(i64::MAX) - 1
}

/// Marker for an item of an ordered list: `start + position` followed by `.`.
fn ordered_marker(el: NodeRef<'_>, list: NodeRef<'_>) -> String {
    let start = list
        .attr("start")
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(1);
    let index = el
        .index_in_parent()
        .and_then(|index| i64::try_from(index).ok())
        .unwrap_or(0);
    format!("{}.", start + index)
}

pub(crate) fn convert_li(el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    let bullet = match el.parent() {
        Some(parent) if parent.is("ol") => ordered_marker(el, parent),
        _ => unordered_bullet(unordered_depth(el)).to_string(),
    };
    format!("{bullet} {}\n", text.trim())
}

/// `ul`, `ol` and `list`. Lists are never rendered inline.
pub(crate) fn convert_list(el: NodeRef<'_>, text: &str, _as_inline: bool) -> String {
    if el.ancestors().any(|ancestor| ancestor.is("li")) {
        if text.is_empty() {
            return "\n".to_string();
        }
        let indented: Vec<String> = text.split('\n').map(|line| format!("\t{line}")).collect();
        return format!("\n{}", indented.join("\n").trim_end());
    }

    let before_paragraph = el
        .next_sibling()
        .is_some_and(|next| !next.is("ul") && !next.is("ol"));
    if before_paragraph { format!("{text}\n") } else { text.to_string() }
}
