//! Tag name to converter lookup.
//!
//! Adding support for a tag means adding one row to [`CONVERTERS`]; the
//! renderer never names individual tags outside of the inline-context and
//! pruning rules.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::block::{
    convert_blockquote, convert_h1, convert_h2, convert_h3, convert_h4, convert_h5, convert_h6, convert_hr, convert_p,
    convert_pre,
};
use super::inline::{convert_a, convert_b, convert_br, convert_code, convert_del, convert_em, convert_img, convert_sub};
use super::list::{convert_li, convert_list};
use super::table::{convert_table, convert_td, convert_th, convert_tr};
use crate::dom::NodeRef;

/// Converts one element given its already-rendered children.
///
/// Arguments are the element, the concatenated child text, and whether the
/// element sits in an inline context.
pub type Converter = fn(NodeRef<'_>, &str, bool) -> String;

const CONVERTERS: &[(&str, Converter)] = &[
    ("a", convert_a),
    ("b", convert_b),
    ("strong", convert_b),
    ("code", convert_code),
    ("kbd", convert_code),
    ("samp", convert_code),
    ("pre", convert_pre),
    ("del", convert_del),
    ("s", convert_del),
    ("em", convert_em),
    ("i", convert_em),
    ("img", convert_img),
    ("list", convert_list),
    ("ul", convert_list),
    ("ol", convert_list),
    ("li", convert_li),
    ("sub", convert_sub),
    ("sup", convert_sub),
    ("tr", convert_tr),
    ("blockquote", convert_blockquote),
    ("h1", convert_h1),
    ("h2", convert_h2),
    ("h3", convert_h3),
    ("h4", convert_h4),
    ("h5", convert_h5),
    ("h6", convert_h6),
    ("hr", convert_hr),
    ("table", convert_table),
    ("td", convert_td),
    ("th", convert_th),
    ("br", convert_br),
    ("p", convert_p),
];

static REGISTRY: Lazy<HashMap<&'static str, Converter>> = Lazy::new(|| CONVERTERS.iter().copied().collect());

/// Converter registered for `tag`, if any. Unregistered tags pass their
/// children through unchanged.
#[must_use]
pub fn lookup(tag: &str) -> Option<Converter> {
    REGISTRY.get(tag).copied()
}

/// Every tag with a registered converter.
pub fn registered_tags() -> impl Iterator<Item = &'static str> {
    CONVERTERS.iter().map(|(tag, _)| *tag)
}
