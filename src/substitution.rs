/*!
 * Dictionary-driven substitution over a document tree.
 *
 * Every element is visited once, in document order, root included. Text
 * content and attribute values that exactly match a dictionary key are
 * replaced by the mapped value. A value written by the pass is never looked
 * up again within the same pass, so a single run does not cascade even when
 * a replacement is itself a key. Running the pass again over its own output
 * may replace such values a second time.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dictionary::TranslationMap;
use crate::document::{DocumentTree, Element};

/// Matching rules for the substitution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionOptions {
    /// Trim surrounding whitespace from element text before lookup
    #[serde(default = "default_trim_text")]
    pub trim_text: bool,

    /// Trim surrounding whitespace from attribute values before lookup
    #[serde(default)]
    pub trim_attributes: bool,
}

fn default_trim_text() -> bool {
    true
}

impl Default for SubstitutionOptions {
    fn default() -> Self {
        Self {
            trim_text: default_trim_text(),
            trim_attributes: false,
        }
    }
}

/// Counters collected during one substitution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Elements visited
    pub elements: usize,
    /// Text nodes replaced
    pub texts_replaced: usize,
    /// Attribute values replaced
    pub attributes_replaced: usize,
}

impl SubstitutionReport {
    pub fn total_replacements(&self) -> usize {
        self.texts_replaced + self.attributes_replaced
    }
}

/// Apply `map` to every element of `tree`
pub fn substitute(tree: &mut DocumentTree, map: &TranslationMap, options: &SubstitutionOptions) -> SubstitutionReport {
    let mut report = SubstitutionReport::default();
    tree.root_mut()
        .walk_mut(&mut |element: &mut Element| substitute_element(element, map, options, &mut report));

    debug!(
        "Substitution visited {} elements, replaced {} texts and {} attributes",
        report.elements, report.texts_replaced, report.attributes_replaced
    );
    report
}

fn substitute_element(
    element: &mut Element,
    map: &TranslationMap,
    options: &SubstitutionOptions,
    report: &mut SubstitutionReport,
) {
    report.elements += 1;

    if let Some(text) = element.text.as_mut() {
        // Empty text never reaches the lookup, whitespace-only text does
        if !text.is_empty() {
            let key = if options.trim_text { text.trim() } else { text.as_str() };
            if let Some(replacement) = map.get(key) {
                debug!("<{}> text '{}' -> '{}'", element.name, key, replacement);
                *text = replacement.to_string();
                report.texts_replaced += 1;
            }
        }
    }

    for (name, value) in element.attributes.iter_mut() {
        if is_namespace_declaration(name) {
            continue;
        }
        let key = if options.trim_attributes { value.trim() } else { value.as_str() };
        if let Some(replacement) = map.get(key) {
            debug!("<{}> @{} '{}' -> '{}'", element.name, name, key, replacement);
            *value = replacement.to_string();
            report.attributes_replaced += 1;
        }
    }
}

// Namespace bindings are structural, not content
fn is_namespace_declaration(name: &str) -> bool {
    name == "xmlns" || name.starts_with("xmlns:")
}
