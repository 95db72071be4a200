//! CSS selector parsing and matching for the query surface.
//!
//! Supports the subset the page behaviors and tests rely on: tag, `#id`,
//! `.class`, attribute conditions, a handful of form-state pseudo-classes,
//! the four combinators, and comma-separated groups.

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrCondition {
    /// `[attr]`
    Exists,
    /// `[attr="v"]`
    Eq(String),
    /// `[attr^="v"]`
    StartsWith(String),
    /// `[attr$="v"]`
    EndsWith(String),
    /// `[attr*="v"]`
    Contains(String),
    /// `[attr~="v"]`
    Includes(String),
    /// `[attr|="v"]`
    DashMatch(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PseudoClass {
    FirstChild,
    LastChild,
    Checked,
    Disabled,
    Enabled,
    Required,
    Optional,
    Empty,
}

impl PseudoClass {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "first-child" => Self::FirstChild,
            "last-child" => Self::LastChild,
            "checked" => Self::Checked,
            "disabled" => Self::Disabled,
            "enabled" => Self::Enabled,
            "required" => Self::Required,
            "optional" => Self::Optional,
            "empty" => Self::Empty,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// One compound selector plus the combinator linking it to the next
/// compound on its left (the first compound in a chain carries none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) combinator: Option<Combinator>,
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<(String, AttrCondition)>,
    pub(crate) pseudo_classes: Vec<PseudoClass>,
}

impl SelectorPart {
    fn empty(combinator: Option<Combinator>) -> Self {
        Self {
            combinator,
            tag: None,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            pseudo_classes: Vec::new(),
        }
    }

    fn is_blank(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.pseudo_classes.is_empty()
    }

    /// For the `#id` fast path: the part must carry nothing else.
    pub(crate) fn id_only(&self) -> Option<&str> {
        if self.combinator.is_none()
            && self.tag.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && self.pseudo_classes.is_empty()
        {
            self.id.as_deref()
        } else {
            None
        }
    }
}

/// Parses a selector list into groups of combinator chains. Each group is
/// a chain ordered left to right; matching walks it right to left.
pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Vec<SelectorPart>>> {
    let mut groups = Vec::new();
    for group in selector.split(',') {
        let group = group.trim();
        if group.is_empty() {
            return Err(Error::UnsupportedSelector(selector.to_string()));
        }
        groups.push(parse_selector_chain(selector, group)?);
    }
    if groups.is_empty() {
        return Err(Error::UnsupportedSelector(selector.to_string()));
    }
    Ok(groups)
}

fn parse_selector_chain(original: &str, chain: &str) -> Result<Vec<SelectorPart>> {
    let mut parts: Vec<SelectorPart> = Vec::new();
    let mut current = SelectorPart::empty(None);
    let mut pending: Option<Combinator> = None;
    let chars: Vec<char> = chain.chars().collect();
    let mut i = 0usize;

    while i < chars.len() {
        let ch = chars[i];

        if ch.is_whitespace() {
            if !current.is_blank() {
                parts.push(current);
                current = SelectorPart::empty(Some(Combinator::Descendant));
            }
            i += 1;
            continue;
        }

        if let Some(explicit) = match ch {
            '>' => Some(Combinator::Child),
            '+' => Some(Combinator::AdjacentSibling),
            '~' => Some(Combinator::GeneralSibling),
            _ => None,
        } {
            if !current.is_blank() {
                parts.push(current);
                current = SelectorPart::empty(Some(explicit));
            } else if current.combinator == Some(Combinator::Descendant) {
                // Whitespace around an explicit combinator belongs to it.
                current.combinator = Some(explicit);
            } else {
                return Err(Error::UnsupportedSelector(original.to_string()));
            }
            pending = Some(explicit);
            i += 1;
            continue;
        }

        match ch {
            '#' => {
                let (name, next) = read_identifier(&chars, i + 1);
                if name.is_empty() {
                    return Err(Error::UnsupportedSelector(original.to_string()));
                }
                current.id = Some(name);
                i = next;
            }
            '.' => {
                let (name, next) = read_identifier(&chars, i + 1);
                if name.is_empty() {
                    return Err(Error::UnsupportedSelector(original.to_string()));
                }
                current.classes.push(name);
                i = next;
            }
            '[' => {
                let (attr, next) = parse_attr_condition(original, &chars, i + 1)?;
                current.attrs.push(attr);
                i = next;
            }
            ':' => {
                let (name, next) = read_identifier(&chars, i + 1);
                let pseudo = PseudoClass::parse(&name)
                    .ok_or_else(|| Error::UnsupportedSelector(original.to_string()))?;
                current.pseudo_classes.push(pseudo);
                i = next;
            }
            '*' => {
                // Universal selector: matches any element, adds no condition.
                i += 1;
            }
            _ if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' => {
                if current.tag.is_some() {
                    return Err(Error::UnsupportedSelector(original.to_string()));
                }
                let (name, next) = read_identifier(&chars, i);
                current.tag = Some(name.to_ascii_lowercase());
                i = next;
            }
            _ => return Err(Error::UnsupportedSelector(original.to_string())),
        }
        pending = None;
    }

    if current.is_blank() {
        // Trailing combinator or trailing whitespace after one.
        if pending.is_some() || parts.is_empty() {
            return Err(Error::UnsupportedSelector(original.to_string()));
        }
    } else {
        parts.push(current);
    }

    Ok(parts)
}

fn read_identifier(chars: &[char], from: usize) -> (String, usize) {
    let mut i = from;
    let mut out = String::new();
    while i < chars.len() {
        let ch = chars[i];
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            out.push(ch);
            i += 1;
        } else {
            break;
        }
    }
    (out, i)
}

fn parse_attr_condition(
    original: &str,
    chars: &[char],
    from: usize,
) -> Result<((String, AttrCondition), usize)> {
    let mut i = from;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    let (name, next) = read_identifier(chars, i);
    if name.is_empty() {
        return Err(Error::UnsupportedSelector(original.to_string()));
    }
    i = next;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }

    if chars.get(i) == Some(&']') {
        return Ok(((name, AttrCondition::Exists), i + 1));
    }

    let op = match (chars.get(i), chars.get(i + 1)) {
        (Some('='), _) => {
            i += 1;
            '='
        }
        (Some(op @ ('^' | '$' | '*' | '~' | '|')), Some('=')) => {
            let op = *op;
            i += 2;
            op
        }
        _ => return Err(Error::UnsupportedSelector(original.to_string())),
    };

    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }

    let value = if matches!(chars.get(i), Some('"') | Some('\'')) {
        let quote = chars[i];
        i += 1;
        let start = i;
        while i < chars.len() && chars[i] != quote {
            i += 1;
        }
        if i >= chars.len() {
            return Err(Error::UnsupportedSelector(original.to_string()));
        }
        let value: String = chars[start..i].iter().collect();
        i += 1;
        value
    } else {
        let start = i;
        while i < chars.len() && chars[i] != ']' && !chars[i].is_whitespace() {
            i += 1;
        }
        chars[start..i].iter().collect()
    };

    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if chars.get(i) != Some(&']') {
        return Err(Error::UnsupportedSelector(original.to_string()));
    }
    i += 1;

    let condition = match op {
        '=' => AttrCondition::Eq(value),
        '^' => AttrCondition::StartsWith(value),
        '$' => AttrCondition::EndsWith(value),
        '*' => AttrCondition::Contains(value),
        '~' => AttrCondition::Includes(value),
        '|' => AttrCondition::DashMatch(value),
        _ => return Err(Error::UnsupportedSelector(original.to_string())),
    };

    Ok(((name, condition), i))
}

impl Dom {
    pub(crate) fn matches_selector_chain(&self, node_id: NodeId, chain: &[SelectorPart]) -> bool {
        let Some((last, rest)) = chain.split_last() else {
            return false;
        };
        if !self.matches_part(node_id, last) {
            return false;
        }
        self.matches_chain_prefix(node_id, rest, last.combinator)
    }

    fn matches_chain_prefix(
        &self,
        node_id: NodeId,
        chain: &[SelectorPart],
        combinator: Option<Combinator>,
    ) -> bool {
        let Some((part, rest)) = chain.split_last() else {
            return true;
        };
        let Some(combinator) = combinator else {
            return false;
        };

        match combinator {
            Combinator::Descendant => {
                let mut cursor = self.parent(node_id);
                while let Some(ancestor) = cursor {
                    if self.element(ancestor).is_some()
                        && self.matches_part(ancestor, part)
                        && self.matches_chain_prefix(ancestor, rest, part.combinator)
                    {
                        return true;
                    }
                    cursor = self.parent(ancestor);
                }
                false
            }
            Combinator::Child => match self.parent(node_id) {
                Some(parent) if self.element(parent).is_some() => {
                    self.matches_part(parent, part)
                        && self.matches_chain_prefix(parent, rest, part.combinator)
                }
                _ => false,
            },
            Combinator::AdjacentSibling => match self.previous_element_sibling(node_id) {
                Some(sibling) => {
                    self.matches_part(sibling, part)
                        && self.matches_chain_prefix(sibling, rest, part.combinator)
                }
                None => false,
            },
            Combinator::GeneralSibling => {
                let mut cursor = self.previous_element_sibling(node_id);
                while let Some(sibling) = cursor {
                    if self.matches_part(sibling, part)
                        && self.matches_chain_prefix(sibling, rest, part.combinator)
                    {
                        return true;
                    }
                    cursor = self.previous_element_sibling(sibling);
                }
                false
            }
        }
    }

    fn matches_part(&self, node_id: NodeId, part: &SelectorPart) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };

        if let Some(tag) = &part.tag {
            if !element.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(id) = &part.id {
            if element.attr("id") != Some(id.as_str()) {
                return false;
            }
        }

        for class in &part.classes {
            if !self.has_class(node_id, class) {
                return false;
            }
        }

        for (name, condition) in &part.attrs {
            if !attr_condition_matches(element.attr(name), condition) {
                return false;
            }
        }

        part.pseudo_classes
            .iter()
            .all(|pseudo| self.matches_pseudo_class(node_id, *pseudo))
    }

    fn matches_pseudo_class(&self, node_id: NodeId, pseudo: PseudoClass) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };
        match pseudo {
            PseudoClass::FirstChild => self.element_sibling_index(node_id) == Some(0),
            PseudoClass::LastChild => {
                let Some(parent) = self.parent(node_id) else {
                    return false;
                };
                self.children(parent)
                    .iter()
                    .rev()
                    .find(|child| self.element(**child).is_some())
                    == Some(&node_id)
            }
            PseudoClass::Checked => element.checked(),
            PseudoClass::Disabled => element.disabled(),
            PseudoClass::Enabled => !element.disabled(),
            PseudoClass::Required => element.required(),
            PseudoClass::Optional => !element.required(),
            PseudoClass::Empty => self.children(node_id).is_empty(),
        }
    }

    fn previous_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let parent = self.parent(node_id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|child| *child == node_id)?;
        siblings[..pos]
            .iter()
            .rev()
            .find(|child| self.element(**child).is_some())
            .copied()
    }

    fn element_sibling_index(&self, node_id: NodeId) -> Option<usize> {
        let parent = self.parent(node_id)?;
        self.children(parent)
            .iter()
            .filter(|child| self.element(**child).is_some())
            .position(|child| *child == node_id)
    }
}

fn attr_condition_matches(actual: Option<&str>, condition: &AttrCondition) -> bool {
    match condition {
        AttrCondition::Exists => actual.is_some(),
        AttrCondition::Eq(expected) => actual == Some(expected.as_str()),
        AttrCondition::StartsWith(prefix) => {
            !prefix.is_empty() && actual.map(|v| v.starts_with(prefix)).unwrap_or(false)
        }
        AttrCondition::EndsWith(suffix) => {
            !suffix.is_empty() && actual.map(|v| v.ends_with(suffix)).unwrap_or(false)
        }
        AttrCondition::Contains(needle) => {
            !needle.is_empty() && actual.map(|v| v.contains(needle)).unwrap_or(false)
        }
        AttrCondition::Includes(word) => actual
            .map(|v| v.split_whitespace().any(|token| token == word))
            .unwrap_or(false),
        AttrCondition::DashMatch(expected) => actual
            .map(|v| v == expected || v.starts_with(&format!("{expected}-")))
            .unwrap_or(false),
    }
}
