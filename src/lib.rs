//! Deterministic headless engine for marketing-page behaviors.
//!
//! `page_motion` parses a page's HTML into a DOM arena, wires the site's
//! presentational behaviors (scroll-triggered counter animations, mobile
//! menu toggling, smooth-scroll anchors, form validation, URL-parameter
//! prefill, scroll-driven nav styling, entrance effects) as native event
//! handlers, and drives everything under a virtual clock so tests can
//! observe every intermediate state.

use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;
use std::fmt;

mod behaviors;
pub mod counter;
mod layout;
mod selector;

#[cfg(test)]
mod tests;

use behaviors::{Behavior, Validator};
use counter::CounterRun;
use layout::Viewport;
use selector::{SelectorPart, parse_selector_groups};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    Behavior(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::Behavior(msg) => write!(f, "behavior error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    tag_name: String,
    attrs: HashMap<String, String>,
    value: String,
    checked: bool,
    disabled: bool,
    readonly: bool,
    required: bool,
}

impl Element {
    fn from_attrs(tag_name: String, attrs: HashMap<String, String>) -> Self {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let checked = attrs.contains_key("checked");
        let disabled = attrs.contains_key("disabled");
        let readonly = attrs.contains_key("readonly");
        let required = attrs.contains_key("required");
        Self {
            tag_name,
            attrs,
            value,
            checked,
            disabled,
            readonly,
            required,
        }
    }

    pub(crate) fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub(crate) fn checked(&self) -> bool {
        self.checked
    }

    pub(crate) fn disabled(&self) -> bool {
        self.disabled
    }

    pub(crate) fn required(&self) -> bool {
        self.required
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    nodes: Vec<Node>,
    root: NodeId,
    id_index: HashMap<String, NodeId>,
}

impl Dom {
    fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let element = Element::from_attrs(tag_name, attrs);
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = self
            .element(id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            self.id_index.insert(id_attr, id);
        }
        id
    }

    pub(crate) fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        let element = Element::from_attrs(tag_name.to_string(), HashMap::new());
        self.create_node(None, NodeType::Element(element))
    }

    fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    pub(crate) fn children(&self, node_id: NodeId) -> &[NodeId] {
        &self.nodes[node_id.0].children
    }

    /// Self-or-descendant containment, like `Node.contains`.
    pub(crate) fn contains(&self, ancestor: NodeId, node_id: NodeId) -> bool {
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        stacker::maybe_grow(64 * 1024, 4 * 1024 * 1024, || {
            self.text_content_inner(node_id)
        })
    }

    fn text_content_inner(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document | NodeType::Element(_) => {
                let mut out = String::new();
                for child in &self.nodes[node_id.0].children {
                    out.push_str(&self.text_content_inner(*child));
                }
                out
            }
            NodeType::Text(text) => text.clone(),
        }
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Behavior(
                "text content target is not an element".into(),
            ));
        }
        self.nodes[node_id.0].children.clear();
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        Ok(())
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub(crate) fn insert_first(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(0, child);
    }

    /// Detaches a node from its parent. The arena slot stays allocated but
    /// the node no longer participates in traversal or queries.
    pub(crate) fn detach(&mut self, node_id: NodeId) {
        if let Some(parent) = self.nodes[node_id.0].parent.take() {
            self.nodes[parent.0]
                .children
                .retain(|child| *child != node_id);
        }
        if let Some(id_attr) = self
            .element(node_id)
            .and_then(|e| e.attrs.get("id").cloned())
        {
            if self.id_index.get(&id_attr) == Some(&node_id) {
                self.id_index.remove(&id_attr);
            }
        }
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(name).cloned())
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        if name == "id" {
            if let Some(old) = self.attr(node_id, "id") {
                if self.id_index.get(&old) == Some(&node_id) {
                    self.id_index.remove(&old);
                }
            }
            self.id_index.insert(value.to_string(), node_id);
        }
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Behavior("attribute target is not an element".into()))?;
        element.attrs.insert(name.to_string(), value.to_string());
        match name {
            "value" => element.value = value.to_string(),
            "checked" => element.checked = true,
            "disabled" => element.disabled = true,
            "readonly" => element.readonly = true,
            "required" => element.required = true,
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn remove_attr(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        if name == "id" {
            if let Some(old) = self.attr(node_id, "id") {
                if self.id_index.get(&old) == Some(&node_id) {
                    self.id_index.remove(&old);
                }
            }
        }
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Behavior("attribute target is not an element".into()))?;
        element.attrs.remove(name);
        match name {
            "checked" => element.checked = false,
            "disabled" => element.disabled = false,
            "readonly" => element.readonly = false,
            "required" => element.required = false,
            _ => {}
        }
        Ok(())
    }

    pub(crate) fn has_class(&self, node_id: NodeId, class_name: &str) -> bool {
        self.element(node_id)
            .and_then(|element| element.attrs.get("class"))
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }

    pub(crate) fn add_class(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Behavior("classList target is not an element".into()))?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn remove_class(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Behavior("classList target is not an element".into()))?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        classes.retain(|name| name != class_name);
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Behavior("value target is not an element".into()))?;
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Behavior("value target is not an element".into()))?;
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn checked(&self, node_id: NodeId) -> Result<bool> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Behavior("checked target is not an element".into()))?;
        Ok(element.checked)
    }

    pub(crate) fn set_checked(&mut self, node_id: NodeId, checked: bool) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Behavior("checked target is not an element".into()))?;
        element.checked = checked;
        Ok(())
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id).map(|e| e.disabled).unwrap_or(false)
    }

    pub(crate) fn readonly(&self, node_id: NodeId) -> bool {
        self.element(node_id).map(|e| e.readonly).unwrap_or(false)
    }

    pub(crate) fn required(&self, node_id: NodeId) -> bool {
        self.element(node_id).map(|e| e.required).unwrap_or(false)
    }

    pub(crate) fn style_get(&self, node_id: NodeId, prop: &str) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::Behavior("style target is not an element".into()))?;
        let decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        Ok(decls
            .iter()
            .find(|(name, _)| name == prop)
            .map(|(_, value)| value.clone())
            .unwrap_or_default())
    }

    pub(crate) fn style_set(&mut self, node_id: NodeId, prop: &str, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::Behavior("style target is not an element".into()))?;
        let mut decls = parse_style_declarations(element.attrs.get("style").map(String::as_str));
        if let Some(pos) = decls.iter().position(|(name, _)| name == prop) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((prop.to_string(), value.to_string()));
        }

        if decls.is_empty() {
            // Keep an empty style attribute, matching CSSStyleDeclaration.
            element.attrs.insert("style".to_string(), String::new());
        } else {
            element
                .attrs
                .insert("style".to_string(), serialize_style_declarations(&decls));
        }
        Ok(())
    }

    pub(crate) fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self
                .tag_name(current)
                .map(|t| t.eq_ignore_ascii_case(tag))
                .unwrap_or(false)
            {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    /// All connected element nodes in document order.
    pub(crate) fn all_element_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if self.element(node).is_some() {
                out.push(node);
            }
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    fn descendant_elements(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.element(node).is_some() {
                out.push(node);
            }
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        if let Some(id) = id_only_group(&groups) {
            return Ok(self.by_id(id));
        }
        for node in self.all_element_nodes() {
            if self.matches_groups(node, &groups) {
                return Ok(Some(node));
            }
        }
        Ok(None)
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        Ok(self
            .all_element_nodes()
            .into_iter()
            .filter(|node| self.matches_groups(*node, &groups))
            .collect())
    }

    pub(crate) fn query_selector_all_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        Ok(self
            .descendant_elements(root)
            .into_iter()
            .filter(|node| self.matches_groups(*node, &groups))
            .collect())
    }

    fn matches_groups(&self, node_id: NodeId, groups: &[Vec<SelectorPart>]) -> bool {
        groups
            .iter()
            .any(|chain| self.matches_selector_chain(node_id, chain))
    }

    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        stacker::maybe_grow(64 * 1024, 4 * 1024 * 1024, || self.dump_node_inner(node_id))
    }

    fn dump_node_inner(&self, node_id: NodeId) -> String {
        match &self.nodes[node_id.0].node_type {
            NodeType::Document => {
                let mut out = String::new();
                for child in &self.nodes[node_id.0].children {
                    out.push_str(&self.dump_node_inner(*child));
                }
                out
            }
            NodeType::Text(text) => text.clone(),
            NodeType::Element(element) => {
                let mut out = String::new();
                out.push('<');
                out.push_str(&element.tag_name);
                let mut names: Vec<&String> = element.attrs.keys().collect();
                names.sort();
                for name in names {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&element.attrs[name]);
                    out.push('"');
                }
                out.push('>');
                for child in &self.nodes[node_id.0].children {
                    out.push_str(&self.dump_node_inner(*child));
                }
                out.push_str("</");
                out.push_str(&element.tag_name);
                out.push('>');
                out
            }
        }
    }

    /// Initial control values: textareas take their text, selects sync to
    /// the selected (or first) option, as after a real parse.
    fn initialize_form_control_values(&mut self) -> Result<()> {
        for node in self.all_element_nodes() {
            let tag = self.tag_name(node).unwrap_or_default().to_ascii_lowercase();
            match tag.as_str() {
                "textarea" => {
                    let text = self.text_content(node);
                    self.set_value(node, &text)?;
                }
                "select" => {
                    let options = self.select_options(node);
                    let selected = options
                        .iter()
                        .find(|opt| self.attr(**opt, "selected").is_some())
                        .or_else(|| options.first())
                        .copied();
                    if let Some(option) = selected {
                        let value = self.option_value(option);
                        self.set_value(node, &value)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn select_options(&self, select: NodeId) -> Vec<NodeId> {
        self.descendant_elements(select)
            .into_iter()
            .filter(|node| {
                self.tag_name(*node)
                    .map(|t| t.eq_ignore_ascii_case("option"))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn option_value(&self, option: NodeId) -> String {
        self.attr(option, "value")
            .unwrap_or_else(|| self.text_content(option).trim().to_string())
    }

    /// Sets a select's value if a matching option exists, mirroring how
    /// assigning `select.value` is ignored without a matching option.
    pub(crate) fn set_select_value(&mut self, select: NodeId, value: &str) -> Result<bool> {
        let options = self.select_options(select);
        let matched = options
            .iter()
            .find(|opt| self.option_value(**opt) == value)
            .copied();
        let Some(matched) = matched else {
            return Ok(false);
        };
        for option in options {
            if option == matched {
                self.set_attr(option, "selected", "true")?;
            } else {
                self.remove_attr(option, "selected")?;
            }
        }
        self.set_value(select, value)?;
        Ok(true)
    }
}

fn id_only_group(groups: &[Vec<SelectorPart>]) -> Option<&str> {
    match groups {
        [chain] => match chain.as_slice() {
            [part] => part.id_only(),
            _ => None,
        },
        _ => None,
    }
}

fn class_tokens(class_attr: Option<&str>) -> Vec<String> {
    class_attr
        .map(|value| value.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.attrs.remove("class");
    } else {
        element.attrs.insert("class".to_string(), classes.join(" "));
    }
}

fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut decls = Vec::new();
    for decl in style_attr.unwrap_or_default().split(';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if !name.is_empty() && !value.is_empty() {
            decls.push((name.to_string(), value.to_string()));
        }
    }
    decls
}

fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Default)]
struct ListenerStore {
    map: HashMap<NodeId, HashMap<String, Vec<Behavior>>>,
}

impl ListenerStore {
    fn add(&mut self, node_id: NodeId, event: &str, behavior: Behavior) {
        self.map
            .entry(node_id)
            .or_default()
            .entry(event.to_string())
            .or_default()
            .push(behavior);
    }

    fn get(&self, node_id: NodeId, event: &str) -> Vec<Behavior> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    event_type: String,
    target: NodeId,
    current_target: NodeId,
    key: String,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl EventState {
    fn new(event_type: &str, target: NodeId) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            key: String::new(),
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub(crate) fn target(&self) -> NodeId {
        self.target
    }

    pub(crate) fn current_target(&self) -> NodeId {
        self.current_target
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub(crate) fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TimerTask {
    /// Startup counter sweep catching above-the-fold stats before any scroll.
    CounterSweep,
    /// First stage of status-message dismissal: fade out, then schedule removal.
    FadeMessage(NodeId),
    RemoveNode(NodeId),
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    id: i64,
    due_at: i64,
    order: i64,
    interval_ms: Option<i64>,
    task: TimerTask,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
    pub interval_ms: Option<i64>,
}

pub struct Page {
    dom: Dom,
    listeners: ListenerStore,
    task_queue: Vec<ScheduledTask>,
    frame_queue: Vec<CounterRun>,
    next_frame_at: Option<i64>,
    counter_watch: Vec<NodeId>,
    animated: HashSet<NodeId>,
    entrance_watch: Vec<NodeId>,
    viewport: Viewport,
    location_hash: String,
    query_pairs: Vec<(String, String)>,
    validator: Validator,
    active_element: Option<NodeId>,
    now_ms: i64,
    timer_step_limit: usize,
    next_timer_id: i64,
    next_task_order: i64,
    trace: bool,
    trace_events: bool,
    trace_timers: bool,
    trace_frames: bool,
    trace_logs: Vec<String>,
    trace_log_limit: usize,
    trace_to_stderr: bool,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::open("", html)
    }

    /// Opens a page at `url`; the query string drives form prefill and the
    /// fragment is updated by anchor navigation.
    pub fn open(url: &str, html: &str) -> Result<Self> {
        let mut dom = parse_html(html)?;
        dom.initialize_form_control_values()?;
        let mut page = Self {
            dom,
            listeners: ListenerStore::default(),
            task_queue: Vec::new(),
            frame_queue: Vec::new(),
            next_frame_at: None,
            counter_watch: Vec::new(),
            animated: HashSet::new(),
            entrance_watch: Vec::new(),
            viewport: Viewport::default(),
            location_hash: behaviors::url_fragment(url),
            query_pairs: behaviors::parse_query(url),
            validator: Validator::new()?,
            active_element: None,
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
            trace: false,
            trace_events: true,
            trace_timers: true,
            trace_frames: true,
            trace_logs: Vec::new(),
            trace_log_limit: 10_000,
            trace_to_stderr: true,
        };
        page.init_behaviors()?;
        Ok(page)
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace_logs)
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_to_stderr = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_timers = enabled;
    }

    pub fn set_trace_frames(&mut self, enabled: bool) {
        self.trace_frames = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Behavior(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_log_limit = max_entries;
        while self.trace_logs.len() > self.trace_log_limit {
            self.trace_logs.remove(0);
        }
        Ok(())
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Behavior(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.timer_step_limit = max_steps;
        Ok(())
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    pub fn scroll_y(&self) -> i64 {
        self.viewport.scroll_y
    }

    pub fn viewport_size(&self) -> (i64, i64) {
        (self.viewport.width, self.viewport.height)
    }

    pub fn location_hash(&self) -> &str {
        &self.location_hash
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        let click_outcome = self.dispatch_event(target, "click", "")?;
        if click_outcome.default_prevented {
            return Ok(());
        }

        if is_checkbox_input(&self.dom, target) {
            let current = self.dom.checked(target)?;
            self.dom.set_checked(target, !current)?;
            self.dispatch_event(target, "input", "")?;
            self.dispatch_event(target, "change", "")?;
        }

        if is_radio_input(&self.dom, target) {
            let current = self.dom.checked(target)?;
            if !current {
                self.uncheck_other_radios_in_group(target)?;
                self.dom.set_checked(target, true)?;
                self.dispatch_event(target, "input", "")?;
                self.dispatch_event(target, "change", "")?;
            }
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form_id) = self.form_owner(target) {
                self.dispatch_event(form_id, "submit", "")?;
            }
        }

        Ok(())
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) || self.dom.readonly(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();

        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        self.dom.set_value(target, text)?;
        self.dispatch_event(target, "input", "")?;
        Ok(())
    }

    /// Sets a select's value, firing `change`; ignored when no option matches.
    pub fn select_value(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        let tag = self
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag != "select" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "select".into(),
                actual: tag,
            });
        }
        if self.dom.set_select_value(target, value)? {
            self.dispatch_event(target, "change", "")?;
        }
        Ok(())
    }

    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        let tag = self
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag != "input" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox|radio]".into(),
                actual: tag,
            });
        }

        let kind = self
            .dom
            .attr(target, "type")
            .unwrap_or_else(|| "text".into())
            .to_ascii_lowercase();
        if kind != "checkbox" && kind != "radio" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox|radio]".into(),
                actual: format!("input[type={kind}]"),
            });
        }

        let current = self.dom.checked(target)?;
        if current != checked {
            if kind == "radio" && checked {
                self.uncheck_other_radios_in_group(target)?;
            }
            self.dom.set_checked(target, checked)?;
            self.dispatch_event(target, "input", "")?;
            self.dispatch_event(target, "change", "")?;
        }

        Ok(())
    }

    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if let Some(form_id) = self.form_owner(target) {
            self.dispatch_event(form_id, "submit", "")?;
        }
        Ok(())
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.focus_node(target)
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.blur_node(target)
    }

    pub fn hover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, "mouseenter", "")?;
        Ok(())
    }

    pub fn unhover(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, "mouseleave", "")?;
        Ok(())
    }

    /// Dispatches a `keydown` at the document level, like a key pressed
    /// without a focused control.
    pub fn press_key(&mut self, key: &str) -> Result<()> {
        let root = self.dom.root;
        self.dispatch_event(root, "keydown", key)?;
        Ok(())
    }

    pub fn dispatch(&mut self, selector: &str, event: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(target, event, "")?;
        Ok(())
    }

    /// Scrolls the window to `y` (clamped at 0) and fires a scroll event.
    pub fn scroll_to(&mut self, y: i64) -> Result<()> {
        self.viewport.scroll_y = y.max(0);
        let root = self.dom.root;
        self.dispatch_event(root, "scroll", "")?;
        Ok(())
    }

    pub fn resize_to(&mut self, width: i64, height: i64) -> Result<()> {
        if width <= 0 || height <= 0 {
            return Err(Error::Behavior(
                "resize_to requires positive dimensions".into(),
            ));
        }
        self.viewport.width = width;
        self.viewport.height = height;
        let root = self.dom.root;
        self.dispatch_event(root, "resize", "")?;
        Ok(())
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                interval_ms: task.interval_ms,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Behavior(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.now_ms;
        let target = self.now_ms.saturating_add(delta_ms);
        let ran = self.run_until(target)?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={} from={} to={} ran={}",
            delta_ms, from, self.now_ms, ran
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.now_ms {
            return Err(Error::Behavior(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.now_ms
            )));
        }
        let from = self.now_ms;
        let ran = self.run_until(target_ms)?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={} to={} ran={}",
            from, self.now_ms, ran
        ));
        Ok(())
    }

    /// Runs every pending timer and animation frame, advancing the clock as
    /// far as needed. Counter runs always terminate, so this converges.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.now_ms;
        let mut steps = 0usize;
        loop {
            let timer_at = self
                .task_queue
                .iter()
                .map(|task| task.due_at.max(self.now_ms))
                .min();
            let at = match (timer_at, self.next_frame_at) {
                (None, None) => break,
                (Some(t), None) => t,
                (None, Some(f)) => f,
                (Some(t), Some(f)) => t.min(f),
            };
            steps += 1;
            if steps > self.timer_step_limit {
                return Err(self.step_limit_error(steps));
            }
            self.step_at(at, timer_at == Some(at))?;
        }
        self.trace_timer_line(format!(
            "[timer] flush from={} to={} ran={}",
            from, self.now_ms, steps
        ));
        Ok(())
    }

    /// Runs the next scheduled timer even if it is not yet due, jumping the
    /// clock forward to its deadline. Frames are not serviced.
    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.next_task_index(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };

        let task = self.task_queue.remove(next_idx);
        if task.due_at > self.now_ms {
            self.now_ms = task.due_at;
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    fn run_until(&mut self, target_ms: i64) -> Result<usize> {
        let mut steps = 0usize;
        loop {
            let timer_at = self
                .task_queue
                .iter()
                .filter(|task| task.due_at <= target_ms)
                .map(|task| task.due_at.max(self.now_ms))
                .min();
            let frame_at = self.next_frame_at.filter(|at| *at <= target_ms);
            let at = match (timer_at, frame_at) {
                (None, None) => break,
                (Some(t), None) => t,
                (None, Some(f)) => f,
                (Some(t), Some(f)) => t.min(f),
            };
            steps += 1;
            if steps > self.timer_step_limit {
                return Err(self.step_limit_error(steps));
            }
            self.step_at(at, timer_at == Some(at))?;
        }
        if self.now_ms < target_ms {
            self.now_ms = target_ms;
        }
        Ok(steps)
    }

    // Timers win timestamp ties so a frame scheduled for the same instant
    // still observes the timer's side effects.
    fn step_at(&mut self, at: i64, timer_due: bool) -> Result<()> {
        if self.now_ms < at {
            self.now_ms = at;
        }
        if timer_due {
            if let Some(idx) = self.next_task_index(Some(self.now_ms)) {
                let task = self.task_queue.remove(idx);
                self.execute_timer_task(task)?;
            }
            return Ok(());
        }
        self.run_frame_tick()
    }

    fn step_limit_error(&self, steps: usize) -> Error {
        Error::Behavior(format!(
            "timer step limit exceeded: limit={} steps={} now_ms={}",
            self.timer_step_limit, steps, self.now_ms
        ))
    }

    fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.map(|limit| task.due_at <= limit).unwrap_or(true))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    pub(crate) fn schedule(&mut self, delay_ms: i64, task: TimerTask) -> i64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        let due_at = self.now_ms.saturating_add(delay_ms.max(0));
        self.trace_timer_line(format!("[timer] schedule id={id} due_at={due_at}"));
        self.task_queue.push(ScheduledTask {
            id,
            due_at,
            order,
            interval_ms: None,
            task,
        });
        id
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} due_at={} now_ms={}",
            task.id, task.due_at, self.now_ms
        ));
        match task.task {
            TimerTask::CounterSweep => self.scan_counters(),
            TimerTask::FadeMessage(node) => {
                self.dom.style_set(node, "opacity", "0")?;
                self.dom
                    .style_set(node, "transition", "opacity 0.5s ease")?;
                self.schedule(500, TimerTask::RemoveNode(node));
                Ok(())
            }
            TimerTask::RemoveNode(node) => {
                self.dom.detach(node);
                Ok(())
            }
        }
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_checked(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.checked(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn assert_missing(&self, selector: &str) -> Result<()> {
        if let Some(target) = self.dom.query_selector(selector)? {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: "no match".into(),
                actual: "a match".into(),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_has_class(&self, selector: &str, class_name: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !self.dom.has_class(target, class_name) {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("class '{class_name}'"),
                actual: self.dom.attr(target, "class").unwrap_or_default(),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_lacks_class(&self, selector: &str, class_name: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.has_class(target, class_name) {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("no class '{class_name}'"),
                actual: self.dom.attr(target, "class").unwrap_or_default(),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_style(&self, selector: &str, prop: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.style_get(target, prop)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("{prop}: {expected}"),
                actual: format!("{prop}: {actual}"),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_attr(&self, selector: &str, name: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.attr(target, name).unwrap_or_default();
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: format!("{name}=\"{expected}\""),
                actual: format!("{name}=\"{actual}\""),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    fn form_owner(&self, node_id: NodeId) -> Option<NodeId> {
        if self
            .dom
            .tag_name(node_id)
            .map(|t| t.eq_ignore_ascii_case("form"))
            .unwrap_or(false)
        {
            Some(node_id)
        } else {
            self.dom.find_ancestor_by_tag(node_id, "form")
        }
    }

    fn uncheck_other_radios_in_group(&mut self, target: NodeId) -> Result<()> {
        let target_name = self.dom.attr(target, "name").unwrap_or_default();
        if target_name.is_empty() {
            return Ok(());
        }
        let target_form = self.form_owner(target);

        for node in self.dom.all_element_nodes() {
            if node == target {
                continue;
            }
            if !is_radio_input(&self.dom, node) {
                continue;
            }
            if self.dom.attr(node, "name").unwrap_or_default() != target_name {
                continue;
            }
            if self.form_owner(node) != target_form {
                continue;
            }
            if self.dom.checked(node)? {
                self.dom.set_checked(node, false)?;
            }
        }

        Ok(())
    }

    pub(crate) fn dispatch_event(
        &mut self,
        target: NodeId,
        event_type: &str,
        key: &str,
    ) -> Result<EventState> {
        let mut event = EventState::new(event_type, target);
        event.key = key.to_string();

        // Bubble path: target first, then ancestors up to the document.
        let mut path = Vec::new();
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.dom.parent(node);
        }

        for node in path {
            event.current_target = node;
            let listeners = self.listeners.get(node, &event.event_type);
            for behavior in listeners {
                if self.trace {
                    let target_label = self.trace_node_label(event.target);
                    let current_label = self.trace_node_label(event.current_target);
                    self.trace_event_line(format!(
                        "[event] {} target={} current={} behavior={:?} default_prevented={}",
                        event.event_type,
                        target_label,
                        current_label,
                        behavior,
                        event.default_prevented
                    ));
                }
                self.run_behavior(&behavior, &mut event)?;
            }
            if event.propagation_stopped {
                break;
            }
        }

        if self.trace {
            let target_label = self.trace_node_label(event.target);
            self.trace_event_line(format!(
                "[event] done {} target={} default_prevented={} propagation_stopped={}",
                event.event_type, target_label, event.default_prevented, event.propagation_stopped
            ));
        }
        Ok(event)
    }

    fn focus_node(&mut self, node: NodeId) -> Result<()> {
        if self.dom.disabled(node) {
            return Ok(());
        }
        if self.active_element == Some(node) {
            return Ok(());
        }
        if let Some(current) = self.active_element {
            self.blur_node(current)?;
        }
        self.active_element = Some(node);
        self.dispatch_event(node, "focus", "")?;
        Ok(())
    }

    fn blur_node(&mut self, node: NodeId) -> Result<()> {
        if self.active_element != Some(node) {
            return Ok(());
        }
        self.dispatch_event(node, "blur", "")?;
        self.active_element = None;
        Ok(())
    }

    fn trace_node_label(&self, node_id: NodeId) -> String {
        match self.dom.element(node_id) {
            Some(element) => match element.attrs.get("id") {
                Some(id) => format!("{}#{}", element.tag_name, id),
                None => element.tag_name.clone(),
            },
            None => "document".into(),
        }
    }

    fn trace_event_line(&mut self, line: String) {
        if self.trace && self.trace_events {
            self.trace_push(line);
        }
    }

    fn trace_timer_line(&mut self, line: String) {
        if self.trace && self.trace_timers {
            self.trace_push(line);
        }
    }

    pub(crate) fn trace_frame_line(&mut self, line: String) {
        if self.trace && self.trace_frames {
            self.trace_push(line);
        }
    }

    fn trace_push(&mut self, line: String) {
        if self.trace_to_stderr {
            eprintln!("{line}");
        }
        self.trace_logs.push(line);
        while self.trace_logs.len() > self.trace_log_limit {
            self.trace_logs.remove(0);
        }
    }
}

fn is_checkbox_input(dom: &Dom, node_id: NodeId) -> bool {
    input_type(dom, node_id)
        .map(|kind| kind == "checkbox")
        .unwrap_or(false)
}

fn is_radio_input(dom: &Dom, node_id: NodeId) -> bool {
    input_type(dom, node_id)
        .map(|kind| kind == "radio")
        .unwrap_or(false)
}

fn input_type(dom: &Dom, node_id: NodeId) -> Option<String> {
    let tag = dom.tag_name(node_id)?;
    if !tag.eq_ignore_ascii_case("input") {
        return None;
    }
    Some(
        dom.attr(node_id, "type")
            .unwrap_or_else(|| "text".into())
            .to_ascii_lowercase(),
    )
}

fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(tag) = dom.tag_name(node_id) else {
        return false;
    };
    if tag.eq_ignore_ascii_case("button") {
        let kind = dom
            .attr(node_id, "type")
            .unwrap_or_else(|| "submit".into())
            .to_ascii_lowercase();
        return kind == "submit";
    }
    if tag.eq_ignore_ascii_case("input") {
        let kind = dom
            .attr(node_id, "type")
            .unwrap_or_default()
            .to_ascii_lowercase();
        return kind == "submit";
    }
    false
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for (count, ch) in text.chars().enumerate() {
        if count >= max_chars {
            out.push('…');
            break;
        }
        out.push(ch);
    }
    out
}

fn parse_html(html: &str) -> Result<Dom> {
    let mut dom = Dom::new();

    let mut stack = vec![dom.root];
    let bytes = html.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        if starts_with_at(bytes, i, b"<!--") {
            if let Some(end) = find_subslice(bytes, i + 4, b"-->") {
                i = end + 3;
            } else {
                return Err(Error::HtmlParse("unclosed HTML comment".into()));
            }
            continue;
        }

        if starts_with_at(bytes, i, b"<!") {
            // Doctype and other declarations.
            while i < bytes.len() && bytes[i] != b'>' {
                i += 1;
            }
            if i >= bytes.len() {
                return Err(Error::HtmlParse("unclosed declaration".into()));
            }
            i += 1;
            continue;
        }

        if bytes[i] == b'<' {
            if starts_with_at(bytes, i, b"</") {
                let (tag, next) = parse_end_tag(html, i)?;
                i = next;

                while stack.len() > 1 {
                    let top = *stack
                        .last()
                        .ok_or_else(|| Error::HtmlParse("invalid stack state".into()))?;
                    let top_tag = dom.tag_name(top).unwrap_or("");
                    let matched = top_tag.eq_ignore_ascii_case(&tag);
                    stack.pop();
                    if matched {
                        break;
                    }
                }
                continue;
            }

            let (tag, attrs, self_closing, next) = parse_start_tag(html, i)?;
            i = next;

            let parent = *stack
                .last()
                .ok_or_else(|| Error::HtmlParse("missing parent element".into()))?;
            let node = dom.create_element(parent, tag.clone(), attrs);

            // Script bodies stay in the tree as raw text; behaviors are
            // native, so the body is never interpreted.
            if tag.eq_ignore_ascii_case("script") {
                let close = find_case_insensitive_end_tag(bytes, i, b"script")
                    .ok_or_else(|| Error::HtmlParse("unclosed <script>".into()))?;
                if let Some(script_body) = html.get(i..close) {
                    if !script_body.is_empty() {
                        dom.create_text(node, script_body.to_string());
                    }
                }
                i = close;
                let (_, after_end) = parse_end_tag(html, i)?;
                i = after_end;
                continue;
            }

            if !self_closing && !is_void_tag(&tag) {
                stack.push(node);
            }
            continue;
        }

        let text_start = i;
        while i < bytes.len() && bytes[i] != b'<' {
            i += 1;
        }

        if let Some(text) = html.get(text_start..i) {
            if !text.is_empty() {
                let parent = *stack
                    .last()
                    .ok_or_else(|| Error::HtmlParse("missing parent element".into()))?;
                dom.create_text(parent, text.to_string());
            }
        }
    }

    Ok(dom)
}

fn parse_start_tag(
    html: &str,
    at: usize,
) -> Result<(String, HashMap<String, String>, bool, usize)> {
    let bytes = html.as_bytes();
    let mut i = at;
    if bytes.get(i) != Some(&b'<') {
        return Err(Error::HtmlParse("expected '<'".into()));
    }
    i += 1;

    skip_ws(bytes, &mut i);
    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }

    let tag = html
        .get(tag_start..i)
        .ok_or_else(|| Error::HtmlParse("invalid tag name".into()))?
        .to_ascii_lowercase();

    if tag.is_empty() {
        return Err(Error::HtmlParse("empty tag name".into()));
    }

    let mut attrs = HashMap::new();
    let mut self_closing = false;

    loop {
        skip_ws(bytes, &mut i);
        if i >= bytes.len() {
            return Err(Error::HtmlParse("unclosed start tag".into()));
        }

        if bytes[i] == b'>' {
            i += 1;
            break;
        }

        if bytes[i] == b'/' && i + 1 < bytes.len() && bytes[i + 1] == b'>' {
            self_closing = true;
            i += 2;
            break;
        }

        let name_start = i;
        while i < bytes.len() && is_attr_name_char(bytes[i]) {
            i += 1;
        }

        let name = html
            .get(name_start..i)
            .ok_or_else(|| Error::HtmlParse("invalid attribute name".into()))?
            .to_ascii_lowercase();

        if name.is_empty() {
            return Err(Error::HtmlParse("invalid attribute name".into()));
        }

        skip_ws(bytes, &mut i);

        let value = if i < bytes.len() && bytes[i] == b'=' {
            i += 1;
            skip_ws(bytes, &mut i);
            parse_attr_value(html, bytes, &mut i)?
        } else {
            // Bare attributes parse as present-and-truthy.
            "true".to_string()
        };

        attrs.insert(name, value);
    }

    Ok((tag, attrs, self_closing, i))
}

fn parse_end_tag(html: &str, at: usize) -> Result<(String, usize)> {
    let bytes = html.as_bytes();
    let mut i = at;

    if !(bytes.get(i) == Some(&b'<') && bytes.get(i + 1) == Some(&b'/')) {
        return Err(Error::HtmlParse("expected end tag".into()));
    }
    i += 2;
    skip_ws(bytes, &mut i);

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }

    let tag = html
        .get(tag_start..i)
        .ok_or_else(|| Error::HtmlParse("invalid end tag".into()))?
        .to_ascii_lowercase();

    while i < bytes.len() && bytes[i] != b'>' {
        i += 1;
    }
    if i >= bytes.len() {
        return Err(Error::HtmlParse("unclosed end tag".into()));
    }

    Ok((tag, i + 1))
}

fn parse_attr_value(html: &str, bytes: &[u8], i: &mut usize) -> Result<String> {
    if *i >= bytes.len() {
        return Err(Error::HtmlParse("missing attribute value".into()));
    }

    if bytes[*i] == b'\'' || bytes[*i] == b'"' {
        let quote = bytes[*i];
        *i += 1;
        let start = *i;
        while *i < bytes.len() && bytes[*i] != quote {
            *i += 1;
        }
        if *i >= bytes.len() {
            return Err(Error::HtmlParse("unclosed quoted attribute value".into()));
        }
        let value = html
            .get(start..*i)
            .ok_or_else(|| Error::HtmlParse("invalid attribute value".into()))?
            .to_string();
        *i += 1;
        return Ok(value);
    }

    let start = *i;
    while *i < bytes.len()
        && !bytes[*i].is_ascii_whitespace()
        && bytes[*i] != b'>'
        && !(bytes[*i] == b'/' && *i + 1 < bytes.len() && bytes[*i + 1] == b'>')
    {
        *i += 1;
    }

    let value = html
        .get(start..*i)
        .ok_or_else(|| Error::HtmlParse("invalid attribute value".into()))?
        .to_string();
    Ok(value)
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_attr_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn starts_with_at(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes.len() >= at + needle.len() && &bytes[at..at + needle.len()] == needle
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || bytes.len() < needle.len() {
        return None;
    }
    (from..=bytes.len() - needle.len()).find(|&i| &bytes[i..i + needle.len()] == needle)
}

fn find_case_insensitive_end_tag(bytes: &[u8], from: usize, tag: &[u8]) -> Option<usize> {
    let mut i = from;
    while i + 2 + tag.len() <= bytes.len() {
        if bytes[i] == b'<' && bytes[i + 1] == b'/' {
            let candidate = &bytes[i + 2..i + 2 + tag.len()];
            if candidate.eq_ignore_ascii_case(tag) {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}
