//! Native page behaviors and their event wiring.
//!
//! Everything an interactive marketing page normally scripts is expressed
//! here as a [`Behavior`] attached through the listener store: the mobile
//! menu, smooth-scroll anchors, form validation, URL-parameter prefill,
//! scroll-driven nav styling, card hover transforms, and status-message
//! dismissal. Counter and entrance scans live in the counter module but
//! are dispatched through the same enum.

use super::*;
use crate::counter::{STARTUP_SWEEP_DELAY_MS, ENTRANCE_SELECTOR};

pub(crate) const MOBILE_BREAKPOINT: i64 = 768;

const NAV_DARK_SCROLL_THRESHOLD: i64 = 100;
const NAV_SHADOW_SCROLL_THRESHOLD: i64 = 10;
const FALLBACK_HEADER_HEIGHT: f64 = 72.0;

const SUCCESS_MESSAGE_LINGER_MS: i64 = 5_000;

pub(crate) const REQUIRED_MESSAGE: &str = "This field is required.";
pub(crate) const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
pub(crate) const PHONE_MESSAGE: &str = "Please enter a valid phone number.";
pub(crate) const SUMMARY_MESSAGE: &str = "Please fill in all required fields marked with *.";

const ERROR_COLOR: &str = "#dc3545";
const ERROR_FIELD_SHADOW: &str = "0 0 0 3px rgba(220, 53, 69, 0.1)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Behavior {
    ToggleMenu,
    CloseMenu,
    CloseMenuOnOutsideClick,
    CloseMenuOnEscape,
    CloseMenuOnResize,
    CloseMenuOnNavLink,
    AnchorNavigate,
    ValidateFormOnSubmit,
    ValidateFieldOnBlur,
    ClearFieldErrorOnInput,
    NavScrollStyle,
    CounterScan,
    EntranceScan,
    CardHoverEnter,
    CardHoverLeave,
    SelectFocusRaise,
    SelectBlurRestore,
    DismissErrorMessage,
}

/// Compiled validation patterns. The phone pattern is checked against the
/// value with all whitespace stripped.
pub(crate) struct Validator {
    email: fancy_regex::Regex,
    phone: fancy_regex::Regex,
}

impl Validator {
    pub(crate) fn new() -> Result<Self> {
        Ok(Self {
            email: compile_pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?,
            phone: compile_pattern(r"^[\d\s\-\+\(\)]{10,}$")?,
        })
    }

    pub(crate) fn email_ok(&self, value: &str) -> Result<bool> {
        self.email
            .is_match(value)
            .map_err(|err| Error::Behavior(format!("email pattern failed: {err}")))
    }

    pub(crate) fn phone_ok(&self, value: &str) -> Result<bool> {
        let stripped: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
        self.phone
            .is_match(&stripped)
            .map_err(|err| Error::Behavior(format!("phone pattern failed: {err}")))
    }
}

fn compile_pattern(pattern: &str) -> Result<fancy_regex::Regex> {
    fancy_regex::Regex::new(pattern)
        .map_err(|err| Error::Behavior(format!("invalid pattern {pattern:?}: {err}")))
}

pub(crate) fn url_fragment(url: &str) -> String {
    url.split_once('#')
        .map(|(_, fragment)| format!("#{fragment}"))
        .unwrap_or_default()
}

pub(crate) fn parse_query(url: &str) -> Vec<(String, String)> {
    let without_fragment = url.split_once('#').map(|(head, _)| head).unwrap_or(url);
    let Some((_, query)) = without_fragment.split_once('?') else {
        return Vec::new();
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key), percent_decode(value))
        })
        .collect()
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match (hex_val(bytes.get(i + 1)), hex_val(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push(hi * 16 + lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(byte: Option<&u8>) -> Option<u8> {
    match byte? {
        b @ b'0'..=b'9' => Some(b - b'0'),
        b @ b'a'..=b'f' => Some(b - b'a' + 10),
        b @ b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn interest_label(key: &str) -> Option<&'static str> {
    Some(match key {
        "agriculture" => "Agriculture",
        "renewable" => "Renewable Energy",
        "business" => "Small Business",
        "property" => "Property Development",
        "commercial_agriculture" => "Commercial Agriculture",
        "industrial" => "Industrial Development",
        _ => return None,
    })
}

fn workshop_label(key: &str) -> Option<&'static str> {
    Some(match key {
        "basic" => "Basic Financial Literacy - $15",
        "agriculture" => "Agricultural Investment Basics - $25",
        "advanced" => "Advanced Investment Strategies - $50",
        _ => return None,
    })
}

impl Page {
    /// Wires every behavior the page supports. Each block degrades to a
    /// no-op when its markup is absent, so partial pages stay usable.
    pub(crate) fn init_behaviors(&mut self) -> Result<()> {
        let root = self.dom.root();

        self.init_menu()?;

        for anchor in self.dom.query_selector_all(r##"a[href^="#"]"##)? {
            self.listeners.add(anchor, "click", Behavior::AnchorNavigate);
        }

        if self.dom.query_selector("nav")?.is_some() {
            self.listeners.add(root, "scroll", Behavior::NavScrollStyle);
            self.apply_nav_scroll_style()?;
        }

        self.register_counter_watch()?;
        self.listeners.add(root, "scroll", Behavior::CounterScan);
        self.schedule(STARTUP_SWEEP_DELAY_MS, TimerTask::CounterSweep);

        self.register_entrance_watch()?;
        self.listeners.add(root, "scroll", Behavior::EntranceScan);
        // Observer registrations report initial intersections immediately.
        self.scan_entrances()?;

        self.init_forms()?;
        self.apply_query_prefill()?;

        for card in self.dom.query_selector_all(ENTRANCE_SELECTOR)? {
            self.listeners
                .add(card, "mouseenter", Behavior::CardHoverEnter);
            self.listeners
                .add(card, "mouseleave", Behavior::CardHoverLeave);
        }

        for select in self.dom.query_selector_all("select")? {
            self.listeners
                .add(select, "focus", Behavior::SelectFocusRaise);
            self.listeners
                .add(select, "blur", Behavior::SelectBlurRestore);
        }

        for message in self.dom.query_selector_all(".success-message")? {
            self.schedule(SUCCESS_MESSAGE_LINGER_MS, TimerTask::FadeMessage(message));
        }

        for message in self.dom.query_selector_all(".error-message")? {
            self.attach_dismiss_button(message)?;
        }

        Ok(())
    }

    /// Error messages already on the page at load get a corner close
    /// button that removes them.
    fn attach_dismiss_button(&mut self, message: NodeId) -> Result<()> {
        let button = self.dom.create_detached_element("button");
        self.dom.style_set(button, "position", "absolute")?;
        self.dom.style_set(button, "right", "10px")?;
        self.dom.style_set(button, "top", "10px")?;
        self.dom.style_set(button, "background", "none")?;
        self.dom.style_set(button, "border", "none")?;
        self.dom.style_set(button, "font-size", "1.2rem")?;
        self.dom.style_set(button, "cursor", "pointer")?;
        self.dom.style_set(button, "color", "inherit")?;
        self.dom.set_text_content(button, "\u{d7}")?;
        self.dom.style_set(message, "position", "relative")?;
        self.dom.append_child(message, button);
        self.listeners
            .add(button, "click", Behavior::DismissErrorMessage);
        Ok(())
    }

    fn init_menu(&mut self) -> Result<()> {
        let toggle = self.dom.query_selector(".menu-toggle")?;
        let overlay = self.dom.query_selector(".menu-overlay")?;
        let nav_links = self.dom.query_selector(".nav-links")?;
        let container = self.dom.query_selector(".nav-container")?;
        let (Some(toggle), Some(overlay), Some(nav_links), Some(_)) =
            (toggle, overlay, nav_links, container)
        else {
            return Ok(());
        };

        let root = self.dom.root();
        self.listeners.add(toggle, "click", Behavior::ToggleMenu);
        self.listeners.add(overlay, "click", Behavior::CloseMenu);
        self.listeners
            .add(root, "keydown", Behavior::CloseMenuOnEscape);
        self.listeners
            .add(root, "resize", Behavior::CloseMenuOnResize);
        self.listeners
            .add(root, "click", Behavior::CloseMenuOnOutsideClick);

        for link in self.dom.query_selector_all_from(nav_links, "a")? {
            self.listeners
                .add(link, "click", Behavior::CloseMenuOnNavLink);
        }

        Ok(())
    }

    fn init_forms(&mut self) -> Result<()> {
        for form in self.dom.query_selector_all("form")? {
            self.listeners
                .add(form, "submit", Behavior::ValidateFormOnSubmit);
            for field in self.dom.query_selector_all_from(form, "[required]")? {
                self.listeners
                    .add(field, "blur", Behavior::ValidateFieldOnBlur);
                self.listeners
                    .add(field, "input", Behavior::ClearFieldErrorOnInput);
            }
        }
        Ok(())
    }

    pub(crate) fn run_behavior(
        &mut self,
        behavior: &Behavior,
        event: &mut EventState,
    ) -> Result<()> {
        match behavior {
            Behavior::ToggleMenu => {
                event.stop_propagation();
                self.toggle_menu()
            }
            Behavior::CloseMenu => self.close_menu(),
            Behavior::CloseMenuOnOutsideClick => self.close_menu_on_outside_click(event.target()),
            Behavior::CloseMenuOnEscape => {
                if event.key() == "Escape" {
                    self.close_menu()?;
                }
                Ok(())
            }
            Behavior::CloseMenuOnResize => {
                if self.viewport.width > MOBILE_BREAKPOINT {
                    self.close_menu()?;
                }
                Ok(())
            }
            Behavior::CloseMenuOnNavLink => {
                if self.viewport.width <= MOBILE_BREAKPOINT {
                    self.close_menu()?;
                }
                Ok(())
            }
            Behavior::AnchorNavigate => self.navigate_anchor(event),
            Behavior::ValidateFormOnSubmit => {
                if !self.validate_form(event.current_target())? {
                    event.prevent_default();
                }
                Ok(())
            }
            Behavior::ValidateFieldOnBlur => {
                let _ = self.validate_field(event.current_target())?;
                Ok(())
            }
            Behavior::ClearFieldErrorOnInput => self.clear_field_error(event.current_target()),
            Behavior::NavScrollStyle => self.apply_nav_scroll_style(),
            Behavior::CounterScan => self.scan_counters(),
            Behavior::EntranceScan => self.scan_entrances(),
            Behavior::CardHoverEnter => self.apply_card_hover(event.current_target(), true),
            Behavior::CardHoverLeave => self.apply_card_hover(event.current_target(), false),
            Behavior::SelectFocusRaise => self.raise_parent(event.current_target(), "10"),
            Behavior::SelectBlurRestore => self.raise_parent(event.current_target(), "1"),
            Behavior::DismissErrorMessage => {
                if let Some(message) = self.dom.parent(event.current_target()) {
                    self.dom.detach(message);
                }
                Ok(())
            }
        }
    }

    fn menu_is_open(&self) -> Result<bool> {
        Ok(match self.dom.query_selector(".nav-links")? {
            Some(nav_links) => self.dom.has_class(nav_links, "active"),
            None => false,
        })
    }

    fn toggle_menu(&mut self) -> Result<()> {
        if self.menu_is_open()? {
            self.close_menu()
        } else {
            self.open_menu()
        }
    }

    fn open_menu(&mut self) -> Result<()> {
        for selector in [".nav-links", ".menu-toggle", ".menu-overlay"] {
            if let Some(node) = self.dom.query_selector(selector)? {
                self.dom.add_class(node, "active")?;
            }
        }
        if let Some(toggle) = self.dom.query_selector(".menu-toggle")? {
            self.dom.set_attr(toggle, "aria-expanded", "true")?;
        }
        if let Some(body) = self.dom.query_selector("body")? {
            // Lock background scrolling while the overlay is up.
            self.dom.style_set(body, "overflow", "hidden")?;
            self.dom.style_set(body, "position", "fixed")?;
            self.dom.style_set(body, "width", "100%")?;
        }
        Ok(())
    }

    fn close_menu(&mut self) -> Result<()> {
        for selector in [".nav-links", ".menu-toggle", ".menu-overlay"] {
            if let Some(node) = self.dom.query_selector(selector)? {
                self.dom.remove_class(node, "active")?;
            }
        }
        if let Some(toggle) = self.dom.query_selector(".menu-toggle")? {
            self.dom.set_attr(toggle, "aria-expanded", "false")?;
        }
        if let Some(body) = self.dom.query_selector("body")? {
            self.dom.style_set(body, "overflow", "")?;
            self.dom.style_set(body, "position", "")?;
            self.dom.style_set(body, "width", "")?;
        }
        Ok(())
    }

    fn close_menu_on_outside_click(&mut self, target: NodeId) -> Result<()> {
        if self.viewport.width > MOBILE_BREAKPOINT || !self.menu_is_open()? {
            return Ok(());
        }
        let container = self.dom.query_selector(".nav-container")?;
        let nav_links = self.dom.query_selector(".nav-links")?;
        let inside = container
            .map(|c| self.dom.contains(c, target))
            .unwrap_or(false)
            || nav_links
                .map(|n| self.dom.contains(n, target))
                .unwrap_or(false);
        if !inside {
            self.close_menu()?;
        }
        Ok(())
    }

    fn navigate_anchor(&mut self, event: &mut EventState) -> Result<()> {
        let anchor = event.current_target();
        let Some(href) = self.dom.attr(anchor, "href") else {
            return Ok(());
        };
        if !href.starts_with('#') {
            return Ok(());
        }
        event.prevent_default();

        let Some(target) = self.dom.by_id(&href[1..]) else {
            return Ok(());
        };

        // The menu comes down on any in-page navigation, whatever the
        // viewport width.
        self.close_menu()?;

        let header_height = match self.dom.query_selector("nav")? {
            Some(nav) => {
                let h = self.dom.box_height(nav);
                if h > 0.0 { h } else { FALLBACK_HEADER_HEIGHT }
            }
            None => FALLBACK_HEADER_HEIGHT,
        };

        let top = (self.dom.doc_top(target) - header_height).max(0.0) as i64;
        self.scroll_to(top)?;
        // Updates the address bar without a jump, like pushState.
        self.location_hash = href;
        Ok(())
    }

    fn validate_form(&mut self, form: NodeId) -> Result<bool> {
        for stale in self.dom.query_selector_all_from(form, ".field-error")? {
            self.dom.detach(stale);
        }
        for summary in self.dom.query_selector_all_from(form, ".error-message")? {
            self.dom.detach(summary);
        }

        let mut all_valid = true;
        for field in self.dom.query_selector_all_from(form, "[required]")? {
            if !self.validate_field(field)? {
                all_valid = false;
            }
        }

        if !all_valid {
            let summary = self.dom.create_detached_element("div");
            self.dom.set_attr(summary, "class", "error-message")?;
            self.dom.style_set(summary, "margin-bottom", "1.5rem")?;
            self.dom.set_text_content(summary, SUMMARY_MESSAGE)?;
            self.dom.insert_first(form, summary);

            if let Some(first_error) = self
                .dom
                .query_selector_all_from(form, ".field-error")?
                .first()
                .copied()
            {
                self.scroll_into_view_center(first_error)?;
            }
        }

        Ok(all_valid)
    }

    /// Validates one field, showing or clearing its inline error. Returns
    /// whether the field is valid.
    fn validate_field(&mut self, field: NodeId) -> Result<bool> {
        self.clear_field_error(field)?;

        let kind = self
            .dom
            .attr(field, "type")
            .unwrap_or_default()
            .to_ascii_lowercase();

        if kind == "checkbox" || kind == "radio" {
            if self.dom.required(field) && !self.dom.checked(field)? {
                self.show_field_error(field, REQUIRED_MESSAGE)?;
                return Ok(false);
            }
            return Ok(true);
        }

        let value = self.dom.value(field)?;
        let trimmed = value.trim();

        let message = if trimmed.is_empty() && self.dom.required(field) {
            Some(REQUIRED_MESSAGE)
        } else if !trimmed.is_empty() && kind == "email" && !self.validator.email_ok(trimmed)? {
            Some(EMAIL_MESSAGE)
        } else if !trimmed.is_empty() && kind == "tel" && !self.validator.phone_ok(trimmed)? {
            Some(PHONE_MESSAGE)
        } else {
            None
        };

        match message {
            Some(message) => {
                self.show_field_error(field, message)?;
                Ok(false)
            }
            None => Ok(true),
        }
    }

    fn show_field_error(&mut self, field: NodeId, message: &str) -> Result<()> {
        let error = self.dom.create_detached_element("div");
        self.dom.set_attr(error, "class", "field-error")?;
        self.dom.style_set(error, "color", ERROR_COLOR)?;
        self.dom.style_set(error, "font-size", "0.8rem")?;
        self.dom.style_set(error, "margin-top", "0.3rem")?;
        self.dom.style_set(error, "font-weight", "500")?;
        self.dom.set_text_content(error, message)?;
        if let Some(parent) = self.dom.parent(field) {
            self.dom.append_child(parent, error);
        }

        self.dom.style_set(field, "border-color", ERROR_COLOR)?;
        self.dom.style_set(field, "box-shadow", ERROR_FIELD_SHADOW)?;
        Ok(())
    }

    pub(crate) fn clear_field_error(&mut self, field: NodeId) -> Result<()> {
        if let Some(parent) = self.dom.parent(field) {
            let stale: Vec<NodeId> = self
                .dom
                .children(parent)
                .iter()
                .copied()
                .filter(|child| self.dom.has_class(*child, "field-error"))
                .collect();
            for node in stale {
                self.dom.detach(node);
            }
        }
        self.dom.style_set(field, "border-color", "")?;
        self.dom.style_set(field, "box-shadow", "")?;
        Ok(())
    }

    fn scroll_into_view_center(&mut self, node: NodeId) -> Result<()> {
        let center = self.dom.doc_top(node) + self.dom.box_height(node) / 2.0;
        let top = (center - self.viewport.height as f64 / 2.0).round() as i64;
        self.scroll_to(top.max(0))
    }

    fn apply_query_prefill(&mut self) -> Result<()> {
        let pairs = self.query_pairs.clone();
        for (key, value) in pairs {
            match key.as_str() {
                "interest" => {
                    if let (Some(label), Some(select)) =
                        (interest_label(&value), self.dom.by_id("interest_area"))
                    {
                        self.dom.set_select_value(select, label)?;
                    }
                }
                "workshop" => {
                    if let (Some(label), Some(select)) =
                        (workshop_label(&value), self.dom.by_id("workshop_type"))
                    {
                        self.dom.set_select_value(select, label)?;
                    }
                }
                "type" if value == "diaspora" => {
                    if let Some(select) = self.dom.by_id("investment_level") {
                        self.dom.set_select_value(select, "Diaspora ($1,000+)")?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub(crate) fn apply_nav_scroll_style(&mut self) -> Result<()> {
        let Some(nav) = self.dom.query_selector("nav")? else {
            return Ok(());
        };
        let y = self.viewport.scroll_y;

        if y > NAV_DARK_SCROLL_THRESHOLD {
            self.dom.style_set(nav, "background", "rgba(0,0,0,0.95)")?;
            self.dom.style_set(nav, "backdrop-filter", "blur(10px)")?;
        } else {
            self.dom.style_set(nav, "background", "#000")?;
            self.dom.style_set(nav, "backdrop-filter", "none")?;
        }

        if y > NAV_SHADOW_SCROLL_THRESHOLD {
            self.dom
                .style_set(nav, "box-shadow", "0 2px 20px rgba(0, 0, 0, 0.1)")?;
        } else {
            self.dom.style_set(nav, "box-shadow", "none")?;
        }

        Ok(())
    }

    fn apply_card_hover(&mut self, card: NodeId, entering: bool) -> Result<()> {
        let transform = if entering {
            let lift = if self.dom.has_class(card, "service-card") {
                "-8px"
            } else {
                "-5px"
            };
            format!("translateY({lift})")
        } else {
            "translateY(0)".to_string()
        };
        self.dom.style_set(card, "transform", &transform)
    }

    fn raise_parent(&mut self, node: NodeId, z_index: &str) -> Result<()> {
        if let Some(parent) = self.dom.parent(node) {
            if self.dom.element(parent).is_some() {
                self.dom.style_set(parent, "z-index", z_index)?;
            }
        }
        Ok(())
    }
}
