mod form_validation;
mod scroll_effects;
mod url_prefill;
