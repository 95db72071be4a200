use crate::behaviors::{EMAIL_MESSAGE, PHONE_MESSAGE, REQUIRED_MESSAGE, SUMMARY_MESSAGE};
use crate::{Page, Result};

const CONTACT_PAGE: &str = r#"
<body>
    <form id="contact-form" data-top="600" data-height="500">
        <div class="form-group" data-top="620" data-height="70">
            <label for="name">Name *</label>
            <input id="name" name="name" type="text" required>
        </div>
        <div class="form-group" data-top="700" data-height="70">
            <label for="email">Email *</label>
            <input id="email" name="email" type="email" required>
        </div>
        <div class="form-group" data-top="780" data-height="70">
            <label for="phone">Phone</label>
            <input id="phone" name="phone" type="tel">
        </div>
        <div class="form-group" data-top="860" data-height="70">
            <label for="terms">Terms *</label>
            <input id="terms" name="terms" type="checkbox" required>
        </div>
        <button id="send" type="submit">Send</button>
    </form>
</body>
"#;

#[test]
fn empty_submit_flags_every_required_field() -> Result<()> {
    let mut page = Page::from_html(CONTACT_PAGE)?;
    page.click("#send")?;

    page.assert_text(".error-message", SUMMARY_MESSAGE)?;
    page.assert_style(".error-message", "margin-bottom", "1.5rem")?;
    assert_eq!(page.dump_dom("form")?.matches("field-error").count(), 3);
    page.assert_text(".field-error", REQUIRED_MESSAGE)?;
    page.assert_style("#name", "border-color", "#dc3545")?;
    page.assert_style("#name", "box-shadow", "0 0 0 3px rgba(220, 53, 69, 0.1)")?;
    Ok(())
}

#[test]
fn invalid_email_is_rejected() -> Result<()> {
    let mut page = Page::from_html(CONTACT_PAGE)?;
    page.type_text("#name", "Tari")?;
    page.type_text("#email", "tari@nowhere")?;
    page.set_checked("#terms", true)?;
    page.click("#send")?;

    page.assert_text(".field-error", EMAIL_MESSAGE)?;
    page.assert_exists(".error-message")?;
    Ok(())
}

#[test]
fn optional_phone_never_blocks_submit() -> Result<()> {
    let mut page = Page::from_html(CONTACT_PAGE)?;
    page.type_text("#name", "Tari")?;
    page.type_text("#email", "tari@example.org")?;
    page.set_checked("#terms", true)?;

    // Only required fields are validated; the optional tel field is left
    // alone even with a short value.
    page.type_text("#phone", "12345")?;
    page.submit("#contact-form")?;
    page.assert_missing(".field-error")?;

    page.focus("#phone")?;
    page.blur("#phone")?;
    page.assert_missing(".field-error")?;
    Ok(())
}

#[test]
fn valid_submission_produces_no_errors() -> Result<()> {
    let mut page = Page::from_html(CONTACT_PAGE)?;
    page.type_text("#name", "Tari Moyo")?;
    page.type_text("#email", "tari@example.org")?;
    page.set_checked("#terms", true)?;
    page.click("#send")?;

    page.assert_missing(".field-error")?;
    page.assert_missing(".error-message")?;
    page.assert_style("#name", "border-color", "")?;
    Ok(())
}

#[test]
fn whitespace_only_value_counts_as_empty() -> Result<()> {
    let mut page = Page::from_html(CONTACT_PAGE)?;
    page.type_text("#name", "   ")?;
    page.type_text("#email", "tari@example.org")?;
    page.set_checked("#terms", true)?;
    page.click("#send")?;

    page.assert_text(".field-error", REQUIRED_MESSAGE)?;
    Ok(())
}

#[test]
fn blur_validates_and_typing_clears() -> Result<()> {
    let mut page = Page::from_html(CONTACT_PAGE)?;

    page.focus("#name")?;
    page.blur("#name")?;
    page.assert_text(".field-error", REQUIRED_MESSAGE)?;

    page.type_text("#name", "T")?;
    page.assert_missing(".field-error")?;
    page.assert_style("#name", "border-color", "")?;
    Ok(())
}

#[test]
fn resubmit_replaces_stale_errors() -> Result<()> {
    let mut page = Page::from_html(CONTACT_PAGE)?;
    page.click("#send")?;
    assert_eq!(page.dump_dom("form")?.matches("field-error").count(), 3);

    page.type_text("#name", "Tari")?;
    page.type_text("#email", "tari@example.org")?;
    page.click("#send")?;
    // Only the unchecked terms box should still be flagged.
    assert_eq!(page.dump_dom("form")?.matches("field-error").count(), 1);
    assert_eq!(page.dump_dom("form")?.matches(SUMMARY_MESSAGE).count(), 1);
    Ok(())
}

#[test]
fn failed_submit_scrolls_first_error_into_view() -> Result<()> {
    let mut page = Page::from_html(CONTACT_PAGE)?;
    page.click("#send")?;

    // The error div inherits data-top 620 from its form group; centering
    // it in a 768-tall viewport lands at 620 - 384 = 236.
    assert_eq!(page.scroll_y(), 236);
    Ok(())
}

#[test]
fn required_checkbox_must_be_checked() -> Result<()> {
    let mut page = Page::from_html(CONTACT_PAGE)?;
    page.type_text("#name", "Tari")?;
    page.type_text("#email", "tari@example.org")?;
    page.click("#send")?;
    page.assert_text(".field-error", REQUIRED_MESSAGE)?;

    page.click("#terms")?;
    page.click("#send")?;
    page.assert_missing(".field-error")?;
    Ok(())
}

#[test]
fn phone_accepts_international_formats() -> Result<()> {
    let page_html = CONTACT_PAGE.replace(r#"type="tel">"#, r#"type="tel" required>"#);
    let mut page = Page::from_html(&page_html)?;
    page.type_text("#name", "Tari")?;
    page.type_text("#email", "tari@example.org")?;
    page.set_checked("#terms", true)?;

    page.type_text("#phone", "+263 77 123 4567")?;
    page.click("#send")?;
    page.assert_missing(".field-error")?;

    page.type_text("#phone", "12345")?;
    page.click("#send")?;
    page.assert_text(".field-error", PHONE_MESSAGE)?;
    Ok(())
}
