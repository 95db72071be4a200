use crate::{Page, Result};

const INQUIRY_PAGE: &str = r#"
<body>
    <form id="inquiry">
        <select id="interest_area" name="interest_area">
            <option value="">Select an area</option>
            <option value="Agriculture">Agriculture</option>
            <option value="Renewable Energy">Renewable Energy</option>
            <option value="Small Business">Small Business</option>
            <option value="Property Development">Property Development</option>
            <option value="Commercial Agriculture">Commercial Agriculture</option>
            <option value="Industrial Development">Industrial Development</option>
        </select>
        <select id="workshop_type" name="workshop_type">
            <option value="">Select a workshop</option>
            <option value="Basic Financial Literacy - $15">Basic Financial Literacy - $15</option>
            <option value="Agricultural Investment Basics - $25">Agricultural Investment Basics - $25</option>
            <option value="Advanced Investment Strategies - $50">Advanced Investment Strategies - $50</option>
        </select>
        <select id="investment_level" name="investment_level">
            <option value="">Select a level</option>
            <option value="Local ($100+)">Local ($100+)</option>
            <option value="Diaspora ($1,000+)">Diaspora ($1,000+)</option>
        </select>
    </form>
</body>
"#;

#[test]
fn interest_parameter_selects_matching_option() -> Result<()> {
    let page = Page::open("/invest.html?interest=renewable", INQUIRY_PAGE)?;
    page.assert_value("#interest_area", "Renewable Energy")?;
    Ok(())
}

#[test]
fn every_interest_key_maps() -> Result<()> {
    for (key, label) in [
        ("agriculture", "Agriculture"),
        ("renewable", "Renewable Energy"),
        ("business", "Small Business"),
        ("property", "Property Development"),
        ("commercial_agriculture", "Commercial Agriculture"),
        ("industrial", "Industrial Development"),
    ] {
        let page = Page::open(&format!("/invest.html?interest={key}"), INQUIRY_PAGE)?;
        page.assert_value("#interest_area", label)?;
    }
    Ok(())
}

#[test]
fn workshop_parameter_selects_priced_option() -> Result<()> {
    let page = Page::open("/workshops.html?workshop=advanced", INQUIRY_PAGE)?;
    page.assert_value("#workshop_type", "Advanced Investment Strategies - $50")?;
    Ok(())
}

#[test]
fn diaspora_type_selects_investment_level() -> Result<()> {
    let page = Page::open("/invest.html?type=diaspora", INQUIRY_PAGE)?;
    page.assert_value("#investment_level", "Diaspora ($1,000+)")?;
    Ok(())
}

#[test]
fn unknown_keys_leave_selects_alone() -> Result<()> {
    let page = Page::open("/invest.html?interest=mystery&type=local", INQUIRY_PAGE)?;
    page.assert_value("#interest_area", "")?;
    page.assert_value("#investment_level", "")?;
    Ok(())
}

#[test]
fn prefill_without_matching_option_is_ignored() -> Result<()> {
    let html = r#"<select id="interest_area"><option value="">Pick</option></select>"#;
    let page = Page::open("/invest.html?interest=renewable", html)?;
    page.assert_value("#interest_area", "")?;
    Ok(())
}

#[test]
fn combined_parameters_apply_independently() -> Result<()> {
    let page = Page::open(
        "/invest.html?interest=business&workshop=basic&type=diaspora",
        INQUIRY_PAGE,
    )?;
    page.assert_value("#interest_area", "Small Business")?;
    page.assert_value("#workshop_type", "Basic Financial Literacy - $15")?;
    page.assert_value("#investment_level", "Diaspora ($1,000+)")?;
    Ok(())
}
