use crate::{Page, Result};

const LANDING_PAGE: &str = r#"
<body>
    <nav data-height="80"><div class="nav-container"><span class="logo">FF</span></div></nav>
    <section class="about" data-top="900" data-height="600">
        <div id="card-a" class="about-card" data-top="950" data-height="300">Mission</div>
        <div id="card-b" class="about-card" data-top="1300" data-height="300">Vision</div>
    </section>
    <section class="services" data-top="1800" data-height="600">
        <div id="card-c" class="service-card" data-top="1850" data-height="300">Advisory</div>
    </section>
</body>
"#;

#[test]
fn nav_starts_solid_black_without_shadow() -> Result<()> {
    let page = Page::from_html(LANDING_PAGE)?;
    page.assert_style("nav", "background", "#000")?;
    page.assert_style("nav", "backdrop-filter", "none")?;
    page.assert_style("nav", "box-shadow", "none")?;
    Ok(())
}

#[test]
fn shallow_scroll_adds_shadow_only() -> Result<()> {
    let mut page = Page::from_html(LANDING_PAGE)?;
    page.scroll_to(50)?;
    page.assert_style("nav", "background", "#000")?;
    page.assert_style("nav", "box-shadow", "0 2px 20px rgba(0, 0, 0, 0.1)")?;
    Ok(())
}

#[test]
fn deep_scroll_switches_to_translucent_blur() -> Result<()> {
    let mut page = Page::from_html(LANDING_PAGE)?;
    page.scroll_to(150)?;
    page.assert_style("nav", "background", "rgba(0,0,0,0.95)")?;
    page.assert_style("nav", "backdrop-filter", "blur(10px)")?;
    page.assert_style("nav", "box-shadow", "0 2px 20px rgba(0, 0, 0, 0.1)")?;
    Ok(())
}

#[test]
fn scrolling_back_restores_base_style() -> Result<()> {
    let mut page = Page::from_html(LANDING_PAGE)?;
    page.scroll_to(500)?;
    page.scroll_to(0)?;
    page.assert_style("nav", "background", "#000")?;
    page.assert_style("nav", "backdrop-filter", "none")?;
    page.assert_style("nav", "box-shadow", "none")?;
    Ok(())
}

#[test]
fn threshold_boundaries_are_exclusive() -> Result<()> {
    let mut page = Page::from_html(LANDING_PAGE)?;

    page.scroll_to(10)?;
    page.assert_style("nav", "box-shadow", "none")?;
    page.scroll_to(11)?;
    page.assert_style("nav", "box-shadow", "0 2px 20px rgba(0, 0, 0, 0.1)")?;

    page.scroll_to(100)?;
    page.assert_style("nav", "background", "#000")?;
    page.scroll_to(101)?;
    page.assert_style("nav", "background", "rgba(0,0,0,0.95)")?;
    Ok(())
}

#[test]
fn cards_gain_entrance_class_when_scrolled_into_view() -> Result<()> {
    let mut page = Page::from_html(LANDING_PAGE)?;
    page.assert_lacks_class("#card-a", "animate-in")?;

    // 950 - 700 = 250; with the visible span ending at 768 - 100 = 668
    // the whole 300px card is inside, far past the 10% threshold.
    page.scroll_to(700)?;
    page.assert_has_class("#card-a", "animate-in")?;
    page.assert_lacks_class("#card-c", "animate-in")?;

    page.scroll_to(1700)?;
    page.assert_has_class("#card-c", "animate-in")?;
    Ok(())
}

#[test]
fn entrance_class_survives_scrolling_away() -> Result<()> {
    let mut page = Page::from_html(LANDING_PAGE)?;
    page.scroll_to(700)?;
    page.assert_has_class("#card-a", "animate-in")?;

    page.scroll_to(0)?;
    page.assert_has_class("#card-a", "animate-in")?;
    Ok(())
}

#[test]
fn barely_visible_card_stays_hidden() -> Result<()> {
    let mut page = Page::from_html(LANDING_PAGE)?;

    // 950 - 300 = 650; visible span ends at 668, exposing 18px of 300
    // which is 6%, below the 10% threshold.
    page.scroll_to(300)?;
    page.assert_lacks_class("#card-a", "animate-in")?;

    // 40px exposed is 13%.
    page.scroll_to(322)?;
    page.assert_has_class("#card-a", "animate-in")?;
    Ok(())
}
