//! Full walk through a realistic marketing page: load, scroll, animate,
//! navigate, open the mobile menu, and submit the contact form.

use page_motion::{Page, Result};

const SITE: &str = r##"
<!DOCTYPE html>
<body>
    <nav data-height="80">
        <div class="nav-container">
            <span class="logo">Finite Capital</span>
            <button class="menu-toggle" aria-expanded="false">☰</button>
            <ul class="nav-links">
                <li><a id="nav-impact" href="#impact">Impact</a></li>
                <li><a id="nav-contact" href="#contact">Contact</a></li>
            </ul>
        </div>
    </nav>
    <div class="menu-overlay"></div>

    <header class="hero" data-top="0" data-height="700">
        <h1>Grow with us</h1>
        <div class="stats">
            <span id="stat-return" class="stat-value" data-top="420" data-height="48">12.4%</span>
            <span id="stat-members" class="stat-value" data-top="420" data-height="48">12,450</span>
            <span id="stat-rating" class="stat-value" data-top="420" data-height="48">N/A</span>
        </div>
    </header>

    <section id="impact" class="impact" data-top="1600" data-height="700">
        <div id="impact-card" class="about-card" data-top="1650" data-height="320">
            <h2>Hectares financed</h2>
            <span id="stat-hectares" class="stat-value" data-top="1700" data-height="48">8,200</span>
        </div>
        <div id="service" class="service-card" data-top="2000" data-height="320">Advisory desk</div>
    </section>

    <section id="contact" data-top="3000" data-height="900">
        <form id="contact-form" data-top="3050" data-height="600">
            <div class="form-group" data-top="3080" data-height="80">
                <input id="name" name="name" type="text" required>
            </div>
            <div class="form-group" data-top="3170" data-height="80">
                <input id="email" name="email" type="email" required>
            </div>
            <div class="form-group" data-top="3260" data-height="80">
                <select id="interest_area" name="interest" required>
                    <option value="">Select an area</option>
                    <option value="Renewable Energy">Renewable Energy</option>
                    <option value="Agriculture">Agriculture</option>
                </select>
            </div>
            <button id="send" type="submit">Send inquiry</button>
        </form>
    </section>
</body>
"##;

#[test]
fn landing_visit_animates_hero_stats_only() -> Result<()> {
    let mut page = Page::open("/index.html?interest=renewable", SITE)?;

    // Prefill applied before any interaction.
    page.assert_value("#interest_area", "Renewable Energy")?;

    // Hero stats wait for the 500 ms startup sweep, then settle.
    page.assert_text("#stat-return", "12.4%")?;
    page.advance_time(3_000)?;
    page.assert_text("#stat-return", "12.4%")?;
    page.assert_text("#stat-members", "12,450")?;
    page.assert_text("#stat-rating", "N/A")?;

    // Below-the-fold content is untouched.
    page.assert_text("#stat-hectares", "8,200")?;
    assert_eq!(page.pending_counter_count(), 1);
    page.assert_lacks_class("#impact-card", "animate-in")?;
    Ok(())
}

#[test]
fn mid_animation_hero_stats_show_intermediate_values() -> Result<()> {
    let mut page = Page::from_html(SITE)?;

    // Sweep at 500, frames from 512; halfway through the 1.5 s run the
    // quartic ease has covered ~94% of the distance.
    page.advance_time_to(512 + 752)?;
    let dump = page.dump_dom("#stat-members")?;
    assert!(!dump.contains("12,450"), "should still be counting: {dump}");
    assert!(!dump.contains(">0<"), "should have left zero: {dump}");

    page.advance_time_to(512 + 1_504)?;
    page.assert_text("#stat-members", "12,450")?;
    Ok(())
}

#[test]
fn nav_click_reveals_impact_section() -> Result<()> {
    let mut page = Page::from_html(SITE)?;
    page.advance_time(600)?;

    page.click("#nav-impact")?;
    assert_eq!(page.scroll_y(), 1_520);
    assert_eq!(page.location_hash(), "#impact");

    // The landing scroll triggers both the hectares counter and the card
    // entrance.
    page.assert_has_class("#impact-card", "animate-in")?;
    page.assert_has_class("#service", "animate-in")?;
    page.advance_time(2_000)?;
    page.assert_text("#stat-hectares", "8,200")?;
    Ok(())
}

#[test]
fn mobile_visitor_uses_menu_then_submits_invalid_form() -> Result<()> {
    let mut page = Page::from_html(SITE)?;
    page.resize_to(390, 844)?;

    page.click(".menu-toggle")?;
    page.assert_has_class(".menu-overlay", "active")?;
    page.assert_style("body", "overflow", "hidden")?;

    page.click("#nav-contact")?;
    page.assert_lacks_class(".nav-links", "active")?;
    assert_eq!(page.location_hash(), "#contact");
    assert_eq!(page.scroll_y(), 2_920);

    page.type_text("#email", "invalid-address")?;
    page.click("#send")?;
    page.assert_exists(".error-message")?;
    page.assert_text(
        ".field-error",
        "This field is required.",
    )?;
    page.assert_style("#email", "border-color", "#dc3545")?;

    page.type_text("#name", "Rudo Chikafu")?;
    page.type_text("#email", "rudo@example.org")?;
    page.select_value("#interest_area", "Agriculture")?;
    page.click("#send")?;
    page.assert_missing(".field-error")?;
    page.assert_missing(".error-message")?;
    Ok(())
}

#[test]
fn full_scroll_through_settles_everything() -> Result<()> {
    let mut page = Page::from_html(SITE)?;

    for y in [0, 400, 900, 1_600, 2_400, 3_000] {
        page.scroll_to(y)?;
        page.advance_time(400)?;
    }
    page.flush()?;

    page.assert_text("#stat-return", "12.4%")?;
    page.assert_text("#stat-members", "12,450")?;
    page.assert_text("#stat-hectares", "8,200")?;
    page.assert_text("#stat-rating", "N/A")?;
    page.assert_has_class("#impact-card", "animate-in")?;
    page.assert_has_class("#service", "animate-in")?;
    assert_eq!(page.pending_counter_count(), 0);
    assert_eq!(page.animated_counter_count(), 3);

    // A second pass changes nothing.
    page.scroll_to(0)?;
    page.flush()?;
    page.assert_text("#stat-members", "12,450")?;
    Ok(())
}
