//! Whole-site tests: every component mounted and driven through host events

use crate::prelude::*;
use crate::sections::{Section, CONTACT_MAILTO, SCROLLED_CLASS, SCROLLED_THRESHOLD, SERVICE_TITLE_SHIFT};
use crate::SKEW_CONTAINER_CLASS;
use folio_motion::{GateState, CURSOR_CLASS, HOVER_CLASS};
use folio_platform::{EventKind, InteractiveRegistry, Property};

const FRAME_MS: f64 = 16.0;

struct Clock {
    now: f64,
}

impl Clock {
    fn new() -> Self {
        Self { now: 0.0 }
    }

    /// Run frames until `until_ms`, inclusive
    fn run_until(&mut self, site: &mut Site, until_ms: f64) {
        while self.now <= until_ms {
            site.frame(self.now);
            self.now += FRAME_MS;
        }
    }

    fn run_for(&mut self, site: &mut Site, ms: f64) {
        let until = self.now + ms;
        self.run_until(site, until);
    }
}

fn mount() -> Site {
    crate::logging::init_for_tests();
    Site::mount(SiteConfig::default(), PointerCapabilities::mouse()).unwrap()
}

fn wheel(site: &mut Site, delta_y: f32) {
    site.handle_event(Event::Input(InputEvent::Wheel { delta_x: 0.0, delta_y }));
}

fn top_of(site: &Site, id: &str) -> f32 {
    let doc = site.document();
    doc.bounds(doc.find_by_id(id).unwrap()).unwrap().top()
}

#[test]
fn test_mount_builds_every_section() {
    let site = mount();
    let doc = site.document();

    for kind in SectionKind::ALL {
        assert!(site.is_section_mounted(kind));
        let root = site.section_root(kind).unwrap();
        assert_eq!(doc.find_by_id(kind.name()), Some(root));
    }
    assert!(doc.has_class(site.skew_container(), SKEW_CONTAINER_CLASS));
    assert!(doc.max_scroll() > 0.0);

    let gate = site.gate().unwrap();
    assert!(gate.is_active());
    assert!(site.cursor().is_some());
    assert_eq!(doc.query_str(&format!(".{CURSOR_CLASS}")).unwrap().len(), 1);
    assert!(site.scheduler().is_running());
}

#[test]
fn test_touch_device_has_no_cursor() {
    crate::logging::init_for_tests();
    let site = Site::mount(SiteConfig::default(), PointerCapabilities::touch()).unwrap();
    assert!(site.cursor().is_none());
    assert_eq!(site.document().listener_count(EventKind::PointerMove), 0);
}

#[test]
fn test_gate_then_intros() {
    let mut site = mount();
    let mut clock = Clock::new();
    let nav = site.navigation().root();
    let overlay = site.gate().unwrap().overlay();

    clock.run_until(&mut site, 1400.0);
    assert!(site.gate().unwrap().is_active());
    assert_eq!(site.document().get_style(nav, Property::Opacity), Some(0.0));

    clock.run_until(&mut site, 2200.0);
    assert_eq!(site.gate().unwrap().state(), GateState::Completed);
    assert!(!site.document().contains(overlay));

    clock.run_until(&mut site, 4000.0);
    assert_eq!(site.document().get_style(nav, Property::Opacity), Some(1.0));
    let chars = site.document().query_str(".name-char").unwrap();
    for c in chars {
        assert_eq!(site.document().get_style(c, Property::Opacity), Some(1.0));
    }
}

#[test]
fn test_disabled_gate() {
    crate::logging::init_for_tests();
    let mut config = SiteConfig::default();
    config.gate.enabled = false;
    let site = Site::mount(config, PointerCapabilities::mouse()).unwrap();
    assert!(site.gate().is_none());
    assert!(site.document().query_str(".loading-overlay").unwrap().is_empty());
}

#[test]
fn test_wheel_scrolls_and_reveals() {
    let mut site = mount();
    let mut clock = Clock::new();
    clock.run_until(&mut site, 100.0);

    let card = site.document().query_str(".project-card").unwrap()[0];
    assert_eq!(site.document().get_style(card, Property::Opacity), Some(0.0));

    wheel(&mut site, 600.0);
    clock.run_for(&mut site, 200.0);
    let state = site.scroll().state();
    assert!(state.position > 0.0 && state.position < 600.0);
    assert!(state.velocity > 0.0);
    assert_eq!(site.document().scroll_y(), state.position);
    assert!(site.skew().value() > 0.0);

    clock.run_for(&mut site, 3000.0);
    assert!((site.scroll().state().position - 600.0).abs() < 1.0);
    assert_eq!(site.document().get_style(card, Property::Opacity), Some(1.0));
    assert!(site.document().has_class(site.navigation().root(), SCROLLED_CLASS));

    // Momentum gone, skew settles to exactly zero
    assert_eq!(site.skew().value(), 0.0);
    assert_eq!(
        site.document().get_style(site.skew_container(), Property::SkewY),
        Some(0.0)
    );
}

#[test]
fn test_scroll_clamped_to_page() {
    let mut site = mount();
    let mut clock = Clock::new();
    wheel(&mut site, -500.0);
    clock.run_for(&mut site, 1500.0);
    assert_eq!(site.scroll().state().position, 0.0);

    wheel(&mut site, 1e6);
    clock.run_for(&mut site, 2000.0);
    let max = site.document().max_scroll();
    assert!((site.scroll().state().position - max).abs() < 1.0);
    assert!(site.document().scroll_y() <= max);
}

#[test]
fn test_anchor_link_scrolls_natively() {
    let mut site = mount();
    let mut clock = Clock::new();
    clock.run_until(&mut site, 100.0);

    let services = site.navigation().links()[2];
    let activation = site.activate(services).unwrap();
    assert_eq!(activation, LinkActivation::ScrollTo(site.section_root(SectionKind::Services).unwrap()));

    clock.run_for(&mut site, 1000.0);
    let target = top_of(&site, "services");
    assert_eq!(site.document().scroll_y(), target);
    assert!((site.scroll().state().position - target).abs() < 1.0);
    assert!(site.document().scroll_y() > SCROLLED_THRESHOLD);

    // Wheel input after landing continues from the new position
    wheel(&mut site, 100.0);
    clock.run_for(&mut site, 1500.0);
    assert!((site.scroll().state().position - (target + 100.0)).abs() < 1.0);
}

#[test]
fn test_wheel_cancels_anchor_scroll() {
    let mut site = mount();
    let mut clock = Clock::new();
    clock.run_until(&mut site, 100.0);

    site.activate_href("#footer").unwrap();
    clock.run_for(&mut site, 160.0);
    assert!(site.document().is_native_scrolling());

    wheel(&mut site, 10.0);
    clock.run_for(&mut site, 32.0);
    assert!(!site.document().is_native_scrolling());
    let stopped = site.scroll().state().position;
    assert!(stopped < top_of(&site, "footer"));

    clock.run_for(&mut site, 1500.0);
    assert!(site.scroll().state().position < top_of(&site, "footer"));
}

#[test]
fn test_link_activation_outcomes() {
    let mut site = mount();
    assert_eq!(site.activate_href("#connect").unwrap(), LinkActivation::Skipped);
    assert!(matches!(site.activate_href("# x"), Err(SiteError::Platform(_))));
    assert!(matches!(site.activate_href("work"), Err(SiteError::Platform(_))));

    // Every link on the page parses
    let links = site.document().query_str("[href]").unwrap();
    assert!(links.len() > 10);
    for link in links {
        assert!(site.activate(link).is_ok());
    }
}

#[test]
fn test_footer_links_from_page_content() {
    let mut site = mount();
    let mut clock = Clock::new();
    clock.run_until(&mut site, 100.0);

    let footer = site.section_root(SectionKind::Footer).unwrap();
    let mailto = site.document().query_str(".btn-primary").unwrap()[0];
    assert_eq!(site.document().element(mailto).unwrap().parent(), Some(footer));
    assert_eq!(
        site.activate(mailto).unwrap(),
        LinkActivation::OpenExternal {
            url: CONTACT_MAILTO.into()
        }
    );

    // Travel down to the footer, then back up through its privacy link
    site.activate_href("#footer").unwrap();
    clock.run_for(&mut site, 1000.0);
    assert_eq!(site.document().scroll_y(), site.document().max_scroll());

    let privacy = site.document().query_str(".privacy-link").unwrap()[0];
    assert_eq!(site.activate(privacy).unwrap(), LinkActivation::ScrollToTop);
    clock.run_for(&mut site, 1000.0);
    assert_eq!(site.document().scroll_y(), 0.0);
    assert!(site.scroll().state().position.abs() < 1.0);
    assert!(!site.document().has_class(site.navigation().root(), SCROLLED_CLASS));
}

#[test]
fn test_service_hover_through_site_events() {
    let mut site = mount();
    let mut clock = Clock::new();
    clock.run_until(&mut site, 100.0);

    let items = site.document().query_str(".service-item").unwrap();
    let titles = site.document().query_str(".service-title").unwrap();
    site.handle_event(Event::Input(InputEvent::Pointer(PointerEvent::Enter { target: items[3] })));
    clock.run_for(&mut site, 600.0);
    assert_eq!(site.document().get_style(titles[3], Property::X), Some(SERVICE_TITLE_SHIFT));
    assert_eq!(site.document().get_style(titles[2], Property::X), Some(0.0));

    site.handle_event(Event::Input(InputEvent::Pointer(PointerEvent::Leave { target: items[3] })));
    clock.run_for(&mut site, 600.0);
    assert_eq!(site.document().get_style(titles[3], Property::X), Some(0.0));
}

#[test]
fn test_cursor_eases_and_hovers() {
    let mut site = mount();
    let mut clock = Clock::new();
    let cursor_marker = site.cursor().unwrap().marker();

    site.handle_event(Event::Input(InputEvent::Pointer(PointerEvent::Moved { x: 400.0, y: 300.0 })));
    clock.run_for(&mut site, 16.0);
    let x = site.document().get_style(cursor_marker, Property::X).unwrap();
    assert!(x > 0.0 && x < 400.0);

    clock.run_for(&mut site, 1000.0);
    let x = site.document().get_style(cursor_marker, Property::X).unwrap();
    assert!((x - 400.0).abs() < 0.5);

    let link = site.navigation().links()[1];
    assert!(site.document().interactive_targets().contains(&link));
    site.handle_event(Event::Input(InputEvent::Pointer(PointerEvent::Enter { target: link })));
    clock.run_for(&mut site, 16.0);
    assert!(site.document().has_class(cursor_marker, HOVER_CLASS));
    site.handle_event(Event::Input(InputEvent::Pointer(PointerEvent::Leave { target: link })));
    clock.run_for(&mut site, 16.0);
    assert!(!site.document().has_class(cursor_marker, HOVER_CLASS));
}

#[test]
fn test_unmount_and_remount_section() {
    let mut site = mount();
    let mut clock = Clock::new();
    clock.run_until(&mut site, 100.0);

    let triggers = site.triggers().len();
    let services = site.section_root(SectionKind::Services).unwrap();
    let tracked = site.cursor().unwrap().tracked_count();

    assert!(site.unmount_section(SectionKind::Services));
    assert!(!site.unmount_section(SectionKind::Services));
    assert!(!site.document().contains(services));
    assert_eq!(site.triggers().len(), triggers - 1);
    assert_eq!(site.activate_href("#services").unwrap(), LinkActivation::Skipped);

    // Hover tracking drops the removed items on the next frame
    clock.run_for(&mut site, 16.0);
    assert!(site.cursor().unwrap().tracked_count() < tracked);

    assert!(site.mount_section(SectionKind::Services).unwrap());
    assert!(!site.mount_section(SectionKind::Services).unwrap());
    assert_eq!(site.triggers().len(), triggers);
    let rebuilt = site.section_root(SectionKind::Services).unwrap();
    assert_eq!(site.document().find_by_id("services"), Some(rebuilt));

    clock.run_for(&mut site, 16.0);
    assert_eq!(site.cursor().unwrap().tracked_count(), tracked);
}

#[test]
fn test_resize_refreshes_layout() {
    let mut site = mount();
    let mut clock = Clock::new();
    clock.run_until(&mut site, 100.0);
    let before = site.document().max_scroll();

    site.handle_event(Event::Viewport(ViewportEvent::Resized {
        width: 800.0,
        height: 1200.0,
    }));
    assert_eq!(site.document().viewport().height, 1200.0);
    assert_eq!(site.document().max_scroll(), before - 400.0);
    assert!(site.handle_event(Event::Frame { timestamp_ms: clock.now }));
}

#[test]
fn test_teardown_releases_everything() {
    let mut site = mount();
    let mut clock = Clock::new();
    wheel(&mut site, 300.0);
    clock.run_until(&mut site, 500.0);

    site.teardown();
    site.teardown();
    assert!(site.is_torn_down());
    assert_eq!(site.scheduler().timeline_count(), 0);
    assert_eq!(site.scheduler().callback_count(), 0);
    assert!(!site.scheduler().is_running());
    assert!(site.triggers().is_empty());
    assert_eq!(site.scroll().subscriber_count(), 0);

    let doc = site.document();
    for kind in [
        EventKind::Wheel,
        EventKind::Touch,
        EventKind::PointerMove,
        EventKind::PointerEnter,
        EventKind::PointerLeave,
    ] {
        assert_eq!(doc.listener_count(kind), 0, "{kind:?}");
    }
    assert_eq!(doc.observer_count(), 0);
    assert!(doc.query_str(".loading-overlay").unwrap().is_empty());
    assert!(doc.query_str(&format!(".{CURSOR_CLASS}")).unwrap().is_empty());
    assert_eq!(doc.style(site.skew_container()).unwrap().inline(Property::SkewY), None);

    assert!(!site.frame(clock.now));
    assert!(matches!(site.activate_href("#work"), Err(SiteError::TornDown)));
    assert!(matches!(site.mount_section(SectionKind::Hero), Err(SiteError::TornDown)));
}

#[test]
fn test_teardown_during_gate_cancels_it() {
    let mut site = mount();
    let mut clock = Clock::new();
    clock.run_until(&mut site, 1000.0);
    site.teardown();
    assert_eq!(site.gate().unwrap().state(), GateState::Cancelled);
}

#[test]
fn test_lag_smoothing_from_config() {
    crate::logging::init_for_tests();
    let config = SiteConfig::from_toml_str("[scheduler]\nmax_frame_delta_ms = 50").unwrap();
    let mut site = Site::mount(config, PointerCapabilities::mouse()).unwrap();
    site.frame(0.0);
    // A long stall only advances the gate by 50ms
    site.frame(5000.0);
    assert!(site.gate().unwrap().is_active());
}
