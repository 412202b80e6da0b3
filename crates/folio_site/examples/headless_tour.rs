//! Headless Tour
//!
//! Mounts the site without a host window and drives it with a scripted
//! session: the loading gate, a few wheel notches, a nav link, some
//! pointer movement, and teardown.
//!
//! Run with: cargo run -p folio_site --example headless_tour
//! Pass a TOML file to override the defaults:
//!   cargo run -p folio_site --example headless_tour -- folio.toml

use std::path::Path;

use anyhow::Context;
use folio_site::prelude::*;

const FRAME_MS: f64 = 1000.0 / 60.0;

struct Session {
    site: Site,
    now: f64,
}

impl Session {
    fn run_for(&mut self, ms: f64) {
        let until = self.now + ms;
        while self.now < until {
            self.site.frame(self.now);
            self.now += FRAME_MS;
        }
    }

    fn report(&self, label: &str) {
        let state = self.site.scroll().state();
        let cursor = self.site.cursor().map(|c| c.state());
        tracing::info!(
            "[{:>6.0}ms] {label}: scroll {:.1} (v {:.2}), skew {:.3}deg, cursor {:?}",
            self.now,
            state.position,
            state.velocity,
            self.site.skew().value(),
            cursor.map(|c| (c.rendered_x.round(), c.rendered_y.round())),
        );
    }
}

fn main() -> anyhow::Result<()> {
    folio_site::logging::init_with("info,folio_motion=debug");

    let config = match std::env::args().nth(1) {
        Some(path) => SiteConfig::load(Path::new(&path))?,
        None => SiteConfig::default(),
    };
    let site = Site::mount(config, PointerCapabilities::mouse()).context("Failed to mount site")?;
    let mut session = Session { site, now: 0.0 };

    session.run_for(2400.0);
    session.report("gate cleared");

    for _ in 0..5 {
        session.site.handle_event(Event::Input(InputEvent::Wheel {
            delta_x: 0.0,
            delta_y: 120.0,
        }));
        session.run_for(80.0);
        session.report("wheel");
    }
    session.run_for(1500.0);
    session.report("settled");

    match session.site.activate_href("#about")? {
        LinkActivation::ScrollTo(_) => {
            session.run_for(800.0);
            session.report("anchored to #about");
        }
        other => tracing::warn!("#about not scrolled: {other:?}"),
    }

    for step in 0..10 {
        let x = 200.0 + 60.0 * step as f32;
        session
            .site
            .handle_event(Event::Input(InputEvent::Pointer(PointerEvent::Moved { x, y: 400.0 })));
        session.run_for(32.0);
    }
    session.report("pointer moved");

    if session.site.unmount_section(SectionKind::Testimonials) {
        session.site.mount_section(SectionKind::Testimonials)?;
        session.report("testimonials remounted");
    }

    session.site.teardown();
    tracing::info!(
        "teardown: {} timelines, {} tick callbacks left",
        session.site.scheduler().timeline_count(),
        session.site.scheduler().callback_count()
    );
    Ok(())
}
