//! Demo binary: walks the extension core against the simulated browser.

use ytcontrols::app::Extension;
use ytcontrols::dom::MediaElement;
use ytcontrols::platform::sim::SimBrowser;
use ytcontrols::services::settings::ControlSettings;
use ytcontrols::types::command::Command;
use ytcontrols::types::tab::classify_url;

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn main() {
    env_logger::init();

    println!();
    println!("ytcontrols v{} (simulated walkthrough)", env!("CARGO_PKG_VERSION"));
    println!();

    section("URL classification");
    for url in [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://www.youtube.com/shorts/abc123",
        "https://www.youtube.com",
        "https://example.com",
    ] {
        println!("  {:<50} → {:?}", url, classify_url(url));
    }

    section("Tab discovery");
    let mut browser = SimBrowser::new();
    browser.open_tab("https://example.com/docs", false);
    browser.open_tab("https://www.youtube.com", false);
    let watch = browser.open_tab("https://www.youtube.com/watch?v=demo", true);

    let mut ext = Extension::new(browser, ControlSettings::load());
    ext.startup();
    println!("  active tab: {:?} (video page preferred)", ext.coordinator.active_tab());

    section("Readiness signal");
    let page = ext
        .coordinator
        .platform()
        .page(watch)
        .expect("watch tab hosts a page");
    let media = page.load_video(300.0);
    media.begin_playback(42.0);
    if ext.coordinator.platform_mut().tick_page(watch) {
        ext.coordinator.on_tab_ready(watch);
        println!("  controller announced a video on {}", watch);
    }

    section("Command round trip");
    println!("  paused before: {}", media.paused());
    ext.handle_shortcut("Ctrl+Shift+Space");
    println!("  paused after toggle-play-pause: {}", media.paused());
    media.begin_playback(42.0);
    ext.handle_command(Command::Forward10s);
    println!("  position after forward-10s: {}s", media.current_time());
    ext.handle_command(Command::Backward10s);
    println!("  position after backward-10s: {}s", media.current_time());

    section("Recovery and notifications");
    ext.coordinator.platform_mut().set_responsive(watch, false);
    ext.handle_command(Command::TogglePlayPause);
    if let Some(notification) = ext.coordinator.platform().last_notification() {
        println!("  notification raised: {}: {}", notification.id, notification.message);
        let id = notification.id.clone();
        ext.coordinator.on_notification_clicked(&id);
        println!(
            "  after click: cleared={:?}, focused window={:?}",
            ext.coordinator.platform().cleared_notifications(),
            ext.coordinator.platform().focused_window()
        );
    }

    println!();
    println!("Done.");
}
