use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ytcontrols::dom::MediaElement;
use ytcontrols::platform::sim::SimPage;
use ytcontrols::services::player_bridge::{PlayerApi, PlayerBridge, PlayerHandle, PlayerLocator};
use ytcontrols::types::errors::DomError;
use ytcontrols::types::message::{BridgeCommand, PageMessage};
use ytcontrols::types::video::VideoState;

/// Scripted stand-in for the site's internal player object.
struct FakePlayer {
    time: Cell<f64>,
    duration: Cell<f64>,
    failing: Cell<bool>,
    next_calls: Cell<u32>,
    prev_calls: Cell<u32>,
}

impl FakePlayer {
    fn new(time: f64, duration: f64) -> Rc<Self> {
        Rc::new(Self {
            time: Cell::new(time),
            duration: Cell::new(duration),
            failing: Cell::new(false),
            next_calls: Cell::new(0),
            prev_calls: Cell::new(0),
        })
    }

    fn guard(&self) -> Result<(), DomError> {
        if self.failing.get() {
            Err(DomError::Detached)
        } else {
            Ok(())
        }
    }
}

impl PlayerApi for FakePlayer {
    fn current_time(&self) -> Result<f64, DomError> {
        self.guard()?;
        Ok(self.time.get())
    }

    fn duration(&self) -> Result<f64, DomError> {
        self.guard()?;
        Ok(self.duration.get())
    }

    fn seek_to(&self, seconds: f64) -> Result<(), DomError> {
        self.guard()?;
        self.time.set(seconds);
        Ok(())
    }

    fn play(&self) -> Result<(), DomError> {
        self.guard()
    }

    fn pause(&self) -> Result<(), DomError> {
        self.guard()
    }

    fn next_video(&self) -> Result<(), DomError> {
        self.guard()?;
        self.next_calls.set(self.next_calls.get() + 1);
        Ok(())
    }

    fn previous_video(&self) -> Result<(), DomError> {
        self.guard()?;
        self.prev_calls.set(self.prev_calls.get() + 1);
        Ok(())
    }
}

/// Locator whose result can change between polls, like a page that creates
/// its player late.
#[derive(Clone, Default)]
struct SlotLocator {
    slot: Rc<RefCell<Option<PlayerHandle>>>,
}

impl SlotLocator {
    fn fill(&self, player: Rc<FakePlayer>) {
        *self.slot.borrow_mut() = Some(player);
    }
}

impl PlayerLocator for SlotLocator {
    fn locate(&self) -> Option<PlayerHandle> {
        self.slot.borrow().clone()
    }
}

fn bridge_with_player(
    time: f64,
    duration: f64,
) -> (PlayerBridge<SimPage, SlotLocator>, SimPage, Rc<FakePlayer>) {
    let page = SimPage::new();
    page.load_video(duration);
    let locator = SlotLocator::default();
    let player = FakePlayer::new(time, duration);
    locator.fill(player.clone());
    let mut bridge = PlayerBridge::new(page.clone(), locator);
    assert!(bridge.poll_player());
    (bridge, page, player)
}

#[test]
fn test_poll_retries_until_player_exists() {
    let page = SimPage::new();
    let locator = SlotLocator::default();
    let mut bridge = PlayerBridge::new(page, locator.clone());

    assert!(!bridge.poll_player());
    assert!(!bridge.poll_player());
    assert!(!bridge.has_player());

    locator.fill(FakePlayer::new(0.0, 100.0));
    assert!(bridge.poll_player());
    assert!(bridge.has_player());
}

#[test]
fn test_forward_seek_goes_through_player() {
    let (mut bridge, page, player) = bridge_with_player(50.0, 300.0);
    bridge.skip_forward();
    assert_eq!(player.time.get(), 60.0);
    // The raw element was left alone.
    assert_eq!(page.media().unwrap().current_time(), 0.0);
}

#[test]
fn test_forward_seek_clamps_to_player_duration() {
    let (mut bridge, _page, player) = bridge_with_player(295.0, 300.0);
    bridge.skip_forward();
    assert_eq!(player.time.get(), 300.0);
}

#[test]
fn test_backward_seek_clamps_to_zero() {
    let (mut bridge, _page, player) = bridge_with_player(4.0, 300.0);
    bridge.skip_backward();
    assert_eq!(player.time.get(), 0.0);
}

#[test]
fn test_seek_falls_back_to_element_when_player_fails() {
    let (mut bridge, page, player) = bridge_with_player(50.0, 300.0);
    let media = page.media().unwrap();
    media.set_position(80.0);
    player.failing.set(true);

    bridge.skip_backward();
    assert_eq!(media.current_time(), 70.0);
}

#[test]
fn test_seek_without_media_is_a_no_op() {
    let page = SimPage::new();
    let locator = SlotLocator::default();
    let player = FakePlayer::new(50.0, 300.0);
    locator.fill(player.clone());
    let mut bridge = PlayerBridge::new(page, locator);
    bridge.poll_player();

    bridge.skip_forward();
    // No media element on the page means nothing is seeked, player included.
    assert_eq!(player.time.get(), 50.0);
}

#[test]
fn test_play_falls_back_to_element_and_drops_handle() {
    let (mut bridge, page, player) = bridge_with_player(10.0, 300.0);
    player.failing.set(true);

    bridge.play();
    assert!(!page.media().unwrap().paused());
    // A failed handle is dropped for re-acquisition.
    assert!(!bridge.has_player());
}

#[test]
fn test_pause_falls_back_to_element() {
    let (mut bridge, page, player) = bridge_with_player(10.0, 300.0);
    let media = page.media().unwrap();
    media.begin_playback(10.0);
    player.failing.set(true);

    bridge.pause();
    assert!(media.paused());
}

#[test]
fn test_next_video_requires_a_handle() {
    let page = SimPage::new();
    page.load_video(100.0);
    let mut bridge = PlayerBridge::new(page, SlotLocator::default());
    assert!(!bridge.next_video());
}

#[test]
fn test_next_and_previous_go_through_player() {
    let (mut bridge, _page, player) = bridge_with_player(0.0, 100.0);
    assert!(bridge.next_video());
    assert!(bridge.previous_video());
    assert_eq!(player.next_calls.get(), 1);
    assert_eq!(player.prev_calls.get(), 1);
}

#[test]
fn test_state_query_merges_player_position() {
    let (mut bridge, page, _player) = bridge_with_player(123.0, 4567.0);
    page.media().unwrap().begin_playback(1.0);

    let reply = bridge.handle_message(&PageMessage::Control {
        command: BridgeCommand::GetPlayerState,
    });
    let Some(PageMessage::Response { state }) = reply else {
        panic!("expected a state response");
    };
    // Position and duration come from the internal player, flags from the
    // element.
    assert_eq!(state.current_time, 123.0);
    assert_eq!(state.duration, 4567.0);
    assert!(state.is_loaded);
    assert!(state.is_running);
    assert!(!state.paused);
}

#[test]
fn test_state_query_without_player_uses_element() {
    let page = SimPage::new();
    let media = page.load_video(250.0);
    media.begin_playback(25.0);
    let mut bridge = PlayerBridge::new(page, SlotLocator::default());

    let reply = bridge.handle_message(&PageMessage::Control {
        command: BridgeCommand::GetPlayerState,
    });
    let Some(PageMessage::Response { state }) = reply else {
        panic!("expected a state response");
    };
    assert_eq!(state.current_time, 25.0);
    assert_eq!(state.duration, 250.0);
}

#[test]
fn test_state_without_media_is_not_loaded() {
    let bridge = PlayerBridge::new(SimPage::new(), SlotLocator::default());
    assert_eq!(bridge.player_state(), VideoState::not_loaded());
}

#[test]
fn test_seek_messages_are_applied_without_reply() {
    let (mut bridge, _page, player) = bridge_with_player(100.0, 300.0);
    let reply = bridge.handle_message(&PageMessage::Control {
        command: BridgeCommand::Forward10s,
    });
    assert_eq!(reply, None);
    assert_eq!(player.time.get(), 110.0);

    let reply = bridge.handle_message(&PageMessage::Control {
        command: BridgeCommand::Backward10s,
    });
    assert_eq!(reply, None);
    assert_eq!(player.time.get(), 100.0);
}

#[test]
fn test_own_responses_on_shared_channel_are_ignored() {
    let (mut bridge, _page, player) = bridge_with_player(100.0, 300.0);
    let echo = PageMessage::Response {
        state: VideoState::not_loaded(),
    };
    assert_eq!(bridge.handle_message(&echo), None);
    assert_eq!(player.time.get(), 100.0);
}
