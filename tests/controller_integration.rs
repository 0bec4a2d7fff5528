mod support;

use support::wav::write_test_wav;

use soundpad::{
    app_dirs::AppPaths,
    audio::{PlaybackBackend, PlaybackController, PlaybackError, PlaybackHandle, PlaybackState},
    config,
    egui_app::{
        controller::{AccessGrant, EguiController, PickedSound, SoundPicker, picked_from_path},
        sound_view_model::{SelectionState, SoundViewModel},
        state::BoardTab,
        ui::style::StatusTone,
        view_model::{ButtonTone, FavoriteIcon, SlotAction},
    },
    prefs::PreferenceStore,
    sounds::{SoundItem, SoundRepository},
};
use std::{
    cell::{Cell, RefCell},
    collections::{HashSet, VecDeque},
    path::PathBuf,
    rc::Rc,
    sync::Arc,
};
use tempfile::TempDir;

#[derive(Default)]
struct Ledger {
    started: Vec<String>,
    live: usize,
    max_live: usize,
    finish_flags: Vec<Rc<Cell<bool>>>,
    failing: HashSet<String>,
}

struct FakeHandle {
    ledger: Rc<RefCell<Ledger>>,
    finished: Rc<Cell<bool>>,
}

impl PlaybackHandle for FakeHandle {
    fn is_finished(&self) -> bool {
        self.finished.get()
    }

    fn stop(&mut self) {}
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.ledger.borrow_mut().live -= 1;
    }
}

struct FakeBackend {
    ledger: Rc<RefCell<Ledger>>,
}

impl PlaybackBackend for FakeBackend {
    fn start(&mut self, uri: &str) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        let mut ledger = self.ledger.borrow_mut();
        if ledger.failing.contains(uri) {
            return Err(PlaybackError::Decode {
                uri: uri.to_string(),
                message: "not audio".into(),
            });
        }
        ledger.started.push(uri.to_string());
        ledger.live += 1;
        ledger.max_live = ledger.max_live.max(ledger.live);
        let finished = Rc::new(Cell::new(false));
        ledger.finish_flags.push(finished.clone());
        Ok(Box::new(FakeHandle {
            ledger: self.ledger.clone(),
            finished,
        }))
    }
}

struct QueuedPicker {
    picks: Rc<RefCell<VecDeque<Option<PickedSound>>>>,
}

impl SoundPicker for QueuedPicker {
    fn pick_sound(&mut self) -> Option<PickedSound> {
        self.picks.borrow_mut().pop_front().flatten()
    }
}

struct ControllerHarness {
    temp: TempDir,
    paths: AppPaths,
    picks: Rc<RefCell<VecDeque<Option<PickedSound>>>>,
    ledger: Rc<RefCell<Ledger>>,
    pub controller: EguiController,
}

impl ControllerHarness {
    fn new() -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let paths = AppPaths::under(temp.path().join("config")).expect("create app folder");
        let picks = Rc::new(RefCell::new(VecDeque::new()));
        let ledger = Rc::new(RefCell::new(Ledger::default()));
        let controller = build_controller(&paths, &picks, &ledger);
        Self {
            temp,
            paths,
            picks,
            ledger,
            controller,
        }
    }

    /// Simulate an app restart against the same store file.
    fn restart(&mut self) {
        self.controller.shutdown();
        self.controller = build_controller(&self.paths, &self.picks, &self.ledger);
    }

    fn queue_wav(&self, name: &str) -> PathBuf {
        let path = self.temp.path().join("sounds").join(name);
        write_test_wav(&path, &[0.0, 0.25, -0.25, 0.5]);
        self.picks
            .borrow_mut()
            .push_back(Some(picked_from_path(&path)));
        path
    }

    fn queue_cancel(&self) {
        self.picks.borrow_mut().push_back(None);
    }

    fn assign(&mut self, slot: usize, name: &str) -> SoundItem {
        self.queue_wav(name);
        let action = self.controller.ui.slots[slot].click();
        assert_eq!(action, SlotAction::Assign(slot as u32));
        self.controller.handle_action(action);
        self.controller.ui.slots[slot]
            .sound
            .clone()
            .expect("slot filled after pick")
    }

    fn click(&mut self, slot: usize) {
        let action = self.controller.ui.slots[slot].click();
        self.controller.handle_action(action);
    }
}

fn build_controller(
    paths: &AppPaths,
    picks: &Rc<RefCell<VecDeque<Option<PickedSound>>>>,
    ledger: &Rc<RefCell<Ledger>>,
) -> EguiController {
    let settings = config::load_or_default(paths).expect("load settings");
    let store_path = config::store_path(paths, &settings);
    let store = PreferenceStore::open(&store_path).expect("open store");
    let view_model = SoundViewModel::new(SoundRepository::new(Arc::new(store)));
    let playback = PlaybackController::new(Box::new(FakeBackend {
        ledger: ledger.clone(),
    }));
    EguiController::new(
        view_model,
        playback,
        Box::new(QueuedPicker {
            picks: picks.clone(),
        }),
        settings.grid,
    )
}

#[test]
fn empty_board_has_twenty_placeholder_slots() {
    let harness = ControllerHarness::new();
    let slots = &harness.controller.ui.slots;
    assert_eq!(slots.len(), 20);
    assert!(slots.iter().all(|slot| slot.sound.is_none()));
    assert!(slots.iter().all(|slot| slot.favorite == FavoriteIcon::Hidden));
    assert!(harness.controller.ui.favorites.is_empty());
    assert!(config::config_path(&harness.paths).is_file());
    assert!(harness.paths.file("soundpad_prefs.db").is_file());
}

#[test]
fn picking_a_file_names_the_slot_after_the_file() {
    let mut harness = ControllerHarness::new();
    let sound = harness.assign(0, "kick.wav");
    assert_eq!(sound.name, "kick");
    assert!(sound.uri.starts_with("file://"));
    assert!(sound.uri.ends_with("kick.wav"));
    assert!(!sound.is_favorite);
    assert_eq!(harness.controller.ui.slots[0].label, "kick");
    assert_eq!(harness.controller.ui.slots[0].favorite, FavoriteIcon::Hollow);
    assert_eq!(harness.controller.ui.status.text, "Added kick to slot 1");
    assert_eq!(harness.controller.view_model().selection().sound_to_add, None);
}

#[test]
fn cancelled_pick_leaves_slot_pending_and_empty() {
    let mut harness = ControllerHarness::new();
    harness.queue_cancel();
    harness.click(2);
    assert_eq!(
        harness.controller.view_model().selection().sound_to_add,
        Some(2)
    );
    assert!(harness.controller.ui.slots[2].sound.is_none());
}

#[test]
fn denied_access_warns_but_still_adds_with_fallback_name() {
    let mut harness = ControllerHarness::new();
    harness.picks.borrow_mut().push_back(Some(PickedSound {
        uri: "/missing/clip".into(),
        display_name: None,
        access: AccessGrant::Denied("no such file".into()),
    }));
    harness.click(3);
    let slot = &harness.controller.ui.slots[3];
    assert_eq!(slot.label, "Sound 4");
    assert_eq!(slot.sound.as_ref().map(|s| s.uri.as_str()), Some("/missing/clip"));
    let status = &harness.controller.ui.status;
    assert_eq!(status.text, "Unable to save persistent access to this sound");
    assert_eq!(status.tone, StatusTone::Warning);
}

#[test]
fn toggling_favorite_twice_restores_original_flag() {
    let mut harness = ControllerHarness::new();
    harness.assign(0, "kick.wav");
    let stale = harness.controller.ui.slots[0]
        .favorite_click()
        .expect("filled slot has a star");

    harness.controller.handle_action(stale.clone());
    assert_eq!(harness.controller.ui.status.text, "Added to favorites");
    assert_eq!(harness.controller.ui.slots[0].favorite, FavoriteIcon::Filled);
    assert_eq!(harness.controller.ui.favorites.len(), 1);
    assert_eq!(harness.controller.ui.favorites[0].label, "kick");

    // Replaying the action built from the old render still flips the stored flag.
    harness.controller.handle_action(stale);
    assert_eq!(harness.controller.ui.status.text, "Removed from favorites");
    assert_eq!(harness.controller.ui.slots[0].favorite, FavoriteIcon::Hollow);
    assert!(harness.controller.ui.favorites.is_empty());
}

#[test]
fn selecting_another_sound_holds_one_handle() {
    let mut harness = ControllerHarness::new();
    harness.assign(0, "a.wav");
    harness.assign(1, "b.wav");

    harness.click(0);
    harness.click(1);
    {
        let ledger = harness.ledger.borrow();
        assert_eq!(ledger.started.len(), 2);
        assert_eq!(ledger.max_live, 1);
        assert_eq!(ledger.live, 1);
    }
    let playing = harness
        .controller
        .view_model()
        .selection()
        .playing_sound
        .clone()
        .expect("b playing");
    assert_eq!(playing.id, 1);
    assert_eq!(harness.controller.ui.slots[0].tone, ButtonTone::Normal);
    assert_eq!(harness.controller.ui.slots[1].tone, ButtonTone::Highlighted);

    // The replaced handle finishing must not end the current playback.
    harness.ledger.borrow().finish_flags[0].set(true);
    harness.controller.tick();
    assert!(matches!(
        harness.controller.playback_state(),
        PlaybackState::Playing(ref sound) if sound.id == 1
    ));

    harness.ledger.borrow().finish_flags[1].set(true);
    harness.controller.tick();
    assert_eq!(harness.controller.playback_state(), PlaybackState::Idle);
    assert_eq!(harness.controller.view_model().selection().playing_sound, None);
    assert!(!harness.controller.is_playing());
    assert_eq!(harness.controller.ui.slots[1].tone, ButtonTone::Normal);
    assert_eq!(harness.ledger.borrow().live, 0);
}

#[test]
fn playback_failure_reports_and_returns_to_idle() {
    let mut harness = ControllerHarness::new();
    let sound = harness.assign(0, "broken.wav");
    harness.ledger.borrow_mut().failing.insert(sound.uri.clone());

    harness.click(0);
    let status = &harness.controller.ui.status;
    assert_eq!(status.text, "Cannot play this sound. Long-press to replace it.");
    assert_eq!(status.tone, StatusTone::Error);
    assert_eq!(harness.controller.playback_state(), PlaybackState::Idle);
    let selection = harness.controller.view_model().selection();
    assert_eq!(selection.playing_sound, None);
    assert_eq!(selection.selected_sound.as_ref().map(|s| s.id), Some(0));
}

#[test]
fn explicit_stop_clears_highlight() {
    let mut harness = ControllerHarness::new();
    harness.assign(4, "hat.wav");
    harness.click(4);
    assert_eq!(harness.controller.ui.slots[4].tone, ButtonTone::Highlighted);

    harness.controller.stop_playing_sound();
    assert_eq!(harness.controller.ui.slots[4].tone, ButtonTone::Normal);
    assert_eq!(harness.ledger.borrow().live, 0);
}

#[test]
fn long_press_replaces_sound_in_place() {
    let mut harness = ControllerHarness::new();
    harness.assign(0, "kick.wav");
    harness.queue_wav("snare.wav");
    let action = harness.controller.ui.slots[0]
        .long_press()
        .expect("filled slot supports replace");
    harness.controller.handle_action(action);

    let sounds = harness.controller.view_model().sounds();
    assert_eq!(sounds.len(), 1);
    assert_eq!(sounds[0].id, 0);
    assert_eq!(sounds[0].name, "snare");
    assert!(
        harness
            .controller
            .ui
            .status
            .log
            .iter()
            .any(|line| line == "Replacing sound: kick")
    );
}

#[test]
fn clearing_a_playing_slot_stops_it() {
    let mut harness = ControllerHarness::new();
    harness.assign(5, "clap.wav");
    harness.click(5);
    let action = harness.controller.ui.slots[5].clear().expect("clear action");
    harness.controller.handle_action(action);

    assert!(harness.controller.ui.slots[5].sound.is_none());
    assert_eq!(harness.controller.playback_state(), PlaybackState::Idle);
    assert_eq!(harness.ledger.borrow().live, 0);
    assert_eq!(harness.controller.ui.status.text, "Cleared slot 6");
}

#[test]
fn sounds_and_favorites_survive_restart_but_playback_does_not() {
    let mut harness = ControllerHarness::new();
    harness.assign(0, "kick.wav");
    harness.assign(7, "crash.wav");
    let favorite = harness.controller.ui.slots[7].favorite_click().unwrap();
    harness.controller.handle_action(favorite);
    harness.click(0);

    harness.restart();
    assert_eq!(harness.ledger.borrow().live, 0);
    let controller = &harness.controller;
    assert_eq!(controller.ui.slots[0].label, "kick");
    assert_eq!(controller.ui.slots[7].favorite, FavoriteIcon::Filled);
    assert_eq!(controller.ui.favorites.len(), 1);
    assert_eq!(controller.ui.favorites[0].slot, 7);
    assert_eq!(controller.view_model().selection(), &SelectionState::default());
    assert!(controller.ui.slots.iter().all(|slot| slot.tone == ButtonTone::Normal));
}

#[test]
fn favorites_tab_plays_from_favorite_rows() {
    let mut harness = ControllerHarness::new();
    harness.assign(2, "tom.wav");
    let favorite = harness.controller.ui.slots[2].favorite_click().unwrap();
    harness.controller.handle_action(favorite);
    harness.controller.select_tab(BoardTab::Favorites);
    assert_eq!(harness.controller.ui.tab, BoardTab::Favorites);

    let action = harness.controller.ui.favorites[0].click();
    harness.controller.handle_action(action);
    assert_eq!(
        harness.controller.ui.favorites[0].tone,
        ButtonTone::Highlighted
    );
    assert_eq!(harness.controller.ui.slots[2].tone, ButtonTone::Highlighted);
}

#[cfg(unix)]
#[test]
fn file_name_with_delimiter_stays_playable() {
    let mut harness = ControllerHarness::new();
    let sound = harness.assign(6, "a|b.wav");
    assert_eq!(sound.name, "a-b");
    assert!(sound.uri.starts_with("file://"));
    harness.click(6);
    assert_eq!(harness.ledger.borrow().started, vec![sound.uri.clone()]);
    assert!(harness.controller.is_playing());
}

#[test]
fn orphan_favorite_can_be_unstarred() {
    let mut harness = ControllerHarness::new();
    {
        let store = PreferenceStore::open(harness.paths.file("soundpad_prefs.db"))
            .expect("open second connection");
        store
            .edit(|prefs| {
                prefs.insert("fav_9".into(), "ghost|file:///ghost.wav".into());
            })
            .expect("write orphan favorite");
    }
    harness.restart();
    assert_eq!(harness.controller.ui.favorites.len(), 1);
    assert!(harness.controller.ui.slots[9].sound.is_none());

    let action = harness.controller.ui.favorites[0]
        .favorite_click()
        .expect("favorite rows carry a star");
    harness.controller.handle_action(action);
    assert!(harness.controller.ui.favorites.is_empty());
    assert_eq!(harness.controller.ui.status.text, "Removed from favorites");
}
