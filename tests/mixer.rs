mod common;

mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_color_mixer::config::Settings;
    use myrtio_color_mixer::error::{BusError, MixerError};
    use myrtio_color_mixer::events::{EventQueue, MixerEvent};
    use myrtio_color_mixer::menu::MenuId;
    use myrtio_color_mixer::mixer::{Mixer, MixerIo};
    use myrtio_color_mixer::pixel_bus::{PinId, StripConfig};
    use myrtio_color_mixer::state::{ChannelState, MenuState};
    use myrtio_color_mixer::tick_scheduler::TickScheduler;

    use crate::common::{FakeProbe, FakeScreen, FakeStrip, MemoryStore};

    type TestMixer<'a> = Mixer<'a, FakeProbe, FakeStrip, FakeScreen, MemoryStore, 4, 8>;

    const MENU_ENCODER: u8 = 0x39;

    fn open_strip(config: &StripConfig) -> FakeStrip {
        FakeStrip::new(usize::from(config.count))
    }

    fn io(probe: FakeProbe, store: MemoryStore) -> MixerIo<FakeProbe, FakeScreen, MemoryStore> {
        MixerIo {
            probe,
            screen: FakeScreen::new(103),
            store,
        }
    }

    fn full_probe() -> FakeProbe {
        FakeProbe::with_addresses(&[0x36, 0x37, 0x38, MENU_ENCODER])
    }

    fn drain<const N: usize>(events: &EventQueue<N>) -> Vec<MixerEvent> {
        core::iter::from_fn(|| events.try_receive().ok()).collect()
    }

    #[test]
    fn test_starts_on_rgb_mix() {
        let events = EventQueue::new();
        let mixer: TestMixer<'_> = Mixer::new(
            Settings::default(),
            io(full_probe(), MemoryStore::default()),
            open_strip,
            &events,
            Instant::from_millis(0),
        )
        .unwrap();

        assert_eq!(mixer.menu_id(), MenuId::RgbMix);
        assert_eq!(mixer.bus().len(), 4);
        assert!(!mixer.switcher().is_simulated());
        assert_eq!(mixer.screen().titles_shown, ["RGB Mix"]);
        assert!(events.is_empty());
    }

    #[test]
    fn test_restores_saved_state() {
        let mut saved = MenuState::default();
        saved.channels[0] = ChannelState {
            value: Some(200),
            encoder_position: Some(200),
            enabled: Some(true),
        };
        let store = MemoryStore {
            saved: Some(saved),
            ..MemoryStore::default()
        };

        let events = EventQueue::new();
        let mixer: TestMixer<'_> = Mixer::new(
            Settings::default(),
            io(full_probe(), store),
            open_strip,
            &events,
            Instant::from_millis(0),
        )
        .unwrap();
        assert_eq!(mixer.menu().combined_color().r, 200);
    }

    #[test]
    fn test_switches_menu_and_carries_state() {
        let probe = full_probe();
        probe.encoder(0x36).borrow_mut().readings.extend([-5]);
        probe.encoder(MENU_ENCODER).borrow_mut().readings.extend([1, 2]);

        let events = EventQueue::new();
        let mut mixer: TestMixer<'_> = Mixer::new(
            Settings::default(),
            io(probe, MemoryStore::default()),
            open_strip,
            &events,
            Instant::from_millis(0),
        )
        .unwrap();

        mixer.tick(Instant::from_millis(10));
        assert_eq!(mixer.menu_id(), MenuId::RgbMix);
        assert_eq!(mixer.menu().channels()[0].value(), 15);

        mixer.tick(Instant::from_millis(20));
        assert_eq!(mixer.menu_id(), MenuId::HueMix);
        assert_eq!(drain(&events), [MixerEvent::MenuSelected(1)]);

        let store = mixer.store();
        assert_eq!(store.saves, 1);
        assert_eq!(store.saved.unwrap().channels[0].value, Some(15));
        assert_eq!(mixer.menu().channels()[0].value(), 15);
        assert_eq!(mixer.screen().clears, 1);
        assert_eq!(mixer.screen().titles_shown, ["RGB Mix", "Color Mix"]);
    }

    #[test]
    fn test_publishes_button_events() {
        let probe = full_probe();
        probe.encoder(0x37).borrow_mut().presses.extend([true]);
        probe.encoder(MENU_ENCODER).borrow_mut().presses.extend([true]);

        let events = EventQueue::new();
        let mut mixer: TestMixer<'_> = Mixer::new(
            Settings::default(),
            io(probe, MemoryStore::default()),
            open_strip,
            &events,
            Instant::from_millis(0),
        )
        .unwrap();

        mixer.tick(Instant::from_millis(500));
        assert_eq!(
            drain(&events),
            [
                MixerEvent::ChannelToggled {
                    channel: 1,
                    enabled: false
                },
                MixerEvent::MenuButtonPressed,
            ]
        );
        assert!(!mixer.menu().channels()[1].is_enabled());
        assert_eq!(mixer.menu_id(), MenuId::RgbMix);
    }

    #[test]
    fn test_missing_encoders_are_simulated() {
        let events = EventQueue::new();
        let mut mixer: TestMixer<'_> = Mixer::new(
            Settings::default(),
            io(FakeProbe::with_addresses(&[0x37]), MemoryStore::default()),
            open_strip,
            &events,
            Instant::from_millis(0),
        )
        .unwrap();

        assert!(mixer.switcher().is_simulated());
        let channels = mixer.menu().channels();
        assert!(channels[0].is_simulated());
        assert!(!channels[1].is_simulated());
        assert!(channels[2].is_simulated());

        for tick in 1..20 {
            mixer.tick(Instant::from_millis(tick * 50));
        }
        assert_eq!(mixer.menu_id(), MenuId::RgbMix);
    }

    #[test]
    fn test_failed_save_is_not_fatal() {
        let probe = full_probe();
        probe.encoder(MENU_ENCODER).borrow_mut().readings.extend([-2]);
        let store = MemoryStore {
            fail_saves: true,
            ..MemoryStore::default()
        };

        let events = EventQueue::new();
        let mut mixer: TestMixer<'_> = Mixer::new(
            Settings::default(),
            io(probe, store),
            open_strip,
            &events,
            Instant::from_millis(0),
        )
        .unwrap();
        mixer.tick(Instant::from_millis(10));
        assert_eq!(mixer.menu_id(), MenuId::HueMix);
        assert_eq!(mixer.store().saves, 0);
    }

    #[test]
    fn test_too_many_strips() {
        let events: EventQueue<8> = EventQueue::new();
        let result: Result<Mixer<'_, FakeProbe, FakeStrip, FakeScreen, MemoryStore, 2, 8>, _> =
            Mixer::new(
                Settings::default(),
                io(full_probe(), MemoryStore::default()),
                open_strip,
                &events,
                Instant::from_millis(0),
            );
        assert!(matches!(
            result,
            Err(MixerError::Bus(BusError::RegistryFull(PinId(11))))
        ));
    }

    #[test]
    fn test_scheduler_pacing() {
        let events = EventQueue::new();
        let mixer: TestMixer<'_> = Mixer::new(
            Settings::default(),
            io(full_probe(), MemoryStore::default()),
            open_strip,
            &events,
            Instant::from_millis(0),
        )
        .unwrap();
        let mut scheduler = TickScheduler::new(mixer);

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.next_deadline, Instant::from_millis(50));
        assert_eq!(result.sleep_duration, Duration::from_millis(50));

        let result = scheduler.tick(Instant::from_millis(60));
        assert_eq!(result.next_deadline, Instant::from_millis(100));
        assert_eq!(result.sleep_duration, Duration::from_millis(40));

        // A long stall drops the backlog
        let result = scheduler.tick(Instant::from_millis(500));
        assert_eq!(result.next_deadline, Instant::from_millis(550));
        assert_eq!(scheduler.ticks(), 3);
        assert_eq!(scheduler.mixer().menu_id(), MenuId::RgbMix);
    }
}
