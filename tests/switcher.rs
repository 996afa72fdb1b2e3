mod common;

mod tests {
    use embassy_time::Instant;
    use myrtio_color_mixer::debounce::DEFAULT_DEBOUNCE;
    use myrtio_color_mixer::encoder::{EncoderConfig, EncoderProbe};
    use myrtio_color_mixer::switcher::MenuSwitcher;

    use crate::common::{BusFault, FakeEncoder, FakeProbe};

    const MENU_ENCODER: u8 = 0x39;

    fn simulated_switcher(menu_count: usize) -> MenuSwitcher<FakeEncoder> {
        MenuSwitcher::new(
            Err::<FakeEncoder, _>(BusFault),
            MENU_ENCODER,
            menu_count,
            2,
            DEFAULT_DEBOUNCE,
            Instant::from_millis(0),
        )
    }

    #[test]
    fn test_accumulate_steps_once() {
        let mut switcher = simulated_switcher(2);
        assert!(switcher.is_simulated());
        assert_eq!(switcher.accumulate(1), None);
        assert_eq!(switcher.accumulated_delta(), 1);
        assert_eq!(switcher.accumulate(1), Some(1));
        assert_eq!(switcher.selected_index(), 1);
        assert_eq!(switcher.accumulated_delta(), 0);
    }

    #[test]
    fn test_accumulate_wraps_both_ways() {
        let mut switcher = simulated_switcher(3);
        assert_eq!(switcher.accumulate(-2), Some(2));
        assert_eq!(switcher.accumulate(-5), Some(1));
        assert_eq!(switcher.accumulate(2), Some(2));
        assert_eq!(switcher.accumulate(2), Some(0));
    }

    #[test]
    fn test_update_reads_hardware() {
        let mut probe = FakeProbe::with_addresses(&[MENU_ENCODER]);
        let encoder = probe.encoder(MENU_ENCODER);
        encoder.borrow_mut().readings.extend([1, 2, 3]);

        let mut switcher = MenuSwitcher::new(
            probe.probe(&EncoderConfig::new(MENU_ENCODER)),
            MENU_ENCODER,
            2,
            2,
            DEFAULT_DEBOUNCE,
            Instant::from_millis(0),
        );
        assert!(!switcher.is_simulated());

        assert_eq!(switcher.update(Instant::from_millis(10)).selected, None);
        assert_eq!(switcher.update(Instant::from_millis(20)).selected, Some(1));
        // The encoder is rewound after a step
        assert_eq!(encoder.borrow().writes.last(), Some(&0));
        // 3 counts as a fresh delta of 3 from the rewound position
        assert_eq!(switcher.update(Instant::from_millis(30)).selected, Some(0));
    }

    #[test]
    fn test_update_reports_button() {
        let mut probe = FakeProbe::with_addresses(&[MENU_ENCODER]);
        let encoder = probe.encoder(MENU_ENCODER);
        encoder.borrow_mut().presses.extend([false, true]);

        let mut switcher = MenuSwitcher::new(
            probe.probe(&EncoderConfig::new(MENU_ENCODER)),
            MENU_ENCODER,
            2,
            2,
            DEFAULT_DEBOUNCE,
            Instant::from_millis(0),
        );
        assert!(!switcher.update(Instant::from_millis(500)).button_pressed);
        assert!(switcher.update(Instant::from_millis(600)).button_pressed);
        assert_eq!(switcher.selected_index(), 0);
    }
}
