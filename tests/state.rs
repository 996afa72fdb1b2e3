mod tests {
    use embassy_time::Duration;
    use myrtio_color_mixer::state::{ChannelState, MenuState, NoopStore, StateStore};

    #[test]
    fn test_serialize_flat_document() {
        let mut state = MenuState {
            trail_delay: Some(Duration::from_millis(10)),
            knob_sensitivity: Some(3),
            ..MenuState::default()
        };
        state.channels[0] = ChannelState {
            value: Some(12),
            encoder_position: Some(12),
            enabled: Some(true),
        };

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(
            json,
            r#"{"trail_delay":0.01,"knob_sensitivity":3,"channel_0":{"value":12,"encoder_position":12,"enabled":true},"channel_1":{},"channel_2":{}}"#
        );
    }

    #[test]
    fn test_deserialize_partial_document() {
        let state: MenuState =
            serde_json::from_str(r#"{"trail_delay": 0.02, "channel_1": {"value": 200}}"#).unwrap();
        assert_eq!(state.trail_delay, Some(Duration::from_millis(20)));
        assert_eq!(state.knob_sensitivity, None);
        assert_eq!(state.channel(1).value, Some(200));
        assert_eq!(state.channel(1).enabled, None);
        assert_eq!(state.channel(0), ChannelState::default());
        assert_eq!(state.channel(7), ChannelState::default());

        let empty: MenuState = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, MenuState::default());
    }

    #[test]
    fn test_round_trip() {
        let mut state = MenuState {
            trail_delay: Some(Duration::from_millis(250)),
            knob_sensitivity: Some(5),
            ..MenuState::default()
        };
        state.channels[2].enabled = Some(false);
        let json = serde_json::to_string(&state).unwrap();
        let restored: MenuState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_noop_store() {
        let mut store = NoopStore;
        store.save(&MenuState::default()).unwrap();
        assert_eq!(store.load().unwrap(), MenuState::default());
    }
}
