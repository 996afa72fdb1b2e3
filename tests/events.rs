mod tests {
    use myrtio_color_mixer::events::{EventQueue, MixerEvent, TryReceiveError};

    #[test]
    fn test_fifo_order() {
        let queue: EventQueue<4> = EventQueue::new();
        assert!(queue.is_empty());
        queue.publish(MixerEvent::MenuSelected(1));
        queue.publish(MixerEvent::MenuButtonPressed);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.try_receive(), Ok(MixerEvent::MenuSelected(1)));
        assert_eq!(queue.try_receive(), Ok(MixerEvent::MenuButtonPressed));
        assert_eq!(queue.try_receive(), Err(TryReceiveError));
    }

    #[test]
    fn test_full_queue_drops_oldest() {
        let queue: EventQueue<2> = EventQueue::new();
        assert_eq!(queue.publish(MixerEvent::MenuSelected(0)), None);
        assert_eq!(queue.publish(MixerEvent::MenuSelected(1)), None);
        assert_eq!(
            queue.publish(MixerEvent::ChannelToggled {
                channel: 2,
                enabled: false
            }),
            Some(MixerEvent::MenuSelected(0))
        );
        assert_eq!(queue.try_receive(), Ok(MixerEvent::MenuSelected(1)));
        assert_eq!(
            queue.try_receive(),
            Ok(MixerEvent::ChannelToggled {
                channel: 2,
                enabled: false
            })
        );
    }
}
